use std::mem::size_of;
use std::os::raw::c_void;
use std::ptr;

use crate::c_str;
use crate::math::Vector2;
use crate::nurbs::CurveEditor;

use super::shader_program::ShaderProgram;

/// One dynamic 2D vertex buffer, re-uploaded for each overlay piece (control
/// points, spline polyline, construction layers). The curve changes shape on
/// every edit, so there is nothing worth caching.
pub struct CurveGpu {
    vao: u32,
    vbo: u32,
}

impl CurveGpu {
    pub fn new() -> Self {
        let mut overlay = Self { vao: 0, vbo: 0 };

        unsafe {
            gl::GenVertexArrays(1, &mut overlay.vao);
            gl::GenBuffers(1, &mut overlay.vbo);

            gl::BindVertexArray(overlay.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, overlay.vbo);
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                2,
                gl::FLOAT,
                gl::FALSE,
                size_of::<Vector2>() as i32,
                ptr::null(),
            );
            gl::BindVertexArray(0);
        }

        overlay
    }

    pub fn draw(&self, editor: &CurveEditor, shader: &ShaderProgram) {
        let curve = &editor.curve;
        if curve.point_count() == 0 {
            return;
        }

        shader.bind();
        unsafe {
            gl::BindVertexArray(self.vao);

            // Control points, sized by weight. Weight-zero points draw with
            // the red channel masked so they come out cyan-ish.
            self.upload(&curve.control_points);
            shader.set_vec4(c_str!("color_in"), 1.0, 1.0, 0.0, 0.0);
            for i in 0..curve.point_count() {
                let weight = curve.weight(i);
                gl::PointSize((15.0 * weight).max(1.0));
                if weight == 0.0 {
                    gl::ColorMask(gl::FALSE, gl::TRUE, gl::TRUE, gl::TRUE);
                } else {
                    gl::ColorMask(gl::TRUE, gl::TRUE, gl::TRUE, gl::TRUE);
                }
                gl::DrawArrays(gl::POINTS, i as i32, 1);
            }
            gl::ColorMask(gl::TRUE, gl::TRUE, gl::TRUE, gl::TRUE);

            if !curve.spline.is_empty() {
                self.upload(&curve.spline);
                shader.set_vec4(c_str!("color_in"), 1.0, 1.0, 1.0, 0.0);
                gl::DrawArrays(gl::LINE_STRIP, 0, curve.spline.len() as i32);

                if editor.show_construction {
                    for layer in curve.construction_layers(curve.u_display) {
                        self.upload(&layer);
                        shader.set_vec4(c_str!("color_in"), 1.0, 0.0, 0.0, 0.0);
                        gl::PointSize(10.0);
                        gl::DrawArrays(gl::POINTS, 0, layer.len() as i32);
                        gl::DrawArrays(gl::LINE_STRIP, 0, layer.len() as i32);
                    }
                }
            }

            gl::BindVertexArray(0);
        }
    }

    fn upload(&self, points: &[Vector2]) {
        unsafe {
            gl::BindBuffer(gl::ARRAY_BUFFER, self.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(points) as isize,
                points.as_ptr() as *const c_void,
                gl::DYNAMIC_DRAW,
            );
        }
    }
}

impl Drop for CurveGpu {
    fn drop(&mut self) {
        unsafe {
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
            }
            if self.vbo != 0 {
                gl::DeleteBuffers(1, &self.vbo);
            }
        }
    }
}
