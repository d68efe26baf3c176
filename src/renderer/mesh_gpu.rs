use std::mem::{offset_of, size_of};
use std::os::raw::c_void;
use std::ptr;

use crate::loaders::obj::MeshVertex;

/// GPU copy of the indexed scene mesh. The material id rides along as an
/// integer attribute, so the whole scene draws in one call.
pub struct MeshGpu {
    index_count: i32,
    vao: u32,
    vbo: u32,
    ebo: u32,
}

impl MeshGpu {
    pub fn new(vertices: &[MeshVertex], indices: &[u32]) -> Self {
        let mut mesh = Self {
            index_count: indices.len() as i32,
            vao: 0,
            vbo: 0,
            ebo: 0,
        };

        unsafe {
            gl::GenVertexArrays(1, &mut mesh.vao);
            gl::GenBuffers(1, &mut mesh.vbo);
            gl::GenBuffers(1, &mut mesh.ebo);

            gl::BindVertexArray(mesh.vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, mesh.vbo);
            upload_buffer_data(gl::ARRAY_BUFFER, vertices);

            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, mesh.ebo);
            upload_buffer_data(gl::ELEMENT_ARRAY_BUFFER, indices);

            let size = size_of::<MeshVertex>() as i32;
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                size,
                offset_of!(MeshVertex, position) as *const c_void,
            );

            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(
                1,
                3,
                gl::FLOAT,
                gl::FALSE,
                size,
                offset_of!(MeshVertex, normal) as *const c_void,
            );

            gl::EnableVertexAttribArray(2);
            gl::VertexAttribPointer(
                2,
                2,
                gl::FLOAT,
                gl::FALSE,
                size,
                offset_of!(MeshVertex, tex_coords) as *const c_void,
            );

            // Integer attribute: no normalization path, so it needs the I
            // variant or the id arrives as garbage floats.
            gl::EnableVertexAttribArray(3);
            gl::VertexAttribIPointer(
                3,
                1,
                gl::INT,
                size,
                offset_of!(MeshVertex, material_id) as *const c_void,
            );

            gl::BindVertexArray(0);
        }

        mesh
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                self.index_count,
                gl::UNSIGNED_INT,
                ptr::null(),
            );
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for MeshGpu {
    fn drop(&mut self) {
        unsafe {
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
            }
            if self.vbo != 0 {
                gl::DeleteBuffers(1, &self.vbo);
            }
            if self.ebo != 0 {
                gl::DeleteBuffers(1, &self.ebo);
            }
        }
    }
}

/// Position-only buffers for a tessellated solid.
pub struct SolidGpu {
    index_count: i32,
    vao: u32,
    vbo: u32,
    ebo: u32,
}

impl SolidGpu {
    pub fn new(vertices: &[f32], indices: &[u32]) -> Self {
        let mut solid = Self {
            index_count: indices.len() as i32,
            vao: 0,
            vbo: 0,
            ebo: 0,
        };

        unsafe {
            gl::GenVertexArrays(1, &mut solid.vao);
            gl::GenBuffers(1, &mut solid.vbo);
            gl::GenBuffers(1, &mut solid.ebo);

            gl::BindVertexArray(solid.vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, solid.vbo);
            upload_buffer_data(gl::ARRAY_BUFFER, vertices);

            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, solid.ebo);
            upload_buffer_data(gl::ELEMENT_ARRAY_BUFFER, indices);

            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                3,
                gl::FLOAT,
                gl::FALSE,
                3 * size_of::<f32>() as i32,
                ptr::null(),
            );

            gl::BindVertexArray(0);
        }

        solid
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                self.index_count,
                gl::UNSIGNED_INT,
                ptr::null(),
            );
            gl::BindVertexArray(0);
        }
    }
}

impl Drop for SolidGpu {
    fn drop(&mut self) {
        unsafe {
            if self.vao != 0 {
                gl::DeleteVertexArrays(1, &self.vao);
            }
            if self.vbo != 0 {
                gl::DeleteBuffers(1, &self.vbo);
            }
            if self.ebo != 0 {
                gl::DeleteBuffers(1, &self.ebo);
            }
        }
    }
}

unsafe fn upload_buffer_data<T>(target: u32, data: &[T]) {
    let size = (std::mem::size_of_val(data)) as isize;
    let ptr = if data.is_empty() {
        ptr::null()
    } else {
        data.as_ptr() as *const c_void
    };

    unsafe {
        gl::BufferData(target, size, ptr, gl::STATIC_DRAW);
    }
}
