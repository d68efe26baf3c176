use std::f32::consts::PI;

use crate::math::{Matrix4, Vector3};

/// The six procedural primitives, each tessellating into a flat position
/// soup plus a triangle index list.
#[derive(Clone, Copy, Debug)]
pub enum SolidKind {
    Cube {
        size: f32,
    },
    Cone {
        radius: f32,
        height: f32,
        corners: u32,
    },
    Cylinder {
        radius: f32,
        height: f32,
        corners: u32,
    },
    Sphere {
        radius: f32,
        segments: u32,
    },
    Prism {
        corners: u32,
        radius: f32,
        height: f32,
    },
    Frustum {
        corners: u32,
        bottom_radius: f32,
        top_radius: f32,
        height: f32,
    },
}

impl SolidKind {
    pub fn tessellate(&self) -> (Vec<f32>, Vec<u32>) {
        match *self {
            SolidKind::Cube { size } => cube(size),
            SolidKind::Cone {
                radius,
                height,
                corners,
            } => cone(radius, height, corners),
            SolidKind::Cylinder {
                radius,
                height,
                corners,
            } => ring_solid(corners, radius, radius, height),
            SolidKind::Sphere { radius, segments } => sphere(radius, segments),
            SolidKind::Prism {
                corners,
                radius,
                height,
            } => ring_solid(corners, radius, radius, height),
            SolidKind::Frustum {
                corners,
                bottom_radius,
                top_radius,
                height,
            } => ring_solid(corners, bottom_radius, top_radius, height),
        }
    }
}

fn cube(size: f32) -> (Vec<f32>, Vec<u32>) {
    #[rustfmt::skip]
    let vertices: Vec<f32> = [
        -0.5, -0.5, -0.5,
         0.5, -0.5, -0.5,
        -0.5,  0.5, -0.5,
         0.5,  0.5, -0.5,
        -0.5, -0.5,  0.5,
         0.5, -0.5,  0.5,
        -0.5,  0.5,  0.5,
         0.5,  0.5,  0.5,
    ]
    .iter()
    .map(|v| v * size)
    .collect();

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2,  1, 2, 3,
        4, 5, 6,  5, 6, 7,
        2, 6, 7,  2, 7, 3,
        0, 4, 5,  0, 5, 1,
        7, 1, 5,  7, 1, 3,
        6, 0, 4,  6, 0, 2,
    ];

    (vertices, indices)
}

/// Disc base fanned around its center plus a lateral fan to the apex.
fn cone(radius: f32, height: f32, corners: u32) -> (Vec<f32>, Vec<u32>) {
    let angle = 2.0 * PI / corners as f32;
    let mut vertices = vec![0.0; (corners as usize + 2) * 3];
    let mut indices = vec![0u32; corners as usize * 6];

    // Bottom center sits at index 0, the apex at the last index.
    let apex = vertices.len() - 3;
    vertices[apex + 1] = height;

    for i in 0..corners as usize {
        let theta = angle * i as f32;
        vertices[3 * i + 3] = theta.cos() * radius;
        vertices[3 * i + 4] = 0.0;
        vertices[3 * i + 5] = -theta.sin() * radius;

        let base = i * 6;
        if i == 0 {
            // The seam wedge closes the ring back onto vertex 1.
            indices[0] = 0;
            indices[1] = corners;
            indices[2] = 1;
            indices[3] = corners + 1;
            indices[4] = corners;
            indices[5] = 1;
        } else {
            indices[base] = 0;
            indices[base + 1] = i as u32;
            indices[base + 2] = i as u32 + 1;
            indices[base + 3] = corners + 1;
            indices[base + 4] = i as u32;
            indices[base + 5] = i as u32 + 1;
        }
    }

    (vertices, indices)
}

/// Shared lateral topology for cylinders, prisms and frusta: two rings of
/// `corners` vertices around centered caps, caps fanned from their centers
/// and the side wall split into two triangles per segment. A prism is just a
/// low corner count; a frustum tapers the top ring.
fn ring_solid(corners: u32, bottom_radius: f32, top_radius: f32, height: f32) -> (Vec<f32>, Vec<u32>) {
    let angle = 2.0 * PI / corners as f32;
    let ring = corners as usize + 1;
    let mut vertices = vec![0.0; ring * 2 * 3];
    let mut indices = vec![0u32; corners as usize * 12];

    // Bottom center at 0, top center at ring start.
    vertices[ring * 3 + 1] = height;

    let top = corners + 1;
    for i in 0..corners as usize {
        let theta = angle * i as f32;
        vertices[3 * i + 3] = theta.cos() * bottom_radius;
        vertices[3 * i + 4] = 0.0;
        vertices[3 * i + 5] = -theta.sin() * bottom_radius;
        vertices[ring * 3 + 3 * i + 3] = theta.cos() * top_radius;
        vertices[ring * 3 + 3 * i + 4] = height;
        vertices[ring * 3 + 3 * i + 5] = -theta.sin() * top_radius;

        let base = i * 12;
        if i == 0 {
            indices[0] = 0;
            indices[1] = corners;
            indices[2] = 1;
            indices[3] = 2 * corners + 1;
            indices[4] = corners;
            indices[5] = 1;
            indices[6] = top;
            indices[7] = top + 1;
            indices[8] = 2 * corners + 1;
            indices[9] = 1;
            indices[10] = top + 1;
            indices[11] = 2 * corners + 1;
        } else {
            let i = i as u32;
            indices[base] = 0;
            indices[base + 1] = i;
            indices[base + 2] = i + 1;
            indices[base + 3] = top + i;
            indices[base + 4] = i;
            indices[base + 5] = i + 1;
            indices[base + 6] = top;
            indices[base + 7] = top + i;
            indices[base + 8] = top + i + 1;
            indices[base + 9] = i + 1;
            indices[base + 10] = top + i;
            indices[base + 11] = top + i + 1;
        }
    }

    (vertices, indices)
}

/// Latitude/longitude sphere with (segments + 1)^2 vertices; the poles and
/// the seam column are duplicated, which keeps the index arithmetic uniform.
fn sphere(radius: f32, segments: u32) -> (Vec<f32>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(((segments + 1) * (segments + 1) * 3) as usize);
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);

    for y in 0..=segments {
        for x in 0..=segments {
            let x_segment = x as f32 / segments as f32;
            let y_segment = y as f32 / segments as f32;
            let theta = x_segment * 2.0 * PI;
            let phi = y_segment * PI;
            vertices.push(theta.cos() * phi.sin() * radius);
            vertices.push(phi.cos() * radius);
            vertices.push(theta.sin() * phi.sin() * radius);
        }
    }

    let stride = segments + 1;
    for i in 0..segments {
        for j in 0..segments {
            indices.push(i * stride + j);
            indices.push((i + 1) * stride + j);
            indices.push((i + 1) * stride + j + 1);
            indices.push(i * stride + j);
            indices.push((i + 1) * stride + j + 1);
            indices.push(i * stride + j + 1);
        }
    }

    (vertices, indices)
}

/// Scale pulse bounds and rate for the animated solids.
const SCALE_MIN: f32 = 0.8;
const SCALE_MAX: f32 = 1.0;
const SCALE_RATE: f32 = 0.25;
const ANGULAR_VELOCITY: f32 = 1.0;

/// A placed primitive. Solids hover in a hexagon around the camera, spin in
/// place and optionally pulse their scale.
pub struct Solid {
    pub kind: SolidKind,
    /// Offset from the camera position, already scaled down.
    pub camera_offset: Vector3,
    pub position: Vector3,
    pub scale: Vector3,
    pub rotate_self: f32,
    pub rotate_camera: f32,
    pulse_direction: f32,
}

impl Solid {
    pub fn new(kind: SolidKind, camera_offset: Vector3) -> Self {
        Solid {
            kind,
            camera_offset,
            position: camera_offset,
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotate_self: 0.0,
            rotate_camera: 0.0,
            pulse_direction: 1.0,
        }
    }

    /// Translation * self-rotation * scale, in that order.
    pub fn model_matrix(&self) -> Matrix4 {
        let translation = Matrix4::from_translation(self.position);
        let rotation = Matrix4::from_axis_angle(
            Vector3::new(-1.0, -1.0, -1.0).normalize(),
            self.rotate_self,
        );
        let scale = Matrix4::from_scale(self.scale);
        translation * rotation * scale
    }

    pub fn follow_camera(&mut self, camera_position: Vector3) {
        self.position = camera_position + self.camera_offset;
    }

    pub fn spin(&mut self, delta_time: f32) {
        self.rotate_self += ANGULAR_VELOCITY * delta_time;
        self.rotate_camera += ANGULAR_VELOCITY * delta_time;
    }

    /// Oscillates the scale between the pulse bounds.
    pub fn pulse(&mut self, delta_time: f32) {
        if self.scale.x < SCALE_MIN {
            self.pulse_direction = 1.0;
        } else if self.scale.x > SCALE_MAX {
            self.pulse_direction = -1.0;
        }
        let step = self.pulse_direction * delta_time * SCALE_RATE;
        self.scale += Vector3::new(step, step, step);
    }
}

/// The default hexagon of solids, sized to sit comfortably inside a room
/// interior.
pub fn default_solids() -> Vec<Solid> {
    vec![
        Solid::new(
            SolidKind::Cube { size: 0.05 },
            Vector3::new(-1.0, 0.0, 1.73) * 0.1,
        ),
        Solid::new(
            SolidKind::Cone {
                radius: 0.025,
                height: 0.05,
                corners: 36,
            },
            Vector3::new(1.0, 0.0, 1.73) * 0.1,
        ),
        Solid::new(
            SolidKind::Cylinder {
                radius: 0.025,
                height: 0.05,
                corners: 36,
            },
            Vector3::new(2.0, 0.0, 0.0) * 0.1,
        ),
        Solid::new(
            SolidKind::Sphere {
                radius: 0.025,
                segments: 36,
            },
            Vector3::new(1.0, 0.0, -1.73) * 0.1,
        ),
        Solid::new(
            SolidKind::Prism {
                corners: 3,
                radius: 0.025,
                height: 0.05,
            },
            Vector3::new(-1.0, 0.0, -1.73) * 0.1,
        ),
        Solid::new(
            SolidKind::Frustum {
                corners: 3,
                bottom_radius: 0.025,
                top_radius: 0.05,
                height: 0.05,
            },
            Vector3::new(-2.0, 0.0, 0.0) * 0.1,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_bounds(vertices: &[f32], indices: &[u32]) {
        let count = (vertices.len() / 3) as u32;
        assert_eq!(indices.len() % 3, 0);
        assert!(indices.iter().all(|&i| i < count));
    }

    #[test]
    fn cube_has_eight_corners_and_twelve_faces() {
        let (vertices, indices) = SolidKind::Cube { size: 2.0 }.tessellate();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);
        assert!(vertices.iter().all(|v| v.abs() == 1.0));
        check_bounds(&vertices, &indices);
    }

    #[test]
    fn cone_counts_match_the_corner_count() {
        let (vertices, indices) = SolidKind::Cone {
            radius: 0.5,
            height: 1.0,
            corners: 36,
        }
        .tessellate();
        // ring + bottom center + apex
        assert_eq!(vertices.len(), (36 + 2) * 3);
        assert_eq!(indices.len(), 36 * 6);
        check_bounds(&vertices, &indices);
    }

    #[test]
    fn cylinder_counts_match_the_corner_count() {
        let (vertices, indices) = SolidKind::Cylinder {
            radius: 0.5,
            height: 1.0,
            corners: 36,
        }
        .tessellate();
        assert_eq!(vertices.len(), (36 + 1) * 2 * 3);
        assert_eq!(indices.len(), 36 * 12);
        check_bounds(&vertices, &indices);
    }

    #[test]
    fn sphere_grid_is_segments_plus_one_squared() {
        let (vertices, indices) = SolidKind::Sphere {
            radius: 0.5,
            segments: 8,
        }
        .tessellate();
        assert_eq!(vertices.len(), 9 * 9 * 3);
        assert_eq!(indices.len(), 8 * 8 * 6);
        check_bounds(&vertices, &indices);

        // Every vertex sits on the sphere surface.
        for p in vertices.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!((r - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn frustum_tapers_the_top_ring() {
        let (vertices, _) = SolidKind::Frustum {
            corners: 4,
            bottom_radius: 1.0,
            top_radius: 0.5,
            height: 1.0,
        }
        .tessellate();
        // First ring vertex sits at the bottom radius, its top counterpart
        // at the tapered radius.
        assert!((vertices[3] - 1.0).abs() < 1e-6);
        let ring = 5 * 3;
        assert!((vertices[ring + 3] - 0.5).abs() < 1e-6);
        assert_eq!(vertices[ring + 4], 1.0);
    }

    #[test]
    fn six_default_solids_follow_the_camera() {
        let mut solids = default_solids();
        assert_eq!(solids.len(), 6);

        let camera = Vector3::new(0.0, 1.0, 5.0);
        for solid in &mut solids {
            solid.follow_camera(camera);
        }
        assert_eq!(solids[2].position, camera + Vector3::new(0.2, 0.0, 0.0));
    }

    #[test]
    fn pulse_reverses_at_the_bounds() {
        let mut solid = Solid::new(SolidKind::Cube { size: 1.0 }, Vector3::zero());
        solid.scale = Vector3::new(1.01, 1.01, 1.01);
        solid.pulse(0.1);
        assert!(solid.scale.x < 1.01);

        solid.scale = Vector3::new(0.79, 0.79, 0.79);
        solid.pulse(0.1);
        assert!(solid.scale.x > 0.79);
    }
}
