use crate::loaders::obj::MeshVertex;
use crate::math::Vector3;

/// Axis-aligned bounding box of a vertex set.
#[derive(Clone, Copy, Debug)]
pub struct BoundingBox {
    pub min: Vector3,
    pub max: Vector3,
}

impl BoundingBox {
    pub fn from_vertices(vertices: &[MeshVertex]) -> Self {
        vertices
            .iter()
            .fold(None, |acc: Option<BoundingBox>, vertex| {
                let p = vertex.position;
                match acc {
                    Some(bounds) => Some(BoundingBox {
                        min: Vector3::new(
                            bounds.min.x.min(p.x),
                            bounds.min.y.min(p.y),
                            bounds.min.z.min(p.z),
                        ),
                        max: Vector3::new(
                            bounds.max.x.max(p.x),
                            bounds.max.y.max(p.y),
                            bounds.max.z.max(p.z),
                        ),
                    }),
                    None => Some(BoundingBox { min: p, max: p }),
                }
            })
            .unwrap_or(BoundingBox {
                min: Vector3::zero(),
                max: Vector3::zero(),
            })
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_at(x: f32, y: f32, z: f32) -> MeshVertex {
        MeshVertex {
            position: Vector3::new(x, y, z),
            ..MeshVertex::default()
        }
    }

    #[test]
    fn center_is_the_aabb_midpoint() {
        let vertices = [
            vertex_at(-5.0, -3.0, 2.0),
            vertex_at(7.0, 1.0, 10.0),
            vertex_at(0.0, 4.0, -6.0),
        ];
        let bounds = BoundingBox::from_vertices(&vertices);
        let center = bounds.center();
        assert_eq!(center.x, 1.0);
        assert_eq!(center.y, 0.5);
        assert_eq!(center.z, 2.0);
    }

    #[test]
    fn empty_vertex_set_collapses_to_the_origin() {
        let bounds = BoundingBox::from_vertices(&[]);
        assert_eq!(bounds.center(), Vector3::zero());
    }
}
