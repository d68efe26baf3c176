use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::math::{Vector2, Vector3};

/// Material id carried by vertices whose face resolved no material.
pub const NO_MATERIAL: i32 = -1;

/// One de-duplicated mesh vertex. Matches the GPU vertex layout, so the
/// vertex array uploads directly.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct MeshVertex {
    pub position: Vector3,
    pub normal: Vector3,
    pub tex_coords: Vector2,
    pub material_id: i32,
}

impl Default for MeshVertex {
    fn default() -> Self {
        Self {
            position: Vector3::zero(),
            normal: Vector3::zero(),
            tex_coords: Vector2::zero(),
            material_id: NO_MATERIAL,
        }
    }
}

impl MeshVertex {
    /// Bit pattern of the geometric attributes, used as the de-duplication
    /// key. The material id is deliberately excluded: the first writer of a
    /// position/normal/texcoord combination decides the material tag.
    pub fn attribute_bits(&self) -> [u32; 8] {
        [
            self.position.x.to_bits(),
            self.position.y.to_bits(),
            self.position.z.to_bits(),
            self.normal.x.to_bits(),
            self.normal.y.to_bits(),
            self.normal.z.to_bits(),
            self.tex_coords.x.to_bits(),
            self.tex_coords.y.to_bits(),
        ]
    }
}

impl PartialEq for MeshVertex {
    fn eq(&self, other: &Self) -> bool {
        self.attribute_bits() == other.attribute_bits()
    }
}

impl Eq for MeshVertex {}

impl Hash for MeshVertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attribute_bits().hash(state);
    }
}

/// Indexed triangle list. Immutable once imported.
///
/// Invariants upheld by the importer: every index is smaller than the vertex
/// count and the index count is a multiple of 3.
#[derive(Default, Clone, Debug)]
pub struct IndexedMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl IndexedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// One MTL material. Unrecognized `key value` lines are kept verbatim so
/// downstream consumers can read parameters this parser does not model.
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub emissive: [f32; 3],
    pub shininess: f32,
    pub ior: f32,
    pub dissolve: f32,
    pub illum: i32,
    pub unknown_parameters: HashMap<String, String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            emissive: [0.0; 3],
            shininess: 1.0,
            ior: 1.0,
            dissolve: 1.0,
            illum: 0,
            unknown_parameters: HashMap::new(),
        }
    }
}

/// Result of a successful import: the mesh, the material table faces index
/// into, and any non-fatal warnings gathered along the way.
#[derive(Default, Clone, Debug)]
pub struct ObjImport {
    pub mesh: IndexedMesh,
    pub materials: Vec<Material>,
    pub warnings: Vec<String>,
}
