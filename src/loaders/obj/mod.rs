mod export;
mod parse_mtl;
mod parse_obj;
mod scan;
mod types;

pub use export::ObjExporter;
pub use parse_obj::import_mesh;
pub use types::{IndexedMesh, Material, MeshVertex, ObjImport, NO_MATERIAL};
