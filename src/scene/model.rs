use std::path::Path;

use crate::loaders::obj::{self, IndexedMesh, Material};
use crate::math::Vector3;

use super::bounds::BoundingBox;

/// The imported room mesh together with its material table and bounds.
pub struct SceneModel {
    pub mesh: IndexedMesh,
    pub materials: Vec<Material>,
    pub bounds: BoundingBox,
}

impl SceneModel {
    pub fn center(&self) -> Vector3 {
        self.bounds.center()
    }
}

/// Imports the OBJ file at `model_path` and wraps it for rendering.
/// Importer warnings are not fatal; they are reported and the scene loads
/// with whatever survived.
pub fn build_scene_model(model_path: &Path) -> Result<SceneModel, String> {
    let import = obj::import_mesh(model_path)?;
    for warning in &import.warnings {
        eprintln!("{}", warning);
    }

    if import.mesh.vertices.is_empty() {
        return Err(format!(
            "Model '{}' contains no triangles",
            model_path.display()
        ));
    }

    let bounds = BoundingBox::from_vertices(&import.mesh.vertices);
    Ok(SceneModel {
        mesh: import.mesh,
        materials: import.materials,
        bounds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_model_is_rejected() {
        let dir = std::env::temp_dir().join(format!("loft_viewer_scene_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("failed to create fixture dir");
        let path = dir.join("empty.obj");
        fs::write(&path, "# nothing here\n").expect("failed to write fixture");

        assert!(build_scene_model(&path).is_err());

        let _ = fs::remove_dir_all(&dir);
    }
}
