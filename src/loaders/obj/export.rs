use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::math::{Matrix4, Vector3};

/// Accumulates tessellated objects into a single OBJ document.
///
/// Vertices are written in world space, so each object's model matrix is
/// baked in at add time. Face indices are 1-based and offset by the number
/// of vertices emitted for earlier objects, which keeps every `o` block
/// self-consistent inside one shared index space.
pub struct ObjExporter {
    object_count: usize,
    vertex_offset: u32,
    buffer: String,
}

impl ObjExporter {
    pub fn new() -> Self {
        ObjExporter {
            object_count: 0,
            vertex_offset: 1,
            buffer: String::new(),
        }
    }

    /// Appends one object. `vertices` is a flat xyz soup and `indices` a
    /// triangle list into it.
    pub fn add_object(&mut self, vertices: &[f32], indices: &[u32], model: &Matrix4) {
        self.object_count += 1;
        let _ = writeln!(self.buffer, "o six_basic_{}", self.object_count);

        let vertex_count = vertices.len() / 3;
        for chunk in vertices.chunks_exact(3) {
            let world = model.transform_point(Vector3::new(chunk[0], chunk[1], chunk[2]));
            let _ = writeln!(self.buffer, "v {} {} {}", world.x, world.y, world.z);
        }
        for tri in indices.chunks_exact(3) {
            let _ = writeln!(
                self.buffer,
                "f {} {} {}",
                self.vertex_offset + tri[0],
                self.vertex_offset + tri[1],
                self.vertex_offset + tri[2]
            );
        }

        self.vertex_offset += vertex_count as u32;
    }

    pub fn object_count(&self) -> usize {
        self.object_count
    }

    /// Writes the accumulated document and clears the exporter for reuse.
    pub fn write_to(&mut self, path: &Path) -> Result<(), String> {
        fs::write(path, &self.buffer)
            .map_err(|e| format!("Failed to write OBJ export '{}': {}", path.display(), e))?;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.object_count = 0;
        self.vertex_offset = 1;
        self.buffer.clear();
    }
}

impl Default for ObjExporter {
    fn default() -> Self {
        ObjExporter::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector3;

    const TRIANGLE: [f32; 9] = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    const INDICES: [u32; 3] = [0, 1, 2];

    #[test]
    fn face_indices_accumulate_across_objects() {
        let mut exporter = ObjExporter::new();
        exporter.add_object(&TRIANGLE, &INDICES, &Matrix4::identity());
        exporter.add_object(&TRIANGLE, &INDICES, &Matrix4::identity());

        assert!(exporter.buffer.contains("o six_basic_1"));
        assert!(exporter.buffer.contains("o six_basic_2"));
        assert!(exporter.buffer.contains("f 1 2 3"));
        assert!(exporter.buffer.contains("f 4 5 6"));
    }

    #[test]
    fn model_matrix_is_baked_into_vertices() {
        let mut exporter = ObjExporter::new();
        let model = Matrix4::from_translation(Vector3::new(10.0, 0.0, 0.0));
        exporter.add_object(&TRIANGLE, &INDICES, &model);

        assert!(exporter.buffer.contains("v 10 0 0"));
        assert!(exporter.buffer.contains("v 11 0 0"));
    }

    #[test]
    fn reset_restarts_numbering() {
        let mut exporter = ObjExporter::new();
        exporter.add_object(&TRIANGLE, &INDICES, &Matrix4::identity());
        exporter.reset();
        exporter.add_object(&TRIANGLE, &INDICES, &Matrix4::identity());

        assert_eq!(exporter.object_count(), 1);
        assert!(exporter.buffer.contains("o six_basic_1"));
        assert!(!exporter.buffer.contains("o six_basic_2"));
        assert!(exporter.buffer.contains("f 1 2 3"));
    }

    #[test]
    fn written_export_reimports_cleanly() {
        let dir = std::env::temp_dir().join(format!("loft_viewer_export_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("failed to create fixture dir");
        let path = dir.join("export.obj");

        let mut exporter = ObjExporter::new();
        exporter.add_object(&TRIANGLE, &INDICES, &Matrix4::identity());
        exporter.write_to(&path).expect("export should write");

        let import = super::super::parse_obj::import_mesh(&path).expect("export should reimport");
        assert_eq!(import.mesh.vertex_count(), 3);
        assert_eq!(import.mesh.face_count(), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
