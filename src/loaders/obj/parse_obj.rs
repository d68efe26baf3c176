use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::math::{Vector2, Vector3};

use super::parse_mtl::load_mtl;
use super::scan::{logical_lines, parse_face_vertex, scan_f32, FaceVertex};
use super::types::{IndexedMesh, Material, MeshVertex, ObjImport, NO_MATERIAL};

/// One output triangle, tagged with the material that was active when its
/// source face was read.
struct Triangle {
    corners: [FaceVertex; 3],
    material_id: i32,
}

/// A named run of triangles, closed by a `usemtl`/`g`/`o` directive or EOF.
struct Shape {
    #[allow(dead_code)]
    name: String,
    triangles: Vec<Triangle>,
}

/// Flat attribute arrays in source order, indexed by resolved face indices.
#[derive(Default)]
struct RawAttributes {
    positions: Vec<f32>,
    normals: Vec<f32>,
    texcoords: Vec<f32>,
}

/// Imports an OBJ file (and any MTL files it references) into an indexed
/// triangle mesh plus a material table.
///
/// Only an unreadable OBJ file is fatal. Missing MTL files, unresolved
/// material names and malformed numeric fields degrade to warnings collected
/// on the returned [`ObjImport`].
pub fn import_mesh(path: &Path) -> Result<ObjImport, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to open OBJ file '{}': {}", path.display(), e))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("")).to_path_buf();

    let mut attrib = RawAttributes::default();
    let mut face_group: Vec<Vec<FaceVertex>> = Vec::new();
    let mut shapes: Vec<Shape> = Vec::new();
    let mut shape_name = String::new();

    let mut materials: Vec<Material> = Vec::new();
    let mut material_map: HashMap<String, usize> = HashMap::new();
    let mut material = NO_MATERIAL;

    let mut warnings: Vec<String> = Vec::new();

    for raw_line in logical_lines(&contents) {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let directive = match parts.next() {
            Some(d) => d,
            None => continue,
        };

        match directive {
            "v" => {
                attrib.positions.push(scan_f32(parts.next().unwrap_or("")));
                attrib.positions.push(scan_f32(parts.next().unwrap_or("")));
                attrib.positions.push(scan_f32(parts.next().unwrap_or("")));
            }
            "vn" => {
                attrib.normals.push(scan_f32(parts.next().unwrap_or("")));
                attrib.normals.push(scan_f32(parts.next().unwrap_or("")));
                attrib.normals.push(scan_f32(parts.next().unwrap_or("")));
            }
            "vt" => {
                attrib.texcoords.push(scan_f32(parts.next().unwrap_or("")));
                attrib.texcoords.push(scan_f32(parts.next().unwrap_or("")));
            }
            "f" => {
                // Indices resolve against the attribute counts seen so far,
                // which is what makes negative (relative) indices work.
                let face: Vec<FaceVertex> = parts
                    .map(|token| {
                        parse_face_vertex(
                            token,
                            attrib.positions.len() / 3,
                            attrib.texcoords.len() / 2,
                            attrib.normals.len() / 3,
                        )
                    })
                    .collect();
                if !face.is_empty() {
                    face_group.push(face);
                }
            }
            "usemtl" => {
                let name = parts.next().unwrap_or("");
                match material_map.get(name) {
                    Some(&new_id) => {
                        if new_id as i32 != material {
                            flush_face_group(
                                &mut face_group,
                                &mut shapes,
                                &shape_name,
                                material,
                            );
                            material = new_id as i32;
                        }
                    }
                    None => {
                        // Unresolved name: keep the previously active id and
                        // carry on. Never fatal.
                        warnings.push(format!(
                            "WARN: material '{}' not found; keeping previous material",
                            name
                        ));
                    }
                }
            }
            "mtllib" => {
                let filenames: Vec<&str> = parts.collect();
                if filenames.is_empty() {
                    warnings.push("WARN: empty filename for mtllib; using default material".to_string());
                } else {
                    // First library that opens wins.
                    let mut found = false;
                    for filename in &filenames {
                        match load_mtl(&base_dir.join(filename), &mut materials, &mut material_map)
                        {
                            Ok(()) => {
                                found = true;
                                break;
                            }
                            Err(e) => warnings.push(format!("WARN: {}", e)),
                        }
                    }
                    if !found {
                        warnings.push(
                            "WARN: failed to load material file(s); using default material"
                                .to_string(),
                        );
                    }
                }
            }
            "g" | "o" => {
                flush_face_group(&mut face_group, &mut shapes, &shape_name, material);
                shape_name = parts.next().unwrap_or("").to_string();
            }
            _ => {}
        }
    }

    flush_face_group(&mut face_group, &mut shapes, &shape_name, material);

    Ok(ObjImport {
        mesh: assemble(&attrib, &shapes),
        materials,
        warnings,
    })
}

/// Fan-triangulates every buffered polygon from its first listed vertex and
/// appends the result as one shape. A face with vertices `v0..vn` yields
/// `(v0,v1,v2), (v0,v2,v3), ...` — n-2 triangles. Concave or non-planar
/// polygons triangulate incorrectly; that is a documented limitation of this
/// format, not something the importer tries to detect.
fn flush_face_group(
    face_group: &mut Vec<Vec<FaceVertex>>,
    shapes: &mut Vec<Shape>,
    name: &str,
    material_id: i32,
) {
    if face_group.is_empty() {
        return;
    }

    let mut triangles = Vec::new();
    for face in face_group.drain(..) {
        for k in 2..face.len() {
            triangles.push(Triangle {
                corners: [face[0], face[k - 1], face[k]],
                material_id,
            });
        }
    }

    if !triangles.is_empty() {
        shapes.push(Shape {
            name: name.to_string(),
            triangles,
        });
    }
}

/// Builds the final indexed mesh, de-duplicating vertices on the bit pattern
/// of their position/normal/texcoord tuple. The material tag of a vertex is
/// decided by whichever face inserts it first; a later face referencing the
/// same attribute combination under another material keeps the original tag.
/// Lossy, but changing it would change de-duplication results downstream.
fn assemble(attrib: &RawAttributes, shapes: &[Shape]) -> IndexedMesh {
    let mut mesh = IndexedMesh::default();
    let mut unique: HashMap<MeshVertex, u32> = HashMap::new();

    for shape in shapes {
        for triangle in &shape.triangles {
            for corner in &triangle.corners {
                let vertex = MeshVertex {
                    position: read_vec3(&attrib.positions, corner.position),
                    normal: corner
                        .normal
                        .map(|i| read_vec3(&attrib.normals, i))
                        .unwrap_or_else(Vector3::zero),
                    tex_coords: corner
                        .texcoord
                        .map(|i| read_vec2(&attrib.texcoords, i))
                        .unwrap_or_else(Vector2::zero),
                    material_id: triangle.material_id,
                };

                let index = match unique.get(&vertex) {
                    Some(&existing) => existing,
                    None => {
                        let next = mesh.vertices.len() as u32;
                        mesh.vertices.push(vertex);
                        unique.insert(vertex, next);
                        next
                    }
                };
                mesh.indices.push(index);
            }
        }
    }

    mesh
}

/// Out-of-range attribute reads yield zeros; ill-formed indices must never
/// crash the importer.
fn read_vec3(data: &[f32], index: usize) -> Vector3 {
    Vector3::new(
        data.get(3 * index).copied().unwrap_or(0.0),
        data.get(3 * index + 1).copied().unwrap_or(0.0),
        data.get(3 * index + 2).copied().unwrap_or(0.0),
    )
}

fn read_vec2(data: &[f32], index: usize) -> Vector2 {
    Vector2::new(
        data.get(2 * index).copied().unwrap_or(0.0),
        data.get(2 * index + 1).copied().unwrap_or(0.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        dir: PathBuf,
        obj: PathBuf,
    }

    impl Fixture {
        fn new(name: &str, obj: &str, mtl: Option<(&str, &str)>) -> Self {
            let dir = std::env::temp_dir().join(format!(
                "loft_viewer_obj_{}_{}",
                std::process::id(),
                name
            ));
            fs::create_dir_all(&dir).expect("failed to create fixture dir");
            let obj_path = dir.join("model.obj");
            fs::write(&obj_path, obj).expect("failed to write OBJ fixture");
            if let Some((mtl_name, mtl_contents)) = mtl {
                fs::write(dir.join(mtl_name), mtl_contents).expect("failed to write MTL fixture");
            }
            Fixture { dir, obj: obj_path }
        }

        fn import(&self) -> ObjImport {
            import_mesh(&self.obj).expect("fixture should import")
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    #[test]
    fn unreadable_file_is_a_hard_error() {
        assert!(import_mesh(Path::new("/no/such/model.obj")).is_err());
    }

    #[test]
    fn triangle_imports_with_three_vertices() {
        let fixture = Fixture::new(
            "tri",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
            None,
        );
        let import = fixture.import();
        assert_eq!(import.mesh.vertex_count(), 3);
        assert_eq!(import.mesh.indices, vec![0, 1, 2]);
        assert!(import.warnings.is_empty());
    }

    #[test]
    fn duplicate_vertex_references_deduplicate_to_one_entry() {
        // Four faces all built from the same single attribute combination.
        let fixture = Fixture::new(
            "dedup",
            "v 1 2 3\nf 1 1 1\nf 1 1 1\nf 1 1 1\nf 1 1 1\n",
            None,
        );
        let import = fixture.import();
        assert_eq!(import.mesh.vertex_count(), 1);
        assert_eq!(import.mesh.indices.len(), 12);
        assert!(import.mesh.indices.iter().all(|&i| i == 0));
    }

    #[test]
    fn polygon_fans_from_the_first_vertex() {
        let fixture = Fixture::new(
            "fan",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0.5 1.5 0\nv 0 1 0\nf 1 2 3 4 5\n",
            None,
        );
        let import = fixture.import();
        // n-2 triangles for an n-gon.
        assert_eq!(import.mesh.face_count(), 3);
        assert_eq!(
            import.mesh.indices,
            vec![0, 1, 2, 0, 2, 3, 0, 3, 4]
        );
    }

    #[test]
    fn negative_indices_resolve_relative_to_the_end() {
        let fixture = Fixture::new(
            "relative",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n",
            None,
        );
        let import = fixture.import();
        assert_eq!(import.mesh.vertex_count(), 3);
        assert_eq!(import.mesh.vertices[2].position, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn zero_index_is_tolerated_without_crashing() {
        let fixture = Fixture::new(
            "zero",
            "v 5 5 5\nv 1 0 0\nv 0 1 0\nf 0 2 3\n",
            None,
        );
        let import = fixture.import();
        // Index 0 maps to the first vertex; well-formed input never does this.
        assert_eq!(import.mesh.vertices[0].position, Vector3::new(5.0, 5.0, 5.0));
    }

    #[test]
    fn unresolved_usemtl_keeps_the_previous_material() {
        let fixture = Fixture::new(
            "fallback",
            concat!(
                "mtllib model.mtl\n",
                "v 0 0 0\nv 1 0 0\nv 0 1 0\n",
                "usemtl wall\n",
                "usemtl NoSuchMat\n",
                "f 1 2 3\n",
            ),
            Some(("model.mtl", "newmtl wall\nKd 1 0 0\n")),
        );
        let import = fixture.import();
        assert!(import.warnings.iter().any(|w| w.contains("NoSuchMat")));
        let wall_id = import
            .materials
            .iter()
            .position(|m| m.name == "wall")
            .expect("wall material should load") as i32;
        assert!(import
            .mesh
            .vertices
            .iter()
            .all(|v| v.material_id == wall_id));
    }

    #[test]
    fn unresolved_usemtl_without_prior_material_stays_unmaterialized() {
        let fixture = Fixture::new(
            "no_prior",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Ghost\nf 1 2 3\n",
            None,
        );
        let import = fixture.import();
        assert!(import.mesh.vertices.iter().all(|v| v.material_id == NO_MATERIAL));
        assert_eq!(import.warnings.len(), 1);
    }

    #[test]
    fn missing_mtllib_is_a_warning_not_an_error() {
        let fixture = Fixture::new(
            "missing_mtl",
            "mtllib gone.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n",
            None,
        );
        let import = fixture.import();
        assert!(import.warnings.iter().any(|w| w.contains("gone.mtl")));
        assert_eq!(import.mesh.vertex_count(), 3);
    }

    #[test]
    fn first_writer_wins_on_material_tags() {
        // The same attribute tuple is referenced under two materials; the
        // originally recorded tag survives.
        let fixture = Fixture::new(
            "first_writer",
            concat!(
                "mtllib model.mtl\n",
                "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\n",
                "usemtl a\n",
                "f 1 2 3\n",
                "usemtl b\n",
                "f 1 2 4\n",
            ),
            Some(("model.mtl", "newmtl a\nKd 1 0 0\nnewmtl b\nKd 0 1 0\n")),
        );
        let import = fixture.import();
        let id_a = import.materials.iter().position(|m| m.name == "a").unwrap() as i32;
        let id_b = import.materials.iter().position(|m| m.name == "b").unwrap() as i32;

        // Vertices 0..3 were first written under material a; only the vertex
        // introduced by the second face carries material b.
        assert_eq!(import.mesh.vertices[0].material_id, id_a);
        assert_eq!(import.mesh.vertices[1].material_id, id_a);
        assert_eq!(import.mesh.vertices[2].material_id, id_a);
        assert_eq!(import.mesh.vertices[3].material_id, id_b);
        assert_eq!(import.mesh.vertex_count(), 4);
    }

    #[test]
    fn quad_with_material_round_trip() {
        let fixture = Fixture::new(
            "quad",
            concat!(
                "mtllib model.mtl\n",
                "usemtl red\n",
                "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n",
                "f 1 2 3 4\n",
            ),
            Some(("model.mtl", "newmtl red\nKd 1 0 0\n")),
        );
        let import = fixture.import();
        assert_eq!(import.mesh.vertex_count(), 4);
        assert_eq!(import.mesh.face_count(), 2);
        let red = import
            .materials
            .iter()
            .find(|m| m.name == "red")
            .expect("red material should load");
        assert_eq!(red.diffuse, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn carriage_return_line_endings_parse() {
        let fixture = Fixture::new(
            "crlf",
            "v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\rf 1 2 3\r\n",
            None,
        );
        let import = fixture.import();
        assert_eq!(import.mesh.vertex_count(), 3);
        assert_eq!(import.mesh.face_count(), 1);
    }

    #[test]
    fn normals_and_texcoords_attach_to_vertices() {
        let fixture = Fixture::new(
            "full",
            concat!(
                "v 0 0 0\nv 1 0 0\nv 0 1 0\n",
                "vt 0 0\nvt 1 0\nvt 0 1\n",
                "vn 0 0 1\n",
                "f 1/1/1 2/2/1 3/3/1\n",
            ),
            None,
        );
        let import = fixture.import();
        assert_eq!(import.mesh.vertex_count(), 3);
        for v in &import.mesh.vertices {
            assert_eq!(v.normal, Vector3::new(0.0, 0.0, 1.0));
        }
        assert_eq!(import.mesh.vertices[1].tex_coords, Vector2::new(1.0, 0.0));
    }

    #[test]
    fn group_boundaries_flush_but_share_the_vertex_pool() {
        let fixture = Fixture::new(
            "groups",
            concat!(
                "v 0 0 0\nv 1 0 0\nv 0 1 0\n",
                "g left\nf 1 2 3\n",
                "g right\nf 1 2 3\n",
            ),
            None,
        );
        let import = fixture.import();
        // Two shapes, but one shared set of de-duplicated vertices.
        assert_eq!(import.mesh.vertex_count(), 3);
        assert_eq!(import.mesh.face_count(), 2);
    }

    #[test]
    fn mesh_invariants_hold() {
        let fixture = Fixture::new(
            "invariants",
            concat!(
                "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 0.5 2 0\n",
                "f 1 2 3 4\nf 4 3 5\n",
            ),
            None,
        );
        let import = fixture.import();
        assert_eq!(import.mesh.indices.len() % 3, 0);
        let count = import.mesh.vertex_count() as u32;
        assert!(import.mesh.indices.iter().all(|&i| i < count));
    }
}
