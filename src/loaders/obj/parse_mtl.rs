use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::scan::{logical_lines, scan_f32, scan_i32};
use super::types::Material;

/// Parses one MTL file, appending to the shared material table and the
/// name-to-index lookup map. Duplicate names overwrite the map entry (so the
/// last occurrence wins on `usemtl` lookup) while the table keeps the
/// redundant earlier entry.
///
/// An unopenable file is an `Err` here; the OBJ parser downgrades it to a
/// warning and keeps going.
pub fn load_mtl(
    path: &Path,
    materials: &mut Vec<Material>,
    material_map: &mut HashMap<String, usize>,
) -> Result<(), String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to open MTL file '{}': {}", path.display(), e))?;

    let mut material = Material::default();

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
            "newmtl" => {
                // Flush the previous material, but only once it has a name.
                if !material.name.is_empty() {
                    material_map.insert(material.name.clone(), materials.len());
                    materials.push(material);
                }
                material = Material {
                    name: parts.next().unwrap_or("").to_string(),
                    ..Material::default()
                };
            }
            "Ka" => material.ambient = scan_rgb(&mut parts),
            "Kd" => material.diffuse = scan_rgb(&mut parts),
            "Ks" => material.specular = scan_rgb(&mut parts),
            "Ke" => material.emissive = scan_rgb(&mut parts),
            "Ns" => material.shininess = scan_f32(parts.next().unwrap_or("")),
            "Ni" => material.ior = scan_f32(parts.next().unwrap_or("")),
            "illum" => material.illum = scan_i32(parts.next().unwrap_or("")),
            "d" => material.dissolve = scan_f32(parts.next().unwrap_or("")),
            key => {
                // Anything else with a key/value shape rides along verbatim.
                if let Some((_, value)) = line.split_once(char::is_whitespace) {
                    material
                        .unknown_parameters
                        .insert(key.to_string(), value.trim().to_string());
                }
            }
        }
    }

    // The last material flushes unconditionally, even with an empty name.
    // A file without a single newmtl therefore yields one anonymous default
    // entry; consumers rely on this quirk.
    material_map.insert(material.name.clone(), materials.len());
    materials.push(material);

    Ok(())
}

fn scan_rgb<'a>(parts: &mut impl Iterator<Item = &'a str>) -> [f32; 3] {
    [
        scan_f32(parts.next().unwrap_or("")),
        scan_f32(parts.next().unwrap_or("")),
        scan_f32(parts.next().unwrap_or("")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_fixture(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("loft_viewer_mtl_{}_{}", std::process::id(), name));
        fs::write(&path, contents).expect("failed to write MTL fixture");
        path
    }

    fn parse_fixture(name: &str, contents: &str) -> (Vec<Material>, HashMap<String, usize>) {
        let path = write_fixture(name, contents);
        let mut materials = Vec::new();
        let mut map = HashMap::new();
        load_mtl(&path, &mut materials, &mut map).expect("MTL fixture should parse");
        let _ = fs::remove_file(&path);
        (materials, map)
    }

    #[test]
    fn missing_file_is_an_error() {
        let mut materials = Vec::new();
        let mut map = HashMap::new();
        let result = load_mtl(Path::new("/no/such/file.mtl"), &mut materials, &mut map);
        assert!(result.is_err());
    }

    #[test]
    fn parses_colors_and_scalars() {
        let (materials, map) = parse_fixture(
            "colors.mtl",
            "newmtl red\nKa 0.1 0.2 0.3\nKd 1 0 0\nKs 0.5 0.5 0.5\nKe 0 0 0\nNs 32\nNi 1.45\nillum 2\nd 0.75\n",
        );

        let red = &materials[map["red"]];
        assert_eq!(red.ambient, [0.1, 0.2, 0.3]);
        assert_eq!(red.diffuse, [1.0, 0.0, 0.0]);
        assert_eq!(red.shininess, 32.0);
        assert_eq!(red.ior, 1.45);
        assert_eq!(red.illum, 2);
        assert_eq!(red.dissolve, 0.75);
    }

    #[test]
    fn defaults_match_the_format_conventions() {
        let (materials, map) = parse_fixture("defaults.mtl", "newmtl plain\n");
        let plain = &materials[map["plain"]];
        assert_eq!(plain.ambient, [0.0; 3]);
        assert_eq!(plain.diffuse, [0.0; 3]);
        assert_eq!(plain.shininess, 1.0);
        assert_eq!(plain.ior, 1.0);
        assert_eq!(plain.dissolve, 1.0);
        assert_eq!(plain.illum, 0);
    }

    #[test]
    fn eof_flush_yields_a_trailing_anonymous_material() {
        let (materials, map) = parse_fixture("anon.mtl", "newmtl only\nKd 0 1 0\n");
        // "only" plus the unconditional EOF flush of the empty follow-up.
        assert_eq!(materials.len(), 2);
        assert_eq!(materials[map["only"]].diffuse, [0.0, 1.0, 0.0]);
        assert!(materials.last().map(|m| m.name.is_empty()).unwrap_or(false));
    }

    #[test]
    fn unknown_parameters_are_kept_verbatim() {
        let (materials, map) = parse_fixture(
            "unknown.mtl",
            "newmtl tex\nmap_Kd wall.png\nsharpness 60\n",
        );
        let tex = &materials[map["tex"]];
        assert_eq!(tex.unknown_parameters["map_Kd"], "wall.png");
        assert_eq!(tex.unknown_parameters["sharpness"], "60");
    }

    #[test]
    fn duplicate_names_resolve_to_the_last_occurrence() {
        let (materials, map) = parse_fixture(
            "dup.mtl",
            "newmtl wall\nKd 1 0 0\nnewmtl wall\nKd 0 0 1\n",
        );
        // Both table entries survive; the lookup map points at the second.
        assert_eq!(materials[map["wall"]].diffuse, [0.0, 0.0, 1.0]);
        assert_eq!(materials.iter().filter(|m| m.name == "wall").count(), 2);
    }

    #[test]
    fn malformed_numbers_read_as_their_scanned_prefix() {
        let (materials, map) = parse_fixture("lenient.mtl", "newmtl odd\nNs abc\nKd 0.5x 1 oops\n");
        let odd = &materials[map["odd"]];
        assert_eq!(odd.shininess, 0.0);
        assert_eq!(odd.diffuse, [0.5, 1.0, 0.0]);
    }
}
