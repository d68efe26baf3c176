/// One corner of a polygon face, with indices already resolved to zero-based
/// positions in the attribute arrays. `None` marks an absent `vt`/`vn` slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub texcoord: Option<usize>,
    pub normal: Option<usize>,
}

/// Splits file contents into logical lines, accepting `\n`, `\r\n` and bare
/// `\r` endings alike. `\r\n` produces an empty fragment both parsers skip.
pub fn logical_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\n', '\r'])
}

/// Reads the longest leading float out of a token, C `atof` style. A token
/// with no usable prefix reads as zero; the importer never rejects a line
/// over a malformed number.
pub fn scan_f32(token: &str) -> f32 {
    let mut value = 0.0;
    for end in 1..=token.len() {
        if !token.is_char_boundary(end) {
            continue;
        }
        if let Ok(parsed) = token[..end].parse::<f32>() {
            value = parsed;
        }
    }
    value
}

/// Reads the longest leading integer out of a token, C `atoi` style.
pub fn scan_i32(token: &str) -> i32 {
    let mut value = 0;
    for end in 1..=token.len() {
        if !token.is_char_boundary(end) {
            continue;
        }
        if let Ok(parsed) = token[..end].parse::<i32>() {
            value = parsed;
        }
    }
    value
}

/// Makes an OBJ index zero-based. Positive indices count from 1, negative
/// indices count back from the current end of the array. An explicit 0 is
/// invalid in the format but maps to 0 rather than failing.
pub fn fix_index(idx: i32, count: usize) -> usize {
    if idx > 0 {
        return (idx - 1) as usize;
    }
    if idx == 0 {
        return 0;
    }
    let resolved = count as i64 + idx as i64;
    if resolved < 0 {
        0
    } else {
        resolved as usize
    }
}

/// Parses one `v`, `v/vt`, `v//vn` or `v/vt/vn` face token against the
/// attribute counts seen so far.
pub fn parse_face_vertex(
    token: &str,
    position_count: usize,
    texcoord_count: usize,
    normal_count: usize,
) -> FaceVertex {
    let mut fields = token.split('/');

    let position = fix_index(scan_i32(fields.next().unwrap_or("")), position_count);

    let texcoord = fields
        .next()
        .filter(|f| !f.is_empty())
        .map(|f| fix_index(scan_i32(f), texcoord_count));

    let normal = fields
        .next()
        .filter(|f| !f.is_empty())
        .map(|f| fix_index(scan_i32(f), normal_count));

    FaceVertex {
        position,
        texcoord,
        normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_f32_takes_the_numeric_prefix() {
        assert_eq!(scan_f32("1.5"), 1.5);
        assert_eq!(scan_f32("-0.25xyz"), -0.25);
        assert_eq!(scan_f32("2e3"), 2000.0);
        assert_eq!(scan_f32("garbage"), 0.0);
        assert_eq!(scan_f32(""), 0.0);
    }

    #[test]
    fn scan_i32_takes_the_numeric_prefix() {
        assert_eq!(scan_i32("42"), 42);
        assert_eq!(scan_i32("-7/3"), -7);
        assert_eq!(scan_i32("x12"), 0);
    }

    #[test]
    fn fix_index_handles_positive_zero_and_negative() {
        assert_eq!(fix_index(1, 5), 0);
        assert_eq!(fix_index(5, 5), 4);
        assert_eq!(fix_index(0, 5), 0);
        assert_eq!(fix_index(-1, 5), 4);
        assert_eq!(fix_index(-5, 5), 0);
        // Out-of-range relative index clamps instead of wrapping.
        assert_eq!(fix_index(-9, 5), 0);
    }

    #[test]
    fn face_token_variants() {
        let fv = parse_face_vertex("3", 10, 10, 10);
        assert_eq!(fv, FaceVertex { position: 2, texcoord: None, normal: None });

        let fv = parse_face_vertex("3/7", 10, 10, 10);
        assert_eq!(fv.texcoord, Some(6));
        assert_eq!(fv.normal, None);

        let fv = parse_face_vertex("3//9", 10, 10, 10);
        assert_eq!(fv.texcoord, None);
        assert_eq!(fv.normal, Some(8));

        let fv = parse_face_vertex("3/7/9", 10, 10, 10);
        assert_eq!(fv, FaceVertex { position: 2, texcoord: Some(6), normal: Some(8) });
    }

    #[test]
    fn face_token_negative_indices_resolve_from_the_end() {
        let fv = parse_face_vertex("-1/-2/-3", 8, 8, 8);
        assert_eq!(fv, FaceVertex { position: 7, texcoord: Some(6), normal: Some(5) });
    }
}
