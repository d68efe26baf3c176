use std::fs;
use std::io::{self, Write};
use std::os::raw::c_void;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

const HEADER_SIZE: u32 = 54;

/// Reads the current framebuffer back and writes it as a 24-bit BMP.
pub fn save_screenshot(path: &Path, width: i32, height: i32) -> Result<(), String> {
    let mut pixels = vec![0u8; (width * height * 3) as usize];
    unsafe {
        gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
        gl::ReadPixels(
            0,
            0,
            width,
            height,
            gl::RGB,
            gl::UNSIGNED_BYTE,
            pixels.as_mut_ptr() as *mut c_void,
        );
    }

    let encoded = encode_bmp(width as u32, height as u32, &pixels)
        .map_err(|e| format!("Failed to encode screenshot: {}", e))?;
    fs::write(path, encoded)
        .map_err(|e| format!("Failed to write screenshot '{}': {}", path.display(), e))
}

/// 24-bit bottom-up BMP. `ReadPixels` already returns rows bottom-first, so
/// the pixel data goes out in the order it came in, padded to 4-byte rows
/// and swizzled RGB -> BGR.
fn encode_bmp(width: u32, height: u32, rgb: &[u8]) -> io::Result<Vec<u8>> {
    let row_size = (width * 3 + 3) & !3;
    let pixel_bytes = row_size * height;
    let file_size = HEADER_SIZE + pixel_bytes;

    let mut out = Vec::with_capacity(file_size as usize);

    // file header
    out.write_all(b"BM")?;
    out.write_u32::<LittleEndian>(file_size)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u16::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(HEADER_SIZE)?;

    // info header
    out.write_u32::<LittleEndian>(40)?;
    out.write_i32::<LittleEndian>(width as i32)?;
    out.write_i32::<LittleEndian>(height as i32)?;
    out.write_u16::<LittleEndian>(1)?;
    out.write_u16::<LittleEndian>(24)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(pixel_bytes)?;
    out.write_i32::<LittleEndian>(2835)?;
    out.write_i32::<LittleEndian>(2835)?;
    out.write_u32::<LittleEndian>(0)?;
    out.write_u32::<LittleEndian>(0)?;

    let padding = (row_size - width * 3) as usize;
    for row in rgb.chunks_exact((width * 3) as usize) {
        for pixel in row.chunks_exact(3) {
            out.write_all(&[pixel[2], pixel[1], pixel[0]])?;
        }
        out.write_all(&[0u8; 3][..padding])?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_padding_are_well_formed() {
        // 2x2 RGB image: rows of 6 bytes pad up to 8.
        let rgb = [
            255, 0, 0, /**/ 0, 255, 0, //
            0, 0, 255, /**/ 255, 255, 255,
        ];
        let bmp = encode_bmp(2, 2, &rgb).expect("in-memory encode cannot fail");

        assert_eq!(&bmp[0..2], b"BM");
        let file_size = u32::from_le_bytes([bmp[2], bmp[3], bmp[4], bmp[5]]);
        assert_eq!(file_size as usize, bmp.len());
        assert_eq!(bmp.len(), 54 + 2 * 8);

        // First pixel lands right after the header, swizzled to BGR.
        assert_eq!(&bmp[54..57], &[0, 0, 255]);
    }

    #[test]
    fn rows_without_padding_pass_through() {
        let rgb = vec![7u8; 4 * 3];
        let bmp = encode_bmp(4, 1, &rgb).expect("in-memory encode cannot fail");
        assert_eq!(bmp.len(), 54 + 12);
    }
}
