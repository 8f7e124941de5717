//! Image header reader
//!
//! Reads only the fixed 18-byte Targa header to learn an image's size. Frames
//! can number in the hundreds and only their dimensions matter for
//! validation, so pixel data is never touched.

use crate::domain::{Dimensions, HeaderReadError};
use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Size of the fixed header prefix
pub const HEADER_LEN: usize = 18;

/// Byte offset of the width field (height follows at +2)
pub const DIMENSIONS_OFFSET: u64 = 12;

/// Reads the width and height of the image at `path`
///
/// Both values are signed 16-bit little-endian integers at bytes 12..14 and
/// 14..16. The rest of the header is not validated.
///
/// # Errors
///
/// Returns [`HeaderReadError::Open`] if the file cannot be read and
/// [`HeaderReadError::Truncated`] if it is shorter than [`HEADER_LEN`].
pub fn read_dimensions(path: &Path) -> Result<Dimensions, HeaderReadError> {
    let open_err = |source| HeaderReadError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64)
        .read_to_end(&mut header)
        .map_err(open_err)?;

    parse_dimensions(&header).ok_or_else(|| HeaderReadError::Truncated {
        path: path.to_path_buf(),
        expected: HEADER_LEN,
        actual: header.len(),
    })
}

/// Decodes dimensions from an in-memory header prefix
///
/// Returns `None` if `header` is shorter than [`HEADER_LEN`].
pub fn parse_dimensions(header: &[u8]) -> Option<Dimensions> {
    if header.len() < HEADER_LEN {
        return None;
    }
    let mut cursor = Cursor::new(header);
    cursor.set_position(DIMENSIONS_OFFSET);
    let width = cursor.read_i16::<LittleEndian>().ok()?;
    let height = cursor.read_i16::<LittleEndian>().ok()?;
    Some(Dimensions::new(i32::from(width), i32::from(height)))
}

#[cfg(test)]
pub(crate) fn targa_header(width: i16, height: i16) -> Vec<u8> {
    let mut header = vec![0u8; HEADER_LEN];
    header[2] = 2; // uncompressed true-color
    header[12..14].copy_from_slice(&width.to_le_bytes());
    header[14..16].copy_from_slice(&height.to_le_bytes());
    header[16] = 32;
    header
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_dimensions() {
        let header = targa_header(256, 128);
        assert_eq!(parse_dimensions(&header), Some(Dimensions::new(256, 128)));
    }

    #[test]
    fn test_parse_short_header() {
        assert_eq!(parse_dimensions(&[0u8; 17]), None);
    }

    #[test]
    fn test_read_ignores_pixel_data() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&targa_header(512, 512)).unwrap();
        file.write_all(&[0xAB; 4096]).unwrap();
        file.flush().unwrap();

        assert_eq!(read_dimensions(file.path()).unwrap(), Dimensions::new(512, 512));
    }

    #[test]
    fn test_read_truncated_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 10]).unwrap();
        file.flush().unwrap();

        match read_dimensions(file.path()) {
            Err(HeaderReadError::Truncated {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 18);
                assert_eq!(actual, 10);
            }
            other => panic!("expected truncated error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_dimensions(Path::new("/nonexistent/frame.tga"));
        assert!(matches!(result, Err(HeaderReadError::Open { .. })));
    }

    #[test]
    fn test_negative_dimensions_pass_through() {
        let header = targa_header(-1, 64);
        assert_eq!(parse_dimensions(&header), Some(Dimensions::new(-1, 64)));
    }
}
