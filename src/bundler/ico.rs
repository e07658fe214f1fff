//! ICO container encoding for `favicon.ico`.
//!
//! Packs already encoded PNG images into a single Windows icon file.
//! Modern browsers and Windows Vista+ accept PNG payloads inside ICO, so no
//! BMP conversion is needed.
//!
//! # Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! ICONDIR       reserved u16 = 0, type u16 = 1, count u16
//! ICONDIRENTRY  width u8, height u8, palette u8 = 0, reserved u8 = 0,
//!  (x count)    planes u16 = 1, bpp u16 = 32, bytes u32, offset u32
//! payloads      PNG data in directory order
//! ```
//!
//! A width or height byte of 0 means 256 pixels.

use crate::bail;
use crate::bundler::error::Result;

const HEADER_LEN: usize = 6;
const ENTRY_LEN: usize = 16;
const ICON_TYPE: u16 = 1;
const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 32;

/// Largest edge length an ICO directory entry can describe.
pub const MAX_ICO_SIZE: u32 = 256;

/// Encodes `(size, png_bytes)` pairs into an ICO file.
///
/// Images keep the order given. Fails on an empty list, more than
/// `u16::MAX` images, a size outside `1..=256`, or offsets beyond `u32`.
pub fn encode(images: &[(u32, Vec<u8>)]) -> Result<Vec<u8>> {
    if images.is_empty() {
        bail!("ICO container needs at least one image");
    }
    let count = u16::try_from(images.len())?;

    let payload_len: usize = images.iter().map(|(_, png)| png.len()).sum();
    let directory_len = HEADER_LEN + ENTRY_LEN * images.len();
    let mut out = Vec::with_capacity(directory_len + payload_len);

    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&ICON_TYPE.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());

    let mut offset = u32::try_from(directory_len)?;
    for (size, png) in images {
        let dimension = dimension_byte(*size)?;
        let data_len = u32::try_from(png.len())?;

        out.push(dimension); // width
        out.push(dimension); // height
        out.push(0); // palette
        out.push(0); // reserved
        out.extend_from_slice(&PLANES.to_le_bytes());
        out.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
        out.extend_from_slice(&data_len.to_le_bytes());
        out.extend_from_slice(&offset.to_le_bytes());

        offset = offset
            .checked_add(data_len)
            .ok_or_else(|| crate::bundler::Error::GenericError("ICO payload exceeds 4 GiB".into()))?;
    }

    for (_, png) in images {
        out.extend_from_slice(png);
    }

    log::debug!("Encoded ICO with {} images ({} bytes)", count, out.len());
    Ok(out)
}

fn dimension_byte(size: u32) -> Result<u8> {
    match size {
        MAX_ICO_SIZE => Ok(0),
        1..MAX_ICO_SIZE => Ok(u8::try_from(size)?),
        _ => bail!("ICO image size {} outside 1..=256", size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u16(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([bytes[at], bytes[at + 1]])
    }

    fn read_u32(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
    }

    #[test]
    fn test_directory_layout() {
        let images = vec![
            (16, vec![1u8; 10]),
            (32, vec![2u8; 20]),
            (48, vec![3u8; 30]),
        ];
        let ico = encode(&images).unwrap();

        assert_eq!(read_u16(&ico, 0), 0);
        assert_eq!(read_u16(&ico, 2), 1);
        assert_eq!(read_u16(&ico, 4), 3);
        assert_eq!(ico.len(), 6 + 3 * 16 + 60);

        let mut expected_offset = 6 + 3 * 16;
        for (i, (size, png)) in images.iter().enumerate() {
            let entry = 6 + i * 16;
            assert_eq!(u32::from(ico[entry]), *size);
            assert_eq!(u32::from(ico[entry + 1]), *size);
            assert_eq!(ico[entry + 2], 0);
            assert_eq!(ico[entry + 3], 0);
            assert_eq!(read_u16(&ico, entry + 4), 1);
            assert_eq!(read_u16(&ico, entry + 6), 32);
            assert_eq!(read_u32(&ico, entry + 8) as usize, png.len());
            assert_eq!(read_u32(&ico, entry + 12) as usize, expected_offset);

            let start = expected_offset;
            assert_eq!(&ico[start..start + png.len()], png.as_slice());
            expected_offset += png.len();
        }
    }

    #[test]
    fn test_256_is_written_as_zero() {
        let ico = encode(&[(256, vec![0u8; 4])]).unwrap();
        assert_eq!(ico[6], 0);
        assert_eq!(ico[7], 0);
    }

    #[test]
    fn test_rejects_empty_and_out_of_range() {
        assert!(encode(&[]).is_err());
        assert!(encode(&[(0, vec![1])]).is_err());
        assert!(encode(&[(257, vec![1])]).is_err());
    }
}
