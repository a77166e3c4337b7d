//! Container writer: 54-byte standard header or 74-byte FS70 header.

use alloc::vec::Vec;

use super::{
    COMPRESSION_NONE, FOURCC_DXT3, FS_HEADER_LEN, FS70_MAGIC, FS70_VERSION, INFO_HEADER_LEN,
    SIGNATURE, STD_HEADER_LEN, SUBTYPE_DEFAULT,
};
use crate::error::FsBmpError;
use crate::pixel::TargetFormat;

/// Header fields that vary by target.
struct Layout {
    header_len: usize,
    bit_depth: u16,
    compression: u32,
    fs70: bool,
}

impl Layout {
    fn of(target: TargetFormat) -> Self {
        match target {
            TargetFormat::Std24 => Self {
                header_len: STD_HEADER_LEN,
                bit_depth: 24,
                compression: COMPRESSION_NONE,
                fs70: false,
            },
            TargetFormat::FsFull32 => Self {
                header_len: FS_HEADER_LEN,
                bit_depth: 32,
                compression: COMPRESSION_NONE,
                fs70: true,
            },
            // DXT3 files carry 16 in the bit depth field.
            TargetFormat::Dxt3 => Self {
                header_len: FS_HEADER_LEN,
                bit_depth: 16,
                compression: FOURCC_DXT3,
                fs70: true,
            },
        }
    }
}

/// Prefix `payload` with the container header for `target`.
pub(crate) fn write_container(
    target: TargetFormat,
    width: u32,
    height: u32,
    payload: &[u8],
) -> Result<Vec<u8>, FsBmpError> {
    let layout = Layout::of(target);
    let too_large = || FsBmpError::LimitExceeded(alloc::format!(
        "{} byte payload does not fit a bitmap header",
        payload.len()
    ));
    let file_size = layout
        .header_len
        .checked_add(payload.len())
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(too_large)?;
    let image_size = u32::try_from(payload.len()).map_err(|_| too_large())?;

    let mut out = Vec::with_capacity(file_size as usize);

    // File header (14 bytes)
    out.extend_from_slice(&SIGNATURE);
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(layout.header_len as u32).to_le_bytes()); // data offset

    // Info header (40 bytes)
    out.extend_from_slice(&INFO_HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&layout.bit_depth.to_le_bytes());
    out.extend_from_slice(&layout.compression.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 8]); // resolution
    out.extend_from_slice(&[0u8; 8]); // colors used, important colors

    if layout.fs70 {
        out.extend_from_slice(&FS70_MAGIC.to_le_bytes());
        out.extend_from_slice(&FS70_VERSION.to_le_bytes());
        out.push(0);
        out.push(SUBTYPE_DEFAULT);
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&0u16.to_le_bytes()); // mip count
        out.extend_from_slice(&[0u8; 4]);
    }
    debug_assert_eq!(out.len(), layout.header_len);

    out.extend_from_slice(payload);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::{read_u16_le, read_u32_le};
    use alloc::vec;

    #[test]
    fn std24_header() {
        let out = write_container(TargetFormat::Std24, 4, 4, &vec![9; 48]).unwrap();
        assert_eq!(out.len(), 102);
        assert_eq!(&out[..2], b"BM");
        assert_eq!(read_u32_le(&out, 2), 102);
        assert_eq!(read_u32_le(&out, 10), 0x36);
        assert_eq!(read_u32_le(&out, 14), 40);
        assert_eq!(read_u32_le(&out, 18), 4);
        assert_eq!(read_u32_le(&out, 22), 4);
        assert_eq!(read_u16_le(&out, 26), 1);
        assert_eq!(read_u16_le(&out, 28), 24);
        assert_eq!(read_u32_le(&out, 30), 0);
        assert_eq!(read_u32_le(&out, 34), 48);
        assert!(out[38..54].iter().all(|&b| b == 0));
        assert!(out[54..].iter().all(|&b| b == 9));
    }

    #[test]
    fn fs_full32_header() {
        let out = write_container(TargetFormat::FsFull32, 4, 4, &[0; 64]).unwrap();
        assert_eq!(out.len(), 138);
        assert_eq!(read_u32_le(&out, 2), 138);
        assert_eq!(read_u32_le(&out, 10), 0x4a);
        assert_eq!(read_u16_le(&out, 28), 32);
        assert_eq!(read_u32_le(&out, 30), 0);
        assert_eq!(read_u32_le(&out, 34), 64);
        assert_eq!(&out[54..58], b"FS70");
        assert_eq!(out[58], 0x14);
        assert_eq!(out[62], 0);
        assert_eq!(out[63], 4);
        assert!(out[64..74].iter().all(|&b| b == 0));
    }

    #[test]
    fn dxt3_header() {
        let out = write_container(TargetFormat::Dxt3, 8, 8, &[0; 64]).unwrap();
        assert_eq!(out.len(), 74 + 64);
        assert_eq!(read_u16_le(&out, 28), 16);
        assert_eq!(&out[30..34], b"DXT3");
        assert_eq!(&out[54..58], b"FS70");
        assert_eq!(out[63], 4);
    }
}
