//! Bitmap container layer: header parsing and header writing (internal).
//!
//! Use the top-level [`crate::decode`], [`crate::encode`] and
//! [`crate::probe`] helpers or the request builders.

mod encode;
mod header;

pub(crate) use encode::write_container;
pub(crate) use header::{parse, parse_header};

/// `'B','M'`.
pub(crate) const SIGNATURE: [u8; 2] = *b"BM";

/// File header (14 bytes) plus the 40-byte info header.
pub(crate) const STD_HEADER_LEN: usize = 54;
/// [`STD_HEADER_LEN`] plus the 20-byte FS70 record.
pub(crate) const FS_HEADER_LEN: usize = 74;

pub(crate) const INFO_HEADER_LEN: u32 = 40;
/// Info header with red, green, blue and alpha masks appended.
pub(crate) const MASKED_INFO_HEADER_LEN: u32 = 56;

pub(crate) const COMPRESSION_NONE: u32 = 0;
pub(crate) const COMPRESSION_BITFIELDS: u32 = 3;
pub(crate) const FOURCC_DXT1: u32 = u32::from_le_bytes(*b"DXT1");
pub(crate) const FOURCC_DXT3: u32 = u32::from_le_bytes(*b"DXT3");
pub(crate) const FOURCC_DXT5: u32 = u32::from_le_bytes(*b"DXT5");

/// "FS70" read as a little-endian u32.
pub(crate) const FS70_MAGIC: u32 = u32::from_le_bytes(*b"FS70");
pub(crate) const FS70_VERSION: u32 = 20;
pub(crate) const FS70_RECORD_LEN: usize = 20;

/// FS70 sub-type bytes.
pub(crate) const SUBTYPE_DXT1_OPAQUE: u8 = 1;
pub(crate) const SUBTYPE_DXT1_ALPHA: u8 = 2;
pub(crate) const SUBTYPE_DEFAULT: u8 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fourcc_values() {
        assert_eq!(FOURCC_DXT1, 827_611_204);
        assert_eq!(FOURCC_DXT3, 861_165_636);
        assert_eq!(FOURCC_DXT5, 894_720_068);
        assert_eq!(FS70_MAGIC, 808_932_166);
        assert_eq!(FS_HEADER_LEN, STD_HEADER_LEN + FS70_RECORD_LEN);
    }
}
