//! Container header parser.
//!
//! Walks the file header, the 40- or 56-byte info header and the optional
//! FS70 record, classifying the pixel encoding along the way. Every check
//! short-circuits; nothing is zero-filled or guessed.

use alloc::format;

use enough::Stop;
use log::{debug, warn};

use super::{
    COMPRESSION_BITFIELDS, COMPRESSION_NONE, FOURCC_DXT1, FOURCC_DXT3, FOURCC_DXT5, FS70_MAGIC,
    FS70_VERSION, INFO_HEADER_LEN, MASKED_INFO_HEADER_LEN, SIGNATURE, SUBTYPE_DEFAULT,
    SUBTYPE_DXT1_ALPHA, SUBTYPE_DXT1_OPAQUE,
};
use crate::bytes::Cursor;
use crate::error::FsBmpError;
use crate::image::{RawImage, validate_dimensions};
use crate::info::ContainerInfo;
use crate::limits::Limits;
use crate::pixel::{ChannelMask, PixelFormat};

/// Parse the headers of `data` without touching pixel data.
pub(crate) fn parse_header(
    data: &[u8],
    limits: Option<&Limits>,
) -> Result<ContainerInfo, FsBmpError> {
    let mut c = Cursor::new(data);

    // ── File header ─────────────────────────────────────────────────

    if c.take(2)? != SIGNATURE {
        return Err(FsBmpError::BadSignature("missing 'BM' signature".into()));
    }
    // Declared total size; only zero is rejected.
    if c.u32_le()? == 0 {
        return Err(FsBmpError::BadSignature("file size field is zero".into()));
    }
    c.skip(4)?;
    let data_offset = c.u32_le()? as usize;

    // ── Info header ─────────────────────────────────────────────────

    let header_len = c.u32_le()?;
    if header_len != INFO_HEADER_LEN && header_len != MASKED_INFO_HEADER_LEN {
        return Err(FsBmpError::UnsupportedHeader(format!(
            "info header size {header_len}"
        )));
    }

    let width = c.u32_le()?;
    let height = c.u32_le()?;
    validate_dimensions(width, height)?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }

    let planes = c.u16_le()?;
    if planes != 1 {
        return Err(FsBmpError::BadSignature(format!("{planes} color planes")));
    }

    let bit_depth = c.u16_le()?;
    let mut format = match bit_depth {
        16 => PixelFormat::Std16,
        24 => PixelFormat::Std24,
        32 => PixelFormat::Std32,
        other => {
            return Err(FsBmpError::UnsupportedHeader(format!(
                "bit depth {other}"
            )));
        }
    };

    let compression = c.u32_le()?;
    match compression {
        COMPRESSION_NONE => {}
        FOURCC_DXT1 => format = PixelFormat::Dxt1,
        FOURCC_DXT3 => format = PixelFormat::Dxt3,
        FOURCC_DXT5 => format = PixelFormat::Dxt5,
        COMPRESSION_BITFIELDS if header_len == MASKED_INFO_HEADER_LEN => {}
        COMPRESSION_BITFIELDS => {
            return Err(FsBmpError::UnsupportedHeader(
                "bit fields require the 56-byte info header".into(),
            ));
        }
        other => {
            return Err(FsBmpError::UnsupportedHeader(format!(
                "compression {other:#010x}"
            )));
        }
    }

    let data_len = c.u32_le()? as usize;
    // Horizontal and vertical resolution.
    c.skip(8)?;
    let palette_colors = c.u32_le()?;
    if palette_colors != 0 {
        return Err(FsBmpError::UnsupportedHeader(format!(
            "{palette_colors}-color palette"
        )));
    }
    // Important colors.
    c.skip(4)?;

    let mut masks = None;
    if header_len == MASKED_INFO_HEADER_LEN {
        if bit_depth != 16 {
            return Err(FsBmpError::UnsupportedHeader(format!(
                "bit masks with bit depth {bit_depth}"
            )));
        }
        format = PixelFormat::Masked16;
        let mask = ChannelMask {
            red: c.u32_le()?,
            green: c.u32_le()?,
            blue: c.u32_le()?,
            alpha: c.u32_le()?,
        };
        debug!(
            "channel masks: red {:#06x} green {:#06x} blue {:#06x} alpha {:#06x}",
            mask.red, mask.green, mask.blue, mask.alpha
        );
        masks = Some(mask);
    }

    // ── FS70 record ─────────────────────────────────────────────────

    let mut has_mipmaps = false;
    if c.position() != data_offset {
        let (fs_format, mip_count) = parse_fs70(&mut c, format, bit_depth)?;
        format = fs_format;
        if mip_count != 0 {
            warn!("{mip_count} mip levels declared; only the base image is read");
            has_mipmaps = true;
        }
    }

    let pixel_offset = c.position();
    let end = pixel_offset.saturating_add(data_len);
    if end > c.len() {
        return Err(FsBmpError::TruncatedData {
            needed: end,
            actual: c.len(),
        });
    }

    debug!(
        "{width}x{height} {}, {data_len} pixel bytes at offset {pixel_offset}",
        format.description()
    );

    Ok(ContainerInfo {
        width,
        height,
        format,
        masks,
        has_mipmaps,
        data_offset: pixel_offset,
        data_len,
    })
}

/// Read the 20-byte FS70 record, returning the refined format and the
/// declared mip count.
fn parse_fs70(
    c: &mut Cursor<'_>,
    format: PixelFormat,
    bit_depth: u16,
) -> Result<(PixelFormat, u16), FsBmpError> {
    let magic = c.u32_le()?;
    if magic != FS70_MAGIC {
        return Err(FsBmpError::UnsupportedHeader(format!(
            "unknown header extension {magic:#010x}"
        )));
    }
    let mut format = format;
    if bit_depth == 32 {
        format = PixelFormat::FsFull32;
    }
    let version = c.u32_le()?;
    if version != FS70_VERSION {
        return Err(FsBmpError::UnsupportedHeader(format!(
            "FS70 version {version}"
        )));
    }
    if !matches!(
        format,
        PixelFormat::FsFull32 | PixelFormat::Dxt1 | PixelFormat::Dxt3 | PixelFormat::Dxt5
    ) {
        return Err(FsBmpError::IncompatibleExtension(format!(
            "FS70 record on {} data",
            format.description()
        )));
    }

    c.skip(1)?;
    let subtype = c.u8()?;
    format = match (format, subtype) {
        (PixelFormat::Dxt1, SUBTYPE_DXT1_ALPHA) => PixelFormat::Dxt1Alpha,
        (PixelFormat::Dxt1, SUBTYPE_DXT1_OPAQUE) => PixelFormat::Dxt1,
        (PixelFormat::Dxt1, other) => {
            return Err(FsBmpError::IncompatibleExtension(format!(
                "DXT1 sub-type {other}"
            )));
        }
        (f, SUBTYPE_DEFAULT) => f,
        (f, other) => {
            return Err(FsBmpError::IncompatibleExtension(format!(
                "{} sub-type {other}",
                f.description()
            )));
        }
    };

    c.skip(4)?;
    let mip_count = c.u16_le()?;
    c.skip(4)?;
    Ok((format, mip_count))
}

/// Parse `data` and copy out its pixel data.
pub(crate) fn parse(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<RawImage, FsBmpError> {
    let info = parse_header(data, limits)?;
    if let Some(limits) = limits {
        limits.check_memory(info.data_len)?;
        let canonical = (info.width as usize)
            .saturating_mul(info.height as usize)
            .saturating_mul(4);
        limits.check_memory(canonical)?;
    }
    stop.check()?;
    let pixels = &data[info.data_offset..info.data_offset + info.data_len];
    Ok(RawImage {
        width: info.width,
        height: info.height,
        format: info.format,
        masks: info.masks,
        has_mipmaps: info.has_mipmaps,
        data: pixels.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::super::FS70_RECORD_LEN;
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use enough::Unstoppable;
    use rstest::rstest;

    /// Hand-assembled container; fields are patched by the tests.
    struct Fixture {
        header_len: u32,
        width: u32,
        height: u32,
        planes: u16,
        bit_depth: u16,
        compression: u32,
        palette: u32,
        masks: [u32; 4],
        fs70: Option<(u32, u32, u8, u16)>,
        payload: usize,
    }

    impl Default for Fixture {
        fn default() -> Self {
            Self {
                header_len: 40,
                width: 4,
                height: 4,
                planes: 1,
                bit_depth: 24,
                compression: 0,
                palette: 0,
                masks: [0; 4],
                fs70: None,
                payload: 48,
            }
        }
    }

    impl Fixture {
        fn fs(bit_depth: u16, compression: u32, subtype: u8, payload: usize) -> Self {
            Self {
                bit_depth,
                compression,
                fs70: Some((FS70_MAGIC, FS70_VERSION, subtype, 0)),
                payload,
                ..Default::default()
            }
        }

        fn build(&self) -> Vec<u8> {
            let mut out = Vec::new();
            let mut header_end = 14 + self.header_len as usize;
            if self.fs70.is_some() {
                header_end += FS70_RECORD_LEN;
            }
            out.extend_from_slice(b"BM");
            out.extend_from_slice(&((header_end + self.payload) as u32).to_le_bytes());
            out.extend_from_slice(&[0; 4]);
            out.extend_from_slice(&(header_end as u32).to_le_bytes());
            out.extend_from_slice(&self.header_len.to_le_bytes());
            out.extend_from_slice(&self.width.to_le_bytes());
            out.extend_from_slice(&self.height.to_le_bytes());
            out.extend_from_slice(&self.planes.to_le_bytes());
            out.extend_from_slice(&self.bit_depth.to_le_bytes());
            out.extend_from_slice(&self.compression.to_le_bytes());
            out.extend_from_slice(&(self.payload as u32).to_le_bytes());
            out.extend_from_slice(&[0; 8]);
            out.extend_from_slice(&self.palette.to_le_bytes());
            out.extend_from_slice(&[0; 4]);
            if self.header_len == 56 {
                for m in self.masks {
                    out.extend_from_slice(&m.to_le_bytes());
                }
            }
            if let Some((magic, version, subtype, mips)) = self.fs70 {
                out.extend_from_slice(&magic.to_le_bytes());
                out.extend_from_slice(&version.to_le_bytes());
                out.push(0);
                out.push(subtype);
                out.extend_from_slice(&[0; 4]);
                out.extend_from_slice(&mips.to_le_bytes());
                out.extend_from_slice(&[0; 4]);
            }
            out.extend((0..self.payload).map(|i| i as u8));
            out
        }
    }

    fn classify(f: &Fixture) -> Result<ContainerInfo, FsBmpError> {
        parse_header(&f.build(), None)
    }

    #[test]
    fn plain_24_bit() {
        let info = classify(&Fixture::default()).unwrap();
        assert_eq!(info.format, PixelFormat::Std24);
        assert_eq!(info.data_offset, 54);
        assert_eq!(info.data_len, 48);
        assert!(!info.has_mipmaps);
        assert_eq!(info.masks, None);
    }

    #[rstest]
    #[case(16, PixelFormat::Std16, 32)]
    #[case(24, PixelFormat::Std24, 48)]
    #[case(32, PixelFormat::Std32, 64)]
    fn uncompressed_depths(#[case] depth: u16, #[case] format: PixelFormat, #[case] len: usize) {
        let f = Fixture {
            bit_depth: depth,
            payload: len,
            ..Default::default()
        };
        assert_eq!(classify(&f).unwrap().format, format);
    }

    #[rstest]
    #[case(32, 0, 4, PixelFormat::FsFull32, 64)]
    #[case(16, FOURCC_DXT1, 1, PixelFormat::Dxt1, 8)]
    #[case(16, FOURCC_DXT1, 2, PixelFormat::Dxt1Alpha, 8)]
    #[case(16, FOURCC_DXT3, 4, PixelFormat::Dxt3, 16)]
    #[case(16, FOURCC_DXT5, 4, PixelFormat::Dxt5, 16)]
    fn fs70_formats(
        #[case] depth: u16,
        #[case] compression: u32,
        #[case] subtype: u8,
        #[case] format: PixelFormat,
        #[case] len: usize,
    ) {
        let info = classify(&Fixture::fs(depth, compression, subtype, len)).unwrap();
        assert_eq!(info.format, format);
        assert_eq!(info.data_offset, 74);
    }

    #[test]
    fn dxt_fourcc_without_record() {
        let f = Fixture {
            bit_depth: 16,
            compression: FOURCC_DXT5,
            payload: 16,
            ..Default::default()
        };
        assert_eq!(classify(&f).unwrap().format, PixelFormat::Dxt5);
    }

    #[test]
    fn masked_header() {
        let f = Fixture {
            header_len: 56,
            bit_depth: 16,
            compression: COMPRESSION_BITFIELDS,
            masks: [0xF800, 0x07E0, 0x001F, 0],
            payload: 32,
            ..Default::default()
        };
        let info = classify(&f).unwrap();
        assert_eq!(info.format, PixelFormat::Masked16);
        assert_eq!(info.data_offset, 70);
        assert_eq!(
            info.masks,
            Some(ChannelMask {
                red: 0xF800,
                green: 0x07E0,
                blue: 0x001F,
                alpha: 0
            })
        );
    }

    #[test]
    fn masked_header_overrides_dxt_fourcc() {
        let f = Fixture {
            header_len: 56,
            bit_depth: 16,
            compression: FOURCC_DXT1,
            payload: 32,
            ..Default::default()
        };
        assert_eq!(classify(&f).unwrap().format, PixelFormat::Masked16);
    }

    #[test]
    fn masked_header_requires_16_bit() {
        let f = Fixture {
            header_len: 56,
            bit_depth: 32,
            payload: 64,
            ..Default::default()
        };
        assert!(matches!(classify(&f), Err(FsBmpError::UnsupportedHeader(_))));
    }

    #[test]
    fn bad_signature() {
        let mut data = Fixture::default().build();
        data[0] = b'X';
        assert!(matches!(
            parse_header(&data, None),
            Err(FsBmpError::BadSignature(_))
        ));
    }

    #[test]
    fn zero_file_size() {
        let mut data = Fixture::default().build();
        data[2..6].fill(0);
        assert!(matches!(
            parse_header(&data, None),
            Err(FsBmpError::BadSignature(_))
        ));
    }

    #[test]
    fn two_planes() {
        let f = Fixture {
            planes: 2,
            ..Default::default()
        };
        assert!(matches!(classify(&f), Err(FsBmpError::BadSignature(_))));
    }

    #[rstest]
    #[case(12)]
    #[case(108)]
    #[case(124)]
    fn other_header_sizes(#[case] len: u32) {
        let f = Fixture {
            header_len: len,
            ..Default::default()
        };
        assert!(matches!(classify(&f), Err(FsBmpError::UnsupportedHeader(_))));
    }

    #[rstest]
    #[case(6, 6)]
    #[case(2, 2)]
    #[case(12, 12)]
    fn invalid_dimensions(#[case] w: u32, #[case] h: u32) {
        let f = Fixture {
            width: w,
            height: h,
            ..Default::default()
        };
        assert!(matches!(
            classify(&f),
            Err(FsBmpError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn non_square() {
        let f = Fixture {
            width: 8,
            height: 4,
            ..Default::default()
        };
        assert!(matches!(
            classify(&f),
            Err(FsBmpError::DimensionMismatch {
                width: 8,
                height: 4
            })
        ));
    }

    #[rstest]
    #[case(1)]
    #[case(8)]
    #[case(15)]
    fn unsupported_depths(#[case] depth: u16) {
        let f = Fixture {
            bit_depth: depth,
            ..Default::default()
        };
        assert!(matches!(classify(&f), Err(FsBmpError::UnsupportedHeader(_))));
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    fn unsupported_compression(#[case] compression: u32) {
        let f = Fixture {
            compression,
            ..Default::default()
        };
        assert!(matches!(classify(&f), Err(FsBmpError::UnsupportedHeader(_))));
    }

    #[test]
    fn palette_rejected() {
        let f = Fixture {
            palette: 16,
            ..Default::default()
        };
        assert!(matches!(classify(&f), Err(FsBmpError::UnsupportedHeader(_))));
    }

    #[test]
    fn wrong_fs70_magic_and_version() {
        let mut f = Fixture::fs(32, 0, 4, 64);
        f.fs70 = Some((0xDEAD_BEEF, FS70_VERSION, 4, 0));
        assert!(matches!(classify(&f), Err(FsBmpError::UnsupportedHeader(_))));
        f.fs70 = Some((FS70_MAGIC, 21, 4, 0));
        assert!(matches!(classify(&f), Err(FsBmpError::UnsupportedHeader(_))));
    }

    #[test]
    fn fs70_on_24_bit_is_incompatible() {
        let f = Fixture::fs(24, 0, 4, 48);
        assert!(matches!(
            classify(&f),
            Err(FsBmpError::IncompatibleExtension(_))
        ));
    }

    #[rstest]
    #[case(16, FOURCC_DXT1, 4, 8)]
    #[case(16, FOURCC_DXT1, 0, 8)]
    #[case(16, FOURCC_DXT3, 2, 16)]
    #[case(32, 0, 1, 64)]
    fn bad_subtype(
        #[case] depth: u16,
        #[case] compression: u32,
        #[case] subtype: u8,
        #[case] len: usize,
    ) {
        let f = Fixture::fs(depth, compression, subtype, len);
        assert!(matches!(
            classify(&f),
            Err(FsBmpError::IncompatibleExtension(_))
        ));
    }

    #[test]
    fn mip_count_sets_flag() {
        let mut f = Fixture::fs(16, FOURCC_DXT3, 4, 16);
        f.fs70 = Some((FS70_MAGIC, FS70_VERSION, 4, 3));
        assert!(classify(&f).unwrap().has_mipmaps);
    }

    #[test]
    fn short_pixel_data() {
        let mut data = Fixture::default().build();
        data.truncate(data.len() - 1);
        assert!(matches!(
            parse_header(&data, None),
            Err(FsBmpError::TruncatedData {
                needed: 102,
                actual: 101
            })
        ));
    }

    #[test]
    fn short_header() {
        let data = Fixture::default().build();
        assert!(matches!(
            parse_header(&data[..30], None),
            Err(FsBmpError::TruncatedData { .. })
        ));
        assert!(matches!(
            parse_header(&[], None),
            Err(FsBmpError::TruncatedData { .. })
        ));
    }

    #[test]
    fn limits_are_enforced() {
        let data = Fixture::default().build();
        let tight = Limits {
            max_width: Some(2),
            ..Default::default()
        };
        assert!(matches!(
            parse_header(&data, Some(&tight)),
            Err(FsBmpError::LimitExceeded(_))
        ));
        let memory = Limits {
            max_memory_bytes: Some(32),
            ..Default::default()
        };
        assert!(parse_header(&data, Some(&memory)).is_ok());
        assert!(matches!(
            parse(&data, Some(&memory), &Unstoppable),
            Err(FsBmpError::LimitExceeded(_))
        ));
    }

    #[test]
    fn parse_copies_exact_payload() {
        let data = Fixture::default().build();
        let raw = parse(&data, None, &Unstoppable).unwrap();
        assert_eq!(raw.format, PixelFormat::Std24);
        assert_eq!(raw.data, (0..48u8).collect::<Vec<_>>());

        // Trailing bytes past the declared size are ignored.
        let mut padded = data.clone();
        padded.extend_from_slice(&vec![0xAA; 10]);
        assert_eq!(parse(&padded, None, &Unstoppable).unwrap().data, raw.data);
    }
}
