use crate::error::FsBmpError;
use crate::limits::Limits;
use crate::pixel::{ChannelMask, PixelFormat};

/// Header-only description of a bitmap, produced without copying pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ContainerInfo {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Channel masks of a [`PixelFormat::Masked16`] file.
    pub masks: Option<ChannelMask>,
    /// The FS70 record declares mip levels (never decoded).
    pub has_mipmaps: bool,
    /// Byte offset of the pixel data in the input.
    pub data_offset: usize,
    /// Declared pixel data length.
    pub data_len: usize,
}

impl ContainerInfo {
    /// Probe headers to get dimensions and format without decoding.
    ///
    /// Runs every header check a full decode would, including the check that
    /// the declared pixel data fits in `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, FsBmpError> {
        crate::bmp::parse_header(data, None)
    }

    /// Like [`ContainerInfo::from_bytes`], rejecting images over `limits`.
    pub fn from_bytes_with_limits(data: &[u8], limits: &Limits) -> Result<Self, FsBmpError> {
        crate::bmp::parse_header(data, Some(limits))
    }

    /// Whether the format is one of the three encoder targets.
    pub fn is_target_format(&self) -> bool {
        crate::pixel::TargetFormat::try_from(self.format).is_ok()
    }
}
