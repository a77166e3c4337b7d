use crate::error::FsBmpError;

/// Pixel encoding of a bitmap as classified by the container parser.
///
/// The `Fs*` and `Dxt*` variants can only come from files carrying the
/// Flight Simulator "FS70" extension record (DXT fourCCs are also accepted
/// without one).
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Uncompressed B,G,R.
    Std24,
    /// Uncompressed B,G,R,A.
    Std32,
    /// Uncompressed B,G,R,A with an FS70 record.
    FsFull32,
    /// DXT1 blocks, opaque.
    Dxt1,
    /// DXT1 blocks with 1-bit (punch-through) alpha.
    Dxt1Alpha,
    /// DXT3 blocks (explicit 4-bit alpha).
    Dxt3,
    /// DXT5 blocks (interpolated alpha).
    Dxt5,
    /// 16-bit X1R5G5B5.
    Std16,
    /// 16-bit with explicit channel bit masks.
    Masked16,
    /// Not classified.
    Unknown,
}

impl PixelFormat {
    /// Human-readable label.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unknown => "Undefined / other",
            Self::Std24 => "Standard 24-bit",
            Self::Std32 => "Standard 32-bit",
            Self::FsFull32 => "Flight Simulator 32-bit",
            Self::Dxt1 => "Flight Simulator DXT1 without Alpha",
            Self::Dxt1Alpha => "Flight Simulator DXT1 with Alpha",
            Self::Dxt3 => "Flight Simulator DXT3",
            Self::Dxt5 => "Flight Simulator DXT5",
            Self::Std16 => "Standard 16-bit",
            Self::Masked16 => "16-bit with bit masks",
        }
    }

    /// Whether files of this format are written with an FS70 record.
    pub fn has_fs_extension(&self) -> bool {
        matches!(
            self,
            Self::FsFull32 | Self::Dxt1 | Self::Dxt1Alpha | Self::Dxt3 | Self::Dxt5
        )
    }

    /// Whether the format is stored as 4x4 compressed blocks.
    pub fn is_block_compressed(&self) -> bool {
        matches!(
            self,
            Self::Dxt1 | Self::Dxt1Alpha | Self::Dxt3 | Self::Dxt5
        )
    }

    /// Bytes per 4x4 block, or `None` for per-pixel formats.
    pub fn block_size(&self) -> Option<usize> {
        match self {
            Self::Dxt1 | Self::Dxt1Alpha => Some(8),
            Self::Dxt3 | Self::Dxt5 => Some(16),
            _ => None,
        }
    }

    /// Bytes per pixel for uncompressed formats.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            Self::Std16 | Self::Masked16 => Some(2),
            Self::Std24 => Some(3),
            Self::Std32 | Self::FsFull32 => Some(4),
            _ => None,
        }
    }

    /// Size in bytes of a `width` x `height` raster in this encoding.
    ///
    /// Returns `None` for [`PixelFormat::Unknown`] or on overflow.
    pub fn raw_size(&self, width: u32, height: u32) -> Option<usize> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        if let Some(bpp) = self.bytes_per_pixel() {
            return pixels.checked_mul(bpp);
        }
        let block_size = self.block_size()?;
        (pixels / 16).checked_mul(block_size)
    }
}

/// Output encodings the encoder can produce.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    /// Standard 24-bit bitmap, 54-byte header.
    Std24,
    /// 32-bit bitmap with FS70 record, 74-byte header.
    FsFull32,
    /// DXT3 bitmap with FS70 record, 74-byte header.
    Dxt3,
}

impl TargetFormat {
    /// All supported targets.
    pub const ALL: [TargetFormat; 3] = [Self::Std24, Self::FsFull32, Self::Dxt3];
}

impl From<TargetFormat> for PixelFormat {
    fn from(t: TargetFormat) -> Self {
        match t {
            TargetFormat::Std24 => PixelFormat::Std24,
            TargetFormat::FsFull32 => PixelFormat::FsFull32,
            TargetFormat::Dxt3 => PixelFormat::Dxt3,
        }
    }
}

impl TryFrom<PixelFormat> for TargetFormat {
    type Error = FsBmpError;

    fn try_from(format: PixelFormat) -> Result<Self, Self::Error> {
        match format {
            PixelFormat::Std24 => Ok(Self::Std24),
            PixelFormat::FsFull32 => Ok(Self::FsFull32),
            PixelFormat::Dxt3 => Ok(Self::Dxt3),
            PixelFormat::Std32
            | PixelFormat::Dxt1
            | PixelFormat::Dxt1Alpha
            | PixelFormat::Dxt5
            | PixelFormat::Std16
            | PixelFormat::Masked16
            | PixelFormat::Unknown => Err(FsBmpError::UnsupportedTarget(format)),
        }
    }
}

/// Channel bit masks of a 16-bit bitfield bitmap.
///
/// Masks are applied to the little-endian 16-bit pixel word. They are not
/// required to be contiguous or disjoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChannelMask {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
    pub alpha: u32,
}
