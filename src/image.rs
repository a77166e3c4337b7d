use alloc::vec::Vec;

use enough::Stop;

use crate::error::FsBmpError;
use crate::pixel::{ChannelMask, PixelFormat};
use crate::{convert, dxt};

/// Check the square, power-of-two, at-least-4 size rule.
pub(crate) fn validate_dimensions(width: u32, height: u32) -> Result<(), FsBmpError> {
    if width != height {
        return Err(FsBmpError::DimensionMismatch { width, height });
    }
    if width < 4 || !width.is_power_of_two() {
        return Err(FsBmpError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Canonical raster: B,G,R,A bytes, `width * height * 4` long.
///
/// Rows are kept in container order (bitmaps are stored bottom-up and this
/// crate never flips them).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Image {
    /// Wrap a BGRA buffer.
    ///
    /// Fails if the dimensions are not square powers of two `>= 4`, or if
    /// `pixels` is shorter than `width * height * 4`. Trailing bytes beyond
    /// that size are dropped.
    pub fn new(width: u32, height: u32, mut pixels: Vec<u8>) -> Result<Self, FsBmpError> {
        validate_dimensions(width, height)?;
        let needed = canonical_size(width, height)?;
        if pixels.len() < needed {
            return Err(FsBmpError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        pixels.truncate(needed);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Single-color image, handy for tests and placeholders.
    pub fn filled(width: u32, height: u32, bgra: [u8; 4]) -> Result<Self, FsBmpError> {
        validate_dimensions(width, height)?;
        let texels = canonical_size(width, height)? / 4;
        let pixels = bgra.repeat(texels);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_parts_unchecked(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// B,G,R,A bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take the B,G,R,A buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Reinterpret pixel data as typed BGRA pixels.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[rgb::alt::BGRA8] {
        use rgb::AsPixels as _;
        self.pixels.as_pixels()
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, rgb::alt::BGRA8> {
        imgref::ImgRef::new(
            self.as_pixels(),
            self.width as usize,
            self.height as usize,
        )
    }
}

fn canonical_size(width: u32, height: u32) -> Result<usize, FsBmpError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|wh| wh.checked_mul(4))
        .ok_or_else(|| {
            FsBmpError::LimitExceeded(alloc::format!(
                "{width}x{height} image does not fit in memory"
            ))
        })
}

/// Pixel data exactly as stored in the container, plus its classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Present only for [`PixelFormat::Masked16`].
    pub masks: Option<ChannelMask>,
    /// The FS70 record declared mip levels. They are never decoded.
    pub has_mipmaps: bool,
    /// Pixel data in the source encoding.
    pub data: Vec<u8>,
}

impl RawImage {
    /// Decode the source encoding into a canonical BGRA [`Image`].
    ///
    /// The raw buffer is consumed; 32-bit sources are moved rather than
    /// copied when they are exactly sized.
    pub fn into_image(self, stop: &dyn Stop) -> Result<Image, FsBmpError> {
        let needed = self
            .format
            .raw_size(self.width, self.height)
            .ok_or(FsBmpError::UnsupportedFormat(self.format))?;
        if self.data.len() < needed {
            return Err(FsBmpError::TruncatedData {
                needed,
                actual: self.data.len(),
            });
        }
        stop.check()?;

        let (w, h) = (self.width, self.height);
        let pixels = match self.format {
            PixelFormat::Std24 => convert::std24_to_bgra(&self.data[..needed], w, stop)?,
            PixelFormat::Std32 | PixelFormat::FsFull32 => {
                let mut data = self.data;
                data.truncate(needed);
                data
            }
            PixelFormat::Std16 => convert::std16_to_bgra(&self.data[..needed], w, stop)?,
            PixelFormat::Masked16 => {
                let masks = self.masks.unwrap_or_default();
                convert::masked16_to_bgra(&self.data[..needed], w, masks, stop)?
            }
            PixelFormat::Dxt1 => dxt::decode_dxt1(&self.data[..needed], w, h, false, stop)?,
            PixelFormat::Dxt1Alpha => dxt::decode_dxt1(&self.data[..needed], w, h, true, stop)?,
            PixelFormat::Dxt3 => dxt::decode_dxt3(&self.data[..needed], w, h, stop)?,
            PixelFormat::Dxt5 => dxt::decode_dxt5(&self.data[..needed], w, h, stop)?,
            PixelFormat::Unknown => return Err(FsBmpError::UnsupportedFormat(self.format)),
        };
        Ok(Image::from_parts_unchecked(w, h, pixels))
    }
}
