use alloc::vec::Vec;

use enough::Stop;
use log::debug;

use crate::error::FsBmpError;
use crate::image::{Image, validate_dimensions};
use crate::pixel::{PixelFormat, TargetFormat};
use crate::{bmp, convert, dxt};

/// Encode request builder.
///
/// ```no_run
/// use fsbmp::{EncodeRequest, Image, TargetFormat, Unstoppable};
///
/// let image = Image::filled(64, 64, [0, 0, 255, 255])?;
/// let dxt3 = EncodeRequest::new(TargetFormat::Dxt3).encode(&image, Unstoppable)?;
/// assert_eq!(dxt3.len(), 74 + 64 * 64);
/// # Ok::<(), fsbmp::FsBmpError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeRequest {
    target: TargetFormat,
}

impl EncodeRequest {
    pub fn new(target: TargetFormat) -> Self {
        Self { target }
    }

    /// Request for an arbitrary [`PixelFormat`], failing with
    /// [`FsBmpError::UnsupportedTarget`] unless it is one of the targets.
    pub fn for_format(format: PixelFormat) -> Result<Self, FsBmpError> {
        Ok(Self::new(TargetFormat::try_from(format)?))
    }

    pub fn target(&self) -> TargetFormat {
        self.target
    }

    /// Encode `image` into a complete container.
    pub fn encode(&self, image: &Image, stop: impl Stop) -> Result<Vec<u8>, FsBmpError> {
        self.encode_dyn(image, &stop)
    }

    /// Encode a bare B,G,R,A buffer of `width * height * 4` bytes.
    pub fn encode_pixels(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, FsBmpError> {
        validate_dimensions(width, height)?;
        let needed = width as usize * height as usize * 4;
        if pixels.len() < needed {
            return Err(FsBmpError::BufferTooSmall {
                needed,
                actual: pixels.len(),
            });
        }
        let (w, h) = (width, height);
        let payload = self.payload(&pixels[..needed], w, h, &stop)?;
        bmp::write_container(self.target, w, h, &payload)
    }

    pub(crate) fn encode_dyn(&self, image: &Image, stop: &dyn Stop) -> Result<Vec<u8>, FsBmpError> {
        let (w, h) = (image.width(), image.height());
        let payload = self.payload(image.pixels(), w, h, stop)?;
        bmp::write_container(self.target, w, h, &payload)
    }

    fn payload(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, FsBmpError> {
        stop.check()?;
        debug!(
            "encoding {width}x{height} as {}",
            PixelFormat::from(self.target).description()
        );
        match self.target {
            TargetFormat::Std24 => convert::bgra_to_std24(pixels, width, stop),
            TargetFormat::FsFull32 => Ok(pixels.to_vec()),
            TargetFormat::Dxt3 => dxt::encode_dxt3(pixels, width, height, stop),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use enough::Unstoppable;

    #[test]
    fn for_format_rejects_non_targets() {
        assert!(EncodeRequest::for_format(PixelFormat::Dxt3).is_ok());
        for format in [
            PixelFormat::Std32,
            PixelFormat::Dxt1,
            PixelFormat::Dxt1Alpha,
            PixelFormat::Dxt5,
            PixelFormat::Std16,
            PixelFormat::Masked16,
            PixelFormat::Unknown,
        ] {
            assert!(matches!(
                EncodeRequest::for_format(format),
                Err(FsBmpError::UnsupportedTarget(f)) if f == format
            ));
        }
    }

    #[test]
    fn payload_sizes() {
        let image = Image::filled(8, 8, [1, 2, 3, 4]).unwrap();
        let sizes = TargetFormat::ALL.map(|t| {
            EncodeRequest::new(t)
                .encode(&image, Unstoppable)
                .unwrap()
                .len()
        });
        assert_eq!(sizes, [54 + 192, 74 + 256, 74 + 64]);
    }

    #[test]
    fn encode_pixels_checks_buffer() {
        let req = EncodeRequest::new(TargetFormat::FsFull32);
        assert!(matches!(
            req.encode_pixels(&[0; 63], 4, 4, Unstoppable),
            Err(FsBmpError::BufferTooSmall {
                needed: 64,
                actual: 63
            })
        ));
        assert!(matches!(
            req.encode_pixels(&vec![0; 128], 8, 4, Unstoppable),
            Err(FsBmpError::DimensionMismatch { .. })
        ));
        let out = req.encode_pixels(&[7; 64], 4, 4, Unstoppable).unwrap();
        assert_eq!(&out[74..], &[7; 64]);
    }
}
