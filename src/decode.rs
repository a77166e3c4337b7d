use enough::Stop;

use crate::error::FsBmpError;
use crate::image::{Image, RawImage};
use crate::limits::Limits;
use crate::pixel::PixelFormat;

/// Decoded bitmap: the canonical BGRA raster plus what it was stored as.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    pub image: Image,
    /// Encoding the pixels were stored in before conversion.
    pub source_format: PixelFormat,
    /// The file declared mip levels. Only the base image is decoded.
    pub has_mipmaps: bool,
}

impl Decoded {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// B,G,R,A bytes.
    pub fn pixels(&self) -> &[u8] {
        self.image.pixels()
    }

    pub fn into_image(self) -> Image {
        self.image
    }
}

/// Decode request builder.
///
/// ```no_run
/// use fsbmp::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // bitmap bytes
/// let limits = Limits { max_pixels: Some(4096 * 4096), ..Default::default() };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{} {}x{}", decoded.source_format.description(), decoded.width(), decoded.height());
/// # Ok::<(), fsbmp::FsBmpError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before any pixel buffer is allocated.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Parse and convert to canonical BGRA.
    pub fn decode(self, stop: impl Stop) -> Result<Decoded, FsBmpError> {
        self.decode_dyn(&stop)
    }

    /// Parse only, returning pixel data in its stored encoding.
    pub fn decode_raw(self, stop: impl Stop) -> Result<RawImage, FsBmpError> {
        crate::bmp::parse(self.data, self.limits, &stop)
    }

    pub(crate) fn decode_dyn(self, stop: &dyn Stop) -> Result<Decoded, FsBmpError> {
        let raw = crate::bmp::parse(self.data, self.limits, stop)?;
        let source_format = raw.format;
        let has_mipmaps = raw.has_mipmaps;
        let image = raw.into_image(stop)?;
        Ok(Decoded {
            image,
            source_format,
            has_mipmaps,
        })
    }
}
