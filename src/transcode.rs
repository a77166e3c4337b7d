//! Source-to-target conversion in one call.

use alloc::vec::Vec;

use enough::Stop;
use log::{debug, warn};

use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::FsBmpError;
use crate::info::ContainerInfo;
use crate::parallel::map_items;
use crate::pixel::{PixelFormat, TargetFormat};

/// Result of [`transcode`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transcoded {
    /// The input is already stored as the target format; it was not touched.
    Unchanged,
    /// A newly encoded container.
    Converted(Vec<u8>),
}

impl Transcoded {
    /// Whether a new container was produced.
    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted(_))
    }

    /// The converted bytes, or `original` when nothing changed.
    pub fn into_bytes(self, original: &[u8]) -> Vec<u8> {
        match self {
            Self::Unchanged => original.to_vec(),
            Self::Converted(bytes) => bytes,
        }
    }
}

/// Decode `data` and re-encode it as `target`.
///
/// When the file is already stored as `target` only its headers are
/// validated and [`Transcoded::Unchanged`] is returned.
pub fn transcode(
    data: &[u8],
    target: TargetFormat,
    stop: impl Stop,
) -> Result<Transcoded, FsBmpError> {
    transcode_dyn(data, target, &stop)
}

fn transcode_dyn(
    data: &[u8],
    target: TargetFormat,
    stop: &dyn Stop,
) -> Result<Transcoded, FsBmpError> {
    let info = ContainerInfo::from_bytes(data)?;
    if info.format == PixelFormat::from(target) {
        debug!("already {}, leaving as is", info.format.description());
        return Ok(Transcoded::Unchanged);
    }
    let decoded = DecodeRequest::new(data).decode_dyn(stop)?;
    let bytes = EncodeRequest::new(target).encode_dyn(&decoded.image, stop)?;
    Ok(Transcoded::Converted(bytes))
}

/// Transcode many inputs independently.
///
/// Returns one result per input, in input order. A failing input does not
/// affect the others. With the `rayon` feature inputs are processed in
/// parallel.
pub fn transcode_batch<D, S>(
    inputs: &[D],
    target: TargetFormat,
    stop: S,
) -> Vec<Result<Transcoded, FsBmpError>>
where
    D: AsRef<[u8]> + Sync,
    S: Stop + Sync,
{
    let results = map_items(inputs, |data| transcode_dyn(data.as_ref(), target, &stop));
    for (i, r) in results.iter().enumerate() {
        if let Err(e) = r {
            warn!("batch item {i}: {e}");
        }
    }
    results
}
