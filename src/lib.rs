//! # fsbmp
//!
//! Bitmap codec for Flight Simulator textures: standard BMP plus the "FS70"
//! extension record, with DXT1/DXT3/DXT5 block decoding and DXT3 encoding.
//!
//! ## Supported Formats
//!
//! ### Decode
//! - Uncompressed 16-bit (X1R5G5B5), 24-bit and 32-bit bitmaps
//! - 16-bit bitmaps with explicit channel masks (56-byte info header)
//! - FS70 32-bit, DXT1 (opaque and 1-bit alpha), DXT3 and DXT5
//!
//! ### Encode
//! - Standard 24-bit (54-byte header)
//! - FS70 32-bit and FS70 DXT3 (74-byte header)
//!
//! Every decode produces a canonical B,G,R,A raster ([`Image`]). Rows stay in
//! file order; bitmaps are bottom-up and nothing here flips them.
//!
//! ## Non-Goals
//!
//! - Palette and top-down bitmaps
//! - Non-square or non-power-of-two images
//! - Mip chains (the mip flag is reported, levels are never read or written)
//!
//! ## Usage
//!
//! ```no_run
//! use fsbmp::{ContainerInfo, DecodeRequest, EncodeRequest, TargetFormat, Unstoppable};
//!
//! let data: &[u8] = &[]; // your bitmap bytes
//!
//! // Probe without decoding
//! let info = ContainerInfo::from_bytes(data)?;
//! println!("{}x{} {}", info.width, info.height, info.format.description());
//!
//! // Decode to BGRA
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//!
//! // Re-encode as DXT3
//! let dxt3 = EncodeRequest::new(TargetFormat::Dxt3).encode(&decoded.image, Unstoppable)?;
//! # Ok::<(), fsbmp::FsBmpError>(())
//! ```
//!
//! ## Features
//!
//! - `rayon` (default): convert rows and block rows on the rayon thread pool
//! - `std`: implied by `rayon`; without it the crate is `no_std` + `alloc`
//! - `rgb` / `imgref`: typed BGRA views of decoded images

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bmp;
mod bytes;
mod convert;
mod decode;
pub mod dxt;
mod encode;
mod error;
mod image;
mod info;
mod limits;
mod parallel;
mod pixel;
mod transcode;

// Re-exports
pub use decode::{DecodeRequest, Decoded};
pub use encode::EncodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::FsBmpError;
pub use image::{Image, RawImage};
pub use info::ContainerInfo;
pub use limits::Limits;
pub use pixel::{ChannelMask, PixelFormat, TargetFormat};
pub use transcode::{Transcoded, transcode, transcode_batch};

use alloc::vec::Vec;

/// Decode a bitmap to a canonical BGRA [`Image`].
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Decoded, FsBmpError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode `image` as `target`.
pub fn encode(image: &Image, target: TargetFormat, stop: impl Stop) -> Result<Vec<u8>, FsBmpError> {
    EncodeRequest::new(target).encode(image, stop)
}

/// Read dimensions and format without decoding pixels.
pub fn probe(data: &[u8]) -> Result<ContainerInfo, FsBmpError> {
    ContainerInfo::from_bytes(data)
}
