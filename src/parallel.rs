//! Data-parallel loops over disjoint buffer chunks.
//!
//! Every texel and block transform in this crate reads one input chunk and
//! writes one output chunk with no state shared between chunks. The
//! `rayon` feature runs the chunks on the global thread pool; without it
//! they run in order on the calling thread. Output is identical either way.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::FsBmpError;

/// Chunks processed between cancellation checks.
const STRIPE_CHUNKS: usize = 64;

/// Apply `f` to each `(src chunk, dst chunk)` pair.
///
/// `src` and `dst` must hold the same number of chunks.
pub(crate) fn map_chunks<F>(
    src: &[u8],
    src_chunk: usize,
    dst: &mut [u8],
    dst_chunk: usize,
    stop: &dyn Stop,
    f: F,
) -> Result<(), FsBmpError>
where
    F: Fn(&[u8], &mut [u8]) + Sync,
{
    debug_assert_eq!(src.len() / src_chunk, dst.len() / dst_chunk);
    let src_stripe = src_chunk * STRIPE_CHUNKS;
    let dst_stripe = dst_chunk * STRIPE_CHUNKS;
    for (src, dst) in src.chunks(src_stripe).zip(dst.chunks_mut(dst_stripe)) {
        stop.check()?;
        run_stripe(src, src_chunk, dst, dst_chunk, &f);
    }
    Ok(())
}

#[cfg(feature = "rayon")]
fn run_stripe<F>(src: &[u8], src_chunk: usize, dst: &mut [u8], dst_chunk: usize, f: &F)
where
    F: Fn(&[u8], &mut [u8]) + Sync,
{
    use rayon::prelude::*;
    dst.par_chunks_exact_mut(dst_chunk)
        .zip(src.par_chunks_exact(src_chunk))
        .for_each(|(d, s)| f(s, d));
}

#[cfg(not(feature = "rayon"))]
fn run_stripe<F>(src: &[u8], src_chunk: usize, dst: &mut [u8], dst_chunk: usize, f: &F)
where
    F: Fn(&[u8], &mut [u8]) + Sync,
{
    dst.chunks_exact_mut(dst_chunk)
        .zip(src.chunks_exact(src_chunk))
        .for_each(|(d, s)| f(s, d));
}

/// Map independent items, in parallel when `rayon` is enabled.
pub(crate) fn map_items<T, R, F>(items: &[T], f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        items.par_iter().map(f).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        items.iter().map(f).collect()
    }
}
