//! Little-endian integer access over byte buffers.
//!
//! The `read_*`/`put_*` helpers work on fixed offsets and are used by the
//! block codecs, whose inputs are always full blocks. [`Cursor`] is the
//! bounds-checked sequential reader used by the header parser.

use crate::error::FsBmpError;

#[inline]
pub(crate) fn read_u16_le(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

#[inline]
pub(crate) fn read_u32_le(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

/// Read 6 bytes as the low 48 bits of a `u64`.
#[inline]
pub(crate) fn read_u48_le(buf: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes[..6].copy_from_slice(&buf[at..at + 6]);
    u64::from_le_bytes(bytes)
}

#[inline]
pub(crate) fn read_u64_le(buf: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[at..at + 8]);
    u64::from_le_bytes(bytes)
}

#[inline]
pub(crate) fn put_u16_le(buf: &mut [u8], at: usize, value: u16) {
    buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn put_u32_le(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn put_u64_le(buf: &mut [u8], at: usize, value: u64) {
    buf[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

/// Sequential reader. Reads past the end fail with
/// [`FsBmpError::TruncatedData`]; nothing is zero-filled.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    fn truncated(&self, n: usize) -> FsBmpError {
        FsBmpError::TruncatedData {
            needed: self.pos.saturating_add(n),
            actual: self.data.len(),
        }
    }

    pub(crate) fn skip(&mut self, n: usize) -> Result<(), FsBmpError> {
        let new_pos = self.pos.checked_add(n).ok_or_else(|| self.truncated(n))?;
        if new_pos > self.data.len() {
            return Err(self.truncated(n));
        }
        self.pos = new_pos;
        Ok(())
    }

    /// Borrow the next `n` bytes and advance past them.
    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], FsBmpError> {
        let end = self.pos.checked_add(n).ok_or_else(|| self.truncated(n))?;
        let bytes = self.data.get(self.pos..end).ok_or_else(|| self.truncated(n))?;
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, FsBmpError> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn u16_le(&mut self) -> Result<u16, FsBmpError> {
        Ok(read_u16_le(self.take(2)?, 0))
    }

    pub(crate) fn u32_le(&mut self) -> Result<u32, FsBmpError> {
        Ok(read_u32_le(self.take(4)?, 0))
    }
}
