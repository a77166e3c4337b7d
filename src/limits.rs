use crate::error::FsBmpError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit). Bitmaps handled by this crate are
/// always square, so `max_width` and `max_height` usually carry the same value.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for any single pixel buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), FsBmpError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(FsBmpError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(FsBmpError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(FsBmpError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), FsBmpError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(FsBmpError::LimitExceeded(alloc::format!(
                    "allocation {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_everything() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_memory(usize::MAX).is_ok());
    }

    #[test]
    fn pixel_and_memory_limits() {
        let limits = Limits {
            max_pixels: Some(64),
            max_memory_bytes: Some(256),
            ..Default::default()
        };
        assert!(limits.check(8, 8).is_ok());
        assert!(matches!(
            limits.check(16, 16),
            Err(FsBmpError::LimitExceeded(_))
        ));
        assert!(limits.check_memory(256).is_ok());
        assert!(matches!(
            limits.check_memory(257),
            Err(FsBmpError::LimitExceeded(_))
        ));
    }
}
