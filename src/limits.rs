use crate::error::BitmapError;

/// Resource limits for frame conversion.
///
/// All fields default to `None` (no limit). Limits apply to each output
/// plane separately and are checked before that plane's bitmap is allocated,
/// so a YUV420 frame is judged by its luma plane and its two smaller chroma
/// planes independently.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height) of one plane.
    pub max_pixels: Option<u64>,
    /// Maximum size of one encoded bitmap, headers included.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Limits that only cap the encoded size of each bitmap.
    pub fn with_max_memory(bytes: u64) -> Self {
        Self {
            max_memory_bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Check one plane's geometry and the size of the bitmap it encodes to.
    pub(crate) fn check_plane(
        &self,
        width: u32,
        height: u32,
        encoded_len: usize,
    ) -> Result<(), BitmapError> {
        let pixels = u64::from(width) * u64::from(height);
        exceeds("width", u64::from(width), self.max_width)?;
        exceeds("height", u64::from(height), self.max_height)?;
        exceeds("pixel count", pixels, self.max_pixels)?;
        exceeds("bitmap size", encoded_len as u64, self.max_memory_bytes)
    }
}

fn exceeds(what: &str, value: u64, limit: Option<u64>) -> Result<(), BitmapError> {
    match limit {
        Some(max) if value > max => Err(BitmapError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
