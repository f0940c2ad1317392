/// Memory layout of a raw source frame.
///
/// Frames are top-left origin, rows packed with no stride padding. The
/// caller picks the layout; nothing in the buffer identifies it.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameLayout {
    /// 3 bytes per pixel, R,G,B.
    Rgb24,
    /// Same 3-byte layout as [`Rgb24`](Self::Rgb24), with red and blue
    /// swapped on output: stored red comes from source byte 2, stored blue
    /// from source byte 0. Use this for frames whose bytes are B,G,R.
    Bgr24,
    /// 4 bytes per pixel holding a little-endian `0xAARRGGBB` word, so the
    /// bytes are B,G,R,A. Alpha is dropped.
    Argb32,
    /// Three full-resolution 8-bit planes: all red, then all green, then all
    /// blue. Produces one bitmap per channel.
    RgbPlanar,
    /// Planar Y'UV 4:2:0: a full-resolution luma plane followed by two
    /// chroma planes of `(width >> 1) x (height >> 1)`. Produces one bitmap
    /// per plane.
    Yuv420,
}

impl FrameLayout {
    /// Bytes per pixel for packed layouts, `None` for planar ones.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            Self::Rgb24 | Self::Bgr24 => Some(3),
            Self::Argb32 => Some(4),
            Self::RgbPlanar | Self::Yuv420 => None,
        }
    }

    /// Number of bitmaps a frame of this layout turns into.
    pub fn plane_count(&self) -> usize {
        match self {
            Self::Rgb24 | Self::Bgr24 | Self::Argb32 => 1,
            Self::RgbPlanar | Self::Yuv420 => 3,
        }
    }

    /// Whether frames of this layout are split into several files.
    pub fn is_planar(&self) -> bool {
        self.plane_count() > 1
    }

    /// File-name suffixes of the output planes, in plane order.
    ///
    /// Empty for packed layouts, which write a single file under the
    /// caller's path.
    pub fn suffixes(&self) -> &'static [&'static str] {
        match self {
            Self::Rgb24 | Self::Bgr24 | Self::Argb32 => &[],
            Self::RgbPlanar => &["red", "green", "blue"],
            Self::Yuv420 => &["y", "u", "v"],
        }
    }

    /// Bytes a source buffer must hold for a `width x height` frame.
    ///
    /// Returns `None` if the size overflows `usize`.
    pub fn frame_len(&self, width: u32, height: u32) -> Option<usize> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        match self {
            Self::Rgb24 | Self::Bgr24 | Self::Argb32 => {
                pixels.checked_mul(self.bytes_per_pixel()?)
            }
            Self::RgbPlanar => pixels.checked_mul(3),
            Self::Yuv420 => {
                let chroma = ((width >> 1) as usize).checked_mul((height >> 1) as usize)?;
                pixels.checked_add(chroma.checked_mul(2)?)
            }
        }
    }
}
