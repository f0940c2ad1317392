//! Frame geometry and conversion of source planes into bitmaps.
//!
//! A frame is validated once up front: buffer length, dimensions and
//! limits for every plane are known before the first bitmap is allocated.
//! Planes are then encoded one at a time.

mod packed;
mod planar;

use alloc::vec::Vec;
use enough::Stop;

use crate::bmp::{BmpGeometry, encode_bmp24};
use crate::error::BitmapError;
use crate::limits::Limits;
use crate::pixel::FrameLayout;

/// How a source plane maps onto bitmap channels.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    /// Packed R,G,B, copied as-is.
    Rgb,
    /// Packed 3-byte pixels with red and blue exchanged.
    SwappedRgb,
    /// Packed B,G,R,A; alpha dropped.
    Argb,
    /// Single channel shown as red; green and blue stay zero.
    Red,
    /// Single channel shown as green.
    Green,
    /// Single channel shown as blue.
    Blue,
    /// Grayscale, R = G = B = Y.
    Luma,
    /// False color: R = U, G = 255 - U, B = 0.
    ChromaU,
    /// False color: R = 0, G = 255 - V, B = V.
    ChromaV,
}

impl PlaneKind {
    /// Source bytes per pixel of this plane.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Rgb | Self::SwappedRgb => 3,
            Self::Argb => 4,
            _ => 1,
        }
    }
}

/// One region of a source frame that becomes one bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plane {
    pub kind: PlaneKind,
    /// File-name suffix, `None` for the single plane of a packed layout.
    pub suffix: Option<&'static str>,
    /// Byte offset of the plane within the frame.
    pub offset: usize,
    pub width: u32,
    pub height: u32,
}

impl Plane {
    /// Source bytes covered by this plane, `None` on overflow.
    pub fn len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.kind.bytes_per_pixel())
    }

    /// Whether the plane covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Byte range of the plane within its frame.
    fn range(&self) -> Result<core::ops::Range<usize>, BitmapError> {
        self.len()
            .and_then(|len| self.offset.checked_add(len))
            .map(|end| self.offset..end)
            .ok_or(BitmapError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }

    fn row_fn(&self) -> fn(&[u8], &mut [u8]) {
        match self.kind {
            PlaneKind::Rgb => packed::rgb_row,
            PlaneKind::SwappedRgb => packed::swapped_row,
            PlaneKind::Argb => packed::argb_row,
            PlaneKind::Red => planar::red_row,
            PlaneKind::Green => planar::green_row,
            PlaneKind::Blue => planar::blue_row,
            PlaneKind::Luma => planar::luma_row,
            PlaneKind::ChromaU => planar::chroma_u_row,
            PlaneKind::ChromaV => planar::chroma_v_row,
        }
    }

    fn sized(kind: PlaneKind, suffix: Option<&'static str>, offset: usize, w: u32, h: u32) -> Self {
        Self {
            kind,
            suffix,
            offset,
            width: w,
            height: h,
        }
    }
}

/// One encoded bitmap, a complete `.bmp` file image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaneBitmap {
    pub suffix: Option<&'static str>,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameLayout {
    /// Split a `width x height` frame into its output planes.
    ///
    /// Offsets are computed once here; conversion only slices.
    pub fn planes(&self, width: u32, height: u32) -> Result<Vec<Plane>, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::ZeroDimensions { width, height });
        }
        self.frame_len(width, height)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let luma_len = width as usize * height as usize;

        let planes = match self {
            Self::Rgb24 => alloc::vec![Plane::sized(PlaneKind::Rgb, None, 0, width, height)],
            Self::Bgr24 => alloc::vec![Plane::sized(PlaneKind::SwappedRgb, None, 0, width, height)],
            Self::Argb32 => alloc::vec![Plane::sized(PlaneKind::Argb, None, 0, width, height)],
            Self::RgbPlanar => {
                let table = [
                    (PlaneKind::Red, 0, width, height),
                    (PlaneKind::Green, luma_len, width, height),
                    (PlaneKind::Blue, 2 * luma_len, width, height),
                ];
                self.split(table)
            }
            Self::Yuv420 => {
                let (cw, ch) = (width >> 1, height >> 1);
                if cw == 0 || ch == 0 {
                    return Err(BitmapError::ZeroDimensions {
                        width: cw,
                        height: ch,
                    });
                }
                let chroma_len = cw as usize * ch as usize;
                let table = [
                    (PlaneKind::Luma, 0, width, height),
                    (PlaneKind::ChromaU, luma_len, cw, ch),
                    (PlaneKind::ChromaV, luma_len + chroma_len, cw, ch),
                ];
                self.split(table)
            }
        };
        log::trace!("{:?} {width}x{height}: {planes:?}", self);
        Ok(planes)
    }

    fn split(&self, table: [(PlaneKind, usize, u32, u32); 3]) -> Vec<Plane> {
        table
            .into_iter()
            .zip(self.suffixes())
            .map(|((kind, offset, w, h), &suffix)| Plane::sized(kind, Some(suffix), offset, w, h))
            .collect()
    }
}

/// Validate a frame and return its planes.
///
/// Runs every check that could fail before output starts: empty buffer,
/// dimensions, buffer length, bitmap geometry and limits of each plane.
pub(crate) fn prepare(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: FrameLayout,
    limits: Option<&Limits>,
) -> Result<Vec<Plane>, BitmapError> {
    if pixels.is_empty() {
        return Err(BitmapError::EmptyBuffer);
    }
    let planes = layout.planes(width, height)?;
    let needed = layout
        .frame_len(width, height)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if pixels.len() < needed {
        return Err(BitmapError::BufferTooSmall {
            needed,
            actual: pixels.len(),
        });
    }
    for plane in &planes {
        let geometry = BmpGeometry::new(plane.width, plane.height)?;
        if let Some(limits) = limits {
            limits.check_plane(plane.width, plane.height, geometry.file_size)?;
        }
    }
    Ok(planes)
}

/// Validate a caller-supplied plane against its frame, then encode it.
///
/// The plane must fit inside a `width x height` frame and inside `pixels`.
pub(crate) fn encode_single(
    pixels: &[u8],
    width: u32,
    height: u32,
    plane: &Plane,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<PlaneBitmap, BitmapError> {
    if pixels.is_empty() {
        return Err(BitmapError::EmptyBuffer);
    }
    if width == 0 || height == 0 {
        return Err(BitmapError::ZeroDimensions { width, height });
    }
    if plane.is_empty() {
        return Err(BitmapError::ZeroDimensions {
            width: plane.width,
            height: plane.height,
        });
    }
    if plane.width > width || plane.height > height {
        return Err(BitmapError::DimensionsTooLarge {
            width: plane.width,
            height: plane.height,
        });
    }
    let range = plane.range()?;
    if range.end > pixels.len() {
        return Err(BitmapError::BufferTooSmall {
            needed: range.end,
            actual: pixels.len(),
        });
    }
    let geometry = BmpGeometry::new(plane.width, plane.height)?;
    if let Some(limits) = limits {
        limits.check_plane(plane.width, plane.height, geometry.file_size)?;
    }
    encode_plane(pixels, plane, stop)
}

/// Encode one plane of `pixels` into a bitmap.
pub(crate) fn encode_plane(
    pixels: &[u8],
    plane: &Plane,
    stop: &dyn Stop,
) -> Result<PlaneBitmap, BitmapError> {
    let range = plane.range()?;
    let needed = range.end;
    let data = pixels.get(range).ok_or(BitmapError::BufferTooSmall {
        needed,
        actual: pixels.len(),
    })?;
    let geometry = BmpGeometry::new(plane.width, plane.height)?;
    let src_stride = plane.width as usize * plane.kind.bytes_per_pixel();
    let fill = plane.row_fn();

    let bitmap = encode_bmp24(&geometry, stop, |y, row| {
        fill(&data[y * src_stride..(y + 1) * src_stride], row);
    })?;

    Ok(PlaneBitmap {
        suffix: plane.suffix,
        width: plane.width,
        height: plane.height,
        data: bitmap,
    })
}

/// Validate and encode every plane of a frame.
pub(crate) fn encode_all(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: FrameLayout,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<PlaneBitmap>, BitmapError> {
    prepare(pixels, width, height, layout, limits)?
        .iter()
        .map(|plane| encode_plane(pixels, plane, stop))
        .collect()
}
