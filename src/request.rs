use alloc::vec::Vec;
use enough::Stop;

use crate::error::BitmapError;
use crate::frame::{self, Plane, PlaneBitmap};
use crate::limits::Limits;
use crate::pixel::FrameLayout;

/// Builder for converting one raw frame into bitmaps.
///
/// ```
/// use zenframebmp::{FrameRequest, Limits, Unstoppable};
///
/// let pixels = [255u8, 0, 0].repeat(4); // 2x2 red, RGB24
/// let limits = Limits { max_pixels: Some(1 << 24), ..Default::default() };
/// let bitmaps = FrameRequest::rgb()
///     .with_limits(&limits)
///     .encode(&pixels, 2, 2, Unstoppable)?;
/// assert_eq!(bitmaps.len(), 1);
/// assert_eq!(&bitmaps[0].data[..2], b"BM");
/// # Ok::<(), zenframebmp::BitmapError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FrameRequest<'a> {
    layout: FrameLayout,
    limits: Option<&'a Limits>,
}

impl<'a> FrameRequest<'a> {
    pub fn new(layout: FrameLayout) -> Self {
        Self {
            layout,
            limits: None,
        }
    }

    /// Packed R,G,B frames.
    pub fn rgb() -> Self {
        Self::new(FrameLayout::Rgb24)
    }

    /// Packed 3-byte frames with red and blue exchanged.
    pub fn bgr() -> Self {
        Self::new(FrameLayout::Bgr24)
    }

    /// Packed 4-byte B,G,R,A frames.
    pub fn argb() -> Self {
        Self::new(FrameLayout::Argb32)
    }

    /// Planar R, G, B frames, one bitmap per channel.
    pub fn rgb_planar() -> Self {
        Self::new(FrameLayout::RgbPlanar)
    }

    /// Planar Y'UV 4:2:0 frames, one bitmap per plane.
    pub fn yuv420() -> Self {
        Self::new(FrameLayout::Yuv420)
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn layout(&self) -> FrameLayout {
        self.layout
    }

    /// Validate a frame without encoding it, returning its planes.
    pub fn planes(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<Plane>, BitmapError> {
        frame::prepare(pixels, width, height, self.layout, self.limits)
    }

    /// Encode every plane of the frame in memory.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<PlaneBitmap>, BitmapError> {
        frame::encode_all(pixels, width, height, self.layout, self.limits, &stop)
    }

    /// Encode a single plane of a `width x height` frame, as returned by
    /// [`Self::planes`] or [`FrameLayout::planes`].
    pub fn encode_plane(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        plane: &Plane,
        stop: impl Stop,
    ) -> Result<PlaneBitmap, BitmapError> {
        frame::encode_single(pixels, width, height, plane, self.limits, &stop)
    }

    /// Encode and write the frame, one file per plane.
    ///
    /// Packed layouts write to `path`; planar layouts write to paths derived
    /// by [`crate::plane_path`]. Returns the written paths in plane order.
    /// If a plane fails, files written for earlier planes stay on disk.
    #[cfg(feature = "std")]
    pub fn save(
        &self,
        path: impl AsRef<std::path::Path>,
        pixels: &[u8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<std::path::PathBuf>, BitmapError> {
        crate::save::save_planes(
            path.as_ref(),
            pixels,
            width,
            height,
            self.layout,
            self.limits,
            &stop,
        )
    }
}
