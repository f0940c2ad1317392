//! # zenframebmp
//!
//! Dump raw frame buffers as 24-bit uncompressed BMP files for inspection.
//!
//! Frames come straight out of a capture or decode pipeline: a byte slice,
//! a width and height, and a layout the caller knows. Each frame becomes one
//! bitmap, or three for planar layouts (one per channel or plane).
//!
//! ## Supported Layouts
//!
//! - **Rgb24**: packed R,G,B
//! - **Bgr24**: packed 3-byte pixels with red and blue exchanged on output
//! - **Argb32**: packed B,G,R,A (a little-endian `0xAARRGGBB` word), alpha dropped
//! - **RgbPlanar**: full-resolution red, green and blue planes, written as
//!   `name-red.bmp`, `name-green.bmp`, `name-blue.bmp`
//! - **Yuv420**: planar Y'UV 4:2:0, written as `name-y.bmp` (grayscale),
//!   `name-u.bmp` and `name-v.bmp` (false color, half resolution)
//!
//! Output is always a 14-byte file header, a 40-byte `BITMAPINFOHEADER`, and
//! bottom-up BGR scanlines padded with zeros to 4 bytes.
//!
//! ## Non-Goals
//!
//! - Color conversion (Y'UV planes are visualized, never combined)
//! - Other output depths or compressed bitmaps
//! - Reading arbitrary BMP files (the decoder only reads 24-bit `BI_RGB`)
//!
//! ## Usage
//!
//! ```no_run
//! use zenframebmp::{FrameRequest, Unstoppable};
//!
//! let (width, height) = (1920, 1080);
//! let frame: Vec<u8> = vec![0; width * height * 3 / 2]; // your Y'UV 4:2:0 frame
//!
//! // Writes dump-y.bmp, dump-u.bmp, dump-v.bmp
//! let written = FrameRequest::yuv420()
//!     .save("dump.bmp", &frame, width as u32, height as u32, Unstoppable)?;
//! assert_eq!(written.len(), 3);
//! # Ok::<(), zenframebmp::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod decode;
mod error;
mod frame;
mod limits;
mod pixel;
mod request;

pub mod bmp;

#[cfg(feature = "std")]
mod save;

#[cfg(feature = "rgb")]
mod typed;

use alloc::vec::Vec;

// Re-exports
pub use decode::DecodeOutput;
pub use enough::{Stop, Unstoppable};
pub use error::BitmapError;
pub use frame::{Plane, PlaneBitmap, PlaneKind};
pub use limits::Limits;
pub use pixel::FrameLayout;
pub use request::FrameRequest;

#[cfg(feature = "std")]
pub use save::{
    plane_path, save_argb, save_bgr, save_bitmap, save_frame, save_rgb, save_rgb_planar,
    save_yuv420,
};

#[cfg(feature = "rgb")]
pub use typed::{encode_bgra8, encode_rgb8};

#[cfg(feature = "imgref")]
pub use typed::encode_img_rgb8;

/// Convert a frame into its bitmaps, in plane order.
///
/// Packed layouts yield one bitmap; planar layouts yield three.
pub fn encode_frame(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: FrameLayout,
    stop: impl Stop,
) -> Result<Vec<PlaneBitmap>, BitmapError> {
    FrameRequest::new(layout).encode(pixels, width, height, stop)
}

/// Convert one plane of a `width x height` frame into a bitmap.
///
/// `plane` usually comes from [`FrameLayout::planes`]. A hand-built plane
/// must fit inside the frame and inside `pixels`.
pub fn encode_plane(
    pixels: &[u8],
    width: u32,
    height: u32,
    plane: &Plane,
    stop: impl Stop,
) -> Result<PlaneBitmap, BitmapError> {
    frame::encode_single(pixels, width, height, plane, None, &stop)
}

/// Wrap scanlines that are already bottom-up, BGR and stride-padded in a
/// bitmap header.
///
/// `data` must hold at least `stride * height` bytes, with
/// `stride = (width * 3 + 3) & !3`. Padding bytes in the output are zero
/// whatever `data` holds there.
pub fn encode_bmp24_raw(
    data: &[u8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    bmp::encode_bmp24_raw(data, width, height, &stop)
}

/// Decode a 24-bit uncompressed bitmap to top-down RGB8 pixels.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, BitmapError> {
    bmp::decode_bmp24(data, &stop)
}
