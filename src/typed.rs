//! Typed-pixel entry points over the `rgb` and `imgref` crates.

use alloc::vec::Vec;
use enough::Stop;
use rgb::RGB8;
use rgb::alt::BGRA8;

use crate::bmp::{BmpGeometry, encode_bmp24};
use crate::error::BitmapError;

fn check_len(len: usize, width: u32, height: u32, bpp: usize) -> Result<usize, BitmapError> {
    if len == 0 {
        return Err(BitmapError::EmptyBuffer);
    }
    let count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    if len < count {
        return Err(BitmapError::BufferTooSmall {
            needed: count * bpp,
            actual: len * bpp,
        });
    }
    Ok(width as usize)
}

/// Encode top-down RGB8 pixels as one bitmap.
pub fn encode_rgb8(
    pixels: &[RGB8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    let geometry = BmpGeometry::new(width, height)?;
    let w = check_len(pixels.len(), width, height, 3)?;
    encode_bmp24(&geometry, &stop, |y, row| {
        for (o, p) in row.chunks_exact_mut(3).zip(&pixels[y * w..(y + 1) * w]) {
            o.copy_from_slice(&[p.b, p.g, p.r]);
        }
    })
}

/// Encode top-down BGRA8 pixels (the [`crate::FrameLayout::Argb32`] memory
/// order) as one bitmap, dropping alpha.
pub fn encode_bgra8(
    pixels: &[BGRA8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    let geometry = BmpGeometry::new(width, height)?;
    let w = check_len(pixels.len(), width, height, 4)?;
    encode_bmp24(&geometry, &stop, |y, row| {
        for (o, p) in row.chunks_exact_mut(3).zip(&pixels[y * w..(y + 1) * w]) {
            o.copy_from_slice(&[p.b, p.g, p.r]);
        }
    })
}

/// Encode a possibly strided RGB8 image as one bitmap.
#[cfg(feature = "imgref")]
pub fn encode_img_rgb8(
    img: imgref::ImgRef<'_, RGB8>,
    stop: impl Stop,
) -> Result<Vec<u8>, BitmapError> {
    let (width, height) = (img.width(), img.height());
    let too_large = || BitmapError::DimensionsTooLarge {
        width: u32::try_from(width).unwrap_or(u32::MAX),
        height: u32::try_from(height).unwrap_or(u32::MAX),
    };
    let width = u32::try_from(width).map_err(|_| too_large())?;
    let height = u32::try_from(height).map_err(|_| too_large())?;
    let geometry = BmpGeometry::new(width, height)?;

    let (buf, stride, w) = (img.buf(), img.stride(), img.width());
    encode_bmp24(&geometry, &stop, |y, row| {
        let start = y * stride;
        for (o, p) in row.chunks_exact_mut(3).zip(&buf[start..start + w]) {
            o.copy_from_slice(&[p.b, p.g, p.r]);
        }
    })
}
