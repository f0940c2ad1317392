//! BMP encoder: uncompressed 24-bit, bottom-up.

use crate::error::BitmapError;
use alloc::vec::Vec;
use enough::Stop;

/// Size of `BITMAPFILEHEADER`.
pub const FILE_HEADER_LEN: usize = 14;
/// Size of `BITMAPINFOHEADER`.
pub const INFO_HEADER_LEN: usize = 40;
/// Offset of the first scanline from the start of the file.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_LEN + INFO_HEADER_LEN;

/// Byte geometry of a 24-bit bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpGeometry {
    pub width: u32,
    pub height: u32,
    /// Bytes per scanline: `(width * 3 + 3) & !3`.
    pub stride: usize,
    /// `stride * height`, the `biSizeImage` field.
    pub image_size: usize,
    /// Headers plus pixel data, the `bfSize` field.
    pub file_size: usize,
}

impl BmpGeometry {
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::ZeroDimensions { width, height });
        }
        // biWidth and biHeight are signed.
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(BitmapError::DimensionsTooLarge { width, height });
        }
        let stride = (width as usize)
            .checked_mul(3)
            .and_then(|r| r.checked_add(3))
            .map(|r| r & !3)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let image_size = stride
            .checked_mul(height as usize)
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        let file_size = image_size
            .checked_add(PIXEL_DATA_OFFSET)
            .filter(|&size| u32::try_from(size).is_ok())
            .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
        Ok(Self {
            width,
            height,
            stride,
            image_size,
            file_size,
        })
    }

    /// Pixel bytes per scanline, padding excluded.
    pub fn row_bytes(&self) -> usize {
        self.width as usize * 3
    }

    /// Zero bytes closing each scanline.
    pub fn padding(&self) -> usize {
        self.stride - self.row_bytes()
    }
}

/// Encode a 24-bit BMP, asking `fill_row` for each scanline.
///
/// `fill_row(y, row)` receives a visual row index (0 = top of the image)
/// and the `width * 3` BGR bytes of the matching scanline. Scanlines are
/// stored bottom-up, so the first one written is `y = height - 1`. The
/// buffer starts zeroed; padding stays zero whatever `fill_row` does.
pub(crate) fn encode_bmp24<F>(
    geometry: &BmpGeometry,
    stop: &dyn Stop,
    mut fill_row: F,
) -> Result<Vec<u8>, BitmapError>
where
    F: FnMut(usize, &mut [u8]),
{
    stop.check()?;

    let mut out = Vec::with_capacity(geometry.file_size);
    write_bmp_header(&mut out, geometry);
    out.resize(geometry.file_size, 0);

    let h = geometry.height as usize;
    let row_bytes = geometry.row_bytes();
    for (out_row, scanline) in out[PIXEL_DATA_OFFSET..]
        .chunks_exact_mut(geometry.stride)
        .enumerate()
    {
        if out_row % 16 == 0 {
            stop.check()?;
        }
        fill_row(h - 1 - out_row, &mut scanline[..row_bytes]);
    }

    Ok(out)
}

/// Wrap scanlines that are already bottom-up, BGR, and stride-padded.
pub(crate) fn encode_bmp24_raw(
    data: &[u8],
    width: u32,
    height: u32,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BitmapError> {
    if data.is_empty() {
        return Err(BitmapError::EmptyBuffer);
    }
    let geometry = BmpGeometry::new(width, height)?;
    if data.len() < geometry.image_size {
        return Err(BitmapError::BufferTooSmall {
            needed: geometry.image_size,
            actual: data.len(),
        });
    }

    let h = geometry.height as usize;
    encode_bmp24(&geometry, stop, |y, row| {
        // Source rows are stored in file order already.
        let start = (h - 1 - y) * geometry.stride;
        row.copy_from_slice(&data[start..start + row.len()]);
    })
}

fn write_bmp_header(out: &mut Vec<u8>, geometry: &BmpGeometry) {
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(geometry.file_size as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(PIXEL_DATA_OFFSET as u32).to_le_bytes());

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&(geometry.width as i32).to_le_bytes());
    out.extend_from_slice(&(geometry.height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&(geometry.image_size as u32).to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes()); // h resolution
    out.extend_from_slice(&0i32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors
}
