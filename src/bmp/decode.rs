//! Header parser and 24-bit `BI_RGB` decoder.
//!
//! Only reads what this crate writes (plus top-down variants), for
//! inspecting dumped frames. Palettes, bitfields, RLE and other depths are
//! rejected as unsupported.

use alloc::vec;

use enough::Stop;

use super::encode::{FILE_HEADER_LEN, INFO_HEADER_LEN};
use crate::decode::DecodeOutput;
use crate::error::BitmapError;

// ── Parsed header ───────────────────────────────────────────────────

/// `BITMAPFILEHEADER` and `BITMAPINFOHEADER` fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    /// `bfSize`.
    pub file_size: u32,
    /// `bfOffBits`.
    pub data_offset: u32,
    /// `biSize`. 40 for `BITMAPINFOHEADER`, larger for V4/V5 headers.
    pub info_size: u32,
    pub width: i32,
    /// Positive for bottom-up scanlines, negative for top-down.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    /// `biSizeImage`. May be zero for `BI_RGB` files from other writers.
    pub image_size: u32,
    pub x_pels_per_meter: i32,
    pub y_pels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BmpHeader {
    /// Whether the first stored scanline is the bottom row.
    pub fn is_bottom_up(&self) -> bool {
        self.height > 0
    }

    /// Absolute image height.
    pub fn rows(&self) -> u32 {
        self.height.unsigned_abs()
    }
}

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let bytes = self
            .data
            .get(self.pos..self.pos + N)
            .ok_or(BitmapError::UnexpectedEof)?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn u16_le(&mut self) -> Result<u16, BitmapError> {
        self.take().map(u16::from_le_bytes)
    }

    fn u32_le(&mut self) -> Result<u32, BitmapError> {
        self.take().map(u32::from_le_bytes)
    }

    fn i32_le(&mut self) -> Result<i32, BitmapError> {
        self.take().map(i32::from_le_bytes)
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Parse the file and info headers without touching pixel data.
pub fn parse_bmp_header(data: &[u8]) -> Result<BmpHeader, BitmapError> {
    if data.len() < FILE_HEADER_LEN {
        return Err(BitmapError::UnexpectedEof);
    }
    let mut cur = Cursor::new(data);
    if cur.take::<2>()? != *b"BM" {
        return Err(BitmapError::UnrecognizedFormat);
    }
    let file_size = cur.u32_le()?;
    cur.take::<4>()?; // reserved
    let data_offset = cur.u32_le()?;

    let info_size = cur.u32_le()?;
    if (info_size as usize) < INFO_HEADER_LEN {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "info header of {info_size} bytes (OS/2 bitmaps are not supported)"
        )));
    }

    let header = BmpHeader {
        file_size,
        data_offset,
        info_size,
        width: cur.i32_le()?,
        height: cur.i32_le()?,
        planes: cur.u16_le()?,
        bit_count: cur.u16_le()?,
        compression: cur.u32_le()?,
        image_size: cur.u32_le()?,
        x_pels_per_meter: cur.i32_le()?,
        y_pels_per_meter: cur.i32_le()?,
        colors_used: cur.u32_le()?,
        colors_important: cur.u32_le()?,
    };

    if header.width <= 0 || header.height == 0 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "bad dimensions {}x{}",
            header.width,
            header.height
        )));
    }
    if (header.data_offset as usize) < FILE_HEADER_LEN.saturating_add(header.info_size as usize) {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "pixel data offset {} overlaps the headers",
            header.data_offset
        )));
    }

    Ok(header)
}

// ── Pixel decoding ──────────────────────────────────────────────────

/// Decode a 24-bit uncompressed bitmap to top-down RGB8 pixels.
pub(crate) fn decode_bmp24(data: &[u8], stop: &dyn Stop) -> Result<DecodeOutput, BitmapError> {
    let header = parse_bmp_header(data)?;
    if header.planes != 1 {
        return Err(BitmapError::InvalidHeader(alloc::format!(
            "{} planes, expected 1",
            header.planes
        )));
    }
    if header.bit_count != 24 || header.compression != 0 {
        return Err(BitmapError::UnsupportedVariant(alloc::format!(
            "{}-bit bitmap with compression {}",
            header.bit_count,
            header.compression
        )));
    }

    let width = header.width as u32;
    let height = header.rows();
    let geometry = super::BmpGeometry::new(width, height)?;
    let offset = header.data_offset as usize;
    let pixel_data = offset
        .checked_add(geometry.image_size)
        .and_then(|end| data.get(offset..end))
        .ok_or(BitmapError::UnexpectedEof)?;

    stop.check()?;

    let w = width as usize;
    let h = height as usize;
    let row_bytes = geometry.row_bytes();
    let mut pixels = vec![0u8; row_bytes * h];
    for (stored_row, scanline) in pixel_data.chunks_exact(geometry.stride).enumerate() {
        if stored_row % 16 == 0 {
            stop.check()?;
        }
        let y = if header.is_bottom_up() {
            h - 1 - stored_row
        } else {
            stored_row
        };
        let dst = &mut pixels[y * row_bytes..(y + 1) * row_bytes];
        for (out, bgr) in dst.chunks_exact_mut(3).zip(scanline[..w * 3].chunks_exact(3)) {
            out[0] = bgr[2];
            out[1] = bgr[1];
            out[2] = bgr[0];
        }
    }

    Ok(DecodeOutput::new(pixels, width, height))
}
