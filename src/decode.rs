use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

/// Pixels read back from a bitmap: top-down rows of packed RGB8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOutput {
    pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl DecodeOutput {
    pub(crate) fn new(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Access the pixel data, `width * height * 3` bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// The `[r, g, b]` value at column `x`, row `y` (row 0 is the top).
    ///
    /// Returns `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 3;
        let px = self.pixels.get(off..off + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// Reinterpret the pixel data as typed RGB8 pixels.
    #[cfg(feature = "rgb")]
    pub fn as_rgb8(&self) -> &[rgb::RGB8] {
        self.pixels.as_pixels()
    }

    /// Convert to an [`imgref::ImgVec`] of RGB8 pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB8> {
        imgref::ImgVec::new(
            self.as_rgb8().to_vec(),
            self.width as usize,
            self.height as usize,
        )
    }
}
