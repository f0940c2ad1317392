//! Single-channel source rows: planar RGB channels and Y'UV planes.
//!
//! The chroma mappings are a visualization, not a color conversion.

/// Fill one scanline from a row of 8-bit samples, one stored B,G,R per sample.
fn map_row(src: &[u8], out: &mut [u8], bgr: impl Fn(u8) -> [u8; 3]) {
    for (o, &v) in out.chunks_exact_mut(3).zip(src) {
        o.copy_from_slice(&bgr(v));
    }
}

pub(super) fn red_row(src: &[u8], out: &mut [u8]) {
    map_row(src, out, |v| [0, 0, v]);
}

pub(super) fn green_row(src: &[u8], out: &mut [u8]) {
    map_row(src, out, |v| [0, v, 0]);
}

pub(super) fn blue_row(src: &[u8], out: &mut [u8]) {
    map_row(src, out, |v| [v, 0, 0]);
}

/// Grayscale, R = G = B = Y.
pub(super) fn luma_row(src: &[u8], out: &mut [u8]) {
    map_row(src, out, |v| [v, v, v]);
}

/// R = U, G = 255 - U, B = 0.
pub(super) fn chroma_u_row(src: &[u8], out: &mut [u8]) {
    map_row(src, out, |v| [0, 255 - v, v]);
}

/// R = 0, G = 255 - V, B = V.
pub(super) fn chroma_v_row(src: &[u8], out: &mut [u8]) {
    map_row(src, out, |v| [v, 255 - v, 0]);
}
