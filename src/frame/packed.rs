//! Packed 3- and 4-byte source rows.
//!
//! Each function fills one scanline of BGR triples from one source row.

/// R,G,B source, stored unchanged.
pub(super) fn rgb_row(src: &[u8], out: &mut [u8]) {
    for (o, s) in out.chunks_exact_mut(3).zip(src.chunks_exact(3)) {
        o[0] = s[2];
        o[1] = s[1];
        o[2] = s[0];
    }
}

/// Same source layout as [`rgb_row`] with red and blue exchanged, so the
/// source bytes are copied into the scanline verbatim.
pub(super) fn swapped_row(src: &[u8], out: &mut [u8]) {
    out.copy_from_slice(&src[..out.len()]);
}

/// B,G,R,A source; alpha dropped.
pub(super) fn argb_row(src: &[u8], out: &mut [u8]) {
    for (o, s) in out.chunks_exact_mut(3).zip(src.chunks_exact(4)) {
        o.copy_from_slice(&s[..3]);
    }
}
