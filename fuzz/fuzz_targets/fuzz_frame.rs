#![no_main]
use libfuzzer_sys::fuzz_target;
use zenframebmp::*;

fuzz_target!(|data: &[u8]| {
    // First three bytes pick layout and dimensions, the rest is the frame
    let [sel, w, h, frame @ ..] = data else {
        return;
    };
    let layout = match sel % 5 {
        0 => FrameLayout::Rgb24,
        1 => FrameLayout::Bgr24,
        2 => FrameLayout::Argb32,
        3 => FrameLayout::RgbPlanar,
        _ => FrameLayout::Yuv420,
    };
    let (width, height) = (u32::from(*w), u32::from(*h));

    let Ok(bitmaps) = encode_frame(frame, width, height, layout, enough::Unstoppable) else {
        return;
    };
    assert_eq!(bitmaps.len(), layout.plane_count());

    // Every bitmap must decode back to its own dimensions
    for bitmap in &bitmaps {
        let decoded = decode_bmp(&bitmap.data, enough::Unstoppable)
            .unwrap_or_else(|e| panic!("encoded bitmap failed to decode: {e}"));
        assert_eq!(decoded.width, bitmap.width);
        assert_eq!(decoded.height, bitmap.height);
    }
});
