//! In-memory conversion of every frame layout.

use enough::{Stop, StopReason, Unstoppable};
use zenframebmp::bmp::{BmpGeometry, PIXEL_DATA_OFFSET, parse_bmp_header};
use zenframebmp::*;

struct Cancelled;

impl Stop for Cancelled {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

fn stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

fn single(pixels: &[u8], w: u32, h: u32, layout: FrameLayout) -> PlaneBitmap {
    let mut bitmaps = encode_frame(pixels, w, h, layout, Unstoppable).unwrap();
    assert_eq!(bitmaps.len(), 1);
    bitmaps.remove(0)
}

fn decoded(bitmap: &PlaneBitmap) -> DecodeOutput {
    decode_bmp(&bitmap.data, Unstoppable).unwrap()
}

// ── Header fields ────────────────────────────────────────────────────

#[test]
fn red_2x2_rgb24() {
    let pixels = [255u8, 0, 0].repeat(4);
    let bitmap = single(&pixels, 2, 2, FrameLayout::Rgb24);

    let header = parse_bmp_header(&bitmap.data).unwrap();
    assert_eq!(header.width, 2);
    assert_eq!(header.height, 2);
    assert_eq!(header.image_size, 16);

    let out = decoded(&bitmap);
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(out.pixel(x, y), Some([255, 0, 0]));
        }
    }
}

#[test]
fn header_matches_logical_dimensions() {
    for w in 1..=9u32 {
        for h in 1..=4u32 {
            let pixels = vec![7u8; (w * h * 3) as usize];
            let bitmap = single(&pixels, w, h, FrameLayout::Rgb24);
            let header = parse_bmp_header(&bitmap.data).unwrap();
            let expected_image = stride(w as usize) * h as usize;

            assert_eq!(&bitmap.data[..2], b"BM");
            assert_eq!(header.width, w as i32, "{w}x{h}");
            assert_eq!(header.height, h as i32, "{w}x{h}");
            assert_eq!(header.image_size as usize, expected_image, "{w}x{h}");
            assert_eq!(header.file_size as usize, 54 + expected_image);
            assert_eq!(bitmap.data.len(), 54 + expected_image);
            assert_eq!(header.data_offset, 54);
            assert_eq!(header.info_size, 40);
            assert_eq!(header.planes, 1);
            assert_eq!(header.bit_count, 24);
            assert_eq!(header.compression, 0);
            assert_eq!(header.x_pels_per_meter, 0);
            assert_eq!(header.y_pels_per_meter, 0);
            assert_eq!(header.colors_used, 0);
            assert_eq!(header.colors_important, 0);
        }
    }
}

#[test]
fn reserved_header_bytes_are_zero() {
    let bitmap = single(&[1, 2, 3], 1, 1, FrameLayout::Rgb24);
    assert_eq!(&bitmap.data[6..10], &[0, 0, 0, 0]);
}

#[test]
fn geometry_stride_rule() {
    let g = BmpGeometry::new(5, 3).unwrap();
    assert_eq!(g.stride, 16);
    assert_eq!(g.padding(), 1);
    assert_eq!(g.image_size, 48);
    assert_eq!(g.file_size, 102);

    let g = BmpGeometry::new(4, 1).unwrap();
    assert_eq!(g.stride, 12);
    assert_eq!(g.padding(), 0);
}

// ── Row order and padding ────────────────────────────────────────────

#[test]
fn top_source_row_is_last_scanline() {
    let (w, h) = (3usize, 4usize);
    let mut pixels = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let off = (y * w + x) * 3;
            pixels[off] = (y * 10 + x) as u8;
            pixels[off + 1] = 100 + y as u8;
            pixels[off + 2] = 200 + x as u8;
        }
    }
    let bitmap = single(&pixels, w as u32, h as u32, FrameLayout::Rgb24);

    let last = PIXEL_DATA_OFFSET + (h - 1) * stride(w);
    for x in 0..w {
        let bgr = &bitmap.data[last + x * 3..last + x * 3 + 3];
        let src = &pixels[x * 3..x * 3 + 3];
        assert_eq!(bgr, &[src[2], src[1], src[0]], "column {x}");
    }

    let out = decoded(&bitmap);
    assert_eq!(out.pixels(), &pixels[..]);
}

#[test]
fn padding_bytes_are_zero() {
    let layouts = [
        (FrameLayout::Rgb24, 3),
        (FrameLayout::Bgr24, 3),
        (FrameLayout::Argb32, 4),
        (FrameLayout::RgbPlanar, 3),
    ];
    for w in [1usize, 2, 3, 5, 6, 7] {
        let h = 3usize;
        for (layout, bpp) in layouts {
            let pixels = vec![0xFFu8; w * h * bpp];
            let bitmaps = encode_frame(&pixels, w as u32, h as u32, layout, Unstoppable).unwrap();
            for bitmap in bitmaps {
                let s = stride(w);
                for row in 0..h {
                    let start = PIXEL_DATA_OFFSET + row * s;
                    let pad = &bitmap.data[start + w * 3..start + s];
                    assert!(pad.iter().all(|&b| b == 0), "{layout:?} w={w} row {row}");
                }
            }
        }
    }
}

// ── Packed layouts ───────────────────────────────────────────────────

#[test]
fn bgr24_swaps_red_and_blue() {
    let bitmap = single(&[10, 20, 30], 1, 1, FrameLayout::Bgr24);
    assert_eq!(decoded(&bitmap).pixel(0, 0), Some([30, 20, 10]));
    // Stored B,G,R bytes are the source bytes verbatim.
    assert_eq!(&bitmap.data[54..57], &[10, 20, 30]);
}

#[test]
fn rgb24_keeps_channel_order() {
    let bitmap = single(&[10, 20, 30], 1, 1, FrameLayout::Rgb24);
    assert_eq!(decoded(&bitmap).pixel(0, 0), Some([10, 20, 30]));
    assert_eq!(&bitmap.data[54..57], &[30, 20, 10]);
}

#[test]
fn argb32_drops_alpha() {
    // B, G, R, A
    let bitmap = single(&[3, 2, 1, 128], 1, 1, FrameLayout::Argb32);
    assert_eq!(decoded(&bitmap).pixel(0, 0), Some([1, 2, 3]));
    assert_eq!(bitmap.data.len(), 54 + 4);
}

#[test]
fn argb32_multirow() {
    let pixels = [
        0, 0, 255, 0, 0, 255, 0, 50, // row 0: red, green
        255, 0, 0, 100, 9, 8, 7, 255, // row 1: blue, (7,8,9)
    ];
    let out = decoded(&single(&pixels, 2, 2, FrameLayout::Argb32));
    assert_eq!(out.pixels(), &[255, 0, 0, 0, 255, 0, 0, 0, 255, 7, 8, 9]);
}

#[test]
fn extra_trailing_bytes_are_ignored() {
    let mut pixels = [1u8, 2, 3].repeat(4);
    pixels.extend_from_slice(&[99; 10]);
    let out = decoded(&single(&pixels, 2, 2, FrameLayout::Rgb24));
    assert_eq!(out.pixels(), &[1u8, 2, 3].repeat(4)[..]);
}

// ── Planar layouts ───────────────────────────────────────────────────

#[test]
fn rgb_planar_writes_one_channel_per_bitmap() {
    let (w, h) = (3usize, 2usize);
    let mut pixels = Vec::new();
    pixels.extend(std::iter::repeat_n(10u8, w * h));
    pixels.extend(std::iter::repeat_n(20u8, w * h));
    pixels.extend(std::iter::repeat_n(30u8, w * h));

    let bitmaps =
        encode_frame(&pixels, w as u32, h as u32, FrameLayout::RgbPlanar, Unstoppable).unwrap();
    let suffixes: Vec<_> = bitmaps.iter().map(|b| b.suffix).collect();
    assert_eq!(suffixes, [Some("red"), Some("green"), Some("blue")]);

    let expected = [[10, 0, 0], [0, 20, 0], [0, 0, 30]];
    for (bitmap, want) in bitmaps.iter().zip(expected) {
        assert_eq!((bitmap.width, bitmap.height), (3, 2));
        let out = decoded(bitmap);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(out.pixel(x, y), Some(want));
            }
        }
    }
}

#[test]
fn rgb_planar_flips_each_plane() {
    // 1x2: top row value 1, bottom row value 2, in every plane.
    let pixels = [1u8, 2, 1, 2, 1, 2];
    let bitmaps = encode_frame(&pixels, 1, 2, FrameLayout::RgbPlanar, Unstoppable).unwrap();
    let green = decoded(&bitmaps[1]);
    assert_eq!(green.pixel(0, 0), Some([0, 1, 0]));
    assert_eq!(green.pixel(0, 1), Some([0, 2, 0]));
}

#[test]
fn yuv420_planes_and_false_color() {
    let (w, h) = (4usize, 2usize);
    let mut pixels: Vec<u8> = (0..(w * h) as u8).collect();
    pixels.extend_from_slice(&[100, 200]); // U, 2x1
    pixels.extend_from_slice(&[50, 60]); // V, 2x1

    let bitmaps =
        encode_frame(&pixels, w as u32, h as u32, FrameLayout::Yuv420, Unstoppable).unwrap();
    assert_eq!(bitmaps.len(), 3);
    let suffixes: Vec<_> = bitmaps.iter().map(|b| b.suffix).collect();
    assert_eq!(suffixes, [Some("y"), Some("u"), Some("v")]);

    let luma = decoded(&bitmaps[0]);
    assert_eq!((luma.width, luma.height), (4, 2));
    for y in 0..2u32 {
        for x in 0..4u32 {
            let v = (y * 4 + x) as u8;
            assert_eq!(luma.pixel(x, y), Some([v, v, v]));
        }
    }

    let u = decoded(&bitmaps[1]);
    assert_eq!((u.width, u.height), (2, 1));
    assert_eq!(u.pixel(0, 0), Some([100, 155, 0]));
    assert_eq!(u.pixel(1, 0), Some([200, 55, 0]));

    let v = decoded(&bitmaps[2]);
    assert_eq!((v.width, v.height), (2, 1));
    assert_eq!(v.pixel(0, 0), Some([0, 205, 50]));
    assert_eq!(v.pixel(1, 0), Some([0, 195, 60]));
}

#[test]
fn yuv420_odd_dimensions_round_chroma_down() {
    assert_eq!(FrameLayout::Yuv420.frame_len(5, 3), Some(15 + 2 * 2));
    let pixels = vec![128u8; 19];
    let bitmaps = encode_frame(&pixels, 5, 3, FrameLayout::Yuv420, Unstoppable).unwrap();
    let dims: Vec<_> = bitmaps.iter().map(|b| (b.width, b.height)).collect();
    assert_eq!(dims, [(5, 3), (2, 1), (2, 1)]);
}

#[test]
fn yuv420_needs_two_pixels_per_axis() {
    let pixels = vec![0u8; 16];
    let err = encode_frame(&pixels, 1, 8, FrameLayout::Yuv420, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::ZeroDimensions { width: 0, height: 4 }), "{err:?}");
}

#[test]
fn plane_offsets() {
    let planes = FrameLayout::Yuv420.planes(6, 4).unwrap();
    let offsets: Vec<_> = planes.iter().map(|p| (p.offset, p.len().unwrap())).collect();
    assert_eq!(offsets, [(0, 24), (24, 6), (30, 6)]);

    let planes = FrameLayout::RgbPlanar.planes(6, 4).unwrap();
    let offsets: Vec<_> = planes.iter().map(|p| p.offset).collect();
    assert_eq!(offsets, [0, 24, 48]);

    let planes = FrameLayout::Argb32.planes(6, 4).unwrap();
    assert_eq!(planes.len(), 1);
    assert_eq!(planes[0].suffix, None);
    assert_eq!(planes[0].len(), Some(96));
}

#[test]
fn single_chroma_plane_encodes_alone() {
    // 4x2 Y'UV 4:2:0: 8 luma bytes, then U [100, 200], then V [50, 60].
    let mut pixels = vec![16u8; 8];
    pixels.extend([100, 200, 50, 60]);
    let planes = FrameLayout::Yuv420.planes(4, 2).unwrap();

    let u = encode_plane(&pixels, 4, 2, &planes[1], Unstoppable).unwrap();
    assert_eq!((u.suffix, u.width, u.height), (Some("u"), 2, 1));
    let out = decoded(&u);
    assert_eq!(out.pixel(0, 0), Some([100, 155, 0]));
    assert_eq!(out.pixel(1, 0), Some([200, 55, 0]));

    let whole = encode_frame(&pixels, 4, 2, FrameLayout::Yuv420, Unstoppable).unwrap();
    assert_eq!(u, whole[1]);
    assert_eq!(
        FrameRequest::yuv420()
            .encode_plane(&pixels, 4, 2, &planes[2], Unstoppable)
            .unwrap(),
        whole[2]
    );
}

#[test]
fn hand_built_planes_are_checked() {
    let pixels = [0u8; 16];
    let plane = Plane {
        kind: PlaneKind::Argb,
        suffix: None,
        offset: 0,
        width: u32::MAX,
        height: u32::MAX,
    };
    assert!(matches!(
        encode_plane(&pixels, u32::MAX, u32::MAX, &plane, Unstoppable),
        Err(BitmapError::DimensionsTooLarge { .. })
    ));

    let plane = Plane {
        width: 2,
        height: 2,
        ..plane
    };
    assert_eq!(plane.len(), Some(16));
    assert!(encode_plane(&pixels, 2, 2, &plane, Unstoppable).is_ok());
    // Larger than its frame
    assert!(matches!(
        encode_plane(&pixels, 1, 2, &plane, Unstoppable),
        Err(BitmapError::DimensionsTooLarge { width: 2, height: 2 })
    ));
    // Past the end of the buffer
    let shifted = Plane { offset: 4, ..plane };
    assert!(matches!(
        encode_plane(&pixels, 2, 2, &shifted, Unstoppable),
        Err(BitmapError::BufferTooSmall { needed: 20, actual: 16 })
    ));
    let empty = Plane { height: 0, ..plane };
    assert!(empty.is_empty());
    assert!(matches!(
        encode_plane(&pixels, 2, 2, &empty, Unstoppable),
        Err(BitmapError::ZeroDimensions { width: 2, height: 0 })
    ));
    assert!(matches!(
        encode_plane(&pixels, 2, 2, &plane, Cancelled),
        Err(BitmapError::Cancelled(_))
    ));
}

#[test]
fn plane_len_reports_overflow() {
    let plane = Plane {
        kind: PlaneKind::Argb,
        suffix: None,
        offset: 0,
        width: u32::MAX,
        height: u32::MAX,
    };
    if usize::BITS == 64 {
        // (2^32 - 1)^2 * 4 exceeds 2^64
        assert_eq!(plane.len(), None);
    }
    assert!(!plane.is_empty());
}

// ── Failures ─────────────────────────────────────────────────────────

const ALL_LAYOUTS: [FrameLayout; 5] = [
    FrameLayout::Rgb24,
    FrameLayout::Bgr24,
    FrameLayout::Argb32,
    FrameLayout::RgbPlanar,
    FrameLayout::Yuv420,
];

#[test]
fn empty_buffer_fails_for_every_layout() {
    for layout in ALL_LAYOUTS {
        let err = encode_frame(&[], 4, 4, layout, Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::EmptyBuffer), "{layout:?}: {err:?}");
    }
}

#[test]
fn zero_dimensions_fail() {
    for layout in ALL_LAYOUTS {
        let err = encode_frame(&[0; 64], 0, 4, layout, Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::ZeroDimensions { .. }), "{layout:?}: {err:?}");
        let err = encode_frame(&[0; 64], 4, 0, layout, Unstoppable).unwrap_err();
        assert!(matches!(err, BitmapError::ZeroDimensions { .. }), "{layout:?}: {err:?}");
    }
}

#[test]
fn short_buffer_fails() {
    for layout in ALL_LAYOUTS {
        let needed = layout.frame_len(4, 4).unwrap();
        let pixels = vec![0u8; needed - 1];
        let err = encode_frame(&pixels, 4, 4, layout, Unstoppable).unwrap_err();
        match err {
            BitmapError::BufferTooSmall { needed: n, actual } => {
                assert_eq!(n, needed);
                assert_eq!(actual, needed - 1);
            }
            other => panic!("{layout:?}: expected BufferTooSmall, got {other:?}"),
        }
    }
}

#[test]
fn oversized_dimensions_fail() {
    let err = encode_frame(&[0; 3], u32::MAX, u32::MAX, FrameLayout::Rgb24, Unstoppable)
        .unwrap_err();
    assert!(matches!(err, BitmapError::DimensionsTooLarge { .. }), "{err:?}");
}

#[test]
fn limits_reject_large_planes() {
    let pixels = vec![0u8; 2 * 2 * 3];
    let limits = Limits {
        max_pixels: Some(3),
        ..Default::default()
    };
    let err = FrameRequest::rgb()
        .with_limits(&limits)
        .encode(&pixels, 2, 2, Unstoppable)
        .unwrap_err();
    match err {
        BitmapError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn limits_apply_per_plane() {
    // 4x4 Y'UV: luma bitmap is 54 + 12*4 = 102 bytes, chroma 54 + 8*2 = 70.
    let pixels = vec![0u8; 16 + 8];
    let fits = Limits::with_max_memory(102);
    assert_eq!(
        FrameRequest::yuv420()
            .with_limits(&fits)
            .encode(&pixels, 4, 4, Unstoppable)
            .unwrap()
            .len(),
        3
    );

    let tight = Limits::with_max_memory(101);
    assert!(matches!(
        FrameRequest::yuv420()
            .with_limits(&tight)
            .encode(&pixels, 4, 4, Unstoppable),
        Err(BitmapError::LimitExceeded(_))
    ));
}

#[test]
fn cancelled_before_encoding() {
    let pixels = [0u8; 12];
    let err = encode_frame(&pixels, 2, 2, FrameLayout::Rgb24, Cancelled).unwrap_err();
    assert!(matches!(err, BitmapError::Cancelled(_)), "{err:?}");
}

// ── Pre-formatted scanlines ──────────────────────────────────────────

#[test]
fn raw_scanlines_are_wrapped_in_order() {
    // 2x2, stride 8: stored row 0 is the bottom row.
    let data = [
        1, 2, 3, 4, 5, 6, 0xEE, 0xEE, // bottom
        7, 8, 9, 10, 11, 12, 0xEE, 0xEE, // top
    ];
    let bitmap = encode_bmp24_raw(&data, 2, 2, Unstoppable).unwrap();
    assert_eq!(bitmap.len(), 54 + 16);
    assert_eq!(&bitmap[54..60], &data[..6]);
    assert_eq!(&bitmap[60..62], &[0, 0]);
    assert_eq!(&bitmap[62..68], &data[8..14]);

    let out = decode_bmp(&bitmap, Unstoppable).unwrap();
    assert_eq!(out.pixel(0, 0), Some([9, 8, 7]));
    assert_eq!(out.pixel(0, 1), Some([3, 2, 1]));
}

#[test]
fn raw_scanlines_need_full_stride() {
    let err = encode_bmp24_raw(&[0; 15], 2, 2, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::BufferTooSmall { needed: 16, actual: 15 }), "{err:?}");
    let err = encode_bmp24_raw(&[], 2, 2, Unstoppable).unwrap_err();
    assert!(matches!(err, BitmapError::EmptyBuffer), "{err:?}");
}
