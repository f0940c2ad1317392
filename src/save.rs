//! Writing bitmaps to disk.
//!
//! Each plane is encoded, written, and dropped before the next one starts.
//! Files are created or truncated without warning; parent directories must
//! already exist.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use enough::{Stop, Unstoppable};

use crate::error::BitmapError;
use crate::frame;
use crate::limits::Limits;
use crate::pixel::FrameLayout;

/// Derive a plane's file name by inserting `-<suffix>` before the extension.
///
/// `frame.bmp` becomes `frame-red.bmp`. Only the file name is considered, so
/// dots in directory names are left alone. A name without an extension gets
/// the suffix appended; a name that is only an extension gets it prepended.
///
/// ```
/// use std::path::Path;
/// use zenframebmp::plane_path;
///
/// assert_eq!(plane_path(Path::new("out/frame.bmp"), "y"), Path::new("out/frame-y.bmp"));
/// assert_eq!(plane_path(Path::new("dump.d/frame"), "u"), Path::new("dump.d/frame-u"));
/// ```
pub fn plane_path(path: &Path, suffix: &str) -> PathBuf {
    let Some(file_name) = path.file_name() else {
        let mut name = path.as_os_str().to_owned();
        name.push("-");
        name.push(suffix);
        return PathBuf::from(name);
    };
    let mut name = OsString::new();
    // `.bmp` has no stem, only an extension
    if let [b'.', rest @ ..] = file_name.as_encoded_bytes()
        && !rest.contains(&b'.')
    {
        name.push("-");
        name.push(suffix);
        name.push(file_name);
        return path.with_file_name(name);
    }
    if let Some(stem) = path.file_stem() {
        name.push(stem);
    }
    name.push("-");
    name.push(suffix);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

pub(crate) fn save_planes(
    path: &Path,
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: FrameLayout,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<PathBuf>, BitmapError> {
    let planes = frame::prepare(pixels, width, height, layout, limits)?;

    let mut written = Vec::with_capacity(planes.len());
    for plane in &planes {
        let target = match plane.suffix {
            Some(suffix) => plane_path(path, suffix),
            None => path.to_path_buf(),
        };
        let result = frame::encode_plane(pixels, plane, stop)
            .and_then(|bitmap| write_file(&target, &bitmap.data));
        if let Err(e) = result {
            if !written.is_empty() {
                log::warn!(
                    "{layout:?} frame failed at plane {:?} after writing {} file(s): {e}",
                    plane.kind,
                    written.len(),
                );
            }
            return Err(e);
        }
        written.push(target);
    }
    Ok(written)
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), BitmapError> {
    std::fs::write(path, data).map_err(|source| BitmapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("wrote {} ({} bytes)", path.display(), data.len());
    Ok(())
}

/// Write a packed R,G,B frame as one bitmap.
pub fn save_rgb(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    save_frame(path, pixels, width, height, FrameLayout::Rgb24, Unstoppable).map(drop)
}

/// Write a packed 3-byte frame with red and blue exchanged as one bitmap.
pub fn save_bgr(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    save_frame(path, pixels, width, height, FrameLayout::Bgr24, Unstoppable).map(drop)
}

/// Write a packed B,G,R,A frame as one bitmap, dropping alpha.
pub fn save_argb(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    save_frame(path, pixels, width, height, FrameLayout::Argb32, Unstoppable).map(drop)
}

/// Write a planar R, G, B frame as `-red`, `-green` and `-blue` bitmaps.
pub fn save_rgb_planar(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<PathBuf>, BitmapError> {
    save_frame(path, pixels, width, height, FrameLayout::RgbPlanar, Unstoppable)
}

/// Write a planar Y'UV 4:2:0 frame as `-y`, `-u` and `-v` bitmaps.
pub fn save_yuv420(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<PathBuf>, BitmapError> {
    save_frame(path, pixels, width, height, FrameLayout::Yuv420, Unstoppable)
}

/// Convert a frame of any layout and write it, one file per plane.
///
/// Returns the written paths in plane order.
pub fn save_frame(
    path: impl AsRef<Path>,
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: FrameLayout,
    stop: impl Stop,
) -> Result<Vec<PathBuf>, BitmapError> {
    save_planes(path.as_ref(), pixels, width, height, layout, None, &stop)
}

/// Write scanlines that are already bottom-up, BGR and stride-padded.
///
/// See [`crate::encode_bmp24_raw`].
pub fn save_bitmap(
    path: impl AsRef<Path>,
    data: &[u8],
    width: u32,
    height: u32,
) -> Result<(), BitmapError> {
    let bitmap = crate::bmp::encode_bmp24_raw(data, width, height, &Unstoppable)?;
    write_file(path.as_ref(), &bitmap)
}
