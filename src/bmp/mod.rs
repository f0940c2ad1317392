//! 24-bit uncompressed BMP container.
//!
//! Writing goes through [`crate::encode_frame`] and friends; this module
//! exposes the byte geometry and the header parser for inspecting output.

mod decode;
mod encode;

pub use decode::{BmpHeader, parse_bmp_header};
pub use encode::{BmpGeometry, FILE_HEADER_LEN, INFO_HEADER_LEN, PIXEL_DATA_OFFSET};

pub(crate) use decode::decode_bmp24;
pub(crate) use encode::{encode_bmp24, encode_bmp24_raw};
