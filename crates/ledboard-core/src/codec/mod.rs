//! Raster codec for the effects pipeline.
//!
//! This module provides functionality for:
//! - Decoding PNG and JPEG bytes into an RGBA [`PixelBuffer`]
//! - Applying EXIF orientation to JPEG input
//! - Encoding a [`PixelBuffer`] back to PNG or JPEG bytes
//!
//! All operations are synchronous and bounded by the input size. Nothing here
//! touches the filesystem or the network.
//!
//! [`PixelBuffer`]: crate::buffer::PixelBuffer

mod decode;
mod encode;
mod types;

pub use decode::decode;
pub use encode::encode;
pub use types::{DecodeError, EncodeError, Orientation, OutputFormat, DEFAULT_JPEG_QUALITY};
