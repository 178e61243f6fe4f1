//! PNG and JPEG encoding of pixel buffers.
//!
//! PNG keeps all four channels. JPEG has no alpha channel, so the buffer is
//! reduced to RGB before encoding.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::io::Cursor;

use super::{EncodeError, OutputFormat};
use crate::buffer::PixelBuffer;

/// Encode a pixel buffer into the bytes of `format`.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` for a zero-width or zero-height
/// buffer, and `EncodeError::EncodingFailed` if the encoder itself fails.
/// No bytes are returned on failure.
pub fn encode(buffer: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = buffer.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let mut output = Cursor::new(Vec::new());

    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut output).write_image(
            buffer.pixels(),
            width,
            height,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Jpeg { quality } => {
            let rgb = strip_alpha(buffer.pixels());
            JpegEncoder::new_with_quality(&mut output, quality.clamp(1, 100)).write_image(
                &rgb,
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format: format.label(),
        message: e.to_string(),
    })?;

    Ok(output.into_inner())
}

fn strip_alpha(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        rgb.extend_from_slice(&px[..3]);
    }
    rgb
}


// ============================================================================
// Property-Based Tests
// ============================================================================
