//! Decoding of PNG and JPEG bytes into RGBA pixel buffers.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat};

use super::{DecodeError, Orientation};
use crate::buffer::PixelBuffer;

/// Decode image bytes into an RGBA [`PixelBuffer`].
///
/// The format is sniffed from the leading bytes. JPEG input has its EXIF
/// orientation applied so the result is upright.
///
/// # Errors
///
/// - `DecodeError::InvalidFormat` if the bytes carry no known image signature
/// - `DecodeError::UnsupportedFormat` for recognized but unsupported formats
/// - `DecodeError::CorruptedFile` if the data is malformed or truncated
/// - `DecodeError::EmptyImage` if the image has zero width or height
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let format = image::guess_format(bytes).map_err(|_| DecodeError::InvalidFormat)?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(DecodeError::UnsupportedFormat(format!("{format:?}")));
    }

    let orientation = match format {
        ImageFormat::Jpeg => extract_orientation(bytes),
        _ => Orientation::Normal,
    };

    let img = image::load_from_memory_with_format(bytes, format).map_err(|e| match e {
        image::ImageError::Unsupported(u) => DecodeError::UnsupportedFormat(u.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let rgba = apply_orientation(img, orientation).into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    Ok(PixelBuffer::from_rgba_image(rgba))
}

/// EXIF orientation of JPEG bytes, `Orientation::Normal` when absent.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
