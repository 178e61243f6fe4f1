//! Image codec WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG or JPEG bytes into an RGBA image
//! - [`encode_image`] - Encode an image as PNG or JPEG
//! - [`output_mime_type`] - Content-Type for an output format name
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, encode_image } from '@ledboard/wasm';
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! console.log(`Decoded ${image.width}x${image.height}`);
//! const png = encode_image(image, 'png');
//! ```

use crate::report_error;
use crate::types::{output_format, JsPixelBuffer};
use ledboard_core::codec;
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes into an RGBA image.
///
/// JPEG input has its EXIF orientation applied.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    codec::decode(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| report_error("decode_image", e))
}

/// Encode an image as `format` (`"png"`, `"jpg"` or `"jpeg"`).
///
/// `quality` (1-100) only affects JPEG and defaults to 90.
#[wasm_bindgen]
pub fn encode_image(
    image: &JsPixelBuffer,
    format: &str,
    quality: Option<u8>,
) -> Result<Vec<u8>, JsValue> {
    encode_inner(image, format, quality).map_err(|e| report_error("encode_image", e))
}

/// Content-Type for bytes produced with `format` (`"png"`, `"jpg"` or `"jpeg"`).
///
/// ```typescript
/// res.type(output_mime_type('jpg')).send(render_led_effect(bytes, 'jpg', undefined));
/// ```
#[wasm_bindgen]
pub fn output_mime_type(format: &str) -> Result<String, JsValue> {
    mime_type_inner(format).map_err(|e| report_error("output_mime_type", e))
}

fn mime_type_inner(format: &str) -> Result<String, String> {
    output_format(format, None).map(|f| f.mime_type().to_string())
}

fn encode_inner(image: &JsPixelBuffer, format: &str, quality: Option<u8>) -> Result<Vec<u8>, String> {
    let format = output_format(format, quality)?;
    let buffer = image.to_buffer()?;
    codec::encode(&buffer, format).map_err(|e| e.to_string())
}
