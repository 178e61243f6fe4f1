//! WASM-compatible wrapper types for image data.
//!
//! Converts between the core [`PixelBuffer`] and a JavaScript-friendly image
//! handle, and maps the format names the server uses onto [`OutputFormat`].

use ledboard_core::codec::DEFAULT_JPEG_QUALITY;
use ledboard_core::{OutputFormat, PixelBuffer};
use wasm_bindgen::prelude::*;

/// An RGBA image handle for JavaScript.
///
/// Pixel data lives in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`; keep the handle around instead when piping it into another
/// binding.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from RGBA bytes (4 per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel data (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        let (width, height) = buffer.dimensions();
        Self {
            width,
            height,
            pixels: buffer.into_raw(),
        }
    }

    /// Convert back to a core buffer, cloning the pixel data.
    ///
    /// Fails when the byte length does not match the dimensions.
    pub(crate) fn to_buffer(&self) -> Result<PixelBuffer, String> {
        PixelBuffer::from_raw(self.width, self.height, self.pixels.clone()).ok_or_else(|| {
            format!(
                "Invalid pixel data: expected {} bytes for {}x{} RGBA, got {}",
                self.width as usize * self.height as usize * 4,
                self.width,
                self.height,
                self.pixels.len()
            )
        })
    }
}

/// Resolve a format name or file extension (`"png"`, `"jpg"`, `"jpeg"`).
///
/// `quality` applies to JPEG only; `None` uses the default of 90.
pub(crate) fn output_format(name: &str, quality: Option<u8>) -> Result<OutputFormat, String> {
    match OutputFormat::from_extension(name) {
        Some(OutputFormat::Jpeg { .. }) => Ok(OutputFormat::Jpeg {
            quality: quality.unwrap_or(DEFAULT_JPEG_QUALITY),
        }),
        Some(format) => Ok(format),
        None => Err(format!("Unsupported output format: {name}")),
    }
}
