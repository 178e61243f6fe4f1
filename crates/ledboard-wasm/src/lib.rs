//! LED Board WASM - WebAssembly bindings for the LED board effects
//!
//! This crate exposes ledboard-core to the Node.js gallery server.
//!
//! # Module Structure
//!
//! - `render` - LED effect and text image entry points
//! - `codec` - PNG/JPEG decode and encode
//! - `color` - hex color string parsing
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { render_led_effect } from '@ledboard/wasm';
//!
//! await init();
//!
//! const screenshot = await fs.promises.readFile('screenshots/page.png');
//! const led = render_led_effect(screenshot, 'png', { cellSize: 10 });
//! await fs.promises.writeFile('processed/page.png', led);
//! ```

use std::fmt::Display;

use wasm_bindgen::prelude::*;

mod codec;
mod color;
mod render;
mod types;

// Re-export public types
pub use codec::{decode_image, encode_image, output_mime_type};
pub use color::parse_color;
pub use render::{apply_led_effect, rasterize_text, render_led_effect, render_text_image};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Log a failed call to the host console and convert it for JavaScript.
///
/// The core never logs, so this is the one place failures become visible
/// outside the returned error.
pub(crate) fn report_error(operation: &str, err: impl Display) -> JsValue {
    let message = format!("{operation} failed: {err}");
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}
