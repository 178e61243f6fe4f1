//! Rendering WASM bindings.
//!
//! These are the calls the gallery server makes. Options and text specs are
//! plain JavaScript objects in the same shape as the request bodies; missing
//! fields take their defaults.
//!
//! # Example
//!
//! ```typescript
//! import { render_led_effect, render_text_image, parse_color } from '@ledboard/wasm';
//!
//! const png = render_led_effect(screenshot, 'png', { brightness: 0.1, invert: false });
//!
//! const banner = render_text_image(
//!   { text: 'HELLO', fontSize: 32, color: parse_color('#ff8800') },
//!   'png',
//! );
//! ```

use crate::report_error;
use crate::types::{output_format, JsPixelBuffer};
use ledboard_core::{pipeline, EffectOptions, TextSpec};
use wasm_bindgen::prelude::*;

/// Decode `source`, apply the LED effect, and encode as `format`.
///
/// # Arguments
///
/// * `source` - PNG or JPEG bytes
/// * `format` - `"png"`, `"jpg"` or `"jpeg"`
/// * `options` - `{ brightness?, contrast?, invert?, cellSize? }`, or undefined
#[wasm_bindgen]
pub fn render_led_effect(source: &[u8], format: &str, options: JsValue) -> Result<Vec<u8>, JsValue> {
    let options = effect_options(options)?;
    render_led_inner(source, format, &options).map_err(|e| report_error("render_led_effect", e))
}

/// Rasterize a line of text and encode as `format`.
///
/// # Arguments
///
/// * `spec` - `{ text, fontSize?, color?, backgroundColor? }` with packed RGBA colors
/// * `format` - `"png"`, `"jpg"` or `"jpeg"`
#[wasm_bindgen]
pub fn render_text_image(spec: JsValue, format: &str) -> Result<Vec<u8>, JsValue> {
    let spec = text_spec(spec)?;
    render_text_inner(&spec, format).map_err(|e| report_error("render_text_image", e))
}

/// Rasterize a line of text without encoding it.
///
/// Pass the result to [`apply_led_effect`] for an LED-styled banner.
#[wasm_bindgen]
pub fn rasterize_text(spec: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let spec = text_spec(spec)?;
    ledboard_core::rasterize_text(&spec)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| report_error("rasterize_text", e))
}

/// Apply tone and LED simulation to an already decoded image.
#[wasm_bindgen]
pub fn apply_led_effect(image: &JsPixelBuffer, options: JsValue) -> Result<JsPixelBuffer, JsValue> {
    let options = effect_options(options)?;
    apply_led_inner(image, &options).map_err(|e| report_error("apply_led_effect", e))
}

fn effect_options(value: JsValue) -> Result<EffectOptions, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EffectOptions::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| report_error("effect options", e))
}

fn text_spec(value: JsValue) -> Result<TextSpec, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| report_error("text spec", e))
}

fn render_led_inner(source: &[u8], format: &str, options: &EffectOptions) -> Result<Vec<u8>, String> {
    let format = output_format(format, None)?;
    pipeline::render_led_effect(source, format, options).map_err(|e| e.to_string())
}

fn render_text_inner(spec: &TextSpec, format: &str) -> Result<Vec<u8>, String> {
    let format = output_format(format, None)?;
    pipeline::render_text_image(spec, format).map_err(|e| e.to_string())
}

fn apply_led_inner(image: &JsPixelBuffer, options: &EffectOptions) -> Result<JsPixelBuffer, String> {
    let buffer = image.to_buffer()?;
    pipeline::apply_effects(buffer, options)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| e.to_string())
}
