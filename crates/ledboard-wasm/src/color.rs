//! Color parsing for values coming from HTML forms.
//!
//! The gallery UI sends colors as hex strings (`#ff8800`, or `0xff8800FF`
//! after its own rewriting). The core only accepts packed `0xRRGGBBAA`
//! integers, so the conversion happens here at the boundary.

use crate::report_error;
use ledboard_core::Color;
use wasm_bindgen::prelude::*;

/// Parse `#RRGGBB`, `#RRGGBBAA`, `0xRRGGBB`, `0xRRGGBBAA` or bare hex digits.
///
/// Six-digit forms are opaque.
pub(crate) fn parse_hex_color(value: &str) -> Option<Color> {
    let value = value.trim();
    let digits = value
        .strip_prefix('#')
        .or_else(|| value.strip_prefix("0x"))
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let packed = u32::from_str_radix(digits, 16).ok()?;
    match digits.len() {
        6 => Some(Color((packed << 8) | 0xFF)),
        8 => Some(Color(packed)),
        _ => None,
    }
}

/// Parse a hex color string into the packed `0xRRGGBBAA` integer.
///
/// # Example (TypeScript)
/// ```typescript
/// const color = parse_color('#ff8800');      // 0xff8800ff
/// const bg = parse_color('0x000000FF');      // opaque black
/// ```
#[wasm_bindgen]
pub fn parse_color(value: &str) -> Result<u32, JsValue> {
    parse_hex_color(value)
        .map(u32::from)
        .ok_or_else(|| report_error("parse_color", format!("invalid color {value:?}")))
}
