//! Single-line text rasterization.
//!
//! Text is drawn with the 8x8 bitmap font from `font8x8`, scaled up by whole
//! pixels so glyph edges stay hard at any size. The rendered line is padded by
//! [`PADDING_X`] on the left and right and [`PADDING_Y`] on the top and bottom.
//!
//! The result is a plain raster at native resolution. It is not passed through
//! the LED stage; callers that want that look run [`crate::led::simulate_led`]
//! on it themselves.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{Color, PixelBuffer};

/// Horizontal padding on each side of the text.
pub const PADDING_X: u32 = 20;
/// Vertical padding above and below the text.
pub const PADDING_Y: u32 = 10;

/// Native glyph size of the bitmap font.
const GLYPH_SIZE: u32 = 8;

/// Largest RGBA canvas a text image may allocate, in bytes.
///
/// Same ceiling `image` applies to decoder allocations.
pub const MAX_IMAGE_BYTES: u64 = 512 * 1024 * 1024;

/// Errors from text rasterization.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
    #[error("Text must not be empty")]
    EmptyText,

    #[error("Font size must be at least 1")]
    InvalidFontSize,

    #[error("Text at font size {font_size} is too large to render")]
    TooLarge { font_size: u32 },
}

/// What to render and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSpec {
    /// A single line of text. Line breaks render as spaces.
    pub text: String,
    /// Nominal glyph height in pixels.
    pub font_size: u32,
    /// Glyph color.
    pub color: Color,
    /// Fill for the whole image.
    pub background_color: Color,
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 32,
            color: Color::WHITE,
            background_color: Color::BLACK,
        }
    }
}

impl TextSpec {
    /// A spec for `text` with default size and colors.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Rendered extent of a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMetrics {
    /// Width of the glyph run in pixels.
    pub width: u32,
    /// Height of the glyph run in pixels.
    pub height: u32,
    /// Integer scale applied to the 8x8 glyphs.
    pub scale: u32,
}

/// Measure `text` at `font_size` without drawing it.
///
/// Each glyph is `8 * scale` pixels square with `scale` pixels of spacing
/// between neighbors, where `scale = ceil(font_size / 8)`.
pub fn measure_text(text: &str, font_size: u32) -> Result<TextMetrics, TextError> {
    if text.is_empty() {
        return Err(TextError::EmptyText);
    }
    if font_size == 0 {
        return Err(TextError::InvalidFontSize);
    }

    let too_large = || TextError::TooLarge { font_size };
    let scale = font_size.div_ceil(GLYPH_SIZE);
    let glyphs = u32::try_from(text.chars().count()).map_err(|_| too_large())?;
    let advance = GLYPH_SIZE.checked_mul(scale).ok_or_else(too_large)?;

    // glyphs >= 1 here
    let width = glyphs
        .checked_mul(advance)
        .zip((glyphs - 1).checked_mul(scale))
        .and_then(|(run, gaps)| run.checked_add(gaps))
        .ok_or_else(too_large)?;

    Ok(TextMetrics {
        width,
        height: advance,
        scale,
    })
}

/// Padded canvas size for `metrics`, bounded by [`MAX_IMAGE_BYTES`].
fn canvas_size(metrics: TextMetrics, font_size: u32) -> Result<(u32, u32), TextError> {
    let too_large = || TextError::TooLarge { font_size };
    let width = metrics.width.checked_add(2 * PADDING_X).ok_or_else(too_large)?;
    let height = metrics.height.checked_add(2 * PADDING_Y).ok_or_else(too_large)?;

    if u64::from(width) * u64::from(height) * 4 > MAX_IMAGE_BYTES {
        return Err(too_large());
    }
    Ok((width, height))
}

/// Rasterize `spec` into a new buffer.
///
/// The buffer is `(width + 40) x (height + 20)` for the measured text, filled
/// with the background color, with glyphs starting at `(20, 10)`.
pub fn rasterize_text(spec: &TextSpec) -> Result<PixelBuffer, TextError> {
    let metrics = measure_text(&spec.text, spec.font_size)?;
    let (width, height) = canvas_size(metrics, spec.font_size)?;

    let mut buffer = PixelBuffer::filled(width, height, spec.background_color);

    let scale = metrics.scale;
    let advance = GLYPH_SIZE * scale + scale;
    for (idx, ch) in spec.text.chars().enumerate() {
        let origin_x = PADDING_X + idx as u32 * advance;
        draw_glyph(&mut buffer, glyph_for(ch), origin_x, PADDING_Y, scale, spec.color);
    }

    Ok(buffer)
}

/// Bitmap for `ch`, falling back to `?` for characters the font lacks.
fn glyph_for(ch: char) -> [u8; 8] {
    let ch = if ch.is_control() { ' ' } else { ch };
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_glyph(buffer: &mut PixelBuffer, glyph: [u8; 8], x0: u32, y0: u32, scale: u32, color: Color) {
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..GLYPH_SIZE {
            // Bit 0 is the leftmost column
            if (bits >> col) & 1 == 0 {
                continue;
            }
            let base_x = x0 + col * scale;
            let base_y = y0 + row as u32 * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    buffer.blend(base_x + dx, base_y + dy, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(text: &str, font_size: u32) -> TextSpec {
        TextSpec {
            text: text.to_string(),
            font_size,
            color: Color::WHITE,
            background_color: Color::BLACK,
        }
    }

    #[test]
    fn test_spec_defaults() {
        let spec = TextSpec::new("HELLO");
        assert_eq!(spec.text, "HELLO");
        assert_eq!(spec.font_size, 32);
        assert_eq!(spec.color, Color(0xFFFF_FFFF));
        assert_eq!(spec.background_color, Color(0x0000_00FF));
    }

    #[test]
    fn test_measure_single_glyph() {
        let m = measure_text("A", 8).unwrap();
        assert_eq!(m, TextMetrics { width: 8, height: 8, scale: 1 });
    }

    #[test]
    fn test_measure_scales_up() {
        // scale 4: two 32px glyphs plus one 4px gap
        let m = measure_text("AB", 32).unwrap();
        assert_eq!(m, TextMetrics { width: 68, height: 32, scale: 4 });
    }

    #[test]
    fn test_measure_rounds_scale_up() {
        assert_eq!(measure_text("A", 1).unwrap().scale, 1);
        assert_eq!(measure_text("A", 9).unwrap().scale, 2);
    }

    #[test]
    fn test_measure_counts_chars_not_bytes() {
        let ascii = measure_text("ee", 8).unwrap();
        let accented = measure_text("éé", 8).unwrap();
        assert_eq!(ascii.width, accented.width);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(rasterize_text(&spec("", 32)), Err(TextError::EmptyText));
    }

    #[test]
    fn test_zero_font_size() {
        assert_eq!(rasterize_text(&spec("A", 0)), Err(TextError::InvalidFontSize));
    }

    #[test]
    fn test_measure_huge_font_size() {
        assert_eq!(
            measure_text("AB", u32::MAX),
            Err(TextError::TooLarge { font_size: u32::MAX })
        );
        assert_eq!(
            rasterize_text(&spec("A", u32::MAX)),
            Err(TextError::TooLarge { font_size: u32::MAX })
        );
    }

    #[test]
    fn test_measure_long_text_overflow() {
        // 200k glyphs of 32768px overflow a u32 width
        let text = "A".repeat(200_000);
        assert_eq!(
            measure_text(&text, 32_768),
            Err(TextError::TooLarge { font_size: 32_768 })
        );
    }

    #[test]
    fn test_rasterize_rejects_oversized_canvas() {
        // Width fits u32 but the RGBA canvas exceeds the allocation ceiling
        let text = "A".repeat(100_000);
        let m = measure_text(&text, 32).unwrap();
        assert_eq!(m.width, 3_599_996);
        assert_eq!(
            rasterize_text(&spec(&text, 32)),
            Err(TextError::TooLarge { font_size: 32 })
        );
    }

    #[test]
    fn test_canvas_size_within_limit() {
        let m = measure_text("AB", 32).unwrap();
        assert_eq!(canvas_size(m, 32), Ok((108, 52)));
    }

    #[test]
    fn test_rasterize_dimensions() {
        let buf = rasterize_text(&spec("AB", 32)).unwrap();
        let m = measure_text("AB", 32).unwrap();
        assert_eq!(buf.dimensions(), (m.width + 40, m.height + 20));
        assert_eq!(buf.dimensions(), (108, 52));
    }

    #[test]
    fn test_rasterize_border_is_background() {
        let buf = rasterize_text(&spec("AB", 32)).unwrap();
        let (w, h) = buf.dimensions();
        let bg = Some([0, 0, 0, 255]);

        for x in 0..w {
            for y in 0..PADDING_Y {
                assert_eq!(buf.get(x, y), bg);
                assert_eq!(buf.get(x, h - 1 - y), bg);
            }
        }
        for y in 0..h {
            for x in 0..PADDING_X {
                assert_eq!(buf.get(x, y), bg);
                assert_eq!(buf.get(w - 1 - x, y), bg);
            }
        }
    }

    #[test]
    fn test_rasterize_draws_glyphs() {
        let buf = rasterize_text(&spec("AB", 32)).unwrap();
        let lit = buf
            .pixels()
            .chunks_exact(4)
            .filter(|px| *px == [255, 255, 255, 255])
            .count();
        assert!(lit > 0, "Glyph pixels should use the text color");
    }

    #[test]
    fn test_rasterize_space_is_blank() {
        let buf = rasterize_text(&spec(" ", 8)).unwrap();
        assert!(buf.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_newline_renders_as_space() {
        let with_newline = rasterize_text(&spec("A\nB", 8)).unwrap();
        let with_space = rasterize_text(&spec("A B", 8)).unwrap();
        assert_eq!(with_newline, with_space);
    }

    #[test]
    fn test_missing_glyph_falls_back() {
        // CJK is outside the basic and latin tables
        let missing = rasterize_text(&spec("漢", 8)).unwrap();
        let question = rasterize_text(&spec("?", 8)).unwrap();
        assert_eq!(missing, question);
    }

    #[test]
    fn test_translucent_text_blends() {
        let mut s = spec("I", 8);
        s.color = Color::from_rgba(255, 255, 255, 128);
        let buf = rasterize_text(&s).unwrap();
        assert!(buf
            .pixels()
            .chunks_exact(4)
            .all(|px| px[0] == 0 || (px[0] as i32 - 128).abs() <= 1));
    }

    #[test]
    fn test_spec_deserializes_camel_case() {
        let json = r#"{"text":"HI","fontSize":16,"backgroundColor":255}"#;
        let spec: TextSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.text, "HI");
        assert_eq!(spec.font_size, 16);
        assert_eq!(spec.color, Color::WHITE);
        assert_eq!(spec.background_color, Color(255));
    }
}
