//! The two rendering entry points.
//!
//! - LED effect: decode -> tone -> LED simulation -> encode
//! - Text image: rasterize -> encode
//!
//! Both are pure functions of their arguments. Each call owns its buffer from
//! decode (or allocation) to encode, so calls can run concurrently without any
//! coordination.

use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::codec::{self, DecodeError, EncodeError, OutputFormat};
use crate::led::{simulate_led, LedError};
use crate::text::{rasterize_text, TextError, TextSpec};
use crate::tone::apply_tone;
use crate::EffectOptions;

/// Any failure from a rendering entry point.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Led(#[from] LedError),

    #[error(transparent)]
    Text(#[from] TextError),

    /// A tone parameter is outside `[-1, 1]` or not finite.
    #[error("Invalid {name}: {value} (expected a value between -1 and 1)")]
    InvalidOption { name: &'static str, value: f32 },
}

/// Run tone and LED simulation on a decoded buffer.
///
/// Options are validated before any pixel is touched.
pub fn apply_effects(
    buffer: PixelBuffer,
    options: &EffectOptions,
) -> Result<PixelBuffer, RenderError> {
    options.validate()?;
    apply_validated(buffer, options)
}

/// Tone and LED stages for options that already passed `validate`.
fn apply_validated(
    mut buffer: PixelBuffer,
    options: &EffectOptions,
) -> Result<PixelBuffer, RenderError> {
    crate::led::led_dimensions(buffer.width(), buffer.height(), options.cell_size)?;

    if !options.is_tone_neutral() {
        apply_tone(&mut buffer, options.brightness, options.contrast, options.invert);
    }
    simulate_led(&mut buffer, options.cell_size)?;
    Ok(buffer)
}

/// Decode `source`, apply the LED effect, and encode the result as `format`.
///
/// Options are validated before the source is decoded.
pub fn render_led_effect(
    source: &[u8],
    format: OutputFormat,
    options: &EffectOptions,
) -> Result<Vec<u8>, RenderError> {
    options.validate()?;
    let buffer = codec::decode(source)?;
    let buffer = apply_validated(buffer, options)?;
    Ok(codec::encode(&buffer, format)?)
}

/// Rasterize `spec` and encode it as `format`. No LED styling is applied.
pub fn render_text_image(spec: &TextSpec, format: OutputFormat) -> Result<Vec<u8>, RenderError> {
    let buffer = rasterize_text(spec)?;
    Ok(codec::encode(&buffer, format)?)
}
