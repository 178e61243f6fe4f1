//! LED Board Core - image effects for LED matrix displays
//!
//! This crate turns captured images into a simulated low-resolution LED
//! rendering and rasterizes single lines of text for the same display.
//!
//! # Module Structure
//!
//! - `buffer` - RGBA pixel buffer and packed colors
//! - `codec` - PNG/JPEG decoding and encoding
//! - `tone` - brightness, contrast and invert
//! - `led` - downsample, nearest-neighbor upsample and grid overlay
//! - `text` - bitmap-font text rasterization
//! - `pipeline` - the `render_led_effect` and `render_text_image` entry points

pub mod buffer;
pub mod codec;
pub mod led;
pub mod pipeline;
pub mod text;
pub mod tone;

pub use buffer::{Color, PixelBuffer};
pub use codec::OutputFormat;
pub use pipeline::{apply_effects, render_led_effect, render_text_image, RenderError};
pub use text::{rasterize_text, TextSpec};

/// Cell size used when none is given.
pub const DEFAULT_CELL_SIZE: u32 = 10;

/// Options for the LED effect.
///
/// `None` for brightness or contrast skips that step entirely, which is
/// different from an explicit `0.0`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EffectOptions {
    /// Brightness offset (-1 to 1)
    pub brightness: Option<f32>,
    /// Contrast (-1 flat gray to 1 maximum spread)
    pub contrast: Option<f32>,
    /// Invert color channels after brightness and contrast
    pub invert: bool,
    /// Side length of one LED cell in pixels
    pub cell_size: u32,
}

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            brightness: None,
            contrast: None,
            invert: false,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl EffectOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that brightness and contrast are finite and within `[-1, 1]`.
    ///
    /// Cell size, including zero, is checked against the image by the LED
    /// stage and reported as `LedError::InvalidCellSize`.
    pub fn validate(&self) -> Result<(), RenderError> {
        for (name, value) in [("brightness", self.brightness), ("contrast", self.contrast)] {
            if let Some(value) = value {
                if !value.is_finite() || !(-1.0..=1.0).contains(&value) {
                    return Err(RenderError::InvalidOption { name, value });
                }
            }
        }
        Ok(())
    }

    /// True when the tone stage would leave pixels unchanged.
    pub fn is_tone_neutral(&self) -> bool {
        self.brightness.unwrap_or(0.0) == 0.0 && self.contrast.unwrap_or(0.0) == 0.0 && !self.invert
    }
}
