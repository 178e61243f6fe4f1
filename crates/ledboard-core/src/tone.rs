//! Tone adjustments for the LED effect.
//!
//! Applies brightness, contrast and inversion to the color channels of a
//! [`PixelBuffer`] in place. Alpha is never touched.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Invert
//!
//! Channel values stay in float between the first two steps and are rounded
//! back to 8 bits once per pixel.

use crate::buffer::{PixelBuffer, CHANNELS};

/// Apply tone adjustments to a buffer in place.
///
/// # Arguments
/// * `buffer` - The image to modify
/// * `brightness` - Offset in `[-1, 1]`, scaled to `[-255, 255]`; `None` skips the step
/// * `contrast` - Spread in `[-1, 1]` around mid-gray 128; `None` skips the step
/// * `invert` - Replace each color channel `c` with `255 - c`
pub fn apply_tone(
    buffer: &mut PixelBuffer,
    brightness: Option<f32>,
    contrast: Option<f32>,
    invert: bool,
) {
    apply_tone_to_pixels(buffer.pixels_mut(), brightness, contrast, invert);
}

/// Apply tone adjustments to raw RGBA bytes (4 bytes per pixel).
///
/// A trailing partial pixel is left untouched.
pub fn apply_tone_to_pixels(
    pixels: &mut [u8],
    brightness: Option<f32>,
    contrast: Option<f32>,
    invert: bool,
) {
    // Early exit if nothing to do
    if brightness.is_none() && contrast.is_none() && !invert {
        return;
    }

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        for channel in &mut chunk[..3] {
            let mut value = *channel as f32;
            if let Some(amount) = brightness {
                value = apply_brightness(value, amount);
            }
            if let Some(amount) = contrast {
                value = apply_contrast(value, amount);
            }

            let mut out = value.round() as u8;
            if invert {
                out = 255 - out;
            }
            *channel = out;
        }
    }
}

/// Formula: `output = clamp(input + brightness * 255, 0, 255)`
#[inline]
fn apply_brightness(value: f32, brightness: f32) -> f32 {
    (value + brightness * 255.0).clamp(0.0, 255.0)
}

/// Formula: `output = clamp((input - 128) * (1 + contrast) + 128, 0, 255)`
///
/// `-1` collapses every channel to 128, `+1` doubles the distance from it.
#[inline]
fn apply_contrast(value: f32, contrast: f32) -> f32 {
    ((value - 128.0) * (1.0 + contrast) + 128.0).clamp(0.0, 255.0)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn pixels_strategy() -> impl Strategy<Value = Vec<u8>> {
        (1usize..=64).prop_flat_map(|count| prop::collection::vec(any::<u8>(), count * 4))
    }

    proptest! {
        /// Property: zero brightness, zero contrast, no invert is the identity.
        #[test]
        fn prop_neutral_is_identity(pixels in pixels_strategy()) {
            let mut result = pixels.clone();
            apply_tone_to_pixels(&mut result, Some(0.0), Some(0.0), false);
            prop_assert_eq!(result, pixels);
        }

        /// Property: inverting twice returns every channel; alpha is never touched.
        #[test]
        fn prop_double_invert_restores(pixels in pixels_strategy()) {
            let mut result = pixels.clone();
            apply_tone_to_pixels(&mut result, None, None, true);
            for (orig, inv) in pixels.chunks_exact(4).zip(result.chunks_exact(4)) {
                prop_assert_eq!(orig[3], inv[3]);
            }
            apply_tone_to_pixels(&mut result, None, None, true);
            prop_assert_eq!(result, pixels);
        }

        /// Property: alpha is preserved for any adjustment.
        #[test]
        fn prop_alpha_preserved(
            pixels in pixels_strategy(),
            brightness in -1.0f32..=1.0,
            contrast in -1.0f32..=1.0,
            invert in any::<bool>(),
        ) {
            let mut result = pixels.clone();
            apply_tone_to_pixels(&mut result, Some(brightness), Some(contrast), invert);
            for (orig, adj) in pixels.chunks_exact(4).zip(result.chunks_exact(4)) {
                prop_assert_eq!(orig[3], adj[3]);
            }
        }

        /// Property: positive brightness never darkens a channel.
        #[test]
        fn prop_brightness_monotonic(
            pixels in pixels_strategy(),
            brightness in 0.0f32..=1.0,
        ) {
            let mut result = pixels.clone();
            apply_tone_to_pixels(&mut result, Some(brightness), None, false);
            for (orig, adj) in pixels.iter().zip(result.iter()) {
                prop_assert!(adj >= orig);
            }
        }
    }
}
