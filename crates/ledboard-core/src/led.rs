//! LED matrix simulation.
//!
//! Turns a buffer into a grid of flat-colored cells separated by dark seams:
//!
//! 1. Box-average every `cell_size x cell_size` block down to one pixel
//! 2. Replicate each averaged pixel back into a full block (nearest neighbor)
//! 3. Darken the first row and first column of every block
//!
//! Pixels past the last whole cell on the right and bottom edges are dropped,
//! so the output is `floor(w / cell) * cell` by `floor(h / cell) * cell`.

use thiserror::Error;

use crate::buffer::{PixelBuffer, CHANNELS};

/// Opacity of the black seam lines, out of 255.
pub const GRID_ALPHA: u8 = 100;

/// Errors from the LED simulation stage.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedError {
    /// The image does not fit a single cell in one of its dimensions.
    #[error("Cell size {cell_size} does not fit a {width}x{height} image")]
    InvalidCellSize {
        cell_size: u32,
        width: u32,
        height: u32,
    },
}

/// Output dimensions for a buffer of `width x height` and the given cell size.
///
/// # Errors
///
/// Returns `LedError::InvalidCellSize` when `cell_size` is zero or larger
/// than either dimension.
pub fn led_dimensions(width: u32, height: u32, cell_size: u32) -> Result<(u32, u32), LedError> {
    let invalid = LedError::InvalidCellSize {
        cell_size,
        width,
        height,
    };
    if cell_size == 0 {
        return Err(invalid);
    }
    let cells_x = width / cell_size;
    let cells_y = height / cell_size;
    if cells_x == 0 || cells_y == 0 {
        return Err(invalid);
    }
    Ok((cells_x * cell_size, cells_y * cell_size))
}

/// Apply the LED effect to `buffer`, replacing its storage.
///
/// The buffer is left untouched when an error is returned.
pub fn simulate_led(buffer: &mut PixelBuffer, cell_size: u32) -> Result<(), LedError> {
    let (width, height) = buffer.dimensions();
    led_dimensions(width, height, cell_size)?;

    let cells = downsample(buffer, cell_size);
    let mut output = upsample_nearest(&cells, cell_size);
    overlay_grid(&mut output, cell_size);

    *buffer = output;
    Ok(())
}

/// Average each whole `cell x cell` block into a single pixel.
fn downsample(buffer: &PixelBuffer, cell: u32) -> PixelBuffer {
    let cells_x = buffer.width() / cell;
    let cells_y = buffer.height() / cell;
    let stride = buffer.width() as usize * CHANNELS;
    let src = buffer.pixels();
    let area = u64::from(cell) * u64::from(cell);

    let mut out = Vec::with_capacity(cells_x as usize * cells_y as usize * CHANNELS);
    for cy in 0..cells_y {
        for cx in 0..cells_x {
            let mut sums = [0u64; CHANNELS];
            for y in (cy * cell)..((cy + 1) * cell) {
                let row = y as usize * stride;
                let start = row + (cx * cell) as usize * CHANNELS;
                let end = start + cell as usize * CHANNELS;
                for px in src[start..end].chunks_exact(CHANNELS) {
                    for (sum, &v) in sums.iter_mut().zip(px) {
                        *sum += u64::from(v);
                    }
                }
            }
            for sum in sums {
                // Rounded mean
                out.push(((sum + area / 2) / area) as u8);
            }
        }
    }

    PixelBuffer::from_parts(cells_x, cells_y, out)
}

/// Replicate every pixel into a `cell x cell` block, no smoothing.
fn upsample_nearest(cells: &PixelBuffer, cell: u32) -> PixelBuffer {
    let width = cells.width() * cell;
    let height = cells.height() * cell;
    let src = cells.pixels();
    let src_stride = cells.width() as usize * CHANNELS;

    let mut out = Vec::with_capacity(width as usize * height as usize * CHANNELS);
    for y in 0..height {
        let row = (y / cell) as usize * src_stride;
        for x in 0..width {
            let offset = row + (x / cell) as usize * CHANNELS;
            out.extend_from_slice(&src[offset..offset + CHANNELS]);
        }
    }

    PixelBuffer::from_parts(width, height, out)
}

/// Composite black at [`GRID_ALPHA`] over every pixel on a cell boundary.
///
/// `dst' = dst * (1 - a)` per color channel; destination alpha is kept.
/// Intersections are darkened once.
fn overlay_grid(buffer: &mut PixelBuffer, cell: u32) {
    let width = buffer.width();
    let keep = 255 - u32::from(GRID_ALPHA);

    for (idx, px) in buffer.pixels_mut().chunks_exact_mut(CHANNELS).enumerate() {
        let x = idx as u32 % width;
        let y = idx as u32 / width;
        if x % cell != 0 && y % cell != 0 {
            continue;
        }
        for channel in &mut px[..3] {
            *channel = ((u32::from(*channel) * keep + 127) / 255) as u8;
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
