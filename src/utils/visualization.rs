//! Rendering of image records onto RGB pixel surfaces.
//!
//! The caller supplies the surface; [`render`] draws the record into it
//! with nearest-neighbor sampling (no interpolation), adds a title line
//! when the record carries a label, and optionally draws tick marks and
//! a value-scale legend per [`RenderOptions`]. Title text needs a
//! system font; when none can be found the title is skipped.

use crate::core::errors::{StatError, StatResult};
use crate::record::ImageRecord;
use ab_glyph::FontVec;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use serde::{Deserialize, Serialize};

/// Fraction of the surface width reserved for the colorbar strip.
const COLORBAR_FRACTION: u32 = 10;
/// Length of a tick mark in pixels.
const TICK_LEN: u32 = 4;
/// Number of tick marks per axis.
const TICK_COUNT: u32 = 5;

/// Configuration bag for [`render`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Draw tick marks along the left and bottom edges.
    pub show_ticks: bool,
    /// Reserve a strip on the right edge for a value-scale legend.
    pub add_colorbar: bool,
    /// Explicit `(min, max)` display range; derived from the data when
    /// unset.
    pub value_range: Option<(f32, f32)>,
}

/// Draws a record onto the given surface.
///
/// Rank-2 records render as grayscale; height × width × 3 records
/// render with one channel per color. When the record carries a label,
/// a `Label: N` title is drawn in the top-left corner.
///
/// # Errors
///
/// Returns [`StatError::InvalidSurface`] for a zero-sized surface,
/// [`StatError::UnsupportedRank`] or [`StatError::ShapeMismatch`] for
/// records that are neither 2-D nor height × width × 3, and
/// [`StatError::EmptyInput`] for a record with no pixels.
pub fn render(
    record: &ImageRecord,
    surface: &mut RgbImage,
    options: &RenderOptions,
) -> StatResult<()> {
    let (width, height) = surface.dimensions();
    if width == 0 || height == 0 {
        return Err(StatError::InvalidSurface { width, height });
    }

    let (rows, cols, channels) = match *record.shape() {
        [h, w] => (h, w, 1),
        [h, w, 3] => (h, w, 3),
        [_, _, c] => {
            return Err(StatError::shape_mismatch("render channels", &[3], &[c]));
        }
        _ => {
            return Err(StatError::UnsupportedRank {
                rank: record.shape().len(),
            });
        }
    };
    if rows == 0 || cols == 0 {
        return Err(StatError::empty_input("render of a zero-sized record"));
    }

    let (lo, hi) = options.value_range.unwrap_or_else(|| data_range(record));
    let span = if (hi - lo).abs() < f32::EPSILON {
        1.0
    } else {
        hi - lo
    };

    // Plot area, minus the strip reserved for the colorbar.
    let plot_width = if options.add_colorbar {
        width
            .saturating_sub((width / COLORBAR_FRACTION).max(1))
            .max(1)
    } else {
        width
    };

    for py in 0..height {
        for px in 0..plot_width {
            let sy = (py as usize * rows) / height as usize;
            let sx = (px as usize * cols) / plot_width as usize;
            let pixel = if channels == 1 {
                let v = scale_to_u8(record.data()[[sy, sx]], lo, span);
                Rgb([v, v, v])
            } else {
                Rgb([
                    scale_to_u8(record.data()[[sy, sx, 0]], lo, span),
                    scale_to_u8(record.data()[[sy, sx, 1]], lo, span),
                    scale_to_u8(record.data()[[sy, sx, 2]], lo, span),
                ])
            };
            surface.put_pixel(px, py, pixel);
        }
    }

    if options.add_colorbar {
        draw_colorbar(surface, plot_width, lo, span);
    }
    if options.show_ticks {
        draw_ticks(surface, plot_width, height);
    }
    if let Some(label) = record.label() {
        draw_title(surface, &format!("Label: {label}"));
    }
    Ok(())
}

/// Minimum and maximum of the record's data.
fn data_range(record: &ImageRecord) -> (f32, f32) {
    record
        .data()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

#[inline]
fn scale_to_u8(value: f32, lo: f32, span: f32) -> u8 {
    (((value - lo) / span) * 255.0).clamp(0.0, 255.0).round() as u8
}

/// Vertical value-scale legend in the strip right of the plot area,
/// running from the maximum at the top to the minimum at the bottom.
fn draw_colorbar(surface: &mut RgbImage, plot_width: u32, lo: f32, span: f32) {
    let (width, height) = surface.dimensions();
    for py in 0..height {
        let t = if height > 1 {
            1.0 - py as f32 / (height - 1) as f32
        } else {
            1.0
        };
        let v = scale_to_u8(lo + t * span, lo, span);
        for px in plot_width..width {
            surface.put_pixel(px, py, Rgb([v, v, v]));
        }
    }
}

/// Short marks along the left and bottom edges of the plot area.
fn draw_ticks(surface: &mut RgbImage, plot_width: u32, height: u32) {
    let mark = Rgb([0, 0, 0]);
    for i in 0..TICK_COUNT {
        let px = (i * (plot_width - 1)) / (TICK_COUNT - 1);
        let py = (i * (height - 1)) / (TICK_COUNT - 1);
        for t in 0..TICK_LEN.min(height) {
            surface.put_pixel(px, height - 1 - t, mark);
        }
        for t in 0..TICK_LEN.min(plot_width) {
            surface.put_pixel(t, py, mark);
        }
    }
}

/// Title line in the top-left corner; skipped when no system font is
/// available.
fn draw_title(surface: &mut RgbImage, text: &str) {
    if let Some(font) = load_font() {
        draw_text_mut(surface, Rgb([255, 0, 0]), 2, 2, 16.0, &font, text);
    }
}

/// Probes common system font paths.
fn load_font() -> Option<FontVec> {
    let font_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/System/Library/Fonts/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    for path in &font_paths {
        if let Ok(font_data) = std::fs::read(path)
            && let Ok(font) = FontVec::try_from_vec(font_data)
        {
            return Some(font);
        }
    }

    None
}
