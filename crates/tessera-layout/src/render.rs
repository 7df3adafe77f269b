#![forbid(unsafe_code)]

//! Grid-unit to pixel scaling for rendering.

use rustc_hash::FxHashMap;
use tessera_core::{GridConfig, LayoutItem, PixelRect, RowHeight};

/// Row height used when the configured one is unusable.
const FALLBACK_ROW_HEIGHT: f64 = 1.0;

/// Row height that makes the layout's rows fill `grid_height` exactly.
///
/// An empty layout gets the whole height as a single row.
#[must_use]
pub fn fit_row_height(layout: &[LayoutItem], grid_height: f64, gap: f64) -> f64 {
    let rows = layout
        .iter()
        .map(|item| (item.y + item.h).max(0))
        .fold(0, i32::max);
    if rows == 0 {
        return grid_height;
    }
    let rows = f64::from(rows);
    (grid_height - (rows - 1.0) * gap) / rows
}

/// Resolve the configured row height to pixels, never returning a
/// non-positive value.
#[must_use]
pub fn row_height_px(config: &GridConfig, grid_height: f64) -> f64 {
    let px = match config.row_height {
        RowHeight::Pixels(px) => px,
        RowHeight::Fit => fit_row_height(&config.layout, grid_height, config.effective_gap()),
    };
    if px.is_finite() && px > 0.0 {
        px
    } else {
        FALLBACK_ROW_HEIGHT
    }
}

/// Pixel height needed to show every row of `layout`.
#[must_use]
pub fn grid_height_px(layout: &[LayoutItem], row_height: f64, gap: f64) -> f64 {
    layout
        .iter()
        .map(|item| {
            let rows = f64::from(item.y + item.h);
            rows * row_height + (rows - 1.0).max(0.0) * gap
        })
        .fold(0.0, f64::max)
}

/// Pixel rectangle of every item, keyed by id, for a grid of `width` x
/// `height` pixels.
#[must_use]
pub fn layout_to_render_data(
    config: &GridConfig,
    width: f64,
    height: f64,
) -> FxHashMap<String, PixelRect> {
    let cols = f64::from(config.effective_cols());
    let gap = config.effective_gap();
    let row_height = row_height_px(config, height);
    let col_width = (width - gap * (cols - 1.0)).max(0.0) / cols;

    config
        .layout
        .iter()
        .map(|item| {
            let (x, y) = (f64::from(item.x), f64::from(item.y));
            let (w, h) = (f64::from(item.w), f64::from(item.h));
            let rect = PixelRect {
                top: y * row_height + gap * y,
                left: x * col_width + gap * x,
                width: w * col_width + gap * (w - 1.0).max(0.0),
                height: h * row_height + gap * (h - 1.0).max(0.0),
            };
            (item.id.clone(), rect)
        })
        .collect()
}
