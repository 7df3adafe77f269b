#![forbid(unsafe_code)]

//! Pointer-to-grid translation for drag and resize gestures.
//!
//! The UI layer captures the pointer; this module turns one pointer sample
//! into a candidate grid rectangle for the active item and runs it through
//! the mover and the compactor. Everything here is a pure function of its
//! inputs.
//!
//! # Degenerate input
//!
//! Column counts below one, non-positive row heights and negative gaps are
//! clamped at this boundary so the collision math never sees them. Pointer
//! positions far outside the grid saturate, and candidate rows and heights
//! are capped at [`MAX_GRID_ROWS`] so later cascades cannot overflow.
//! [`compute_drag_result`] rejects invalid configurations and layouts outright.

use tessera_core::{GridConfig, GridRect, Layout, LayoutError, LayoutItem, PixelPoint, PixelRect};
use tracing::{debug, debug_span};

use crate::compact::compact;
use crate::mover::{GridTarget, MoveOptions, index_of, move_element};
use crate::render::row_height_px;
use crate::validate::validate_items;

/// Largest row index or height a pointer sample can produce.
pub const MAX_GRID_ROWS: i32 = 1 << 24;

/// What the active gesture does to its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridInteraction {
    Drag,
    Resize,
}

/// One pointer sample of a drag or resize gesture, in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DraggingData {
    /// Pointer position when the gesture started.
    pub pointer_down: PixelPoint,
    /// Current pointer position.
    pub pointer_drag: PixelPoint,
    /// The grid element's client rect at gesture start.
    pub grid_rect: PixelRect,
    /// The dragged element's client rect at gesture start.
    pub drag_elem_rect: PixelRect,
    /// Scroll accumulated since gesture start (`x` = left, `y` = top).
    pub scroll_difference: PixelPoint,
}

/// A candidate placement for the active item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCandidate {
    pub rect: GridRect,
    /// Where the element should be drawn, relative to the grid.
    pub pixel_rect: PixelRect,
}

/// Resolved layout for one pointer sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DragResult {
    pub layout: Layout,
    /// Pixel rect of the dragged element, relative to the grid.
    pub dragged_item_rect: PixelRect,
}

/// Round half up, saturating into `i32`.
fn round_to_i32(value: f64) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let rounded = (value + 0.5).floor();
    if rounded >= f64::from(i32::MAX) {
        return i32::MAX;
    }
    if rounded <= f64::from(i32::MIN) {
        return i32::MIN;
    }
    rounded as i32
}

fn column_width(cols: i32, width: f64, gap: f64) -> f64 {
    let cols = f64::from(cols.max(1));
    (width - gap * (cols - 1.0)) / cols
}

/// Grid column under a horizontal pixel offset.
///
/// Without a gap this is `round(screen_x * cols / width)`.
#[must_use]
pub fn screen_x_to_grid_x(screen_x: f64, cols: i32, width: f64, gap: f64) -> i32 {
    let stride = column_width(cols, width, gap) + gap;
    if stride <= 0.0 {
        return 0;
    }
    round_to_i32(screen_x / stride)
}

/// Grid row under a vertical pixel offset.
///
/// Without a gap this is `round(screen_y / row_height)`.
#[must_use]
pub fn screen_y_to_grid_y(screen_y: f64, row_height: f64, gap: f64) -> i32 {
    let stride = row_height + gap;
    if stride <= 0.0 {
        return 0;
    }
    round_to_i32(screen_y / stride)
}

/// Number of columns a pixel width spans, counting the gaps between them.
#[must_use]
pub fn screen_width_to_grid_width(width_px: f64, cols: i32, width: f64, gap: f64) -> i32 {
    let item_width = column_width(cols, width, gap);
    let stride = item_width + gap;
    if stride <= 0.0 {
        return 1;
    }
    round_to_i32((width_px - item_width) / stride).saturating_add(1)
}

/// Number of rows a pixel height spans, counting the gaps between them.
#[must_use]
pub fn screen_height_to_grid_height(height_px: f64, row_height: f64, gap: f64) -> i32 {
    let stride = row_height + gap;
    if stride <= 0.0 {
        return 1;
    }
    round_to_i32((height_px - row_height) / stride).saturating_add(1)
}

/// Candidate position for `item` while it is dragged.
///
/// The element keeps the offset at which it was grabbed; the result is
/// clamped inside the grid.
#[must_use]
pub fn translate_drag(item: &LayoutItem, config: &GridConfig, data: &DraggingData) -> GridCandidate {
    let cols = config.effective_cols();
    let gap = config.effective_gap();
    let row_height = row_height_px(config, data.grid_rect.height);

    let grab_x = data.pointer_down.x - data.drag_elem_rect.left;
    let grab_y = data.pointer_down.y - data.drag_elem_rect.top;
    let grid_left = data.grid_rect.left + data.scroll_difference.x;
    let grid_top = data.grid_rect.top + data.scroll_difference.y;
    let rel_x = data.pointer_drag.x - grid_left - grab_x;
    let rel_y = data.pointer_drag.y - grid_top - grab_y;

    let mut x = screen_x_to_grid_x(rel_x, cols, data.grid_rect.width, gap).max(0);
    let y = screen_y_to_grid_y(rel_y, row_height, gap).clamp(0, MAX_GRID_ROWS);
    if x.saturating_add(item.w) > cols {
        x = (cols - item.w).max(0);
    }

    GridCandidate {
        rect: GridRect::new(x, y, item.w, item.h),
        pixel_rect: PixelRect::new(
            rel_y,
            rel_x,
            data.drag_elem_rect.width,
            data.drag_elem_rect.height,
        ),
    }
}

/// Candidate size for `item` while its bottom-right corner is dragged.
///
/// The size is clamped into the item's bounds and then into the columns
/// left of its position.
#[must_use]
pub fn translate_resize(
    item: &LayoutItem,
    config: &GridConfig,
    data: &DraggingData,
) -> GridCandidate {
    let cols = config.effective_cols();
    let gap = config.effective_gap();
    let row_height = row_height_px(config, data.grid_rect.height);
    let elem = data.drag_elem_rect;

    // Distance from the grab point to the element's bottom-right corner.
    let corner_x = elem.width - (data.pointer_down.x - elem.left);
    let corner_y = elem.height - (data.pointer_down.y - elem.top);
    let width_px = data.pointer_drag.x + corner_x - (elem.left + data.scroll_difference.x);
    let height_px = data.pointer_drag.y + corner_y - (elem.top + data.scroll_difference.y);

    let mut w = item.clamp_w(screen_width_to_grid_width(
        width_px,
        cols,
        data.grid_rect.width,
        gap,
    ));
    let h = item
        .clamp_h(screen_height_to_grid_height(height_px, row_height, gap))
        .min(MAX_GRID_ROWS);
    if item.x.saturating_add(w) > cols {
        w = cols.saturating_sub(item.x).max(1);
    }

    GridCandidate {
        rect: GridRect::new(item.x, item.y, w, h),
        pixel_rect: PixelRect::new(
            elem.top - data.grid_rect.top,
            elem.left - data.grid_rect.left,
            width_px,
            height_px,
        ),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dimension {
    Width,
    Height,
}

fn dimension_to_shrink(item: &LayoutItem, rect: GridRect, last: Option<Dimension>) -> Dimension {
    if rect.h <= item.min_h() {
        return Dimension::Width;
    }
    if rect.w <= item.min_w() {
        return Dimension::Height;
    }
    match last {
        Some(Dimension::Width) => Dimension::Height,
        _ => Dimension::Width,
    }
}

/// Shrink a resize candidate until it no longer overlaps another item.
///
/// Dimensions shrink alternately, one cell per step. Once clear, the
/// dimension that was not shrunk last is restored to its full candidate
/// size and shrunk on its own, so an axis that was never blocked keeps as
/// much of its size as possible. Neither dimension goes below the item's
/// minimum; if that is not enough the candidate is returned still
/// overlapping and compaction settles it.
#[must_use]
pub fn shrink_to_avoid_collisions(
    layout: &[LayoutItem],
    item: &LayoutItem,
    candidate: GridRect,
) -> GridRect {
    // Statics are obstacles too: the follow-up move would otherwise push the
    // resized item off them.
    let colliding = |rect: &GridRect| {
        layout
            .iter()
            .any(|other| other.id != item.id && rect.overlaps(&other.rect()))
    };

    let (full_w, full_h) = (candidate.w, candidate.h);
    let mut rect = candidate;
    let mut last = None;

    while colliding(&rect) {
        let dimension = dimension_to_shrink(item, rect, last);
        match dimension {
            Dimension::Width if rect.w > item.min_w() => rect.w -= 1,
            Dimension::Height if rect.h > item.min_h() => rect.h -= 1,
            _ => break,
        }
        last = Some(dimension);
    }

    match last {
        Some(Dimension::Width) => {
            rect.h = full_h;
            while colliding(&rect) && rect.h > item.min_h() {
                rect.h -= 1;
            }
        }
        Some(Dimension::Height) => {
            rect.w = full_w;
            while colliding(&rect) && rect.w > item.min_w() {
                rect.w -= 1;
            }
        }
        None => {}
    }
    rect
}

/// Resolve one pointer sample of a drag or resize gesture into a full layout.
///
/// Drags move the item (with cascades unless `prevent_collision` rejects the
/// move); resizes first shrink away from neighbors when `prevent_collision`
/// is set. Either way the result is compacted.
///
/// # Errors
///
/// [`LayoutError::InvalidColumns`] if `config.cols < 1`,
/// [`LayoutError::Validation`] if an item of `config.layout` has a
/// non-positive size, inverted bounds or a duplicate id, and
/// [`LayoutError::UnknownItem`] if `item_id` is not in `config.layout`.
pub fn compute_drag_result(
    item_id: &str,
    config: &GridConfig,
    interaction: GridInteraction,
    data: &DraggingData,
) -> Result<DragResult, LayoutError> {
    let _span = debug_span!("compute_drag_result", item_id, ?interaction).entered();

    config.validate()?;
    validate_items(&config.layout)?;
    let index = index_of(&config.layout, item_id)?;
    let item = &config.layout[index];
    let cols = config.effective_cols();
    let compact_type = config.compact_type;

    let (moved, pixel_rect) = match interaction {
        GridInteraction::Drag => {
            let candidate = translate_drag(item, config, data);
            debug!(x = candidate.rect.x, y = candidate.rect.y, "drag candidate");
            let options = MoveOptions::new(compact_type).prevent_collision(config.prevent_collision);
            let layout = move_element(
                config.layout.clone(),
                item_id,
                GridTarget::position(candidate.rect.x, candidate.rect.y),
                options,
            )?;
            (layout, candidate.pixel_rect)
        }
        GridInteraction::Resize => {
            let mut candidate = translate_resize(item, config, data);
            if config.prevent_collision {
                candidate.rect = shrink_to_avoid_collisions(&config.layout, item, candidate.rect);
            }
            debug!(w = candidate.rect.w, h = candidate.rect.h, "resize candidate");
            let options = MoveOptions::new(compact_type).user_action(false);
            let layout = move_element(
                config.layout.clone(),
                item_id,
                GridTarget::size(candidate.rect.w, candidate.rect.h),
                options,
            )?;
            (layout, candidate.pixel_rect)
        }
    };

    Ok(DragResult {
        layout: compact(&moved, compact_type, cols),
        dragged_item_rect: pixel_rect,
    })
}
