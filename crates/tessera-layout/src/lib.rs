#![forbid(unsafe_code)]

//! Layout engine: collision detection, compaction, cascading moves, and
//! pointer-to-grid translation for fixed-column grids.
//!
//! Every entry point takes a layout by value or by reference and returns a
//! new layout; nothing is retained between calls. Items are addressed by
//! index inside a call and by id across calls.
//!
//! # Example
//!
//! ```
//! use tessera_layout::{CompactType, GridTarget, LayoutItem, MoveOptions, compact, move_element};
//!
//! let layout = vec![LayoutItem::new("a", 0, 0, 1, 1), LayoutItem::new("b", 1, 0, 1, 1)];
//! let moved = move_element(
//!     layout,
//!     "a",
//!     GridTarget::position(1, 0),
//!     MoveOptions::new(CompactType::Vertical),
//! )?;
//! let settled = compact(&moved, CompactType::Vertical, 2);
//! assert_eq!((settled[1].x, settled[1].y), (1, 1));
//! # Ok::<(), tessera_layout::LayoutError>(())
//! ```

pub mod collision;
pub mod compact;
pub mod diff;
pub mod mover;
pub mod render;
pub mod translate;
pub mod validate;

pub use tessera_core::{
    CompactType, FieldType, GridConfig, GridRect, Layout, LayoutError, LayoutItem, PixelPoint,
    PixelRect, RowHeight, ValidationError,
};

pub use collision::{
    bottom, collides, correct_bounds, get_all_collisions, get_first_collision, get_layout_item,
    get_statics, sort_by_col_then_row, sort_by_row_then_col, sort_layout_items, sorted_indices,
};
pub use compact::compact;
pub use diff::{ItemChange, LayoutChange, diff};
pub use mover::{GridTarget, MoveOptions, MoveTarget, move_element, move_multiple_elements};
pub use render::{fit_row_height, grid_height_px, layout_to_render_data, row_height_px};
pub use translate::{
    DragResult, DraggingData, GridCandidate, GridInteraction, compute_drag_result,
    screen_height_to_grid_height, screen_width_to_grid_width, screen_x_to_grid_x,
    screen_y_to_grid_y, shrink_to_avoid_collisions, translate_drag, translate_resize,
};
pub use validate::{validate_items, validate_layout};
