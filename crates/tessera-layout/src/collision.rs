#![forbid(unsafe_code)]

//! Collision predicates and spatial queries over grid items.
//!
//! Queries walk the layout in array order. Callers that need spatial order
//! sort first (see [`sorted_indices`]); nothing here reorders a layout behind
//! the caller's back.

use tessera_core::{CompactType, GridRect, LayoutItem};

/// True iff `a` and `b` overlap on both axes and are distinct items.
///
/// Items with the same id never collide, so an item can be compared against
/// a list that still contains its previous self.
#[inline]
#[must_use]
pub fn collides(a: &LayoutItem, b: &LayoutItem) -> bool {
    a.id != b.id && a.rect().overlaps(&b.rect())
}

/// First entry of `layout`, in array order, that collides with `item`.
#[must_use]
pub fn get_first_collision<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Option<&'a LayoutItem> {
    layout.iter().find(|other| collides(item, other))
}

/// Every entry of `layout` that collides with `item`, in array order.
#[must_use]
pub fn get_all_collisions<'a>(layout: &'a [LayoutItem], item: &LayoutItem) -> Vec<&'a LayoutItem> {
    layout.iter().filter(|other| collides(item, other)).collect()
}

/// Lowest occupied row edge: the max of `y + h`, or 0 for an empty layout.
#[must_use]
pub fn bottom(layout: &[LayoutItem]) -> i32 {
    layout
        .iter()
        .map(|item| item.y + item.h)
        .fold(0, i32::max)
}

/// All static items, in array order.
#[must_use]
pub fn get_statics(layout: &[LayoutItem]) -> Vec<&LayoutItem> {
    layout.iter().filter(|item| item.is_static).collect()
}

/// Look up an item by id.
#[must_use]
pub fn get_layout_item<'a>(layout: &'a [LayoutItem], id: &str) -> Option<&'a LayoutItem> {
    layout.iter().find(|item| item.id == id)
}

/// Stable sort by `(y, x)` ascending.
pub fn sort_by_row_then_col(layout: &mut [LayoutItem]) {
    layout.sort_by_key(|item| (item.y, item.x));
}

/// Stable sort by `(x, y)` ascending.
pub fn sort_by_col_then_row(layout: &mut [LayoutItem]) {
    layout.sort_by_key(|item| (item.x, item.y));
}

/// Sort in place into the traversal order used by `compact_type`.
pub fn sort_layout_items(layout: &mut [LayoutItem], compact_type: CompactType) {
    match compact_type {
        CompactType::Vertical => sort_by_row_then_col(layout),
        CompactType::Horizontal => sort_by_col_then_row(layout),
        CompactType::None => {}
    }
}

/// Indices of `layout` in the traversal order used by `compact_type`.
///
/// Vertical compaction walks rows first, horizontal walks columns first, and
/// free-form keeps array order.
#[must_use]
pub fn sorted_indices(layout: &[LayoutItem], compact_type: CompactType) -> Vec<usize> {
    let mut order: Vec<usize> = (0..layout.len()).collect();
    match compact_type {
        CompactType::Vertical => order.sort_by_key(|&i| (layout[i].y, layout[i].x)),
        CompactType::Horizontal => order.sort_by_key(|&i| (layout[i].x, layout[i].y)),
        CompactType::None => {}
    }
    order
}

/// Clamp every item into `cols` columns.
///
/// Right overflow shifts the item left. A negative left edge is treated as
/// unrecoverable: the item is reset to `x = 0` and stretched to the full
/// width. Statics that overlap anything placed before them (or any other
/// static) are pushed down a row at a time until clear.
pub fn correct_bounds(layout: &mut [LayoutItem], cols: i32) {
    let mut collides_with: Vec<usize> = (0..layout.len())
        .filter(|&i| layout[i].is_static)
        .collect();

    for i in 0..layout.len() {
        let item = &mut layout[i];
        if item.x + item.w > cols {
            item.x = cols - item.w;
        }
        if item.x < 0 {
            item.x = 0;
            item.w = cols;
        }

        if !layout[i].is_static {
            collides_with.push(i);
        } else {
            while first_collision_among(layout, &collides_with, i).is_some() {
                layout[i].y += 1;
            }
        }
    }
}

/// First of `candidates` (indices into `items`) colliding with `items[subject]`.
pub(crate) fn first_collision_among(
    items: &[LayoutItem],
    candidates: &[usize],
    subject: usize,
) -> Option<usize> {
    let item = &items[subject];
    candidates
        .iter()
        .copied()
        .find(|&j| collides(item, &items[j]))
}

/// Whether an anonymous probe rectangle overlaps any item.
///
/// The probe has no identity, so an item's own footprint counts as an
/// obstacle.
pub(crate) fn rect_collides_any(items: &[LayoutItem], probe: GridRect) -> bool {
    items.iter().any(|item| probe.overlaps(&item.rect()))
}
