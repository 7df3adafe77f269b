#![forbid(unsafe_code)]

//! Compaction: slide items toward an edge to remove gaps.
//!
//! # Algorithm
//!
//! 1. Statics seed the comparison set; they never move.
//! 2. Non-static items are visited in traversal order (rows first for
//!    vertical, columns first for horizontal, array order for free-form).
//! 3. Each item slides toward the compaction edge until blocked, then any
//!    remaining overlap with the comparison set is resolved by pushing it past
//!    the blocker. A push that lands on a later item of the traversal pushes
//!    that item too (depth-first, in traversal order).
//! 4. Horizontal mode wraps an item that overflows the column count onto the
//!    next row and slides it left again.
//!
//! The output keeps the input's array order and clears every `moved` flag.
//!
//! # Invariants
//!
//! - Statics are never relocated.
//! - Compacting an already compacted layout is a no-op.

use tessera_core::{CompactType, Layout, LayoutItem};
use tracing::{debug_span, trace};

use crate::collision::{collides, first_collision_among, sorted_indices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(compact_type: CompactType) -> Self {
        if compact_type.is_horizontal() {
            Self::X
        } else {
            Self::Y
        }
    }

    fn coord(self, item: &LayoutItem) -> i32 {
        match self {
            Self::X => item.x,
            Self::Y => item.y,
        }
    }

    fn extent(self, item: &LayoutItem) -> i32 {
        match self {
            Self::X => item.w,
            Self::Y => item.h,
        }
    }

    fn set(self, item: &mut LayoutItem, value: i32) {
        match self {
            Self::X => item.x = value,
            Self::Y => item.y = value,
        }
    }
}

/// Compact `layout` toward the edge selected by `compact_type`.
///
/// Returns a new layout in the same array order as the input.
#[must_use]
pub fn compact(layout: &[LayoutItem], compact_type: CompactType, cols: i32) -> Layout {
    let _span = debug_span!("compact", items = layout.len(), ?compact_type, cols).entered();

    let order = sorted_indices(layout, compact_type);
    let mut sorted: Vec<LayoutItem> = order.iter().map(|&i| layout[i].clone()).collect();
    let mut compare_with: Vec<usize> = (0..sorted.len())
        .filter(|&i| sorted[i].is_static)
        .collect();

    for i in 0..sorted.len() {
        if !sorted[i].is_static {
            compact_item(&mut sorted, &compare_with, i, compact_type, cols);
            compare_with.push(i);
        }
        sorted[i].moved = false;
    }

    let mut out: Vec<Option<LayoutItem>> = vec![None; layout.len()];
    for (position, item) in sorted.into_iter().enumerate() {
        out[order[position]] = Some(item);
    }
    out.into_iter().flatten().collect()
}

/// Settle `items[index]` against the already placed `compare_with` set.
fn compact_item(
    items: &mut [LayoutItem],
    compare_with: &[usize],
    index: usize,
    compact_type: CompactType,
    cols: i32,
) {
    match compact_type {
        CompactType::Vertical => {
            let floor = compare_with
                .iter()
                .map(|&j| items[j].y + items[j].h)
                .fold(0, i32::max);
            items[index].y = items[index].y.min(floor);
            while items[index].y > 0 && first_collision_among(items, compare_with, index).is_none()
            {
                items[index].y -= 1;
            }
        }
        CompactType::Horizontal => slide_left(items, compare_with, index),
        CompactType::None => {}
    }

    let axis = Axis::of(compact_type);
    while let Some(blocker) = first_collision_among(items, compare_with, index) {
        let move_to = axis.coord(&items[blocker]) + axis.extent(&items[blocker]);
        resolve_compaction_collision(items, index, move_to, axis);

        if compact_type.is_horizontal() && items[index].x + items[index].w > cols {
            let item = &mut items[index];
            item.x = cols - item.w;
            item.y += 1;
            slide_left(items, compare_with, index);
        }
    }

    let item = &mut items[index];
    item.y = item.y.max(0);
    item.x = item.x.max(0);
}

fn slide_left(items: &mut [LayoutItem], compare_with: &[usize], index: usize) {
    while items[index].x > 0 && first_collision_among(items, compare_with, index).is_none() {
        items[index].x -= 1;
    }
}

/// A pending push: `index` ends at `move_to` once every later item it
/// overlaps (while nudged one step forward) has been pushed first.
struct PushFrame {
    index: usize,
    move_to: i32,
    next: usize,
}

/// Push `items[start]` to `move_to` along `axis`, cascading into later items.
///
/// While an item is pending it sits one step past its old position; every
/// later non-static item overlapping it there is pushed to
/// `move_to + extent` before the item itself settles.
fn resolve_compaction_collision(items: &mut [LayoutItem], start: usize, move_to: i32, axis: Axis) {
    let nudge = |item: &mut LayoutItem| axis.set(item, axis.coord(item) + 1);

    nudge(&mut items[start]);
    let mut stack = vec![PushFrame {
        index: start,
        move_to,
        next: start + 1,
    }];

    while let Some(frame) = stack.last_mut() {
        let index = frame.index;
        let mut child = None;
        while frame.next < items.len() {
            let j = frame.next;
            frame.next += 1;
            let other = &items[j];
            if other.is_static {
                continue;
            }
            if other.y > items[index].y + items[index].h {
                frame.next = items.len();
                break;
            }
            if collides(&items[index], other) {
                child = Some((j, frame.move_to + axis.extent(&items[index])));
                break;
            }
        }

        match child {
            Some((j, child_move_to)) => {
                trace!(
                    pushed = %items[j].id,
                    by = %items[index].id,
                    move_to = child_move_to,
                    "compaction cascade"
                );
                nudge(&mut items[j]);
                stack.push(PushFrame {
                    index: j,
                    move_to: child_move_to,
                    next: j + 1,
                });
            }
            None => {
                if let Some(done) = stack.pop() {
                    axis.set(&mut items[done.index], done.move_to);
                }
            }
        }
    }
}
