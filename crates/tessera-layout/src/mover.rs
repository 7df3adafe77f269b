#![forbid(unsafe_code)]

//! Moving and resizing items with cascading displacement.
//!
//! # Cascade model
//!
//! Moving an item onto occupied cells displaces every colliding neighbor,
//! which may in turn displace its own neighbors. The cascade runs on an
//! explicit stack of [`Frame`]s in depth-first order: a frame holds the
//! collisions found when its item was placed and walks them one at a time,
//! pushing a child frame whenever a neighbor is displaced.
//!
//! The layout vector is the arena; items are addressed by index. The
//! per-item `moved` flag is the visited set for one top-level call: a
//! neighbor that has already been displaced is never displaced again.
//!
//! # Reversal
//!
//! On a direct user action the first level of collisions may be resolved by
//! placing the neighbor on the *other* side of the mover (above it, or to its
//! left) when that spot is free. Nested displacements always push forward.
//!
//! # Failure Modes
//!
//! - With `prevent_collision`, a move that would overlap anything is reverted
//!   and the layout comes back unchanged. This is an outcome, not an error.
//! - Displacement alone does not guarantee an overlap-free result; callers
//!   follow a move with [`compact`](crate::compact).

use tessera_core::{CompactType, GridRect, Layout, LayoutError, LayoutItem};
use tracing::{debug, debug_span, trace};

use crate::collision::{collides, rect_collides_any, sorted_indices};

/// Requested position and/or size for one item. `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridTarget {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
}

impl GridTarget {
    /// Move to `(x, y)`, keeping the size.
    #[must_use]
    pub const fn position(x: i32, y: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            w: None,
            h: None,
        }
    }

    /// Resize to `w` x `h`, keeping the position.
    #[must_use]
    pub const fn size(w: i32, h: i32) -> Self {
        Self {
            x: None,
            y: None,
            w: Some(w),
            h: Some(h),
        }
    }

    /// Also resize to `w` x `h`.
    #[must_use]
    pub const fn with_size(mut self, w: i32, h: i32) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    fn apply(self, rect: GridRect) -> GridRect {
        GridRect::new(
            self.x.unwrap_or(rect.x),
            self.y.unwrap_or(rect.y),
            self.w.unwrap_or(rect.w),
            self.h.unwrap_or(rect.h),
        )
    }
}

/// How a move is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOptions {
    /// Direct interaction: the first level of collisions may be reversed.
    pub is_user_action: bool,
    /// Reject the move outright if it would overlap anything.
    pub prevent_collision: bool,
    pub compact_type: CompactType,
}

impl MoveOptions {
    /// A user-initiated move that cascades collisions.
    #[must_use]
    pub const fn new(compact_type: CompactType) -> Self {
        Self {
            is_user_action: true,
            prevent_collision: false,
            compact_type,
        }
    }

    #[must_use]
    pub const fn user_action(mut self, is_user_action: bool) -> Self {
        self.is_user_action = is_user_action;
        self
    }

    #[must_use]
    pub const fn prevent_collision(mut self, prevent_collision: bool) -> Self {
        self.prevent_collision = prevent_collision;
        self
    }
}

/// One item of a batch move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTarget {
    pub id: String,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

impl MoveTarget {
    #[must_use]
    pub fn new(id: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            id: id.into(),
            x: Some(x),
            y: Some(y),
        }
    }
}

/// A placed item whose collisions are being displaced.
#[derive(Debug)]
struct Frame {
    item: usize,
    collisions: Vec<usize>,
    next: usize,
    user_action: bool,
}

pub(crate) fn index_of(layout: &[LayoutItem], id: &str) -> Result<usize, LayoutError> {
    layout
        .iter()
        .position(|item| item.id == id)
        .ok_or_else(|| LayoutError::UnknownItem { id: id.to_owned() })
}

/// Move and/or resize the item `id`, displacing whatever it lands on.
///
/// Returns the layout unchanged when the item is static (and not explicitly
/// draggable), when nothing would change, or when `prevent_collision` rejects
/// the move.
///
/// # Errors
///
/// [`LayoutError::UnknownItem`] if no item has the given id.
pub fn move_element(
    mut layout: Layout,
    id: &str,
    target: GridTarget,
    options: MoveOptions,
) -> Result<Layout, LayoutError> {
    let index = index_of(&layout, id)?;
    let _span = debug_span!(
        "move_element",
        id,
        x = ?target.x,
        y = ?target.y,
        w = ?target.w,
        h = ?target.h,
        compact_type = ?options.compact_type
    )
    .entered();

    if let Some(frame) = place(
        &mut layout,
        index,
        target,
        options.is_user_action,
        options.prevent_collision,
        options.compact_type,
    ) {
        run_cascade(&mut layout, frame, options.compact_type);
    }
    Ok(layout)
}

/// Move several items together, keeping their relative arrangement.
///
/// The first target alone decides whether the traversal order is reversed.
/// Members are processed topmost (leftmost, for horizontal compaction)
/// first, and only that first member may reverse its collisions.
///
/// # Errors
///
/// [`LayoutError::UnknownItem`] if any target id is missing.
pub fn move_multiple_elements(
    mut layout: Layout,
    targets: &[MoveTarget],
    is_user_action: bool,
    compact_type: CompactType,
) -> Result<Layout, LayoutError> {
    let indices = targets
        .iter()
        .map(|target| index_of(&layout, &target.id))
        .collect::<Result<Vec<_>, _>>()?;
    let _span = debug_span!("move_multiple_elements", items = targets.len(), ?compact_type).entered();

    let at_target = |item: &LayoutItem, target: &MoveTarget| {
        target.x.is_none_or(|x| x == item.x) && target.y.is_none_or(|y| y == item.y)
    };
    if indices
        .iter()
        .zip(targets)
        .all(|(&i, target)| at_target(&layout[i], target))
    {
        return Ok(layout);
    }

    let Some((&lead, lead_target)) = indices.iter().zip(targets).next() else {
        return Ok(layout);
    };
    let lead_old = layout[lead].rect();

    let mut batch = Vec::with_capacity(indices.len());
    for (&i, target) in indices.iter().zip(targets) {
        let item = &mut layout[i];
        if !item.is_movable() {
            continue;
        }
        if let Some(x) = target.x {
            item.x = x;
        }
        if let Some(y) = target.y {
            item.y = y;
        }
        item.moved = true;
        batch.push(i);
    }

    let moving_back = moving_backward(compact_type, lead_old, lead_target.x, lead_target.y);
    let mut order = sorted_indices(&layout, compact_type);
    if moving_back {
        order.reverse();
    }

    if compact_type.is_horizontal() {
        batch.sort_by_key(|&i| (layout[i].x, layout[i].y, i));
    } else {
        batch.sort_by_key(|&i| (layout[i].y, layout[i].x, i));
    }
    batch.dedup();

    for (rank, &member) in batch.iter().enumerate() {
        let collisions = order
            .iter()
            .copied()
            .filter(|&j| collides(&layout[member], &layout[j]))
            .collect();
        let frame = Frame {
            item: member,
            collisions,
            next: 0,
            user_action: is_user_action && rank == 0,
        };
        run_cascade(&mut layout, frame, compact_type);
    }
    Ok(layout)
}

/// Backward along the compaction axis means the cascade must visit
/// neighbors in reverse traversal order.
fn moving_backward(
    compact_type: CompactType,
    old: GridRect,
    new_x: Option<i32>,
    new_y: Option<i32>,
) -> bool {
    match compact_type {
        CompactType::Vertical => new_y.is_some_and(|y| old.y >= y),
        CompactType::Horizontal => new_x.is_some_and(|x| old.x >= x),
        CompactType::None => false,
    }
}

/// Apply `target` to `layout[index]` and collect what it now overlaps.
///
/// Returns `None` when nothing needs displacing: the item cannot move, the
/// target changes nothing, or `prevent_collision` reverted the move.
fn place(
    layout: &mut [LayoutItem],
    index: usize,
    target: GridTarget,
    user_action: bool,
    prevent_collision: bool,
    compact_type: CompactType,
) -> Option<Frame> {
    let item = &layout[index];
    if !item.is_movable() {
        return None;
    }
    let old = item.rect();
    let new = target.apply(old);
    if new == old {
        return None;
    }

    layout[index].set_rect(new);
    layout[index].moved = true;

    let mut order = sorted_indices(layout, compact_type);
    if moving_backward(compact_type, old, target.x, target.y) {
        order.reverse();
    }
    let collisions: Vec<usize> = order
        .into_iter()
        .filter(|&j| collides(&layout[index], &layout[j]))
        .collect();

    if prevent_collision && !collisions.is_empty() {
        debug!(
            id = %layout[index].id,
            collisions = collisions.len(),
            "collision prevented, reverting"
        );
        layout[index].set_rect(old);
        layout[index].moved = false;
        return None;
    }

    Some(Frame {
        item: index,
        collisions,
        next: 0,
        user_action,
    })
}

fn run_cascade(layout: &mut [LayoutItem], root: Frame, compact_type: CompactType) {
    let mut stack = vec![root];
    while let Some(frame) = stack.last_mut() {
        let Some(&collider) = frame.collisions.get(frame.next) else {
            stack.pop();
            continue;
        };
        frame.next += 1;
        let mover = frame.item;
        let user_action = frame.user_action;

        if layout[collider].moved {
            continue;
        }
        // Statics stay put: the mover is the one that has to give way.
        let (anchor, to_move) = if layout[collider].is_static {
            (collider, mover)
        } else {
            (mover, collider)
        };
        if let Some(child) = move_away_from_collision(layout, anchor, to_move, user_action, compact_type)
        {
            stack.push(child);
        }
    }
}

/// Displace `layout[to_move]` so it no longer sits on `layout[anchor]`.
fn move_away_from_collision(
    layout: &mut [LayoutItem],
    anchor: usize,
    to_move: usize,
    user_action: bool,
    compact_type: CompactType,
) -> Option<Frame> {
    let horizontal = compact_type.is_horizontal();
    let vertical = compact_type.resolves_vertically();
    let prevent_collision = layout[anchor].is_static;
    let anchor_rect = layout[anchor].rect();
    let rect = layout[to_move].rect();

    if user_action {
        let probe = GridRect::new(
            if horizontal {
                (anchor_rect.x - rect.w).max(0)
            } else {
                rect.x
            },
            if vertical {
                (anchor_rect.y - rect.h).max(0)
            } else {
                rect.y
            },
            rect.w,
            rect.h,
        );
        if !rect_collides_any(layout, probe) {
            debug!(
                id = %layout[to_move].id,
                x = probe.x,
                y = probe.y,
                "reversing collision"
            );
            let target = GridTarget {
                x: horizontal.then_some(probe.x),
                y: vertical.then_some(probe.y),
                ..GridTarget::default()
            };
            return place(layout, to_move, target, false, prevent_collision, compact_type);
        }
    }

    let target = match compact_type {
        CompactType::Horizontal => GridTarget {
            x: Some(rect.x + 1),
            ..GridTarget::default()
        },
        CompactType::Vertical => GridTarget {
            y: Some(rect.y + 1),
            ..GridTarget::default()
        },
        CompactType::None => GridTarget {
            y: Some((rect.y + 1).max(anchor_rect.y + 1)),
            ..GridTarget::default()
        },
    };
    trace!(id = %layout[to_move].id, x = ?target.x, y = ?target.y, "pushing forward");
    place(layout, to_move, target, false, prevent_collision, compact_type)
}
