#![forbid(unsafe_code)]

//! Grid items and layouts.

use serde::{Deserialize, Serialize};

use crate::geometry::GridRect;

/// Smallest width/height any item may take.
pub const MIN_ITEM_SIZE: i32 = 1;

/// One grid-resident rectangle.
///
/// The engine only ever mutates `x`, `y`, `w`, `h` and `moved`; identity and
/// constraints belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    /// Stable identifier, unique within a layout.
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Inclusive lower width bound (absent = 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<i32>,
    /// Inclusive lower height bound (absent = 1).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<i32>,
    /// Inclusive upper width bound (absent = unbounded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<i32>,
    /// Inclusive upper height bound (absent = unbounded).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<i32>,
    /// Static items never move; everything else routes around them.
    #[serde(rename = "static", default)]
    pub is_static: bool,
    /// Lets the mover relocate a static item when explicitly asked to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draggable: Option<bool>,
    /// Set while a resolution pass has already displaced this item.
    #[serde(default)]
    pub moved: bool,
}

/// An ordered collection of items, in insertion order.
///
/// Spatial order is derived on demand by sorting and never stored.
pub type Layout = Vec<LayoutItem>;

impl LayoutItem {
    /// Create a non-static item without size bounds.
    #[must_use]
    pub fn new(id: impl Into<String>, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
            is_static: false,
            is_draggable: None,
            moved: false,
        }
    }

    /// Mark the item static.
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Set the lower size bounds.
    #[must_use]
    pub fn with_min_size(mut self, min_w: i32, min_h: i32) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    /// Set the upper size bounds.
    #[must_use]
    pub fn with_max_size(mut self, max_w: i32, max_h: i32) -> Self {
        self.max_w = Some(max_w);
        self.max_h = Some(max_h);
        self
    }

    /// Explicitly allow or forbid dragging.
    #[must_use]
    pub fn with_draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = Some(draggable);
        self
    }

    /// The item's footprint in grid units.
    #[inline]
    #[must_use]
    pub const fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    /// Overwrite position and size from a rectangle.
    #[inline]
    pub fn set_rect(&mut self, rect: GridRect) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }

    #[inline]
    #[must_use]
    pub fn min_w(&self) -> i32 {
        self.min_w.unwrap_or(MIN_ITEM_SIZE).max(MIN_ITEM_SIZE)
    }

    #[inline]
    #[must_use]
    pub fn min_h(&self) -> i32 {
        self.min_h.unwrap_or(MIN_ITEM_SIZE).max(MIN_ITEM_SIZE)
    }

    #[inline]
    #[must_use]
    pub fn max_w(&self) -> i32 {
        self.max_w.unwrap_or(i32::MAX)
    }

    #[inline]
    #[must_use]
    pub fn max_h(&self) -> i32 {
        self.max_h.unwrap_or(i32::MAX)
    }

    /// Clamp a candidate width into this item's bounds.
    ///
    /// The upper bound wins when bounds are inverted.
    #[must_use]
    pub fn clamp_w(&self, w: i32) -> i32 {
        w.max(self.min_w()).min(self.max_w())
    }

    /// Clamp a candidate height into this item's bounds.
    #[must_use]
    pub fn clamp_h(&self, h: i32) -> i32 {
        h.max(self.min_h()).min(self.max_h())
    }

    /// Whether the mover may relocate this item on request.
    #[inline]
    #[must_use]
    pub fn is_movable(&self) -> bool {
        !self.is_static || self.is_draggable == Some(true)
    }
}
