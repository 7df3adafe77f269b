#![forbid(unsafe_code)]

//! Grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::item::Layout;

/// Direction items are slid toward when gaps are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompactType {
    /// Slide items up; collisions push down.
    #[default]
    Vertical,
    /// Slide items left; collisions push right.
    Horizontal,
    /// Free-form: no sliding, collisions still push down.
    None,
}

impl CompactType {
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Horizontal)
    }

    /// Every mode except horizontal resolves collisions along `y`.
    #[inline]
    #[must_use]
    pub const fn resolves_vertically(self) -> bool {
        !self.is_horizontal()
    }
}

/// Height of one grid row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowHeight {
    /// Fixed row height in pixels.
    Pixels(f64),
    /// Rows share the container height evenly.
    Fit,
}

impl Default for RowHeight {
    fn default() -> Self {
        Self::Pixels(100.0)
    }
}

/// Everything the engine needs to know about one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridConfig {
    /// Number of columns (>= 1).
    pub cols: i32,
    pub row_height: RowHeight,
    /// Pixels between adjacent cells.
    pub gap: f64,
    pub compact_type: CompactType,
    /// Reject moves and shrink resizes instead of cascading.
    pub prevent_collision: bool,
    /// Current resolved layout.
    pub layout: Layout,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 12,
            row_height: RowHeight::default(),
            gap: 0.0,
            compact_type: CompactType::Vertical,
            prevent_collision: false,
            layout: Layout::new(),
        }
    }
}

impl GridConfig {
    /// Create a configuration with `cols` columns and defaults elsewhere.
    #[must_use]
    pub fn new(cols: i32) -> Self {
        Self {
            cols,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_row_height(mut self, row_height: RowHeight) -> Self {
        self.row_height = row_height;
        self
    }

    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn with_compact_type(mut self, compact_type: CompactType) -> Self {
        self.compact_type = compact_type;
        self
    }

    #[must_use]
    pub fn with_prevent_collision(mut self, prevent_collision: bool) -> Self {
        self.prevent_collision = prevent_collision;
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Reject configurations the collision math cannot handle.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.cols < 1 {
            return Err(LayoutError::InvalidColumns { cols: self.cols });
        }
        Ok(())
    }

    /// Column count clamped to at least one.
    #[inline]
    #[must_use]
    pub fn effective_cols(&self) -> i32 {
        self.cols.max(1)
    }

    /// Gap clamped to a finite, non-negative value.
    #[inline]
    #[must_use]
    pub fn effective_gap(&self) -> f64 {
        if self.gap.is_finite() {
            self.gap.max(0.0)
        } else {
            0.0
        }
    }
}
