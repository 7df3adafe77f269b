#![forbid(unsafe_code)]

//! Per-item change classification between two layout snapshots.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tessera_core::LayoutItem;

/// What changed for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutChange {
    Move,
    Resize,
    MoveResize,
}

/// Diff entry for one item, serialized as `{"change": "..."}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemChange {
    pub change: LayoutChange,
}

impl ItemChange {
    fn classify(before: &LayoutItem, after: &LayoutItem) -> Option<Self> {
        let moved = before.x != after.x || before.y != after.y;
        let resized = before.w != after.w || before.h != after.h;
        let change = match (moved, resized) {
            (true, true) => LayoutChange::MoveResize,
            (true, false) => LayoutChange::Move,
            (false, true) => LayoutChange::Resize,
            (false, false) => return None,
        };
        Some(Self { change })
    }
}

/// Classify how every item of `before` changed in `after`, keyed by id.
///
/// Unchanged items and items missing from `after` are left out; items only
/// in `after` are ignored.
#[must_use]
pub fn diff(before: &[LayoutItem], after: &[LayoutItem]) -> FxHashMap<String, ItemChange> {
    let by_id: FxHashMap<&str, &LayoutItem> =
        after.iter().map(|item| (item.id.as_str(), item)).collect();

    before
        .iter()
        .filter_map(|old| {
            let new = by_id.get(old.id.as_str())?;
            ItemChange::classify(old, new).map(|change| (old.id.clone(), change))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, x: i32, y: i32, w: i32, h: i32) -> LayoutItem {
        LayoutItem::new(id, x, y, w, h)
    }

    #[test]
    fn classifies_each_kind_of_change() {
        let before = vec![
            item("m", 0, 0, 1, 1),
            item("r", 1, 0, 1, 1),
            item("mr", 2, 0, 1, 1),
            item("same", 3, 0, 1, 1),
        ];
        let after = vec![
            item("m", 0, 2, 1, 1),
            item("r", 1, 0, 3, 1),
            item("mr", 4, 0, 1, 2),
            item("same", 3, 0, 1, 1),
        ];
        let changes = diff(&before, &after);
        assert_eq!(changes.len(), 3);
        assert_eq!(changes["m"].change, LayoutChange::Move);
        assert_eq!(changes["r"].change, LayoutChange::Resize);
        assert_eq!(changes["mr"].change, LayoutChange::MoveResize);
    }

    #[test]
    fn additions_and_removals_are_not_reported() {
        let before = vec![item("gone", 0, 0, 1, 1)];
        let after = vec![item("new", 5, 5, 1, 1)];
        assert!(diff(&before, &after).is_empty());
    }

    #[test]
    fn flags_do_not_count_as_changes() {
        let before = vec![item("a", 0, 0, 1, 1)];
        let mut after = before.clone();
        after[0].moved = true;
        after[0].is_static = true;
        assert!(diff(&before, &after).is_empty());
    }

    #[test]
    fn serializes_as_change_records() {
        let changes = diff(&[item("1", 1, 0, 1, 1)], &[item("1", 1, 0, 3, 1)]);
        let json = serde_json::to_value(&changes).expect("serializable");
        assert_eq!(json, serde_json::json!({ "1": { "change": "resize" } }));

        let changes = diff(&[item("1", 1, 0, 1, 1)], &[item("1", 0, 0, 3, 1)]);
        let json = serde_json::to_value(&changes).expect("serializable");
        assert_eq!(json, serde_json::json!({ "1": { "change": "moveresize" } }));
    }
}
