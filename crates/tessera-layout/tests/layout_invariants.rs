//! Property invariants for compaction and the movers.
//!
//! Layouts are generated on a small grid so collisions are frequent; each
//! case applies one operation and checks the structural guarantees that must
//! hold for every input.

use proptest::prelude::*;
use tessera_layout::{
    CompactType, GridRect, GridTarget, Layout, LayoutItem, MoveOptions, MoveTarget, collides,
    compact, correct_bounds, move_element, move_multiple_elements,
};

const COLS: i32 = 6;

fn item_strategy() -> impl Strategy<Value = (i32, i32, i32, i32)> {
    (1..=3i32, 1..=3i32).prop_flat_map(|(w, h)| (0..=COLS - w, 0..8i32, Just(w), Just(h)))
}

/// Up to eight items with ids `i0..`, at most the first one static.
fn layout_strategy() -> impl Strategy<Value = Layout> {
    (prop::collection::vec(item_strategy(), 1..8), any::<bool>()).prop_map(|(rects, pin_first)| {
        rects
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, w, h))| {
                let item = LayoutItem::new(format!("i{i}"), x, y, w, h);
                if i == 0 && pin_first { item.pinned() } else { item }
            })
            .collect()
    })
}

/// Up to ten items, any of which may be static (roughly one in four).
fn pinned_layout_strategy() -> impl Strategy<Value = Layout> {
    prop::collection::vec((item_strategy(), 0..4u8), 1..10).prop_map(|seeds| {
        seeds
            .into_iter()
            .enumerate()
            .map(|(i, ((x, y, w, h), roll))| {
                let item = LayoutItem::new(format!("i{i}"), x, y, w, h);
                if roll == 0 { item.pinned() } else { item }
            })
            .collect()
    })
}

const MODES: [CompactType; 3] = [CompactType::Vertical, CompactType::Horizontal, CompactType::None];

/// Overlapping pairs, ignoring pairs of statics (callers place those).
fn overlapping_pairs(layout: &[LayoutItem]) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (i, a) in layout.iter().enumerate() {
        for b in &layout[i + 1..] {
            if !(a.is_static && b.is_static) && collides(a, b) {
                pairs.push((a.id.clone(), b.id.clone()));
            }
        }
    }
    pairs
}

fn statics(layout: &[LayoutItem]) -> Vec<(String, GridRect)> {
    layout
        .iter()
        .filter(|item| item.is_static)
        .map(|item| (item.id.clone(), item.rect()))
        .collect()
}

proptest! {
    #[test]
    fn vertical_compaction_leaves_no_overlap(layout in layout_strategy()) {
        let out = compact(&layout, CompactType::Vertical, COLS);
        prop_assert_eq!(out.len(), layout.len());
        prop_assert!(overlapping_pairs(&out).is_empty(), "overlaps: {:?}", overlapping_pairs(&out));
        prop_assert!(out.iter().all(|item| !item.moved));
    }

    #[test]
    fn vertical_compaction_is_idempotent(layout in layout_strategy()) {
        let once = compact(&layout, CompactType::Vertical, COLS);
        let twice = compact(&once, CompactType::Vertical, COLS);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn every_mode_compacts_without_overlap(layout in pinned_layout_strategy()) {
        for compact_type in MODES {
            let out = compact(&layout, compact_type, COLS);
            prop_assert!(
                overlapping_pairs(&out).is_empty(),
                "{:?} overlaps: {:?}",
                compact_type,
                overlapping_pairs(&out)
            );
            prop_assert_eq!(statics(&out), statics(&layout));
        }
    }

    #[test]
    fn every_mode_compacts_idempotently(layout in pinned_layout_strategy()) {
        for compact_type in MODES {
            let once = compact(&layout, compact_type, COLS);
            let twice = compact(&once, compact_type, COLS);
            prop_assert_eq!(once, twice, "{:?}", compact_type);
        }
    }

    #[test]
    fn every_mode_moves_then_compacts_without_overlap(
        layout in pinned_layout_strategy(),
        pick in any::<prop::sample::Index>(),
        x in 0..COLS,
        y in 0..10i32,
        user_action in any::<bool>(),
    ) {
        let id = layout[pick.index(layout.len())].id.clone();
        for compact_type in MODES {
            let options = MoveOptions::new(compact_type).user_action(user_action);
            let moved = move_element(layout.clone(), &id, GridTarget::position(x, y), options)
                .expect("id drawn from layout");
            let out = compact(&moved, compact_type, COLS);
            prop_assert!(
                overlapping_pairs(&out).is_empty(),
                "{:?} overlaps: {:?}",
                compact_type,
                overlapping_pairs(&out)
            );
        }
    }

    #[test]
    fn compaction_keeps_ids_in_input_order(layout in layout_strategy()) {
        for compact_type in MODES {
            let out = compact(&layout, compact_type, COLS);
            let ids: Vec<&str> = out.iter().map(|item| item.id.as_str()).collect();
            let expected: Vec<&str> = layout.iter().map(|item| item.id.as_str()).collect();
            prop_assert_eq!(ids, expected);
        }
    }

    #[test]
    fn move_then_compact_leaves_no_overlap(
        layout in layout_strategy(),
        pick in any::<prop::sample::Index>(),
        x in 0..COLS,
        y in 0..10i32,
        user_action in any::<bool>(),
    ) {
        let id = layout[pick.index(layout.len())].id.clone();
        let options = MoveOptions::new(CompactType::Vertical).user_action(user_action);
        let moved = move_element(layout.clone(), &id, GridTarget::position(x, y), options)
            .expect("id drawn from layout");
        let out = compact(&moved, CompactType::Vertical, COLS);
        prop_assert!(overlapping_pairs(&out).is_empty(), "overlaps: {:?}", overlapping_pairs(&out));
    }

    #[test]
    fn statics_never_move(
        layout in pinned_layout_strategy(),
        pick in any::<prop::sample::Index>(),
        x in 0..COLS,
        y in 0..10i32,
    ) {
        let before = statics(&layout);
        let id = layout[pick.index(layout.len())].id.clone();
        for compact_type in MODES {
            let moved = move_element(
                layout.clone(),
                &id,
                GridTarget::position(x, y),
                MoveOptions::new(compact_type),
            )
            .expect("id drawn from layout");
            prop_assert_eq!(&statics(&moved), &before);
            prop_assert_eq!(&statics(&compact(&moved, compact_type, COLS)), &before);
        }
    }

    #[test]
    fn prevented_collision_returns_input(
        layout in layout_strategy(),
        pick in any::<prop::sample::Index>(),
        x in 0..COLS,
        y in 0..10i32,
    ) {
        let index = pick.index(layout.len());
        let subject = &layout[index];
        prop_assume!(subject.is_movable());
        let landing = GridRect::new(x, y, subject.w, subject.h);
        prop_assume!(layout
            .iter()
            .any(|other| other.id != subject.id && landing.overlaps(&other.rect())));

        let id = subject.id.clone();
        let options = MoveOptions::new(CompactType::Vertical).prevent_collision(true);
        let out = move_element(layout.clone(), &id, GridTarget::position(x, y), options)
            .expect("id drawn from layout");
        prop_assert_eq!(out, layout);
    }

    #[test]
    fn correct_bounds_fits_every_item(
        rects in prop::collection::vec((-4..10i32, 0..6i32, 1..12i32, 1..3i32), 0..8),
    ) {
        let mut layout: Layout = rects
            .into_iter()
            .enumerate()
            .map(|(i, (x, y, w, h))| LayoutItem::new(format!("i{i}"), x, y, w, h))
            .collect();
        correct_bounds(&mut layout, COLS);
        for item in &layout {
            prop_assert!(item.x >= 0, "{item:?}");
            prop_assert!(item.x + item.w <= COLS, "{item:?}");
        }
    }

    #[test]
    fn batch_move_then_compact_leaves_no_overlap(
        layout in layout_strategy(),
        dx in -2..=2i32,
        dy in -2..=2i32,
    ) {
        let targets: Vec<MoveTarget> = layout
            .iter()
            .take(2)
            .filter(|item| !item.is_static)
            .map(|item| {
                MoveTarget::new(
                    item.id.clone(),
                    (item.x + dx).clamp(0, COLS - item.w),
                    (item.y + dy).max(0),
                )
            })
            .collect();
        prop_assume!(!targets.is_empty());
        let moved = move_multiple_elements(layout, &targets, true, CompactType::Vertical)
            .expect("ids drawn from layout");
        let out = compact(&moved, CompactType::Vertical, COLS);
        prop_assert!(overlapping_pairs(&out).is_empty(), "overlaps: {:?}", overlapping_pairs(&out));
    }
}
