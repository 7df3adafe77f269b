//! End-to-end scenarios against the public API.
//!
//! Layouts enter as JSON the way a UI layer would send them, go through
//! validation, and the results are checked item by item.

use serde_json::json;
use tessera_layout::{
    CompactType, DraggingData, GridConfig, GridInteraction, GridRect, GridTarget, LayoutChange,
    LayoutItem, MoveOptions, MoveTarget, PixelPoint, PixelRect, RowHeight, compact,
    compute_drag_result, diff, get_layout_item, layout_to_render_data, move_element,
    move_multiple_elements, validate_layout,
};

fn rect_of(layout: &[LayoutItem], id: &str) -> GridRect {
    get_layout_item(layout, id)
        .map(LayoutItem::rect)
        .unwrap_or_else(|| panic!("missing item {id}"))
}

#[test]
fn vertical_compaction_removes_gap() {
    let layout = validate_layout(&json!([{ "id": "1", "x": 0, "y": 1, "w": 1, "h": 1 }]))
        .expect("valid layout");
    let out = compact(&layout, CompactType::Vertical, 10);
    let json = serde_json::to_value(&out).expect("serializable");
    assert_eq!(
        json,
        json!([{ "id": "1", "x": 0, "y": 0, "w": 1, "h": 1, "moved": false, "static": false }])
    );
}

#[test]
fn vertical_compaction_cascades_collision() {
    let layout = validate_layout(&json!([
        { "x": 0, "y": 0, "w": 1, "h": 5, "id": "1" },
        { "x": 0, "y": 1, "w": 1, "h": 1, "id": "2" },
    ]))
    .expect("valid layout");
    let out = compact(&layout, CompactType::Vertical, 10);
    assert_eq!(rect_of(&out, "1"), GridRect::new(0, 0, 1, 5));
    assert_eq!(rect_of(&out, "2"), GridRect::new(0, 5, 1, 1));
}

#[test]
fn move_swaps_under_vertical_compaction() {
    let layout = vec![LayoutItem::new("1", 0, 0, 1, 1), LayoutItem::new("2", 1, 0, 1, 1)];
    let out = move_element(
        layout,
        "1",
        GridTarget::position(1, 0),
        MoveOptions::new(CompactType::Vertical),
    )
    .expect("item exists");
    assert_eq!(rect_of(&out, "1"), GridRect::new(1, 0, 1, 1));
    assert_eq!(rect_of(&out, "2"), GridRect::new(1, 1, 1, 1));
    assert!(out.iter().all(|item| item.moved));
}

#[test]
fn diff_reports_combined_changes() {
    let before = [LayoutItem::new("1", 1, 0, 1, 1)];
    let resized = diff(&before, &[LayoutItem::new("1", 1, 0, 3, 1)]);
    assert_eq!(resized["1"].change, LayoutChange::Resize);
    let both = diff(&before, &[LayoutItem::new("1", 2, 0, 3, 1)]);
    assert_eq!(both["1"].change, LayoutChange::MoveResize);
}

#[test]
fn horizontal_overflow_wraps_and_slides_left() {
    let layout = vec![
        LayoutItem::new("s", 2, 0, 2, 1).pinned(),
        LayoutItem::new("a", 1, 0, 3, 1),
    ];
    let out = compact(&layout, CompactType::Horizontal, 4);
    assert_eq!(rect_of(&out, "s"), GridRect::new(2, 0, 2, 1));
    assert_eq!(rect_of(&out, "a"), GridRect::new(0, 1, 3, 1));
}

#[test]
fn prevent_collision_against_static_is_total() {
    let layout = vec![
        LayoutItem::new("a", 0, 0, 1, 1),
        LayoutItem::new("b", 0, 1, 1, 1),
        LayoutItem::new("s", 1, 0, 1, 2).pinned(),
    ];
    let out = move_element(
        layout.clone(),
        "a",
        GridTarget::position(1, 1),
        MoveOptions::new(CompactType::Vertical).prevent_collision(true),
    )
    .expect("item exists");
    assert_eq!(out, layout);
}

#[test]
fn group_drag_keeps_members_together() {
    let layout = vec![
        LayoutItem::new("a", 0, 0, 1, 1),
        LayoutItem::new("b", 1, 0, 1, 1),
        LayoutItem::new("c", 0, 2, 2, 1),
    ];
    let moved = move_multiple_elements(
        layout,
        &[MoveTarget::new("a", 2, 0), MoveTarget::new("b", 3, 0)],
        true,
        CompactType::Vertical,
    )
    .expect("items exist");
    let out = compact(&moved, CompactType::Vertical, 4);
    assert_eq!(rect_of(&out, "a"), GridRect::new(2, 0, 1, 1));
    assert_eq!(rect_of(&out, "b"), GridRect::new(3, 0, 1, 1));
    assert_eq!(rect_of(&out, "c"), GridRect::new(0, 0, 2, 1));
}

#[test]
fn pointer_drag_round_trip_through_config() {
    let config: GridConfig = serde_json::from_value(json!({
        "cols": 4,
        "rowHeight": { "pixels": 50.0 },
        "gap": 0.0,
        "compactType": "vertical",
        "preventCollision": false,
        "layout": [
            { "id": "a", "x": 0, "y": 0, "w": 1, "h": 1 },
            { "id": "b", "x": 0, "y": 1, "w": 1, "h": 1 },
        ],
    }))
    .expect("config deserializes");
    assert_eq!(config.row_height, RowHeight::Pixels(50.0));

    // 100px columns; drag "a" two columns right while grabbed at its origin.
    let data = DraggingData {
        pointer_down: PixelPoint::new(0.0, 0.0),
        pointer_drag: PixelPoint::new(200.0, 0.0),
        grid_rect: PixelRect::new(0.0, 0.0, 400.0, 300.0),
        drag_elem_rect: PixelRect::new(0.0, 0.0, 100.0, 50.0),
        scroll_difference: PixelPoint::default(),
    };
    let result = compute_drag_result("a", &config, GridInteraction::Drag, &data)
        .expect("item exists");
    assert_eq!(rect_of(&result.layout, "a"), GridRect::new(2, 0, 1, 1));
    assert_eq!(rect_of(&result.layout, "b"), GridRect::new(0, 0, 1, 1));
    assert_eq!(result.dragged_item_rect, PixelRect::new(0.0, 200.0, 100.0, 50.0));

    let changes = diff(&config.layout, &result.layout);
    assert_eq!(changes["a"].change, LayoutChange::Move);
    assert_eq!(changes["b"].change, LayoutChange::Move);

    let pixels = layout_to_render_data(&config.clone().with_layout(result.layout), 400.0, 300.0);
    assert_eq!(pixels["a"], PixelRect::new(0.0, 200.0, 100.0, 50.0));
}
