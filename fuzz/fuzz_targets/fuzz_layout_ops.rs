#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera_layout::{
    CompactType, GridRect, GridTarget, Layout, LayoutItem, MoveOptions, MoveTarget, collides,
    compact, correct_bounds, move_element, move_multiple_elements,
};

#[derive(Debug, Arbitrary)]
struct Seed {
    x: u8,
    y: u8,
    w: u8,
    h: u8,
    pinned: bool,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Move {
        pick: u8,
        x: u8,
        y: u8,
        user_action: bool,
        prevent_collision: bool,
    },
    Resize {
        pick: u8,
        w: u8,
        h: u8,
    },
    Batch {
        first: u8,
        second: u8,
        dx: i8,
        dy: i8,
    },
    Compact,
}

#[derive(Debug, Arbitrary)]
struct Input {
    cols: u8,
    mode: u8,
    seeds: Vec<Seed>,
    ops: Vec<Op>,
}

fn statics(layout: &[LayoutItem]) -> Vec<(String, GridRect)> {
    layout
        .iter()
        .filter(|item| item.is_static)
        .map(|item| (item.id.clone(), item.rect()))
        .collect()
}

fuzz_target!(|input: Input| {
    // 1..=16 columns, up to 24 items and 32 operations keep each run short.
    let cols = i32::from(input.cols % 16) + 1;
    let compact_type = match input.mode % 3 {
        0 => CompactType::Vertical,
        1 => CompactType::Horizontal,
        _ => CompactType::None,
    };
    let mut layout: Layout = input
        .seeds
        .iter()
        .take(24)
        .enumerate()
        .map(|(i, seed)| {
            let w = i32::from(seed.w) % cols + 1;
            let h = i32::from(seed.h % 4) + 1;
            let x = i32::from(seed.x) % (cols - w + 1);
            let y = i32::from(seed.y % 32);
            let item = LayoutItem::new(format!("i{i}"), x, y, w, h);
            if seed.pinned { item.pinned() } else { item }
        })
        .collect();
    if layout.is_empty() {
        return;
    }
    correct_bounds(&mut layout, cols);
    let pinned = statics(&layout);
    let len = layout.len();

    for op in input.ops.iter().take(32) {
        layout = match *op {
            Op::Move {
                pick,
                x,
                y,
                user_action,
                prevent_collision,
            } => {
                let id = layout[usize::from(pick) % len].id.clone();
                let options = MoveOptions::new(compact_type)
                    .user_action(user_action)
                    .prevent_collision(prevent_collision);
                let target = GridTarget::position(i32::from(x) % cols, i32::from(y % 32));
                move_element(layout, &id, target, options).expect("id drawn from layout")
            }
            Op::Resize { pick, w, h } => {
                let id = layout[usize::from(pick) % len].id.clone();
                let target = GridTarget::size(i32::from(w) % cols + 1, i32::from(h % 4) + 1);
                let options = MoveOptions::new(compact_type).user_action(false);
                move_element(layout, &id, target, options).expect("id drawn from layout")
            }
            Op::Batch {
                first,
                second,
                dx,
                dy,
            } => {
                let targets: Vec<MoveTarget> = [first, second]
                    .iter()
                    .map(|&pick| &layout[usize::from(pick) % len])
                    .map(|item| {
                        MoveTarget::new(
                            item.id.clone(),
                            (item.x + i32::from(dx % 4)).clamp(0, (cols - item.w).max(0)),
                            (item.y + i32::from(dy % 4)).max(0),
                        )
                    })
                    .collect();
                move_multiple_elements(layout, &targets, true, compact_type)
                    .expect("ids drawn from layout")
            }
            Op::Compact => compact(&layout, compact_type, cols),
        };

        assert_eq!(layout.len(), len, "items appeared or vanished");
    }

    assert_eq!(statics(&layout), pinned, "a static item moved");

    let settled = compact(&layout, CompactType::Vertical, cols);
    for (i, a) in settled.iter().enumerate() {
        for b in &settled[i + 1..] {
            if a.is_static && b.is_static {
                continue;
            }
            assert!(!collides(a, b), "overlap after compaction: {a:?} / {b:?}");
        }
    }
});
