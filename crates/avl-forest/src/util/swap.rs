use crate::types::Node;

use super::{get_l, get_p, get_r, set_l, set_p, set_r};

#[derive(Clone, Copy)]
enum Slot {
    Root,
    Left(u32),
    Right(u32),
}

fn slot_of<N: Node>(arena: &[N], node: u32) -> Slot {
    match get_p(arena, node) {
        None => Slot::Root,
        Some(p) if get_l(arena, p) == Some(node) => Slot::Left(p),
        Some(p) => Slot::Right(p),
    }
}

/// Exchanges the tree positions of `x` and `y`.
///
/// Only the structural links move: each node keeps its own payload and ends
/// up where the other one was. Handles the parent/child and sibling cases.
/// Returns the new root.
pub fn swap<N: Node>(arena: &mut [N], root: Option<u32>, x: u32, y: u32) -> Option<u32> {
    if x == y {
        return root;
    }

    // A link to the other node turns into a link to the node itself.
    let flip = |v: Option<u32>| match v {
        Some(i) if i == x => Some(y),
        Some(i) if i == y => Some(x),
        other => other,
    };

    let x_slot = slot_of(arena, x);
    let y_slot = slot_of(arena, y);
    let (xp, xl, xr) = (get_p(arena, x), get_l(arena, x), get_r(arena, x));
    let (yp, yl, yr) = (get_p(arena, y), get_l(arena, y), get_r(arena, y));

    set_p(arena, x, flip(yp));
    set_l(arena, x, flip(yl));
    set_r(arena, x, flip(yr));
    set_p(arena, y, flip(xp));
    set_l(arena, y, flip(xl));
    set_r(arena, y, flip(xr));

    let mut root = root;
    // Parents outside the pair hand their child slot over; links between
    // the pair were already fixed by `flip`.
    for (node, slot) in [(y, x_slot), (x, y_slot)] {
        match slot {
            Slot::Root => root = Some(node),
            Slot::Left(p) if p != x && p != y => set_l(arena, p, Some(node)),
            Slot::Right(p) if p != x && p != y => set_r(arena, p, Some(node)),
            _ => {}
        }
    }

    for node in [x, y] {
        if let Some(l) = get_l(arena, node) {
            set_p(arena, l, Some(node));
        }
        if let Some(r) = get_r(arena, node) {
            set_p(arena, r, Some(node));
        }
    }

    root
}
