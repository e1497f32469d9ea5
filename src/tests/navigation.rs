use super::{columns, ACTIVITY, DESKTOP};
use crate::tile::{Direction, Step};
use crate::tilemap::{Slot, TileMap};

#[test]
fn sibling_walks_up_past_rejected_candidates() {
    let f = columns();

    // Moving left from the right half of c2a: its direct sibling c2a1 is
    // rejected, horizontal candidates resume at the root level.
    assert_eq!(
        f.tree
            .sibling_in_direction(f.c2a2, Direction::Left, |t| t != f.c2a1),
        Some(f.c1)
    );
}

#[test]
fn sibling_follows_the_vertical_axis() {
    let f = columns();

    // Nothing lies above c2a1: its parent is horizontal and c2a is the
    // first child of the vertical c2.
    assert_eq!(
        f.tree.sibling_in_direction(f.c2a1, Direction::Up, |_| true),
        None
    );
    assert_eq!(
        f.tree.sibling_in_direction(f.c2a1, Direction::Down, |_| true),
        Some(f.c2b)
    );
}

#[test]
fn child_descends_to_the_structural_edge() {
    let f = columns();

    // The bottommost leaf of c2 is its second child.
    assert_eq!(
        f.tree.child_in_direction(f.c2, Direction::Down, |t| {
            if f.tree.children(t).is_empty() {
                Step::Accept
            } else {
                Step::Descend
            }
        }),
        Some(f.c2b)
    );
}

#[test]
fn child_descent_sees_windows_left_to_right() {
    let f = columns();
    let mut map = TileMap::new();

    for (tile, window) in [
        (f.c0a, "w_a"),
        (f.c0b, "w_b"),
        (f.c1, "w_c"),
        (f.c2a1, "w_d"),
        (f.c2a2, "w_e"),
        (f.c2b, "w_f"),
        (f.c3, "w_g"),
    ] {
        assert!(map.try_add_window(&f.tree, ACTIVITY, DESKTOP, tile, window));
    }

    // A validator that never accepts sees every tile; the windows appear
    // left to right, top to bottom.
    let mut seen = Vec::new();
    let hit = f.tree.child_in_direction(f.root, Direction::Left, |t| {
        if let Some(Slot::Window(w)) = map.get(ACTIVITY, DESKTOP, t) {
            seen.push(*w);
        }
        Step::Descend
    });
    assert_eq!(hit, None);
    assert_eq!(seen, vec!["w_a", "w_b", "w_c", "w_d", "w_e", "w_f", "w_g"]);
}

#[test]
fn directions_are_symmetric_between_neighbors() {
    let f = columns();

    let anywhere = |_| true;
    // Neighboring columns recover each other with the opposite direction.
    assert_eq!(
        f.tree.sibling_in_direction(f.c1, Direction::Right, anywhere),
        Some(f.c2)
    );
    assert_eq!(
        f.tree.sibling_in_direction(f.c2, Direction::Left, anywhere),
        Some(f.c1)
    );

    // The same holds when the neighbor was reached from a nested start:
    // going right from inside c1's left neighbor lands on c1, and from c1
    // the left walk returns to that neighbor's subtree root.
    assert_eq!(
        f.tree.sibling_in_direction(f.c0b, Direction::Right, anywhere),
        Some(f.c1)
    );
    assert_eq!(
        f.tree.sibling_in_direction(f.c1, Direction::Left, anywhere),
        Some(f.c0)
    );

    assert_eq!(
        f.tree.sibling_in_direction(f.c0a, Direction::Down, anywhere),
        Some(f.c0b)
    );
    assert_eq!(
        f.tree.sibling_in_direction(f.c0b, Direction::Up, anywhere),
        Some(f.c0a)
    );
}
