//! Crate-level tests sharing a common tile-tree fixture.

mod navigation;

use crate::tile::{LayoutDirection, TileId, TileTree};

pub(crate) const ACTIVITY: &str = "main";
pub(crate) const DESKTOP: i32 = 0;
pub(crate) const SCREEN: usize = 0;

/// Four-column fixture:
///
/// ```text
/// root (H)
/// ├── c0 (V)
/// │   ├── c0a (V)
/// │   └── c0b (V)
/// ├── c1 (V)
/// ├── c2 (V)
/// │   ├── c2a (H)
/// │   │   ├── c2a1 (H)
/// │   │   └── c2a2 (H)
/// │   └── c2b (V)
/// └── c3 (V)
/// ```
pub(crate) struct Columns {
    pub tree: TileTree,
    pub root: TileId,
    pub c0: TileId,
    pub c0a: TileId,
    pub c0b: TileId,
    pub c1: TileId,
    pub c2: TileId,
    pub c2a: TileId,
    pub c2a1: TileId,
    pub c2a2: TileId,
    pub c2b: TileId,
    pub c3: TileId,
}

pub(crate) fn columns() -> Columns {
    let mut tree = TileTree::new();
    let root = tree.add_root(LayoutDirection::Horizontal);
    let c0 = tree.add_child(root, LayoutDirection::Vertical);
    let c1 = tree.add_child(root, LayoutDirection::Vertical);
    let c2 = tree.add_child(root, LayoutDirection::Vertical);
    let c3 = tree.add_child(root, LayoutDirection::Vertical);
    let c0a = tree.add_child(c0, LayoutDirection::Vertical);
    let c0b = tree.add_child(c0, LayoutDirection::Vertical);
    let c2a = tree.add_child(c2, LayoutDirection::Horizontal);
    let c2b = tree.add_child(c2, LayoutDirection::Vertical);
    let c2a1 = tree.add_child(c2a, LayoutDirection::Horizontal);
    let c2a2 = tree.add_child(c2a, LayoutDirection::Horizontal);

    Columns {
        tree,
        root,
        c0,
        c0a,
        c0b,
        c1,
        c2,
        c2a,
        c2a1,
        c2a2,
        c2b,
        c3,
    }
}
