//! Per-partition window occupancy tracking over the tile tree.
//!
//! Every (activity, desktop) pair is an independent occupancy universe over
//! the same tree. A tile's slot is either a window placed directly there or
//! an aggregate summary of its occupied descendants; the two states are
//! mutually exclusive, and ancestor summaries are kept consistent within
//! every mutating call.
//!
//! All operations are total: an insertion or deletion that would violate an
//! invariant reports `false` and leaves the map untouched.

use std::ops::ControlFlow;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::multimap::TripleMap;
use crate::tile::{LayoutDirection, TileId, TileTree};

/// What occupies a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot<W> {
    /// A window placed directly at this tile.
    Window(W),
    /// Aggregate over the occupied descendants: whether the subtree has any
    /// capacity left, and how many windows it holds.
    Node { full: bool, count: usize },
}

impl<W> Slot<W> {
    pub fn is_window(&self) -> bool {
        matches!(self, Slot::Window(_))
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Slot::Node { .. })
    }

    pub fn window(&self) -> Option<&W> {
        match self {
            Slot::Window(window) => Some(window),
            Slot::Node { .. } => None,
        }
    }
}

/// Serializable view of one occupied subtree, for IPC-style introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyNode<W> {
    pub layout: LayoutDirection,
    pub slot: Option<Slot<W>>,
    pub children: Vec<OccupancyNode<W>>,
}

/// Occupancy map keyed by (activity, desktop, tile).
#[derive(Debug, Clone)]
pub struct TileMap<W> {
    inner: TripleMap<String, i32, TileId, Slot<W>>,
}

impl<W> Default for TileMap<W> {
    fn default() -> Self {
        Self {
            inner: TripleMap::default(),
        }
    }
}

impl<W: Clone + PartialEq> TileMap<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, activity: &str, desktop: i32, tile: TileId) -> Option<&Slot<W>> {
        self.inner.get(activity, &desktop, &tile)
    }

    /// Places `window` directly at `tile`; returns whether it is now there.
    ///
    /// Succeeds without mutation if the exact window already occupies the
    /// tile. Fails, mutating nothing, if the tile holds anything else or if
    /// any ancestor holds a window of its own. On success every ancestor's
    /// aggregate is updated: a previously empty ancestor starts at
    /// `{ full: false, count: 1 }`, an existing one has its count bumped and
    /// its fullness recomputed from its immediate children.
    pub fn try_add_window(
        &mut self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        tile: TileId,
        window: W,
    ) -> bool {
        match self.get(activity, desktop, tile) {
            Some(Slot::Window(occupant)) if *occupant == window => return true,
            Some(_) => {
                trace!("tile already occupied, not adding");
                return false;
            }
            None => {}
        }

        // The whole ancestor chain must be free of directly-placed windows
        // before anything is written.
        let mut ancestors = Vec::new();
        let mut cur = tree.parent(tile);
        while let Some(parent) = cur {
            if matches!(self.get(activity, desktop, parent), Some(Slot::Window(_))) {
                trace!("ancestor tile holds a window, not adding");
                return false;
            }
            ancestors.push(parent);
            cur = tree.parent(parent);
        }

        self.inner
            .set(activity.to_owned(), desktop, tile, Slot::Window(window));
        for parent in ancestors {
            let slot = match self.get(activity, desktop, parent) {
                None => Slot::Node {
                    full: false,
                    count: 1,
                },
                Some(Slot::Node { count, .. }) => {
                    let count = *count;
                    Slot::Node {
                        full: self.children_full(tree, activity, desktop, parent),
                        count: count + 1,
                    }
                }
                // Ruled out by the pre-scan above.
                Some(Slot::Window(_)) => {
                    debug_assert!(false, "occupied ancestor survived the pre-scan");
                    break;
                }
            };
            self.inner.set(activity.to_owned(), desktop, parent, slot);
        }

        true
    }

    /// Whether every immediate child of `tile` is at capacity: a full
    /// aggregate, or a window on a tile with no further children. An empty
    /// child, a non-full aggregate, or a window that still has child tiles
    /// all leave room.
    fn children_full(&self, tree: &TileTree, activity: &str, desktop: i32, tile: TileId) -> bool {
        for &child in tree.children(tile) {
            let child_full = match self.get(activity, desktop, child) {
                None => false,
                Some(Slot::Node { full, .. }) => *full,
                Some(Slot::Window(_)) => tree.children(child).is_empty(),
            };
            if !child_full {
                return false;
            }
        }
        true
    }

    /// Removes the window at `tile`; returns whether the tile is now empty.
    ///
    /// An already-empty tile is a no-op success. An aggregate cannot be
    /// deleted directly and fails. Ancestor counts are decremented on the
    /// way up; an ancestor that drops to zero windows is pruned entirely.
    pub fn try_del_window(
        &mut self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        tile: TileId,
    ) -> bool {
        match self.get(activity, desktop, tile) {
            None => return true,
            Some(Slot::Node { .. }) => {
                trace!("cannot delete an aggregate node");
                return false;
            }
            Some(Slot::Window(_)) => {}
        }

        self.inner.remove(activity, &desktop, &tile);
        let mut cur = tree.parent(tile);
        while let Some(parent) = cur {
            let count = match self.get(activity, desktop, parent) {
                Some(Slot::Node { count, .. }) => *count,
                _ => {
                    debug_assert!(false, "ancestor of a window must be an aggregate");
                    break;
                }
            };
            if count == 1 {
                self.inner.remove(activity, &desktop, &parent);
            } else {
                // Removing a window always frees capacity somewhere below.
                self.inner.set(
                    activity.to_owned(),
                    desktop,
                    parent,
                    Slot::Node {
                        full: false,
                        count: count - 1,
                    },
                );
            }
            cur = tree.parent(parent);
        }

        true
    }

    /// Visits every window under `root` depth-first, in stored child order.
    /// The visitor stops the walk by returning `Break`.
    pub fn for_each<F>(
        &self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        root: TileId,
        mut f: F,
    ) -> ControlFlow<()>
    where
        F: FnMut(TileId, &W) -> ControlFlow<()>,
    {
        self.for_each_inner(tree, activity, desktop, root, &mut f)
    }

    fn for_each_inner<F>(
        &self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        tile: TileId,
        f: &mut F,
    ) -> ControlFlow<()>
    where
        F: FnMut(TileId, &W) -> ControlFlow<()>,
    {
        match self.get(activity, desktop, tile) {
            None => ControlFlow::Continue(()),
            Some(Slot::Window(window)) => f(tile, window),
            Some(Slot::Node { .. }) => {
                for &child in tree.children(tile) {
                    self.for_each_inner(tree, activity, desktop, child, f)?;
                }
                ControlFlow::Continue(())
            }
        }
    }

    /// Packs `window` into the emptiest spot at or below `tile`; returns
    /// whether it was placed. `on_placed` is invoked for every placement
    /// performed, including the relocation of an existing occupant when a
    /// leaf is split.
    ///
    /// The search prefers an entirely empty child, then the non-full child
    /// with the fewest windows (a window sitting on a tile that still has
    /// child tiles counts as one, since it can be split); ties go to the
    /// earliest child. A window reached directly is split into its tile's
    /// first two children when there are at least two.
    pub fn try_tile_window<F>(
        &mut self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        tile: TileId,
        window: W,
        mut on_placed: F,
    ) -> bool
    where
        F: FnMut(&W, TileId),
    {
        self.try_tile_inner(tree, activity, desktop, tile, window, &mut on_placed)
    }

    fn try_tile_inner<F>(
        &mut self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        tile: TileId,
        window: W,
        on_placed: &mut F,
    ) -> bool
    where
        F: FnMut(&W, TileId),
    {
        match self.get(activity, desktop, tile).cloned() {
            None => {
                if self.try_add_window(tree, activity, desktop, tile, window.clone()) {
                    on_placed(&window, tile);
                    true
                } else {
                    false
                }
            }
            Some(Slot::Node { full: true, .. }) => false,
            Some(Slot::Node { .. }) => {
                let children = tree.children(tile);
                let mut best: Option<(usize, usize)> = None;
                for (idx, &child) in children.iter().enumerate() {
                    match self.get(activity, desktop, child) {
                        // An empty child wins outright.
                        None => {
                            return self
                                .try_tile_inner(tree, activity, desktop, child, window, on_placed);
                        }
                        Some(Slot::Node { full: false, count }) => {
                            let count = *count;
                            if best.map_or(true, |(min, _)| min > count) {
                                best = Some((count, idx));
                            }
                        }
                        Some(Slot::Node { full: true, .. }) => {}
                        Some(Slot::Window(_)) => {
                            // Splittable occupant, implicit count of one.
                            if best.map_or(true, |(min, _)| min > 1)
                                && !tree.children(child).is_empty()
                            {
                                best = Some((1, idx));
                            }
                        }
                    }
                }
                match best {
                    Some((_, idx)) => {
                        self.try_tile_inner(tree, activity, desktop, children[idx], window, on_placed)
                    }
                    None => false,
                }
            }
            Some(Slot::Window(occupant)) => {
                let children = tree.children(tile);
                if children.len() < 2 {
                    trace!("occupied tile has no room to split");
                    return false;
                }
                let (first, second) = (children[0], children[1]);
                self.try_del_window(tree, activity, desktop, tile);
                self.try_add_window(tree, activity, desktop, first, occupant.clone());
                self.try_add_window(tree, activity, desktop, second, window.clone());
                on_placed(&occupant, first);
                on_placed(&window, second);
                true
            }
        }
    }

    /// Builds a serializable snapshot of the occupancy under `root`. The
    /// children of a tile are included only while the subtree is occupied.
    pub fn occupancy_tree(
        &self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        root: TileId,
    ) -> OccupancyNode<W> {
        let slot = self.get(activity, desktop, root).cloned();
        let children = match slot {
            Some(Slot::Node { .. }) => tree
                .children(root)
                .iter()
                .map(|&child| self.occupancy_tree(tree, activity, desktop, child))
                .collect(),
            _ => Vec::new(),
        };
        OccupancyNode {
            layout: tree.layout(root).unwrap_or(LayoutDirection::Floating),
            slot,
            children,
        }
    }
}

impl<W: Clone + PartialEq + std::fmt::Debug> TileMap<W> {
    /// Indented text dump of the occupancy under `root`, for snapshots.
    #[cfg(test)]
    pub(crate) fn debug_tree(
        &self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        root: TileId,
    ) -> String {
        let mut out = String::new();
        self.debug_tree_node(tree, activity, desktop, root, 0, &mut out);
        out
    }

    #[cfg(test)]
    fn debug_tree_node(
        &self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        tile: TileId,
        depth: usize,
        out: &mut String,
    ) {
        use std::fmt::Write as _;

        let indent = "  ".repeat(depth);
        let layout = match tree.layout(tile) {
            Some(LayoutDirection::Floating) => "floating",
            Some(LayoutDirection::Horizontal) => "horizontal",
            Some(LayoutDirection::Vertical) => "vertical",
            None => "missing",
        };
        match self.get(activity, desktop, tile) {
            None => {
                let _ = writeln!(out, "{indent}{layout} (empty)");
            }
            Some(Slot::Window(window)) => {
                let _ = writeln!(out, "{indent}{layout} window {window:?}");
            }
            Some(Slot::Node { full, count }) => {
                let _ = writeln!(out, "{indent}{layout} node full={full} count={count}");
                for &child in tree.children(tile) {
                    self.debug_tree_node(tree, activity, desktop, child, depth + 1, out);
                }
            }
        }
    }
}
