//! Arena-backed tile tree and directional navigation.
//!
//! Tiles form an n-ary tree where every node carries a layout direction:
//! `Horizontal` nodes order their children left to right, `Vertical` nodes
//! top to bottom. The tree records structure only; screen geometry is the
//! host's concern. Nodes are stored in a [`SlotMap`] and referenced by
//! [`TileId`], so parent links cannot form ownership cycles and both
//! traversal directions are O(1).
//!
//! The navigation methods answer "what is next to this tile in a given
//! direction" purely from structure, independent of window occupancy:
//! [`TileTree::sibling_in_direction`] walks up to the nearest ancestor whose
//! layout matches the direction's axis and picks a sibling past the current
//! branch, and [`TileTree::child_in_direction`] descends into a subtree
//! toward the side the direction points from.

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key referencing a node in a [`TileTree`].
    pub struct TileId;
}

/// How a tile arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Children are unordered free-floating regions.
    Floating,
    /// Children are ordered left to right.
    Horizontal,
    /// Children are ordered top to bottom.
    Vertical,
}

/// Direction for navigation and movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// The layout axis along which this direction moves.
    pub fn layout_direction(self) -> LayoutDirection {
        match self {
            Direction::Up | Direction::Down => LayoutDirection::Vertical,
            Direction::Left | Direction::Right => LayoutDirection::Horizontal,
        }
    }
}

/// Verdict returned by the validator during a directional descent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Stop and return the current tile.
    Accept,
    /// Prune the current tile and its whole subtree.
    Skip,
    /// Keep descending into the children.
    Descend,
}

#[derive(Debug)]
struct TileData {
    parent: Option<TileId>,
    children: Vec<TileId>,
    layout: LayoutDirection,
}

/// The tile tree. Built by the host; read-only for the occupancy layer.
#[derive(Debug, Default)]
pub struct TileTree {
    nodes: SlotMap<TileId, TileData>,
}

impl TileTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parentless tile, e.g. the tiling root of one screen. A tree
    /// may hold several roots.
    pub fn add_root(&mut self, layout: LayoutDirection) -> TileId {
        self.nodes.insert(TileData {
            parent: None,
            children: Vec::new(),
            layout,
        })
    }

    /// Adds a tile as the last child of `parent`.
    ///
    /// Panics if `parent` is not in the tree.
    pub fn add_child(&mut self, parent: TileId, layout: LayoutDirection) -> TileId {
        let child = self.nodes.insert(TileData {
            parent: Some(parent),
            children: Vec::new(),
            layout,
        });
        self.nodes[parent].children.push(child);
        child
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.nodes.contains_key(tile)
    }

    pub fn parent(&self, tile: TileId) -> Option<TileId> {
        self.nodes.get(tile)?.parent
    }

    pub fn children(&self, tile: TileId) -> &[TileId] {
        self.nodes.get(tile).map_or(&[], |data| &data.children)
    }

    pub fn layout(&self, tile: TileId) -> Option<LayoutDirection> {
        Some(self.nodes.get(tile)?.layout)
    }

    pub fn set_layout(&mut self, tile: TileId, layout: LayoutDirection) -> bool {
        match self.nodes.get_mut(tile) {
            Some(data) => {
                data.layout = layout;
                true
            }
            None => false,
        }
    }

    /// Finds a sibling of `start` (or of one of its ancestors) that is
    /// guaranteed to lie in `direction`.
    ///
    /// Walks upward from `start`. Ancestors whose layout does not match the
    /// direction's axis are stepped over. At a matching ancestor the
    /// siblings past the current branch are scanned nearest-first and the
    /// first one `accept`ed is returned. Returns `None` once the walk falls
    /// off the root.
    pub fn sibling_in_direction<F>(
        &self,
        start: TileId,
        direction: Direction,
        mut accept: F,
    ) -> Option<TileId>
    where
        F: FnMut(TileId) -> bool,
    {
        let axis = direction.layout_direction();
        let mut cur = start;
        let mut parent = self.parent(cur);
        while let Some(p) = parent {
            let data = &self.nodes[p];
            if data.layout == axis {
                let idx = data.children.iter().position(|&c| c == cur)?;
                match direction {
                    Direction::Left | Direction::Up => {
                        for &sibling in data.children[..idx].iter().rev() {
                            if accept(sibling) {
                                return Some(sibling);
                            }
                        }
                    }
                    Direction::Right | Direction::Down => {
                        for &sibling in &data.children[idx + 1..] {
                            if accept(sibling) {
                                return Some(sibling);
                            }
                        }
                    }
                }
            }
            cur = p;
            parent = data.parent;
        }
        None
    }

    /// Finds `start` itself or the descendant of `start` nearest the side
    /// `direction` points from, as judged by `validate`.
    ///
    /// [`Step::Accept`] stops at the current tile, [`Step::Skip`] prunes its
    /// subtree, and [`Step::Descend`] recurses into the children: in stored
    /// order for `Left`/`Up` (toward the first child), reversed for
    /// `Right`/`Down` (toward the last).
    pub fn child_in_direction<F>(
        &self,
        start: TileId,
        direction: Direction,
        mut validate: F,
    ) -> Option<TileId>
    where
        F: FnMut(TileId) -> Step,
    {
        self.child_in_direction_inner(start, direction, &mut validate)
    }

    fn child_in_direction_inner<F>(
        &self,
        tile: TileId,
        direction: Direction,
        validate: &mut F,
    ) -> Option<TileId>
    where
        F: FnMut(TileId) -> Step,
    {
        match validate(tile) {
            Step::Accept => return Some(tile),
            Step::Skip => return None,
            Step::Descend => {}
        }

        let children = self.children(tile);
        match direction {
            Direction::Left | Direction::Up => {
                for &child in children {
                    if let Some(hit) = self.child_in_direction_inner(child, direction, validate) {
                        return Some(hit);
                    }
                }
            }
            Direction::Right | Direction::Down => {
                for &child in children.iter().rev() {
                    if let Some(hit) = self.child_in_direction_inner(child, direction, validate) {
                        return Some(hit);
                    }
                }
            }
        }
        None
    }
}
