//! Orchestration over the occupancy map and the directional navigator.
//!
//! [`Autotile`] owns the per-partition occupancy bookkeeping and the pool of
//! untiled windows, and composes the two core pieces into the user-facing
//! moves: pack a window into the emptiest tile, swap a window with whatever
//! lies in a direction, pick the window to focus in a direction, and repack
//! a screen after something leaves.
//!
//! Everything host-specific stays outside: the host owns the tile tree,
//! delivers window identities, and applies the placements this engine
//! reports (via the `on_placed` callbacks and returned values).

use std::hash::Hash;
use std::ops::ControlFlow;

use tracing::debug;

use crate::multimap::TripleSet;
use crate::tile::{Direction, Step, TileId, TileTree};
use crate::tilemap::{Slot, TileMap};

/// Outcome of a successful [`Autotile::swap_in_direction`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap<W> {
    /// Tile the moving window now occupies.
    pub target: TileId,
    /// Window that occupied the target and was moved to the vacated tile.
    pub displaced: Option<W>,
}

/// The tiling engine: occupancy map plus the untiled-window pool.
#[derive(Debug, Clone)]
pub struct Autotile<W> {
    tile_map: TileMap<W>,
    // (activity, desktop, screen) -> windows not currently tiled there.
    untiled: TripleSet<String, i32, usize, W>,
}

impl<W> Default for Autotile<W> {
    fn default() -> Self {
        Self {
            tile_map: TileMap::default(),
            untiled: TripleSet::default(),
        }
    }
}

impl<W: Clone + Eq + Hash> Autotile<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile_map(&self) -> &TileMap<W> {
        &self.tile_map
    }

    /// Packs `window` under the screen's `root`. On success the window
    /// leaves the untiled pool; on failure it is parked there instead.
    pub fn tile_window<F>(
        &mut self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        screen: usize,
        root: TileId,
        window: W,
        on_placed: F,
    ) -> bool
    where
        F: FnMut(&W, TileId),
    {
        debug!("tiling window");
        if self
            .tile_map
            .try_tile_window(tree, activity, desktop, root, window.clone(), on_placed)
        {
            self.untiled.remove(activity, &desktop, &screen, &window);
            true
        } else {
            debug!("no room, parking window as untiled");
            self.untiled.insert(activity.to_owned(), desktop, screen, window);
            false
        }
    }

    /// Removes the window at `tile` from the map and parks it in the
    /// untiled pool. Fails only if the tile holds an aggregate.
    pub fn untile_window(
        &mut self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        screen: usize,
        tile: TileId,
        window: W,
    ) -> bool {
        debug!("untiling window");
        if !self.tile_map.try_del_window(tree, activity, desktop, tile) {
            return false;
        }
        self.untiled.insert(activity.to_owned(), desktop, screen, window);
        true
    }

    /// Moves `window` from `tile` onto the nearest tile in `direction`,
    /// swapping places with the occupant if there is one.
    ///
    /// The target is found by walking to the sibling subtree in `direction`
    /// and descending into it from the opposite side until a non-aggregate
    /// tile is reached. Returns `None`, with no mutation, when no target
    /// exists.
    pub fn swap_in_direction(
        &mut self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        tile: TileId,
        window: W,
        direction: Direction,
    ) -> Option<Swap<W>> {
        debug!(?direction, "swapping window");

        let sibling = tree.sibling_in_direction(tile, direction, |_| true)?;
        let target = tree.child_in_direction(sibling, direction.opposite(), |t| {
            match self.tile_map.get(activity, desktop, t) {
                Some(Slot::Node { .. }) => Step::Descend,
                _ => Step::Accept,
            }
        })?;

        let displaced = match self.tile_map.get(activity, desktop, target) {
            None => None,
            Some(Slot::Window(occupant)) => Some(occupant.clone()),
            // The descent never accepts an aggregate.
            Some(Slot::Node { .. }) => return None,
        };

        if displaced.is_some() {
            self.tile_map.try_del_window(tree, activity, desktop, target);
        }
        self.tile_map.try_del_window(tree, activity, desktop, tile);
        self.tile_map
            .try_add_window(tree, activity, desktop, target, window);
        if let Some(occupant) = &displaced {
            self.tile_map
                .try_add_window(tree, activity, desktop, tile, occupant.clone());
        }

        Some(Swap { target, displaced })
    }

    /// Picks the window to focus when moving from `tile` in `direction`:
    /// the occupant nearest the facing edge of the closest occupied sibling
    /// subtree. Read-only.
    pub fn focus_in_direction(
        &self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        tile: TileId,
        direction: Direction,
    ) -> Option<W> {
        let sibling = tree.sibling_in_direction(tile, direction, |t| {
            self.tile_map.get(activity, desktop, t).is_some()
        })?;
        let target = tree.child_in_direction(sibling, direction.opposite(), |t| {
            match self.tile_map.get(activity, desktop, t) {
                None => Step::Skip,
                Some(Slot::Window(_)) => Step::Accept,
                Some(Slot::Node { .. }) => Step::Descend,
            }
        })?;

        self.tile_map
            .get(activity, desktop, target)?
            .window()
            .cloned()
    }

    /// Clears every window under `root` and packs them again in traversal
    /// order, closing the gaps left by removed windows. Returns the final
    /// placements; windows that no longer fit are parked as untiled.
    pub fn retile(
        &mut self,
        tree: &TileTree,
        activity: &str,
        desktop: i32,
        screen: usize,
        root: TileId,
    ) -> Vec<(W, TileId)> {
        debug!("retiling screen");

        let mut windows = Vec::new();
        let _ = self
            .tile_map
            .for_each(tree, activity, desktop, root, |tile, window| {
                windows.push((tile, window.clone()));
                ControlFlow::Continue(())
            });

        for (tile, _) in &windows {
            self.tile_map.try_del_window(tree, activity, desktop, *tile);
        }

        // Splits may relocate an earlier placement, so keep the last
        // reported tile per window.
        let mut placements: Vec<(W, TileId)> = Vec::new();
        for (_, window) in windows {
            let placed = self.tile_map.try_tile_window(
                tree,
                activity,
                desktop,
                root,
                window.clone(),
                |w, t| {
                    if let Some(entry) = placements.iter_mut().find(|(pw, _)| pw == w) {
                        entry.1 = t;
                    } else {
                        placements.push((w.clone(), t));
                    }
                },
            );
            if !placed {
                debug!("window no longer fits, parking as untiled");
                self.untiled.insert(activity.to_owned(), desktop, screen, window);
            }
        }
        placements
    }

    pub fn is_untiled(&self, activity: &str, desktop: i32, screen: usize, window: &W) -> bool {
        self.untiled.contains(activity, &desktop, &screen, window)
    }

    /// Visits the untiled windows of one (activity, desktop, screen).
    pub fn for_each_untiled<F>(
        &self,
        activity: &str,
        desktop: i32,
        screen: usize,
        mut f: F,
    ) -> ControlFlow<()>
    where
        F: FnMut(&W) -> ControlFlow<()>,
    {
        self.untiled.filter(
            Some(&activity.to_owned()),
            Some(&desktop),
            Some(&screen),
            |_, _, _, window| f(window),
        )
    }
}
