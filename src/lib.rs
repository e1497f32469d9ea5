//! Tree-based automatic tiling engine.
//!
//! The host supplies a tree of screen tiles (regions with a horizontal or
//! vertical split orientation) and opaque window identities; this crate
//! tracks which window occupies which tile per (activity, desktop)
//! partition, packs new windows into the emptiest subtree, and answers
//! directional queries like "what is to the left of this tile".
//!
//! The pieces, bottom up:
//!
//! - [`multimap`]: nested compound-key maps with empty-level pruning.
//! - [`tile`]: the arena tile tree and the directional navigator.
//! - [`tilemap`]: the per-partition occupancy map with its aggregate
//!   bookkeeping and bin-packing placement.
//! - [`autotile`]: the engine combining the above into swap/focus/pack/
//!   retile operations, plus the pool of untiled windows.
//!
//! All operations are synchronous and total; expected negative outcomes are
//! `bool`/`Option` results, never panics.

pub mod autotile;
pub mod multimap;
pub mod tile;
pub mod tilemap;

pub use autotile::{Autotile, Swap};
pub use tile::{Direction, LayoutDirection, Step, TileId, TileTree};
pub use tilemap::{OccupancyNode, Slot, TileMap};

#[cfg(test)]
mod tests;
