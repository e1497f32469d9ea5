//! Compound-key maps built from nested hash maps.
//!
//! The occupancy map is keyed by (activity, desktop, tile) and the untiled
//! pool by (activity, desktop, screen) with a set of windows per key. Rather
//! than flattening these into tuple keys, the maps nest one level per key
//! component so that a prefix can be visited without scanning the whole map.
//! Removing the last value at any level prunes the level above it; no empty
//! intermediate map is ever retained.
//!
//! Traversal uses [`ControlFlow`]: visitors return `Break(())` to stop the
//! walk early.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::ControlFlow;

/// Visit `map`, or just the entry at `key` when one is supplied.
fn filter_level<K, V, F>(map: &HashMap<K, V>, key: Option<&K>, mut f: F) -> ControlFlow<()>
where
    K: Eq + Hash,
    F: FnMut(&K, &V) -> ControlFlow<()>,
{
    match key {
        Some(key) => match map.get_key_value(key) {
            Some((key, value)) => f(key, value),
            None => ControlFlow::Continue(()),
        },
        None => {
            for (key, value) in map {
                f(key, value)?;
            }
            ControlFlow::Continue(())
        }
    }
}

/// Map keyed by two components.
#[derive(Debug, Clone)]
pub struct PairMap<X, Y, V> {
    inner: HashMap<X, HashMap<Y, V>>,
}

impl<X, Y, V> Default for PairMap<X, Y, V> {
    fn default() -> Self {
        Self {
            inner: HashMap::new(),
        }
    }
}

impl<X, Y, V> PairMap<X, Y, V>
where
    X: Eq + Hash,
    Y: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get<XQ, YQ>(&self, x: &XQ, y: &YQ) -> Option<&V>
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
    {
        self.inner.get(x)?.get(y)
    }

    pub fn get_mut<XQ, YQ>(&mut self, x: &XQ, y: &YQ) -> Option<&mut V>
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
    {
        self.inner.get_mut(x)?.get_mut(y)
    }

    pub fn contains<XQ, YQ>(&self, x: &XQ, y: &YQ) -> bool
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
    {
        self.get(x, y).is_some()
    }

    pub fn set(&mut self, x: X, y: Y, value: V) {
        self.inner.entry(x).or_default().insert(y, value);
    }

    /// Removes the value at (x, y), pruning the inner map if it becomes
    /// empty.
    pub fn remove<XQ, YQ>(&mut self, x: &XQ, y: &YQ) -> Option<V>
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
    {
        let ymap = self.inner.get_mut(x)?;
        let value = ymap.remove(y)?;
        if ymap.is_empty() {
            self.inner.remove(x);
        }
        Some(value)
    }

    /// Visits entries matching the given key prefix. A `Some` key narrows
    /// that level to a direct lookup; `None` iterates it.
    pub fn filter<F>(&self, x: Option<&X>, y: Option<&Y>, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&X, &Y, &V) -> ControlFlow<()>,
    {
        filter_level(&self.inner, x, |x, ymap| {
            filter_level(ymap, y, |y, value| f(x, y, value))
        })
    }
}

/// Map keyed by three components.
#[derive(Debug, Clone)]
pub struct TripleMap<X, Y, Z, V> {
    inner: PairMap<X, Y, HashMap<Z, V>>,
}

impl<X, Y, Z, V> Default for TripleMap<X, Y, Z, V> {
    fn default() -> Self {
        Self {
            inner: PairMap::default(),
        }
    }
}

impl<X, Y, Z, V> TripleMap<X, Y, Z, V>
where
    X: Eq + Hash,
    Y: Eq + Hash,
    Z: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get<XQ, YQ, ZQ>(&self, x: &XQ, y: &YQ, z: &ZQ) -> Option<&V>
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        Z: Borrow<ZQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
        ZQ: Eq + Hash + ?Sized,
    {
        self.inner.get(x, y)?.get(z)
    }

    pub fn get_mut<XQ, YQ, ZQ>(&mut self, x: &XQ, y: &YQ, z: &ZQ) -> Option<&mut V>
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        Z: Borrow<ZQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
        ZQ: Eq + Hash + ?Sized,
    {
        self.inner.get_mut(x, y)?.get_mut(z)
    }

    pub fn contains<XQ, YQ, ZQ>(&self, x: &XQ, y: &YQ, z: &ZQ) -> bool
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        Z: Borrow<ZQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
        ZQ: Eq + Hash + ?Sized,
    {
        self.get(x, y, z).is_some()
    }

    pub fn set(&mut self, x: X, y: Y, z: Z, value: V) {
        match self.inner.get_mut(&x, &y) {
            Some(zmap) => {
                zmap.insert(z, value);
            }
            None => {
                let mut zmap = HashMap::new();
                zmap.insert(z, value);
                self.inner.set(x, y, zmap);
            }
        }
    }

    /// Removes the value at (x, y, z); empty levels above it are pruned
    /// recursively.
    pub fn remove<XQ, YQ, ZQ>(&mut self, x: &XQ, y: &YQ, z: &ZQ) -> Option<V>
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        Z: Borrow<ZQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
        ZQ: Eq + Hash + ?Sized,
    {
        let zmap = self.inner.get_mut(x, y)?;
        let value = zmap.remove(z)?;
        if zmap.is_empty() {
            self.inner.remove(x, y);
        }
        Some(value)
    }

    pub fn filter<F>(&self, x: Option<&X>, y: Option<&Y>, z: Option<&Z>, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&X, &Y, &Z, &V) -> ControlFlow<()>,
    {
        self.inner.filter(x, y, |x, y, zmap| {
            filter_level(zmap, z, |z, value| f(x, y, z, value))
        })
    }
}

/// Map keyed by three components holding a set of values per key, so a
/// fourth component can be matched by membership.
#[derive(Debug, Clone)]
pub struct TripleSet<X, Y, Z, V> {
    inner: TripleMap<X, Y, Z, HashSet<V>>,
}

impl<X, Y, Z, V> Default for TripleSet<X, Y, Z, V> {
    fn default() -> Self {
        Self {
            inner: TripleMap::default(),
        }
    }
}

impl<X, Y, Z, V> TripleSet<X, Y, Z, V>
where
    X: Eq + Hash,
    Y: Eq + Hash,
    Z: Eq + Hash,
    V: Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn insert(&mut self, x: X, y: Y, z: Z, value: V) -> bool {
        match self.inner.get_mut(&x, &y, &z) {
            Some(set) => set.insert(value),
            None => {
                let mut set = HashSet::new();
                set.insert(value);
                self.inner.set(x, y, z, set);
                true
            }
        }
    }

    /// Removes one value; the set (and any empty level above it) is pruned
    /// when its last value goes.
    pub fn remove<XQ, YQ, ZQ>(&mut self, x: &XQ, y: &YQ, z: &ZQ, value: &V) -> bool
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        Z: Borrow<ZQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
        ZQ: Eq + Hash + ?Sized,
    {
        let Some(set) = self.inner.get_mut(x, y, z) else {
            return false;
        };
        let removed = set.remove(value);
        if set.is_empty() {
            self.inner.remove(x, y, z);
        }
        removed
    }

    pub fn contains<XQ, YQ, ZQ>(&self, x: &XQ, y: &YQ, z: &ZQ, value: &V) -> bool
    where
        X: Borrow<XQ>,
        Y: Borrow<YQ>,
        Z: Borrow<ZQ>,
        XQ: Eq + Hash + ?Sized,
        YQ: Eq + Hash + ?Sized,
        ZQ: Eq + Hash + ?Sized,
    {
        self.inner
            .get(x, y, z)
            .is_some_and(|set| set.contains(value))
    }

    pub fn filter<F>(&self, x: Option<&X>, y: Option<&Y>, z: Option<&Z>, mut f: F) -> ControlFlow<()>
    where
        F: FnMut(&X, &Y, &Z, &V) -> ControlFlow<()>,
    {
        self.inner.filter(x, y, z, |x, y, z, set| {
            for value in set {
                f(x, y, z, value)?;
            }
            ControlFlow::Continue(())
        })
    }
}
