//! Sentence-scoped pools for disjuncts and connectors.
//!
//! Records are addressed by typed `u32` indices instead of pointers. Links
//! between records (connector chains, disjunct lists) are indices into the
//! same pools, so nothing can dangle and traversal stays O(1) per hop.
//! Everything is released together when the sentence resets its arena.

use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use thiserror::Error;

use crate::connector::Connector;
use crate::disjunct::Disjunct;
use crate::gword::GwordSetTable;

/// Most records any one pool or table holds, so every index fits in `u32`.
pub const MAX_RECORDS: usize = u32::MAX as usize;

/// Typed index into a [`Pool`].
pub trait PoolId: Copy + Eq + Debug {
    fn from_index(index: usize) -> Self;
    fn index(self) -> usize;
}

macro_rules! pool_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u32);

        impl PoolId for $name {
            /// `index` is below [`MAX_RECORDS`]; [`Pool::alloc`] never
            /// hands out more.
            #[inline]
            fn from_index(index: usize) -> Self {
                Self(index as u32)
            }

            #[inline]
            fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

pool_id!(
    /// Index of a [`Connector`] in the sentence arena.
    ConnectorId
);
pool_id!(
    /// Index of a [`Disjunct`] in the sentence arena.
    DisjunctId
);

/// Pool allocation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{pool} pool exhausted at {limit} records")]
pub struct ArenaError {
    pub pool: &'static str,
    pub limit: usize,
}

/// Growable pool of fixed-shape records.
///
/// `capacity` is only a hint; the pool grows silently until the optional
/// record limit, past which allocation fails with [`ArenaError`].
///
/// # Example
///
/// ```
/// use linkforge_core::arena::{ConnectorId, Pool};
///
/// let mut pool: Pool<ConnectorId, u64> = Pool::new("Counter", 4);
/// let a = pool.alloc(7).unwrap();
/// let b = pool.alloc_zeroed().unwrap();
/// assert_eq!(pool[a], 7);
/// assert_eq!(pool[b], 0);
///
/// pool.reset();
/// assert!(pool.is_empty());
/// ```
pub struct Pool<I: PoolId, T> {
    name: &'static str,
    records: Vec<T>,
    limit: Option<usize>,
    _id: PhantomData<fn() -> I>,
}

impl<I: PoolId, T> Pool<I, T> {
    /// Creates an empty pool with room for `capacity` records.
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            records: Vec::with_capacity(capacity),
            limit: None,
            _id: PhantomData,
        }
    }

    /// Caps the number of live records.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Effective record limit, never above [`MAX_RECORDS`].
    pub fn limit(&self) -> usize {
        self.limit.map_or(MAX_RECORDS, |limit| limit.min(MAX_RECORDS))
    }

    /// Stores a fully populated record.
    #[inline]
    pub fn alloc(&mut self, record: T) -> Result<I, ArenaError> {
        let limit = self.limit();
        if self.records.len() >= limit {
            return Err(ArenaError {
                pool: self.name,
                limit,
            });
        }
        let id = I::from_index(self.records.len());
        self.records.push(record);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: I) -> Option<&T> {
        self.records.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: I) -> Option<&mut T> {
        self.records.get_mut(id.index())
    }

    /// Drops every record, keeping the allocation.
    pub fn reset(&mut self) {
        self.records.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.records.capacity()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, r)| (I::from_index(i), r))
    }
}

impl<I: PoolId, T: Default> Pool<I, T> {
    /// Stores a default (all-zero) record for the caller to fill in.
    #[inline]
    pub fn alloc_zeroed(&mut self) -> Result<I, ArenaError> {
        self.alloc(T::default())
    }
}

impl<I: PoolId, T> Index<I> for Pool<I, T> {
    type Output = T;

    #[inline]
    fn index(&self, id: I) -> &T {
        &self.records[id.index()]
    }
}

impl<I: PoolId, T> IndexMut<I> for Pool<I, T> {
    #[inline]
    fn index_mut(&mut self, id: I) -> &mut T {
        &mut self.records[id.index()]
    }
}

impl<I: PoolId, T> Debug for Pool<I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("name", &self.name)
            .field("len", &self.records.len())
            .field("capacity", &self.records.capacity())
            .field("limit", &self.limit)
            .finish()
    }
}

/// Capacity hints and hard limits for a sentence arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaLimits {
    pub disjunct_capacity: usize,
    pub connector_capacity: usize,
    pub max_disjuncts: Option<usize>,
    pub max_connectors: Option<usize>,
}

impl Default for ArenaLimits {
    fn default() -> Self {
        Self {
            disjunct_capacity: 2048,
            connector_capacity: 8192,
            max_disjuncts: None,
            max_connectors: None,
        }
    }
}

/// All per-sentence storage produced by preparation.
///
/// Disjunct records are always written whole, so their pool never zeroes.
/// Connector records are allocated zeroed: distance fields, `shallow` and
/// provenance start cleared until connector setup fills them.
#[derive(Debug)]
pub struct Arena {
    pub disjuncts: Pool<DisjunctId, Disjunct>,
    pub connectors: Pool<ConnectorId, Connector>,
    pub gword_sets: GwordSetTable,
}

impl Arena {
    pub fn new(limits: ArenaLimits) -> Self {
        Self {
            disjuncts: Pool::new("Disjunct", limits.disjunct_capacity)
                .with_limit(limits.max_disjuncts),
            connectors: Pool::new("Connector", limits.connector_capacity)
                .with_limit(limits.max_connectors),
            gword_sets: GwordSetTable::new(),
        }
    }

    /// Releases every record at once.
    pub fn reset(&mut self) {
        self.disjuncts.reset();
        self.connectors.reset();
        self.gword_sets.clear();
    }

    /// Walks a connector chain from `head`.
    pub fn connectors(&self, head: Option<ConnectorId>) -> ConnectorIter<'_> {
        ConnectorIter {
            pool: &self.connectors,
            next: head,
        }
    }

    /// Walks a disjunct list from `head`.
    pub fn disjuncts(&self, head: Option<DisjunctId>) -> DisjunctIter<'_> {
        DisjunctIter {
            pool: &self.disjuncts,
            next: head,
        }
    }

    pub fn list_len(&self, head: Option<DisjunctId>) -> usize {
        self.disjuncts(head).count()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(ArenaLimits::default())
    }
}

/// Iterator over a connector chain.
pub struct ConnectorIter<'a> {
    pool: &'a Pool<ConnectorId, Connector>,
    next: Option<ConnectorId>,
}

impl<'a> Iterator for ConnectorIter<'a> {
    type Item = (ConnectorId, &'a Connector);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let c = &self.pool[id];
        self.next = c.next;
        Some((id, c))
    }
}

/// Iterator over a disjunct list.
pub struct DisjunctIter<'a> {
    pool: &'a Pool<DisjunctId, Disjunct>,
    next: Option<DisjunctId>,
}

impl<'a> Iterator for DisjunctIter<'a> {
    type Item = (DisjunctId, &'a Disjunct);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let d = &self.pool[id];
        self.next = d.next;
        Some((id, d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_basic() {
        let mut pool: Pool<DisjunctId, i32> = Pool::new("Test", 0);
        assert!(pool.is_empty());

        let a = pool.alloc(1).unwrap();
        let b = pool.alloc(2).unwrap();
        let c = pool.alloc(3).unwrap();

        assert_eq!(pool.len(), 3);
        assert_eq!(pool[a], 1);
        assert_eq!(pool[b], 2);
        assert_eq!(pool.get(c), Some(&3));
        assert_eq!(pool.get(DisjunctId::from_index(3)), None);
    }

    #[test]
    fn test_pool_reset_keeps_capacity() {
        let mut pool: Pool<DisjunctId, i32> = Pool::new("Test", 0);
        pool.alloc(1).unwrap();
        pool.alloc(2).unwrap();

        let capacity_before = pool.capacity();
        pool.reset();

        assert!(pool.is_empty());
        assert_eq!(pool.capacity(), capacity_before);

        let id = pool.alloc(10).unwrap();
        assert_eq!(id.index(), 0);
    }

    #[test]
    fn test_pool_grows_past_hint() {
        let mut pool: Pool<ConnectorId, u8> = Pool::new("Test", 2);
        for i in 0..100u8 {
            pool.alloc(i).unwrap();
        }
        assert_eq!(pool.len(), 100);
    }

    #[test]
    fn test_pool_limit() {
        let mut pool: Pool<ConnectorId, u8> = Pool::new("Connector", 2).with_limit(Some(2));
        pool.alloc(0).unwrap();
        pool.alloc(1).unwrap();
        let err = pool.alloc(2).unwrap_err();
        assert_eq!(
            err,
            ArenaError {
                pool: "Connector",
                limit: 2
            }
        );
    }

    #[test]
    fn test_limit_never_exceeds_id_range() {
        let unbounded: Pool<DisjunctId, u8> = Pool::new("Disjunct", 0);
        assert_eq!(unbounded.limit(), MAX_RECORDS);

        let huge: Pool<DisjunctId, u8> = Pool::new("Disjunct", 0).with_limit(Some(usize::MAX));
        assert_eq!(huge.limit(), u32::MAX as usize);

        let small: Pool<DisjunctId, u8> = Pool::new("Disjunct", 0).with_limit(Some(5));
        assert_eq!(small.limit(), 5);
    }

    #[test]
    fn test_connectors_allocated_zeroed() {
        let mut arena = Arena::default();
        let id = arena.connectors.alloc_zeroed().unwrap();
        let c = &arena.connectors[id];
        assert_eq!(c.nearest_word, 0);
        assert_eq!(c.farthest_word, 0);
        assert!(!c.shallow);
        assert!(c.originating.is_none());
        assert!(c.next.is_none());
    }

    #[test]
    fn test_arena_reset() {
        let mut arena = Arena::default();
        arena.connectors.alloc_zeroed().unwrap();
        arena.reset();
        assert!(arena.connectors.is_empty());
        assert!(arena.disjuncts.is_empty());
        assert!(arena.gword_sets.is_empty());
    }
}
