//! Word-graph provenance.
//!
//! Tokenization produces a lattice of alternative segmentations. Each
//! disjunct remembers the set of lattice nodes it came from so the parser
//! can reject linkages that mix incompatible alternatives.

use std::fmt;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::arena::{ArenaError, MAX_RECORDS};

/// A node of the tokenizer's word lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GwordId(pub u32);

impl fmt::Display for GwordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Sorted, duplicate-free set of lattice nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GwordSet(SmallVec<[GwordId; 2]>);

impl GwordSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(id: GwordId) -> Self {
        let mut set = SmallVec::new();
        set.push(id);
        Self(set)
    }

    pub fn insert(&mut self, id: GwordId) -> bool {
        match self.0.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, id);
                true
            }
        }
    }

    pub fn contains(&self, id: GwordId) -> bool {
        self.0.binary_search(&id).is_ok()
    }

    /// Merges two sorted sets.
    pub fn union(&self, other: &GwordSet) -> GwordSet {
        let (a, b) = (&self.0, &other.0);
        let mut out = SmallVec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        GwordSet(out)
    }

    pub fn is_superset(&self, other: &GwordSet) -> bool {
        other.0.iter().all(|id| self.contains(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = GwordId> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<GwordId> for GwordSet {
    fn from_iter<I: IntoIterator<Item = GwordId>>(iter: I) -> Self {
        let mut set = GwordSet::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Handle to a set interned in a [`GwordSetTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GwordSetId(u32);

/// Interning table for provenance sets, scoped to one sentence.
///
/// Equal sets share one id, so most disjuncts of a word point at the same
/// entry and a dedup union that adds nothing allocates nothing.
#[derive(Debug)]
pub struct GwordSetTable {
    sets: Vec<GwordSet>,
    lookup: FxHashMap<GwordSet, GwordSetId>,
    limit: usize,
}

impl GwordSetTable {
    pub fn new() -> Self {
        Self::with_limit(MAX_RECORDS)
    }

    /// Table holding at most `limit` distinct sets, capped at [`MAX_RECORDS`].
    pub fn with_limit(limit: usize) -> Self {
        Self {
            sets: Vec::new(),
            lookup: FxHashMap::default(),
            limit: limit.min(MAX_RECORDS),
        }
    }

    /// Returns the id of `set`, adding it if new.
    pub fn intern(&mut self, set: GwordSet) -> Result<GwordSetId, ArenaError> {
        if let Some(&id) = self.lookup.get(&set) {
            return Ok(id);
        }
        if self.sets.len() >= self.limit {
            return Err(ArenaError {
                pool: "GwordSet",
                limit: self.limit,
            });
        }
        let id = GwordSetId(self.sets.len() as u32);
        self.sets.push(set.clone());
        self.lookup.insert(set, id);
        Ok(id)
    }

    /// Returns the id of `a ∪ b`, interning it if new.
    pub fn union(&mut self, a: GwordSetId, b: GwordSetId) -> Result<GwordSetId, ArenaError> {
        if a == b {
            return Ok(a);
        }
        let (sa, sb) = (&self.sets[a.0 as usize], &self.sets[b.0 as usize]);
        if sa.is_superset(sb) {
            return Ok(a);
        }
        if sb.is_superset(sa) {
            return Ok(b);
        }
        let merged = sa.union(sb);
        self.intern(merged)
    }

    pub fn get(&self, id: GwordSetId) -> &GwordSet {
        &self.sets[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn clear(&mut self) {
        self.sets.clear();
        self.lookup.clear();
    }
}

impl Default for GwordSetTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_stays_sorted() {
        let set: GwordSet = [GwordId(4), GwordId(1), GwordId(4), GwordId(2)]
            .into_iter()
            .collect();
        let ids: Vec<_> = set.iter().collect();
        assert_eq!(ids, vec![GwordId(1), GwordId(2), GwordId(4)]);
    }

    #[test]
    fn test_union_merges() {
        let a: GwordSet = [GwordId(1), GwordId(3)].into_iter().collect();
        let b: GwordSet = [GwordId(2), GwordId(3)].into_iter().collect();
        let u = a.union(&b);
        assert_eq!(u.len(), 3);
        assert!(u.is_superset(&a) && u.is_superset(&b));
    }

    #[test]
    fn test_table_interns_equal_sets() {
        let mut table = GwordSetTable::new();
        let a = table.intern(GwordSet::single(GwordId(7))).unwrap();
        let b = table.intern(GwordSet::single(GwordId(7))).unwrap();
        assert_eq!(a, b);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_union_reuses_superset() {
        let mut table = GwordSetTable::new();
        let small = table.intern(GwordSet::single(GwordId(1))).unwrap();
        let big = table
            .intern([GwordId(1), GwordId(2)].into_iter().collect())
            .unwrap();
        assert_eq!(table.union(small, big), Ok(big));
        assert_eq!(table.union(big, small), Ok(big));
        assert_eq!(table.len(), 2);

        let other = table.intern(GwordSet::single(GwordId(9))).unwrap();
        let merged = table.union(small, other).unwrap();
        assert!(table.get(merged).contains(GwordId(1)));
        assert!(table.get(merged).contains(GwordId(9)));
    }

    #[test]
    fn test_table_limit() {
        let mut table = GwordSetTable::with_limit(2);
        let a = table.intern(GwordSet::single(GwordId(1))).unwrap();
        let b = table.intern(GwordSet::single(GwordId(2))).unwrap();
        assert_eq!(table.intern(GwordSet::single(GwordId(1))), Ok(a));

        let err = table.union(a, b).unwrap_err();
        assert_eq!(
            err,
            ArenaError {
                pool: "GwordSet",
                limit: 2
            }
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_limit_is_capped() {
        let mut table = GwordSetTable::with_limit(usize::MAX);
        assert!(table.intern(GwordSet::new()).is_ok());
        assert_eq!(table.limit, MAX_RECORDS);
    }
}
