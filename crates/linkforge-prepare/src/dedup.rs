//! Duplicate disjunct elimination.
//!
//! Each disjunct is reduced to a 64-bit shape hash first. Full chain
//! comparison only runs against disjuncts in the same hash bucket, which
//! keeps the pass linear on lists of millions of disjuncts.
//!
//! Two disjuncts are duplicates when both chains hold the same sequence of
//! (direction, label, cost, length limit). The disjunct cost, which also
//! carries AND and OR node costs, is only part of the key under
//! [`DuplicateCostPolicy::Distinct`]. Under [`DuplicateCostPolicy::KeepLowest`]
//! the cheapest record survives. Either way the survivor's provenance becomes
//! the union of all its duplicates' provenance.

use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;

use linkforge_config::DuplicateCostPolicy;
use linkforge_core::{Arena, ArenaError, Connector, ConnectorId, Direction, DisjunctId, Symbol};

/// Result of one dedup pass over a word's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupOutcome {
    pub head: Option<DisjunctId>,
    pub kept: usize,
    pub removed: usize,
}

/// Removes structurally equal disjuncts from the list at `head`.
///
/// Survivors keep their relative order. Running the pass again on its own
/// output removes nothing. Fails only if the provenance table is full.
pub fn eliminate_duplicate_disjuncts(
    arena: &mut Arena,
    head: Option<DisjunctId>,
    policy: DuplicateCostPolicy,
) -> Result<DedupOutcome, ArenaError> {
    let mut survivors: Vec<DisjunctId> = Vec::new();
    let mut buckets: FxHashMap<u64, SmallVec<[usize; 1]>> = FxHashMap::default();
    let mut removed = 0;

    let mut cursor = head;
    while let Some(id) = cursor {
        cursor = arena.disjuncts[id].next;

        let bucket = buckets.entry(shape_hash(arena, id, policy)).or_default();
        let found = bucket
            .iter()
            .copied()
            .find(|&slot| same_shape(arena, survivors[slot], id, policy));

        match found {
            Some(slot) => {
                let kept = survivors[slot];
                let merged = arena.gword_sets.union(
                    arena.disjuncts[kept].originating,
                    arena.disjuncts[id].originating,
                )?;
                let winner = if arena.disjuncts[id].cost < arena.disjuncts[kept].cost {
                    survivors[slot] = id;
                    id
                } else {
                    kept
                };
                arena.disjuncts[winner].originating = merged;
                removed += 1;
            }
            None => {
                bucket.push(survivors.len());
                survivors.push(id);
            }
        }
    }

    for pair in survivors.windows(2) {
        arena.disjuncts[pair[0]].next = Some(pair[1]);
    }
    if let Some(&last) = survivors.last() {
        arena.disjuncts[last].next = None;
    }

    Ok(DedupOutcome {
        head: survivors.first().copied(),
        kept: survivors.len(),
        removed,
    })
}

type ConnectorKey = (Direction, Symbol, Option<u32>, u64);

fn connector_key(c: &Connector) -> ConnectorKey {
    (c.direction, c.label, c.length_limit, cost_bits(c.cost))
}

/// Bit pattern with `-0.0` folded into `0.0`.
fn cost_bits(cost: f64) -> u64 {
    (cost + 0.0).to_bits()
}

fn chain_keys(arena: &Arena, head: Option<ConnectorId>) -> impl Iterator<Item = ConnectorKey> + '_ {
    arena.connectors(head).map(|(_, c)| connector_key(c))
}

/// Fixed-size digest of a disjunct's chain shape.
pub fn shape_hash(arena: &Arena, id: DisjunctId, policy: DuplicateCostPolicy) -> u64 {
    let d = &arena.disjuncts[id];
    let mut hasher = FxHasher::default();
    for key in chain_keys(arena, d.left) {
        key.hash(&mut hasher);
    }
    // Separator so a connector cannot migrate between sides unnoticed.
    hasher.write_u8(0xff);
    for key in chain_keys(arena, d.right) {
        key.hash(&mut hasher);
    }
    if policy == DuplicateCostPolicy::Distinct {
        hasher.write_u64(cost_bits(d.cost));
    }
    hasher.finish()
}

/// Full structural comparison of two disjuncts.
pub fn same_shape(arena: &Arena, a: DisjunctId, b: DisjunctId, policy: DuplicateCostPolicy) -> bool {
    let (da, db) = (&arena.disjuncts[a], &arena.disjuncts[b]);
    if policy == DuplicateCostPolicy::Distinct && cost_bits(da.cost) != cost_bits(db.cost) {
        return false;
    }
    chain_keys(arena, da.left).eq(chain_keys(arena, db.left))
        && chain_keys(arena, da.right).eq(chain_keys(arena, db.right))
}
