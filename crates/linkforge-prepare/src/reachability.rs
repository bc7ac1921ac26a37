//! Connector distance bounds.
//!
//! For every connector this fills in the nearest and farthest word it could
//! attach to. A chain of `n` connectors on one side needs `n` distinct words
//! on that side, outermost connector farthest, so the connector `k` hops
//! from the inner end can attach no nearer than `k` words away. Disjuncts
//! whose chains cannot fit inside the sentence are unlinked from their word.

use smallvec::SmallVec;

use linkforge_core::{Connector, ConnectorId, Direction, Pool, Sentence};

/// Result of connector setup over a whole sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReachabilityOutcome {
    pub kept: usize,
    pub removed: usize,
}

type Bounds = SmallVec<[(ConnectorId, usize, usize); 8]>;

/// Computes `(connector, nearest, farthest)` for one chain.
///
/// Returns `None` when some connector has no possible partner: its nearest
/// word falls outside `[0, sentence_len)` or lies beyond its farthest word.
fn chain_bounds(
    connectors: &Pool<ConnectorId, Connector>,
    head: Option<ConnectorId>,
    word: usize,
    direction: Direction,
    sentence_len: usize,
) -> Option<Bounds> {
    let mut chain: SmallVec<[ConnectorId; 8]> = SmallVec::new();
    let mut cursor = head;
    while let Some(id) = cursor {
        chain.push(id);
        cursor = connectors[id].next;
    }

    let delta = direction.delta();
    let last = sentence_len as isize - 1;
    let mut bounds = Bounds::with_capacity(chain.len());
    // Fold from the inner end outward.
    let mut nearest = word as isize;
    for &id in chain.iter().rev() {
        nearest += delta;
        if nearest < 0 || nearest > last {
            return None;
        }
        let farthest = match connectors[id].length_limit {
            Some(limit) => (word as isize + delta * limit as isize).clamp(0, last),
            None if delta < 0 => 0,
            None => last,
        };
        if (farthest - nearest) * delta < 0 {
            return None;
        }
        bounds.push((id, nearest as usize, farthest as usize));
    }
    Some(bounds)
}

/// Sets distance fields on one disjunct's chains.
///
/// Returns `false`, writing nothing, if the disjunct cannot fit.
fn set_dist_fields(
    connectors: &mut Pool<ConnectorId, Connector>,
    left: Option<ConnectorId>,
    right: Option<ConnectorId>,
    word: usize,
    sentence_len: usize,
) -> bool {
    let Some(lb) = chain_bounds(connectors, left, word, Direction::Left, sentence_len) else {
        return false;
    };
    let Some(rb) = chain_bounds(connectors, right, word, Direction::Right, sentence_len) else {
        return false;
    };
    for (id, nearest, farthest) in lb.into_iter().chain(rb) {
        let c = &mut connectors[id];
        c.nearest_word = nearest;
        c.farthest_word = farthest;
    }
    true
}

/// Sets distance bounds and `shallow` flags for every word, dropping
/// disjuncts that cannot attach inside the sentence.
pub fn setup_connectors(sentence: &mut Sentence) -> ReachabilityOutcome {
    let sentence_len = sentence.len();
    let (words, arena) = sentence.split_mut();
    let mut outcome = ReachabilityOutcome::default();

    for (w, word) in words.iter_mut().enumerate() {
        let mut kept: Vec<_> = Vec::new();
        let mut cursor = word.disjuncts;
        while let Some(id) = cursor {
            let d = &arena.disjuncts[id];
            cursor = d.next;
            let (left, right) = (d.left, d.right);
            if !set_dist_fields(&mut arena.connectors, left, right, w, sentence_len) {
                outcome.removed += 1;
                continue;
            }
            for head in [left, right].into_iter().flatten() {
                arena.connectors[head].shallow = true;
            }
            kept.push(id);
        }

        for pair in kept.windows(2) {
            arena.disjuncts[pair[0]].next = Some(pair[1]);
        }
        if let Some(&last) = kept.last() {
            arena.disjuncts[last].next = None;
        }
        word.disjuncts = kept.first().copied();
        outcome.kept += kept.len();
    }
    outcome
}
