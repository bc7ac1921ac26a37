//! Per-word list merging.

use linkforge_core::{Disjunct, DisjunctId, Pool};

/// Appends `back` to the end of `front` and returns the combined head.
///
/// Walks `front` once; `back` is linked as-is.
pub fn catenate_disjuncts(
    pool: &mut Pool<DisjunctId, Disjunct>,
    front: Option<DisjunctId>,
    back: Option<DisjunctId>,
) -> Option<DisjunctId> {
    let Some(head) = front else {
        return back;
    };
    let mut tail = head;
    while let Some(next) = pool[tail].next {
        tail = next;
    }
    pool[tail].next = back;
    Some(head)
}

/// Joins the lists built for each alternative of one word.
///
/// Each new list is placed in front of what has been merged so far, so every
/// disjunct is walked exactly once.
pub fn merge_alternatives<I>(pool: &mut Pool<DisjunctId, Disjunct>, lists: I) -> Option<DisjunctId>
where
    I: IntoIterator<Item = Option<DisjunctId>>,
{
    lists
        .into_iter()
        .fold(None, |merged, list| catenate_disjuncts(pool, list, merged))
}
