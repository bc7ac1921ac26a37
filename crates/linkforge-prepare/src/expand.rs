//! Expression expansion.
//!
//! Expansion runs in two steps. [`expand_expression`] walks the tree and
//! returns owned [`Clause`] values, one per way of choosing through the OR
//! nodes and optional terminals. [`build_disjuncts_for_exp`] then writes the
//! clauses into the sentence arena as a linked disjunct list.
//!
//! Clauses borrow the terminals from the expression and need no arena, so
//! different words can be expanded on different threads.

use std::sync::Arc;

use smallvec::SmallVec;

use linkforge_core::{
    Arena, ArenaError, ConnectorId, ConnectorTerm, Direction, Disjunct, DisjunctId, Expression,
    ExpressionKind, GwordSetId,
};

/// A terminal chosen by one clause, with the cost of its node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClauseConnector<'e> {
    pub term: &'e ConnectorTerm,
    pub cost: f64,
}

/// One expansion of an expression: its terminals in expression order and
/// the accumulated cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause<'e> {
    pub connectors: SmallVec<[ClauseConnector<'e>; 6]>,
    pub cost: f64,
}

impl<'e> Clause<'e> {
    fn empty(cost: f64) -> Self {
        Self {
            connectors: SmallVec::new(),
            cost,
        }
    }

    fn single(term: &'e ConnectorTerm, cost: f64) -> Self {
        let mut connectors = SmallVec::new();
        connectors.push(ClauseConnector { term, cost });
        Self { connectors, cost }
    }

    /// Concatenation of two clauses, or `None` if it would cost more than
    /// `cutoff`.
    fn join(&self, other: &Clause<'e>, cutoff: f64) -> Option<Clause<'e>> {
        let cost = self.cost + other.cost;
        if cost > cutoff {
            return None;
        }
        let mut connectors =
            SmallVec::with_capacity(self.connectors.len() + other.connectors.len());
        connectors.extend_from_slice(&self.connectors);
        connectors.extend_from_slice(&other.connectors);
        Some(Clause { connectors, cost })
    }

    pub fn side(
        &self,
        direction: Direction,
    ) -> impl DoubleEndedIterator<Item = &ClauseConnector<'e>> {
        self.connectors
            .iter()
            .filter(move |c| c.term.direction == direction)
    }
}

/// Expands `exp` into every clause whose cost does not exceed `cost_cutoff`.
///
/// The cutoff is applied at every node: a combination over the cutoff is
/// never materialized, so a wide AND over many ORs cannot transiently build
/// more clauses than survive. Costs are non-negative, so pruning a partial
/// combination never loses a complete clause that would have fit.
pub fn expand_expression(exp: &Expression, cost_cutoff: f64) -> Vec<Clause<'_>> {
    match &exp.kind {
        ExpressionKind::Connector(term) => {
            let mut out = Vec::with_capacity(2);
            if term.optional {
                out.push(Clause::empty(0.0));
            }
            if exp.cost <= cost_cutoff {
                out.push(Clause::single(term, exp.cost));
            }
            out
        }
        ExpressionKind::Or(children) => {
            let mut out = Vec::new();
            for child in children {
                for mut clause in expand_expression(child, cost_cutoff) {
                    clause.cost += exp.cost;
                    if clause.cost <= cost_cutoff {
                        out.push(clause);
                    }
                }
            }
            out
        }
        ExpressionKind::And(children) => {
            if exp.cost > cost_cutoff {
                return Vec::new();
            }
            let mut acc = vec![Clause::empty(exp.cost)];
            for child in children {
                let expanded = expand_expression(child, cost_cutoff);
                let mut next = Vec::new();
                for left in &acc {
                    next.extend(
                        expanded
                            .iter()
                            .filter_map(|right| left.join(right, cost_cutoff)),
                    );
                }
                acc = next;
                if acc.is_empty() {
                    break;
                }
            }
            acc
        }
    }
}

/// Writes `clauses` into the arena as a disjunct list and returns its head.
///
/// Chain heads are the outermost connectors: the first left connector and
/// the last right connector in expression order. The returned list keeps
/// clause order.
pub fn build_disjuncts_for_exp(
    arena: &mut Arena,
    clauses: &[Clause<'_>],
    word_string: &Arc<str>,
    originating: GwordSetId,
) -> Result<Option<DisjunctId>, ArenaError> {
    let mut head = None;
    for clause in clauses.iter().rev() {
        // Prepending inward-to-outward leaves the outermost connector at the head.
        let left = build_chain(arena, clause.side(Direction::Left).rev())?;
        let right = build_chain(arena, clause.side(Direction::Right))?;
        let id = arena.disjuncts.alloc(Disjunct {
            left,
            right,
            word_string: Arc::clone(word_string),
            cost: clause.cost,
            next: head,
            originating,
        })?;
        head = Some(id);
    }
    Ok(head)
}

fn build_chain<'a, 'e: 'a>(
    arena: &mut Arena,
    inward_to_outward: impl Iterator<Item = &'a ClauseConnector<'e>>,
) -> Result<Option<ConnectorId>, ArenaError> {
    let mut head = None;
    for cc in inward_to_outward {
        let id = arena.connectors.alloc_zeroed()?;
        let c = &mut arena.connectors[id];
        c.direction = cc.term.direction;
        c.label = cc.term.label;
        c.cost = cc.cost;
        c.length_limit = cc.term.length_limit;
        c.next = head;
        head = Some(id);
    }
    Ok(head)
}
