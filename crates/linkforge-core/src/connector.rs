//! Connector records.

use crate::arena::ConnectorId;
use crate::expression::Direction;
use crate::gword::GwordSetId;
use crate::symbol::Symbol;

/// One link endpoint of a disjunct.
///
/// Connectors of one side form a singly linked chain. The head is the
/// shallow connector, whose link spans outermost; `next` moves inward
/// toward the word.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub direction: Direction,
    pub label: Symbol,
    pub cost: f64,
    /// Maximum link span in words; `None` is unbounded.
    pub length_limit: Option<u32>,
    /// Set on chain heads of surviving disjuncts.
    pub shallow: bool,
    /// Nearest word index this connector could attach to.
    pub nearest_word: usize,
    /// Farthest word index this connector could attach to.
    pub farthest_word: usize,
    /// Lattice nodes of the owning disjunct, stamped after pruning.
    pub originating: Option<GwordSetId>,
    pub next: Option<ConnectorId>,
}

impl Default for Connector {
    /// The zeroed record the connector pool hands out.
    fn default() -> Self {
        Self {
            direction: Direction::Left,
            label: Symbol(0),
            cost: 0.0,
            length_limit: None,
            shallow: false,
            nearest_word: 0,
            farthest_word: 0,
            originating: None,
            next: None,
        }
    }
}
