//! Human-readable rendering of disjuncts.
//!
//! Connectors are printed in sentence order: the left chain from its head
//! (outermost) inward, then `<-->`, then the right chain from the word
//! outward.

use std::fmt;

use smallvec::SmallVec;

use crate::arena::{Arena, ConnectorId, DisjunctId};
use crate::connector::Connector;
use crate::symbol::Interner;

/// Formats one connector as `LABEL±`.
pub struct ConnectorDisplay<'a> {
    pub connector: &'a Connector,
    pub interner: &'a Interner,
}

impl fmt::Display for ConnectorDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.interner.resolve(self.connector.label) {
            Some(label) => write!(f, "{}{}", label, self.connector.direction),
            None => write!(f, "{}{}", self.connector.label, self.connector.direction),
        }
    }
}

/// Formats a disjunct as `word [cost]: L- <--> R+`.
pub struct DisjunctDisplay<'a> {
    pub arena: &'a Arena,
    pub interner: &'a Interner,
    pub id: DisjunctId,
}

impl<'a> DisjunctDisplay<'a> {
    pub fn new(arena: &'a Arena, interner: &'a Interner, id: DisjunctId) -> Self {
        Self {
            arena,
            interner,
            id,
        }
    }

    fn write_chain(
        &self,
        f: &mut fmt::Formatter<'_>,
        head: Option<ConnectorId>,
        reverse: bool,
    ) -> fmt::Result {
        let mut chain: SmallVec<[&Connector; 8]> =
            self.arena.connectors(head).map(|(_, c)| c).collect();
        if reverse {
            chain.reverse();
        }
        for c in chain {
            let shown = ConnectorDisplay {
                connector: c,
                interner: self.interner,
            };
            write!(f, " {}", shown)?;
        }
        Ok(())
    }
}

impl fmt::Display for DisjunctDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.arena.disjuncts[self.id];
        write!(f, "{} [{:.3}]:", d.word_string, d.cost)?;
        self.write_chain(f, d.left, false)?;
        write!(f, " <-->")?;
        self.write_chain(f, d.right, true)
    }
}
