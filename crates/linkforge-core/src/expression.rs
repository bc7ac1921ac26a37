//! Dictionary expressions.
//!
//! An expression is a boolean combination of connectors. The dictionary owns
//! the trees; preparation only reads them, so they are shared as
//! `Arc<Expression>` and never mutated after construction.

use std::fmt;

use crate::error::ExpressionError;
use crate::symbol::{Interner, Symbol};

/// Side of the word a connector links toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// `-` connectors link to a word on the left.
    Left,
    /// `+` connectors link to a word on the right.
    Right,
}

impl Direction {
    /// Word-index step taken when moving away from the word on this side.
    #[inline]
    pub fn delta(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::Left => '-',
            Direction::Right => '+',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '-' => Some(Direction::Left),
            '+' => Some(Direction::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Terminal node payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorTerm {
    pub direction: Direction,
    pub label: Symbol,
    /// Maximum number of words the link may span; `None` is unbounded.
    pub length_limit: Option<u32>,
    /// An optional connector may also be left out entirely.
    pub optional: bool,
}

/// Node shape of an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Connector(ConnectorTerm),
}

/// An expression node with its own cost.
///
/// Costs sit on every node: an AND or OR cost is paid once by each disjunct
/// expanded through that node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub cost: f64,
}

impl Expression {
    pub fn connector(direction: Direction, label: Symbol) -> Self {
        Self {
            kind: ExpressionKind::Connector(ConnectorTerm {
                direction,
                label,
                length_limit: None,
                optional: false,
            }),
            cost: 0.0,
        }
    }

    pub fn and(children: Vec<Expression>) -> Self {
        Self {
            kind: ExpressionKind::And(children),
            cost: 0.0,
        }
    }

    pub fn or(children: Vec<Expression>) -> Self {
        Self {
            kind: ExpressionKind::Or(children),
            cost: 0.0,
        }
    }

    /// Sets the node cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the length limit. No effect on AND/OR nodes.
    pub fn with_length_limit(mut self, limit: u32) -> Self {
        if let ExpressionKind::Connector(term) = &mut self.kind {
            term.length_limit = Some(limit);
        }
        self
    }

    /// Marks a terminal optional. No effect on AND/OR nodes.
    pub fn optional(mut self) -> Self {
        if let ExpressionKind::Connector(term) = &mut self.kind {
            term.optional = true;
        }
        self
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match &self.kind {
            ExpressionKind::And(children) | ExpressionKind::Or(children) => {
                1 + children.iter().map(Expression::size).sum::<usize>()
            }
            ExpressionKind::Connector(_) => 1,
        }
    }

    /// Checks the tree against the expression contract.
    ///
    /// Every label must be interned in `interner`, every cost finite and
    /// non-negative, and no length limit zero.
    pub fn validate(&self, interner: &Interner) -> Result<(), ExpressionError> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if !node.cost.is_finite() || node.cost < 0.0 {
                return Err(ExpressionError::InvalidCost(node.cost));
            }
            match &node.kind {
                ExpressionKind::And(children) | ExpressionKind::Or(children) => {
                    stack.extend(children.iter());
                }
                ExpressionKind::Connector(term) => {
                    let Some(label) = interner.resolve(term.label) else {
                        return Err(ExpressionError::UnknownLabel(term.label.as_u32()));
                    };
                    if term.length_limit == Some(0) {
                        return Err(ExpressionError::ZeroLengthLimit {
                            label: format!("{}{}", label, term.direction),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
