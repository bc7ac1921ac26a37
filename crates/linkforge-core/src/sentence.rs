//! Sentences, words and word alternatives.

use std::sync::Arc;

use crate::arena::{Arena, ArenaLimits, DisjunctId};
use crate::expression::Expression;
use crate::gword::GwordSet;
use crate::symbol::Interner;

/// One dictionary alternative of a word: an expression paired with the
/// lattice nodes that produced it.
#[derive(Debug, Clone)]
pub struct XNode {
    pub string: Arc<str>,
    pub expression: Arc<Expression>,
    pub gwords: GwordSet,
}

impl XNode {
    pub fn new(string: impl Into<Arc<str>>, expression: Arc<Expression>, gwords: GwordSet) -> Self {
        Self {
            string: string.into(),
            expression,
            gwords,
        }
    }
}

/// A sentence position.
#[derive(Debug, Clone)]
pub struct Word {
    pub index: usize,
    pub alternatives: Vec<XNode>,
    /// Head of the prepared disjunct list; empty until preparation runs.
    pub disjuncts: Option<DisjunctId>,
}

/// A sentence and the arena that holds its disjuncts for one parse attempt.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use linkforge_core::{Direction, Expression, GwordId, GwordSet, Interner, Sentence, XNode};
///
/// let mut interner = Interner::new();
/// let s = interner.intern("S");
/// let exp = Arc::new(Expression::connector(Direction::Right, s));
///
/// let mut sentence = Sentence::new(Arc::new(interner));
/// let w = sentence.push_word(vec![XNode::new("dog.n", exp, GwordSet::single(GwordId(0)))]);
/// assert_eq!(w, 0);
/// assert_eq!(sentence.len(), 1);
/// ```
#[derive(Debug)]
pub struct Sentence {
    words: Vec<Word>,
    interner: Arc<Interner>,
    pub arena: Arena,
}

impl Sentence {
    pub fn new(interner: Arc<Interner>) -> Self {
        Self {
            words: Vec::new(),
            interner,
            arena: Arena::default(),
        }
    }

    /// Appends a word and returns its index.
    pub fn push_word(&mut self, alternatives: Vec<XNode>) -> usize {
        let index = self.words.len();
        self.words.push(Word {
            index,
            alternatives,
            disjuncts: None,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Borrows the word table and the arena separately.
    pub fn split_mut(&mut self) -> (&mut [Word], &mut Arena) {
        (&mut self.words, &mut self.arena)
    }

    /// Replaces the arena with a fresh one and clears every word list.
    pub fn reset_arena(&mut self, limits: ArenaLimits) {
        self.arena = Arena::new(limits);
        for word in &mut self.words {
            word.disjuncts = None;
        }
    }

    /// Drops every prepared disjunct, keeping the arena's allocation.
    pub fn discard_disjuncts(&mut self) {
        self.arena.reset();
        for word in &mut self.words {
            word.disjuncts = None;
        }
    }

    pub fn disjunct_count(&self, word: usize) -> usize {
        self.words
            .get(word)
            .map_or(0, |w| self.arena.list_len(w.disjuncts))
    }

    pub fn total_disjuncts(&self) -> usize {
        self.words
            .iter()
            .map(|w| self.arena.list_len(w.disjuncts))
            .sum()
    }
}
