//! Dictionary shorthand for tests.
//!
//! Connectors are written the way dictionaries spell them: a label followed
//! by `+` or `-`.

use std::sync::Arc;

use linkforge_core::{Direction, Expression, GwordId, GwordSet, Interner, Sentence, XNode};

/// Interner plus helpers that turn `"S+"` into connector expressions.
#[derive(Debug, Default)]
pub struct TestDictionary {
    interner: Interner,
}

impl TestDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `"LABEL+"` or `"LABEL-"` into a connector expression.
    ///
    /// # Panics
    ///
    /// Panics if the direction suffix is missing.
    pub fn conn(&mut self, text: &str) -> Expression {
        let direction = text
            .chars()
            .last()
            .and_then(Direction::from_char)
            .unwrap_or_else(|| panic!("connector {text:?} needs a +/- suffix"));
        let label = self.interner.intern(&text[..text.len() - 1]);
        Expression::connector(direction, label)
    }

    /// Connector with a length limit.
    pub fn conn_len(&mut self, text: &str, limit: u32) -> Expression {
        self.conn(text).with_length_limit(limit)
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    pub fn interner_mut(&mut self) -> &mut Interner {
        &mut self.interner
    }

    /// Snapshot of the interner for building sentences.
    pub fn shared_interner(&self) -> Arc<Interner> {
        Arc::new(self.interner.clone())
    }

    /// Builds a sentence with one alternative per word; word `i` comes from
    /// lattice node `i`.
    pub fn sentence(&self, words: Vec<(&str, Expression)>) -> Sentence {
        let mut sentence = Sentence::new(self.shared_interner());
        for (i, (string, exp)) in words.into_iter().enumerate() {
            sentence.push_word(vec![alternative(string, exp, i as u32)]);
        }
        sentence
    }

    /// Builds a sentence whose words may have several alternatives.
    pub fn sentence_with_alternatives(&self, words: Vec<Vec<XNode>>) -> Sentence {
        let mut sentence = Sentence::new(self.shared_interner());
        for alternatives in words {
            sentence.push_word(alternatives);
        }
        sentence
    }
}

/// One word alternative coming from a single lattice node.
pub fn alternative(string: &str, exp: Expression, gword: u32) -> XNode {
    XNode::new(string, Arc::new(exp), GwordSet::single(GwordId(gword)))
}

pub fn and(children: Vec<Expression>) -> Expression {
    Expression::and(children)
}

pub fn or(children: Vec<Expression>) -> Expression {
    Expression::or(children)
}

/// `{exp}`: the expression or nothing.
pub fn opt(exp: Expression) -> Expression {
    Expression::or(vec![exp, Expression::and(vec![])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkforge_core::ExpressionKind;

    #[test]
    fn test_conn_parses_direction() {
        let mut dict = TestDictionary::new();
        let e = dict.conn("Ss-");
        match e.kind {
            ExpressionKind::Connector(term) => {
                assert_eq!(term.direction, Direction::Left);
                assert_eq!(dict.interner().resolve(term.label), Some("Ss"));
            }
            _ => panic!("expected connector"),
        }
    }

    #[test]
    #[should_panic(expected = "needs a +/- suffix")]
    fn test_conn_requires_direction() {
        TestDictionary::new().conn("S");
    }

    #[test]
    fn test_sentence_assigns_lattice_nodes() {
        let mut dict = TestDictionary::new();
        let a = dict.conn("A+");
        let b = dict.conn("A-");
        let sentence = dict.sentence(vec![("big.a", a), ("dog.n", b)]);
        assert_eq!(sentence.len(), 2);
        let word = sentence.word(1).unwrap();
        assert!(word.alternatives[0].gwords.contains(GwordId(1)));
    }
}
