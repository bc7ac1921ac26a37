//! Verbosity-gated dumps of a sentence's disjunct lists.
//!
//! These strings are emitted through `tracing::debug!` by the pipeline and
//! never influence the prepared result.

use std::fmt::Write;

use linkforge_core::{DisjunctDisplay, Sentence, Word};

/// Verbosity at which per-word disjunct counts are logged.
pub const VERBOSITY_COUNTS: u8 = 5;

/// Verbosity at which every surviving disjunct is logged.
pub const VERBOSITY_DUMP: u8 = 102;

fn word_label(word: &Word) -> &str {
    word.alternatives.first().map_or("", |x| &x.string)
}

/// One line of `word(count)` entries in sentence order.
pub fn disjunct_counts(sentence: &Sentence) -> String {
    let mut out = String::new();
    for word in sentence.words() {
        if !out.is_empty() {
            out.push(' ');
        }
        let count = sentence.disjunct_count(word.index);
        let _ = write!(out, "{}({})", word_label(word), count);
    }
    out
}

/// Every disjunct of every word, one per line, grouped by word.
pub fn all_disjuncts(sentence: &Sentence) -> String {
    let mut out = String::new();
    for word in sentence.words() {
        let _ = writeln!(out, "[{}] {}:", word.index, word_label(word));
        for (id, _) in sentence.arena.disjuncts(word.disjuncts) {
            let shown = DisjunctDisplay::new(&sentence.arena, sentence.interner(), id);
            let _ = writeln!(out, "    {}", shown);
        }
    }
    out
}
