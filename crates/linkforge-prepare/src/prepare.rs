//! The sentence preparation pipeline.
//!
//! Stages run strictly in order: expansion (with merging of alternatives),
//! duplicate elimination, connector setup, provenance tagging. Resource
//! terminations are consulted after every word's expansion, and before each
//! word when expansion runs in parallel. Any error leaves
//! the sentence with empty word lists and a reset arena.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use linkforge_config::{ExpansionThreadCount, ParseOptions};
use linkforge_core::{LinkForgeError, Result, Sentence, XNode};

use crate::dedup::eliminate_duplicate_disjuncts;
use crate::diagnostics::{all_disjuncts, disjunct_counts, VERBOSITY_COUNTS, VERBOSITY_DUMP};
use crate::expand::{build_disjuncts_for_exp, expand_expression, Clause};
use crate::merge::merge_alternatives;
use crate::provenance::gword_record_in_connector;
use crate::reachability::setup_connectors;
use crate::scope::{PrepareScope, SharedScope};
use crate::statistics::PrepareStatistics;
use crate::termination::{self, ResourceTermination, Termination};

/// Clause lists for one word, one list per alternative.
type WordClauses<'e> = Vec<Vec<Clause<'e>>>;

/// Prepares sentences for parsing under one set of options.
///
/// # Example
///
/// ```
/// use linkforge_config::ParseOptions;
/// use linkforge_prepare::Preparer;
/// use linkforge_test::{and, TestDictionary};
///
/// let mut dict = TestDictionary::new();
/// let det = dict.conn("D+");
/// let noun = and(vec![dict.conn("D-"), dict.conn("S+")]);
/// let verb = dict.conn("S-");
/// let mut sentence = dict.sentence(vec![("the", det), ("dog", noun), ("ran", verb)]);
///
/// let stats = Preparer::new(&ParseOptions::default()).prepare(&mut sentence).unwrap();
/// assert_eq!(stats.disjuncts_remaining(), 3);
/// ```
#[derive(Debug)]
pub struct Preparer {
    options: ParseOptions,
    resources: ResourceTermination,
    extra: Vec<Box<dyn Termination>>,
}

impl Preparer {
    pub fn new(options: &ParseOptions) -> Self {
        Self {
            options: options.clone(),
            resources: termination::from_options(options),
            extra: Vec::new(),
        }
    }

    /// Adds a termination checked alongside the configured resource budget.
    pub fn with_termination(mut self, termination: impl Termination + 'static) -> Self {
        self.extra.push(Box::new(termination));
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Builds every word's disjunct list.
    ///
    /// On error no partial list is left on the sentence.
    pub fn prepare(&self, sentence: &mut Sentence) -> Result<PrepareStatistics> {
        let start = Instant::now();
        info!(
            event = "prepare_start",
            words = sentence.len(),
            cost_cutoff = self.options.disjunct_cost,
        );

        sentence.reset_arena(self.options.arena.limits());
        match self.run(sentence, start) {
            Ok(stats) => Ok(stats),
            Err(err) => {
                sentence.discard_disjuncts();
                warn!(
                    event = "prepare_aborted",
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %err,
                );
                Err(err)
            }
        }
    }

    fn run(&self, sentence: &mut Sentence, start: Instant) -> Result<PrepareStatistics> {
        self.options
            .validate()
            .map_err(|e| LinkForgeError::Config(e.to_string()))?;
        validate_expressions(sentence)?;

        let mut stats = PrepareStatistics::new(sentence.len());

        let stage = Instant::now();
        self.build_disjuncts(sentence, &mut stats, start)?;
        stats.expansion_time = stage.elapsed();
        info!(
            event = "disjuncts_built",
            disjuncts = stats.disjuncts_expanded,
            duration_ms = stats.expansion_time.as_millis() as u64,
        );
        if self.options.verbosity >= VERBOSITY_COUNTS {
            debug!("after expansion: {}", disjunct_counts(sentence));
        }

        let stage = Instant::now();
        let policy = self.options.duplicate_cost_policy;
        let (words, arena) = sentence.split_mut();
        for (word, counts) in words.iter_mut().zip(stats.per_word.iter_mut()) {
            let outcome = eliminate_duplicate_disjuncts(arena, word.disjuncts, policy)?;
            word.disjuncts = outcome.head;
            counts.after_dedup = outcome.kept;
            stats.duplicates_removed += outcome.removed;
        }
        stats.dedup_time = stage.elapsed();
        info!(
            event = "duplicates_eliminated",
            removed = stats.duplicates_removed,
            remaining = stats.disjuncts_after_dedup(),
            duration_ms = stats.dedup_time.as_millis() as u64,
        );
        if self.options.verbosity >= VERBOSITY_COUNTS {
            debug!("after duplicate elimination: {}", disjunct_counts(sentence));
        }

        let stage = Instant::now();
        let outcome = setup_connectors(sentence);
        stats.out_of_range_removed = outcome.removed;
        for counts in &mut stats.per_word {
            counts.after_reachability = sentence.disjunct_count(counts.word);
        }
        stats.connectors_tagged = gword_record_in_connector(sentence);
        stats.connectors_allocated = sentence.arena.connectors.len();
        stats.setup_time = stage.elapsed();
        info!(
            event = "connectors_set_up",
            removed = outcome.removed,
            remaining = outcome.kept,
            duration_ms = stats.setup_time.as_millis() as u64,
        );
        if self.options.verbosity >= VERBOSITY_DUMP {
            debug!("prepared disjuncts:\n{}", all_disjuncts(sentence));
        }

        stats.total_time = start.elapsed();
        info!(
            event = "prepare_end",
            words = stats.words,
            disjuncts = stats.disjuncts_remaining(),
            connectors = stats.connectors_allocated,
            duration_ms = stats.total_time.as_millis() as u64,
        );
        Ok(stats)
    }

    /// Expands, materialises and merges every word, checking terminations
    /// after each one.
    fn build_disjuncts(
        &self,
        sentence: &mut Sentence,
        stats: &mut PrepareStatistics,
        start: Instant,
    ) -> Result<()> {
        // Owned copies of the alternatives let clauses borrow expressions
        // while the sentence's word lists are written.
        let alternatives: Vec<Vec<XNode>> = sentence
            .words()
            .iter()
            .map(|w| w.alternatives.clone())
            .collect();
        let cutoff = self.options.disjunct_cost;

        let shared = SharedScope::started_at(start);
        let mut expanded = self
            .expand_parallel(&alternatives, &shared)?
            .map(Vec::into_iter);
        let mut scope = PrepareScope::started_at(start);
        let (words, arena) = sentence.split_mut();

        for (w, word) in words.iter_mut().enumerate() {
            let lists = match expanded.as_mut().and_then(|it| it.next()) {
                Some(lists) => lists,
                None => expand_word(&alternatives[w], cutoff),
            };

            let mut heads = Vec::with_capacity(lists.len());
            for (x, clauses) in alternatives[w].iter().zip(&lists) {
                let originating = arena.gword_sets.intern(x.gwords.clone())?;
                heads.push(build_disjuncts_for_exp(arena, clauses, &x.string, originating)?);
            }
            word.disjuncts = merge_alternatives(&mut arena.disjuncts, heads);

            let count = arena.list_len(word.disjuncts);
            stats.per_word[w].expanded = count;
            stats.disjuncts_expanded += count;
            scope.record_word(count);

            if let Some(reason) = self.fired(&scope) {
                return Err(LinkForgeError::ResourcesExhausted { word: w, reason });
            }
        }
        Ok(())
    }

    /// Expands all words up front on a rayon pool, or returns `None` when
    /// expansion is configured to run inline.
    ///
    /// Each worker checks the terminations against `shared` before starting
    /// a word. Once one fires, no further word is expanded.
    pub(crate) fn expand_parallel<'e>(
        &self,
        alternatives: &'e [Vec<XNode>],
        shared: &SharedScope,
    ) -> Result<Option<Vec<WordClauses<'e>>>> {
        let cutoff = self.options.disjunct_cost;
        let expand_all = || {
            alternatives
                .par_iter()
                .enumerate()
                .map(|(w, alts)| self.expand_word_unless_stopped(w, alts, cutoff, shared))
                .collect::<Option<Vec<_>>>()
        };

        let expanded = match self.options.expansion_threads {
            ExpansionThreadCount::None => return Ok(None),
            ExpansionThreadCount::Auto => expand_all(),
            ExpansionThreadCount::Count(n) => {
                match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
                    Ok(pool) => pool.install(expand_all),
                    Err(err) => {
                        warn!(
                            event = "thread_pool_unavailable",
                            threads = n,
                            error = %err,
                        );
                        expand_all()
                    }
                }
            }
        };

        match expanded {
            Some(lists) => Ok(Some(lists)),
            None => {
                let (word, reason) = shared.stop_reason().cloned().unwrap_or_default();
                Err(LinkForgeError::ResourcesExhausted { word, reason })
            }
        }
    }

    fn expand_word_unless_stopped<'e>(
        &self,
        word: usize,
        alternatives: &'e [XNode],
        cutoff: f64,
        shared: &SharedScope,
    ) -> Option<WordClauses<'e>> {
        if shared.is_stopped() {
            return None;
        }
        if let Some(reason) = self.fired(&shared.snapshot()) {
            shared.stop(word, reason);
            return None;
        }
        let lists = expand_word(alternatives, cutoff);
        shared.record_word(lists.iter().map(Vec::len).sum());
        Some(lists)
    }

    fn fired(&self, scope: &PrepareScope) -> Option<String> {
        self.resources
            .reason(scope)
            .or_else(|| self.extra.iter().find_map(|t| t.reason(scope)))
    }
}

fn expand_word(alternatives: &[XNode], cutoff: f64) -> WordClauses<'_> {
    alternatives
        .iter()
        .map(|x| expand_expression(&x.expression, cutoff))
        .collect()
}

fn validate_expressions(sentence: &Sentence) -> Result<()> {
    for word in sentence.words() {
        for x in &word.alternatives {
            x.expression
                .validate(sentence.interner())
                .map_err(|source| LinkForgeError::MalformedExpression {
                    word: word.index,
                    string: x.string.to_string(),
                    source,
                })?;
        }
    }
    Ok(())
}

/// Prepares one sentence with the given options.
pub fn prepare_to_parse(sentence: &mut Sentence, options: &ParseOptions) -> Result<PrepareStatistics> {
    Preparer::new(options).prepare(sentence)
}

/// Prepares independent sentences in parallel.
///
/// Results are in input order. A failed sentence does not affect the others.
pub fn prepare_batch(sentences: &mut [Sentence], options: &ParseOptions) -> Vec<Result<PrepareStatistics>> {
    let preparer = Preparer::new(options);
    sentences
        .par_iter_mut()
        .map(|sentence| preparer.prepare(sentence))
        .collect()
}
