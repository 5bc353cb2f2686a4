//! Target-side n-gram language model
//!
//! Maximum-likelihood n-gram probabilities are estimated from padded
//! sentences (`<s>` ... `</s>`) using every n-gram of order 1 through N.
//! Scoring backs off to shorter histories with a fixed log-space penalty.

use std::collections::HashMap;

pub const SENTENCE_START: &str = "<s>";
pub const SENTENCE_END: &str = "</s>";

/// ln(0.4), added once per back-off step
pub const BACKOFF_LOG_WEIGHT: f64 = -0.916_290_731_874_155;

/// Scores target phrases for the stack decoder
pub trait LanguageModelScorer: Send + Sync {
    /// Log-probability of `phrase` following `context`
    ///
    /// Only the given context is used as history; nothing is assumed about
    /// where the sentence starts.
    fn score(&self, context: &[String], phrase: &[String]) -> f64;

    /// Change in the running sentence score when `phrase` is appended to the
    /// partial translation `context`, which starts at the sentence start
    fn score_change(&self, context: &[String], phrase: &[String]) -> f64;
}

/// Pad a sentence with `order - 1` start and end symbols
pub fn pad_sentence(sentence: &[String], order: usize) -> Vec<String> {
    let pad = order.saturating_sub(1);
    let mut padded = Vec::with_capacity(sentence.len() + 2 * pad);
    padded.extend(std::iter::repeat(SENTENCE_START.to_string()).take(pad));
    padded.extend(sentence.iter().cloned());
    padded.extend(std::iter::repeat(SENTENCE_END.to_string()).take(pad));
    padded
}

/// Every contiguous n-gram of order 1 through `max_order`
pub fn everygrams(tokens: &[String], max_order: usize) -> Vec<&[String]> {
    let mut grams = Vec::new();
    for start in 0..tokens.len() {
        for n in 1..=max_order {
            if start + n > tokens.len() {
                break;
            }
            grams.push(&tokens[start..start + n]);
        }
    }
    grams
}

/// Maximum-likelihood log-probabilities of observed n-grams
///
/// `log_prob(w1..wn) = ln(count(w1..wn) / count(w1..wn-1 followed by anything))`.
/// Unobserved n-grams score negative infinity.
#[derive(Debug, Clone, Default)]
pub struct NgramTable {
    log_probs: HashMap<Vec<String>, f64>,
    order: usize,
}

impl NgramTable {
    /// Count every padded everygram of the corpus and normalize per history
    pub fn fit(corpus: &[Vec<String>], order: usize) -> Self {
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
        let mut history_totals: HashMap<Vec<String>, usize> = HashMap::new();

        for sentence in corpus {
            let padded = pad_sentence(sentence, order);
            for gram in everygrams(&padded, order) {
                *counts.entry(gram.to_vec()).or_insert(0) += 1;
                *history_totals.entry(gram[..gram.len() - 1].to_vec()).or_insert(0) += 1;
            }
        }

        let log_probs = counts
            .into_iter()
            .map(|(gram, count)| {
                let total = history_totals[&gram[..gram.len() - 1]];
                let lp = (count as f64 / total as f64).ln();
                (gram, lp)
            })
            .collect();

        Self { log_probs, order }
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn log_prob(&self, gram: &[String]) -> f64 {
        self.log_probs
            .get(gram)
            .copied()
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// Number of distinct n-grams
    pub fn len(&self) -> usize {
        self.log_probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_probs.is_empty()
    }
}

/// N-gram model with fixed-weight back-off and an out-of-vocabulary floor
#[derive(Debug, Clone)]
pub struct BackoffLanguageModel {
    table: NgramTable,
    oov_log_prob: f64,
}

impl BackoffLanguageModel {
    pub fn new(table: NgramTable, oov_log_prob: f64) -> Self {
        Self {
            table,
            oov_log_prob,
        }
    }

    /// Fit a model of the given order on target sentences
    pub fn fit(corpus: &[Vec<String>], order: usize, oov_log_prob: f64) -> Self {
        Self::new(NgramTable::fit(corpus, order.max(1)), oov_log_prob)
    }

    pub fn table(&self) -> &NgramTable {
        &self.table
    }

    /// Log-probability of `word` after `history`, backing off to shorter
    /// histories until an observed n-gram is found
    pub fn word_log_prob(&self, history: &[String], word: &str) -> f64 {
        let max_history = self.table.order().saturating_sub(1).min(history.len());
        let mut gram: Vec<String> = Vec::with_capacity(max_history + 1);

        for k in (0..=max_history).rev() {
            gram.clear();
            gram.extend_from_slice(&history[history.len() - k..]);
            gram.push(word.to_string());

            let lp = self.table.log_prob(&gram);
            if lp.is_finite() {
                return lp + (max_history - k) as f64 * BACKOFF_LOG_WEIGHT;
            }
        }

        self.oov_log_prob
    }

    fn score_with_history(&self, mut history: Vec<String>, phrase: &[String]) -> f64 {
        let mut total = 0.0;
        for word in phrase {
            total += self.word_log_prob(&history, word);
            history.push(word.clone());
        }
        total
    }
}

impl LanguageModelScorer for BackoffLanguageModel {
    fn score(&self, context: &[String], phrase: &[String]) -> f64 {
        self.score_with_history(context.to_vec(), phrase)
    }

    fn score_change(&self, context: &[String], phrase: &[String]) -> f64 {
        let pad = self.table.order().saturating_sub(1);
        let mut history = Vec::with_capacity(pad + context.len() + phrase.len());
        history.extend(std::iter::repeat(SENTENCE_START.to_string()).take(pad));
        history.extend(context.iter().cloned());
        self.score_with_history(history, phrase)
    }
}
