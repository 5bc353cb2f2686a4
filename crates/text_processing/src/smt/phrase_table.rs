//! Phrase table: source phrase -> translation options, best first

use std::collections::HashMap;

use codemix_config::constants::smt::MAX_CANDIDATES_PER_SOURCE;

use super::alignment::TranslationTable;

pub type Phrase = Vec<String>;

/// One way to translate a source phrase
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOption {
    pub target: Phrase,
    /// Natural-log probability
    pub log_prob: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PhraseTable {
    entries: HashMap<Phrase, Vec<TranslationOption>>,
}

impl PhraseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, keeping the options of `source` sorted by descending log-prob
    pub fn add(&mut self, source: Phrase, target: Phrase, log_prob: f64) {
        let options = self.entries.entry(source).or_default();
        options.push(TranslationOption { target, log_prob });
        options.sort_by(|a, b| b.log_prob.total_cmp(&a.log_prob));
    }

    /// Options for a source phrase, best first
    pub fn translations_for(&self, source: &[String]) -> Option<&[TranslationOption]> {
        self.entries.get(source).map(Vec::as_slice)
    }

    pub fn contains(&self, source: &[String]) -> bool {
        self.entries.contains_key(source)
    }

    /// Number of source phrases
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of options over every source phrase
    pub fn num_options(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Build single-unit phrases from an alignment translation table
    ///
    /// Candidates of each source unit are ordered by ascending log-prob (ties
    /// by target text) and the first `min(MAX_CANDIDATES_PER_SOURCE, n) + 1`
    /// are kept. That keeps every candidate for small tables and
    /// `MAX_CANDIDATES_PER_SOURCE + 1` candidates for large ones.
    pub fn from_translation_table(table: &TranslationTable) -> Self {
        let mut entries = HashMap::with_capacity(table.len());

        for (source, candidates) in table.iter() {
            let limit = candidates.len().min(MAX_CANDIDATES_PER_SOURCE) + 1;

            let mut scored: Vec<(&String, f64)> =
                candidates.iter().map(|(target, &p)| (target, p.ln())).collect();
            scored.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(b.0)));
            scored.truncate(limit);

            let mut options: Vec<TranslationOption> = scored
                .into_iter()
                .map(|(target, log_prob)| TranslationOption {
                    target: vec![target.clone()],
                    log_prob,
                })
                .collect();
            options.sort_by(|a, b| b.log_prob.total_cmp(&a.log_prob));

            entries.insert(vec![source.clone()], options);
        }

        Self { entries }
    }
}
