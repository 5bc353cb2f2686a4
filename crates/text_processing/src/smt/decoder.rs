//! Phrase-based stack decoder
//!
//! Hypotheses are grouped into stacks by the number of source units they
//! cover. Each hypothesis is expanded with every translation option of every
//! untranslated span, scored with the phrase table, the language model and a
//! distortion penalty, and pushed into the stack of its new coverage. Stacks
//! are pruned by size and by a relative score threshold, with the future cost
//! of the untranslated spans added to the score so hypotheses of equal
//! coverage compare fairly.

use std::borrow::Cow;

use codemix_config::DecoderConfig;

use super::language_model::LanguageModelScorer;
use super::phrase_table::{PhraseTable, TranslationOption};

/// A partial translation, stored in the decoder's arena
#[derive(Debug, Clone)]
struct Hypothesis {
    raw_score: f64,
    future_score: f64,
    /// Source span `[start, end)` translated by this step
    src_span: Option<(usize, usize)>,
    /// Target phrase produced by this step
    target: Vec<String>,
    previous: Option<usize>,
    coverage: Vec<bool>,
}

impl Hypothesis {
    fn initial(len: usize) -> Self {
        Self {
            raw_score: 0.0,
            future_score: 0.0,
            src_span: None,
            target: Vec::new(),
            previous: None,
            coverage: vec![false; len],
        }
    }

    fn score(&self) -> f64 {
        self.raw_score + self.future_score
    }

    fn covered(&self) -> usize {
        self.coverage.iter().filter(|&&c| c).count()
    }

    /// Maximal runs of untranslated positions as `[start, end)` spans
    fn untranslated_spans(&self) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();
        let mut start = None;
        for (i, &covered) in self.coverage.iter().enumerate() {
            match (covered, start) {
                (false, None) => start = Some(i),
                (true, Some(s)) => {
                    spans.push((s, i));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            spans.push((s, self.coverage.len()));
        }
        spans
    }
}

/// Hypotheses sharing a coverage count, best first
#[derive(Debug)]
struct Stack {
    items: Vec<usize>,
    max_size: usize,
    log_beam_threshold: f64,
}

impl Stack {
    fn new(max_size: usize, beam_threshold: f64) -> Self {
        let log_beam_threshold = if beam_threshold == 0.0 {
            f64::NEG_INFINITY
        } else {
            beam_threshold.ln()
        };
        Self {
            items: Vec::new(),
            max_size: max_size.max(1),
            log_beam_threshold,
        }
    }

    fn push(&mut self, id: usize, arena: &[Hypothesis]) {
        let score = arena[id].score();
        let position = self
            .items
            .iter()
            .position(|&other| arena[other].score().total_cmp(&score).is_lt())
            .unwrap_or(self.items.len());
        self.items.insert(position, id);
        self.items.truncate(self.max_size);
        self.threshold_prune(arena);
    }

    fn threshold_prune(&mut self, arena: &[Hypothesis]) {
        let Some(&best) = self.items.first() else {
            return;
        };
        let threshold = arena[best].score() + self.log_beam_threshold;
        while let Some(&worst) = self.items.last() {
            if arena[worst].score() < threshold {
                self.items.pop();
            } else {
                break;
            }
        }
    }

    fn best(&self) -> Option<usize> {
        self.items.first().copied()
    }
}

/// Stack decoder over a phrase table and a language model
pub struct StackDecoder<'a> {
    phrase_table: &'a PhraseTable,
    language_model: &'a dyn LanguageModelScorer,
    config: &'a DecoderConfig,
}

impl<'a> StackDecoder<'a> {
    pub fn new(
        phrase_table: &'a PhraseTable,
        language_model: &'a dyn LanguageModelScorer,
        config: &'a DecoderConfig,
    ) -> Self {
        Self {
            phrase_table,
            language_model,
            config,
        }
    }

    /// Translate a unit sequence
    ///
    /// Returns an empty sequence when no hypothesis covers the whole input.
    pub fn translate(&self, src: &[String]) -> Vec<String> {
        let n = src.len();
        let phrase_ends = self.find_all_src_phrases(src);
        let future_costs = self.compute_future_scores(src);

        let mut arena = vec![Hypothesis::initial(n)];
        let mut stacks: Vec<Stack> = (0..=n)
            .map(|_| Stack::new(self.config.stack_size, self.config.beam_threshold))
            .collect();
        stacks[0].push(0, &arena);

        for depth in 0..n {
            let ids = stacks[depth].items.clone();
            for id in ids {
                for (start, end) in arena[id].untranslated_spans() {
                    for phrase_end in phrase_ends[start].iter().copied().filter(|&e| e <= end) {
                        let span = (start, phrase_end);
                        for option in self.options_for(&src[start..phrase_end]).iter() {
                            let raw_score = self.expansion_score(&arena, id, option, span);
                            let mut coverage = arena[id].coverage.clone();
                            coverage[start..phrase_end].iter_mut().for_each(|c| *c = true);

                            let mut hypothesis = Hypothesis {
                                raw_score,
                                future_score: 0.0,
                                src_span: Some(span),
                                target: option.target.clone(),
                                previous: Some(id),
                                coverage,
                            };
                            hypothesis.future_score =
                                future_score(&hypothesis, &future_costs);

                            let covered = hypothesis.covered();
                            arena.push(hypothesis);
                            let new_id = arena.len() - 1;
                            stacks[covered].push(new_id, &arena);
                        }
                    }
                }
            }
        }

        match stacks[n].best() {
            Some(best) => translation_so_far(&arena, best),
            None => {
                tracing::warn!(
                    units = n,
                    "No complete translation found; consider a larger stack size or beam threshold"
                );
                Vec::new()
            }
        }
    }

    /// Options for a source phrase; unknown single units translate to themselves
    fn options_for(&self, phrase: &[String]) -> Cow<'a, [TranslationOption]> {
        match self.phrase_table.translations_for(phrase) {
            Some(options) => Cow::Borrowed(options),
            None if phrase.len() == 1 => Cow::Owned(vec![TranslationOption {
                target: phrase.to_vec(),
                log_prob: 0.0,
            }]),
            None => Cow::Owned(Vec::new()),
        }
    }

    /// For each start position, every end position of a translatable phrase
    fn find_all_src_phrases(&self, src: &[String]) -> Vec<Vec<usize>> {
        let n = src.len();
        (0..n)
            .map(|start| {
                (start + 1..=n)
                    .filter(|&end| end - start == 1 || self.phrase_table.contains(&src[start..end]))
                    .collect()
            })
            .collect()
    }

    /// Best achievable score of every source span, ignoring reordering and
    /// cross-phrase language model context
    fn compute_future_scores(&self, src: &[String]) -> Vec<Vec<f64>> {
        let n = src.len();
        let mut scores = vec![vec![f64::NEG_INFINITY; n + 1]; n + 1];

        for length in 1..=n {
            for start in 0..=n - length {
                let end = start + length;
                if let Some(best) = self.options_for(&src[start..end]).first() {
                    scores[start][end] =
                        best.log_prob + self.language_model.score(&[], &best.target);
                }
                for mid in start + 1..end {
                    let combined = scores[start][mid] + scores[mid][end];
                    if combined > scores[start][end] {
                        scores[start][end] = combined;
                    }
                }
            }
        }

        scores
    }

    fn expansion_score(
        &self,
        arena: &[Hypothesis],
        previous: usize,
        option: &TranslationOption,
        span: (usize, usize),
    ) -> f64 {
        let context = translation_so_far(arena, previous);
        let mut score = arena[previous].raw_score + option.log_prob;
        score += self.language_model.score_change(&context, &option.target);
        score += self.distortion_score(&arena[previous], span.0);
        score -= option.target.len() as f64 * self.config.word_penalty;
        score
    }

    fn distortion_score(&self, previous: &Hypothesis, next_start: usize) -> f64 {
        match previous.src_span {
            None => 0.0,
            Some((_, previous_end)) => {
                let distance = next_start.abs_diff(previous_end) as f64;
                distance * self.config.distortion_factor.ln()
            }
        }
    }
}

fn future_score(hypothesis: &Hypothesis, costs: &[Vec<f64>]) -> f64 {
    hypothesis
        .untranslated_spans()
        .into_iter()
        .map(|(start, end)| costs[start][end])
        .sum()
}

/// Target units of a hypothesis and all its predecessors, in order
fn translation_so_far(arena: &[Hypothesis], id: usize) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut current = Some(id);
    while let Some(i) = current {
        phrases.push(&arena[i].target);
        current = arena[i].previous;
    }
    phrases.into_iter().rev().flatten().cloned().collect()
}
