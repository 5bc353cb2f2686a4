//! Statistical slang translation
//!
//! A monolingual phrase-based translator from informal to formal text:
//! word alignment (IBM Model 1, 2 or 3) over masked parallel pairs, a phrase
//! table built from the alignment, a target-side n-gram language model and a
//! stack decoder. Works on word units or on character units.
//!
//! Training swaps the whole model at once; decoding only ever reads it, so a
//! trained translator can be shared between threads.

pub mod alignment;
pub mod decoder;
pub mod language_model;
pub mod phrase_table;
pub mod units;

pub use alignment::{train_alignment, TranslationTable, MIN_PROB};
pub use decoder::StackDecoder;
pub use language_model::{BackoffLanguageModel, LanguageModelScorer, NgramTable};
pub use phrase_table::{Phrase, PhraseTable, TranslationOption};
pub use units::{from_units, to_units, WORD_BOUNDARY};

use std::sync::Arc;

use codemix_config::SlangTranslationConfig;
use parking_lot::RwLock;

use crate::classify::mask_tokens;
use crate::{Result, TextProcessingError};

/// A parallel training pair: informal tokens, formal tokens
pub type ParallelPair = (Vec<String>, Vec<String>);

/// Everything produced by one training run
#[derive(Debug)]
pub struct TrainedModel {
    phrase_table: PhraseTable,
    language_model: BackoffLanguageModel,
}

impl TrainedModel {
    pub fn phrase_table(&self) -> &PhraseTable {
        &self.phrase_table
    }

    pub fn language_model(&self) -> &BackoffLanguageModel {
        &self.language_model
    }
}

/// Trainable informal-to-formal translator
pub struct SlangTranslator {
    config: SlangTranslationConfig,
    model: RwLock<Option<Arc<TrainedModel>>>,
}

impl SlangTranslator {
    /// Create an untrained translator
    ///
    /// Rejects decoder settings that would turn hypothesis scores into NaN or
    /// leave the stacks empty.
    pub fn new(config: SlangTranslationConfig) -> Result<Self> {
        let decoder = &config.decoder;
        let invalid = if !(decoder.distortion_factor > 0.0 && decoder.distortion_factor <= 1.0) {
            Some(format!(
                "distortion_factor must be in (0, 1], got {}",
                decoder.distortion_factor
            ))
        } else if !(0.0..=1.0).contains(&decoder.beam_threshold) {
            Some(format!(
                "beam_threshold must be in [0, 1], got {}",
                decoder.beam_threshold
            ))
        } else if decoder.stack_size == 0 {
            Some("stack_size must be at least 1".to_string())
        } else if config.ngram_order == 0 {
            Some("ngram_order must be at least 1".to_string())
        } else {
            None
        };
        if let Some(reason) = invalid {
            return Err(TextProcessingError::InvalidArgument(reason));
        }

        Ok(Self {
            config,
            model: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &SlangTranslationConfig {
        &self.config
    }

    pub fn is_trained(&self) -> bool {
        self.model.read().is_some()
    }

    /// The current trained model, if any
    pub fn model(&self) -> Option<Arc<TrainedModel>> {
        self.model.read().clone()
    }

    /// Train on parallel (informal, formal) token pairs
    ///
    /// Both sides are masked before segmentation. Replaces any previously
    /// trained model.
    pub fn train(&self, pairs: &[ParallelPair], iterations: usize) -> Result<()> {
        if iterations == 0 {
            return Err(TextProcessingError::InvalidArgument(
                "iterations must be at least 1".to_string(),
            ));
        }

        let unit = self.config.unit;
        let corpus: Vec<ParallelPair> = pairs
            .iter()
            .map(|(informal, formal)| {
                (
                    to_units(&mask_tokens(informal).tokens, unit),
                    to_units(&mask_tokens(formal).tokens, unit),
                )
            })
            .collect();

        let translation_table = train_alignment(self.config.alignment, &corpus, iterations);
        let phrase_table = PhraseTable::from_translation_table(&translation_table);

        let targets: Vec<Vec<String>> = corpus.into_iter().map(|(_, formal)| formal).collect();
        let language_model = BackoffLanguageModel::fit(
            &targets,
            self.config.ngram_order,
            self.config.decoder.oov_log_prob,
        );

        tracing::info!(
            pairs = pairs.len(),
            iterations,
            unit = ?unit,
            alignment = ?self.config.alignment,
            phrases = phrase_table.len(),
            ngrams = language_model.table().len(),
            "Trained slang translator"
        );

        *self.model.write() = Some(Arc::new(TrainedModel {
            phrase_table,
            language_model,
        }));
        Ok(())
    }

    /// Translate one informal token sequence
    pub fn test(&self, tokens: &[String]) -> Result<Vec<String>> {
        let model = self.model().ok_or(TextProcessingError::NotTrained)?;
        Ok(self.decode(&model, tokens))
    }

    /// Translate several token sequences with one model snapshot
    pub fn translate_batch(&self, sequences: &[Vec<String>]) -> Result<Vec<Vec<String>>> {
        let model = self.model().ok_or(TextProcessingError::NotTrained)?;
        Ok(sequences
            .iter()
            .map(|tokens| self.decode(&model, tokens))
            .collect())
    }

    fn decode(&self, model: &TrainedModel, tokens: &[String]) -> Vec<String> {
        let unit = self.config.unit;
        let masked = mask_tokens(tokens);
        let units = to_units(&masked.tokens, unit);

        let decoder = StackDecoder::new(
            &model.phrase_table,
            &model.language_model,
            &self.config.decoder,
        );
        let translated = decoder.translate(&units);

        tracing::debug!(
            input_units = units.len(),
            output_units = translated.len(),
            "Decoded sequence"
        );

        from_units(translated, unit)
    }
}
