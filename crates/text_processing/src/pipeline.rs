//! Code-switch normalization pipeline
//!
//! Order per batch: tokenize (raw input only) → formalize → rule
//! normalization → statistical slang translation → language detection →
//! matrix/embedding translation hops.

use std::sync::Arc;

use codemix_config::{CodeSwitchConfig, Settings};
use codemix_core::{
    join_tokens, LanguageDetector, LanguageLabel, LexicalFormalizer, TokenSequence, Tokenizer,
    Translator,
};
use serde::{Deserialize, Serialize};

use crate::detection::DetectorRegistry;
use crate::formalization::DictionaryFormalizer;
use crate::normalization::RuleNormalizer;
use crate::smt::SlangTranslator;
use crate::tokenizer::UnicodeTokenizer;
use crate::translation::TranslationClients;
use crate::{Result, TextProcessingError};

/// Pipeline input: raw texts or already tokenized sequences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeSwitchInput {
    Raw(Vec<String>),
    Tokenized(Vec<TokenSequence>),
}

impl CodeSwitchInput {
    pub fn len(&self) -> usize {
        match self {
            Self::Raw(texts) => texts.len(),
            Self::Tokenized(sequences) => sequences.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Matrix and embedding language of one utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LanguageMix {
    pub matrix: Option<LanguageLabel>,
    pub embed: Option<LanguageLabel>,
}

/// Determine matrix and embedding language from per-token labels
///
/// Labels are counted in first-seen order and stably sorted by ascending
/// count. The first linguistic label becomes the matrix language and the next
/// one the embedding language, so the least frequent language is the matrix.
pub fn matrix_embed_language(labels: &[LanguageLabel]) -> LanguageMix {
    let mut counts: Vec<(LanguageLabel, usize)> = Vec::new();
    for &label in labels {
        match counts.iter_mut().find(|(seen, _)| *seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label, 1)),
        }
    }
    counts.sort_by_key(|&(_, count)| count);

    let mut linguistic = counts
        .into_iter()
        .map(|(label, _)| label)
        .filter(LanguageLabel::is_linguistic);

    LanguageMix {
        matrix: linguistic.next(),
        embed: linguistic.next(),
    }
}

/// Collaborators of the pipeline
pub struct CodeSwitchComponents {
    pub tokenizer: Arc<dyn Tokenizer>,
    pub formalizer: Arc<dyn LexicalFormalizer>,
    pub rule_normalizer: Arc<RuleNormalizer>,
    pub slang_translator: Arc<SlangTranslator>,
    pub detector: Arc<dyn LanguageDetector>,
}

/// Turns code-mixed informal text into formal text in one target language
pub struct CodeSwitchNormalizer {
    tokenizer: Arc<dyn Tokenizer>,
    formalizer: Arc<dyn LexicalFormalizer>,
    rule_normalizer: Arc<RuleNormalizer>,
    slang_translator: Arc<SlangTranslator>,
    detector: Arc<dyn LanguageDetector>,
    clients: TranslationClients,
    config: CodeSwitchConfig,
}

impl CodeSwitchNormalizer {
    /// Create a pipeline without translation clients
    pub fn new(components: CodeSwitchComponents, config: CodeSwitchConfig) -> Self {
        Self {
            tokenizer: components.tokenizer,
            formalizer: components.formalizer,
            rule_normalizer: components.rule_normalizer,
            slang_translator: components.slang_translator,
            detector: components.detector,
            clients: TranslationClients::new(),
            config,
        }
    }

    /// Build every component from settings
    ///
    /// The slang translator starts untrained; train it through
    /// [`slang_translator`](Self::slang_translator) before normalizing.
    pub fn from_settings(settings: &Settings, registry: &DetectorRegistry) -> Result<Self> {
        let detector = registry.create(settings.code_switch.detector, settings)?;
        let formalizer =
            DictionaryFormalizer::from_file(&settings.resources.formalization_dict_path)?;
        let rule_normalizer =
            RuleNormalizer::from_config(&settings.resources, &settings.normalization)?;

        let components = CodeSwitchComponents {
            tokenizer: Arc::new(UnicodeTokenizer::new()),
            formalizer: Arc::new(formalizer),
            rule_normalizer: Arc::new(rule_normalizer),
            slang_translator: Arc::new(SlangTranslator::new(settings.slang_translation.clone())?),
            detector: Arc::from(detector),
        };

        tracing::info!(
            detector = %settings.code_switch.detector,
            target = %settings.code_switch.target_language,
            "Created code-switch normalizer"
        );
        Ok(Self::new(components, settings.code_switch.clone()))
    }

    /// Add a translation client for its (source, target) pair
    pub fn with_translation_client(mut self, client: Arc<dyn Translator>) -> Self {
        self.clients.insert(client);
        self
    }

    /// Replace all translation clients
    pub fn with_translation_clients(mut self, clients: TranslationClients) -> Self {
        self.clients = clients;
        self
    }

    pub fn config(&self) -> &CodeSwitchConfig {
        &self.config
    }

    pub fn target_language(&self) -> LanguageLabel {
        self.config.target_language
    }

    pub fn slang_translator(&self) -> &Arc<SlangTranslator> {
        &self.slang_translator
    }

    pub fn rule_normalizer(&self) -> &Arc<RuleNormalizer> {
        &self.rule_normalizer
    }

    /// Normalize a batch and translate every item into the target language
    ///
    /// Returns one string per input, in input order.
    pub async fn translate(
        &self,
        inputs: CodeSwitchInput,
        skip_normalization: bool,
    ) -> Result<Vec<String>> {
        let expected = inputs.len();
        let sequences = match inputs {
            CodeSwitchInput::Raw(texts) => self.tokenizer.tokenize(&texts)?,
            CodeSwitchInput::Tokenized(sequences) => sequences,
        };
        check_len("tokenization", expected, sequences.len())?;

        let sequences = if skip_normalization {
            sequences
        } else {
            self.normalize(&sequences)?
        };

        let labels = self.detector.predict(&sequences)?;
        check_len("language_detection", sequences.len(), labels.len())?;

        let mut outputs = Vec::with_capacity(sequences.len());
        for (tokens, labels) in sequences.iter().zip(&labels) {
            check_len("language_detection", tokens.len(), labels.len())?;
            let mix = matrix_embed_language(labels);
            outputs.push(self.translate_sequence(tokens, mix).await?);
        }

        tracing::debug!(
            inputs = expected,
            skip_normalization,
            detector = self.detector.name(),
            "Translated code-switch batch"
        );
        Ok(outputs)
    }

    /// [`translate`](Self::translate) with `skip_normalization` taken from config
    pub async fn run(&self, inputs: CodeSwitchInput) -> Result<Vec<String>> {
        self.translate(inputs, self.config.skip_normalization).await
    }

    /// Formalize, rule-normalize and slang-translate a batch of sequences
    pub fn normalize(&self, sequences: &[TokenSequence]) -> Result<Vec<TokenSequence>> {
        let normalized: Vec<TokenSequence> = sequences
            .iter()
            .map(|tokens| {
                let formal = self.formalizer.formalize(tokens);
                self.rule_normalizer.run(&formal)
            })
            .collect();
        self.slang_translator.translate_batch(&normalized)
    }

    async fn translate_sequence(&self, tokens: &[String], mix: LanguageMix) -> Result<String> {
        let mut text = join_tokens(tokens);
        let Some(matrix) = mix.matrix else {
            return Ok(text);
        };

        if let Some(embed) = mix.embed {
            text = self.hop(embed, matrix, &text).await?;
        }
        let target = self.config.target_language;
        if matrix != target {
            text = self.hop(matrix, target, &text).await?;
        }
        Ok(text)
    }

    async fn hop(&self, from: LanguageLabel, to: LanguageLabel, text: &str) -> Result<String> {
        let client = self
            .clients
            .get(from, to)
            .ok_or(TextProcessingError::MissingTranslationClient { from, to })?;
        let translated = client.translate(text).await?;
        tracing::debug!(
            from = %from,
            to = %to,
            client = client.name(),
            "Translation hop"
        );
        Ok(translated)
    }
}

fn check_len(stage: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(TextProcessingError::LengthMismatch {
            stage,
            expected,
            actual,
        });
    }
    Ok(())
}
