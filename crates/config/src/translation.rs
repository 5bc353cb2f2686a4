//! Statistical slang translation configuration

use serde::{Deserialize, Serialize};

use crate::constants::{decoder, smt};

/// Unit the statistical translator works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationUnit {
    /// Whole tokens
    #[default]
    Word,
    /// Characters of each token, with an explicit word-boundary unit
    Char,
}

/// Word alignment model variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentAlgorithm {
    /// Lexical translation probabilities only
    #[default]
    Ibm1,
    /// Lexical translation plus position-dependent alignment probabilities
    Ibm2,
    /// Adds fertility, distortion and NULL insertion on top of IBM Model 2
    Ibm3,
}

/// Stack decoder tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Reordering penalty base, in (0, 1]
    #[serde(default = "default_distortion_factor")]
    pub distortion_factor: f64,
    /// Threshold pruning ratio, in [0, 1]; 0 keeps everything within stack size
    #[serde(default = "default_beam_threshold")]
    pub beam_threshold: f64,
    /// Maximum hypotheses per stack
    #[serde(default = "default_stack_size")]
    pub stack_size: usize,
    /// Penalty per produced target unit
    #[serde(default = "default_word_penalty")]
    pub word_penalty: f64,
    /// Language-model log-probability for units never seen in training
    #[serde(default = "default_oov_log_prob")]
    pub oov_log_prob: f64,
}

fn default_distortion_factor() -> f64 {
    decoder::DISTORTION_FACTOR
}

fn default_beam_threshold() -> f64 {
    decoder::BEAM_THRESHOLD
}

fn default_stack_size() -> usize {
    decoder::STACK_SIZE
}

fn default_word_penalty() -> f64 {
    decoder::WORD_PENALTY
}

fn default_oov_log_prob() -> f64 {
    decoder::OOV_LOG_PROB
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            distortion_factor: default_distortion_factor(),
            beam_threshold: default_beam_threshold(),
            stack_size: default_stack_size(),
            word_penalty: default_word_penalty(),
            oov_log_prob: default_oov_log_prob(),
        }
    }
}

/// Slang translator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlangTranslationConfig {
    /// Word- or character-level translation
    #[serde(default)]
    pub unit: TranslationUnit,
    /// Alignment model variant
    #[serde(default)]
    pub alignment: AlignmentAlgorithm,
    /// N for the target n-gram language model
    #[serde(default = "default_ngram_order")]
    pub ngram_order: usize,
    /// Alignment training iterations
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Decoder settings
    #[serde(default)]
    pub decoder: DecoderConfig,
}

fn default_ngram_order() -> usize {
    smt::NGRAM_ORDER
}

fn default_iterations() -> usize {
    smt::ITERATIONS
}

impl Default for SlangTranslationConfig {
    fn default() -> Self {
        Self {
            unit: TranslationUnit::Word,
            alignment: AlignmentAlgorithm::Ibm1,
            ngram_order: default_ngram_order(),
            iterations: default_iterations(),
            decoder: DecoderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SlangTranslationConfig::default();
        assert_eq!(config.unit, TranslationUnit::Word);
        assert_eq!(config.alignment, AlignmentAlgorithm::Ibm1);
        assert_eq!(config.ngram_order, 3);
        assert_eq!(config.decoder.stack_size, 100);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SlangTranslationConfig = toml::from_str(
            r#"
            unit = "char"
            alignment = "ibm2"

            [decoder]
            stack_size = 20
            "#,
        )
        .unwrap();

        assert_eq!(config.unit, TranslationUnit::Char);
        assert_eq!(config.alignment, AlignmentAlgorithm::Ibm2);
        assert_eq!(config.iterations, 10);
        assert_eq!(config.decoder.stack_size, 20);
        assert_eq!(config.decoder.distortion_factor, 0.5);
    }

    #[test]
    fn test_ibm3_alignment_parses() {
        let config: SlangTranslationConfig = toml::from_str(r#"alignment = "ibm3""#).unwrap();
        assert_eq!(config.alignment, AlignmentAlgorithm::Ibm3);
    }
}
