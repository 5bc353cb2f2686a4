//! Rule-based slang normalization
//!
//! Rewrites informal tokens with a fixed, ordered pipeline:
//! prefix → numeric → suffix → reduplication → repetition reduction → custom.
//! Tokens found in the formal vocabulary are left alone.

mod rules;
mod vocabulary;

pub use rules::{
    AffixRule, NumericRule, RegexRule, RuleSet, DEFAULT_NUMERIC_RULES, DEFAULT_PREFIX_RULES,
    DEFAULT_SUFFIX_RULES, DUPLICATION_MARKERS,
};
pub use vocabulary::Vocabulary;

use codemix_config::{NormalizationConfig, ResourcePaths};

use crate::Result;

/// Minimum number of back-to-back copies of a unit before it is collapsed
const MIN_REPEATS: usize = 3;

/// Deterministic per-token slang normalizer
#[derive(Debug, Clone)]
pub struct RuleNormalizer {
    vocabulary: Vocabulary,
    rules: RuleSet,
}

impl RuleNormalizer {
    /// Create a normalizer from a vocabulary and a rule set
    pub fn new(vocabulary: Vocabulary, rules: RuleSet) -> Self {
        Self { vocabulary, rules }
    }

    /// Create a normalizer from configuration
    ///
    /// Loads the vocabulary file and compiles the custom rules.
    pub fn from_config(resources: &ResourcePaths, config: &NormalizationConfig) -> Result<Self> {
        let vocabulary = Vocabulary::from_file(&resources.vocabulary_path)?;
        let rules = RuleSet::with_custom_rules(&config.custom_rules)?;
        tracing::info!(
            vocabulary = vocabulary.len(),
            custom_rules = rules.custom_rules().len(),
            "Created rule normalizer"
        );
        Ok(Self::new(vocabulary, rules))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Normalize every token; the output has the same length as the input
    pub fn run(&self, tokens: &[String]) -> Vec<String> {
        tokens.iter().map(|token| self.normalize_token(token)).collect()
    }

    /// Normalize a single token
    pub fn normalize_token(&self, token: &str) -> String {
        if self.vocabulary.contains(token) {
            return token.to_string();
        }

        let token = self.prefix_normalization(token);
        let token = self.numeric_normalization(&token);
        let token = self.suffix_normalization(&token);
        let token = self.reduplication(&token);
        let token = reduce_repetition(&token, 1);
        let token = reduce_repetition(&token, 2);
        self.custom_normalization(&token)
    }

    /// Replace leading slang prefixes, rule by rule
    pub fn prefix_normalization(&self, token: &str) -> String {
        let mut token = token.to_string();
        for rule in self.rules.prefix_rules() {
            if let Some(rest) = token.strip_prefix(rule.slang.as_str()) {
                token = format!("{}{}", rule.replacement, rest);
            }
        }
        token
    }

    /// Replace trailing slang suffixes, rule by rule
    pub fn suffix_normalization(&self, token: &str) -> String {
        let mut token = token.to_string();
        for rule in self.rules.suffix_rules() {
            if let Some(rest) = token.strip_suffix(rule.slang.as_str()) {
                token = format!("{}{}", rest, rule.replacement);
            }
        }
        token
    }

    /// Spell out units of `<digits><unit>` tokens
    pub fn numeric_normalization(&self, token: &str) -> String {
        let mut token = token.to_string();
        for rule in self.rules.numeric_rules() {
            if let Some(rewritten) = rule.apply(&token) {
                token = rewritten;
            }
        }
        token
    }

    /// Expand a marked reduplication: `buku2` -> `buku-buku`
    ///
    /// The first marker found splits the token at its first occurrence.
    /// Tokens made only of ASCII digits are left alone.
    pub fn reduplication(&self, token: &str) -> String {
        if is_numeric(token) {
            return token.to_string();
        }

        DUPLICATION_MARKERS
            .iter()
            .find_map(|&marker| token.split_once(marker))
            .map(|(left, right)| format!("{left}-{left}{right}"))
            .unwrap_or_else(|| token.to_string())
    }

    /// Apply the caller-supplied regex rules in order
    pub fn custom_normalization(&self, token: &str) -> String {
        let mut token = token.to_string();
        for rule in self.rules.custom_rules() {
            token = rule.apply(&token);
        }
        token
    }
}

/// `^[0-9]+$`
fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Collapse a unit of `unit` characters repeated three or more times in a row
/// into a single copy
///
/// `reduce_repetition("baaanget", 1)` is `"banget"`,
/// `reduce_repetition("wkwkwk", 2)` is `"wk"`. Doubled letters stay.
pub fn reduce_repetition(token: &str, unit: usize) -> String {
    if unit == 0 {
        return token.to_string();
    }

    let chars: Vec<char> = token.chars().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;

    while i < chars.len() {
        if i + unit <= chars.len() {
            let head = &chars[i..i + unit];
            let mut repeats = 1;
            while i + (repeats + 1) * unit <= chars.len()
                && &chars[i + repeats * unit..i + (repeats + 1) * unit] == head
            {
                repeats += 1;
            }
            if repeats >= MIN_REPEATS {
                out.extend_from_slice(head);
                i += repeats * unit;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }

    out.into_iter().collect()
}
