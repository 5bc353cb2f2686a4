//! Slang rewrite rules
//!
//! Rule sets are ordered association lists fixed at construction. Order
//! matters: rules of one family are applied one after the other to the same,
//! already rewritten, token.
//!
//! Known weak spots of the default rules:
//! - `ny-` also matches formal words (nyata), `ng-` also matches other slang
//!   forms (nggak); keep such words in the vocabulary
//! - `-x` / `-q` are often a stand-in for the letter k
//! - `-in` is sometimes `-i` rather than `-kan`
//! - reduplication copies the whole left part (berkali2 -> berkali-berkali)

use codemix_config::CustomRule;
use regex::Regex;

use crate::{Result, TextProcessingError};

/// Prefix rules: slang prefix -> formal prefix
pub const DEFAULT_PREFIX_RULES: &[(&str, &str)] = &[("ng", "meng"), ("ny", "meny"), ("ga", "tidak ")];

/// Suffix rules: slang suffix -> formal suffix
pub const DEFAULT_SUFFIX_RULES: &[(&str, &str)] = &[
    ("x", "nya"),
    ("ny", "nya"),
    ("xa", "nya"),
    ("'y", "nya"),
    ("q", "ku"),
    ("in", "kan"),
];

/// Numeric unit rules: unit after a digit run -> spelled-out unit
pub const DEFAULT_NUMERIC_RULES: &[(&str, &str)] = &[
    ("plh", " puluh"),
    ("rb", " ribu"),
    ("k", " ribu"),
    ("jt", " juta"),
    ("hr", " hari"),
    ("bln", " bulan"),
    ("x", " kali"),
];

/// Reduplication markers, in priority order
pub const DUPLICATION_MARKERS: &[char] = &['2', '"'];

/// A literal affix rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixRule {
    pub slang: String,
    pub replacement: String,
}

impl AffixRule {
    pub fn new(slang: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            slang: slang.into(),
            replacement: replacement.into(),
        }
    }
}

/// A numeric unit rule, matching only `<digits><unit>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericRule {
    pub unit: String,
    pub replacement: String,
}

impl NumericRule {
    pub fn new(unit: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            replacement: replacement.into(),
        }
    }

    /// Rewrite the unit if the whole token is digits followed by the unit
    pub fn apply(&self, token: &str) -> Option<String> {
        let digits = token.strip_suffix(self.unit.as_str())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(format!("{}{}", digits, self.replacement))
    }
}

/// A caller-supplied regex rule
#[derive(Debug, Clone)]
pub struct RegexRule {
    pattern: Regex,
    replacement: String,
}

impl RegexRule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|source| TextProcessingError::InvalidRule {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: compiled,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Replace every match
    pub fn apply(&self, token: &str) -> String {
        self.pattern
            .replace_all(token, self.replacement.as_str())
            .into_owned()
    }
}

/// The four rule families used by the rule normalizer
#[derive(Debug, Clone)]
pub struct RuleSet {
    prefix: Vec<AffixRule>,
    numeric: Vec<NumericRule>,
    suffix: Vec<AffixRule>,
    custom: Vec<RegexRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX_RULES
                .iter()
                .map(|(slang, sub)| AffixRule::new(*slang, *sub))
                .collect(),
            numeric: DEFAULT_NUMERIC_RULES
                .iter()
                .map(|(unit, sub)| NumericRule::new(*unit, *sub))
                .collect(),
            suffix: DEFAULT_SUFFIX_RULES
                .iter()
                .map(|(slang, sub)| AffixRule::new(*slang, *sub))
                .collect(),
            custom: Vec::new(),
        }
    }
}

impl RuleSet {
    /// Build a rule set from explicit rule lists
    pub fn new(
        prefix: Vec<AffixRule>,
        numeric: Vec<NumericRule>,
        suffix: Vec<AffixRule>,
        custom: Vec<RegexRule>,
    ) -> Self {
        Self {
            prefix,
            numeric,
            suffix,
            custom,
        }
    }

    /// Default rules plus compiled custom rules
    pub fn with_custom_rules(custom_rules: &[CustomRule]) -> Result<Self> {
        let custom = custom_rules
            .iter()
            .map(|rule| RegexRule::new(&rule.pattern, rule.replacement.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            custom,
            ..Self::default()
        })
    }

    pub fn prefix_rules(&self) -> &[AffixRule] {
        &self.prefix
    }

    pub fn numeric_rules(&self) -> &[NumericRule] {
        &self.numeric
    }

    pub fn suffix_rules(&self) -> &[AffixRule] {
        &self.suffix
    }

    pub fn custom_rules(&self) -> &[RegexRule] {
        &self.custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_order() {
        let rules = RuleSet::default();
        assert_eq!(rules.prefix_rules()[0], AffixRule::new("ng", "meng"));
        assert_eq!(rules.suffix_rules().len(), 6);
        assert_eq!(rules.numeric_rules()[1].unit, "rb");
        assert!(rules.custom_rules().is_empty());
    }

    #[test]
    fn test_numeric_rule_needs_whole_token() {
        let rule = NumericRule::new("rb", " ribu");
        assert_eq!(rule.apply("5rb"), Some("5 ribu".to_string()));
        assert_eq!(rule.apply("150rb"), Some("150 ribu".to_string()));
        assert_eq!(rule.apply("rb"), None);
        assert_eq!(rule.apply("5rbu"), None);
        assert_eq!(rule.apply("a5rb"), None);
    }

    #[test]
    fn test_numeric_rule_ignores_non_ascii_digits() {
        let rule = NumericRule::new("rb", " ribu");
        assert_eq!(rule.apply("\u{bd}rb"), None);
        assert_eq!(rule.apply("\u{b2}rb"), None);
        assert_eq!(rule.apply("\u{0665}rb"), None);
    }

    #[test]
    fn test_invalid_custom_rule() {
        let err = RuleSet::with_custom_rules(&[CustomRule::new("(", "x")]).unwrap_err();
        assert!(matches!(err, TextProcessingError::InvalidRule { .. }));
    }

    #[test]
    fn test_regex_rule_replaces_all() {
        let rule = RegexRule::new("bgt", "banget").unwrap();
        assert_eq!(rule.apply("bgtbgt"), "bangetbanget");
        assert_eq!(rule.pattern(), "bgt");
    }
}
