//! Rule normalization configuration

use serde::{Deserialize, Serialize};

/// A caller-supplied rewrite rule: regex pattern and its replacement
///
/// The replacement may use capture-group references (`$1`, `${name}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    pub pattern: String,
    pub replacement: String,
}

impl CustomRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Rule normalizer configuration
///
/// Built-in prefix, suffix and numeric rules are fixed; only the custom rule
/// set comes from configuration. Rules apply in declaration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Custom rules, applied last
    #[serde(default)]
    pub custom_rules: Vec<CustomRule>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_rules_keep_order() {
        let config: NormalizationConfig = toml::from_str(
            r#"
            [[custom_rules]]
            pattern = "^gw$"
            replacement = "saya"

            [[custom_rules]]
            pattern = "bgt"
            replacement = "banget"
            "#,
        )
        .unwrap();

        assert_eq!(config.custom_rules.len(), 2);
        assert_eq!(config.custom_rules[0], CustomRule::new("^gw$", "saya"));
        assert_eq!(config.custom_rules[1].replacement, "banget");
    }
}
