//! Language labels for code-mixed Indonesian text
//!
//! A language detector assigns exactly one label to every token. The label set
//! is closed: the standard language, the regional varieties that get mixed into
//! it, and `Other` for tokens that carry no language (punctuation, emoji,
//! numbers, links).

use serde::{Deserialize, Serialize};

/// Per-token language label
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum LanguageLabel {
    #[default]
    #[serde(rename = "i", alias = "id", alias = "indonesian")]
    Indonesian,
    #[serde(rename = "s", alias = "su", alias = "sundanese")]
    Sundanese,
    #[serde(rename = "j", alias = "jv", alias = "javanese")]
    Javanese,
    #[serde(rename = "o", alias = "other")]
    Other,
}

impl LanguageLabel {
    /// Short label code as emitted by the language detector
    pub fn code(&self) -> &'static str {
        match self {
            Self::Indonesian => "i",
            Self::Sundanese => "s",
            Self::Javanese => "j",
            Self::Other => "o",
        }
    }

    /// ISO 639-1 code, used when talking to translation services
    ///
    /// `Other` has no ISO code.
    pub fn iso_code(&self) -> Option<&'static str> {
        match self {
            Self::Indonesian => Some("id"),
            Self::Sundanese => Some("su"),
            Self::Javanese => Some("jv"),
            Self::Other => None,
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Indonesian => "Indonesian",
            Self::Sundanese => "Sundanese",
            Self::Javanese => "Javanese",
            Self::Other => "Other",
        }
    }

    /// Whether this label marks a real language (anything but `Other`)
    pub fn is_linguistic(&self) -> bool {
        !matches!(self, Self::Other)
    }

    /// Parse from string (case-insensitive, accepts label code, ISO code or name)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "i" | "id" | "ind" | "indonesian" => Some(Self::Indonesian),
            "s" | "su" | "sun" | "sundanese" => Some(Self::Sundanese),
            "j" | "jv" | "jav" | "javanese" => Some(Self::Javanese),
            "o" | "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Get all labels
    pub fn all() -> &'static [LanguageLabel] {
        &[Self::Indonesian, Self::Sundanese, Self::Javanese, Self::Other]
    }
}

impl std::fmt::Display for LanguageLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for LanguageLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_loose(s).ok_or_else(|| format!("unknown language label: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_codes() {
        assert_eq!(LanguageLabel::Indonesian.code(), "i");
        assert_eq!(LanguageLabel::Sundanese.code(), "s");
        assert_eq!(LanguageLabel::Javanese.iso_code(), Some("jv"));
        assert_eq!(LanguageLabel::Other.iso_code(), None);
    }

    #[test]
    fn test_label_from_str() {
        assert_eq!(LanguageLabel::from_str_loose("i"), Some(LanguageLabel::Indonesian));
        assert_eq!(LanguageLabel::from_str_loose("SU"), Some(LanguageLabel::Sundanese));
        assert_eq!(LanguageLabel::from_str_loose("javanese"), Some(LanguageLabel::Javanese));
        assert_eq!("o".parse::<LanguageLabel>(), Ok(LanguageLabel::Other));
        assert!("x".parse::<LanguageLabel>().is_err());
    }

    #[test]
    fn test_label_serde_uses_short_code() {
        let json = serde_json::to_string(&LanguageLabel::Sundanese).unwrap();
        assert_eq!(json, "\"s\"");
        let parsed: LanguageLabel = serde_json::from_str("\"jv\"").unwrap();
        assert_eq!(parsed, LanguageLabel::Javanese);
    }

    #[test]
    fn test_is_linguistic() {
        assert!(LanguageLabel::Indonesian.is_linguistic());
        assert!(!LanguageLabel::Other.is_linguistic());
        assert_eq!(LanguageLabel::all().len(), 4);
    }
}
