//! Token classifiers
//!
//! Detects non-lexical tokens (punctuation, emoji, hashtags, links, user
//! mentions) and masks them with placeholder tokens so the statistical
//! translator never has to translate them.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const PUNCT_PLACEHOLDER: &str = "[PUNCT]";
pub const EMOJI_PLACEHOLDER: &str = "[EMOJI]";
pub const HASHTAG_PLACEHOLDER: &str = "[HASHTAG]";
pub const LINK_PLACEHOLDER: &str = "[LINK]";
pub const USER_PLACEHOLDER: &str = "[USER]";

static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("valid link regex"));

static HASHTAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\w+").expect("valid hashtag regex"));

static USER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention regex"));

/// Emoji code point ranges (inclusive)
const EMOJI_RANGES: &[(u32, u32)] = &[
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // symbols & pictographs, skin tones
    (0x1F680, 0x1F6FF), // transport & map
    (0x1F1E6, 0x1F1FF), // regional indicators (flags)
    (0x1F900, 0x1F9FF), // supplemental symbols & pictographs
    (0x1FA70, 0x1FAFF), // symbols & pictographs extended-A
    (0x2600, 0x26FF),   // misc symbols
    (0x2700, 0x27BF),   // dingbats
    (0x2B50, 0x2B55),   // stars, circles
    (0xFE0F, 0xFE0F),   // variation selector-16
    (0x200D, 0x200D),   // zero width joiner
];

/// Check if a character is an emoji component
pub fn is_emoji_char(c: char) -> bool {
    let code = c as u32;
    EMOJI_RANGES
        .iter()
        .any(|&(start, end)| code >= start && code <= end)
}

/// Check if a character is punctuation
///
/// ASCII punctuation plus the general-punctuation block and a few Latin-1
/// marks that show up in social media text.
pub fn is_punctuation_char(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(c as u32, 0x2010..=0x2027 | 0x2030..=0x205E)
        || matches!(c, '¡' | '¿' | '«' | '»' | '·')
}

/// True when the token is non-empty and made only of punctuation
pub fn is_punctuation_only(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_punctuation_char)
}

/// True when the token is non-empty and made only of emoji
pub fn is_emoji_only(token: &str) -> bool {
    !token.is_empty() && token.chars().all(is_emoji_char)
}

fn replace_pattern(pattern: &Regex, token: &str, placeholder: &str) -> (String, Vec<String>) {
    let found: Vec<String> = pattern
        .find_iter(token)
        .map(|m| m.as_str().to_string())
        .collect();
    if found.is_empty() {
        return (token.to_string(), found);
    }
    (pattern.replace_all(token, placeholder).into_owned(), found)
}

/// Replace hashtags inside a token, returning the new token and the hashtags
pub fn replace_hashtag(token: &str) -> (String, Vec<String>) {
    replace_pattern(&HASHTAG_PATTERN, token, HASHTAG_PLACEHOLDER)
}

/// Replace links inside a token, returning the new token and the links
pub fn replace_link(token: &str) -> (String, Vec<String>) {
    replace_pattern(&LINK_PATTERN, token, LINK_PLACEHOLDER)
}

/// Replace user mentions inside a token, returning the new token and the mentions
pub fn replace_user_mention(token: &str) -> (String, Vec<String>) {
    replace_pattern(&USER_PATTERN, token, USER_PLACEHOLDER)
}

/// True for any of the placeholder tokens produced by masking
pub fn is_placeholder(token: &str) -> bool {
    matches!(
        token,
        PUNCT_PLACEHOLDER
            | EMOJI_PLACEHOLDER
            | HASHTAG_PLACEHOLDER
            | LINK_PLACEHOLDER
            | USER_PLACEHOLDER
    )
}

/// True for tokens that carry no language: punctuation, emoji, numbers,
/// placeholders, links, hashtags and mentions
pub fn is_non_lexical(token: &str) -> bool {
    is_punctuation_only(token)
        || is_emoji_only(token)
        || is_placeholder(token)
        || token.chars().all(|c| c.is_numeric() || c == '.' || c == ',')
        || LINK_PATTERN.is_match(token)
        || token.starts_with('#')
        || token.starts_with('@')
}

/// A token sequence with non-lexical tokens masked
///
/// The removed originals are kept in side lists, in order of appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedTokens {
    pub tokens: Vec<String>,
    pub punctuation: Vec<String>,
    pub emojis: Vec<String>,
    pub hashtags: Vec<String>,
    pub links: Vec<String>,
    pub mentions: Vec<String>,
}

/// Mask punctuation-only and emoji-only tokens, then links, hashtags and
/// mentions inside the remaining tokens
pub fn mask_tokens(tokens: &[String]) -> MaskedTokens {
    let mut masked = MaskedTokens {
        tokens: Vec::with_capacity(tokens.len()),
        ..Default::default()
    };

    for token in tokens {
        if is_punctuation_only(token) {
            masked.punctuation.push(token.clone());
            masked.tokens.push(PUNCT_PLACEHOLDER.to_string());
            continue;
        }
        if is_emoji_only(token) {
            masked.emojis.push(token.clone());
            masked.tokens.push(EMOJI_PLACEHOLDER.to_string());
            continue;
        }

        let (token, links) = replace_link(token);
        let (token, hashtags) = replace_hashtag(&token);
        let (token, mentions) = replace_user_mention(&token);
        masked.links.extend(links);
        masked.hashtags.extend(hashtags);
        masked.mentions.extend(mentions);
        masked.tokens.push(token);
    }

    masked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_punctuation_only() {
        assert!(is_punctuation_only("..."));
        assert!(is_punctuation_only("?!"));
        assert!(is_punctuation_only("…"));
        assert!(!is_punctuation_only("a."));
        assert!(!is_punctuation_only(""));
    }

    #[test]
    fn test_emoji_only() {
        assert!(is_emoji_only("😂"));
        assert!(is_emoji_only("😂😂🔥"));
        assert!(is_emoji_only("👍🏽"));
        assert!(is_emoji_only("❤️"));
        assert!(!is_emoji_only("ok😂"));
        assert!(!is_emoji_only(""));
    }

    #[test]
    fn test_replace_patterns() {
        assert_eq!(
            replace_hashtag("#jakarta"),
            ("[HASHTAG]".to_string(), vec!["#jakarta".to_string()])
        );
        assert_eq!(
            replace_link("https://t.co/abc"),
            ("[LINK]".to_string(), vec!["https://t.co/abc".to_string()])
        );
        assert_eq!(
            replace_user_mention("@budi:"),
            ("[USER]:".to_string(), vec!["@budi".to_string()])
        );
        assert_eq!(replace_hashtag("makan"), ("makan".to_string(), vec![]));
    }

    #[test]
    fn test_mask_tokens() {
        let masked = mask_tokens(&tokens(&[
            "@budi", "mau", "makan", "!", "😂", "#lapar", "www.makan.id",
        ]));

        assert_eq!(
            masked.tokens,
            tokens(&["[USER]", "mau", "makan", "[PUNCT]", "[EMOJI]", "[HASHTAG]", "[LINK]"])
        );
        assert_eq!(masked.punctuation, tokens(&["!"]));
        assert_eq!(masked.emojis, tokens(&["😂"]));
        assert_eq!(masked.hashtags, tokens(&["#lapar"]));
        assert_eq!(masked.links, tokens(&["www.makan.id"]));
        assert_eq!(masked.mentions, tokens(&["@budi"]));
    }

    #[test]
    fn test_masked_tokens_serialize() {
        let masked = mask_tokens(&tokens(&["halo", "@budi", "!"]));
        let json = serde_json::to_value(&masked).unwrap();
        assert_eq!(json["tokens"], serde_json::json!(["halo", "[USER]", "[PUNCT]"]));
        assert_eq!(json["mentions"], serde_json::json!(["@budi"]));
    }

    #[test]
    fn test_link_fragment_is_not_a_hashtag() {
        let masked = mask_tokens(&tokens(&["http://a.id/#bagian"]));
        assert_eq!(masked.tokens, tokens(&["[LINK]"]));
        assert!(masked.hashtags.is_empty());
    }

    #[test]
    fn test_non_lexical() {
        for token in ["!", "😂", "2020", "1.500", "[LINK]", "#jkt", "@budi", "https://a.id"] {
            assert!(is_non_lexical(token), "{token}");
        }
        for token in ["makan", "abdi", "5rb"] {
            assert!(!is_non_lexical(token), "{token}");
        }
    }

    #[test]
    fn test_placeholders() {
        assert!(is_placeholder("[PUNCT]"));
        assert!(is_placeholder("[USER]"));
        assert!(!is_placeholder("PUNCT"));
    }
}
