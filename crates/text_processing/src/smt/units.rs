//! Conversion between tokens and translation units

use codemix_config::TranslationUnit;

use crate::classify::is_placeholder;

/// Word-boundary unit in character mode
pub const WORD_BOUNDARY: &str = "▁";

/// Split tokens into translation units
///
/// In character mode every token becomes its characters, tokens are separated
/// by [`WORD_BOUNDARY`], and placeholders stay whole.
pub fn to_units(tokens: &[String], unit: TranslationUnit) -> Vec<String> {
    match unit {
        TranslationUnit::Word => tokens.to_vec(),
        TranslationUnit::Char => {
            let mut units = Vec::new();
            for (i, token) in tokens.iter().enumerate() {
                if i > 0 {
                    units.push(WORD_BOUNDARY.to_string());
                }
                if is_placeholder(token) {
                    units.push(token.clone());
                } else {
                    units.extend(token.chars().map(String::from));
                }
            }
            units
        }
    }
}

/// Join translation units back into tokens
pub fn from_units(units: Vec<String>, unit: TranslationUnit) -> Vec<String> {
    match unit {
        TranslationUnit::Word => units,
        TranslationUnit::Char => {
            let mut tokens = Vec::new();
            let mut current = String::new();
            for u in units {
                if u == WORD_BOUNDARY {
                    if !current.is_empty() {
                        tokens.push(std::mem::take(&mut current));
                    }
                } else {
                    current.push_str(&u);
                }
            }
            if !current.is_empty() {
                tokens.push(current);
            }
            tokens
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_word_units_are_tokens() {
        let t = tokens(&["sy", "mau"]);
        assert_eq!(to_units(&t, TranslationUnit::Word), t);
        assert_eq!(from_units(t.clone(), TranslationUnit::Word), t);
    }

    #[test]
    fn test_char_units() {
        let units = to_units(&tokens(&["sy", "[PUNCT]", "ok"]), TranslationUnit::Char);
        assert_eq!(units, tokens(&["s", "y", "▁", "[PUNCT]", "▁", "o", "k"]));
        assert_eq!(
            from_units(units, TranslationUnit::Char),
            tokens(&["sy", "[PUNCT]", "ok"])
        );
    }

    #[test]
    fn test_char_units_drop_empty_words() {
        let units = tokens(&["▁", "a", "▁", "▁", "b", "▁"]);
        assert_eq!(from_units(units, TranslationUnit::Char), tokens(&["a", "b"]));
    }
}
