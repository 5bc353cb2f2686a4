//! Token aliases
//!
//! Tokens are opaque strings. Order inside a sequence is meaningful and every
//! pipeline stage keeps it.

/// A single unit of text
pub type Token = String;

/// An ordered sequence of tokens for one input unit (sentence/utterance)
pub type TokenSequence = Vec<Token>;

/// Join tokens with single-space separators
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_tokens() {
        let tokens = vec!["saya".to_string(), "mau".to_string(), "makan".to_string()];
        assert_eq!(join_tokens(&tokens), "saya mau makan");
        assert_eq!(join_tokens(&[]), "");
    }
}
