//! Formal vocabulary used to short-circuit rule normalization

use std::collections::HashSet;
use std::path::Path;

use crate::{Result, TextProcessingError};

/// Immutable set of known-formal word forms
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    /// Create an empty vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a vocabulary from an iterator of words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Load a vocabulary file with one word per line
    ///
    /// Trailing whitespace is stripped; empty lines are skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|source| TextProcessingError::Resource {
                path: path.to_path_buf(),
                source,
            })?;

        let words: HashSet<String> = content
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        tracing::info!(path = %path.display(), words = words.len(), "Loaded vocabulary");
        Ok(Self { words })
    }

    /// Return a new vocabulary with extra words added
    pub fn extended<I, S>(&self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut extended = self.words.clone();
        extended.extend(words.into_iter().map(Into::into));
        Self { words: extended }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_file_trims_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "makan  ").unwrap();
        writeln!(file, "minum").unwrap();
        writeln!(file).unwrap();

        let vocab = Vocabulary::from_file(file.path()).unwrap();
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("makan"));
        assert!(vocab.contains("minum"));
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let err = Vocabulary::from_file(Path::new("/nonexistent/vocab.txt")).unwrap_err();
        assert!(matches!(err, TextProcessingError::Resource { .. }));
    }

    #[test]
    fn test_extended_leaves_original_untouched() {
        let vocab = Vocabulary::from_words(["makan"]);
        let extended = vocab.extended(["minum"]);
        assert!(!vocab.contains("minum"));
        assert!(extended.contains("minum"));
        assert!(extended.contains("makan"));
    }
}
