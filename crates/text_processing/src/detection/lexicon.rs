//! Word-list language detector

use std::collections::BTreeMap;
use std::path::PathBuf;

use codemix_core::{Error as CoreError, LanguageDetector, LanguageLabel, TokenSequence};

use crate::classify::is_non_lexical;
use crate::normalization::Vocabulary;

/// Labels tokens by looking them up in one word list per language
///
/// Non-lexical tokens get [`LanguageLabel::Other`]. A word found in several
/// lists takes the first label in label order; a word found in none takes the
/// fallback label. Lookup is case-insensitive.
pub struct LexiconLanguageDetector {
    paths: BTreeMap<LanguageLabel, PathBuf>,
    lexicons: BTreeMap<LanguageLabel, Vocabulary>,
    fallback: LanguageLabel,
    loaded: bool,
}

impl LexiconLanguageDetector {
    /// Detector that reads its word lists from files on `load`
    pub fn new(paths: BTreeMap<LanguageLabel, PathBuf>, fallback: LanguageLabel) -> Self {
        Self {
            paths,
            lexicons: BTreeMap::new(),
            fallback,
            loaded: false,
        }
    }

    /// Detector over in-memory word lists, ready to use
    pub fn from_lexicons(
        lexicons: BTreeMap<LanguageLabel, Vocabulary>,
        fallback: LanguageLabel,
    ) -> Self {
        Self {
            paths: BTreeMap::new(),
            lexicons,
            fallback,
            loaded: true,
        }
    }

    pub fn fallback(&self) -> LanguageLabel {
        self.fallback
    }

    fn label(&self, token: &str) -> LanguageLabel {
        if is_non_lexical(token) {
            return LanguageLabel::Other;
        }
        let lowered = token.to_lowercase();
        self.lexicons
            .iter()
            .find(|(_, words)| words.contains(&lowered))
            .map(|(label, _)| *label)
            .unwrap_or(self.fallback)
    }
}

impl LanguageDetector for LexiconLanguageDetector {
    fn load(&mut self) -> codemix_core::Result<()> {
        for (label, path) in &self.paths {
            let words = Vocabulary::from_file(path)
                .map_err(|e| CoreError::LanguageDetection(e.to_string()))?;
            self.lexicons.insert(*label, words);
        }
        self.loaded = true;
        tracing::info!(lexicons = self.lexicons.len(), "Loaded lexicon language detector");
        Ok(())
    }

    fn predict(&self, sequences: &[TokenSequence]) -> codemix_core::Result<Vec<Vec<LanguageLabel>>> {
        if !self.loaded {
            return Err(CoreError::ModelNotLoaded(self.name().to_string()));
        }
        Ok(sequences
            .iter()
            .map(|tokens| tokens.iter().map(|t| self.label(t)).collect())
            .collect())
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(text: &str) -> TokenSequence {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn detector() -> LexiconLanguageDetector {
        let mut lexicons = BTreeMap::new();
        lexicons.insert(
            LanguageLabel::Sundanese,
            Vocabulary::from_words(["abdi", "bade", "tuang"]),
        );
        lexicons.insert(
            LanguageLabel::Javanese,
            Vocabulary::from_words(["aku", "arep", "mangan"]),
        );
        LexiconLanguageDetector::from_lexicons(lexicons, LanguageLabel::Indonesian)
    }

    #[test]
    fn test_predict_labels() {
        let labels = detector()
            .predict(&[seq("Abdi bade makan nasi !"), seq("aku arep 😂")])
            .unwrap();
        use LanguageLabel::*;
        assert_eq!(labels[0], vec![Sundanese, Sundanese, Indonesian, Indonesian, Other]);
        assert_eq!(labels[1], vec![Javanese, Javanese, Other]);
    }

    #[test]
    fn test_predict_before_load() {
        let d = LexiconLanguageDetector::new(BTreeMap::new(), LanguageLabel::Indonesian);
        assert!(matches!(
            d.predict(&[seq("abdi")]),
            Err(CoreError::ModelNotLoaded(_))
        ));
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("su.txt");
        std::fs::write(&path, "abdi\nbade\n").unwrap();

        let mut paths = BTreeMap::new();
        paths.insert(LanguageLabel::Sundanese, path);
        let mut d = LexiconLanguageDetector::new(paths, LanguageLabel::Indonesian);
        d.load().unwrap();

        let labels = d.predict(&[seq("abdi mau")]).unwrap();
        assert_eq!(labels[0], vec![LanguageLabel::Sundanese, LanguageLabel::Indonesian]);
    }

    #[test]
    fn test_load_missing_file() {
        let mut paths = BTreeMap::new();
        paths.insert(LanguageLabel::Javanese, PathBuf::from("/nonexistent/jv.txt"));
        let mut d = LexiconLanguageDetector::new(paths, LanguageLabel::Indonesian);
        assert!(matches!(d.load(), Err(CoreError::LanguageDetection(_))));
    }
}
