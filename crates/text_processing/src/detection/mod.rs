//! Language detector construction
//!
//! Detectors are built by kind through a registry of constructors. The
//! lexicon detector is registered by default; model-backed taggers (CRF, CNN,
//! RNN) live outside this crate and register themselves here.

mod lexicon;

pub use lexicon::LexiconLanguageDetector;

use std::collections::HashMap;

use codemix_config::{DetectorKind, Settings};
use codemix_core::LanguageDetector;

use crate::{Result, TextProcessingError};

/// Builds an unloaded detector from settings
pub type DetectorConstructor =
    Box<dyn Fn(&Settings) -> Result<Box<dyn LanguageDetector>> + Send + Sync>;

/// Detector constructors keyed by kind
pub struct DetectorRegistry {
    constructors: HashMap<DetectorKind, DetectorConstructor>,
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(DetectorKind::Lexicon, |settings: &Settings| {
            Ok(Box::new(LexiconLanguageDetector::new(
                settings.resources.lexicon_paths.clone(),
                settings.code_switch.target_language,
            )) as Box<dyn LanguageDetector>)
        });
        registry
    }
}

impl DetectorRegistry {
    /// Registry with the built-in detectors
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with nothing registered
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor for a kind
    pub fn register<F>(&mut self, kind: DetectorKind, constructor: F)
    where
        F: Fn(&Settings) -> Result<Box<dyn LanguageDetector>> + Send + Sync + 'static,
    {
        self.constructors.insert(kind, Box::new(constructor));
    }

    pub fn is_registered(&self, kind: DetectorKind) -> bool {
        self.constructors.contains_key(&kind)
    }

    /// Build and load a detector
    pub fn create(&self, kind: DetectorKind, settings: &Settings) -> Result<Box<dyn LanguageDetector>> {
        let constructor = self
            .constructors
            .get(&kind)
            .ok_or(TextProcessingError::UnknownDetector(kind))?;

        let mut detector = constructor(settings)?;
        detector.load()?;
        tracing::info!(kind = %kind, detector = detector.name(), "Created language detector");
        Ok(detector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemix_core::{LanguageLabel, TokenSequence};

    struct FixedDetector {
        label: LanguageLabel,
        loaded: bool,
    }

    impl LanguageDetector for FixedDetector {
        fn load(&mut self) -> codemix_core::Result<()> {
            self.loaded = true;
            Ok(())
        }

        fn predict(&self, sequences: &[TokenSequence]) -> codemix_core::Result<Vec<Vec<LanguageLabel>>> {
            assert!(self.loaded);
            Ok(sequences.iter().map(|s| vec![self.label; s.len()]).collect())
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[test]
    fn test_default_registry() {
        let registry = DetectorRegistry::new();
        assert!(registry.is_registered(DetectorKind::Lexicon));
        assert!(!registry.is_registered(DetectorKind::Crf));

        let detector = registry.create(DetectorKind::Lexicon, &Settings::default()).unwrap();
        assert_eq!(detector.name(), "lexicon");
    }

    #[test]
    fn test_unknown_detector() {
        let registry = DetectorRegistry::new();
        let err = registry.create(DetectorKind::Rnn, &Settings::default()).err().unwrap();
        assert!(matches!(err, TextProcessingError::UnknownDetector(DetectorKind::Rnn)));
    }

    #[test]
    fn test_registered_detector_is_loaded() {
        let mut registry = DetectorRegistry::empty();
        registry.register(DetectorKind::Crf, |_: &Settings| {
            Ok(Box::new(FixedDetector {
                label: LanguageLabel::Javanese,
                loaded: false,
            }) as Box<dyn LanguageDetector>)
        });

        let detector = registry.create(DetectorKind::Crf, &Settings::default()).unwrap();
        let labels = detector.predict(&[vec!["aku".to_string()]]).unwrap();
        assert_eq!(labels, vec![vec![LanguageLabel::Javanese]]);
    }
}
