//! End-to-end code-switch normalization

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use codemix_config::{CodeSwitchConfig, DetectorKind, Settings, SlangTranslationConfig};
use codemix_core::{LanguageLabel, Translator};
use codemix_text_processing::{
    CodeSwitchComponents, CodeSwitchInput, CodeSwitchNormalizer, DetectorRegistry,
    DictionaryFormalizer, LexiconLanguageDetector, RuleNormalizer, RuleSet, SlangTranslator,
    TextProcessingError, UnicodeTokenizer, Vocabulary,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("codemix_text_processing=debug")
        .with_test_writer()
        .try_init();
}

fn sent(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

fn training_pairs() -> Vec<(Vec<String>, Vec<String>)> {
    vec![
        (sent("saya mau makan nasi"), sent("saya mau makan nasi")),
        (sent("saya mau makan 5 ribu"), sent("saya mau makan 5 ribu")),
        (sent("kamu mau minum"), sent("kamu mau minum")),
        (sent("saya makan nasi"), sent("saya makan nasi")),
    ]
}

/// Sundanese -> Indonesian by word lookup
struct WordListTranslator {
    words: HashMap<&'static str, &'static str>,
}

#[async_trait]
impl Translator for WordListTranslator {
    async fn translate(&self, text: &str) -> codemix_core::Result<String> {
        Ok(text
            .split(' ')
            .map(|w| self.words.get(w).copied().unwrap_or(w))
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn source(&self) -> LanguageLabel {
        LanguageLabel::Sundanese
    }

    fn target(&self) -> LanguageLabel {
        LanguageLabel::Indonesian
    }

    fn name(&self) -> &str {
        "word-list"
    }
}

fn normalizer() -> CodeSwitchNormalizer {
    let formalizer = DictionaryFormalizer::new(HashMap::from([(
        "sy".to_string(),
        "saya".to_string(),
    )]));
    let rule_normalizer = RuleNormalizer::new(
        Vocabulary::from_words(["saya", "mau", "makan", "nasi", "abdi"]),
        RuleSet::default(),
    );
    let slang_translator = SlangTranslator::new(SlangTranslationConfig::default()).unwrap();
    slang_translator.train(&training_pairs(), 10).unwrap();

    let mut lexicons = BTreeMap::new();
    lexicons.insert(
        LanguageLabel::Sundanese,
        Vocabulary::from_words(["abdi", "bade", "tuang", "sangu"]),
    );
    let detector = LexiconLanguageDetector::from_lexicons(lexicons, LanguageLabel::Indonesian);

    let components = CodeSwitchComponents {
        tokenizer: Arc::new(UnicodeTokenizer::new()),
        formalizer: Arc::new(formalizer),
        rule_normalizer: Arc::new(rule_normalizer),
        slang_translator: Arc::new(slang_translator),
        detector: Arc::new(detector),
    };

    CodeSwitchNormalizer::new(components, CodeSwitchConfig::default()).with_translation_client(
        Arc::new(WordListTranslator {
            words: HashMap::from([
                ("abdi", "saya"),
                ("bade", "mau"),
                ("tuang", "makan"),
                ("sangu", "nasi"),
            ]),
        }),
    )
}

#[tokio::test]
async fn test_slang_is_formalized_before_translation() {
    init_tracing();
    let out = normalizer()
        .translate(
            CodeSwitchInput::Raw(vec!["sy mau makan 5rb nasi".to_string()]),
            false,
        )
        .await
        .unwrap();

    assert_eq!(out, vec!["saya mau makan 5 ribu nasi"]);
}

#[tokio::test]
async fn test_regional_language_is_translated_to_target() {
    init_tracing();
    let out = normalizer()
        .translate(
            CodeSwitchInput::Tokenized(vec![sent("abdi bade tuang sangu")]),
            true,
        )
        .await
        .unwrap();

    assert_eq!(out, vec!["saya mau makan nasi"]);
}

#[tokio::test]
async fn test_batch_keeps_input_order() {
    let out = normalizer()
        .translate(
            CodeSwitchInput::Raw(vec![
                "abdi bade tuang".to_string(),
                "saya mau makan".to_string(),
                "".to_string(),
            ]),
            true,
        )
        .await
        .unwrap();

    assert_eq!(out, vec!["saya mau makan", "saya mau makan", ""]);
}

#[tokio::test]
async fn test_from_settings_with_resource_files() -> anyhow::Result<()> {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let vocab = dir.path().join("vocab.txt");
    let dict = dir.path().join("dict.tsv");
    let sundanese = dir.path().join("su.txt");
    std::fs::write(&vocab, "saya\nmau\nmakan\n")?;
    std::fs::write(&dict, "word\tformalized_word\nsy\tsaya\n")?;
    std::fs::write(&sundanese, "abdi\nbade\n")?;

    let mut settings = Settings::default();
    settings.resources.vocabulary_path = vocab;
    settings.resources.formalization_dict_path = dict;
    settings
        .resources
        .lexicon_paths
        .insert(LanguageLabel::Sundanese, sundanese);
    settings.code_switch.detector = DetectorKind::Lexicon;

    let normalizer = CodeSwitchNormalizer::from_settings(&settings, &DetectorRegistry::new())?;
    normalizer
        .slang_translator()
        .train(&[(sent("saya mau makan"), sent("saya mau makan"))], 5)?;

    let out = normalizer
        .translate(CodeSwitchInput::Raw(vec!["sy mau makan".to_string()]), false)
        .await?;
    assert_eq!(out, vec!["saya mau makan"]);

    let err = normalizer
        .translate(CodeSwitchInput::Raw(vec!["abdi bade".to_string()]), true)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        TextProcessingError::MissingTranslationClient { .. }
    ));
    Ok(())
}

#[test]
fn test_from_settings_unknown_detector() {
    let settings = Settings::default();
    let result = CodeSwitchNormalizer::from_settings(&settings, &DetectorRegistry::new());
    assert!(result.is_err());
}
