//! Dictionary-based lexical formalization
//!
//! Maps informal words to their formal form with a plain lookup table.
//!
//! Example: `["Sy", "mau", "makan", "tapi", "sdg", "g", "lapar"]`
//! becomes `["Saya", "mau", "makan", "tapi", "sedang", "tidak", "lapar"]`.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use codemix_core::{LexicalFormalizer, Token, TokenSequence};
use serde::Deserialize;

use crate::{Result, TextProcessingError};

/// One row of the dictionary file
#[derive(Debug, Deserialize)]
struct DictionaryEntry {
    word: String,
    formalized_word: String,
}

/// Lookup-table formalizer
#[derive(Debug, Clone, Default)]
pub struct DictionaryFormalizer {
    dictionary: HashMap<String, String>,
}

impl DictionaryFormalizer {
    /// Create a formalizer from an in-memory dictionary
    pub fn new(dictionary: HashMap<String, String>) -> Self {
        Self { dictionary }
    }

    /// Load a tab-separated dictionary with `word` and `formalized_word` columns
    ///
    /// Columns are located by header name and fields may be quoted. Rows
    /// missing either column are skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|source| TextProcessingError::Resource {
            path: path.to_path_buf(),
            source,
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut dictionary = HashMap::new();
        for record in reader.deserialize::<DictionaryEntry>() {
            let entry = match record {
                Ok(entry) => entry,
                Err(err) if matches!(err.kind(), csv::ErrorKind::Deserialize { .. }) => {
                    tracing::warn!(path = %path.display(), error = %err, "Skipping dictionary row");
                    continue;
                }
                Err(source) => {
                    return Err(TextProcessingError::Dictionary {
                        path: path.to_path_buf(),
                        source,
                    })
                }
            };
            if !entry.word.is_empty() {
                dictionary.insert(entry.word, entry.formalized_word);
            }
        }

        tracing::info!(
            path = %path.display(),
            entries = dictionary.len(),
            "Loaded formalization dictionary"
        );
        Ok(Self { dictionary })
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }
}

impl LexicalFormalizer for DictionaryFormalizer {
    fn formalize(&self, tokens: &[Token]) -> TokenSequence {
        tokens
            .iter()
            .map(|token| {
                self.dictionary
                    .get(token)
                    .cloned()
                    .unwrap_or_else(|| token.clone())
            })
            .collect()
    }
}
