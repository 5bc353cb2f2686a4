//! Main settings module

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use codemix_core::LanguageLabel;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::paths;
use crate::{CodeSwitchConfig, ConfigError, NormalizationConfig, SlangTranslationConfig};

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// File-backed resources
    #[serde(default)]
    pub resources: ResourcePaths,

    /// Rule normalizer configuration
    #[serde(default)]
    pub normalization: NormalizationConfig,

    /// Statistical slang translator configuration
    #[serde(default)]
    pub slang_translation: SlangTranslationConfig,

    /// Orchestrator configuration
    #[serde(default)]
    pub code_switch: CodeSwitchConfig,
}

/// Every file the pipeline reads, as explicit named paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePaths {
    /// Formal vocabulary, one word per line
    #[serde(default = "default_vocabulary_path")]
    pub vocabulary_path: PathBuf,

    /// Formalization dictionary, TSV with `word` and `formalized_word` columns
    #[serde(default = "default_formalization_dict_path")]
    pub formalization_dict_path: PathBuf,

    /// Word lists for the lexicon language detector, one file per label
    #[serde(default)]
    pub lexicon_paths: BTreeMap<LanguageLabel, PathBuf>,
}

fn default_vocabulary_path() -> PathBuf {
    PathBuf::from(paths::VOCABULARY)
}

fn default_formalization_dict_path() -> PathBuf {
    PathBuf::from(paths::FORMALIZATION_DICT)
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self {
            vocabulary_path: default_vocabulary_path(),
            formalization_dict_path: default_formalization_dict_path(),
            lexicon_paths: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Create default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_slang_translation()?;
        self.validate_code_switch()?;
        Ok(())
    }

    fn validate_slang_translation(&self) -> Result<(), ConfigError> {
        let smt = &self.slang_translation;

        if smt.ngram_order == 0 {
            return Err(ConfigError::InvalidValue {
                field: "slang_translation.ngram_order".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if smt.iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "slang_translation.iterations".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        let decoder = &smt.decoder;
        if decoder.stack_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "slang_translation.decoder.stack_size".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if !(decoder.distortion_factor > 0.0 && decoder.distortion_factor <= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "slang_translation.decoder.distortion_factor".to_string(),
                message: format!(
                    "Must be in (0.0, 1.0], got {}",
                    decoder.distortion_factor
                ),
            });
        }

        if !(0.0..=1.0).contains(&decoder.beam_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "slang_translation.decoder.beam_threshold".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    decoder.beam_threshold
                ),
            });
        }

        Ok(())
    }

    fn validate_code_switch(&self) -> Result<(), ConfigError> {
        if !self.code_switch.target_language.is_linguistic() {
            return Err(ConfigError::InvalidValue {
                field: "code_switch.target_language".to_string(),
                message: "Target language cannot be the 'other' label".to_string(),
            });
        }
        Ok(())
    }
}

/// Load settings from `<config_dir>/default`, `<config_dir>/<env>` and
/// `CODEMIX__`-prefixed environment variables, in increasing priority
pub fn load_settings(config_dir: &Path, env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    // Load default config
    let default_path = config_dir.join("default");
    builder = builder.add_source(File::with_name(&default_path.to_string_lossy()).required(false));

    // Load environment-specific config
    if let Some(env_name) = env {
        let env_path = config_dir.join(env_name);
        builder = builder.add_source(File::with_name(&env_path.to_string_lossy()).required(false));
    }

    // Load from environment variables
    builder = builder.add_source(
        Environment::with_prefix("CODEMIX")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    // Validate
    settings.validate()?;

    tracing::debug!(
        config_dir = %config_dir.display(),
        env = env.unwrap_or("none"),
        "Loaded settings"
    );

    Ok(settings)
}
