//! Configuration management for code-switch normalization
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`<config_dir>/default`, `<config_dir>/<env>`)
//! - Environment variables (CODEMIX__ prefix)
//!
//! Components never read the environment themselves. Every resource path and
//! tuning knob is a named field here and is handed to constructors explicitly.

pub mod code_switch;
pub mod constants;
pub mod normalization;
pub mod settings;
pub mod translation;

pub use code_switch::{CodeSwitchConfig, DetectorKind};
pub use normalization::{CustomRule, NormalizationConfig};
pub use settings::{load_settings, ResourcePaths, Settings};
pub use translation::{AlignmentAlgorithm, DecoderConfig, SlangTranslationConfig, TranslationUnit};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment error: {0}")]
    Environment(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
