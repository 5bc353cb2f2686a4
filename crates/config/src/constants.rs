//! Centralized defaults
//!
//! Single source of truth for default resource locations and model
//! parameters used across the workspace.

/// Default resource locations, relative to the working directory
pub mod paths {
    pub const VOCABULARY: &str = "resources/id_kateglo.vocab";
    pub const FORMALIZATION_DICT: &str = "resources/formalizationDict.csv";
}

/// Statistical slang translation defaults
pub mod smt {
    /// Order of the target-side n-gram language model
    pub const NGRAM_ORDER: usize = 3;

    /// EM iterations for alignment training
    pub const ITERATIONS: usize = 10;

    /// Maximum phrase-table candidates kept per source token
    pub const MAX_CANDIDATES_PER_SOURCE: usize = 1000;

    /// Largest fertility IBM Model 3 assigns a probability to
    pub const MAX_FERTILITY: usize = 10;
}

/// Stack decoder defaults
pub mod decoder {
    /// Penalty base for reordering; 1.0 disables the penalty
    pub const DISTORTION_FACTOR: f64 = 0.5;

    /// Relative threshold for stack pruning; 0.0 disables threshold pruning
    pub const BEAM_THRESHOLD: f64 = 0.0;

    /// Maximum hypotheses per stack
    pub const STACK_SIZE: usize = 100;

    /// Per target word penalty
    pub const WORD_PENALTY: f64 = 0.0;

    /// Log-probability of a unit never seen by the language model
    pub const OOV_LOG_PROB: f64 = -20.0;
}
