//! Error types for configuration loading.
//!
//! Question generation itself cannot fail. A defective stage table is a
//! configuration bug and is rejected where the table is loaded.

use thiserror::Error;

use crate::domain::{Difficulty, QuestionKind};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageConfigError {
  #[error("stage '{0}' has no question entries")]
  Empty(String),

  #[error("stage '{0}' is defined more than once")]
  Duplicate(String),

  #[error("stage '{stage}': entry {index} ({kind}) has zero weight")]
  ZeroWeight { stage: String, index: usize, kind: QuestionKind },

  #[error("stage '{stage}': entry {index} ({kind}) has min difficulty {min} above max difficulty {max}")]
  InvertedClamp { stage: String, index: usize, kind: QuestionKind, min: Difficulty, max: Difficulty },

  #[error("stage '{stage}': entry {index} ({kind}) has an invalid number range {min}..={max} (need 1 <= min < max <= 9999)")]
  InvalidRange { stage: String, index: usize, kind: QuestionKind, min: i64, max: i64 },

  #[error("stage '{stage}': entry {index} ({kind}) sets only one of min_num/max_num")]
  OneSidedRange { stage: String, index: usize, kind: QuestionKind },

  #[error("stage '{stage}': entry {index} ({kind}) forces a carry or borrow that {min}..={max} cannot produce")]
  UnsatisfiableCarry { stage: String, index: usize, kind: QuestionKind, min: i64, max: i64 },

  #[error("stage '{stage}': time limit must be positive")]
  ZeroTimeLimit { stage: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read game config '{path}': {source}")]
  Io {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse game config '{path}': {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },

  #[error(transparent)]
  Stage(#[from] StageConfigError),
}
