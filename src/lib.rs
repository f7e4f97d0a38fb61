//! Question generation and difficulty engine for the math dungeon game.
//!
//! The core is `engine::generate_question`: given a stage, a character and the
//! player's current tier it returns one multiple-choice `Question`. Everything
//! else is either the data it reads (`stages`), the generators it delegates to
//! (`generators`), or the HTTP/WebSocket shell the binary serves it through.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod generators;
pub mod protocol;
pub mod routes;
pub mod service;
pub mod stages;
pub mod state;
pub mod telemetry;
pub mod util;

pub use domain::{AnswerValue, Area, Character, Difficulty, Question, QuestionKind, QuestionType};
pub use engine::{generate_question, generate_question_with};
pub use error::{ConfigError, StageConfigError};
pub use stages::{stage_question_labels, StageConfig, StageQuestionConfig, StageTable};
