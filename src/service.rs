//! Request-level glue shared by the HTTP and WebSocket handlers: parse the
//! loosely typed client input, then call into the engine.

use tracing::{info, instrument};

use crate::domain::{Character, Difficulty, Question};
use crate::engine::generate_question_with;
use crate::state::AppState;

/// Missing difficulty means the player just started.
pub const DEFAULT_DIFFICULTY: Difficulty = Difficulty::Easy;
pub const DEFAULT_CHARACTER: Character = Character::Josh;

/// Parse input and generate one question. Errors are client mistakes.
#[instrument(level = "info", skip(state))]
pub fn serve_question(
    state: &AppState,
    stage: &str,
    character: Option<&str>,
    difficulty: Option<&str>,
) -> Result<Question, String> {
    let character = match character {
        Some(raw) => raw.parse::<Character>()?,
        None => DEFAULT_CHARACTER,
    };
    let base = match difficulty {
        Some(raw) => raw.parse::<Difficulty>()?,
        None => DEFAULT_DIFFICULTY,
    };

    let question = generate_question_with(&state.stages, &mut rand::thread_rng(), stage, character, base);
    info!(
        target: "question",
        %stage,
        %character,
        %base,
        id = %question.id,
        kind = ?question.kind,
        effective = %question.difficulty,
        "Question served"
    );
    Ok(question)
}

pub fn stage_labels(state: &AppState, stage: &str) -> Vec<&'static str> {
    state.stages.labels(stage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_input_is_missing() {
        let state = AppState::default();
        let q = serve_question(&state, "castle-1", None, None).unwrap();
        // Josh at EASY; castle-1 subtraction is floored at MEDIUM.
        assert!(q.difficulty <= Difficulty::Medium);
    }

    #[test]
    fn bad_input_is_reported() {
        let state = AppState::default();
        assert!(serve_question(&state, "forest-1", Some("gandalf"), None).is_err());
        assert!(serve_question(&state, "forest-1", None, Some("LEGENDARY")).is_err());
    }

    #[test]
    fn parsing_is_case_insensitive() {
        let state = AppState::default();
        let q = serve_question(&state, "demon-3", Some("Josh"), Some("easy")).unwrap();
        assert_eq!(q.difficulty, Difficulty::Expert);
    }
}
