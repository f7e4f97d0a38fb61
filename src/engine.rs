//! Question orchestrator.
//!
//! One call per battle turn: pick a weighted entry from the stage table, resolve
//! the effective tier, delegate to the matching generator and apply time limits.
//! Nothing here holds state between calls; randomness comes from the caller's RNG.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::domain::{Character, Difficulty, Question, QuestionKind};
use crate::generators::{advanced, arithmetic, comparison, logic, pattern, word_problem, NumberRange};
use crate::stages::{StageConfig, StageQuestionConfig, StageTable};

/// Kinds used for stages missing from the table.
pub const FALLBACK_KINDS: [QuestionKind; 4] = [
  QuestionKind::Addition,
  QuestionKind::Subtraction,
  QuestionKind::Multiplication,
  QuestionKind::Division,
];

/// Generate against the compiled-in table with the thread-local RNG.
pub fn generate_question(stage_id: &str, character: Character, base: Difficulty) -> Question {
  generate_question_with(StageTable::builtin(), &mut rand::thread_rng(), stage_id, character, base)
}

#[instrument(level = "debug", skip(table, rng), fields(%character, %base))]
pub fn generate_question_with<R: Rng + ?Sized>(
  table: &StageTable,
  rng: &mut R,
  stage_id: &str,
  character: Character,
  base: Difficulty,
) -> Question {
  let Some(stage) = table.get(stage_id) else {
    // Unconfigured stages serve the base tier unchanged.
    let kind = FALLBACK_KINDS.choose(rng).copied().unwrap_or(QuestionKind::Addition);
    warn!(target: "question", %stage_id, %kind, difficulty = %base, "Unknown stage; falling back to basic arithmetic.");
    return dispatch(rng, kind, base, None);
  };

  let entry = select_entry(rng, &stage.questions);
  let difficulty = resolve_difficulty(base, stage, character, entry);
  debug!(target: "question", %stage_id, kind = %entry.kind, %difficulty, "Selected stage entry");

  let question = dispatch(rng, entry.kind, difficulty, entry.range.as_ref());
  apply_time_limit(question, stage, entry)
}

/// Weighted draw over `entries`.
///
/// Draws one value in `[0, total)` and returns the first entry whose cumulative
/// weight exceeds it. Panics on an empty slice or a zero total, both of which
/// table validation rejects.
pub fn select_entry<'a, R: Rng + ?Sized>(rng: &mut R, entries: &'a [StageQuestionConfig]) -> &'a StageQuestionConfig {
  let total: u64 = entries.iter().map(|e| u64::from(e.weight)).sum();
  assert!(total > 0, "stage entries must carry a positive total weight");

  let draw = rng.gen_range(0..total);
  let mut cumulative = 0u64;
  for entry in entries {
    cumulative += u64::from(entry.weight);
    if draw < cumulative {
      return entry;
    }
  }
  unreachable!("draw {draw} is below total weight {total}")
}

/// Effective tier: base, then stage override, then character policy, then entry clamp.
pub fn resolve_difficulty(
  base: Difficulty,
  stage: &StageConfig,
  character: Character,
  entry: &StageQuestionConfig,
) -> Difficulty {
  let staged = stage.difficulty_override.unwrap_or(base);
  let adjusted = character.policy().apply(staged, Some(stage.area));
  adjusted.clamp_between(entry.min_difficulty, entry.max_difficulty)
}

fn dispatch<R: Rng + ?Sized>(rng: &mut R, kind: QuestionKind, d: Difficulty, range: Option<&NumberRange>) -> Question {
  match kind {
    QuestionKind::Addition => arithmetic::generate_addition(rng, d, range),
    QuestionKind::Subtraction => arithmetic::generate_subtraction(rng, d, range),
    QuestionKind::Multiplication => arithmetic::generate_multiplication(rng, d, range),
    QuestionKind::Division => arithmetic::generate_division(rng, d, range),
    QuestionKind::Comparison => comparison::generate_comparison(rng, d, range),
    QuestionKind::Pattern => pattern::generate_pattern(rng, d),
    QuestionKind::Sequence => pattern::generate_sequence(rng, d),
    QuestionKind::Logic => logic::generate_logic(rng, d),
    QuestionKind::WordProblem => word_problem::generate_word_problem(rng, d, range),
    QuestionKind::MatrixReasoning => advanced::matrix_reasoning(rng, d),
    QuestionKind::WorkingMemory => advanced::working_memory(rng, d),
    QuestionKind::SpatialRotation => advanced::spatial_rotation(rng, d),
    QuestionKind::Analogies => advanced::analogies(rng, d),
    QuestionKind::Sudoku => advanced::sudoku(rng, d),
    QuestionKind::Probability => advanced::probability(rng, d),
    QuestionKind::SpeedMath => advanced::speed_math(rng, d),
  }
}

/// Entry limit wins; the stage base limit only fills a missing one.
fn apply_time_limit(mut question: Question, stage: &StageConfig, entry: &StageQuestionConfig) -> Question {
  if let Some(seconds) = entry.time_limit {
    question.time_limit = Some(seconds);
  } else if question.time_limit.is_none() {
    question.time_limit = stage.base_time_limit;
  }
  question
}
