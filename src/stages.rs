//! Per-stage question configuration.
//!
//! Stages live in five areas of rising difficulty:
//!   forest  : basic addition and subtraction
//!   cave    : carrying, borrowing and first multiplication
//!   castle  : division and mixed arithmetic
//!   volcano : logic, memory and spatial reasoning
//!   demon   : expert-only mixed battery
//!
//! The compiled-in table is validated once on first use. Extra or replacement
//! stages can be loaded from TOML (see `config`), validated at load time.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::{Area, Difficulty, QuestionKind};
use crate::error::StageConfigError;
use crate::generators::arithmetic::{can_borrow, can_carry};
use crate::generators::{Composition, NumberRange, MAX_OPERAND};

/// Shown when a stage has no configuration.
pub const FALLBACK_LABEL: &str = "综合练习";

/// One weighted entry of a stage. Weights are relative; selection normalizes them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageQuestionConfig {
  pub kind: QuestionKind,
  pub weight: u32,
  #[serde(default)]
  pub range: Option<NumberRange>,
  #[serde(default)]
  pub min_difficulty: Option<Difficulty>,
  #[serde(default)]
  pub max_difficulty: Option<Difficulty>,
  #[serde(default)]
  pub time_limit: Option<u32>,
}

impl StageQuestionConfig {
  pub const fn new(kind: QuestionKind, weight: u32) -> Self {
    Self { kind, weight, range: None, min_difficulty: None, max_difficulty: None, time_limit: None }
  }

  pub const fn range(mut self, min_num: i64, max_num: i64) -> Self {
    self.range = Some(NumberRange::between(min_num, max_num));
    self
  }

  pub const fn composition(mut self, composition: Composition) -> Self {
    let mut range = match self.range {
      Some(r) => r,
      None => NumberRange { min_num: None, max_num: None, composition: None },
    };
    range.composition = Some(composition);
    self.range = Some(range);
    self
  }

  pub const fn min(mut self, difficulty: Difficulty) -> Self {
    self.min_difficulty = Some(difficulty);
    self
  }

  pub const fn max(mut self, difficulty: Difficulty) -> Self {
    self.max_difficulty = Some(difficulty);
    self
  }

  pub const fn time_limit(mut self, seconds: u32) -> Self {
    self.time_limit = Some(seconds);
    self
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
  pub id: String,
  pub area: Area,
  pub questions: Vec<StageQuestionConfig>,
  #[serde(default)]
  pub base_time_limit: Option<u32>,
  #[serde(default)]
  pub difficulty_override: Option<Difficulty>,
}

impl StageConfig {
  pub fn new(id: &str, area: Area, questions: Vec<StageQuestionConfig>) -> Self {
    Self { id: id.to_string(), area, questions, base_time_limit: None, difficulty_override: None }
  }

  pub fn base_time_limit(mut self, seconds: u32) -> Self {
    self.base_time_limit = Some(seconds);
    self
  }

  pub fn difficulty_override(mut self, difficulty: Difficulty) -> Self {
    self.difficulty_override = Some(difficulty);
    self
  }

  /// Distinct labels of the configured kinds, in table order.
  pub fn labels(&self) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for entry in &self.questions {
      let label = entry.kind.label();
      if !out.contains(&label) {
        out.push(label);
      }
    }
    out
  }

  pub fn validate(&self) -> Result<(), StageConfigError> {
    if self.questions.is_empty() {
      return Err(StageConfigError::Empty(self.id.clone()));
    }
    if self.base_time_limit == Some(0) {
      return Err(StageConfigError::ZeroTimeLimit { stage: self.id.clone() });
    }

    for (index, entry) in self.questions.iter().enumerate() {
      if entry.weight == 0 {
        return Err(StageConfigError::ZeroWeight { stage: self.id.clone(), index, kind: entry.kind });
      }
      if let (Some(min), Some(max)) = (entry.min_difficulty, entry.max_difficulty) {
        if min > max {
          return Err(StageConfigError::InvertedClamp { stage: self.id.clone(), index, kind: entry.kind, min, max });
        }
      }
      if let Some(range) = &entry.range {
        self.validate_range(index, entry.kind, range)?;
      }
      if entry.time_limit == Some(0) {
        return Err(StageConfigError::ZeroTimeLimit { stage: self.id.clone() });
      }
    }
    Ok(())
  }

  /// Ranges must resolve to something every generator can draw from at every tier.
  fn validate_range(&self, index: usize, kind: QuestionKind, range: &NumberRange) -> Result<(), StageConfigError> {
    if range.is_one_sided() {
      return Err(StageConfigError::OneSidedRange { stage: self.id.clone(), index, kind });
    }
    let Some((min, max)) = range.explicit_bounds() else {
      return Ok(());
    };
    if min < 1 || min >= max || max > MAX_OPERAND {
      return Err(StageConfigError::InvalidRange { stage: self.id.clone(), index, kind, min, max });
    }
    if range.composition == Some(Composition::ForceCarry) {
      let feasible = match kind {
        QuestionKind::Addition => can_carry(min, max),
        QuestionKind::Subtraction => can_borrow(min, max),
        _ => true,
      };
      if !feasible {
        return Err(StageConfigError::UnsatisfiableCarry { stage: self.id.clone(), index, kind, min, max });
      }
    }
    Ok(())
  }
}

/// Stage lookup table, in definition order.
#[derive(Clone, Debug, Default)]
pub struct StageTable {
  stages: Vec<StageConfig>,
  index: HashMap<String, usize>,
}

impl StageTable {
  /// Build and validate a table. Ids must be unique.
  pub fn from_stages(stages: Vec<StageConfig>) -> Result<Self, StageConfigError> {
    let mut index = HashMap::with_capacity(stages.len());
    for (i, stage) in stages.iter().enumerate() {
      stage.validate()?;
      if index.insert(stage.id.clone(), i).is_some() {
        return Err(StageConfigError::Duplicate(stage.id.clone()));
      }
    }
    Ok(Self { stages, index })
  }

  /// The compiled-in table. A defect here is a programming error and panics on first use.
  pub fn builtin() -> &'static StageTable {
    static TABLE: OnceLock<StageTable> = OnceLock::new();
    TABLE.get_or_init(|| {
      StageTable::from_stages(builtin_stages()).unwrap_or_else(|e| panic!("built-in stage table is invalid: {e}"))
    })
  }

  /// Copy of `self` with `overrides` added; an override with an existing id replaces it in place.
  pub fn with_overrides(&self, overrides: Vec<StageConfig>) -> Result<Self, StageConfigError> {
    let mut seen: Vec<String> = Vec::with_capacity(overrides.len());
    let mut stages = self.stages.clone();
    for stage in overrides {
      if seen.contains(&stage.id) {
        return Err(StageConfigError::Duplicate(stage.id));
      }
      seen.push(stage.id.clone());
      match self.index.get(&stage.id) {
        Some(&i) => stages[i] = stage,
        None => stages.push(stage),
      }
    }
    Self::from_stages(stages)
  }

  /// Re-check every stage. Tables built through `from_stages` already pass this.
  pub fn validate(&self) -> Result<(), StageConfigError> {
    self.stages.iter().try_for_each(StageConfig::validate)
  }

  pub fn get(&self, stage_id: &str) -> Option<&StageConfig> {
    self.index.get(stage_id).map(|&i| &self.stages[i])
  }

  pub fn iter(&self) -> impl Iterator<Item = &StageConfig> {
    self.stages.iter()
  }

  pub fn len(&self) -> usize {
    self.stages.len()
  }

  pub fn is_empty(&self) -> bool {
    self.stages.is_empty()
  }

  /// Display labels for a stage, or the single fallback label if it is unconfigured.
  pub fn labels(&self, stage_id: &str) -> Vec<&'static str> {
    match self.get(stage_id) {
      Some(stage) => stage.labels(),
      None => vec![FALLBACK_LABEL],
    }
  }
}

/// Labels for a stage of the compiled-in table.
pub fn stage_question_labels(stage_id: &str) -> Vec<&'static str> {
  StageTable::builtin().labels(stage_id)
}

fn builtin_stages() -> Vec<StageConfig> {
  use Difficulty::{Easy, Expert, Hard, Medium};
  use QuestionKind::*;
  type Q = StageQuestionConfig;

  vec![
    // Area 1: forest
    StageConfig::new("forest-1", Area::Forest, vec![Q::new(Addition, 60).range(1, 10), Q::new(Subtraction, 40).range(1, 10)])
      .difficulty_override(Easy),
    StageConfig::new(
      "forest-2",
      Area::Forest,
      vec![
        Q::new(Addition, 40).range(1, 20),
        Q::new(Subtraction, 30).range(1, 20),
        Q::new(Comparison, 20),
        Q::new(Pattern, 10),
      ],
    )
    .difficulty_override(Easy)
    .base_time_limit(30),
    StageConfig::new(
      "forest-3",
      Area::Forest,
      vec![
        Q::new(Addition, 30),
        Q::new(Subtraction, 30),
        Q::new(Comparison, 15),
        Q::new(Sequence, 15),
        Q::new(WordProblem, 10).max(Medium),
      ],
    )
    .base_time_limit(30),
    // Area 2: cave
    StageConfig::new(
      "cave-1",
      Area::Cave,
      vec![
        Q::new(Addition, 40).range(10, 99).composition(Composition::ForceCarry),
        Q::new(Subtraction, 40).range(10, 99).composition(Composition::ForceCarry),
        Q::new(Comparison, 20),
      ],
    )
    .base_time_limit(30),
    StageConfig::new(
      "cave-2",
      Area::Cave,
      vec![
        Q::new(Addition, 30).composition(Composition::SingleAndDouble),
        Q::new(Subtraction, 25).composition(Composition::SingleAndDouble),
        Q::new(Multiplication, 30).range(2, 5),
        Q::new(Sequence, 15),
      ],
    )
    .base_time_limit(30),
    StageConfig::new(
      "cave-3",
      Area::Cave,
      vec![
        Q::new(Multiplication, 40).range(2, 9),
        Q::new(Addition, 20).range(10, 99).composition(Composition::ForceCarry),
        Q::new(WordProblem, 25).max(Medium),
        Q::new(Logic, 15).max(Medium),
      ],
    )
    .base_time_limit(35),
    // Area 3: castle
    StageConfig::new(
      "castle-1",
      Area::Castle,
      vec![
        Q::new(Division, 45).range(2, 9),
        Q::new(Multiplication, 35).range(2, 9),
        Q::new(Subtraction, 20).min(Medium),
      ],
    )
    .base_time_limit(30),
    StageConfig::new(
      "castle-2",
      Area::Castle,
      vec![
        Q::new(Division, 35),
        Q::new(WordProblem, 30).min(Medium),
        Q::new(Pattern, 20),
        Q::new(Logic, 15),
      ],
    )
    .base_time_limit(35),
    StageConfig::new(
      "castle-3",
      Area::Castle,
      vec![
        Q::new(Multiplication, 20),
        Q::new(Division, 20),
        Q::new(WordProblem, 25).min(Medium),
        Q::new(SpeedMath, 20),
        Q::new(Comparison, 15).min(Medium),
      ],
    )
    .base_time_limit(30),
    // Area 4: volcano
    StageConfig::new(
      "volcano-1",
      Area::Volcano,
      vec![
        Q::new(Logic, 30).min(Medium),
        Q::new(WorkingMemory, 25),
        Q::new(Sequence, 25).min(Medium),
        Q::new(Analogies, 20),
      ],
    )
    .base_time_limit(40),
    StageConfig::new(
      "volcano-2",
      Area::Volcano,
      vec![
        Q::new(SpatialRotation, 30),
        Q::new(MatrixReasoning, 30),
        Q::new(Logic, 20).min(Medium),
        Q::new(Probability, 20),
      ],
    )
    .base_time_limit(40),
    StageConfig::new(
      "volcano-3",
      Area::Volcano,
      vec![
        Q::new(Sudoku, 30),
        Q::new(WorkingMemory, 25).min(Medium),
        Q::new(SpeedMath, 20),
        Q::new(WordProblem, 25).min(Hard),
      ],
    )
    .base_time_limit(40),
    // Area 5: demon
    StageConfig::new(
      "demon-1",
      Area::Demon,
      vec![
        Q::new(Multiplication, 15).min(Hard),
        Q::new(Division, 15).min(Hard),
        Q::new(WordProblem, 20).min(Hard),
        Q::new(Logic, 20).min(Hard),
        Q::new(MatrixReasoning, 15).min(Hard),
        Q::new(SpeedMath, 15).min(Hard),
      ],
    )
    .base_time_limit(30),
    StageConfig::new(
      "demon-2",
      Area::Demon,
      vec![
        Q::new(Sequence, 20).min(Hard),
        Q::new(SpatialRotation, 20).min(Hard),
        Q::new(Sudoku, 20).min(Hard),
        Q::new(Probability, 20).min(Hard),
        Q::new(WorkingMemory, 20).min(Expert),
      ],
    )
    .base_time_limit(30),
    StageConfig::new(
      "demon-3",
      Area::Demon,
      vec![
        Q::new(Addition, 10),
        Q::new(Subtraction, 10),
        Q::new(Multiplication, 10),
        Q::new(Division, 10),
        Q::new(WordProblem, 15),
        Q::new(Logic, 15),
        Q::new(Analogies, 10),
        Q::new(MatrixReasoning, 10),
        Q::new(SpeedMath, 10).time_limit(8),
      ],
    )
    .difficulty_override(Expert)
    .base_time_limit(25),
  ]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builtin_table_is_valid_and_covers_every_area() {
    let table = StageTable::builtin();
    assert_eq!(table.len(), 15);
    for area in [Area::Forest, Area::Cave, Area::Castle, Area::Volcano, Area::Demon] {
      assert!(table.iter().any(|s| s.area == area), "{area:?}");
    }
    assert_eq!(table.validate(), Ok(()));
  }

  #[test]
  fn forest_two_labels_are_distinct_and_ordered() {
    let labels = stage_question_labels("forest-2");
    assert_eq!(labels, vec!["加法", "减法", "比大小", "找规律"]);
  }

  #[test]
  fn repeated_kinds_collapse_to_one_label() {
    let stage = StageConfig::new(
      "dup",
      Area::Forest,
      vec![
        StageQuestionConfig::new(QuestionKind::Addition, 1).range(1, 5),
        StageQuestionConfig::new(QuestionKind::Addition, 2).range(5, 10),
        StageQuestionConfig::new(QuestionKind::Logic, 1),
      ],
    );
    assert_eq!(stage.labels(), vec!["加法", "逻辑推理"]);
  }

  #[test]
  fn unknown_stage_gets_the_fallback_label() {
    assert_eq!(stage_question_labels("nowhere-9"), vec![FALLBACK_LABEL]);
  }

  #[test]
  fn rejects_zero_weight() {
    let stage = StageConfig::new("bad", Area::Cave, vec![StageQuestionConfig::new(QuestionKind::Addition, 0)]);
    assert_eq!(
      stage.validate(),
      Err(StageConfigError::ZeroWeight { stage: "bad".into(), index: 0, kind: QuestionKind::Addition })
    );
  }

  #[test]
  fn rejects_inverted_clamp_and_range() {
    let stage = StageConfig::new(
      "bad",
      Area::Cave,
      vec![StageQuestionConfig::new(QuestionKind::Logic, 5).min(Difficulty::Expert).max(Difficulty::Easy)],
    );
    assert!(matches!(stage.validate(), Err(StageConfigError::InvertedClamp { .. })));

    let stage = StageConfig::new("bad", Area::Cave, vec![StageQuestionConfig::new(QuestionKind::Addition, 5).range(9, 3)]);
    assert!(matches!(stage.validate(), Err(StageConfigError::InvalidRange { .. })));
  }

  #[test]
  fn rejects_one_sided_and_oversized_ranges() {
    let mut lower_only = StageQuestionConfig::new(QuestionKind::Addition, 1);
    lower_only.range = Some(NumberRange { min_num: Some(50), ..NumberRange::default() });
    let stage = StageConfig::new("half", Area::Forest, vec![lower_only]);
    assert_eq!(
      stage.validate(),
      Err(StageConfigError::OneSidedRange { stage: "half".into(), index: 0, kind: QuestionKind::Addition })
    );

    let huge = StageQuestionConfig::new(QuestionKind::Multiplication, 1).range(4_000_000_000, 5_000_000_000);
    let stage = StageConfig::new("huge", Area::Castle, vec![huge]);
    assert!(matches!(stage.validate(), Err(StageConfigError::InvalidRange { max: 5_000_000_000, .. })));

    let edge = StageQuestionConfig::new(QuestionKind::Multiplication, 1).range(1, MAX_OPERAND);
    assert_eq!(StageConfig::new("edge", Area::Castle, vec![edge]).validate(), Ok(()));
  }

  #[test]
  fn rejects_forced_carry_the_range_cannot_produce() {
    let add = StageQuestionConfig::new(QuestionKind::Addition, 1).range(1, 4).composition(Composition::ForceCarry);
    let stage = StageConfig::new("tiny", Area::Cave, vec![add]);
    assert!(matches!(stage.validate(), Err(StageConfigError::UnsatisfiableCarry { min: 1, max: 4, .. })));

    let sub = StageQuestionConfig::new(QuestionKind::Subtraction, 1).range(21, 28).composition(Composition::ForceCarry);
    let stage = StageConfig::new("tiny", Area::Cave, vec![sub]);
    assert!(matches!(stage.validate(), Err(StageConfigError::UnsatisfiableCarry { .. })));

    // Kinds without a carry rule ignore the composition.
    let mul = StageQuestionConfig::new(QuestionKind::Multiplication, 1).range(1, 4).composition(Composition::ForceCarry);
    assert_eq!(StageConfig::new("ok", Area::Cave, vec![mul]).validate(), Ok(()));
  }

  #[test]
  fn rejects_empty_and_duplicate_stages() {
    let empty = StageConfig::new("void", Area::Demon, vec![]);
    assert_eq!(StageTable::from_stages(vec![empty]).unwrap_err(), StageConfigError::Empty("void".into()));

    let a = StageConfig::new("twin", Area::Forest, vec![StageQuestionConfig::new(QuestionKind::Addition, 1)]);
    let err = StageTable::from_stages(vec![a.clone(), a]).unwrap_err();
    assert_eq!(err, StageConfigError::Duplicate("twin".into()));
  }

  #[test]
  fn overrides_replace_in_place_and_append() {
    let base = StageTable::builtin();
    let replaced = StageConfig::new("forest-1", Area::Forest, vec![StageQuestionConfig::new(QuestionKind::Logic, 1)]);
    let added = StageConfig::new("secret-1", Area::Demon, vec![StageQuestionConfig::new(QuestionKind::Sudoku, 1)]);
    let table = base.with_overrides(vec![replaced, added]).unwrap();

    assert_eq!(table.len(), base.len() + 1);
    assert_eq!(table.iter().next().map(|s| s.id.as_str()), Some("forest-1"));
    assert_eq!(table.labels("forest-1"), vec!["逻辑推理"]);
    assert_eq!(table.labels("secret-1"), vec!["数独"]);
  }
}
