//! Domain models shared by the generators, the stage tables and the HTTP layer:
//! difficulty tiers, question kinds, playable characters, answers and the question itself.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::util::question_id;

/// Four strictly ordered tiers. `Ord` follows declaration order, so
/// `Easy < Medium < Hard < Expert`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
  Easy,
  Medium,
  Hard,
  Expert,
}

impl Difficulty {
  pub const ALL: [Difficulty; 4] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Expert];

  pub const fn index(self) -> usize {
    match self {
      Difficulty::Easy => 0,
      Difficulty::Medium => 1,
      Difficulty::Hard => 2,
      Difficulty::Expert => 3,
    }
  }

  /// One tier harder, saturating at `Expert`.
  pub fn step_up(self) -> Self {
    let i = (self.index() + 1).min(Self::ALL.len() - 1);
    Self::ALL[i]
  }

  /// One tier easier, saturating at `Easy`.
  pub fn step_down(self) -> Self {
    Self::ALL[self.index().saturating_sub(1)]
  }

  /// Raise to `min` if below it, lower to `max` if above it.
  pub fn clamp_between(self, min: Option<Difficulty>, max: Option<Difficulty>) -> Self {
    let mut d = self;
    if let Some(lo) = min {
      d = d.max(lo);
    }
    if let Some(hi) = max {
      d = d.min(hi);
    }
    d
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Difficulty::Easy => "EASY",
      Difficulty::Medium => "MEDIUM",
      Difficulty::Hard => "HARD",
      Difficulty::Expert => "EXPERT",
    }
  }
}

impl fmt::Display for Difficulty {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Difficulty {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_uppercase().as_str() {
      "EASY" => Ok(Difficulty::Easy),
      "MEDIUM" => Ok(Difficulty::Medium),
      "HARD" => Ok(Difficulty::Hard),
      "EXPERT" => Ok(Difficulty::Expert),
      other => Err(format!("Unknown difficulty '{other}' (expected EASY, MEDIUM, HARD or EXPERT)")),
    }
  }
}

/// Public question type, as seen by the battle loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
  Addition,
  Subtraction,
  Multiplication,
  Division,
  Pattern,
  Comparison,
  Sequence,
  Logic,
  WordProblem,
}

/// Analytics tag, orthogonal to `QuestionType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionCategory {
  Application,
  Logic,
  MatrixReasoning,
  WorkingMemory,
  SpatialRotation,
  Analogies,
  Sudoku,
  Probability,
  SpeedMath,
}

/// Type tag used by the stage tables. Covers the plain question types plus the
/// advanced sub-types, each of which is delivered as `pattern` or `logic`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
  Addition,
  Subtraction,
  Multiplication,
  Division,
  Pattern,
  Comparison,
  Sequence,
  Logic,
  WordProblem,
  MatrixReasoning,
  WorkingMemory,
  SpatialRotation,
  Analogies,
  Sudoku,
  Probability,
  SpeedMath,
}

impl QuestionKind {
  pub const fn question_type(self) -> QuestionType {
    match self {
      QuestionKind::Addition => QuestionType::Addition,
      QuestionKind::Subtraction => QuestionType::Subtraction,
      QuestionKind::Multiplication => QuestionType::Multiplication,
      QuestionKind::Division => QuestionType::Division,
      QuestionKind::Pattern => QuestionType::Pattern,
      QuestionKind::Comparison => QuestionType::Comparison,
      QuestionKind::Sequence => QuestionType::Sequence,
      QuestionKind::Logic => QuestionType::Logic,
      QuestionKind::WordProblem => QuestionType::WordProblem,
      QuestionKind::MatrixReasoning | QuestionKind::SpatialRotation | QuestionKind::Sudoku => QuestionType::Pattern,
      QuestionKind::WorkingMemory
      | QuestionKind::Analogies
      | QuestionKind::Probability
      | QuestionKind::SpeedMath => QuestionType::Logic,
    }
  }

  /// Display name shown on the stage-select chips.
  pub const fn label(self) -> &'static str {
    match self {
      QuestionKind::Addition => "加法",
      QuestionKind::Subtraction => "减法",
      QuestionKind::Multiplication => "乘法",
      QuestionKind::Division => "除法",
      QuestionKind::Pattern => "找规律",
      QuestionKind::Comparison => "比大小",
      QuestionKind::Sequence => "数列",
      QuestionKind::Logic => "逻辑推理",
      QuestionKind::WordProblem => "应用题",
      QuestionKind::MatrixReasoning => "矩阵推理",
      QuestionKind::WorkingMemory => "记忆力",
      QuestionKind::SpatialRotation => "空间旋转",
      QuestionKind::Analogies => "类比",
      QuestionKind::Sudoku => "数独",
      QuestionKind::Probability => "可能性",
      QuestionKind::SpeedMath => "速算",
    }
  }
}

impl fmt::Display for QuestionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Serialized name doubles as the log/display name.
    let name = match self {
      QuestionKind::Addition => "addition",
      QuestionKind::Subtraction => "subtraction",
      QuestionKind::Multiplication => "multiplication",
      QuestionKind::Division => "division",
      QuestionKind::Pattern => "pattern",
      QuestionKind::Comparison => "comparison",
      QuestionKind::Sequence => "sequence",
      QuestionKind::Logic => "logic",
      QuestionKind::WordProblem => "word-problem",
      QuestionKind::MatrixReasoning => "matrix-reasoning",
      QuestionKind::WorkingMemory => "working-memory",
      QuestionKind::SpatialRotation => "spatial-rotation",
      QuestionKind::Analogies => "analogies",
      QuestionKind::Sudoku => "sudoku",
      QuestionKind::Probability => "probability",
      QuestionKind::SpeedMath => "speed-math",
    };
    f.write_str(name)
  }
}

/// The five dungeon areas, in order of increasing difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
  Forest,
  Cave,
  Castle,
  Volcano,
  Demon,
}

impl Area {
  /// Tier used for characters whose difficulty is pinned by area.
  pub const fn pinned_difficulty(self) -> Difficulty {
    match self {
      Area::Forest | Area::Cave => Difficulty::Easy,
      Area::Castle => Difficulty::Medium,
      Area::Volcano | Area::Demon => Difficulty::Hard,
    }
  }
}

/// How a character bends the tier handed in by the battle loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyPolicy {
  /// Uses the tier as given.
  Standard,
  /// Always one tier easier, floored at `Easy`.
  Assisted,
  /// Ignores player progress; the tier comes from the stage's area.
  PinnedByArea,
}

impl DifficultyPolicy {
  /// `area` is `None` for unconfigured stages; pinned characters then keep `difficulty`.
  pub fn apply(self, difficulty: Difficulty, area: Option<Area>) -> Difficulty {
    match self {
      DifficultyPolicy::Standard => difficulty,
      DifficultyPolicy::Assisted => difficulty.step_down(),
      DifficultyPolicy::PinnedByArea => area.map(Area::pinned_difficulty).unwrap_or(difficulty),
    }
  }
}

/// Playable characters. `Vince` is the max-power testing profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Character {
  Josh,
  Abby,
  Vince,
}

impl Character {
  pub const fn policy(self) -> DifficultyPolicy {
    match self {
      Character::Josh => DifficultyPolicy::Standard,
      Character::Abby => DifficultyPolicy::Assisted,
      Character::Vince => DifficultyPolicy::PinnedByArea,
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Character::Josh => "josh",
      Character::Abby => "abby",
      Character::Vince => "vince",
    }
  }
}

impl fmt::Display for Character {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Character {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "josh" => Ok(Character::Josh),
      "abby" => Ok(Character::Abby),
      "vince" => Ok(Character::Vince),
      other => Err(format!("Unknown character '{other}'")),
    }
  }
}

/// A canonical answer or an option. Serialized untagged, so JSON sees a plain
/// number or string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
  Int(i64),
  Decimal(f64),
  Text(String),
}

impl AnswerValue {
  /// Rounds to one decimal place; whole results collapse to `Int`.
  pub fn decimal(value: f64) -> Self {
    let tenths = (value * 10.0).round() as i64;
    if tenths % 10 == 0 {
      AnswerValue::Int(tenths / 10)
    } else {
      AnswerValue::Decimal(tenths as f64 / 10.0)
    }
  }

  pub fn text(value: impl Into<String>) -> Self {
    AnswerValue::Text(value.into())
  }

  pub fn as_f64(&self) -> Option<f64> {
    match self {
      AnswerValue::Int(n) => Some(*n as f64),
      AnswerValue::Decimal(x) => Some(*x),
      AnswerValue::Text(_) => None,
    }
  }

  pub fn is_numeric(&self) -> bool {
    !matches!(self, AnswerValue::Text(_))
  }
}

impl fmt::Display for AnswerValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AnswerValue::Int(n) => write!(f, "{n}"),
      AnswerValue::Decimal(x) => write!(f, "{x:.1}"),
      AnswerValue::Text(s) => f.write_str(s),
    }
  }
}

/// Decorative payload for animated blocks. Not read by any generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
  pub x: f32,
  pub y: f32,
  pub color: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
}

/// One generated question. Created fresh per battle turn and never mutated by callers.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub id: String,
  #[serde(rename = "type")]
  pub kind: QuestionType,
  pub difficulty: Difficulty,
  pub question: String,
  pub answer: AnswerValue,
  pub options: Vec<AnswerValue>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<QuestionCategory>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub time_limit: Option<u32>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub visual_elements: Option<Vec<VisualElement>>,
}

impl Question {
  pub fn new<R: Rng + ?Sized>(
    rng: &mut R,
    kind: QuestionType,
    difficulty: Difficulty,
    question: String,
    answer: AnswerValue,
    options: Vec<AnswerValue>,
  ) -> Self {
    Self {
      id: question_id(rng),
      kind,
      difficulty,
      question,
      answer,
      options,
      category: None,
      time_limit: None,
      visual_elements: None,
    }
  }

  pub fn with_category(mut self, category: QuestionCategory) -> Self {
    self.category = Some(category);
    self
  }

  pub fn with_time_limit(mut self, seconds: u32) -> Self {
    self.time_limit = Some(seconds);
    self
  }

  pub fn with_visuals(mut self, elements: Vec<VisualElement>) -> Self {
    self.visual_elements = Some(elements);
    self
  }
}
