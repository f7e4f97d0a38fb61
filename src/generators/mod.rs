//! Primitive question generators.
//!
//! Every generator is a plain function `(rng, difficulty, config?) -> Question`.
//! All branches are exhaustive over the four difficulty tiers; no generator can fail.

use serde::{Deserialize, Serialize};

pub mod advanced;
pub mod arithmetic;
pub mod comparison;
pub mod logic;
pub mod options;
pub mod pattern;
pub mod word_problem;

/// Operand composition forced by a stage entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Composition {
  /// One single-digit operand and one double-digit operand.
  SingleAndDouble,
  /// Addition must carry into the tens; subtraction must borrow from them.
  ForceCarry,
}

/// Largest operand a stage may configure. Products of two such operands stay far inside `i64`.
pub const MAX_OPERAND: i64 = 9_999;

/// Optional numeric-range override attached to a stage entry.
///
/// Bounds come as a pair: either both `min_num` and `max_num` are set, or
/// neither is and the generator's per-tier defaults apply.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberRange {
  #[serde(default)]
  pub min_num: Option<i64>,
  #[serde(default)]
  pub max_num: Option<i64>,
  #[serde(default)]
  pub composition: Option<Composition>,
}

impl NumberRange {
  pub const fn between(min_num: i64, max_num: i64) -> Self {
    Self { min_num: Some(min_num), max_num: Some(max_num), composition: None }
  }

  /// Both bounds when configured as a pair.
  pub fn explicit_bounds(&self) -> Option<(i64, i64)> {
    self.min_num.zip(self.max_num)
  }

  /// True when only one of the two bounds is set.
  pub fn is_one_sided(&self) -> bool {
    self.min_num.is_some() != self.max_num.is_some()
  }

  /// Resolve against the generator's default bounds.
  pub fn bounds(&self, default: (i64, i64)) -> (i64, i64) {
    (self.min_num.unwrap_or(default.0), self.max_num.unwrap_or(default.1))
  }
}

/// Bounds from an optional config, falling back to `default`.
pub(crate) fn resolve_bounds(config: Option<&NumberRange>, default: (i64, i64)) -> (i64, i64) {
  config.map(|c| c.bounds(default)).unwrap_or(default)
}

