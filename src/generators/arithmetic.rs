//! Addition, subtraction, multiplication and division.
//!
//! The answer is always computed from the generated operands. Division builds its
//! dividend as `divisor * quotient`, so the result is whole by construction.

use rand::Rng;

use super::options::numeric_options;
use super::{resolve_bounds, Composition, NumberRange};
use crate::domain::{AnswerValue, Difficulty, Question, QuestionType};

const CARRY_DRAWS: usize = 64;

/// Default operand range for addition and subtraction.
pub const fn addition_range(difficulty: Difficulty) -> (i64, i64) {
  match difficulty {
    Difficulty::Easy => (1, 10),
    Difficulty::Medium => (20, 100),
    Difficulty::Hard => (50, 250),
    Difficulty::Expert => (100, 999),
  }
}

/// Default factor ranges (left, right) for multiplication.
pub const fn multiplication_ranges(difficulty: Difficulty) -> ((i64, i64), (i64, i64)) {
  match difficulty {
    Difficulty::Easy => ((1, 5), (1, 5)),
    Difficulty::Medium => ((2, 9), (2, 9)),
    Difficulty::Hard => ((3, 12), (6, 20)),
    Difficulty::Expert => ((11, 30), (11, 50)),
  }
}

/// Default (divisor, quotient) ranges for division.
pub const fn division_ranges(difficulty: Difficulty) -> ((i64, i64), (i64, i64)) {
  match difficulty {
    Difficulty::Easy => ((2, 5), (1, 5)),
    Difficulty::Medium => ((2, 9), (2, 10)),
    Difficulty::Hard => ((3, 12), (5, 20)),
    Difficulty::Expert => ((6, 25), (10, 50)),
  }
}

pub fn generate_addition<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, config: Option<&NumberRange>) -> Question {
  let (lo, hi) = resolve_bounds(config, addition_range(difficulty));
  let mut operands = match config.and_then(|c| c.composition) {
    Some(Composition::SingleAndDouble) => single_and_double(rng, hi),
    Some(Composition::ForceCarry) => carrying_pair(rng, lo, hi),
    None => vec![rng.gen_range(lo..=hi), rng.gen_range(lo..=hi)],
  };
  // Unconfigured expert addition sometimes chains a third operand.
  if difficulty == Difficulty::Expert && config.is_none() && rng.gen_bool(0.5) {
    operands.push(rng.gen_range(lo..=hi));
  }

  let answer: i64 = operands.iter().sum();
  let text = format!("{} = ?", join(&operands, " + "));
  let options = numeric_options(rng, answer, difficulty);
  Question::new(rng, QuestionType::Addition, difficulty, text, AnswerValue::Int(answer), options)
}

pub fn generate_subtraction<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, config: Option<&NumberRange>) -> Question {
  let (lo, hi) = resolve_bounds(config, addition_range(difficulty));
  let (minuend, subtrahend) = match config.and_then(|c| c.composition) {
    Some(Composition::SingleAndDouble) => {
      let pair = single_and_double(rng, hi);
      (pair[0].max(pair[1]), pair[0].min(pair[1]))
    }
    Some(Composition::ForceCarry) => borrowing_pair(rng, lo, hi),
    None => distinct_pair(rng, lo, hi),
  };

  let answer = minuend - subtrahend;
  let text = format!("{minuend} - {subtrahend} = ?");
  let options = numeric_options(rng, answer, difficulty);
  Question::new(rng, QuestionType::Subtraction, difficulty, text, AnswerValue::Int(answer), options)
}

pub fn generate_multiplication<R: Rng + ?Sized>(
  rng: &mut R,
  difficulty: Difficulty,
  config: Option<&NumberRange>,
) -> Question {
  let (left_range, right_range) = multiplication_ranges(difficulty);
  let (a, b) = match config {
    Some(c) if c.composition == Some(Composition::SingleAndDouble) => {
      let pair = single_and_double(rng, c.max_num.unwrap_or(99));
      (pair[0], pair[1])
    }
    Some(c) => {
      let (lo, hi) = c.bounds(left_range);
      (rng.gen_range(lo..=hi), rng.gen_range(lo..=hi))
    }
    None => (
      rng.gen_range(left_range.0..=left_range.1),
      rng.gen_range(right_range.0..=right_range.1),
    ),
  };

  let answer = a * b;
  let text = format!("{a} × {b} = ?");
  let options = numeric_options(rng, answer, difficulty);
  Question::new(rng, QuestionType::Multiplication, difficulty, text, AnswerValue::Int(answer), options)
}

pub fn generate_division<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, config: Option<&NumberRange>) -> Question {
  let (divisor_range, quotient_range) = division_ranges(difficulty);
  let (divisor, quotient) = match config {
    Some(c) if c.composition == Some(Composition::SingleAndDouble) => {
      let top = c.max_num.unwrap_or(99).clamp(10, 99);
      (rng.gen_range(2..=9), rng.gen_range(10..=top))
    }
    Some(c) => {
      let (lo, hi) = c.bounds(divisor_range);
      (rng.gen_range(lo..=hi), rng.gen_range(lo..=hi))
    }
    None => (
      rng.gen_range(divisor_range.0..=divisor_range.1),
      rng.gen_range(quotient_range.0..=quotient_range.1),
    ),
  };

  let dividend = divisor * quotient;
  let text = format!("{dividend} ÷ {divisor} = ?");
  let options = numeric_options(rng, quotient, difficulty);
  Question::new(rng, QuestionType::Division, difficulty, text, AnswerValue::Int(quotient), options)
}

fn join(operands: &[i64], sep: &str) -> String {
  operands.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(sep)
}

/// One operand in 2..=9, the other in 10..=min(hi, 99), in random order.
fn single_and_double<R: Rng + ?Sized>(rng: &mut R, hi: i64) -> Vec<i64> {
  let top = hi.clamp(10, 99);
  let single = rng.gen_range(2..=9);
  let double = rng.gen_range(10..=top);
  if rng.gen_bool(0.5) {
    vec![single, double]
  } else {
    vec![double, single]
  }
}

/// Two different values in `lo..=hi`, larger first.
fn distinct_pair<R: Rng + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> (i64, i64) {
  let a = rng.gen_range(lo..=hi);
  let mut b = rng.gen_range(lo..hi);
  if b >= a {
    b += 1;
  }
  (a.max(b), a.min(b))
}

/// True when two draws from `lo..=hi` can carry into the tens: some value has a ones digit of 5 or more.
pub fn can_carry(lo: i64, hi: i64) -> bool {
  lo <= hi && (hi - lo >= 9 || (lo..=hi).any(|v| v % 10 >= 5))
}

/// True when some `m > s` in `lo..=hi` needs a borrow, i.e. the range crosses a tens boundary.
pub fn can_borrow(lo: i64, hi: i64) -> bool {
  lo < hi && lo / 10 != hi / 10
}

/// Pair whose ones digits sum to ten or more, both inside `lo..=hi`.
fn carrying_pair<R: Rng + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> Vec<i64> {
  for _ in 0..CARRY_DRAWS {
    let a = rng.gen_range(lo..=hi);
    let b = rng.gen_range(lo..=hi);
    if a % 10 + b % 10 >= 10 {
      return vec![a, b];
    }
  }
  // Doubling the highest value whose ones digit is 5..=9 always carries.
  match (lo..=hi).rev().take(10).find(|v| v % 10 >= 5) {
    Some(v) => vec![v, v],
    None => vec![rng.gen_range(lo..=hi), rng.gen_range(lo..=hi)],
  }
}

/// (minuend, subtrahend) inside `lo..=hi` where the ones column needs a borrow.
fn borrowing_pair<R: Rng + ?Sized>(rng: &mut R, lo: i64, hi: i64) -> (i64, i64) {
  for _ in 0..CARRY_DRAWS {
    let (m, s) = distinct_pair(rng, lo, hi);
    if m % 10 < s % 10 {
      return (m, s);
    }
  }
  // First multiple of ten above `lo` minus its predecessor: 0 against 9.
  let m = (lo / 10 + 1) * 10;
  if m <= hi {
    (m, m - 1)
  } else {
    distinct_pair(rng, lo, hi)
  }
}
