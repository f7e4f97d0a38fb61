//! "Which sign goes in the circle?" questions. The option set is always `>`, `<`, `=`.

use std::cmp::Ordering;

use rand::Rng;

use super::NumberRange;
use crate::domain::{AnswerValue, Difficulty, Question, QuestionType};
use crate::util::format_hundredths;

pub const OPERATORS: [&str; 3] = [">", "<", "="];

/// Number range per tier. The expert tier is measured in hundredths.
pub const fn comparison_range(difficulty: Difficulty) -> (i64, i64) {
  match difficulty {
    Difficulty::Easy => (1, 20),
    Difficulty::Medium => (10, 100),
    Difficulty::Hard => (10, 200),
    Difficulty::Expert => (100, 999),
  }
}

pub fn generate_comparison<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, config: Option<&NumberRange>) -> Question {
  let (left, right, ordering) = match (difficulty, config) {
    (Difficulty::Expert, _) => decimal_pair(rng),
    (_, Some(c)) => integer_pair(rng, c.bounds(comparison_range(difficulty))),
    (Difficulty::Easy, None) | (Difficulty::Medium, None) => integer_pair(rng, comparison_range(difficulty)),
    (Difficulty::Hard, None) => expression_pair(rng),
  };

  let answer = match ordering {
    Ordering::Greater => ">",
    Ordering::Less => "<",
    Ordering::Equal => "=",
  };
  let text = format!("比较大小，○ 里应该填什么？\n{left} ○ {right}");
  let options = OPERATORS.iter().map(|op| AnswerValue::text(*op)).collect();
  Question::new(rng, QuestionType::Comparison, difficulty, text, AnswerValue::text(answer), options)
}

fn integer_pair<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (i64, i64)) -> (String, String, Ordering) {
  let a = rng.gen_range(lo..=hi);
  let mut b = rng.gen_range(lo..hi);
  if b >= a {
    b += 1;
  }
  (a.to_string(), b.to_string(), a.cmp(&b))
}

/// Two small expressions; roughly a third of the time they are equal.
fn expression_pair<R: Rng + ?Sized>(rng: &mut R) -> (String, String, Ordering) {
  let (lo, hi) = comparison_range(Difficulty::Hard);
  let x = rng.gen_range(lo..=hi);
  let y = rng.gen_range(lo..=hi);
  let left_value = x + y;

  let right_value = if rng.gen_bool(0.3) {
    left_value
  } else {
    let delta = rng.gen_range(1..=9);
    if rng.gen_bool(0.5) { left_value + delta } else { left_value - delta }
  };

  // Show the right side as a subtraction with the same value.
  let w = rng.gen_range(1..=20);
  let z = right_value + w;
  (format!("{x} + {y}"), format!("{z} - {w}"), left_value.cmp(&right_value))
}

/// Decimals in hundredths such as 3.5 vs 3.45, always different.
fn decimal_pair<R: Rng + ?Sized>(rng: &mut R) -> (String, String, Ordering) {
  let (lo, hi) = comparison_range(Difficulty::Expert);
  let a = rng.gen_range(lo..=hi);
  let delta = rng.gen_range(1..=60);
  let b = if rng.gen_bool(0.5) { a + delta } else { a - delta };
  (format_hundredths(a), format_hundredths(b), a.cmp(&b))
}
