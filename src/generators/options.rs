//! Multiple-choice option builders.
//!
//! Numeric distractors are drawn from a window around the answer whose width
//! grows with difficulty. Every builder returns the answer exactly once, no
//! duplicates, and the options in random order.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{AnswerValue, Difficulty};

/// Answer plus three distractors.
pub const OPTION_COUNT: usize = 4;

const MAX_DRAWS: usize = 64;

/// Half-width of the distractor window around an integer answer.
pub const fn offset_window(difficulty: Difficulty) -> i64 {
  match difficulty {
    Difficulty::Easy => 5,
    Difficulty::Medium => 10,
    Difficulty::Hard => 20,
    Difficulty::Expert => 30,
  }
}

/// Largest relative perturbation for non-integer answers.
const fn decimal_spread(difficulty: Difficulty) -> f64 {
  match difficulty {
    Difficulty::Easy => 0.5,
    Difficulty::Medium => 0.4,
    Difficulty::Hard => 0.3,
    Difficulty::Expert => 0.25,
  }
}

/// Four distinct positive integers including `answer`.
pub fn numeric_options<R: Rng + ?Sized>(rng: &mut R, answer: i64, difficulty: Difficulty) -> Vec<AnswerValue> {
  numeric_options_with(rng, answer, difficulty, &[])
}

/// Like [`numeric_options`], trying `preferred` distractors first (typical slips
/// such as off-by-one or doubling).
pub fn numeric_options_with<R: Rng + ?Sized>(
  rng: &mut R,
  answer: i64,
  difficulty: Difficulty,
  preferred: &[i64],
) -> Vec<AnswerValue> {
  debug_assert!(answer > 0, "numeric answers must be positive, got {answer}");
  let window = offset_window(difficulty);
  let mut values = vec![answer];

  for &p in preferred {
    if values.len() == OPTION_COUNT {
      break;
    }
    push_distinct(&mut values, p);
  }

  let mut draws = 0;
  while values.len() < OPTION_COUNT && draws < MAX_DRAWS {
    draws += 1;
    let offset = rng.gen_range(-window..=window);
    push_distinct(&mut values, answer + offset);
  }

  // Deterministic top-up; only reachable with pathological draws.
  let mut next = answer + 1;
  while values.len() < OPTION_COUNT {
    push_distinct(&mut values, next);
    next += 1;
  }

  values.shuffle(rng);
  values.into_iter().map(AnswerValue::Int).collect()
}

fn push_distinct(values: &mut Vec<i64>, candidate: i64) {
  if candidate > 0 && !values.contains(&candidate) {
    values.push(candidate);
  }
}

/// Options for a rate/time style answer: perturb by a fraction and round to one decimal.
pub fn decimal_options<R: Rng + ?Sized>(rng: &mut R, answer: f64, difficulty: Difficulty) -> Vec<AnswerValue> {
  let answer_tenths = to_tenths(answer);
  debug_assert!(answer_tenths > 0, "decimal answers must be positive, got {answer}");
  let spread = (answer * decimal_spread(difficulty)).max(0.5);
  let mut tenths = vec![answer_tenths];

  let mut draws = 0;
  while tenths.len() < OPTION_COUNT && draws < MAX_DRAWS {
    draws += 1;
    let candidate = to_tenths(answer + rng.gen_range(-spread..=spread));
    push_distinct(&mut tenths, candidate);
  }

  let mut next = answer_tenths + 1;
  while tenths.len() < OPTION_COUNT {
    push_distinct(&mut tenths, next);
    next += 1;
  }

  tenths.shuffle(rng);
  tenths.into_iter().map(|t| AnswerValue::decimal(t as f64 / 10.0)).collect()
}

fn to_tenths(value: f64) -> i64 {
  (value * 10.0).round() as i64
}

/// Up to three distinct distractors from `pool` plus the answer, shuffled.
/// Pool entries equal to the answer are skipped.
pub fn text_options<R: Rng + ?Sized>(rng: &mut R, answer: &str, pool: &[&str]) -> Vec<AnswerValue> {
  let mut candidates: Vec<&str> = Vec::with_capacity(pool.len());
  for &p in pool {
    if p != answer && !candidates.contains(&p) {
      candidates.push(p);
    }
  }
  candidates.shuffle(rng);
  candidates.truncate(OPTION_COUNT - 1);
  candidates.push(answer);
  candidates.shuffle(rng);
  candidates.into_iter().map(AnswerValue::text).collect()
}

/// True when `options` holds `answer` exactly once and has no duplicates.
pub fn is_well_formed(answer: &AnswerValue, options: &[AnswerValue]) -> bool {
  let hits = options.iter().filter(|o| *o == answer).count();
  let distinct = options.iter().enumerate().all(|(i, a)| options[i + 1..].iter().all(|b| a != b));
  hits == 1 && distinct
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn numeric_options_are_distinct_and_positive() {
    let mut rng = StdRng::seed_from_u64(11);
    for difficulty in Difficulty::ALL {
      for answer in [1, 2, 7, 50, 998] {
        let opts = numeric_options(&mut rng, answer, difficulty);
        assert_eq!(opts.len(), OPTION_COUNT);
        assert!(is_well_formed(&AnswerValue::Int(answer), &opts));
        for o in &opts {
          assert!(o.as_f64().unwrap() > 0.0);
        }
      }
    }
  }

  #[test]
  fn distractors_stay_inside_the_window() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..200 {
      let opts = numeric_options(&mut rng, 40, Difficulty::Easy);
      for o in opts {
        let v = o.as_f64().unwrap() as i64;
        assert!((v - 40).abs() <= offset_window(Difficulty::Easy));
      }
    }
  }

  #[test]
  fn preferred_distractors_come_first() {
    let mut rng = StdRng::seed_from_u64(5);
    let opts = numeric_options_with(&mut rng, 10, Difficulty::Medium, &[11, 9, 20]);
    let mut values: Vec<i64> = opts.iter().map(|o| o.as_f64().unwrap() as i64).collect();
    values.sort_unstable();
    assert_eq!(values, vec![9, 10, 11, 20]);
  }

  #[test]
  fn decimal_options_round_to_tenths() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..100 {
      let answer = AnswerValue::decimal(2.4);
      let opts = decimal_options(&mut rng, 2.4, Difficulty::Expert);
      assert!(is_well_formed(&answer, &opts));
      for o in &opts {
        let v = o.as_f64().unwrap();
        assert!(v > 0.0);
        assert!(((v * 10.0).round() - v * 10.0).abs() < 1e-9);
      }
    }
  }

  #[test]
  fn text_options_include_answer_once() {
    let mut rng = StdRng::seed_from_u64(1);
    let opts = text_options(&mut rng, "猫", &["狗", "猫", "兔子", "狗", "老虎", "大象"]);
    assert_eq!(opts.len(), OPTION_COUNT);
    assert!(is_well_formed(&AnswerValue::text("猫"), &opts));
  }
}
