//! Number sequences and symbol patterns.
//!
//! Number sequences hide one interior element; symbol patterns hide the next
//! element after two or more full repetitions of the unit.

use rand::seq::SliceRandom;
use rand::Rng;

use super::options::{numeric_options_with, text_options};
use crate::domain::{AnswerValue, Difficulty, Question, QuestionType, VisualElement};

/// Symbol palette with the block colour used for each entry.
const SHAPES: &[(&str, &str)] = &[
  ("🔴", "red"),
  ("🔵", "blue"),
  ("🟢", "green"),
  ("🟡", "yellow"),
  ("🟣", "purple"),
  ("🔺", "orange"),
  ("⭐", "gold"),
  ("🔷", "cyan"),
];

/// Numeric sequence question (type `sequence`).
pub fn generate_sequence<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  number_question(rng, difficulty, QuestionType::Sequence)
}

/// Pattern question (type `pattern`): a number sequence or a symbol pattern.
pub fn generate_pattern<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  if rng.gen_bool(0.5) {
    number_question(rng, difficulty, QuestionType::Pattern)
  } else {
    shape_question(rng, difficulty)
  }
}

fn number_question<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, kind: QuestionType) -> Question {
  let seq = number_sequence(rng, difficulty);
  let hidden = rng.gen_range(1..seq.len() - 1);
  let answer = seq[hidden];

  let shown: Vec<String> = seq
    .iter()
    .enumerate()
    .map(|(i, n)| if i == hidden { "?".to_string() } else { n.to_string() })
    .collect();
  let text = format!("找规律，? 处应该填几？\n{}", shown.join(", "));

  // Two of the classic slips, the rest from the offset window.
  let mut slips = vec![answer + 1, answer - 1, answer * 2];
  slips.shuffle(rng);
  slips.truncate(2);
  let options = numeric_options_with(rng, answer, difficulty, &slips);
  Question::new(rng, kind, difficulty, text, AnswerValue::Int(answer), options)
}

/// A strictly positive sequence whose family depends on the tier.
pub fn number_sequence<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Vec<i64> {
  match difficulty {
    Difficulty::Easy => {
      let start = rng.gen_range(1..=10);
      let step = rng.gen_range(1..=5);
      arithmetic(start, step, 5)
    }
    Difficulty::Medium => {
      if rng.gen_bool(0.5) {
        let start = rng.gen_range(1..=20);
        let step = rng.gen_range(5..=15);
        arithmetic(start, step, 5)
      } else {
        let start = rng.gen_range(1..=5);
        (0..5).map(|i| start << i).collect()
      }
    }
    Difficulty::Hard => {
      if rng.gen_bool(0.5) {
        let a = rng.gen_range(1..=5);
        let b = rng.gen_range(a..=a + 5);
        let mut seq = vec![a, b];
        while seq.len() < 6 {
          let n = seq.len();
          seq.push(seq[n - 1] + seq[n - 2]);
        }
        seq
      } else {
        let k = rng.gen_range(1..=6);
        (k..k + 5).map(|n| n * n).collect()
      }
    }
    Difficulty::Expert => match rng.gen_range(0..3) {
      0 => {
        // Triangular growth: +1, +2, +3, ...
        let mut seq = vec![rng.gen_range(1..=10)];
        for step in 1..6 {
          let last = seq[seq.len() - 1];
          seq.push(last + step);
        }
        seq
      }
      1 => {
        // Alternating deltas with a positive net step.
        let up = rng.gen_range(3..=8);
        let down = rng.gen_range(1..up);
        let mut seq = vec![rng.gen_range(10..=30)];
        for i in 0..6 {
          let last = seq[seq.len() - 1];
          seq.push(if i % 2 == 0 { last + up } else { last - down });
        }
        seq
      }
      _ => {
        // Multiply, then add a constant.
        let factor = rng.gen_range(2..=3);
        let add = rng.gen_range(1..=3);
        let mut seq = vec![rng.gen_range(1..=3)];
        while seq.len() < 5 {
          let last = seq[seq.len() - 1];
          seq.push(last * factor + add);
        }
        seq
      }
    },
  }
}

fn arithmetic(start: i64, step: i64, len: i64) -> Vec<i64> {
  (0..len).map(|i| start + i * step).collect()
}

fn shape_question<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  let palette: Vec<usize> = (0..SHAPES.len()).collect();
  let picked: Vec<usize> = palette.choose_multiple(rng, 3).copied().collect();
  let (a, b, c) = (picked[0], picked[1], picked[2]);

  let unit: Vec<usize> = match difficulty {
    Difficulty::Easy => vec![a, b],
    Difficulty::Medium => vec![a, b, c],
    Difficulty::Hard => {
      if rng.gen_bool(0.5) {
        vec![a, a, b]
      } else {
        vec![a, b, b]
      }
    }
    Difficulty::Expert => {
      if rng.gen_bool(0.5) {
        vec![a, b, c, b]
      } else {
        vec![a, b, a, c]
      }
    }
  };

  let partial = rng.gen_range(0..unit.len());
  let shown_len = unit.len() * 2 + partial;
  let shown: Vec<usize> = (0..shown_len).map(|i| unit[i % unit.len()]).collect();
  let answer = SHAPES[unit[partial]].0;

  let text = format!(
    "找规律，下一个应该是什么？\n{} ?",
    shown.iter().map(|&i| SHAPES[i].0).collect::<Vec<_>>().join(" ")
  );

  let mut pool: Vec<&str> = unit.iter().map(|&i| SHAPES[i].0).collect();
  pool.extend(SHAPES.iter().map(|(s, _)| *s));
  // Symbols from the unit are the most tempting, so keep them ahead of the palette.
  let mut distractors: Vec<&str> = Vec::new();
  for s in pool {
    if s != answer && !distractors.contains(&s) {
      distractors.push(s);
    }
  }
  distractors.truncate(3);
  let options = text_options(rng, answer, &distractors);

  let visuals = shown
    .iter()
    .enumerate()
    .map(|(i, &s)| VisualElement { x: i as f32 * 48.0, y: 0.0, color: SHAPES[s].1.to_string(), label: None })
    .collect();

  Question::new(rng, QuestionType::Pattern, difficulty, text, AnswerValue::text(answer), options).with_visuals(visuals)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generators::options::is_well_formed;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn sequences_are_positive_for_every_tier() {
    let mut rng = StdRng::seed_from_u64(17);
    for difficulty in Difficulty::ALL {
      for _ in 0..300 {
        let seq = number_sequence(&mut rng, difficulty);
        assert!(seq.len() >= 5);
        assert!(seq.iter().all(|&n| n > 0), "{seq:?}");
      }
    }
  }

  #[test]
  fn hidden_element_is_interior_and_matches_answer() {
    let mut rng = StdRng::seed_from_u64(23);
    for difficulty in Difficulty::ALL {
      for _ in 0..200 {
        let q = generate_sequence(&mut rng, difficulty);
        let line = q.question.lines().last().unwrap();
        let parts: Vec<&str> = line.split(", ").collect();
        let hidden = parts.iter().position(|p| *p == "?").unwrap();
        assert!(hidden > 0 && hidden < parts.len() - 1);
        assert!(is_well_formed(&q.answer, &q.options));
        assert!(q.options.iter().all(|o| o.as_f64().unwrap() > 0.0));
      }
    }
  }

  #[test]
  fn shape_patterns_repeat_the_unit() {
    let mut rng = StdRng::seed_from_u64(29);
    for difficulty in Difficulty::ALL {
      for _ in 0..100 {
        let q = shape_question(&mut rng, difficulty);
        assert_eq!(q.kind, QuestionType::Pattern);
        assert!(is_well_formed(&q.answer, &q.options));
        assert_eq!(q.options.len(), 4);
        let shown = q.question.lines().last().unwrap().split(' ').count() - 1;
        assert_eq!(q.visual_elements.as_ref().map(Vec::len), Some(shown));
      }
    }
  }
}
