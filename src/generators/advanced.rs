//! Advanced "IQ" questions.
//!
//! Matrix reasoning, spatial rotation, analogies, mini-sudoku and probability come
//! from curated banks keyed by tier; one entry is picked uniformly per call.
//! Digit span and speed math are synthesized and compute their answer directly.

use rand::seq::SliceRandom;
use rand::Rng;

use super::options::{numeric_options, text_options, OPTION_COUNT};
use crate::domain::{AnswerValue, Difficulty, Question, QuestionCategory, QuestionType, VisualElement};

/// A hand-authored question. `answer` is always one of `options`, verbatim.
#[derive(Debug, Clone, Copy)]
pub struct BankItem {
  pub question: &'static str,
  pub answer: &'static str,
  pub options: &'static [&'static str],
}

const fn item(question: &'static str, answer: &'static str, options: &'static [&'static str]) -> BankItem {
  BankItem { question, answer, options }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bank {
  MatrixReasoning,
  SpatialRotation,
  Analogies,
  Sudoku,
  Probability,
}

impl Bank {
  pub const ALL: [Bank; 5] = [Bank::MatrixReasoning, Bank::SpatialRotation, Bank::Analogies, Bank::Sudoku, Bank::Probability];

  const fn question_type(self) -> QuestionType {
    match self {
      Bank::MatrixReasoning | Bank::SpatialRotation | Bank::Sudoku => QuestionType::Pattern,
      Bank::Analogies | Bank::Probability => QuestionType::Logic,
    }
  }

  const fn category(self) -> QuestionCategory {
    match self {
      Bank::MatrixReasoning => QuestionCategory::MatrixReasoning,
      Bank::SpatialRotation => QuestionCategory::SpatialRotation,
      Bank::Analogies => QuestionCategory::Analogies,
      Bank::Sudoku => QuestionCategory::Sudoku,
      Bank::Probability => QuestionCategory::Probability,
    }
  }

  pub fn items(self, difficulty: Difficulty) -> &'static [BankItem] {
    match (self, difficulty) {
      (Bank::MatrixReasoning, Difficulty::Easy) => MATRIX_EASY,
      (Bank::MatrixReasoning, Difficulty::Medium) => MATRIX_MEDIUM,
      (Bank::MatrixReasoning, Difficulty::Hard) => MATRIX_HARD,
      (Bank::MatrixReasoning, Difficulty::Expert) => MATRIX_EXPERT,
      (Bank::SpatialRotation, Difficulty::Easy) => SPATIAL_EASY,
      (Bank::SpatialRotation, Difficulty::Medium) => SPATIAL_MEDIUM,
      (Bank::SpatialRotation, Difficulty::Hard) => SPATIAL_HARD,
      (Bank::SpatialRotation, Difficulty::Expert) => SPATIAL_EXPERT,
      (Bank::Analogies, Difficulty::Easy) => ANALOGY_EASY,
      (Bank::Analogies, Difficulty::Medium) => ANALOGY_MEDIUM,
      (Bank::Analogies, Difficulty::Hard) => ANALOGY_HARD,
      (Bank::Analogies, Difficulty::Expert) => ANALOGY_EXPERT,
      (Bank::Sudoku, Difficulty::Easy) => SUDOKU_EASY,
      (Bank::Sudoku, Difficulty::Medium) => SUDOKU_MEDIUM,
      (Bank::Sudoku, Difficulty::Hard) => SUDOKU_HARD,
      (Bank::Sudoku, Difficulty::Expert) => SUDOKU_EXPERT,
      (Bank::Probability, Difficulty::Easy) => PROBABILITY_EASY,
      (Bank::Probability, Difficulty::Medium) => PROBABILITY_MEDIUM,
      (Bank::Probability, Difficulty::Hard) => PROBABILITY_HARD,
      (Bank::Probability, Difficulty::Expert) => PROBABILITY_EXPERT,
    }
  }
}

const MATRIX_EASY: &[BankItem] = &[
  item("观察表格，找出规律：\n1 2 3\n4 5 6\n7 8 ?", "9", &["9", "10", "8", "6"]),
  item("观察表格，找出规律：\n🔴 🔵 🟢\n🔴 🔵 🟢\n🔴 🔵 ?", "🟢", &["🟢", "🔴", "🔵", "🟡"]),
];

const MATRIX_MEDIUM: &[BankItem] = &[
  item("观察表格，找出规律：\n2 4 6\n3 6 9\n4 8 ?", "12", &["12", "10", "16", "11"]),
  item("观察表格，找出规律：\n5 10 15\n10 20 30\n15 30 ?", "45", &["45", "40", "35", "60"]),
];

const MATRIX_HARD: &[BankItem] = &[
  item("观察表格，找出规律：\n2 3 5\n4 6 10\n7 5 ?", "12", &["12", "35", "13", "2"]),
  item("观察表格，找出规律：\n2 3 6\n4 5 20\n3 7 ?", "21", &["21", "10", "24", "18"]),
];

const MATRIX_EXPERT: &[BankItem] = &[
  item("观察表格，找出规律：\n2 3 5\n4 5 19\n6 2 ?", "11", &["11", "12", "8", "13"]),
  item("观察表格，找出规律：\n1 4 9\n16 25 36\n49 64 ?", "81", &["81", "72", "100", "79"]),
];

const SPATIAL_EASY: &[BankItem] = &[
  item("字母“b”照镜子（左右翻转）后，变成哪个字母？", "d", &["d", "p", "q", "b"]),
  item("箭头“→”顺时针旋转90度后，指向哪里？", "↓", &["↓", "↑", "←", "→"]),
];

const SPATIAL_MEDIUM: &[BankItem] = &[
  item("箭头“↑”逆时针旋转90度后，指向哪里？", "←", &["←", "→", "↓", "↑"]),
  item("字母“b”上下翻转后，变成哪个字母？", "p", &["p", "d", "q", "b"]),
];

const SPATIAL_HARD: &[BankItem] = &[
  item("箭头“↗”旋转180度后，指向哪里？", "↙", &["↙", "↘", "↖", "↗"]),
  item("字母“b”旋转180度后，变成哪个字母？", "q", &["q", "d", "p", "b"]),
];

const SPATIAL_EXPERT: &[BankItem] = &[
  item("箭头“↗”先逆时针旋转90度，再上下翻转，最后指向哪里？", "↙", &["↙", "↖", "↘", "↗"]),
  item("字母“p”先左右翻转，再旋转180度，变成哪个字母？", "b", &["b", "d", "p", "q"]),
];

const ANALOGY_EASY: &[BankItem] = &[
  item("狗 → 汪汪，猫 → ？", "喵喵", &["喵喵", "嘎嘎", "哞哞", "咩咩"]),
  item("白天 → 太阳，夜晚 → ？", "月亮", &["月亮", "白云", "彩虹", "雨伞"]),
];

const ANALOGY_MEDIUM: &[BankItem] = &[
  item("鱼 → 水，鸟 → ？", "天空", &["天空", "树叶", "沙漠", "石头"]),
  item("2 → 4，3 → 6，5 → ？", "10", &["10", "7", "8", "25"]),
];

const ANALOGY_HARD: &[BankItem] = &[
  item("医生 → 医院，老师 → ？", "学校", &["学校", "商店", "工厂", "农场"]),
  item("3 → 9，4 → 16，6 → ？", "36", &["36", "12", "18", "30"]),
];

const ANALOGY_EXPERT: &[BankItem] = &[
  item("书 → 作家，画 → ？", "画家", &["画家", "演员", "厨师", "歌手"]),
  item("2 → 5，3 → 10，4 → 17，5 → ？", "26", &["26", "25", "22", "24"]),
];

const SUDOKU_EASY: &[BankItem] = &[
  item("迷你数独：每行、每列里 1~3 各出现一次。\n1 2 3\n2 3 1\n3 1 ?\n? 处应该填几？", "2", &["1", "2", "3"]),
  item(
    "迷你数独：每行、每列、每个 2×2 宫里 1~4 各出现一次。\n1 2 3 ?\n3 4 1 2\n2 1 4 3\n4 3 2 1\n? 处应该填几？",
    "4",
    &["1", "2", "3", "4"],
  ),
];

const SUDOKU_MEDIUM: &[BankItem] = &[
  item(
    "迷你数独：每行、每列、每个 2×2 宫里 1~4 各出现一次。\n1 2 3 4\n3 4 1 2\n2 1 4 3\n4 _ 2 ?\n? 处应该填几？",
    "1",
    &["1", "2", "3", "4"],
  ),
  item(
    "迷你数独：每行、每列、每个 2×2 宫里 1~4 各出现一次。\n1 2 _ 4\n? 4 1 2\n2 1 4 3\n4 _ 2 1\n? 处应该填几？",
    "3",
    &["1", "2", "3", "4"],
  ),
];

const SUDOKU_HARD: &[BankItem] = &[
  item(
    "迷你数独：每行、每列、每个 2×2 宫里 1~4 各出现一次。\n1 _ 3 4\n_ 4 1 2\n2 _ 4 ?\n4 3 _ 1\n? 处应该填几？",
    "3",
    &["1", "2", "3", "4"],
  ),
  item(
    "迷你数独：每行、每列、每个 2×2 宫里 1~4 各出现一次。\n_ 2 3 _\n3 _ 1 2\n2 1 _ 3\n? 3 2 _\n? 处应该填几？",
    "4",
    &["1", "2", "3", "4"],
  ),
];

// One blank per question; a grid with several asked cells becomes several entries.
const SUDOKU_EXPERT: &[BankItem] = &[
  item(
    "迷你数独：每行、每列、每个 2×2 宫里 1~4 各出现一次。\n_ _ 3 ?\n3 _ _ 2\n_ 1 _ _\n4 _ _ 1\n? 处应该填几？",
    "4",
    &["1", "2", "3", "4"],
  ),
  item(
    "迷你数独：每行、每列、每个 2×2 宫里 1~4 各出现一次。\n_ 2 _ _\n_ _ 1 _\n2 _ _ 3\n4 3 ? _\n? 处应该填几？",
    "2",
    &["1", "2", "3", "4"],
  ),
];

const PROBABILITY_EASY: &[BankItem] = &[
  item("抛一枚硬币，正面朝上的可能性是多少？", "1/2", &["1/2", "1/3", "1/4", "1"]),
  item("袋子里只有3个红球，从中摸出一个球，它是红球吗？", "一定是", &["一定是", "可能是", "不可能是"]),
];

const PROBABILITY_MEDIUM: &[BankItem] = &[
  item("掷一个骰子，掷出6的可能性是多少？", "1/6", &["1/6", "1/3", "1/2", "5/6"]),
  item("袋子里有2个红球和3个蓝球，摸出一个球，是红球的可能性是多少？", "2/5", &["2/5", "3/5", "1/2", "2/3"]),
];

const PROBABILITY_HARD: &[BankItem] = &[
  item("掷一个骰子，掷出偶数的可能性是多少？", "1/2", &["1/2", "1/3", "1/6", "2/3"]),
  item(
    "袋子里有4个红球、3个蓝球和1个绿球，摸出一个球，不是红球的可能性是多少？",
    "1/2",
    &["1/2", "3/8", "1/8", "5/8"],
  ),
];

const PROBABILITY_EXPERT: &[BankItem] = &[
  item("连续抛两次硬币，两次都是正面朝上的可能性是多少？", "1/4", &["1/4", "1/2", "1/3", "3/4"]),
  item("同时掷两个骰子，点数之和是7的可能性是多少？", "1/6", &["1/6", "1/12", "7/36", "1/4"]),
];

/// Seconds allowed for curated questions.
pub const fn bank_time_limit(difficulty: Difficulty) -> u32 {
  match difficulty {
    Difficulty::Easy => 30,
    Difficulty::Medium => 25,
    Difficulty::Hard => 20,
    Difficulty::Expert => 15,
  }
}

/// Uniform pick from the curated bank for `difficulty`.
pub fn from_bank<R: Rng + ?Sized>(rng: &mut R, bank: Bank, difficulty: Difficulty) -> Question {
  let items = bank.items(difficulty);
  let chosen = items.choose(rng).copied().unwrap_or(items[0]);
  let options = text_options(rng, chosen.answer, chosen.options);
  Question::new(
    rng,
    bank.question_type(),
    difficulty,
    chosen.question.to_string(),
    AnswerValue::text(chosen.answer),
    options,
  )
  .with_category(bank.category())
  .with_time_limit(bank_time_limit(difficulty))
}

pub fn matrix_reasoning<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  from_bank(rng, Bank::MatrixReasoning, difficulty)
}

pub fn spatial_rotation<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  from_bank(rng, Bank::SpatialRotation, difficulty)
}

pub fn analogies<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  from_bank(rng, Bank::Analogies, difficulty)
}

pub fn sudoku<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  from_bank(rng, Bank::Sudoku, difficulty)
}

pub fn probability<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  from_bank(rng, Bank::Probability, difficulty)
}

/// Digits to memorize: 3 at EASY up to 6 at EXPERT.
pub const fn span_length(difficulty: Difficulty) -> usize {
  match difficulty {
    Difficulty::Easy => 3,
    Difficulty::Medium => 4,
    Difficulty::Hard => 5,
    Difficulty::Expert => 6,
  }
}

const fn span_time_limit(difficulty: Difficulty) -> u32 {
  match difficulty {
    Difficulty::Easy => 20,
    Difficulty::Medium => 20,
    Difficulty::Hard => 25,
    Difficulty::Expert => 30,
  }
}

/// Memorize N digits, answer them reversed. Distractors swap two digits of the answer.
pub fn working_memory<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  let n = span_length(difficulty);
  // Distinct digits, so every transposition is a different sequence.
  let pool: Vec<u8> = (1..=9).collect();
  let digits: Vec<u8> = pool.choose_multiple(rng, n).copied().collect();
  let reversed: Vec<u8> = digits.iter().rev().copied().collect();

  let mut pairs: Vec<(usize, usize)> = (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))).collect();
  pairs.shuffle(rng);
  let distractors: Vec<String> = pairs
    .iter()
    .take(OPTION_COUNT - 1)
    .map(|&(i, j)| {
      let mut swapped = reversed.clone();
      swapped.swap(i, j);
      spell(&swapped)
    })
    .collect();

  let answer = spell(&reversed);
  let pool: Vec<&str> = distractors.iter().map(String::as_str).collect();
  let options = text_options(rng, &answer, &pool);
  let text = format!("记住这串数字，再把它倒过来说出来：\n{}", spell(&digits));

  Question::new(rng, QuestionType::Logic, difficulty, text, AnswerValue::text(answer), options)
    .with_category(QuestionCategory::WorkingMemory)
    .with_time_limit(span_time_limit(difficulty))
}

fn spell(digits: &[u8]) -> String {
  digits.iter().map(|d| d.to_string()).collect::<Vec<_>>().join(" ")
}

/// Seconds allowed for speed math; shrinks as the chain grows.
pub const fn speed_time_limit(difficulty: Difficulty) -> u32 {
  match difficulty {
    Difficulty::Easy => 10,
    Difficulty::Medium => 8,
    Difficulty::Hard => 6,
    Difficulty::Expert => 5,
  }
}

const fn speed_profile(difficulty: Difficulty) -> (usize, i64, i64) {
  // (operand count, min, max)
  match difficulty {
    Difficulty::Easy => (2, 1, 10),
    Difficulty::Medium => (3, 1, 20),
    Difficulty::Hard => (4, 5, 30),
    Difficulty::Expert => (5, 10, 50),
  }
}

const BLOCK_COLORS: &[&str] = &["red", "blue", "green", "yellow", "purple"];

/// Chained `+`/`-` with a running total that never drops to zero or below.
pub fn speed_math<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  let (count, lo, hi) = speed_profile(difficulty);
  let first = rng.gen_range(lo..=hi);
  let mut total = first;
  let mut text = first.to_string();
  let mut terms = vec![first.to_string()];

  for _ in 1..count {
    let n = rng.gen_range(lo..=hi);
    if rng.gen_bool(0.5) && total - n > 0 {
      total -= n;
      text.push_str(&format!(" - {n}"));
      terms.push(format!("-{n}"));
    } else {
      total += n;
      text.push_str(&format!(" + {n}"));
      terms.push(format!("+{n}"));
    }
  }

  let visuals = terms
    .into_iter()
    .enumerate()
    .map(|(i, label)| VisualElement {
      x: i as f32 * 64.0,
      y: 0.0,
      color: BLOCK_COLORS[i % BLOCK_COLORS.len()].to_string(),
      label: Some(label),
    })
    .collect();

  let options = numeric_options(rng, total, difficulty);
  Question::new(rng, QuestionType::Logic, difficulty, format!("快速心算：{text} = ?"), AnswerValue::Int(total), options)
    .with_category(QuestionCategory::SpeedMath)
    .with_time_limit(speed_time_limit(difficulty))
    .with_visuals(visuals)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generators::options::is_well_formed;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn every_bank_tier_is_populated_and_consistent() {
    for bank in Bank::ALL {
      for difficulty in Difficulty::ALL {
        let items = bank.items(difficulty);
        assert!(!items.is_empty(), "{bank:?} {difficulty}");
        for it in items {
          assert_eq!(it.options.iter().filter(|o| **o == it.answer).count(), 1, "{}", it.question);
          let mut sorted = it.options.to_vec();
          sorted.sort_unstable();
          sorted.dedup();
          assert_eq!(sorted.len(), it.options.len(), "{}", it.question);
          assert!((2..=4).contains(&it.options.len()));
        }
      }
    }
  }

  #[test]
  fn bank_questions_are_timed_and_tagged() {
    let mut rng = StdRng::seed_from_u64(59);
    for bank in Bank::ALL {
      for difficulty in Difficulty::ALL {
        let q = from_bank(&mut rng, bank, difficulty);
        assert_eq!(q.time_limit, Some(bank_time_limit(difficulty)));
        assert_eq!(q.category, Some(bank.category()));
        assert!(is_well_formed(&q.answer, &q.options));
      }
    }
  }

  #[test]
  fn digit_span_reverses_and_transposes() {
    let mut rng = StdRng::seed_from_u64(61);
    for difficulty in Difficulty::ALL {
      for _ in 0..100 {
        let q = working_memory(&mut rng, difficulty);
        let shown: Vec<&str> = q.question.lines().last().unwrap().split(' ').collect();
        assert_eq!(shown.len(), span_length(difficulty));
        let expected: Vec<&str> = shown.iter().rev().copied().collect();
        assert_eq!(q.answer, AnswerValue::text(expected.join(" ")));
        assert!(is_well_formed(&q.answer, &q.options));
        assert_eq!(q.options.len(), 4);

        let answer = q.answer.to_string();
        for o in q.options.iter().filter(|o| **o != q.answer) {
          let o = o.to_string();
          let diffs = o.split(' ').zip(answer.split(' ')).filter(|(a, b)| a != b).count();
          assert_eq!(diffs, 2);
        }
      }
    }
  }

  #[test]
  fn speed_math_stays_positive_and_tight() {
    let mut rng = StdRng::seed_from_u64(67);
    for difficulty in Difficulty::ALL {
      for _ in 0..200 {
        let q = speed_math(&mut rng, difficulty);
        let expr = q.question.trim_start_matches("快速心算：").trim_end_matches(" = ?");
        let mut tokens = expr.split(' ');
        let mut total: i64 = tokens.next().unwrap().parse().unwrap();
        while let (Some(op), Some(n)) = (tokens.next(), tokens.next()) {
          let n: i64 = n.parse().unwrap();
          total = if op == "+" { total + n } else { total - n };
          assert!(total > 0);
        }
        assert_eq!(q.answer, AnswerValue::Int(total));
        assert!(is_well_formed(&q.answer, &q.options));
        let limit = q.time_limit.unwrap();
        assert!((5..=10).contains(&limit));
      }
    }
    assert!(speed_time_limit(Difficulty::Expert) < speed_time_limit(Difficulty::Easy));
  }
}
