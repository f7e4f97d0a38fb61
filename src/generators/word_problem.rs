//! Template-based word problems.
//!
//! Each template declares an operation with a fixed closed-form formula. Operands
//! come from a tier-scaled range, are substituted into `{a}`, `{b}`, `{c}` and the
//! answer is computed from them. Rate and time answers keep one decimal place.

use rand::seq::SliceRandom;
use rand::Rng;

use super::options::{decimal_options, numeric_options};
use super::{resolve_bounds, NumberRange};
use crate::domain::{AnswerValue, Difficulty, Question, QuestionCategory, QuestionType};
use crate::util::fill_template;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
  Addition,
  Subtraction,
  Multiplication,
  Division,
  /// `a - b + c`
  Mixed,
  /// `(a + b) * c`
  Complex,
  /// `a * b / 100`
  Percentage,
  /// `distance / (speed1 + speed2)`
  Meeting,
  /// `a * b / (a + b)` days working together
  Work,
}

#[derive(Clone, Copy, Debug)]
pub struct Template {
  pub text: &'static str,
  pub op: Operation,
}

const fn tpl(text: &'static str, op: Operation) -> Template {
  Template { text, op }
}

const EASY_TEMPLATES: &[Template] = &[
  tpl("小勇士有{a}枚金币，打败史莱姆后又得到{b}枚。现在一共有多少枚金币？", Operation::Addition),
  tpl("森林里有{a}只哥布林，又跑来了{b}只。现在一共有多少只哥布林？", Operation::Addition),
  tpl("背包里有{a}瓶药水，战斗中喝掉了{b}瓶。还剩多少瓶？", Operation::Subtraction),
  tpl("商店里有{a}把木剑，卖出了{b}把。还剩多少把？", Operation::Subtraction),
];

const MEDIUM_TEMPLATES: &[Template] = &[
  tpl("每个宝箱里有{a}颗宝石，勇士打开了{b}个宝箱。一共得到多少颗宝石？", Operation::Multiplication),
  tpl("勇士把{a}枚金币平均分给{b}位队友。每位队友分到多少枚？", Operation::Division),
  tpl("勇士有{a}枚金币，买盾牌花了{b}枚，打怪又得到{c}枚。现在有多少枚金币？", Operation::Mixed),
  tpl("地牢第一层有{a}个陷阱，第二层有{b}个。两层一共有多少个陷阱？", Operation::Addition),
];

const HARD_TEMPLATES: &[Template] = &[
  tpl("一支小队有{a}名战士和{b}名法师，每人需要{c}瓶药水。一共需要多少瓶药水？", Operation::Complex),
  tpl("一把宝剑原价{a}枚金币，打折后便宜了{b}%。便宜了多少枚金币？", Operation::Percentage),
  tpl("城堡里有{a}名士兵，平均分成{b}队。每队有多少名士兵？", Operation::Division),
  tpl("巨龙的宝库里有{a}枚金币，被小偷偷走了{b}枚，巨龙又抢来了{c}枚。宝库里现在有多少枚金币？", Operation::Mixed),
];

const EXPERT_TEMPLATES: &[Template] = &[
  tpl(
    "两位勇士相距{a}千米，同时出发相向而行。一位每小时走{b}千米，另一位每小时走{c}千米。几小时后相遇？（保留一位小数）",
    Operation::Meeting,
  ),
  tpl(
    "铁匠单独打造一批武器需要{a}天，学徒单独打造需要{b}天。两人合作需要多少天完成？（保留一位小数）",
    Operation::Work,
  ),
  tpl("魔法学院有{a}名学生，其中{b}%的学生会火球术。会火球术的有多少名学生？", Operation::Percentage),
  tpl("每个营地有{a}名骑士和{b}名弓箭手，一共有{c}个营地。一共有多少名士兵？", Operation::Complex),
];

pub fn templates(difficulty: Difficulty) -> &'static [Template] {
  match difficulty {
    Difficulty::Easy => EASY_TEMPLATES,
    Difficulty::Medium => MEDIUM_TEMPLATES,
    Difficulty::Hard => HARD_TEMPLATES,
    Difficulty::Expert => EXPERT_TEMPLATES,
  }
}

/// Default operand range per tier.
pub const fn operand_range(difficulty: Difficulty) -> (i64, i64) {
  match difficulty {
    Difficulty::Easy => (1, 20),
    Difficulty::Medium => (2, 30),
    Difficulty::Hard => (5, 60),
    Difficulty::Expert => (10, 120),
  }
}

const PERCENTAGES: &[i64] = &[10, 20, 25, 50];

pub fn generate_word_problem<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, config: Option<&NumberRange>) -> Question {
  let bank = templates(difficulty);
  let template = bank.choose(rng).copied().unwrap_or(bank[0]);
  let bounds = resolve_bounds(config, operand_range(difficulty));
  let (values, answer) = instantiate(rng, template.op, bounds);

  let pairs: Vec<(&str, String)> = ["a", "b", "c"].iter().copied().zip(values.iter().map(|v| v.to_string())).collect();
  let text = fill_template(template.text, &pairs);

  let answer_value = AnswerValue::decimal(answer);
  let options = match answer_value {
    AnswerValue::Int(n) => numeric_options(rng, n, difficulty),
    _ => decimal_options(rng, answer, difficulty),
  };

  Question::new(rng, QuestionType::WordProblem, difficulty, text, answer_value, options)
    .with_category(QuestionCategory::Application)
}

/// Draw operands for `op` inside `(lo, hi)` and compute the closed-form answer.
/// Returns the placeholder values in `{a}, {b}, {c}` order.
pub fn instantiate<R: Rng + ?Sized>(rng: &mut R, op: Operation, (lo, hi): (i64, i64)) -> (Vec<i64>, f64) {
  let lo = lo.max(1);
  let hi = hi.max(lo + 1);
  // Factor cap for products and quotients.
  let cap = (hi / 3).clamp(3, 12);

  match op {
    Operation::Addition => {
      let (a, b) = (rng.gen_range(lo..=hi), rng.gen_range(lo..=hi));
      (vec![a, b], (a + b) as f64)
    }
    Operation::Subtraction => {
      let b = rng.gen_range(lo..hi);
      let a = rng.gen_range((b + 1)..=hi);
      (vec![a, b], (a - b) as f64)
    }
    Operation::Multiplication => {
      let (a, b) = (rng.gen_range(2..=cap), rng.gen_range(2..=cap));
      (vec![a, b], (a * b) as f64)
    }
    Operation::Division => {
      let divisor = rng.gen_range(2..=cap);
      let quotient = rng.gen_range(1..=cap);
      (vec![divisor * quotient, divisor], quotient as f64)
    }
    Operation::Mixed => {
      let b = rng.gen_range(lo..=hi);
      let a = b + rng.gen_range(lo..=hi);
      let c = rng.gen_range(lo..=hi);
      (vec![a, b, c], (a - b + c) as f64)
    }
    Operation::Complex => {
      let half = (hi / 2).max(lo);
      let (a, b) = (rng.gen_range(lo..=half), rng.gen_range(lo..=half));
      let c = rng.gen_range(2..=cap);
      (vec![a, b, c], ((a + b) * c) as f64)
    }
    Operation::Percentage => {
      // Multiples of 20 keep every listed percentage whole.
      let a = 20 * rng.gen_range(1..=(hi / 5).max(1));
      let b = PERCENTAGES.choose(rng).copied().unwrap_or(50);
      (vec![a, b], (a * b / 100) as f64)
    }
    Operation::Meeting => {
      let top = (hi / 4).max(lo + 2);
      let (s1, s2) = (rng.gen_range(lo..=top), rng.gen_range(lo..=top));
      let distance = rng.gen_range((s1 + s2)..=(s1 + s2) * 6);
      (vec![distance, s1, s2], distance as f64 / (s1 + s2) as f64)
    }
    Operation::Work => {
      let (a, b) = (rng.gen_range(2..=cap), rng.gen_range(2..=cap));
      (vec![a, b], (a * b) as f64 / (a + b) as f64)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generators::options::is_well_formed;
  use rand::{rngs::StdRng, SeedableRng};

  const ALL_OPS: [Operation; 9] = [
    Operation::Addition,
    Operation::Subtraction,
    Operation::Multiplication,
    Operation::Division,
    Operation::Mixed,
    Operation::Complex,
    Operation::Percentage,
    Operation::Meeting,
    Operation::Work,
  ];

  #[test]
  fn formulas_match_their_operands() {
    let mut rng = StdRng::seed_from_u64(71);
    for difficulty in Difficulty::ALL {
      for op in ALL_OPS {
        for _ in 0..100 {
          let (v, answer) = instantiate(&mut rng, op, operand_range(difficulty));
          let expected = match op {
            Operation::Addition => (v[0] + v[1]) as f64,
            Operation::Subtraction => (v[0] - v[1]) as f64,
            Operation::Multiplication => (v[0] * v[1]) as f64,
            Operation::Division => {
              assert_eq!(v[0] % v[1], 0);
              (v[0] / v[1]) as f64
            }
            Operation::Mixed => (v[0] - v[1] + v[2]) as f64,
            Operation::Complex => ((v[0] + v[1]) * v[2]) as f64,
            Operation::Percentage => {
              assert_eq!(v[0] * v[1] % 100, 0);
              (v[0] * v[1] / 100) as f64
            }
            Operation::Meeting => v[0] as f64 / (v[1] + v[2]) as f64,
            Operation::Work => (v[0] * v[1]) as f64 / (v[0] + v[1]) as f64,
          };
          assert!((answer - expected).abs() < 1e-9);
          assert!(answer > 0.0, "{op:?} {v:?}");
        }
      }
    }
  }

  #[test]
  fn work_rate_example() {
    // 6 days and 3 days together take 2 days.
    let answer = (6 * 3) as f64 / (6 + 3) as f64;
    assert_eq!(AnswerValue::decimal(answer), AnswerValue::Int(2));
    // 4 and 3 days: 12 / 7 = 1.714..., shown as 1.7.
    assert_eq!(AnswerValue::decimal(12.0 / 7.0), AnswerValue::Decimal(1.7));
  }

  #[test]
  fn generated_problems_have_no_leftover_placeholders() {
    let mut rng = StdRng::seed_from_u64(73);
    for difficulty in Difficulty::ALL {
      for _ in 0..300 {
        let q = generate_word_problem(&mut rng, difficulty, None);
        assert!(!q.question.contains('{'), "{}", q.question);
        assert!(is_well_formed(&q.answer, &q.options), "{} {:?}", q.question, q.options);
        assert!(q.options.iter().all(|o| o.as_f64().unwrap() > 0.0));
        assert_eq!(q.category, Some(QuestionCategory::Application));
      }
    }
  }

  #[test]
  fn every_tier_has_templates() {
    for difficulty in Difficulty::ALL {
      assert!(!templates(difficulty).is_empty());
    }
  }
}
