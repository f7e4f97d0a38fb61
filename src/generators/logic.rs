//! Logic puzzles. Each tier has its own family:
//! ordering (EASY), odd one out (MEDIUM), paired-attribute deduction (HARD),
//! and liar puzzles, digit codes or kinship riddles (EXPERT).

use rand::seq::SliceRandom;
use rand::Rng;

use super::options::{numeric_options_with, text_options};
use crate::domain::{AnswerValue, Difficulty, Question, QuestionCategory, QuestionType};

const NAMES: &[&str] = &["小明", "小红", "小刚", "小丽", "小勇", "小美", "小杰", "小雨"];

/// (comparative, superlative of the top, superlative of the bottom).
const TRAITS: &[(&str, &str, &str)] = &[
  ("高", "最高", "最矮"),
  ("重", "最重", "最轻"),
  ("跑得快", "跑得最快", "跑得最慢"),
  ("年纪大", "年纪最大", "年纪最小"),
];

const THEMES: &[&[&str]] = &[
  &["苹果", "香蕉", "葡萄", "西瓜", "橙子"],
  &["小狗", "小猫", "兔子", "老虎", "大象"],
  &["汽车", "火车", "飞机", "轮船", "自行车"],
  &["铅笔", "橡皮", "尺子", "卷笔刀", "文具盒"],
  &["宝剑", "长矛", "弓箭", "斧头", "匕首"],
];

/// (verb, noun, items) for the deduction family.
const PAIRINGS: &[(&str, &str, [&str; 3])] = &[
  ("养", "宠物", ["猫", "狗", "兔子"]),
  ("用", "武器", ["宝剑", "弓箭", "法杖"]),
  ("戴", "头盔", ["金头盔", "银头盔", "铜头盔"]),
];

/// Hand-checked puzzles: (question, answer, options). Answers are exact option entries.
const LIAR_PUZZLES: &[(&str, &str, &[&str])] = &[
  (
    "甲、乙、丙三人，每人要么总说真话，要么总说假话。\n甲说：“乙在说谎。”\n乙说：“丙在说谎。”\n丙说：“甲和乙都在说谎。”\n谁说的是真话？",
    "乙",
    &["甲", "乙", "丙"],
  ),
  (
    "甲、乙两人，每人要么总说真话，要么总说假话。\n甲说：“我们两个都是说谎的人。”\n下面哪个说法正确？",
    "甲说谎，乙说真话",
    &["甲说谎，乙说真话", "甲说真话，乙说谎", "两人都说谎", "两人都说真话"],
  ),
  (
    "甲、乙两人，每人要么总说真话，要么总说假话。\n甲说：“乙说的是真话。”\n乙说：“我们两个人中恰好有一个说真话。”\n下面哪个说法正确？",
    "两人都说谎",
    &["两人都说谎", "两人都说真话", "甲说真话，乙说谎", "甲说谎，乙说真话"],
  ),
];

const KINSHIP_RIDDLES: &[(&str, &str, &[&str])] = &[
  ("妈妈的妈妈，我应该叫她什么？", "外婆", &["外婆", "奶奶", "姑姑", "阿姨"]),
  ("爸爸的姐姐，我应该叫她什么？", "姑姑", &["姑姑", "阿姨", "舅妈", "婶婶"]),
  ("妈妈的哥哥，我应该叫他什么？", "舅舅", &["舅舅", "叔叔", "伯伯", "姑父"]),
  ("爸爸的弟弟是我的叔叔，叔叔的儿子是我的什么人？", "堂兄弟", &["堂兄弟", "表兄弟", "亲兄弟", "侄子"]),
];

pub fn generate_logic<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  match difficulty {
    Difficulty::Easy => ordering_puzzle(rng, difficulty),
    Difficulty::Medium => odd_one_out(rng, difficulty),
    Difficulty::Hard => deduction_puzzle(rng, difficulty),
    Difficulty::Expert => match rng.gen_range(0..3) {
      0 => curated(rng, difficulty, LIAR_PUZZLES),
      1 => digit_code(rng, difficulty),
      _ => curated(rng, difficulty, KINSHIP_RIDDLES),
    },
  }
}

/// Three people in a strict order, two chained clues, ask for either end.
fn ordering_puzzle<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  let people: Vec<&str> = NAMES.choose_multiple(rng, 3).copied().collect();
  let &(comparative, top, bottom) = TRAITS.choose(rng).unwrap_or(&TRAITS[0]);

  let mut clues = vec![
    format!("{}比{}{}。", people[0], people[1], comparative),
    format!("{}比{}{}。", people[1], people[2], comparative),
  ];
  clues.shuffle(rng);

  let (asked, answer) = if rng.gen_bool(0.5) { (top, people[0]) } else { (bottom, people[2]) };
  let text = format!("{}\n谁{}？", clues.concat(), asked);
  let options = text_options(rng, answer, &people);
  Question::new(rng, QuestionType::Logic, difficulty, text, AnswerValue::text(answer), options)
    .with_category(QuestionCategory::Logic)
}

/// Three items from one theme and one intruder from another.
fn odd_one_out<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  let themes: Vec<&&[&str]> = THEMES.choose_multiple(rng, 2).collect();
  let mut items: Vec<&str> = themes[0].choose_multiple(rng, 3).copied().collect();
  let odd = themes[1].choose(rng).copied().unwrap_or(themes[1][0]);
  items.push(odd);
  items.shuffle(rng);

  let text = format!("下面哪一个和其他三个不是同一类？\n{}", items.join("、"));
  let options = text_options(rng, odd, &items);
  Question::new(rng, QuestionType::Logic, difficulty, text, AnswerValue::text(odd), options)
    .with_category(QuestionCategory::Logic)
}

/// Person 0 is pinned by a direct clue and person 1 is excluded from person 2's
/// item, which leaves exactly one consistent assignment.
fn deduction_puzzle<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  let people: Vec<&str> = NAMES.choose_multiple(rng, 3).copied().collect();
  let &(verb, noun, pool) = PAIRINGS.choose(rng).unwrap_or(&PAIRINGS[0]);
  let mut items: Vec<&str> = pool.to_vec();
  items.shuffle(rng);

  let mut listed = items.clone();
  listed.shuffle(rng);
  let setup = format!(
    "{}、{}、{}三位勇士，每人{}一种不同的{}：{}。",
    people[0],
    people[1],
    people[2],
    verb,
    noun,
    listed.join("、")
  );
  let clues = format!("{}{}{}。{}不{}{}。", people[0], verb, items[0], people[1], verb, items[2]);

  let (text, answer, choices) = if rng.gen_bool(0.5) {
    (format!("{setup}\n{clues}\n谁{verb}{}？", items[2]), people[2], people.clone())
  } else {
    (format!("{setup}\n{clues}\n{}{verb}什么？", people[1]), items[1], items.clone())
  };

  let options = text_options(rng, answer, &choices);
  Question::new(rng, QuestionType::Logic, difficulty, text, AnswerValue::text(answer), options)
    .with_category(QuestionCategory::Logic)
}

/// Two-digit number from its digit difference and digit sum.
fn digit_code<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Question {
  let tens = rng.gen_range(2..=9);
  let ones = rng.gen_range(0..tens);
  let answer = tens * 10 + ones;
  let text = format!(
    "一个两位数，十位上的数字比个位上的数字大{}，两个数字的和是{}。这个两位数是多少？",
    tens - ones,
    tens + ones
  );
  // Swapped digits is the classic slip.
  let swapped = ones * 10 + tens;
  let options = numeric_options_with(rng, answer, difficulty, &[swapped]);
  Question::new(rng, QuestionType::Logic, difficulty, text, AnswerValue::Int(answer), options)
    .with_category(QuestionCategory::Logic)
}

fn curated<R: Rng + ?Sized>(rng: &mut R, difficulty: Difficulty, bank: &[(&str, &str, &[&str])]) -> Question {
  let &(text, answer, choices) = bank.choose(rng).unwrap_or(&bank[0]);
  let options = text_options(rng, answer, choices);
  Question::new(rng, QuestionType::Logic, difficulty, text.to_string(), AnswerValue::text(answer), options)
    .with_category(QuestionCategory::Logic)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generators::options::is_well_formed;
  use rand::{rngs::StdRng, SeedableRng};

  #[test]
  fn every_tier_produces_well_formed_options() {
    let mut rng = StdRng::seed_from_u64(43);
    for difficulty in Difficulty::ALL {
      for _ in 0..300 {
        let q = generate_logic(&mut rng, difficulty);
        assert_eq!(q.kind, QuestionType::Logic);
        assert_eq!(q.difficulty, difficulty);
        assert!(is_well_formed(&q.answer, &q.options), "{}", q.question);
        assert!(q.options.len() >= 3);
      }
    }
  }

  #[test]
  fn curated_answers_are_options() {
    for bank in [LIAR_PUZZLES, KINSHIP_RIDDLES] {
      for (_, answer, choices) in bank {
        assert_eq!(choices.iter().filter(|c| *c == answer).count(), 1);
      }
    }
  }

  #[test]
  fn ordering_answer_sits_at_an_end_of_the_chain() {
    let mut rng = StdRng::seed_from_u64(47);
    for _ in 0..100 {
      let q = ordering_puzzle(&mut rng, Difficulty::Easy);
      let answer = q.answer.to_string();
      let appearances = q.question.matches(answer.as_str()).count();
      // The top and bottom of a chain appear in exactly one clue.
      assert_eq!(appearances, 1, "{}", q.question);
    }
  }

  #[test]
  fn digit_code_is_consistent() {
    let mut rng = StdRng::seed_from_u64(53);
    for _ in 0..100 {
      let q = digit_code(&mut rng, Difficulty::Expert);
      let n = q.answer.as_f64().unwrap() as i64;
      let (t, o) = (n / 10, n % 10);
      assert!(q.question.contains(&format!("大{}", t - o)));
      assert!(q.question.contains(&format!("和是{}", t + o)));
    }
  }
}
