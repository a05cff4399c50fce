//! CALCULATION and LOGIC_SYMBOL: small integer expressions.
//!
//! Both games share [`Op`] and [`eval`]: `×` and `÷` bind tighter than `+`
//! and `-`, operators of equal precedence apply left to right, and division
//! only counts when it is exact. An expression that divides unevenly has no
//! value and the generator draws again.

use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use tracing::debug;

use crate::game_engine::difficulty::Difficulty;
use crate::game_engine::helpers::{fill_options, question_id};
use crate::game_engine::models::{GameType, Question};
use crate::game_engine::strategies::QuestionStrategy;

/// Results outside this range are redrawn.
const RESULT_MIN: i64 = 0;
const RESULT_MAX: i64 = 50;

/// Draws before a generator gives up and uses its fixed fallback.
const MAX_ATTEMPTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

    pub fn symbol(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "×",
            Op::Div => "÷",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Op> {
        Op::ALL.into_iter().find(|op| op.symbol() == s.trim())
    }

    fn binds_tighter(self) -> bool {
        matches!(self, Op::Mul | Op::Div)
    }

    /// `None` when dividing by zero or dividing unevenly.
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Op::Add => Some(a + b),
            Op::Sub => Some(a - b),
            Op::Mul => Some(a * b),
            Op::Div if b != 0 && a % b == 0 => Some(a / b),
            Op::Div => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Evaluate `a op1 b` or `a op1 b op2 c` with the usual precedence.
pub fn eval(a: i64, op1: Op, b: i64, rest: Option<(Op, i64)>) -> Option<i64> {
    match rest {
        None => op1.apply(a, b),
        Some((op2, c)) if op2.binds_tighter() && !op1.binds_tighter() => {
            op1.apply(a, op2.apply(b, c)?)
        }
        Some((op2, c)) => op2.apply(op1.apply(a, b)?, c),
    }
}

fn in_result_range(v: i64) -> bool {
    (RESULT_MIN..=RESULT_MAX).contains(&v)
}

// ---------------------------------------------------------------------------
// CALCULATION
// ---------------------------------------------------------------------------

/// Solve `a op b (op c) = ?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculationStrategy;

impl CalculationStrategy {
    /// Operand bound, exclusive.
    fn operand_limit(difficulty: Difficulty) -> i64 {
        match difficulty {
            Difficulty::Hard   => 30,
            Difficulty::Medium => 20,
            Difficulty::Easy   => 15,
        }
    }

    fn operator_pool(difficulty: Difficulty) -> &'static [Op] {
        match difficulty {
            Difficulty::Easy => &[Op::Add, Op::Sub, Op::Mul, Op::Div],
            _ => &[Op::Add, Op::Sub, Op::Mul, Op::Mul, Op::Mul, Op::Div, Op::Div, Op::Div],
        }
    }

    /// Returns the prompt and its value, or `None` if this draw is rejected.
    fn draw(rng: &mut dyn RngCore, difficulty: Difficulty) -> Option<(String, i64)> {
        let limit = Self::operand_limit(difficulty);
        let pool = Self::operator_pool(difficulty);

        let a = rng.gen_range(1..limit);
        let b = rng.gen_range(1..limit);
        let op1 = *pool.choose(rng)?;

        if difficulty != Difficulty::Hard {
            let value = eval(a, op1, b, None).filter(|v| in_result_range(*v))?;
            return Some((format!("{a} {op1} {b} = ?"), value));
        }

        if op1 == Op::Mul && (a > 10 || b > 10) {
            return None;
        }
        let c = rng.gen_range(1..limit);
        let op2 = *pool.choose(rng)?;
        if op2 == Op::Mul && c > 10 {
            return None;
        }
        let value = eval(a, op1, b, Some((op2, c))).filter(|v| in_result_range(*v))?;
        Some((format!("{a} {op1} {b} {op2} {c} = ?"), value))
    }

    fn fallback(rng: &mut dyn RngCore) -> (String, i64) {
        let a = rng.gen_range(1..=25);
        let b = rng.gen_range(1..=25);
        (format!("{a} + {b} = ?"), a + b)
    }
}

impl QuestionStrategy for CalculationStrategy {
    fn game_type(&self) -> GameType {
        GameType::Calculation
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        let difficulty = Difficulty::from_spec(difficulty);
        let id = question_id(rng, GameType::Calculation);

        let (prompt, value) = (0..MAX_ATTEMPTS)
            .find_map(|_| Self::draw(rng, difficulty))
            .unwrap_or_else(|| {
                debug!(target: "strategy", game = "CALCULATION", "draw limit reached, using fallback");
                Self::fallback(rng)
            });

        let options = fill_options(
            rng,
            value.to_string(),
            |r| Some(value + r.gen_range(-10..=10)).filter(|v| *v >= 0).map(|v| v.to_string()),
            (1..).map(|d| (value + d).to_string()),
        );
        Question::multiple_choice(id, prompt, options, value.to_string())
    }

    fn duration_seconds(&self) -> u32 {
        60
    }

    fn target_question_count(&self) -> u32 {
        10
    }
}

// ---------------------------------------------------------------------------
// LOGIC_SYMBOL
// ---------------------------------------------------------------------------

/// Fill in the missing operator(s): `a ? b = r`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicSymbolStrategy;

impl LogicSymbolStrategy {
    const OPERAND_LIMIT: i64 = 20;
    const POOL: [Op; 6] = [Op::Add, Op::Sub, Op::Mul, Op::Mul, Op::Div, Op::Div];

    /// `a ? b = r` where exactly one operator gives `r`.
    fn draw_single(rng: &mut dyn RngCore) -> Option<(String, Op)> {
        let a = rng.gen_range(1..Self::OPERAND_LIMIT);
        let b = rng.gen_range(1..Self::OPERAND_LIMIT);
        let op = *Self::POOL.choose(rng)?;
        let result = op.apply(a, b).filter(|v| in_result_range(*v))?;

        let ambiguous = Op::ALL
            .into_iter()
            .filter(|other| *other != op)
            .any(|other| other.apply(a, b) == Some(result));
        if ambiguous {
            return None;
        }
        Some((format!("{a} ? {b} = {result}"), op))
    }

    fn draw_pair(rng: &mut dyn RngCore) -> Option<(String, Op, Op)> {
        let a = rng.gen_range(1..Self::OPERAND_LIMIT);
        let b = rng.gen_range(1..Self::OPERAND_LIMIT);
        let c = rng.gen_range(1..Self::OPERAND_LIMIT);
        let op1 = *Self::POOL.choose(rng)?;
        let op2 = *Self::POOL.choose(rng)?;
        let result = eval(a, op1, b, Some((op2, c))).filter(|v| in_result_range(*v))?;
        Some((format!("{a} ? {b} ? {c} = {result}"), op1, op2))
    }

    fn pair_key(op1: Op, op2: Op) -> String {
        format!("{op1} {op2}")
    }
}

impl QuestionStrategy for LogicSymbolStrategy {
    fn game_type(&self) -> GameType {
        GameType::LogicSymbol
    }

    fn generate_question(&mut self, rng: &mut dyn RngCore, difficulty: &str) -> Question {
        let id = question_id(rng, GameType::LogicSymbol);

        if Difficulty::from_spec(difficulty) != Difficulty::Hard {
            // 3 × 4 = 12 is the only reading of "3 ? 4 = 12".
            let (prompt, op) = (0..MAX_ATTEMPTS)
                .find_map(|_| Self::draw_single(rng))
                .unwrap_or_else(|| ("3 ? 4 = 12".to_string(), Op::Mul));
            let mut options: Vec<String> = Op::ALL.iter().map(|o| o.symbol().to_string()).collect();
            options.shuffle(rng);
            return Question::multiple_choice(id, prompt, options, op.symbol());
        }

        let (prompt, op1, op2) = (0..MAX_ATTEMPTS)
            .find_map(|_| Self::draw_pair(rng))
            .unwrap_or_else(|| ("2 ? 3 ? 4 = 10".to_string(), Op::Mul, Op::Add));
        let answer = Self::pair_key(op1, op2);
        let every_pair = Op::ALL
            .into_iter()
            .flat_map(|x| Op::ALL.into_iter().map(move |y| Self::pair_key(x, y)));
        let options = fill_options(
            rng,
            answer.clone(),
            |r| {
                let x = *Op::ALL.choose(r)?;
                let y = *Op::ALL.choose(r)?;
                Some(Self::pair_key(x, y))
            },
            every_pair,
        );
        Question::multiple_choice(id, prompt, options, answer)
    }

    fn duration_seconds(&self) -> u32 {
        60
    }

    fn target_question_count(&self) -> u32 {
        15
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Re-evaluate a rendered prompt such as `"3 × 4 + 2 = ?"`.
    fn eval_prompt(prompt: &str) -> Option<i64> {
        let tokens: Vec<&str> = prompt.trim_end_matches("= ?").split_whitespace().collect();
        let num = |s: &str| s.parse::<i64>().ok();
        match tokens.as_slice() {
            [a, o, b] => eval(num(a)?, Op::from_symbol(o)?, num(b)?, None),
            [a, o1, b, o2, c] => eval(num(a)?, Op::from_symbol(o1)?, num(b)?, Some((Op::from_symbol(o2)?, num(c)?))),
            _ => None,
        }
    }

    #[test]
    fn precedence_and_exact_division() {
        assert_eq!(eval(2, Op::Add, 3, Some((Op::Mul, 4))), Some(14));
        assert_eq!(eval(2, Op::Mul, 3, Some((Op::Add, 4))), Some(10));
        assert_eq!(eval(12, Op::Div, 3, Some((Op::Mul, 2))), Some(8));
        assert_eq!(eval(10, Op::Sub, 4, Some((Op::Sub, 3))), Some(3));
        assert_eq!(eval(7, Op::Div, 2, None), None);
        assert_eq!(eval(1, Op::Add, 7, Some((Op::Div, 2))), None);
    }

    #[test]
    fn calculation_answers_match_their_prompt() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut s = CalculationStrategy;
        for difficulty in ["EASY", "MEDIUM", "HARD"] {
            for _ in 0..200 {
                let q = s.generate_question(&mut rng, difficulty);
                let value = eval_prompt(&q.prompt).expect(&q.prompt);
                assert_eq!(q.answer, value.to_string(), "{}", q.prompt);
                assert!((0..=50).contains(&value));
                assert_eq!(q.options.len(), 4);
                assert_eq!(q.options.iter().filter(|o| **o == q.answer).count(), 1);
                assert!(q.options.iter().all(|o| o.parse::<i64>().unwrap() >= 0));
            }
        }
    }

    #[test]
    fn hard_calculation_uses_three_operands() {
        let mut rng = StdRng::seed_from_u64(5);
        let q = CalculationStrategy.generate_question(&mut rng, "HARD");
        assert_eq!(q.prompt.split_whitespace().count(), 7);
        assert!(q.id.starts_with("CA-"));
    }

    #[test]
    fn logic_symbol_single_is_unambiguous() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = LogicSymbolStrategy;
        for _ in 0..300 {
            let q = s.generate_question(&mut rng, "MEDIUM");
            let parts: Vec<&str> = q.prompt.split_whitespace().collect();
            let (a, b, r): (i64, i64, i64) =
                (parts[0].parse().unwrap(), parts[2].parse().unwrap(), parts[4].parse().unwrap());
            let matching: Vec<Op> = Op::ALL.into_iter().filter(|op| op.apply(a, b) == Some(r)).collect();
            assert_eq!(matching.len(), 1, "{}", q.prompt);
            assert_eq!(matching[0].symbol(), q.answer);
            let mut opts = q.options.clone();
            opts.sort();
            let mut all: Vec<String> = Op::ALL.iter().map(|o| o.symbol().to_string()).collect();
            all.sort();
            assert_eq!(opts, all);
        }
    }

    #[test]
    fn logic_symbol_hard_answers_are_operator_pairs() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut s = LogicSymbolStrategy;
        for _ in 0..100 {
            let q = s.generate_question(&mut rng, "HARD");
            let ops: Vec<Op> = q.answer.split(' ').filter_map(Op::from_symbol).collect();
            assert_eq!(ops.len(), 2, "{}", q.answer);
            let parts: Vec<&str> = q.prompt.split_whitespace().collect();
            let n = |i: usize| parts[i].parse::<i64>().unwrap();
            assert_eq!(eval(n(0), ops[0], n(2), Some((ops[1], n(4)))), Some(n(6)));
            assert_eq!(q.options.len(), 4);
            assert_eq!(q.options.iter().filter(|o| **o == q.answer).count(), 1);
        }
    }

    #[test]
    fn check_answer_trims_input() {
        let mut rng = StdRng::seed_from_u64(1);
        let s = CalculationStrategy;
        let q = CalculationStrategy.generate_question(&mut rng, "EASY");
        assert!(s.check_answer(&q, &format!("  {} ", q.answer)));
        for o in q.options.iter().filter(|o| **o != q.answer) {
            assert!(!s.check_answer(&q, o));
        }
    }
}
