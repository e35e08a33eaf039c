//! The question catalog.

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Question};

/// An immutable catalog of questions tagged by difficulty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Human-readable name.
    pub name: String,
    /// Description of this bank.
    #[serde(default)]
    pub description: String,
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(name: impl Into<String>, questions: Vec<Question>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            questions,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The bundled catalog: four first-degree equations per tier.
    pub fn builtin() -> Self {
        use Difficulty::{Easy, Hard, Medium};

        let questions = [
            ("2x + 3 = 7", 2.0, Easy),
            ("x - 5 = 10", 15.0, Easy),
            ("3x = 12", 4.0, Easy),
            ("x + 8 = 20", 12.0, Easy),
            ("2x + 5 = 3x - 1", 6.0, Medium),
            ("4x - 7 = 2x + 3", 5.0, Medium),
            ("5x + 2 = 3x + 10", 4.0, Medium),
            ("6x - 4 = 4x + 8", 6.0, Medium),
            ("3(x + 2) = 2(x + 5)", 4.0, Hard),
            ("4(2x - 1) = 3(2x + 2)", 5.0, Hard),
            ("2(3x - 4) = 2(2x + 1)", 5.0, Hard),
            ("5(x - 2) = 3(x + 4)", 11.0, Hard),
        ]
        .into_iter()
        .map(|(text, answer, tier)| Question::new(text, answer, tier))
        .collect();

        Self::new("First-degree equations", questions)
            .with_description("Solve for x, from one-step equations to distributed terms")
    }

    /// Questions of one tier, in declaration order.
    pub fn by_difficulty(&self, tier: Difficulty) -> impl Iterator<Item = &Question> + '_ {
        self.questions.iter().filter(move |q| q.difficulty == tier)
    }

    /// Number of questions in a tier.
    pub fn count(&self, tier: Difficulty) -> usize {
        self.by_difficulty(tier).count()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_four_per_tier() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 12);
        for tier in Difficulty::ALL {
            assert_eq!(bank.count(tier), 4, "tier {tier}");
        }
    }

    #[test]
    fn by_difficulty_keeps_declaration_order() {
        let bank = QuestionBank::builtin();
        let easy: Vec<&str> = bank
            .by_difficulty(Difficulty::Easy)
            .map(|q| q.text.as_str())
            .collect();
        assert_eq!(easy, ["2x + 3 = 7", "x - 5 = 10", "3x = 12", "x + 8 = 20"]);

        let hard = bank.by_difficulty(Difficulty::Hard).next().unwrap();
        assert_eq!(hard.text, "3(x + 2) = 2(x + 5)");
        assert_eq!(hard.expected_answer, 4.0);
    }

    /// Value of a linear expression such as `4(2x - 1)` at `x`.
    fn eval_side(expr: &str, x: f64) -> f64 {
        fn sum(chars: &[char], pos: &mut usize, x: f64) -> f64 {
            let mut total = product(chars, pos, x);
            while *pos < chars.len() {
                match chars[*pos] {
                    '+' => {
                        *pos += 1;
                        total += product(chars, pos, x);
                    }
                    '-' => {
                        *pos += 1;
                        total -= product(chars, pos, x);
                    }
                    _ => break,
                }
            }
            total
        }

        fn product(chars: &[char], pos: &mut usize, x: f64) -> f64 {
            let mut value = 1.0;
            let mut factors = 0;
            while *pos < chars.len() {
                let c = chars[*pos];
                if c.is_ascii_digit() {
                    let start = *pos;
                    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
                        *pos += 1;
                    }
                    let digits: String = chars[start..*pos].iter().collect();
                    value *= digits.parse::<f64>().unwrap();
                } else if c == 'x' {
                    *pos += 1;
                    value *= x;
                } else if c == '(' {
                    *pos += 1;
                    value *= sum(chars, pos, x);
                    assert_eq!(chars[*pos], ')');
                    *pos += 1;
                } else {
                    break;
                }
                factors += 1;
            }
            assert!(factors > 0, "missing term");
            value
        }

        let chars: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
        let mut pos = 0;
        let value = sum(&chars, &mut pos, x);
        assert_eq!(pos, chars.len(), "unparsed input in {expr:?}");
        value
    }

    #[test]
    fn builtin_answers_solve_their_equations() {
        for q in QuestionBank::builtin().questions() {
            let (lhs, rhs) = q.text.split_once('=').unwrap();
            let at = |x: f64| eval_side(lhs, x) - eval_side(rhs, x);
            assert_eq!(at(q.expected_answer), 0.0, "{} at x = {}", q.text, q.expected_answer);
            assert_ne!(at(q.expected_answer + 1.0), 0.0, "{} is not a unique solution", q.text);
        }
    }

    #[test]
    fn hard_tier_answers() {
        let bank = QuestionBank::builtin();
        let answers: Vec<f64> = bank
            .by_difficulty(Difficulty::Hard)
            .map(|q| q.expected_answer)
            .collect();
        assert_eq!(answers, [4.0, 5.0, 5.0, 11.0]);
    }

    #[test]
    fn empty_tier_yields_nothing() {
        let bank = QuestionBank::new(
            "easy only",
            vec![Question::new("x = 1", 1.0, Difficulty::Easy)],
        );
        assert_eq!(bank.by_difficulty(Difficulty::Hard).count(), 0);
        assert!(!bank.is_empty());
    }
}
