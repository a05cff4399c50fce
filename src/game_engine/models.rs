use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Card primitives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs    => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts   => 'H',
            Suit::Spades   => 'S',
        }
    }

    fn from_symbol(c: char) -> Option<Suit> {
        match c.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Rank 2..=14 where 14 = Ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const ACE: Rank = Rank(14);

    pub fn symbol(self) -> &'static str {
        match self.0 {
            2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
            7 => "7", 8 => "8", 9 => "9", 10 => "T",
            11 => "J", 12 => "Q", 13 => "K", 14 => "A",
            _ => "?",
        }
    }

    fn from_symbol(c: char) -> Option<Rank> {
        let value = match c.to_ascii_uppercase() {
            '2'..='9' => c as u8 - b'0',
            'T' => 10,
            'J' => 11,
            'Q' => 12,
            'K' => 13,
            'A' => 14,
            _ => return None,
        };
        Some(Rank(value))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A playing card, written `RankSuit` (`AS`, `TD`, `2H`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card notation: {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCardError(s.to_string()));
        };
        match (Rank::from_symbol(r), Suit::from_symbol(su)) {
            (Some(rank), Some(suit)) => Ok(Card { rank, suit }),
            _ => Err(ParseCardError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Game catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameType {
    Calculation,
    LogicSymbol,
    ReflexGreatest,
    FlagQuiz,
    MapQuiz,
    NumberMemory,
    VisualCount,
    Multiplication,
    PokerHand,
    DailyTest,
}

impl GameType {
    pub const ALL: [GameType; 10] = [
        GameType::Calculation,
        GameType::LogicSymbol,
        GameType::ReflexGreatest,
        GameType::FlagQuiz,
        GameType::MapQuiz,
        GameType::NumberMemory,
        GameType::VisualCount,
        GameType::Multiplication,
        GameType::PokerHand,
        GameType::DailyTest,
    ];

    /// Stable wire tag (`"FLAG_QUIZ"`), as stored in persisted results.
    pub fn tag(self) -> &'static str {
        match self {
            GameType::Calculation    => "CALCULATION",
            GameType::LogicSymbol    => "LOGIC_SYMBOL",
            GameType::ReflexGreatest => "REFLEX_GREATEST",
            GameType::FlagQuiz       => "FLAG_QUIZ",
            GameType::MapQuiz        => "MAP_QUIZ",
            GameType::NumberMemory   => "NUMBER_MEMORY",
            GameType::VisualCount    => "VISUAL_COUNT",
            GameType::Multiplication => "MULTIPLICATION",
            GameType::PokerHand      => "POKER_HAND",
            GameType::DailyTest      => "DAILY_TEST",
        }
    }

    pub fn from_tag(tag: &str) -> Option<GameType> {
        let tag = tag.trim();
        GameType::ALL.into_iter().find(|g| g.tag().eq_ignore_ascii_case(tag))
    }

    /// Short prefix used in question ids.
    pub fn id_prefix(self) -> &'static str {
        match self {
            GameType::Calculation    => "CA",
            GameType::LogicSymbol    => "LS",
            GameType::ReflexGreatest => "RG",
            GameType::FlagQuiz       => "FQ",
            GameType::MapQuiz        => "MQ",
            GameType::NumberMemory   => "NM",
            GameType::VisualCount    => "VC",
            GameType::Multiplication => "MU",
            GameType::PokerHand      => "PH",
            GameType::DailyTest      => "DT",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GameType::Calculation    => "Calculation",
            GameType::LogicSymbol    => "Missing Symbol",
            GameType::ReflexGreatest => "Greatest Number",
            GameType::FlagQuiz       => "Flag Quiz",
            GameType::MapQuiz        => "Map Quiz",
            GameType::NumberMemory   => "Number Memory",
            GameType::VisualCount    => "Visual Count",
            GameType::Multiplication => "Multiplication",
            GameType::PokerHand      => "Poker Hand",
            GameType::DailyTest      => "Daily Test",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// A single trial presented to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    /// Stimulus text. Empty when the stimulus is `image_res`.
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
    /// Content shown before the input phase; empty means no flash phase.
    #[serde(default)]
    pub flash_items: Vec<String>,
    #[serde(default)]
    pub image_res: Option<String>,
}

impl Question {
    pub fn multiple_choice(
        id: String,
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Self {
        Question {
            id,
            prompt: prompt.into(),
            options,
            answer: answer.into(),
            flash_items: Vec::new(),
            image_res: None,
        }
    }

    pub fn with_flash(mut self, items: Vec<String>) -> Self {
        self.flash_items = items;
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image_res = Some(image.into());
        self
    }

    pub fn has_flash(&self) -> bool {
        !self.flash_items.is_empty()
    }

    /// Deterministic on-screen ordering: numeric when every option is an
    /// integer, lexicographic otherwise.
    pub fn sort_options(&mut self) {
        let numeric: Option<Vec<i64>> = self.options.iter().map(|o| o.trim().parse().ok()).collect();
        match numeric {
            Some(_) => self
                .options
                .sort_by_key(|o| o.trim().parse::<i64>().unwrap_or_default()),
            None => self.options.sort(),
        }
    }
}

/// What the presentation layer should show for the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewState {
    Flashing,
    Input,
}

// ---------------------------------------------------------------------------
// Evaluation / persisted results
// ---------------------------------------------------------------------------

/// Ordinal grade tiers, best first. `F` only appears for empty sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    E,
    F,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A     => "A",
            Grade::BPlus => "B+",
            Grade::B     => "B",
            Grade::CPlus => "C+",
            Grade::C     => "C",
            Grade::D     => "D",
            Grade::E     => "E",
            Grade::F     => "F",
        }
    }

    pub fn feedback(self) -> FeedbackCategory {
        match self {
            Grade::APlus | Grade::A => FeedbackCategory::Excellent,
            Grade::BPlus | Grade::B => FeedbackCategory::Good,
            Grade::CPlus | Grade::C => FeedbackCategory::Average,
            Grade::D                => FeedbackCategory::Poor,
            Grade::E | Grade::F     => FeedbackCategory::Bad,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    Excellent,
    Good,
    Average,
    Poor,
    Bad,
    /// No rounds were played; not a real outcome.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub grade: Grade,
    pub feedback: FeedbackCategory,
    /// Lower is better. 0 only for the degenerate (no rounds) result.
    pub brain_age: u32,
}

impl EvaluationResult {
    pub fn is_degenerate(&self) -> bool {
        self.feedback == FeedbackCategory::None
    }
}

/// Record handed to the persistence collaborator, once per scored session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResult {
    pub date: DateTime<Utc>,
    pub game_type: GameType,
    pub score: u32,
    pub duration_seconds: u32,
    pub grade: Grade,
    #[serde(default)]
    pub brain_age: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_notation_round_trips() {
        for raw in ["AS", "TD", "2H", "kc"] {
            let card: Card = raw.parse().unwrap();
            assert_eq!(card.to_string(), raw.to_ascii_uppercase());
        }
        assert!("1S".parse::<Card>().is_err());
        assert!("ASX".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
    }

    #[test]
    fn bad_card_error_names_the_input() {
        let err = "ZZ".parse::<Card>().unwrap_err();
        assert_eq!(err, ParseCardError("ZZ".into()));
        assert_eq!(err.to_string(), "invalid card notation: \"ZZ\"");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn unknown_tag_is_rejected_and_known_tags_resolve() {
        assert_eq!(GameType::from_tag("POKER_HAND"), Some(GameType::PokerHand));
        assert_eq!(GameType::from_tag(" daily_test "), Some(GameType::DailyTest));
        assert_eq!(GameType::from_tag("CHESS"), None);
        for g in GameType::ALL {
            assert_eq!(GameType::from_tag(g.tag()), Some(g));
        }
    }

    #[test]
    fn game_type_serializes_as_tag() {
        let json = serde_json::to_string(&GameType::ReflexGreatest).unwrap();
        assert_eq!(json, "\"REFLEX_GREATEST\"");
        let json = serde_json::to_string(&Grade::APlus).unwrap();
        assert_eq!(json, "\"A+\"");
    }

    #[test]
    fn numeric_options_sort_by_value() {
        let mut q = Question::multiple_choice(
            "X-1".into(),
            "?",
            vec!["12".into(), "9".into(), "100".into(), "0".into()],
            "9",
        );
        q.sort_options();
        assert_eq!(q.options, vec!["0", "9", "12", "100"]);
    }

    #[test]
    fn text_options_sort_lexicographically() {
        let mut q = Question::multiple_choice(
            "X-2".into(),
            "?",
            vec!["Pair".into(), "Flush".into(), "10".into(), "High Card".into()],
            "Pair",
        );
        q.sort_options();
        assert_eq!(q.options, vec!["10", "Flush", "High Card", "Pair"]);
    }
}
