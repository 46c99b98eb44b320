use crate::cards::Card;
use std::fmt;
use std::str::FromStr;

/// Difficulty tiers for bot play style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Parse a difficulty label, falling back to `Medium` for anything unknown.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|err| {
            log::warn!("{err}; using medium");
            Difficulty::Medium
        })
    }

    pub const fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DifficultyParseError {
    #[error("unknown difficulty: '{0}'")]
    Unknown(String),
}

impl FromStr for Difficulty {
    type Err = DifficultyParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(DifficultyParseError::Unknown(s.to_string())),
        }
    }
}

/// One seat at the table.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) chips: u64,
    pub(crate) hand: Vec<Card>,
    pub(crate) is_bot: bool,
    pub(crate) difficulty: Difficulty,
    pub(crate) current_bet: u64,
    pub(crate) folded: bool,
    pub(crate) all_in: bool,
    pub(crate) seen: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u64, is_bot: bool, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            chips,
            hand: Vec::with_capacity(3),
            is_bot,
            difficulty,
            current_bet: 0,
            folded: false,
            all_in: false,
            seen: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chips(&self) -> u64 {
        self.chips
    }

    /// Cards held this round: empty before the deal, three after.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn is_bot(&self) -> bool {
        self.is_bot
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Chips committed this round.
    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    pub fn has_seen(&self) -> bool {
        self.seen
    }

    /// Clear per-round state. Chips carry over.
    pub fn reset(&mut self) {
        self.hand.clear();
        self.current_bet = 0;
        self.folded = false;
        self.all_in = false;
        self.seen = false;
    }

    /// Move up to `amount` chips into this round's bet and return what was
    /// actually paid. A short stack pays everything and goes all-in.
    pub fn bet(&mut self, amount: u64) -> u64 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.current_bet += paid;
        if self.chips == 0 {
            self.all_in = true;
        }
        paid
    }

    pub fn fold(&mut self) {
        self.folded = true;
    }

    pub fn see_cards(&mut self) {
        self.seen = true;
    }

    pub(crate) fn award(&mut self, amount: u64) {
        self.chips = self.chips.saturating_add(amount);
    }
}
