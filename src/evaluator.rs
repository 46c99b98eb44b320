//! Three-card hand ranking.
//!
//! Categories from strongest to weakest: Trail, Pure Sequence, Sequence,
//! Color, Pair, High Card. Within a category hands compare by the ranks that
//! matter for it, highest first.

use crate::cards::Card;
use core::cmp::Ordering;
use std::fmt;

/// Hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    Color = 3,
    Sequence = 4,
    PureSequence = 5,
    Trail = 6,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::HighCard,
        Category::Pair,
        Category::Color,
        Category::Sequence,
        Category::PureSequence,
        Category::Trail,
    ];

    /// Numeric rank, 1 (High Card) to 6 (Trail).
    pub const fn rank(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::Color => "Color",
            Category::Sequence => "Sequence",
            Category::PureSequence => "Pure Sequence",
            Category::Trail => "Trail",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparable hand strength. Fields compare lexicographically, so the
/// category dominates and each tiebreak rank only matters when all earlier
/// ones are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue {
    category: Category,
    primary: u8,
    secondary: u8,
    tertiary: u8,
}

impl HandValue {
    pub const fn new(category: Category, primary: u8, secondary: u8, tertiary: u8) -> Self {
        Self { category, primary, secondary, tertiary }
    }

    pub const fn category(self) -> Category {
        self.category
    }

    /// Tiebreak ranks, most significant first. Unused slots are zero.
    pub const fn tiebreaks(self) -> [u8; 3] {
        [self.primary, self.secondary, self.tertiary]
    }

    /// Decimal score: `rank * 100 + primary + 0.1 * secondary + 0.01 * tertiary`.
    ///
    /// Only for display and heuristics; ordering uses the structured value.
    pub fn score(self) -> f64 {
        f64::from(self.category.rank()) * 100.0
            + f64::from(self.primary)
            + f64::from(self.secondary) * 0.1
            + f64::from(self.tertiary) * 0.01
    }
}

/// Detailed evaluation result. `value` drives ordering.
#[derive(Debug, Clone, Copy)]
#[non_exhaustive]
pub struct Evaluation {
    pub category: Category,
    /// The hand sorted by rank, highest first.
    pub cards: [Card; 3],
    value: HandValue,
}

impl Evaluation {
    pub const fn value(&self) -> HandValue {
        self.value
    }

    pub const fn rank(&self) -> u8 {
        self.category.rank()
    }

    pub fn score(&self) -> f64 {
        self.value.score()
    }

    pub const fn name(&self) -> &'static str {
        self.category.name()
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Evaluation {}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("expected exactly three cards, got {0}")]
    InvalidHandSize(usize),
}

/// Evaluate a hand given as a slice; it must hold exactly three cards.
///
/// ```
/// use teen_patti::cards::parse_cards;
/// use teen_patti::evaluator::{evaluate_hand, Category};
///
/// let hand = parse_cards("K♠ Q♠ J♠").unwrap();
/// let eval = evaluate_hand(&hand).unwrap();
/// assert_eq!(eval.category, Category::PureSequence);
/// assert_eq!(eval.score(), 513.0);
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<Evaluation, EvalError> {
    let three: &[Card; 3] = cards.try_into().map_err(|_| EvalError::InvalidHandSize(cards.len()))?;
    Ok(evaluate_three(three))
}

/// Evaluate exactly three cards.
pub fn evaluate_three(cards: &[Card; 3]) -> Evaluation {
    let mut sorted = *cards;
    // Stable: equal ranks keep their dealt order.
    sorted.sort_by(|a, b| b.value().cmp(&a.value()));
    let [hi, mid, lo] = [sorted[0].value(), sorted[1].value(), sorted[2].value()];

    let value = if hi == mid && mid == lo {
        HandValue::new(Category::Trail, hi, 0, 0)
    } else {
        let flush = sorted[0].suit() == sorted[1].suit() && sorted[1].suit() == sorted[2].suit();
        let straight = is_straight(hi, mid, lo);
        if flush && straight {
            HandValue::new(Category::PureSequence, hi, 0, 0)
        } else if straight {
            HandValue::new(Category::Sequence, hi, 0, 0)
        } else if flush {
            HandValue::new(Category::Color, hi, mid, lo)
        } else if hi == mid {
            HandValue::new(Category::Pair, hi, lo, 0)
        } else if mid == lo {
            HandValue::new(Category::Pair, mid, hi, 0)
        } else {
            HandValue::new(Category::HighCard, hi, mid, lo)
        }
    };

    Evaluation { category: value.category(), cards: sorted, value }
}

/// Compare two hands. `Greater` means `a` wins.
pub fn compare_hands(a: &[Card], b: &[Card]) -> Result<Ordering, EvalError> {
    Ok(evaluate_hand(a)?.cmp(&evaluate_hand(b)?))
}

/// Values must be sorted descending. A-2-3 is the only wrap-around straight.
fn is_straight(hi: u8, mid: u8, lo: u8) -> bool {
    if hi == 14 && mid == 3 && lo == 2 {
        return true;
    }
    hi == mid + 1 && mid == lo + 1
}
