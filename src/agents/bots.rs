use crate::cards::Card;
use crate::engine::GameEngine;
use crate::evaluator::{evaluate_hand, Category};
use crate::game::Action;
use crate::player::Difficulty;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::time::Duration;

/// Per-difficulty constants a bot plays by.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct BotAi {
    pub difficulty: Difficulty,
    /// Probability of raising once the decision score clears the raise threshold.
    pub aggressiveness: f64,
    /// Probability of adding a bluff bonus to the decision score.
    pub bluff_chance: f64,
}

impl BotAi {
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let (aggressiveness, bluff_chance) = match difficulty {
            Difficulty::Easy => (0.3, 0.10),
            Difficulty::Medium => (0.5, 0.25),
            Difficulty::Hard => (0.7, 0.40),
        };
        Self { difficulty, aggressiveness, bluff_chance }
    }

    /// Pick an action for the seat described by `ctx`. Every random draw
    /// comes from `rng`, so a seeded RNG and the same snapshot give the same
    /// decision.
    pub fn make_decision<R: Rng + ?Sized>(&self, ctx: &BotContext<'_>, rng: &mut R) -> BotDecision {
        let strength = evaluate_hand_strength(ctx.hand);
        let pot_odds = calculate_pot_odds(ctx.pot, ctx.call_amount());
        let bluffing = rng.random::<f64>() < self.bluff_chance;

        let mut score = strength * 0.6 + pot_odds * 0.3 + if bluffing { 0.3 } else { 0.0 };
        score *= difficulty_multiplier(self.difficulty);
        score += (rng.random::<f64>() - 0.5) * 0.2;

        let call = ctx.call_amount();
        let can_afford = ctx.chips >= call;
        let decide = |action: Action, reason: &'static str| BotDecision {
            action,
            score,
            bluffing,
            reason,
        };

        if score < 0.3 {
            return decide(Action::Fold, "weak");
        }
        if score < 0.5 {
            if can_afford && call as f64 <= ctx.chips as f64 * 0.2 {
                return decide(Action::Call, "cheap_call");
            }
            return decide(Action::Fold, "too_expensive");
        }
        if score < 0.7 {
            if can_afford {
                return decide(Action::Call, "call");
            }
            return decide(Action::Fold, "cannot_afford");
        }

        if can_afford && rng.random::<f64>() < self.aggressiveness {
            match self.calculate_raise_amount(ctx, strength, rng) {
                Some(raise) if ctx.chips >= call + raise => {
                    let reason = if bluffing { "bluff_raise" } else { "value_raise" };
                    decide(Action::Raise(raise), reason)
                }
                _ => decide(Action::Call, "call_short_stack"),
            }
        } else if can_afford {
            decide(Action::Call, "call")
        } else {
            decide(Action::Fold, "cannot_afford")
        }
    }

    /// Raise size scaled to the pot by hand strength, at least the table
    /// minimum and at most 40% of the bot's chips. `None` when that cap
    /// falls below the minimum.
    pub fn calculate_raise_amount<R: Rng + ?Sized>(
        &self,
        ctx: &BotContext<'_>,
        strength: f64,
        rng: &mut R,
    ) -> Option<u64> {
        let r = rng.random::<f64>();
        let multiplier = if strength > 0.8 {
            0.5 + r * 0.5
        } else if strength > 0.6 {
            0.3 + r * 0.3
        } else {
            0.2 + r * 0.2
        };
        let sized = ((ctx.pot as f64) * multiplier).floor() as u64;
        let cap = ((ctx.chips as f64) * 0.4).floor() as u64;
        let amount = sized.max(ctx.min_bet).min(cap);
        (amount >= ctx.min_bet).then_some(amount)
    }

    /// Whether to look at the cards before deciding. Never again once seen.
    pub fn should_see_cards<R: Rng + ?Sized>(&self, ctx: &BotContext<'_>, rng: &mut R) -> bool {
        if ctx.seen {
            return false;
        }
        let strength = evaluate_hand_strength(ctx.hand);
        match self.difficulty {
            Difficulty::Easy => rng.random::<f64>() < 0.3,
            Difficulty::Medium => strength > 0.4 && rng.random::<f64>() < 0.5,
            Difficulty::Hard => strength > 0.5 && rng.random::<f64>() < 0.7,
        }
    }

    /// Pause before acting, for pacing only.
    pub fn thinking_time<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let spread = rng.random::<f64>() * 1500.0;
        let factor = match self.difficulty {
            Difficulty::Easy => 0.5,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.5,
        };
        Duration::from_millis((500.0 + spread * factor) as u64)
    }
}

/// The result of one bot decision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub struct BotDecision {
    pub action: Action,
    /// Decision score after difficulty scaling and noise.
    pub score: f64,
    pub bluffing: bool,
    pub reason: &'static str,
}

/// Snapshot of what a bot may look at when deciding.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub pot: u64,
    pub current_bet: u64,
    pub min_bet: u64,
    pub chips: u64,
    /// The bot's own bet this round.
    pub bet: u64,
    pub seen: bool,
    pub hand: &'a [Card],
}

impl<'a> BotContext<'a> {
    pub fn from_engine(engine: &'a dyn GameEngine, seat: usize) -> Option<Self> {
        let p = engine.player(seat)?;
        Some(Self {
            pot: engine.pot(),
            current_bet: engine.current_bet(),
            min_bet: engine.min_bet(),
            chips: p.chips(),
            bet: p.current_bet(),
            seen: p.has_seen(),
            hand: p.hand(),
        })
    }

    pub fn call_amount(&self) -> u64 {
        self.current_bet.saturating_sub(self.bet)
    }
}

/// Map a hand onto [0, 1]: a fixed base per category plus a small term from
/// the tiebreak part of the score. Anything but three cards is worth 0.
pub fn evaluate_hand_strength(hand: &[Card]) -> f64 {
    let Ok(eval) = evaluate_hand(hand) else {
        return 0.0;
    };
    let base = match eval.category {
        Category::Trail => 0.95,
        Category::PureSequence => 0.85,
        Category::Sequence => 0.70,
        Category::Color => 0.55,
        Category::Pair => 0.35,
        Category::HighCard => 0.15,
    };
    let within = eval.score() - f64::from(eval.rank()) * 100.0;
    (base + within / 1000.0).clamp(0.0, 1.0)
}

/// Normalised pot odds: 1.0 when there is nothing to call.
pub fn calculate_pot_odds(pot: u64, call: u64) -> f64 {
    if call == 0 {
        return 1.0;
    }
    let odds = (pot + call) as f64 / call as f64;
    (odds / 10.0).min(1.0)
}

fn difficulty_multiplier(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.7,
        Difficulty::Medium => 1.0,
        Difficulty::Hard => 1.2,
    }
}

/// A display name and play-style blurb for a bot seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotPersonality {
    pub name: &'static str,
    pub style: &'static str,
}

const EASY_NAMES: [&str; 4] = ["Rookie Ram", "Newbie Neha", "Beginner Bob", "Learner Lisa"];
const MEDIUM_NAMES: [&str; 4] = ["Player Priya", "Steady Sam", "Balanced Ben", "Regular Rita"];
const HARD_NAMES: [&str; 4] = ["Pro Patel", "Expert Emma", "Master Mike", "Ace Aisha"];

pub fn bot_personality<R: Rng + ?Sized>(difficulty: Difficulty, rng: &mut R) -> BotPersonality {
    let (names, style) = match difficulty {
        Difficulty::Easy => (&EASY_NAMES, "Cautious and predictable"),
        Difficulty::Medium => (&MEDIUM_NAMES, "Balanced and strategic"),
        Difficulty::Hard => (&HARD_NAMES, "Aggressive and unpredictable"),
    };
    let name = names.choose(rng).copied().unwrap_or("Bot");
    BotPersonality { name, style }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ctx<'a>(hand: &'a [Card], pot: u64, current_bet: u64, chips: u64) -> BotContext<'a> {
        BotContext { pot, current_bet, min_bet: 10, chips, bet: 0, seen: false, hand }
    }

    #[test]
    fn strength_bases_follow_category_order() {
        let hands = ["4♠ 9♥ 2♦", "7♠ 7♥ 3♦", "K♥ 9♥ 5♥", "5♠ 4♥ 3♦", "K♠ Q♠ J♠", "A♠ A♥ A♦"];
        let strengths: Vec<f64> =
            hands.iter().map(|h| evaluate_hand_strength(&parse_cards(h).unwrap())).collect();
        assert!(strengths.windows(2).all(|w| w[0] < w[1]), "{strengths:?}");
        assert!((strengths[5] - 0.964).abs() < 1e-9);
        assert_eq!(evaluate_hand_strength(&[]), 0.0);
    }

    #[test]
    fn pot_odds_are_capped_and_free_when_nothing_to_call() {
        assert_eq!(calculate_pot_odds(100, 0), 1.0);
        assert!((calculate_pot_odds(40, 10) - 0.5).abs() < 1e-9);
        assert_eq!(calculate_pot_odds(10_000, 10), 1.0);
    }

    #[test]
    fn raise_is_capped_by_stack_and_dropped_below_minimum() {
        let hand = parse_cards("A♠ A♥ A♦").unwrap();
        let bot = BotAi::for_difficulty(Difficulty::Hard);
        let mut rng = StdRng::seed_from_u64(1);

        let rich = ctx(&hand, 1000, 5, 10_000);
        let raise = bot.calculate_raise_amount(&rich, 0.96, &mut rng).unwrap();
        assert!((500..=1000).contains(&raise), "{raise}");

        let short = ctx(&hand, 1000, 5, 100);
        assert_eq!(bot.calculate_raise_amount(&short, 0.96, &mut rng), Some(40));

        let tiny_pot = ctx(&hand, 5, 5, 1000);
        assert_eq!(bot.calculate_raise_amount(&tiny_pot, 0.2, &mut rng), Some(10));

        let broke = ctx(&hand, 1000, 5, 20);
        assert_eq!(bot.calculate_raise_amount(&broke, 0.96, &mut rng), None);
    }

    #[test]
    fn seen_bots_do_not_look_again() {
        let hand = parse_cards("A♠ A♥ A♦").unwrap();
        let mut snapshot = ctx(&hand, 10, 5, 100);
        snapshot.seen = true;
        let mut rng = StdRng::seed_from_u64(3);
        for d in Difficulty::ALL {
            assert!(!BotAi::for_difficulty(d).should_see_cards(&snapshot, &mut rng));
        }
    }

    #[test]
    fn weak_medium_bot_never_peeks() {
        let hand = parse_cards("4♠ 9♥ 2♦").unwrap();
        let snapshot = ctx(&hand, 10, 5, 100);
        let bot = BotAi::for_difficulty(Difficulty::Medium);
        let mut rng = StdRng::seed_from_u64(9);
        assert!((0..100).all(|_| !bot.should_see_cards(&snapshot, &mut rng)));
    }

    #[test]
    fn broke_bot_folds_unless_nothing_to_call() {
        let hand = parse_cards("A♠ A♥ A♦").unwrap();
        let bot = BotAi::for_difficulty(Difficulty::Hard);
        let mut rng = StdRng::seed_from_u64(5);
        let facing = BotContext { chips: 0, ..ctx(&hand, 100, 50, 0) };
        for _ in 0..50 {
            assert_eq!(bot.make_decision(&facing, &mut rng).action, Action::Fold);
        }
    }

    #[test]
    fn thinking_time_ranges_by_difficulty() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let easy = BotAi::for_difficulty(Difficulty::Easy).thinking_time(&mut rng);
            let hard = BotAi::for_difficulty(Difficulty::Hard).thinking_time(&mut rng);
            assert!(easy >= Duration::from_millis(500) && easy <= Duration::from_millis(1250));
            assert!(hard >= Duration::from_millis(500) && hard <= Duration::from_millis(2750));
        }
    }

    #[test]
    fn personalities_match_difficulty() {
        let mut rng = StdRng::seed_from_u64(4);
        let p = bot_personality(Difficulty::Hard, &mut rng);
        assert_eq!(p.style, "Aggressive and unpredictable");
        assert!(HARD_NAMES.contains(&p.name));
    }
}
