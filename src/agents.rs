//! Agents: rule-based bots that act for seats at the table.
//!
//! `BotManager` keeps one [`BotAi`] per bot player, keyed by name, and drives
//! a bot's turn through the [`GameEngine`] boundary. It lives in the library
//! so front ends stay thin and never implement bot coordination themselves.

use crate::engine::GameEngine;
use crate::game::{Action, GameError, GameState};
use crate::player::Player;
use core::fmt;
use rand::{rngs::StdRng, RngCore, SeedableRng};
use std::collections::HashMap;
use std::time::Duration;

mod bots;

pub use bots::{
    bot_personality, calculate_pot_odds, evaluate_hand_strength, BotAi, BotContext, BotDecision,
    BotPersonality,
};

/// Pause after a bot looks at its cards, before it bets.
const SEE_PAUSE: Duration = Duration::from_millis(300);

/// Registry of bot brains plus the RNG they all draw from.
pub struct BotManager {
    bots: HashMap<String, BotAi>,
    rng: StdRng,
    delay_scale: f64,
}

impl fmt::Debug for BotManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.bots.keys().map(String::as_str).collect();
        names.sort_unstable();
        write!(f, "BotManager([{}], delay x{})", names.join(", "), self.delay_scale)
    }
}

impl Default for BotManager {
    fn default() -> Self {
        Self::new()
    }
}

impl BotManager {
    /// A manager with an entropy-seeded RNG and real-time pacing.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        Self { bots: HashMap::new(), rng: StdRng::from_seed(seed), delay_scale: 1.0 }
    }

    /// Deterministic decisions for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self { bots: HashMap::new(), rng: StdRng::seed_from_u64(seed), delay_scale: 1.0 }
    }

    /// Multiply every bot pause by `scale`; 0 disables pauses entirely.
    pub fn set_delay_scale(&mut self, scale: f64) {
        self.delay_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
    }

    pub fn delay_scale(&self) -> f64 {
        self.delay_scale
    }

    /// Register a bot for `player` at its own difficulty. Humans are ignored
    /// and `false` is returned.
    pub fn register_bot(&mut self, player: &Player) -> bool {
        if !player.is_bot() {
            return false;
        }
        let ai = BotAi::for_difficulty(player.difficulty());
        if self.bots.insert(player.name().to_string(), ai).is_some() {
            log::warn!("bot '{}' re-registered; previous brain replaced", player.name());
        } else {
            log::debug!("registered bot '{}' ({})", player.name(), player.difficulty());
        }
        true
    }

    pub fn bot(&self, name: &str) -> Option<&BotAi> {
        self.bots.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.bots.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// Forget every registered bot.
    pub fn clear(&mut self) {
        self.bots.clear();
    }

    /// Play one turn for the bot at `seat`.
    ///
    /// Waits the bot's thinking time, optionally looks at its cards, then
    /// decides and applies an action. Returns `Ok(None)` without touching the
    /// game when the seat holds no registered bot, it is not that seat's turn,
    /// or betting is not open.
    pub async fn execute_bot_turn(
        &mut self,
        engine: &mut dyn GameEngine,
        seat: usize,
    ) -> Result<Option<BotDecision>, GameError> {
        let Some(ai) = self.ready_bot(engine, seat) else {
            return Ok(None);
        };

        let think = ai.thinking_time(&mut self.rng);
        self.pause(think).await;

        let see = match BotContext::from_engine(engine, seat) {
            Some(ctx) => ai.should_see_cards(&ctx, &mut self.rng),
            None => return Ok(None),
        };
        if see {
            engine.player_action(Action::See)?;
            self.pause(SEE_PAUSE).await;
        }

        let Some(ctx) = BotContext::from_engine(engine, seat) else {
            return Ok(None);
        };
        let decision = ai.make_decision(&ctx, &mut self.rng);
        if let Some(p) = engine.player(seat) {
            log::info!(
                "{} ({}): {} [{} score {:.2}]",
                p.name(),
                ai.difficulty,
                decision.action.label(),
                decision.reason,
                decision.score
            );
        }
        engine.player_action(decision.action)?;
        Ok(Some(decision))
    }

    fn ready_bot(&self, engine: &dyn GameEngine, seat: usize) -> Option<BotAi> {
        if engine.state() != GameState::Betting || engine.current() != seat {
            return None;
        }
        let player = engine.player(seat)?;
        if !player.is_bot() {
            return None;
        }
        self.bots.get(player.name()).copied()
    }

    async fn pause(&self, base: Duration) {
        let scaled = base.mul_f64(self.delay_scale);
        if !scaled.is_zero() {
            tokio::time::sleep(scaled).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, GameConfig};
    use crate::player::Difficulty;

    fn table() -> Game {
        let mut g = Game::new(GameConfig { seed: Some(21), ..GameConfig::default() });
        g.add_player("You", 1000, false, Difficulty::Medium);
        g.add_player("Bot 1", 1000, true, Difficulty::Hard);
        g.add_player("Bot 2", 1000, true, Difficulty::Easy);
        g
    }

    #[test]
    fn only_bots_register() {
        let g = table();
        let mut mgr = BotManager::with_seed(1);
        assert!(!mgr.register_bot(&g.players[0]));
        assert!(mgr.register_bot(&g.players[1]));
        assert!(mgr.register_bot(&g.players[2]));
        assert_eq!(mgr.len(), 2);
        assert_eq!(mgr.bot("Bot 1").map(|b| b.difficulty), Some(Difficulty::Hard));
        mgr.clear();
        assert!(mgr.is_empty());
    }

    #[test]
    fn delay_scale_is_sanitised() {
        let mut mgr = BotManager::with_seed(1);
        mgr.set_delay_scale(-2.0);
        assert_eq!(mgr.delay_scale(), 0.0);
        mgr.set_delay_scale(f64::NAN);
        assert_eq!(mgr.delay_scale(), 1.0);
    }

    #[tokio::test]
    async fn bot_turn_is_noop_off_turn_or_outside_betting() {
        let mut g = table();
        let mut mgr = BotManager::with_seed(2);
        mgr.set_delay_scale(0.0);
        for p in g.players.clone() {
            mgr.register_bot(&p);
        }
        assert_eq!(mgr.execute_bot_turn(&mut g, 1).await.unwrap(), None);

        g.start_new_round().unwrap();
        let off_turn = (g.current + 1) % g.players.len();
        let before = g.pot;
        assert_eq!(mgr.execute_bot_turn(&mut g, off_turn).await.unwrap(), None);
        assert_eq!(g.pot, before);
    }

    #[tokio::test]
    async fn bot_turn_applies_a_decision() {
        let mut g = table();
        let mut mgr = BotManager::with_seed(3);
        mgr.set_delay_scale(0.0);
        for p in g.players.clone() {
            mgr.register_bot(&p);
        }
        g.start_new_round().unwrap();
        let seat = (0..g.players.len())
            .find(|&s| g.players[s].is_bot())
            .unwrap();
        // Hand the turn to a bot regardless of where the dealer landed.
        g.current = seat;
        let decision = mgr.execute_bot_turn(&mut g, seat).await.unwrap().unwrap();
        assert!(g.history().len() >= 2, "blind plus the bot's action");
        match decision.action {
            Action::Fold => assert!(g.players[seat].is_folded()),
            Action::Call | Action::Raise(_) => assert!(g.players[seat].current_bet() > 0),
            Action::See => panic!("See is never the final decision"),
        }
    }
}
