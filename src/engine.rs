// Game engine API boundary. Bots and front ends drive the table through this
// trait so they never reach into `Game` internals. It is implemented for the
// core `Game` type.

use crate::game::{Action, GameError, GameState};
use crate::player::Player;

pub trait GameEngine {
    // Round lifecycle
    fn start_new_round(&mut self) -> Result<(), GameError>;

    // Acts for whoever is current.
    fn player_action(&mut self, action: Action) -> Result<(), GameError>;

    // Queries
    fn state(&self) -> GameState;
    fn current(&self) -> usize;
    fn pot(&self) -> u64;
    fn current_bet(&self) -> u64;
    fn min_bet(&self) -> u64;
    fn player(&self, seat: usize) -> Option<&Player>;
    fn num_players(&self) -> usize;
}

impl GameEngine for crate::game::Game {
    fn start_new_round(&mut self) -> Result<(), GameError> {
        self.start_new_round()
    }

    fn player_action(&mut self, action: Action) -> Result<(), GameError> {
        self.player_action(action)
    }

    fn state(&self) -> GameState {
        self.state
    }
    fn current(&self) -> usize {
        self.current
    }
    fn pot(&self) -> u64 {
        self.pot
    }
    fn current_bet(&self) -> u64 {
        self.current_bet
    }
    fn min_bet(&self) -> u64 {
        self.min_bet
    }
    fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    fn num_players(&self) -> usize {
        self.players.len()
    }
}
