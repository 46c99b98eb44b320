//! teen-patti: the three-card Indian poker game with rule-based bots.
//!
//! - Cards, a 52-card deck and a three-card hand evaluator
//! - A single-table game engine: blind, betting rotation, showdown
//! - Bots at three difficulty levels, driven through [`engine::GameEngine`]
//! - A terminal front end
//!
//! ## Quick start: rank two hands
//! ```
//! use teen_patti::cards::parse_cards;
//! use teen_patti::evaluator::{compare_hands, evaluate_hand, Category};
//! use std::cmp::Ordering;
//!
//! let trail = parse_cards("7♠ 7♥ 7♦").unwrap();
//! let pure = parse_cards("A♠ K♠ Q♠").unwrap();
//! assert_eq!(evaluate_hand(&trail).unwrap().category, Category::Trail);
//! assert_eq!(compare_hands(&trail, &pure).unwrap(), Ordering::Greater);
//! ```
//!
//! ## Quick start: play a round
//! ```
//! use teen_patti::game::{Action, Game, GameConfig, GameState};
//! use teen_patti::player::Difficulty;
//!
//! let mut game = Game::new(GameConfig { seed: Some(7), ..GameConfig::default() });
//! game.seat("You", false, Difficulty::Medium);
//! game.seat("Bot", true, Difficulty::Hard);
//! game.start_new_round().unwrap();
//! assert_eq!(game.state(), GameState::Betting);
//! game.player_action(Action::Fold).unwrap();
//! assert_eq!(game.state(), GameState::Ended);
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin teen-patti
//! ```

pub mod agents;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod player;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
