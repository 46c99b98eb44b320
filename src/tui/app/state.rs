use crate::agents::BotManager;
use crate::game::{Action, Game, GameError, GameState};
use crate::player::Difficulty;
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Scene {
    Menu,
    Table,
}

/// High-level input actions for the TUI controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputAction {
    MenuNext,
    MenuPrev,
    MenuInc,
    MenuDec,
    MenuApply,
    MenuCancel,
    ToggleMenu,
    ToggleHelp,
    ToggleHistory,
    HistoryUp,
    HistoryDown,
    NewRound,
    Fold,
    Call,
    See,
    AmountOpen,
    AmountDigit(u8),
    AmountBackspace,
    AmountIncStep,
    AmountDecStep,
    AmountSubmit,
    AmountCancel,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct AppState {
    pub scene: Scene,
    pub game: Game,
    pub bots: BotManager,
    // Menu config being edited
    pub menu_index: usize,
    pub cfg_num_bots: usize,
    pub cfg_starting_chips: u64,
    pub cfg_blind: u64,
    pub cfg_min_bet: u64,
    pub cfg_difficulty: Difficulty,
    pub cfg_delay_pct: u32,
    // Applied config
    pub difficulty: Difficulty,
    pub delay_pct: u32,
    pub round_started: bool,
    pub(crate) styles: HashMap<String, &'static str>,
    help_open: bool,
    history_open: bool,
    history_offset: usize,
    amount_entry: Option<String>,
    amount_entry_error: Option<String>,
    action_error: Option<String>,
    action_error_at: Option<Instant>,
    last_bot_action: Option<String>,
    pub(crate) game_over: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            scene: Scene::Menu,
            game: Game::default(),
            bots: BotManager::new(),
            menu_index: 0,
            cfg_num_bots: 3,
            cfg_starting_chips: 1000,
            cfg_blind: 5,
            cfg_min_bet: 10,
            cfg_difficulty: Difficulty::Medium,
            cfg_delay_pct: 100,
            difficulty: Difficulty::Medium,
            delay_pct: 100,
            round_started: false,
            styles: HashMap::new(),
            help_open: false,
            history_open: false,
            history_offset: 0,
            amount_entry: None,
            amount_entry_error: None,
            action_error: None,
            action_error_at: None,
            last_bot_action: None,
            game_over: None,
        }
    }
}

impl AppState {
    pub const HISTORY_PAGE_SIZE: usize = 20;
    const ACTION_ERROR_TTL: Duration = Duration::from_secs(3);

    /// Seat of the human player, if they are still at the table.
    pub fn human_seat(&self) -> Option<usize> {
        self.game.players().iter().position(|p| !p.is_bot())
    }

    /// Whether the human may act right now.
    pub fn can_act(&self) -> bool {
        self.scene == Scene::Table
            && self.round_started
            && self.game.state() == GameState::Betting
            && self.human_seat() == Some(self.game.current())
    }

    /// Whether a bot holds the turn in an open betting round.
    pub fn bot_to_act(&self) -> bool {
        self.scene == Scene::Table
            && self.round_started
            && self.game.state() == GameState::Betting
            && self.game.current_player().is_some_and(|p| p.is_bot())
    }

    /// All hands are face up once the round is over.
    pub fn reveal_all(&self) -> bool {
        self.round_started && matches!(self.game.state(), GameState::Showdown | GameState::Ended)
    }

    pub fn bot_style(&self, name: &str) -> Option<&'static str> {
        self.styles.get(name).copied()
    }

    pub fn last_bot_action(&self) -> Option<&str> {
        self.last_bot_action.as_deref()
    }

    pub fn game_over(&self) -> Option<&str> {
        self.game_over.as_deref()
    }

    pub fn amount_entry_active(&self) -> bool {
        self.amount_entry.is_some()
    }

    pub fn amount_entry_text(&self) -> Option<&str> {
        self.amount_entry.as_deref()
    }

    pub fn amount_entry_error(&self) -> Option<&str> {
        self.amount_entry_error.as_deref()
    }

    pub fn action_error(&self) -> Option<&str> {
        self.action_error.as_deref()
    }

    fn set_action_error(&mut self, err: GameError) {
        log::warn!("action rejected: {err}");
        self.action_error = Some(err.to_string());
        self.action_error_at = Some(Instant::now());
    }

    fn clear_action_error(&mut self) {
        self.action_error = None;
        self.action_error_at = None;
    }

    /// Drop a stale error message; called on every tick.
    pub fn expire_action_error(&mut self) {
        if self.action_error_at.is_some_and(|at| at.elapsed() >= Self::ACTION_ERROR_TTL) {
            self.clear_action_error();
        }
    }

    pub fn help_open(&self) -> bool {
        self.help_open
    }

    pub fn history_open(&self) -> bool {
        self.history_open
    }

    pub fn history_offset(&self) -> usize {
        self.history_offset
    }

    pub(crate) fn close_help(&mut self) {
        self.help_open = false;
    }

    pub(crate) fn close_history(&mut self) {
        self.history_open = false;
    }

    pub(crate) fn reset_round_view(&mut self) {
        self.round_started = false;
        self.history_offset = 0;
        self.last_bot_action = None;
        self.amount_entry_cancel();
        self.clear_action_error();
    }

    fn apply_action(&mut self, action: Action) -> bool {
        let Some(seat) = self.human_seat() else {
            return false;
        };
        if !self.can_act() {
            return false;
        }
        match self.game.act_for(seat, action) {
            Ok(()) => {
                self.clear_action_error();
                true
            }
            Err(err) => {
                self.set_action_error(err);
                false
            }
        }
    }

    fn open_amount_entry(&mut self) -> bool {
        if !self.can_act() {
            return false;
        }
        self.amount_entry = Some(self.game.min_bet().to_string());
        self.amount_entry_error = None;
        true
    }

    fn amount_entry_backspace(&mut self) {
        if let Some(buf) = self.amount_entry.as_mut() {
            buf.pop();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_push_digit(&mut self, digit: u8) {
        if let Some(buf) = self.amount_entry.as_mut() {
            if buf.len() >= 12 {
                return;
            }
            buf.push(char::from(b'0' + digit));
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_adjust(&mut self, steps: i64) {
        if let Some(buf) = self.amount_entry.as_mut() {
            let cur = buf.parse::<i64>().unwrap_or(0);
            let step = self.game.min_bet().max(1) as i64;
            *buf = (cur + steps * step).max(0).to_string();
        }
        self.amount_entry_error = None;
    }

    fn amount_entry_submit(&mut self) -> bool {
        let Some(buf) = self.amount_entry.as_ref() else {
            return false;
        };
        let Ok(amount) = buf.parse::<u64>() else {
            self.amount_entry_error = Some("Invalid amount".to_string());
            return false;
        };
        let min = self.game.min_bet();
        if amount < min {
            self.amount_entry_error = Some(format!("Minimum raise is {min}"));
            return false;
        }
        if self.apply_action(Action::Raise(amount)) {
            self.amount_entry_cancel();
            return true;
        }
        self.amount_entry_error = Some("Action not allowed".to_string());
        false
    }

    fn amount_entry_cancel(&mut self) {
        self.amount_entry = None;
        self.amount_entry_error = None;
    }

    pub fn handle_input(&mut self, action: InputAction) -> bool {
        match action {
            InputAction::ToggleMenu => {
                self.toggle_menu();
                false
            }
            InputAction::ToggleHelp => {
                if self.scene == Scene::Table {
                    self.history_open = false;
                    self.help_open = !self.help_open;
                }
                false
            }
            InputAction::ToggleHistory => {
                if self.scene == Scene::Table {
                    self.help_open = false;
                    if !self.history_open {
                        self.history_offset = 0;
                    }
                    self.history_open = !self.history_open;
                }
                false
            }
            InputAction::HistoryUp => {
                if self.scene == Scene::Table && self.history_open {
                    let max_offset =
                        self.game.history().len().saturating_sub(Self::HISTORY_PAGE_SIZE);
                    self.history_offset = (self.history_offset + 1).min(max_offset);
                }
                false
            }
            InputAction::HistoryDown => {
                if self.scene == Scene::Table && self.history_open && self.history_offset > 0 {
                    self.history_offset -= 1;
                }
                false
            }
            InputAction::MenuNext => {
                if self.scene == Scene::Menu {
                    self.menu_next();
                }
                false
            }
            InputAction::MenuPrev => {
                if self.scene == Scene::Menu {
                    self.menu_prev();
                }
                false
            }
            InputAction::MenuInc => {
                if self.scene == Scene::Menu {
                    self.menu_inc();
                }
                false
            }
            InputAction::MenuDec => {
                if self.scene == Scene::Menu {
                    self.menu_dec();
                }
                false
            }
            InputAction::MenuApply => {
                if self.scene == Scene::Menu {
                    self.apply_menu();
                }
                false
            }
            InputAction::MenuCancel => {
                if self.scene == Scene::Menu {
                    self.cancel_menu();
                }
                false
            }
            InputAction::NewRound => self.scene == Scene::Table && self.new_round(),
            InputAction::Fold => self.apply_action(Action::Fold),
            InputAction::Call => self.apply_action(Action::Call),
            InputAction::See => {
                let seen = self
                    .human_seat()
                    .and_then(|s| self.game.player(s))
                    .is_some_and(|p| p.has_seen());
                !seen && self.apply_action(Action::See)
            }
            InputAction::AmountOpen => self.open_amount_entry(),
            InputAction::AmountDigit(d) => {
                self.amount_entry_push_digit(d);
                false
            }
            InputAction::AmountBackspace => {
                self.amount_entry_backspace();
                false
            }
            InputAction::AmountIncStep => {
                self.amount_entry_adjust(1);
                false
            }
            InputAction::AmountDecStep => {
                self.amount_entry_adjust(-1);
                false
            }
            InputAction::AmountSubmit => self.amount_entry_submit(),
            InputAction::AmountCancel => {
                self.amount_entry_cancel();
                false
            }
        }
    }

    /// Deal the next round unless one is still being bet. When too few
    /// players have chips the game is over: the chip leader is announced and
    /// the menu reopens.
    pub fn new_round(&mut self) -> bool {
        if self.game.players().is_empty() {
            return false;
        }
        if self.round_started && self.game.state() == GameState::Betting {
            return false;
        }
        self.reset_round_view();
        match self.game.start_new_round() {
            Ok(()) => {
                self.round_started = true;
                true
            }
            Err(GameError::InsufficientPlayers { .. }) => {
                let msg = match self.game.chip_leader() {
                    Some(p) => format!("Game over! {} wins with {} chips!", p.name(), p.chips()),
                    None => "Game over!".to_string(),
                };
                log::info!("{msg}");
                self.open_menu();
                self.game_over = Some(msg);
                false
            }
            Err(err) => {
                self.set_action_error(err);
                false
            }
        }
    }

    /// Let the bot holding the turn act. Returns whether it did.
    pub async fn bot_turn(&mut self) -> bool {
        if !self.bot_to_act() {
            return false;
        }
        let seat = self.game.current();
        let name = self.game.player(seat).map(|p| p.name().to_string()).unwrap_or_default();
        match self.bots.execute_bot_turn(&mut self.game, seat).await {
            Ok(Some(decision)) => {
                self.last_bot_action = Some(format!("{name}: {}", decision.action.label()));
                true
            }
            Ok(None) => false,
            Err(err) => {
                self.set_action_error(err);
                false
            }
        }
    }
}
