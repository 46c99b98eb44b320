use crate::agents::{bot_personality, BotManager};
use crate::game::{Game, GameConfig};

use super::{AppState, Scene};

#[derive(Debug, Clone, Copy)]
enum MenuItem {
    Bots,
    StartingChips,
    Blind,
    MinBet,
    BotDifficulty,
    BotDelay,
}

const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::Bots,
    MenuItem::StartingChips,
    MenuItem::Blind,
    MenuItem::MinBet,
    MenuItem::BotDifficulty,
    MenuItem::BotDelay,
];

const MAX_BOTS: usize = 5;
const MAX_DELAY_PCT: u32 = 300;

impl MenuItem {
    fn display(self, app: &AppState) -> String {
        match self {
            MenuItem::Bots => format!("Bots: {}", app.cfg_num_bots),
            MenuItem::StartingChips => format!("Starting Chips: {}", app.cfg_starting_chips),
            MenuItem::Blind => format!("Blind: {}", app.cfg_blind),
            MenuItem::MinBet => format!("Min Bet: {}", app.cfg_min_bet),
            MenuItem::BotDifficulty => format!("Bot Difficulty: {}", app.cfg_difficulty),
            MenuItem::BotDelay => match app.cfg_delay_pct {
                0 => "Bot Delay: off".to_string(),
                pct => format!("Bot Delay: {pct}%"),
            },
        }
    }

    fn inc(self, app: &mut AppState) {
        match self {
            MenuItem::Bots => {
                if app.cfg_num_bots < MAX_BOTS {
                    app.cfg_num_bots += 1;
                }
            }
            MenuItem::StartingChips => {
                app.cfg_starting_chips = app.cfg_starting_chips.saturating_add(100);
            }
            MenuItem::Blind => {
                app.cfg_blind = app.cfg_blind.saturating_add(1);
            }
            MenuItem::MinBet => {
                app.cfg_min_bet = app.cfg_min_bet.saturating_add(5);
            }
            MenuItem::BotDifficulty => app.cfg_difficulty = app.cfg_difficulty.next(),
            MenuItem::BotDelay => {
                app.cfg_delay_pct = (app.cfg_delay_pct + 25).min(MAX_DELAY_PCT);
            }
        }
    }

    fn dec(self, app: &mut AppState) {
        match self {
            MenuItem::Bots => {
                if app.cfg_num_bots > 1 {
                    app.cfg_num_bots -= 1;
                }
            }
            MenuItem::StartingChips => {
                app.cfg_starting_chips = app.cfg_starting_chips.saturating_sub(100).max(100);
            }
            MenuItem::Blind => {
                if app.cfg_blind > 1 {
                    app.cfg_blind -= 1;
                }
            }
            MenuItem::MinBet => {
                app.cfg_min_bet = app.cfg_min_bet.saturating_sub(5).max(1);
            }
            MenuItem::BotDifficulty => app.cfg_difficulty = app.cfg_difficulty.prev(),
            MenuItem::BotDelay => {
                app.cfg_delay_pct = app.cfg_delay_pct.saturating_sub(25);
            }
        }
    }
}

impl AppState {
    pub fn menu_items_display(&self) -> Vec<String> {
        MENU_ITEMS.iter().map(|item| item.display(self)).collect()
    }

    pub fn toggle_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.scene = match self.scene {
            Scene::Menu if !self.game.players().is_empty() => Scene::Table,
            Scene::Menu => Scene::Menu,
            _ => {
                self.open_menu();
                Scene::Menu
            }
        };
    }

    // --- Menu operations ---
    pub fn open_menu(&mut self) {
        self.close_help();
        self.close_history();
        self.menu_index = 0;
        let bots = self.game.players().iter().filter(|p| p.is_bot()).count();
        if bots > 0 {
            self.cfg_num_bots = bots.min(MAX_BOTS);
        }
        self.cfg_starting_chips = self.game.starting_chips();
        self.cfg_blind = self.game.blind();
        self.cfg_min_bet = self.game.min_bet();
        self.cfg_difficulty = self.difficulty;
        self.cfg_delay_pct = self.delay_pct;
        self.scene = Scene::Menu;
    }

    /// Build a fresh table from the menu settings: the human in seat 0 and
    /// the configured number of bots after them.
    pub fn apply_menu(&mut self) {
        self.cfg_num_bots = self.cfg_num_bots.clamp(1, MAX_BOTS);
        self.cfg_blind = self.cfg_blind.max(1);
        self.cfg_min_bet = self.cfg_min_bet.max(1);
        self.cfg_starting_chips = self.cfg_starting_chips.max(self.cfg_blind);

        self.difficulty = self.cfg_difficulty;
        self.delay_pct = self.cfg_delay_pct;
        self.game = Game::new(GameConfig {
            blind: self.cfg_blind,
            min_bet: self.cfg_min_bet,
            starting_chips: self.cfg_starting_chips,
            seed: None,
        });
        self.bots = BotManager::new();
        self.bots.set_delay_scale(f64::from(self.delay_pct) / 100.0);
        self.styles.clear();

        self.game.seat("You", false, self.difficulty);
        let mut rng = rand::rng();
        for _ in 0..self.cfg_num_bots {
            let persona = bot_personality(self.difficulty, &mut rng);
            let mut name = persona.name.to_string();
            if self.game.players().iter().any(|p| p.name() == name) {
                name = format!("{name} ({})", self.game.players().len() + 1);
            }
            let seat = self.game.seat(name.clone(), true, self.difficulty);
            if let Some(p) = self.game.player(seat) {
                self.bots.register_bot(p);
            }
            self.styles.insert(name, persona.style);
        }
        log::info!(
            "table ready: {} bots ({}), {} chips, blind {}, min bet {}",
            self.cfg_num_bots,
            self.difficulty,
            self.cfg_starting_chips,
            self.cfg_blind,
            self.cfg_min_bet
        );

        self.reset_round_view();
        self.game_over = None;
        self.scene = Scene::Table;
    }

    pub fn cancel_menu(&mut self) {
        if !self.game.players().is_empty() {
            self.scene = Scene::Table;
        }
    }

    pub fn menu_next(&mut self) {
        self.menu_index = (self.menu_index + 1) % MENU_ITEMS.len();
    }
    pub fn menu_prev(&mut self) {
        self.menu_index = (self.menu_index + MENU_ITEMS.len() - 1) % MENU_ITEMS.len();
    }
    pub fn menu_inc(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.inc(self);
    }
    pub fn menu_dec(&mut self) {
        let item = MENU_ITEMS[self.menu_index % MENU_ITEMS.len()];
        item.dec(self);
    }
}
