use crate::deck::Deck;
use crate::evaluator::{evaluate_hand, Evaluation};
use crate::player::{Difficulty, Player};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Round lifecycle. A round runs Dealing -> Betting -> Showdown -> Ended, or
/// jumps from Betting straight to Ended when everyone else folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameState {
    Waiting,
    Dealing,
    Betting,
    Showdown,
    Ended,
}

/// What the player to act chooses to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Action {
    Fold,
    Call,
    /// Match the current bet and put this many more chips on top.
    Raise(u64),
    /// Look at one's own cards. Does not pass the turn.
    See,
}

impl Action {
    pub fn label(self) -> String {
        match self {
            Action::Fold => "Fold".into(),
            Action::Call => "Call".into(),
            Action::Raise(amount) => format!("Raise {amount}"),
            Action::See => "See".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LogVerb {
    Blind,
    Fold,
    Call,
    Raise,
    See,
    Win,
}

impl LogVerb {
    pub fn label(self) -> &'static str {
        match self {
            LogVerb::Blind => "Blind",
            LogVerb::Fold => "Fold",
            LogVerb::Call => "Call",
            LogVerb::Raise => "Raise",
            LogVerb::See => "See",
            LogVerb::Win => "Win",
        }
    }
}

/// One line of the current round's action log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct LogEntry {
    pub seat: usize,
    pub verb: LogVerb,
    /// Chips actually moved, when any.
    pub amount: Option<u64>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("at least two players with chips are required, found {funded}")]
    InsufficientPlayers { funded: usize },
    #[error("seat {seat} acted out of turn; seat {current} is to act")]
    ActionOutOfTurn { seat: usize, current: usize },
    #[error("action needs the {expected:?} state, game is in {actual:?}")]
    StateMismatch { expected: GameState, actual: GameState },
    #[error("raise too small: min {min}, got {got}")]
    RaiseBelowMinimum { min: u64, got: u64 },
    #[error("no player is seated")]
    NoCurrentPlayer,
}

/// Table stakes and the shuffle seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Forced bet posted by the dealer each round.
    pub blind: u64,
    /// Smallest amount a raise may add on top of the call.
    pub min_bet: u64,
    /// Stack given to players seated with [`Game::seat`].
    pub starting_chips: u64,
    /// Seed for the shuffle RNG; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { blind: 5, min_bet: 10, starting_chips: 1000, seed: None }
    }
}

/// How the last round was won.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct RoundOutcome {
    pub winner: usize,
    pub winner_name: String,
    pub pot: u64,
    /// The winning hand; `None` when everyone else folded.
    pub evaluation: Option<Evaluation>,
}

#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) deck: Deck,
    pub(crate) players: Vec<Player>,
    pub(crate) pot: u64,
    pub(crate) current_bet: u64,
    pub(crate) min_bet: u64,
    pub(crate) blind: u64,
    pub(crate) starting_chips: u64,
    pub(crate) current: usize,
    pub(crate) dealer: usize,
    pub(crate) state: GameState,
    pub(crate) round: u32,
    rng: ChaCha8Rng,
    last_outcome: Option<RoundOutcome>,
    history: Vec<LogEntry>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Self {
            deck: Deck::standard(),
            players: Vec::new(),
            pot: 0,
            current_bet: 0,
            min_bet: config.min_bet,
            blind: config.blind,
            starting_chips: config.starting_chips,
            current: 0,
            dealer: 0,
            state: GameState::Waiting,
            round: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            last_outcome: None,
            history: Vec::new(),
        }
    }

    /// Seat a new player at the end of the table and return the seat index.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        chips: u64,
        is_bot: bool,
        difficulty: Difficulty,
    ) -> usize {
        self.players.push(Player::new(name, chips, is_bot, difficulty));
        self.players.len() - 1
    }

    /// Seat a player with the configured starting stack.
    pub fn seat(&mut self, name: impl Into<String>, is_bot: bool, difficulty: Difficulty) -> usize {
        self.add_player(name, self.starting_chips, is_bot, difficulty)
    }

    pub fn starting_chips(&self) -> u64 {
        self.starting_chips
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn min_bet(&self) -> u64 {
        self.min_bet
    }

    pub fn blind(&self) -> u64 {
        self.blind
    }

    /// Seat index of the player to act.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Rounds started so far, including ones that could not be dealt.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn last_outcome(&self) -> Option<&RoundOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn history(&self) -> &[LogEntry] {
        &self.history
    }

    pub fn history_recent(&self, n: usize) -> &[LogEntry] {
        let start = self.history.len().saturating_sub(n);
        &self.history[start..]
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    /// Players still in the round (not folded).
    pub fn active_players(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| !p.folded).collect()
    }

    /// Chips `seat` must add to match the table's current bet.
    pub fn call_amount(&self, seat: usize) -> u64 {
        self.players.get(seat).map_or(0, |p| self.current_bet.saturating_sub(p.current_bet))
    }

    /// Player with the most chips; the earliest seat wins a tie.
    pub fn chip_leader(&self) -> Option<&Player> {
        self.players.iter().reduce(|best, p| if p.chips > best.chips { p } else { best })
    }

    /// Evaluate the hand held at `seat`, if it has three cards.
    pub fn evaluate_seat(&self, seat: usize) -> Option<Evaluation> {
        self.players.get(seat).and_then(|p| evaluate_hand(&p.hand).ok())
    }

    /// Start a round: shuffle, drop busted players, rotate the dealer, post the
    /// blind and deal three cards to everyone.
    ///
    /// With fewer than two funded players left the game moves to
    /// [`GameState::Ended`] and reports [`GameError::InsufficientPlayers`].
    pub fn start_new_round(&mut self) -> Result<(), GameError> {
        self.deck.reset();
        self.deck.shuffle_with(&mut self.rng);
        self.pot = 0;
        self.current_bet = self.blind;
        self.round += 1;
        self.history.clear();
        self.last_outcome = None;

        for p in &mut self.players {
            p.reset();
        }
        let seated = self.players.len();
        self.players.retain(|p| p.chips > 0);
        if self.players.len() < seated {
            log::info!("{} busted player(s) left the table", seated - self.players.len());
        }

        let n = self.players.len();
        if n < 2 {
            self.state = GameState::Ended;
            log::info!("round {}: not enough funded players ({n})", self.round);
            return Err(GameError::InsufficientPlayers { funded: n });
        }

        self.dealer = (self.dealer + 1) % n;
        self.current = (self.dealer + 1) % n;

        let paid = self.players[self.dealer].bet(self.blind);
        self.pot += paid;
        self.record(self.dealer, LogVerb::Blind, Some(paid));

        self.state = GameState::Dealing;
        // One card per player per pass, three passes.
        for _ in 0..3 {
            for p in &mut self.players {
                if let Some(card) = self.deck.deal() {
                    p.hand.push(card);
                }
            }
        }

        self.state = GameState::Betting;
        log::info!(
            "round {}: dealer {} posts {paid}, {} to act",
            self.round,
            self.players[self.dealer].name,
            self.players[self.current].name
        );
        Ok(())
    }

    /// Apply `action` for `seat`, rejecting it unless that seat is to act.
    pub fn act_for(&mut self, seat: usize, action: Action) -> Result<(), GameError> {
        self.ensure_betting()?;
        if seat != self.current {
            return Err(GameError::ActionOutOfTurn { seat, current: self.current });
        }
        self.player_action(action)
    }

    /// Apply `action` for the player to act.
    pub fn player_action(&mut self, action: Action) -> Result<(), GameError> {
        self.ensure_betting()?;
        let seat = self.current;
        if seat >= self.players.len() {
            return Err(GameError::NoCurrentPlayer);
        }
        let owed = self.call_amount(seat);

        match action {
            Action::Fold => {
                self.players[seat].fold();
                self.record(seat, LogVerb::Fold, None);
            }
            Action::Call => {
                let paid = self.players[seat].bet(owed);
                self.pot += paid;
                self.record(seat, LogVerb::Call, Some(paid));
            }
            Action::Raise(amount) => {
                if amount < self.min_bet {
                    return Err(GameError::RaiseBelowMinimum { min: self.min_bet, got: amount });
                }
                let p = &mut self.players[seat];
                let paid = p.bet(owed.saturating_add(amount));
                // A short all-in raise never lowers the bet others must match.
                self.current_bet = self.current_bet.max(p.current_bet);
                self.pot += paid;
                self.record(seat, LogVerb::Raise, Some(paid));
            }
            Action::See => {
                self.players[seat].see_cards();
                self.record(seat, LogVerb::See, None);
                log::debug!("{} looks at their cards", self.players[seat].name);
                return Ok(());
            }
        }

        log::debug!("{}: {} (pot {})", self.players[seat].name, action.label(), self.pot);
        self.next_player();
        Ok(())
    }

    fn ensure_betting(&self) -> Result<(), GameError> {
        if self.state != GameState::Betting {
            return Err(GameError::StateMismatch {
                expected: GameState::Betting,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Whether `seat` still has a decision to make this round.
    fn can_act(&self, seat: usize) -> bool {
        let p = &self.players[seat];
        !p.folded && !p.all_in
    }

    fn next_player(&mut self) {
        let n = self.players.len();
        if n == 0 {
            return;
        }
        // At most one lap; if nobody can act the completion check below ends the round.
        for _ in 0..n {
            self.current = (self.current + 1) % n;
            if self.can_act(self.current) {
                break;
            }
        }

        let active: Vec<usize> = (0..n).filter(|&i| !self.players[i].folded).collect();
        match active.as_slice() {
            [] => {
                self.state = GameState::Ended;
                return;
            }
            [only] => {
                self.declare_winner(*only, None);
                return;
            }
            _ => {}
        }

        let all_matched = active.iter().all(|&i| {
            let p = &self.players[i];
            p.current_bet == self.current_bet || p.all_in
        });
        let all_acted = active.iter().all(|&i| {
            let p = &self.players[i];
            p.current_bet > 0 || p.all_in
        });
        if all_matched && all_acted {
            self.showdown();
        }
    }

    /// Compare every remaining hand and pay the pot to the best one. On equal
    /// hands the earliest seat in table order takes the whole pot.
    fn showdown(&mut self) {
        self.state = GameState::Showdown;
        let active: Vec<usize> = (0..self.players.len()).filter(|&i| !self.players[i].folded).collect();
        if let [only] = active.as_slice() {
            self.declare_winner(*only, None);
            return;
        }

        let mut best: Option<(usize, Evaluation)> = None;
        for seat in active {
            match evaluate_hand(&self.players[seat].hand) {
                Ok(eval) => {
                    log::debug!(
                        "{} shows {} ({:.2})",
                        self.players[seat].name,
                        eval.name(),
                        eval.score()
                    );
                    if best.as_ref().map_or(true, |(_, b)| eval > *b) {
                        best = Some((seat, eval));
                    }
                }
                Err(err) => log::warn!("skipping seat {seat} at showdown: {err}"),
            }
        }

        match best {
            Some((seat, eval)) => self.declare_winner(seat, Some(eval)),
            None => self.state = GameState::Ended,
        }
    }

    fn declare_winner(&mut self, seat: usize, evaluation: Option<Evaluation>) {
        let pot = self.pot;
        self.players[seat].award(pot);
        self.record(seat, LogVerb::Win, Some(pot));
        let winner_name = self.players[seat].name.clone();
        match &evaluation {
            Some(eval) => log::info!("round {}: {winner_name} wins {pot} with {}", self.round, eval.name()),
            None => log::info!("round {}: {winner_name} wins {pot}, everyone else folded", self.round),
        }
        self.last_outcome = Some(RoundOutcome { winner: seat, winner_name, pot, evaluation });
        self.state = GameState::Ended;
    }

    fn record(&mut self, seat: usize, verb: LogVerb, amount: Option<u64>) {
        self.history.push(LogEntry { seat, verb, amount });
    }
}
