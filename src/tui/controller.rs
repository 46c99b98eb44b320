use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Draw, read keys and let bots act until the user quits. Bot turns await
/// their thinking delay, so the table is redrawn first to show who is up.
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.expire_action_error();
            if app.bot_to_act() && !app.help_open() && !app.history_open() {
                app.bot_turn().await;
            }
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn handle_key(app: &mut AppState, code: KeyCode) -> bool {
    if matches!(code, KeyCode::Char('?')) && !app.amount_entry_active() {
        let _ = app.handle_input(InputAction::ToggleHelp);
        return false;
    }
    if matches!(code, KeyCode::Char('h') | KeyCode::Char('H')) && !app.amount_entry_active() {
        let _ = app.handle_input(InputAction::ToggleHistory);
        return false;
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }
    if app.amount_entry_active() {
        let action = match code {
            KeyCode::Esc => Some(InputAction::AmountCancel),
            KeyCode::Enter => Some(InputAction::AmountSubmit),
            KeyCode::Backspace => Some(InputAction::AmountBackspace),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(InputAction::AmountIncStep),
            KeyCode::Char('-') | KeyCode::Char('_') => Some(InputAction::AmountDecStep),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                Some(InputAction::AmountDigit(c as u8 - b'0'))
            }
            _ => None,
        };
        if let Some(action) = action {
            let _ = app.handle_input(action);
        }
        return false;
    }

    let action = match app.scene {
        Scene::Menu => match code {
            KeyCode::Up => Some(InputAction::MenuPrev),
            KeyCode::Down => Some(InputAction::MenuNext),
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                Some(InputAction::MenuInc)
            }
            KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Left => {
                Some(InputAction::MenuDec)
            }
            KeyCode::Enter => Some(InputAction::MenuApply),
            KeyCode::Esc => Some(InputAction::MenuCancel),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMenu),
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            _ => None,
        },
        Scene::Table => match code {
            KeyCode::Char('m') | KeyCode::Char('M') => Some(InputAction::ToggleMenu),
            KeyCode::Char(' ') => Some(InputAction::NewRound),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(InputAction::Fold),
            KeyCode::Char('c') | KeyCode::Char('C') => Some(InputAction::Call),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(InputAction::AmountOpen),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(InputAction::See),
            _ => None,
        },
    };
    if let Some(action) = action {
        let _ = app.handle_input(action);
    }
    false
}
