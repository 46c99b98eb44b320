use crate::cards::Card;
use crate::game::{Game, GameState};
use crate::player::Player;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Min(8),    // seats
            Constraint::Length(5), // status bar
        ])
        .split(size);

    draw_header(f, chunks[0], &app.game);
    draw_seats(f, chunks[1], app);
    draw_status(f, chunks[2], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.amount_entry_active() {
        draw_amount_entry(f, app);
    }
}

fn draw_header(f: &mut Frame, area: Rect, game: &Game) {
    let dealer = game.player(game.dealer()).map(|p| p.name()).unwrap_or("-");
    let leader = game
        .chip_leader()
        .map(|p| format!("{} ({})", p.name(), p.chips()))
        .unwrap_or_else(|| "-".to_string());
    let lines = vec![
        Line::from(format!(
            "Round {}   Pot: {}   Current bet: {}   Min raise: {}",
            game.round(),
            game.pot(),
            game.current_bet(),
            game.min_bet()
        )),
        Line::from(format!("Dealer: {dealer}   Blind: {}   Chip leader: {leader}", game.blind())),
    ];
    let header =
        Paragraph::new(lines).block(Block::default().title("Teen Patti").borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_seats(f: &mut Frame, area: Rect, app: &AppState) {
    let total = app.game.players().len();
    if total == 0 {
        return;
    }
    // Two rows: first half left to right on top, the rest right to left below.
    let top = total.div_ceil(2);
    let bottom = total - top;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (r, count) in [(0usize, top), (1, bottom)] {
        if count == 0 {
            continue;
        }
        let cols = columns(rows[r], count as u16);
        for c in 0..count {
            let idx = if r == 0 { c } else { total - 1 - c };
            if let Some(p) = app.game.players().get(idx) {
                draw_seat(f, cols[c], app, idx, p);
            }
        }
    }
}

fn draw_seat(f: &mut Frame, area: Rect, app: &AppState, idx: usize, p: &Player) {
    let game = &app.game;
    let betting = app.round_started && game.state() == GameState::Betting;
    let mut title = p.name().to_string();
    if idx == game.dealer() && app.round_started {
        title.push_str(" [D]");
    }
    if p.is_bot() {
        title.push_str(&format!(" [BOT:{}]", p.difficulty()));
    }
    if betting && idx == game.current() {
        title.push_str(" [Act]");
    }

    let status = if p.is_folded() {
        "Folded"
    } else if p.is_all_in() {
        "All-in"
    } else if p.has_seen() {
        "Seen"
    } else {
        "Blind"
    };
    let mut lines = vec![
        Line::from(format!("Chips: {}", p.chips())),
        Line::from(format!("Bet: {}", p.current_bet())),
        Line::from(format!("Status: {status}")),
    ];
    if let Some(style) = app.bot_style(p.name()) {
        lines.push(Line::from(Span::styled(style, Style::default().add_modifier(Modifier::DIM))));
    }

    let face_up = app.reveal_all() || (!p.is_bot() && p.has_seen());
    if face_up && !p.is_folded() {
        if let Some(eval) = game.evaluate_seat(idx) {
            lines.push(Line::from(Span::styled(
                eval.name(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
        }
    }

    let winner = app.reveal_all() && game.last_outcome().is_some_and(|o| o.winner == idx);
    let border = if winner {
        Some(Color::Green)
    } else if p.is_folded() {
        Some(Color::DarkGray)
    } else if betting && idx == game.current() {
        Some(Color::Yellow)
    } else if !p.is_bot() {
        Some(Color::Cyan)
    } else {
        None
    };
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    f.render_widget(block, area);

    let seat_inner = inner(area);
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(seat_inner);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), split[0]);

    if p.hand().is_empty() {
        return;
    }
    let slots = columns(split[1], p.hand().len() as u16);
    for (i, card) in p.hand().iter().enumerate() {
        render_card(f, slots[i], face_up.then_some(*card));
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &AppState) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));
    let game = &app.game;

    let mut left: Vec<Line> = Vec::new();
    if !app.round_started {
        left.push(Line::from("Press Space to deal."));
    } else if matches!(game.state(), GameState::Showdown | GameState::Ended) {
        left.push(Line::from(result_line(game)));
        left.push(Line::from("Press Space for the next round."));
    } else if app.can_act() {
        let seat = game.current();
        left.push(Line::from(format!("Your turn. To call: {}", game.call_amount(seat))));
        let seen = game.player(seat).is_some_and(|p| p.has_seen());
        let dim = |off: bool| {
            if off {
                Style::default().add_modifier(Modifier::DIM)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            }
        };
        left.push(Line::from(vec![
            Span::styled("F fold", dim(false)),
            Span::raw(" • "),
            Span::styled("C call", dim(false)),
            Span::raw(" • "),
            Span::styled("R raise", dim(false)),
            Span::raw(" • "),
            Span::styled("S see cards", dim(seen)),
        ]));
    } else if let Some(p) = game.current_player() {
        left.push(Line::from(format!("{} is thinking...", p.name())));
    }
    if let Some(last) = app.last_bot_action() {
        left.push(Line::from(Span::styled(
            format!("Last: {last}"),
            Style::default().add_modifier(Modifier::DIM),
        )));
    }
    if let Some(err) = app.action_error() {
        left.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    }

    let right = vec![Line::from(""), Line::from("? help • H history • M menu")];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn result_line(game: &Game) -> String {
    match game.last_outcome() {
        Some(o) => match &o.evaluation {
            Some(eval) => format!("{} wins {} with {}", o.winner_name, o.pot, eval.name()),
            None => format!("{} wins {}: all others folded", o.winner_name, o.pot),
        },
        None => "Round over.".to_string(),
    }
}

fn draw_history(f: &mut Frame, app: &AppState) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Round log").borders(Borders::ALL);
    let history = app.game.history();
    let end = history.len().saturating_sub(app.history_offset());
    let start = end.saturating_sub(AppState::HISTORY_PAGE_SIZE);
    let mut lines: Vec<Line> = Vec::new();
    if history.is_empty() {
        lines.push(Line::from("Nothing yet."));
    }
    for entry in &history[start..end] {
        let who = app.game.player(entry.seat).map(|p| p.name()).unwrap_or("?");
        let amount = entry.amount.map(|v| format!(" {v}")).unwrap_or_default();
        lines.push(Line::from(format!("{who}: {}{amount}", entry.verb.label())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal next round"),
        Line::from("- F: fold"),
        Line::from("- C: call"),
        Line::from("- R: raise (enter amount)"),
        Line::from("- S: see your cards"),
        Line::from("- H: round log"),
        Line::from(""),
        Line::from(Span::styled("Raise entry:", bold)),
        Line::from("- 0-9 / Backspace: edit amount"),
        Line::from("- + / -: adjust by the minimum bet"),
        Line::from("- Enter: submit, Esc: cancel"),
        Line::from(""),
        Line::from(Span::styled("Hands, best first:", bold)),
        Line::from("Trail, Pure Sequence, Sequence, Color, Pair, High Card"),
        Line::from(""),
        Line::from("M: menu • Q: quit (menu) • Close help: ? or Esc"),
    ];
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner(area));
}

fn draw_amount_entry(f: &mut Frame, app: &AppState) {
    let area = centered_rect(50, 30, f.area());
    let current = app.amount_entry_text().unwrap_or("");
    let lines = vec![
        Line::from(format!("Raise by: {current}")),
        Line::from(format!("Minimum: {}", app.game.min_bet())),
        Line::from("Digits to edit, Backspace to delete"),
        Line::from("+/- by min bet, Enter submit, Esc cancel"),
    ];
    let block = Block::default().title("Raise").borders(Borders::ALL);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    let error = app.amount_entry_error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}

fn render_card(f: &mut Frame, area: Rect, card: Option<Card>) {
    let block = Block::default().borders(Borders::ALL);
    f.render_widget(block, area);
    let content = match card {
        Some(c) => {
            let color = if c.suit().is_red() { Color::Red } else { Color::White };
            Line::from(Span::styled(c.to_string(), Style::default().fg(color)))
        }
        None => Line::from(Span::styled("??", Style::default().fg(Color::DarkGray))),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner(area));
}
