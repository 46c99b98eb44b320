use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, IsTerminal, Stdout};
use std::time::Duration;
use teen_patti::tui::{app::AppState, controller};

/// Log to the file named by `TEEN_PATTI_LOG`; the terminal belongs to the TUI.
fn init_logging() {
    let Some(path) = std::env::var_os("TEEN_PATTI_LOG") else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            if WriteLogger::init(LevelFilter::Debug, Config::default(), file).is_err() {
                eprintln!("logger already initialised");
            }
        }
        Err(err) => eprintln!("cannot open log file {}: {err}", path.to_string_lossy()),
    }
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    if !io::stdout().is_terminal() {
        println!(
            "teen-patti needs a real terminal (TTY).\nRun it in a terminal and press q in the menu to quit. Version: {}",
            teen_patti::VERSION
        );
        return Ok(());
    }
    init_logging();
    log::info!("teen-patti {} starting", teen_patti::VERSION);

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(250);
    let mut app = AppState::default();

    let res = controller::run(&mut terminal, &mut app, tick_rate).await;

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
