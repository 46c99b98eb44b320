use teen_patti::game::GameState;
use teen_patti::tui::app::{AppState, InputAction, Scene};

fn setup_table_app(bots: usize) -> AppState {
    let mut app = AppState::default();
    app.cfg_num_bots = bots;
    app.cfg_delay_pct = 0;
    app.apply_menu();
    app
}

/// Deal and let bots play until the human is up.
async fn human_to_act(app: &mut AppState) -> bool {
    for _ in 0..10 {
        if app.game.state() != GameState::Betting {
            let _ = app.handle_input(InputAction::NewRound);
        }
        let mut guard = 0;
        while app.bot_to_act() && guard < 100 {
            app.bot_turn().await;
            guard += 1;
        }
        if app.can_act() {
            return true;
        }
    }
    false
}

#[test]
fn menu_navigation_and_apply() {
    let mut app = AppState::default();
    assert!(matches!(app.scene, Scene::Menu));
    let start = app.menu_index;
    let _ = app.handle_input(InputAction::MenuNext);
    assert_ne!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuPrev);
    assert_eq!(app.menu_index, start);
    let _ = app.handle_input(InputAction::MenuApply);
    assert!(matches!(app.scene, Scene::Table));
    assert_eq!(app.game.players().len(), app.cfg_num_bots + 1);
    assert_eq!(app.human_seat(), Some(0));
    assert_eq!(app.game.players()[0].name(), "You");
    assert!(app.game.players()[1..].iter().all(|p| p.is_bot()));
}

#[test]
fn bot_count_is_clamped() {
    let mut app = AppState::default();
    for _ in 0..10 {
        let _ = app.handle_input(InputAction::MenuInc);
    }
    assert_eq!(app.cfg_num_bots, 5);
    for _ in 0..10 {
        let _ = app.handle_input(InputAction::MenuDec);
    }
    assert_eq!(app.cfg_num_bots, 1);
}

#[test]
fn bot_names_are_unique() {
    let app = setup_table_app(5);
    let mut names: Vec<&str> = app.game.players().iter().map(|p| p.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 6);
    assert!(app.game.players()[1..].iter().all(|p| app.bots.is_registered(p.name())));
}

#[test]
fn help_and_history_toggle() {
    let mut app = setup_table_app(2);
    let _ = app.handle_input(InputAction::ToggleHelp);
    assert!(app.help_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.help_open());
    assert!(app.history_open());
    let _ = app.handle_input(InputAction::ToggleHistory);
    assert!(!app.history_open());
}

#[test]
fn actions_do_nothing_before_the_deal() {
    let mut app = setup_table_app(2);
    assert!(!app.handle_input(InputAction::Call));
    assert!(!app.handle_input(InputAction::AmountOpen));
    assert!(!app.amount_entry_active());
}

#[tokio::test]
async fn raise_entry_validates_the_minimum() {
    let mut app = setup_table_app(1);
    assert!(human_to_act(&mut app).await);
    let min = app.game.min_bet().to_string();

    assert!(app.handle_input(InputAction::AmountOpen));
    assert_eq!(app.amount_entry_text(), Some(min.as_str()));
    let _ = app.handle_input(InputAction::AmountDigit(5));
    assert_eq!(app.amount_entry_text(), Some(format!("{min}5").as_str()));
    let _ = app.handle_input(InputAction::AmountBackspace);
    let _ = app.handle_input(InputAction::AmountBackspace);
    assert!(!app.handle_input(InputAction::AmountSubmit));
    assert_eq!(app.amount_entry_error(), Some(format!("Minimum raise is {min}").as_str()));
    assert!(app.amount_entry_active());

    let _ = app.handle_input(InputAction::AmountCancel);
    assert!(!app.amount_entry_active());
    assert!(app.can_act());
}

#[tokio::test]
async fn see_then_call_passes_the_turn() {
    let mut app = setup_table_app(1);
    assert!(human_to_act(&mut app).await);
    let human = app.human_seat().unwrap();

    assert!(app.handle_input(InputAction::See));
    assert!(app.game.players()[human].has_seen());
    assert!(app.can_act(), "seeing cards keeps the turn");
    assert!(!app.handle_input(InputAction::See), "cards are only seen once");

    assert!(app.handle_input(InputAction::Call));
    assert!(!app.can_act());
    assert!(app.game.players()[human].current_bet() > 0);
}
