use rand::rngs::StdRng;
use rand::SeedableRng;
use teen_patti::agents::{BotAi, BotContext, BotManager};
use teen_patti::cards::parse_cards;
use teen_patti::engine::GameEngine;
use teen_patti::game::{Action, Game, GameConfig, GameState};
use teen_patti::player::Difficulty;

fn bot_table(n: usize, seed: u64) -> Game {
    let mut g = Game::new(GameConfig { seed: Some(seed), ..GameConfig::default() });
    let levels = Difficulty::ALL;
    for i in 0..n {
        g.seat(format!("Bot {}", i + 1), true, levels[i % levels.len()]);
    }
    g
}

fn snapshot(hand: &[teen_patti::cards::Card]) -> BotContext<'_> {
    BotContext { pot: 60, current_bet: 20, min_bet: 10, chips: 500, bet: 0, seen: true, hand }
}

#[test]
fn same_seed_same_decisions() {
    let hand = parse_cards("K♠ Q♠ J♠").unwrap();
    let ctx = snapshot(&hand);
    for d in Difficulty::ALL {
        let bot = BotAi::for_difficulty(d);
        let mut a = StdRng::seed_from_u64(77);
        let mut b = StdRng::seed_from_u64(77);
        for _ in 0..20 {
            assert_eq!(bot.make_decision(&ctx, &mut a), bot.make_decision(&ctx, &mut b));
        }
    }
}

#[test]
fn trash_hand_never_raises_for_an_easy_bot() {
    let hand = parse_cards("7♣ 4♦ 2♥").unwrap();
    let ctx = snapshot(&hand);
    let bot = BotAi::for_difficulty(Difficulty::Easy);
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..200 {
        let d = bot.make_decision(&ctx, &mut rng);
        assert!(!matches!(d.action, Action::Raise(_)), "{d:?}");
    }
}

#[test]
fn raises_respect_minimum_and_stack_cap() {
    let hand = parse_cards("A♠ A♥ A♦").unwrap();
    let ctx = snapshot(&hand);
    let bot = BotAi::for_difficulty(Difficulty::Hard);
    let mut rng = StdRng::seed_from_u64(12);
    let mut raised = false;
    for _ in 0..200 {
        if let Action::Raise(amount) = bot.make_decision(&ctx, &mut rng).action {
            raised = true;
            assert!(amount >= ctx.min_bet);
            assert!(amount <= ctx.chips * 2 / 5);
        }
    }
    assert!(raised, "a hard bot holding a trail should raise sometimes");
}

#[test]
fn context_reads_the_engine_view() {
    let mut g = bot_table(3, 4);
    g.start_new_round().unwrap();
    let seat = g.dealer();
    let ctx = BotContext::from_engine(&g, seat).unwrap();
    assert_eq!(ctx.pot, 5);
    assert_eq!(ctx.bet, 5);
    assert_eq!(ctx.call_amount(), 0);
    assert_eq!(ctx.hand.len(), 3);
    assert!(BotContext::from_engine(&g, 9).is_none());
}

#[test]
fn bot_only_games_conserve_chips() {
    let mut g = bot_table(4, 2024);
    let total: u64 = g.players().iter().map(|p| p.chips()).sum();
    let mut rng = StdRng::seed_from_u64(31);
    for _ in 0..30 {
        if g.start_new_round().is_err() {
            break;
        }
        let mut steps = 0;
        while g.state() == GameState::Betting && steps < 500 {
            let seat = g.current();
            let bot = BotAi::for_difficulty(g.players()[seat].difficulty());
            let action = {
                let ctx = BotContext::from_engine(&g, seat).unwrap();
                bot.make_decision(&ctx, &mut rng).action
            };
            g.player_action(action).unwrap();
            steps += 1;
        }
        assert_eq!(g.state(), GameState::Ended);
        let now: u64 = g.players().iter().map(|p| p.chips()).sum();
        assert_eq!(now, total);
    }
}

#[tokio::test]
async fn manager_plays_a_registered_bot_turn() {
    let mut g = bot_table(3, 5);
    let mut mgr = BotManager::with_seed(6);
    mgr.set_delay_scale(0.0);
    for p in g.players().to_vec() {
        assert!(mgr.register_bot(&p));
    }
    g.start_new_round().unwrap();
    let seat = g.current();
    let round_log = g.history().len();

    let decision = mgr.execute_bot_turn(&mut g, seat).await.unwrap();
    assert!(decision.is_some());
    assert!(g.history().len() > round_log);
    assert!(g.current() != seat || g.state() != GameState::Betting);
}

#[tokio::test]
async fn manager_ignores_unregistered_seats() {
    let mut g = bot_table(2, 5);
    let mut mgr = BotManager::with_seed(6);
    mgr.set_delay_scale(0.0);
    g.start_new_round().unwrap();
    let seat = g.current();
    let engine: &mut dyn GameEngine = &mut g;
    assert_eq!(mgr.execute_bot_turn(engine, seat).await.unwrap(), None);
    assert_eq!(g.current(), seat);
}
