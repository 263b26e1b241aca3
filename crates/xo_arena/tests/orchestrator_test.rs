//! Tests for tournament orchestration.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use xo_arena::{AiScheduler, EnginePlayer, HumanPlayer, Orchestrator, PlayerAction, SessionEvent};
use xo_engine::{
    AiEngine, Arena, ClockRules, Difficulty, GameMode, MoveError, Outcome, Player, Tournament,
    TournamentConfig,
};

fn drain(event_rx: &mut mpsc::UnboundedReceiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = event_rx.try_recv() {
        events.push(event);
    }
    events
}

fn human_input(lines: &[&str]) -> Arc<Mutex<mpsc::UnboundedReceiver<String>>> {
    let (tx, rx) = mpsc::unbounded_channel();
    for line in lines {
        tx.send(line.to_string()).expect("Send failed");
    }
    Arc::new(Mutex::new(rx))
}

#[tokio::test]
async fn test_engine_versus_ai_terminates_with_outcome() {
    let config = TournamentConfig::default().with_difficulty(Difficulty::Hard);
    let tournament = Tournament::with_engine(config, AiEngine::seeded(Difficulty::Hard, 3));
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let x = EnginePlayer::new("X", AiEngine::seeded(Difficulty::Medium, 8), Duration::ZERO);
    let mut orchestrator =
        Orchestrator::new(Arena::with_tournament(tournament), AiScheduler::immediate(), event_tx)
            .with_seat(Player::X, Box::new(x));

    let outcome = orchestrator.run().await.expect("Run failed");
    let outcome = outcome.expect("Tournament should finish");
    assert!(matches!(outcome, Outcome::Winner(_)));

    let arena = orchestrator.arena();
    assert!(arena.tournament().is_over());
    assert_eq!(*arena.statistics().player(Player::X).total_games(), 1);

    let events = drain(&mut event_rx);
    assert!(events.iter().any(|e| matches!(e, SessionEvent::AiThinking { mark: Player::O, .. })));
    assert!(matches!(events.last(), Some(SessionEvent::TournamentOver(o)) if *o == outcome));
}

/// AI plays X on a short clock against a seeded engine seat.
async fn timed_ai_tournament(scheduler: AiScheduler) -> Orchestrator {
    let config = TournamentConfig::default()
        .with_difficulty(Difficulty::Medium)
        .with_human_player(Player::O);
    let tournament = Tournament::with_engine(config, AiEngine::seeded(Difficulty::Medium, 3));
    let arena = Arena::with_tournament(tournament)
        .with_clock(ClockRules::default().with_budget(Duration::from_millis(100)));
    let (event_tx, _event_rx) = mpsc::unbounded_channel();

    let o = EnginePlayer::new("O", AiEngine::seeded(Difficulty::Medium, 8), Duration::ZERO);
    let mut orchestrator =
        Orchestrator::new(arena, scheduler, event_tx).with_seat(Player::O, Box::new(o));
    orchestrator.run().await.expect("Run failed");
    orchestrator
}

#[tokio::test]
async fn test_think_delay_is_not_charged_to_ai_clock() {
    let immediate = timed_ai_tournament(AiScheduler::immediate()).await;
    // Each pause alone is longer than the whole budget
    let delayed = timed_ai_tournament(AiScheduler::new(Duration::from_millis(150))).await;

    let outcome = delayed.arena().tournament().winner();
    assert!(outcome.is_some());
    assert_eq!(outcome, immediate.arena().tournament().winner());
    assert_eq!(delayed.arena().clock().and_then(|c| c.expired()), None);

    let average = delayed
        .arena()
        .statistics()
        .player(Player::X)
        .average_move_time()
        .expect("AI moves were timed");
    assert!(average < Duration::from_millis(150), "{:?}", average);
}

#[tokio::test]
async fn test_idle_seat_loses_when_clock_runs_out() {
    let config = TournamentConfig::default().with_mode(GameMode::PlayerVsPlayer);
    let arena =
        Arena::new(config).with_clock(ClockRules::default().with_budget(Duration::from_millis(50)));
    // Keep the sender so the seat waits instead of quitting
    let (_input_tx, input_rx) = mpsc::unbounded_channel::<String>();
    let input = Arc::new(Mutex::new(input_rx));
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(arena, AiScheduler::immediate(), event_tx)
        .with_seat(Player::X, Box::new(HumanPlayer::new("Player X", input.clone())))
        .with_seat(Player::O, Box::new(HumanPlayer::new("Player O", input)));

    let outcome = orchestrator.run().await.expect("Run failed");
    assert_eq!(outcome, Some(Outcome::Winner(Player::O)));
    assert_eq!(orchestrator.arena().clock().and_then(|c| c.expired()), Some(Player::X));
    assert!(orchestrator.arena().tournament().history().is_empty());
    assert!(
        drain(&mut event_rx)
            .iter()
            .any(|e| matches!(e, SessionEvent::Clock(xo_engine::ClockEvent::Expired(Player::X))))
    );
}

#[tokio::test]
async fn test_pvp_seats_share_input_and_quit() {
    let config = TournamentConfig::default().with_mode(GameMode::PlayerVsPlayer);
    let input = human_input(&["5", "nonsense", "1", "q"]);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(Arena::new(config), AiScheduler::immediate(), event_tx)
        .with_seat(Player::X, Box::new(HumanPlayer::new("Player X", input.clone())))
        .with_seat(Player::O, Box::new(HumanPlayer::new("Player O", input)));

    assert_eq!(orchestrator.run().await.expect("Run failed"), None);

    let history = orchestrator.arena().tournament().history().to_vec();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].board, 0);
    assert_eq!(history[1].player, Player::O);
    assert_eq!(history[1].board, 1);

    let moves = drain(&mut event_rx)
        .into_iter()
        .filter(|e| matches!(e, SessionEvent::MoveMade(_)))
        .count();
    assert_eq!(moves, 2);
}

#[tokio::test]
async fn test_rejected_move_is_reported_and_turn_kept() {
    let config = TournamentConfig::default().with_mode(GameMode::PlayerVsPlayer);
    // X takes 1 on boards 0..7, then tries 1 again on board 0
    let input = human_input(&["1", "1", "1", "1", "1", "1", "1", "1", "1", "2", "q"]);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(Arena::new(config), AiScheduler::immediate(), event_tx)
        .with_seat(Player::X, Box::new(HumanPlayer::new("Player X", input.clone())))
        .with_seat(Player::O, Box::new(HumanPlayer::new("Player O", input)));

    orchestrator.run().await.expect("Run failed");

    let rejected: Vec<_> = drain(&mut event_rx)
        .into_iter()
        .filter_map(|e| match e {
            SessionEvent::Rejected { mark, error } => Some((mark, error)),
            _ => None,
        })
        .collect();
    assert_eq!(
        rejected,
        vec![(Player::X, MoveError::CellOccupied(xo_engine::Position::TopLeft))]
    );
    assert_eq!(orchestrator.arena().tournament().history().len(), 9);
}

#[tokio::test]
async fn test_reset_action_restarts_tournament() {
    let config = TournamentConfig::default().with_mode(GameMode::PlayerVsPlayer);
    let input = human_input(&["5", "r", "q"]);
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();

    let mut orchestrator = Orchestrator::new(Arena::new(config), AiScheduler::immediate(), event_tx)
        .with_seat(Player::X, Box::new(HumanPlayer::new("Player X", input.clone())))
        .with_seat(Player::O, Box::new(HumanPlayer::new("Player O", input)));

    orchestrator.run().await.expect("Run failed");

    let tournament = orchestrator.arena().tournament();
    assert!(tournament.history().is_empty());
    assert_eq!(tournament.current_player(), Player::X);
    assert!(drain(&mut event_rx).iter().any(|e| matches!(e, SessionEvent::Reset)));
}

#[tokio::test]
async fn test_missing_seat_is_an_error() {
    let config = TournamentConfig::default().with_mode(GameMode::PlayerVsPlayer);
    let (event_tx, _event_rx) = mpsc::unbounded_channel();
    let mut orchestrator = Orchestrator::new(Arena::new(config), AiScheduler::immediate(), event_tx);

    assert!(orchestrator.run().await.is_err());
}

#[test]
fn test_parse_line() {
    assert_eq!(HumanPlayer::parse_line("q"), Some(PlayerAction::Quit));
    assert_eq!(HumanPlayer::parse_line(" R "), Some(PlayerAction::Reset));
    assert_eq!(HumanPlayer::parse_line("9"), Some(PlayerAction::Move(8)));
    assert_eq!(HumanPlayer::parse_line("center"), Some(PlayerAction::Move(4)));
    assert_eq!(HumanPlayer::parse_line("10"), None);
    assert_eq!(HumanPlayer::parse_line(""), None);
}
