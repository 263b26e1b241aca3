//! XO Arena - command-line front end
//!
//! Interactive tournaments, engine simulations, statistics and preferences.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::io::BufRead;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use xo_arena::{
    AiScheduler, EnginePlayer, FirstPlayer, HumanPlayer, Orchestrator, Preferences,
    SessionEvent, StatsStore,
};
use xo_engine::{
    AiEngine, Arena, ClockEvent, Difficulty, GameMode, Player as Mark, PlayerStats,
    Statistics, Tournament, TournamentConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Play {
            mode,
            difficulty,
            timed,
        } => run_play(&cli.preferences, &cli.stats_file, mode, difficulty, timed).await,
        Command::Simulate {
            games,
            x_difficulty,
            o_difficulty,
            seed,
        } => run_simulate(games, x_difficulty, o_difficulty, seed).await,
        Command::Stats { reset } => run_stats(&cli.stats_file, reset),
        Command::Settings {
            unlock_pvp,
            lock_pvp,
            difficulty,
            duration,
            first_player,
            think_delay_ms,
        } => run_settings(
            &cli.preferences,
            SettingsChange {
                unlock_pvp,
                lock_pvp,
                difficulty,
                duration,
                first_player,
                think_delay_ms,
            },
        ),
    }
}

/// Logs go to stderr so they never interleave with the board on stdout.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,xo_arena=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Play an interactive tournament on the terminal
#[instrument(skip(preferences, stats_file))]
async fn run_play(
    preferences: &Path,
    stats_file: &Path,
    mode: GameMode,
    difficulty: Option<Difficulty>,
    timed: bool,
) -> Result<()> {
    let prefs = Preferences::load(preferences)?;
    let store = StatsStore::new(stats_file.to_path_buf());

    let mut config = prefs.tournament_config(mode);
    if let Some(difficulty) = difficulty {
        config.difficulty = difficulty;
    }
    info!(mode = %config.mode, difficulty = %config.difficulty, timed, "Starting tournament");

    let mut arena = Arena::new(config).with_statistics(store.load()?);
    if timed {
        arena = arena.with_clock(prefs.clock_rules());
    }

    let input = Arc::new(Mutex::new(spawn_stdin_reader()));
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(event_rx, config.ai_player()));

    let mut orchestrator =
        Orchestrator::new(arena, AiScheduler::new(prefs.think_delay()), event_tx);
    orchestrator = match config.ai_player() {
        Some(ai) => orchestrator.with_seat(ai.opponent(), Box::new(HumanPlayer::new("You", input))),
        None => orchestrator
            .with_seat(Mark::X, Box::new(HumanPlayer::new("Player X", input.clone())))
            .with_seat(Mark::O, Box::new(HumanPlayer::new("Player O", input))),
    };

    let result = orchestrator.run().await;
    let arena = orchestrator.into_arena();
    store.save(arena.statistics())?;
    printer.await?;

    if result?.is_none() {
        println!("Goodbye.");
    }
    Ok(())
}

/// Reads stdin lines on a dedicated thread.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });
    line_rx
}

async fn print_events(mut event_rx: mpsc::UnboundedReceiver<SessionEvent>, ai: Option<Mark>) {
    while let Some(event) = event_rx.recv().await {
        match event {
            SessionEvent::StateChanged(snapshot) => {
                let ai_to_move = Some(snapshot.current_player) == ai && !snapshot.game_over;
                if snapshot.ai_thinking || ai_to_move {
                    continue;
                }
                println!("\n{}", snapshot);
                if !snapshot.game_over {
                    println!(
                        "Player {}: choose a cell (1-9), r to reset, q to quit",
                        snapshot.current_player
                    );
                }
            }
            SessionEvent::AiThinking { board, mark } => {
                println!("AI ({}) is thinking on board {}...", mark, board + 1);
            }
            SessionEvent::MoveMade(action) => println!("{}", action),
            SessionEvent::BoardCompleted { board, outcome } => {
                println!("Board {} complete: {}", board + 1, outcome);
            }
            SessionEvent::Rejected { error, .. } => println!("Invalid move: {}", error),
            SessionEvent::Clock(ClockEvent::Bonus { player, amount }) => {
                println!("+{}s for {}", amount.as_secs(), player);
            }
            SessionEvent::Clock(ClockEvent::Penalty { player, amount }) => {
                println!("-{}s for {}", amount.as_secs(), player);
            }
            SessionEvent::Clock(ClockEvent::Expired(player)) => {
                println!("Player {} ran out of time!", player);
            }
            SessionEvent::Reset => println!("Tournament reset."),
            SessionEvent::TournamentOver(outcome) => debug!(%outcome, "Tournament over"),
        }
    }
}

/// Run engine-vs-engine tournaments
#[instrument]
async fn run_simulate(
    games: u32,
    x_difficulty: Difficulty,
    o_difficulty: Difficulty,
    seed: Option<u64>,
) -> Result<()> {
    let mut statistics = Statistics::new();

    for game in 0..games {
        let (x_engine, o_engine) = match seed {
            Some(seed) => {
                let base = seed.wrapping_add(u64::from(game).wrapping_mul(2));
                (
                    AiEngine::seeded(x_difficulty, base),
                    AiEngine::seeded(o_difficulty, base.wrapping_add(1)),
                )
            }
            None => (AiEngine::new(x_difficulty), AiEngine::new(o_difficulty)),
        };

        // O is the tournament's own AI; X sits in the human seat
        let config = TournamentConfig::default().with_difficulty(o_difficulty);
        let arena = Arena::with_tournament(Tournament::with_engine(config, o_engine))
            .with_statistics(statistics);

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let drain = tokio::spawn(log_events(event_rx));

        let x_seat = EnginePlayer::new(format!("X ({})", x_difficulty), x_engine, Duration::ZERO);
        let mut orchestrator = Orchestrator::new(arena, AiScheduler::immediate(), event_tx)
            .with_seat(Mark::X, Box::new(x_seat));

        let outcome = orchestrator.run().await?;
        statistics = orchestrator.into_arena().statistics().clone();
        drain.await?;

        info!(game = game + 1, ?outcome, "Simulated tournament finished");
    }

    println!(
        "{} tournaments: X ({}) won {}, O ({}) won {}",
        games,
        x_difficulty,
        statistics.player(Mark::X).wins(),
        o_difficulty,
        statistics.player(Mark::O).wins()
    );
    print_player("X", statistics.player(Mark::X));
    print_player("O", statistics.player(Mark::O));
    Ok(())
}

async fn log_events(mut event_rx: mpsc::UnboundedReceiver<SessionEvent>) {
    while let Some(event) = event_rx.recv().await {
        if !matches!(event, SessionEvent::StateChanged(_)) {
            debug!(?event, "Session event");
        }
    }
}

/// Show or clear saved statistics
#[instrument(skip(stats_file))]
fn run_stats(stats_file: &Path, reset: bool) -> Result<()> {
    let store = StatsStore::new(stats_file.to_path_buf());

    if reset {
        store.clear()?;
        println!("Statistics cleared ({}).", store.path().display());
        return Ok(());
    }

    match store.load_record()? {
        None => println!("No statistics recorded yet in {}.", store.path().display()),
        Some(record) => {
            println!(
                "{}, saved {}",
                store.path().display(),
                record.saved_at().format("%Y-%m-%d %H:%M:%S UTC")
            );
            print_player("X", record.statistics().player(Mark::X));
            print_player("O", record.statistics().player(Mark::O));
        }
    }
    Ok(())
}

fn print_player(label: &str, stats: &PlayerStats) {
    println!("\nPlayer {}", label);
    println!(
        "  Tournaments: {} (W {} / L {} / D {}), win rate {:.1}%",
        stats.total_games(),
        stats.wins(),
        stats.losses(),
        stats.draws(),
        stats.win_rate()
    );
    println!(
        "  Vs AI:       W {} / L {} / D {}",
        stats.wins_vs_ai(),
        stats.losses_vs_ai(),
        stats.draws_vs_ai()
    );
    println!(
        "  Vs player:   W {} / L {} / D {}",
        stats.wins_vs_player(),
        stats.losses_vs_player(),
        stats.draws_vs_player()
    );
    println!(
        "  Moves:       {} (center {}, corner {}, edge {})",
        stats.total_moves(),
        stats.center_moves(),
        stats.corner_moves(),
        stats.edge_moves()
    );
    if let Some(average) = stats.average_move_time() {
        println!("  Avg move:    {:.2}s", average.as_secs_f64());
    }
    println!(
        "  Boards won:  {}, streak {} (best {}), comebacks {}",
        stats.boards_won(),
        stats.current_win_streak(),
        stats.longest_win_streak(),
        stats.comeback_wins()
    );
    if *stats.bonus_count() > 0 || *stats.penalty_count() > 0 {
        println!(
            "  Clock:       {} bonuses (+{}s), {} penalties (-{}s)",
            stats.bonus_count(),
            stats.bonus_time().as_secs(),
            stats.penalty_count(),
            stats.penalty_time().as_secs()
        );
    }
}

/// Requested preference changes.
#[derive(Debug)]
struct SettingsChange {
    unlock_pvp: bool,
    lock_pvp: bool,
    difficulty: Option<Difficulty>,
    duration: Option<u64>,
    first_player: Option<FirstPlayer>,
    think_delay_ms: Option<u64>,
}

/// Show or change preferences
#[instrument(skip(preferences))]
fn run_settings(preferences: &Path, change: SettingsChange) -> Result<()> {
    let mut prefs = Preferences::load(preferences)?;
    let before = prefs;

    if change.unlock_pvp {
        prefs.unlock_pvp();
    }
    if change.lock_pvp {
        prefs.lock_pvp();
    }
    if let Some(difficulty) = change.difficulty {
        prefs.set_difficulty(difficulty);
    }
    if let Some(secs) = change.duration {
        prefs.set_game_duration_secs(secs);
    }
    if let Some(first_player) = change.first_player {
        prefs.set_first_player(first_player);
    }
    if let Some(ms) = change.think_delay_ms {
        prefs.set_think_delay_ms(ms);
    }

    if prefs != before {
        prefs.save(preferences)?;
        info!(path = %preferences.display(), "Preferences updated");
    }

    println!("{}", prefs);
    Ok(())
}
