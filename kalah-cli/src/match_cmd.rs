//! Match command - play games between two AI tiers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;

use kalah_core::{
    play_out, verify, AlphaBetaAI, BoardState, Difficulty, GameConfig, MoveProvider, Player,
    Winner,
};

/// Base seed when none is given on the command line
const DEFAULT_SEED: u64 = 42;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play (tiers swap seats every game)
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Difficulty of the first AI
    #[arg(long, default_value = "easy")]
    pub p1: Difficulty,

    /// Difficulty of the second AI
    #[arg(long, default_value = "hard")]
    pub p2: Difficulty,

    /// Stones in each pit at the start
    #[arg(long, default_value = "6")]
    pub stones: u8,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Replay every finished game and check its recorded history
    #[arg(long)]
    pub verify: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    /// True when the first AI held the Player 1 seat
    first_ai_started: bool,
    winner: Winner,
    stores: [u8; 2],
    moves: usize,
}

impl GameRecord {
    /// Winner in terms of the two AIs rather than seats
    fn first_ai_result(&self) -> Option<bool> {
        let first_seat = if self.first_ai_started {
            Winner::Player1
        } else {
            Winner::Player2
        };
        match self.winner {
            Winner::Draw => None,
            w => Some(w == first_seat),
        }
    }
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// 1. Check settings
/// 2. Play the games in parallel
/// 3. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    let config = GameConfig {
        stones_per_pit: args.stones,
        ..GameConfig::default()
    };
    config.validate()?;

    tracing::info!(
        "Starting match: {} vs {} ({} games, {} stones per pit)",
        args.p1,
        args.p2,
        args.games,
        args.stones
    );

    let started = Utc::now();
    let results = play_match(&config, &args, seed.unwrap_or(DEFAULT_SEED))?;

    report_results(&results, &args, started);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games of the match
fn play_match(config: &GameConfig, args: &MatchArgs, base_seed: u64) -> Result<MatchResults> {
    let games = (0..args.games)
        .into_par_iter()
        .map(|index| {
            let seed = base_seed.wrapping_add(index as u64);
            play_single_game(config, args, index + 1, seed)
        })
        .collect::<Result<Vec<_>>>()?;

    for record in &games {
        tracing::debug!(
            "Game {}: {:?} ({} - {}, {} moves)",
            record.game_number,
            record.winner,
            record.stores[0],
            record.stores[1],
            record.moves
        );
    }

    Ok(compute_match_statistics(games))
}

fn report_results(results: &MatchResults, args: &MatchArgs, started: DateTime<Utc>) {
    if args.json {
        print_json_results(results, args, started);
    } else {
        print_text_results(results, args);
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game. Odd-numbered games seat the first AI as Player 1.
fn play_single_game(
    config: &GameConfig,
    args: &MatchArgs,
    game_number: usize,
    seed: u64,
) -> Result<GameRecord> {
    let first_ai_started = game_number % 2 == 1;
    let difficulties = if first_ai_started {
        [args.p1, args.p2]
    } else {
        [args.p2, args.p1]
    };

    let mut providers: [Box<dyn MoveProvider>; 2] = [
        Box::new(AlphaBetaAI::for_difficulty(difficulties[0], seed)),
        Box::new(AlphaBetaAI::for_difficulty(difficulties[1], seed.wrapping_mul(31))),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let state = play_out(config.new_state(), &mut providers, difficulties, &mut rng);

    if args.verify {
        verify(&state)
            .map_err(|m| anyhow::anyhow!("history diverges at move {}: {:?}", m.index, m))
            .with_context(|| format!("Game {} failed verification", game_number))?;
    }

    let winner = state
        .winner()
        .with_context(|| format!("Game {} stopped before the end", game_number))?;

    Ok(GameRecord {
        game_number,
        first_ai_started,
        winner,
        stores: stores(&state),
        moves: state.history().len(),
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let first_wins = games
        .iter()
        .filter(|g| g.first_ai_result() == Some(true))
        .count();
    let second_wins = games
        .iter()
        .filter(|g| g.first_ai_result() == Some(false))
        .count();
    let draws = games.len() - first_wins - second_wins;

    let total_moves: usize = games.iter().map(|g| g.moves).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_wins,
        second_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn stores(state: &BoardState) -> [u8; 2] {
    [state.store(Player::Player1), state.store(Player::Player2)]
}

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs, started: DateTime<Utc>) {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        started_at: DateTime<Utc>,
        first_ai: Difficulty,
        second_ai: Difficulty,
        total_games: usize,
        first_wins: usize,
        second_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: &'a [GameRecord],
    }

    let output = JsonOutput {
        started_at: started,
        first_ai: args.p1,
        second_ai: args.p2,
        total_games: results.games.len(),
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: &results.games,
    };

    match serde_json::to_string_pretty(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize results: {}", e),
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results: {} vs {} ===", args.p1, args.p2);
    println!("Total games: {}", total);
    println!(
        "{:<7} wins: {} ({:.1}%)",
        args.p1.to_string(),
        results.first_wins,
        percent(results.first_wins, total)
    );
    println!(
        "{:<7} wins: {} ({:.1}%)",
        args.p2.to_string(),
        results.second_wins,
        percent(results.second_wins, total)
    );
    println!(
        "Draws:        {} ({:.1}%)",
        results.draws,
        percent(results.draws, total)
    );
    println!("Avg moves:    {:.1}", results.avg_moves);

    println!("\nGame details:");
    for game in &results.games {
        let starter = if game.first_ai_started { args.p1 } else { args.p2 };
        println!(
            "  Game {}: {:?} {} - {} in {} moves ({} started)",
            game.game_number, game.winner, game.stores[0], game.stores[1], game.moves, starter
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
