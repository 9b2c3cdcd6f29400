//! Play command - a Kalah game in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_config(), play_game(), review_game()
//! - Level 3: human_turn(), ai_turn(), parse_command()
//! - Level 4: board rendering and outcome descriptions

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use kalah_core::{
    Difficulty, GameConfig, GameMode, GameSession, HistoryCursor, MoveOutcome, MoveRecord, Pits,
    Player, SessionError, SpecialEvent, Winner, PLAYER1_STORE, PLAYER2_STORE,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Two people at one terminal
    Pvp,
    /// You play Player 1 against the AI
    Pvai,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvp => GameMode::PlayerVsPlayer,
            ModeArg::Pvai => GameMode::PlayerVsAi,
        }
    }
}

#[derive(Args)]
pub struct PlayArgs {
    /// Game mode
    #[arg(long, value_enum, default_value = "pvai")]
    pub mode: ModeArg,

    /// AI difficulty (easy, medium, hard)
    #[arg(long, default_value = "medium")]
    pub difficulty: Difficulty,

    /// Stones in each pit at the start
    #[arg(long, default_value = "6")]
    pub stones: u8,

    /// Game config JSON file (overrides the flags above)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// One line of player input
#[derive(Clone, Debug, PartialEq, Eq)]
enum Command {
    Pit(usize),
    Restart,
    Quit,
    Help,
    Unknown(String),
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Build the game config
/// 2. Play until the game ends or the player quits
/// 3. Offer a move-by-move review of the finished game
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(&args, seed)?;
    let mut session = GameSession::new(config);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    writeln!(output, "{}", HELP)?;
    play_game(&mut session, &mut input, &mut output)?;

    if session.state().is_game_over() {
        review_game(&session, &mut input, &mut output)?;
    }

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn build_config(args: &PlayArgs, seed: Option<u64>) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load game config: {}", path.display()))?,
        None => {
            let config = GameConfig {
                stones_per_pit: args.stones,
                mode: args.mode.into(),
                difficulty: args.difficulty,
                seed: None,
            };
            config.validate()?;
            config
        }
    };

    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

/// Main loop. Returns when the game is over, the player quits, or input ends.
fn play_game<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    loop {
        writeln!(out, "\n{}", render_board(session.state().pits()))?;

        if let Some(winner) = session.state().winner() {
            writeln!(out, "{}", describe_winner(session, winner))?;
            return Ok(());
        }

        if session.is_ai_turn() {
            ai_turn(session, out)?;
            continue;
        }

        if !human_turn(session, input, out)? {
            return Ok(());
        }
    }
}

/// Step through a finished game's snapshots
fn review_game<R: BufRead, W: Write>(session: &GameSession, input: &mut R, out: &mut W) -> Result<()> {
    let Ok(mut cursor) = HistoryCursor::new(session.state()) else {
        return Ok(());
    };

    writeln!(
        out,
        "\nReview {} moves: [n]ext, [p]revious, a move number, or [q]uit",
        cursor.len()
    )?;

    loop {
        writeln!(out, "\n{}", describe_record(cursor.index(), cursor.record()))?;
        writeln!(out, "{}", render_board(&cursor.snapshot().pits))?;
        write!(out, "review> ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(());
        };

        match line.as_str() {
            "q" | "quit" => return Ok(()),
            "n" | "next" | "" => {
                if cursor.forward().is_none() {
                    writeln!(out, "Already at the last move")?;
                }
            }
            "p" | "prev" => {
                if cursor.backward().is_none() {
                    writeln!(out, "Already at the first move")?;
                }
            }
            other => match other.parse::<usize>() {
                Ok(number) if number >= 1 => {
                    if let Err(e) = cursor.goto(number - 1) {
                        writeln!(out, "{}", e)?;
                    }
                }
                _ => writeln!(out, "Unknown review command: {}", other)?,
            },
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Read and apply one command. Returns false when the player is done.
fn human_turn<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    out: &mut W,
) -> Result<bool> {
    let mover = session.state().current_player();
    write!(out, "{} {:?}> ", player_label(mover), session.state().legal_moves())?;
    out.flush()?;

    let Some(line) = read_line(input)? else {
        return Ok(false);
    };

    match parse_command(&line) {
        Command::Pit(pit) => match session.play(pit) {
            Ok(outcome) => {
                writeln!(out, "{}", describe_outcome(&outcome))?;
                session.acknowledge_capture();
            }
            Err(e) => writeln!(out, "Move refused: {}", e)?,
        },
        Command::Restart => {
            session.restart();
            writeln!(out, "New game")?;
        }
        Command::Quit => return Ok(false),
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Unknown(text) => writeln!(out, "Unknown command: {} (try 'help')", text)?,
    }

    Ok(true)
}

fn ai_turn<W: Write>(session: &mut GameSession, out: &mut W) -> Result<()> {
    match session.play_ai() {
        Ok(ai) => {
            writeln!(out, "AI plays pit {}", ai.pit)?;
            writeln!(out, "{}", describe_outcome(&ai.outcome))?;
            session.acknowledge_capture();
        }
        Err(SessionError::Rejected(rejection)) => writeln!(out, "AI could not move: {}", rejection)?,
        Err(e) => anyhow::bail!("AI turn failed: {}", e),
    }
    Ok(())
}

fn parse_command(line: &str) -> Command {
    match line {
        "q" | "quit" | "exit" => Command::Quit,
        "r" | "restart" => Command::Restart,
        "h" | "help" | "?" => Command::Help,
        other => other
            .parse::<usize>()
            .map(Command::Pit)
            .unwrap_or_else(|_| Command::Unknown(other.to_string())),
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

const HELP: &str = "Enter a pit number to sow it (Player 1: 0-5, Player 2: 7-12).
Other commands: restart, help, quit.";

/// Trimmed next line, or `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_ascii_lowercase()))
}

/// Player 2's row is printed right to left so sowing runs counter-clockwise
fn render_board(pits: &Pits) -> String {
    let row = |range: &mut dyn Iterator<Item = usize>| -> String {
        range.map(|p| format!("[{:>2}]", pits[p])).collect()
    };
    let labels = |range: &mut dyn Iterator<Item = usize>| -> String {
        range.map(|p| format!(" {:>2} ", p)).collect()
    };

    let top_labels = labels(&mut (7..=12).rev());
    let top = row(&mut (7..=12).rev());
    let bottom = row(&mut (0..=5));
    let bottom_labels = labels(&mut (0..=5));

    format!(
        "     {}\n     {}\n[{:>2}]{}[{:>2}]\n     {}\n     {}",
        top_labels,
        top,
        pits[PLAYER2_STORE],
        " ".repeat(24),
        pits[PLAYER1_STORE],
        bottom,
        bottom_labels
    )
}

fn player_label(player: Player) -> &'static str {
    match player {
        Player::Player1 => "Player 1",
        Player::Player2 => "Player 2",
    }
}

fn describe_outcome(outcome: &MoveOutcome) -> String {
    let mut text = format!(
        "{} sowed {} stones from pit {}",
        player_label(outcome.mover),
        outcome.stones_moved,
        outcome.pit
    );

    match outcome.special_event {
        Some(SpecialEvent::ExtraTurn) => text.push_str(", last stone in the store: extra turn"),
        Some(SpecialEvent::Capture { stones_captured }) => {
            text.push_str(&format!(", captured {} stones", stones_captured))
        }
        None => {}
    }

    if let Some(sweep) = outcome.sweep {
        text.push_str(&format!(
            "\nOne side is empty: {} stones swept to Player 1, {} to Player 2",
            sweep.player1_swept, sweep.player2_swept
        ));
    }
    text
}

fn describe_record(index: usize, record: &MoveRecord) -> String {
    let event = match record.special_event {
        Some(SpecialEvent::ExtraTurn) => " (extra turn)".to_string(),
        Some(SpecialEvent::Capture { stones_captured }) => {
            format!(" (captured {})", stones_captured)
        }
        None => String::new(),
    };
    format!(
        "Move {}: {} pit {}, {} stones{}",
        index + 1,
        player_label(record.mover),
        record.pit,
        record.stones_moved,
        event
    )
}

fn describe_winner(session: &GameSession, winner: Winner) -> String {
    let state = session.state();
    let score = format!(
        "{} - {}",
        state.store(Player::Player1),
        state.store(Player::Player2)
    );
    let ai_game = session.config().mode == GameMode::PlayerVsAi;

    match winner {
        Winner::Draw => format!("Draw, {}", score),
        Winner::Player1 if ai_game => format!("You win, {}", score),
        Winner::Player2 if ai_game => format!("The AI wins, {}", score),
        Winner::Player1 => format!("Player 1 wins, {}", score),
        Winner::Player2 => format!("Player 2 wins, {}", score),
    }
}

// ============================================================================
// TESTS
// ============================================================================
