//! Terminal chess against an external move selector.
//!
//! Reads commands from stdin, plays the local side through [`Game`], and asks
//! the configured selector for the other side's moves, falling back to a
//! random legal move when it cannot answer.

mod command;

use anyhow::Context;
use chess_core::Color;
use chess_engine::{ClickOutcome, Game, GameError, GameStatus, MoveOrigin, MoveOutcome};
use chess_mover::{play_external_turn, Difficulty, HttpMover, MoverConfig};
use clap::Parser;
use command::{Command, HELP};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess in the terminal against an external move selector")]
struct Args {
    /// Side you play (white or black). Omit to move both sides yourself.
    #[arg(short, long)]
    color: Option<Color>,

    /// Move selector URL
    #[arg(long)]
    url: Option<String>,

    /// Selector strength: easy, medium, hard or expert
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Thinking time sent to the selector, in milliseconds
    #[arg(long)]
    move_time: Option<u64>,

    /// Never contact the selector; the other side plays random moves
    #[arg(long)]
    offline: bool,

    /// Path to a mover.toml (searched for in the current and parent directories otherwise)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting position string
    #[arg(long)]
    fen: Option<String>,
}

impl Args {
    fn apply_overrides(&self, config: &mut MoverConfig) {
        if let Some(url) = &self.url {
            config.url = url.clone();
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(ms) = self.move_time {
            config.move_time_ms = ms;
        }
        if self.offline {
            config.offline = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => MoverConfig::load_from(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => MoverConfig::load().await?,
    };
    args.apply_overrides(&mut config);
    tracing::info!(
        url = %config.url,
        difficulty = %config.difficulty,
        offline = config.offline,
        "move selector configured"
    );
    let mover = HttpMover::new(&config)?;

    let mut game = match &args.fen {
        Some(fen) => Game::from_fen(fen).context("invalid starting position")?,
        None => Game::new(),
    };
    if let Some(color) = args.color {
        game.set_player_color(Some(color));
        game.face(color);
    }

    let mut rng = rand::thread_rng();
    println!("{}", game.render());
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if !game.is_game_over() && !game.is_human_turn() && game.pending_promotion().is_none() {
            println!("Thinking...");
            match play_external_turn(&mut game, &mover, &mut rng).await {
                Some(played) => {
                    let note = if played.is_fallback() { " (random)" } else { "" };
                    let side = game.side_to_move().opposite();
                    println!("{} played {}{}", side, played.coord(), note);
                    print_position(&game);
                    continue;
                }
                None => tracing::warn!("external side could not move"),
            }
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Board => println!("{}", game.render()),
            Command::Fen => println!("{}", game.position_string()),
            Command::Status => print_status(&game),
            Command::Flip => {
                game.flip_orientation();
                println!("{}", game.render());
            }
            Command::New(color) => {
                game.new_game(color);
                if let Some(color) = color {
                    game.face(color);
                }
                println!("{}", game.render());
            }
            Command::History => print_history(&game),
            Command::Moves(from) => print_moves(&game, from),
            Command::Click(square) => match game.click(square) {
                ClickOutcome::Ignored => println!("nothing to do on {}", square),
                ClickOutcome::Selected { square, targets } => {
                    let targets: Vec<String> =
                        targets.as_slice().iter().map(|s| s.to_string()).collect();
                    println!("{} selected: {}", square, targets.join(" "));
                }
                ClickOutcome::Deselected => println!("selection cleared"),
                ClickOutcome::Moved(_) => print_position(&game),
                ClickOutcome::PromotionRequired(_) => println!("promote to? (q, r, b, n)"),
            },
            Command::Move(m) => {
                let result = game.play(m, MoveOrigin::Human);
                report(&game, result);
            }
            Command::Promote(kind) => match game.complete_promotion(kind) {
                Ok(_) => print_position(&game),
                Err(e) => println!("{}", e),
            },
            Command::Cancel => match game.cancel_promotion() {
                Ok(()) => println!("promotion cancelled"),
                Err(e) => println!("{}", e),
            },
        }
    }

    Ok(())
}

fn report(game: &Game, result: Result<MoveOutcome, GameError>) {
    match result {
        Ok(MoveOutcome::Applied(_)) => print_position(game),
        Ok(MoveOutcome::PromotionRequired(_)) => println!("promote to? (q, r, b, n)"),
        Err(e) => println!("{}", e),
    }
}

fn print_position(game: &Game) {
    if let Some(last) = game.last_move() {
        println!("last move: {}", last.notation);
    }
    println!("{}", game.render());
    print_status(game);
}

fn print_status(game: &Game) {
    match game.status() {
        GameStatus::Ongoing => {
            let check = if game.is_check() { " (check)" } else { "" };
            println!("{} to move{}", game.side_to_move(), check);
        }
        status => println!("{}", status),
    }
    for color in Color::ALL {
        let captured: String = game
            .captured(color)
            .iter()
            .map(|p| chess_core::ColoredPiece::new(*p, color).to_fen_char())
            .collect();
        if !captured.is_empty() {
            println!("captured {}: {}", color, captured);
        }
    }
}

fn print_history(game: &Game) {
    for (i, pair) in game.move_history().chunks(2).enumerate() {
        let black = pair.get(1).map_or("", |r| r.notation.as_str());
        println!("{}. {} {}", i + 1, pair[0].notation, black);
    }
}

fn print_moves(game: &Game, from: Option<chess_core::Square>) {
    let moves: Vec<String> = match from {
        Some(sq) => game
            .legal_moves(sq)
            .as_slice()
            .iter()
            .map(|to| format!("{}{}", sq, to))
            .collect(),
        None => game
            .all_legal_moves()
            .iter()
            .map(|m| m.to_string())
            .collect(),
    };
    println!("{}", moves.join(" "));
}
