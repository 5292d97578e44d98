//! Client for an external move selector.
//!
//! The selector receives the current position string plus a search depth
//! and time budget, and answers with a coordinate move. Any failure on the
//! way (transport, status, body, undecodable or illegal move) is logged and
//! answered with a uniformly random legal move instead. There are no
//! retries.
//!
//! # Example
//!
//! ```no_run
//! use chess_engine::Game;
//! use chess_mover::{play_external_turn, HttpMover, MoverConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MoverConfig::load().await?;
//! let mover = HttpMover::new(&config)?;
//! let mut game = Game::new();
//! let played = play_external_turn(&mut game, &mover, &mut rand::thread_rng()).await;
//! println!("external side played {:?}", played);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod fallback;
mod protocol;
mod turn;

pub use client::{HttpMover, MoveSelector, MoverError};
pub use config::{ConfigError, MoverConfig};
pub use fallback::random_legal_move;
pub use protocol::{Difficulty, MoveRequest, MoveResponse};
pub use turn::{play_external_turn, ExternalMove};
