//! HTTP client for the external move selector.

use crate::{MoveRequest, MoveResponse, MoverConfig};
use chess_core::CoordMove;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum MoverError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("selector answered with status {0}")]
    Status(StatusCode),

    #[error("invalid response body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("undecodable move: {0:?}")]
    Undecodable(String),

    #[error("move {0} is not legal in the current position")]
    Illegal(CoordMove),

    #[error("external mover is offline")]
    Offline,
}

/// Something that chooses a move for a position string.
#[allow(async_fn_in_trait)]
pub trait MoveSelector {
    /// Asks for a move in the position described by `board`.
    async fn request_move(&self, board: &str) -> Result<MoveResponse, MoverError>;
}

/// Move selector reached over HTTP with a JSON POST.
#[derive(Debug, Clone)]
pub struct HttpMover {
    client: reqwest::Client,
    url: String,
    depth: u32,
    move_time_ms: u64,
    offline: bool,
}

impl HttpMover {
    pub fn new(config: &MoverConfig) -> Result<Self, MoverError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Ok(HttpMover {
            client: builder.build()?,
            url: config.url.clone(),
            depth: config.difficulty.depth(),
            move_time_ms: config.move_time_ms,
            offline: config.offline,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Builds the request body for `board`.
    pub fn request_for(&self, board: &str) -> MoveRequest {
        MoveRequest {
            board: board.to_string(),
            depth: self.depth,
            move_time: self.move_time_ms,
        }
    }
}

impl MoveSelector for HttpMover {
    async fn request_move(&self, board: &str) -> Result<MoveResponse, MoverError> {
        if self.offline {
            return Err(MoverError::Offline);
        }

        let request = self.request_for(board);
        debug!(url = %self.url, depth = request.depth, "requesting move");

        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MoverError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Difficulty;

    #[test]
    fn request_carries_config() {
        let config = MoverConfig {
            difficulty: Difficulty::Hard,
            move_time_ms: 750,
            ..MoverConfig::default()
        };
        let mover = HttpMover::new(&config).unwrap();
        let request = mover.request_for("4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1");
        assert_eq!(request.depth, 8);
        assert_eq!(request.move_time, 750);
        assert_eq!(request.board, "4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1");
        assert_eq!(mover.url(), crate::config::DEFAULT_URL);
    }

    #[tokio::test]
    async fn offline_mover_never_connects() {
        let config = MoverConfig {
            url: "http://127.0.0.1:1/unused".to_string(),
            offline: true,
            ..MoverConfig::default()
        };
        let mover = HttpMover::new(&config).unwrap();
        let err = mover.request_move("irrelevant").await.unwrap_err();
        assert!(matches!(err, MoverError::Offline));
    }
}
