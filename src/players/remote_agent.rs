//! Agent that asks a remote HTTP peer for each move.

use super::{MoveSource, PlayerType};
use crate::games::ataxx::wire::{MoveRequest, MoveResponse};
use crate::games::ataxx::{Board, Color, MoveError, RemoteError, Selection};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Remote agent speaking the JSON move protocol.
///
/// Each call performs exactly one POST; failures are reported, never retried.
#[derive(Debug, Clone)]
pub struct RemoteAgent {
    name: String,
    color: Color,
    endpoint: String,
    client: reqwest::Client,
}

impl RemoteAgent {
    /// Creates a remote agent posting to `endpoint`.
    ///
    /// With a `timeout`, requests that take longer fail as transport errors.
    #[instrument(skip(name, endpoint), fields(endpoint = %endpoint))]
    pub fn new(
        name: impl Into<String>,
        color: Color,
        endpoint: String,
        timeout: Option<Duration>,
    ) -> Result<Self, MoveError> {
        let name = name.into();
        info!(agent = %name, %color, "Creating remote agent");

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            error!(error = %e, "Failed to build HTTP client");
            RemoteError::Transport(e.to_string())
        })?;

        Ok(Self {
            name,
            color,
            endpoint,
            client,
        })
    }

    /// The URL moves are requested from.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Performs one request/response exchange.
    #[instrument(skip(self, board), fields(agent = %self.name, endpoint = %self.endpoint))]
    pub async fn request_move(&self, board: &Board) -> Result<Selection, RemoteError> {
        let request = MoveRequest::from_board(board);
        debug!(turn = %request.current_turn, "Requesting move from remote agent");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Remote agent request failed");
                RemoteError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Remote agent returned an error status");
            return Err(RemoteError::Status(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read remote agent response");
            RemoteError::Transport(e.to_string())
        })?;
        debug!(response = %text, "Remote agent response body");

        let body: MoveResponse = serde_json::from_str(&text).map_err(|e| {
            warn!(error = %e, "Remote agent response is not a move");
            RemoteError::Malformed(e.to_string())
        })?;

        let (start, target) = body.to_move()?;
        info!(%start, %target, "Remote agent chose move");
        Ok(Selection::complete(start, target))
    }
}

#[async_trait::async_trait]
impl MoveSource for RemoteAgent {
    fn player_type(&self) -> PlayerType {
        PlayerType::ServerBot
    }

    fn color(&self) -> Color {
        self.color
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn select(&mut self, board: &Board) -> Result<Selection, MoveError> {
        Ok(self.request_move(board).await?)
    }
}
