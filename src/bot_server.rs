//! HTTP bot server answering the remote-agent move protocol.
//!
//! `POST /move` takes a board snapshot and replies with a random legal move
//! for the side to move. `GET /health` answers `ok` once the server is up.

use crate::games::ataxx::wire::{MoveRequest, MoveResponse};
use crate::games::ataxx::{JumpRule, MoveError};
use crate::players::RandomAgent;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Shared configuration for request handlers.
#[derive(Debug, Clone, Copy)]
struct BotState {
    jump_rule: JumpRule,
    seed: Option<u64>,
}

/// Builds the bot router.
///
/// Each request gets its own board and agent; no state survives between
/// requests. A `seed` makes replies reproducible.
#[instrument]
pub fn router(jump_rule: JumpRule, seed: Option<u64>) -> Router {
    let state = Arc::new(BotState { jump_rule, seed });
    Router::new()
        .route("/move", post(choose_move))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `host:port` and serves the bot until the task is cancelled.
#[instrument(skip(jump_rule, seed))]
pub async fn serve(host: &str, port: u16, jump_rule: JumpRule, seed: Option<u64>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(address = %listener.local_addr()?, %jump_rule, "Bot server ready");
    axum::serve(listener, router(jump_rule, seed)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

#[instrument(skip_all)]
async fn choose_move(
    State(state): State<Arc<BotState>>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MoveResponse>, (StatusCode, String)> {
    debug!(turn = %request.current_turn, "Move requested");
    let board = request.to_board(state.jump_rule).map_err(|e| {
        warn!(error = %e, "Rejected malformed board");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let color = board.current_turn();
    let mut agent = match state.seed {
        Some(seed) => RandomAgent::with_seed("bot-server", color, seed),
        None => RandomAgent::new("bot-server", color),
    };

    match agent.choose(&board) {
        Ok((start, target)) => {
            debug!(%start, %target, "Answering with move");
            Ok(Json(MoveResponse::from_move(start, target)))
        }
        Err(e @ (MoveError::NoPiecesRemaining(_) | MoveError::NoValidMoves(_))) => {
            info!(error = %e, "No move available");
            Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
        Err(e) => {
            warn!(error = %e, "Agent failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}
