//! Plain terminal front end: prints the board and reads clicks from stdin.

use crate::config::GameConfig;
use crate::games::ataxx::{BOARD_SIZE, Board, Color, Position};
use crate::orchestrator::{ControllerError, GameEvent, Step, TurnController};
use crate::players::{HumanInput, PlayerType};
use anyhow::{Context, Result};
use std::collections::HashMap;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Parses a 1-indexed `row col` pair such as `7 4` or `7,4`.
pub fn parse_position(line: &str) -> Option<Position> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty());
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(1..=BOARD_SIZE).contains(&row) || !(1..=BOARD_SIZE).contains(&col) {
        return None;
    }
    Some(Position::new(row - 1, col - 1))
}

/// Parses a line of human input: `pass`, or a cell as for [`parse_position`].
pub fn parse_input(line: &str) -> Option<HumanInput> {
    if line.trim().eq_ignore_ascii_case("pass") {
        return Some(HumanInput::Pass);
    }
    parse_position(line).map(HumanInput::Click)
}

/// Plays one game in the terminal.
#[instrument(skip(config))]
pub async fn play(config: GameConfig) -> Result<()> {
    let board = Board::with_jump_rule(*config.jump_rule());

    let mut click_senders = HashMap::new();
    let mut sources = Vec::with_capacity(2);
    for color in [Color::White, Color::Black] {
        let (source, tx) = config.seat(color).build(color)?;
        if let Some(tx) = tx {
            click_senders.insert(color, tx);
        }
        sources.push(source);
    }
    let black = sources.pop().context("black seat missing")?;
    let white = sources.pop().context("white seat missing")?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut controller = TurnController::new(board, white, black, event_tx)?;

    let (turn_tx, turn_rx) = watch::channel(controller.board().current_turn());
    if !click_senders.is_empty() {
        tokio::spawn(forward_stdin(click_senders, turn_rx));
    }

    println!("{}\n", controller.board().display());
    loop {
        if controller.active().player_type() == PlayerType::Human {
            let hint = match controller.selection() {
                Some(pos) => format!("destination for ({}, {})", pos.row + 1, pos.col + 1),
                None => "a piece".to_string(),
            };
            println!(
                "{} ({}), choose {} as `row col`, or type `pass`:",
                controller.active().name(),
                controller.board().current_turn(),
                hint
            );
        }

        let step = controller.step().await;
        while let Ok(event) = event_rx.try_recv() {
            render(&event);
        }
        turn_tx.send_replace(controller.board().current_turn());

        match step {
            Ok(Step::Finished(outcome)) => {
                println!("\n{}", controller.board().display());
                info!(%outcome, "Game finished");
                return Ok(());
            }
            Ok(Step::Moved(_)) | Ok(Step::Passed) => {
                println!("\n{}\n", controller.board().display());
            }
            Ok(Step::Awaiting) | Ok(Step::Rejected) => {}
            Err(ControllerError::Source(e)) => {
                warn!(error = %e, "Move source failed, ending session");
                return Err(e).context("move source failed");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn render(event: &GameEvent) {
    match event {
        GameEvent::Selected { position, moves, .. } => {
            let list = |ps: &[Position]| {
                ps.iter()
                    .map(|p| format!("{},{}", p.row + 1, p.col + 1))
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            println!(
                "Selected ({}, {}). Copy: [{}] Jump: [{}]",
                position.row + 1,
                position.col + 1,
                list(&moves.copies),
                list(&moves.jumps)
            );
        }
        GameEvent::Deselected { .. } => println!("Selection cleared."),
        GameEvent::MoveRejected { reason, .. } => println!("Rejected: {}", reason),
        GameEvent::MoveMade { color, start, target, kind, scores } => println!(
            "{} {} ({}, {}) -> ({}, {}). White {} - Black {}",
            color,
            kind,
            start.row + 1,
            start.col + 1,
            target.row + 1,
            target.col + 1,
            scores.white,
            scores.black
        ),
        GameEvent::Passed { color, reason } => println!("{} passes: {}", color, reason),
        GameEvent::TurnChanged { to } => debug!(%to, "Turn changed"),
        GameEvent::SourceFailed { color, error } => println!("{} failed: {}", color, error),
        GameEvent::GameOver { outcome, scores } => println!(
            "Game over: {} (White {} - Black {})",
            outcome, scores.white, scores.black
        ),
    }
}

/// Reads stdin lines and routes parsed clicks to the human whose turn it is.
async fn forward_stdin(
    senders: HashMap<Color, mpsc::UnboundedSender<HumanInput>>,
    turn_rx: watch::Receiver<Color>,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                debug!("stdin closed");
                return;
            }
            Err(e) => {
                warn!(error = %e, "Failed to read stdin");
                return;
            }
        };

        let Some(input) = parse_input(&line) else {
            println!(
                "Enter a row and column between 1 and {}, e.g. `7 4`, or `pass`.",
                BOARD_SIZE
            );
            continue;
        };
        let turn = *turn_rx.borrow();
        match senders.get(&turn) {
            Some(tx) => {
                if tx.send(input).is_err() {
                    return;
                }
            }
            None => println!("It is not a human's turn."),
        }
    }
}
