// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deep Thought Poker Bot.
//!
//! A rule based bot for Texas Hold'em tables. Pre-flop decisions use the win
//! probability of the starting hand for the number of seated players, later
//! rounds use the best hand made with the community cards.
//!
//! Table messages are replayed from a JSON-lines log, one [Message] per line:
//!
//! ```
//! let messages = deepthought_bot::parse_messages(r#"
//! {"TableChangedState":"Flop"}
//! {"ActionRequest":{"actions":[{"kind":"Fold"},{"kind":"Check"}]}}
//! "#).unwrap();
//!
//! assert_eq!(messages.len(), 2);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Context, Result};
use log::info;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tokio::{
    signal,
    sync::{broadcast, mpsc},
};

pub mod agent;
pub mod engine;
pub mod hand_key;
pub mod premium;
pub mod session;
pub mod stats;

pub use agent::Agent;
pub use deepthought_core as core;
pub use engine::{Engine, UnknownPhase};
pub use session::{Session, Strategy};

use deepthought_core::message::{Action, Message};
use stats::StartingHands;

/// Bot configuration.
#[derive(Debug)]
pub struct Config {
    /// The JSON-lines table messages log.
    pub events: PathBuf,
    /// The bot player name.
    pub player: String,
    /// The statistics directory, the builtin statistics if not set.
    pub stats: Option<PathBuf>,
    /// What to do when asked to act outside a betting round.
    pub unknown_phase: UnknownPhase,
}

/// Runs the bot on the messages log.
pub async fn run(config: Config) -> Result<()> {
    let stats = match &config.stats {
        Some(dir) => StartingHands::load(dir)?,
        None => StartingHands::builtin()?,
    };

    let engine = Engine::new(Arc::new(stats), config.unknown_phase);
    let messages = read_messages(&config.events)?;
    let num_messages = messages.len();

    info!(
        "Replaying {num_messages} messages from {} as {}",
        config.events.display(),
        config.player
    );

    let (shutdown_broadcast_tx, shutdown_broadcast_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        let _ = signal::ctrl_c().await;
        info!("Received Ctrl-c signal");
        drop(shutdown_broadcast_tx);
    });

    let actions = replay(
        messages,
        &config.player,
        Agent::new(engine),
        shutdown_broadcast_rx,
    )
    .await?;

    info!("Sent {} actions for {num_messages} messages", actions.len());

    Ok(())
}

/// Reads a JSON-lines messages log.
pub fn read_messages(path: impl AsRef<Path>) -> Result<Vec<Message>> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    parse_messages(&text).with_context(|| format!("Invalid messages log {}", path.display()))
}

/// Parses JSON-lines messages, blank lines are skipped.
pub fn parse_messages(text: &str) -> Result<Vec<Message>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("Line {}: {line}", idx + 1))
        })
        .collect()
}

/// Feeds the messages to a session for the given player and strategy, returns
/// the actions sent by the session.
///
/// The replay stops early when the shutdown channel is closed.
pub async fn replay<S: Strategy>(
    messages: Vec<Message>,
    player: &str,
    strategy: S,
    shutdown_broadcast_rx: broadcast::Receiver<()>,
) -> Result<Vec<Action>> {
    let (messages_tx, messages_rx) = mpsc::channel(32);
    let (actions_tx, mut actions_rx) = mpsc::channel(32);

    let mut session = Session::new(
        strategy,
        player,
        messages_rx,
        actions_tx,
        shutdown_broadcast_rx,
    );
    let session_task = tokio::spawn(async move { session.run().await });

    let feeder_task = tokio::spawn(async move {
        for msg in messages {
            // The session has stopped.
            if messages_tx.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut actions = Vec::new();
    while let Some(action) = actions_rx.recv().await {
        actions.push(action);
    }

    feeder_task.await?;
    session_task.await??;

    Ok(actions)
}
