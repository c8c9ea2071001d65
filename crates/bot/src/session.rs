// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table session message loop.
use anyhow::Result;
use log::{error, info};
use tokio::sync::{broadcast, mpsc};

use deepthought_core::{
    game_state::{ActionRequest, GameState, HandSnapshot},
    message::{Action, Message},
};

/// A Poker bot strategy.
pub trait Strategy: Send + 'static {
    /// Observes a message after it has been applied to the game state.
    fn observe(&mut self, _msg: &Message, _state: &GameState) {}

    /// Chooses an action given the request and a snapshot of the table.
    fn execute(&mut self, req: &ActionRequest, snapshot: &HandSnapshot) -> Result<Action>;
}

/// A session for one table.
///
/// Receives the table messages from the transport, keeps the game state and
/// sends back the strategy actions.
pub struct Session<S: Strategy> {
    strategy: S,
    state: GameState,
    messages_rx: mpsc::Receiver<Message>,
    actions_tx: mpsc::Sender<Action>,
    shutdown_broadcast_rx: broadcast::Receiver<()>,
}

impl<S: Strategy> Session<S> {
    /// Creates a new session for the given player.
    pub fn new(
        strategy: S,
        player: &str,
        messages_rx: mpsc::Receiver<Message>,
        actions_tx: mpsc::Sender<Action>,
        shutdown_broadcast_rx: broadcast::Receiver<()>,
    ) -> Self {
        Self {
            strategy,
            state: GameState::new(player),
            messages_rx,
            actions_tx,
            shutdown_broadcast_rx,
        }
    }

    /// Runs the session message loop until the table is done or the messages
    /// channel is closed.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            // Shutdown takes priority over queued messages.
            let msg = tokio::select! {
                biased;
                _ = self.shutdown_broadcast_rx.recv() => {
                    return Ok(());
                }
                res = self.messages_rx.recv() => match res {
                    Some(msg) => msg,
                    None => return Ok(()),
                },
            };

            self.state.handle_message(&msg);
            self.strategy.observe(&msg, &self.state);

            if matches!(msg, Message::TableIsDone | Message::ServerIsShuttingDown) {
                info!("Leaving table with {} chips won", self.state.winnings());
                return Ok(());
            }

            if let Some(req) = self.state.action_request() {
                let snapshot = self.state.snapshot();
                match self.strategy.execute(req, &snapshot) {
                    Ok(action) => {
                        // The transport is gone.
                        if self.actions_tx.send(action).await.is_err() {
                            return Ok(());
                        }
                    }
                    Err(err) => error!("No action for request {:?}: {err:#}", req.actions),
                }

                self.state.reset_action_request();
            }
        }
    }

    /// Returns the session strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}
