// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The Deep Thought bot strategy.
use anyhow::Result;
use log::{debug, info};

use deepthought_core::{
    game_state::{ActionRequest, GameState, HandSnapshot},
    message::{Action, Message},
    poker::HandRank,
};

use crate::{
    engine::{AgentState, Engine},
    session::Strategy,
};

/// A bot playing at one table.
///
/// Keeps the raise bookkeeping for the table and delegates decisions to the
/// shared [Engine].
#[derive(Debug)]
pub struct Agent {
    engine: Engine,
    state: AgentState,
}

impl Agent {
    /// Creates an agent using the given engine.
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            state: AgentState::default(),
        }
    }

    /// The agent raise bookkeeping.
    pub fn state(&self) -> &AgentState {
        &self.state
    }
}

impl Strategy for Agent {
    fn observe(&mut self, msg: &Message, state: &GameState) {
        match msg {
            Message::PlayIsStarted {
                players,
                dealer,
                small_blind,
                big_blind,
                ..
            } => {
                info!(
                    "New hand with {} players, dealer {dealer}, blinds {small_blind}/{big_blind}",
                    players.len()
                );
            }
            Message::TableChangedState(phase) => debug!("Table is now in {phase}"),
            Message::YouHaveBeenDealtACard(card) => debug!("I've been dealt {card}"),
            Message::CommunityHasBeenDealtACard(card) => {
                debug!("Community card {card}, {} on board", state.board().len());
            }
            Message::PlayerBetSmallBlind { player, amount } => {
                debug!("{player} bet small blind {amount}");
            }
            Message::PlayerBetBigBlind { player, amount } => {
                debug!(
                    "{player} bet big blind {amount} (small blind {})",
                    state.small_blind()
                );
            }
            Message::PlayerCalled { player, amount } => debug!("{player} called {amount}"),
            Message::PlayerRaised { player, amount } => {
                debug!("{player} raised {amount}");
                if player != state.player() {
                    self.state.on_raise();
                }
            }
            Message::PlayerWentAllIn { player, amount } => {
                debug!("{player} went all in with {amount}");
            }
            Message::PlayerChecked { player } => debug!("{player} checked"),
            Message::PlayerFolded { player, investment } => {
                debug!("{player} folded after investing {investment}");
            }
            Message::PlayerForcedFolded { player, investment } => {
                debug!("{player} was forced to fold after investing {investment}");
            }
            Message::PlayerQuit { player } => {
                debug!("{player} quit, {} players left", state.players().len());
            }
            Message::YouWonAmount { amount } => info!("I won {amount}"),
            Message::ShowDown(hands) => {
                for hand in hands {
                    let cards = hand
                        .cards
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(" ");
                    let result = if hand.folded {
                        "folded".to_string()
                    } else {
                        format!("won {}", hand.won)
                    };

                    info!("Show down {}: {} [{cards}] {result}", hand.player, hand.hand);
                }

                if let Some(player) = state.big_blind_player() {
                    debug!("Big blind for this hand was {player}");
                }
            }
            Message::TableIsDone => info!("Table is done, won {}", state.winnings()),
            Message::ServerIsShuttingDown => info!("Server is shutting down"),
            Message::ActionRequest { actions } => {
                let actions = actions
                    .iter()
                    .map(|a| a.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                debug!("Action requested in {}: {actions}", state.phase());
            }
        }
    }

    fn execute(&mut self, req: &ActionRequest, snapshot: &HandSnapshot) -> Result<Action> {
        let best_hand = HandRank::classify(&snapshot.cards());
        debug!(
            "Best hand {} with {} community cards",
            best_hand,
            snapshot.community_cards.len()
        );

        let action = self
            .engine
            .decide(&mut self.state, req, snapshot, best_hand)?;
        info!("I'm going to {action}");

        Ok(action)
    }
}
