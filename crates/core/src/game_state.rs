// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Client game state types.
use log::warn;

use crate::{
    message::{Action, ActionKind, Message},
    poker::{Card, Chips, Phase},
};

/// The number of community cards in a hand.
pub const MAX_BOARD_CARDS: usize = 5;

/// A player action request from the server.
#[derive(Debug, Clone, Default)]
pub struct ActionRequest {
    /// The actions choices requested by server.
    pub actions: Vec<Action>,
}

impl ActionRequest {
    /// Creates a request from the given legal actions.
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    /// Returns the action of the given kind if it is legal.
    pub fn action(&self, kind: ActionKind) -> Option<&Action> {
        self.actions.iter().find(|a| a.kind == kind)
    }

    /// Checks if the request contains the given action.
    pub fn contains(&self, action: &Action) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}

/// A read only copy of the table state taken when an action is requested.
#[derive(Debug, Clone, Default)]
pub struct HandSnapshot {
    /// The local player name.
    pub player: String,
    /// The local player hole cards.
    pub hole_cards: Option<(Card, Card)>,
    /// The community cards dealt so far.
    pub community_cards: Vec<Card>,
    /// The betting phase.
    pub phase: Phase,
    /// The number of players seated at the table.
    pub players: usize,
    /// The dealer for this hand.
    pub dealer: Option<String>,
    /// The small blind player for this hand.
    pub small_blind_player: Option<String>,
    /// The big blind amount.
    pub big_blind: Chips,
}

impl HandSnapshot {
    /// Checks if the local player is the dealer.
    pub fn is_dealer(&self) -> bool {
        self.dealer.as_deref() == Some(self.player.as_str())
    }

    /// Checks if the local player pays the small blind.
    pub fn is_small_blind(&self) -> bool {
        self.small_blind_player.as_deref() == Some(self.player.as_str())
    }

    /// Returns the hole cards followed by the community cards.
    pub fn cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(7);
        if let Some((c1, c2)) = self.hole_cards {
            cards.push(c1);
            cards.push(c2);
        }

        cards.extend_from_slice(&self.community_cards);
        cards
    }
}

/// This client game state.
#[derive(Debug)]
pub struct GameState {
    player: String,
    players: Vec<String>,
    dealer: Option<String>,
    small_blind_player: Option<String>,
    big_blind_player: Option<String>,
    small_blind: Chips,
    big_blind: Chips,
    phase: Phase,
    hole_cards: Vec<Card>,
    board: Vec<Card>,
    winnings: Chips,
    action_request: Option<ActionRequest>,
}

impl GameState {
    /// Creates a new state for the local player.
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            players: Vec::default(),
            dealer: None,
            small_blind_player: None,
            big_blind_player: None,
            small_blind: Chips::ZERO,
            big_blind: Chips::ZERO,
            phase: Phase::Waiting,
            hole_cards: Vec::default(),
            board: Vec::default(),
            winnings: Chips::ZERO,
            action_request: None,
        }
    }

    /// Handle an incoming server message.
    pub fn handle_message(&mut self, msg: &Message) {
        match msg {
            Message::PlayIsStarted {
                players,
                dealer,
                small_blind_player,
                big_blind_player,
                small_blind,
                big_blind,
            } => {
                // Prepare for a new hand.
                self.players = players.clone();
                self.dealer = Some(dealer.clone());
                self.small_blind_player = Some(small_blind_player.clone());
                self.big_blind_player = Some(big_blind_player.clone());
                self.small_blind = *small_blind;
                self.big_blind = *big_blind;
                self.phase = Phase::PreFlop;
                self.hole_cards.clear();
                self.board.clear();
                self.action_request = None;
            }
            Message::TableChangedState(phase) => {
                self.phase = *phase;
            }
            Message::YouHaveBeenDealtACard(card) => {
                self.hole_cards.push(*card);
            }
            Message::CommunityHasBeenDealtACard(card) => {
                if self.board.len() < MAX_BOARD_CARDS {
                    self.board.push(*card);
                } else {
                    warn!("Ignoring community card {card}, the board is full");
                }
            }
            Message::PlayerBetSmallBlind { amount, .. } => {
                self.small_blind = *amount;
            }
            Message::PlayerBetBigBlind { amount, .. } => {
                self.big_blind = *amount;
            }
            Message::PlayerQuit { player } => {
                self.players.retain(|p| p != player);
            }
            Message::YouWonAmount { amount } => {
                self.winnings += *amount;
            }
            Message::ShowDown(_) => {
                self.phase = Phase::Showdown;
                self.action_request = None;
            }
            Message::TableIsDone => {
                self.phase = Phase::Waiting;
                self.action_request = None;
            }
            Message::ActionRequest { actions } => {
                self.action_request = Some(ActionRequest::new(actions.clone()));
            }
            _ => {}
        }
    }

    /// Takes a snapshot of the current hand.
    pub fn snapshot(&self) -> HandSnapshot {
        let hole_cards = match self.hole_cards.as_slice() {
            [c1, c2, ..] => Some((*c1, *c2)),
            _ => None,
        };

        HandSnapshot {
            player: self.player.clone(),
            hole_cards,
            community_cards: self.board.clone(),
            phase: self.phase,
            players: self.players.len(),
            dealer: self.dealer.clone(),
            small_blind_player: self.small_blind_player.clone(),
            big_blind: self.big_blind,
        }
    }

    /// Returns the requested player action if any.
    pub fn action_request(&self) -> Option<&ActionRequest> {
        self.action_request.as_ref()
    }

    /// Reset the action request.
    pub fn reset_action_request(&mut self) {
        self.action_request = None;
    }

    /// The local player name.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// Returns the players seated at the table.
    pub fn players(&self) -> &[String] {
        &self.players
    }

    /// The current betting phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The big blind player for this hand.
    pub fn big_blind_player(&self) -> Option<&str> {
        self.big_blind_player.as_deref()
    }

    /// The small blind amount.
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    /// The chips won by the local player at this table.
    pub fn winnings(&self) -> Chips {
        self.winnings
    }
}
