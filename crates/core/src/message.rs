// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Type definitions for messages sent by the game server to the bot.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::poker::{Card, Chips, HandRank, Phase};

/// Message sent by the server to a player at a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    /// A new hand is starting.
    PlayIsStarted {
        /// The players seated at the table.
        players: Vec<String>,
        /// The dealer for this hand.
        dealer: String,
        /// The player who pays the small blind.
        small_blind_player: String,
        /// The player who pays the big blind.
        big_blind_player: String,
        /// The small blind amount.
        small_blind: Chips,
        /// The big blind amount.
        big_blind: Chips,
    },
    /// The table moved to a new phase.
    TableChangedState(Phase),
    /// A hole card was dealt to this player.
    YouHaveBeenDealtACard(Card),
    /// A community card was dealt.
    CommunityHasBeenDealtACard(Card),
    /// A player paid the small blind.
    PlayerBetSmallBlind {
        /// The player name.
        player: String,
        /// The blind amount.
        amount: Chips,
    },
    /// A player paid the big blind.
    PlayerBetBigBlind {
        /// The player name.
        player: String,
        /// The blind amount.
        amount: Chips,
    },
    /// A player called.
    PlayerCalled {
        /// The player name.
        player: String,
        /// The call amount.
        amount: Chips,
    },
    /// A player raised.
    PlayerRaised {
        /// The player name.
        player: String,
        /// The raise amount.
        amount: Chips,
    },
    /// A player went all in.
    PlayerWentAllIn {
        /// The player name.
        player: String,
        /// The all in amount.
        amount: Chips,
    },
    /// A player checked.
    PlayerChecked {
        /// The player name.
        player: String,
    },
    /// A player folded.
    PlayerFolded {
        /// The player name.
        player: String,
        /// The chips the player had put in the pot.
        investment: Chips,
    },
    /// A player was folded by the server for exceeding the time limit.
    PlayerForcedFolded {
        /// The player name.
        player: String,
        /// The chips the player had put in the pot.
        investment: Chips,
    },
    /// A player left the table.
    PlayerQuit {
        /// The player name.
        player: String,
    },
    /// This player won chips.
    YouWonAmount {
        /// The won amount.
        amount: Chips,
    },
    /// Hand results.
    ShowDown(Vec<PlayerShowDown>),
    /// The table game has ended.
    TableIsDone,
    /// The server is going away.
    ServerIsShuttingDown,
    /// The server asks this player to act.
    ActionRequest {
        /// The list of legal actions.
        actions: Vec<Action>,
    },
}

/// A player show down result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerShowDown {
    /// The player name.
    pub player: String,
    /// The chips won by the player.
    pub won: Chips,
    /// The player folded before the show down.
    pub folded: bool,
    /// The player best hand.
    pub hand: HandRank,
    /// The player best cards.
    pub cards: Vec<Card>,
}

/// The kind of a player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Player folds.
    Fold,
    /// Player checks.
    Check,
    /// Player calls.
    Call,
    /// Player raises.
    Raise,
    /// Player goes all in.
    AllIn,
}

impl ActionKind {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Fold => "FOLD",
            ActionKind::Check => "CHECK",
            ActionKind::Call => "CALL",
            ActionKind::Raise => "RAISE",
            ActionKind::AllIn => "ALL_IN",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A legal player action with the amount set by the server.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The action kind.
    pub kind: ActionKind,
    /// The action amount, only used for call, raise and all in.
    #[serde(default)]
    pub amount: Chips,
}

impl Action {
    /// Creates a new action.
    pub fn new(kind: ActionKind, amount: Chips) -> Self {
        Self { kind, amount }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ActionKind::Call | ActionKind::Raise | ActionKind::AllIn => {
                write!(f, "{} with {}", self.kind, self.amount)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
