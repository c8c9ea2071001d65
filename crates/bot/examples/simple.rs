// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A simple example bot strategy replaying a messages log.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::broadcast;

use deepthought_bot::{
    Strategy,
    core::{
        game_state::{ActionRequest, HandSnapshot},
        message::{Action, ActionKind},
    },
};

struct AlwaysCallOrCheck;

impl Strategy for AlwaysCallOrCheck {
    fn execute(&mut self, req: &ActionRequest, snapshot: &HandSnapshot) -> Result<Action> {
        // Raise preflop with a pair.
        if let Some((c1, c2)) = snapshot.hole_cards {
            if c1.rank() == c2.rank() && snapshot.community_cards.is_empty() {
                if let Some(raise) = req.action(ActionKind::Raise) {
                    return Ok(*raise);
                }
            }
        }

        let action = [ActionKind::Call, ActionKind::Check, ActionKind::Fold]
            .into_iter()
            .find_map(|kind| req.action(kind));

        match action {
            Some(action) => Ok(*action),
            None => bail!("No action to call, check or fold"),
        }
    }
}

#[derive(Debug, Parser)]
struct Cli {
    /// The JSON-lines table messages log.
    #[clap(long, short, default_value = "crates/bot/data/hand.jsonl")]
    events: PathBuf,
    /// The bot player name.
    #[clap(long, short, default_value = "Deep_Thought")]
    name: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let messages = deepthought_bot::read_messages(&cli.events)?;
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let actions =
        deepthought_bot::replay(messages, &cli.name, AlwaysCallOrCheck, shutdown_rx).await?;

    for action in actions {
        println!("{action}");
    }

    Ok(())
}
