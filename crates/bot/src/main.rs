// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deep Thought Poker Bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use clap::Parser;
use log::error;
use std::path::PathBuf;

use deepthought_bot::UnknownPhase;

#[derive(Debug, Parser)]
struct Cli {
    /// The JSON-lines table messages log.
    #[clap(long, short)]
    events: PathBuf,
    /// The bot player name.
    #[clap(long, short, default_value = "Deep_Thought")]
    name: String,
    /// The starting hands statistics directory, builtin statistics if not set.
    #[clap(long, short)]
    stats: Option<PathBuf>,
    /// What to do when asked to act outside a betting round (fold or fail).
    #[clap(long)]
    unknown_phase: Option<UnknownPhase>,
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let config = deepthought_bot::Config {
        events: cli.events,
        player: cli.name,
        stats: cli.stats,
        unknown_phase: cli.unknown_phase.unwrap_or_default(),
    };

    if let Err(e) = deepthought_bot::run(config).await {
        error!("{e:#}");
    }
}
