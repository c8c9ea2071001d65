// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deep Thought core types shared by the table tracker and the bot.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod game_state;
pub mod message;
pub mod poker;
