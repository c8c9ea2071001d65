// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deep Thought best hand classifier.
//!
//! Classifies the hole cards together with the community cards into the best
//! poker hand category they make:
//!
//! ```
//! # use deepthought_eval::*;
//! let cards = ["AH", "AD", "9C", "9S", "2D"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let rank = HandRank::classify(&cards);
//! assert_eq!(rank, HandRank::TwoPair);
//! assert!(rank.is_better_than(HandRank::OnePair));
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::HandRank;

// Reexport cards types.
pub use deepthought_cards::{Card, Deck, Rank, Suit};
