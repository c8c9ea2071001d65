// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deep Thought cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use deepthought_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let kd: Card = "KD".parse().unwrap();
//! assert!(ah.rank() > kd.rank());
//! ```
//!
//! and a [Deck] type for shuffling, dealing, and iterating cards in the deck.
//!
//! For example to iterate through all starting hands:
//!
//! ```
//! # use deepthought_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(2, |hand| {
//!     assert_eq!(hand.len(), 2);
//!     counter += 1;
//! });
//! assert_eq!(counter, 1_326);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, Rank, Suit};
