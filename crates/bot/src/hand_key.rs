// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Starting hand keys.
//!
//! A starting hand is identified by the symbols of its two ranks, lower rank
//! first, followed by an `s` when both cards have the same suit, so that ace
//! king of spades is `KAs` and a pair of sevens is `77`.
use deepthought_core::poker::{Card, Rank};

/// Marker appended to the key of suited hands.
pub const SUITED: char = 's';

/// Translates two hole cards into their starting hand key.
pub fn translate(c1: Card, c2: Card) -> String {
    let (low, high) = if c1.rank() > c2.rank() {
        (c2, c1)
    } else {
        (c1, c2)
    };

    let mut key = String::with_capacity(3);
    key.push(low.rank().symbol());
    key.push(high.rank().symbol());

    if c1.suit() == c2.suit() {
        key.push(SUITED);
    }

    key
}

/// Checks if `key` is a well formed starting hand key.
pub fn is_canonical(key: &str) -> bool {
    let mut chars = key.chars();
    let (Some(r1), Some(r2)) = (chars.next(), chars.next()) else {
        return false;
    };

    let (Some(low), Some(high)) = (rank(r1), rank(r2)) else {
        return false;
    };

    match (chars.next(), chars.next()) {
        (None, None) => low <= high,
        // Two cards with the same rank cannot be suited.
        (Some(SUITED), None) => low < high,
        _ => false,
    }
}

fn rank(c: char) -> Option<Rank> {
    // Only upper case symbols are canonical.
    if c.is_ascii_lowercase() {
        None
    } else {
        Rank::from_char(c)
    }
}
