// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Premium starting hands ranking.
use deepthought_core::poker::{Card, Rank};

/// The premium hands from the strongest to the weakest with their score.
const PREMIUM_HANDS: [(Rank, Rank, u8); 10] = [
    (Rank::Ace, Rank::Ace, 10),
    (Rank::King, Rank::King, 9),
    (Rank::Queen, Rank::Queen, 8),
    (Rank::Ace, Rank::King, 7),
    (Rank::Jack, Rank::Jack, 6),
    (Rank::Ten, Rank::Ten, 5),
    (Rank::Nine, Rank::Nine, 4),
    (Rank::Eight, Rank::Eight, 3),
    (Rank::Ace, Rank::Queen, 2),
    (Rank::Seven, Rank::Seven, 1),
];

/// The highest score.
pub const MAX_SCORE: u8 = 10;

/// Scores two hole cards, returns 0 if they are not a premium hand.
///
/// Suits and cards order are ignored.
pub fn rank(c1: Card, c2: Card) -> u8 {
    let (r1, r2) = (c1.rank(), c2.rank());
    PREMIUM_HANDS
        .iter()
        .find(|(p1, p2, _)| (r1 == *p1 && r2 == *p2) || (r1 == *p2 && r2 == *p1))
        .map(|(_, _, score)| *score)
        .unwrap_or(0)
}
