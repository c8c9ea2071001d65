// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best hand classifier.
//!
//! Classifies up to seven cards into the best poker hand category they can
//! make, kickers are not considered so two hands with the same [HandRank] are
//! not ordered with respect to each other.
use serde::{Deserialize, Serialize};
use std::fmt;

use deepthought_cards::Card;

/// Mask of five consecutive ranks.
const STRAIGHT_MASK: u16 = 0x1f;

/// A poker hand category ordered from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pair.
    HighCard = 0,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five consecutive ranks.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// A straight of the same suit.
    StraightFlush,
    /// An ace high straight flush.
    RoyalFlush,
}

impl HandRank {
    /// The number of hand categories.
    pub const COUNT: usize = 10;

    /// Returns the best category for the given cards.
    ///
    /// Accepts from zero up to seven cards, with fewer than five cards only
    /// pairs, trips and quads can be made. Cards past the seventh are ignored.
    pub fn classify(cards: &[Card]) -> HandRank {
        let cards = &cards[..cards.len().min(7)];

        let mut rank_counts = [0u8; 13];
        let mut rank_mask = 0u16;
        let mut suit_masks = [0u16; 4];

        for card in cards {
            let r = card.rank_bits() as usize;
            rank_counts[r] += 1;
            rank_mask |= 1 << r;
            suit_masks[card.suit_bits() as usize] |= 1 << r;
        }

        let flush = suit_masks.iter().find(|m| m.count_ones() >= 5).copied();
        if let Some(top) = flush.and_then(straight_top) {
            return if top == 12 {
                HandRank::RoyalFlush
            } else {
                HandRank::StraightFlush
            };
        }

        let mut trips = 0;
        let mut pairs = 0;
        for count in rank_counts {
            match count {
                4 => return HandRank::FourOfAKind,
                3 => trips += 1,
                2 => pairs += 1,
                _ => {}
            }
        }

        if trips > 0 && (trips + pairs) > 1 {
            HandRank::FullHouse
        } else if flush.is_some() {
            HandRank::Flush
        } else if straight_top(rank_mask).is_some() {
            HandRank::Straight
        } else if trips > 0 {
            HandRank::ThreeOfAKind
        } else if pairs > 1 {
            HandRank::TwoPair
        } else if pairs == 1 {
            HandRank::OnePair
        } else {
            HandRank::HighCard
        }
    }

    /// The ordinal value of this category, 0 for a high card.
    pub fn order_value(&self) -> u8 {
        *self as u8
    }

    /// Checks if this hand is strictly better than `other`.
    pub fn is_better_than(&self, other: HandRank) -> bool {
        self.order_value() > other.order_value()
    }

    /// The category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High card",
            HandRank::OnePair => "One pair",
            HandRank::TwoPair => "Two pairs",
            HandRank::ThreeOfAKind => "Three of a kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full house",
            HandRank::FourOfAKind => "Four of a kind",
            HandRank::StraightFlush => "Straight flush",
            HandRank::RoyalFlush => "Royal flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the rank index of the highest card of a straight in `mask` if any.
fn straight_top(mask: u16) -> Option<usize> {
    // Shift ranks by one and copy the ace in the low position for the wheel.
    let mask = (mask << 1) | ((mask >> 12) & 1);
    (0..=9)
        .rev()
        .find(|&low| (mask >> low) & STRAIGHT_MASK == STRAIGHT_MASK)
        .map(|low| low + 3)
}
