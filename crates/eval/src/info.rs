// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand descriptions for display.
use std::{cmp::Reverse, fmt};

use deckhand_cards::{Card, Rank, Result};

use crate::{HandRank, HandValue};

/// A 5-card poker hand broken down for display.
///
/// ```
/// # use deckhand_eval::*;
/// let cards = [
///     Card::new(Rank::Six, Suit::Clubs),
///     Card::new(Rank::Deuce, Suit::Hearts),
///     Card::new(Rank::Six, Suit::Hearts),
///     Card::new(Rank::Deuce, Suit::Spades),
///     Card::new(Rank::Six, Suit::Diamonds),
/// ];
/// let info = HandInfo::new(&cards).unwrap();
/// assert_eq!(info.rank(), HandRank::FullHouse);
/// assert_eq!(info.to_string(), "Sixes Full of deuces");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandInfo {
    value: HandValue,
    ranks: Vec<Rank>,
    cards: [Card; 5],
}

impl HandInfo {
    /// Creates the info for exactly five cards.
    pub fn new(cards: &[Card]) -> Result<HandInfo> {
        let value = HandValue::eval5(cards)?;

        let mut counts = [0u8; 13];
        for card in cards {
            counts[card.rank_index() as usize] += 1;
        }

        // Bigger groups first, then higher ranks.
        let mut sorted = [cards[0], cards[1], cards[2], cards[3], cards[4]];
        sorted.sort_by_key(|c| {
            (
                Reverse(counts[c.rank_index() as usize]),
                Reverse(c.rank()),
                Reverse(c.suit()),
            )
        });

        let rank = value.rank();
        if matches!(rank, HandRank::Straight | HandRank::StraightFlush)
            && sorted[0].rank() == Rank::Ace
            && sorted[1].rank() == Rank::Five
        {
            // The wheel ace plays low.
            sorted.rotate_left(1);
        }

        let mut ranks = Vec::with_capacity(5);
        for card in &sorted {
            if ranks.last() != Some(&card.rank()) {
                ranks.push(card.rank());
            }
        }

        if matches!(rank, HandRank::Straight | HandRank::StraightFlush) {
            ranks.truncate(1);
        }

        Ok(HandInfo {
            value,
            ranks,
            cards: sorted,
        })
    }

    /// The hand value.
    pub fn value(&self) -> HandValue {
        self.value
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.value.rank()
    }

    /// The ranks that decide the hand, group ranks first then kickers.
    ///
    /// Straights only report the high card, five for the wheel.
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    /// The cards with groups first and kickers last, from high to low.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for HandInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.ranks;
        let names = |from: usize| {
            r[from..]
                .iter()
                .map(Rank::name)
                .collect::<Vec<_>>()
                .join(", ")
        };

        match self.rank() {
            HandRank::StraightFlush if r[0] == Rank::Ace => write!(f, "Royal Flush"),
            HandRank::StraightFlush => {
                write!(f, "{}-high Straight Flush", capitalize(r[0].name()))
            }
            HandRank::FourOfAKind => write!(f, "Four {}, {}", r[0].plural(), r[1].name()),
            HandRank::FullHouse => write!(
                f,
                "{} Full of {}",
                capitalize(&r[0].plural()),
                r[1].plural()
            ),
            HandRank::Flush => write!(f, "Flush, {}", names(0)),
            HandRank::Straight => write!(f, "{}-high Straight", capitalize(r[0].name())),
            HandRank::ThreeOfAKind => write!(f, "Three {}, {}", r[0].plural(), names(1)),
            HandRank::TwoPair => write!(
                f,
                "Two Pair, {} and {}, {}",
                r[0].plural(),
                r[1].plural(),
                r[2].name()
            ),
            HandRank::OnePair => write!(f, "Pair of {}, {}", r[0].plural(), names(1)),
            HandRank::HighCard => write!(f, "No Pair, {}", names(0)),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
