// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deck types.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Card;

/// Builds a deck from inclusive ranges of card identifiers.
const fn build_deck<const N: usize>(ranges: &[(u8, u8)]) -> [Card; N] {
    let mut cards = [Card::EMPTY; N];
    let mut pos = 0;
    let mut r = 0;

    while r < ranges.len() {
        let (first, last) = ranges[r];
        let mut id = first;
        while id <= last {
            cards[pos] = match Card::from_id(id) {
                Some(card) => card,
                None => panic!("invalid card id"),
            };
            pos += 1;
            id += 1;
        }
        r += 1;
    }

    assert!(pos == N, "deck size mismatch");
    cards
}

static STANDARD: [Card; 52] = build_deck(&[(1, 52)]);
static ONE_JOKER: [Card; 53] = build_deck(&[(1, 53)]);
static TWO_JOKERS: [Card; 54] = build_deck(&[(1, 54)]);
// Deuces through sixes removed.
static STRIPPED32: [Card; 32] = build_deck(&[(21, 52)]);
// Eights, nines and tens removed.
static STRIPPED40: [Card; 40] = build_deck(&[(1, 24), (37, 52)]);
static STRIPPED40J: [Card; 41] = build_deck(&[(1, 24), (37, 53)]);
// Nines and up.
static PINOCHLE: [Card; 24] = build_deck(&[(29, 52)]);

/// A type of deck.
///
/// Each deck type has a fixed ordered list of cards, the numeric values are
/// stable and shared with bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum DeckType {
    /// The 52 cards deck.
    #[default]
    Standard = 0,
    /// 52 cards plus a joker.
    OneJoker = 1,
    /// 52 cards plus a black and a red joker.
    TwoJokers = 2,
    /// Sevens and up, 32 cards.
    Stripped32 = 3,
    /// Eights, nines and tens removed, 40 cards.
    Stripped40 = 4,
    /// Eights, nines and tens removed plus a joker, 41 cards.
    Stripped40J = 5,
    /// Nines and up, 24 cards.
    Pinochle = 6,
}

impl DeckType {
    /// All deck types in numeric order.
    pub const ALL: [DeckType; 7] = [
        DeckType::Standard,
        DeckType::OneJoker,
        DeckType::TwoJokers,
        DeckType::Stripped32,
        DeckType::Stripped40,
        DeckType::Stripped40J,
        DeckType::Pinochle,
    ];

    /// The cards in a fresh deck of this type.
    pub fn cards(&self) -> &'static [Card] {
        match self {
            DeckType::Standard => &STANDARD,
            DeckType::OneJoker => &ONE_JOKER,
            DeckType::TwoJokers => &TWO_JOKERS,
            DeckType::Stripped32 => &STRIPPED32,
            DeckType::Stripped40 => &STRIPPED40,
            DeckType::Stripped40J => &STRIPPED40J,
            DeckType::Pinochle => &PINOCHLE,
        }
    }

    /// The number of cards in a fresh deck of this type.
    pub fn size(&self) -> usize {
        self.cards().len()
    }

    /// Creates a deck type from its numeric value.
    pub fn from_index(index: u8) -> Option<DeckType> {
        DeckType::ALL.get(index as usize).copied()
    }
}

impl fmt::Display for DeckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeckType::Standard => "standard",
            DeckType::OneJoker => "one joker",
            DeckType::TwoJokers => "two jokers",
            DeckType::Stripped32 => "stripped 32",
            DeckType::Stripped40 => "stripped 40",
            DeckType::Stripped40J => "stripped 40 with joker",
            DeckType::Pinochle => "pinochle",
        };

        write!(f, "{name}")
    }
}
