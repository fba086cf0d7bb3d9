// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Blackjack hand totals.
use serde::{Deserialize, Serialize};

use deckhand_cards::{Card, Error, Rank, Result};

/// The total of a blackjack hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Total {
    /// The best total not going over 21 when possible.
    pub value: u32,
    /// An ace counts as eleven.
    pub soft: bool,
}

impl Total {
    /// Checks if the hand is over 21.
    pub fn is_bust(&self) -> bool {
        self.value > 21
    }
}

/// Returns the total of a blackjack hand.
///
/// Pips count at face value, tens and face cards count ten, aces count one
/// and one ace counts eleven if that does not go over 21.
///
/// ```
/// # use deckhand_eval::{Card, Rank, Suit, blackjack};
/// let hand = [
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::Six, Suit::Hearts),
/// ];
/// let total = blackjack::total(&hand).unwrap();
/// assert_eq!(total.value, 17);
/// assert!(total.soft);
/// ```
pub fn total(cards: &[Card]) -> Result<Total> {
    let mut value = 0;
    let mut ace = false;

    for &card in cards {
        if !card.is_standard() {
            return Err(Error::InvalidCard(card));
        }

        value += match card.rank() {
            Rank::Ace => {
                ace = true;
                1
            }
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            r => r.index() as u32 + 2,
        };
    }

    let soft = ace && value < 12;
    if soft {
        value += 10;
    }

    Ok(Total { value, soft })
}
