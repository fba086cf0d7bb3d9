// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deckhand poker hand evaluator.
//!
//! Poker hand evaluator for hands of five or more cards, every 5-card hand
//! maps to one of the 7462 equivalence classes of the [Cactus Kev's][kevlink]
//! evaluator (see examples for enumerating all 5 and 7 cards hands).
//!
//! To use the evaluator create a hand and use [HandValue] to evaluate the hand
//! and get its rank:
//!
//! ```
//! # use deckhand_eval::*;
//! // 2c, 2d, .., 4d
//! let deck = CardList::deck(DeckType::Standard);
//! let v1 = HandValue::eval(&deck.as_slice()[0..5]).unwrap();
//! let v2 = HandValue::eval(&deck.as_slice()[5..10]).unwrap();
//! assert!(v1 > v2);
//!
//! let info = HandInfo::new(&deck.as_slice()[5..10]).unwrap();
//! assert_eq!(info.to_string(), "Treys Full of fours");
//! ```
//!
//! The [blackjack] module computes blackjack totals.
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod blackjack;

pub mod eval;
pub use eval::{HandRank, HandValue};

mod info;
pub use info::HandInfo;

// Reexport cards types.
pub use deckhand_cards::{
    Card, CardList, Combiner, DeckType, Error, Prng, Rank, Result, Suit, binomial,
};
