// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deckhand cards types.
//!
//! This crate defines cards, decks and bounded lists of unique cards:
//!
//! ```
//! # use deckhand_cards::{Card, CardList, DeckType, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! let mut deck = CardList::deck(DeckType::Standard);
//! assert!(deck.contains(ah));
//!
//! deck.shuffle().unwrap();
//! let mut hand = CardList::new(2);
//! hand.append(deck.pop().unwrap()).unwrap();
//! hand.append(deck.pop().unwrap()).unwrap();
//! assert_eq!(deck.len(), 50);
//! ```
//!
//! and a [Combiner] type for iterating, ranking and sampling k-cards hands
//! from a deck.
//!
//! For example to iterate through all 7 cards hands:
//!
//! ```no_run
//! # use deckhand_cards::{CardList, Combiner, DeckType};
//! // Iterate through all 7 cards hands (133M hands).
//! let deck = CardList::deck(DeckType::Standard);
//! let mut counter = 0;
//! Combiner::new(&deck, 7).unwrap().for_each(|hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 133_784_560);
//! ```
//!
//! to sample 10 random 5-cards hands:
//!
//! ```
//! # use deckhand_cards::{CardList, Combiner, DeckType, Prng};
//! let deck = CardList::deck(DeckType::Standard);
//! let mut rng = Prng::new(42);
//! let mut counter = 0;
//! Combiner::new(&deck, 5).unwrap().sample(10, &mut rng, |hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter += 1;
//! });
//! assert_eq!(counter, 10);
//! ```
//!
//! The **`parallel`** feature enables parallel sampling and iteration with
//! a given number of tasks, the following example uses 4 tasks to iterate
//! all 5 cards hands, the closure `task_id` can be used to store per task data
//! to reduce contention:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_for_each() {
//! # use std::sync::atomic;
//! # use deckhand_cards::{CardList, DeckType};
//! let counter = atomic::AtomicU64::new(0);
//! CardList::deck(DeckType::Standard).par_for_each(4, 5, |task_id, hand| {
//!     assert_eq!(hand.len(), 5);
//!     counter.fetch_add(1, atomic::Ordering::Relaxed);
//! }).unwrap();
//! assert_eq!(counter.load(atomic::Ordering::Relaxed), 2_598_960);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod card;
pub use card::{Card, Rank, Suit};

mod combiner;
pub use combiner::{Combiner, binomial};

mod deck;
pub use deck::DeckType;

mod error;
pub use error::{Error, Result};

mod list;
pub use list::CardList;

#[cfg(feature = "parallel")]
mod parallel;

pub mod prng;
pub use prng::Prng;
