// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Error types for card lists, combiners and evaluators.
use thiserror::Error;

use crate::Card;

/// A specialized result type for deckhand operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by deckhand operations.
///
/// All errors are caller errors: a failing operation leaves its target exactly
/// as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A mutation was attempted on a read only list.
    #[error("card list is read only")]
    ReadOnly,
    /// The list has no room for more cards.
    #[error("card list is full")]
    ListFull,
    /// The card is already present where cards must be unique.
    #[error("duplicate card {0}")]
    Duplicate(Card),
    /// An index or rank outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: u64,
        /// The length of the indexed range.
        len: u64,
    },
    /// The card is not in the list.
    #[error("card {0} not found")]
    NotFound(Card),
    /// The card cannot be used here, i.e. an empty slot or a joker in a poker hand.
    #[error("invalid card {0}")]
    InvalidCard(Card),
    /// The hand has the wrong number of cards.
    #[error("expected {expected} cards, got {actual}")]
    HandSize {
        /// The required number of cards.
        expected: usize,
        /// The number of cards given.
        actual: usize,
    },
}

impl Error {
    /// Returns the stable numeric code for this error used by bindings.
    pub fn code(&self) -> i32 {
        match self {
            Error::NotFound(_) => -1,
            Error::ReadOnly => -2,
            Error::ListFull => -3,
            Error::Duplicate(_) => -4,
            Error::IndexOutOfRange { .. } => -5,
            Error::InvalidCard(_) => -6,
            Error::HandSize { .. } => -7,
        }
    }

    pub(crate) fn index(index: usize, len: usize) -> Self {
        Error::IndexOutOfRange {
            index: index as u64,
            len: len as u64,
        }
    }
}
