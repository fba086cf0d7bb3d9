// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bounded ordered lists of unique cards.
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::{fmt, hash, ops};

use crate::{Card, DeckType, Error, Result, prng};

/// An ordered sequence of unique cards with a fixed capacity.
///
/// A list keeps a 64 bit presence mask, one bit per card identifier, updated
/// with every mutation so that duplicate checks are constant time. The empty
/// sentinel [Card::EMPTY] is never considered a duplicate and may fill any
/// number of slots.
///
/// Every mutation either succeeds or returns an error leaving the list
/// unchanged. A list marked read only rejects all mutations with
/// [Error::ReadOnly].
///
/// ```
/// # use deckhand_cards::{Card, CardList, DeckType, Error, Rank, Suit};
/// let mut hand = CardList::new(5);
/// let ace = Card::new(Rank::Ace, Suit::Spades);
/// hand.append(ace).unwrap();
/// assert_eq!(hand.append(ace), Err(Error::Duplicate(ace)));
/// assert_eq!(hand.len(), 1);
///
/// let deck = CardList::deck(DeckType::Standard);
/// assert_eq!(deck.len(), 52);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "ListRepr", into = "ListRepr")]
pub struct CardList {
    cards: Vec<Card>,
    allocation: usize,
    mask: u64,
    read_only: bool,
}

#[inline]
const fn bit(card: Card) -> u64 {
    if card.is_empty() { 0 } else { 1 << card.id() }
}

impl CardList {
    /// Creates an empty list that can hold up to `allocation` cards.
    pub fn new(allocation: usize) -> Self {
        Self {
            cards: Vec::with_capacity(allocation),
            allocation,
            mask: 0,
            read_only: false,
        }
    }

    /// Creates a fresh deck of the given type.
    pub fn deck(deck_type: DeckType) -> Self {
        let mut list = Self::new(deck_type.size());
        list.load(deck_type.cards().iter().copied());
        list
    }

    /// Creates a list with the given allocation and cards.
    pub fn from_cards(allocation: usize, cards: &[Card]) -> Result<Self> {
        let mut list = Self::new(allocation);
        list.extend(cards)?;
        Ok(list)
    }

    /// The maximum number of cards.
    pub fn allocation(&self) -> usize {
        self.allocation
    }

    /// The number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Checks if the list has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Checks if the list is at capacity.
    pub fn is_full(&self) -> bool {
        self.cards.len() == self.allocation
    }

    /// The presence mask, bit `id` is set for each card in the list.
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Checks if the card is in the list.
    pub fn contains(&self, card: Card) -> bool {
        if card.is_empty() {
            self.cards.contains(&card)
        } else {
            self.mask & bit(card) != 0
        }
    }

    /// The cards as a slice.
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Iterates the cards in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Checks if the list rejects mutations.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Sets or clears the read only flag.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Returns the card at `index`.
    pub fn get(&self, index: usize) -> Result<Card> {
        self.cards
            .get(index)
            .copied()
            .ok_or(Error::index(index, self.len()))
    }

    /// Returns the index of the first occurrence of `card`, if any.
    pub fn index(&self, card: Card) -> Option<usize> {
        if !card.is_empty() && self.mask & bit(card) == 0 {
            return None;
        }

        self.cards.iter().position(|c| *c == card)
    }

    /// Adds a card at the end of the list.
    pub fn append(&mut self, card: Card) -> Result<()> {
        self.check_writable()?;
        if self.is_full() {
            return Err(Error::ListFull);
        }
        self.check_unique(card)?;

        self.mask |= bit(card);
        self.cards.push(card);
        Ok(())
    }

    /// Adds all `cards` at the end of the list, returns the number of cards
    /// added.
    ///
    /// Either all cards are added or none is.
    pub fn extend(&mut self, cards: &[Card]) -> Result<usize> {
        self.check_writable()?;
        if cards.len() > self.allocation - self.len() {
            return Err(Error::ListFull);
        }

        let mut mask = self.mask;
        for &card in cards {
            if mask & bit(card) != 0 {
                return Err(Error::Duplicate(card));
            }
            mask |= bit(card);
        }

        self.mask = mask;
        self.cards.extend_from_slice(cards);
        Ok(cards.len())
    }

    /// Inserts a card at `index` shifting all cards after it to the right.
    pub fn insert(&mut self, index: usize, card: Card) -> Result<()> {
        self.check_writable()?;
        if self.is_full() {
            return Err(Error::ListFull);
        }
        if index > self.len() {
            return Err(Error::index(index, self.len()));
        }
        self.check_unique(card)?;

        self.mask |= bit(card);
        self.cards.insert(index, card);
        Ok(())
    }

    /// Replaces the card at `index`, returns the replaced card.
    pub fn set(&mut self, index: usize, card: Card) -> Result<Card> {
        self.check_writable()?;
        let old = self.get(index)?;
        if old == card {
            return Ok(old);
        }
        self.check_unique(card)?;

        self.mask = (self.mask & !bit(old)) | bit(card);
        self.cards[index] = card;
        Ok(old)
    }

    /// Removes the card at `index` shifting all cards after it to the left,
    /// returns the removed card.
    pub fn delete(&mut self, index: usize) -> Result<Card> {
        self.check_writable()?;
        if index >= self.len() {
            return Err(Error::index(index, self.len()));
        }

        let card = self.cards.remove(index);
        self.mask &= !bit(card);
        Ok(card)
    }

    /// Removes the first occurrence of `card`.
    pub fn remove(&mut self, card: Card) -> Result<Card> {
        self.check_writable()?;
        let index = self.index(card).ok_or(Error::NotFound(card))?;
        self.delete(index)
    }

    /// Removes and returns the last card.
    pub fn pop(&mut self) -> Result<Card> {
        self.check_writable()?;
        let card = self.cards.pop().ok_or(Error::index(0, 0))?;
        self.mask &= !bit(card);
        Ok(card)
    }

    /// Keeps the first `len` cards.
    pub fn truncate(&mut self, len: usize) -> Result<()> {
        self.check_writable()?;
        if len > self.len() {
            return Err(Error::index(len, self.len()));
        }

        for card in self.cards.drain(len..) {
            self.mask &= !bit(card);
        }
        Ok(())
    }

    /// Removes all cards.
    pub fn clear(&mut self) -> Result<()> {
        self.check_writable()?;
        self.cards.clear();
        self.mask = 0;
        Ok(())
    }

    /// Replaces the content with the first `count` cards of a fresh deck.
    ///
    /// Fails with [Error::ListFull] if `count` exceeds the allocation and with
    /// [Error::Duplicate] if it exceeds the deck size.
    pub fn fill(&mut self, count: usize, deck_type: DeckType) -> Result<()> {
        self.check_writable()?;
        if count > self.allocation {
            return Err(Error::ListFull);
        }

        let cards = deck_type.cards();
        if count > cards.len() {
            return Err(Error::Duplicate(cards[0]));
        }

        self.load(cards[..count].iter().copied());
        Ok(())
    }

    /// Overwrites this list with the content of `other`.
    pub fn copy_from(&mut self, other: &CardList) -> Result<()> {
        self.check_writable()?;
        if other.len() > self.allocation {
            return Err(Error::ListFull);
        }

        self.cards.clear();
        self.cards.extend_from_slice(&other.cards);
        self.mask = other.mask;
        Ok(())
    }

    /// Sorts the cards in ascending order.
    pub fn sort(&mut self) -> Result<()> {
        self.check_writable()?;
        self.cards.sort_unstable();
        Ok(())
    }

    /// Reverses the order of the cards.
    pub fn reverse(&mut self) -> Result<()> {
        self.check_writable()?;
        self.cards.reverse();
        Ok(())
    }

    /// Shuffles the cards using the process wide generator.
    pub fn shuffle(&mut self) -> Result<()> {
        prng::with_global(|rng| self.shuffle_with(rng))
    }

    /// Shuffles the cards using `rng`.
    ///
    /// Fisher-Yates shuffle: for `i` from `len - 1` down to 1 swap the card at
    /// `i` with the card at a uniform index in `[0, i]`, every permutation is
    /// equally likely.
    pub fn shuffle_with<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.check_writable()?;
        for i in (1..self.cards.len()).rev() {
            let j = prng::below(rng, i as u32 + 1) as usize;
            self.cards.swap(i, j);
        }
        Ok(())
    }

    /// Replaces the content with cards known to be unique, ignoring the read
    /// only flag and the allocation check.
    pub(crate) fn load<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.cards.clear();
        self.mask = 0;
        for card in cards {
            debug_assert!(self.mask & bit(card) == 0, "duplicate card {card}");
            self.mask |= bit(card);
            self.cards.push(card);
        }
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            Err(Error::ReadOnly)
        } else {
            Ok(())
        }
    }

    fn check_unique(&self, card: Card) -> Result<()> {
        if self.mask & bit(card) != 0 {
            Err(Error::Duplicate(card))
        } else {
            Ok(())
        }
    }
}

/// Two lists are equal if their cards are equal position by position, with the
/// shorter list padded with empty cards.
impl PartialEq for CardList {
    fn eq(&self, other: &Self) -> bool {
        let (short, long) = if self.len() <= other.len() {
            (&self.cards, &other.cards)
        } else {
            (&other.cards, &self.cards)
        };

        long[..short.len()] == short[..] && long[short.len()..].iter().all(Card::is_empty)
    }
}

impl Eq for CardList {}

impl hash::Hash for CardList {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        // Trailing empty cards do not take part in equality.
        let end = self
            .cards
            .iter()
            .rposition(|c| !c.is_empty())
            .map_or(0, |pos| pos + 1);
        hash::Hash::hash(&self.cards[..end], state);
    }
}

impl ops::Index<usize> for CardList {
    type Output = Card;

    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}

impl AsRef<[Card]> for CardList {
    fn as_ref(&self) -> &[Card] {
        &self.cards
    }
}

impl<'a> IntoIterator for &'a CardList {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.iter()
    }
}

impl fmt::Display for CardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Debug for CardList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardList{self}")
    }
}

/// Serialized form of a [CardList].
#[derive(Serialize, Deserialize)]
struct ListRepr {
    allocation: usize,
    cards: Vec<Card>,
}

impl TryFrom<ListRepr> for CardList {
    type Error = Error;

    fn try_from(repr: ListRepr) -> Result<Self> {
        CardList::from_cards(repr.allocation, &repr.cards)
    }
}

impl From<CardList> for ListRepr {
    fn from(list: CardList) -> Self {
        Self {
            allocation: list.allocation,
            cards: list.cards,
        }
    }
}
