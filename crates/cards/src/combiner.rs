// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Combinations of k cards from a deck.
//!
//! A [Combiner] walks the `C(n, k)` k-subsets of a deck in colexicographic
//! order of deck positions (the position sets are compared from their largest
//! element down), which is the order induced by the combinatorial number
//! system:
//!
//! ```text
//!   rank({c_0 < c_1 < ... < c_(k-1)}) = C(c_0, 1) + C(c_1, 2) + ... + C(c_(k-1), k)
//! ```
//!
//! so that any hand can be mapped to its rank and back without enumerating.
//! Sequential enumeration, [Combiner::rank], [Combiner::hand_at] and
//! [Combiner::seek] all agree on this order.
use ahash::HashSet;
use log::debug;
use rand::RngCore;

use crate::{Card, CardList, Error, Result, prng};

/// Largest deck a combiner accepts, 54 cards plus one empty slot.
const MAX_DECK: usize = Card::MAX_ID as usize + 1;

/// Marks a card that is not in the deck.
const NOT_IN_DECK: u8 = u8::MAX;

/// Creates the table for nck(n, k) for n, k <= 55.
const fn make_nck() -> [[u64; MAX_DECK + 1]; MAX_DECK + 1] {
    let mut t = [[0u64; MAX_DECK + 1]; MAX_DECK + 1];
    let mut n = 0;

    while n <= MAX_DECK {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u64; MAX_DECK + 1]; MAX_DECK + 1] = make_nck();

/// Table lookup for n choose k with n <= 55.
#[inline]
fn nck(n: usize, k: usize) -> u64 {
    if k > n { 0 } else { NCKS[n][k] }
}

/// Returns the binomial coefficient n choose k.
///
/// The product is built one factor at a time, `b = b * (n - k + i) / i`, so
/// every intermediate value is itself a binomial coefficient and each division
/// is exact. The result saturates at `u64::MAX` for coefficients that do not
/// fit in 64 bits, which never happens for `n <= 66`.
///
/// ```
/// # use deckhand_cards::binomial;
/// assert_eq!(binomial(52, 5), 2_598_960);
/// assert_eq!(binomial(5, 7), 0);
/// ```
pub fn binomial(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }

    let k = k.min(n - k);
    let mut b = 1u128;
    for i in 1..=k {
        b = match b.checked_mul((n - k + i) as u128) {
            Some(v) => v / i as u128,
            None => return u64::MAX,
        };
    }

    u64::try_from(b).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Sequential,
    Random,
}

/// Enumerates or samples k-card hands from a deck.
///
/// The combiner borrows its deck, which must outlive it, and owns the hand
/// buffer that is overwritten on every advance. Hands are lent out as
/// `&CardList` so a hand cannot be held across the next advance, clone it to
/// keep it:
///
/// ```
/// # use deckhand_cards::{CardList, Combiner, DeckType};
/// let deck = CardList::deck(DeckType::Standard);
/// let mut combiner = Combiner::new(&deck, 2).unwrap();
/// assert_eq!(combiner.total(), 1_326);
///
/// let mut count = 0;
/// while let Some(hand) = combiner.next_hand() {
///     assert_eq!(hand.len(), 2);
///     count += 1;
/// }
/// assert_eq!(count, 1_326);
/// ```
#[derive(Debug, Clone)]
pub struct Combiner<'a> {
    deck: &'a CardList,
    k: usize,
    total: u64,
    rank: u64,
    remaining: u64,
    mode: Mode,
    fresh: bool,
    /// A random hand was produced since the last switch to random mode.
    drawn: bool,
    /// Deck positions of the current hand with two sentinels, n and 0.
    positions: Vec<usize>,
    /// Deck positions permuted by random draws.
    scratch: Vec<usize>,
    /// Deck position for each card id.
    deck_invert: [u8; MAX_DECK],
    hand: CardList,
}

impl<'a> Combiner<'a> {
    /// Creates a combiner for k-card hands from `deck`.
    ///
    /// Fails with [Error::IndexOutOfRange] if `k` is larger than the deck and
    /// with [Error::Duplicate] if the deck has more than one empty slot.
    pub fn new(deck: &'a CardList, k: usize) -> Result<Self> {
        let n = deck.len();
        if k > n {
            return Err(Error::index(k, n));
        }

        let mut deck_invert = [NOT_IN_DECK; MAX_DECK];
        for (pos, card) in deck.iter().enumerate() {
            let slot = &mut deck_invert[card.id() as usize];
            if *slot != NOT_IN_DECK {
                return Err(Error::Duplicate(*card));
            }
            *slot = pos as u8;
        }

        let total = nck(n, k);
        let positions = (0..k).chain([n, 0]).collect::<Vec<_>>();
        let mut hand = CardList::new(k);
        hand.load(deck.as_slice()[..k].iter().copied());

        debug!("Combiner of {k} from {n} cards with {total} hands");

        Ok(Self {
            deck,
            k,
            total,
            rank: 0,
            remaining: total,
            mode: Mode::Sequential,
            fresh: true,
            drawn: false,
            positions,
            scratch: (0..n).collect(),
            deck_invert,
            hand,
        })
    }

    /// The deck hands are drawn from.
    pub fn deck(&self) -> &'a CardList {
        self.deck
    }

    /// The number of cards per hand.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The number of distinct hands, `C(n, k)`.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The rank of the current hand.
    pub fn current_rank(&self) -> u64 {
        self.rank
    }

    /// The number of hands left to produce.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// The current hand.
    pub fn hand(&self) -> &CardList {
        &self.hand
    }

    /// Advances to the next hand in order, `None` after the last one.
    ///
    /// After random draws the sequence continues from the last drawn hand,
    /// if no hand was drawn it continues from where it was.
    pub fn next_hand(&mut self) -> Option<&CardList> {
        if self.mode == Mode::Random {
            self.mode = Mode::Sequential;
            if self.drawn {
                self.fresh = false;
            }
            self.remaining = if self.fresh {
                self.total - self.rank
            } else {
                self.total - self.rank - 1
            };
        }

        if self.remaining == 0 {
            return None;
        }

        if self.fresh {
            self.fresh = false;
        } else {
            let stepped = self.step();
            debug_assert!(stepped, "stepped past the last hand");
            self.rank += 1;
            self.load_hand();
        }

        self.remaining -= 1;
        Some(&self.hand)
    }

    /// Repositions the sequence so that the next hand is the one at `rank`.
    pub fn seek(&mut self, rank: u64) -> Result<()> {
        if rank >= self.total {
            return Err(Error::IndexOutOfRange {
                index: rank,
                len: self.total,
            });
        }

        self.unrank(rank);
        self.rank = rank;
        self.remaining = self.total - rank;
        self.mode = Mode::Sequential;
        self.fresh = true;
        self.load_hand();
        Ok(())
    }

    /// Restarts the sequence from the first hand.
    pub fn reset(&mut self) {
        self.unrank(0);
        self.rank = 0;
        self.remaining = self.total;
        self.mode = Mode::Sequential;
        self.fresh = true;
        self.load_hand();
    }

    /// Calls `f` for each remaining hand in order.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(&CardList),
    {
        while let Some(hand) = self.next_hand() {
            f(hand);
        }
    }

    /// Prepares for `count` random hands, capped at [Combiner::total].
    pub fn random(&mut self, count: u64) {
        self.enter_random();
        self.remaining = count.min(self.total);
    }

    /// Draws the next random hand using `rng`, `None` when the count set by
    /// [Combiner::random] is exhausted.
    ///
    /// Each hand is a uniform k-subset of the deck drawn independently of the
    /// previous ones; the hand cards are in deck order.
    pub fn next_random_with<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> Option<&CardList> {
        if self.draw(rng) {
            Some(&self.hand)
        } else {
            None
        }
    }

    /// Draws the next random hand using the process wide generator.
    pub fn next_random(&mut self) -> Option<&CardList> {
        if prng::with_global(|rng| self.draw(rng)) {
            Some(&self.hand)
        } else {
            None
        }
    }

    /// Calls `f` for `count` independent uniform hands.
    pub fn sample<R, F>(&mut self, count: u64, rng: &mut R, mut f: F)
    where
        R: RngCore + ?Sized,
        F: FnMut(&CardList),
    {
        self.random(count);
        while let Some(hand) = self.next_random_with(rng) {
            f(hand);
        }
    }

    /// Calls `f` for `count` distinct uniform hands, capped at
    /// [Combiner::total].
    ///
    /// Ranks are drawn uniformly and redrawn when already seen, so all
    /// `count`-subsets of hands are equally likely. Best when `count` is much
    /// smaller than the total, the expected number of draws grows as
    /// `total * ln(total / (total - count))`.
    pub fn sample_distinct<R, F>(&mut self, count: u64, rng: &mut R, mut f: F)
    where
        R: RngCore + ?Sized,
        F: FnMut(&CardList),
    {
        let count = count.min(self.total);
        let mut seen = HashSet::default();
        self.enter_random();
        self.remaining = 0;

        while (seen.len() as u64) < count {
            let rank = prng::below64(rng, self.total);
            if seen.insert(rank) {
                self.unrank(rank);
                self.rank = rank;
                self.drawn = true;
                self.load_hand();
                f(&self.hand);
            }
        }
    }

    /// Returns the rank of `hand` in the enumeration order.
    ///
    /// The hand cards can be in any order. Fails with [Error::HandSize] if the
    /// hand does not have k cards, with [Error::NotFound] if a card is not in
    /// the deck, and with [Error::Duplicate] if a card is repeated.
    pub fn rank(&self, hand: &[Card]) -> Result<u64> {
        if hand.len() != self.k {
            return Err(Error::HandSize {
                expected: self.k,
                actual: hand.len(),
            });
        }

        let mut positions = Vec::with_capacity(self.k);
        for &card in hand {
            match self.deck_invert.get(card.id() as usize) {
                Some(&pos) if pos != NOT_IN_DECK => positions.push((pos as usize, card)),
                _ => return Err(Error::NotFound(card)),
            }
        }

        positions.sort_unstable();
        if let Some(w) = positions.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::Duplicate(w[1].1));
        }

        Ok(positions
            .iter()
            .enumerate()
            .map(|(i, &(pos, _))| nck(pos, i + 1))
            .sum())
    }

    /// Returns the hand at `rank` in the enumeration order.
    ///
    /// Fails with [Error::IndexOutOfRange] if `rank >= total`.
    pub fn hand_at(&self, rank: u64) -> Result<CardList> {
        if rank >= self.total {
            return Err(Error::IndexOutOfRange {
                index: rank,
                len: self.total,
            });
        }

        let mut positions = vec![0; self.k];
        unrank_positions(self.deck.len(), rank, &mut positions);

        let mut hand = CardList::new(self.k);
        hand.load(positions.iter().map(|&p| self.deck[p]));
        Ok(hand)
    }

    /// Moves to the next k-subset, Algorithm L from TAOCP 4a.
    fn step(&mut self) -> bool {
        let c = &mut self.positions;

        let mut j = 0;
        while c[j] + 1 == c[j + 1] {
            c[j] = j;
            j += 1;
        }

        if j >= self.k {
            return false;
        }

        c[j] += 1;
        true
    }

    fn draw<R: RngCore + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.remaining == 0 {
            return false;
        }

        // Partial Fisher-Yates, the first k positions are a uniform k-subset.
        let n = self.scratch.len();
        for i in 0..self.k {
            let r = prng::below(rng, (n - i) as u32) as usize;
            self.scratch.swap(i, i + r);
        }

        self.positions[..self.k].copy_from_slice(&self.scratch[..self.k]);
        self.positions[..self.k].sort_unstable();

        self.rank = self.positions[..self.k]
            .iter()
            .enumerate()
            .map(|(i, &pos)| nck(pos, i + 1))
            .sum();

        self.drawn = true;
        self.remaining -= 1;
        self.load_hand();
        true
    }

    fn enter_random(&mut self) {
        if self.mode == Mode::Sequential {
            self.mode = Mode::Random;
            self.drawn = false;
        }
    }

    fn unrank(&mut self, rank: u64) {
        let k = self.k;
        unrank_positions(self.deck.len(), rank, &mut self.positions[..k]);
    }

    fn load_hand(&mut self) {
        let deck = self.deck;
        let k = self.k;
        self.hand.load(self.positions[..k].iter().map(|&pos| deck[pos]));
    }
}

/// Uses the combinatorial number system to convert rank to a k-subset of
/// `[0, n)` (see Theorem L in TAOCP 4a), `out.len()` is k.
fn unrank_positions(n: usize, mut rank: u64, out: &mut [usize]) {
    let mut v = n;
    for i in (1..=out.len()).rev() {
        while nck(v, i) > rank {
            v -= 1;
        }

        out[i - 1] = v;
        rank -= nck(v, i);
    }
}
