// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! Every 5-card hand maps to one of 7462 equivalence classes numbered as in
//! [Cactus Kev's][kevlink] evaluator: 1 is a royal flush and 7462 is 7-5-4-3-2
//! offsuit. Hands in the same class tie, suits never break ties.
//!
//! The class is computed directly from the hand rank pattern: the category
//! fixes a base class, and the ranks of the groups and kickers give the offset
//! within the category using the combinatorial number system over the ranks
//! still available.
//!
//! [kevlink]: http://suffe.cool/poker/evaluator.html
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use deckhand_cards::{Card, CardList, Combiner, Error, Result};

/// Mask with one bit for each of the 13 ranks.
const ALL_RANKS: u16 = 0x1FFF;

/// Rank mask for A-2-3-4-5.
const WHEEL: u16 = 0x100F;

/// All straight rank masks, from broadway down to the wheel.
const STRAIGHTS: [u16; 10] = [
    0x1F00, 0x0F80, 0x07C0, 0x03E0, 0x01F0, 0x00F8, 0x007C, 0x003E, 0x001F, WHEEL,
];

/// Binomial coefficients C(n, k) for n <= 13 and k <= 5.
const fn make_nck() -> [[u16; 6]; 14] {
    let mut t = [[0u16; 6]; 14];
    let mut n = 0;
    while n < 14 {
        t[n][0] = 1;
        let mut k = 1;
        while n > 0 && k < 6 {
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }
        n += 1;
    }
    t
}

const NCK: [[u16; 6]; 14] = make_nck();

/// The category of a poker hand, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pair.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five ranks in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight of the same suit.
    StraightFlush,
}

impl HandRank {
    /// All hand ranks, weakest first.
    pub const ALL: [HandRank; 9] = [
        HandRank::HighCard,
        HandRank::OnePair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
    ];

    /// The category of a hand class.
    fn from_class(class: u16) -> HandRank {
        match class {
            0..=10 => HandRank::StraightFlush,
            11..=166 => HandRank::FourOfAKind,
            167..=322 => HandRank::FullHouse,
            323..=1599 => HandRank::Flush,
            1600..=1609 => HandRank::Straight,
            1610..=2467 => HandRank::ThreeOfAKind,
            2468..=3325 => HandRank::TwoPair,
            3326..=6185 => HandRank::OnePair,
            _ => HandRank::HighCard,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighCard => "No Pair",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        };

        write!(f, "{name}")
    }
}

/// The value of a poker hand.
///
/// Values compare so that a stronger hand is greater:
///
/// ```
/// # use deckhand_eval::*;
/// let deck = CardList::deck(DeckType::Standard);
/// // 2c 2d 2h 2s 3c against 3d 3h 3s 4c 4d
/// let v1 = HandValue::eval5(&deck.as_slice()[0..5]).unwrap();
/// let v2 = HandValue::eval5(&deck.as_slice()[5..10]).unwrap();
/// assert!(v1 > v2);
/// assert_eq!(v1.rank(), HandRank::FourOfAKind);
/// assert_eq!(v2.rank(), HandRank::FullHouse);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct HandValue(u16);

impl HandValue {
    /// The number of distinct hand values.
    pub const NUM_CLASSES: u16 = 7462;

    /// Evaluates a hand of exactly five cards.
    ///
    /// Fails with [Error::HandSize] if the hand does not have five cards, with
    /// [Error::InvalidCard] for the empty card or jokers, and with
    /// [Error::Duplicate] for repeated cards.
    pub fn eval5(cards: &[Card]) -> Result<HandValue> {
        if cards.len() != 5 {
            return Err(Error::HandSize {
                expected: 5,
                actual: cards.len(),
            });
        }

        validate(cards)?;
        Ok(HandValue(eval_class([
            cards[0], cards[1], cards[2], cards[3], cards[4],
        ])))
    }

    /// Evaluates the best 5-card hand out of five or more cards.
    ///
    /// This goes through all 5-card subsets without building the best hand,
    /// use [HandValue::best5] to get the cards too.
    pub fn eval(cards: &[Card]) -> Result<HandValue> {
        check_size(cards)?;
        validate(cards)?;

        let n = cards.len();
        let mut c = [0, 1, 2, 3, 4];
        let mut best = u16::MAX;
        loop {
            let class = eval_class(c.map(|pos| cards[pos]));
            best = best.min(class);

            if !next_subset(&mut c, n) {
                break;
            }
        }

        Ok(HandValue(best))
    }

    /// Evaluates the best 5-card hand out of five or more cards, returns the
    /// value and the five cards that make it.
    ///
    /// Ties between equal subsets go to the first one in enumeration order.
    pub fn best5(cards: &[Card]) -> Result<(HandValue, CardList)> {
        check_size(cards)?;
        if let Some(&card) = cards.iter().find(|c| !c.is_standard()) {
            return Err(Error::InvalidCard(card));
        }

        let hand = CardList::from_cards(cards.len(), cards)?;
        if hand.len() == 5 {
            let value = HandValue::eval5(hand.as_slice())?;
            return Ok((value, hand));
        }

        let mut combiner = Combiner::new(&hand, 5)?;
        let mut best = (HandValue(u16::MAX), CardList::new(5));
        combiner.for_each(|sub| {
            let s = sub.as_slice();
            let class = eval_class([s[0], s[1], s[2], s[3], s[4]]);
            if class < best.0.0 {
                best = (HandValue(class), sub.clone());
            }
        });

        Ok(best)
    }

    /// Creates a value from its class, `None` if not in `1..=7462`.
    pub fn from_class(class: u16) -> Option<HandValue> {
        (1..=Self::NUM_CLASSES)
            .contains(&class)
            .then_some(HandValue(class))
    }

    /// The equivalence class, 1 for a royal flush up to 7462.
    pub fn class(&self) -> u16 {
        self.0
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        HandRank::from_class(self.0)
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // A lower class is a stronger hand.
        other.0.cmp(&self.0)
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rank(), self.0)
    }
}

impl TryFrom<u16> for HandValue {
    type Error = String;

    fn try_from(class: u16) -> std::result::Result<Self, Self::Error> {
        HandValue::from_class(class).ok_or_else(|| format!("invalid hand class {class}"))
    }
}

impl From<HandValue> for u16 {
    fn from(value: HandValue) -> Self {
        value.0
    }
}

fn check_size(cards: &[Card]) -> Result<()> {
    if cards.len() < 5 {
        Err(Error::HandSize {
            expected: 5,
            actual: cards.len(),
        })
    } else {
        Ok(())
    }
}

/// Checks that all cards are standard and distinct.
fn validate(cards: &[Card]) -> Result<()> {
    let mut seen = 0u64;
    for &card in cards {
        if !card.is_standard() {
            return Err(Error::InvalidCard(card));
        }

        let bit = 1u64 << card.id();
        if seen & bit != 0 {
            return Err(Error::Duplicate(card));
        }
        seen |= bit;
    }

    Ok(())
}

/// Moves to the next 5-subset of `[0, n)` in lexicographic order.
fn next_subset(c: &mut [usize; 5], n: usize) -> bool {
    for i in (0..5).rev() {
        if c[i] < n - 5 + i {
            c[i] += 1;
            for j in i + 1..5 {
                c[j] = c[j - 1] + 1;
            }
            return true;
        }
    }

    false
}

/// Returns the class of five distinct standard cards.
pub(crate) fn eval_class(cards: [Card; 5]) -> u16 {
    let mut counts = [0u8; 13];
    let mut mask = 0u16;
    let suit = cards[0].suit_index();
    let mut flush = true;

    for card in cards {
        let r = card.rank_index() as usize;
        counts[r] += 1;
        mask |= 1 << r;
        flush &= card.suit_index() == suit;
    }

    if mask.count_ones() == 5 {
        return match (flush, straight_high(mask)) {
            (true, Some(high)) => 1 + (12 - high),
            (true, None) => 323 + distinct_index(mask),
            (false, Some(high)) => 1600 + (12 - high),
            (false, None) => 6186 + distinct_index(mask),
        };
    }

    let mut quads = 0u16;
    let mut trips = 0u16;
    let mut pairs = 0u16;
    let mut singles = 0u16;
    for (r, &count) in counts.iter().enumerate() {
        let bit = 1 << r;
        match count {
            4 => quads |= bit,
            3 => trips |= bit,
            2 => pairs |= bit,
            1 => singles |= bit,
            _ => {}
        }
    }

    if quads != 0 {
        11 + (12 - top(quads)) * 12 + kicker_index(singles, quads)
    } else if trips != 0 && pairs != 0 {
        167 + (12 - top(trips)) * 12 + kicker_index(pairs, trips)
    } else if trips != 0 {
        1610 + (12 - top(trips)) * 66 + kicker_index(singles, trips)
    } else if pairs.count_ones() == 2 {
        2468 + kicker_index(pairs, 0) * 11 + kicker_index(singles, pairs)
    } else {
        3326 + (12 - top(pairs)) * 220 + kicker_index(singles, pairs)
    }
}

/// The highest rank in the mask.
#[inline]
fn top(mask: u16) -> u16 {
    15 - mask.leading_zeros() as u16
}

/// The high rank of a straight, five for the wheel.
fn straight_high(mask: u16) -> Option<u16> {
    if mask == WHEEL {
        return Some(3);
    }

    let low = mask.trailing_zeros();
    (mask == 0x1F << low).then_some(low as u16 + 4)
}

/// The position of the `chosen` ranks among all equally sized subsets of the
/// ranks not in `excluded`, strongest first.
fn kicker_index(chosen: u16, excluded: u16) -> u16 {
    let available = ALL_RANKS & !excluded;
    let m = available.count_ones() as usize;
    let k = chosen.count_ones() as usize;

    let mut colex = 0;
    let mut pos = 0;
    let mut i = 0;
    for r in 0..13 {
        let bit = 1 << r;
        if available & bit != 0 {
            if chosen & bit != 0 {
                i += 1;
                colex += NCK[pos][i];
            }
            pos += 1;
        }
    }

    NCK[m][k] - 1 - colex
}

/// The position of five distinct ranks that are not a straight among all such
/// rank sets, strongest first.
fn distinct_index(mask: u16) -> u16 {
    let idx = kicker_index(mask, 0);
    let stronger = STRAIGHTS
        .iter()
        .filter(|&&s| kicker_index(s, 0) < idx)
        .count() as u16;
    idx - stronger
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use deckhand_cards::{DeckType, Prng, Rank, Suit};

    fn hand(s: &str) -> Vec<Card> {
        s.split_whitespace()
            .map(|c| {
                let mut chars = c.chars();
                let rank = match chars.next().unwrap() {
                    'A' => Rank::Ace,
                    'K' => Rank::King,
                    'Q' => Rank::Queen,
                    'J' => Rank::Jack,
                    'T' => Rank::Ten,
                    d => Rank::from_index(d.to_digit(10).unwrap() as u8 - 2).unwrap(),
                };
                let suit = match chars.next().unwrap() {
                    'c' => Suit::Clubs,
                    'd' => Suit::Diamonds,
                    'h' => Suit::Hearts,
                    _ => Suit::Spades,
                };
                Card::new(rank, suit)
            })
            .collect()
    }

    fn class(s: &str) -> u16 {
        HandValue::eval5(&hand(s)).unwrap().class()
    }

    #[test]
    fn class_boundaries() {
        assert_eq!(class("As Ks Qs Js Ts"), 1);
        assert_eq!(class("Kh Qh Jh Th 9h"), 2);
        assert_eq!(class("5d 4d 3d 2d Ad"), 10);
        assert_eq!(class("Ac Ad Ah As Kc"), 11);
        assert_eq!(class("2c 2d 2h 2s 3c"), 166);
        assert_eq!(class("Ac Ad Ah Ks Kc"), 167);
        assert_eq!(class("2c 2d 2h 3s 3c"), 322);
        assert_eq!(class("Ac Kc Qc Jc 9c"), 323);
        assert_eq!(class("7h 5h 4h 3h 2h"), 1599);
        assert_eq!(class("Ac Kd Qh Js Tc"), 1600);
        assert_eq!(class("Ac 2d 3h 4s 5c"), 1609);
        assert_eq!(class("Ac Ad Ah Ks Qc"), 1610);
        assert_eq!(class("2c 2d 2h 4s 3c"), 2467);
        assert_eq!(class("Ac Ad Kh Ks Qc"), 2468);
        assert_eq!(class("3c 3d 2h 2s 4c"), 3325);
        assert_eq!(class("Ac Ad Kh Qs Jc"), 3326);
        assert_eq!(class("2c 2d 5h 4s 3c"), 6185);
        assert_eq!(class("Ac Kd Qh Js 9c"), 6186);
        assert_eq!(class("7c 5d 4h 3s 2c"), 7462);
    }

    #[test]
    fn poker_ordering() {
        let royal = HandValue::eval5(&hand("Ts Js Qs Ks As")).unwrap();
        let quads = HandValue::eval5(&hand("Ac Ad Ah As Kc")).unwrap();
        let boat = HandValue::eval5(&hand("2c 2d 2h 3c 3d")).unwrap();
        let nothing = HandValue::eval5(&hand("2c 5d 9h Jc Ah")).unwrap();
        assert!(royal > quads);
        assert!(quads > boat);
        assert!(boat > nothing);
        assert_eq!(royal.rank(), HandRank::StraightFlush);
        assert_eq!(nothing.rank(), HandRank::HighCard);

        // Kickers decide.
        let aak = HandValue::eval5(&hand("Ac Ad Kh 7s 3c")).unwrap();
        let aaq = HandValue::eval5(&hand("Ah As Qh Js Tc")).unwrap();
        assert!(aak > aaq);

        // Suits never break ties.
        let a = HandValue::eval5(&hand("Ac Kd 9h 7s 3c")).unwrap();
        let b = HandValue::eval5(&hand("Ad Kh 9s 7c 3d")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);

        // Card order does not matter.
        assert_eq!(class("Kc Ks Ac Ah Ad"), 167);
    }

    #[test]
    fn validation_errors() {
        let cards = hand("Ac Kd 9h 7s 3c");

        assert_eq!(
            HandValue::eval5(&cards[..4]),
            Err(Error::HandSize {
                expected: 5,
                actual: 4
            })
        );
        assert_eq!(
            HandValue::eval(&cards[..4]),
            Err(Error::HandSize {
                expected: 5,
                actual: 4
            })
        );
        assert!(matches!(
            HandValue::best5(&[]),
            Err(Error::HandSize { actual: 0, .. })
        ));

        let mut bad = cards.clone();
        bad[2] = Card::EMPTY;
        assert_eq!(HandValue::eval5(&bad), Err(Error::InvalidCard(Card::EMPTY)));
        bad[2] = Card::JOKER;
        assert_eq!(HandValue::eval(&bad), Err(Error::InvalidCard(Card::JOKER)));
        assert_eq!(
            HandValue::best5(&bad).map(|r| r.0),
            Err(Error::InvalidCard(Card::JOKER))
        );

        bad[2] = cards[0];
        assert_eq!(HandValue::eval5(&bad), Err(Error::Duplicate(cards[0])));
        assert_eq!(
            HandValue::best5(&bad).map(|r| r.0),
            Err(Error::Duplicate(cards[0]))
        );
    }

    #[test]
    fn all_5_cards_hands() {
        let deck = CardList::deck(DeckType::Standard);
        let mut combiner = Combiner::new(&deck, 5).unwrap();
        let mut counts = [0u32; 9];
        let mut classes: [HashSet<u16>; 9] = std::array::from_fn(|_| HashSet::default());

        combiner.for_each(|hand| {
            let v = HandValue::eval5(hand.as_slice()).unwrap();
            let r = v.rank() as usize;
            counts[r] += 1;
            classes[r].insert(v.class());
        });

        assert_eq!(
            counts,
            [1_302_540, 1_098_240, 123_552, 54_912, 10_200, 5_108, 3_744, 624, 40]
        );

        let num_classes = classes.iter().map(HashSet::len).collect::<Vec<_>>();
        assert_eq!(num_classes, [1277, 2860, 858, 858, 10, 1277, 156, 156, 10]);
        assert_eq!(num_classes.iter().sum::<usize>(), HandValue::NUM_CLASSES as usize);
    }

    #[test]
    fn best5_is_optimal() {
        let deck = CardList::deck(DeckType::Standard);
        let mut rng = Prng::new(7);
        let mut combiner = Combiner::new(&deck, 7).unwrap();

        combiner.sample(500, &mut rng, |cards| {
            let cards = cards.as_slice();
            let (value, best) = HandValue::best5(cards).unwrap();
            assert_eq!(HandValue::eval(cards), Ok(value));
            assert_eq!(HandValue::eval5(best.as_slice()), Ok(value));
            assert!(best.iter().all(|c| cards.contains(c)));

            let sub = CardList::from_cards(7, cards).unwrap();
            Combiner::new(&sub, 5).unwrap().for_each(|h| {
                assert!(value >= HandValue::eval5(h.as_slice()).unwrap());
            });
        });
    }

    #[test]
    fn best5_of_known_hand() {
        let cards = hand("Ah Kd Ts 7h 4h 3h 2h");
        let (value, best) = HandValue::best5(&cards).unwrap();
        assert_eq!(value.rank(), HandRank::Flush);
        let mut best = best.as_slice().to_vec();
        best.sort();
        let mut expected = hand("Ah 7h 4h 3h 2h");
        expected.sort();
        assert_eq!(best, expected);

        let (value, best) = HandValue::best5(&cards[..5]).unwrap();
        assert_eq!(value.rank(), HandRank::HighCard);
        assert_eq!(best.as_slice(), &cards[..5]);
    }

    #[test]
    fn value_conversions() {
        let v = HandValue::eval5(&hand("Ac Ad Ah Ks Kc")).unwrap();
        assert_eq!(v.to_string(), "Full House (167)");
        assert_eq!(HandValue::from_class(167), Some(v));
        assert_eq!(HandValue::from_class(0), None);
        assert_eq!(HandValue::from_class(7463), None);

        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "167");
        assert_eq!(serde_json::from_str::<HandValue>(&json).unwrap(), v);
        assert!(serde_json::from_str::<HandValue>("0").is_err());

        let mut ranks = HandRank::ALL;
        ranks.sort();
        assert_eq!(ranks, HandRank::ALL);
    }
}
