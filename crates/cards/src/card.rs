// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Card definitions.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Error;

/// A playing card.
///
/// A card is a small integer identifier, standard cards are numbered from 1 to
/// 52 with the following encoding:
///
/// ```text
///   id = 4 * rank + suit + 1
///   rank = deuce=0,trey=1,four=2,...,king=11,ace=12
///   suit = club=0,diamond=1,heart=2,spade=3
/// ```
///
/// so that `2c` is 1, `2d` is 2, ... and `As` is 52. The joker is 53 and the
/// red joker, used only in decks with two jokers, is 54. The identifier 0 is
/// reserved for an empty slot.
///
/// These numbers are shared with every binding and serialized form so they
/// must never change.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card(u8);

impl Card {
    /// The empty slot sentinel.
    pub const EMPTY: Card = Card(0);
    /// The joker (black joker in two jokers decks).
    pub const JOKER: Card = Card(53);
    /// The black joker.
    pub const BLACK_JOKER: Card = Card::JOKER;
    /// The red joker.
    pub const RED_JOKER: Card = Card(54);
    /// The largest card identifier.
    pub const MAX_ID: u8 = 54;

    /// Creates a card given a rank and suit.
    ///
    /// Creating a card with [Rank::Joker] gives a joker for the first two
    /// suits, use the [Card::JOKER] and [Card::RED_JOKER] constants instead.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card((((rank as u8) << 2) | suit as u8) + 1)
    }

    /// Creates a card from its identifier, `None` if `id > 54`.
    pub const fn from_id(id: u8) -> Option<Card> {
        if id <= Self::MAX_ID {
            Some(Card(id))
        } else {
            None
        }
    }

    /// This card identifier.
    #[inline]
    pub const fn id(&self) -> u8 {
        self.0
    }

    /// Checks if this is the empty slot sentinel.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Checks if this card is one of the jokers.
    #[inline]
    pub const fn is_joker(&self) -> bool {
        self.0 > 52
    }

    /// Checks if this card is one of the 52 standard cards.
    #[inline]
    pub const fn is_standard(&self) -> bool {
        self.0 >= 1 && self.0 <= 52
    }

    /// Returns the card rank, [Rank::Joker] for jokers.
    ///
    /// Panics if the card is empty.
    pub fn rank(&self) -> Rank {
        assert!(!self.is_empty(), "Empty card has no rank");
        Rank::from_index(self.rank_index()).unwrap_or(Rank::Joker)
    }

    /// Returns the card suit.
    ///
    /// Jokers follow the numeric encoding, so the joker reports clubs and the
    /// red joker diamonds. Panics if the card is empty.
    pub fn suit(&self) -> Suit {
        assert!(!self.is_empty(), "Empty card has no suit");
        match self.suit_index() {
            0 => Suit::Clubs,
            1 => Suit::Diamonds,
            2 => Suit::Hearts,
            _ => Suit::Spades,
        }
    }

    /// Returns the rank index, `(id - 1) >> 2`.
    #[inline]
    pub const fn rank_index(&self) -> u8 {
        self.0.wrapping_sub(1) >> 2
    }

    /// Returns the suit index, `(id - 1) & 3`.
    #[inline]
    pub const fn suit_index(&self) -> u8 {
        self.0.wrapping_sub(1) & 3
    }

    /// Returns the card full name, i.e. "ten of clubs".
    pub fn full_name(&self) -> String {
        match *self {
            Card::EMPTY => "empty".to_string(),
            Card::RED_JOKER => "red joker".to_string(),
            Card::JOKER => "joker".to_string(),
            _ => format!("{} of {}s", self.rank().name(), self.suit().name()),
        }
    }
}

impl TryFrom<u8> for Card {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Card::from_id(id).ok_or(Error::IndexOutOfRange {
            index: id as u64,
            len: Card::MAX_ID as u64 + 1,
        })
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.0
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Card::EMPTY => write!(f, "--"),
            Card::JOKER => write!(f, "JK"),
            Card::RED_JOKER => write!(f, "JR"),
            _ => write!(f, "{}{}", self.rank(), self.suit()),
        }
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({self})")
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
    /// Joker
    Joker,
}

impl Rank {
    /// Returns all standard ranks from deuce to ace.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> + Clone {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// Creates a rank from its index, deuce is 0 and joker is 13.
    pub fn from_index(index: u8) -> Option<Rank> {
        if index == Rank::Joker as u8 {
            Some(Rank::Joker)
        } else {
            Rank::ranks().nth(index as usize)
        }
    }

    /// The rank index.
    #[inline]
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// The rank full name, i.e. "deuce".
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Deuce => "deuce",
            Rank::Trey => "trey",
            Rank::Four => "four",
            Rank::Five => "five",
            Rank::Six => "six",
            Rank::Seven => "seven",
            Rank::Eight => "eight",
            Rank::Nine => "nine",
            Rank::Ten => "ten",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Ace => "ace",
            Rank::Joker => "joker",
        }
    }

    /// The rank plural name, i.e. "sixes".
    pub fn plural(&self) -> String {
        match self {
            Rank::Six => "sixes".to_string(),
            r => format!("{}s", r.name()),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            Rank::Joker => 'J',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds = 1,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 3,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> + Clone {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    /// Creates a suit from its index.
    pub fn from_index(index: u8) -> Option<Suit> {
        Suit::suits().nth(index as usize)
    }

    /// The suit index.
    #[inline]
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// The suit singular name, i.e. "spade".
    pub fn name(&self) -> &'static str {
        match self {
            Suit::Clubs => "club",
            Suit::Diamonds => "diamond",
            Suit::Hearts => "heart",
            Suit::Spades => "spade",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };

        write!(f, "{suit}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;

    #[test]
    fn card_encoding() {
        let mut ids = HashSet::default();

        for rank in Rank::ranks() {
            for suit in Suit::suits() {
                let card = Card::new(rank, suit);
                assert_eq!(card.id(), 4 * rank.index() + suit.index() + 1);
                assert_eq!(card.rank(), rank);
                assert_eq!(card.suit(), suit);
                assert!(card.is_standard());
                ids.insert(card.id());
            }
        }

        // Check uniqueness and range.
        assert_eq!(ids.len(), 52);
        assert_eq!(ids.iter().min(), Some(&1));
        assert_eq!(ids.iter().max(), Some(&52));

        assert_eq!(Card::new(Rank::Deuce, Suit::Clubs).id(), 1);
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).id(), 52);
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).id(), 35);
    }

    #[test]
    fn ranks_and_suits_cycle() {
        let suits = Suit::suits().cycle().take(8).collect::<Vec<_>>();
        assert_eq!(&suits[..4], &suits[4..]);
        assert_eq!(suits[4], Suit::Clubs);

        let ranks = Rank::ranks().rev().cycle().take(14).collect::<Vec<_>>();
        assert_eq!(ranks[0], Rank::Ace);
        assert_eq!(ranks[13], Rank::Ace);
        assert_eq!(ranks[12], Rank::Deuce);
    }

    #[test]
    fn card_id_round_trip() {
        for id in 1..=52 {
            let card = Card::from_id(id).unwrap();
            let rank = Rank::from_index(card.rank_index()).unwrap();
            let suit = Suit::from_index(card.suit_index()).unwrap();
            assert_eq!(Card::new(rank, suit), card);
        }

        assert_eq!(Card::from_id(55), None);
        assert!(Card::try_from(55u8).is_err());
        assert_eq!(Card::try_from(54u8), Ok(Card::RED_JOKER));
    }

    #[test]
    fn jokers() {
        assert!(Card::JOKER.is_joker());
        assert!(Card::RED_JOKER.is_joker());
        assert!(!Card::JOKER.is_standard());
        assert_eq!(Card::JOKER.rank(), Rank::Joker);
        assert_eq!(Card::RED_JOKER.rank(), Rank::Joker);
        assert_eq!(Card::BLACK_JOKER, Card::JOKER);
        assert!(Card::EMPTY.is_empty());
        assert!(!Card::EMPTY.is_standard());
        assert_eq!(Card::default(), Card::EMPTY);
    }

    #[test]
    #[should_panic]
    fn empty_card_has_no_rank() {
        Card::EMPTY.rank();
    }

    #[test]
    fn card_to_string() {
        let c = Card::new(Rank::King, Suit::Diamonds);
        assert_eq!(c.to_string(), "Kd");

        let c = Card::new(Rank::Five, Suit::Spades);
        assert_eq!(c.to_string(), "5s");

        let c = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(c.to_string(), "Th");

        assert_eq!(Card::JOKER.to_string(), "JK");
        assert_eq!(Card::RED_JOKER.to_string(), "JR");
        assert_eq!(Card::EMPTY.to_string(), "--");
        assert_eq!(format!("{:?}", Card::new(Rank::Ace, Suit::Clubs)), "Card(Ac)");
    }

    #[test]
    fn card_full_name() {
        assert_eq!(Card::new(Rank::Ten, Suit::Clubs).full_name(), "ten of clubs");
        assert_eq!(Card::new(Rank::Queen, Suit::Spades).full_name(), "queen of spades");
        assert_eq!(Card::JOKER.full_name(), "joker");
        assert_eq!(Card::RED_JOKER.full_name(), "red joker");
        assert_eq!(Rank::Six.plural(), "sixes");
        assert_eq!(Rank::Ace.plural(), "aces");
    }

    #[test]
    fn card_serde() {
        let card = Card::new(Rank::Jack, Suit::Hearts);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "39");
        assert_eq!(serde_json::from_str::<Card>(&json).unwrap(), card);
        assert!(serde_json::from_str::<Card>("60").is_err());
    }
}
