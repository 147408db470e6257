//! Card values.
//!
//! A `Card` is an immutable value. The double deck holds two physical copies
//! of every value, and the engine never distinguishes between them: hands
//! are multisets and two cards are equal iff suit and rank (or joker size)
//! match.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Inline card list sized for the common cases (a tractor or a kitty).
pub type CardVec = SmallVec<[Card; 8]>;

/// The four suits, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' | 'c' | '♣' => Some(Suit::Clubs),
            'D' | 'd' | '♦' => Some(Suit::Diamonds),
            'H' | 'h' | '♥' => Some(Suit::Hearts),
            'S' | 's' | '♠' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card ranks, lowest first. Also used as team levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// 0 for Two through 12 for Ace.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The rank `steps` above this one, or `None` past Ace.
    #[must_use]
    pub fn checked_add(self, steps: u8) -> Option<Rank> {
        Rank::ALL.get(usize::from(self.index()) + usize::from(steps)).copied()
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Rank::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(label) || (label == "T" && *r == Rank::Ten))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JokerSize {
    Small,
    Big,
}

/// A card value.
///
/// `Ord` is a stable display order only (suits, then jokers). Game
/// comparisons go through `TrumpContext`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    Suited(Suit, Rank),
    Joker(JokerSize),
}

impl Card {
    pub const SMALL_JOKER: Card = Card::Joker(JokerSize::Small);
    pub const BIG_JOKER: Card = Card::Joker(JokerSize::Big);

    #[must_use]
    pub const fn suited(suit: Suit, rank: Rank) -> Self {
        Card::Suited(suit, rank)
    }

    #[must_use]
    pub const fn suit(self) -> Option<Suit> {
        match self {
            Card::Suited(suit, _) => Some(suit),
            Card::Joker(_) => None,
        }
    }

    #[must_use]
    pub const fn rank(self) -> Option<Rank> {
        match self {
            Card::Suited(_, rank) => Some(rank),
            Card::Joker(_) => None,
        }
    }

    #[must_use]
    pub const fn is_joker(self) -> bool {
        matches!(self, Card::Joker(_))
    }

    /// Scoring value: 5s are worth 5, 10s and Kings 10.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Card::Suited(_, Rank::Five) => 5,
            Card::Suited(_, Rank::Ten) | Card::Suited(_, Rank::King) => 10,
            _ => 0,
        }
    }

    /// Parse a whitespace-separated card list such as `"AS 10H SJ BJ"`.
    pub fn parse_list(s: &str) -> Result<Vec<Card>, ParseCardError> {
        s.split_whitespace().map(str::parse).collect()
    }
}

/// Total point value of a set of cards.
#[must_use]
pub fn total_points(cards: &[Card]) -> u32 {
    cards.iter().map(|c| c.points()).sum()
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Suited(suit, rank) => write!(f, "{rank}{suit}"),
            Card::Joker(JokerSize::Small) => f.write_str("SJ"),
            Card::Joker(JokerSize::Big) => f.write_str("BJ"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot parse card {0:?}")]
pub struct ParseCardError(pub String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Accepts `AS`, `10h`, `T♥`, `SJ`, `BJ`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());
        match s {
            "SJ" | "sj" => return Ok(Card::SMALL_JOKER),
            "BJ" | "bj" => return Ok(Card::BIG_JOKER),
            _ => {}
        }
        let suit_char = s.chars().last().ok_or_else(err)?;
        let suit = Suit::from_char(suit_char).ok_or_else(err)?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];
        let rank = Rank::from_label(rank_part).ok_or_else(err)?;
        Ok(Card::suited(suit, rank))
    }
}
