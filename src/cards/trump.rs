//! Trump context and card ranking.
//!
//! Card strength depends on the round's trump suit and trump rank, so every
//! comparison takes the immutable `TrumpContext` explicitly. There is no
//! global ranking state.
//!
//! ## Strength ordinals
//!
//! Within an effective suit, strengths are contiguous so that adjacent pairs
//! (tractors) differ by exactly one:
//!
//! | cards                                   | strength |
//! |-----------------------------------------|----------|
//! | plain ranks, trump rank removed         | 0..=11   |
//! | trump rank in a non-trump suit (tied)   | 12       |
//! | trump rank in the trump suit            | 13       |
//! | small joker                             | 14 (13 in joker-only mode) |
//! | big joker                               | 15 (14 in joker-only mode) |

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::card::{Card, JokerSize, Rank, Suit};
use crate::core::TeamId;

/// Strength shared by all off-suit trump-rank cards.
pub const OFF_SUIT_TRUMP_RANK: u8 = 12;

/// The suit a card plays as: its printed suit, or the trump group.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectiveSuit {
    Trump,
    Plain(Suit),
}

impl EffectiveSuit {
    #[must_use]
    pub const fn is_trump(self) -> bool {
        matches!(self, EffectiveSuit::Trump)
    }
}

impl fmt::Display for EffectiveSuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectiveSuit::Trump => f.write_str("trump"),
            EffectiveSuit::Plain(suit) => write!(f, "{suit}"),
        }
    }
}

/// Per-round trump settings.
///
/// Fixed once bidding resolves; immutable for the rest of the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrumpContext {
    /// `None` is joker-only mode: no suit is elevated.
    pub trump_suit: Option<Suit>,
    pub trump_rank: Rank,
    pub declaring_team: TeamId,
}

impl TrumpContext {
    #[must_use]
    pub const fn new(trump_suit: Option<Suit>, trump_rank: Rank, declaring_team: TeamId) -> Self {
        Self {
            trump_suit,
            trump_rank,
            declaring_team,
        }
    }

    /// Jokers, trump-rank cards and trump-suit cards are trump.
    #[must_use]
    pub fn is_trump(&self, card: Card) -> bool {
        match card {
            Card::Joker(_) => true,
            Card::Suited(suit, rank) => rank == self.trump_rank || Some(suit) == self.trump_suit,
        }
    }

    #[must_use]
    pub fn effective_suit(&self, card: Card) -> EffectiveSuit {
        match card {
            Card::Suited(suit, _) if !self.is_trump(card) => EffectiveSuit::Plain(suit),
            _ => EffectiveSuit::Trump,
        }
    }

    /// Strength ordinal of a card within its effective suit.
    #[must_use]
    pub fn strength(&self, card: Card) -> u8 {
        let joker_base = if self.trump_suit.is_some() {
            OFF_SUIT_TRUMP_RANK + 2
        } else {
            OFF_SUIT_TRUMP_RANK + 1
        };
        match card {
            Card::Joker(JokerSize::Small) => joker_base,
            Card::Joker(JokerSize::Big) => joker_base + 1,
            Card::Suited(suit, rank) if rank == self.trump_rank => {
                if Some(suit) == self.trump_suit {
                    OFF_SUIT_TRUMP_RANK + 1
                } else {
                    OFF_SUIT_TRUMP_RANK
                }
            }
            Card::Suited(_, rank) => {
                if rank > self.trump_rank {
                    rank.index() - 1
                } else {
                    rank.index()
                }
            }
        }
    }

    /// Compare two cards for trick-winning purposes.
    ///
    /// Trump beats the led suit, which beats everything else. Within a tier
    /// cards compare by strength. `led` of `None` treats every plain suit as
    /// led. Plain cards of equal strength are ordered by suit; only the
    /// off-suit trump-rank cards tie with a different value.
    #[must_use]
    pub fn compare(&self, a: Card, b: Card, led: Option<EffectiveSuit>) -> Ordering {
        self.trick_key(a, led).cmp(&self.trick_key(b, led))
    }

    fn trick_key(&self, card: Card, led: Option<EffectiveSuit>) -> (u8, u8, usize) {
        match self.effective_suit(card) {
            EffectiveSuit::Trump => (2, self.strength(card), 0),
            EffectiveSuit::Plain(suit) => {
                let tier = if led.map_or(true, |l| l == EffectiveSuit::Plain(suit)) { 1 } else { 0 };
                (tier, self.strength(card), suit.index())
            }
        }
    }

    /// Display ordering: plain suits grouped, trump group last.
    #[must_use]
    pub fn sort_key(&self, card: Card) -> u16 {
        match self.effective_suit(card) {
            EffectiveSuit::Trump => 100 + u16::from(self.strength(card)),
            EffectiveSuit::Plain(suit) => suit.index() as u16 * 16 + u16::from(self.strength(card)),
        }
    }

    /// Sort a hand in display order, strongest first.
    pub fn sort_hand(&self, hand: &mut [Card]) {
        hand.sort_by_key(|c| std::cmp::Reverse(self.sort_key(*c)));
    }
}

/// Free-function form of [`TrumpContext::strength`].
#[must_use]
pub fn strength(card: Card, ctx: &TrumpContext) -> u8 {
    ctx.strength(card)
}

/// Free-function form of [`TrumpContext::compare`].
#[must_use]
pub fn compare(a: Card, b: Card, ctx: &TrumpContext, led: Option<EffectiveSuit>) -> Ordering {
    ctx.compare(a, b, led)
}
