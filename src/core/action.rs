//! Action representation: the intentions a seat can submit to a round.
//!
//! The engine never chooses actions. Transport layers and bots build an
//! `Action`, submit it through `Round::apply`, and get back either the
//! accepted outcome or a categorized rejection.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::cards::{Card, CardVec, Suit};
use crate::rules::BidKind;

/// A single intention submitted by a seat.
///
/// ## Example
///
/// ```
/// use tractor_engine::core::Action;
/// use tractor_engine::cards::{Card, Rank, Suit};
/// use tractor_engine::rules::BidKind;
///
/// let bid = Action::bid(BidKind::Pair, Some(Suit::Hearts));
/// let lead = Action::throw(&[Card::suited(Suit::Spades, Rank::Ace)]);
/// assert!(bid.is_bidding());
/// assert_eq!(lead.cards().len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Claim trump with a bid of the given kind.
    Bid { kind: BidKind, suit: Option<Suit> },
    /// Decline to bid this turn.
    Pass,
    /// Declarer buries cards back into the kitty.
    DiscardKitty(CardVec),
    /// Lead or follow in the current trick.
    Throw(CardVec),
}

impl Action {
    #[must_use]
    pub fn bid(kind: BidKind, suit: Option<Suit>) -> Self {
        Self::Bid { kind, suit }
    }

    #[must_use]
    pub fn discard(cards: &[Card]) -> Self {
        Self::DiscardKitty(CardVec::from_slice(cards))
    }

    #[must_use]
    pub fn throw(cards: &[Card]) -> Self {
        Self::Throw(CardVec::from_slice(cards))
    }

    /// Cards carried by this action (empty for bids and passes).
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        match self {
            Self::DiscardKitty(cards) | Self::Throw(cards) => cards,
            Self::Bid { .. } | Self::Pass => &[],
        }
    }

    /// Is this a bidding-phase action?
    #[must_use]
    pub fn is_bidding(&self) -> bool {
        matches!(self, Self::Bid { .. } | Self::Pass)
    }
}

/// An accepted action with ordering metadata.
///
/// Used for replay and debugging; rejected actions are never recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The seat that acted.
    pub player: PlayerId,

    /// The accepted action.
    pub action: Action,

    /// Position in the round's action sequence.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, sequence: u32) -> Self {
        Self {
            player,
            action,
            sequence,
        }
    }
}
