//! Error categories for rejected actions.
//!
//! Every rejection is local to the offending action: the round is left
//! exactly as it was before the action was submitted.

use crate::cards::{Card, EffectiveSuit, Rank};
use crate::core::PlayerId;
use crate::game::Phase;

/// Malformed deck or table setup. Fatal for match setup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DealError {
    #[error("deck must contain {expected} cards, got {actual}")]
    DeckSize { expected: usize, actual: usize },
    #[error("Sheng Ji needs exactly 4 players, got {0}")]
    PlayerCount(usize),
    #[error("hand for {player} must hold {expected} cards, got {actual}")]
    HandSize {
        player: PlayerId,
        expected: usize,
        actual: usize,
    },
    #[error("kitty must hold {expected} cards, got {actual}")]
    KittySize { expected: usize, actual: usize },
    #[error("deck holds {count} copies of {card}, expected 2")]
    Composition { card: Card, count: usize },
    #[error("an opening round needs both teams on one level, got {team0} and {team1}")]
    UnevenOpeningLevels { team0: Rank, team1: Rank },
}

/// Invalid or out-of-turn bid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BidError {
    #[error("bidding is not open (round is in {0:?})")]
    WrongPhase(Phase),
    #[error("bidding is closed")]
    BiddingClosed,
    #[error("it is {expected}'s turn to bid, not {actual}'s")]
    OutOfTurn { expected: PlayerId, actual: PlayerId },
    #[error("a {0} bid must name a suit")]
    MissingSuit(&'static str),
    #[error("a double-joker bid cannot name a suit")]
    UnexpectedSuit,
    #[error("{player} does not hold the cards for this bid")]
    CardsNotHeld { player: PlayerId },
    #[error("bid does not outrank the standing bid")]
    NotARaise,
    #[error("repeating the standing suit with the same kind is not a raise")]
    SameSuitReinforcement,
}

/// Nobody bid during a full round of bidding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no player bid for trump")]
pub struct NoBidError;

/// Invalid kitty discard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KittyError {
    #[error("kitty exchange is not open (round is in {0:?})")]
    WrongPhase(Phase),
    #[error("only the declarer ({declarer}) may discard the kitty")]
    NotDeclarer { declarer: PlayerId },
    #[error("must discard exactly {expected} cards, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("{0} is not in the declarer's hand")]
    NotInHand(Card),
}

/// Illegal lead or follow. The player must resubmit a legal throw.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalThrowError {
    #[error("trick play is not open (round is in {0:?})")]
    WrongPhase(Phase),
    #[error("it is {expected}'s turn to play, not {actual}'s")]
    OutOfTurn { expected: PlayerId, actual: PlayerId },
    #[error("no cards selected")]
    Empty,
    #[error("{0} is not in hand")]
    NotInHand(Card),
    #[error("a lead must be a single effective suit")]
    MixedLead,
    #[error("must play exactly {expected} cards, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("must play {required} card(s) of {suit}, played {played}")]
    MustFollowSuit {
        suit: EffectiveSuit,
        required: usize,
        played: usize,
    },
    #[error("must follow the led structure with {required} paired card(s) from {suit}, played {played}")]
    MustFollowStructure {
        suit: EffectiveSuit,
        required: usize,
        played: usize,
    },
    #[error("sandbagging: {held} outranks the weakest unit of the lead and was held back")]
    Sandbagging { held: Card },
}

/// Snapshot encoding or decoding failed.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode snapshot: {0}")]
    Decode(#[source] bincode::Error),
}

/// Any engine-level failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Deal(#[from] DealError),
    #[error(transparent)]
    Bid(#[from] BidError),
    #[error(transparent)]
    NoBid(#[from] NoBidError),
    #[error(transparent)]
    Kitty(#[from] KittyError),
    #[error(transparent)]
    Throw(#[from] IllegalThrowError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    #[error("round is not finished (round is in {0:?})")]
    RoundNotFinished(Phase),
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("no round is in progress")]
    NoRoundInProgress,
    #[error("the match is over")]
    MatchOver,
    #[error("round was not issued by this match")]
    UnknownRound,
}
