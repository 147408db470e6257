//! Trump bidding.
//!
//! Players reveal trump-rank cards to claim the trump suit. Turns run
//! clockwise from the first bidder; each turn is a bid or a pass.
//!
//! ## Closing
//!
//! Bidding closes when:
//! - a double-joker bid is placed (nothing outranks it)
//! - every other seat passes in turn after a bid
//! - a full round of passes goes by with no bid
//!
//! `Bidding` only tracks the auction; the round decides what a closed
//! auction means for the declarer and trump suit.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, JokerSize, Rank, Suit};
use crate::core::{BidError, NoBidError, PlayerId, RuleConfig, PLAYER_COUNT};

/// Bid strength, weakest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BidKind {
    /// One trump-rank card of the named suit.
    Single,
    /// Both trump-rank cards of the named suit.
    Pair,
    /// Both copies of one joker size. Names no suit.
    DoubleJoker,
}

impl BidKind {
    fn label(self) -> &'static str {
        match self {
            BidKind::Single => "single",
            BidKind::Pair => "pair",
            BidKind::DoubleJoker => "double-joker",
        }
    }
}

/// An accepted bid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    pub player: PlayerId,
    pub kind: BidKind,
    /// `None` only for a double-joker bid.
    pub suit: Option<Suit>,
}

/// Check that `hand` backs a bid of `kind` for `suit`.
#[must_use]
pub fn is_backed(hand: &[Card], kind: BidKind, suit: Option<Suit>, trump_rank: Rank) -> bool {
    let count = |card: Card| hand.iter().filter(|c| **c == card).count();
    match (kind, suit) {
        (BidKind::Single, Some(suit)) => count(Card::suited(suit, trump_rank)) >= 1,
        (BidKind::Pair, Some(suit)) => count(Card::suited(suit, trump_rank)) >= 2,
        (BidKind::DoubleJoker, None) => {
            count(Card::Joker(JokerSize::Small)) >= 2 || count(Card::Joker(JokerSize::Big)) >= 2
        }
        _ => false,
    }
}

/// Auction state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bidding {
    first: PlayerId,
    turn: PlayerId,
    standing: Option<Bid>,
    passes: usize,
    closed: bool,
}

impl Bidding {
    #[must_use]
    pub fn new(first: PlayerId) -> Self {
        Self {
            first,
            turn: first,
            standing: None,
            passes: 0,
            closed: false,
        }
    }

    #[must_use]
    pub fn first_bidder(&self) -> PlayerId {
        self.first
    }

    /// Seat to act, or `None` once closed.
    #[must_use]
    pub fn turn(&self) -> Option<PlayerId> {
        (!self.closed).then_some(self.turn)
    }

    #[must_use]
    pub fn standing(&self) -> Option<&Bid> {
        self.standing.as_ref()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), BidError> {
        if self.closed {
            return Err(BidError::BiddingClosed);
        }
        if player != self.turn {
            return Err(BidError::OutOfTurn {
                expected: self.turn,
                actual: player,
            });
        }
        Ok(())
    }

    /// Validate a bid without placing it.
    pub fn check_bid(
        &self,
        player: PlayerId,
        kind: BidKind,
        suit: Option<Suit>,
        hand: &[Card],
        trump_rank: Rank,
        config: &RuleConfig,
    ) -> Result<Bid, BidError> {
        self.check_turn(player)?;
        match (kind, suit) {
            (BidKind::DoubleJoker, Some(_)) => return Err(BidError::UnexpectedSuit),
            (BidKind::Single | BidKind::Pair, None) => return Err(BidError::MissingSuit(kind.label())),
            _ => {}
        }
        if !is_backed(hand, kind, suit, trump_rank) {
            return Err(BidError::CardsNotHeld { player });
        }
        if let Some(standing) = &self.standing {
            if standing.suit == suit && standing.kind == kind {
                return Err(BidError::SameSuitReinforcement);
            }
            let raises = kind > standing.kind
                || (kind == standing.kind && config.allow_same_strength_overcall && suit != standing.suit);
            if !raises {
                return Err(BidError::NotARaise);
            }
        }
        Ok(Bid { player, kind, suit })
    }

    /// Place a bid returned by [`Bidding::check_bid`].
    pub fn place(&mut self, bid: Bid) {
        self.standing = Some(bid);
        self.passes = 0;
        self.turn = bid.player.next();
        if bid.kind == BidKind::DoubleJoker {
            self.closed = true;
        }
    }

    /// Pass the turn.
    pub fn pass(&mut self, player: PlayerId) -> Result<(), BidError> {
        self.check_turn(player)?;
        self.passes += 1;
        self.turn = player.next();
        let needed = if self.standing.is_some() {
            PLAYER_COUNT - 1
        } else {
            PLAYER_COUNT
        };
        if self.passes >= needed {
            self.closed = true;
        }
        Ok(())
    }

    /// The winning bid of a closed auction.
    pub fn resolve(&self) -> Result<Bid, NoBidError> {
        self.standing.ok_or(NoBidError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(s: &str) -> Vec<Card> {
        Card::parse_list(s).unwrap()
    }

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_bid_backing() {
        let h = hand("2H 2H 2S SJ SJ");
        assert!(is_backed(&h, BidKind::Single, Some(Suit::Spades), Rank::Two));
        assert!(is_backed(&h, BidKind::Pair, Some(Suit::Hearts), Rank::Two));
        assert!(!is_backed(&h, BidKind::Pair, Some(Suit::Spades), Rank::Two));
        assert!(is_backed(&h, BidKind::DoubleJoker, None, Rank::Two));
        assert!(!is_backed(&hand("SJ BJ"), BidKind::DoubleJoker, None, Rank::Two));
    }

    #[test]
    fn test_bid_must_raise() {
        let config = RuleConfig::default();
        let mut bidding = Bidding::new(p(0));
        let bid = bidding
            .check_bid(p(0), BidKind::Single, Some(Suit::Spades), &hand("2S"), Rank::Two, &config)
            .unwrap();
        bidding.place(bid);

        assert_eq!(
            bidding.check_bid(p(1), BidKind::Single, Some(Suit::Hearts), &hand("2H"), Rank::Two, &config),
            Err(BidError::NotARaise)
        );
        assert!(bidding
            .check_bid(p(1), BidKind::Pair, Some(Suit::Hearts), &hand("2H 2H"), Rank::Two, &config)
            .is_ok());

        let overcall = RuleConfig::default().with_same_strength_overcall();
        assert!(bidding
            .check_bid(p(1), BidKind::Single, Some(Suit::Hearts), &hand("2H"), Rank::Two, &overcall)
            .is_ok());
    }

    #[test]
    fn test_closes_after_passes_following_bid() {
        let mut bidding = Bidding::new(p(0));
        bidding.place(Bid {
            player: p(0),
            kind: BidKind::Single,
            suit: Some(Suit::Spades),
        });
        bidding.pass(p(1)).unwrap();
        bidding.pass(p(2)).unwrap();
        assert!(!bidding.is_closed());
        bidding.pass(p(3)).unwrap();
        assert!(bidding.is_closed());
        assert_eq!(bidding.resolve().unwrap().player, p(0));
    }

    #[test]
    fn test_same_suit_reinforcement_rejected() {
        let config = RuleConfig::default().with_same_strength_overcall();
        let mut bidding = Bidding::new(p(0));
        bidding.place(Bid {
            player: p(0),
            kind: BidKind::Single,
            suit: Some(Suit::Spades),
        });
        assert_eq!(
            bidding.check_bid(p(1), BidKind::Single, Some(Suit::Spades), &hand("2S"), Rank::Two, &config),
            Err(BidError::SameSuitReinforcement)
        );
        assert!(bidding
            .check_bid(p(1), BidKind::Pair, Some(Suit::Spades), &hand("2S 2S"), Rank::Two, &config)
            .is_ok());
    }

    #[test]
    fn test_overcalled_seat_can_bid_again() {
        let config = RuleConfig::default().with_same_strength_overcall();
        let mut bidding = Bidding::new(p(0));
        bidding.place(Bid {
            player: p(0),
            kind: BidKind::Single,
            suit: Some(Suit::Spades),
        });
        bidding.pass(p(1)).unwrap();
        bidding.pass(p(2)).unwrap();
        let overcall = bidding
            .check_bid(p(3), BidKind::Single, Some(Suit::Clubs), &hand("2C"), Rank::Two, &config)
            .unwrap();
        bidding.place(overcall);
        assert_eq!(bidding.turn(), Some(p(0)));
        assert!(bidding
            .check_bid(p(0), BidKind::Single, Some(Suit::Spades), &hand("2S"), Rank::Two, &config)
            .is_ok());
    }

    #[test]
    fn test_malformed_bids() {
        let config = RuleConfig::default();
        let bidding = Bidding::new(p(0));
        let h = hand("2S SJ SJ");
        assert_eq!(
            bidding.check_bid(p(0), BidKind::DoubleJoker, Some(Suit::Spades), &h, Rank::Two, &config),
            Err(BidError::UnexpectedSuit)
        );
        assert_eq!(
            bidding.check_bid(p(0), BidKind::Single, None, &h, Rank::Two, &config),
            Err(BidError::MissingSuit("single"))
        );
        assert_eq!(
            bidding.check_bid(p(1), BidKind::Single, Some(Suit::Spades), &h, Rank::Two, &config),
            Err(BidError::OutOfTurn {
                expected: p(0),
                actual: p(1)
            })
        );
        assert_eq!(
            bidding.check_bid(p(0), BidKind::Pair, Some(Suit::Spades), &h, Rank::Two, &config),
            Err(BidError::CardsNotHeld { player: p(0) })
        );
    }

    #[test]
    fn test_double_joker_closes() {
        let config = RuleConfig::default();
        let mut bidding = Bidding::new(p(0));
        let bid = bidding
            .check_bid(p(0), BidKind::DoubleJoker, None, &hand("BJ BJ"), Rank::Two, &config)
            .unwrap();
        bidding.place(bid);
        assert!(bidding.is_closed());
        assert_eq!(bidding.turn(), None);
        assert_eq!(bidding.pass(p(1)), Err(BidError::BiddingClosed));
        assert_eq!(bidding.resolve().unwrap().suit, None);
    }

    #[test]
    fn test_all_pass_is_no_bid() {
        let mut bidding = Bidding::new(p(2));
        for seat in [2, 3, 0] {
            bidding.pass(p(seat)).unwrap();
            assert!(!bidding.is_closed());
        }
        bidding.pass(p(1)).unwrap();
        assert!(bidding.is_closed());
        assert_eq!(bidding.resolve(), Err(NoBidError));
    }
}
