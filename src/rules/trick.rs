//! Trick resolution.
//!
//! A trick holds one play per seat, in clockwise order from the leader.
//! Resolution is a pure function of the plays and the trump context.

use serde::{Deserialize, Serialize};

use super::combination::Combination;
use crate::cards::{Card, TrumpContext};
use crate::core::{IllegalThrowError, PlayerId, PLAYER_COUNT};
use std::cmp::Ordering;

/// One seat's contribution to a trick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub player: PlayerId,
    pub combo: Combination,
}

/// Outcome of a completed trick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrickResult {
    pub winner: PlayerId,
    /// Point cards captured (5s, 10s, Kings).
    pub points: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trick {
    leader: PlayerId,
    plays: Vec<Play>,
}

impl Trick {
    #[must_use]
    pub fn new(leader: PlayerId) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(PLAYER_COUNT),
        }
    }

    #[must_use]
    pub fn leader(&self) -> PlayerId {
        self.leader
    }

    #[must_use]
    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    /// The lead, once played.
    #[must_use]
    pub fn led(&self) -> Option<&Combination> {
        self.plays.first().map(|p| &p.combo)
    }

    /// The seat expected to play next, or `None` once complete.
    #[must_use]
    pub fn next_player(&self) -> Option<PlayerId> {
        if self.is_complete() {
            return None;
        }
        self.leader.clockwise().nth(self.plays.len())
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYER_COUNT
    }

    /// Points on the table.
    #[must_use]
    pub fn points(&self) -> u32 {
        self.plays.iter().map(|p| p.combo.points()).sum()
    }

    /// Every card played so far.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().flat_map(|p| p.combo.cards().iter().copied())
    }

    /// Record a validated play. The caller checks turn order.
    pub(crate) fn push(&mut self, player: PlayerId, combo: Combination) {
        self.plays.push(Play { player, combo });
    }

    /// Record a play after checking turn order.
    ///
    /// For simulations outside a round; legality of the cards is the
    /// caller's concern.
    pub fn add_play(&mut self, player: PlayerId, combo: Combination) -> Result<(), IllegalThrowError> {
        let Some(expected) = self.next_player() else {
            return Err(IllegalThrowError::WrongCount {
                expected: 0,
                actual: combo.len(),
            });
        };
        if expected != player {
            return Err(IllegalThrowError::OutOfTurn {
                expected,
                actual: player,
            });
        }
        self.push(player, combo);
        Ok(())
    }

    /// The seat currently winning, if anything has been led.
    #[must_use]
    pub fn current_winner(&self, ctx: &TrumpContext) -> Option<PlayerId> {
        let led = self.led()?;
        let mut best = self.plays.first()?;
        for play in &self.plays[1..] {
            if beats(&play.combo, &best.combo, led, ctx) {
                best = play;
            }
        }
        Some(best.player)
    }

    /// Winner and points of a complete trick.
    #[must_use]
    pub fn resolve(&self, ctx: &TrumpContext) -> Option<TrickResult> {
        if !self.is_complete() {
            return None;
        }
        Some(TrickResult {
            winner: self.current_winner(ctx)?,
            points: self.points(),
        })
    }
}

/// Does `challenger` take the trick from `best`?
///
/// The challenger must be wholly in the led suit or wholly trump, match the
/// led shape, and have a strictly greater defining card. Equal plays leave
/// the earlier one winning.
#[must_use]
pub fn beats(challenger: &Combination, best: &Combination, led: &Combination, ctx: &TrumpContext) -> bool {
    let (Some(led_suit), Some(suit)) = (led.suit(), challenger.suit()) else {
        return false;
    };
    if suit != led_suit && !suit.is_trump() {
        return false;
    }
    if challenger.shape(ctx) != led.shape(ctx) {
        return false;
    }
    match (challenger.defining_card(ctx), best.defining_card(ctx)) {
        (Some(c), Some(b)) => ctx.compare(c, b, Some(led_suit)) == Ordering::Greater,
        _ => false,
    }
}
