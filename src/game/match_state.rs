//! Match state across rounds.
//!
//! A `Match` carries what survives a round: team levels, designated roles,
//! the previous trump suit, and the seed stream. Rounds are handed out by
//! `start_round` and handed back by `finish_round`; the match itself never
//! holds a half-played round.
//!
//! Completed rounds are kept in an `im::Vector`, so cloning the history for
//! a concurrent reader is O(1) and the reader sees an immutable snapshot.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::phase::Phase;
use super::round::{Round, RoundResult, RoundSetup};
use crate::cards::{Suit, TrumpContext};
use crate::core::{EngineError, GameRng, PlayerId, RuleConfig, TeamId};
use crate::rules::{Roles, TeamLevels};

/// A finished round as recorded in the match history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_number: u32,
    pub seed: Option<u64>,
    pub trump: Option<TrumpContext>,
    pub result: RoundResult,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    InProgress,
    Won(TeamId),
}

/// The round currently handed out, identified by number and seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct IssuedRound {
    round_number: u32,
    seed: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Match {
    config: RuleConfig,
    rng: GameRng,
    levels: TeamLevels,
    roles: Option<Roles>,
    previous_trump: Option<Suit>,
    history: im::Vector<RoundRecord>,
    redeals: u32,
    issued: Option<IssuedRound>,
    winner: Option<TeamId>,
}

impl Match {
    /// New match with both teams on Two.
    #[must_use]
    pub fn new(seed: u64, config: RuleConfig) -> Self {
        Self {
            config,
            rng: GameRng::new(seed),
            levels: TeamLevels::default(),
            roles: None,
            previous_trump: None,
            history: im::Vector::new(),
            redeals: 0,
            issued: None,
            winner: None,
        }
    }

    /// Start from explicit levels.
    ///
    /// Uneven levels also need `with_roles`; otherwise the first deal fails.
    #[must_use]
    pub fn with_levels(mut self, levels: TeamLevels) -> Self {
        self.levels = levels;
        self
    }

    /// Start with designated roles, as if a round had already been played.
    #[must_use]
    pub fn with_roles(mut self, roles: Roles) -> Self {
        self.roles = Some(roles);
        self
    }

    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    #[must_use]
    pub fn levels(&self) -> TeamLevels {
        self.levels
    }

    /// Roles for the next round; `None` before the opening round finishes.
    #[must_use]
    pub fn roles(&self) -> Option<Roles> {
        self.roles
    }

    /// Completed rounds, oldest first.
    #[must_use]
    pub fn history(&self) -> &im::Vector<RoundRecord> {
        &self.history
    }

    /// Deals thrown in because nobody bid.
    #[must_use]
    pub fn redeals(&self) -> u32 {
        self.redeals
    }

    #[must_use]
    pub fn round_in_progress(&self) -> bool {
        self.issued.is_some()
    }

    #[must_use]
    pub fn status(&self) -> MatchStatus {
        match self.winner {
            Some(team) => MatchStatus::Won(team),
            None => MatchStatus::InProgress,
        }
    }

    /// Setup for the next round.
    #[must_use]
    pub fn next_setup(&self) -> RoundSetup {
        RoundSetup {
            round_number: self.history.len() as u32 + 1,
            levels: self.levels,
            first_bidder: self.roles.map_or(PlayerId::new(0), |roles| roles.declarer),
            roles: self.roles,
            previous_trump: self.previous_trump,
        }
    }

    /// Deal the next round with a fresh seed from the match stream.
    pub fn start_round(&mut self) -> Result<Round, EngineError> {
        if self.winner.is_some() {
            return Err(EngineError::MatchOver);
        }
        if self.issued.is_some() {
            return Err(EngineError::RoundInProgress);
        }
        let seed = self.rng.fork().seed();
        let setup = self.next_setup();
        let round_number = setup.round_number;
        let round = Round::deal(seed, setup, self.config.clone())?;
        self.issued = Some(IssuedRound { round_number, seed });
        Ok(round)
    }

    /// Fold a finished (or redealt) round back into the match.
    ///
    /// A round still in play is rejected and stays the caller's to finish.
    /// So is a round this match did not hand out.
    pub fn finish_round(&mut self, round: Round) -> Result<MatchStatus, EngineError> {
        let Some(issued) = self.issued else {
            return Err(EngineError::NoRoundInProgress);
        };
        if round.setup().round_number != issued.round_number || round.seed() != Some(issued.seed) {
            return Err(EngineError::UnknownRound);
        }
        match round.phase() {
            Phase::Redeal => {
                self.issued = None;
                self.redeals += 1;
                info!(round = round.setup().round_number, "round thrown in for redeal");
            }
            Phase::Finished => {
                let Some(result) = round.result().cloned() else {
                    return Err(EngineError::RoundNotFinished(round.phase()));
                };
                self.levels = result.levels.levels;
                self.roles = Some(result.next_roles);
                self.previous_trump = round.trump_context().and_then(|ctx| ctx.trump_suit);
                self.winner = result.levels.match_winner;
                info!(
                    round = round.setup().round_number,
                    winner = %result.winner,
                    team0 = %self.levels[TeamId(0)],
                    team1 = %self.levels[TeamId(1)],
                    "round recorded"
                );
                self.history.push_back(RoundRecord {
                    round_number: round.setup().round_number,
                    seed: round.seed(),
                    trump: round.trump_context(),
                    result,
                });
                self.issued = None;
            }
            other => return Err(EngineError::RoundNotFinished(other)),
        }
        Ok(self.status())
    }

    /// Abandon the match, dropping any round in flight.
    ///
    /// Returns the completed history; nothing partial survives.
    #[must_use]
    pub fn abandon(self) -> im::Vector<RoundRecord> {
        info!(rounds = self.history.len(), "match abandoned");
        self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Rank;
    use crate::core::DealError;

    #[test]
    fn test_round_lifecycle_guards() {
        let mut m = Match::new(1, RuleConfig::default());
        let round = m.start_round().unwrap();
        assert!(matches!(m.start_round(), Err(EngineError::RoundInProgress)));
        assert!(matches!(
            m.finish_round(round),
            Err(EngineError::RoundNotFinished(Phase::Bidding))
        ));
        assert!(m.round_in_progress());
    }

    #[test]
    fn test_redeal_keeps_levels() {
        let levels = TeamLevels::new(Rank::Five, Rank::Three);
        let roles = Roles::new(PlayerId::new(1));
        let mut m = Match::new(2, RuleConfig::default()).with_levels(levels).with_roles(roles);
        let mut round = m.start_round().unwrap();
        assert_eq!(round.setup().round_number, 1);
        assert_eq!(round.setup().trump_rank(), Rank::Three);
        for seat in [1, 2, 3, 0] {
            round.submit_pass(PlayerId::new(seat)).unwrap();
        }
        assert_eq!(m.finish_round(round).unwrap(), MatchStatus::InProgress);
        assert_eq!(m.levels(), levels);
        assert_eq!(m.roles(), Some(roles));
        assert_eq!(m.redeals(), 1);
        assert!(m.history().is_empty());

        let next = m.start_round().unwrap();
        assert_eq!(next.setup().round_number, 1);
    }

    #[test]
    fn test_finish_without_round() {
        let mut m = Match::new(3, RuleConfig::default());
        let round = Round::deal(3, RoundSetup::opening(), RuleConfig::default()).unwrap();
        assert!(matches!(m.finish_round(round), Err(EngineError::NoRoundInProgress)));
    }

    #[test]
    fn test_uneven_levels_without_roles_fail_to_deal() {
        let mut m = Match::new(4, RuleConfig::default()).with_levels(TeamLevels::new(Rank::Five, Rank::Three));
        assert!(matches!(
            m.start_round(),
            Err(EngineError::Deal(DealError::UnevenOpeningLevels {
                team0: Rank::Five,
                team1: Rank::Three
            }))
        ));
        assert!(!m.round_in_progress());
    }

    #[test]
    fn test_rejects_round_from_another_match() {
        let mut a = Match::new(1, RuleConfig::default());
        let mut b = Match::new(2, RuleConfig::default());
        let mut foreign = a.start_round().unwrap();
        let _own = b.start_round().unwrap();
        for seat in 0..4 {
            foreign.submit_pass(PlayerId::new(seat)).unwrap();
        }
        assert!(matches!(b.finish_round(foreign), Err(EngineError::UnknownRound)));
        assert!(b.round_in_progress());
        assert_eq!(b.redeals(), 0);

        let stray = Round::deal(5, b.next_setup(), RuleConfig::default()).unwrap();
        assert!(matches!(b.finish_round(stray), Err(EngineError::UnknownRound)));
    }

    #[test]
    fn test_seeds_are_deterministic() {
        let mut a = Match::new(77, RuleConfig::default());
        let mut b = Match::new(77, RuleConfig::default());
        let ra = a.start_round().unwrap();
        let rb = b.start_round().unwrap();
        assert_eq!(ra.seed(), rb.seed());
        assert_eq!(ra.hand(PlayerId::new(0)), rb.hand(PlayerId::new(0)));
    }
}
