//! Round scoring, level advancement, and role transition.
//!
//! All three steps are pure functions so a match can be replayed or
//! audited from the per-round attacker points alone.

use serde::{Deserialize, Serialize};
use std::ops::Index;

use crate::cards::Rank;
use crate::core::{LevelPolicy, PlayerId, TeamId};

/// The two sides of a round.
///
/// Defenders are the declaring team; attackers try to capture points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Defenders,
    Attackers,
}

/// Result of a round in level terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub winning_side: Side,
    /// Levels the winning team advances.
    pub steps: u8,
    pub attacker_points: u32,
}

/// Map attacker points to a round outcome.
///
/// ```
/// use tractor_engine::core::LevelPolicy;
/// use tractor_engine::rules::{round_outcome, Side};
///
/// let outcome = round_outcome(125, &LevelPolicy::default());
/// assert_eq!(outcome.winning_side, Side::Attackers);
/// assert_eq!(outcome.steps, 1);
/// ```
#[must_use]
pub fn round_outcome(attacker_points: u32, policy: &LevelPolicy) -> RoundOutcome {
    let step = policy.step.max(1);
    let (winning_side, steps) = if attacker_points < policy.threshold {
        let below = policy.threshold - 1 - attacker_points;
        let steps = 1 + below / step;
        (Side::Defenders, clamp_steps(steps, policy.max_defender_steps))
    } else {
        let above = attacker_points - policy.threshold;
        (Side::Attackers, clamp_steps(above / step, policy.max_attacker_steps))
    };
    RoundOutcome {
        winning_side,
        steps,
        attacker_points,
    }
}

fn clamp_steps(steps: u32, max: u8) -> u8 {
    u8::try_from(steps).unwrap_or(u8::MAX).min(max)
}

/// Current level of each team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamLevels([Rank; 2]);

impl TeamLevels {
    #[must_use]
    pub const fn new(team0: Rank, team1: Rank) -> Self {
        Self([team0, team1])
    }

    /// Both teams at the same level.
    #[must_use]
    pub const fn uniform(rank: Rank) -> Self {
        Self([rank, rank])
    }

    #[must_use]
    pub fn get(&self, team: TeamId) -> Rank {
        self.0[team.index()]
    }

    pub fn set(&mut self, team: TeamId, rank: Rank) {
        self.0[team.index()] = rank;
    }
}

impl Default for TeamLevels {
    fn default() -> Self {
        Self::uniform(Rank::Two)
    }
}

impl Index<TeamId> for TeamLevels {
    type Output = Rank;

    fn index(&self, team: TeamId) -> &Rank {
        &self.0[team.index()]
    }
}

/// Levels after a round, and the match winner if someone passed Ace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTransition {
    pub levels: TeamLevels,
    pub match_winner: Option<TeamId>,
}

/// Advance `winner` by `steps` levels.
///
/// A team that climbs past Ace wins the match. With
/// `LevelPolicy::must_defend_ace`, attackers stop at Ace and must then
/// defend it to win.
#[must_use]
pub fn transition_levels(
    prev: &TeamLevels,
    winner: TeamId,
    side: Side,
    steps: u8,
    policy: &LevelPolicy,
) -> LevelTransition {
    let mut levels = *prev;
    let current = prev.get(winner);
    match current.checked_add(steps) {
        Some(next) => {
            levels.set(winner, next);
            LevelTransition {
                levels,
                match_winner: None,
            }
        }
        None if side == Side::Attackers && policy.must_defend_ace => {
            levels.set(winner, Rank::Ace);
            LevelTransition {
                levels,
                match_winner: None,
            }
        }
        None => {
            levels.set(winner, Rank::Ace);
            LevelTransition {
                levels,
                match_winner: Some(winner),
            }
        }
    }
}

/// Who defends and who declares in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Roles {
    pub defending_team: TeamId,
    pub declarer: PlayerId,
}

impl Roles {
    #[must_use]
    pub const fn new(declarer: PlayerId) -> Self {
        Self {
            defending_team: declarer.team(),
            declarer,
        }
    }

    #[must_use]
    pub const fn attacking_team(&self) -> TeamId {
        self.defending_team.opponent()
    }
}

/// Roles for the next round.
///
/// A successful defence keeps the team and passes the declarer role to the
/// partner (unless disabled). An attacker win swaps the teams and the role
/// moves to the next seat clockwise, which belongs to the new defenders.
#[must_use]
pub fn next_roles(prev: Roles, winning_side: Side, policy: &LevelPolicy) -> Roles {
    match winning_side {
        Side::Defenders if policy.rotate_declarer_on_hold => Roles::new(prev.declarer.partner()),
        Side::Defenders => prev,
        Side::Attackers => Roles::new(prev.declarer.next()),
    }
}

/// Points captured in a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub attacker_points: u32,
    pub defender_points: u32,
    /// Kitty bonus and the side that received it, once the last trick is in.
    pub kitty_bonus: Option<(Side, u32)>,
}

impl Scoreboard {
    pub(crate) fn add(&mut self, side: Side, points: u32) {
        match side {
            Side::Attackers => self.attacker_points += points,
            Side::Defenders => self.defender_points += points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(points: u32) -> (Side, u8) {
        let o = round_outcome(points, &LevelPolicy::default());
        (o.winning_side, o.steps)
    }

    #[test]
    fn test_outcome_bands() {
        assert_eq!(outcome(0), (Side::Defenders, 2));
        assert_eq!(outcome(39), (Side::Defenders, 2));
        assert_eq!(outcome(40), (Side::Defenders, 1));
        assert_eq!(outcome(79), (Side::Defenders, 1));
        assert_eq!(outcome(80), (Side::Attackers, 0));
        assert_eq!(outcome(119), (Side::Attackers, 0));
        assert_eq!(outcome(120), (Side::Attackers, 1));
        assert_eq!(outcome(160), (Side::Attackers, 2));
        assert_eq!(outcome(200), (Side::Attackers, 3));
        assert_eq!(outcome(400), (Side::Attackers, 3));
    }

    #[test]
    fn test_custom_threshold() {
        let policy = LevelPolicy {
            threshold: 100,
            ..LevelPolicy::default()
        };
        assert_eq!(round_outcome(90, &policy).winning_side, Side::Defenders);
        assert_eq!(round_outcome(100, &policy).winning_side, Side::Attackers);
    }

    #[test]
    fn test_transition_levels() {
        let policy = LevelPolicy::default();
        let levels = TeamLevels::default();
        let t = transition_levels(&levels, TeamId(1), Side::Defenders, 2, &policy);
        assert_eq!(t.levels[TeamId(1)], Rank::Four);
        assert_eq!(t.levels[TeamId(0)], Rank::Two);
        assert_eq!(t.match_winner, None);

        let t = transition_levels(&levels, TeamId(0), Side::Attackers, 0, &policy);
        assert_eq!(t.levels, levels);
    }

    #[test]
    fn test_passing_ace_wins() {
        let policy = LevelPolicy::default();
        let levels = TeamLevels::new(Rank::Ace, Rank::King);
        let t = transition_levels(&levels, TeamId(0), Side::Defenders, 1, &policy);
        assert_eq!(t.match_winner, Some(TeamId(0)));

        // Attackers must stop at Ace and defend it.
        let t = transition_levels(&levels, TeamId(1), Side::Attackers, 3, &policy);
        assert_eq!(t.match_winner, None);
        assert_eq!(t.levels[TeamId(1)], Rank::Ace);

        let relaxed = LevelPolicy {
            must_defend_ace: false,
            ..policy
        };
        let t = transition_levels(&levels, TeamId(1), Side::Attackers, 3, &relaxed);
        assert_eq!(t.match_winner, Some(TeamId(1)));
    }

    #[test]
    fn test_next_roles() {
        let policy = LevelPolicy::default();
        let roles = Roles::new(PlayerId::new(1));
        assert_eq!(roles.defending_team, TeamId(1));

        let held = next_roles(roles, Side::Defenders, &policy);
        assert_eq!(held.declarer, PlayerId::new(3));
        assert_eq!(held.defending_team, TeamId(1));

        let lost = next_roles(roles, Side::Attackers, &policy);
        assert_eq!(lost.declarer, PlayerId::new(2));
        assert_eq!(lost.defending_team, TeamId(0));

        let fixed = LevelPolicy {
            rotate_declarer_on_hold: false,
            ..policy
        };
        assert_eq!(next_roles(roles, Side::Defenders, &fixed), roles);
    }
}
