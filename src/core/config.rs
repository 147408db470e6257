//! Rule configuration.
//!
//! House rules vary between tables. Everything the engine does not hardcode
//! lives here:
//! - `RuleConfig`: bidding, following, scoring and kitty options
//! - `LevelPolicy`: how round outcomes turn into level steps and role swaps
//!
//! All types are serde-serializable so a host can load them from its own
//! configuration format.

use serde::{Deserialize, Serialize};

/// What happens when a full round of bidding passes without a bid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoBidPolicy {
    /// Throw the deal in and deal again with a fresh seed.
    #[default]
    Redeal,
    /// Keep the previous round's trump suit (or joker-only mode in the
    /// opening round) with the designated declarer.
    KeepPreviousTrump,
}

/// Who leads the first trick of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpeningLeader {
    #[default]
    DeclarerPartner,
    Declarer,
}

/// Level advancement and role transition policy.
///
/// The defaults reproduce the classic table:
///
/// | attacker points | result                         |
/// |-----------------|--------------------------------|
/// | 0-39            | defenders hold, +2             |
/// | 40-79           | defenders hold, +1             |
/// | 80-119          | attackers win, roles swap, +0  |
/// | 120-159         | attackers win, +1              |
/// | 160-199         | attackers win, +2              |
/// | 200+            | attackers win, +3              |
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPolicy {
    /// Attackers win the round at or above this many points.
    pub threshold: u32,
    /// Width of each scoring band.
    pub step: u32,
    /// Maximum levels the defenders can gain from one round.
    pub max_defender_steps: u8,
    /// Maximum levels the attackers can gain from one round.
    pub max_attacker_steps: u8,
    /// Attackers cannot advance past Ace; a team must defend Ace to win.
    pub must_defend_ace: bool,
    /// After a successful defence the declarer role passes to their partner.
    pub rotate_declarer_on_hold: bool,
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self {
            threshold: 80,
            step: 40,
            max_defender_steps: 2,
            max_attacker_steps: 3,
            must_defend_ace: true,
            rotate_declarer_on_hold: true,
        }
    }
}

/// Complete rule configuration for a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Cards set aside for the kitty.
    pub kitty_size: usize,

    /// Kitty points are multiplied by this when awarded to the final trick's winner.
    pub kitty_multiplier: u32,

    /// Allow a bid of equal strength for a different suit to overcall.
    pub allow_same_strength_overcall: bool,

    /// Followers must reproduce the led tractors and pairs where their
    /// holdings in the led suit allow it.
    pub strict_follow: bool,

    /// Handling of a deal nobody bids on.
    pub no_bid_policy: NoBidPolicy,

    /// Who leads the first trick.
    pub opening_leader: OpeningLeader,

    /// Level and role transition policy.
    pub levels: LevelPolicy,

    /// Upper bound on candidates returned by the legal-move helper.
    pub legal_move_cap: usize,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            kitty_size: 8,
            kitty_multiplier: 2,
            allow_same_strength_overcall: false,
            strict_follow: false,
            no_bid_policy: NoBidPolicy::Redeal,
            opening_leader: OpeningLeader::DeclarerPartner,
            levels: LevelPolicy::default(),
            legal_move_cap: 512,
        }
    }
}

impl RuleConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the kitty point multiplier.
    #[must_use]
    pub fn with_kitty_multiplier(mut self, multiplier: u32) -> Self {
        self.kitty_multiplier = multiplier;
        self
    }

    /// Allow equal-strength overcalls in a different suit.
    #[must_use]
    pub fn with_same_strength_overcall(mut self) -> Self {
        self.allow_same_strength_overcall = true;
        self
    }

    /// Require followers to reproduce the led structure.
    #[must_use]
    pub fn with_strict_follow(mut self) -> Self {
        self.strict_follow = true;
        self
    }

    /// Set the no-bid policy.
    #[must_use]
    pub fn with_no_bid_policy(mut self, policy: NoBidPolicy) -> Self {
        self.no_bid_policy = policy;
        self
    }

    /// Set who leads the first trick.
    #[must_use]
    pub fn with_opening_leader(mut self, leader: OpeningLeader) -> Self {
        self.opening_leader = leader;
        self
    }

    /// Set the level policy.
    #[must_use]
    pub fn with_levels(mut self, levels: LevelPolicy) -> Self {
        self.levels = levels;
        self
    }

    /// Set the attacker win threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.levels.threshold = threshold;
        self
    }

    /// Set the legal-move enumeration cap.
    #[must_use]
    pub fn with_legal_move_cap(mut self, cap: usize) -> Self {
        self.legal_move_cap = cap;
        self
    }
}
