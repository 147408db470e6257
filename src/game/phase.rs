//! Round phases and the transition table.

use serde::{Deserialize, Serialize};

/// Where a round is in its lifecycle.
///
/// ```text
/// Dealing -> Bidding -> KittyExchange -> TrickLoop -> Scoring -> RoleTransition -> Finished
///               \
///                +--> Redeal
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Dealing,
    Bidding,
    KittyExchange,
    TrickLoop,
    Scoring,
    RoleTransition,
    Finished,
    /// Nobody bid and the table deals again.
    Redeal,
}

impl Phase {
    pub const ALL: [Phase; 8] = [
        Phase::Dealing,
        Phase::Bidding,
        Phase::KittyExchange,
        Phase::TrickLoop,
        Phase::Scoring,
        Phase::RoleTransition,
        Phase::Finished,
        Phase::Redeal,
    ];

    /// Is `self -> next` an allowed transition?
    #[must_use]
    pub const fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Dealing, Phase::Bidding)
                | (Phase::Bidding, Phase::KittyExchange)
                | (Phase::Bidding, Phase::Redeal)
                | (Phase::KittyExchange, Phase::TrickLoop)
                | (Phase::TrickLoop, Phase::Scoring)
                | (Phase::Scoring, Phase::RoleTransition)
                | (Phase::RoleTransition, Phase::Finished)
        )
    }

    /// No further transitions are possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::Finished | Phase::Redeal)
    }
}
