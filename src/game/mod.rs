//! Stateful game flow: round phases, the round controller, the match, and
//! snapshots.

pub mod phase;
pub mod round;
pub mod match_state;
pub mod snapshot;

pub use phase::Phase;
pub use round::{CompletedTrick, Engine, Round, RoundResult, RoundSetup, ThrowOutcome};
pub use match_state::{Match, MatchStatus, RoundRecord};
pub use snapshot::{decode_match, decode_round, encode_match, encode_round};
