//! Pure rules logic.
//!
//! Nothing here owns round state. Every function takes the trump context
//! and the cards it needs and returns a verdict, so the round controller,
//! bots, and replay tools all share one interpretation of the rules:
//! - `combination`: classifying plays into singles, pairs, tractors, throws
//! - `validator`: lead and follow legality, legal-move enumeration
//! - `trick`: trick winner and points
//! - `bidding`: the trump auction
//! - `kitty`: discard checks and the kitty bonus
//! - `scoring`: round outcome, level advancement, role transition

pub mod combination;
pub mod validator;
pub mod trick;
pub mod bidding;
pub mod kitty;
pub mod scoring;

pub use combination::{decompose, strongest_unit, ComboKind, Combination, Unit, UnitShape};
pub use validator::{legal_moves, validate, validate_follow, validate_lead};
pub use trick::{beats, Play, Trick, TrickResult};
pub use bidding::{is_backed, Bid, BidKind, Bidding};
pub use kitty::{check_discard, kitty_bonus};
pub use scoring::{
    next_roles, round_outcome, transition_levels, LevelTransition, Roles, RoundOutcome, Scoreboard, Side,
    TeamLevels,
};
