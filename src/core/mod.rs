//! Core engine types: seats, RNG, configuration, actions, errors.
//!
//! These are the building blocks every other module leans on. They know
//! nothing about trick resolution or bidding rules.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod error;

pub use player::{PlayerId, PlayerMap, TeamId, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use config::{LevelPolicy, NoBidPolicy, OpeningLeader, RuleConfig};
pub use action::{Action, ActionRecord};
pub use error::{
    BidError, DealError, EngineError, IllegalThrowError, KittyError, NoBidError, SnapshotError,
};
