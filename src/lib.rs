//! # tractor-engine
//!
//! Rules and state engine for Sheng Ji ("Tractor"), the four-player
//! partnership trick-taking game played with a 108-card double deck.
//!
//! ## Design Principles
//!
//! 1. **Validate, Then Mutate**: Every action is checked in full before the
//!    round changes. A rejected action leaves no trace.
//!
//! 2. **Context Is Explicit**: Card strength depends on the round's trump
//!    suit and rank. Every comparison takes a `TrumpContext`; there is no
//!    global ranking state.
//!
//! 3. **Pure Rules, Owned State**: `rules` holds pure functions; `game`
//!    owns the state machines that call them. Bots and replay tools use the
//!    same functions the round controller does.
//!
//! 4. **Deterministic**: Deals come from a seedable ChaCha8 stream, so a
//!    seed and an action history reproduce a round exactly.
//!
//! ## Modules
//!
//! - `core`: Seats, teams, RNG, configuration, actions, errors
//! - `cards`: Card values, trump ranking, hands, the double deck
//! - `rules`: Combinations, throw validation, tricks, bidding, kitty, scoring
//! - `game`: Round phases, the round controller, matches, snapshots
//!
//! ## Example
//!
//! ```
//! use tractor_engine::{Engine, Phase, PlayerId, RuleConfig};
//!
//! let engine = Engine::new(RuleConfig::default());
//! let mut round = engine.start_deal(2024).unwrap();
//! assert_eq!(round.phase(), Phase::Bidding);
//!
//! for seat in 0..4 {
//!     round.submit_pass(PlayerId::new(seat)).unwrap();
//! }
//! assert_eq!(round.phase(), Phase::Redeal);
//! ```

pub mod core;
pub mod cards;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap, TeamId, PLAYER_COUNT,
    GameRng, GameRngState,
    RuleConfig, LevelPolicy, NoBidPolicy, OpeningLeader,
    Action, ActionRecord,
    BidError, DealError, EngineError, IllegalThrowError, KittyError, NoBidError, SnapshotError,
};

pub use crate::cards::{
    Card, CardVec, Suit, Rank, JokerSize,
    EffectiveSuit, TrumpContext, Hand, Deal,
    compare, strength, double_deck, deal_cards,
};

pub use crate::rules::{
    Combination, ComboKind, Unit, UnitShape,
    Trick, TrickResult, Play,
    Bid, BidKind, Bidding,
    Scoreboard, Side, RoundOutcome, TeamLevels, LevelTransition, Roles,
    validate, legal_moves, round_outcome, transition_levels, next_roles,
};

pub use crate::game::{
    Phase, Engine, Round, RoundSetup, RoundResult, ThrowOutcome, CompletedTrick,
    Match, MatchStatus, RoundRecord,
    encode_round, decode_round, encode_match, decode_match,
};
