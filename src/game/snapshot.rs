//! Binary checkpoints of rounds and matches.
//!
//! Everything in a round is plain data, so a snapshot is its bincode
//! encoding. Decoding yields a round that behaves identically to the one
//! encoded, including its action history.

use super::match_state::Match;
use super::round::Round;
use crate::core::SnapshotError;

pub fn encode_round(round: &Round) -> Result<Vec<u8>, SnapshotError> {
    bincode::serialize(round).map_err(SnapshotError::Encode)
}

pub fn decode_round(bytes: &[u8]) -> Result<Round, SnapshotError> {
    bincode::deserialize(bytes).map_err(SnapshotError::Decode)
}

/// Encode a match between rounds (or with a round out with a player).
pub fn encode_match(state: &Match) -> Result<Vec<u8>, SnapshotError> {
    bincode::serialize(state).map_err(SnapshotError::Encode)
}

pub fn decode_match(bytes: &[u8]) -> Result<Match, SnapshotError> {
    bincode::deserialize(bytes).map_err(SnapshotError::Decode)
}
