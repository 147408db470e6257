//! Seats, partnerships, and per-seat data storage.
//!
//! ## PlayerId
//!
//! Seat index 0-3. Seats are arranged clockwise; partners sit opposite each
//! other, so seats 0 & 2 form team 0 and seats 1 & 3 form team 1.
//!
//! ## PlayerMap
//!
//! Per-seat data backed by a `Vec` for O(1) access, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of seats at a Sheng Ji table.
pub const PLAYER_COUNT: usize = 4;

/// Seat identifier (0-based, clockwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The next seat clockwise.
    #[must_use]
    pub const fn next(self) -> Self {
        Self((self.0 + 1) % PLAYER_COUNT as u8)
    }

    /// The seat opposite (partner).
    #[must_use]
    pub const fn partner(self) -> Self {
        Self((self.0 + 2) % PLAYER_COUNT as u8)
    }

    /// The partnership this seat belongs to.
    #[must_use]
    pub const fn team(self) -> TeamId {
        TeamId(self.0 % 2)
    }

    /// Iterate over all seats, starting at seat 0.
    ///
    /// ```
    /// use tractor_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(PlayerId)
    }

    /// Iterate over all seats clockwise, starting from `self`.
    pub fn clockwise(self) -> impl Iterator<Item = PlayerId> {
        (0..PLAYER_COUNT as u8).map(move |offset| PlayerId((self.0 + offset) % PLAYER_COUNT as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Partnership identifier: team 0 (seats 0 & 2) or team 1 (seats 1 & 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id % 2)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other partnership.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both seats of this partnership, lower seat first.
    #[must_use]
    pub const fn members(self) -> [PlayerId; 2] {
        [PlayerId(self.0), PlayerId(self.0 + 2)]
    }

    /// Both teams.
    pub fn both() -> impl Iterator<Item = TeamId> {
        [TeamId(0), TeamId(1)].into_iter()
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use tractor_engine::core::{PlayerId, PlayerMap};
///
/// let mut tricks: PlayerMap<u32> = PlayerMap::with_value(0);
/// tricks[PlayerId::new(1)] += 1;
/// assert_eq!(tricks[PlayerId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: PlayerId::all().map(factory).collect(),
        }
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Build a map from exactly one value per seat.
    ///
    /// Returns `None` when `values` does not hold one entry per seat.
    pub fn from_vec(values: Vec<T>) -> Option<Self> {
        (values.len() == PLAYER_COUNT).then_some(Self { data: values })
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Like `get`, but `None` for a seat outside the table.
    #[must_use]
    pub fn try_get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Seats with their values, seat 0 first.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
