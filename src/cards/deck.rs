//! Double deck construction and dealing.
//!
//! The deck is built in a fixed order and shuffled with the seedable
//! `GameRng`, so a seed fully determines a deal.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, JokerSize, Rank, Suit};
use crate::core::{DealError, GameRng, PlayerId, PlayerMap, PLAYER_COUNT};

/// Cards in the double deck: 2 × (52 + 2 jokers).
pub const DECK_SIZE: usize = 108;

/// Default kitty size.
pub const KITTY_SIZE: usize = 8;

/// Cards dealt to each seat with the default kitty.
pub const HAND_SIZE: usize = (DECK_SIZE - KITTY_SIZE) / PLAYER_COUNT;

/// The 54 distinct card values, in deck order.
pub fn card_values() -> impl Iterator<Item = Card> {
    Suit::ALL
        .into_iter()
        .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::suited(suit, rank)))
        .chain([Card::Joker(JokerSize::Small), Card::Joker(JokerSize::Big)])
}

/// Build the unshuffled 108-card double deck.
#[must_use]
pub fn double_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for _ in 0..2 {
        deck.extend(card_values());
    }
    deck
}

/// Check that `cards` is exactly one double deck.
pub fn check_composition<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Result<(), DealError> {
    let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
    let mut total = 0;
    for card in cards {
        *counts.entry(*card).or_insert(0) += 1;
        total += 1;
    }
    if total != DECK_SIZE {
        return Err(DealError::DeckSize {
            expected: DECK_SIZE,
            actual: total,
        });
    }
    for card in card_values() {
        let count = counts.get(&card).copied().unwrap_or(0);
        if count != 2 {
            return Err(DealError::Composition { card, count });
        }
    }
    Ok(())
}

/// Hands and kitty for one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub hands: PlayerMap<Vec<Card>>,
    pub kitty: Vec<Card>,
}

impl Deal {
    /// Shuffle a fresh double deck with `seed` and deal it.
    pub fn shuffled(seed: u64, kitty_size: usize) -> Result<Self, DealError> {
        let mut deck = double_deck();
        GameRng::new(seed).shuffle(&mut deck);
        deal_cards(deck, PLAYER_COUNT, kitty_size)
    }

    /// Build a deal from explicit hands and kitty (replays, tests).
    pub fn from_parts(hands: Vec<Vec<Card>>, kitty: Vec<Card>) -> Result<Self, DealError> {
        if hands.len() != PLAYER_COUNT {
            return Err(DealError::PlayerCount(hands.len()));
        }
        check_composition(hands.iter().flatten().chain(kitty.iter()))?;
        let hand_size = (DECK_SIZE - kitty.len()) / PLAYER_COUNT;
        if hand_size * PLAYER_COUNT + kitty.len() != DECK_SIZE {
            return Err(DealError::KittySize {
                expected: KITTY_SIZE,
                actual: kitty.len(),
            });
        }
        for (seat, hand) in hands.iter().enumerate() {
            if hand.len() != hand_size {
                return Err(DealError::HandSize {
                    player: PlayerId::new(seat as u8),
                    expected: hand_size,
                    actual: hand.len(),
                });
            }
        }
        let hands = PlayerMap::from_vec(hands).ok_or(DealError::PlayerCount(PLAYER_COUNT))?;
        Ok(Self { hands, kitty })
    }

    /// Total cards held across hands and kitty.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.hands.values().map(Vec::len).sum::<usize>() + self.kitty.len()
    }
}

/// Deal `deck` round-robin to `player_count` seats, keeping the last
/// `kitty_size` cards back as the kitty.
pub fn deal_cards(deck: Vec<Card>, player_count: usize, kitty_size: usize) -> Result<Deal, DealError> {
    if player_count != PLAYER_COUNT {
        return Err(DealError::PlayerCount(player_count));
    }
    check_composition(deck.iter())?;
    if kitty_size >= DECK_SIZE || (DECK_SIZE - kitty_size) % PLAYER_COUNT != 0 {
        return Err(DealError::KittySize {
            expected: KITTY_SIZE,
            actual: kitty_size,
        });
    }

    let dealt = DECK_SIZE - kitty_size;
    let mut hands: PlayerMap<Vec<Card>> =
        PlayerMap::new(|_| Vec::with_capacity(dealt / PLAYER_COUNT + kitty_size));
    for (i, card) in deck[..dealt].iter().enumerate() {
        hands[PlayerId::new((i % PLAYER_COUNT) as u8)].push(*card);
    }
    let kitty = deck[dealt..].to_vec();

    Ok(Deal { hands, kitty })
}
