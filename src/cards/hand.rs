//! A player's hand as a multiset of card values.
//!
//! Hands change only through the deal, the kitty exchange and accepted
//! plays. Removal is all-or-nothing: `remove_all` checks the whole request
//! before touching the hand.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::trump::{EffectiveSuit, TrumpContext};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Copies of `card` held.
    #[must_use]
    pub fn count(&self, card: Card) -> usize {
        self.cards.iter().filter(|c| **c == card).count()
    }

    /// The first card of `cards` the hand cannot cover, counting multiplicity.
    #[must_use]
    pub fn missing_from(&self, cards: &[Card]) -> Option<Card> {
        missing_from(&self.cards, cards)
    }

    #[must_use]
    pub fn contains_all(&self, cards: &[Card]) -> bool {
        self.missing_from(cards).is_none()
    }

    /// Cards of one effective suit.
    #[must_use]
    pub fn in_suit(&self, suit: EffectiveSuit, ctx: &TrumpContext) -> Vec<Card> {
        self.cards
            .iter()
            .copied()
            .filter(|c| ctx.effective_suit(*c) == suit)
            .collect()
    }

    /// Remove `cards` from the hand.
    ///
    /// Keeps the order of the remaining cards. On failure the uncovered
    /// card is returned and the hand is untouched.
    pub fn remove_all(&mut self, cards: &[Card]) -> Result<(), Card> {
        if let Some(missing) = self.missing_from(cards) {
            return Err(missing);
        }
        for card in cards {
            if let Some(pos) = self.cards.iter().position(|c| c == card) {
                self.cards.remove(pos);
            }
        }
        Ok(())
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    pub fn sort(&mut self, ctx: &TrumpContext) {
        ctx.sort_hand(&mut self.cards);
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self::new(cards)
    }
}

/// Multiset containment over plain slices.
pub(crate) fn missing_from(pool: &[Card], cards: &[Card]) -> Option<Card> {
    let mut available: FxHashMap<Card, usize> = FxHashMap::default();
    for card in pool {
        *available.entry(*card).or_insert(0) += 1;
    }
    for card in cards {
        match available.get_mut(card) {
            Some(n) if *n > 0 => *n -= 1,
            _ => return Some(*card),
        }
    }
    None
}

/// `pool` minus `cards`, counting multiplicity. Cards not in the pool are ignored.
pub(crate) fn subtract(pool: &[Card], cards: &[Card]) -> Vec<Card> {
    let mut rest = pool.to_vec();
    for card in cards {
        if let Some(pos) = rest.iter().position(|c| c == card) {
            rest.swap_remove(pos);
        }
    }
    rest
}
