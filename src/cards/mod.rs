//! Card model: values, trump-dependent ranking, hands, and the double deck.

pub mod card;
pub mod trump;
pub mod hand;
pub mod deck;

pub use card::{total_points, Card, CardVec, JokerSize, ParseCardError, Rank, Suit};
pub use trump::{compare, strength, EffectiveSuit, TrumpContext, OFF_SUIT_TRUMP_RANK};
pub use hand::Hand;
pub use deck::{card_values, check_composition, deal_cards, double_deck, Deal, DECK_SIZE, HAND_SIZE, KITTY_SIZE};
