//! Kitty exchange rules.
//!
//! The declarer picks up the kitty and buries the same number of cards.
//! Buried cards stay out of play until the last trick, when their points
//! go to the side that takes it, multiplied.

use crate::cards::{total_points, Card, Hand};
use crate::core::KittyError;

/// Check a discard against the declarer's hand (kitty already picked up).
pub fn check_discard(hand: &Hand, cards: &[Card], kitty_size: usize) -> Result<(), KittyError> {
    if cards.len() != kitty_size {
        return Err(KittyError::WrongCount {
            expected: kitty_size,
            actual: cards.len(),
        });
    }
    match hand.missing_from(cards) {
        Some(card) => Err(KittyError::NotInHand(card)),
        None => Ok(()),
    }
}

/// Points awarded for the buried kitty.
#[must_use]
pub fn kitty_bonus(buried: &[Card], multiplier: u32) -> u32 {
    total_points(buried) * multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        Card::parse_list(s).unwrap()
    }

    #[test]
    fn test_check_discard() {
        let hand = Hand::new(cards("AS KS QS JS 10S 9S 8S 7S 6S 5S"));
        assert!(check_discard(&hand, &cards("KS QS JS 10S 9S 8S 7S 6S"), 8).is_ok());
        assert_eq!(
            check_discard(&hand, &cards("KS QS"), 8),
            Err(KittyError::WrongCount {
                expected: 8,
                actual: 2
            })
        );
        assert_eq!(
            check_discard(&hand, &cards("KS KS JS 10S 9S 8S 7S 6S"), 8),
            Err(KittyError::NotInHand("KS".parse().unwrap()))
        );
    }

    #[test]
    fn test_kitty_bonus() {
        assert_eq!(kitty_bonus(&cards("KS 10H 5D 3C"), 2), 50);
        assert_eq!(kitty_bonus(&cards("KS 10H 5D 3C"), 1), 25);
        assert_eq!(kitty_bonus(&[], 2), 0);
    }
}
