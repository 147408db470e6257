//! Throw validation scenarios.
//!
//! These exercise the validator through the public rules API with hand
//! contents chosen to hit each rule.

mod common;

use common::cards;
use tractor_engine::cards::{Card, EffectiveSuit, Rank, Suit, TrumpContext};
use tractor_engine::core::{IllegalThrowError, RuleConfig, TeamId};
use tractor_engine::rules::{legal_moves, validate, ComboKind, Combination};

fn spades_trump() -> TrumpContext {
    TrumpContext::new(Some(Suit::Spades), Rank::Two, TeamId(0))
}

fn hearts_trump() -> TrumpContext {
    TrumpContext::new(Some(Suit::Hearts), Rank::Two, TeamId(0))
}

// =============================================================================
// Leading
// =============================================================================

/// Holding A, K, Q of one suit: leading A with Q hides the King.
#[test]
fn test_sandbag_ace_queen_rejected() {
    let ctx = hearts_trump();
    let hand = cards("AS KS QS 3D");
    let err = validate(&hand, &cards("AS QS"), None, &ctx, &RuleConfig::default()).unwrap_err();
    assert_eq!(
        err,
        IllegalThrowError::Sandbagging {
            held: "KS".parse().unwrap()
        }
    );

    let ok = validate(&hand, &cards("AS KS"), None, &ctx, &RuleConfig::default()).unwrap();
    assert_eq!(ok.kind(), ComboKind::Throw);
}

#[test]
fn test_single_lead_is_never_sandbagging() {
    let ctx = hearts_trump();
    let hand = cards("AS KS QS");
    assert!(validate(&hand, &cards("QS"), None, &ctx, &RuleConfig::default()).is_ok());
}

#[test]
fn test_lead_must_be_one_effective_suit() {
    let ctx = spades_trump();
    // 2H is trump under a 2 trump rank, so it joins the spades.
    let hand = cards("3S 2H AD");
    assert!(validate(&hand, &cards("3S 2H"), None, &ctx, &RuleConfig::default()).is_ok());
    assert_eq!(
        validate(&hand, &cards("3S AD"), None, &ctx, &RuleConfig::default()),
        Err(IllegalThrowError::MixedLead)
    );
}

#[test]
fn test_lead_cards_must_be_held_with_multiplicity() {
    let ctx = spades_trump();
    let hand = cards("AD KD");
    assert_eq!(
        validate(&hand, &cards("AD AD"), None, &ctx, &RuleConfig::default()),
        Err(IllegalThrowError::NotInHand("AD".parse().unwrap()))
    );
}

#[test]
fn test_tractor_lead_across_trump_rank_gap() {
    let ctx = spades_trump();
    let hand = cards("AS AS 2D 2D 2S 2S SJ");
    let combo = validate(&hand, &cards("AS AS 2D 2D 2S 2S"), None, &ctx, &RuleConfig::default()).unwrap();
    assert_eq!(combo.kind(), ComboKind::Tractor { pairs: 3 });
}

// =============================================================================
// Following
// =============================================================================

/// Void in the led suit: any cards of the right count are legal.
#[test]
fn test_void_follower_may_dump_anything() {
    let ctx = spades_trump();
    let led = Combination::classify(&cards("AH AH"), &ctx).unwrap();
    let hand = cards("3D 9C KS");
    for play in ["3D 9C", "3D KS", "9C KS"] {
        assert!(validate(&hand, &cards(play), Some(&led), &ctx, &RuleConfig::default()).is_ok());
    }
}

#[test]
fn test_partial_holdings_force_all_suit_cards() {
    let ctx = spades_trump();
    let led = Combination::classify(&cards("QH QH KH KH"), &ctx).unwrap();
    let hand = cards("3H 4H 9C 9C 6D");
    assert!(validate(&hand, &cards("3H 4H 9C 9C"), Some(&led), &ctx, &RuleConfig::default()).is_ok());
    assert_eq!(
        validate(&hand, &cards("3H 9C 9C 6D"), Some(&led), &ctx, &RuleConfig::default()),
        Err(IllegalThrowError::MustFollowSuit {
            suit: EffectiveSuit::Plain(Suit::Hearts),
            required: 2,
            played: 1
        })
    );
}

#[test]
fn test_trump_lead_counts_trump_rank_cards() {
    let ctx = spades_trump();
    let led = Combination::classify(&[Card::BIG_JOKER], &ctx).unwrap();
    // The only trump held is an off-suit 2.
    let hand = cards("2C AH KD");
    assert!(validate(&hand, &cards("2C"), Some(&led), &ctx, &RuleConfig::default()).is_ok());
    assert!(validate(&hand, &cards("AH"), Some(&led), &ctx, &RuleConfig::default()).is_err());
}

#[test]
fn test_strict_follow_requires_tractor() {
    let ctx = spades_trump();
    let config = RuleConfig::default().with_strict_follow();
    let led = Combination::classify(&cards("QH QH KH KH"), &ctx).unwrap();
    let hand = cards("3H 3H 4H 4H 9H 9H 6D");

    assert!(validate(&hand, &cards("3H 3H 4H 4H"), Some(&led), &ctx, &config).is_ok());
    assert!(matches!(
        validate(&hand, &cards("3H 3H 9H 9H"), Some(&led), &ctx, &config),
        Err(IllegalThrowError::MustFollowStructure { .. })
    ));
    // Without strict following any four hearts will do.
    assert!(validate(&hand, &cards("3H 3H 9H 9H"), Some(&led), &ctx, &RuleConfig::default()).is_ok());
}

// =============================================================================
// Legal moves
// =============================================================================

/// Every proposed move passes the validator.
#[test]
fn test_legal_moves_agree_with_validator() {
    let ctx = hearts_trump();
    let config = RuleConfig::default().with_strict_follow();
    let hand = cards("3S 3S 4S 4S 7S KS 2C 2C SJ AD");

    for led_cards in ["AS", "9S 9S", "QS QS JS JS", "BJ", "5D 6D"] {
        let led = Combination::classify(&cards(led_cards), &ctx).unwrap();
        if led.suit().is_none() {
            continue;
        }
        let moves = legal_moves(&hand, Some(&led), &ctx, &config);
        assert!(!moves.is_empty(), "no moves to follow {led_cards}");
        for m in moves {
            assert_eq!(m.len(), led.len());
            assert!(validate(&hand, m.cards(), Some(&led), &ctx, &config).is_ok());
        }
    }

    for m in legal_moves(&hand, None, &ctx, &config) {
        assert!(validate(&hand, m.cards(), None, &ctx, &config).is_ok());
    }
}
