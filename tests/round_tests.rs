//! End-to-end round tests driven through the public `Round` API.

mod common;

use common::{deal_with, p, play_out};
use tractor_engine::cards::{card_values, total_points, Card, Suit};
use tractor_engine::core::{Action, BidError, IllegalThrowError, KittyError, RuleConfig};
use tractor_engine::game::{decode_round, encode_round, Engine, Phase, Round, RoundSetup};
use tractor_engine::rules::BidKind;

/// P2 bids a pair of hearts, P3 overcalls with both big jokers.
fn bid_to_exchange(seed: u64) -> Round {
    let deal = deal_with(seed, &[(2, "2H 2H"), (3, "BJ BJ")]);
    let mut round = Engine::default().start_round(deal, RoundSetup::opening()).unwrap();

    round.submit_pass(p(0)).unwrap();
    round.submit_pass(p(1)).unwrap();
    round.submit_bid(p(2), BidKind::Pair, Some(Suit::Hearts)).unwrap();
    round.submit_bid(p(3), BidKind::DoubleJoker, None).unwrap();
    round
}

#[test]
fn test_double_joker_closes_bidding() {
    let round = bid_to_exchange(21);

    assert!(round.bidding().is_closed());
    assert_eq!(round.phase(), Phase::KittyExchange);
    assert_eq!(round.declarer(), Some(p(3)));
    let ctx = round.trump_context().unwrap();
    assert_eq!(ctx.trump_suit, None);
    assert_eq!(ctx.declaring_team, p(3).team());

    // The kitty is now in the declarer's hand.
    assert!(round.kitty().is_empty());
    assert_eq!(round.hand(p(3)).len(), 33);
    assert_eq!(round.hand(p(0)).len(), 25);
    assert_eq!(round.card_count(), 108);
    assert_eq!(round.next_to_act(), Some(p(3)));
}

#[test]
fn test_bids_are_checked_against_the_hand() {
    let deal = deal_with(22, &[(2, "2H 2H"), (3, "BJ BJ")]);
    let mut round = Engine::default().start_round(deal, RoundSetup::opening()).unwrap();
    round.submit_pass(p(0)).unwrap();

    // P1 has not acted yet.
    assert!(matches!(
        round.submit_bid(p(2), BidKind::Pair, Some(Suit::Hearts)),
        Err(BidError::OutOfTurn { .. })
    ));
    round.submit_pass(p(1)).unwrap();
    assert_eq!(
        round.submit_bid(p(2), BidKind::DoubleJoker, Some(Suit::Hearts)),
        Err(BidError::UnexpectedSuit)
    );
    round.submit_bid(p(2), BidKind::Pair, Some(Suit::Hearts)).unwrap();
    // Nothing P3 could hold raises a pair except the jokers.
    assert!(round.submit_bid(p(3), BidKind::Single, Some(Suit::Hearts)).is_err());
    assert_eq!(round.history().len(), 3);
}

#[test]
fn test_kitty_rejections_leave_hand_unchanged() {
    let mut round = bid_to_exchange(23);
    let before = round.hand(p(3)).to_vec();

    let seven = before[..7].to_vec();
    assert_eq!(
        round.submit_kitty_discard(&seven),
        Err(KittyError::WrongCount {
            expected: 8,
            actual: 7
        })
    );

    let absent = card_values()
        .find(|c| !before.contains(c))
        .expect("33 cards cannot cover all 54 values");
    let mut bad = seven.clone();
    bad.push(absent);
    assert_eq!(round.submit_kitty_discard(&bad), Err(KittyError::NotInHand(absent)));

    assert_eq!(round.hand(p(3)), before.as_slice());
    assert_eq!(round.phase(), Phase::KittyExchange);
}

#[test]
fn test_kitty_discard_opens_trick_loop() {
    let mut round = bid_to_exchange(24);
    let discard: Vec<Card> = round.hand(p(3))[25..].to_vec();
    let buried_points = total_points(&discard);

    round.apply(p(3), Action::discard(&discard)).unwrap();

    assert_eq!(round.phase(), Phase::TrickLoop);
    assert_eq!(round.hand(p(3)).len(), 25);
    assert_eq!(round.buried(), discard.as_slice());
    assert_eq!(total_points(round.buried()), buried_points);
    // The declarer's partner leads.
    assert_eq!(round.current_trick().unwrap().leader(), p(1));
    assert_eq!(round.next_to_act(), Some(p(1)));
}

#[test]
fn test_throws_are_turn_checked() {
    let mut round = bid_to_exchange(25);
    let discard: Vec<Card> = round.hand(p(3))[..8].to_vec();
    round.submit_kitty_discard(&discard).unwrap();

    let card = round.hand(p(0))[0];
    assert_eq!(
        round.submit_throw(p(0), &[card]),
        Err(IllegalThrowError::OutOfTurn {
            expected: p(1),
            actual: p(0)
        })
    );

    let lead = round.hand(p(1))[0];
    let outcome = round.submit_throw(p(1), &[lead]).unwrap();
    assert!(outcome.trick.is_none());
    assert!(!outcome.round_over);
    assert_eq!(round.next_to_act(), Some(p(2)));
    assert_eq!(round.hand(p(1)).len(), 24);
}

#[test]
fn test_full_round_reaches_finished() {
    let deal = deal_with(26, &[(0, "2H")]);
    let mut round = Engine::default().start_round(deal, RoundSetup::opening()).unwrap();
    play_out(&mut round);

    assert_eq!(round.phase(), Phase::Finished);
    assert_eq!(
        round.phase_trail(),
        &[
            Phase::Dealing,
            Phase::Bidding,
            Phase::KittyExchange,
            Phase::TrickLoop,
            Phase::Scoring,
            Phase::RoleTransition,
            Phase::Finished,
        ]
    );
    // First legal lead is always a single, so every trick takes four cards.
    assert_eq!(round.completed_tricks().len(), 25);
    for seat in 0..4 {
        assert!(round.hand(p(seat)).is_empty());
    }

    let board = round.scoreboard();
    let buried = total_points(round.buried());
    let multiplier = round.config().kitty_multiplier;
    assert_eq!(board.attacker_points + board.defender_points, 200 - buried + buried * multiplier);
    let (_, bonus) = board.kitty_bonus.unwrap();
    assert_eq!(bonus, buried * multiplier);

    for (i, record) in round.history().iter().enumerate() {
        assert_eq!(record.sequence as usize, i);
    }

    let result = round.result().unwrap();
    assert_eq!(result.outcome.attacker_points, board.attacker_points);
    assert_eq!(result.roles.declarer, round.declarer().unwrap());
    assert_eq!(round.next_to_act(), None);
}

#[test]
fn test_round_snapshot_resumes_identically() {
    let mut round = bid_to_exchange(27);
    let discard: Vec<Card> = round.hand(p(3))[..8].to_vec();
    round.submit_kitty_discard(&discard).unwrap();

    let bytes = encode_round(&round).unwrap();
    let mut restored = decode_round(&bytes).unwrap();
    assert_eq!(restored, round);

    play_out(&mut round);
    play_out(&mut restored);
    assert_eq!(restored.result(), round.result());
    assert_eq!(restored.history(), round.history());
}

#[test]
fn test_strict_follow_round_completes() {
    let engine = Engine::new(RuleConfig::default().with_strict_follow());
    let deal = deal_with(28, &[(1, "2S 2S")]);
    let mut round = engine.start_round(deal, RoundSetup::opening()).unwrap();
    play_out(&mut round);
    assert_eq!(round.phase(), Phase::Finished);
}
