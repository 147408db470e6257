//! Shared helpers for integration tests.

#![allow(dead_code)]

use tractor_engine::cards::{Card, Deal};
use tractor_engine::core::PlayerId;
use tractor_engine::game::{Phase, Round};
use tractor_engine::rules::BidKind;
use tractor_engine::Suit;

pub fn cards(s: &str) -> Vec<Card> {
    Card::parse_list(s).unwrap()
}

pub fn p(n: u8) -> PlayerId {
    PlayerId::new(n)
}

/// A seeded deal rearranged so each listed seat holds the listed cards.
///
/// Seat 4 stands for the kitty. Cards are swapped in from wherever they
/// were dealt, so the result is still a valid double deck.
pub fn deal_with(seed: u64, wants: &[(usize, &str)]) -> Deal {
    let deal = Deal::shuffled(seed, 8).unwrap();
    let mut piles: Vec<Vec<Card>> = deal.hands.values().cloned().collect();
    piles.push(deal.kitty.clone());
    let mut locked: Vec<Vec<bool>> = piles.iter().map(|pile| vec![false; pile.len()]).collect();

    for (seat, list) in wants {
        let s = *seat;
        for card in cards(list) {
            if let Some(i) = (0..piles[s].len()).find(|&i| !locked[s][i] && piles[s][i] == card) {
                locked[s][i] = true;
                continue;
            }
            let (from, at) = (0..piles.len())
                .filter(|&other| other != s)
                .flat_map(|other| (0..piles[other].len()).map(move |i| (other, i)))
                .find(|&(other, i)| !locked[other][i] && piles[other][i] == card)
                .expect("requested card is available");
            let target = (0..piles[s].len())
                .find(|&i| !locked[s][i])
                .expect("seat has room for requested cards");
            let displaced = piles[s][target];
            piles[s][target] = piles[from][at];
            piles[from][at] = displaced;
            locked[s][target] = true;
        }
    }

    let kitty = piles.pop().unwrap();
    Deal::from_parts(piles, kitty).unwrap()
}

/// Bid the strongest thing the seat can back, else pass.
pub fn auto_bid(round: &mut Round, player: PlayerId) {
    for kind in [BidKind::DoubleJoker, BidKind::Pair, BidKind::Single] {
        let suits: Vec<Option<Suit>> = if kind == BidKind::DoubleJoker {
            vec![None]
        } else {
            Suit::ALL.into_iter().map(Some).collect()
        };
        for suit in suits {
            if round.submit_bid(player, kind, suit).is_ok() {
                return;
            }
        }
    }
    round.submit_pass(player).unwrap();
}

/// Drive a round to `Finished` or `Redeal`, always taking the first
/// legal move. Checks card conservation after every action.
pub fn play_out(round: &mut Round) {
    while let Some(player) = round.next_to_act() {
        match round.phase() {
            Phase::Bidding => auto_bid(round, player),
            Phase::KittyExchange => {
                let discard: Vec<Card> = round.hand(player)[..round.config().kitty_size].to_vec();
                round.submit_kitty_discard(&discard).unwrap();
            }
            Phase::TrickLoop => {
                let moves = round.legal_moves(player);
                let first = moves.first().expect("a legal move always exists");
                round.submit_throw(player, first.cards()).unwrap();
            }
            other => panic!("unexpected phase {other:?} with a seat to act"),
        }
        assert_eq!(round.card_count(), 108);
    }
}
