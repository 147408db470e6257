//! Throw validation and legal-move enumeration.
//!
//! `validate` is the single source of truth for whether a play is legal.
//! `legal_moves` only proposes candidates and keeps those `validate` accepts,
//! so the two can never disagree.
//!
//! ## Leading
//!
//! A lead must be non-empty, held, and of one effective suit. A multi-card
//! lead is rejected as sandbagging when, for any of its units, the player's
//! remaining holdings in that suit could form a strictly stronger unit of
//! the same shape.
//!
//! ## Following
//!
//! A follow plays exactly as many cards as the lead and includes as many
//! cards of the led suit as the player holds, up to that count. With
//! `RuleConfig::strict_follow` it must also reproduce the led pairs and
//! tractors as far as the player's holdings in the led suit allow.

use rustc_hash::FxHashMap;

use super::combination::{decompose, strongest_unit, Combination, UnitShape};
use crate::cards::hand::{missing_from, subtract};
use crate::cards::{Card, EffectiveSuit, TrumpContext};
use crate::core::{IllegalThrowError, RuleConfig};

/// Validate a lead.
pub fn validate_lead(
    hand: &[Card],
    cards: &[Card],
    ctx: &TrumpContext,
) -> Result<Combination, IllegalThrowError> {
    let combo = held_combination(hand, cards, ctx)?;
    let Some(suit) = combo.suit() else {
        return Err(IllegalThrowError::MixedLead);
    };
    if combo.len() > 1 {
        check_sandbagging(hand, &combo, suit, ctx)?;
    }
    Ok(combo)
}

/// Validate a follow to `led`.
pub fn validate_follow(
    hand: &[Card],
    cards: &[Card],
    led: &Combination,
    ctx: &TrumpContext,
    config: &RuleConfig,
) -> Result<Combination, IllegalThrowError> {
    if cards.len() != led.len() {
        return Err(IllegalThrowError::WrongCount {
            expected: led.len(),
            actual: cards.len(),
        });
    }
    let combo = held_combination(hand, cards, ctx)?;
    let Some(led_suit) = led.suit() else {
        return Err(IllegalThrowError::MixedLead);
    };

    let holdings: Vec<Card> = in_suit(hand, led_suit, ctx);
    let played: Vec<Card> = in_suit(cards, led_suit, ctx);
    let required = holdings.len().min(led.len());
    if played.len() < required {
        return Err(IllegalThrowError::MustFollowSuit {
            suit: led_suit,
            required,
            played: played.len(),
        });
    }

    if config.strict_follow {
        check_structure(&holdings, &played, led, led_suit, ctx)?;
    }
    Ok(combo)
}

/// Validate a lead (`led` is `None`) or a follow.
pub fn validate(
    hand: &[Card],
    cards: &[Card],
    led: Option<&Combination>,
    ctx: &TrumpContext,
    config: &RuleConfig,
) -> Result<Combination, IllegalThrowError> {
    match led {
        None => validate_lead(hand, cards, ctx),
        Some(led) => validate_follow(hand, cards, led, ctx, config),
    }
}

fn held_combination(
    hand: &[Card],
    cards: &[Card],
    ctx: &TrumpContext,
) -> Result<Combination, IllegalThrowError> {
    if let Some(card) = missing_from(hand, cards) {
        return Err(IllegalThrowError::NotInHand(card));
    }
    Combination::classify(cards, ctx).ok_or(IllegalThrowError::Empty)
}

fn in_suit(cards: &[Card], suit: EffectiveSuit, ctx: &TrumpContext) -> Vec<Card> {
    cards
        .iter()
        .copied()
        .filter(|c| ctx.effective_suit(*c) == suit)
        .collect()
}

fn check_sandbagging(
    hand: &[Card],
    combo: &Combination,
    suit: EffectiveSuit,
    ctx: &TrumpContext,
) -> Result<(), IllegalThrowError> {
    let holdings = in_suit(hand, suit, ctx);
    let units = combo.units(ctx);
    for (i, unit) in units.iter().enumerate() {
        let others: Vec<Card> = units
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .flat_map(|(_, u)| u.cards.iter().copied())
            .collect();
        let pool = subtract(&holdings, &others);
        if let Some((best, held)) = strongest_unit(&pool, unit.shape, ctx) {
            if best > unit.low {
                return Err(IllegalThrowError::Sandbagging { held });
            }
        }
    }
    Ok(())
}

/// Pairs and tractor pairs in a set of cards of one suit.
fn pair_structure(cards: &[Card], ctx: &TrumpContext) -> (usize, usize, usize) {
    let mut tractor_pairs = 0;
    let mut longest = 0;
    let mut pairs = 0;
    for unit in decompose(cards, ctx) {
        match unit.shape {
            UnitShape::Tractor(n) => {
                tractor_pairs += usize::from(n);
                longest = longest.max(usize::from(n));
            }
            UnitShape::Pair => pairs += 1,
            UnitShape::Single => {}
        }
    }
    (tractor_pairs, longest, pairs)
}

fn check_structure(
    holdings: &[Card],
    played: &[Card],
    led: &Combination,
    suit: EffectiveSuit,
    ctx: &TrumpContext,
) -> Result<(), IllegalThrowError> {
    let (led_tractor_pairs, led_longest, led_pairs) = pair_structure(led.cards(), ctx);
    let (held_tractor_pairs, held_longest, held_pairs) = pair_structure(holdings, ctx);
    let (played_tractor_pairs, played_longest, played_pairs) = pair_structure(played, ctx);

    let required_pairs = (held_tractor_pairs + held_pairs).min(led_tractor_pairs + led_pairs);
    let played_total = played_tractor_pairs + played_pairs;
    if played_total < required_pairs {
        return Err(IllegalThrowError::MustFollowStructure {
            suit,
            required: required_pairs * 2,
            played: played_total * 2,
        });
    }

    // A led tractor must be answered with a tractor when one is held.
    let required_run = held_longest.min(led_longest);
    if required_run >= 2 && played_longest < required_run {
        return Err(IllegalThrowError::MustFollowStructure {
            suit,
            required: required_run * 2,
            played: played_longest * 2,
        });
    }
    Ok(())
}

/// Enumerate legal plays for `hand`, leading when `led` is `None`.
///
/// Leads cover every single, pair and tractor the hand can form; multi-unit
/// throws are legal but not proposed. Follows enumerate distinct card
/// multisets. At most `config.legal_move_cap` moves are returned.
#[must_use]
pub fn legal_moves(
    hand: &[Card],
    led: Option<&Combination>,
    ctx: &TrumpContext,
    config: &RuleConfig,
) -> Vec<Combination> {
    let cap = config.legal_move_cap;
    let mut moves = Vec::new();
    match led {
        None => {
            for candidate in lead_candidates(hand, ctx) {
                if moves.len() >= cap {
                    break;
                }
                if let Ok(combo) = validate_lead(hand, &candidate, ctx) {
                    moves.push(combo);
                }
            }
        }
        Some(led) => {
            let Some(suit) = led.suit() else {
                return moves;
            };
            let in_led: Vec<Card> = in_suit(hand, suit, ctx);
            let rest = subtract(hand, &in_led);
            let n = led.len();
            let mut candidates = Vec::new();
            // Bound the search so strict-follow rejections cannot run away.
            let budget = cap.saturating_mul(8).max(1);
            if in_led.len() >= n {
                multisets(&grouped(&in_led, ctx), n, &mut Vec::new(), &mut candidates, budget);
            } else {
                let mut pads = Vec::new();
                multisets(&grouped(&rest, ctx), n - in_led.len(), &mut Vec::new(), &mut pads, budget);
                for pad in pads {
                    let mut candidate = in_led.clone();
                    candidate.extend(pad);
                    candidates.push(candidate);
                }
            }
            for candidate in candidates {
                if moves.len() >= cap {
                    break;
                }
                if let Ok(combo) = validate_follow(hand, &candidate, led, ctx, config) {
                    moves.push(combo);
                }
            }
        }
    }
    moves
}

fn lead_candidates(hand: &[Card], ctx: &TrumpContext) -> Vec<Vec<Card>> {
    let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
    for card in hand {
        *counts.entry(*card).or_insert(0) += 1;
    }
    let mut values: Vec<(Card, usize)> = counts.into_iter().collect();
    values.sort_by(|a, b| ctx.sort_key(b.0).cmp(&ctx.sort_key(a.0)).then(a.0.cmp(&b.0)));

    let mut candidates: Vec<Vec<Card>> = values.iter().map(|(c, _)| vec![*c]).collect();
    candidates.extend(
        values
            .iter()
            .filter(|(_, n)| *n >= 2)
            .map(|(c, _)| vec![*c, *c]),
    );

    // Every window of every tractor the hand holds.
    let mut by_suit: FxHashMap<EffectiveSuit, Vec<(u8, Card)>> = FxHashMap::default();
    for (card, n) in &values {
        if *n >= 2 {
            by_suit
                .entry(ctx.effective_suit(*card))
                .or_default()
                .push((ctx.strength(*card), *card));
        }
    }
    let mut suits: Vec<_> = by_suit.into_iter().collect();
    suits.sort_by_key(|(suit, _)| *suit == EffectiveSuit::Trump);
    for (_, mut pairs) in suits {
        pairs.sort();
        pairs.dedup_by_key(|(s, _)| *s);
        let mut start = 0;
        while start < pairs.len() {
            let mut end = start;
            while end + 1 < pairs.len() && pairs[end + 1].0 == pairs[end].0 + 1 {
                end += 1;
            }
            for lo in start..=end {
                for hi in lo + 1..=end {
                    candidates.push(
                        pairs[lo..=hi]
                            .iter()
                            .flat_map(|(_, c)| [*c, *c])
                            .collect(),
                    );
                }
            }
            start = end + 1;
        }
    }
    candidates
}

/// Distinct values with multiplicity. Paired values come first so the
/// earliest candidates keep pairs together.
fn grouped(cards: &[Card], ctx: &TrumpContext) -> Vec<(Card, usize)> {
    let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
    for card in cards {
        *counts.entry(*card).or_insert(0) += 1;
    }
    let mut values: Vec<(Card, usize)> = counts.into_iter().collect();
    values.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then(ctx.sort_key(b.0).cmp(&ctx.sort_key(a.0)))
            .then(a.0.cmp(&b.0))
    });
    values
}

/// All multisets of size `k` drawn from `values`, taking larger counts first.
fn multisets(
    values: &[(Card, usize)],
    k: usize,
    current: &mut Vec<Card>,
    out: &mut Vec<Vec<Card>>,
    budget: usize,
) {
    if out.len() >= budget {
        return;
    }
    if k == 0 {
        out.push(current.clone());
        return;
    }
    let Some(((card, count), rest)) = values.split_first() else {
        return;
    };
    let available: usize = rest.iter().map(|(_, n)| n).sum();
    let max_take = (*count).min(k);
    let min_take = k.saturating_sub(available);
    for take in (min_take..=max_take).rev() {
        current.extend(std::iter::repeat(*card).take(take));
        multisets(rest, k - take, current, out, budget);
        current.truncate(current.len() - take);
    }
}
