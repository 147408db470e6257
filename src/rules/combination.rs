//! Combination classification.
//!
//! A combination is always derived from its cards; there is no way to
//! construct one with a kind its cards do not support.
//!
//! ## Units
//!
//! Cards of one effective suit decompose into units:
//! - tractors: two or more pairs with consecutive, distinct strengths
//! - pairs: two identical card values
//! - singles: everything left over
//!
//! Decomposition is greedy: maximal tractor runs first, then the remaining
//! pairs, then singles. Trump-rank cards of different non-trump suits share a
//! strength but are different values, so they never pair with each other.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{total_points, Card, CardVec, EffectiveSuit, TrumpContext};

/// What a set of cards forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComboKind {
    Single,
    Pair,
    Tractor { pairs: u8 },
    /// Several units of one effective suit played together.
    Throw,
    /// Cards spanning effective suits. Only valid as a follow.
    Mixed,
}

/// The shape of one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitShape {
    Single,
    Pair,
    Tractor(u8),
}

impl UnitShape {
    #[must_use]
    pub const fn card_count(self) -> usize {
        match self {
            UnitShape::Single => 1,
            UnitShape::Pair => 2,
            UnitShape::Tractor(pairs) => pairs as usize * 2,
        }
    }

    /// Larger shapes sort first.
    fn order_key(self) -> (u8, u8) {
        match self {
            UnitShape::Tractor(pairs) => (2, pairs),
            UnitShape::Pair => (1, 1),
            UnitShape::Single => (0, 0),
        }
    }
}

/// One unit of a decomposition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unit {
    pub shape: UnitShape,
    /// Cards in ascending strength.
    pub cards: CardVec,
    /// The lowest card; decides comparisons between units of the same shape.
    pub defining: Card,
    /// Strength of the defining card.
    pub low: u8,
}

impl Unit {
    fn single(card: Card, ctx: &TrumpContext) -> Self {
        Self {
            shape: UnitShape::Single,
            cards: smallvec::smallvec![card],
            defining: card,
            low: ctx.strength(card),
        }
    }

    fn pair(card: Card, ctx: &TrumpContext) -> Self {
        Self {
            shape: UnitShape::Pair,
            cards: smallvec::smallvec![card, card],
            defining: card,
            low: ctx.strength(card),
        }
    }

    fn tractor(run: &[(u8, Card)]) -> Self {
        let mut cards = CardVec::new();
        for (_, card) in run {
            cards.push(*card);
            cards.push(*card);
        }
        Self {
            shape: UnitShape::Tractor(run.len() as u8),
            cards,
            defining: run[0].1,
            low: run[0].0,
        }
    }
}

/// Decompose cards into units, largest and strongest first.
///
/// Cards are grouped by effective suit; units never span suits.
#[must_use]
pub fn decompose(cards: &[Card], ctx: &TrumpContext) -> Vec<Unit> {
    let mut by_suit: FxHashMap<EffectiveSuit, Vec<Card>> = FxHashMap::default();
    for card in cards {
        by_suit.entry(ctx.effective_suit(*card)).or_default().push(*card);
    }
    let mut units: Vec<Unit> = by_suit
        .values()
        .flat_map(|suit_cards| decompose_suit(suit_cards, ctx))
        .collect();
    sort_units(&mut units, ctx);
    units
}

fn sort_units(units: &mut [Unit], ctx: &TrumpContext) {
    units.sort_by(|a, b| {
        b.shape
            .order_key()
            .cmp(&a.shape.order_key())
            .then_with(|| ctx.compare(b.defining, a.defining, None))
            .then_with(|| b.defining.cmp(&a.defining))
    });
}

/// Card values with their multiplicity, ascending by strength.
fn value_counts(cards: &[Card], ctx: &TrumpContext) -> Vec<(u8, Card, usize)> {
    let mut counts: FxHashMap<Card, usize> = FxHashMap::default();
    for card in cards {
        *counts.entry(*card).or_insert(0) += 1;
    }
    let mut values: Vec<(u8, Card, usize)> = counts
        .into_iter()
        .map(|(card, n)| (ctx.strength(card), card, n))
        .collect();
    values.sort();
    values
}

/// Maximal runs of consecutive strengths, taking one pair per strength.
///
/// `pairs` must be sorted by strength. Only runs of two or more are returned.
fn pair_runs(pairs: &[(u8, Card)]) -> Vec<Vec<(u8, Card)>> {
    let mut reps: Vec<(u8, Card)> = Vec::new();
    for pair in pairs {
        if reps.last().map_or(true, |(s, _)| *s != pair.0) {
            reps.push(*pair);
        }
    }
    let mut runs = Vec::new();
    let mut current: Vec<(u8, Card)> = Vec::new();
    for rep in reps {
        match current.last() {
            Some((s, _)) if *s + 1 == rep.0 => current.push(rep),
            _ => {
                if current.len() >= 2 {
                    runs.push(std::mem::take(&mut current));
                }
                current = vec![rep];
            }
        }
    }
    if current.len() >= 2 {
        runs.push(current);
    }
    runs
}

fn decompose_suit(cards: &[Card], ctx: &TrumpContext) -> Vec<Unit> {
    let mut pairs: Vec<(u8, Card)> = Vec::new();
    let mut units = Vec::new();
    for (strength, card, n) in value_counts(cards, ctx) {
        for _ in 0..n / 2 {
            pairs.push((strength, card));
        }
        for _ in 0..n % 2 {
            units.push(Unit::single(card, ctx));
        }
    }

    // Several pairs can share a strength (off-suit trump-rank cards), so keep
    // extracting runs until none remain.
    loop {
        let runs = pair_runs(&pairs);
        if runs.is_empty() {
            break;
        }
        for run in runs {
            for used in &run {
                if let Some(pos) = pairs.iter().position(|p| p == used) {
                    pairs.remove(pos);
                }
            }
            units.push(Unit::tractor(&run));
        }
    }
    units.extend(pairs.into_iter().map(|(_, card)| Unit::pair(card, ctx)));
    units
}

/// The strongest unit of `shape` that can be formed from `pool`.
///
/// `pool` must be a single effective suit. Returns the unit's defining
/// strength and its top card.
#[must_use]
pub fn strongest_unit(pool: &[Card], shape: UnitShape, ctx: &TrumpContext) -> Option<(u8, Card)> {
    let values = value_counts(pool, ctx);
    match shape {
        UnitShape::Single => values.last().map(|(s, c, _)| (*s, *c)),
        UnitShape::Pair => values
            .iter()
            .rev()
            .find(|(_, _, n)| *n >= 2)
            .map(|(s, c, _)| (*s, *c)),
        UnitShape::Tractor(len) => {
            let len = usize::from(len);
            let pairs: Vec<(u8, Card)> = values
                .iter()
                .filter(|(_, _, n)| *n >= 2)
                .map(|(s, c, _)| (*s, *c))
                .collect();
            pair_runs(&pairs)
                .into_iter()
                .filter(|run| run.len() >= len)
                .filter_map(|run| {
                    let top = *run.last()?;
                    Some((run[run.len() - len].0, top.1))
                })
                .max_by_key(|(low, _)| *low)
        }
    }
}

/// A validated set of cards with its derived kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    kind: ComboKind,
    suit: Option<EffectiveSuit>,
    cards: CardVec,
}

impl Combination {
    /// Classify `cards`. Returns `None` for an empty selection.
    ///
    /// ```
    /// use tractor_engine::cards::{Card, Rank, Suit, TrumpContext};
    /// use tractor_engine::core::TeamId;
    /// use tractor_engine::rules::{Combination, ComboKind};
    ///
    /// let ctx = TrumpContext::new(Some(Suit::Hearts), Rank::Two, TeamId(0));
    /// let cards = Card::parse_list("5S 5S 6S 6S").unwrap();
    /// let combo = Combination::classify(&cards, &ctx).unwrap();
    /// assert_eq!(combo.kind(), ComboKind::Tractor { pairs: 2 });
    /// ```
    #[must_use]
    pub fn classify(cards: &[Card], ctx: &TrumpContext) -> Option<Self> {
        let first = *cards.first()?;
        let suit = ctx.effective_suit(first);
        let single_suit = cards.iter().all(|c| ctx.effective_suit(*c) == suit);
        let kind = if !single_suit {
            ComboKind::Mixed
        } else if cards.len() == 1 {
            ComboKind::Single
        } else {
            let units = decompose(cards, ctx);
            match units.as_slice() {
                [unit] => match unit.shape {
                    UnitShape::Pair => ComboKind::Pair,
                    UnitShape::Tractor(pairs) => ComboKind::Tractor { pairs },
                    UnitShape::Single => ComboKind::Single,
                },
                _ => ComboKind::Throw,
            }
        };
        Some(Self {
            kind,
            suit: single_suit.then_some(suit),
            cards: CardVec::from_slice(cards),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ComboKind {
        self.kind
    }

    /// The effective suit, or `None` for a mixed follow.
    #[must_use]
    pub fn suit(&self) -> Option<EffectiveSuit> {
        self.suit
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

    #[must_use]
    pub fn points(&self) -> u32 {
        total_points(&self.cards)
    }

    #[must_use]
    pub fn units(&self, ctx: &TrumpContext) -> Vec<Unit> {
        decompose(&self.cards, ctx)
    }

    /// Unit shapes, largest first. Two combinations can contest a trick
    /// only when their shapes match.
    #[must_use]
    pub fn shape(&self, ctx: &TrumpContext) -> SmallVec<[UnitShape; 4]> {
        self.units(ctx).into_iter().map(|u| u.shape).collect()
    }

    /// Lowest card of the top unit.
    #[must_use]
    pub fn defining_card(&self, ctx: &TrumpContext) -> Option<Card> {
        self.units(ctx).first().map(|unit| unit.defining)
    }
}
