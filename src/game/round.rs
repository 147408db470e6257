//! Round controller.
//!
//! A `Round` owns one deal from shuffle to role transition. It is the only
//! place round state changes, and every entry point validates the whole
//! action before touching anything: a rejected action leaves the round
//! exactly as it was.
//!
//! ## Flow
//!
//! 1. `Dealing`: hands and kitty are checked and installed.
//! 2. `Bidding`: `submit_bid` / `submit_pass` until the auction closes.
//! 3. `KittyExchange`: the declarer holds the kitty and buries cards with
//!    `submit_kitty_discard`.
//! 4. `TrickLoop`: `submit_throw` until every hand is empty.
//! 5. `Scoring` and `RoleTransition` run as soon as the last trick closes,
//!    leaving the round `Finished` with a `RoundResult`.
//!
//! A closed auction with no bid ends the round in `Redeal` under
//! `NoBidPolicy::Redeal`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::phase::Phase;
use crate::cards::{check_composition, Card, Deal, Hand, Rank, Suit, TrumpContext, DECK_SIZE};
use crate::core::{
    Action, ActionRecord, BidError, DealError, EngineError, IllegalThrowError, KittyError, NoBidError,
    NoBidPolicy, OpeningLeader, PlayerId, PlayerMap, RuleConfig, TeamId, PLAYER_COUNT,
};
use crate::rules::{
    check_discard, kitty_bonus, legal_moves, next_roles, round_outcome, transition_levels, validate, Bid,
    BidKind, Bidding, Combination, LevelTransition, Roles, RoundOutcome, Scoreboard, Side, TeamLevels, Trick,
    TrickResult,
};

/// What a round needs to know from the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSetup {
    /// 1-based position in the match.
    pub round_number: u32,
    pub levels: TeamLevels,
    /// Seat that opens the auction.
    pub first_bidder: PlayerId,
    /// Roles designated by the previous round. `None` in the opening round,
    /// where the winning bidder becomes declarer.
    pub roles: Option<Roles>,
    /// Trump suit of the previous round, for `NoBidPolicy::KeepPreviousTrump`.
    pub previous_trump: Option<Suit>,
}

impl RoundSetup {
    /// The first round of a match: both teams on Two, seat 0 bids first.
    #[must_use]
    pub fn opening() -> Self {
        Self {
            round_number: 1,
            levels: TeamLevels::default(),
            first_bidder: PlayerId::new(0),
            roles: None,
            previous_trump: None,
        }
    }

    /// Set the starting levels.
    #[must_use]
    pub fn with_levels(mut self, levels: TeamLevels) -> Self {
        self.levels = levels;
        self
    }

    /// Set the designated roles; the declarer also bids first.
    #[must_use]
    pub fn with_roles(mut self, roles: Roles) -> Self {
        self.first_bidder = roles.declarer;
        self.roles = Some(roles);
        self
    }

    /// The rank played as trump: the defending team's level.
    #[must_use]
    pub fn trump_rank(&self) -> Rank {
        match self.roles {
            Some(roles) => self.levels[roles.defending_team],
            None => self.levels[TeamId(0)],
        }
    }
}

impl Default for RoundSetup {
    fn default() -> Self {
        Self::opening()
    }
}

/// A closed trick and its result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub trick: Trick,
    pub result: TrickResult,
}

/// Everything decided when a round finishes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Roles that applied during this round.
    pub roles: Roles,
    pub scoreboard: Scoreboard,
    pub outcome: RoundOutcome,
    /// Team that advanced (or held).
    pub winner: TeamId,
    pub levels: LevelTransition,
    /// Roles for the following round.
    pub next_roles: Roles,
}

/// Result of an accepted throw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThrowOutcome {
    pub combo: Combination,
    /// Set when this play completed a trick.
    pub trick: Option<TrickResult>,
    pub round_over: bool,
}

/// One round of Sheng Ji.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    config: RuleConfig,
    setup: RoundSetup,
    seed: Option<u64>,
    phase: Phase,
    phase_trail: Vec<Phase>,
    hands: PlayerMap<Hand>,
    kitty: Vec<Card>,
    buried: Vec<Card>,
    bidding: Bidding,
    trump: Option<TrumpContext>,
    declarer: Option<PlayerId>,
    trick: Option<Trick>,
    tricks: Vec<CompletedTrick>,
    scoreboard: Scoreboard,
    result: Option<RoundResult>,
    history: Vec<ActionRecord>,
}

impl Round {
    /// Install `deal` and open bidding.
    ///
    /// Without designated roles both teams must stand on the same level,
    /// since the opening trump rank is that shared level.
    pub fn start(deal: Deal, setup: RoundSetup, config: RuleConfig) -> Result<Self, DealError> {
        if setup.roles.is_none() && setup.levels[TeamId(0)] != setup.levels[TeamId(1)] {
            return Err(DealError::UnevenOpeningLevels {
                team0: setup.levels[TeamId(0)],
                team1: setup.levels[TeamId(1)],
            });
        }
        if deal.kitty.len() != config.kitty_size {
            return Err(DealError::KittySize {
                expected: config.kitty_size,
                actual: deal.kitty.len(),
            });
        }
        check_composition(deal.hands.values().flatten().chain(deal.kitty.iter()))?;
        let hand_size = (DECK_SIZE - config.kitty_size) / PLAYER_COUNT;
        for (player, hand) in deal.hands.iter() {
            if hand.len() != hand_size {
                return Err(DealError::HandSize {
                    player,
                    expected: hand_size,
                    actual: hand.len(),
                });
            }
        }

        let Deal { hands, kitty } = deal;
        let mut round = Self {
            bidding: Bidding::new(setup.first_bidder),
            hands: PlayerMap::new(|p| Hand::new(hands[p].clone())),
            kitty,
            config,
            setup,
            seed: None,
            phase: Phase::Dealing,
            phase_trail: vec![Phase::Dealing],
            buried: Vec::new(),
            trump: None,
            declarer: None,
            trick: None,
            tricks: Vec::new(),
            scoreboard: Scoreboard::default(),
            result: None,
            history: Vec::new(),
        };
        round.advance(Phase::Bidding);
        Ok(round)
    }

    /// Shuffle with `seed`, deal, and open bidding.
    pub fn deal(seed: u64, setup: RoundSetup, config: RuleConfig) -> Result<Self, DealError> {
        let deal = Deal::shuffled(seed, config.kitty_size)?;
        let mut round = Self::start(deal, setup, config)?;
        round.seed = Some(seed);
        debug!(seed, round = round.setup.round_number, "round dealt");
        Ok(round)
    }

    // === Accessors ===

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Every phase entered so far, in order.
    #[must_use]
    pub fn phase_trail(&self) -> &[Phase] {
        &self.phase_trail
    }

    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    #[must_use]
    pub fn setup(&self) -> &RoundSetup {
        &self.setup
    }

    /// Seed the deal was shuffled with, if it was shuffled here.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Cards held by `player`; empty for a seat not at the table.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        self.hands.try_get(player).map_or(&[], Hand::cards)
    }

    /// The kitty before the declarer picks it up.
    #[must_use]
    pub fn kitty(&self) -> &[Card] {
        &self.kitty
    }

    /// Cards the declarer buried. Hosts decide who may see them.
    #[must_use]
    pub fn buried(&self) -> &[Card] {
        &self.buried
    }

    #[must_use]
    pub fn bidding(&self) -> &Bidding {
        &self.bidding
    }

    #[must_use]
    pub fn declarer(&self) -> Option<PlayerId> {
        self.declarer
    }

    /// Trump settings, fixed once bidding resolves.
    #[must_use]
    pub fn trump_context(&self) -> Option<TrumpContext> {
        self.trump
    }

    #[must_use]
    pub fn current_trick(&self) -> Option<&Trick> {
        self.trick.as_ref()
    }

    #[must_use]
    pub fn completed_tricks(&self) -> &[CompletedTrick] {
        &self.tricks
    }

    #[must_use]
    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }

    #[must_use]
    pub fn result(&self) -> Option<&RoundResult> {
        self.result.as_ref()
    }

    /// Accepted actions in order.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Cards across hands, kitty, buried cards and played cards.
    /// Always `DECK_SIZE`.
    #[must_use]
    pub fn card_count(&self) -> usize {
        let held: usize = self.hands.values().map(Hand::len).sum();
        let played: usize = self
            .tricks
            .iter()
            .map(|t| t.trick.cards().count())
            .chain(self.trick.iter().map(|t| t.cards().count()))
            .sum();
        held + self.kitty.len() + self.buried.len() + played
    }

    /// The seat the round is waiting on.
    #[must_use]
    pub fn next_to_act(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Bidding => self.bidding.turn(),
            Phase::KittyExchange => self.declarer,
            Phase::TrickLoop => self.trick.as_ref().and_then(Trick::next_player),
            _ => None,
        }
    }

    /// The declarer a closed auction produces.
    ///
    /// In the opening round the winning bidder declares; afterwards the
    /// designated declarer keeps the role and the bid only names the suit.
    pub fn resolve_bidding(&self) -> Result<PlayerId, NoBidError> {
        let bid = self.bidding.resolve()?;
        Ok(self.setup.roles.map_or(bid.player, |roles| roles.declarer))
    }

    /// Legal plays for `player`, or nothing when it is not their turn.
    #[must_use]
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Combination> {
        let (Some(trick), Some(ctx)) = (self.trick.as_ref(), self.trump.as_ref()) else {
            return Vec::new();
        };
        if self.phase != Phase::TrickLoop || trick.next_player() != Some(player) {
            return Vec::new();
        }
        legal_moves(self.hands[player].cards(), trick.led(), ctx, &self.config)
    }

    // === Actions ===

    /// Submit any action on behalf of `player`. Returns the phase afterwards.
    pub fn apply(&mut self, player: PlayerId, action: Action) -> Result<Phase, EngineError> {
        match &action {
            Action::Bid { kind, suit } => self.submit_bid(player, *kind, *suit)?,
            Action::Pass => self.submit_pass(player)?,
            Action::DiscardKitty(cards) => {
                if self.phase != Phase::KittyExchange {
                    return Err(KittyError::WrongPhase(self.phase).into());
                }
                match self.declarer {
                    Some(declarer) if declarer != player => {
                        return Err(KittyError::NotDeclarer { declarer }.into());
                    }
                    _ => self.submit_kitty_discard(cards)?,
                }
            }
            Action::Throw(cards) => {
                self.submit_throw(player, cards)?;
            }
        }
        Ok(self.phase)
    }

    pub fn submit_bid(&mut self, player: PlayerId, kind: BidKind, suit: Option<Suit>) -> Result<(), BidError> {
        if self.phase != Phase::Bidding {
            return Err(BidError::WrongPhase(self.phase));
        }
        let expected = self.bidding.turn().ok_or(BidError::BiddingClosed)?;
        if expected != player {
            return Err(BidError::OutOfTurn {
                expected,
                actual: player,
            });
        }
        let bid = self.bidding.check_bid(
            player,
            kind,
            suit,
            self.hands[player].cards(),
            self.setup.trump_rank(),
            &self.config,
        )?;
        self.bidding.place(bid);
        self.record(player, Action::bid(kind, suit));
        debug!(player = %player, ?kind, ?suit, "bid placed");
        if self.bidding.is_closed() {
            self.close_bidding();
        }
        Ok(())
    }

    pub fn submit_pass(&mut self, player: PlayerId) -> Result<(), BidError> {
        if self.phase != Phase::Bidding {
            return Err(BidError::WrongPhase(self.phase));
        }
        self.bidding.pass(player)?;
        self.record(player, Action::Pass);
        debug!(player = %player, "bid passed");
        if self.bidding.is_closed() {
            self.close_bidding();
        }
        Ok(())
    }

    /// Bury cards from the declarer's hand.
    pub fn submit_kitty_discard(&mut self, cards: &[Card]) -> Result<(), KittyError> {
        if self.phase != Phase::KittyExchange {
            return Err(KittyError::WrongPhase(self.phase));
        }
        let declarer = self.declarer.ok_or(KittyError::WrongPhase(self.phase))?;
        check_discard(&self.hands[declarer], cards, self.config.kitty_size)?;
        self.hands[declarer]
            .remove_all(cards)
            .map_err(KittyError::NotInHand)?;
        self.buried = cards.to_vec();
        self.record(declarer, Action::discard(cards));
        debug!(player = %declarer, points = crate::cards::total_points(cards), "kitty buried");

        let leader = match self.config.opening_leader {
            OpeningLeader::DeclarerPartner => declarer.partner(),
            OpeningLeader::Declarer => declarer,
        };
        self.trick = Some(Trick::new(leader));
        self.advance(Phase::TrickLoop);
        Ok(())
    }

    /// Lead or follow in the current trick.
    pub fn submit_throw(&mut self, player: PlayerId, cards: &[Card]) -> Result<ThrowOutcome, IllegalThrowError> {
        if self.phase != Phase::TrickLoop {
            return Err(IllegalThrowError::WrongPhase(self.phase));
        }
        let (Some(trick), Some(ctx)) = (self.trick.as_ref(), self.trump) else {
            return Err(IllegalThrowError::WrongPhase(self.phase));
        };
        let expected = trick
            .next_player()
            .ok_or(IllegalThrowError::WrongPhase(self.phase))?;
        if expected != player {
            return Err(IllegalThrowError::OutOfTurn {
                expected,
                actual: player,
            });
        }
        let combo = validate(self.hands[player].cards(), cards, trick.led(), &ctx, &self.config)?;

        self.hands[player]
            .remove_all(cards)
            .map_err(IllegalThrowError::NotInHand)?;
        if let Some(trick) = self.trick.as_mut() {
            trick.push(player, combo.clone());
        }
        self.record(player, Action::throw(cards));
        debug!(player = %player, kind = ?combo.kind(), cards = cards.len(), "cards played");

        let completed = self.trick.as_ref().is_some_and(Trick::is_complete);
        let result = if completed { self.finish_trick(&ctx) } else { None };
        Ok(ThrowOutcome {
            combo,
            trick: result,
            round_over: self.phase == Phase::Finished,
        })
    }

    // === Internals ===

    fn record(&mut self, player: PlayerId, action: Action) {
        let sequence = self.history.len() as u32;
        self.history.push(ActionRecord::new(player, action, sequence));
    }

    fn advance(&mut self, next: Phase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal phase transition {:?} -> {:?}",
            self.phase,
            next
        );
        info!(from = ?self.phase, to = ?next, round = self.setup.round_number, "phase advanced");
        self.phase = next;
        self.phase_trail.push(next);
    }

    fn close_bidding(&mut self) {
        match self.resolve_bidding() {
            Ok(declarer) => {
                let suit = self.bidding.standing().and_then(|bid: &Bid| bid.suit);
                self.begin_exchange(suit, declarer);
            }
            Err(NoBidError) => match self.config.no_bid_policy {
                NoBidPolicy::Redeal => {
                    info!(round = self.setup.round_number, "no bid, redeal");
                    self.advance(Phase::Redeal);
                }
                NoBidPolicy::KeepPreviousTrump => {
                    let declarer = self
                        .setup
                        .roles
                        .map_or(self.bidding.first_bidder(), |roles| roles.declarer);
                    self.begin_exchange(self.setup.previous_trump, declarer);
                }
            },
        }
    }

    fn begin_exchange(&mut self, trump_suit: Option<Suit>, declarer: PlayerId) {
        let ctx = TrumpContext::new(trump_suit, self.setup.trump_rank(), declarer.team());
        info!(declarer = %declarer, trump_suit = ?trump_suit, trump_rank = %ctx.trump_rank, "trump fixed");
        self.trump = Some(ctx);
        self.declarer = Some(declarer);
        let kitty = std::mem::take(&mut self.kitty);
        self.hands[declarer].extend(kitty);
        for hand in self.hands.values_mut() {
            hand.sort(&ctx);
        }
        self.advance(Phase::KittyExchange);
    }

    fn side_of(&self, player: PlayerId, ctx: &TrumpContext) -> Side {
        if player.team() == ctx.declaring_team {
            Side::Defenders
        } else {
            Side::Attackers
        }
    }

    fn finish_trick(&mut self, ctx: &TrumpContext) -> Option<TrickResult> {
        let trick = self.trick.take()?;
        let Some(result) = trick.resolve(ctx) else {
            self.trick = Some(trick);
            return None;
        };
        let side = self.side_of(result.winner, ctx);
        self.scoreboard.add(side, result.points);
        debug!(winner = %result.winner, points = result.points, ?side, "trick won");
        self.tricks.push(CompletedTrick { trick, result });

        if self.hands.values().all(Hand::is_empty) {
            let bonus = kitty_bonus(&self.buried, self.config.kitty_multiplier);
            self.scoreboard.add(side, bonus);
            self.scoreboard.kitty_bonus = Some((side, bonus));
            self.score_round(ctx);
        } else {
            self.trick = Some(Trick::new(result.winner));
        }
        Some(result)
    }

    fn score_round(&mut self, ctx: &TrumpContext) {
        self.advance(Phase::Scoring);
        let roles = Roles {
            defending_team: ctx.declaring_team,
            declarer: self.declarer.unwrap_or(self.setup.first_bidder),
        };
        let outcome = round_outcome(self.scoreboard.attacker_points, &self.config.levels);
        let winner = match outcome.winning_side {
            Side::Defenders => roles.defending_team,
            Side::Attackers => roles.attacking_team(),
        };
        info!(
            attacker_points = outcome.attacker_points,
            winner = %winner,
            steps = outcome.steps,
            "round scored"
        );

        self.advance(Phase::RoleTransition);
        let levels = transition_levels(
            &self.setup.levels,
            winner,
            outcome.winning_side,
            outcome.steps,
            &self.config.levels,
        );
        let next = next_roles(roles, outcome.winning_side, &self.config.levels);
        self.result = Some(RoundResult {
            roles,
            scoreboard: self.scoreboard,
            outcome,
            winner,
            levels,
            next_roles: next,
        });
        self.advance(Phase::Finished);
    }
}

/// Entry point for hosts that just want to deal rounds.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    config: RuleConfig,
}

impl Engine {
    #[must_use]
    pub fn new(config: RuleConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Deal an opening round from `seed`.
    pub fn start_deal(&self, seed: u64) -> Result<Round, DealError> {
        Round::deal(seed, RoundSetup::opening(), self.config.clone())
    }

    /// Start a round from an explicit deal.
    pub fn start_round(&self, deal: Deal, setup: RoundSetup) -> Result<Round, DealError> {
        Round::start(deal, setup, self.config.clone())
    }
}
