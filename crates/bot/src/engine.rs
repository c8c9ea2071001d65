// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! The bot decision engine.
//!
//! The engine picks one of the legal actions requested by the server using a
//! chain of rules for each betting round, the first rule that matches wins.
//! Pre-flop rules use the starting hands statistics while the flop, turn and
//! river share the same rules based on the best hand made with the board.
use anyhow::bail;
use log::{debug, error, warn};
use std::{str::FromStr, sync::Arc};
use thiserror::Error;

use deepthought_core::{
    game_state::{ActionRequest, HandSnapshot},
    message::{Action, ActionKind},
    poker::{Chips, HandRank, Phase},
};

use crate::{hand_key, premium, stats::StartingHands};

/// Pre-flop win probability above which the bot raises.
const RAISE_WIN_PROBABILITY: f64 = 60.0;

/// Win probability bonus when the bot is the dealer.
const DEALER_BONUS: f64 = 5.0;

/// Pre-flop (win probability, maximum call amount) thresholds.
const CALL_THRESHOLDS: [(f64, u32); 3] = [(15.0, 100), (22.0, 300), (30.0, 1_000)];

/// Post-flop premium score above which the bot raises.
const POSTFLOP_PREMIUM_SCORE: u8 = 5;

/// Decision errors.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// The server did not send any legal action.
    #[error("the action request has no legal actions")]
    NoLegalActions,
    /// The bot has not been dealt its hole cards.
    #[error("no hole cards for the current hand")]
    MissingHoleCards,
    /// The number of players has no statistics.
    #[error("invalid number of players {0}")]
    InvalidPlayers(usize),
    /// An action has been requested outside a betting round.
    #[error("cannot act in phase {0}")]
    UnhandledPhase(Phase),
    /// A rule chain ended in a fold but folding is not legal.
    #[error("fold is not a legal action")]
    FoldUnavailable,
}

/// What to do when an action is requested outside a betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownPhase {
    /// Fold if folding is legal.
    Fold,
    /// Return an [DecisionError::UnhandledPhase] error.
    Fail,
}

impl Default for UnknownPhase {
    /// Fails in debug builds and folds in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            UnknownPhase::Fail
        } else {
            UnknownPhase::Fold
        }
    }
}

impl FromStr for UnknownPhase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "fold" => Ok(UnknownPhase::Fold),
            "fail" => Ok(UnknownPhase::Fail),
            _ => bail!("Invalid unknown phase policy {s:?}, expected fold or fail"),
        }
    }
}

/// The bot state for one table.
#[derive(Debug, Default)]
pub struct AgentState {
    raises: u32,
}

impl AgentState {
    /// The number of raises seen since the bot last checked, called or folded.
    pub fn raises(&self) -> u32 {
        self.raises
    }

    /// Records a raise from another player.
    pub fn on_raise(&mut self) {
        self.raises += 1;
    }

    fn reset_raises(&mut self) {
        self.raises = 0;
    }
}

/// The legal actions by kind.
#[derive(Debug, Default)]
struct LegalActions {
    fold: Option<Action>,
    check: Option<Action>,
    call: Option<Action>,
    raise: Option<Action>,
}

impl LegalActions {
    fn new(req: &ActionRequest) -> Self {
        Self {
            fold: req.action(ActionKind::Fold).copied(),
            check: req.action(ActionKind::Check).copied(),
            call: req.action(ActionKind::Call).copied(),
            raise: req.action(ActionKind::Raise).copied(),
        }
    }

    /// Returns the call action if the call amount is at most `max`.
    fn call_up_to(&self, max: Chips) -> Option<Action> {
        self.call.filter(|a| a.amount <= max)
    }

    fn fold(&self) -> Result<Action, DecisionError> {
        self.fold.ok_or(DecisionError::FoldUnavailable)
    }
}

/// The decision engine.
///
/// The engine is stateless, all the table state is in the [HandSnapshot] and
/// [AgentState] arguments so it can be shared by multiple tables.
#[derive(Debug, Clone)]
pub struct Engine {
    stats: Arc<StartingHands>,
    unknown_phase: UnknownPhase,
}

impl Engine {
    /// Creates a new engine.
    pub fn new(stats: Arc<StartingHands>, unknown_phase: UnknownPhase) -> Self {
        Self {
            stats,
            unknown_phase,
        }
    }

    /// Chooses an action from the request legal actions.
    ///
    /// The returned action is always one of the request actions.
    pub fn decide(
        &self,
        state: &mut AgentState,
        req: &ActionRequest,
        snapshot: &HandSnapshot,
        best_hand: HandRank,
    ) -> Result<Action, DecisionError> {
        if req.actions.is_empty() {
            return Err(DecisionError::NoLegalActions);
        }

        let legal = LegalActions::new(req);
        let phase = snapshot.phase;

        if !phase.is_betting() {
            return match self.unknown_phase {
                UnknownPhase::Fold => {
                    error!("Action requested in phase {phase}, folding");
                    legal.fold.ok_or(DecisionError::UnhandledPhase(phase))
                }
                UnknownPhase::Fail => Err(DecisionError::UnhandledPhase(phase)),
            };
        }

        if phase == Phase::PreFlop {
            self.eval_preflop(state, &legal, snapshot)
        } else {
            self.eval_postflop(state, &legal, snapshot, best_hand)
        }
    }

    /// Returns the pre-flop win probability percentage for the snapshot hole
    /// cards including the dealer bonus.
    pub fn win_probability(&self, snapshot: &HandSnapshot) -> Result<f64, DecisionError> {
        let (c1, c2) = snapshot
            .hole_cards
            .ok_or(DecisionError::MissingHoleCards)?;
        let key = hand_key::translate(c1, c2);

        let players = snapshot.players;
        let prob = self
            .stats
            .lookup(&key, players)
            .map_err(|_| DecisionError::InvalidPlayers(players))?;

        let mut prob = prob.unwrap_or_else(|| {
            warn!("No statistics for {key} with {players} players, using 0%");
            0.0
        });

        if snapshot.is_dealer() {
            prob += DEALER_BONUS;
        }

        Ok(prob)
    }

    fn eval_preflop(
        &self,
        state: &mut AgentState,
        legal: &LegalActions,
        snapshot: &HandSnapshot,
    ) -> Result<Action, DecisionError> {
        let win_prob = self.win_probability(snapshot)?;
        let premium = premium_score(snapshot)?;

        if win_prob > RAISE_WIN_PROBABILITY {
            if let Some(raise) = legal.raise {
                state.reset_raises();
                return Ok(raise);
            }
        }

        if premium > 0 {
            if let Some(action) = legal.raise.or(legal.call) {
                return Ok(action);
            }
        }

        if let Some(check) = legal.check {
            state.reset_raises();
            return Ok(check);
        }

        for (min_prob, max_call) in CALL_THRESHOLDS {
            if win_prob > min_prob {
                if let Some(call) = legal.call_up_to(Chips::new(max_call)) {
                    return Ok(call);
                }
            }
        }

        debug!("Folding with {win_prob:.1}%");
        let fold = legal.fold()?;
        state.reset_raises();
        Ok(fold)
    }

    fn eval_postflop(
        &self,
        state: &mut AgentState,
        legal: &LegalActions,
        snapshot: &HandSnapshot,
        best_hand: HandRank,
    ) -> Result<Action, DecisionError> {
        let premium = premium_score(snapshot)?;

        if let Some(raise) = legal.raise {
            if best_hand >= HandRank::ThreeOfAKind || premium > POSTFLOP_PREMIUM_SCORE {
                return Ok(raise);
            }
        }

        if let Some(check) = legal.check {
            state.reset_raises();
            return Ok(check);
        }

        if best_hand.is_better_than(HandRank::OnePair) {
            if let Some(call) = legal.call {
                state.reset_raises();
                return Ok(call);
            }
        }

        if best_hand.is_better_than(HandRank::TwoPair) {
            if let Some(raise) = legal.raise {
                state.reset_raises();
                return Ok(raise);
            }
        }

        // This phase is never pre-flop here, the rule is kept as it was
        // written until it is clear what it was meant to check.
        if snapshot.is_small_blind() && snapshot.phase == Phase::PreFlop {
            if let Some(call) = legal.call {
                state.reset_raises();
                return Ok(call);
            }
        }

        legal.fold()
    }
}

fn premium_score(snapshot: &HandSnapshot) -> Result<u8, DecisionError> {
    let (c1, c2) = snapshot
        .hole_cards
        .ok_or(DecisionError::MissingHoleCards)?;
    Ok(premium::rank(c1, c2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepthought_core::poker::{Card, Deck};
    use rand::prelude::*;

    const ME: &str = "Deep_Thought";

    /// Statistics with the given records for all numbers of players.
    fn new_engine(records: &str) -> Engine {
        let stats = StartingHands::from_sources(
            crate::stats::PLAYERS.map(|n| (n, format!("test{n}"), records)),
        )
        .unwrap();
        Engine::new(Arc::new(stats), UnknownPhase::Fail)
    }

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn new_snapshot(phase: Phase, c1: &str, c2: &str) -> HandSnapshot {
        HandSnapshot {
            player: ME.to_string(),
            hole_cards: Some((card(c1), card(c2))),
            community_cards: Vec::default(),
            phase,
            players: 3,
            dealer: Some("Alice".to_string()),
            small_blind_player: Some("Bob".to_string()),
            big_blind: Chips::new(20),
        }
    }

    fn fold() -> Action {
        Action::new(ActionKind::Fold, Chips::ZERO)
    }

    fn check() -> Action {
        Action::new(ActionKind::Check, Chips::ZERO)
    }

    fn call(amount: u32) -> Action {
        Action::new(ActionKind::Call, Chips::new(amount))
    }

    fn raise(amount: u32) -> Action {
        Action::new(ActionKind::Raise, Chips::new(amount))
    }

    fn all_in(amount: u32) -> Action {
        Action::new(ActionKind::AllIn, Chips::new(amount))
    }

    fn request(actions: &[Action]) -> ActionRequest {
        ActionRequest::new(actions.to_vec())
    }

    fn state_with_raises(raises: u32) -> AgentState {
        let mut state = AgentState::default();
        for _ in 0..raises {
            state.on_raise();
        }
        state
    }

    #[test]
    fn preflop_raise_strong_hand() {
        // 60% plus the dealer bonus.
        let engine = new_engine("KAs 60");
        let mut snapshot = new_snapshot(Phase::PreFlop, "AS", "KS");
        snapshot.dealer = Some(ME.to_string());
        assert_eq!(engine.win_probability(&snapshot).unwrap(), 65.0);

        let mut state = state_with_raises(3);
        let req = request(&[fold(), call(20), raise(40)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, raise(40));
        assert_eq!(state.raises(), 0);
    }

    #[test]
    fn preflop_no_dealer_bonus() {
        // 60% is not enough without the dealer bonus, but ace king is premium.
        let engine = new_engine("KAs 60");
        let snapshot = new_snapshot(Phase::PreFlop, "AS", "KS");
        assert_eq!(engine.win_probability(&snapshot).unwrap(), 60.0);

        let mut state = state_with_raises(2);
        let req = request(&[fold(), call(20), raise(40)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, raise(40));

        // Premium raises do not reset the counter.
        assert_eq!(state.raises(), 2);
    }

    #[test]
    fn preflop_premium_calls_without_raise() {
        let engine = new_engine("77 20");
        let snapshot = new_snapshot(Phase::PreFlop, "7H", "7S");

        let mut state = state_with_raises(1);
        let req = request(&[fold(), call(5_000)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::OnePair)
            .unwrap();
        assert_eq!(action, call(5_000));
        assert_eq!(state.raises(), 1);

        // With neither raise nor call the premium rule falls through.
        let req = request(&[fold(), check()]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::OnePair)
            .unwrap();
        assert_eq!(action, check());
        assert_eq!(state.raises(), 0);
    }

    #[test]
    fn preflop_check() {
        let engine = new_engine("27 10");
        let snapshot = new_snapshot(Phase::PreFlop, "2H", "7S");

        let mut state = state_with_raises(1);
        let req = request(&[fold(), check(), raise(40)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, check());
        assert_eq!(state.raises(), 0);
    }

    #[test]
    fn preflop_call_thresholds() {
        let tests = [
            // (win probability, call amount, calls)
            (10.0, 50, false),
            (16.0, 50, true),
            (16.0, 100, true),
            (16.0, 101, false),
            (23.0, 300, true),
            (23.0, 301, false),
            (31.0, 1_000, true),
            (31.0, 1_001, false),
            (50.0, 5_000, false),
        ];

        for (prob, amount, calls) in tests {
            let engine = new_engine(&format!("26 {prob}"));
            let snapshot = new_snapshot(Phase::PreFlop, "2H", "6S");

            let mut state = AgentState::default();
            let req = request(&[fold(), call(amount)]);
            let action = engine
                .decide(&mut state, &req, &snapshot, HandRank::HighCard)
                .unwrap();

            let expected = if calls { call(amount) } else { fold() };
            assert_eq!(action, expected, "prob {prob} amount {amount}");
        }
    }

    #[test]
    fn preflop_low_probability() {
        let engine = new_engine("26 10");
        let snapshot = new_snapshot(Phase::PreFlop, "2H", "6S");

        // Small call with a weak hand.
        let mut state = AgentState::default();
        let req = request(&[fold(), call(50)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, fold());

        // Large call.
        let mut state = state_with_raises(4);
        let req = request(&[fold(), call(5_000)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, fold());
        assert_eq!(state.raises(), 0);
    }

    #[test]
    fn preflop_call_keeps_raises() {
        let engine = new_engine("26 16");
        let snapshot = new_snapshot(Phase::PreFlop, "2H", "6S");

        let mut state = state_with_raises(2);
        let req = request(&[fold(), call(50)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, call(50));
        assert_eq!(state.raises(), 2);
    }

    #[test]
    fn preflop_missing_statistics() {
        // The hand is not in the statistics, the probability defaults to 0.
        let engine = new_engine("77 50");
        let snapshot = new_snapshot(Phase::PreFlop, "2H", "6S");
        assert_eq!(engine.win_probability(&snapshot).unwrap(), 0.0);

        let mut state = AgentState::default();
        let req = request(&[fold(), call(50)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, fold());
    }

    #[test]
    fn preflop_invalid_players() {
        let engine = new_engine("26 50");
        let mut snapshot = new_snapshot(Phase::PreFlop, "2H", "6S");
        snapshot.players = 11;

        let mut state = AgentState::default();
        let req = request(&[fold(), call(50)]);
        let res = engine.decide(&mut state, &req, &snapshot, HandRank::HighCard);
        assert!(matches!(res, Err(DecisionError::InvalidPlayers(11))));

        snapshot.players = 1;
        let res = engine.decide(&mut state, &req, &snapshot, HandRank::HighCard);
        assert!(matches!(res, Err(DecisionError::InvalidPlayers(1))));
    }

    #[test]
    fn preflop_fold_unavailable() {
        let engine = new_engine("26 10");
        let snapshot = new_snapshot(Phase::PreFlop, "2H", "6S");

        let mut state = state_with_raises(2);
        let req = request(&[all_in(500)]);
        let res = engine.decide(&mut state, &req, &snapshot, HandRank::HighCard);
        assert!(matches!(res, Err(DecisionError::FoldUnavailable)));

        // No fold, no reset.
        assert_eq!(state.raises(), 2);
    }

    #[test]
    fn postflop_raise_strong_hand() {
        let engine = new_engine("");

        for phase in [Phase::Flop, Phase::Turn, Phase::River] {
            let snapshot = new_snapshot(phase, "2H", "6S");
            let mut state = state_with_raises(1);
            let req = request(&[fold(), check(), call(20), raise(40), all_in(900)]);

            let action = engine
                .decide(&mut state, &req, &snapshot, HandRank::FourOfAKind)
                .unwrap();
            assert_eq!(action, raise(40));

            let action = engine
                .decide(&mut state, &req, &snapshot, HandRank::ThreeOfAKind)
                .unwrap();
            assert_eq!(action, raise(40));
            assert_eq!(state.raises(), 1);
        }
    }

    #[test]
    fn postflop_raise_premium() {
        let engine = new_engine("");
        let req = request(&[fold(), check(), raise(40)]);
        let mut state = AgentState::default();

        // Jacks score 6.
        let snapshot = new_snapshot(Phase::Flop, "JH", "JS");
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::OnePair)
            .unwrap();
        assert_eq!(action, raise(40));

        // Tens score 5.
        let snapshot = new_snapshot(Phase::Flop, "TH", "TS");
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::OnePair)
            .unwrap();
        assert_eq!(action, check());
    }

    #[test]
    fn postflop_check() {
        let engine = new_engine("");
        let snapshot = new_snapshot(Phase::Turn, "2H", "6S");

        let mut state = state_with_raises(2);
        let req = request(&[check(), fold()]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, check());
        assert_eq!(state.raises(), 0);
    }

    #[test]
    fn postflop_call() {
        let engine = new_engine("");
        let snapshot = new_snapshot(Phase::River, "2H", "6S");
        let req = request(&[fold(), call(20)]);

        let mut state = state_with_raises(2);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::TwoPair)
            .unwrap();
        assert_eq!(action, call(20));
        assert_eq!(state.raises(), 0);

        // One pair is not enough to call.
        let mut state = state_with_raises(2);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::OnePair)
            .unwrap();
        assert_eq!(action, fold());
        assert_eq!(state.raises(), 2);
    }

    #[test]
    fn postflop_small_blind_folds() {
        let engine = new_engine("");
        let mut snapshot = new_snapshot(Phase::Flop, "2H", "6S");
        snapshot.small_blind_player = Some(ME.to_string());

        // The small blind rule only applies pre-flop.
        let mut state = AgentState::default();
        let req = request(&[fold(), call(20)]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::OnePair)
            .unwrap();
        assert_eq!(action, fold());
    }

    #[test]
    fn postflop_missing_hole_cards() {
        let engine = new_engine("");
        let mut snapshot = new_snapshot(Phase::Flop, "2H", "6S");
        snapshot.hole_cards = None;

        let mut state = AgentState::default();
        let req = request(&[fold(), check()]);
        let res = engine.decide(&mut state, &req, &snapshot, HandRank::HighCard);
        assert!(matches!(res, Err(DecisionError::MissingHoleCards)));
    }

    #[test]
    fn no_legal_actions() {
        let engine = new_engine("26 10");
        let snapshot = new_snapshot(Phase::PreFlop, "2H", "6S");

        let mut state = AgentState::default();
        let req = request(&[]);
        let res = engine.decide(&mut state, &req, &snapshot, HandRank::HighCard);
        assert!(matches!(res, Err(DecisionError::NoLegalActions)));
    }

    #[test]
    fn unknown_phase() {
        let stats = StartingHands::from_sources(
            crate::stats::PLAYERS.map(|n| (n, format!("test{n}"), "")),
        )
        .unwrap();
        let stats = Arc::new(stats);
        let snapshot = new_snapshot(Phase::Showdown, "2H", "6S");
        let req = request(&[fold(), check()]);
        let mut state = AgentState::default();

        let engine = Engine::new(stats.clone(), UnknownPhase::Fail);
        let res = engine.decide(&mut state, &req, &snapshot, HandRank::HighCard);
        assert!(matches!(
            res,
            Err(DecisionError::UnhandledPhase(Phase::Showdown))
        ));

        let engine = Engine::new(stats, UnknownPhase::Fold);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, fold());

        // Cannot fold either.
        let req = request(&[check()]);
        let res = engine.decide(&mut state, &req, &snapshot, HandRank::HighCard);
        assert!(matches!(res, Err(DecisionError::UnhandledPhase(_))));

        // Waiting for a hand to start.
        let snapshot = new_snapshot(Phase::Waiting, "2H", "6S");
        let req = request(&[fold(), check()]);
        let action = engine
            .decide(&mut state, &req, &snapshot, HandRank::HighCard)
            .unwrap();
        assert_eq!(action, fold());

        let engine = Engine::new(engine.stats.clone(), UnknownPhase::Fail);
        let res = engine.decide(&mut state, &req, &snapshot, HandRank::HighCard);
        assert!(matches!(
            res,
            Err(DecisionError::UnhandledPhase(Phase::Waiting))
        ));
    }

    #[test]
    fn unknown_phase_policy() {
        assert_eq!("fold".parse::<UnknownPhase>().unwrap(), UnknownPhase::Fold);
        assert_eq!("FAIL".parse::<UnknownPhase>().unwrap(), UnknownPhase::Fail);
        assert!("panic".parse::<UnknownPhase>().is_err());

        let expected = if cfg!(debug_assertions) {
            UnknownPhase::Fail
        } else {
            UnknownPhase::Fold
        };
        assert_eq!(UnknownPhase::default(), expected);
    }

    #[test]
    fn actions_are_legal_and_repeatable() {
        let stats = Arc::new(StartingHands::builtin().unwrap());
        let engine = Engine::new(stats, UnknownPhase::Fail);
        let mut rng = StdRng::seed_from_u64(42);

        let choices = [fold(), check(), call(50), call(400), call(2_000), raise(100)];

        for _ in 0..2_000 {
            let mut deck = Deck::new_and_shuffled(&mut rng);
            let mut deal = || deck.deal().unwrap();

            let phase = *[Phase::PreFlop, Phase::Flop, Phase::Turn, Phase::River]
                .choose(&mut rng)
                .unwrap();
            let board = match phase {
                Phase::Flop => 3,
                Phase::Turn => 4,
                Phase::River => 5,
                _ => 0,
            };

            let mut snapshot = HandSnapshot {
                player: ME.to_string(),
                hole_cards: Some((deal(), deal())),
                community_cards: (0..board).map(|_| deal()).collect(),
                phase,
                players: rng.random_range(2..=10),
                dealer: Some(ME.to_string()),
                small_blind_player: None,
                big_blind: Chips::new(20),
            };
            if rng.random_bool(0.5) {
                snapshot.dealer = None;
            }

            // Random subset of the choices with a fold, and at most one call.
            let call = choices[2 + rng.random_range(0..3)];
            let mut actions = vec![fold(), call];
            if rng.random_bool(0.5) {
                actions.push(check());
            }
            if rng.random_bool(0.5) {
                actions.push(choices[5]);
            }
            actions.shuffle(&mut rng);

            let req = request(&actions);
            let best = HandRank::classify(&snapshot.cards());

            let mut state = AgentState::default();
            let a1 = engine.decide(&mut state, &req, &snapshot, best).unwrap();
            let a2 = engine.decide(&mut state, &req, &snapshot, best).unwrap();

            assert!(req.contains(&a1), "{a1:?} not in {actions:?}");
            assert_eq!(a1, a2);
        }
    }
}
