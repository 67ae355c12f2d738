//! One betting round (pre-flop, flop, turn or river) as a state machine.
//!
//! The round owns only betting bookkeeping; chips live on [`Player`]s, which the
//! caller passes in on every call. Each action is validated completely before
//! anything is written, so a rejected action leaves both the round and the
//! players untouched.

use crate::player::{Player, PlayerId, PlayerStatus};
use log::debug;

/// A player decision. `Bet` and `RaiseTo` carry the player's total commitment
/// for the round after the action, not the chips added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Action {
    Fold,
    Check,
    Call,
    Bet(u64),
    RaiseTo(u64),
    /// Commit the whole remaining stack, as a call or a raise depending on size.
    AllIn,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleViolation {
    #[error("betting round is closed")]
    RoundClosed,
    #[error("no player {0} at this table")]
    UnknownPlayer(PlayerId),
    #[error("out of turn: waiting for {expected}, got {got}")]
    OutOfTurn { expected: PlayerId, got: PlayerId },
    #[error("player {0} has folded or is all-in")]
    PlayerNotActive(PlayerId),
    #[error("cannot check facing a bet: {to_call} to call")]
    CheckNotAllowed { to_call: u64 },
    #[error("nothing to call")]
    NothingToCall,
    #[error("insufficient chips: need {needed}, have {available}")]
    InsufficientChips { needed: u64, available: u64 },
    #[error("cannot bet into an existing bet of {current_bet}; raise instead")]
    BetNotAllowed { current_bet: u64 },
    #[error("cannot raise without a bet; bet instead")]
    RaiseNotAllowed,
    #[error("bet too small: min {min}, got {got}")]
    BetTooSmall { min: u64, got: u64 },
    #[error("raise too small: min raise to {min}, got {got}")]
    RaiseTooSmall { min: u64, got: u64 },
    #[error("raising is closed: an all-in below a full raise does not reopen the betting")]
    ReraiseClosed,
}

/// Where the round stands after the last transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    AwaitingAction(PlayerId),
    /// Every player still able to act has matched the highest bet.
    Complete,
    /// Everyone else folded; the hand ends without a showdown.
    Uncontested(PlayerId),
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RoundStatus::AwaitingAction(_))
    }
}

/// Read-only snapshot of a betting round, returned to callers after each action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRoundState {
    pub current_bet: u64,
    pub min_raise: u64,
    pub to_act: Option<PlayerId>,
    /// Players who have acted since the last full raise, in seat order.
    pub acted: Vec<PlayerId>,
    pub status: RoundStatus,
}

/// Chip movement an accepted action will cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Plan {
    Fold,
    Check,
    Commit { chips: u64, label: &'static str },
}

#[derive(Debug, Clone)]
pub struct BettingRound {
    current_bet: u64,
    min_raise: u64,
    to_act: Option<usize>,
    acted: Vec<bool>,
    /// Seats that may only call or fold until a full raise reopens the action.
    raise_closed: Vec<bool>,
    status: RoundStatus,
}

impl BettingRound {
    /// A fresh round with no bet, where the smallest bet or raise is `min_raise`.
    pub fn new(num_seats: usize, min_raise: u64) -> Self {
        Self {
            current_bet: 0,
            min_raise,
            to_act: None,
            acted: vec![false; num_seats],
            raise_closed: vec![false; num_seats],
            status: RoundStatus::Complete,
        }
    }

    /// Post a forced bet (blind). Forced bets do not count as acting, so the big
    /// blind keeps the option to raise when everyone just calls.
    pub fn post_blind(&mut self, players: &mut [Player], seat: usize, amount: u64) -> u64 {
        let paid = players[seat].commit(amount);
        self.current_bet = self.current_bet.max(players[seat].committed);
        paid
    }

    /// Open the round; action starts at `first_seat` or the next seat able to act.
    pub fn start(&mut self, players: &[Player], first_seat: usize) -> RoundStatus {
        self.to_act = None;
        self.status = self.resolve(players, first_seat);
        self.status
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    pub fn min_raise(&self) -> u64 {
        self.min_raise
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn to_act(&self) -> Option<usize> {
        self.to_act
    }

    /// Chips `seat` must add to match the highest bet.
    pub fn to_call(&self, players: &[Player], seat: usize) -> u64 {
        self.current_bet.saturating_sub(players[seat].committed)
    }

    /// Smallest legal raise-to total.
    pub fn min_raise_to(&self) -> u64 {
        self.current_bet + self.min_raise
    }

    /// Whether `seat` may still put in a raise this round.
    pub fn can_raise(&self, seat: usize) -> bool {
        !self.raise_closed.get(seat).copied().unwrap_or(true)
    }

    pub fn snapshot(&self, players: &[Player]) -> BettingRoundState {
        BettingRoundState {
            current_bet: self.current_bet,
            min_raise: self.min_raise,
            to_act: self.to_act.map(|s| players[s].id),
            acted: players
                .iter()
                .enumerate()
                .filter(|(i, _)| self.acted[*i])
                .map(|(_, p)| p.id)
                .collect(),
            status: self.status,
        }
    }

    /// Validate and apply `action` for the player in `seat`.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        seat: usize,
        action: Action,
    ) -> Result<RoundStatus, RuleViolation> {
        let plan = self.validate(players, seat, action)?;
        self.execute(players, seat, plan);
        self.status = self.resolve(players, seat + 1);
        Ok(self.status)
    }

    /// Fold `seat` regardless of turn order (disconnect). Committed chips stay in the pot.
    pub fn force_fold(
        &mut self,
        players: &mut [Player],
        seat: usize,
    ) -> Result<RoundStatus, RuleViolation> {
        if self.status.is_terminal() {
            return Err(RuleViolation::RoundClosed);
        }
        let p = players.get(seat).ok_or(RuleViolation::UnknownPlayer(PlayerId(seat as u32)))?;
        if !p.is_active() {
            return Err(RuleViolation::PlayerNotActive(p.id));
        }
        let resume_from = match self.to_act {
            Some(cur) if cur != seat => cur,
            _ => seat + 1,
        };
        self.execute(players, seat, Plan::Fold);
        self.status = self.resolve(players, resume_from);
        Ok(self.status)
    }

    fn validate(
        &self,
        players: &[Player],
        seat: usize,
        action: Action,
    ) -> Result<Plan, RuleViolation> {
        if self.status.is_terminal() {
            return Err(RuleViolation::RoundClosed);
        }
        let p = players.get(seat).ok_or(RuleViolation::UnknownPlayer(PlayerId(seat as u32)))?;
        if !p.is_active() {
            return Err(RuleViolation::PlayerNotActive(p.id));
        }
        if let Some(expected) = self.to_act.filter(|&e| e != seat) {
            return Err(RuleViolation::OutOfTurn { expected: players[expected].id, got: p.id });
        }

        let to_call = self.current_bet.saturating_sub(p.committed);
        match action {
            Action::Fold => Ok(Plan::Fold),
            Action::Check => {
                if to_call > 0 {
                    return Err(RuleViolation::CheckNotAllowed { to_call });
                }
                Ok(Plan::Check)
            }
            Action::Call => {
                if to_call == 0 {
                    return Err(RuleViolation::NothingToCall);
                }
                if p.stack < to_call {
                    return Err(RuleViolation::InsufficientChips {
                        needed: to_call,
                        available: p.stack,
                    });
                }
                Ok(Plan::Commit { chips: to_call, label: "Call" })
            }
            Action::Bet(total) => {
                if self.current_bet > 0 {
                    return Err(RuleViolation::BetNotAllowed { current_bet: self.current_bet });
                }
                self.validate_raise(p, seat, total, "Bet")
            }
            Action::RaiseTo(total) => {
                if self.current_bet == 0 {
                    return Err(RuleViolation::RaiseNotAllowed);
                }
                self.validate_raise(p, seat, total, "Raise to")
            }
            Action::AllIn => {
                if p.stack == 0 {
                    return Err(RuleViolation::InsufficientChips { needed: 1, available: 0 });
                }
                let total = p.committed + p.stack;
                if total > self.current_bet && !self.can_raise(seat) {
                    return Err(RuleViolation::ReraiseClosed);
                }
                Ok(Plan::Commit { chips: p.stack, label: "All-in" })
            }
        }
    }

    /// Shared checks for `Bet` and `RaiseTo`. A raise short of the minimum is only
    /// legal when it puts the player all-in.
    fn validate_raise(
        &self,
        p: &Player,
        seat: usize,
        total: u64,
        label: &'static str,
    ) -> Result<Plan, RuleViolation> {
        if !self.can_raise(seat) {
            return Err(RuleViolation::ReraiseClosed);
        }
        let min = self.min_raise_to();
        let too_small = || {
            if self.current_bet == 0 {
                RuleViolation::BetTooSmall { min, got: total }
            } else {
                RuleViolation::RaiseTooSmall { min, got: total }
            }
        };
        if total <= self.current_bet {
            return Err(too_small());
        }
        let chips = total - p.committed;
        if chips > p.stack {
            return Err(RuleViolation::InsufficientChips { needed: chips, available: p.stack });
        }
        if total < min && chips < p.stack {
            return Err(too_small());
        }
        Ok(Plan::Commit { chips, label })
    }

    fn execute(&mut self, players: &mut [Player], seat: usize, plan: Plan) {
        match plan {
            Plan::Fold => {
                players[seat].status = PlayerStatus::Folded;
                players[seat].last_action = Some("Fold".into());
            }
            Plan::Check => {
                players[seat].last_action = Some("Check".into());
            }
            Plan::Commit { chips, label } => {
                let p = &mut players[seat];
                p.commit(chips);
                let total = p.committed;
                p.last_action = Some(if label == "Call" {
                    format!("Call {chips}")
                } else {
                    format!("{label} {total}")
                });
                if total > self.current_bet {
                    self.raise_to(seat, total);
                }
            }
        }
        self.acted[seat] = true;
        debug!(
            "seat {seat} {}: bet {} min raise {}",
            players[seat].last_action.as_deref().unwrap_or("-"),
            self.current_bet,
            self.min_raise
        );
    }

    fn raise_to(&mut self, seat: usize, total: u64) {
        let increment = total - self.current_bet;
        if increment >= self.min_raise {
            // full raise: everyone else must act again and may re-raise
            self.min_raise = increment;
            self.acted.iter_mut().for_each(|a| *a = false);
            self.raise_closed.iter_mut().for_each(|c| *c = false);
        } else {
            // short all-in: players who already acted may only call or fold
            for (closed, acted) in self.raise_closed.iter_mut().zip(&self.acted) {
                if *acted {
                    *closed = true;
                }
            }
        }
        self.current_bet = total;
    }

    fn needs_action(&self, players: &[Player], seat: usize) -> bool {
        let p = &players[seat];
        p.is_active() && (!self.acted[seat] || p.committed < self.current_bet)
    }

    /// Work out the round status, searching for the next actor from `from` onwards.
    fn resolve(&mut self, players: &[Player], from: usize) -> RoundStatus {
        let mut in_hand = players.iter().filter(|p| p.in_hand());
        if let (Some(last), None) = (in_hand.next(), in_hand.next()) {
            self.to_act = None;
            return RoundStatus::Uncontested(last.id);
        }

        let mut active = players.iter().filter(|p| p.is_active());
        let lone_matched = match (active.next(), active.next()) {
            (None, _) => true,
            (Some(p), None) => p.committed >= self.current_bet,
            _ => false,
        };
        let n = players.len();
        let next = (0..n).map(|k| (from + k) % n).find(|&s| self.needs_action(players, s));
        match next {
            Some(seat) if !lone_matched => {
                self.to_act = Some(seat);
                RoundStatus::AwaitingAction(players[seat].id)
            }
            _ => {
                self.to_act = None;
                RoundStatus::Complete
            }
        }
    }
}
