//! Decision sources: whatever picks actions for a seat (a person at a UI, a bot).
//!
//! The engine never asks who is behind a seat. It hands the seat's
//! [`TableView`] to a [`DecisionSource`] and validates what comes back like any
//! other submitted action.

use crate::betting::Action;
use crate::error::PokerError;
use crate::game::{Game, Phase};
use crate::hand::{Board, HoleCards};
use crate::player::PlayerId;
use log::warn;
use std::collections::VecDeque;

/// Rejected actions tolerated from one source in a row before it is folded.
pub const MAX_REJECTED_ACTIONS: usize = 3;

/// What one player may see when deciding.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TableView {
    pub player: PlayerId,
    pub phase: Phase,
    pub hole: Option<HoleCards>,
    pub board: Board,
    pub stack: u64,
    pub committed: u64,
    pub to_call: u64,
    pub current_bet: u64,
    pub min_raise_to: u64,
    pub can_raise: bool,
    pub pot: u64,
}

impl TableView {
    /// View of `game` for `player`, or `None` if the player is not seated.
    pub fn for_player(game: &Game, player: PlayerId) -> Option<Self> {
        let p = game.player(player)?;
        Some(Self {
            player,
            phase: game.phase(),
            hole: p.hole(),
            board: game.board().clone(),
            stack: p.stack(),
            committed: p.committed(),
            to_call: game.to_call(player)?,
            current_bet: game.current_bet(),
            min_raise_to: game.min_raise_to(),
            can_raise: game.can_raise(player),
            pot: game.pot(),
        })
    }
}

/// A seat controller. Returning `None` means no decision is available in time;
/// the caller then applies the timeout policy.
pub trait DecisionSource {
    fn decide(&mut self, view: &TableView) -> Option<Action>;
}

/// Actions queued by a front end (keyboard, network client) and replayed in order.
#[derive(Debug, Default, Clone)]
pub struct QueuedInput {
    pending: VecDeque<Action>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.pending.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl DecisionSource for QueuedInput {
    fn decide(&mut self, _view: &TableView) -> Option<Action> {
        self.pending.pop_front()
    }
}

/// Never bets: checks when free, otherwise calls, going all-in when short.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassiveSource;

impl DecisionSource for PassiveSource {
    fn decide(&mut self, view: &TableView) -> Option<Action> {
        Some(match view.to_call {
            0 => Action::Check,
            n if n >= view.stack => Action::AllIn,
            _ => Action::Call,
        })
    }
}

/// Ask `sources` (one per seat, in seat order) for actions until the hand ends.
///
/// A source with nothing to say times out. A source whose action keeps getting
/// rejected is folded after [`MAX_REJECTED_ACTIONS`] attempts.
pub fn drive_hand(
    game: &mut Game,
    sources: &mut [&mut dyn DecisionSource],
) -> Result<(), PokerError> {
    let mut rejected = 0;
    while let Some(player) = game.to_act() {
        let seat = game.players().iter().position(|p| p.id() == player).unwrap_or(usize::MAX);
        let view = TableView::for_player(game, player);
        let decision = match (sources.get_mut(seat), view) {
            (Some(source), Some(view)) => source.decide(&view),
            _ => None,
        };
        let Some(action) = decision else {
            game.timeout_action(player)?;
            rejected = 0;
            continue;
        };
        match game.submit_action(player, action) {
            Ok(_) => rejected = 0,
            Err(e) if e.is_recoverable() => {
                rejected += 1;
                if rejected >= MAX_REJECTED_ACTIONS {
                    warn!("{player} sent {rejected} illegal actions; folding");
                    game.submit_action(player, Action::Fold)?;
                    rejected = 0;
                }
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
