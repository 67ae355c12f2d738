//! Outbound notifications for presentation and logging layers.
//!
//! A [`Game`](crate::game::Game) queues events as the hand progresses; callers
//! take them with [`Game::drain_events`](crate::game::Game::drain_events).

use crate::betting::Action;
use crate::cards::Card;
use crate::game::Phase;
use crate::player::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum GameEvent {
    HandStarted { dealer: PlayerId, players: Vec<PlayerId> },
    BlindPosted { player: PlayerId, amount: u64 },
    ActionTaken { player: PlayerId, action: Action },
    PlayerFolded { player: PlayerId, forced: bool },
    PhaseChanged { phase: Phase },
    /// Cards added to the board on this street.
    CommunityCardsRevealed { cards: Vec<Card> },
    PotAwarded { pot_index: usize, winners: Vec<PlayerId>, amount: u64 },
    /// Final stacks in seat order.
    HandComplete { stacks: Vec<(PlayerId, u64)> },
}
