use crate::hand::HoleCards;
use std::fmt;

/// Stable identity of a seated player, independent of seat position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum PlayerStatus {
    /// Still holding cards and able to act.
    Active,
    Folded,
    /// Whole stack committed; holds cards but never acts again this hand.
    AllIn,
}

/// Chip state of one player for one hand. Only the stack survives the hand.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) stack: u64,
    /// Chips put in during the current betting round.
    pub(crate) committed: u64,
    /// Chips put in across every betting round of the hand.
    pub(crate) contributed: u64,
    pub(crate) status: PlayerStatus,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) last_action: Option<String>,
}

impl Player {
    pub fn new(id: PlayerId, stack: u64) -> Self {
        Self {
            id,
            stack,
            committed: 0,
            contributed: 0,
            status: PlayerStatus::Active,
            hole: None,
            last_action: None,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Chips committed in the current betting round.
    pub fn committed(&self) -> u64 {
        self.committed
    }

    /// Chips contributed to the pot this hand.
    pub fn contributed(&self) -> u64 {
        self.contributed
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    /// Short label of the player's latest action, for presentation layers.
    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, PlayerStatus::Active)
    }

    /// Still contesting the pot (active or all-in).
    pub fn in_hand(&self) -> bool {
        !matches!(self.status, PlayerStatus::Folded)
    }

    /// Move up to `amount` chips from the stack into the pot; returns what was paid.
    /// Emptying the stack puts the player all-in.
    pub(crate) fn commit(&mut self, amount: u64) -> u64 {
        let pay = self.stack.min(amount);
        self.stack -= pay;
        self.committed += pay;
        self.contributed += pay;
        if self.stack == 0 && self.in_hand() {
            self.status = PlayerStatus::AllIn;
        }
        pay
    }

    pub(crate) fn award(&mut self, amount: u64) {
        self.stack = self.stack.saturating_add(amount);
    }

    pub(crate) fn reset_round(&mut self) {
        self.committed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_caps_at_stack_and_goes_all_in() {
        let mut p = Player::new(PlayerId(1), 30);
        assert_eq!(p.commit(10), 10);
        assert_eq!((p.stack(), p.committed(), p.contributed()), (20, 10, 10));
        assert!(p.is_active());
        assert_eq!(p.commit(50), 20);
        assert_eq!(p.status(), PlayerStatus::AllIn);
        assert_eq!(p.contributed(), 30);
    }

    #[test]
    fn round_reset_keeps_hand_contribution() {
        let mut p = Player::new(PlayerId(2), 100);
        p.commit(40);
        p.reset_round();
        assert_eq!(p.committed(), 0);
        assert_eq!(p.contributed(), 40);
        p.award(15);
        assert_eq!(p.stack(), 75);
    }
}
