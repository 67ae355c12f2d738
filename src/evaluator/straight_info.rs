use crate::cards::{Card, Rank};

const ACE_BIT: u16 = 1 << 12;
const RUN: u16 = 0b1_1111;

/// 13-bit rank-presence mask; bit `i` is set when a card of `Rank::ALL[i]` is present.
pub fn rank_mask<'a, I>(cards: I) -> u16
where
    I: IntoIterator<Item = &'a Card>,
{
    cards.into_iter().fold(0u16, |m, c| m | (1 << c.rank().index()))
}

/// Whether a mask holds five consecutive ranks, and the top of the highest such run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StraightInfo {
    pub top_rank: Option<Rank>,
}

impl StraightInfo {
    /// Scan for five consecutive set bits. The mask is shifted up one place and the Ace
    /// is also copied into bit 0 so A-2-3-4-5 is found, topping out at Five.
    pub fn from_mask(mask: u16) -> Self {
        let low_ace = u16::from(mask & ACE_BIT != 0);
        let extended = (mask << 1) | low_ace;
        // extended bit k holds Rank::ALL[k - 1]; a run topping at bit k covers k-4..=k
        let top_rank = (4..=13)
            .rev()
            .find(|&top| (extended >> (top - 4)) & RUN == RUN)
            .and_then(|top| Rank::from_index(top - 1));
        Self { top_rank }
    }

    #[cfg(test)]
    pub fn is_straight(&self) -> bool {
        self.top_rank.is_some()
    }
}
