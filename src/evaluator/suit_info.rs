use crate::cards::{Card, Suit};

/// Per-suit card counts and rank masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitInfo {
    pub counts: [u8; 4],
    pub masks: [u16; 4],
}

impl SuitInfo {
    pub fn from_cards(cards: &[Card]) -> Self {
        let mut counts = [0u8; 4];
        let mut masks = [0u16; 4];
        for c in cards {
            let s = c.suit().index();
            counts[s] += 1;
            masks[s] |= 1 << c.rank().index();
        }
        Self { counts, masks }
    }

    /// A suit with five or more cards. At most one exists among seven cards.
    pub fn flush_suit(&self) -> Option<Suit> {
        Suit::ALL.iter().copied().find(|s| self.counts[s.index()] >= 5)
    }

    /// Rank mask of the flush suit.
    pub fn flush_mask(&self) -> Option<u16> {
        self.flush_suit().map(|s| self.masks[s.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn detects_flush_suit() {
        let cards = parse_cards("As Ks Qs Js 9s").unwrap();
        let info = SuitInfo::from_cards(&cards);
        assert_eq!(info.flush_suit(), Some(Suit::Spades));
        assert_eq!(info.counts[Suit::Spades.index()], 5);
    }

    #[test]
    fn four_suited_is_not_a_flush() {
        let cards = parse_cards("As Kh Qs Js 9s").unwrap();
        let info = SuitInfo::from_cards(&cards);
        assert_eq!(info.flush_suit(), None);
        assert_eq!(info.flush_mask(), None);
    }
}
