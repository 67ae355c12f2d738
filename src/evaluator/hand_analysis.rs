use super::rank_groups::RankGroups;
use super::straight_info::{rank_mask, StraightInfo};
use super::suit_info::SuitInfo;
use crate::cards::{Card, Rank};

/// Everything the category detectors need about one five-card candidate.
/// Built once per combination and shared by all detectors.
#[derive(Debug, Clone)]
pub struct HandAnalysis {
    /// Cards sorted by rank descending, then suit descending.
    pub sorted_cards: [Card; 5],
    /// Occurrences per rank, indexed by [`Rank::index`].
    #[allow(dead_code)]
    pub rank_counts: [u8; 13],
    #[allow(dead_code)]
    pub rank_mask: u16,
    pub rank_groups: RankGroups,
    pub suit_info: SuitInfo,
    pub straight: StraightInfo,
}

impl HandAnalysis {
    pub fn new(cards: &[Card; 5]) -> Self {
        let mut sorted_cards = *cards;
        sorted_cards.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));

        let mut rank_counts = [0u8; 13];
        for c in cards {
            rank_counts[c.rank().index()] += 1;
        }

        let mask = rank_mask(cards);
        Self {
            sorted_cards,
            rank_counts,
            rank_mask: mask,
            rank_groups: RankGroups::from_counts(&rank_counts),
            suit_info: SuitInfo::from_cards(cards),
            straight: StraightInfo::from_mask(mask),
        }
    }

    /// Top of a straight formed entirely inside the flush suit.
    pub fn straight_flush_top(&self) -> Option<Rank> {
        self.suit_info.flush_mask().and_then(|m| StraightInfo::from_mask(m).top_rank)
    }

    /// The highest `n` ranks of the flush suit, descending.
    pub fn flush_ranks(&self, n: usize) -> Option<Vec<Rank>> {
        let mask = self.suit_info.flush_mask()?;
        let ranks =
            Rank::ALL.iter().rev().copied().filter(|r| mask & (1 << r.index()) != 0).take(n);
        Some(ranks.collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn five(s: &str) -> [Card; 5] {
        let v = parse_cards(s).unwrap();
        [v[0], v[1], v[2], v[3], v[4]]
    }

    #[test]
    fn royal_flush_analysis() {
        let a = HandAnalysis::new(&five("Ts Js Qs Ks As"));
        assert_eq!(a.straight_flush_top(), Some(Rank::Ace));
        assert_eq!(a.sorted_cards[0].rank(), Rank::Ace);
        assert!(a.rank_groups.all_distinct());
    }

    #[test]
    fn counts_are_multiplicities_not_presence() {
        let a = HandAnalysis::new(&five("7c 7d 7h 7s 2c"));
        assert_eq!(a.rank_counts[Rank::Seven.index()], 4);
        assert_eq!(a.rank_counts[Rank::Two.index()], 1);
        assert_eq!(a.rank_mask.count_ones(), 2);
        assert_eq!(a.rank_groups.quad(), Some(Rank::Seven));
    }

    #[test]
    fn flush_ranks_descending() {
        let a = HandAnalysis::new(&five("2h 9h Ah 5h Jh"));
        assert_eq!(
            a.flush_ranks(5),
            Some(vec![Rank::Ace, Rank::Jack, Rank::Nine, Rank::Five, Rank::Two])
        );
        assert_eq!(a.straight_flush_top(), None);
    }
}
