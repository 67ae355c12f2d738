use super::hand_analysis::HandAnalysis;
use crate::cards::Rank;
use crate::evaluator::Category;

/// Strategy pattern: each detector recognises one category and, when it matches,
/// produces that category's tiebreak sequence (most significant rank first).
pub trait CategoryDetector: Sync {
    fn category(&self) -> Category;
    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>>;
}

// ============================================================================
// Detector Implementations (in priority order: highest to lowest)
// ============================================================================

/// Royal Flush: Ten through Ace, all one suit
pub struct RoyalFlushDetector;

impl CategoryDetector for RoyalFlushDetector {
    fn category(&self) -> Category {
        Category::RoyalFlush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        match analysis.straight_flush_top() {
            Some(Rank::Ace) => Some(vec![Rank::Ace]),
            _ => None,
        }
    }
}

/// Straight Flush: five consecutive ranks, all one suit
pub struct StraightFlushDetector;

impl CategoryDetector for StraightFlushDetector {
    fn category(&self) -> Category {
        Category::StraightFlush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        analysis.straight_flush_top().map(|top| vec![top])
    }
}

/// Four of a Kind: exactly one rank held four times
pub struct FourOfAKindDetector;

impl CategoryDetector for FourOfAKindDetector {
    fn category(&self) -> Category {
        Category::FourOfAKind
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        let quad = analysis.rank_groups.quad()?;
        let kicker = *analysis.rank_groups.ranks_excluding(&[quad]).first()?;
        Some(vec![quad, kicker])
    }
}

/// Full House: trips plus a different rank held at least twice
pub struct FullHouseDetector;

impl CategoryDetector for FullHouseDetector {
    fn category(&self) -> Category {
        Category::FullHouse
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        analysis.rank_groups.full_house().map(|(set, pair)| vec![set, pair])
    }
}

/// Flush: five cards of one suit
pub struct FlushDetector;

impl CategoryDetector for FlushDetector {
    fn category(&self) -> Category {
        Category::Flush
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        analysis.flush_ranks(5)
    }
}

/// Straight: five consecutive ranks, Ace high or low
pub struct StraightDetector;

impl CategoryDetector for StraightDetector {
    fn category(&self) -> Category {
        Category::Straight
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        analysis.straight.top_rank.map(|top| vec![top])
    }
}

/// Three of a Kind: one rank three times, no other rank paired
pub struct ThreeOfAKindDetector;

impl CategoryDetector for ThreeOfAKindDetector {
    fn category(&self) -> Category {
        Category::ThreeOfAKind
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        let groups = &analysis.rank_groups;
        let trips = groups.trips();
        if trips.len() != 1 || !groups.pairs().is_empty() || groups.quad().is_some() {
            return None;
        }
        let mut tiebreak = vec![trips[0]];
        tiebreak.extend(groups.ranks_excluding(&trips).into_iter().take(2));
        Some(tiebreak)
    }
}

/// Two Pair: two distinct ranks each held twice
pub struct TwoPairDetector;

impl CategoryDetector for TwoPairDetector {
    fn category(&self) -> Category {
        Category::TwoPair
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        let groups = &analysis.rank_groups;
        let pairs = groups.pairs();
        if pairs.len() < 2 || !groups.trips().is_empty() {
            return None;
        }
        let (high, low) = (pairs[0], pairs[1]);
        let kicker = *groups.ranks_excluding(&[high, low]).first()?;
        Some(vec![high, low, kicker])
    }
}

/// One Pair: exactly one rank held twice, nothing else repeated
pub struct OnePairDetector;

impl CategoryDetector for OnePairDetector {
    fn category(&self) -> Category {
        Category::OnePair
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        let groups = &analysis.rank_groups;
        let pairs = groups.pairs();
        if pairs.len() != 1 || !groups.trips().is_empty() || groups.quad().is_some() {
            return None;
        }
        let mut tiebreak = vec![pairs[0]];
        tiebreak.extend(groups.ranks_excluding(&pairs).into_iter().take(3));
        Some(tiebreak)
    }
}

/// High Card: fallback, always matches
pub struct HighCardDetector;

impl CategoryDetector for HighCardDetector {
    fn category(&self) -> Category {
        Category::HighCard
    }

    fn tiebreak(&self, analysis: &HandAnalysis) -> Option<Vec<Rank>> {
        Some(analysis.rank_groups.ranks_excluding(&[]).into_iter().take(5).collect())
    }
}

/// All detectors, strongest category first. The first match wins.
pub static DETECTORS: [&dyn CategoryDetector; 10] = [
    &RoyalFlushDetector,
    &StraightFlushDetector,
    &FourOfAKindDetector,
    &FullHouseDetector,
    &FlushDetector,
    &StraightDetector,
    &ThreeOfAKindDetector,
    &TwoPairDetector,
    &OnePairDetector,
    &HighCardDetector,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Card};

    fn analyze(s: &str) -> HandAnalysis {
        let v: Vec<Card> = parse_cards(s).unwrap();
        HandAnalysis::new(&[v[0], v[1], v[2], v[3], v[4]])
    }

    #[test]
    fn detectors_are_ordered_strongest_first() {
        for pair in DETECTORS.windows(2) {
            assert!(pair[0].category() > pair[1].category());
        }
    }

    #[test]
    fn trips_detector_rejects_full_house() {
        let a = analyze("2h 2d 2c 3s 3h");
        assert_eq!(ThreeOfAKindDetector.tiebreak(&a), None);
        assert_eq!(FullHouseDetector.tiebreak(&a), Some(vec![Rank::Two, Rank::Three]));
    }

    #[test]
    fn pair_detector_rejects_two_pair() {
        let a = analyze("Jc Jd 9c 9h 2s");
        assert_eq!(OnePairDetector.tiebreak(&a), None);
        assert_eq!(TwoPairDetector.tiebreak(&a), Some(vec![Rank::Jack, Rank::Nine, Rank::Two]));
    }

    #[test]
    fn straight_flush_is_not_royal_unless_ace_high() {
        let a = analyze("9s Ks Qs Js Ts");
        assert_eq!(RoyalFlushDetector.tiebreak(&a), None);
        assert_eq!(StraightFlushDetector.tiebreak(&a), Some(vec![Rank::King]));
    }

    #[test]
    fn high_card_lists_all_five() {
        let a = analyze("Ah Kd 7s 5c 2d");
        assert_eq!(
            HighCardDetector.tiebreak(&a),
            Some(vec![Rank::Ace, Rank::King, Rank::Seven, Rank::Five, Rank::Two])
        );
    }
}
