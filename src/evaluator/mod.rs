pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;
pub(crate) mod rank_groups;
pub(crate) mod straight_info;
pub(crate) mod suit_info;

use crate::cards::{Card, Rank};
use crate::hand::{validate_holdem, Board, HandError, HoleCards};
use core::cmp::Ordering;
use core::fmt;
use std::collections::HashSet;

/// Fewest cards `evaluate` accepts.
pub const MIN_CARDS: usize = 5;
/// Most cards `evaluate` accepts (two hole cards plus a full board).
pub const MAX_CARDS: usize = 7;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparable hand strength: category first, then the tiebreak ranks
/// lexicographically. Equal values split the pot.
///
/// The derived ordering relies on field order; `category` must stay first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank {
    category: Category,
    tiebreak: Vec<Rank>,
}

impl HandRank {
    pub fn new(category: Category, tiebreak: Vec<Rank>) -> Self {
        Self { category, tiebreak }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Ranks that break ties within the category, most significant first.
    pub fn tiebreak(&self) -> &[Rank] {
        &self.tiebreak
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.category)?;
        for (i, r) in self.tiebreak.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{r}")?;
        }
        f.write_str("]")
    }
}

/// A ranked hand plus the five cards that make it. Ordering ignores the cards.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Evaluation {
    pub rank: HandRank,
    pub best_five: [Card; 5],
}

impl Evaluation {
    pub fn category(&self) -> Category {
        self.rank.category
    }
}

impl Ord for Evaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl PartialOrd for Evaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Evaluation {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Evaluation {}

/// Outcome of comparing hand A against hand B.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Showdown {
    AWins,
    BWins,
    Tie,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("invalid hand: {0}")]
    InvalidHand(#[from] HandError),
    #[error("expected 5 to 7 cards, got {0}")]
    CardCount(usize),
    #[error("duplicate card: {0}")]
    DuplicateCard(Card),
}

/// Rank exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> Evaluation {
    use detector::DETECTORS;
    use hand_analysis::HandAnalysis;

    let analysis = HandAnalysis::new(cards);
    for detector in DETECTORS.iter() {
        if let Some(tiebreak) = detector.tiebreak(&analysis) {
            return Evaluation {
                rank: HandRank::new(detector.category(), tiebreak),
                best_five: analysis.sorted_cards,
            };
        }
    }

    // HighCardDetector always matches; this only guards the fallthrough
    let ranks = analysis.sorted_cards.iter().map(|c| c.rank()).collect();
    Evaluation { rank: HandRank::new(Category::HighCard, ranks), best_five: analysis.sorted_cards }
}

/// Best five-card hand out of 5 to 7 distinct cards, found by ranking every
/// five-card subset.
///
/// ```
/// use holdem_core::cards::parse_cards;
/// use holdem_core::evaluator::{best_hand, Category};
///
/// let cards = parse_cards("As Ks Qs Js Ts 2d 2c").unwrap();
/// let eval = best_hand(&cards).unwrap();
/// assert_eq!(eval.category(), Category::RoyalFlush);
/// ```
pub fn best_hand(cards: &[Card]) -> Result<Evaluation, EvalError> {
    use combinations::Combinations5;

    if !(MIN_CARDS..=MAX_CARDS).contains(&cards.len()) {
        return Err(EvalError::CardCount(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    for &c in cards {
        if !seen.insert(c) {
            return Err(EvalError::DuplicateCard(c));
        }
    }

    let mut best: Option<Evaluation> = None;
    for idx in Combinations5::new(cards.len()) {
        let hand = [cards[idx[0]], cards[idx[1]], cards[idx[2]], cards[idx[3]], cards[idx[4]]];
        let eval = evaluate_five(&hand);
        if best.as_ref().map_or(true, |b| eval > *b) {
            best = Some(eval);
        }
    }
    best.ok_or(EvalError::CardCount(cards.len()))
}

/// Hand strength of 5 to 7 cards.
///
/// ```
/// use holdem_core::cards::{parse_cards, Rank};
/// use holdem_core::evaluator::{evaluate, Category};
///
/// let rank = evaluate(&parse_cards("Ah 2c 3d 4s 5h").unwrap()).unwrap();
/// assert_eq!(rank.category(), Category::Straight);
/// assert_eq!(rank.tiebreak(), &[Rank::Five]);
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandRank, EvalError> {
    best_hand(cards).map(|e| e.rank)
}

/// Evaluate hole cards against a board of 3 to 5 community cards.
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<Evaluation, EvalError> {
    validate_holdem(hole, board)?;
    let mut cards = Vec::with_capacity(MAX_CARDS);
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board.as_slice());
    best_hand(&cards)
}

/// Compare two ranked hands.
pub fn compare(a: &HandRank, b: &HandRank) -> Showdown {
    match a.cmp(b) {
        Ordering::Greater => Showdown::AWins,
        Ordering::Less => Showdown::BWins,
        Ordering::Equal => Showdown::Tie,
    }
}
