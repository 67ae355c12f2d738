//! Hole cards and the community board.

use crate::cards::{parse_cards, Card, CardParseError};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Most community cards a Hold'em board ever shows.
pub const MAX_BOARD: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("expected exactly two hole cards, got {0}")]
    HoleCount(usize),
    #[error("a board holds at most 5 cards, got {0}")]
    TooManyBoardCards(usize),
    #[error("{0} appears more than once")]
    DuplicateCard(Card),
    #[error(transparent)]
    Parse(#[from] CardParseError),
}

/// First card that repeats in `cards`, if any.
fn first_repeat<'a>(cards: impl IntoIterator<Item = &'a Card>) -> Option<Card> {
    let mut seen = HashSet::with_capacity(MAX_BOARD + 2);
    cards.into_iter().copied().find(|c| !seen.insert(*c))
}

/// A player's two private cards.
///
/// ```
/// use holdem_core::hand::HoleCards;
///
/// let hole: HoleCards = "As Ks".parse().unwrap();
/// assert_eq!(hole.to_string(), "As Ks");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoleCards {
    cards: [Card; 2],
}

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        if a == b {
            return Err(HandError::DuplicateCard(a));
        }
        Ok(Self { cards: [a, b] })
    }

    /// For cards already known to differ, such as two draws from one deck.
    pub(crate) fn from_distinct(a: Card, b: Card) -> Self {
        debug_assert_ne!(a, b);
        Self { cards: [a, b] }
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match *slice {
            [a, b] => Self::try_new(a, b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.cards[0]
    }

    pub fn second(&self) -> Card {
        self.cards[1]
    }

    pub fn as_array(&self) -> [Card; 2] {
        self.cards
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.cards[0], self.cards[1])
    }
}

impl FromStr for HoleCards {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&parse_cards(s)?)
    }
}

/// The shared community cards, revealed 3/1/1 across flop, turn and river.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(MAX_BOARD) }
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > MAX_BOARD {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        if let Some(dup) = first_repeat(&cards) {
            return Err(HandError::DuplicateCard(dup));
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Whether the river is out.
    pub fn is_complete(&self) -> bool {
        self.cards.len() == MAX_BOARD
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_new(parse_cards(s)?)
    }
}

/// Check that hole cards and board form a legal Hold'em state: at most five board
/// cards and no card appearing twice anywhere.
pub fn validate_holdem(hole: &HoleCards, board: &Board) -> Result<(), HandError> {
    if board.len() > MAX_BOARD {
        return Err(HandError::TooManyBoardCards(board.len()));
    }
    match first_repeat(hole.cards.iter().chain(board.as_slice())) {
        Some(dup) => Err(HandError::DuplicateCard(dup)),
        None => Ok(()),
    }
}
