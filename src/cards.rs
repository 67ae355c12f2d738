//! Ranks, suits and cards, with the short text forms used in hand histories
//! (`"As"`, `"Td"`, `"10♣"`).

use std::fmt;
use std::str::FromStr;

/// Rank characters, indexed by [`Rank::index`].
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit letters and symbols, indexed by [`Suit::index`].
const SUIT_CHARS: [(char, char); 4] = [('h', '♥'), ('d', '♦'), ('c', '♣'), ('s', '♠')];

/// Card ranks from Two (low) to Ace (high). The discriminant is the pip value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks in ascending order.
    pub const ALL: [Rank; 13] = {
        use Rank::*;
        [Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace]
    };

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Zero-based position in [`Rank::ALL`]; Two is 0 and Ace is 12.
    pub const fn index(self) -> usize {
        self as usize - 2
    }

    /// Inverse of [`Rank::index`].
    pub fn from_index(index: usize) -> Option<Rank> {
        Rank::ALL.get(index).copied()
    }

    pub const fn to_char(self) -> char {
        RANK_CHARS[self.index()]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let upper = c.to_ascii_uppercase();
        RANK_CHARS
            .iter()
            .position(|&rc| rc == upper)
            .and_then(Rank::from_index)
            .ok_or_else(|| RankParseError::Invalid(c.to_string()))
    }
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some('1'), Some('0'), None) => Ok(Rank::Ten),
            (Some(c), None, _) => Rank::try_from(c),
            _ => Err(RankParseError::Invalid(s.to_string())),
        }
    }
}

/// The four suits. Suits never rank hands; the order only fixes the canonical
/// deck layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn to_char(self) -> char {
        SUIT_CHARS[self.index()].0
    }

    pub const fn symbol(self) -> char {
        SUIT_CHARS[self.index()].1
    }

    fn name(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let lower = c.to_ascii_lowercase();
        Suit::ALL
            .into_iter()
            .find(|s| s.to_char() == lower || s.symbol() == c)
            .ok_or_else(|| SuitParseError::Invalid(c.to_string()))
    }
}

impl FromStr for Suit {
    type Err = SuitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        Suit::ALL
            .into_iter()
            .find(|suit| suit.name().eq_ignore_ascii_case(t))
            .ok_or_else(|| SuitParseError::Invalid(s.to_string()))
    }
}

/// An immutable playing card. Equality is by (rank, suit).
///
/// ```
/// use holdem_core::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// assert_eq!("A♠".parse::<Card>().unwrap(), card);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        // the suit is the last char and may be a multi-byte symbol
        let (split, suit_ch) =
            t.char_indices().last().ok_or_else(|| CardParseError::Invalid(s.to_string()))?;
        if split == 0 {
            return Err(CardParseError::Invalid(s.to_string()));
        }
        Ok(Card::new(t[..split].parse()?, Suit::try_from(suit_ch)?))
    }
}

/// Parse multiple cards separated by whitespace or commas.
///
/// ```
/// use holdem_core::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd 10c").unwrap();
/// assert_eq!(cards[0], Card::new(Rank::Ace, Suit::Spades));
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_parses_as_letter_or_digits() {
        assert_eq!("T".parse::<Rank>(), Ok(Rank::Ten));
        assert_eq!("10".parse::<Rank>(), Ok(Rank::Ten));
        assert_eq!("t".parse::<Rank>(), Ok(Rank::Ten));
        for bad in ["1", "AK", "100", ""] {
            assert!(bad.parse::<Rank>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn pip_values_and_indices_line_up() {
        assert_eq!(Rank::Two.value(), 2);
        assert_eq!(Rank::Ace.value(), 14);
        for (i, r) in Rank::ALL.iter().enumerate() {
            assert_eq!(r.index(), i);
            assert_eq!(Rank::from_index(i), Some(*r));
            assert_eq!(Rank::try_from(r.to_char()), Ok(*r));
        }
        assert_eq!(Rank::from_index(13), None);
    }

    #[test]
    fn suit_accepts_letters_names_and_symbols() {
        assert_eq!("s".parse::<Suit>(), Ok(Suit::Spades));
        assert_eq!("Hearts".parse::<Suit>(), Ok(Suit::Hearts));
        assert_eq!("♦".parse::<Suit>(), Ok(Suit::Diamonds));
        assert_eq!("C".parse::<Suit>(), Ok(Suit::Clubs));
        assert!("x".parse::<Suit>().is_err());
        assert!("club".parse::<Suit>().is_err());
    }

    #[test]
    fn cards_parse_in_every_written_form() {
        let ten_clubs = Card::new(Rank::Ten, Suit::Clubs);
        for text in ["Tc", "10c", "10♣", "tC", " Tc "] {
            assert_eq!(text.parse::<Card>(), Ok(ten_clubs), "{text:?}");
        }
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).to_string(), "As");
        assert!("s".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
        assert!("Ax".parse::<Card>().is_err());
    }

    #[test]
    fn list_parsing_stops_at_first_bad_card() {
        assert_eq!(parse_cards("").unwrap(), vec![]);
        assert!(parse_cards("As Kd Zz").is_err());
    }
}
