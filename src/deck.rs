use crate::cards::{Card, Rank, Suit};
use crate::hand::HoleCards;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DECK_SIZE: usize = 52;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("cannot draw {requested} card(s): {remaining} remaining")]
    EmptyDeck { requested: usize, remaining: usize },
    #[error("card {0} listed twice when stacking the deck")]
    DuplicateCard(Card),
}

/// A standard 52-card deck owned by one hand. Cards leave from the top (the end of
/// the vector) and are never put back.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build the deck in canonical order: suits in [`Suit::ALL`] order, ranks ascending.
    ///
    /// ```
    /// use holdem_core::deck::Deck;
    ///
    /// let deck = Deck::new();
    /// assert_eq!(deck.remaining(), 52);
    /// ```
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for &s in Suit::ALL.iter() {
            for &r in Rank::ALL.iter() {
                cards.push(Card::new(r, s));
            }
        }
        Self { cards }
    }

    /// Canonical deck with `top` moved to the top in draw order: `top[0]` is the
    /// first card drawn. Used to replay known hands.
    pub fn stacked(top: &[Card]) -> Result<Self, DeckError> {
        let mut cards = Self::new().cards;
        for (i, c) in top.iter().enumerate() {
            if top[..i].contains(c) {
                return Err(DeckError::DuplicateCard(*c));
            }
        }
        cards.retain(|c| !top.contains(c));
        cards.extend(top.iter().rev());
        Ok(Self { cards })
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still in the deck, bottom first.
    pub fn as_slice(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle with the thread-local CSPRNG (ChaCha, reseeded from the OS).
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    /// Shuffle using a seeded RNG for reproducibility. Not for live play.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.shuffle_with(&mut rng);
    }

    /// Fisher–Yates from the last index down to 1 with an unbiased index draw.
    pub fn shuffle_with<R: CryptoRng + ?Sized>(&mut self, rng: &mut R) {
        for i in (1..self.cards.len()).rev() {
            let j = uniform_index(rng, i + 1);
            self.cards.swap(i, j);
        }
    }

    /// Remove and return the top card.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::EmptyDeck { requested: 1, remaining: 0 })
    }

    /// Draw `n` cards in draw order. Fails without removing anything when fewer
    /// than `n` remain.
    pub fn draw_many(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        let remaining = self.cards.len();
        if n > remaining {
            return Err(DeckError::EmptyDeck { requested: n, remaining });
        }
        let mut drawn = self.cards.split_off(remaining - n);
        drawn.reverse();
        Ok(drawn)
    }

    /// Two cards for one player.
    pub fn deal_hole_cards(&mut self) -> Result<HoleCards, DeckError> {
        match self.draw_many(2)?.as_slice() {
            &[a, b] => Ok(HoleCards::from_distinct(a, b)),
            _ => Err(DeckError::EmptyDeck { requested: 2, remaining: self.cards.len() }),
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform integer in `[0, bound)` from 32-bit draws. Draws at or above the largest
/// multiple of `bound` that fits in 2^32 are rejected, so the modulo is exact.
pub(crate) fn uniform_index<R: RngCore + ?Sized>(rng: &mut R, bound: usize) -> usize {
    debug_assert!(bound > 0 && bound as u64 <= u32::MAX as u64);
    const RANGE: u64 = 1 << 32;
    let bound = bound as u64;
    let limit = RANGE - RANGE % bound;
    loop {
        let r = rng.next_u32() as u64;
        if r < limit {
            return (r % bound) as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use rand::RngCore;
    use std::collections::HashSet;

    /// Replays a fixed sequence of 32-bit words.
    struct Scripted {
        words: Vec<u32>,
        pos: usize,
    }

    impl RngCore for Scripted {
        fn next_u32(&mut self) -> u32 {
            let w = self.words[self.pos];
            self.pos += 1;
            w
        }
        fn next_u64(&mut self) -> u64 {
            self.next_u32() as u64
        }
        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for b in dst {
                *b = self.next_u32() as u8;
            }
        }
    }

    #[test]
    fn canonical_deck_has_52_distinct_cards() {
        let d = Deck::new();
        assert_eq!(d.remaining(), 52);
        let set: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(set.len(), 52);
        assert_eq!(d.as_slice()[0], Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(d.as_slice()[51], Card::new(Rank::Ace, Suit::Spades));
    }

    #[test]
    fn seeded_shuffle_is_reproducible_and_a_permutation() {
        let mut d1 = Deck::new();
        let mut d2 = Deck::new();
        d1.shuffle_seeded(42);
        d2.shuffle_seeded(42);
        assert_eq!(d1.cards, d2.cards);
        assert_ne!(d1.cards, Deck::new().cards);
        let set: HashSet<Card> = d1.as_slice().iter().copied().collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn uniform_index_rejects_biased_region() {
        // bound 3: limit = 2^32 - (2^32 % 3) = 4294967295, so u32::MAX is rejected
        let mut rng = Scripted { words: vec![u32::MAX, 7], pos: 0 };
        assert_eq!(uniform_index(&mut rng, 3), 1);
        assert_eq!(rng.pos, 2);
    }

    #[test]
    fn uniform_index_power_of_two_never_rejects() {
        let mut rng = Scripted { words: vec![u32::MAX], pos: 0 };
        assert_eq!(uniform_index(&mut rng, 4), 3);
    }

    #[test]
    fn draw_reduces_length_and_empty_deck_errors() {
        let mut d = Deck::new();
        d.shuffle_seeded(7);
        let c1 = d.draw().unwrap();
        let c2 = d.draw().unwrap();
        assert_ne!(c1, c2);
        assert_eq!(d.remaining(), 50);
        let rest = d.draw_many(50).unwrap();
        assert_eq!(rest.len(), 50);
        assert!(d.is_empty());
        assert_eq!(d.draw(), Err(DeckError::EmptyDeck { requested: 1, remaining: 0 }));
    }

    #[test]
    fn draw_many_matches_sequential_draws() {
        let mut a = Deck::new();
        let mut b = Deck::new();
        a.shuffle_seeded(9);
        b.shuffle_seeded(9);
        let many = a.draw_many(3).unwrap();
        let seq: Vec<Card> = (0..3).map(|_| b.draw().unwrap()).collect();
        assert_eq!(many, seq);
    }

    #[test]
    fn stacked_deck_draws_listed_cards_first() {
        let top = parse_cards("As Kd 7c").unwrap();
        let mut d = Deck::stacked(&top).unwrap();
        assert_eq!(d.remaining(), 52);
        assert_eq!(d.draw_many(3).unwrap(), top);
        let set: HashSet<Card> = d.as_slice().iter().copied().collect();
        assert_eq!(set.len(), 49);
        assert!(!set.contains(&top[0]));
        let dup = parse_cards("As As").unwrap();
        assert_eq!(Deck::stacked(&dup).unwrap_err(), DeckError::DuplicateCard(dup[0]));
    }

    #[test]
    fn hole_cards_come_off_the_top() {
        let top = parse_cards("Qh Jh").unwrap();
        let mut d = Deck::stacked(&top).unwrap();
        let hole = d.deal_hole_cards().unwrap();
        assert_eq!(hole.as_array(), [top[0], top[1]]);
        assert_eq!(d.remaining(), 50);
    }

    #[test]
    fn draw_many_is_atomic_on_failure() {
        let mut d = Deck::new();
        d.draw_many(50).unwrap();
        let err = d.draw_many(3).unwrap_err();
        assert_eq!(err, DeckError::EmptyDeck { requested: 3, remaining: 2 });
        assert_eq!(d.remaining(), 2);
    }
}
