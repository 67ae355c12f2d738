use holdem_core::cards::Card;
use holdem_core::deck::Deck;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

const TRIALS: usize = 10_400;
const CARDS: usize = 52;

fn chi_square(observed: &[u32], expected: f64) -> f64 {
    observed.iter().map(|&o| (o as f64 - expected).powi(2) / expected).sum()
}

#[test]
fn every_card_lands_in_every_position_evenly() {
    let index: HashMap<Card, usize> =
        Deck::new().as_slice().iter().enumerate().map(|(i, &c)| (c, i)).collect();
    let mut counts = vec![[0u32; CARDS]; CARDS];
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for _ in 0..TRIALS {
        let mut deck = Deck::new();
        deck.shuffle_with(&mut rng);
        for (pos, card) in deck.as_slice().iter().enumerate() {
            counts[pos][index[card]] += 1;
        }
    }

    let expected = TRIALS as f64 / CARDS as f64;
    let mut total = 0.0;
    for (pos, row) in counts.iter().enumerate() {
        // 51 degrees of freedom; 125 is far beyond any plausible fluctuation
        let stat = chi_square(row, expected);
        assert!(stat < 125.0, "position {pos} is skewed: chi-square {stat:.1}");
        total += stat;
    }
    assert!(total < 3089.0, "aggregate chi-square {total:.1}");
}

#[test]
fn shuffles_are_distinct_and_complete() {
    let mut a = Deck::new();
    let mut b = Deck::new();
    a.shuffle_seeded(1);
    b.shuffle_seeded(2);
    assert_ne!(a.as_slice(), b.as_slice());

    let mut sorted = a.as_slice().to_vec();
    sorted.sort();
    let mut fresh = Deck::new().as_slice().to_vec();
    fresh.sort();
    assert_eq!(sorted, fresh);
}
