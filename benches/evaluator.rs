use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use holdem_core::agents::{drive_hand, DecisionSource, PassiveSource};
use holdem_core::cards::{parse_cards, Card};
use holdem_core::config::TableConfig;
use holdem_core::deck::Deck;
use holdem_core::evaluator::{best_hand, evaluate_five};
use holdem_core::game::Game;
use holdem_core::player::PlayerId;
use holdem_core::pot::{build_pots, Contribution};

fn five(s: &str) -> [Card; 5] {
    let cards = parse_cards(s).expect("valid cards");
    [cards[0], cards[1], cards[2], cards[3], cards[4]]
}

fn bench_evaluate_five(c: &mut Criterion) {
    let mut g = c.benchmark_group("evaluate_five");
    for (name, hand) in [
        ("high_card", "Ah Kd 7s 5c 2d"),
        ("full_house", "Qs Qh Qd 4c 4s"),
        ("royal_flush", "As Ks Qs Js Ts"),
    ] {
        let cards = five(hand);
        g.bench_with_input(BenchmarkId::new(name, hand), &cards, |b, input| {
            b.iter(|| evaluate_five(black_box(input)))
        });
    }
    g.finish();
}

fn bench_best_of_seven(c: &mut Criterion) {
    let seven = parse_cards("As Ah Ks Qs Js Ts 9s").expect("valid cards");
    c.bench_function("best_hand/7", |b| b.iter(|| best_hand(black_box(&seven))));
}

fn bench_side_pots(c: &mut Criterion) {
    let contributions: Vec<Contribution> = (0..10)
        .map(|seat| Contribution { seat, amount: 50 * (seat as u64 + 1), folded: seat % 3 == 0 })
        .collect();
    c.bench_function("build_pots/10", |b| b.iter(|| build_pots(black_box(&contributions))));
}

fn bench_passive_hand(c: &mut Criterion) {
    let seats: Vec<_> = (0..6).map(|i| (PlayerId(i), 1000)).collect();
    c.bench_function("hand/6_passive", |b| {
        b.iter(|| {
            let mut deck = Deck::new();
            deck.shuffle_seeded(black_box(9));
            let mut game =
                Game::with_deck(TableConfig::new(5, 10), &seats, 0, deck).expect("valid game");
            let mut sources: Vec<PassiveSource> = (0..6).map(|_| PassiveSource).collect();
            let mut refs: Vec<&mut dyn DecisionSource> =
                sources.iter_mut().map(|s| s as &mut dyn DecisionSource).collect();
            drive_hand(&mut game, &mut refs).expect("hand completes");
            game
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate_five,
    bench_best_of_seven,
    bench_side_pots,
    bench_passive_hand
);
criterion_main!(benches);
