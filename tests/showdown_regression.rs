use holdem_core::evaluator::{compare, evaluate_holdem, Category, Showdown};
use holdem_core::hand::{Board, HoleCards};

fn showdown(board: &str, a: &str, b: &str) -> Showdown {
    let board: Board = board.parse().expect("valid board");
    let a: HoleCards = a.parse().expect("valid hole cards");
    let b: HoleCards = b.parse().expect("valid hole cards");
    let ea = evaluate_holdem(&a, &board).unwrap();
    let eb = evaluate_holdem(&b, &board).unwrap();
    compare(&ea.rank, &eb.rank)
}

#[test]
fn pair_beats_lower_pair() {
    assert_eq!(showdown("Ac 9d 4s 2h 6c", "Ks Kh", "Qc Qh"), Showdown::AWins);
}

#[test]
fn pair_kicker_breaks_ties() {
    // both pair kings; ace kicker beats queen
    assert_eq!(showdown("Kc 9d 4s 2h 6c", "Ks Ad", "Kh Qd"), Showdown::AWins);
}

#[test]
fn two_pair_ordering_high_then_low() {
    assert_eq!(showdown("Kc 9d 4s 2h Ac", "Ks 9c", "Kh 2d"), Showdown::AWins);
}

#[test]
fn trips_order_by_trip_rank() {
    assert_eq!(showdown("Qc 7d 3s 2h 9c", "7s 7h", "Qs Qd"), Showdown::BWins);
}

#[test]
fn board_plays_for_both() {
    assert_eq!(showdown("As Ks Qs Js Ts", "2c 3d", "4h 5c"), Showdown::Tie);
}

#[test]
fn counterfeited_pocket_pair_ties() {
    // 99 55 K on board beats the pocket deuces' two pair
    assert_eq!(showdown("9c 9d 5s 5h Kd", "2c 2d", "3c 4d"), Showdown::Tie);
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let board: Board = "Ac 2d 3h 4s Kc".parse().unwrap();
    let wheel = evaluate_holdem(&"5d 9h".parse().unwrap(), &board).unwrap();
    assert_eq!(wheel.category(), Category::Straight);
    assert_eq!(showdown("Ac 2d 3h 4s Kc", "5d 9h", "5c 6h"), Showdown::BWins);
}

#[test]
fn flop_only_board_is_evaluated() {
    let board: Board = "Ah Kh 2h".parse().unwrap();
    let eval = evaluate_holdem(&"Qh 3h".parse().unwrap(), &board).unwrap();
    assert_eq!(eval.category(), Category::Flush);
}
