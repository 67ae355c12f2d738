//! holdem-core: rules and settlement for Texas Hold'em
//!
//! Goals:
//! - Unbiased shuffling from a cryptographically secure source
//! - Exact hand ranking with full tiebreaks over any 5 to 7 cards
//! - Betting rounds, side pots and odd-chip splits that always conserve chips
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! Who decides what a player does is not this crate's concern: actions come in
//! through [`game::Game::submit_action`], usually via an
//! [`agents::DecisionSource`].
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_core::evaluator::{evaluate_holdem, Category};
//! use holdem_core::hand::{Board, HoleCards};
//!
//! let hole: HoleCards = "As Ah".parse().unwrap();
//! let board: Board = "Kc Qd Jh 3s 2c".parse().unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category(), Category::OnePair);
//! ```
//!
//! ## Playing a hand
//! ```
//! use holdem_core::betting::Action;
//! use holdem_core::config::TableConfig;
//! use holdem_core::game::{Game, Phase};
//! use holdem_core::player::PlayerId;
//!
//! let seats = [(PlayerId(1), 1000), (PlayerId(2), 1000), (PlayerId(3), 1000)];
//! let mut game = Game::new(TableConfig::new(5, 10), &seats, 0).unwrap();
//!
//! // seat 0 is the button; the blinds are seats 1 and 2, so seat 0 acts first
//! game.submit_action(PlayerId(1), Action::Call).unwrap();
//! game.submit_action(PlayerId(2), Action::Call).unwrap();
//! game.submit_action(PlayerId(3), Action::Check).unwrap();
//! assert_eq!(game.phase(), Phase::Flop);
//! assert_eq!(game.board().len(), 3);
//! ```

pub mod agents;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod error;
pub mod evaluator;
pub mod events;
pub mod game;
pub mod hand;
pub mod player;
pub mod pot;
pub mod table;

pub use error::PokerError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
