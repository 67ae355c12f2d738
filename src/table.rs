//! A table session: stacks that persist across hands, the dealer button, and
//! blind levels.
//!
//! Each hand is a separate [`Game`]; the table only hands stacks in and takes
//! them back out, so several tables can run side by side without sharing state.

use crate::config::{ConfigError, TableConfig};
use crate::deck::Deck;
use crate::error::PokerError;
use crate::game::Game;
use crate::player::PlayerId;
use log::{info, warn};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    pub player: PlayerId,
    pub stack: u64,
}

#[derive(Debug, Clone)]
pub struct Table {
    config: TableConfig,
    seats: Vec<Seat>,
    /// Seat index of the button for the latest hand.
    button: Option<usize>,
    hands_played: u64,
    /// Hands per blind level; 0 keeps the blinds fixed.
    blind_level_hands: u64,
    in_progress: bool,
}

impl Table {
    pub fn new(config: TableConfig, players: &[(PlayerId, u64)]) -> Result<Self, PokerError> {
        config.validate()?;
        if players.len() > config.max_players {
            return Err(ConfigError::TooManyPlayers {
                count: players.len(),
                max: config.max_players,
            }
            .into());
        }
        let mut ids = HashSet::new();
        for &(id, stack) in players {
            if stack == 0 {
                return Err(ConfigError::EmptyStack(id).into());
            }
            if !ids.insert(id) {
                return Err(ConfigError::DuplicatePlayer(id).into());
            }
        }
        if players.len() < config.min_players {
            return Err(PokerError::InsufficientPlayers {
                needed: config.min_players,
                available: players.len(),
            });
        }
        Ok(Self {
            config,
            seats: players.iter().map(|&(player, stack)| Seat { player, stack }).collect(),
            button: None,
            hands_played: 0,
            blind_level_hands: 0,
            in_progress: false,
        })
    }

    /// Double the blinds every `hands` completed hands.
    pub fn with_blind_escalation(mut self, hands: u64) -> Self {
        self.blind_level_hands = hands;
        self
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn stack(&self, player: PlayerId) -> Option<u64> {
        self.seats.iter().find(|s| s.player == player).map(|s| s.stack)
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    /// Player holding the button in the latest hand.
    pub fn button(&self) -> Option<PlayerId> {
        self.button.map(|b| self.seats[b].player)
    }

    /// Players with chips, in seat order.
    pub fn funded_players(&self) -> Vec<PlayerId> {
        self.seats.iter().filter(|s| s.stack > 0).map(|s| s.player).collect()
    }

    /// Add chips to a seated player's stack between hands (rebuy).
    pub fn add_chips(&mut self, player: PlayerId, amount: u64) -> Result<(), PokerError> {
        if self.in_progress {
            return Err(PokerError::HandInProgress);
        }
        let seat = self
            .seats
            .iter_mut()
            .find(|s| s.player == player)
            .ok_or(crate::betting::RuleViolation::UnknownPlayer(player))?;
        seat.stack = seat.stack.saturating_add(amount);
        Ok(())
    }

    /// Move the button and deal a new hand to every player with chips.
    pub fn start_hand(&mut self) -> Result<Game, PokerError> {
        let mut deck = Deck::new();
        deck.shuffle();
        self.start_hand_with_deck(deck)
    }

    /// Like [`Table::start_hand`] with a caller-supplied deck.
    pub fn start_hand_with_deck(&mut self, deck: Deck) -> Result<Game, PokerError> {
        if self.in_progress {
            return Err(PokerError::HandInProgress);
        }
        let funded: Vec<usize> =
            (0..self.seats.len()).filter(|&i| self.seats[i].stack > 0).collect();
        if funded.len() < self.config.min_players {
            return Err(PokerError::InsufficientPlayers {
                needed: self.config.min_players,
                available: funded.len(),
            });
        }
        // next funded seat clockwise from the previous button
        let button = match self.button {
            None => funded[0],
            Some(prev) => funded.iter().copied().find(|&i| i > prev).unwrap_or(funded[0]),
        };
        let dealer = funded.iter().position(|&i| i == button).unwrap_or(0);
        let lineup: Vec<(PlayerId, u64)> =
            funded.iter().map(|&i| (self.seats[i].player, self.seats[i].stack)).collect();

        let game = Game::with_deck(self.config, &lineup, dealer, deck)?;
        self.button = Some(button);
        self.in_progress = true;
        Ok(game)
    }

    /// Take final stacks from a finished hand and bump the blind level when due.
    pub fn finish_hand(&mut self, game: &Game) -> Result<(), PokerError> {
        if !game.is_complete() {
            return Err(PokerError::HandInProgress);
        }
        for (player, stack) in game.stacks() {
            if let Some(seat) = self.seats.iter_mut().find(|s| s.player == player) {
                seat.stack = stack;
            }
        }
        self.in_progress = false;
        self.hands_played += 1;
        if self.blind_level_hands > 0 && self.hands_played % self.blind_level_hands == 0 {
            self.config = self.config.escalated();
            info!(
                "blinds up to {}/{} after {} hands",
                self.config.small_blind, self.config.big_blind, self.hands_played
            );
        }
        for seat in self.seats.iter().filter(|s| s.stack == 0) {
            info!("{} is out of chips", seat.player);
        }
        Ok(())
    }

    /// Give up on the running hand (fatal error, dropped `Game`). Stacks stay as
    /// they were before it was dealt; the button keeps its new position.
    pub fn abandon_hand(&mut self) {
        if self.in_progress {
            warn!("hand {} abandoned; stacks left as dealt", self.hands_played + 1);
            self.in_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::betting::Action;

    fn ids(n: u32) -> Vec<(PlayerId, u64)> {
        (0..n).map(|i| (PlayerId(i), 500)).collect()
    }

    fn fold_around(game: &mut Game) {
        while let Some(p) = game.to_act() {
            game.submit_action(p, Action::Fold).unwrap();
        }
    }

    #[test]
    fn button_moves_one_seat_per_hand() {
        let mut t = Table::new(TableConfig::new(5, 10), &ids(3)).unwrap();
        for expected in [0, 1, 2, 0] {
            let mut g = t.start_hand().unwrap();
            assert_eq!(t.button(), Some(PlayerId(expected)));
            fold_around(&mut g);
            t.finish_hand(&g).unwrap();
        }
        assert_eq!(t.hands_played(), 4);
        assert_eq!(t.seats().iter().map(|s| s.stack).sum::<u64>(), 1500);
    }

    #[test]
    fn busted_seats_are_skipped() {
        let mut t = Table::new(TableConfig::new(5, 10), &ids(4)).unwrap();
        t.seats[1].stack = 0;
        let mut g = t.start_hand().unwrap();
        assert_eq!(g.players().len(), 3);
        assert!(g.player(PlayerId(1)).is_none());
        assert_eq!(t.button(), Some(PlayerId(0)));
        fold_around(&mut g);
        t.finish_hand(&g).unwrap();
        t.start_hand().unwrap();
        assert_eq!(t.button(), Some(PlayerId(2)));
    }

    #[test]
    fn one_funded_player_cannot_start() {
        let mut t = Table::new(TableConfig::new(5, 10), &ids(2)).unwrap();
        t.seats[0].stack = 0;
        assert_eq!(
            t.start_hand().unwrap_err(),
            PokerError::InsufficientPlayers { needed: 2, available: 1 }
        );
    }

    #[test]
    fn hands_cannot_overlap() {
        let mut t = Table::new(TableConfig::new(5, 10), &ids(2)).unwrap();
        let g = t.start_hand().unwrap();
        assert_eq!(t.start_hand().unwrap_err(), PokerError::HandInProgress);
        assert_eq!(t.finish_hand(&g).unwrap_err(), PokerError::HandInProgress);
        assert_eq!(t.add_chips(PlayerId(0), 10).unwrap_err(), PokerError::HandInProgress);
    }

    #[test]
    fn failed_hand_can_be_abandoned() {
        let mut t = Table::new(TableConfig::new(5, 10), &ids(3)).unwrap();
        // six cards: enough for hole cards, not for the flop
        let mut deck = Deck::new();
        deck.draw_many(46).unwrap();
        let mut g = t.start_hand_with_deck(deck).unwrap();
        g.submit_action(PlayerId(0), Action::Call).unwrap();
        g.submit_action(PlayerId(1), Action::Call).unwrap();
        let err = g.submit_action(PlayerId(2), Action::Check).unwrap_err();
        assert!(matches!(err, PokerError::EmptyDeck(_)));
        assert!(!err.is_recoverable());

        assert_eq!(t.finish_hand(&g).unwrap_err(), PokerError::HandInProgress);
        assert_eq!(t.start_hand().unwrap_err(), PokerError::HandInProgress);
        t.abandon_hand();
        assert!(t.seats().iter().all(|s| s.stack == 500));
        assert_eq!(t.hands_played(), 0);
        t.start_hand().unwrap();
        assert_eq!(t.button(), Some(PlayerId(1)));
    }

    #[test]
    fn blinds_escalate_on_schedule() {
        let mut t = Table::new(TableConfig::new(5, 10), &ids(2)).unwrap().with_blind_escalation(2);
        for _ in 0..2 {
            let mut g = t.start_hand().unwrap();
            fold_around(&mut g);
            t.finish_hand(&g).unwrap();
        }
        assert_eq!((t.config().small_blind, t.config().big_blind), (10, 20));
    }

    #[test]
    fn construction_rejects_empty_stacks_and_crowds() {
        assert_eq!(
            Table::new(TableConfig::new(5, 10), &[(PlayerId(0), 10), (PlayerId(1), 0)])
                .unwrap_err(),
            PokerError::InvalidConfiguration(ConfigError::EmptyStack(PlayerId(1)))
        );
        assert!(matches!(
            Table::new(TableConfig::new(5, 10), &ids(11)),
            Err(PokerError::InvalidConfiguration(ConfigError::TooManyPlayers { .. }))
        ));
    }

    #[test]
    fn rebuy_between_hands() {
        let mut t = Table::new(TableConfig::new(5, 10), &ids(2)).unwrap();
        t.add_chips(PlayerId(1), 250).unwrap();
        assert_eq!(t.stack(PlayerId(1)), Some(750));
        assert!(t.add_chips(PlayerId(9), 1).is_err());
    }
}
