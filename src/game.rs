//! One hand of Texas Hold'em from blinds to settlement.
//!
//! [`Game`] sequences the betting rounds and board reveals, and settles the pots.
//! Actions arrive one at a time through [`Game::submit_action`]. Between actions
//! the game is idle, so the caller decides how it waits for players.

use crate::betting::{Action, BettingRound, BettingRoundState, RoundStatus, RuleViolation};
use crate::config::{ConfigError, TableConfig};
use crate::deck::Deck;
use crate::error::PokerError;
use crate::evaluator::{evaluate_holdem, HandRank};
use crate::events::GameEvent;
use crate::hand::Board;
use crate::player::{Player, PlayerId};
use crate::pot::{award_pots, build_pots, Contribution, Pot, PotAward, SettlementError};
use log::{debug, error, info, warn};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::PreFlop => "Pre-flop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
            Phase::Showdown => "Showdown",
            Phase::HandComplete => "Hand complete",
        }
    }

    /// The following betting street and how many board cards it reveals.
    fn next_street(self) -> Option<(Phase, usize)> {
        match self {
            Phase::PreFlop => Some((Phase::Flop, 3)),
            Phase::Flop => Some((Phase::Turn, 1)),
            Phase::Turn => Some((Phase::River, 1)),
            _ => None,
        }
    }

    /// Whether players can still act in this phase.
    pub fn is_betting(self) -> bool {
        self < Phase::Showdown
    }
}

/// Orchestrates a single hand. Owns the deck, the board and every player's chip
/// state until the hand completes.
#[derive(Debug, Clone)]
pub struct Game {
    config: TableConfig,
    deck: Deck,
    board: Board,
    players: Vec<Player>,
    dealer: usize,
    sb_seat: usize,
    bb_seat: usize,
    phase: Phase,
    round: BettingRound,
    awards: Vec<PotAward>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Deal a new hand with a freshly shuffled deck. `seats` lists players in seat
    /// order with their stacks; `dealer` is the button's seat index.
    pub fn new(
        config: TableConfig,
        seats: &[(PlayerId, u64)],
        dealer: usize,
    ) -> Result<Self, PokerError> {
        let mut deck = Deck::new();
        deck.shuffle();
        Self::with_deck(config, seats, dealer, deck)
    }

    /// Deal a new hand from `deck` as given, for replays and tests.
    pub fn with_deck(
        config: TableConfig,
        seats: &[(PlayerId, u64)],
        dealer: usize,
        deck: Deck,
    ) -> Result<Self, PokerError> {
        config.validate()?;
        if seats.len() < config.min_players {
            return Err(PokerError::InsufficientPlayers {
                needed: config.min_players,
                available: seats.len(),
            });
        }
        if seats.len() > config.max_players {
            return Err(ConfigError::TooManyPlayers {
                count: seats.len(),
                max: config.max_players,
            }
            .into());
        }
        let mut ids = HashSet::with_capacity(seats.len());
        for &(id, stack) in seats {
            if stack == 0 {
                return Err(ConfigError::EmptyStack(id).into());
            }
            if !ids.insert(id) {
                return Err(ConfigError::DuplicatePlayer(id).into());
            }
        }
        if dealer >= seats.len() {
            return Err(ConfigError::DealerOutOfRange { dealer, seats: seats.len() }.into());
        }

        let n = seats.len();
        // heads-up: the button posts the small blind
        let (sb_seat, bb_seat) =
            if n == 2 { (dealer, (dealer + 1) % n) } else { ((dealer + 1) % n, (dealer + 2) % n) };
        let mut game = Self {
            config,
            deck,
            board: Board::new(),
            players: seats.iter().map(|&(id, stack)| Player::new(id, stack)).collect(),
            dealer,
            sb_seat,
            bb_seat,
            phase: Phase::PreFlop,
            round: BettingRound::new(n, config.big_blind),
            awards: Vec::new(),
            events: Vec::new(),
        };
        game.start()?;
        Ok(game)
    }

    fn start(&mut self) -> Result<(), PokerError> {
        let n = self.players.len();
        let dealer_id = self.players[self.dealer].id;
        info!(
            "hand started: {n} players, dealer {dealer_id}, blinds {}/{}",
            self.config.small_blind, self.config.big_blind
        );
        self.events.push(GameEvent::HandStarted {
            dealer: dealer_id,
            players: self.players.iter().map(|p| p.id).collect(),
        });
        self.events.push(GameEvent::PhaseChanged { phase: Phase::PreFlop });

        for (seat, amount, label) in [
            (self.sb_seat, self.config.small_blind, "Small blind"),
            (self.bb_seat, self.config.big_blind, "Big blind"),
        ] {
            let paid = self.round.post_blind(&mut self.players, seat, amount);
            let player = &mut self.players[seat];
            player.last_action = Some(format!("{label} {paid}"));
            debug!("{} posts {label} {paid}", player.id);
            self.events.push(GameEvent::BlindPosted { player: player.id, amount: paid });
        }

        for k in 1..=n {
            let seat = (self.dealer + k) % n;
            let hole = self.deck.deal_hole_cards().map_err(|e| {
                error!("deck ran out dealing hole cards: {e}");
                e
            })?;
            self.players[seat].hole = Some(hole);
        }

        let first = if n == 2 { self.dealer } else { (self.dealer + 3) % n };
        let status = self.round.start(&self.players, first);
        self.advance(status)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn dealer_seat(&self) -> usize {
        self.dealer
    }

    pub fn small_blind_seat(&self) -> usize {
        self.sb_seat
    }

    pub fn big_blind_seat(&self) -> usize {
        self.bb_seat
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::HandComplete
    }

    /// The player whose action is awaited, if any.
    pub fn to_act(&self) -> Option<PlayerId> {
        self.round.to_act().map(|s| self.players[s].id)
    }

    /// Chips in the middle: everything contributed this hand until it is paid out.
    pub fn pot(&self) -> u64 {
        if self.is_complete() {
            return 0;
        }
        self.players.iter().map(|p| p.contributed).sum()
    }

    /// Main pot and side pots as they stand now; empty once they are paid out.
    pub fn pots(&self) -> Vec<Pot> {
        if self.is_complete() {
            return Vec::new();
        }
        build_pots(&self.contributions())
    }

    /// Pot results once the hand is complete.
    pub fn awards(&self) -> &[PotAward] {
        &self.awards
    }

    pub fn betting_state(&self) -> BettingRoundState {
        self.round.snapshot(&self.players)
    }

    pub fn current_bet(&self) -> u64 {
        self.round.current_bet()
    }

    /// Smallest legal `RaiseTo` (or `Bet`) total on this street.
    pub fn min_raise_to(&self) -> u64 {
        self.round.min_raise_to()
    }

    pub fn to_call(&self, id: PlayerId) -> Option<u64> {
        let seat = self.seat_of(id).ok()?;
        Some(self.round.to_call(&self.players, seat))
    }

    /// Whether `id` may still bet or raise on this street.
    pub fn can_raise(&self, id: PlayerId) -> bool {
        self.seat_of(id).map(|s| self.round.can_raise(s)).unwrap_or(false)
    }

    /// Stacks in seat order.
    pub fn stacks(&self) -> Vec<(PlayerId, u64)> {
        self.players.iter().map(|p| (p.id, p.stack)).collect()
    }

    /// Take every event queued since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply `action` for `player`. On a rule violation nothing changes and the
    /// player may try again.
    pub fn submit_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<BettingRoundState, PokerError> {
        let seat = self.seat_of(player)?;
        let status = match self.round.apply(&mut self.players, seat, action) {
            Ok(status) => status,
            Err(e) => {
                warn!("rejected {action:?} from {player}: {e}");
                return Err(e.into());
            }
        };
        self.events.push(GameEvent::ActionTaken { player, action });
        if matches!(action, Action::Fold) {
            self.events.push(GameEvent::PlayerFolded { player, forced: false });
        }
        self.advance(status)?;
        Ok(self.betting_state())
    }

    /// Fold `player` now, in or out of turn (disconnect). Chips already committed
    /// stay in the pot.
    pub fn force_fold(&mut self, player: PlayerId) -> Result<BettingRoundState, PokerError> {
        let seat = self.seat_of(player)?;
        let status = self.round.force_fold(&mut self.players, seat)?;
        warn!("{player} force-folded");
        self.events.push(GameEvent::PlayerFolded { player, forced: true });
        self.advance(status)?;
        Ok(self.betting_state())
    }

    /// Act for a player who ran out of time: check when that is legal, else fold.
    pub fn timeout_action(&mut self, player: PlayerId) -> Result<BettingRoundState, PokerError> {
        let seat = self.seat_of(player)?;
        let action =
            if self.round.to_call(&self.players, seat) == 0 { Action::Check } else { Action::Fold };
        warn!("{player} timed out; acting {action:?}");
        self.submit_action(player, action)
    }

    fn seat_of(&self, id: PlayerId) -> Result<usize, RuleViolation> {
        self.players.iter().position(|p| p.id == id).ok_or(RuleViolation::UnknownPlayer(id))
    }

    fn contributions(&self) -> Vec<Contribution> {
        self.players
            .iter()
            .enumerate()
            .map(|(seat, p)| Contribution { seat, amount: p.contributed, folded: !p.in_hand() })
            .collect()
    }

    /// Move on from `status`: deal further streets while no betting is possible and
    /// settle once the hand is decided.
    fn advance(&mut self, mut status: RoundStatus) -> Result<(), PokerError> {
        loop {
            match status {
                RoundStatus::AwaitingAction(id) => {
                    debug!("{}: waiting on {id}", self.phase.label());
                    return Ok(());
                }
                RoundStatus::Uncontested(id) => {
                    debug!("{id} wins uncontested");
                    return self.settle();
                }
                RoundStatus::Complete => {
                    let Some((next, count)) = self.phase.next_street() else {
                        return self.settle();
                    };
                    status = self.deal_street(next, count)?;
                }
            }
        }
    }

    fn deal_street(&mut self, phase: Phase, count: usize) -> Result<RoundStatus, PokerError> {
        let cards = self.deck.draw_many(count).map_err(|e| {
            error!("deck ran out dealing the {}: {e}", phase.label());
            e
        })?;
        for p in &mut self.players {
            p.reset_round();
        }
        self.phase = phase;
        self.board.extend(cards.iter().copied());
        debug!("{}: {}", phase.label(), self.board);
        self.events.push(GameEvent::PhaseChanged { phase });
        self.events.push(GameEvent::CommunityCardsRevealed { cards });

        let n = self.players.len();
        self.round = BettingRound::new(n, self.config.big_blind);
        Ok(self.round.start(&self.players, (self.dealer + 1) % n))
    }

    fn settle(&mut self) -> Result<(), PokerError> {
        let contested = self.players.iter().filter(|p| p.in_hand()).count() > 1;
        let mut hands: Vec<Option<HandRank>> = vec![None; self.players.len()];
        if contested {
            self.phase = Phase::Showdown;
            self.events.push(GameEvent::PhaseChanged { phase: Phase::Showdown });
            for (seat, p) in self.players.iter().enumerate() {
                if let (true, Some(hole)) = (p.in_hand(), p.hole.as_ref()) {
                    let eval = evaluate_holdem(hole, &self.board)?;
                    debug!("{} shows {hole}: {}", p.id, eval.rank);
                    hands[seat] = Some(eval.rank);
                }
            }
        }

        let awards = award_pots(&build_pots(&self.contributions()), &hands, self.dealer)?;
        let contributed = self.pot();
        let awarded: u64 = awards.iter().map(|a| a.amount).sum();
        if awarded != contributed {
            error!("pots pay out {awarded} of {contributed} chips");
            return Err(SettlementError::ChipsMismatch { contributed, awarded }.into());
        }
        for award in &awards {
            let split = award.winners.len() > 1;
            for (&seat, &share) in award.winners.iter().zip(&award.shares) {
                let p = &mut self.players[seat];
                p.award(share);
                p.last_action =
                    Some(if split { format!("Split {share}") } else { format!("Win {share}") });
            }
            let winners: Vec<PlayerId> =
                award.winners.iter().map(|&s| self.players[s].id).collect();
            info!(
                "pot {} ({} chips) to {}",
                award.pot_index,
                award.amount,
                winners.iter().map(|w| w.to_string()).collect::<Vec<_>>().join(", ")
            );
            self.events.push(GameEvent::PotAwarded {
                pot_index: award.pot_index,
                winners,
                amount: award.amount,
            });
        }
        self.awards = awards;

        for p in &mut self.players {
            p.reset_round();
        }
        self.phase = Phase::HandComplete;
        self.events.push(GameEvent::PhaseChanged { phase: Phase::HandComplete });
        self.events.push(GameEvent::HandComplete { stacks: self.stacks() });
        info!("hand complete");
        Ok(())
    }
}
