//! Per-table stakes and seat limits, passed to each hand at construction.

/// Seats one deck can serve: 10 players use 20 hole cards plus 5 on the board.
pub const MAX_SEATS: usize = 10;
/// Fewest players a hand can be dealt to.
pub const MIN_SEATS: usize = 2;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("blinds must be positive (small {small}, big {big})")]
    ZeroBlind { small: u64, big: u64 },
    #[error("big blind {big} is smaller than small blind {small}")]
    BigBlindBelowSmall { small: u64, big: u64 },
    #[error("minimum players must be at least 2, got {0}")]
    MinPlayersTooLow(usize),
    #[error("maximum players must be at most 10, got {0}")]
    MaxPlayersTooHigh(usize),
    #[error("minimum players {min} exceeds maximum {max}")]
    PlayerLimitsInverted { min: usize, max: usize },
    #[error("{count} players exceed the table limit of {max}")]
    TooManyPlayers { count: usize, max: usize },
    #[error("player {0} has no chips")]
    EmptyStack(crate::player::PlayerId),
    #[error("player {0} is seated twice")]
    DuplicatePlayer(crate::player::PlayerId),
    #[error("dealer seat {dealer} out of range for {seats} seats")]
    DealerOutOfRange { dealer: usize, seats: usize },
}

/// Stakes and seat limits for one table.
///
/// ```
/// use holdem_core::config::TableConfig;
///
/// let cfg = TableConfig::new(5, 10);
/// assert!(cfg.validate().is_ok());
/// assert_eq!(cfg.escalated().big_blind, 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConfig {
    pub small_blind: u64,
    pub big_blind: u64,
    pub min_players: usize,
    pub max_players: usize,
}

impl TableConfig {
    pub fn new(small_blind: u64, big_blind: u64) -> Self {
        Self { small_blind, big_blind, min_players: MIN_SEATS, max_players: MAX_SEATS }
    }

    pub fn with_player_limits(mut self, min_players: usize, max_players: usize) -> Self {
        self.min_players = min_players;
        self.max_players = max_players;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (small, big) = (self.small_blind, self.big_blind);
        if small == 0 || big == 0 {
            return Err(ConfigError::ZeroBlind { small, big });
        }
        if big < small {
            return Err(ConfigError::BigBlindBelowSmall { small, big });
        }
        if self.min_players < MIN_SEATS {
            return Err(ConfigError::MinPlayersTooLow(self.min_players));
        }
        if self.max_players > MAX_SEATS {
            return Err(ConfigError::MaxPlayersTooHigh(self.max_players));
        }
        if self.min_players > self.max_players {
            return Err(ConfigError::PlayerLimitsInverted {
                min: self.min_players,
                max: self.max_players,
            });
        }
        Ok(())
    }

    /// The next blind level: both blinds doubled.
    pub fn escalated(&self) -> Self {
        Self {
            small_blind: self.small_blind.saturating_mul(2),
            big_blind: self.big_blind.saturating_mul(2),
            ..*self
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new(5, 10)
    }
}
