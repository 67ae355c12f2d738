use crate::betting::RuleViolation;
use crate::config::ConfigError;
use crate::deck::DeckError;
use crate::evaluator::EvalError;
use crate::pot::SettlementError;

/// Errors surfaced by hand and table orchestration.
///
/// Only [`PokerError::RuleViolation`] is expected in normal play: the action was
/// rejected, nothing changed, and the caller may submit another one. The other
/// kinds point at a bug or bad setup upstream.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PokerError {
    #[error(transparent)]
    EmptyDeck(#[from] DeckError),
    #[error("rule violation: {0}")]
    RuleViolation(#[from] RuleViolation),
    #[error("need at least {needed} players with chips, have {available}")]
    InsufficientPlayers { needed: usize, available: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("showdown evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
    #[error("settlement failed: {0}")]
    Settlement(#[from] SettlementError),
    #[error("the current hand has not finished")]
    HandInProgress,
}

impl PokerError {
    /// Whether the caller can simply try another action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PokerError::RuleViolation(_))
    }
}
