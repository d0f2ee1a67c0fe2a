use crate::types::STARTING_SCORES;

/// Errors returned by game configuration and state transitions.
///
/// Every rejection is synchronous and leaves the game untouched; the caller
/// may re-issue a corrected request.
#[derive(thiserror::Error, Debug, Eq, PartialEq)]
pub enum GameError {
    #[error("unsupported starting score {0} (expected one of {STARTING_SCORES:?})")]
    InvalidStartingScore(u16),
    #[error("unsupported player count {0} (expected 1 or 2)")]
    InvalidPlayerCount(usize),
    #[error("the game is already won; reset to play again")]
    GameFinished,
}
