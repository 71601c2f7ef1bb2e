use thiserror::Error;

/// Battle setup and session state errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("not enough municipalities to compare (need at least 2, got {count})")]
    NotEnoughItems { count: usize },

    #[error("no comparison is awaiting a decision")]
    NoPendingComparison,

    #[error("battle is not finished yet ({remaining} merge steps remaining)")]
    NotFinished { remaining: usize },
}
