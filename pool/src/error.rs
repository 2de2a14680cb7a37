use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("insufficient shares: have {available}, need {needed}")]
    InsufficientShares { needed: u128, available: u128 },

    #[error("asset transfer failed: {0}")]
    TransferFailed(String),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("{0}")]
    Other(String),
}
