use thiserror::Error;

/// Failure of an asset-token operation at the collaborator boundary.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("insufficient asset balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },

    #[error("transfer rejected: {0}")]
    Rejected(String),
}
