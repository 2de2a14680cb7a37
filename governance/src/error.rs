use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(u64),

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("voting period has ended for this proposal")]
    VotingClosed,

    #[error("voting is still active for this proposal")]
    VotingStillActive,

    #[error("proposal has expired and can no longer be executed")]
    ProposalExpired,

    #[error("proposal has already been executed")]
    AlreadyExecuted,

    #[error("proposal was not approved by majority vote")]
    NotApproved,

    #[error("minimum participation was not reached")]
    InsufficientParticipation,

    #[error("proposal execution failed: {0}")]
    ExecutionFailed(String),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("{0}")]
    Other(String),
}
