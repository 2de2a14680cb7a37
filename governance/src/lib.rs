//! Snapshot-weighted governance for the StakeVault protocol.
//!
//! Proposals are voted on with the share balance the voter held at the
//! proposal's creation height (transfers after creation cannot buy votes),
//! within a time-boxed window measured in blocks. Approval requires a strict
//! majority plus a minimum-participation quorum against the supply snapshot
//! taken at creation. Approved proposals execute exactly one arbitrary
//! external call — including calls back into the registry itself, which is
//! how the governance parameters are amended.

pub mod error;
pub mod params;
pub mod proposal;
pub mod registry;

pub use error::GovernanceError;
pub use params::{GovernanceParams, ParamCall};
pub use proposal::{Ballot, Proposal, ProposalStatus, VoteChoice};
pub use registry::{ApprovalStatus, GovernanceEvent, ProposalRegistry};
