use cosmwasm_std::{OverflowError, StdError};
use cw_utils::PaymentError;
use thiserror::Error;

use poll_governance::poll_ledger::InputError;

/// This enum describes poll ledger contract errors
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    PaymentError(#[from] PaymentError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Poll already exists at {address}")]
    DuplicatePollAddress { address: String },

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Voting period ended!")]
    VoteEnded {},

    #[error("Option {index} does not exist, poll has {options} options")]
    InvalidOption { index: u32, options: usize },

    #[error("User already voted!")]
    AlreadyVoted {},

    #[error("No valid address can be derived from the given seeds")]
    AddressSpaceExhausted {},

    #[error("Poll {address} not found")]
    PollNotFound { address: String },

    #[error("Max poll duration must be within [{min}, {max}] seconds")]
    InvalidMaxDuration { min: u64, max: u64 },

    #[error("Contract can't be migrated!")]
    MigrationError {},
}

impl ContractError {
    /// Operational faults should page an operator; everything else is a rejected request.
    pub fn is_operational(&self) -> bool {
        matches!(self, ContractError::AddressSpaceExhausted {})
    }
}

impl From<OverflowError> for ContractError {
    fn from(o: OverflowError) -> Self {
        StdError::from(o).into()
    }
}
