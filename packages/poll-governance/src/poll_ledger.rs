use std::ops::RangeInclusive;

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;
use thiserror::Error;

use crate::tally::PollStats;

/// Namespace tag mixed into poll addresses
pub const POLL_NAMESPACE: &[u8] = b"poll";
/// Namespace tag mixed into voter receipt addresses
pub const VOTER_NAMESPACE: &[u8] = b"voter";

/// Poll validation attributes. Lengths are measured in UTF-16 code units after trimming.
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESC_LENGTH: usize = 500;
pub const MAX_OPTION_LENGTH: usize = 50;
pub const OPTIONS_COUNT_LIMITS: RangeInclusive<usize> = 2..=10;

/// Allowed values for the configured maximum poll duration: from 1 hour to 365 days
pub const POLL_DURATION_LIMITS: RangeInclusive<u64> = 3600..=365 * 86400;

/// This structure holds the parameters used for creating a poll ledger contract.
#[cw_serde]
pub struct InstantiateMsg {
    /// Address allowed to update the contract configuration
    pub owner: String,
    /// Longest voting window (in seconds) a new poll may request
    pub max_poll_duration: u64,
}

/// This enum describes all execute functions available in the contract.
#[cw_serde]
pub enum ExecuteMsg {
    /// Create a new poll owned by the sender. The poll is open for `duration_seconds`
    /// starting from the current block time.
    CreatePoll {
        title: String,
        description: String,
        options: Vec<String>,
        duration_seconds: u64,
    },
    /// Cast the sender's single vote on a poll
    CastVote {
        /// Poll address
        poll: String,
        /// Zero-based index into the poll options
        option_index: u32,
    },
    /// Close a poll before (or after) its end time.
    /// ## Executor
    /// Only the poll authority can execute this.
    ClosePoll {
        /// Poll address
        poll: String,
    },
    /// Update contract configuration.
    /// ## Executor
    /// Only the owner can execute this.
    UpdateConfig {
        owner: Option<String>,
        max_poll_duration: Option<u64>,
    },
}

/// This enum describes all the queries available in the contract.
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Return the contract's configuration
    #[returns(Config)]
    Config {},
    /// Return a poll by its address
    #[returns(Poll)]
    Poll { address: String },
    /// Return the poll an authority created with the given title
    #[returns(Poll)]
    PollByTitle { authority: String, title: String },
    /// Return polls ordered by address
    #[returns(Vec<Poll>)]
    Polls {
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Return polls created by a specific authority ordered by address
    #[returns(Vec<Poll>)]
    PollsByAuthority {
        authority: String,
        /// Poll address
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Return stored activity and point-in-time liveness of a poll
    #[returns(PollStatusResponse)]
    PollStatus { address: String },
    /// Return the tally of a poll
    #[returns(PollStats)]
    Stats { address: String },
    /// Return the receipt a voter holds for a poll, if any
    #[returns(Option<VoterReceipt>)]
    Receipt { poll: String, voter: String },
    /// Return a receipt by its address
    #[returns(VoterReceipt)]
    ReceiptByAddress { address: String },
    /// Return receipts held by a voter across polls, ordered by poll address
    #[returns(Vec<VoterReceipt>)]
    ReceiptsByVoter {
        voter: String,
        /// Poll address
        start_after: Option<String>,
        limit: Option<u32>,
    },
    /// Return receipts cast on a poll, ordered by voter
    #[returns(Vec<VoterReceipt>)]
    PollVoters {
        poll: String,
        /// Voter address
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

/// This structure describes a migration message.
#[cw_serde]
pub struct MigrateMsg {}

/// This structure stores general parameters for the poll ledger contract.
#[cw_serde]
pub struct Config {
    /// Address allowed to update the configuration
    pub owner: Addr,
    /// Longest voting window (in seconds) a new poll may request
    pub max_poll_duration: u64,
}

/// This structure stores data for a poll.
#[cw_serde]
pub struct Poll {
    /// Derived address of the poll
    pub address: String,
    /// Bump used when the address was derived
    pub bump: u8,
    /// The poll creator. Only this address can close the poll
    pub authority: Addr,
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
    /// Votes per option, aligned with `options`
    pub option_counts: Vec<u64>,
    /// Always equal to the sum of `option_counts`
    pub total_votes: u64,
    pub created_at: u64,
    pub end_time: u64,
    /// Cleared by an explicit close and never set again
    pub is_active: bool,
}

impl Poll {
    /// Whether the poll accepts votes at `now`.
    /// A poll past its end time keeps `is_active == true` in storage until it is closed.
    pub fn is_live(&self, now: u64) -> bool {
        self.is_active && now < self.end_time
    }
}

/// This structure stores a voter's consumed right to vote on one poll.
#[cw_serde]
pub struct VoterReceipt {
    /// Derived from the poll address and the voter
    pub address: String,
    pub bump: u8,
    /// Poll address
    pub poll: String,
    pub voter: Addr,
    pub option_index: u32,
    pub cast_at: u64,
}

/// This structure describes the response to a poll status query.
#[cw_serde]
pub struct PollStatusResponse {
    /// Stored flag, only cleared by an explicit close
    pub is_active: bool,
    /// Whether the poll accepts votes at the current block time
    pub is_live: bool,
    pub end_time: u64,
}

/// Reasons a poll creation request is rejected
#[derive(Error, Debug, PartialEq)]
pub enum InputError {
    #[error("Title is empty")]
    EmptyTitle {},

    #[error("Title exceeds {max} characters")]
    TitleTooLong { max: usize },

    #[error("Description exceeds {max} characters")]
    DescriptionTooLong { max: usize },

    #[error(
        "Poll must have from {} to {} options, got {count}",
        OPTIONS_COUNT_LIMITS.start(),
        OPTIONS_COUNT_LIMITS.end()
    )]
    OptionsCount { count: usize },

    #[error("Option {index} is empty")]
    EmptyOption { index: usize },

    #[error("Option {index} exceeds {max} characters")]
    OptionTooLong { index: usize, max: usize },

    #[error("Poll duration must be positive")]
    ZeroDuration {},

    #[error("Poll duration exceeds {max} seconds")]
    DurationTooLong { max: u64 },

    #[error("Poll end time overflows")]
    EndTimeOverflow {},
}

pub mod helpers {
    use super::*;

    /// Normalized poll text ready to be stored
    #[derive(Debug, PartialEq)]
    pub struct PollContent {
        pub title: String,
        pub description: String,
        pub options: Vec<String>,
    }

    /// Text length in UTF-16 code units, the unit clients count in.
    pub fn text_length(text: &str) -> usize {
        text.encode_utf16().count()
    }

    /// Trims and validates poll text. Returns the trimmed values.
    pub fn validate_poll_content(
        title: &str,
        description: &str,
        options: &[String],
    ) -> Result<PollContent, InputError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(InputError::EmptyTitle {});
        }
        if text_length(title) > MAX_TITLE_LENGTH {
            return Err(InputError::TitleTooLong {
                max: MAX_TITLE_LENGTH,
            });
        }

        let description = description.trim();
        if text_length(description) > MAX_DESC_LENGTH {
            return Err(InputError::DescriptionTooLong {
                max: MAX_DESC_LENGTH,
            });
        }

        if !OPTIONS_COUNT_LIMITS.contains(&options.len()) {
            return Err(InputError::OptionsCount {
                count: options.len(),
            });
        }

        let options = options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let option = option.trim();
                if option.is_empty() {
                    Err(InputError::EmptyOption { index })
                } else if text_length(option) > MAX_OPTION_LENGTH {
                    Err(InputError::OptionTooLong {
                        index,
                        max: MAX_OPTION_LENGTH,
                    })
                } else {
                    Ok(option.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PollContent {
            title: title.to_string(),
            description: description.to_string(),
            options,
        })
    }

    /// Validates the requested duration and returns the poll end time.
    pub fn calc_end_time(now: u64, duration: u64, max_duration: u64) -> Result<u64, InputError> {
        if duration == 0 {
            return Err(InputError::ZeroDuration {});
        }
        if duration > max_duration {
            return Err(InputError::DurationTooLong { max: max_duration });
        }

        now.checked_add(duration)
            .ok_or(InputError::EndTimeOverflow {})
    }
}
