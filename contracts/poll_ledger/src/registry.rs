use cosmwasm_std::{ensure, Addr, StdError, Storage, Uint64};

use poll_governance::address::find_address;
use poll_governance::poll_ledger::helpers::{calc_end_time, validate_poll_content};
use poll_governance::poll_ledger::{Config, Poll, POLL_NAMESPACE};

use crate::error::ContractError;
use crate::state::{AUTHORITY_POLLS, POLLS};

/// Derives the poll address from its authority and trimmed title.
/// One authority can hold only one poll per title.
pub fn poll_address(
    program: &Addr,
    authority: &Addr,
    title: &str,
) -> Result<(String, u8), ContractError> {
    find_address(
        program.as_bytes(),
        POLL_NAMESPACE,
        &[authority.as_bytes(), title.as_bytes()],
    )
    .ok_or(ContractError::AddressSpaceExhausted {})
}

/// Loads a poll by address. Hex addresses are matched case-insensitively.
pub fn load_poll(storage: &dyn Storage, address: &str) -> Result<Poll, ContractError> {
    POLLS
        .may_load(storage, &address.to_ascii_lowercase())?
        .ok_or_else(|| ContractError::PollNotFound {
            address: address.to_string(),
        })
}

/// Validates the request and stores a new active poll.
#[allow(clippy::too_many_arguments)]
pub fn create_poll(
    storage: &mut dyn Storage,
    program: &Addr,
    config: &Config,
    authority: Addr,
    title: &str,
    description: &str,
    options: &[String],
    duration_seconds: u64,
    now: u64,
) -> Result<Poll, ContractError> {
    let content = validate_poll_content(title, description, options)?;
    let end_time = calc_end_time(now, duration_seconds, config.max_poll_duration)?;

    let (address, bump) = poll_address(program, &authority, &content.title)?;

    let poll = Poll {
        address: address.clone(),
        bump,
        authority,
        title: content.title,
        description: content.description,
        option_counts: vec![0; content.options.len()],
        options: content.options,
        total_votes: 0,
        created_at: now,
        end_time,
        is_active: true,
    };

    let poll = POLLS.update(storage, &address, |existing| match existing {
        Some(_) => Err(ContractError::DuplicatePollAddress {
            address: address.clone(),
        }),
        None => Ok(poll),
    })?;
    AUTHORITY_POLLS.save(storage, (&poll.authority, poll.address.as_str()), &())?;

    Ok(poll)
}

/// Deactivates a poll. Returns the poll and whether this call changed it.
/// Closing an inactive poll is a no-op.
pub fn close_poll(
    storage: &mut dyn Storage,
    address: &str,
    caller: &Addr,
) -> Result<(Poll, bool), ContractError> {
    let mut poll = load_poll(storage, address)?;

    ensure!(poll.authority == *caller, ContractError::Unauthorized {});

    if !poll.is_active {
        return Ok((poll, false));
    }

    poll.is_active = false;
    POLLS.save(storage, &poll.address, &poll)?;

    Ok((poll, true))
}

/// Adds one vote for `option_index`. Counter and total are written in a single save.
pub fn record_vote(
    storage: &mut dyn Storage,
    mut poll: Poll,
    option_index: u32,
) -> Result<Poll, ContractError> {
    ensure!(poll.is_active, ContractError::VoteEnded {});

    let index = option_index as usize;
    ensure!(
        index < poll.options.len(),
        ContractError::InvalidOption {
            index: option_index,
            options: poll.options.len(),
        }
    );

    let option_count = poll.option_counts.get(index).copied().ok_or_else(|| {
        StdError::generic_err(format!("Poll {} has no counter {index}", poll.address))
    })?;

    let option_count = Uint64::from(option_count).checked_add(Uint64::one())?;
    let total_votes = Uint64::from(poll.total_votes).checked_add(Uint64::one())?;

    poll.option_counts[index] = option_count.u64();
    poll.total_votes = total_votes.u64();

    POLLS.save(storage, &poll.address, &poll)?;

    Ok(poll)
}
