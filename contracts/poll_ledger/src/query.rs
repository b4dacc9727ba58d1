#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, Env, Order, StdError, StdResult};
use cw_storage_plus::Bound;
use itertools::Itertools;

use poll_governance::poll_ledger::{Poll, PollStatusResponse, QueryMsg, VoterReceipt};
use poll_governance::tally::{tally, PollStats};
use poll_governance::{DEFAULT_LIMIT, MAX_LIMIT};

use crate::ballot::receipt_address;
use crate::error::ContractError;
use crate::registry::{load_poll, poll_address};
use crate::state::{AUTHORITY_POLLS, CONFIG, POLLS, POLL_VOTERS, RECEIPTS, VOTER_RECEIPTS};

/// Expose available contract queries.
///
/// ## Queries
/// * **QueryMsg::Config {}** Returns the contract configuration.
///
/// * **QueryMsg::Poll { address }** Returns a poll by its address.
///
/// * **QueryMsg::PollByTitle { authority, title }** Derives the poll address and returns the poll.
///
/// * **QueryMsg::Polls { start_after, limit }** Returns polls ordered by address.
///
/// * **QueryMsg::PollsByAuthority { authority, start_after, limit }** Returns polls of one authority.
///
/// * **QueryMsg::PollStatus { address }** Returns stored activity and liveness at the current block.
///
/// * **QueryMsg::Stats { address }** Returns the poll tally.
///
/// * **QueryMsg::Receipt { poll, voter }** Returns the voter's receipt for a poll if there is one.
///
/// * **QueryMsg::ReceiptByAddress { address }** Returns a receipt by its address.
///
/// * **QueryMsg::ReceiptsByVoter { voter, start_after, limit }** Returns receipts of one voter.
///
/// * **QueryMsg::PollVoters { poll, start_after, limit }** Returns receipts cast on a poll.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::Poll { address } => to_json_binary(&query_poll(deps, &address)?),
        QueryMsg::PollByTitle { authority, title } => {
            to_json_binary(&query_poll_by_title(deps, env, authority, title)?)
        }
        QueryMsg::Polls { start_after, limit } => {
            to_json_binary(&query_polls(deps, start_after, limit)?)
        }
        QueryMsg::PollsByAuthority {
            authority,
            start_after,
            limit,
        } => to_json_binary(&query_polls_by_authority(
            deps,
            authority,
            start_after,
            limit,
        )?),
        QueryMsg::PollStatus { address } => {
            let poll = query_poll(deps, &address)?;
            to_json_binary(&PollStatusResponse {
                is_active: poll.is_active,
                is_live: poll.is_live(env.block.time.seconds()),
                end_time: poll.end_time,
            })
        }
        QueryMsg::Stats { address } => to_json_binary(&query_stats(deps, &address)?),
        QueryMsg::Receipt { poll, voter } => {
            to_json_binary(&query_receipt(deps, env, poll, voter)?)
        }
        QueryMsg::ReceiptByAddress { address } => {
            to_json_binary(&RECEIPTS.load(deps.storage, &address.to_ascii_lowercase())?)
        }
        QueryMsg::ReceiptsByVoter {
            voter,
            start_after,
            limit,
        } => to_json_binary(&query_receipts_by_voter(deps, voter, start_after, limit)?),
        QueryMsg::PollVoters {
            poll,
            start_after,
            limit,
        } => to_json_binary(&query_poll_voters(deps, poll, start_after, limit)?),
    }
}

fn to_std_err(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        err => StdError::generic_err(err.to_string()),
    }
}

pub fn query_poll(deps: Deps, address: &str) -> StdResult<Poll> {
    load_poll(deps.storage, address).map_err(to_std_err)
}

/// Looks a poll up the same way creation addresses it: by authority and trimmed title.
pub fn query_poll_by_title(
    deps: Deps,
    env: Env,
    authority: String,
    title: String,
) -> StdResult<Poll> {
    let authority = deps.api.addr_validate(&authority)?;
    let (address, _) =
        poll_address(&env.contract.address, &authority, title.trim()).map_err(to_std_err)?;

    query_poll(deps, &address)
}

pub fn query_polls(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<Poll>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    POLLS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, poll)| poll))
        .collect()
}

/// Returns polls created by `authority` ordered by poll address.
pub fn query_polls_by_authority(
    deps: Deps,
    authority: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<Poll>> {
    let authority = deps.api.addr_validate(&authority)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    AUTHORITY_POLLS
        .prefix(&authority)
        .keys(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|address| POLLS.load(deps.storage, &address?))
        .collect()
}

pub fn query_stats(deps: Deps, address: &str) -> StdResult<PollStats> {
    tally(&query_poll(deps, address)?)
}

/// Returns `None` when the voter has not voted on the poll.
/// Fails if the poll does not exist.
pub fn query_receipt(
    deps: Deps,
    env: Env,
    poll: String,
    voter: String,
) -> StdResult<Option<VoterReceipt>> {
    let voter = deps.api.addr_validate(&voter)?;
    let poll = query_poll(deps, &poll)?;
    let (address, _) =
        receipt_address(&env.contract.address, &poll.address, &voter).map_err(to_std_err)?;

    RECEIPTS.may_load(deps.storage, &address)
}

/// Returns receipts held by `voter` ordered by poll address.
pub fn query_receipts_by_voter(
    deps: Deps,
    voter: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<VoterReceipt>> {
    let voter = deps.api.addr_validate(&voter)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.as_deref().map(Bound::exclusive);

    VOTER_RECEIPTS
        .prefix(&voter)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map_ok(|(_, receipt)| receipt)
        .map(|receipt| RECEIPTS.load(deps.storage, &receipt?))
        .collect()
}

/// Returns receipts cast on `poll` ordered by voter address.
pub fn query_poll_voters(
    deps: Deps,
    poll: String,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<Vec<VoterReceipt>> {
    let start_after = start_after
        .map(|voter| deps.api.addr_validate(&voter))
        .transpose()?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;

    POLL_VOTERS
        .prefix(&poll.to_ascii_lowercase())
        .range(
            deps.storage,
            start_after.as_ref().map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .map_ok(|(_, receipt)| receipt)
        .map(|receipt| RECEIPTS.load(deps.storage, &receipt?))
        .collect()
}
