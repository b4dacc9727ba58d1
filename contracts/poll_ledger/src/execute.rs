#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{attr, ensure, to_json_binary, DepsMut, Env, MessageInfo, Response};
use cw_utils::nonpayable;

use poll_governance::poll_ledger::ExecuteMsg;

use crate::error::ContractError;
use crate::instantiate::validate_max_duration;
use crate::state::CONFIG;
use crate::{ballot, registry};

/// Exposes all the execute functions available in the contract.
///
/// ## Execute messages
/// * **ExecuteMsg::CreatePoll { title, description, options, duration_seconds }** Creates a poll
/// owned by the sender.
///
/// * **ExecuteMsg::CastVote { poll, option_index }** Casts the sender's vote on a poll.
///
/// * **ExecuteMsg::ClosePoll { poll }** Closes a poll. Only the poll authority may call it.
///
/// * **ExecuteMsg::UpdateConfig { owner, max_poll_duration }** Updates the contract configuration.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;

    match msg {
        ExecuteMsg::CreatePoll {
            title,
            description,
            options,
            duration_seconds,
        } => create_poll(
            deps,
            env,
            info,
            title,
            description,
            options,
            duration_seconds,
        ),
        ExecuteMsg::CastVote { poll, option_index } => {
            cast_vote(deps, env, info, poll, option_index)
        }
        ExecuteMsg::ClosePoll { poll } => close_poll(deps, env, info, poll),
        ExecuteMsg::UpdateConfig {
            owner,
            max_poll_duration,
        } => update_config(deps, info, owner, max_poll_duration),
    }
}

/// Creates a new active poll. The poll address is returned in the response data.
pub fn create_poll(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    title: String,
    description: String,
    options: Vec<String>,
    duration_seconds: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let poll = registry::create_poll(
        deps.storage,
        &env.contract.address,
        &config,
        info.sender,
        &title,
        &description,
        &options,
        duration_seconds,
        env.block.time.seconds(),
    )?;

    Ok(Response::new()
        .set_data(to_json_binary(&poll.address)?)
        .add_attributes([
            attr("action", "create_poll"),
            attr("poll", &poll.address),
            attr("authority", &poll.authority),
            attr("options", poll.options.len().to_string()),
            attr("end_time", poll.end_time.to_string()),
        ]))
}

/// Casts the sender's vote on a poll.
pub fn cast_vote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    poll: String,
    option_index: u32,
) -> Result<Response, ContractError> {
    let (receipt, poll) = ballot::cast_vote(
        deps.storage,
        &env.contract.address,
        &poll,
        info.sender,
        option_index,
        env.block.time.seconds(),
    )?;

    Ok(Response::new().add_attributes([
        attr("action", "cast_vote"),
        attr("poll", poll.address),
        attr("voter", receipt.voter),
        attr("receipt", receipt.address),
        attr("option_index", option_index.to_string()),
        attr("total_votes", poll.total_votes.to_string()),
    ]))
}

/// Closes a poll. Repeated calls succeed without changing anything.
pub fn close_poll(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    poll: String,
) -> Result<Response, ContractError> {
    let (poll, closed) = registry::close_poll(deps.storage, &poll, &info.sender)?;

    let mut attrs = vec![attr("action", "close_poll"), attr("poll", poll.address)];
    if closed {
        attrs.push(attr("closed_at", env.block.time.seconds().to_string()));
    } else {
        attrs.push(attr("already_closed", "true"));
    }

    Ok(Response::new().add_attributes(attrs))
}

/// Updates contract parameters.
///
/// * **owner** new contract owner.
///
/// * **max_poll_duration** new upper bound on poll duration in seconds.
pub fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    owner: Option<String>,
    max_poll_duration: Option<u64>,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;

    ensure!(info.sender == config.owner, ContractError::Unauthorized {});

    let mut attrs = vec![attr("action", "update_config")];

    if let Some(owner) = owner {
        config.owner = deps.api.addr_validate(&owner)?;
        attrs.push(attr("new_owner", owner));
    }

    if let Some(max_poll_duration) = max_poll_duration {
        validate_max_duration(max_poll_duration)?;
        config.max_poll_duration = max_poll_duration;
        attrs.push(attr("new_max_poll_duration", max_poll_duration.to_string()));
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(attrs))
}
