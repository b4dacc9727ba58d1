#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{attr, ensure, DepsMut, Env, MessageInfo, Response};
use cw2::set_contract_version;

use poll_governance::poll_ledger::{Config, InstantiateMsg, POLL_DURATION_LIMITS};

use crate::error::ContractError;
use crate::state::CONFIG;

/// Contract name that is used for migration.
pub const CONTRACT_NAME: &str = env!("CARGO_PKG_NAME");
/// Contract version that is used for migration.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a new contract with the specified parameters in the [`InstantiateMsg`].
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    validate_max_duration(msg.max_poll_duration)?;

    let config = Config {
        owner: deps.api.addr_validate(&msg.owner)?,
        max_poll_duration: msg.max_poll_duration,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes([
        attr("action", "instantiate_poll_ledger"),
        attr("owner", config.owner),
        attr("max_poll_duration", config.max_poll_duration.to_string()),
    ]))
}

pub(crate) fn validate_max_duration(max_poll_duration: u64) -> Result<(), ContractError> {
    ensure!(
        POLL_DURATION_LIMITS.contains(&max_poll_duration),
        ContractError::InvalidMaxDuration {
            min: *POLL_DURATION_LIMITS.start(),
            max: *POLL_DURATION_LIMITS.end(),
        }
    );

    Ok(())
}
