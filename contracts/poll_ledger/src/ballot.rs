use cosmwasm_std::{ensure, Addr, Storage};

use poll_governance::address::find_address;
use poll_governance::poll_ledger::{Poll, VoterReceipt, VOTER_NAMESPACE};

use crate::error::ContractError;
use crate::registry::{load_poll, record_vote};
use crate::state::{POLL_VOTERS, RECEIPTS, VOTER_RECEIPTS};

/// Derives the receipt address for a (poll, voter) pair.
/// This address is the only double-vote guard: a second receipt can never be created there.
pub fn receipt_address(
    program: &Addr,
    poll: &str,
    voter: &Addr,
) -> Result<(String, u8), ContractError> {
    find_address(
        program.as_bytes(),
        VOTER_NAMESPACE,
        &[poll.as_bytes(), voter.as_bytes()],
    )
    .ok_or(ContractError::AddressSpaceExhausted {})
}

/// Casts `voter`'s single vote on a poll.
///
/// Checks run in a fixed order so the reported error is reproducible:
/// the poll must be live, the option must exist, and the voter must not hold a receipt yet.
/// Either both the receipt and the counter update are stored or neither is.
pub fn cast_vote(
    storage: &mut dyn Storage,
    program: &Addr,
    poll: &str,
    voter: Addr,
    option_index: u32,
    now: u64,
) -> Result<(VoterReceipt, Poll), ContractError> {
    let poll = load_poll(storage, poll)?;

    ensure!(poll.is_live(now), ContractError::VoteEnded {});
    ensure!(
        (option_index as usize) < poll.options.len(),
        ContractError::InvalidOption {
            index: option_index,
            options: poll.options.len(),
        }
    );

    let (address, bump) = receipt_address(program, &poll.address, &voter)?;

    let receipt = RECEIPTS.update(storage, &address, |existing| match existing {
        Some(_) => Err(ContractError::AlreadyVoted {}),
        None => Ok(VoterReceipt {
            address: address.clone(),
            bump,
            poll: poll.address.clone(),
            voter,
            option_index,
            cast_at: now,
        }),
    })?;

    let poll = match record_vote(storage, poll, option_index) {
        Ok(poll) => poll,
        Err(err) => {
            RECEIPTS.remove(storage, &address);
            return Err(err);
        }
    };

    VOTER_RECEIPTS.save(storage, (&receipt.voter, poll.address.as_str()), &address)?;
    POLL_VOTERS.save(storage, (poll.address.as_str(), &receipt.voter), &address)?;

    Ok((receipt, poll))
}
