use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use poll_governance::poll_ledger::{Config, Poll, VoterReceipt};

/// Stores the contract config.
pub const CONFIG: Item<Config> = Item::new("config");

/// Polls keyed by derived address. Records are never removed.
pub const POLLS: Map<&str, Poll> = Map::new("polls");

/// Authority scan: (authority, poll address)
pub const AUTHORITY_POLLS: Map<(&Addr, &str), ()> = Map::new("authority_polls");

/// Voter receipts keyed by the address derived from (poll, voter).
/// A receipt is never updated. It only disappears when the vote that created it is rolled back.
pub const RECEIPTS: Map<&str, VoterReceipt> = Map::new("receipts");

/// (voter, poll address) -> receipt address
pub const VOTER_RECEIPTS: Map<(&Addr, &str), String> = Map::new("voter_receipts");

/// (poll address, voter) -> receipt address
pub const POLL_VOTERS: Map<(&str, &Addr), String> = Map::new("poll_voters");
