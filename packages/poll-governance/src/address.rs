//! Deterministic storage addresses.
//!
//! An address is the SHA-256 digest of a namespace tag, an ordered list of seeds, a bump byte
//! and the id of the program that owns the record. The same inputs always produce the same
//! address, which is what makes "create at this address" usable as a uniqueness guard.

use cosmwasm_std::HexBinary;
use sha2::{Digest, Sha256};

/// Suffix mixed into every preimage so a derived address never equals a plain hash of the seeds
const DERIVATION_MARKER: &[u8] = b"PollLedgerDerivedAddress";

/// Digests with this bit set in the first byte belong to the keyed (signing) half of the
/// address space and are never handed out as derived addresses.
const KEYED_SPACE_MARK: u8 = 0x80;

/// Computes the address for a single `bump`.
/// Returns `None` if the digest falls into the keyed half of the address space.
pub fn create_address(
    program_id: &[u8],
    namespace: &[u8],
    seeds: &[&[u8]],
    bump: u8,
) -> Option<String> {
    let mut hasher = Sha256::new();

    // Every component is length-prefixed, so ("ab", "c") and ("a", "bc") never meet.
    hasher.update((namespace.len() as u64).to_be_bytes());
    hasher.update(namespace);
    for seed in seeds {
        hasher.update((seed.len() as u64).to_be_bytes());
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update((program_id.len() as u64).to_be_bytes());
    hasher.update(program_id);
    hasher.update(DERIVATION_MARKER);

    let digest = hasher.finalize();
    if digest[0] & KEYED_SPACE_MARK != 0 {
        return None;
    }

    Some(HexBinary::from(digest.as_slice()).to_hex())
}

/// Searches bumps from 255 down to 0 and returns the first valid address with its bump.
/// `None` means the whole bump range was exhausted.
pub fn find_address(program_id: &[u8], namespace: &[u8], seeds: &[&[u8]]) -> Option<(String, u8)> {
    (0..=u8::MAX)
        .rev()
        .find_map(|bump| create_address(program_id, namespace, seeds, bump).map(|addr| (addr, bump)))
}

/// Checks that `address` and `bump` are exactly what [`find_address`] yields for these inputs.
pub fn is_canonical_address(
    program_id: &[u8],
    namespace: &[u8],
    seeds: &[&[u8]],
    address: &str,
    bump: u8,
) -> bool {
    find_address(program_id, namespace, seeds)
        .map(|(derived, derived_bump)| derived == address && derived_bump == bump)
        .unwrap_or(false)
}
