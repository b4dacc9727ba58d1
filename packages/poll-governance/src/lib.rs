pub mod address;
pub mod poll_ledger;
pub mod tally;

/// Default page size for list queries
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound on the page size for list queries
pub const MAX_LIMIT: u32 = 30;
