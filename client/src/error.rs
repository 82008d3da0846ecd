//! Error taxonomy of the coordinator.
//!
//! An address with no record behind it is usually control flow here, not a
//! failure: an absent Master means "not initialized yet" and an absent or
//! unresolved round is simply skipped during history traversal. Those cases
//! travel as `Ok(None)`; the variants below are the ones callers actually
//! have to act on.

use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// The Master account does not exist yet; run `initialize` first.
    #[error("lottery master is not initialized")]
    NotInitialized,

    /// An account the current state says must exist is missing.
    #[error("no account found at {0}")]
    NotFound(Pubkey),

    /// The account exists but its discriminator or layout did not match.
    #[error("account data at {address} failed to decode: {reason}")]
    BadAccountData { address: Pubkey, reason: String },

    /// The ledger refused the submission — a precondition was violated,
    /// possibly concurrently (counter moved, wrong authority, double pick).
    #[error("transaction rejected: {0}")]
    TransactionRejected(String),

    /// The transaction was submitted but finality could not be observed
    /// within the polling budget.
    #[error("transaction {0} submitted but confirmation timed out")]
    ConfirmationTimeout(Signature),

    /// RPC transport failure.
    #[error("rpc transport error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, CoordinatorError>;
