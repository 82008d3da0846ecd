//! Instruction builders for the five lifecycle operations.
//!
//! Each builder is a pure constructor: it derives the PDA addresses the
//! on-chain handler will check, lists the account metas in the order the
//! handler declares them, and encodes the Anchor instruction data
//! (8-byte method discriminator followed by Borsh arguments). Nothing here
//! touches the network.

mod buy_ticket;
mod claim_prize;
mod create_lottery;
mod initialize_master;
mod pick_winner;

pub use buy_ticket::buy_ticket;
pub use claim_prize::claim_prize;
pub use create_lottery::create_lottery;
pub use initialize_master::initialize_master;
pub use pick_winner::pick_winner;

use solana_sdk::hash::hash;

/// Anchor global instruction discriminator: `sha256("global:<name>")[..8]`.
pub(crate) fn sighash(name: &str) -> [u8; 8] {
    let preimage = format!("global:{name}");
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..8]);
    out
}
