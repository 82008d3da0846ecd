//! Deterministic address derivation for the program's accounts.
//!
//! Addresses replace stored foreign keys: the Master owns its rounds and a
//! round owns its tickets purely because anyone can recompute the PDA from
//! the numeric id. A Ticket derivation mixes in the owning Lottery's address
//! bytes rather than the round id, so ticket addresses stay globally unique
//! even though ticket ids restart at 1 every round.

use solana_sdk::pubkey::Pubkey;

use crate::constants::{LOTTERY_SEED, MASTER_SEED, TICKET_SEED};

/// Address of the singleton Master account.
pub fn master_address() -> Pubkey {
    Pubkey::find_program_address(&[MASTER_SEED], &crate::ID).0
}

/// Address of the Lottery round with the given id.
pub fn lottery_address(id: u32) -> Pubkey {
    Pubkey::find_program_address(&[LOTTERY_SEED, &id.to_le_bytes()], &crate::ID).0
}

/// Address of a Ticket under the given Lottery round.
pub fn ticket_address(lottery: &Pubkey, ticket_id: u32) -> Pubkey {
    Pubkey::find_program_address(
        &[TICKET_SEED, lottery.as_ref(), &ticket_id.to_le_bytes()],
        &crate::ID,
    )
    .0
}
