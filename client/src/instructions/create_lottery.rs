use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::pda;

/// Creates round `next_id` and bumps `Master.last_id`.
///
/// `next_id` must be the caller's last-known `Master.last_id + 1`; the
/// ledger derives the round PDA from its own counter, so a submission built
/// against a stale counter names the wrong account and is rejected rather
/// than silently retried.
pub fn create_lottery(authority: &Pubkey, next_id: u32, ticket_price: u64) -> Instruction {
    let mut data = super::sighash("create_lottery").to_vec();
    data.extend_from_slice(&ticket_price.to_le_bytes());

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(pda::lottery_address(next_id), false),
            AccountMeta::new(pda::master_address(), false),
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    }
}
