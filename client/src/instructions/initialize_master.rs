use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::pda;

/// Creates the singleton Master account with `last_id = 0`.
///
/// Rejected by the ledger if the Master already exists.
pub fn initialize_master(payer: &Pubkey) -> Instruction {
    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(pda::master_address(), false),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: super::sighash("initialize_master").to_vec(),
    }
}
