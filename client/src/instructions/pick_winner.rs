use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

use crate::pda;

/// Draws the winner of round `lottery_id`.
///
/// Only the round authority may sign this; the selection itself is the
/// ledger program's responsibility. Rejected if a winner is already set.
pub fn pick_winner(authority: &Pubkey, lottery_id: u32) -> Instruction {
    let mut data = super::sighash("pick_winner").to_vec();
    data.extend_from_slice(&lottery_id.to_le_bytes());

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(pda::lottery_address(lottery_id), false),
            AccountMeta::new_readonly(*authority, true),
        ],
        data,
    }
}
