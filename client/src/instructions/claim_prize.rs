use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::pda;

/// Transfers the pot of round `lottery_id` to the holder of the winning
/// ticket and marks the round claimed.
///
/// `ticket_id` is the drawn `winner_id`; the ledger verifies the signer
/// owns that ticket and that the round is resolved and unclaimed.
pub fn claim_prize(winner: &Pubkey, lottery_id: u32, ticket_id: u32) -> Instruction {
    let lottery = pda::lottery_address(lottery_id);
    let mut data = super::sighash("claim_prize").to_vec();
    data.extend_from_slice(&lottery_id.to_le_bytes());
    data.extend_from_slice(&ticket_id.to_le_bytes());

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(lottery, false),
            AccountMeta::new_readonly(pda::ticket_address(&lottery, ticket_id), false),
            AccountMeta::new(*winner, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    }
}
