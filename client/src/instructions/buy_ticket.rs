use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::pda;

/// Buys ticket `next_ticket_id` of round `lottery_id` for `buyer`, paying
/// the round's ticket price into the pot.
///
/// `next_ticket_id` must be the caller's last-known `last_ticket_id + 1`.
/// Rejected once the round has a winner, or when the counter has moved.
pub fn buy_ticket(buyer: &Pubkey, lottery_id: u32, next_ticket_id: u32) -> Instruction {
    let lottery = pda::lottery_address(lottery_id);
    let mut data = super::sighash("buy_ticket").to_vec();
    data.extend_from_slice(&lottery_id.to_le_bytes());

    Instruction {
        program_id: crate::ID,
        accounts: vec![
            AccountMeta::new(lottery, false),
            AccountMeta::new(pda::ticket_address(&lottery, next_ticket_id), false),
            AccountMeta::new(*buyer, true),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data,
    }
}
