//! Account layouts of the on-chain lottery program, as seen by the client.
//!
//! These mirror the deployed program's state byte for byte (8-byte Anchor
//! discriminator followed by Borsh fields); the client only ever
//! deserializes them, all mutation happens through transactions.

use anchor_lang::prelude::*;

/// Singleton counter of created rounds.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Master {
    /// Id of the most recently created round; 0 until the first round
    /// exists. Increases by exactly 1 per successful round creation.
    pub last_id: u32,
}

/// One lottery round.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Lottery {
    /// Sequential round id, assigned from `Master.last_id + 1`.
    pub id: u32,

    /// Identity permitted to draw the winner of this round.
    pub authority: Pubkey,

    /// Price of a single ticket, in lamports.
    pub ticket_price: u64,

    /// Number of tickets sold so far; ticket ids run 1..=last_ticket_id.
    pub last_ticket_id: u32,

    /// Winning ticket id. `None` until drawn, then immutable and within
    /// `1..=last_ticket_id`.
    pub winner_id: Option<u32>,

    /// Whether the pot has been withdrawn. Can only become true once
    /// `winner_id` is set, then immutable.
    pub claimed: bool,
}

impl Lottery {
    /// Total value collected from ticket sales — the amount at stake, not
    /// necessarily the literal lamport balance of the account.
    pub fn pot_lamports(&self) -> u64 {
        self.ticket_price.saturating_mul(u64::from(self.last_ticket_id))
    }
}

/// One ticket of one round. The owning round is not stored: it is encoded
/// in the ticket's PDA derivation input.
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Ticket {
    /// Sequential id within the round, starting at 1, no gaps.
    pub id: u32,

    /// The buyer.
    pub authority: Pubkey,
}
