//! Fetch-and-reconcile: pull the Master, then the current round, then the
//! facts the UI needs, into one consistent [`Snapshot`].
//!
//! A resync either succeeds wholesale or reports an error and produces
//! nothing; callers keep their previous snapshot on failure, so displayed
//! state never mixes two generations of reads.

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::error::{CoordinatorError, Result};
use crate::gateway::LedgerGateway;
use crate::pda;
use crate::state::Lottery;

/// A consistent view of the ledger at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Whether the Master account exists. False is a valid startup state.
    pub initialized: bool,

    /// `Master.last_id`; 0 when no round has been created yet.
    pub lottery_id: u32,

    /// The current round, when one exists.
    pub lottery: Option<Lottery>,

    /// `ticket_price * last_ticket_id` of the current round.
    pub pot_lamports: u64,

    /// Whether the wallet owns the ticket sitting at the current round's
    /// derived winning-ticket address.
    pub holds_winning_ticket: bool,

    /// Whether the wallet is the current round's authority.
    pub is_authority: bool,

    /// Whether the current round has a winner.
    pub is_finished: bool,

    /// `is_finished && !claimed && holds_winning_ticket`.
    pub can_claim: bool,
}

impl Snapshot {
    pub fn uninitialized() -> Self {
        Self::default()
    }
}

/// Reads the Master, the current round and the wallet's standing in it.
///
/// An absent Master yields `initialized = false` and stops; a Master whose
/// counter names a round that cannot be fetched is a real inconsistency and
/// surfaces as [`CoordinatorError::NotFound`].
pub fn resync<G: LedgerGateway>(gateway: &G, wallet: Option<&Pubkey>) -> Result<Snapshot> {
    let Some(master) = gateway.fetch_master()? else {
        debug!("master absent, ledger uninitialized");
        return Ok(Snapshot::uninitialized());
    };

    let lottery_id = master.last_id;
    if lottery_id == 0 {
        return Ok(Snapshot {
            initialized: true,
            ..Snapshot::default()
        });
    }

    let lottery_address = pda::lottery_address(lottery_id);
    let lottery = gateway
        .fetch_lottery(lottery_id)?
        .ok_or(CoordinatorError::NotFound(lottery_address))?;

    let pot_lamports = lottery.pot_lamports();

    // Ownership of the winning ticket is decided by address, not by bare id:
    // ticket ids restart every round, the derived address never collides.
    let mut holds_winning_ticket = false;
    if let (Some(wallet), Some(winner_id)) = (wallet, lottery.winner_id) {
        let winning_address = pda::ticket_address(&lottery_address, winner_id);
        holds_winning_ticket = gateway
            .tickets_by_authority(wallet)?
            .iter()
            .any(|(address, _)| *address == winning_address);
    }

    let is_authority = wallet.is_some_and(|w| *w == lottery.authority);
    let is_finished = lottery.winner_id.is_some();
    let can_claim = is_finished && !lottery.claimed && holds_winning_ticket;

    debug!(
        "resynced round {}: pot={} finished={} can_claim={}",
        lottery_id, pot_lamports, is_finished, can_claim
    );

    Ok(Snapshot {
        initialized: true,
        lottery_id,
        lottery: Some(lottery),
        pot_lamports,
        holds_winning_ticket,
        is_authority,
        is_finished,
        can_claim,
    })
}
