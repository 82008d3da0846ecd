//! Reconstruction of past round outcomes.
//!
//! The ledger keeps no index of resolved rounds; the chain of outcomes is
//! implicit in the id sequence. Walking every id from the newest down to 1
//! costs one round fetch per id (plus one ticket fetch per resolved round),
//! O(n) in the total number of rounds ever created. Correctness over read
//! count: an index would be the upgrade path if this is ever reused at
//! scale.

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::error::{CoordinatorError, Result};
use crate::gateway::LedgerGateway;
use crate::pda;

/// Outcome of one resolved round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRound {
    pub lottery_id: u32,
    pub winner_id: u32,
    /// Holder of the winning ticket.
    pub winner: Pubkey,
    pub prize_lamports: u64,
}

/// Walks rounds `current_id..=1` most-recent-first and returns the resolved
/// ones.
///
/// A round that is missing or has no winner yet simply has no outcome and is
/// skipped; a resolved round whose winning ticket cannot be fetched is a
/// real inconsistency.
pub fn resolved_rounds<G: LedgerGateway>(gateway: &G, current_id: u32) -> Result<Vec<ResolvedRound>> {
    let mut rounds = Vec::new();

    for id in (1..=current_id).rev() {
        let Some(lottery) = gateway.fetch_lottery(id)? else {
            debug!("round {} not found, skipping", id);
            continue;
        };
        let Some(winner_id) = lottery.winner_id else {
            debug!("round {} unresolved, skipping", id);
            continue;
        };

        let lottery_address = pda::lottery_address(id);
        let ticket_address = pda::ticket_address(&lottery_address, winner_id);
        let ticket = gateway
            .fetch_ticket(&lottery_address, winner_id)?
            .ok_or(CoordinatorError::NotFound(ticket_address))?;

        rounds.push(ResolvedRound {
            lottery_id: id,
            winner_id,
            winner: ticket.authority,
            prize_lamports: lottery.pot_lamports(),
        });
    }

    debug!("reconstructed {} resolved rounds of {}", rounds.len(), current_id);
    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use solana_sdk::signature::Keypair;
    use solana_sdk::signer::Signer;

    use super::*;
    use crate::gateway::testing::MockLedger;
    use crate::instructions;

    const PRICE: u64 = 500;

    #[test]
    fn no_rounds_yields_empty_history() {
        let ledger = MockLedger::new();
        assert!(resolved_rounds(&ledger, 0).unwrap().is_empty());
        // Ids with no round behind them are skipped, not errors.
        assert!(resolved_rounds(&ledger, 3).unwrap().is_empty());
    }

    #[test]
    fn unresolved_rounds_are_skipped_most_recent_first() {
        let ledger = MockLedger::new();
        let authority = Keypair::new();
        let buyer = Keypair::new();
        ledger
            .submit(instructions::initialize_master(&authority.pubkey()), &authority)
            .unwrap();

        // Rounds 1..=5; round 3 never gets a winner. Round id doubles as the
        // ticket count so each prize is distinct.
        for id in 1u32..=5 {
            ledger
                .submit(
                    instructions::create_lottery(&authority.pubkey(), id, PRICE),
                    &authority,
                )
                .unwrap();
            for ticket_id in 1..=id {
                ledger
                    .submit(instructions::buy_ticket(&buyer.pubkey(), id, ticket_id), &buyer)
                    .unwrap();
            }
            if id != 3 {
                ledger
                    .submit(instructions::pick_winner(&authority.pubkey(), id), &authority)
                    .unwrap();
            }
        }

        let history = resolved_rounds(&ledger, 5).unwrap();
        let ids: Vec<u32> = history.iter().map(|r| r.lottery_id).collect();
        assert_eq!(ids, vec![5, 4, 2, 1]);

        for round in &history {
            // The mock draws the last ticket sold.
            assert_eq!(round.winner_id, round.lottery_id);
            assert_eq!(round.winner, buyer.pubkey());
            assert_eq!(round.prize_lamports, u64::from(round.lottery_id) * PRICE);
        }
    }

    #[test]
    fn traversal_surfaces_read_failures() {
        let ledger = MockLedger::new();
        let authority = Keypair::new();
        ledger
            .submit(instructions::initialize_master(&authority.pubkey()), &authority)
            .unwrap();

        ledger.fail_reads.set(true);
        assert!(resolved_rounds(&ledger, 2).is_err());
    }
}
