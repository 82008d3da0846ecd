//! The five lifecycle operations, each a derive → submit → confirm → resync
//! sequence.
//!
//! The coordinator builds every transaction from the counters of its last
//! consistent snapshot and never mutates that snapshot directly: after a
//! confirmed submission it re-reads the ledger, so the view always reflects
//! ground truth rather than an optimistic local guess. A submission built
//! against counters that moved underneath us names the wrong PDA and is
//! rejected by the ledger; the error is surfaced unmodified, without retry,
//! and the previous snapshot stays in place.

use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use tracing::info;

use crate::constants::DEFAULT_TICKET_PRICE;
use crate::error::{CoordinatorError, Result};
use crate::gateway::LedgerGateway;
use crate::history::{self, ResolvedRound};
use crate::instructions;
use crate::pda;
use crate::state::Lottery;
use crate::sync::{self, Snapshot};

pub struct Coordinator<G: LedgerGateway> {
    gateway: G,
    wallet: Keypair,
    ticket_price: u64,
    snapshot: Snapshot,
}

impl<G: LedgerGateway> Coordinator<G> {
    pub fn new(gateway: G, wallet: Keypair) -> Self {
        Self {
            gateway,
            wallet,
            ticket_price: DEFAULT_TICKET_PRICE,
            snapshot: Snapshot::uninitialized(),
        }
    }

    /// Creates a coordinator and performs the startup resync. An
    /// uninitialized ledger is a valid startup state, not an error.
    pub fn connect(gateway: G, wallet: Keypair) -> Result<Self> {
        let mut coordinator = Self::new(gateway, wallet);
        coordinator.resync()?;
        Ok(coordinator)
    }

    /// Price used when this coordinator creates a round.
    pub fn with_ticket_price(mut self, ticket_price: u64) -> Self {
        self.ticket_price = ticket_price;
        self
    }

    pub fn wallet(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    /// The last successfully reconciled view of the ledger.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Re-reads the ledger. On failure the stored snapshot is left as it
    /// was.
    pub fn resync(&mut self) -> Result<&Snapshot> {
        let snapshot = sync::resync(&self.gateway, Some(&self.wallet.pubkey()))?;
        self.snapshot = snapshot;
        Ok(&self.snapshot)
    }

    /// Outcomes of all resolved rounds, most recent first.
    pub fn history(&self) -> Result<Vec<ResolvedRound>> {
        history::resolved_rounds(&self.gateway, self.snapshot.lottery_id)
    }

    /// Creates the singleton Master account.
    pub fn initialize(&mut self) -> Result<Signature> {
        info!("initializing lottery master");
        self.execute(instructions::initialize_master(&self.wallet.pubkey()))
    }

    /// Creates the next round, with this coordinator's wallet as its
    /// authority.
    pub fn create_lottery(&mut self) -> Result<Signature> {
        if !self.snapshot.initialized {
            return Err(CoordinatorError::NotInitialized);
        }
        let next_id = self.snapshot.lottery_id + 1;
        info!("creating round {} at {} lamports per ticket", next_id, self.ticket_price);
        self.execute(instructions::create_lottery(
            &self.wallet.pubkey(),
            next_id,
            self.ticket_price,
        ))
    }

    /// Buys the next ticket of the current round.
    pub fn buy_ticket(&mut self) -> Result<Signature> {
        let lottery = self.current_lottery()?;
        let (lottery_id, next_ticket_id) = (lottery.id, lottery.last_ticket_id + 1);
        info!("buying ticket {} of round {}", next_ticket_id, lottery_id);
        self.execute(instructions::buy_ticket(
            &self.wallet.pubkey(),
            lottery_id,
            next_ticket_id,
        ))
    }

    /// Draws the winner of the current round. Only meaningful for the round
    /// authority; anyone else is rejected by the ledger.
    pub fn pick_winner(&mut self) -> Result<Signature> {
        let lottery_id = self.current_lottery()?.id;
        info!("drawing winner of round {}", lottery_id);
        self.execute(instructions::pick_winner(&self.wallet.pubkey(), lottery_id))
    }

    /// Withdraws the pot of the current round. Without a drawn winner there
    /// is no winning-ticket address to reference, so this fails before
    /// touching the network.
    pub fn claim_prize(&mut self) -> Result<Signature> {
        let lottery = self.current_lottery()?;
        let lottery_id = lottery.id;
        let winner_id = lottery.winner_id.ok_or_else(|| {
            CoordinatorError::TransactionRejected("winner not drawn yet".to_string())
        })?;
        info!("claiming prize of round {} with ticket {}", lottery_id, winner_id);
        self.execute(instructions::claim_prize(
            &self.wallet.pubkey(),
            lottery_id,
            winner_id,
        ))
    }

    fn current_lottery(&self) -> Result<&Lottery> {
        if !self.snapshot.initialized {
            return Err(CoordinatorError::NotInitialized);
        }
        self.snapshot
            .lottery
            .as_ref()
            .ok_or(CoordinatorError::NotFound(pda::lottery_address(
                self.snapshot.lottery_id,
            )))
    }

    fn execute(&mut self, instruction: Instruction) -> Result<Signature> {
        let signature = self.gateway.submit(instruction, &self.wallet)?;
        self.gateway.confirm(&signature)?;
        self.resync()?;
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use solana_sdk::signature::Keypair;

    use super::*;
    use crate::gateway::testing::MockLedger;

    const PRICE: u64 = 1_000;

    fn coordinator(ledger: &MockLedger) -> Coordinator<&MockLedger> {
        Coordinator::new(ledger, Keypair::new()).with_ticket_price(PRICE)
    }

    fn rejected<T: std::fmt::Debug>(result: Result<T>) -> String {
        match result {
            Err(CoordinatorError::TransactionRejected(reason)) => reason,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn connect_on_empty_ledger_is_uninitialized() {
        let ledger = MockLedger::new();
        let coordinator = Coordinator::connect(&ledger, Keypair::new()).unwrap();
        assert!(!coordinator.snapshot().initialized);
    }

    #[test]
    fn initialize_then_snapshot_shows_round_zero() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();

        let snapshot = admin.snapshot();
        assert!(snapshot.initialized);
        assert_eq!(snapshot.lottery_id, 0);
        assert!(snapshot.lottery.is_none());
    }

    #[test]
    fn initialize_twice_is_rejected() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();
        rejected(admin.initialize());
    }

    #[test]
    fn create_lottery_requires_initialization() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        assert!(matches!(
            admin.create_lottery(),
            Err(CoordinatorError::NotInitialized)
        ));
    }

    #[test]
    fn round_ids_are_monotonic() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();

        for expected in 1u32..=4 {
            admin.create_lottery().unwrap();
            assert_eq!(admin.snapshot().lottery_id, expected);
            assert_eq!(admin.snapshot().lottery.as_ref().unwrap().id, expected);
        }
    }

    #[test]
    fn ticket_ids_are_contiguous_from_one() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();
        admin.create_lottery().unwrap();

        let mut buyer = coordinator(&ledger);
        buyer.resync().unwrap();
        for _ in 0..5 {
            buyer.buy_ticket().unwrap();
        }

        let snapshot = buyer.snapshot();
        assert_eq!(snapshot.lottery.as_ref().unwrap().last_ticket_id, 5);
        assert_eq!(snapshot.pot_lamports, 5 * PRICE);

        let ids: Vec<u32> = ledger
            .tickets_by_authority(&buyer.wallet())
            .unwrap()
            .iter()
            .map(|(_, ticket)| ticket.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn stale_counter_submission_is_rejected_not_retried() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();
        admin.create_lottery().unwrap();

        let mut first = coordinator(&ledger);
        let mut second = coordinator(&ledger);
        first.resync().unwrap();
        second.resync().unwrap();

        first.buy_ticket().unwrap();
        // `second` still believes last_ticket_id is 0; its transaction names
        // the already-created ticket PDA and loses the race.
        let reason = rejected(second.buy_ticket());
        assert!(reason.contains("ticket account"));

        // Recovery is an explicit caller decision: resync, then retry.
        second.resync().unwrap();
        second.buy_ticket().unwrap();
        assert_eq!(second.snapshot().lottery.as_ref().unwrap().last_ticket_id, 2);
    }

    #[test]
    fn only_the_authority_draws_and_only_once() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();
        admin.create_lottery().unwrap();

        let mut buyer = coordinator(&ledger);
        buyer.resync().unwrap();
        buyer.buy_ticket().unwrap();

        rejected(buyer.pick_winner());

        admin.pick_winner().unwrap();
        assert!(admin.snapshot().is_finished);

        let reason = rejected(admin.pick_winner());
        assert!(reason.contains("already drawn"));
    }

    #[test]
    fn claim_requires_resolution_and_happens_once() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();
        admin.create_lottery().unwrap();

        let mut buyer = coordinator(&ledger);
        buyer.resync().unwrap();
        buyer.buy_ticket().unwrap();

        // Before the draw there is no winning ticket to reference.
        rejected(buyer.claim_prize());

        admin.pick_winner().unwrap();
        buyer.resync().unwrap();
        assert!(buyer.snapshot().can_claim);

        buyer.claim_prize().unwrap();
        assert!(buyer.snapshot().lottery.as_ref().unwrap().claimed);
        assert!(!buyer.snapshot().can_claim);

        let reason = rejected(buyer.claim_prize());
        assert!(reason.contains("already claimed"));
    }

    #[test]
    fn can_claim_is_the_exact_conjunction() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();
        admin.create_lottery().unwrap();

        let mut buyer = coordinator(&ledger);
        buyer.resync().unwrap();
        buyer.buy_ticket().unwrap();

        // Unresolved round, ticket in hand: no.
        assert!(!buyer.snapshot().can_claim);

        admin.pick_winner().unwrap();
        buyer.resync().unwrap();

        // Resolved, unclaimed, holder: yes.
        assert!(buyer.snapshot().can_claim);

        // Resolved, unclaimed, non-holder: no.
        assert!(admin.snapshot().is_finished);
        assert!(!admin.snapshot().can_claim);

        // Resolved, claimed, holder: no.
        buyer.claim_prize().unwrap();
        assert!(!buyer.snapshot().can_claim);
    }

    #[test]
    fn failed_resync_keeps_the_previous_snapshot() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();
        admin.create_lottery().unwrap();

        let before = admin.snapshot().clone();
        ledger.fail_reads.set(true);
        assert!(admin.resync().is_err());
        assert_eq!(*admin.snapshot(), before);
    }

    #[test]
    fn history_reflects_resolved_rounds_only() {
        let ledger = MockLedger::new();
        let mut admin = coordinator(&ledger);
        admin.initialize().unwrap();

        let mut buyer = coordinator(&ledger);
        for id in 1u32..=3 {
            admin.create_lottery().unwrap();
            buyer.resync().unwrap();
            buyer.buy_ticket().unwrap();
            if id != 2 {
                admin.pick_winner().unwrap();
            }
        }

        let history = admin.history().unwrap();
        let ids: Vec<u32> = history.iter().map(|r| r.lottery_id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(history[0].winner, buyer.wallet());
        assert_eq!(history[0].prize_lamports, PRICE);
    }
}
