//! The narrow seam between the coordinator and the cluster.
//!
//! [`LedgerGateway`] is everything the rest of the crate knows about the
//! network: read an account by address, scan tickets by owner, submit a
//! signed transaction, await its confirmation. [`RpcGateway`] implements it
//! over the blocking JSON-RPC client; tests implement it in memory.

use std::thread;
use std::time::Duration;

use anchor_lang::{AccountDeserialize, Discriminator};
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;
use tracing::{debug, info};

use crate::constants::TICKET_AUTHORITY_OFFSET;
use crate::error::{CoordinatorError, Result};
use crate::pda;
use crate::state::{Lottery, Master, Ticket};

/// Read and write access to the ledger, as narrow as the coordinator needs.
///
/// `Ok(None)` from a fetch means the address has no record behind it; that
/// is control flow (uninitialized master, unresolved round), not an error.
pub trait LedgerGateway {
    /// Raw account data at `address`, or `None` if no account exists there.
    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>>;

    /// Every Ticket account owned by `authority`, across all rounds,
    /// with the address each one lives at.
    fn tickets_by_authority(&self, authority: &Pubkey) -> Result<Vec<(Pubkey, Ticket)>>;

    /// Sign and submit a single-instruction transaction paid by `payer`.
    fn submit(&self, instruction: Instruction, payer: &Keypair) -> Result<Signature>;

    /// Block until the submitted transaction reaches finality or fails.
    fn confirm(&self, signature: &Signature) -> Result<()>;

    fn fetch_master(&self) -> Result<Option<Master>> {
        let address = pda::master_address();
        match self.fetch_account(&address)? {
            Some(data) => Ok(Some(decode(&address, &data)?)),
            None => Ok(None),
        }
    }

    fn fetch_lottery(&self, id: u32) -> Result<Option<Lottery>> {
        let address = pda::lottery_address(id);
        match self.fetch_account(&address)? {
            Some(data) => Ok(Some(decode(&address, &data)?)),
            None => Ok(None),
        }
    }

    fn fetch_ticket(&self, lottery: &Pubkey, ticket_id: u32) -> Result<Option<Ticket>> {
        let address = pda::ticket_address(lottery, ticket_id);
        match self.fetch_account(&address)? {
            Some(data) => Ok(Some(decode(&address, &data)?)),
            None => Ok(None),
        }
    }
}

/// Gateways are freely shareable by reference.
impl<G: LedgerGateway + ?Sized> LedgerGateway for &G {
    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        (**self).fetch_account(address)
    }

    fn tickets_by_authority(&self, authority: &Pubkey) -> Result<Vec<(Pubkey, Ticket)>> {
        (**self).tickets_by_authority(authority)
    }

    fn submit(&self, instruction: Instruction, payer: &Keypair) -> Result<Signature> {
        (**self).submit(instruction, payer)
    }

    fn confirm(&self, signature: &Signature) -> Result<()> {
        (**self).confirm(signature)
    }
}

fn decode<T: AccountDeserialize>(address: &Pubkey, data: &[u8]) -> Result<T> {
    T::try_deserialize(&mut &data[..]).map_err(|e| CoordinatorError::BadAccountData {
        address: *address,
        reason: e.to_string(),
    })
}

/// [`LedgerGateway`] over the blocking Solana JSON-RPC client.
pub struct RpcGateway {
    rpc: RpcClient,
    commitment: CommitmentConfig,
}

impl RpcGateway {
    /// Polling cadence while waiting for a submitted transaction.
    const CONFIRM_POLL_INTERVAL: Duration = Duration::from_millis(500);
    /// Poll attempts before giving up on confirmation.
    const CONFIRM_POLL_BUDGET: u32 = 60;

    /// Connects at `confirmed` commitment.
    pub fn new(url: impl ToString) -> Self {
        Self::with_commitment(url, CommitmentConfig::confirmed())
    }

    pub fn with_commitment(url: impl ToString, commitment: CommitmentConfig) -> Self {
        Self {
            rpc: RpcClient::new_with_commitment(url.to_string(), commitment),
            commitment,
        }
    }
}

impl LedgerGateway for RpcGateway {
    fn fetch_account(&self, address: &Pubkey) -> Result<Option<Vec<u8>>> {
        let response = self
            .rpc
            .get_account_with_commitment(address, self.commitment)
            .map_err(|e| CoordinatorError::Transport(e.to_string()))?;

        debug!(
            "fetched {}: {}",
            address,
            if response.value.is_some() { "present" } else { "absent" }
        );
        Ok(response.value.map(|account| account.data))
    }

    fn tickets_by_authority(&self, authority: &Pubkey) -> Result<Vec<(Pubkey, Ticket)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(0, &Ticket::DISCRIMINATOR)),
                RpcFilterType::Memcmp(Memcmp::new_base58_encoded(
                    TICKET_AUTHORITY_OFFSET,
                    authority.as_ref(),
                )),
            ]),
            account_config: RpcAccountInfoConfig {
                commitment: Some(self.commitment),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(&crate::ID, config)
            .map_err(|e| CoordinatorError::Transport(e.to_string()))?;

        info!("owner {} holds {} tickets", authority, accounts.len());

        accounts
            .into_iter()
            .map(|(address, account)| Ok((address, decode(&address, &account.data)?)))
            .collect()
    }

    fn submit(&self, instruction: Instruction, payer: &Keypair) -> Result<Signature> {
        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .map_err(|e| CoordinatorError::Transport(e.to_string()))?;

        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );

        let signature = self.rpc.send_transaction(&transaction).map_err(|e| {
            // Preflight simulation surfaces program-level rejections here.
            match e.get_transaction_error() {
                Some(tx_err) => CoordinatorError::TransactionRejected(tx_err.to_string()),
                None => CoordinatorError::Transport(e.to_string()),
            }
        })?;

        info!("submitted transaction {}", signature);
        Ok(signature)
    }

    fn confirm(&self, signature: &Signature) -> Result<()> {
        for _ in 0..Self::CONFIRM_POLL_BUDGET {
            let status = self
                .rpc
                .get_signature_status_with_commitment(signature, self.commitment)
                .map_err(|e| CoordinatorError::Transport(e.to_string()))?;

            match status {
                Some(Ok(())) => {
                    info!("transaction {} confirmed", signature);
                    return Ok(());
                }
                Some(Err(tx_err)) => {
                    return Err(CoordinatorError::TransactionRejected(tx_err.to_string()))
                }
                None => thread::sleep(Self::CONFIRM_POLL_INTERVAL),
            }
        }

        Err(CoordinatorError::ConfirmationTimeout(*signature))
    }
}
