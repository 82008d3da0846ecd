//! Client-side coordinator for the on-chain lottery program.
//!
//! The lottery itself — fund custody, winner selection, authorization — lives
//! in a deployed Solana program. This crate drives it through its lifecycle
//! and keeps a consistent local view of its state:
//!
//! - [`pda`] — derives the Master, Lottery and Ticket PDA addresses
//! - [`gateway`] — the narrow read/submit/confirm seam to the cluster
//! - [`sync`] — fetch-and-reconcile into a [`sync::Snapshot`]
//! - [`history`] — rebuilds past round outcomes by walking ids backward
//! - [`coordinator`] — the five lifecycle operations, each a
//!   derive → submit → confirm → resync sequence
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────┐
//! │ Solana RPC  │────▶│  LedgerGateway   │────▶│  Coordinator │
//! │             │     │                  │     │              │
//! │ • accounts  │     │ • typed fetches  │     │ • lifecycle  │
//! │ • txs       │     │ • submit/confirm │     │ • snapshot   │
//! └─────────────┘     └──────────────────┘     └──────────────┘
//! ```
//!
//! The coordinator never mutates its local state optimistically: every
//! observable change comes from re-reading the ledger after a confirmed
//! transaction, so a rejected or reordered submission can never leave the
//! snapshot out of step with the chain.

use anchor_lang::declare_id;

pub mod constants;
pub mod coordinator;
pub mod error;
pub mod gateway;
pub mod history;
pub mod instructions;
pub mod pda;
pub mod state;
pub mod sync;

declare_id!("FCSM8k1FMrWBJMW6SqHNiiryer7KiK6YHsxRV7yvyZT7");

pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use gateway::{LedgerGateway, RpcGateway};
pub use history::ResolvedRound;
pub use sync::Snapshot;
