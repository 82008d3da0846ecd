//! Fixed program parameters shared by address derivation, instruction
//! building and account decoding.

/// Seed of the singleton Master PDA.
pub const MASTER_SEED: &[u8] = b"master";

/// Seed prefix of a Lottery round PDA; completed by the round id (u32 LE).
pub const LOTTERY_SEED: &[u8] = b"lottery";

/// Seed prefix of a Ticket PDA; completed by the owning Lottery's address
/// bytes and the ticket id (u32 LE).
pub const TICKET_SEED: &[u8] = b"ticket";

/// Ticket price (in lamports) used when creating a round, unless the
/// coordinator is configured otherwise. 0.1 SOL.
pub const DEFAULT_TICKET_PRICE: u64 = 100_000_000;

/// Byte offset of `Ticket.authority`: 8-byte account discriminator followed
/// by the u32 ticket id.
pub const TICKET_AUTHORITY_OFFSET: usize = 8 + 4;
