//! Program-wide constants.

use anchor_lang::prelude::*;

/// Seed of the singleton timelock state PDA.
pub const STATE_SEED: &[u8] = b"timelock_state";

/// Seed of the allocation ledger PDA (`[LEDGER_SEED, timelock_state]`).
pub const LEDGER_SEED: &[u8] = b"ledger";

/// Seed of the system-owned vault PDA holding custody lamports
/// (`[VAULT_SEED, timelock_state]`).
pub const VAULT_SEED: &[u8] = b"vault";

/// Max recipients stored in the ledger PDA.
pub const MAX_RECIPIENTS: usize = 128;

/// Max entries processed per `bulk_allocate` call.
pub const MAX_BATCH_ALLOCATE: usize = 16;

/// Wrapped-SOL mint. Foreign-asset recovery must never touch the custody asset.
pub const NATIVE_MINT: Pubkey = anchor_spl::token::spl_token::native_mint::ID;
