//! # Timelock
//!
//! Custodial native-currency timelock. A single operator deposits lamports,
//! fixes a cliff/release schedule once, allocates funds to recipients and
//! finally closes deposits for good. Recipients withdraw the linearly vested
//! part of their allocation themselves.

use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("7Hq3Zr5vUeVJkRTmDnfb9QkqP4xL2WcYsA8gNd1oEtBu");

#[program]
pub mod timelock {
    use super::*;

    /// Creates the state, ledger and vault reserve; the signer becomes operator.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::initialize(ctx)
    }

    /// Anyone may fund custody while deposits are open.
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::deposit(ctx, amount)
    }

    /// Fixes cliff and release edges relative to now. Callable once.
    pub fn set_schedule(
        ctx: Context<SetSchedule>,
        cliff_offset: i64,
        release_offset: i64,
    ) -> Result<()> {
        instructions::set_schedule::set_schedule(ctx, cliff_offset, release_offset)
    }

    pub fn finalize_deposits(ctx: Context<FinalizeDeposits>) -> Result<()> {
        instructions::finalize_deposits::finalize_deposits(ctx)
    }

    pub fn allocate(ctx: Context<Allocate>, recipient: Pubkey, amount: u64) -> Result<()> {
        instructions::allocate::allocate(ctx, recipient, amount)
    }

    pub fn bulk_allocate(
        ctx: Context<Allocate>,
        recipients: Vec<Pubkey>,
        amounts: Vec<u64>,
    ) -> Result<()> {
        instructions::bulk_allocate::bulk_allocate(ctx, recipients, amounts)
    }

    /// Self-service withdrawal of the vested portion.
    pub fn withdraw(ctx: Context<Withdraw>, recipient: Pubkey, amount: u64) -> Result<()> {
        instructions::withdraw::withdraw(ctx, recipient, amount)
    }

    pub fn recover_foreign_funds(ctx: Context<RecoverForeignFunds>, amount: u64) -> Result<()> {
        instructions::recover_foreign_funds::recover_foreign_funds(ctx, amount)
    }

    /// Operator pulls unallocated lamports back; disabled after finalization.
    pub fn emergency_sweep(ctx: Context<EmergencySweep>, amount: u64) -> Result<()> {
        instructions::emergency_sweep::emergency_sweep(ctx, amount)
    }

    pub fn emit_withdrawable_quote(
        ctx: Context<EmitWithdrawableQuote>,
        recipient: Pubkey,
    ) -> Result<()> {
        instructions::emit_withdrawable_quote::emit_withdrawable_quote(ctx, recipient)
    }
}
