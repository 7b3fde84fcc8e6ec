use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{LEDGER_SEED, STATE_SEED, VAULT_SEED};
use crate::error::TimelockError;
use crate::events::FundsTransferred;
use crate::state::{Ledger, TimelockState};
use crate::utils::guard;

/// Latched custody debit followed by `transfer`. Only unallocated funds can
/// leave, and only while deposits are still open.
pub fn execute_sweep<E, F>(
    state: &mut TimelockState,
    total_allocated: u64,
    caller: &Pubkey,
    amount: u64,
    transfer: F,
) -> core::result::Result<(), E>
where
    E: From<TimelockError>,
    F: FnOnce(&mut TimelockState) -> core::result::Result<(), E>,
{
    state.acquire_latch()?;
    let outcome = state
        .reserve_emergency_sweep(caller, total_allocated, amount)
        .map_err(E::from)
        .and_then(|()| transfer(state));
    state.release_latch();
    outcome
}

pub fn emergency_sweep(ctx: Context<EmergencySweep>, amount: u64) -> Result<()> {
    let operator = ctx.accounts.operator.key();
    let total_allocated = ctx.accounts.ledger.total_allocated;

    let state_info = ctx.accounts.timelock_state.to_account_info();
    let vault_info = ctx.accounts.vault.to_account_info();
    let operator_info = ctx.accounts.operator.to_account_info();
    let system_program_info = ctx.accounts.system_program.to_account_info();
    let state_key = state_info.key();
    let vault_bump = ctx.accounts.timelock_state.vault_bump;

    execute_sweep(
        &mut ctx.accounts.timelock_state,
        total_allocated,
        &operator,
        amount,
        |state| -> Result<()> {
            guard::commit(&*state, &state_info)?;

            let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, state_key.as_ref(), &[vault_bump]]];
            system_program::transfer(
                CpiContext::new_with_signer(
                    system_program_info,
                    system_program::Transfer {
                        from: vault_info,
                        to: operator_info,
                    },
                    signer_seeds,
                ),
                amount,
            )
        },
    )?;

    emit!(FundsTransferred {
        from: ctx.accounts.vault.key(),
        to: operator,
        amount,
    });
    msg!(
        "Emergency sweep of {}, custody now {}",
        amount,
        ctx.accounts.timelock_state.custody_balance
    );

    Ok(())
}

#[derive(Accounts)]
pub struct EmergencySweep<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = timelock_state.bump)]
    pub timelock_state: Account<'info, TimelockState>,

    #[account(
        seeds = [LEDGER_SEED, timelock_state.key().as_ref()],
        bump = timelock_state.ledger_bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, timelock_state.key().as_ref()],
        bump = timelock_state.vault_bump
    )]
    pub vault: SystemAccount<'info>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub system_program: Program<'info, System>,
}
