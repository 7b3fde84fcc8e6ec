use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{STATE_SEED, VAULT_SEED};
use crate::events::FundsTransferred;
use crate::state::TimelockState;

pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let st = &mut ctx.accounts.timelock_state;
    st.record_deposit(amount)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.depositor.to_account_info(),
                to: ctx.accounts.vault.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(FundsTransferred {
        from: ctx.accounts.depositor.key(),
        to: ctx.accounts.vault.key(),
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Deposit<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = timelock_state.bump)]
    pub timelock_state: Account<'info, TimelockState>,

    #[account(
        mut,
        seeds = [VAULT_SEED, timelock_state.key().as_ref()],
        bump = timelock_state.vault_bump
    )]
    pub vault: SystemAccount<'info>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
}
