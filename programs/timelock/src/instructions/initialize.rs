use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{LEDGER_SEED, STATE_SEED, VAULT_SEED};
use crate::state::{Ledger, Phase, Schedule, TimelockState};

pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
    let st = &mut ctx.accounts.timelock_state;
    st.operator = ctx.accounts.operator.key();
    st.phase = Phase::Uninitialized;
    st.schedule = Schedule::default();
    st.custody_balance = 0;
    st.entered = false;
    st.bump = ctx.bumps.timelock_state;
    st.ledger_bump = ctx.bumps.ledger;
    st.vault_bump = ctx.bumps.vault;

    let ledger = &mut ctx.accounts.ledger;
    ledger.total_allocated = 0;
    ledger.entries = Vec::new();

    // The vault is a plain system account; keep it rent-exempt so custody can
    // be drained to zero without the runtime rejecting the transfer.
    let reserve = Rent::get()?
        .minimum_balance(0)
        .saturating_sub(ctx.accounts.vault.lamports());
    if reserve > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                system_program::Transfer {
                    from: ctx.accounts.operator.to_account_info(),
                    to: ctx.accounts.vault.to_account_info(),
                },
            ),
            reserve,
        )?;
    }

    msg!("Timelock initialized, operator {}", st.operator);
    emit!(TimelockInitialized {
        operator: st.operator,
        vault: ctx.accounts.vault.key(),
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = operator,
        space = 8 + TimelockState::SIZE,
        seeds = [STATE_SEED],
        bump
    )]
    pub timelock_state: Account<'info, TimelockState>,

    #[account(
        init,
        payer = operator,
        space = Ledger::space(),
        seeds = [LEDGER_SEED, timelock_state.key().as_ref()],
        bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    #[account(
        mut,
        seeds = [VAULT_SEED, timelock_state.key().as_ref()],
        bump
    )]
    pub vault: SystemAccount<'info>,

    #[account(mut)]
    pub operator: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct TimelockInitialized {
    pub operator: Pubkey,
    pub vault: Pubkey,
}
