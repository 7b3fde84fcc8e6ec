use anchor_lang::prelude::*;

use crate::constants::{LEDGER_SEED, STATE_SEED};
use crate::events::AllocationPerformed;
use crate::state::{Ledger, TimelockState};

pub fn allocate(ctx: Context<Allocate>, recipient: Pubkey, amount: u64) -> Result<()> {
    let st = &ctx.accounts.timelock_state;
    ctx.accounts
        .ledger
        .allocate(st, &ctx.accounts.operator.key(), &recipient, amount)?;

    emit!(AllocationPerformed { recipient, amount });
    Ok(())
}

#[derive(Accounts)]
pub struct Allocate<'info> {
    #[account(seeds = [STATE_SEED], bump = timelock_state.bump)]
    pub timelock_state: Account<'info, TimelockState>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, timelock_state.key().as_ref()],
        bump = timelock_state.ledger_bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,

    pub operator: Signer<'info>,
}
