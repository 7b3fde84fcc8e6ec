use anchor_lang::prelude::*;

use crate::constants::{LEDGER_SEED, STATE_SEED};
use crate::state::{Ledger, TimelockState};
use crate::utils::vesting;

pub fn emit_withdrawable_quote(
    ctx: Context<EmitWithdrawableQuote>,
    recipient: Pubkey,
) -> Result<()> {
    let st = &ctx.accounts.timelock_state;
    st.require_schedule_set()?;
    let now = Clock::get()?.unix_timestamp;

    let account = ctx.accounts.ledger.account(&recipient);
    let vested = vesting::vested_amount(&st.schedule, account.total()?, now)?;
    let withdrawable = vesting::withdrawable_amount(&st.schedule, &account, now)?;

    emit!(WithdrawableQuote {
        recipient,
        allocated: account.allocated,
        withdrawn: account.withdrawn,
        vested,
        withdrawable,
        now,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct EmitWithdrawableQuote<'info> {
    #[account(seeds = [STATE_SEED], bump = timelock_state.bump)]
    pub timelock_state: Account<'info, TimelockState>,

    #[account(
        seeds = [LEDGER_SEED, timelock_state.key().as_ref()],
        bump = timelock_state.ledger_bump
    )]
    pub ledger: Box<Account<'info, Ledger>>,
}

#[event]
pub struct WithdrawableQuote {
    pub recipient: Pubkey,
    pub allocated: u64,
    pub withdrawn: u64,
    pub vested: u64,
    pub withdrawable: u64,
    pub now: i64,
}
