use anchor_lang::prelude::*;

use crate::constants::STATE_SEED;
use crate::state::TimelockState;

/// One-way: there is no instruction that reopens deposits.
pub fn finalize_deposits(ctx: Context<FinalizeDeposits>) -> Result<()> {
    let st = &mut ctx.accounts.timelock_state;
    st.finalize_deposits(&ctx.accounts.operator.key())?;

    msg!("Deposits finalized, custody {}", st.custody_balance);
    emit!(DepositsFinalized {
        operator: st.operator,
        custody_balance: st.custody_balance,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct FinalizeDeposits<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = timelock_state.bump)]
    pub timelock_state: Account<'info, TimelockState>,
    pub operator: Signer<'info>,
}

#[event]
pub struct DepositsFinalized {
    pub operator: Pubkey,
    pub custody_balance: u64,
}
