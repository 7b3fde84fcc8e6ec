use anchor_lang::prelude::*;

use crate::constants::STATE_SEED;
use crate::state::TimelockState;

pub fn set_schedule(
    ctx: Context<SetSchedule>,
    cliff_offset: i64,
    release_offset: i64,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let st = &mut ctx.accounts.timelock_state;
    st.set_schedule(&ctx.accounts.operator.key(), cliff_offset, release_offset, now)?;

    msg!(
        "Schedule set: cliff {} release {}",
        st.schedule.cliff_edge,
        st.schedule.release_edge
    );
    emit!(ScheduleSet {
        operator: st.operator,
        initialized_at: st.schedule.initialized_at,
        cliff_edge: st.schedule.cliff_edge,
        release_edge: st.schedule.release_edge,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct SetSchedule<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = timelock_state.bump)]
    pub timelock_state: Account<'info, TimelockState>,

    pub operator: Signer<'info>,
}

#[event]
pub struct ScheduleSet {
    pub operator: Pubkey,
    pub initialized_at: i64,
    pub cliff_edge: i64,
    pub release_edge: i64,
}
