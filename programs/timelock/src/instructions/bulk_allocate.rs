use anchor_lang::prelude::*;

use crate::events::AllocationPerformed;
use crate::instructions::allocate::Allocate;

// Same account set as `allocate`; only the arguments differ.
pub fn bulk_allocate(
    ctx: Context<Allocate>,
    recipients: Vec<Pubkey>,
    amounts: Vec<u64>,
) -> Result<()> {
    let st = &ctx.accounts.timelock_state;
    ctx.accounts
        .ledger
        .bulk_allocate(st, &ctx.accounts.operator.key(), &recipients, &amounts)?;

    for (recipient, amount) in recipients.into_iter().zip(amounts) {
        emit!(AllocationPerformed { recipient, amount });
    }
    msg!("Bulk allocation applied");
    Ok(())
}
