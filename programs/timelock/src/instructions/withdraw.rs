use anchor_lang::prelude::*;
use anchor_lang::system_program;

use crate::constants::{LEDGER_SEED, STATE_SEED, VAULT_SEED};
use crate::error::{TimelockError, TimelockResult};
use crate::events::FundsTransferred;
use crate::state::{Ledger, RecipientAccount, TimelockState};
use crate::utils::{guard, vesting};

/// Validates a self-service withdrawal and applies its effects to the ledger
/// and custody totals. No transfer happens here.
pub fn debit_vested(
    state: &mut TimelockState,
    ledger: &mut Ledger,
    caller: &Pubkey,
    recipient: &Pubkey,
    amount: u64,
    now: i64,
) -> TimelockResult<RecipientAccount> {
    state.require_schedule_set()?;
    if caller != recipient {
        return Err(TimelockError::Unauthorized);
    }
    if *recipient == Pubkey::default() {
        return Err(TimelockError::ZeroAddress);
    }
    let account = ledger.account(recipient);
    if amount > account.allocated {
        return Err(TimelockError::InsufficientFunds);
    }
    if now <= state.schedule.cliff_edge {
        return Err(TimelockError::TooEarly);
    }
    let withdrawable = vesting::withdrawable_amount(&state.schedule, &account, now)?;
    if amount > withdrawable {
        return Err(TimelockError::ExceedsVested);
    }
    if amount == 0 {
        return Ok(account);
    }

    state.release_custody(amount)?;
    ledger.debit(recipient, amount)
}

/// Latch, effects, then `transfer`. The latch stays held while `transfer`
/// runs, so any nested withdrawal it triggers fails with `Reentrant`.
/// A zero amount that passes every check succeeds without calling `transfer`.
pub fn execute_withdrawal<E, F>(
    state: &mut TimelockState,
    ledger: &mut Ledger,
    caller: &Pubkey,
    recipient: &Pubkey,
    amount: u64,
    now: i64,
    transfer: F,
) -> core::result::Result<RecipientAccount, E>
where
    E: From<TimelockError>,
    F: FnOnce(&mut TimelockState, &mut Ledger) -> core::result::Result<(), E>,
{
    state.acquire_latch()?;
    let outcome = debit_vested(state, ledger, caller, recipient, amount, now)
        .map_err(E::from)
        .and_then(|account| {
            if amount == 0 {
                return Ok(account);
            }
            transfer(state, ledger).map(|()| account)
        });
    state.release_latch();
    outcome
}

pub fn withdraw(ctx: Context<Withdraw>, recipient: Pubkey, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let caller = ctx.accounts.recipient.key();

    let state_info = ctx.accounts.timelock_state.to_account_info();
    let ledger_info = ctx.accounts.ledger.to_account_info();
    let vault_info = ctx.accounts.vault.to_account_info();
    let recipient_info = ctx.accounts.recipient.to_account_info();
    let system_program_info = ctx.accounts.system_program.to_account_info();
    let state_key = state_info.key();
    let vault_bump = ctx.accounts.timelock_state.vault_bump;

    let accounts = &mut *ctx.accounts;
    let updated = execute_withdrawal(
        &mut accounts.timelock_state,
        &mut accounts.ledger,
        &caller,
        &recipient,
        amount,
        now,
        |state, ledger| -> Result<()> {
            guard::commit(&*state, &state_info)?;
            guard::commit(&*ledger, &ledger_info)?;

            let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, state_key.as_ref(), &[vault_bump]]];
            system_program::transfer(
                CpiContext::new_with_signer(
                    system_program_info,
                    system_program::Transfer {
                        from: vault_info,
                        to: recipient_info,
                    },
                    signer_seeds,
                ),
                amount,
            )
        },
    )?;
    if amount == 0 {
        return Ok(());
    }

    emit!(FundsTransferred {
        from: ctx.accounts.vault.key(),
        to: recipient,
        amount,
    });
    msg!(
        "Withdrawn {} by {}, remaining {}",
        amount,
        recipient,
        updated.allocated
    );

    Ok(())
}

#[derive(Accounts)]
pub struct Withdraw<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = timelock_state.bump)]
    pub timelock_state: Account<'info, TimelockState>,

    #[account(
        mut,
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
    pub recipient: Signer<'info>,

    pub system_program: Program<'info, System>,
}
