use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{STATE_SEED, VAULT_SEED};
use crate::error::TimelockError;
use crate::state::TimelockState;
use crate::utils::guard;

/// Returns SPL tokens sent to the vault by mistake. Custody lamports are
/// never reachable from here.
pub fn recover_foreign_funds(ctx: Context<RecoverForeignFunds>, amount: u64) -> Result<()> {
    require!(amount > 0, TimelockError::ZeroAmount);

    let operator = ctx.accounts.operator.key();
    let mint = ctx.accounts.foreign_mint.key();
    let vault = ctx.accounts.vault.key();
    ctx.accounts
        .timelock_state
        .authorize_foreign_recovery(&operator, &mint)?;

    require_keys_eq!(
        ctx.accounts.foreign_token_account.mint,
        mint,
        TimelockError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.foreign_token_account.owner,
        vault,
        TimelockError::InvalidTokenAccount
    );
    require_keys_eq!(
        ctx.accounts.operator_destination.mint,
        mint,
        TimelockError::InvalidTokenMint
    );
    require_keys_eq!(
        ctx.accounts.operator_destination.owner,
        operator,
        TimelockError::InvalidTokenAccount
    );
    require!(
        ctx.accounts.foreign_token_account.amount >= amount,
        TimelockError::InsufficientFunds
    );

    let state_info = ctx.accounts.timelock_state.to_account_info();
    let state_key = state_info.key();
    let vault_bump = ctx.accounts.timelock_state.vault_bump;

    let st = &mut ctx.accounts.timelock_state;
    st.acquire_latch()?;
    guard::commit(&**st, &state_info)?;

    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_SEED, state_key.as_ref(), &[vault_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.foreign_token_account.to_account_info(),
                to: ctx.accounts.operator_destination.to_account_info(),
                authority: ctx.accounts.vault.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;
    st.release_latch();

    emit!(ForeignFundsRecovered {
        operator,
        mint,
        amount,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct RecoverForeignFunds<'info> {
    #[account(mut, seeds = [STATE_SEED], bump = timelock_state.bump)]
    pub timelock_state: Account<'info, TimelockState>,

    #[account(
        seeds = [VAULT_SEED, timelock_state.key().as_ref()],
        bump = timelock_state.vault_bump
    )]
    pub vault: SystemAccount<'info>,

    pub foreign_mint: Account<'info, Mint>,

    #[account(mut)]
    pub foreign_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub operator_destination: Account<'info, TokenAccount>,

    pub operator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct ForeignFundsRecovered {
    pub operator: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
}
