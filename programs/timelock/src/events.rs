use anchor_lang::prelude::*;

/// Native funds moved into or out of the vault.
#[event]
pub struct FundsTransferred {
    pub from: Pubkey,
    pub to: Pubkey,
    pub amount: u64,
}

/// One per credited recipient, for single and bulk allocation alike.
#[event]
pub struct AllocationPerformed {
    pub recipient: Pubkey,
    pub amount: u64,
}
