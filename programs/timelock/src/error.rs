use anchor_lang::prelude::*;

/// Result type of the pure ledger core.
pub type TimelockResult<T> = core::result::Result<T, TimelockError>;

/// Custom error codes for the timelock program.
#[error_code]
pub enum TimelockError {
    #[msg("Unauthorized: operator or recipient signature required")]
    Unauthorized,

    #[msg("Schedule has already been set")]
    ScheduleAlreadySet,

    #[msg("Schedule has not been set")]
    ScheduleNotSet,

    #[msg("Deposits are finalized")]
    DepositsClosed,

    #[msg("Invalid schedule: offsets must be non-zero and cliff must precede release")]
    InvalidSchedule,

    #[msg("Recipient is the null address")]
    ZeroAddress,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Recipients and amounts differ in length")]
    LengthMismatch,

    #[msg("Allocation is below the vesting duration floor")]
    AmountTooSmall,

    #[msg("Empty batch")]
    EmptyBatch,

    #[msg("Batch size too large")]
    BatchTooLarge,

    #[msg("Recipient list is full")]
    RecipientListFull,

    #[msg("Asset is the custody asset")]
    CustodyAsset,

    #[msg("Invalid token mint")]
    InvalidTokenMint,

    #[msg("Invalid token account")]
    InvalidTokenAccount,

    #[msg("Insufficient funds")]
    InsufficientFunds,

    #[msg("Nothing unlocks before the cliff")]
    TooEarly,

    #[msg("Amount exceeds the vested portion")]
    ExceedsVested,

    #[msg("Reentrant call")]
    Reentrant,

    #[msg("Math overflow")]
    MathOverflow,
}

/// Coarse failure classes callers can branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Unauthorized,
    InvalidState,
    InvalidSchedule,
    InvalidInput,
    InsufficientFunds,
    TooEarly,
    ExceedsVested,
    Reentrant,
}

impl TimelockError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            TimelockError::Unauthorized => ErrorCategory::Unauthorized,
            TimelockError::ScheduleAlreadySet
            | TimelockError::ScheduleNotSet
            | TimelockError::DepositsClosed => ErrorCategory::InvalidState,
            TimelockError::InvalidSchedule => ErrorCategory::InvalidSchedule,
            TimelockError::ZeroAddress
            | TimelockError::ZeroAmount
            | TimelockError::LengthMismatch
            | TimelockError::AmountTooSmall
            | TimelockError::EmptyBatch
            | TimelockError::BatchTooLarge
            | TimelockError::RecipientListFull
            | TimelockError::CustodyAsset
            | TimelockError::InvalidTokenMint
            | TimelockError::InvalidTokenAccount
            | TimelockError::MathOverflow => ErrorCategory::InvalidInput,
            TimelockError::InsufficientFunds => ErrorCategory::InsufficientFunds,
            TimelockError::TooEarly => ErrorCategory::TooEarly,
            TimelockError::ExceedsVested => ErrorCategory::ExceedsVested,
            TimelockError::Reentrant => ErrorCategory::Reentrant,
        }
    }
}
