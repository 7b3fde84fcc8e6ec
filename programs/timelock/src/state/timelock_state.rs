use anchor_lang::prelude::*;

use crate::error::{TimelockError, TimelockResult};

/// Lifecycle phase. Transitions only move forward:
/// `Uninitialized -> ScheduleSet -> DepositsFinalized`.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord,
)]
pub enum Phase {
    /// Deposits open, schedule unset.
    #[default]
    Uninitialized,
    /// Deposits open, schedule fixed; allocations allowed.
    ScheduleSet,
    /// Deposits closed for good; only withdrawals remain.
    DepositsFinalized,
}

/// Vesting edges (Unix seconds, UTC).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    pub initialized_at: i64,
    /// Nothing vests at or before this instant.
    pub cliff_edge: i64,
    /// Everything is vested after this instant.
    pub release_edge: i64,
}

impl Schedule {
    pub const SIZE: usize = 8 + 8 + 8;

    /// Builds the edges relative to `now`. Offsets may be negative (backdated
    /// schedules) but must be non-zero, must not overflow, and must not land
    /// before the Unix epoch.
    pub fn from_offsets(now: i64, cliff_offset: i64, release_offset: i64) -> TimelockResult<Self> {
        if cliff_offset == 0 || release_offset == 0 {
            return Err(TimelockError::InvalidSchedule);
        }
        let cliff_edge = offset_edge(now, cliff_offset)?;
        let release_edge = offset_edge(now, release_offset)?;
        if cliff_edge >= release_edge {
            return Err(TimelockError::InvalidSchedule);
        }
        Ok(Self {
            initialized_at: now,
            cliff_edge,
            release_edge,
        })
    }

    /// Length of the linear window in seconds; also the per-recipient
    /// allocation floor so the vesting rate never rounds down to zero.
    pub fn duration(&self) -> u64 {
        self.release_edge.abs_diff(self.cliff_edge)
    }
}

fn offset_edge(now: i64, offset: i64) -> TimelockResult<i64> {
    let edge = now
        .checked_add(offset)
        .ok_or(TimelockError::InvalidSchedule)?;
    if edge < 0 {
        return Err(TimelockError::InvalidSchedule);
    }
    Ok(edge)
}

/// Singleton timelock state PDA.
#[account]
#[derive(Default, Debug)]
pub struct TimelockState {
    /// The single privileged identity.
    pub operator: Pubkey,
    pub phase: Phase,
    /// Meaningful once `phase >= ScheduleSet`.
    pub schedule: Schedule,
    /// Lamports held in the vault on behalf of the ledger (rent reserve excluded).
    pub custody_balance: u64,
    /// Reentrancy latch, held across outgoing transfers.
    pub entered: bool,
    pub bump: u8,
    pub ledger_bump: u8,
    pub vault_bump: u8,
}

impl TimelockState {
    pub const SIZE: usize =
        32 + // operator
        1 +  // phase
        Schedule::SIZE +
        8 +  // custody_balance
        1 +  // entered
        1 +  // bump
        1 +  // ledger_bump
        1;   // vault_bump

    pub fn require_operator(&self, caller: &Pubkey) -> TimelockResult<()> {
        if *caller != self.operator {
            return Err(TimelockError::Unauthorized);
        }
        Ok(())
    }

    pub fn is_schedule_set(&self) -> bool {
        self.phase >= Phase::ScheduleSet
    }

    pub fn deposits_open(&self) -> bool {
        self.phase < Phase::DepositsFinalized
    }

    pub fn require_schedule_set(&self) -> TimelockResult<()> {
        if !self.is_schedule_set() {
            return Err(TimelockError::ScheduleNotSet);
        }
        Ok(())
    }

    pub fn require_deposits_open(&self) -> TimelockResult<()> {
        if !self.deposits_open() {
            return Err(TimelockError::DepositsClosed);
        }
        Ok(())
    }

    /// Allocations need a fixed schedule and open deposits.
    pub fn require_allocations_open(&self) -> TimelockResult<()> {
        self.require_deposits_open()?;
        self.require_schedule_set()
    }

    pub fn set_schedule(
        &mut self,
        caller: &Pubkey,
        cliff_offset: i64,
        release_offset: i64,
        now: i64,
    ) -> TimelockResult<()> {
        self.require_operator(caller)?;
        if self.phase != Phase::Uninitialized {
            return Err(TimelockError::ScheduleAlreadySet);
        }
        self.schedule = Schedule::from_offsets(now, cliff_offset, release_offset)?;
        self.phase = Phase::ScheduleSet;
        Ok(())
    }

    pub fn finalize_deposits(&mut self, caller: &Pubkey) -> TimelockResult<()> {
        self.require_operator(caller)?;
        match self.phase {
            Phase::Uninitialized => Err(TimelockError::ScheduleNotSet),
            Phase::DepositsFinalized => Err(TimelockError::DepositsClosed),
            Phase::ScheduleSet => {
                self.phase = Phase::DepositsFinalized;
                Ok(())
            }
        }
    }

    pub fn record_deposit(&mut self, amount: u64) -> TimelockResult<()> {
        self.require_deposits_open()?;
        if amount == 0 {
            return Err(TimelockError::ZeroAmount);
        }
        self.custody_balance = self
            .custody_balance
            .checked_add(amount)
            .ok_or(TimelockError::MathOverflow)?;
        Ok(())
    }

    /// Debits custody for an outgoing native transfer.
    pub fn release_custody(&mut self, amount: u64) -> TimelockResult<()> {
        self.custody_balance = self
            .custody_balance
            .checked_sub(amount)
            .ok_or(TimelockError::InsufficientFunds)?;
        Ok(())
    }

    /// Operator pulls unallocated native funds back while deposits are open.
    /// Funds backing outstanding allocations are never released this way.
    pub fn reserve_emergency_sweep(
        &mut self,
        caller: &Pubkey,
        total_allocated: u64,
        amount: u64,
    ) -> TimelockResult<()> {
        self.require_operator(caller)?;
        self.require_deposits_open()?;
        if amount == 0 {
            return Err(TimelockError::ZeroAmount);
        }
        let remaining = self
            .custody_balance
            .checked_sub(amount)
            .ok_or(TimelockError::InsufficientFunds)?;
        if remaining < total_allocated {
            return Err(TimelockError::InsufficientFunds);
        }
        self.custody_balance = remaining;
        Ok(())
    }

    /// Foreign-asset recovery: operator only, never the custody asset.
    pub fn authorize_foreign_recovery(&self, caller: &Pubkey, mint: &Pubkey) -> TimelockResult<()> {
        self.require_operator(caller)?;
        if *mint == crate::constants::NATIVE_MINT {
            return Err(TimelockError::CustodyAsset);
        }
        Ok(())
    }
}
