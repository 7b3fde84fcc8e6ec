use anchor_lang::prelude::*;

use crate::constants::{MAX_BATCH_ALLOCATE, MAX_RECIPIENTS};
use crate::error::{TimelockError, TimelockResult};
use crate::state::TimelockState;

/// Per-recipient balance record.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecipientAccount {
    pub recipient: Pubkey,
    /// Unwithdrawn principal.
    pub allocated: u64,
    /// Cumulative amount released to date.
    pub withdrawn: u64,
}

impl RecipientAccount {
    pub const SIZE: usize = 32 + 8 + 8;

    /// Lifetime allocation; only `allocate` changes it.
    pub fn total(&self) -> TimelockResult<u64> {
        self.allocated
            .checked_add(self.withdrawn)
            .ok_or(TimelockError::MathOverflow)
    }
}

/// Allocation ledger PDA. Records are created on first credit and never removed.
#[account]
#[derive(Default, Debug)]
pub struct Ledger {
    /// Sum of `allocated` across all entries.
    pub total_allocated: u64,
    pub entries: Vec<RecipientAccount>,
}

impl Ledger {
    /// Space for discriminator + total + vec header + full capacity.
    pub const fn space() -> usize {
        8 + 8 + 4 + MAX_RECIPIENTS * RecipientAccount::SIZE
    }

    /// Record for `recipient`, or a zero record if it was never credited.
    pub fn account(&self, recipient: &Pubkey) -> RecipientAccount {
        self.entries
            .iter()
            .find(|e| e.recipient == *recipient)
            .copied()
            .unwrap_or(RecipientAccount {
                recipient: *recipient,
                ..Default::default()
            })
    }

    pub fn allocate(
        &mut self,
        state: &TimelockState,
        caller: &Pubkey,
        recipient: &Pubkey,
        amount: u64,
    ) -> TimelockResult<()> {
        state.require_operator(caller)?;
        state.require_allocations_open()?;
        self.credit(state, recipient, amount)
    }

    /// All-or-nothing: entries are applied to a staged copy that replaces the
    /// ledger only if every entry is valid.
    pub fn bulk_allocate(
        &mut self,
        state: &TimelockState,
        caller: &Pubkey,
        recipients: &[Pubkey],
        amounts: &[u64],
    ) -> TimelockResult<()> {
        state.require_operator(caller)?;
        state.require_allocations_open()?;
        if recipients.len() != amounts.len() {
            return Err(TimelockError::LengthMismatch);
        }
        if recipients.is_empty() {
            return Err(TimelockError::EmptyBatch);
        }
        if recipients.len() > MAX_BATCH_ALLOCATE {
            return Err(TimelockError::BatchTooLarge);
        }

        let mut staged = self.clone();
        for (recipient, amount) in recipients.iter().zip(amounts) {
            staged.credit(state, recipient, *amount)?;
        }
        *self = staged;
        Ok(())
    }

    fn credit(&mut self, state: &TimelockState, recipient: &Pubkey, amount: u64) -> TimelockResult<()> {
        if *recipient == Pubkey::default() {
            return Err(TimelockError::ZeroAddress);
        }
        if amount < state.schedule.duration() {
            return Err(TimelockError::AmountTooSmall);
        }

        let total_allocated = self
            .total_allocated
            .checked_add(amount)
            .ok_or(TimelockError::MathOverflow)?;
        if total_allocated > state.custody_balance {
            return Err(TimelockError::InsufficientFunds);
        }

        let entry = match self.entries.iter().position(|e| e.recipient == *recipient) {
            Some(idx) => &mut self.entries[idx],
            None => {
                if self.entries.len() >= MAX_RECIPIENTS {
                    return Err(TimelockError::RecipientListFull);
                }
                self.entries.push(RecipientAccount {
                    recipient: *recipient,
                    ..Default::default()
                });
                let last = self.entries.len() - 1;
                &mut self.entries[last]
            }
        };
        let allocated = entry
            .allocated
            .checked_add(amount)
            .ok_or(TimelockError::MathOverflow)?;
        // Lifetime total must stay representable for the vesting math.
        entry.total()?.checked_add(amount).ok_or(TimelockError::MathOverflow)?;

        entry.allocated = allocated;
        self.total_allocated = total_allocated;
        Ok(())
    }

    /// Moves `amount` from `allocated` to `withdrawn`.
    pub fn debit(&mut self, recipient: &Pubkey, amount: u64) -> TimelockResult<RecipientAccount> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.recipient == *recipient)
            .ok_or(TimelockError::InsufficientFunds)?;
        let allocated = entry
            .allocated
            .checked_sub(amount)
            .ok_or(TimelockError::InsufficientFunds)?;
        let withdrawn = entry
            .withdrawn
            .checked_add(amount)
            .ok_or(TimelockError::MathOverflow)?;
        let total_allocated = self
            .total_allocated
            .checked_sub(amount)
            .ok_or(TimelockError::MathOverflow)?;

        entry.allocated = allocated;
        entry.withdrawn = withdrawn;
        let updated = *entry;
        self.total_allocated = total_allocated;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::state::Phase;

    /// Schedule 100..1000 (floor 900) with 10_000 lamports in custody.
    fn open_state() -> (TimelockState, Pubkey) {
        let operator = Pubkey::new_unique();
        let mut st = TimelockState {
            operator,
            ..Default::default()
        };
        st.record_deposit(10_000).unwrap();
        st.set_schedule(&operator, 100, 1_000, 0).unwrap();
        (st, operator)
    }

    #[test]
    fn unknown_recipient_reads_as_zero() {
        let ledger = Ledger::default();
        let who = Pubkey::new_unique();
        let acct = ledger.account(&who);
        assert_eq!(acct.recipient, who);
        assert_eq!(acct.allocated, 0);
        assert_eq!(acct.withdrawn, 0);
    }

    #[test]
    fn allocations_accumulate() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        let alice = Pubkey::new_unique();
        ledger.allocate(&st, &op, &alice, 1_000).unwrap();
        ledger.allocate(&st, &op, &alice, 900).unwrap();
        assert_eq!(ledger.account(&alice).allocated, 1_900);
        assert_eq!(ledger.entries.len(), 1);
        assert_eq!(ledger.total_allocated, 1_900);
    }

    #[test]
    fn allocation_floor_is_the_vesting_duration() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        let err = ledger
            .allocate(&st, &op, &Pubkey::new_unique(), 899)
            .unwrap_err();
        assert!(matches!(err, TimelockError::AmountTooSmall));
        assert_eq!(err.category(), ErrorCategory::InvalidInput);
        assert!(ledger.entries.is_empty());
    }

    #[test]
    fn allocate_rejects_null_recipient_and_strangers() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        assert!(matches!(
            ledger.allocate(&st, &op, &Pubkey::default(), 1_000),
            Err(TimelockError::ZeroAddress)
        ));
        assert!(matches!(
            ledger.allocate(&st, &Pubkey::new_unique(), &Pubkey::new_unique(), 1_000),
            Err(TimelockError::Unauthorized)
        ));
    }

    #[test]
    fn allocate_requires_backing_custody() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        ledger
            .allocate(&st, &op, &Pubkey::new_unique(), 9_500)
            .unwrap();
        assert!(matches!(
            ledger.allocate(&st, &op, &Pubkey::new_unique(), 900),
            Err(TimelockError::InsufficientFunds)
        ));
        assert_eq!(ledger.total_allocated, 9_500);
    }

    #[test]
    fn allocate_respects_lifecycle() {
        let operator = Pubkey::new_unique();
        let mut st = TimelockState {
            operator,
            ..Default::default()
        };
        st.record_deposit(10_000).unwrap();
        let mut ledger = Ledger::default();
        let bob = Pubkey::new_unique();
        assert!(matches!(
            ledger.allocate(&st, &operator, &bob, 1_000),
            Err(TimelockError::ScheduleNotSet)
        ));
        st.set_schedule(&operator, 100, 1_000, 0).unwrap();
        st.finalize_deposits(&operator).unwrap();
        assert_eq!(st.phase, Phase::DepositsFinalized);
        assert!(matches!(
            ledger.allocate(&st, &operator, &bob, 1_000),
            Err(TimelockError::DepositsClosed)
        ));
    }

    #[test]
    fn bulk_length_mismatch_leaves_balances_unchanged() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        let alice = Pubkey::new_unique();
        ledger.allocate(&st, &op, &alice, 1_000).unwrap();
        let snapshot = ledger.clone();

        let recipients = [alice, Pubkey::new_unique(), Pubkey::new_unique()];
        let err = ledger
            .bulk_allocate(&st, &op, &recipients, &[1_000, 1_000])
            .unwrap_err();
        assert!(matches!(err, TimelockError::LengthMismatch));
        assert_eq!(ledger.entries, snapshot.entries);
        assert_eq!(ledger.total_allocated, snapshot.total_allocated);
    }

    #[test]
    fn bulk_is_all_or_nothing() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        let recipients = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::default()];
        assert!(matches!(
            ledger.bulk_allocate(&st, &op, &recipients, &[1_000, 2_000, 3_000]),
            Err(TimelockError::ZeroAddress)
        ));
        assert!(ledger.entries.is_empty());
        assert_eq!(ledger.total_allocated, 0);
    }

    #[test]
    fn bulk_credits_every_entry() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        let a = Pubkey::new_unique();
        let b = Pubkey::new_unique();
        ledger
            .bulk_allocate(&st, &op, &[a, b, a], &[1_000, 2_000, 900])
            .unwrap();
        assert_eq!(ledger.account(&a).allocated, 1_900);
        assert_eq!(ledger.account(&b).allocated, 2_000);
        assert_eq!(ledger.total_allocated, 3_900);
    }

    #[test]
    fn bulk_rejects_empty_and_oversized_batches() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        assert!(matches!(
            ledger.bulk_allocate(&st, &op, &[], &[]),
            Err(TimelockError::EmptyBatch)
        ));
        let many: Vec<Pubkey> = (0..=MAX_BATCH_ALLOCATE).map(|_| Pubkey::new_unique()).collect();
        let amounts = vec![900u64; many.len()];
        assert!(matches!(
            ledger.bulk_allocate(&st, &op, &many, &amounts),
            Err(TimelockError::BatchTooLarge)
        ));
    }

    #[test]
    fn recipient_list_capacity_is_enforced() {
        let operator = Pubkey::new_unique();
        let mut st = TimelockState {
            operator,
            ..Default::default()
        };
        st.record_deposit(u64::MAX / 2).unwrap();
        st.set_schedule(&operator, 1, 2, 0).unwrap();
        let mut ledger = Ledger::default();
        for _ in 0..MAX_RECIPIENTS {
            ledger.allocate(&st, &operator, &Pubkey::new_unique(), 1).unwrap();
        }
        assert!(matches!(
            ledger.allocate(&st, &operator, &Pubkey::new_unique(), 1),
            Err(TimelockError::RecipientListFull)
        ));
        let existing = ledger.entries[0].recipient;
        ledger.allocate(&st, &operator, &existing, 1).unwrap();
        assert_eq!(ledger.account(&existing).allocated, 2);
    }

    #[test]
    fn debit_moves_allocated_to_withdrawn() {
        let (st, op) = open_state();
        let mut ledger = Ledger::default();
        let alice = Pubkey::new_unique();
        ledger.allocate(&st, &op, &alice, 1_000).unwrap();
        let acct = ledger.debit(&alice, 400).unwrap();
        assert_eq!(acct.allocated, 600);
        assert_eq!(acct.withdrawn, 400);
        assert_eq!(acct.total().unwrap(), 1_000);
        assert_eq!(ledger.total_allocated, 600);
        assert!(matches!(
            ledger.debit(&alice, 601),
            Err(TimelockError::InsufficientFunds)
        ));
    }
}
