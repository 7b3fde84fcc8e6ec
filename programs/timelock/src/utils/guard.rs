//! Single-slot reentrancy latch around outgoing transfers.

use anchor_lang::prelude::*;

use crate::error::{TimelockError, TimelockResult};
use crate::state::TimelockState;

impl TimelockState {
    pub fn acquire_latch(&mut self) -> TimelockResult<()> {
        if self.entered {
            return Err(TimelockError::Reentrant);
        }
        self.entered = true;
        Ok(())
    }

    pub fn release_latch(&mut self) {
        self.entered = false;
    }
}

/// Writes `account` into its backing storage ahead of a CPI so the callee
/// observes post-effect balances and the held latch.
pub fn commit<T: AccountSerialize>(account: &T, info: &AccountInfo) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    let mut writer: &mut [u8] = &mut data[..];
    account.try_serialize(&mut writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latch_blocks_nested_entry() {
        let mut st = TimelockState::default();
        st.acquire_latch().unwrap();
        assert!(matches!(st.acquire_latch(), Err(TimelockError::Reentrant)));
        st.release_latch();
        st.acquire_latch().unwrap();
    }
}
