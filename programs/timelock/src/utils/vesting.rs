//! Linear cliff vesting.
//! - now <= cliff_edge: nothing is withdrawable
//! - now > release_edge: the whole remaining allocation is withdrawable
//! - otherwise: total * (now - cliff_edge) / (release_edge - cliff_edge),
//!   truncated, minus what was already withdrawn
//!
//! `total` is the lifetime allocation (allocated + withdrawn), so further
//! allocations after withdrawals began re-scale the curve for the whole total.

use crate::error::{TimelockError, TimelockResult};
use crate::state::{RecipientAccount, Schedule};

/// Portion of `total` vested at `now`.
pub fn vested_amount(schedule: &Schedule, total: u64, now: i64) -> TimelockResult<u64> {
    if now <= schedule.cliff_edge {
        return Ok(0);
    }
    if now >= schedule.release_edge {
        return Ok(total);
    }
    let elapsed = now.abs_diff(schedule.cliff_edge) as u128;
    let window = schedule.duration() as u128;
    let v = (total as u128)
        .checked_mul(elapsed)
        .ok_or(TimelockError::MathOverflow)?
        / window;
    u64::try_from(v).map_err(|_| TimelockError::MathOverflow)
}

/// Amount `account` may withdraw at `now`.
pub fn withdrawable_amount(
    schedule: &Schedule,
    account: &RecipientAccount,
    now: i64,
) -> TimelockResult<u64> {
    if now <= schedule.cliff_edge {
        return Ok(0);
    }
    if now > schedule.release_edge {
        return Ok(account.allocated);
    }
    let vested = vested_amount(schedule, account.total()?, now)?;
    Ok(vested.saturating_sub(account.withdrawn))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(cliff_edge: i64, release_edge: i64) -> Schedule {
        Schedule {
            initialized_at: 0,
            cliff_edge,
            release_edge,
        }
    }

    fn account(allocated: u64, withdrawn: u64) -> RecipientAccount {
        RecipientAccount {
            allocated,
            withdrawn,
            ..Default::default()
        }
    }

    #[test]
    fn nothing_vests_up_to_the_cliff() {
        let s = schedule(100, 1_000);
        let a = account(1_000, 0);
        for now in [0, 50, 99, 100] {
            assert_eq!(withdrawable_amount(&s, &a, now).unwrap(), 0);
        }
    }

    #[test]
    fn everything_remaining_after_release() {
        let s = schedule(100, 1_000);
        let a = account(700, 300);
        assert_eq!(withdrawable_amount(&s, &a, 1_001).unwrap(), 700);
        assert_eq!(withdrawable_amount(&s, &a, i64::MAX).unwrap(), 700);
    }

    #[test]
    fn reaches_total_exactly_at_release_edge() {
        let s = schedule(100, 1_000);
        assert_eq!(vested_amount(&s, 1_000, 1_000).unwrap(), 1_000);
        let a = account(500, 500);
        assert_eq!(withdrawable_amount(&s, &a, 1_000).unwrap(), 500);
    }

    #[test]
    fn halfway_through_the_window() {
        let s = schedule(100, 1_000);
        // 1000 * 450 / 900
        assert_eq!(withdrawable_amount(&s, &account(1_000, 0), 550).unwrap(), 500);
        assert_eq!(withdrawable_amount(&s, &account(500, 500), 550).unwrap(), 0);
    }

    #[test]
    fn truncates_toward_zero() {
        let s = schedule(0, 3);
        assert_eq!(vested_amount(&s, 10, 1).unwrap(), 3);
        assert_eq!(vested_amount(&s, 10, 2).unwrap(), 6);
    }

    #[test]
    fn monotonic_in_time() {
        let s = schedule(1_000, 4_600);
        let a = account(3_600 * 7 + 13, 0);
        let mut prev = 0;
        for now in (900..4_700).step_by(7) {
            let w = withdrawable_amount(&s, &a, now).unwrap();
            assert!(w >= prev, "withdrawable fell at t={now}");
            prev = w;
        }
        assert_eq!(prev, a.allocated);
    }

    #[test]
    fn floor_rate_unlocks_at_least_one_unit_per_second() {
        let s = schedule(0, 900);
        let a = account(900, 0);
        for now in 1..=900 {
            assert_eq!(withdrawable_amount(&s, &a, now).unwrap(), now as u64);
        }
    }

    #[test]
    fn large_allocations_do_not_overflow() {
        let s = schedule(0, i64::MAX);
        let v = vested_amount(&s, u64::MAX, i64::MAX / 2).unwrap();
        assert!(v > 0 && v < u64::MAX);
    }
}
