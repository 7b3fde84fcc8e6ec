pub mod guard;
pub mod vesting;
