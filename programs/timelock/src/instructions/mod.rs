pub mod initialize;
pub mod deposit;
pub mod set_schedule;
pub mod finalize_deposits;
pub mod allocate;
pub mod bulk_allocate;
pub mod withdraw;
pub mod recover_foreign_funds;
pub mod emergency_sweep;
pub mod emit_withdrawable_quote;

pub use initialize::*;
pub use deposit::*;
pub use set_schedule::*;
pub use finalize_deposits::*;
pub use allocate::*;
pub use bulk_allocate::*;
pub use withdraw::*;
pub use recover_foreign_funds::*;
pub use emergency_sweep::*;
pub use emit_withdrawable_quote::*;
