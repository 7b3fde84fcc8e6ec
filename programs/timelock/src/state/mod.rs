pub mod ledger;
pub mod timelock_state;

pub use ledger::*;
pub use timelock_state::*;
