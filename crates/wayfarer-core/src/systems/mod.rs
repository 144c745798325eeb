//! Systems - logic that operates on components

mod alarm;
mod ledger;
mod vitals;
mod walk;

pub use alarm::*;
pub use ledger::*;
pub use vitals::*;
pub use walk::*;
