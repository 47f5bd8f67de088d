//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Record: identifier-keyed entity persisted in a named collection
//! - Employee: staff member owning an ordered list of contracts
//! - Contract: employment contract embedded in its employee

mod contract;
mod employee;
mod record;

pub use contract::*;
pub use employee::*;
pub use record::*;
