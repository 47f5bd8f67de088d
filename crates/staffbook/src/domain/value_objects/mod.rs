//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod contract_date;

pub use contract_date::*;
