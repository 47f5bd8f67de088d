//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod record_store;

pub use record_store::*;
