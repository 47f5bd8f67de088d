//! Adapters
//!
//! Concrete implementations of the ports.

mod json_store;

pub use json_store::JsonFileStore;
