//! Record - identifier-keyed entity stored in a named collection

use serde::{de::DeserializeOwned, Serialize};

/// An entity persisted as one JSON object inside a named collection.
///
/// The identifier lives in the field named by [`Record::ID_FIELD`] and is
/// unique within the collection.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Top-level key holding the collection in the persisted document
    const COLLECTION: &'static str;

    /// Name of the identifier field inside each record
    const ID_FIELD: &'static str = "id";

    /// Human-readable entity name used in error messages
    const ENTITY: &'static str;

    fn id(&self) -> u64;
}
