//! Record Store Port
//!
//! Identifier-keyed CRUD over a whole collection of records.

use serde_json::{Map, Value};

use crate::domain::{errors::DomainError, Record};

/// Field changes applied by [`RecordStore::update`]
pub type RecordPatch = Map<String, Value>;

/// Store interface for one collection of records.
///
/// Every call reads the full collection, and every mutation rewrites it.
/// There is no locking: concurrent writers race and the last write wins.
pub trait RecordStore<R: Record> {
    /// Load the collection. Never fails; unreadable data yields an empty list.
    fn load(&self) -> Vec<R>;

    /// Load the collection ahead of a rewrite.
    ///
    /// Fails when `load` could only return part of the stored data, so that
    /// a partial view is never written back over the full document.
    fn load_for_write(&self) -> Result<Vec<R>, DomainError> {
        Ok(self.load())
    }

    /// Replace the persisted collection
    fn save(&self, records: &[R]) -> Result<(), DomainError>;

    /// All records in storage order
    fn get_all(&self) -> Vec<R> {
        self.load()
    }

    /// Find a record by identifier (linear scan)
    fn get(&self, id: u64) -> Option<R> {
        self.load().into_iter().find(|r| r.id() == id)
    }

    /// Append a record. Fails with `DuplicateKey` if the identifier exists.
    fn add(&self, record: R) -> Result<(), DomainError> {
        let mut records = self.load_for_write()?;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(DomainError::duplicate_key(R::ENTITY, record.id()));
        }
        records.push(record);
        self.save(&records)
    }

    /// Shallow-merge `patch` into the record with identifier `id`.
    ///
    /// Fails with `ImmutableField` if the patch changes the identifier and
    /// with `NotFound` if no such record exists.
    fn update(&self, id: u64, patch: RecordPatch) -> Result<R, DomainError> {
        if let Some(new_id) = patch.get(R::ID_FIELD) {
            if new_id.as_u64() != Some(id) {
                return Err(DomainError::ImmutableField {
                    field: R::ID_FIELD.to_string(),
                });
            }
        }

        let mut records = self.load_for_write()?;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| DomainError::not_found(R::ENTITY, id))?;

        let mut fields = match serde_json::to_value(&*slot) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                return Err(DomainError::Storage(format!(
                    "{} {} does not serialize to an object",
                    R::ENTITY,
                    id
                )))
            }
            Err(e) => return Err(DomainError::Storage(e.to_string())),
        };
        fields.extend(patch);

        let merged: R = serde_json::from_value(Value::Object(fields))
            .map_err(|e| DomainError::InvalidInput(format!("invalid update: {}", e)))?;
        *slot = merged.clone();

        self.save(&records)?;
        Ok(merged)
    }

    /// Remove a record. Fails with `NotFound` if the identifier is absent.
    fn delete(&self, id: u64) -> Result<(), DomainError> {
        let mut records = self.load_for_write()?;
        let before = records.len();
        records.retain(|r| r.id() != id);
        if records.len() == before {
            return Err(DomainError::not_found(R::ENTITY, id));
        }
        self.save(&records)
    }
}
