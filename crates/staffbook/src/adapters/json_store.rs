//! JSON file implementation of RecordStore
//!
//! Persists one collection per file as `{ "<collection>": [ ... ] }`.
//! A bare top-level array is accepted on load and rewritten in the keyed
//! shape on the next save.

use std::collections::BTreeMap;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::{DomainError, Record};
use crate::ports::RecordStore;

/// Whole-file JSON store for one record collection
#[derive(Debug, Clone)]
pub struct JsonFileStore<R> {
    path: PathBuf,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> JsonFileStore<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the backing file with an empty collection if it is absent.
    ///
    /// Returns `true` when a new file was written.
    pub fn init(&self) -> Result<bool, DomainError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&[])?;
        tracing::info!("Initialized {} store at {:?}", R::COLLECTION, self.path);
        Ok(true)
    }

    /// Overwrite the backing file with an empty collection
    pub fn reset(&self) -> Result<(), DomainError> {
        self.save(&[])?;
        tracing::info!("Reset {} store at {:?}", R::COLLECTION, self.path);
        Ok(())
    }

    fn read_document(&self) -> Option<Value> {
        if !self.path.exists() {
            tracing::debug!("No store file at {:?}, using empty collection", self.path);
            return None;
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", self.path, e);
                return None;
            }
        };

        match serde_json::from_str(&content) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Invalid JSON in {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn decode(&self, document: Value) -> Decoded<R> {
        let items = match document {
            Value::Object(mut fields) => match fields.remove(R::COLLECTION) {
                Some(Value::Array(items)) => items,
                Some(_) => {
                    return Decoded::degraded(format!("'{}' is not a list", R::COLLECTION))
                }
                None => {
                    return Decoded::degraded(format!("no '{}' collection", R::COLLECTION))
                }
            },
            Value::Array(items) => {
                tracing::debug!("Lifting legacy list in {:?}", self.path);
                items
            }
            _ => return Decoded::degraded("unexpected document shape".to_string()),
        };

        // Records are decoded one by one so a bad entry hides only itself.
        let total = items.len();
        let mut records = Vec::with_capacity(total);
        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value(item) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(
                    "Skipping malformed {} record #{} in {:?}: {}",
                    R::COLLECTION,
                    index,
                    self.path,
                    e
                ),
            }
        }

        let skipped = total - records.len();
        Decoded {
            records,
            degraded: (skipped > 0)
                .then(|| format!("{} of {} records are malformed", skipped, total)),
        }
    }

    fn read(&self) -> Decoded<R> {
        let decoded = match self.read_document() {
            Some(document) => self.decode(document),
            None => Decoded::complete(Vec::new()),
        };
        if let Some(reason) = &decoded.degraded {
            tracing::warn!("Partial load of {:?}: {}", self.path, reason);
        }
        decoded
    }
}

/// Records read from one document
struct Decoded<R> {
    records: Vec<R>,
    /// Why some stored data could not be represented, if any
    degraded: Option<String>,
}

impl<R> Decoded<R> {
    fn complete(records: Vec<R>) -> Self {
        Self {
            records,
            degraded: None,
        }
    }

    fn degraded(reason: String) -> Self {
        Self {
            records: Vec::new(),
            degraded: Some(reason),
        }
    }
}

impl<R: Record> RecordStore<R> for JsonFileStore<R> {
    fn load(&self) -> Vec<R> {
        self.read().records
    }

    /// Refuses to rewrite a document that only partially decoded.
    /// Missing files and invalid JSON load as empty and may be overwritten.
    fn load_for_write(&self) -> Result<Vec<R>, DomainError> {
        let decoded = self.read();
        match decoded.degraded {
            None => Ok(decoded.records),
            Some(reason) => Err(DomainError::Storage(format!(
                "refusing to overwrite {:?}: {}",
                self.path, reason
            ))),
        }
    }

    fn save(&self, records: &[R]) -> Result<(), DomainError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let document = BTreeMap::from([(R::COLLECTION, records)]);
        let mut content = serde_json::to_string_pretty(&document)
            .map_err(|e| DomainError::Storage(e.to_string()))?;
        content.push('\n');

        fs::write(&self.path, content)?;
        tracing::debug!("Saved {} {} to {:?}", records.len(), R::COLLECTION, self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: u64,
        label: String,
        #[serde(default)]
        note: Option<String>,
    }

    impl Record for Item {
        const COLLECTION: &'static str = "items";
        const ENTITY: &'static str = "Item";

        fn id(&self) -> u64 {
            self.id
        }
    }

    fn item(id: u64, label: &str) -> Item {
        Item {
            id,
            label: label.to_string(),
            note: None,
        }
    }

    fn patch(value: Value) -> crate::ports::RecordPatch {
        value.as_object().cloned().unwrap()
    }

    fn store_in(dir: &TempDir) -> JsonFileStore<Item> {
        JsonFileStore::new(dir.path().join("items.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_invalid_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not valid json").unwrap();
        assert!(store.load().is_empty());

        fs::write(store.path(), "").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_unexpected_shapes_are_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), r#"{"other": []}"#).unwrap();
        assert!(store.load().is_empty());

        fs::write(store.path(), "42").unwrap();
        assert!(store.load().is_empty());

        fs::write(store.path(), r#"{"items": [{"id": "x"}]}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_record_hides_only_itself() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let original = r#"{"items": [{"id": 1, "label": "first"}, {"id": 2}, {"id": 3, "label": "third"}]}"#;
        fs::write(store.path(), original).unwrap();

        assert_eq!(store.load(), vec![item(1, "first"), item(3, "third")]);
        assert_eq!(store.get(3), Some(item(3, "third")));
    }

    #[test]
    fn test_writes_refused_over_partially_decoded_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let original = r#"{"items": [{"id": 1, "label": "first"}, {"id": 2}]}"#;
        fs::write(store.path(), original).unwrap();

        assert!(matches!(
            store.add(item(5, "fifth")),
            Err(DomainError::Storage(_))
        ));
        assert!(matches!(
            store.update(1, patch(json!({"label": "renamed"}))),
            Err(DomainError::Storage(_))
        ));
        assert!(matches!(store.delete(1), Err(DomainError::Storage(_))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), original);

        fs::write(store.path(), r#"{"other": [{"id": 1}]}"#).unwrap();
        assert!(matches!(
            store.add(item(5, "fifth")),
            Err(DomainError::Storage(_))
        ));
    }

    #[test]
    fn test_invalid_json_may_be_overwritten() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not valid json").unwrap();

        store.add(item(1, "first")).unwrap();
        assert_eq!(store.get_all(), vec![item(1, "first")]);
    }

    #[test]
    fn test_load_legacy_list_matches_keyed_shape() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        fs::write(store.path(), r#"[{"id": 1, "label": "first"}]"#).unwrap();
        let legacy = store.load();

        fs::write(store.path(), r#"{"items": [{"id": 1, "label": "first"}]}"#).unwrap();
        let keyed = store.load();

        assert_eq!(legacy, vec![item(1, "first")]);
        assert_eq!(legacy, keyed);
    }

    #[test]
    fn test_save_rewrites_legacy_list_as_keyed_object() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"[{"id": 1, "label": "first"}]"#).unwrap();

        store.add(item(2, "second")).unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["items"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_save_creates_parent_dirs_and_keeps_unicode() {
        let dir = TempDir::new().unwrap();
        let store: JsonFileStore<Item> =
            JsonFileStore::new(dir.path().join("nested").join("deeper").join("items.json"));

        store.save(&[item(1, "José Muñoz")]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("José Muñoz"));
        assert!(content.contains("\n  \"items\""));
        assert_eq!(store.load(), vec![item(1, "José Muñoz")]);
    }

    #[test]
    fn test_add_rejects_duplicate_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.add(item(1, "first")).unwrap();
        let err = store.add(item(1, "again")).unwrap_err();

        assert!(matches!(err, DomainError::DuplicateKey { .. }));
        assert_eq!(store.get_all(), vec![item(1, "first")]);
    }

    #[test]
    fn test_update_is_shallow_merge() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .add(Item {
                id: 1,
                label: "first".to_string(),
                note: Some("keep me".to_string()),
            })
            .unwrap();

        let merged = store.update(1, patch(json!({"label": "renamed"}))).unwrap();

        let expected = Item {
            id: 1,
            label: "renamed".to_string(),
            note: Some("keep me".to_string()),
        };
        assert_eq!(merged, expected);
        assert_eq!(store.get(1), Some(expected));
    }

    #[test]
    fn test_update_allows_unchanged_id() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add(item(1, "first")).unwrap();

        let merged = store
            .update(1, patch(json!({"id": 1, "label": "same id"})))
            .unwrap();
        assert_eq!(merged, item(1, "same id"));
    }

    #[test]
    fn test_update_rejects_id_change() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add(item(1, "first")).unwrap();

        let err = store.update(1, patch(json!({"id": 2}))).unwrap_err();

        assert!(matches!(err, DomainError::ImmutableField { .. }));
        assert_eq!(store.get_all(), vec![item(1, "first")]);
    }

    #[test]
    fn test_update_missing_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add(item(1, "first")).unwrap();

        let err = store.update(9, patch(json!({"label": "x"}))).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_update_with_wrong_type_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add(item(1, "first")).unwrap();

        let err = store.update(1, patch(json!({"label": 5}))).unwrap_err();

        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(store.get_all(), vec![item(1, "first")]);
    }

    #[test]
    fn test_delete_then_delete_again() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add(item(1, "first")).unwrap();
        store.add(item(2, "second")).unwrap();

        store.delete(1).unwrap();
        assert_eq!(store.get(1), None);
        assert_eq!(store.get_all(), vec![item(2, "second")]);

        assert!(store.delete(1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_init_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        assert!(store.init().unwrap());
        store.add(item(1, "first")).unwrap();
        assert!(!store.init().unwrap());
        assert_eq!(store.get_all().len(), 1);

        store.reset().unwrap();
        assert!(store.get_all().is_empty());
        let raw: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw, json!({"items": []}));
    }
}
