//! Employee - staff member with embedded contracts

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Contract, Record};
use crate::domain::errors::DomainError;

/// Employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    pub position: String,
    /// Owned contracts in insertion order
    #[serde(default)]
    pub contracts: Vec<Contract>,
    /// Fields this crate does not model, kept as stored
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Employee {
    /// Create an employee with no contracts.
    ///
    /// `name` and `position` are trimmed and must not be blank.
    pub fn new(id: u64, name: &str, position: &str) -> Result<Self, DomainError> {
        let name = name.trim();
        let position = position.trim();

        if name.is_empty() {
            return Err(DomainError::InvalidInput(
                "name must not be empty".to_string(),
            ));
        }
        if position.is_empty() {
            return Err(DomainError::InvalidInput(
                "position must not be empty".to_string(),
            ));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            position: position.to_string(),
            contracts: Vec::new(),
            extra: Map::new(),
        })
    }

    /// Next identifier for a collection: 1 when empty, else max + 1
    pub fn next_id(existing: &[Employee]) -> Result<u64, DomainError> {
        match existing.iter().map(|e| e.id).max() {
            None => Ok(1),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                DomainError::InvalidInput("employee identifier space exhausted".to_string())
            }),
        }
    }

    pub fn find_contract(&self, contract_id: u64) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.contract_id == contract_id)
    }
}

impl Record for Employee {
    const COLLECTION: &'static str = "employees";
    const ENTITY: &'static str = "Employee";

    fn id(&self) -> u64 {
        self.id
    }
}
