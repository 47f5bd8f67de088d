//! Contract - employment contract embedded in an employee record

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::Employee;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::ContractDate;

/// Identifier given to an employee's first contract
pub const FIRST_CONTRACT_ID: u64 = 101;

/// Contract record
///
/// Dates are kept in their textual `YYYY-MM-DD` form so that documents
/// written by other tools round-trip untouched; use [`Contract::validate`]
/// to check them. A stored date that is not a string (null, a number, or
/// absent) loads as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub contract_id: u64,
    #[serde(default, deserialize_with = "lenient_date")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub end_date: Option<String>,
    pub salary: f64,
    /// Fields this crate does not model, kept as stored
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// Partial changes to an existing contract
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractUpdate {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub salary: Option<f64>,
}

/// Contract flattened together with its owner's identity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContractWithOwner {
    #[serde(flatten)]
    pub contract: Contract,
    pub employee_id: u64,
    pub employee_name: String,
    pub employee_position: String,
}

impl Contract {
    /// Create a validated contract
    pub fn new(
        contract_id: u64,
        start_date: &str,
        end_date: &str,
        salary: f64,
    ) -> Result<Self, DomainError> {
        let contract = Self {
            contract_id,
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
            salary,
            extra: Map::new(),
        };
        contract.validate()?;
        Ok(contract)
    }

    /// Check date format, date order and salary, in that order.
    pub fn validate(&self) -> Result<(), DomainError> {
        let start_text = self.start_date.as_deref().unwrap_or_default();
        let end_text = self.end_date.as_deref().unwrap_or_default();
        let start = ContractDate::parse_field("start_date", start_text)?;
        let end = ContractDate::parse_field("end_date", end_text)?;

        if end < start {
            return Err(DomainError::InvalidRange {
                start: start_text.to_string(),
                end: end_text.to_string(),
            });
        }

        if !self.salary.is_finite() || self.salary < 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "salary must be a non-negative number, got {}",
                self.salary
            )));
        }

        Ok(())
    }

    /// Next contract identifier within one employee's list
    pub fn next_id(existing: &[Contract]) -> Result<u64, DomainError> {
        match existing.iter().map(|c| c.contract_id).max() {
            None => Ok(FIRST_CONTRACT_ID),
            Some(max) => max.checked_add(1).ok_or_else(|| {
                DomainError::InvalidInput("contract identifier space exhausted".to_string())
            }),
        }
    }

    /// Parsed end date, or `None` if the stored value is not a valid date
    pub fn parsed_end_date(&self) -> Option<ContractDate> {
        self.end_date.as_deref()?.parse().ok()
    }

    /// Expired when the end date parses and is strictly before `reference`.
    pub fn is_expired_at(&self, reference: ContractDate) -> bool {
        self.parsed_end_date().is_some_and(|end| end < reference)
    }

    /// Apply a partial update and re-validate the result
    pub fn merged(&self, update: &ContractUpdate) -> Result<Self, DomainError> {
        let merged = Self {
            start_date: update
                .start_date
                .clone()
                .or_else(|| self.start_date.clone()),
            end_date: update.end_date.clone().or_else(|| self.end_date.clone()),
            salary: update.salary.unwrap_or(self.salary),
            ..self.clone()
        };
        merged.validate()?;
        Ok(merged)
    }
}

impl ContractUpdate {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none() && self.salary.is_none()
    }
}

impl ContractWithOwner {
    pub fn new(contract: Contract, owner: &Employee) -> Self {
        Self {
            contract,
            employee_id: owner.id,
            employee_name: owner.name.clone(),
            employee_position: owner.position.clone(),
        }
    }
}
