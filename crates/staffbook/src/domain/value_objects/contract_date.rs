//! ContractDate - Calendar date in `YYYY-MM-DD` form

use chrono::{Local, NaiveDate};

use crate::domain::errors::DomainError;

/// Textual pattern accepted for every stored date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Calendar date without time or timezone component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContractDate(NaiveDate);

impl ContractDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Current local calendar date
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parse a named field, mapping failures to `InvalidFormat`
    pub fn parse_field(field: &str, value: &str) -> Result<Self, DomainError> {
        value
            .parse()
            .map_err(|_| DomainError::invalid_format(field, value))
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for ContractDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl std::fmt::Display for ContractDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl std::str::FromStr for ContractDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|e| format!("Invalid date {:?}: {}", s, e))
    }
}
