//! Staffbook Library
//!
//! Employee and contract records persisted as JSON documents.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Employee, Contract, Record)
//!   - `value_objects/`: Immutable value types (ContractDate)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Record store interface
//!
//! - **Adapters** (`adapters/`): Port implementations (JSON file store)
//!
//! - **Application** (`application/`): Use cases (employees, contracts, reports)
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use staffbook::{ContractService, Employee, EmployeeService, JsonFileStore};
//!
//! let store = Arc::new(JsonFileStore::<Employee>::new("data/employees.json"));
//! let employees = EmployeeService::new(Arc::clone(&store));
//! let contracts = ContractService::new(store);
//!
//! let ana = employees.add_employee("Ana", "Engineer")?;
//! contracts.associate_contract(ana.id, "2025-01-01", "2025-12-31", 1800.0)?;
//! # Ok::<(), staffbook::DomainError>(())
//! ```

pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use adapters::JsonFileStore;
pub use application::{ContractService, EmployeeService, ExpiredContractsReport, ReportService};
pub use domain::{
    Contract, ContractDate, ContractUpdate, ContractWithOwner, DomainError, Employee, Record,
    DATE_FORMAT, FIRST_CONTRACT_ID,
};
pub use ports::{RecordPatch, RecordStore};
