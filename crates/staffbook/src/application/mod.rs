//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations on top of a record store.
//! Data flows one way: reports -> contracts/employees -> store.

mod contract_service;
mod employee_service;
mod report_service;

pub use contract_service::ContractService;
pub use employee_service::EmployeeService;
pub use report_service::{ExpiredContractsReport, ReportService};
