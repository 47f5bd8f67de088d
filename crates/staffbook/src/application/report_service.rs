//! Report Application Service (Use Case)
//!
//! Read-only joins between employees and their contracts.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;

use super::{ContractService, EmployeeService};
use crate::domain::{ContractDate, ContractWithOwner, Employee};
use crate::ports::RecordStore;

/// An employee with the subset of its contracts that have expired
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpiredContractsReport {
    pub employee: Employee,
    pub expired_contracts: Vec<ContractWithOwner>,
}

/// Application service for reports
pub struct ReportService<S: RecordStore<Employee>> {
    employees: EmployeeService<S>,
    contracts: ContractService<S>,
}

impl<S: RecordStore<Employee>> ReportService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            employees: EmployeeService::new(Arc::clone(&store)),
            contracts: ContractService::new(store),
        }
    }

    /// An employee with its embedded contracts
    pub fn employee_with_contracts(&self, employee_id: u64) -> Option<Employee> {
        self.employees.find_employee(employee_id)
    }

    /// Expired contracts grouped by owner, relative to `reference` or today.
    ///
    /// An unparsable reference date yields an empty report.
    pub fn employees_with_expired_contracts(
        &self,
        reference: Option<&str>,
    ) -> Vec<ExpiredContractsReport> {
        self.group_by_owner(self.contracts.list_expired_contracts(reference))
    }

    pub fn employees_with_expired_contracts_at(
        &self,
        reference: ContractDate,
    ) -> Vec<ExpiredContractsReport> {
        self.group_by_owner(self.contracts.list_expired_contracts_at(reference))
    }

    /// Groups in first-seen order. Entries whose owner can no longer be
    /// found are dropped.
    fn group_by_owner(&self, expired: Vec<ContractWithOwner>) -> Vec<ExpiredContractsReport> {
        let mut reports: Vec<ExpiredContractsReport> = Vec::new();
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut missing: HashSet<u64> = HashSet::new();

        for entry in expired {
            let owner_id = entry.employee_id;
            if let Some(&slot) = index.get(&owner_id) {
                reports[slot].expired_contracts.push(entry);
                continue;
            }
            if missing.contains(&owner_id) {
                continue;
            }

            match self.employees.find_employee(owner_id) {
                Some(employee) => {
                    index.insert(owner_id, reports.len());
                    reports.push(ExpiredContractsReport {
                        employee,
                        expired_contracts: vec![entry],
                    });
                }
                None => {
                    tracing::debug!("Employee {} vanished before report resolution", owner_id);
                    missing.insert(owner_id);
                }
            }
        }

        reports
    }
}
