//! Contract Application Service (Use Case)
//!
//! Contracts live inside their employee record. Every change rewrites the
//! owner's `contracts` field through a partial store update.

use std::sync::Arc;

use super::EmployeeService;
use crate::domain::{
    Contract, ContractDate, ContractUpdate, ContractWithOwner, DomainError, Employee,
};
use crate::ports::{RecordPatch, RecordStore};

/// Application service for contract operations
pub struct ContractService<S: RecordStore<Employee>> {
    store: Arc<S>,
    employees: EmployeeService<S>,
}

impl<S: RecordStore<Employee>> ContractService<S> {
    pub fn new(store: Arc<S>) -> Self {
        let employees = EmployeeService::new(Arc::clone(&store));
        Self { store, employees }
    }

    /// Attach a new contract to an employee.
    ///
    /// Checks run in order: employee exists, date format, date range, salary.
    pub fn associate_contract(
        &self,
        employee_id: u64,
        start_date: &str,
        end_date: &str,
        salary: f64,
    ) -> Result<Contract, DomainError> {
        let mut employee = self.require_employee(employee_id)?;

        let contract = Contract::new(
            Contract::next_id(&employee.contracts)?,
            start_date,
            end_date,
            salary,
        )?;
        employee.contracts.push(contract.clone());
        self.persist_contracts(employee_id, &employee.contracts)?;

        tracing::info!(
            "Associated Contract {} with Employee {} ({} - {})",
            contract.contract_id,
            employee_id,
            start_date,
            end_date
        );

        Ok(contract)
    }

    /// Contracts of one employee in storage order
    pub fn list_contracts(&self, employee_id: u64) -> Result<Vec<Contract>, DomainError> {
        Ok(self.require_employee(employee_id)?.contracts)
    }

    /// Find one contract of an employee. Absence is not an error.
    pub fn get_contract(&self, employee_id: u64, contract_id: u64) -> Option<Contract> {
        self.employees
            .find_employee(employee_id)
            .and_then(|e| e.find_contract(contract_id).cloned())
    }

    /// Merge `update` into an existing contract and re-validate it
    pub fn update_contract(
        &self,
        employee_id: u64,
        contract_id: u64,
        update: &ContractUpdate,
    ) -> Result<Contract, DomainError> {
        let mut employee = self.require_employee(employee_id)?;
        let slot = employee
            .contracts
            .iter_mut()
            .find(|c| c.contract_id == contract_id)
            .ok_or_else(|| DomainError::not_found("Contract", contract_id))?;

        let merged = slot.merged(update)?;
        *slot = merged.clone();
        self.persist_contracts(employee_id, &employee.contracts)?;

        tracing::info!("Updated Contract {} of Employee {}", contract_id, employee_id);

        Ok(merged)
    }

    /// Remove a contract from its employee, returning the removed contract
    pub fn delete_contract(
        &self,
        employee_id: u64,
        contract_id: u64,
    ) -> Result<Contract, DomainError> {
        let mut employee = self.require_employee(employee_id)?;
        let position = employee
            .contracts
            .iter()
            .position(|c| c.contract_id == contract_id)
            .ok_or_else(|| DomainError::not_found("Contract", contract_id))?;

        let removed = employee.contracts.remove(position);
        self.persist_contracts(employee_id, &employee.contracts)?;

        tracing::info!("Deleted Contract {} of Employee {}", contract_id, employee_id);

        Ok(removed)
    }

    /// Expired contracts relative to `reference` (`YYYY-MM-DD`), or to today
    /// when `None`.
    ///
    /// An unparsable reference date yields an empty list rather than an error.
    pub fn list_expired_contracts(&self, reference: Option<&str>) -> Vec<ContractWithOwner> {
        let reference = match reference {
            None => ContractDate::today(),
            Some(text) => match text.parse() {
                Ok(date) => date,
                Err(e) => {
                    tracing::debug!("Ignoring expiry query: {}", e);
                    return Vec::new();
                }
            },
        };
        self.list_expired_contracts_at(reference)
    }

    /// Contracts whose end date is strictly before `reference`.
    ///
    /// Contracts with an unparsable end date are skipped. Order follows
    /// employee storage order, then each employee's contract order.
    pub fn list_expired_contracts_at(&self, reference: ContractDate) -> Vec<ContractWithOwner> {
        let employees = self.store.get_all();
        employees
            .iter()
            .flat_map(|employee| {
                employee
                    .contracts
                    .iter()
                    .filter(move |c| c.is_expired_at(reference))
                    .map(move |c| ContractWithOwner::new(c.clone(), employee))
            })
            .collect()
    }

    fn require_employee(&self, employee_id: u64) -> Result<Employee, DomainError> {
        self.employees
            .find_employee(employee_id)
            .ok_or_else(|| DomainError::not_found("Employee", employee_id))
    }

    fn persist_contracts(
        &self,
        employee_id: u64,
        contracts: &[Contract],
    ) -> Result<(), DomainError> {
        let contracts =
            serde_json::to_value(contracts).map_err(|e| DomainError::Storage(e.to_string()))?;
        let mut patch = RecordPatch::new();
        patch.insert("contracts".to_string(), contracts);
        self.store.update(employee_id, patch)?;
        Ok(())
    }
}

impl<S: RecordStore<Employee>> Clone for ContractService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            employees: self.employees.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::JsonFileStore;
    use tempfile::TempDir;

    struct Fixture {
        _dir: TempDir,
        employees: EmployeeService<JsonFileStore<Employee>>,
        contracts: ContractService<JsonFileStore<Employee>>,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::new(dir.path().join("employees.json")));
        Fixture {
            employees: EmployeeService::new(Arc::clone(&store)),
            contracts: ContractService::new(store),
            _dir: dir,
        }
    }

    fn date(text: &str) -> ContractDate {
        text.parse().unwrap()
    }

    #[test]
    fn test_associate_numbers_per_employee() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        let luis = f.employees.add_employee("Luis", "Manager").unwrap();

        let first = f
            .contracts
            .associate_contract(ana.id, "2024-01-01", "2024-12-31", 1500.0)
            .unwrap();
        let second = f
            .contracts
            .associate_contract(ana.id, "2025-01-01", "2025-12-31", 1600.0)
            .unwrap();
        let other = f
            .contracts
            .associate_contract(luis.id, "2024-01-01", "2024-06-30", 2000.0)
            .unwrap();

        assert_eq!(first.contract_id, 101);
        assert_eq!(second.contract_id, 102);
        assert_eq!(other.contract_id, 101);

        let stored = f.employees.find_employee(ana.id).unwrap();
        assert_eq!(stored.contracts, vec![first, second]);
        assert_eq!(stored.name, "Ana");
    }

    #[test]
    fn test_associate_unknown_employee() {
        let f = fixture();
        let err = f
            .contracts
            .associate_contract(99, "2024-01-01", "2024-12-31", 1500.0)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_associate_validation_errors() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();

        assert!(matches!(
            f.contracts
                .associate_contract(ana.id, "01-03-2025", "2025-12-31", 1.0),
            Err(DomainError::InvalidFormat { .. })
        ));
        assert!(matches!(
            f.contracts
                .associate_contract(ana.id, "2025-03-01", "2025-02-31", 1.0),
            Err(DomainError::InvalidFormat { .. })
        ));
        assert!(matches!(
            f.contracts
                .associate_contract(ana.id, "2025-03-01", "2025-02-01", 1.0),
            Err(DomainError::InvalidRange { .. })
        ));
        assert!(matches!(
            f.contracts
                .associate_contract(ana.id, "2025-01-01", "2025-12-31", -1.0),
            Err(DomainError::InvalidInput(_))
        ));

        assert!(f.contracts.list_contracts(ana.id).unwrap().is_empty());
    }

    #[test]
    fn test_expired_contracts_with_reference_date() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        let old = f
            .contracts
            .associate_contract(ana.id, "2022-01-01", "2022-12-31", 1500.0)
            .unwrap();
        f.contracts
            .associate_contract(ana.id, "2023-01-01", "2030-01-01", 1800.0)
            .unwrap();

        let expired = f.contracts.list_expired_contracts(Some("2025-01-01"));

        assert_eq!(
            expired,
            vec![ContractWithOwner {
                contract: old,
                employee_id: ana.id,
                employee_name: "Ana".to_string(),
                employee_position: "Engineer".to_string(),
            }]
        );
    }

    #[test]
    fn test_expired_contracts_bad_reference_is_empty() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        f.contracts
            .associate_contract(ana.id, "2020-01-01", "2020-12-31", 1500.0)
            .unwrap();

        assert!(f.contracts.list_expired_contracts(Some("yesterday")).is_empty());
        assert_eq!(f.contracts.list_expired_contracts(None).len(), 1);
    }

    #[test]
    fn test_expired_contracts_skip_unparsable_end_dates() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        let broken = Contract {
            contract_id: 101,
            start_date: Some("2020-01-01".to_string()),
            end_date: Some("31/12/2020".to_string()),
            salary: 1000.0,
            extra: Default::default(),
        };
        let mut patch = RecordPatch::new();
        patch.insert(
            "contracts".to_string(),
            serde_json::to_value(vec![broken]).unwrap(),
        );
        f.contracts.store.update(ana.id, patch).unwrap();

        assert!(f
            .contracts
            .list_expired_contracts_at(date("2025-01-01"))
            .is_empty());
    }

    #[test]
    fn test_expired_contracts_ordering() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        let luis = f.employees.add_employee("Luis", "Manager").unwrap();
        f.contracts
            .associate_contract(luis.id, "2019-01-01", "2019-12-31", 1.0)
            .unwrap();
        f.contracts
            .associate_contract(ana.id, "2021-01-01", "2021-12-31", 1.0)
            .unwrap();
        f.contracts
            .associate_contract(ana.id, "2018-01-01", "2018-12-31", 1.0)
            .unwrap();

        let order: Vec<(u64, u64)> = f
            .contracts
            .list_expired_contracts_at(date("2025-01-01"))
            .into_iter()
            .map(|c| (c.employee_id, c.contract.contract_id))
            .collect();

        assert_eq!(order, vec![(ana.id, 101), (ana.id, 102), (luis.id, 101)]);
    }

    #[test]
    fn test_update_contract() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        let created = f
            .contracts
            .associate_contract(ana.id, "2024-01-01", "2024-12-31", 1500.0)
            .unwrap();

        let update = ContractUpdate {
            end_date: Some("2025-06-30".to_string()),
            ..Default::default()
        };
        let updated = f
            .contracts
            .update_contract(ana.id, created.contract_id, &update)
            .unwrap();

        assert_eq!(updated.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(updated.end_date.as_deref(), Some("2025-06-30"));
        assert_eq!(updated.salary, 1500.0);
        assert_eq!(
            f.contracts.get_contract(ana.id, created.contract_id),
            Some(updated)
        );
    }

    #[test]
    fn test_update_contract_errors() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        let created = f
            .contracts
            .associate_contract(ana.id, "2024-01-01", "2024-12-31", 1500.0)
            .unwrap();

        let bad_salary = ContractUpdate {
            salary: Some(-5.0),
            ..Default::default()
        };
        assert!(matches!(
            f.contracts
                .update_contract(ana.id, created.contract_id, &bad_salary),
            Err(DomainError::InvalidInput(_))
        ));
        assert_eq!(
            f.contracts.get_contract(ana.id, created.contract_id),
            Some(created)
        );

        assert!(f
            .contracts
            .update_contract(ana.id, 999, &ContractUpdate::default())
            .unwrap_err()
            .is_not_found());
        assert!(f
            .contracts
            .update_contract(77, 101, &ContractUpdate::default())
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete_contract() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        let first = f
            .contracts
            .associate_contract(ana.id, "2024-01-01", "2024-12-31", 1500.0)
            .unwrap();
        let second = f
            .contracts
            .associate_contract(ana.id, "2025-01-01", "2025-12-31", 1500.0)
            .unwrap();

        let removed = f.contracts.delete_contract(ana.id, first.contract_id).unwrap();

        assert_eq!(removed, first);
        assert_eq!(f.contracts.list_contracts(ana.id).unwrap(), vec![second]);
        assert!(f
            .contracts
            .delete_contract(ana.id, first.contract_id)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_numbering_continues_after_deleting_earlier_contract() {
        let f = fixture();
        let ana = f.employees.add_employee("Ana", "Engineer").unwrap();
        f.contracts
            .associate_contract(ana.id, "2024-01-01", "2024-12-31", 1.0)
            .unwrap();
        f.contracts
            .associate_contract(ana.id, "2025-01-01", "2025-12-31", 1.0)
            .unwrap();
        f.contracts.delete_contract(ana.id, 101).unwrap();

        let next = f
            .contracts
            .associate_contract(ana.id, "2026-01-01", "2026-12-31", 1.0)
            .unwrap();
        assert_eq!(next.contract_id, 103);
    }
}
