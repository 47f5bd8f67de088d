//! Employee Application Service (Use Case)
//!
//! Orchestrates domain operations for employee management.

use std::sync::Arc;

use crate::domain::{DomainError, Employee};
use crate::ports::RecordStore;

/// Application service for employee operations
pub struct EmployeeService<S: RecordStore<Employee>> {
    store: Arc<S>,
}

impl<S: RecordStore<Employee>> EmployeeService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create an employee with the next free identifier
    pub fn add_employee(&self, name: &str, position: &str) -> Result<Employee, DomainError> {
        let existing = self.store.get_all();
        let employee = Employee::new(Employee::next_id(&existing)?, name, position)?;
        self.store.add(employee.clone())?;

        tracing::info!("Created Employee: {} ({})", employee.name, employee.id);

        Ok(employee)
    }

    /// Find an employee by ID. Absence is not an error.
    pub fn find_employee(&self, id: u64) -> Option<Employee> {
        self.store.get_all().into_iter().find(|e| e.id == id)
    }

    /// Delete an employee together with its embedded contracts.
    ///
    /// Unlike the rest of the API, a missing employee is reported as
    /// `Ok(false)` instead of `NotFound`. Storage failures still propagate.
    pub fn delete_employee(&self, id: u64) -> Result<bool, DomainError> {
        match self.store.delete(id) {
            Ok(()) => {
                tracing::info!("Deleted Employee: {}", id);
                Ok(true)
            }
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// All employees in storage order
    pub fn list_employees(&self) -> Vec<Employee> {
        self.store.get_all()
    }
}

impl<S: RecordStore<Employee>> Clone for EmployeeService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
