//! Service wiring over one employees document

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use staffbook::{ContractService, Employee, EmployeeService, JsonFileStore, ReportService};

pub type Store = JsonFileStore<Employee>;

/// Services sharing a single backing store
pub struct App {
    pub store: Arc<Store>,
    pub employees: EmployeeService<Store>,
    pub contracts: ContractService<Store>,
    pub reports: ReportService<Store>,
}

impl App {
    /// Open the store at `path`, creating an empty document if absent
    pub fn open(path: PathBuf) -> Result<Self> {
        let store = Arc::new(JsonFileStore::new(path));
        store
            .init()
            .with_context(|| format!("Failed to initialize {:?}", store.path()))?;

        tracing::debug!("Using employees file {:?}", store.path());

        Ok(Self {
            employees: EmployeeService::new(Arc::clone(&store)),
            contracts: ContractService::new(Arc::clone(&store)),
            reports: ReportService::new(Arc::clone(&store)),
            store,
        })
    }
}
