//! Staffbook CLI - Employee and contract management
//!
//! Presentation layer over the staffbook library: subcommands,
//! an interactive menu, and console tables.

mod app;
mod config;
mod menu;
mod render;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use app::App;
use config::{Config, DATA_DIR_ENV};
use staffbook::ContractUpdate;

#[derive(Parser)]
#[command(name = "staffbook")]
#[command(about = "Staffbook CLI - Employee and contract records", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory holding employees.json (overrides config and environment)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or reset) an empty employees file
    InitDb,

    /// List all employees
    ListEmployees,

    /// Add an employee
    AddEmployee {
        /// Employee name
        name: String,
        /// Job position
        position: String,
    },

    /// Show an employee with its contracts
    ShowEmployee {
        /// Employee ID
        id: u64,
    },

    /// Remove an employee and its contracts
    RemoveEmployee {
        /// Employee ID
        id: u64,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Associate a new contract with an employee
    AddContract {
        /// Employee ID
        employee_id: u64,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,
        /// Salary
        #[arg(long, allow_negative_numbers = true)]
        salary: f64,
    },

    /// Change fields of an existing contract
    UpdateContract {
        /// Employee ID
        employee_id: u64,
        /// Contract ID
        contract_id: u64,
        /// New start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// New end date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        /// New salary
        #[arg(long, allow_negative_numbers = true)]
        salary: Option<f64>,
    },

    /// Remove a contract from an employee
    RemoveContract {
        /// Employee ID
        employee_id: u64,
        /// Contract ID
        contract_id: u64,
    },

    /// List contracts that ended before a date
    Expired {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Group expired contracts by employee
    ExpiredReport {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Interactive numbered menu
    Menu,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Persist a default data directory
    SetDataDir {
        /// Directory path
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let data_dir = cli.data_dir.as_deref();

    match cli.command {
        Commands::InitDb => cmd_init_db(&config, data_dir),
        Commands::ListEmployees => {
            let app = open_app(&config, data_dir)?;
            render::print_employees(&app.employees.list_employees());
            Ok(())
        }
        Commands::AddEmployee { name, position } => {
            let app = open_app(&config, data_dir)?;
            let employee = app.employees.add_employee(&name, &position)?;
            println!(
                "{} Employee '{}' (ID: {}) added",
                "✓".green(),
                employee.name,
                employee.id
            );
            Ok(())
        }
        Commands::ShowEmployee { id } => {
            let app = open_app(&config, data_dir)?;
            let employee = app
                .reports
                .employee_with_contracts(id)
                .with_context(|| format!("Employee with id '{}' not found", id))?;
            render::print_employee(&employee);
            Ok(())
        }
        Commands::RemoveEmployee { id, yes } => cmd_remove_employee(&config, data_dir, id, yes),
        Commands::AddContract {
            employee_id,
            start,
            end,
            salary,
        } => {
            let app = open_app(&config, data_dir)?;
            let contract = app
                .contracts
                .associate_contract(employee_id, &start, &end, salary)?;
            println!(
                "{} Contract '{}' associated with employee '{}'",
                "✓".green(),
                contract.contract_id,
                employee_id
            );
            Ok(())
        }
        Commands::UpdateContract {
            employee_id,
            contract_id,
            start,
            end,
            salary,
        } => {
            let update = ContractUpdate {
                start_date: start,
                end_date: end,
                salary,
            };
            if update.is_empty() {
                bail!("Nothing to update. Pass --start, --end or --salary.");
            }
            let app = open_app(&config, data_dir)?;
            let contract = app
                .contracts
                .update_contract(employee_id, contract_id, &update)?;
            println!(
                "{} Contract '{}' updated ({} - {}, {:.2})",
                "✓".green(),
                contract.contract_id,
                contract.start_date.as_deref().unwrap_or("-"),
                contract.end_date.as_deref().unwrap_or("-"),
                contract.salary
            );
            Ok(())
        }
        Commands::RemoveContract {
            employee_id,
            contract_id,
        } => {
            let app = open_app(&config, data_dir)?;
            let removed = app.contracts.delete_contract(employee_id, contract_id)?;
            println!(
                "{} Contract '{}' removed from employee '{}'",
                "✓".green(),
                removed.contract_id,
                employee_id
            );
            Ok(())
        }
        Commands::Expired { as_of } => {
            let app = open_app(&config, data_dir)?;
            warn_on_bad_date(as_of.as_deref());
            render::print_expired(&app.contracts.list_expired_contracts(as_of.as_deref()));
            Ok(())
        }
        Commands::ExpiredReport { as_of } => {
            let app = open_app(&config, data_dir)?;
            warn_on_bad_date(as_of.as_deref());
            render::print_expired_report(
                &app.reports.employees_with_expired_contracts(as_of.as_deref()),
            );
            Ok(())
        }
        Commands::Menu => {
            let app = open_app(&config, data_dir)?;
            menu::run(&app)
        }
        Commands::Config { action } => cmd_config(config, data_dir, action),
    }
}

// ============================================
// Command Implementations
// ============================================

fn open_app(config: &Config, data_dir: Option<&Path>) -> Result<App> {
    App::open(config.employees_path(data_dir))
}

fn cmd_init_db(config: &Config, data_dir: Option<&Path>) -> Result<()> {
    let app = open_app(config, data_dir)?;
    app.store.reset()?;
    println!("{} Store initialized at {:?}", "✓".green(), app.store.path());
    Ok(())
}

fn cmd_remove_employee(
    config: &Config,
    data_dir: Option<&Path>,
    id: u64,
    yes: bool,
) -> Result<()> {
    let app = open_app(config, data_dir)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Confirm deletion of employee '{}'?", id))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if app.employees.delete_employee(id)? {
        println!("{} Employee '{}' deleted", "✓".green(), id);
        Ok(())
    } else {
        bail!("Employee with id '{}' not found", id);
    }
}

/// The expiry query treats a bad reference date as "no results";
/// tell the user why the list is empty.
fn warn_on_bad_date(as_of: Option<&str>) {
    if let Some(text) = as_of {
        if text.parse::<staffbook::ContractDate>().is_err() {
            eprintln!(
                "{} '{}' is not a valid YYYY-MM-DD date; no contracts match",
                "!".yellow(),
                text
            );
        }
    }
}

fn cmd_config(
    mut config: Config,
    data_dir: Option<&Path>,
    action: Option<ConfigAction>,
) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  Data dir (config): {:?}", config.data_dir);
            println!(
                "  {}: {}",
                DATA_DIR_ENV,
                std::env::var(DATA_DIR_ENV)
                    .map(|v| v.cyan().to_string())
                    .unwrap_or_else(|_| "Not set".dimmed().to_string())
            );
            println!("  Employees file: {:?}", config.employees_path(data_dir));
        }
        ConfigAction::SetDataDir { path } => {
            config.set_data_dir(path.clone());
            config.save()?;
            println!(
                "{} Default data directory set to {:?} in {:?}",
                "✓".green(),
                path,
                Config::config_path()?
            );
        }
    }

    Ok(())
}
