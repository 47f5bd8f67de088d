//! Interactive numbered menu

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};

use crate::app::App;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    AddEmployee,
    ListEmployees,
    FindEmployee,
    DeleteEmployee,
    AssociateContract,
    ListExpired,
    Reset,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 8] = [
        MenuAction::AddEmployee,
        MenuAction::ListEmployees,
        MenuAction::FindEmployee,
        MenuAction::DeleteEmployee,
        MenuAction::AssociateContract,
        MenuAction::ListExpired,
        MenuAction::Reset,
        MenuAction::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuAction::AddEmployee => "1) Add employee",
            MenuAction::ListEmployees => "2) List employees",
            MenuAction::FindEmployee => "3) Find employee",
            MenuAction::DeleteEmployee => "4) Delete employee",
            MenuAction::AssociateContract => "5) Associate contract with employee",
            MenuAction::ListExpired => "6) List expired contracts",
            MenuAction::Reset => "7) Reset store",
            MenuAction::Exit => "0) Exit",
        }
    }
}

/// Run the menu until the user exits or aborts input
pub fn run(app: &App) -> Result<()> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();

    loop {
        println!("\n{}", "Staffbook - Employees and Contracts".cyan().bold());

        let choice = match Select::new()
            .with_prompt("Choose an option")
            .items(&labels)
            .default(0)
            .interact_opt()
        {
            Ok(Some(index)) => MenuAction::ALL[index],
            Ok(None) | Err(_) => {
                println!("{} Input aborted. Exiting.", "✗".red());
                break;
            }
        };

        if choice == MenuAction::Exit {
            break;
        }

        // Errors are shown and the menu keeps running
        if let Err(e) = handle(app, choice) {
            println!("{} Error: {:#}", "✗".red(), e);
        }
    }

    Ok(())
}

fn handle(app: &App, action: MenuAction) -> Result<()> {
    match action {
        MenuAction::AddEmployee => {
            let name: String = Input::new().with_prompt("Employee name").interact_text()?;
            let position: String = Input::new()
                .with_prompt("Employee position")
                .interact_text()?;
            let employee = app.employees.add_employee(&name, &position)?;
            println!(
                "{} Employee '{}' (ID: {}) added",
                "✓".green(),
                employee.name,
                employee.id
            );
        }

        MenuAction::ListEmployees => render::print_employees(&app.employees.list_employees()),

        MenuAction::FindEmployee => {
            let id: u64 = Input::new()
                .with_prompt("Employee ID to find")
                .interact_text()?;
            match app.reports.employee_with_contracts(id) {
                Some(employee) => render::print_employee(&employee),
                None => println!("{} Employee with id '{}' not found", "✗".red(), id),
            }
        }

        MenuAction::DeleteEmployee => {
            let id: u64 = Input::new()
                .with_prompt("Employee ID to delete")
                .interact_text()?;
            let confirmed = Confirm::new()
                .with_prompt(format!("Confirm deletion of employee '{}'?", id))
                .default(false)
                .interact()?;
            if confirmed {
                if app.employees.delete_employee(id)? {
                    println!("{} Employee '{}' deleted", "✓".green(), id);
                } else {
                    println!("{} Employee with id '{}' not found", "✗".red(), id);
                }
            }
        }

        MenuAction::AssociateContract => {
            let id: u64 = Input::new().with_prompt("Employee ID").interact_text()?;
            let start: String = Input::new()
                .with_prompt("Start date (YYYY-MM-DD)")
                .interact_text()?;
            let end: String = Input::new()
                .with_prompt("End date (YYYY-MM-DD)")
                .interact_text()?;
            let salary: f64 = Input::new().with_prompt("Salary").interact_text()?;
            let contract = app.contracts.associate_contract(id, &start, &end, salary)?;
            println!(
                "{} Contract '{}' associated with employee '{}'",
                "✓".green(),
                contract.contract_id,
                id
            );
        }

        MenuAction::ListExpired => {
            render::print_expired(&app.contracts.list_expired_contracts(None))
        }

        MenuAction::Reset => {
            let confirmed = Confirm::new()
                .with_prompt("Delete every employee and contract?")
                .default(false)
                .interact()?;
            if confirmed {
                app.store.reset()?;
                println!("{} Store reset at {:?}", "✓".green(), app.store.path());
            }
        }

        MenuAction::Exit => {}
    }

    Ok(())
}
