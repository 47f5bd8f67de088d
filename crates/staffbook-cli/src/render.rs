//! Console tables for employees and contracts

use colored::Colorize;

use staffbook::{Contract, ContractWithOwner, Employee, ExpiredContractsReport};

pub fn print_employees(employees: &[Employee]) {
    if employees.is_empty() {
        println!("No employees found.");
        return;
    }

    println!("{}", "Employees:".bold());
    println!(
        "  {}",
        format!("{:<6} {:<28} {:<24} {}", "ID", "Name", "Position", "Contracts").dimmed()
    );
    for emp in employees {
        println!(
            "  {} {} {} {}",
            format!("{:<6}", emp.id).cyan(),
            pad(&emp.name, 28).bold(),
            pad(&emp.position, 24),
            emp.contracts.len()
        );
    }
}

pub fn print_employee(employee: &Employee) {
    println!("{}", "Employee found:".bold());
    println!("  ID: {}", employee.id.to_string().cyan());
    println!("  Name: {}", employee.name);
    println!("  Position: {}", employee.position);
    println!("  Contracts: {}", employee.contracts.len());

    if !employee.contracts.is_empty() {
        print_contracts(&employee.contracts);
    }
}

pub fn print_contracts(contracts: &[Contract]) {
    println!(
        "  {}",
        format!("{:<10} {:<12} {:<12} {}", "Contract", "Start", "End", "Salary").dimmed()
    );
    for c in contracts {
        println!(
            "  {} {:<12} {:<12} {}",
            format!("{:<10}", c.contract_id).cyan(),
            c.start_date.as_deref().unwrap_or("-"),
            c.end_date.as_deref().unwrap_or("-"),
            format_salary(c.salary)
        );
    }
}

pub fn print_expired(expired: &[ContractWithOwner]) {
    if expired.is_empty() {
        println!("{} No expired contracts", "✓".green());
        return;
    }

    println!("{} {}", "Expired contracts:".bold(), expired.len());
    println!(
        "  {}",
        format!(
            "{:<10} {:<8} {:<24} {:<20} {:<12} {:<12} {}",
            "Contract", "Employee", "Name", "Position", "Start", "End", "Salary"
        )
        .dimmed()
    );
    for c in expired {
        println!(
            "  {} {:<8} {} {} {:<12} {} {}",
            format!("{:<10}", c.contract.contract_id).cyan(),
            c.employee_id,
            pad(&c.employee_name, 24),
            pad(&c.employee_position, 20),
            c.contract.start_date.as_deref().unwrap_or("-"),
            format!("{:<12}", c.contract.end_date.as_deref().unwrap_or("-")).red(),
            format_salary(c.contract.salary)
        );
    }
}

pub fn print_expired_report(report: &[ExpiredContractsReport]) {
    if report.is_empty() {
        println!("{} No employees with expired contracts", "✓".green());
        return;
    }

    for entry in report {
        println!(
            "{} {} ({}) - {} of {} contracts expired",
            format!("#{}", entry.employee.id).cyan(),
            entry.employee.name.bold(),
            entry.employee.position.dimmed(),
            entry.expired_contracts.len().to_string().red(),
            entry.employee.contracts.len()
        );
        let contracts: Vec<Contract> = entry
            .expired_contracts
            .iter()
            .map(|c| c.contract.clone())
            .collect();
        print_contracts(&contracts);
    }
}

fn format_salary(salary: f64) -> String {
    format!("{:.2}", salary)
}

/// Pad or truncate by char count, not bytes
fn pad(s: &str, width: usize) -> String {
    let count = s.chars().count();
    if count > width {
        let mut truncated: String = s.chars().take(width.saturating_sub(3)).collect();
        truncated.push_str("...");
        truncated
    } else {
        format!("{}{}", s, " ".repeat(width - count))
    }
}
