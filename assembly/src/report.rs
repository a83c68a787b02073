//! Per-employee summary of a finished line run, as text or JSON.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::employee::Employee;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeTally {
    pub id: usize,
    pub processed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    pub elapsed_ms: u128,
    pub employees: Vec<EmployeeTally>,
    pub total: usize,
}

impl LineReport {
    pub fn from_employees(elapsed: Duration, employees: &[Employee]) -> Self {
        let employees: Vec<EmployeeTally> = employees
            .iter()
            .map(|employee| EmployeeTally {
                id: employee.id,
                processed: employee.count(),
            })
            .collect();
        let total = employees.iter().map(|tally| tally.processed).sum();
        Self {
            elapsed_ms: elapsed.as_millis(),
            employees,
            total,
        }
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== Summary ==========")?;
        writeln!(f, "Total time: {} ms", self.elapsed_ms)?;
        for tally in &self.employees {
            writeln!(
                f,
                "Employee #{} processed {} items",
                tally.id, tally.processed
            )?;
        }
        writeln!(f, "Total processed: {} items", self.total)
    }
}
