use crate::domain::model::Employee;
use std::fmt;

const RULE_WIDTH: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct DepartmentReport {
    /// 標題用的部門名稱 (title case)，不影響儲存的值
    pub label: String,
    pub employees: Vec<Employee>,
    pub total_salary: f64,
}

impl DepartmentReport {
    pub fn build<'a>(department: &str, employees: impl IntoIterator<Item = &'a Employee>) -> Self {
        let employees: Vec<Employee> = employees
            .into_iter()
            .filter(|e| e.in_department(department))
            .cloned()
            .collect();
        let total_salary = employees.iter().map(|e| e.salary).sum();

        Self {
            label: title_case(department.trim()),
            employees,
            total_salary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn total_line(&self) -> String {
        format!(
            "Total Budgeted Salary for '{}': ${:.2}",
            self.label, self.total_salary
        )
    }
}

impl fmt::Display for DepartmentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "📋 Department Report: {}", self.label)?;
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        if self.employees.is_empty() {
            writeln!(f, "No employees found in department '{}'.", self.label)?;
        } else {
            writeln!(f, "{:<10} {:<20} {:<10}", "ID", "Name", "Salary")?;
            for employee in &self.employees {
                let salary = format!("${:.2}", employee.salary);
                writeln!(f, "{:<10} {:<20} {:<10}", employee.id, employee.name, salary)?;
            }
        }
        writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
        write!(f, "{}", self.total_line())
    }
}

/// 每個字母區段的第一個字母大寫，其餘小寫 ("HR" -> "Hr", "r&d ops" -> "R&D Ops")
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut previous_is_letter = false;

    for c in value.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }

    result
}
