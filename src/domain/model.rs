use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub department: String,
    pub salary: f64,
    pub contact: String,
    pub enrolled_at: DateTime<Utc>,
}

impl Employee {
    /// 匯出用的欄位形狀 (ID / Name / Department / Salary / Contact)
    pub fn to_record(&self) -> EmployeeRecord {
        EmployeeRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            department: self.department.clone(),
            salary: format!("{:.2}", self.salary),
            contact: self.contact.clone(),
        }
    }

    pub fn in_department(&self, department: &str) -> bool {
        self.department.trim().to_lowercase() == department.trim().to_lowercase()
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Dept: {}, Salary: ${:.2}, Email: {}",
            self.id, self.name, self.department, self.salary, self.contact
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Salary")]
    pub salary: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

/// 新增員工時收集到的原始輸入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub id: String,
    pub name: String,
    pub department: String,
    pub salary: String,
    pub contact: String,
}

impl EmployeeDraft {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        department: impl Into<String>,
        salary: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: department.into(),
            salary: salary.into(),
            contact: contact.into(),
        }
    }
}

/// `None` 代表保留原值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub salary: Option<String>,
    pub contact: Option<String>,
}

impl EmployeeUpdate {
    /// 空白輸入視為不修改
    pub fn from_inputs(name: &str, department: &str, salary: &str, contact: &str) -> Self {
        fn supplied(raw: &str) -> Option<String> {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }

        Self {
            name: supplied(name),
            department: supplied(department),
            salary: supplied(salary),
            contact: supplied(contact),
        }
    }

    pub fn with_salary(mut self, salary: impl Into<String>) -> Self {
        self.salary = Some(salary.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.department.is_none()
            && self.salary.is_none()
            && self.contact.is_none()
    }
}
