//! 員工欄位驗證
//!
//! `is_valid_*` 是純判斷式，只回傳通過與否；`validate_*` 在通過時回傳
//! 整理後的值，失敗時回傳帶有欄位名稱的 `ValidationError`。

use crate::utils::error::{DirectoryError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EMPLOYEE_ID_PATTERN: &str = r"^E\d{8}$";
const NAME_PATTERN: &str = r"^\p{L}[\p{L}\p{M} .,'\-]*$";
const CONTACT_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const MAX_NAME_LENGTH: usize = 100;

/// 可由設定檔覆寫的驗證規則
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    #[serde(default = "default_employee_id_pattern")]
    pub employee_id_pattern: String,
    /// 空集合代表部門名稱不限
    #[serde(default)]
    pub departments: Vec<String>,
}

fn default_employee_id_pattern() -> String {
    DEFAULT_EMPLOYEE_ID_PATTERN.to_string()
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            employee_id_pattern: default_employee_id_pattern(),
            departments: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    employee_id: Regex,
    name: Regex,
    contact: Regex,
    departments: Vec<String>,
}

impl Validator {
    pub fn new(rules: &ValidationRules) -> Result<Self> {
        let employee_id =
            Regex::new(&rules.employee_id_pattern).map_err(|e| {
                DirectoryError::InvalidConfigValueError {
                    field: "validation.employee_id_pattern".to_string(),
                    value: rules.employee_id_pattern.clone(),
                    reason: e.to_string(),
                }
            })?;

        Ok(Self {
            employee_id,
            name: builtin(NAME_PATTERN),
            contact: builtin(CONTACT_PATTERN),
            departments: rules.departments.clone(),
        })
    }

    pub fn is_valid_employee_id(&self, raw: &str) -> bool {
        self.employee_id.is_match(raw.trim())
    }

    pub fn is_valid_name(&self, raw: &str) -> bool {
        let name = raw.trim();
        !name.is_empty() && name.chars().count() <= MAX_NAME_LENGTH && self.name.is_match(name)
    }

    /// 沒有設定部門清單時任何非空名稱都可以
    pub fn is_valid_department(&self, raw: &str) -> bool {
        let department = raw.trim();
        if department.is_empty() {
            return false;
        }
        self.departments.is_empty()
            || self
                .departments
                .iter()
                .any(|allowed| allowed.trim().to_lowercase() == department.to_lowercase())
    }

    pub fn is_valid_salary(&self, raw: &str) -> bool {
        parse_salary(raw).is_some()
    }

    pub fn is_valid_contact(&self, raw: &str) -> bool {
        self.contact.is_match(raw.trim())
    }

    pub fn validate_employee_id(&self, raw: &str) -> Result<String> {
        if self.is_valid_employee_id(raw) {
            Ok(raw.trim().to_string())
        } else {
            Err(DirectoryError::validation(
                "employee ID",
                raw,
                format!("must match {}", self.employee_id.as_str()),
            ))
        }
    }

    pub fn validate_name(&self, raw: &str) -> Result<String> {
        if self.is_valid_name(raw) {
            Ok(raw.trim().to_string())
        } else {
            Err(DirectoryError::validation(
                "name",
                raw,
                "use letters, spaces, periods, commas, apostrophes or hyphens",
            ))
        }
    }

    pub fn validate_department(&self, raw: &str) -> Result<String> {
        if self.is_valid_department(raw) {
            return Ok(raw.trim().to_string());
        }
        let reason = if self.departments.is_empty() {
            "must be a non-empty department name".to_string()
        } else {
            format!("must be one of: {}", self.departments.join(", "))
        };
        Err(DirectoryError::validation("department", raw, reason))
    }

    pub fn validate_salary(&self, raw: &str) -> Result<f64> {
        parse_salary(raw).ok_or_else(|| {
            DirectoryError::validation("salary", raw, "must be a non-negative number")
        })
    }

    pub fn validate_contact(&self, raw: &str) -> Result<String> {
        if self.is_valid_contact(raw) {
            Ok(raw.trim().to_string())
        } else {
            Err(DirectoryError::validation(
                "contact email",
                raw,
                "must look like name@example.com",
            ))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            employee_id: builtin(DEFAULT_EMPLOYEE_ID_PATTERN),
            name: builtin(NAME_PATTERN),
            contact: builtin(CONTACT_PATTERN),
            departments: Vec::new(),
        }
    }
}

fn builtin(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in validation pattern must compile")
}

fn parse_salary(raw: &str) -> Option<f64> {
    let salary: f64 = raw.trim().parse().ok()?;
    (salary.is_finite() && salary >= 0.0).then_some(salary)
}
