use crate::core::report::DepartmentReport;
use crate::domain::model::{Employee, EmployeeDraft, EmployeeUpdate};
use crate::domain::ports::{ConfigProvider, Notifier};
use crate::domain::validation::Validator;
use crate::utils::error::{DirectoryError, Result};
use chrono::Utc;

pub const DEFAULT_COMPANY_NAME: &str = "BitFutura";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    Sent,
    Skipped,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    pub employee: Employee,
    pub notification: NotificationStatus,
}

/// 已驗證、等待確認的修改
#[derive(Debug, Clone, PartialEq)]
pub struct PendingUpdate {
    pub before: Employee,
    pub after: Employee,
}

impl PendingUpdate {
    pub fn id(&self) -> &str {
        &self.before.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub employee: Employee,
}

impl PendingDelete {
    pub fn id(&self) -> &str {
        &self.employee.id
    }
}

/// 所有員工資料的唯一擁有者，依新增順序保存
pub struct Directory<N: Notifier> {
    employees: Vec<Employee>,
    validator: Validator,
    notifier: N,
    company: String,
}

impl<N: Notifier> Directory<N> {
    pub fn new(validator: Validator, notifier: N) -> Self {
        Self {
            employees: Vec::new(),
            validator,
            notifier,
            company: DEFAULT_COMPANY_NAME.to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C, notifier: N) -> Result<Self> {
        let validator = Validator::new(&config.validation_rules())?;
        Ok(Self::new(validator, notifier).with_company(config.company_name()))
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn validate_draft(&self, draft: &EmployeeDraft) -> Result<Employee> {
        Ok(Employee {
            id: self.validator.validate_employee_id(&draft.id)?,
            name: self.validator.validate_name(&draft.name)?,
            department: self.validator.validate_department(&draft.department)?,
            salary: self.validator.validate_salary(&draft.salary)?,
            contact: self.validator.validate_contact(&draft.contact)?,
            enrolled_at: Utc::now(),
        })
    }

    /// 驗證並新增員工，之後寄出歡迎信；寄信失敗只記錄，不回滾
    pub async fn add(&mut self, draft: EmployeeDraft) -> Result<AddOutcome> {
        let employee = self.validate_draft(&draft)?;
        self.insert(employee.clone())?;

        let notification = self.notify_enrollment(&employee).await;
        Ok(AddOutcome {
            employee,
            notification,
        })
    }

    pub fn insert(&mut self, employee: Employee) -> Result<()> {
        if self.find_by_id(&employee.id).is_some() {
            tracing::debug!("Rejected duplicate employee ID {}", employee.id);
            return Err(DirectoryError::DuplicateIdError { id: employee.id });
        }

        tracing::info!(
            "➕ Added employee {} ({}) to {}",
            employee.id,
            employee.name,
            employee.department
        );
        self.employees.push(employee);
        Ok(())
    }

    async fn notify_enrollment(&self, employee: &Employee) -> NotificationStatus {
        if !self.notifier.is_enabled() {
            tracing::debug!("Notifications disabled, skipping welcome email for {}", employee.id);
            return NotificationStatus::Skipped;
        }

        let (subject, body) = welcome_message(&self.company, employee);
        match self
            .notifier
            .send(&employee.name, &employee.contact, &subject, &body)
            .await
        {
            Ok(()) => {
                tracing::info!("📧 Welcome email sent to {}", employee.contact);
                NotificationStatus::Sent
            }
            Err(e) => {
                tracing::warn!(
                    "❌ Welcome email to {} failed: {} (Category: {:?})",
                    employee.contact,
                    e,
                    e.category()
                );
                NotificationStatus::Failed(e.user_friendly_message())
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Employee> {
        let id = id.trim();
        self.employees.iter().find(|e| e.id == id)
    }

    fn require(&self, id: &str) -> Result<&Employee> {
        self.find_by_id(id).ok_or_else(|| DirectoryError::NotFoundError {
            id: id.trim().to_string(),
        })
    }

    pub fn view(&self, id: &str) -> Result<String> {
        self.require(id).map(|e| {
            format!(
                "🔍 {}\n   Enrolled: {}",
                e,
                e.enrolled_at.format("%Y-%m-%d %H:%M:%S UTC")
            )
        })
    }

    /// 重新驗證有提供的欄位，產生候選紀錄；尚未寫入
    pub fn prepare_update(&self, id: &str, update: &EmployeeUpdate) -> Result<PendingUpdate> {
        let before = self.require(id)?.clone();
        if update.is_empty() {
            return Err(DirectoryError::validation(
                "update",
                id,
                "no fields were supplied",
            ));
        }

        let mut after = before.clone();
        if let Some(name) = &update.name {
            after.name = self.validator.validate_name(name)?;
        }
        if let Some(department) = &update.department {
            after.department = self.validator.validate_department(department)?;
        }
        if let Some(salary) = &update.salary {
            after.salary = self.validator.validate_salary(salary)?;
        }
        if let Some(contact) = &update.contact {
            after.contact = self.validator.validate_contact(contact)?;
        }

        Ok(PendingUpdate { before, after })
    }

    pub fn apply_update(&mut self, pending: PendingUpdate) -> Result<&Employee> {
        let position = self.position(pending.id())?;
        tracing::info!("✏️ Updated employee {}", pending.id());
        self.employees[position] = pending.after;
        Ok(&self.employees[position])
    }

    pub fn prepare_delete(&self, id: &str) -> Result<PendingDelete> {
        let employee = self.require(id)?.clone();
        Ok(PendingDelete { employee })
    }

    pub fn apply_delete(&mut self, pending: PendingDelete) -> Result<Employee> {
        let position = self.position(pending.id())?;
        let removed = self.employees.remove(position);
        tracing::info!("🗑️ Deleted employee {}", removed.id);
        Ok(removed)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.employees
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| DirectoryError::NotFoundError { id: id.to_string() })
    }

    pub fn list_all(&self) -> &[Employee] {
        &self.employees
    }

    pub fn report_by_department(&self, department: &str) -> DepartmentReport {
        DepartmentReport::build(department, &self.employees)
    }

    /// 每個部門一份報表，依部門第一次出現的順序
    pub fn department_reports(&self) -> Vec<DepartmentReport> {
        let mut seen: Vec<String> = Vec::new();
        for employee in &self.employees {
            let key = employee.department.trim().to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
            }
        }

        seen.iter()
            .map(|department| self.report_by_department(department))
            .collect()
    }
}

pub fn welcome_message(company: &str, employee: &Employee) -> (String, String) {
    let subject = format!("Welcome to {}", company);
    let body = format!(
        "Dear {},\n\nWelcome to the {} department at {}!\nWe are excited to have you on board.\n\nRegards,\n{} HR Team\n",
        employee.name, employee.department, company, company
    );
    (subject, body)
}
