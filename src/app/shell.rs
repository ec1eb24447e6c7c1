use crate::core::confirmation::{ChangeKind, Confirmation, ConfirmationGate, GateOutcome};
use crate::core::directory::{Directory, NotificationStatus};
use crate::core::export::CsvExporter;
use crate::core::{EmployeeDraft, EmployeeUpdate, Notifier, Storage};
use crate::utils::error::{DirectoryError, ErrorCategory, Result};
use std::io::{BufRead, ErrorKind, Write};

const MENU: &str = "\n===== Employee Directory Menu =====
1. Add Employee
2. View Employee
3. Update Employee
4. Delete Employee
5. List All Employees
6. Department-wise Report
7. Export to CSV
8. Exit";

/// 以逐行輸入操作 Directory 的互動選單
pub struct Shell<R, W, N: Notifier, S: Storage> {
    input: R,
    output: W,
    directory: Directory<N>,
    gate: ConfirmationGate,
    exporter: CsvExporter<S>,
    append_on_add: bool,
}

impl<R: BufRead, W: Write, N: Notifier, S: Storage> Shell<R, W, N, S> {
    pub fn new(directory: Directory<N>, exporter: CsvExporter<S>, input: R, output: W) -> Self {
        Self {
            input,
            output,
            directory,
            gate: ConfirmationGate::new(),
            exporter,
            append_on_add: false,
        }
    }

    pub fn with_append_on_add(mut self, enabled: bool) -> Self {
        self.append_on_add = enabled;
        self
    }

    pub fn directory(&self) -> &Directory<N> {
        &self.directory
    }

    pub fn into_parts(self) -> (Directory<N>, W) {
        (self.directory, self.output)
    }

    /// 主迴圈；只有選擇離開或輸入結束 (EOF) 才會返回
    pub async fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let choice = match self.prompt("Choose an option: ") {
                Ok(choice) => choice,
                Err(e) if is_end_of_input(&e) => break,
                Err(e) => return Err(e),
            };

            let result = match choice.as_str() {
                "1" => self.add_employee().await,
                "2" => self.view_employee(),
                "3" => self.update_employee(),
                "4" => self.delete_employee(),
                "5" => self.list_employees(),
                "6" => self.department_report(),
                "7" => self.export_employees().await,
                "8" => {
                    writeln!(self.output, "👋 Exiting. Goodbye!")?;
                    break;
                }
                _ => {
                    writeln!(self.output, "❌ Invalid option. Try again.")?;
                    continue;
                }
            };

            match result {
                Ok(()) => {}
                Err(e) if is_end_of_input(&e) => {
                    self.gate.cancel();
                    break;
                }
                Err(DirectoryError::IoError(e)) => return Err(DirectoryError::IoError(e)),
                Err(e) => {
                    self.gate.cancel();
                    self.report_error(&e)?;
                }
            }
        }

        self.output.flush()?;
        Ok(())
    }

    async fn add_employee(&mut self) -> Result<()> {
        let draft = EmployeeDraft {
            id: self.prompt("Enter Employee ID: ")?,
            name: self.prompt("Enter Name: ")?,
            department: self.prompt("Enter Department: ")?,
            salary: self.prompt("Enter Salary: ")?,
            contact: self.prompt("Enter Contact Email: ")?,
        };

        let outcome = self.directory.add(draft).await?;
        writeln!(self.output, "✅ Employee {} added.", outcome.employee.name)?;

        match &outcome.notification {
            NotificationStatus::Sent => writeln!(
                self.output,
                "✅ Confirmation email sent to {}",
                outcome.employee.contact
            )?,
            NotificationStatus::Failed(reason) => writeln!(self.output, "❌ {}", reason)?,
            NotificationStatus::Skipped => {}
        }

        if self.append_on_add {
            match self.exporter.append(&outcome.employee).await {
                Ok(location) => tracing::debug!("Recorded {} in {}", outcome.employee.id, location),
                Err(e) => {
                    tracing::warn!("CSV append failed: {}", e);
                    writeln!(self.output, "⚠️ {}", e.user_friendly_message())?;
                }
            }
        }
        Ok(())
    }

    fn view_employee(&mut self) -> Result<()> {
        let id = self.prompt("Enter Employee ID to view: ")?;
        let summary = self.directory.view(&id)?;
        writeln!(self.output, "{}", summary)?;
        Ok(())
    }

    fn update_employee(&mut self) -> Result<()> {
        self.gate.begin(ChangeKind::Update);
        let id = self.prompt("Enter Employee ID to update: ")?;

        let current = self
            .directory
            .find_by_id(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFoundError { id: id.clone() })?;

        writeln!(self.output, "Leave a field blank to keep its current value.")?;
        let name = self.prompt(&format!("New name [{}]: ", current.name))?;
        let department = self.prompt(&format!("New department [{}]: ", current.department))?;
        let salary = self.prompt(&format!("New salary [{:.2}]: ", current.salary))?;
        let contact = self.prompt(&format!("New email [{}]: ", current.contact))?;

        let update = EmployeeUpdate::from_inputs(&name, &department, &salary, &contact);
        if update.is_empty() {
            self.gate.cancel();
            writeln!(self.output, "No changes entered.")?;
            return Ok(());
        }

        let pending = self.gate.select(&self.directory, &id, Some(&update))?;
        writeln!(self.output, "{}", pending.preview())?;

        let answer = self.prompt("Confirm update? (yes/no): ")?;
        match self
            .gate
            .decide(&mut self.directory, Confirmation::from_answer(&answer))?
        {
            GateOutcome::Updated(_) => writeln!(self.output, "✅ Employee updated.")?,
            _ => writeln!(self.output, "Update cancelled.")?,
        }
        Ok(())
    }

    fn delete_employee(&mut self) -> Result<()> {
        self.gate.begin(ChangeKind::Delete);
        let id = self.prompt("Enter Employee ID to delete: ")?;

        let pending = self.gate.select(&self.directory, &id, None)?;
        writeln!(self.output, "{}", pending.preview())?;

        let answer = self.prompt("Are you sure you want to delete this employee? (yes/no): ")?;
        match self
            .gate
            .decide(&mut self.directory, Confirmation::from_answer(&answer))?
        {
            GateOutcome::Deleted(_) => writeln!(self.output, "✅ Employee deleted.")?,
            _ => writeln!(self.output, "Deletion cancelled.")?,
        }
        Ok(())
    }

    fn list_employees(&mut self) -> Result<()> {
        writeln!(self.output, "\n👥 List of All Employees:")?;
        if self.directory.is_empty() {
            writeln!(self.output, "No employees on record.")?;
        }
        for employee in self.directory.list_all() {
            writeln!(self.output, " - {}", employee)?;
        }
        Ok(())
    }

    fn department_report(&mut self) -> Result<()> {
        let department = self.prompt("Enter Department (leave blank for all): ")?;

        if department.is_empty() {
            let reports = self.directory.department_reports();
            if reports.is_empty() {
                writeln!(self.output, "No employees on record.")?;
            }
            for report in reports {
                writeln!(self.output, "\n{}", report)?;
            }
        } else {
            let report = self.directory.report_by_department(&department);
            writeln!(self.output, "\n{}", report)?;
        }
        Ok(())
    }

    async fn export_employees(&mut self) -> Result<()> {
        match self.exporter.export_all(self.directory.list_all()).await {
            Ok(location) => writeln!(
                self.output,
                "📁 Exported {} employees to {}",
                self.directory.len(),
                location
            )?,
            Err(e) => {
                tracing::error!("❌ Export failed: {} (Category: {:?})", e, e.category());
                writeln!(self.output, "❌ {}", e.user_friendly_message())?;
                writeln!(self.output, "💡 {}", e.recovery_suggestion())?;
            }
        }
        Ok(())
    }

    fn report_error(&mut self, error: &DirectoryError) -> Result<()> {
        tracing::debug!("Operation aborted: {}", error);
        let marker = match error.category() {
            ErrorCategory::Lookup => "⚠️",
            _ => "❌",
        };
        writeln!(self.output, "{} {}", marker, error.user_friendly_message())?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(DirectoryError::IoError(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(line.trim().to_string())
    }
}

fn is_end_of_input(error: &DirectoryError) -> bool {
    matches!(error, DirectoryError::IoError(e) if e.kind() == ErrorKind::UnexpectedEof)
}
