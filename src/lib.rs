pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::notifier::{build_notifier, HttpMailNotifier, NoopNotifier};
pub use adapters::storage::LocalStorage;
pub use app::Shell;
pub use crate::core::confirmation::{ChangeKind, Confirmation, ConfirmationGate, GateOutcome, GateState};
pub use crate::core::directory::{AddOutcome, Directory, NotificationStatus};
pub use crate::core::export::CsvExporter;
pub use crate::core::report::DepartmentReport;
pub use domain::model::{Employee, EmployeeDraft, EmployeeRecord, EmployeeUpdate};
pub use domain::validation::{ValidationRules, Validator};
pub use utils::error::{DirectoryError, Result};
