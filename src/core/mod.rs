pub mod confirmation;
pub mod directory;
pub mod export;
pub mod report;

pub use crate::domain::model::{Employee, EmployeeDraft, EmployeeRecord, EmployeeUpdate};
pub use crate::domain::ports::{ConfigProvider, Notifier, Storage};
pub use crate::utils::error::Result;
