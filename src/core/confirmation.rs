//! 修改與刪除的確認流程
//!
//! `Idle -> AwaitingTarget -> AwaitingConfirmation -> {Applied | Cancelled}`
//!
//! 任何無效的目標或未確認的回答都會回到 `Idle`，且不修改資料。

use crate::core::directory::{Directory, PendingDelete, PendingUpdate};
use crate::domain::model::{Employee, EmployeeUpdate};
use crate::domain::ports::Notifier;
use crate::utils::error::{DirectoryError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    /// 只有 "y" / "yes" 算確認
    pub fn from_answer(answer: &str) -> Self {
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => Self::Confirmed,
            _ => Self::Declined,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PendingChange {
    Update(PendingUpdate),
    Delete(PendingDelete),
}

impl PendingChange {
    pub fn preview(&self) -> String {
        match self {
            Self::Update(pending) => {
                format!("Current: {}\nNew:     {}", pending.before, pending.after)
            }
            Self::Delete(pending) => format!("Delete: {}", pending.employee),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum GateState {
    #[default]
    Idle,
    AwaitingTarget(ChangeKind),
    AwaitingConfirmation(PendingChange),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GateOutcome {
    Updated(Employee),
    Deleted(Employee),
    Cancelled,
}

#[derive(Debug, Default)]
pub struct ConfirmationGate {
    state: GateState,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &GateState {
        &self.state
    }

    pub fn begin(&mut self, kind: ChangeKind) {
        if !matches!(self.state, GateState::Idle) {
            tracing::debug!("Abandoning unfinished change: {:?}", self.state);
        }
        self.state = GateState::AwaitingTarget(kind);
    }

    pub fn cancel(&mut self) {
        self.state = GateState::Idle;
    }

    /// 找到目標並驗證候選值；失敗時回到 Idle
    pub fn select<N: Notifier>(
        &mut self,
        directory: &Directory<N>,
        id: &str,
        update: Option<&EmployeeUpdate>,
    ) -> Result<PendingChange> {
        let kind = match std::mem::take(&mut self.state) {
            GateState::AwaitingTarget(kind) => kind,
            other => {
                return Err(out_of_order("select", &other));
            }
        };

        let pending = match kind {
            ChangeKind::Update => {
                let update = update.ok_or_else(|| {
                    DirectoryError::validation("update", id, "no fields were supplied")
                })?;
                PendingChange::Update(directory.prepare_update(id, update)?)
            }
            ChangeKind::Delete => PendingChange::Delete(directory.prepare_delete(id)?),
        };

        self.state = GateState::AwaitingConfirmation(pending.clone());
        Ok(pending)
    }

    pub fn decide<N: Notifier>(
        &mut self,
        directory: &mut Directory<N>,
        decision: Confirmation,
    ) -> Result<GateOutcome> {
        let pending = match std::mem::take(&mut self.state) {
            GateState::AwaitingConfirmation(pending) => pending,
            other => {
                return Err(out_of_order("decide", &other));
            }
        };

        if decision == Confirmation::Declined {
            tracing::debug!("Change declined, nothing applied");
            return Ok(GateOutcome::Cancelled);
        }

        match pending {
            PendingChange::Update(update) => {
                let employee = directory.apply_update(update)?.clone();
                Ok(GateOutcome::Updated(employee))
            }
            PendingChange::Delete(delete) => Ok(GateOutcome::Deleted(directory.apply_delete(delete)?)),
        }
    }
}

fn out_of_order(step: &str, state: &GateState) -> DirectoryError {
    DirectoryError::validation(
        "confirmation",
        step,
        format!("step is not allowed while {:?}", state),
    )
}
