//! Entity lifecycle workflow for Anggaran.
//!
//! This module implements the state machines for budgets, revisions,
//! purchase commitments (SPK), and actual payments, together with the role
//! model and approval authorization.
//!
//! # Modules
//!
//! - `types` - Status enums, audit metadata, and transition action values
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic per entity
//! - `approval` - Roles, actors, and authorization guards

pub mod approval;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use approval::{Actor, Role, ensure_finance_approver, ensure_submitter, ensure_unit_approver};
pub use error::WorkflowError;
pub use service::{ActualWorkflow, BudgetWorkflow, CommitmentWorkflow, RevisionWorkflow};
pub use types::{
    ActualAction, ActualStatus, Approval, ApprovalStage, BudgetAction, BudgetStatus,
    CommitmentAction, CommitmentStatus, Rejection, ReviseRequest, RevisionAction, RevisionStatus,
};
