//! Store error types.
//!
//! Three failure classes cover every rejected operation: validation errors
//! (bad input, detected before any mutation), guard violations (transition
//! or authorization), and capacity errors (amount exceeds what the budget or
//! commitment has left). Every failure leaves the store unchanged.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{BudgetStatus, CommitmentStatus};
use anggaran_shared::AppError;
use anggaran_shared::types::{ActualId, BudgetId, CommitmentId, RevisionId};

/// Errors returned by store operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Budget not found.
    #[error("Budget not found: {0}")]
    BudgetNotFound(BudgetId),

    /// Revision not found.
    #[error("Revision not found: {0}")]
    RevisionNotFound(RevisionId),

    /// Commitment not found.
    #[error("Commitment not found: {0}")]
    CommitmentNotFound(CommitmentId),

    /// Actual payment not found.
    #[error("Actual payment not found: {0}")]
    ActualNotFound(ActualId),

    /// A required field is missing or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Amount must be greater than zero.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    /// The parent budget is not in the spendable status.
    #[error("Budget {budget_id} is not active (status: {status})")]
    BudgetNotSpendable {
        /// The budget that was referenced.
        budget_id: BudgetId,
        /// Its current status.
        status: BudgetStatus,
    },

    /// Project budgets require payments to draw down a commitment.
    #[error("Project budgets require a commitment (SPK) reference")]
    CommitmentRequired,

    /// The referenced commitment belongs to a different budget.
    #[error("Commitment {commitment_id} does not belong to budget {budget_id}")]
    CommitmentMismatch {
        /// The referenced commitment.
        commitment_id: CommitmentId,
        /// The budget the payment names.
        budget_id: BudgetId,
    },

    /// The referenced commitment is not finance-approved.
    #[error("Commitment {commitment_id} is not approved (status: {status})")]
    CommitmentNotApproved {
        /// The referenced commitment.
        commitment_id: CommitmentId,
        /// Its current status.
        status: CommitmentStatus,
    },

    /// The requested amount exceeds the budget's available balance.
    #[error("Amount {requested} exceeds available budget {available}")]
    CapacityExceeded {
        /// The requested amount.
        requested: Decimal,
        /// The available budget at check time.
        available: Decimal,
    },

    /// The requested amount exceeds the commitment's remaining capacity.
    #[error("Amount {requested} exceeds remaining commitment capacity {remaining}")]
    CommitmentCapacityExceeded {
        /// The requested amount.
        requested: Decimal,
        /// The commitment capacity left at check time.
        remaining: Decimal,
    },

    /// A revision may not reduce the budget below committed plus actual.
    #[error("New amount {new_amount} is below the committed-plus-actual total {floor}")]
    RevisionBelowCommitted {
        /// The revision's requested new amount.
        new_amount: Decimal,
        /// The committed-plus-actual floor.
        floor: Decimal,
    },

    /// A workflow transition or authorization guard failed.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl StoreError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BudgetNotFound(_)
            | Self::RevisionNotFound(_)
            | Self::CommitmentNotFound(_)
            | Self::ActualNotFound(_) => 404,

            Self::MissingField(_) | Self::NonPositiveAmount => 400,

            Self::BudgetNotSpendable { .. }
            | Self::CommitmentRequired
            | Self::CommitmentMismatch { .. }
            | Self::CommitmentNotApproved { .. }
            | Self::CapacityExceeded { .. }
            | Self::CommitmentCapacityExceeded { .. }
            | Self::RevisionBelowCommitted { .. } => 422,

            Self::Workflow(err) => err.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BudgetNotFound(_) => "BUDGET_NOT_FOUND",
            Self::RevisionNotFound(_) => "REVISION_NOT_FOUND",
            Self::CommitmentNotFound(_) => "COMMITMENT_NOT_FOUND",
            Self::ActualNotFound(_) => "ACTUAL_NOT_FOUND",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::BudgetNotSpendable { .. } => "BUDGET_NOT_ACTIVE",
            Self::CommitmentRequired => "COMMITMENT_REQUIRED",
            Self::CommitmentMismatch { .. } => "COMMITMENT_MISMATCH",
            Self::CommitmentNotApproved { .. } => "COMMITMENT_NOT_APPROVED",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::CommitmentCapacityExceeded { .. } => "COMMITMENT_CAPACITY_EXCEEDED",
            Self::RevisionBelowCommitted { .. } => "REVISION_BELOW_COMMITTED",
            Self::Workflow(err) => err.error_code(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::BudgetNotFound(_)
            | StoreError::RevisionNotFound(_)
            | StoreError::CommitmentNotFound(_)
            | StoreError::ActualNotFound(_) => Self::NotFound(err.to_string()),

            StoreError::MissingField(_) | StoreError::NonPositiveAmount => {
                Self::Validation(err.to_string())
            }

            StoreError::Workflow(workflow) if workflow.status_code() == 403 => {
                Self::Forbidden(err.to_string())
            }
            StoreError::Workflow(_) => Self::Validation(err.to_string()),

            _ => Self::BusinessRule(err.to_string()),
        }
    }
}
