//! Workflow error types for entity lifecycle management.
//!
//! This module defines all error types that can occur during status
//! transitions and approval authorization checks.

use thiserror::Error;

use crate::workflow::approval::Role;
use crate::workflow::types::{ActualStatus, BudgetStatus, CommitmentStatus, RevisionStatus};
use anggaran_shared::types::UnitId;

/// Errors that can occur during workflow operations.
///
/// Every guard failure is an explicit, typed error. A transition attempted
/// from a status that does not permit it is never a silent no-op.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// Attempted an invalid budget status transition.
    #[error("Invalid budget transition from {from} to {to}")]
    InvalidBudgetTransition {
        /// The current status.
        from: BudgetStatus,
        /// The attempted target status.
        to: BudgetStatus,
    },

    /// Attempted an invalid revision status transition.
    #[error("Invalid revision transition from {from} to {to}")]
    InvalidRevisionTransition {
        /// The current status.
        from: RevisionStatus,
        /// The attempted target status.
        to: RevisionStatus,
    },

    /// Attempted an invalid commitment status transition.
    #[error("Invalid commitment transition from {from} to {to}")]
    InvalidCommitmentTransition {
        /// The current status.
        from: CommitmentStatus,
        /// The attempted target status.
        to: CommitmentStatus,
    },

    /// Attempted an invalid actual payment status transition.
    #[error("Invalid actual payment transition from {from} to {to}")]
    InvalidActualTransition {
        /// The current status.
        from: ActualStatus,
        /// The attempted target status.
        to: ActualStatus,
    },

    /// The actor's role does not permit the operation.
    #[error("Role {role} is not permitted to {operation}")]
    RoleNotPermitted {
        /// The actor's role.
        role: Role,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// The actor is scoped to a different organizational unit.
    #[error("Actor is scoped to a different unit than {required}")]
    UnitScopeMismatch {
        /// The unit the entity belongs to.
        required: UnitId,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Revision notes are required but not provided.
    #[error("Revision notes are required")]
    RevisionNotesRequired,

    /// Budget justification is required at submission.
    #[error("Budget justification is required")]
    JustificationRequired,

    /// Amount must be greater than zero at submission.
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidBudgetTransition { .. }
            | Self::InvalidRevisionTransition { .. }
            | Self::InvalidCommitmentTransition { .. }
            | Self::InvalidActualTransition { .. }
            | Self::RejectionReasonRequired
            | Self::RevisionNotesRequired
            | Self::JustificationRequired
            | Self::NonPositiveAmount => 400,

            Self::RoleNotPermitted { .. } | Self::UnitScopeMismatch { .. } => 403,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidBudgetTransition { .. }
            | Self::InvalidRevisionTransition { .. }
            | Self::InvalidCommitmentTransition { .. }
            | Self::InvalidActualTransition { .. } => "INVALID_TRANSITION",
            Self::RoleNotPermitted { .. } => "ROLE_NOT_PERMITTED",
            Self::UnitScopeMismatch { .. } => "UNIT_SCOPE_MISMATCH",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::RevisionNotesRequired => "REVISION_NOTES_REQUIRED",
            Self::JustificationRequired => "JUSTIFICATION_REQUIRED",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = WorkflowError::InvalidBudgetTransition {
            from: BudgetStatus::Draft,
            to: BudgetStatus::Active,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("draft"));
        assert!(err.to_string().contains("active"));
    }

    #[test]
    fn test_role_not_permitted_error() {
        let err = WorkflowError::RoleNotPermitted {
            role: Role::Operator,
            operation: "approve budget",
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "ROLE_NOT_PERMITTED");
        assert!(err.to_string().contains("operator"));
    }

    #[test]
    fn test_unit_scope_mismatch_error() {
        let err = WorkflowError::UnitScopeMismatch {
            required: UnitId::new(),
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "UNIT_SCOPE_MISMATCH");
    }

    #[test]
    fn test_reason_required_errors() {
        assert_eq!(WorkflowError::RejectionReasonRequired.status_code(), 400);
        assert_eq!(
            WorkflowError::RejectionReasonRequired.error_code(),
            "REJECTION_REASON_REQUIRED"
        );
        assert_eq!(
            WorkflowError::RevisionNotesRequired.error_code(),
            "REVISION_NOTES_REQUIRED"
        );
        assert_eq!(
            WorkflowError::JustificationRequired.error_code(),
            "JUSTIFICATION_REQUIRED"
        );
        assert_eq!(
            WorkflowError::NonPositiveAmount.error_code(),
            "NON_POSITIVE_AMOUNT"
        );
    }
}
