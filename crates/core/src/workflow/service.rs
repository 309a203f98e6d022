//! Workflow services for entity state transitions.
//!
//! Each service is a stateless set of associated functions that validate a
//! transition against the current status and return the typed action with
//! audit trail information. The store applies the action; a transition
//! attempted from a non-matching status is an explicit error, never a silent
//! skip.
//!
//! Capacity guards (commitment against available budget, actual against
//! remaining commitment, revision floor) need the full entity slices and are
//! enforced by the store before it consults these services.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{
    ActualAction, ActualStatus, Approval, ApprovalStage, BudgetAction, BudgetStatus,
    CommitmentAction, CommitmentStatus, Rejection, ReviseRequest, RevisionAction, RevisionStatus,
};
use anggaran_shared::types::UserId;

fn rejection(
    by: UserId,
    stage: ApprovalStage,
    reason: String,
) -> Result<Rejection, WorkflowError> {
    if reason.trim().is_empty() {
        return Err(WorkflowError::RejectionReasonRequired);
    }
    Ok(Rejection {
        by,
        at: Utc::now(),
        stage,
        reason,
    })
}

/// Stateless service for budget lifecycle transitions.
pub struct BudgetWorkflow;

impl BudgetWorkflow {
    /// Submit a draft budget for supervisor approval.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBudgetTransition` unless the budget is in Draft,
    /// `JustificationRequired` for an empty justification, and
    /// `NonPositiveAmount` unless the initial amount is greater than zero.
    pub fn submit(
        current: BudgetStatus,
        justification: &str,
        initial_amount: Decimal,
    ) -> Result<BudgetAction, WorkflowError> {
        if justification.trim().is_empty() {
            return Err(WorkflowError::JustificationRequired);
        }
        if initial_amount <= Decimal::ZERO {
            return Err(WorkflowError::NonPositiveAmount);
        }

        match current {
            BudgetStatus::Draft => Ok(BudgetAction::Submit {
                new_status: BudgetStatus::Submitted,
            }),
            _ => Err(WorkflowError::InvalidBudgetTransition {
                from: current,
                to: BudgetStatus::Submitted,
            }),
        }
    }

    /// Supervisor approval of a submitted budget.
    pub fn approve_supervisor(
        current: BudgetStatus,
        approved_by: UserId,
    ) -> Result<BudgetAction, WorkflowError> {
        match current {
            BudgetStatus::Submitted => Ok(BudgetAction::ApproveSupervisor {
                new_status: BudgetStatus::ApprovedSupervisor,
                approval: Approval::now(approved_by),
            }),
            _ => Err(WorkflowError::InvalidBudgetTransition {
                from: current,
                to: BudgetStatus::ApprovedSupervisor,
            }),
        }
    }

    /// Admin activation of a supervisor-approved budget.
    pub fn activate(
        current: BudgetStatus,
        approved_by: UserId,
    ) -> Result<BudgetAction, WorkflowError> {
        match current {
            BudgetStatus::ApprovedSupervisor => Ok(BudgetAction::Activate {
                new_status: BudgetStatus::Active,
                approval: Approval::now(approved_by),
            }),
            _ => Err(WorkflowError::InvalidBudgetTransition {
                from: current,
                to: BudgetStatus::Active,
            }),
        }
    }

    /// Supervisor rejection of a submitted budget (terminal).
    ///
    /// # Errors
    ///
    /// Returns `RejectionReasonRequired` if the reason is empty.
    pub fn reject_supervisor(
        current: BudgetStatus,
        rejected_by: UserId,
        reason: String,
    ) -> Result<BudgetAction, WorkflowError> {
        let rejection = rejection(rejected_by, ApprovalStage::Unit, reason)?;
        match current {
            BudgetStatus::Submitted => Ok(BudgetAction::Reject {
                new_status: BudgetStatus::Rejected,
                rejection,
            }),
            _ => Err(WorkflowError::InvalidBudgetTransition {
                from: current,
                to: BudgetStatus::Rejected,
            }),
        }
    }

    /// Admin rejection of a supervisor-approved budget (terminal).
    ///
    /// # Errors
    ///
    /// Returns `RejectionReasonRequired` if the reason is empty.
    pub fn reject_admin(
        current: BudgetStatus,
        rejected_by: UserId,
        reason: String,
    ) -> Result<BudgetAction, WorkflowError> {
        let rejection = rejection(rejected_by, ApprovalStage::Finance, reason)?;
        match current {
            BudgetStatus::ApprovedSupervisor => Ok(BudgetAction::Reject {
                new_status: BudgetStatus::Rejected,
                rejection,
            }),
            _ => Err(WorkflowError::InvalidBudgetTransition {
                from: current,
                to: BudgetStatus::Rejected,
            }),
        }
    }

    /// Send a pending budget back to the operator for revision.
    ///
    /// # Errors
    ///
    /// Returns `RevisionNotesRequired` if the notes are empty.
    pub fn request_revision(
        current: BudgetStatus,
        requested_by: UserId,
        notes: String,
    ) -> Result<BudgetAction, WorkflowError> {
        if notes.trim().is_empty() {
            return Err(WorkflowError::RevisionNotesRequired);
        }
        match current {
            BudgetStatus::Submitted | BudgetStatus::ApprovedSupervisor => {
                Ok(BudgetAction::RequestRevision {
                    new_status: BudgetStatus::ReviseRequested,
                    request: ReviseRequest {
                        by: requested_by,
                        at: Utc::now(),
                        notes,
                    },
                })
            }
            _ => Err(WorkflowError::InvalidBudgetTransition {
                from: current,
                to: BudgetStatus::ReviseRequested,
            }),
        }
    }

    /// Operator resubmission after a revise request.
    pub fn resubmit(current: BudgetStatus) -> Result<BudgetAction, WorkflowError> {
        match current {
            BudgetStatus::ReviseRequested => Ok(BudgetAction::Resubmit {
                new_status: BudgetStatus::Submitted,
            }),
            _ => Err(WorkflowError::InvalidBudgetTransition {
                from: current,
                to: BudgetStatus::Submitted,
            }),
        }
    }

    /// Close an active budget at fiscal year-end.
    pub fn close(current: BudgetStatus) -> Result<BudgetAction, WorkflowError> {
        match current {
            BudgetStatus::Active => Ok(BudgetAction::Close {
                new_status: BudgetStatus::Closed,
                closed_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidBudgetTransition {
                from: current,
                to: BudgetStatus::Closed,
            }),
        }
    }

    /// Check if a budget status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: BudgetStatus, to: BudgetStatus) -> bool {
        matches!(
            (from, to),
            (BudgetStatus::Draft, BudgetStatus::Submitted)
                | (
                    BudgetStatus::Submitted,
                    BudgetStatus::ApprovedSupervisor
                        | BudgetStatus::Rejected
                        | BudgetStatus::ReviseRequested
                )
                | (
                    BudgetStatus::ApprovedSupervisor,
                    BudgetStatus::Active | BudgetStatus::Rejected | BudgetStatus::ReviseRequested
                )
                | (BudgetStatus::ReviseRequested, BudgetStatus::Submitted)
                | (BudgetStatus::Active, BudgetStatus::Closed)
        )
    }
}

/// Stateless service for budget revision transitions.
pub struct RevisionWorkflow;

impl RevisionWorkflow {
    /// Submit a draft revision for unit approval.
    pub fn submit(current: RevisionStatus) -> Result<RevisionAction, WorkflowError> {
        match current {
            RevisionStatus::Draft => Ok(RevisionAction::Submit {
                new_status: RevisionStatus::Submitted,
            }),
            _ => Err(WorkflowError::InvalidRevisionTransition {
                from: current,
                to: RevisionStatus::Submitted,
            }),
        }
    }

    /// Unit-stage approval of a submitted revision.
    pub fn approve_unit(
        current: RevisionStatus,
        approved_by: UserId,
    ) -> Result<RevisionAction, WorkflowError> {
        match current {
            RevisionStatus::Submitted => Ok(RevisionAction::ApproveUnit {
                new_status: RevisionStatus::ApprovedUnit,
                approval: Approval::now(approved_by),
            }),
            _ => Err(WorkflowError::InvalidRevisionTransition {
                from: current,
                to: RevisionStatus::ApprovedUnit,
            }),
        }
    }

    /// Finance-stage approval of a unit-approved revision.
    pub fn approve_finance(
        current: RevisionStatus,
        approved_by: UserId,
    ) -> Result<RevisionAction, WorkflowError> {
        match current {
            RevisionStatus::ApprovedUnit => Ok(RevisionAction::ApproveFinance {
                new_status: RevisionStatus::ApprovedFinance,
                approval: Approval::now(approved_by),
            }),
            _ => Err(WorkflowError::InvalidRevisionTransition {
                from: current,
                to: RevisionStatus::ApprovedFinance,
            }),
        }
    }

    /// Unit-stage rejection of a submitted revision (terminal).
    pub fn reject_unit(
        current: RevisionStatus,
        rejected_by: UserId,
        reason: String,
    ) -> Result<RevisionAction, WorkflowError> {
        let rejection = rejection(rejected_by, ApprovalStage::Unit, reason)?;
        match current {
            RevisionStatus::Submitted => Ok(RevisionAction::Reject {
                new_status: RevisionStatus::Rejected,
                rejection,
            }),
            _ => Err(WorkflowError::InvalidRevisionTransition {
                from: current,
                to: RevisionStatus::Rejected,
            }),
        }
    }

    /// Finance-stage rejection of a unit-approved revision (terminal).
    pub fn reject_finance(
        current: RevisionStatus,
        rejected_by: UserId,
        reason: String,
    ) -> Result<RevisionAction, WorkflowError> {
        let rejection = rejection(rejected_by, ApprovalStage::Finance, reason)?;
        match current {
            RevisionStatus::ApprovedUnit => Ok(RevisionAction::Reject {
                new_status: RevisionStatus::Rejected,
                rejection,
            }),
            _ => Err(WorkflowError::InvalidRevisionTransition {
                from: current,
                to: RevisionStatus::Rejected,
            }),
        }
    }
}

/// Stateless service for purchase commitment (SPK) transitions.
pub struct CommitmentWorkflow;

impl CommitmentWorkflow {
    /// Submit a draft commitment for unit approval.
    pub fn submit(current: CommitmentStatus) -> Result<CommitmentAction, WorkflowError> {
        match current {
            CommitmentStatus::Draft => Ok(CommitmentAction::Submit {
                new_status: CommitmentStatus::Submitted,
            }),
            _ => Err(WorkflowError::InvalidCommitmentTransition {
                from: current,
                to: CommitmentStatus::Submitted,
            }),
        }
    }

    /// Unit-stage approval of a submitted commitment.
    pub fn approve_unit(
        current: CommitmentStatus,
        approved_by: UserId,
    ) -> Result<CommitmentAction, WorkflowError> {
        match current {
            CommitmentStatus::Submitted => Ok(CommitmentAction::ApproveUnit {
                new_status: CommitmentStatus::ApprovedUnit,
                approval: Approval::now(approved_by),
            }),
            _ => Err(WorkflowError::InvalidCommitmentTransition {
                from: current,
                to: CommitmentStatus::ApprovedUnit,
            }),
        }
    }

    /// Finance-stage approval of a unit-approved commitment.
    pub fn approve_finance(
        current: CommitmentStatus,
        approved_by: UserId,
    ) -> Result<CommitmentAction, WorkflowError> {
        match current {
            CommitmentStatus::ApprovedUnit => Ok(CommitmentAction::ApproveFinance {
                new_status: CommitmentStatus::ApprovedFinance,
                approval: Approval::now(approved_by),
            }),
            _ => Err(WorkflowError::InvalidCommitmentTransition {
                from: current,
                to: CommitmentStatus::ApprovedFinance,
            }),
        }
    }

    /// Mark a finance-approved commitment as completed.
    pub fn complete(current: CommitmentStatus) -> Result<CommitmentAction, WorkflowError> {
        match current {
            CommitmentStatus::ApprovedFinance => Ok(CommitmentAction::Complete {
                new_status: CommitmentStatus::Completed,
                completed_at: Utc::now(),
            }),
            _ => Err(WorkflowError::InvalidCommitmentTransition {
                from: current,
                to: CommitmentStatus::Completed,
            }),
        }
    }

    /// Cancel a commitment that has not locked budget capacity yet.
    pub fn cancel(current: CommitmentStatus) -> Result<CommitmentAction, WorkflowError> {
        match current {
            CommitmentStatus::Draft | CommitmentStatus::ApprovedUnit => {
                Ok(CommitmentAction::Cancel {
                    new_status: CommitmentStatus::Cancelled,
                })
            }
            _ => Err(WorkflowError::InvalidCommitmentTransition {
                from: current,
                to: CommitmentStatus::Cancelled,
            }),
        }
    }

    /// Unit-stage rejection of a submitted commitment (terminal).
    pub fn reject_unit(
        current: CommitmentStatus,
        rejected_by: UserId,
        reason: String,
    ) -> Result<CommitmentAction, WorkflowError> {
        let rejection = rejection(rejected_by, ApprovalStage::Unit, reason)?;
        match current {
            CommitmentStatus::Submitted => Ok(CommitmentAction::Reject {
                new_status: CommitmentStatus::Rejected,
                rejection,
            }),
            _ => Err(WorkflowError::InvalidCommitmentTransition {
                from: current,
                to: CommitmentStatus::Rejected,
            }),
        }
    }

    /// Finance-stage rejection of a unit-approved commitment (terminal).
    pub fn reject_finance(
        current: CommitmentStatus,
        rejected_by: UserId,
        reason: String,
    ) -> Result<CommitmentAction, WorkflowError> {
        let rejection = rejection(rejected_by, ApprovalStage::Finance, reason)?;
        match current {
            CommitmentStatus::ApprovedUnit => Ok(CommitmentAction::Reject {
                new_status: CommitmentStatus::Rejected,
                rejection,
            }),
            _ => Err(WorkflowError::InvalidCommitmentTransition {
                from: current,
                to: CommitmentStatus::Rejected,
            }),
        }
    }
}

/// Stateless service for actual payment transitions.
pub struct ActualWorkflow;

impl ActualWorkflow {
    /// Submit a draft payment for unit approval.
    pub fn submit(current: ActualStatus) -> Result<ActualAction, WorkflowError> {
        match current {
            ActualStatus::Draft => Ok(ActualAction::Submit {
                new_status: ActualStatus::Submitted,
            }),
            _ => Err(WorkflowError::InvalidActualTransition {
                from: current,
                to: ActualStatus::Submitted,
            }),
        }
    }

    /// Unit-stage approval of a submitted payment.
    pub fn approve_unit(
        current: ActualStatus,
        approved_by: UserId,
    ) -> Result<ActualAction, WorkflowError> {
        match current {
            ActualStatus::Submitted => Ok(ActualAction::ApproveUnit {
                new_status: ActualStatus::ApprovedUnit,
                approval: Approval::now(approved_by),
            }),
            _ => Err(WorkflowError::InvalidActualTransition {
                from: current,
                to: ActualStatus::ApprovedUnit,
            }),
        }
    }

    /// Finance-stage approval, posting the payment to the ledger.
    ///
    /// Stamps both the finance approval pair and `posted_at`.
    pub fn post(current: ActualStatus, approved_by: UserId) -> Result<ActualAction, WorkflowError> {
        match current {
            ActualStatus::ApprovedUnit => {
                let approval = Approval::now(approved_by);
                Ok(ActualAction::Post {
                    new_status: ActualStatus::Posted,
                    posted_at: approval.at,
                    approval,
                })
            }
            _ => Err(WorkflowError::InvalidActualTransition {
                from: current,
                to: ActualStatus::Posted,
            }),
        }
    }

    /// Cancel a draft or posted payment.
    pub fn cancel(current: ActualStatus) -> Result<ActualAction, WorkflowError> {
        match current {
            ActualStatus::Draft | ActualStatus::Posted => Ok(ActualAction::Cancel {
                new_status: ActualStatus::Cancelled,
            }),
            _ => Err(WorkflowError::InvalidActualTransition {
                from: current,
                to: ActualStatus::Cancelled,
            }),
        }
    }

    /// Unit-stage rejection of a submitted payment (terminal).
    pub fn reject_unit(
        current: ActualStatus,
        rejected_by: UserId,
        reason: String,
    ) -> Result<ActualAction, WorkflowError> {
        let rejection = rejection(rejected_by, ApprovalStage::Unit, reason)?;
        match current {
            ActualStatus::Submitted => Ok(ActualAction::Reject {
                new_status: ActualStatus::Rejected,
                rejection,
            }),
            _ => Err(WorkflowError::InvalidActualTransition {
                from: current,
                to: ActualStatus::Rejected,
            }),
        }
    }

    /// Finance-stage rejection of a unit-approved payment (terminal).
    pub fn reject_finance(
        current: ActualStatus,
        rejected_by: UserId,
        reason: String,
    ) -> Result<ActualAction, WorkflowError> {
        let rejection = rejection(rejected_by, ApprovalStage::Finance, reason)?;
        match current {
            ActualStatus::ApprovedUnit => Ok(ActualAction::Reject {
                new_status: ActualStatus::Rejected,
                rejection,
            }),
            _ => Err(WorkflowError::InvalidActualTransition {
                from: current,
                to: ActualStatus::Rejected,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[test]
    fn test_budget_submit_from_draft() {
        let action = BudgetWorkflow::submit(BudgetStatus::Draft, "New lab equipment", dec!(1000))
            .unwrap();
        assert_eq!(action.new_status(), BudgetStatus::Submitted);
    }

    #[test]
    fn test_budget_submit_requires_justification() {
        let result = BudgetWorkflow::submit(BudgetStatus::Draft, "   ", dec!(1000));
        assert!(matches!(result, Err(WorkflowError::JustificationRequired)));
    }

    #[test]
    fn test_budget_submit_requires_positive_amount() {
        let result = BudgetWorkflow::submit(BudgetStatus::Draft, "Equipment", dec!(0));
        assert!(matches!(result, Err(WorkflowError::NonPositiveAmount)));

        let result = BudgetWorkflow::submit(BudgetStatus::Draft, "Equipment", dec!(-500));
        assert!(matches!(result, Err(WorkflowError::NonPositiveAmount)));
    }

    #[rstest]
    #[case(BudgetStatus::Submitted)]
    #[case(BudgetStatus::ApprovedSupervisor)]
    #[case(BudgetStatus::Active)]
    #[case(BudgetStatus::Closed)]
    #[case(BudgetStatus::Rejected)]
    fn test_budget_submit_from_non_draft_fails(#[case] status: BudgetStatus) {
        let result = BudgetWorkflow::submit(status, "Equipment", dec!(1000));
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidBudgetTransition { .. })
        ));
    }

    #[test]
    fn test_budget_two_stage_approval() {
        let supervisor = UserId::new();
        let admin = UserId::new();

        let action = BudgetWorkflow::approve_supervisor(BudgetStatus::Submitted, supervisor)
            .unwrap();
        assert_eq!(action.new_status(), BudgetStatus::ApprovedSupervisor);
        if let BudgetAction::ApproveSupervisor { approval, .. } = action {
            assert_eq!(approval.by, supervisor);
        } else {
            panic!("Expected ApproveSupervisor action");
        }

        let action = BudgetWorkflow::activate(BudgetStatus::ApprovedSupervisor, admin).unwrap();
        assert_eq!(action.new_status(), BudgetStatus::Active);
    }

    #[test]
    fn test_budget_activate_skipping_supervisor_fails() {
        let result = BudgetWorkflow::activate(BudgetStatus::Submitted, UserId::new());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidBudgetTransition {
                from: BudgetStatus::Submitted,
                to: BudgetStatus::Active,
            })
        ));
    }

    #[test]
    fn test_budget_reject_requires_reason() {
        let result =
            BudgetWorkflow::reject_supervisor(BudgetStatus::Submitted, UserId::new(), String::new());
        assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));
    }

    #[test]
    fn test_budget_reject_records_stage() {
        let action = BudgetWorkflow::reject_admin(
            BudgetStatus::ApprovedSupervisor,
            UserId::new(),
            "Over ceiling".to_string(),
        )
        .unwrap();
        if let BudgetAction::Reject { rejection, .. } = action {
            assert_eq!(rejection.stage, ApprovalStage::Finance);
            assert_eq!(rejection.reason, "Over ceiling");
        } else {
            panic!("Expected Reject action");
        }
    }

    #[test]
    fn test_budget_revise_request_and_resubmit() {
        let action = BudgetWorkflow::request_revision(
            BudgetStatus::Submitted,
            UserId::new(),
            "Split into quarterly lines".to_string(),
        )
        .unwrap();
        assert_eq!(action.new_status(), BudgetStatus::ReviseRequested);

        let action = BudgetWorkflow::resubmit(BudgetStatus::ReviseRequested).unwrap();
        assert_eq!(action.new_status(), BudgetStatus::Submitted);
    }

    #[test]
    fn test_budget_revise_request_requires_notes() {
        let result =
            BudgetWorkflow::request_revision(BudgetStatus::Submitted, UserId::new(), "  ".into());
        assert!(matches!(result, Err(WorkflowError::RevisionNotesRequired)));
    }

    #[test]
    fn test_budget_close_from_active() {
        let action = BudgetWorkflow::close(BudgetStatus::Active).unwrap();
        assert_eq!(action.new_status(), BudgetStatus::Closed);

        let result = BudgetWorkflow::close(BudgetStatus::Submitted);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidBudgetTransition { .. })
        ));
    }

    #[test]
    fn test_budget_rejected_is_dead_end() {
        assert!(BudgetWorkflow::resubmit(BudgetStatus::Rejected).is_err());
        assert!(BudgetWorkflow::approve_supervisor(BudgetStatus::Rejected, UserId::new()).is_err());
        assert!(BudgetWorkflow::close(BudgetStatus::Rejected).is_err());
    }

    #[test]
    fn test_budget_valid_transition_matrix() {
        assert!(BudgetWorkflow::is_valid_transition(
            BudgetStatus::Draft,
            BudgetStatus::Submitted
        ));
        assert!(BudgetWorkflow::is_valid_transition(
            BudgetStatus::Submitted,
            BudgetStatus::ReviseRequested
        ));
        assert!(BudgetWorkflow::is_valid_transition(
            BudgetStatus::ReviseRequested,
            BudgetStatus::Submitted
        ));
        assert!(!BudgetWorkflow::is_valid_transition(
            BudgetStatus::Draft,
            BudgetStatus::Active
        ));
        assert!(!BudgetWorkflow::is_valid_transition(
            BudgetStatus::Rejected,
            BudgetStatus::Submitted
        ));
    }

    #[test]
    fn test_revision_lifecycle() {
        let action = RevisionWorkflow::submit(RevisionStatus::Draft).unwrap();
        assert_eq!(action.new_status(), RevisionStatus::Submitted);

        let action =
            RevisionWorkflow::approve_unit(RevisionStatus::Submitted, UserId::new()).unwrap();
        assert_eq!(action.new_status(), RevisionStatus::ApprovedUnit);

        let action =
            RevisionWorkflow::approve_finance(RevisionStatus::ApprovedUnit, UserId::new()).unwrap();
        assert_eq!(action.new_status(), RevisionStatus::ApprovedFinance);
    }

    #[test]
    fn test_revision_finance_approval_needs_unit_first() {
        let result = RevisionWorkflow::approve_finance(RevisionStatus::Submitted, UserId::new());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidRevisionTransition { .. })
        ));
    }

    #[rstest]
    #[case(CommitmentStatus::Draft, true)]
    #[case(CommitmentStatus::ApprovedUnit, true)]
    #[case(CommitmentStatus::Submitted, false)]
    #[case(CommitmentStatus::ApprovedFinance, false)]
    #[case(CommitmentStatus::Completed, false)]
    fn test_commitment_cancel_matrix(#[case] status: CommitmentStatus, #[case] allowed: bool) {
        assert_eq!(CommitmentWorkflow::cancel(status).is_ok(), allowed);
    }

    #[test]
    fn test_commitment_complete_requires_finance_approval() {
        let action = CommitmentWorkflow::complete(CommitmentStatus::ApprovedFinance).unwrap();
        assert_eq!(action.new_status(), CommitmentStatus::Completed);

        let result = CommitmentWorkflow::complete(CommitmentStatus::ApprovedUnit);
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidCommitmentTransition { .. })
        ));
    }

    #[test]
    fn test_actual_post_stamps_posted_at() {
        let admin = UserId::new();
        let action = ActualWorkflow::post(ActualStatus::ApprovedUnit, admin).unwrap();
        if let ActualAction::Post {
            approval,
            posted_at,
            ..
        } = action
        {
            assert_eq!(approval.by, admin);
            assert_eq!(approval.at, posted_at);
        } else {
            panic!("Expected Post action");
        }
    }

    #[rstest]
    #[case(ActualStatus::Draft, true)]
    #[case(ActualStatus::Posted, true)]
    #[case(ActualStatus::Submitted, false)]
    #[case(ActualStatus::ApprovedUnit, false)]
    #[case(ActualStatus::Rejected, false)]
    fn test_actual_cancel_matrix(#[case] status: ActualStatus, #[case] allowed: bool) {
        assert_eq!(ActualWorkflow::cancel(status).is_ok(), allowed);
    }

    #[test]
    fn test_actual_post_requires_unit_approval() {
        let result = ActualWorkflow::post(ActualStatus::Submitted, UserId::new());
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidActualTransition { .. })
        ));
    }

    #[test]
    fn test_reject_whitespace_reason_fails() {
        let result = CommitmentWorkflow::reject_unit(
            CommitmentStatus::Submitted,
            UserId::new(),
            "\t\t".to_string(),
        );
        assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));
    }
}
