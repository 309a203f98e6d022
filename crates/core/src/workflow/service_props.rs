//! Property-based tests for the workflow transition services.
//!
//! These tests validate that every transition is only accepted from its
//! expected precondition status and that audit fields are stamped from the
//! acting user, using proptest for randomized input generation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::workflow::error::WorkflowError;
use crate::workflow::service::{
    ActualWorkflow, BudgetWorkflow, CommitmentWorkflow, RevisionWorkflow,
};
use crate::workflow::types::{
    ActualStatus, BudgetAction, BudgetStatus, CommitmentStatus, RevisionStatus,
};
use anggaran_shared::types::UserId;

fn arb_budget_status() -> impl Strategy<Value = BudgetStatus> {
    prop_oneof![
        Just(BudgetStatus::Draft),
        Just(BudgetStatus::Submitted),
        Just(BudgetStatus::ApprovedSupervisor),
        Just(BudgetStatus::Active),
        Just(BudgetStatus::Closed),
        Just(BudgetStatus::Rejected),
        Just(BudgetStatus::ReviseRequested),
    ]
}

fn arb_revision_status() -> impl Strategy<Value = RevisionStatus> {
    prop_oneof![
        Just(RevisionStatus::Draft),
        Just(RevisionStatus::Submitted),
        Just(RevisionStatus::ApprovedUnit),
        Just(RevisionStatus::ApprovedFinance),
        Just(RevisionStatus::Rejected),
    ]
}

fn arb_commitment_status() -> impl Strategy<Value = CommitmentStatus> {
    prop_oneof![
        Just(CommitmentStatus::Draft),
        Just(CommitmentStatus::Submitted),
        Just(CommitmentStatus::ApprovedUnit),
        Just(CommitmentStatus::ApprovedFinance),
        Just(CommitmentStatus::Completed),
        Just(CommitmentStatus::Cancelled),
        Just(CommitmentStatus::Rejected),
    ]
}

fn arb_actual_status() -> impl Strategy<Value = ActualStatus> {
    prop_oneof![
        Just(ActualStatus::Draft),
        Just(ActualStatus::Submitted),
        Just(ActualStatus::ApprovedUnit),
        Just(ActualStatus::Posted),
        Just(ActualStatus::Cancelled),
        Just(ActualStatus::Rejected),
    ]
}

fn arb_user() -> impl Strategy<Value = UserId> {
    any::<u128>().prop_map(|n| UserId::from_uuid(Uuid::from_u128(n)))
}

fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,80}".prop_map(|s| s.trim().to_string())
}

fn arb_positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Submitting a budget succeeds only from Draft, for any valid inputs.
    #[test]
    fn prop_budget_submit_only_from_draft(
        status in arb_budget_status(),
        reason in arb_reason(),
        amount in arb_positive_amount(),
    ) {
        prop_assume!(!reason.is_empty());
        let result = BudgetWorkflow::submit(status, &reason, amount);
        if status == BudgetStatus::Draft {
            prop_assert_eq!(result.unwrap().new_status(), BudgetStatus::Submitted);
        } else {
            let matched = matches!(
                result,
                Err(WorkflowError::InvalidBudgetTransition { .. })
            );
            prop_assert!(matched);
        }
    }

    /// A non-positive amount is rejected before the status guard runs.
    #[test]
    fn prop_budget_submit_rejects_non_positive_amount(
        status in arb_budget_status(),
        reason in arb_reason(),
        n in 0i64..1_000_000i64,
    ) {
        prop_assume!(!reason.is_empty());
        let result = BudgetWorkflow::submit(status, &reason, Decimal::new(-n, 2));
        prop_assert!(matches!(result, Err(WorkflowError::NonPositiveAmount)));
    }

    /// Supervisor approval stamps the approver and succeeds only from
    /// Submitted.
    #[test]
    fn prop_budget_supervisor_approval(
        status in arb_budget_status(),
        user in arb_user(),
    ) {
        let result = BudgetWorkflow::approve_supervisor(status, user);
        if status == BudgetStatus::Submitted {
            let action = result.unwrap();
            prop_assert_eq!(action.new_status(), BudgetStatus::ApprovedSupervisor);
            if let BudgetAction::ApproveSupervisor { approval, .. } = action {
                prop_assert_eq!(approval.by, user);
            } else {
                prop_assert!(false, "Expected ApproveSupervisor action");
            }
        } else {
            prop_assert!(result.is_err());
        }
    }

    /// Activation succeeds only from ApprovedSupervisor; in particular a
    /// budget still in Submitted can never be activated directly.
    #[test]
    fn prop_budget_activation_requires_supervisor_stage(
        status in arb_budget_status(),
        user in arb_user(),
    ) {
        let result = BudgetWorkflow::activate(status, user);
        prop_assert_eq!(
            result.is_ok(),
            status == BudgetStatus::ApprovedSupervisor
        );
    }

    /// Every transition function agrees with the transition matrix.
    #[test]
    fn prop_budget_transitions_match_matrix(
        from in arb_budget_status(),
        user in arb_user(),
        reason in arb_reason(),
    ) {
        prop_assume!(!reason.is_empty());

        let submit_ok = BudgetWorkflow::submit(from, &reason, Decimal::ONE).is_ok();
        prop_assert_eq!(
            submit_ok,
            BudgetWorkflow::is_valid_transition(from, BudgetStatus::Submitted)
                && from == BudgetStatus::Draft
        );

        let close_ok = BudgetWorkflow::close(from).is_ok();
        prop_assert_eq!(
            close_ok,
            BudgetWorkflow::is_valid_transition(from, BudgetStatus::Closed)
        );

        let resubmit_ok = BudgetWorkflow::resubmit(from).is_ok();
        prop_assert_eq!(resubmit_ok, from == BudgetStatus::ReviseRequested);

        let revise_ok = BudgetWorkflow::request_revision(from, user, reason.clone()).is_ok();
        prop_assert_eq!(
            revise_ok,
            BudgetWorkflow::is_valid_transition(from, BudgetStatus::ReviseRequested)
        );
    }

    /// Revision approvals happen strictly in unit-then-finance order.
    #[test]
    fn prop_revision_stage_order(
        status in arb_revision_status(),
        user in arb_user(),
    ) {
        prop_assert_eq!(
            RevisionWorkflow::approve_unit(status, user).is_ok(),
            status == RevisionStatus::Submitted
        );
        prop_assert_eq!(
            RevisionWorkflow::approve_finance(status, user).is_ok(),
            status == RevisionStatus::ApprovedUnit
        );
    }

    /// Commitment terminal statuses accept no further transitions.
    #[test]
    fn prop_commitment_terminal_is_dead_end(
        status in arb_commitment_status(),
        user in arb_user(),
        reason in arb_reason(),
    ) {
        prop_assume!(status.is_terminal());
        prop_assume!(!reason.is_empty());

        prop_assert!(CommitmentWorkflow::submit(status).is_err());
        prop_assert!(CommitmentWorkflow::approve_unit(status, user).is_err());
        prop_assert!(CommitmentWorkflow::approve_finance(status, user).is_err());
        prop_assert!(CommitmentWorkflow::complete(status).is_err());
        prop_assert!(CommitmentWorkflow::cancel(status).is_err());
        prop_assert!(CommitmentWorkflow::reject_unit(status, user, reason.clone()).is_err());
        prop_assert!(CommitmentWorkflow::reject_finance(status, user, reason).is_err());
    }

    /// Posting is the only path into Posted, and only from ApprovedUnit.
    #[test]
    fn prop_actual_posting_gate(
        status in arb_actual_status(),
        user in arb_user(),
    ) {
        let result = ActualWorkflow::post(status, user);
        prop_assert_eq!(result.is_ok(), status == ActualStatus::ApprovedUnit);
    }

    /// An empty rejection reason is refused regardless of status.
    #[test]
    fn prop_empty_rejection_reason_refused(
        budget_status in arb_budget_status(),
        actual_status in arb_actual_status(),
        user in arb_user(),
        ws in "[ \t]{0,6}",
    ) {
        prop_assert!(matches!(
            BudgetWorkflow::reject_supervisor(budget_status, user, ws.clone()),
            Err(WorkflowError::RejectionReasonRequired)
        ));
        prop_assert!(matches!(
            ActualWorkflow::reject_unit(actual_status, user, ws),
            Err(WorkflowError::RejectionReasonRequired)
        ));
    }
}
