//! Per-viewer approval queue computation.
//!
//! Routes pending entities to the approver whose decision they await.
//! Supervisors see their own unit's submitted items (revisions and payments
//! are scoped through their parent budget's unit); admin budget sees every
//! unit's stage-two items; operators are not approvers and always get an
//! empty queue.

use crate::store::types::{ActualPayment, Budget, BudgetRevision, Commitment};
use crate::workflow::approval::{Actor, Role};
use crate::workflow::types::{ActualStatus, BudgetStatus, CommitmentStatus, RevisionStatus};
use anggaran_shared::types::{BudgetId, UnitId};

use super::types::{MySubmissions, PendingApprovals};

/// Stateless approval queue router.
pub struct QueueService;

impl QueueService {
    /// Computes the entities awaiting the viewer's decision.
    #[must_use]
    pub fn pending_for(
        viewer: &Actor,
        budgets: &[Budget],
        revisions: &[BudgetRevision],
        commitments: &[Commitment],
        actuals: &[ActualPayment],
    ) -> PendingApprovals {
        match (viewer.role, viewer.unit_id) {
            (Role::Supervisor, Some(unit_id)) => {
                Self::pending_unit(unit_id, budgets, revisions, commitments, actuals)
            }
            (Role::AdminBudget, _) => Self::pending_finance(budgets, revisions, commitments, actuals),
            // Operators are not approvers; a supervisor without a unit has
            // nothing in scope.
            _ => PendingApprovals::default(),
        }
    }

    /// Submitted items of one unit, awaiting the supervisor stage.
    fn pending_unit(
        unit_id: UnitId,
        budgets: &[Budget],
        revisions: &[BudgetRevision],
        commitments: &[Commitment],
        actuals: &[ActualPayment],
    ) -> PendingApprovals {
        let budget_unit = |budget_id: BudgetId| -> Option<UnitId> {
            budgets.iter().find(|b| b.id == budget_id).map(|b| b.unit_id)
        };

        PendingApprovals {
            budgets: budgets
                .iter()
                .filter(|b| b.unit_id == unit_id && b.status == BudgetStatus::Submitted)
                .cloned()
                .collect(),
            revisions: revisions
                .iter()
                .filter(|r| {
                    r.status == RevisionStatus::Submitted
                        && budget_unit(r.budget_id) == Some(unit_id)
                })
                .cloned()
                .collect(),
            commitments: commitments
                .iter()
                .filter(|c| c.unit_id == unit_id && c.status == CommitmentStatus::Submitted)
                .cloned()
                .collect(),
            actuals: actuals
                .iter()
                .filter(|a| {
                    a.status == ActualStatus::Submitted
                        && budget_unit(a.budget_id) == Some(unit_id)
                })
                .cloned()
                .collect(),
        }
    }

    /// Stage-two pending items across all units, awaiting corporate finance.
    fn pending_finance(
        budgets: &[Budget],
        revisions: &[BudgetRevision],
        commitments: &[Commitment],
        actuals: &[ActualPayment],
    ) -> PendingApprovals {
        PendingApprovals {
            budgets: budgets
                .iter()
                .filter(|b| b.status == BudgetStatus::ApprovedSupervisor)
                .cloned()
                .collect(),
            revisions: revisions
                .iter()
                .filter(|r| r.status == RevisionStatus::ApprovedUnit)
                .cloned()
                .collect(),
            commitments: commitments
                .iter()
                .filter(|c| c.status == CommitmentStatus::ApprovedUnit)
                .cloned()
                .collect(),
            actuals: actuals
                .iter()
                .filter(|a| a.status == ActualStatus::ApprovedUnit)
                .cloned()
                .collect(),
        }
    }

    /// An operator's own submissions: entities of their unit created by
    /// them. Returns an empty result for non-operator viewers.
    #[must_use]
    pub fn submissions_for(
        viewer: &Actor,
        budgets: &[Budget],
        revisions: &[BudgetRevision],
        commitments: &[Commitment],
        actuals: &[ActualPayment],
    ) -> MySubmissions {
        let (Role::Operator, Some(unit_id)) = (viewer.role, viewer.unit_id) else {
            return MySubmissions::default();
        };

        let my_budget = |budget_id: BudgetId| -> bool {
            budgets
                .iter()
                .any(|b| b.id == budget_id && b.unit_id == unit_id)
        };

        MySubmissions {
            budgets: budgets
                .iter()
                .filter(|b| b.unit_id == unit_id && b.created_by == viewer.user_id)
                .cloned()
                .collect(),
            revisions: revisions
                .iter()
                .filter(|r| r.created_by == viewer.user_id && my_budget(r.budget_id))
                .cloned()
                .collect(),
            commitments: commitments
                .iter()
                .filter(|c| c.unit_id == unit_id && c.created_by == viewer.user_id)
                .cloned()
                .collect(),
            actuals: actuals
                .iter()
                .filter(|a| a.created_by == viewer.user_id && my_budget(a.budget_id))
                .cloned()
                .collect(),
        }
    }
}
