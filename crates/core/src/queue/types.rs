//! Approval queue data types.

use serde::{Deserialize, Serialize};

use crate::store::types::{ActualPayment, Budget, BudgetRevision, Commitment};

/// The entities awaiting a specific viewer's decision.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PendingApprovals {
    /// Budgets pending the viewer's approval stage.
    pub budgets: Vec<Budget>,
    /// Revisions pending the viewer's approval stage.
    pub revisions: Vec<BudgetRevision>,
    /// Commitments pending the viewer's approval stage.
    pub commitments: Vec<Commitment>,
    /// Actual payments pending the viewer's approval stage.
    pub actuals: Vec<ActualPayment>,
}

impl PendingApprovals {
    /// Returns true if nothing awaits the viewer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
            && self.revisions.is_empty()
            && self.commitments.is_empty()
            && self.actuals.is_empty()
    }

    /// Total number of pending items across all entity types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.budgets.len() + self.revisions.len() + self.commitments.len() + self.actuals.len()
    }
}

/// An operator's own submissions, scoped to their unit and identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MySubmissions {
    /// Budgets created by the operator.
    pub budgets: Vec<Budget>,
    /// Revisions created by the operator.
    pub revisions: Vec<BudgetRevision>,
    /// Commitments created by the operator.
    pub commitments: Vec<Commitment>,
    /// Actual payments created by the operator.
    pub actuals: Vec<ActualPayment>,
}
