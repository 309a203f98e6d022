//! The entity store and its operation surface.
//!
//! `BudgetStore` owns the four entity collections and is the only way to
//! mutate them. Every operation validates its input, runs the workflow and
//! capacity guards against the current state, and only then applies the
//! resulting action, all inside one `&mut self` call, so a guard check and
//! its write are atomic with respect to the store. Rust's borrow rules
//! serialize access; a multi-user embedding wraps the store in its own
//! mutex or actor.
//!
//! Reads recompute from the collections on every call. Nothing derived is
//! cached.

use rust_decimal::Decimal;
use tracing::info;

use super::error::StoreError;
use super::types::{
    ActualPayment, Budget, BudgetRevision, BudgetType, Commitment, CreateActualInput,
    CreateBudgetInput, CreateCommitmentInput, CreateRevisionInput,
};
use crate::balance::service::BalanceService;
use crate::balance::types::BudgetBalance;
use crate::queue::service::QueueService;
use crate::queue::types::{MySubmissions, PendingApprovals};
use crate::reports::service::ReportService;
use crate::reports::types::BudgetVsActualRow;
use crate::workflow::approval::{Actor, Role, ensure_finance_approver, ensure_unit_approver};
use crate::workflow::error::WorkflowError;
use crate::workflow::service::{
    ActualWorkflow, BudgetWorkflow, CommitmentWorkflow, RevisionWorkflow,
};
use crate::workflow::types::CommitmentStatus;
use anggaran_shared::types::{ActualId, BudgetId, CommitmentId, RevisionId, UnitId};

/// In-memory store for budgets, revisions, commitments, and actual payments.
#[derive(Debug, Default)]
pub struct BudgetStore {
    budgets: Vec<Budget>,
    revisions: Vec<BudgetRevision>,
    commitments: Vec<Commitment>,
    actuals: Vec<ActualPayment>,
}

impl BudgetStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ===== BUDGET OPERATIONS =====

    /// Creates a new draft budget and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when the unit or COA reference is empty.
    pub fn create_budget(&mut self, input: CreateBudgetInput) -> Result<BudgetId, StoreError> {
        if input.unit.trim().is_empty() {
            return Err(StoreError::MissingField("unit"));
        }
        if input.coa.trim().is_empty() {
            return Err(StoreError::MissingField("coa"));
        }

        let id = BudgetId::new();
        self.budgets.push(Budget::new(id, input));
        info!(budget_id = %id, "budget created");
        Ok(id)
    }

    /// Submits a draft budget for supervisor approval.
    ///
    /// Requires a non-empty justification and a positive initial amount.
    pub fn submit_budget(&mut self, budget_id: BudgetId) -> Result<(), StoreError> {
        let idx = self.budget_index(budget_id)?;
        let budget = &self.budgets[idx];
        let action =
            BudgetWorkflow::submit(budget.status, &budget.justification, budget.initial_amount)?;
        self.budgets[idx].apply(action);
        info!(%budget_id, "budget submitted");
        Ok(())
    }

    /// Supervisor approval of a submitted budget, scoped to the budget's
    /// unit.
    pub fn approve_budget_by_supervisor(
        &mut self,
        budget_id: BudgetId,
        actor: &Actor,
    ) -> Result<(), StoreError> {
        let idx = self.budget_index(budget_id)?;
        let budget = &self.budgets[idx];
        ensure_unit_approver(actor, budget.unit_id)?;
        let action = BudgetWorkflow::approve_supervisor(budget.status, actor.user_id)?;
        self.budgets[idx].apply(action);
        info!(%budget_id, approver = %actor.user_id, "budget approved by supervisor");
        Ok(())
    }

    /// Admin activation of a supervisor-approved budget (corporate-wide).
    pub fn approve_budget_by_admin(
        &mut self,
        budget_id: BudgetId,
        actor: &Actor,
    ) -> Result<(), StoreError> {
        let idx = self.budget_index(budget_id)?;
        ensure_finance_approver(actor)?;
        let action = BudgetWorkflow::activate(self.budgets[idx].status, actor.user_id)?;
        self.budgets[idx].apply(action);
        info!(%budget_id, approver = %actor.user_id, "budget activated");
        Ok(())
    }

    /// Supervisor rejection of a submitted budget (terminal).
    pub fn reject_budget_by_supervisor(
        &mut self,
        budget_id: BudgetId,
        actor: &Actor,
        reason: String,
    ) -> Result<(), StoreError> {
        let idx = self.budget_index(budget_id)?;
        let budget = &self.budgets[idx];
        ensure_unit_approver(actor, budget.unit_id)?;
        let action = BudgetWorkflow::reject_supervisor(budget.status, actor.user_id, reason)?;
        self.budgets[idx].apply(action);
        info!(%budget_id, "budget rejected by supervisor");
        Ok(())
    }

    /// Admin rejection of a supervisor-approved budget (terminal).
    pub fn reject_budget_by_admin(
        &mut self,
        budget_id: BudgetId,
        actor: &Actor,
        reason: String,
    ) -> Result<(), StoreError> {
        let idx = self.budget_index(budget_id)?;
        ensure_finance_approver(actor)?;
        let action =
            BudgetWorkflow::reject_admin(self.budgets[idx].status, actor.user_id, reason)?;
        self.budgets[idx].apply(action);
        info!(%budget_id, "budget rejected by admin");
        Ok(())
    }

    /// Sends a pending budget back to the operator with revision notes.
    ///
    /// Either approver may request a revision at their own stage; a
    /// supervisor stays scoped to their unit.
    pub fn request_budget_revision(
        &mut self,
        budget_id: BudgetId,
        actor: &Actor,
        notes: String,
    ) -> Result<(), StoreError> {
        let idx = self.budget_index(budget_id)?;
        let budget = &self.budgets[idx];
        match actor.role {
            Role::Supervisor => ensure_unit_approver(actor, budget.unit_id)?,
            Role::AdminBudget => {}
            Role::Operator => {
                return Err(WorkflowError::RoleNotPermitted {
                    role: actor.role,
                    operation: "request a budget revision",
                }
                .into());
            }
        }
        let action = BudgetWorkflow::request_revision(budget.status, actor.user_id, notes)?;
        self.budgets[idx].apply(action);
        info!(%budget_id, "budget revision requested");
        Ok(())
    }

    /// Operator resubmission of a budget after a revise request.
    pub fn resubmit_budget(&mut self, budget_id: BudgetId) -> Result<(), StoreError> {
        let idx = self.budget_index(budget_id)?;
        let action = BudgetWorkflow::resubmit(self.budgets[idx].status)?;
        self.budgets[idx].apply(action);
        info!(%budget_id, "budget resubmitted");
        Ok(())
    }

    /// Closes every active budget of the given fiscal year. Returns how
    /// many budgets were closed.
    pub fn close_fiscal_year(&mut self, fiscal_year: i32) -> usize {
        let mut closed = 0;
        for budget in &mut self.budgets {
            if budget.fiscal_year == fiscal_year
                && let Ok(action) = BudgetWorkflow::close(budget.status)
            {
                budget.apply(action);
                closed += 1;
            }
        }
        info!(fiscal_year, closed, "fiscal year closed");
        closed
    }

    // ===== REVISION OPERATIONS =====

    /// Creates a draft revision against an active budget, snapshotting the
    /// current approved amount as `old_amount`.
    pub fn create_revision(&mut self, input: CreateRevisionInput) -> Result<RevisionId, StoreError> {
        let budget = self.budget_ref(input.budget_id)?;
        if !budget.status.is_spendable() {
            return Err(StoreError::BudgetNotSpendable {
                budget_id: budget.id,
                status: budget.status,
            });
        }
        if input.reason.trim().is_empty() {
            return Err(StoreError::MissingField("reason"));
        }
        if input.new_amount <= Decimal::ZERO {
            return Err(StoreError::NonPositiveAmount);
        }

        let old_amount = BalanceService::approved_amount(budget, &self.revisions);
        let id = RevisionId::new();
        self.revisions
            .push(BudgetRevision::new(id, input, old_amount));
        info!(revision_id = %id, "revision created");
        Ok(id)
    }

    /// Submits a draft revision for unit approval.
    ///
    /// Guard: the new amount may not fall below the budget's
    /// committed-plus-actual total.
    pub fn submit_revision(&mut self, revision_id: RevisionId) -> Result<(), StoreError> {
        let idx = self.revision_index(revision_id)?;
        let revision = &self.revisions[idx];
        self.check_revision_floor(revision)?;
        let action = RevisionWorkflow::submit(revision.status)?;
        self.revisions[idx].apply(action);
        info!(%revision_id, "revision submitted");
        Ok(())
    }

    /// Unit-stage approval of a submitted revision, scoped to the parent
    /// budget's unit.
    pub fn approve_revision_by_unit(
        &mut self,
        revision_id: RevisionId,
        actor: &Actor,
    ) -> Result<(), StoreError> {
        let idx = self.revision_index(revision_id)?;
        let budget = self.budget_ref(self.revisions[idx].budget_id)?;
        ensure_unit_approver(actor, budget.unit_id)?;
        let action = RevisionWorkflow::approve_unit(self.revisions[idx].status, actor.user_id)?;
        self.revisions[idx].apply(action);
        info!(%revision_id, "revision approved by unit");
        Ok(())
    }

    /// Finance-stage approval of a unit-approved revision. The floor guard
    /// is re-checked here because commitments may have grown since
    /// submission.
    pub fn approve_revision_by_finance(
        &mut self,
        revision_id: RevisionId,
        actor: &Actor,
    ) -> Result<(), StoreError> {
        let idx = self.revision_index(revision_id)?;
        ensure_finance_approver(actor)?;
        self.check_revision_floor(&self.revisions[idx])?;
        let action = RevisionWorkflow::approve_finance(self.revisions[idx].status, actor.user_id)?;
        self.revisions[idx].apply(action);
        info!(%revision_id, "revision approved by finance");
        Ok(())
    }

    /// Unit-stage rejection of a submitted revision (terminal).
    pub fn reject_revision_by_unit(
        &mut self,
        revision_id: RevisionId,
        actor: &Actor,
        reason: String,
    ) -> Result<(), StoreError> {
        let idx = self.revision_index(revision_id)?;
        let budget = self.budget_ref(self.revisions[idx].budget_id)?;
        ensure_unit_approver(actor, budget.unit_id)?;
        let action =
            RevisionWorkflow::reject_unit(self.revisions[idx].status, actor.user_id, reason)?;
        self.revisions[idx].apply(action);
        info!(%revision_id, "revision rejected by unit");
        Ok(())
    }

    /// Finance-stage rejection of a unit-approved revision (terminal).
    pub fn reject_revision_by_finance(
        &mut self,
        revision_id: RevisionId,
        actor: &Actor,
        reason: String,
    ) -> Result<(), StoreError> {
        let idx = self.revision_index(revision_id)?;
        ensure_finance_approver(actor)?;
        let action =
            RevisionWorkflow::reject_finance(self.revisions[idx].status, actor.user_id, reason)?;
        self.revisions[idx].apply(action);
        info!(%revision_id, "revision rejected by finance");
        Ok(())
    }

    // ===== COMMITMENT OPERATIONS =====

    /// Creates a draft commitment against an active budget.
    ///
    /// Guard: the amount must fit within the budget's available balance.
    pub fn create_commitment(
        &mut self,
        input: CreateCommitmentInput,
    ) -> Result<CommitmentId, StoreError> {
        if input.spk_number.trim().is_empty() {
            return Err(StoreError::MissingField("spk_number"));
        }
        if input.amount <= Decimal::ZERO {
            return Err(StoreError::NonPositiveAmount);
        }

        let budget = self.budget_ref(input.budget_id)?;
        if !budget.status.is_spendable() {
            return Err(StoreError::BudgetNotSpendable {
                budget_id: budget.id,
                status: budget.status,
            });
        }
        self.check_budget_capacity(budget, input.amount)?;

        let id = CommitmentId::new();
        self.commitments.push(Commitment::new(id, input));
        info!(commitment_id = %id, "commitment created");
        Ok(id)
    }

    /// Submits a draft commitment for unit approval, re-checking capacity
    /// against the budget's current balance.
    pub fn submit_commitment(&mut self, commitment_id: CommitmentId) -> Result<(), StoreError> {
        let idx = self.commitment_index(commitment_id)?;
        let commitment = &self.commitments[idx];
        let budget = self.budget_ref(commitment.budget_id)?;
        if !budget.status.is_spendable() {
            return Err(StoreError::BudgetNotSpendable {
                budget_id: budget.id,
                status: budget.status,
            });
        }
        self.check_budget_capacity(budget, commitment.amount)?;
        let action = CommitmentWorkflow::submit(commitment.status)?;
        self.commitments[idx].apply(action);
        info!(%commitment_id, "commitment submitted");
        Ok(())
    }

    /// Unit-stage approval of a submitted commitment, scoped to its unit.
    pub fn approve_commitment_by_unit(
        &mut self,
        commitment_id: CommitmentId,
        actor: &Actor,
    ) -> Result<(), StoreError> {
        let idx = self.commitment_index(commitment_id)?;
        ensure_unit_approver(actor, self.commitments[idx].unit_id)?;
        let action =
            CommitmentWorkflow::approve_unit(self.commitments[idx].status, actor.user_id)?;
        self.commitments[idx].apply(action);
        info!(%commitment_id, "commitment approved by unit");
        Ok(())
    }

    /// Finance-stage approval of a unit-approved commitment. Capacity is
    /// re-checked at the moment the amount starts locking the budget.
    pub fn approve_commitment_by_finance(
        &mut self,
        commitment_id: CommitmentId,
        actor: &Actor,
    ) -> Result<(), StoreError> {
        let idx = self.commitment_index(commitment_id)?;
        ensure_finance_approver(actor)?;
        let commitment = &self.commitments[idx];
        let budget = self.budget_ref(commitment.budget_id)?;
        self.check_budget_capacity(budget, commitment.amount)?;
        let action = CommitmentWorkflow::approve_finance(commitment.status, actor.user_id)?;
        self.commitments[idx].apply(action);
        info!(%commitment_id, "commitment approved by finance");
        Ok(())
    }

    /// Unit-stage rejection of a submitted commitment (terminal).
    pub fn reject_commitment_by_unit(
        &mut self,
        commitment_id: CommitmentId,
        actor: &Actor,
        reason: String,
    ) -> Result<(), StoreError> {
        let idx = self.commitment_index(commitment_id)?;
        ensure_unit_approver(actor, self.commitments[idx].unit_id)?;
        let action =
            CommitmentWorkflow::reject_unit(self.commitments[idx].status, actor.user_id, reason)?;
        self.commitments[idx].apply(action);
        info!(%commitment_id, "commitment rejected by unit");
        Ok(())
    }

    /// Finance-stage rejection of a unit-approved commitment (terminal).
    pub fn reject_commitment_by_finance(
        &mut self,
        commitment_id: CommitmentId,
        actor: &Actor,
        reason: String,
    ) -> Result<(), StoreError> {
        let idx = self.commitment_index(commitment_id)?;
        ensure_finance_approver(actor)?;
        let action = CommitmentWorkflow::reject_finance(
            self.commitments[idx].status,
            actor.user_id,
            reason,
        )?;
        self.commitments[idx].apply(action);
        info!(%commitment_id, "commitment rejected by finance");
        Ok(())
    }

    /// Marks a finance-approved commitment as completed.
    pub fn complete_commitment(&mut self, commitment_id: CommitmentId) -> Result<(), StoreError> {
        let idx = self.commitment_index(commitment_id)?;
        let action = CommitmentWorkflow::complete(self.commitments[idx].status)?;
        self.commitments[idx].apply(action);
        info!(%commitment_id, "commitment completed");
        Ok(())
    }

    /// Cancels a commitment that has not locked budget capacity yet.
    pub fn cancel_commitment(&mut self, commitment_id: CommitmentId) -> Result<(), StoreError> {
        let idx = self.commitment_index(commitment_id)?;
        let action = CommitmentWorkflow::cancel(self.commitments[idx].status)?;
        self.commitments[idx].apply(action);
        info!(%commitment_id, "commitment cancelled");
        Ok(())
    }

    // ===== ACTUAL PAYMENT OPERATIONS =====

    /// Creates a draft payment against an active budget.
    ///
    /// Project budgets require a commitment reference; with a reference the
    /// amount must fit the commitment's remaining capacity, without one it
    /// must fit the budget's available balance.
    pub fn create_actual(&mut self, input: CreateActualInput) -> Result<ActualId, StoreError> {
        if input.invoice_number.trim().is_empty() {
            return Err(StoreError::MissingField("invoice_number"));
        }
        if input.amount <= Decimal::ZERO {
            return Err(StoreError::NonPositiveAmount);
        }

        let budget = self.budget_ref(input.budget_id)?;
        if !budget.status.is_spendable() {
            return Err(StoreError::BudgetNotSpendable {
                budget_id: budget.id,
                status: budget.status,
            });
        }
        if budget.budget_type == BudgetType::Project && input.commitment_id.is_none() {
            return Err(StoreError::CommitmentRequired);
        }

        self.check_actual_capacity(budget, input.commitment_id, input.amount)?;

        let id = ActualId::new();
        self.actuals.push(ActualPayment::new(id, input));
        info!(actual_id = %id, "actual payment created");
        Ok(id)
    }

    /// Submits a draft payment for unit approval.
    pub fn submit_actual(&mut self, actual_id: ActualId) -> Result<(), StoreError> {
        let idx = self.actual_index(actual_id)?;
        let action = ActualWorkflow::submit(self.actuals[idx].status)?;
        self.actuals[idx].apply(action);
        info!(%actual_id, "actual payment submitted");
        Ok(())
    }

    /// Unit-stage approval of a submitted payment, scoped to the parent
    /// budget's unit.
    pub fn approve_actual_by_unit(
        &mut self,
        actual_id: ActualId,
        actor: &Actor,
    ) -> Result<(), StoreError> {
        let idx = self.actual_index(actual_id)?;
        let budget = self.budget_ref(self.actuals[idx].budget_id)?;
        ensure_unit_approver(actor, budget.unit_id)?;
        let action = ActualWorkflow::approve_unit(self.actuals[idx].status, actor.user_id)?;
        self.actuals[idx].apply(action);
        info!(%actual_id, "actual payment approved by unit");
        Ok(())
    }

    /// Finance-stage approval, posting the payment. Capacity is re-checked
    /// at the moment the amount starts counting toward the budget.
    pub fn approve_actual_by_finance(
        &mut self,
        actual_id: ActualId,
        actor: &Actor,
    ) -> Result<(), StoreError> {
        let idx = self.actual_index(actual_id)?;
        ensure_finance_approver(actor)?;
        let actual = &self.actuals[idx];
        let budget = self.budget_ref(actual.budget_id)?;
        self.check_actual_capacity(budget, actual.commitment_id, actual.amount)?;
        let action = ActualWorkflow::post(actual.status, actor.user_id)?;
        self.actuals[idx].apply(action);
        info!(%actual_id, "actual payment posted");
        Ok(())
    }

    /// Unit-stage rejection of a submitted payment (terminal).
    pub fn reject_actual_by_unit(
        &mut self,
        actual_id: ActualId,
        actor: &Actor,
        reason: String,
    ) -> Result<(), StoreError> {
        let idx = self.actual_index(actual_id)?;
        let budget = self.budget_ref(self.actuals[idx].budget_id)?;
        ensure_unit_approver(actor, budget.unit_id)?;
        let action =
            ActualWorkflow::reject_unit(self.actuals[idx].status, actor.user_id, reason)?;
        self.actuals[idx].apply(action);
        info!(%actual_id, "actual payment rejected by unit");
        Ok(())
    }

    /// Finance-stage rejection of a unit-approved payment (terminal).
    pub fn reject_actual_by_finance(
        &mut self,
        actual_id: ActualId,
        actor: &Actor,
        reason: String,
    ) -> Result<(), StoreError> {
        let idx = self.actual_index(actual_id)?;
        ensure_finance_approver(actor)?;
        let action =
            ActualWorkflow::reject_finance(self.actuals[idx].status, actor.user_id, reason)?;
        self.actuals[idx].apply(action);
        info!(%actual_id, "actual payment rejected by finance");
        Ok(())
    }

    /// Cancels a draft or posted payment.
    pub fn cancel_actual(&mut self, actual_id: ActualId) -> Result<(), StoreError> {
        let idx = self.actual_index(actual_id)?;
        let action = ActualWorkflow::cancel(self.actuals[idx].status)?;
        self.actuals[idx].apply(action);
        info!(%actual_id, "actual payment cancelled");
        Ok(())
    }

    // ===== READS =====

    /// Recomputes the balance for one budget.
    pub fn budget_balance(&self, budget_id: BudgetId) -> Result<BudgetBalance, StoreError> {
        let budget = self.budget_ref(budget_id)?;
        Ok(BalanceService::budget_balance(
            budget,
            &self.revisions,
            &self.commitments,
            &self.actuals,
        ))
    }

    /// The entities awaiting the viewer's approval decision.
    #[must_use]
    pub fn pending_approvals_for(&self, viewer: &Actor) -> PendingApprovals {
        QueueService::pending_for(
            viewer,
            &self.budgets,
            &self.revisions,
            &self.commitments,
            &self.actuals,
        )
    }

    /// An operator's own submissions.
    #[must_use]
    pub fn submissions_for(&self, viewer: &Actor) -> MySubmissions {
        QueueService::submissions_for(
            viewer,
            &self.budgets,
            &self.revisions,
            &self.commitments,
            &self.actuals,
        )
    }

    /// The budget-vs-actual monitoring matrix for one fiscal year.
    #[must_use]
    pub fn budget_vs_actual(
        &self,
        fiscal_year: i32,
        budget_type: Option<BudgetType>,
    ) -> Vec<BudgetVsActualRow> {
        ReportService::budget_vs_actual(
            fiscal_year,
            budget_type,
            &self.budgets,
            &self.revisions,
            &self.commitments,
            &self.actuals,
        )
    }

    /// All budgets of one unit.
    #[must_use]
    pub fn budgets_by_unit(&self, unit_id: UnitId) -> Vec<Budget> {
        self.budgets
            .iter()
            .filter(|b| b.unit_id == unit_id)
            .cloned()
            .collect()
    }

    /// All commitments of one unit.
    #[must_use]
    pub fn commitments_by_unit(&self, unit_id: UnitId) -> Vec<Commitment> {
        self.commitments
            .iter()
            .filter(|c| c.unit_id == unit_id)
            .cloned()
            .collect()
    }

    /// All actual payments whose parent budget belongs to one unit.
    #[must_use]
    pub fn actuals_by_unit(&self, unit_id: UnitId) -> Vec<ActualPayment> {
        self.actuals
            .iter()
            .filter(|a| {
                self.budgets
                    .iter()
                    .any(|b| b.id == a.budget_id && b.unit_id == unit_id)
            })
            .cloned()
            .collect()
    }

    /// Looks up one budget.
    #[must_use]
    pub fn budget(&self, budget_id: BudgetId) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.id == budget_id)
    }

    /// Looks up one revision.
    #[must_use]
    pub fn revision(&self, revision_id: RevisionId) -> Option<&BudgetRevision> {
        self.revisions.iter().find(|r| r.id == revision_id)
    }

    /// Looks up one commitment.
    #[must_use]
    pub fn commitment(&self, commitment_id: CommitmentId) -> Option<&Commitment> {
        self.commitments.iter().find(|c| c.id == commitment_id)
    }

    /// Looks up one actual payment.
    #[must_use]
    pub fn actual(&self, actual_id: ActualId) -> Option<&ActualPayment> {
        self.actuals.iter().find(|a| a.id == actual_id)
    }

    /// All budgets.
    #[must_use]
    pub fn budgets(&self) -> &[Budget] {
        &self.budgets
    }

    /// All revisions.
    #[must_use]
    pub fn revisions(&self) -> &[BudgetRevision] {
        &self.revisions
    }

    /// All commitments.
    #[must_use]
    pub fn commitments(&self) -> &[Commitment] {
        &self.commitments
    }

    /// All actual payments.
    #[must_use]
    pub fn actuals(&self) -> &[ActualPayment] {
        &self.actuals
    }

    // ===== INTERNAL GUARDS =====

    fn budget_index(&self, budget_id: BudgetId) -> Result<usize, StoreError> {
        self.budgets
            .iter()
            .position(|b| b.id == budget_id)
            .ok_or(StoreError::BudgetNotFound(budget_id))
    }

    fn budget_ref(&self, budget_id: BudgetId) -> Result<&Budget, StoreError> {
        self.budgets
            .iter()
            .find(|b| b.id == budget_id)
            .ok_or(StoreError::BudgetNotFound(budget_id))
    }

    fn revision_index(&self, revision_id: RevisionId) -> Result<usize, StoreError> {
        self.revisions
            .iter()
            .position(|r| r.id == revision_id)
            .ok_or(StoreError::RevisionNotFound(revision_id))
    }

    fn commitment_index(&self, commitment_id: CommitmentId) -> Result<usize, StoreError> {
        self.commitments
            .iter()
            .position(|c| c.id == commitment_id)
            .ok_or(StoreError::CommitmentNotFound(commitment_id))
    }

    fn actual_index(&self, actual_id: ActualId) -> Result<usize, StoreError> {
        self.actuals
            .iter()
            .position(|a| a.id == actual_id)
            .ok_or(StoreError::ActualNotFound(actual_id))
    }

    /// The requested amount must fit within the budget's available balance.
    fn check_budget_capacity(&self, budget: &Budget, requested: Decimal) -> Result<(), StoreError> {
        let balance = BalanceService::budget_balance(
            budget,
            &self.revisions,
            &self.commitments,
            &self.actuals,
        );
        if requested > balance.available_budget {
            return Err(StoreError::CapacityExceeded {
                requested,
                available: balance.available_budget,
            });
        }
        Ok(())
    }

    /// Capacity check for a payment: against the referenced commitment's
    /// remaining capacity, or against the budget directly when no
    /// commitment is involved.
    fn check_actual_capacity(
        &self,
        budget: &Budget,
        commitment_id: Option<CommitmentId>,
        requested: Decimal,
    ) -> Result<(), StoreError> {
        match commitment_id {
            Some(commitment_id) => {
                let commitment = self
                    .commitments
                    .iter()
                    .find(|c| c.id == commitment_id)
                    .ok_or(StoreError::CommitmentNotFound(commitment_id))?;
                if commitment.budget_id != budget.id {
                    return Err(StoreError::CommitmentMismatch {
                        commitment_id,
                        budget_id: budget.id,
                    });
                }
                if commitment.status != CommitmentStatus::ApprovedFinance {
                    return Err(StoreError::CommitmentNotApproved {
                        commitment_id,
                        status: commitment.status,
                    });
                }
                let remaining = BalanceService::commitment_remaining(commitment, &self.actuals);
                if requested > remaining {
                    return Err(StoreError::CommitmentCapacityExceeded {
                        requested,
                        remaining,
                    });
                }
                Ok(())
            }
            None => self.check_budget_capacity(budget, requested),
        }
    }

    /// A revision's new amount may not fall below the parent budget's
    /// committed-plus-actual total.
    fn check_revision_floor(&self, revision: &BudgetRevision) -> Result<(), StoreError> {
        let budget = self.budget_ref(revision.budget_id)?;
        let floor =
            BalanceService::committed_plus_actual(budget, &self.commitments, &self.actuals);
        if revision.new_amount < floor {
            return Err(StoreError::RevisionBelowCommitted {
                new_amount: revision.new_amount,
                floor,
            });
        }
        Ok(())
    }
}
