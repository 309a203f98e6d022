//! Entity data types held by the store.
//!
//! These are pure data records. The only fields that mutate after creation
//! are the status and the approval/rejection metadata, and they change only
//! through [`apply`](Budget::apply)-ing a workflow action. All aggregate
//! figures are recomputed from these records, never stored on them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::types::{
    ActualAction, ActualStatus, Approval, BudgetAction, BudgetStatus, CommitmentAction,
    CommitmentStatus, Rejection, ReviseRequest, RevisionAction, RevisionStatus,
};
use anggaran_shared::types::{ActualId, BudgetId, CommitmentId, RccId, RevisionId, UnitId, UserId};

/// Budget type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetType {
    /// Project budget; actual payments require a commitment (SPK).
    Project,
    /// Routine operations budget; payments may skip the SPK.
    Routine,
}

impl fmt::Display for BudgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::Routine => write!(f, "routine"),
        }
    }
}

/// A budget record: a proposed or active allocation of money to a unit for a
/// fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Budget ID.
    pub id: BudgetId,
    /// Fiscal year the budget belongs to.
    pub fiscal_year: i32,
    /// Unit display name (master data, read by reference).
    pub unit: String,
    /// Owning organizational unit.
    pub unit_id: UnitId,
    /// Responsibility cost center the budget is charged against.
    pub rcc_id: RccId,
    /// Budget type.
    pub budget_type: BudgetType,
    /// Project name, when this is a project budget.
    pub project_name: Option<String>,
    /// Chart of accounts code (master data, read by reference).
    pub coa: String,
    /// Initially requested amount.
    pub initial_amount: Decimal,
    /// Justification text required at submission.
    pub justification: String,
    /// Current workflow status.
    pub status: BudgetStatus,
    /// User who created the budget.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Supervisor approval pair (unit stage).
    pub approved_supervisor: Option<Approval>,
    /// Admin activation pair (finance stage).
    pub approved_admin: Option<Approval>,
    /// When the budget was closed at fiscal year-end.
    pub closed_at: Option<DateTime<Utc>>,
    /// Rejection metadata, when rejected.
    pub rejection: Option<Rejection>,
    /// Revise-request metadata, when sent back to the operator.
    pub revise_request: Option<ReviseRequest>,
}

impl Budget {
    /// Creates a new draft budget from input.
    #[must_use]
    pub fn new(id: BudgetId, input: CreateBudgetInput) -> Self {
        Self {
            id,
            fiscal_year: input.fiscal_year,
            unit: input.unit,
            unit_id: input.unit_id,
            rcc_id: input.rcc_id,
            budget_type: input.budget_type,
            project_name: input.project_name,
            coa: input.coa,
            initial_amount: input.initial_amount,
            justification: input.justification,
            status: BudgetStatus::Draft,
            created_by: input.created_by,
            created_at: Utc::now(),
            approved_supervisor: None,
            approved_admin: None,
            closed_at: None,
            rejection: None,
            revise_request: None,
        }
    }

    /// Applies a validated workflow action, stamping its audit metadata.
    pub fn apply(&mut self, action: BudgetAction) {
        self.status = action.new_status();
        match action {
            BudgetAction::Submit { .. } | BudgetAction::Resubmit { .. } => {}
            BudgetAction::ApproveSupervisor { approval, .. } => {
                self.approved_supervisor = Some(approval);
            }
            BudgetAction::Activate { approval, .. } => self.approved_admin = Some(approval),
            BudgetAction::Reject { rejection, .. } => self.rejection = Some(rejection),
            BudgetAction::RequestRevision { request, .. } => self.revise_request = Some(request),
            BudgetAction::Close { closed_at, .. } => self.closed_at = Some(closed_at),
        }
    }
}

/// An adjustment request changing a budget's approved amount after it is
/// active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRevision {
    /// Revision ID.
    pub id: RevisionId,
    /// Parent budget (non-owning reference).
    pub budget_id: BudgetId,
    /// The budget's approved amount snapshotted at creation.
    pub old_amount: Decimal,
    /// The requested new approved amount.
    pub new_amount: Decimal,
    /// `new_amount - old_amount`; applied to the baseline once finance
    /// approved.
    pub difference: Decimal,
    /// Reason for the adjustment.
    pub reason: String,
    /// Current workflow status.
    pub status: RevisionStatus,
    /// User who created the revision.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Unit approval pair.
    pub approved_unit: Option<Approval>,
    /// Finance approval pair.
    pub approved_finance: Option<Approval>,
    /// Rejection metadata, when rejected.
    pub rejection: Option<Rejection>,
}

impl BudgetRevision {
    /// Creates a new draft revision. `old_amount` is the parent budget's
    /// approved amount at creation time; the difference is derived from it.
    #[must_use]
    pub fn new(id: RevisionId, input: CreateRevisionInput, old_amount: Decimal) -> Self {
        Self {
            id,
            budget_id: input.budget_id,
            old_amount,
            new_amount: input.new_amount,
            difference: input.new_amount - old_amount,
            reason: input.reason,
            status: RevisionStatus::Draft,
            created_by: input.created_by,
            created_at: Utc::now(),
            approved_unit: None,
            approved_finance: None,
            rejection: None,
        }
    }

    /// Applies a validated workflow action, stamping its audit metadata.
    pub fn apply(&mut self, action: RevisionAction) {
        self.status = action.new_status();
        match action {
            RevisionAction::Submit { .. } => {}
            RevisionAction::ApproveUnit { approval, .. } => self.approved_unit = Some(approval),
            RevisionAction::ApproveFinance { approval, .. } => {
                self.approved_finance = Some(approval);
            }
            RevisionAction::Reject { rejection, .. } => self.rejection = Some(rejection),
        }
    }
}

/// A purchase commitment (SPK) reserving budget capacity ahead of payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commitment {
    /// Commitment ID.
    pub id: CommitmentId,
    /// Parent budget (non-owning reference).
    pub budget_id: BudgetId,
    /// The SPK document number.
    pub spk_number: String,
    /// Fiscal year the commitment belongs to.
    pub fiscal_year: i32,
    /// Unit display name.
    pub unit: String,
    /// Owning organizational unit.
    pub unit_id: UnitId,
    /// Responsibility cost center.
    pub rcc_id: RccId,
    /// Vendor name (master data, read by reference).
    pub vendor_name: String,
    /// Vendor contact.
    pub vendor_contact: String,
    /// Description of the committed purchase.
    pub description: String,
    /// Committed amount.
    pub amount: Decimal,
    /// Chart of accounts code.
    pub coa: String,
    /// Commitment period start.
    pub start_date: NaiveDate,
    /// Commitment period end.
    pub end_date: NaiveDate,
    /// Current workflow status.
    pub status: CommitmentStatus,
    /// User who created the commitment.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Unit approval pair.
    pub approved_unit: Option<Approval>,
    /// Finance approval pair.
    pub approved_finance: Option<Approval>,
    /// When the commitment was completed.
    pub completed_at: Option<DateTime<Utc>>,
    /// Rejection metadata, when rejected.
    pub rejection: Option<Rejection>,
}

impl Commitment {
    /// Creates a new draft commitment from input.
    #[must_use]
    pub fn new(id: CommitmentId, input: CreateCommitmentInput) -> Self {
        Self {
            id,
            budget_id: input.budget_id,
            spk_number: input.spk_number,
            fiscal_year: input.fiscal_year,
            unit: input.unit,
            unit_id: input.unit_id,
            rcc_id: input.rcc_id,
            vendor_name: input.vendor_name,
            vendor_contact: input.vendor_contact,
            description: input.description,
            amount: input.amount,
            coa: input.coa,
            start_date: input.start_date,
            end_date: input.end_date,
            status: CommitmentStatus::Draft,
            created_by: input.created_by,
            created_at: Utc::now(),
            approved_unit: None,
            approved_finance: None,
            completed_at: None,
            rejection: None,
        }
    }

    /// Applies a validated workflow action, stamping its audit metadata.
    pub fn apply(&mut self, action: CommitmentAction) {
        self.status = action.new_status();
        match action {
            CommitmentAction::Submit { .. } | CommitmentAction::Cancel { .. } => {}
            CommitmentAction::ApproveUnit { approval, .. } => self.approved_unit = Some(approval),
            CommitmentAction::ApproveFinance { approval, .. } => {
                self.approved_finance = Some(approval);
            }
            CommitmentAction::Complete { completed_at, .. } => {
                self.completed_at = Some(completed_at);
            }
            CommitmentAction::Reject { rejection, .. } => self.rejection = Some(rejection),
        }
    }
}

/// A realized payment, optionally drawing down a commitment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActualPayment {
    /// Payment ID.
    pub id: ActualId,
    /// The commitment being drawn down. Required for project budgets,
    /// optional for routine.
    pub commitment_id: Option<CommitmentId>,
    /// Parent budget (non-owning reference).
    pub budget_id: BudgetId,
    /// Invoice number.
    pub invoice_number: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Vendor name.
    pub vendor_name: String,
    /// Paid amount.
    pub amount: Decimal,
    /// Payment method (e.g. "transfer", "virtual_account").
    pub payment_method: String,
    /// Description of the payment.
    pub description: String,
    /// Current workflow status.
    pub status: ActualStatus,
    /// User who created the payment.
    pub created_by: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Unit approval pair.
    pub approved_unit: Option<Approval>,
    /// Finance approval pair (stamped at posting).
    pub approved_finance: Option<Approval>,
    /// When the payment was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// Rejection metadata, when rejected.
    pub rejection: Option<Rejection>,
}

impl ActualPayment {
    /// Creates a new draft payment from input.
    #[must_use]
    pub fn new(id: ActualId, input: CreateActualInput) -> Self {
        Self {
            id,
            commitment_id: input.commitment_id,
            budget_id: input.budget_id,
            invoice_number: input.invoice_number,
            invoice_date: input.invoice_date,
            vendor_name: input.vendor_name,
            amount: input.amount,
            payment_method: input.payment_method,
            description: input.description,
            status: ActualStatus::Draft,
            created_by: input.created_by,
            created_at: Utc::now(),
            approved_unit: None,
            approved_finance: None,
            posted_at: None,
            rejection: None,
        }
    }

    /// Applies a validated workflow action, stamping its audit metadata.
    pub fn apply(&mut self, action: ActualAction) {
        self.status = action.new_status();
        match action {
            ActualAction::Submit { .. } | ActualAction::Cancel { .. } => {}
            ActualAction::ApproveUnit { approval, .. } => self.approved_unit = Some(approval),
            ActualAction::Post {
                approval,
                posted_at,
                ..
            } => {
                self.approved_finance = Some(approval);
                self.posted_at = Some(posted_at);
            }
            ActualAction::Reject { rejection, .. } => self.rejection = Some(rejection),
        }
    }
}

/// Input for creating a new budget.
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    /// Fiscal year the budget belongs to.
    pub fiscal_year: i32,
    /// Unit display name.
    pub unit: String,
    /// Owning organizational unit.
    pub unit_id: UnitId,
    /// Responsibility cost center.
    pub rcc_id: RccId,
    /// Budget type.
    pub budget_type: BudgetType,
    /// Project name, for project budgets.
    pub project_name: Option<String>,
    /// Chart of accounts code.
    pub coa: String,
    /// Initially requested amount.
    pub initial_amount: Decimal,
    /// Justification text.
    pub justification: String,
    /// User creating the budget.
    pub created_by: UserId,
}

/// Input for creating a budget revision.
#[derive(Debug, Clone)]
pub struct CreateRevisionInput {
    /// Parent budget.
    pub budget_id: BudgetId,
    /// The requested new approved amount.
    pub new_amount: Decimal,
    /// Reason for the adjustment.
    pub reason: String,
    /// User creating the revision.
    pub created_by: UserId,
}

/// Input for creating a purchase commitment.
#[derive(Debug, Clone)]
pub struct CreateCommitmentInput {
    /// Parent budget.
    pub budget_id: BudgetId,
    /// The SPK document number.
    pub spk_number: String,
    /// Fiscal year.
    pub fiscal_year: i32,
    /// Unit display name.
    pub unit: String,
    /// Owning organizational unit.
    pub unit_id: UnitId,
    /// Responsibility cost center.
    pub rcc_id: RccId,
    /// Vendor name.
    pub vendor_name: String,
    /// Vendor contact.
    pub vendor_contact: String,
    /// Description.
    pub description: String,
    /// Committed amount.
    pub amount: Decimal,
    /// Chart of accounts code.
    pub coa: String,
    /// Commitment period start.
    pub start_date: NaiveDate,
    /// Commitment period end.
    pub end_date: NaiveDate,
    /// User creating the commitment.
    pub created_by: UserId,
}

/// Input for creating an actual payment.
#[derive(Debug, Clone)]
pub struct CreateActualInput {
    /// The commitment being drawn down, if any.
    pub commitment_id: Option<CommitmentId>,
    /// Parent budget.
    pub budget_id: BudgetId,
    /// Invoice number.
    pub invoice_number: String,
    /// Invoice date.
    pub invoice_date: NaiveDate,
    /// Vendor name.
    pub vendor_name: String,
    /// Paid amount.
    pub amount: Decimal,
    /// Payment method.
    pub payment_method: String,
    /// Description.
    pub description: String,
    /// User creating the payment.
    pub created_by: UserId,
}
