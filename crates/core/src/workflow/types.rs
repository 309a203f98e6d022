//! Workflow domain types for entity lifecycle management.
//!
//! This module defines the status enums for the four budget-ledger entities,
//! the audit metadata stamped by transitions, and the action values returned
//! by the transition services.

use anggaran_shared::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Budget status in the approval workflow.
///
/// Budgets progress through these states from drafting to closure:
/// - Draft → Submitted (submit)
/// - Submitted → ApprovedSupervisor (supervisor approval, unit scoped)
/// - ApprovedSupervisor → Active (admin activation, corporate wide)
/// - Submitted | ApprovedSupervisor → Rejected (terminal)
/// - Submitted | ApprovedSupervisor → ReviseRequested → Submitted (resubmit)
/// - Active → Closed (fiscal year-end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Budget is being drafted and can be modified.
    Draft,
    /// Budget has been submitted for supervisor approval.
    Submitted,
    /// Supervisor approved; awaiting admin activation.
    ApprovedSupervisor,
    /// Budget is active and spendable.
    Active,
    /// Budget was closed at fiscal year-end (immutable).
    Closed,
    /// Budget was rejected (immutable).
    Rejected,
    /// An approver sent the budget back to the operator for revision.
    ReviseRequested,
}

impl BudgetStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::ApprovedSupervisor => "approved_supervisor",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Rejected => "rejected",
            Self::ReviseRequested => "revise_requested",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved_supervisor" => Some(Self::ApprovedSupervisor),
            "active" => Some(Self::Active),
            "closed" => Some(Self::Closed),
            "rejected" => Some(Self::Rejected),
            "revise_requested" => Some(Self::ReviseRequested),
            _ => None,
        }
    }

    /// Returns true if commitments and actuals may be recorded against the
    /// budget. This is the single canonical "spendable" check used by the
    /// balance calculator and the reports projector.
    #[must_use]
    pub fn is_spendable(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Rejected)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budget revision status.
///
/// Revisions mirror the two-stage unit/finance approval chain. Only
/// `ApprovedFinance` revisions affect the balance calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevisionStatus {
    /// Revision is being drafted.
    Draft,
    /// Revision has been submitted for unit approval.
    Submitted,
    /// Unit approved; awaiting finance approval.
    ApprovedUnit,
    /// Finance approved; the difference now applies to the budget baseline.
    ApprovedFinance,
    /// Revision was rejected (immutable).
    Rejected,
}

impl RevisionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::ApprovedUnit => "approved_unit",
            Self::ApprovedFinance => "approved_finance",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved_unit" => Some(Self::ApprovedUnit),
            "approved_finance" => Some(Self::ApprovedFinance),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the revision difference counts toward the approved
    /// budget.
    #[must_use]
    pub fn counts_toward_budget(&self) -> bool {
        matches!(self, Self::ApprovedFinance)
    }
}

impl fmt::Display for RevisionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Purchase commitment (SPK) status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitmentStatus {
    /// Commitment is being drafted.
    Draft,
    /// Commitment has been submitted for unit approval.
    Submitted,
    /// Unit approved; awaiting finance approval.
    ApprovedUnit,
    /// Finance approved; the amount now locks budget capacity.
    ApprovedFinance,
    /// All payments against the commitment are done (immutable).
    Completed,
    /// Commitment was cancelled before locking capacity (immutable).
    Cancelled,
    /// Commitment was rejected (immutable).
    Rejected,
}

impl CommitmentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::ApprovedUnit => "approved_unit",
            Self::ApprovedFinance => "approved_finance",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved_unit" => Some(Self::ApprovedUnit),
            "approved_finance" => Some(Self::ApprovedFinance),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the commitment amount counts toward total committed.
    #[must_use]
    pub fn counts_toward_committed(&self) -> bool {
        matches!(self, Self::ApprovedFinance)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Rejected)
    }
}

impl fmt::Display for CommitmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actual payment status.
///
/// Finance approval posts the payment: `ApprovedUnit → Posted` stamps the
/// finance approval pair and `posted_at` in a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActualStatus {
    /// Payment is being drafted.
    Draft,
    /// Payment has been submitted for unit approval.
    Submitted,
    /// Unit approved; awaiting finance posting.
    ApprovedUnit,
    /// Posted to the ledger; counts toward total actual.
    Posted,
    /// Payment was cancelled (immutable).
    Cancelled,
    /// Payment was rejected (immutable).
    Rejected,
}

impl ActualStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::ApprovedUnit => "approved_unit",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "submitted" => Some(Self::Submitted),
            "approved_unit" => Some(Self::ApprovedUnit),
            "posted" => Some(Self::Posted),
            "cancelled" => Some(Self::Cancelled),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the payment amount counts toward total actual.
    #[must_use]
    pub fn counts_toward_actual(&self) -> bool {
        matches!(self, Self::Posted)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Rejected)
    }
}

impl fmt::Display for ActualStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The approval stage an action belongs to.
///
/// For budgets the unit stage is the supervisor approval and the finance
/// stage is the admin activation; revisions, commitments, and actuals use
/// the stage names directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStage {
    /// First stage: the submitting unit's supervisor.
    Unit,
    /// Second stage: corporate finance (admin budget).
    Finance,
}

impl fmt::Display for ApprovalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Finance => write!(f, "finance"),
        }
    }
}

/// A recorded (approver, timestamp) pair for one approval stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Approval {
    /// The user who approved.
    pub by: UserId,
    /// When the approval happened.
    pub at: DateTime<Utc>,
}

impl Approval {
    /// Stamps an approval by the given user at the current time.
    #[must_use]
    pub fn now(by: UserId) -> Self {
        Self { by, at: Utc::now() }
    }
}

/// Recorded rejection metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    /// The user who rejected.
    pub by: UserId,
    /// When the rejection happened.
    pub at: DateTime<Utc>,
    /// The stage at which the rejection happened.
    pub stage: ApprovalStage,
    /// The reason for rejection.
    pub reason: String,
}

/// Recorded revise-request metadata on a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviseRequest {
    /// The approver who sent the budget back.
    pub by: UserId,
    /// When the revision was requested.
    pub at: DateTime<Utc>,
    /// Notes for the operator.
    pub notes: String,
}

/// Budget state transition with audit data.
///
/// Each variant captures the action performed, the resulting status, and the
/// audit trail information to stamp on the budget.
#[derive(Debug, Clone)]
pub enum BudgetAction {
    /// Submit a draft budget for approval.
    Submit {
        /// The new status after submission.
        new_status: BudgetStatus,
    },
    /// Supervisor approval of a submitted budget.
    ApproveSupervisor {
        /// The new status after approval.
        new_status: BudgetStatus,
        /// The recorded approval pair.
        approval: Approval,
    },
    /// Admin activation of a supervisor-approved budget.
    Activate {
        /// The new status after activation.
        new_status: BudgetStatus,
        /// The recorded approval pair.
        approval: Approval,
    },
    /// Terminal rejection at either stage.
    Reject {
        /// The new status after rejection.
        new_status: BudgetStatus,
        /// The recorded rejection metadata.
        rejection: Rejection,
    },
    /// Send the budget back to the operator for revision.
    RequestRevision {
        /// The new status after the request.
        new_status: BudgetStatus,
        /// The recorded revise-request metadata.
        request: ReviseRequest,
    },
    /// Operator resubmission after a revise request.
    Resubmit {
        /// The new status after resubmission.
        new_status: BudgetStatus,
    },
    /// Close the budget at fiscal year-end.
    Close {
        /// The new status after closing.
        new_status: BudgetStatus,
        /// When the budget was closed.
        closed_at: DateTime<Utc>,
    },
}

impl BudgetAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> BudgetStatus {
        match self {
            Self::Submit { new_status }
            | Self::ApproveSupervisor { new_status, .. }
            | Self::Activate { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::RequestRevision { new_status, .. }
            | Self::Resubmit { new_status }
            | Self::Close { new_status, .. } => *new_status,
        }
    }
}

/// Revision state transition with audit data.
#[derive(Debug, Clone)]
pub enum RevisionAction {
    /// Submit a draft revision for approval.
    Submit {
        /// The new status after submission.
        new_status: RevisionStatus,
    },
    /// Unit-stage approval.
    ApproveUnit {
        /// The new status after approval.
        new_status: RevisionStatus,
        /// The recorded approval pair.
        approval: Approval,
    },
    /// Finance-stage approval; the difference now applies to the balance.
    ApproveFinance {
        /// The new status after approval.
        new_status: RevisionStatus,
        /// The recorded approval pair.
        approval: Approval,
    },
    /// Terminal rejection at either stage.
    Reject {
        /// The new status after rejection.
        new_status: RevisionStatus,
        /// The recorded rejection metadata.
        rejection: Rejection,
    },
}

impl RevisionAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> RevisionStatus {
        match self {
            Self::Submit { new_status }
            | Self::ApproveUnit { new_status, .. }
            | Self::ApproveFinance { new_status, .. }
            | Self::Reject { new_status, .. } => *new_status,
        }
    }
}

/// Commitment state transition with audit data.
#[derive(Debug, Clone)]
pub enum CommitmentAction {
    /// Submit a draft commitment for approval.
    Submit {
        /// The new status after submission.
        new_status: CommitmentStatus,
    },
    /// Unit-stage approval.
    ApproveUnit {
        /// The new status after approval.
        new_status: CommitmentStatus,
        /// The recorded approval pair.
        approval: Approval,
    },
    /// Finance-stage approval; the amount now locks budget capacity.
    ApproveFinance {
        /// The new status after approval.
        new_status: CommitmentStatus,
        /// The recorded approval pair.
        approval: Approval,
    },
    /// Mark a finance-approved commitment as completed.
    Complete {
        /// The new status after completion.
        new_status: CommitmentStatus,
        /// When the commitment was completed.
        completed_at: DateTime<Utc>,
    },
    /// Cancel a commitment that has not locked capacity yet.
    Cancel {
        /// The new status after cancellation.
        new_status: CommitmentStatus,
    },
    /// Terminal rejection at either stage.
    Reject {
        /// The new status after rejection.
        new_status: CommitmentStatus,
        /// The recorded rejection metadata.
        rejection: Rejection,
    },
}

impl CommitmentAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> CommitmentStatus {
        match self {
            Self::Submit { new_status }
            | Self::ApproveUnit { new_status, .. }
            | Self::ApproveFinance { new_status, .. }
            | Self::Complete { new_status, .. }
            | Self::Cancel { new_status }
            | Self::Reject { new_status, .. } => *new_status,
        }
    }
}

/// Actual payment state transition with audit data.
#[derive(Debug, Clone)]
pub enum ActualAction {
    /// Submit a draft payment for approval.
    Submit {
        /// The new status after submission.
        new_status: ActualStatus,
    },
    /// Unit-stage approval.
    ApproveUnit {
        /// The new status after approval.
        new_status: ActualStatus,
        /// The recorded approval pair.
        approval: Approval,
    },
    /// Finance-stage approval, which posts the payment.
    Post {
        /// The new status after posting.
        new_status: ActualStatus,
        /// The recorded finance approval pair.
        approval: Approval,
        /// When the payment was posted.
        posted_at: DateTime<Utc>,
    },
    /// Cancel a draft or posted payment.
    Cancel {
        /// The new status after cancellation.
        new_status: ActualStatus,
    },
    /// Terminal rejection at either stage.
    Reject {
        /// The new status after rejection.
        new_status: ActualStatus,
        /// The recorded rejection metadata.
        rejection: Rejection,
    },
}

impl ActualAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> ActualStatus {
        match self {
            Self::Submit { new_status }
            | Self::ApproveUnit { new_status, .. }
            | Self::Post { new_status, .. }
            | Self::Cancel { new_status }
            | Self::Reject { new_status, .. } => *new_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_status_roundtrip() {
        for status in [
            BudgetStatus::Draft,
            BudgetStatus::Submitted,
            BudgetStatus::ApprovedSupervisor,
            BudgetStatus::Active,
            BudgetStatus::Closed,
            BudgetStatus::Rejected,
            BudgetStatus::ReviseRequested,
        ] {
            assert_eq!(BudgetStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(BudgetStatus::parse("invalid"), None);
    }

    #[test]
    fn test_budget_status_spendable() {
        assert!(BudgetStatus::Active.is_spendable());
        assert!(!BudgetStatus::Draft.is_spendable());
        assert!(!BudgetStatus::Submitted.is_spendable());
        assert!(!BudgetStatus::ApprovedSupervisor.is_spendable());
        assert!(!BudgetStatus::Closed.is_spendable());
    }

    #[test]
    fn test_budget_status_terminal() {
        assert!(BudgetStatus::Closed.is_terminal());
        assert!(BudgetStatus::Rejected.is_terminal());
        assert!(!BudgetStatus::ReviseRequested.is_terminal());
        assert!(!BudgetStatus::Active.is_terminal());
    }

    #[test]
    fn test_revision_status_counting() {
        assert!(RevisionStatus::ApprovedFinance.counts_toward_budget());
        assert!(!RevisionStatus::ApprovedUnit.counts_toward_budget());
        assert!(!RevisionStatus::Submitted.counts_toward_budget());
    }

    #[test]
    fn test_commitment_status_counting() {
        assert!(CommitmentStatus::ApprovedFinance.counts_toward_committed());
        assert!(!CommitmentStatus::ApprovedUnit.counts_toward_committed());
        assert!(!CommitmentStatus::Completed.counts_toward_committed());
    }

    #[test]
    fn test_actual_status_counting() {
        assert!(ActualStatus::Posted.counts_toward_actual());
        assert!(!ActualStatus::ApprovedUnit.counts_toward_actual());
        assert!(!ActualStatus::Cancelled.counts_toward_actual());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            format!("{}", BudgetStatus::ApprovedSupervisor),
            "approved_supervisor"
        );
        assert_eq!(
            format!("{}", RevisionStatus::ApprovedFinance),
            "approved_finance"
        );
        assert_eq!(format!("{}", CommitmentStatus::Cancelled), "cancelled");
        assert_eq!(format!("{}", ActualStatus::Posted), "posted");
        assert_eq!(format!("{}", ApprovalStage::Unit), "unit");
        assert_eq!(format!("{}", ApprovalStage::Finance), "finance");
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(BudgetStatus::parse("ACTIVE"), Some(BudgetStatus::Active));
        assert_eq!(
            CommitmentStatus::parse("Approved_Finance"),
            Some(CommitmentStatus::ApprovedFinance)
        );
    }

    #[test]
    fn test_action_new_status() {
        let action = BudgetAction::Submit {
            new_status: BudgetStatus::Submitted,
        };
        assert_eq!(action.new_status(), BudgetStatus::Submitted);

        let action = ActualAction::Post {
            new_status: ActualStatus::Posted,
            approval: Approval::now(UserId::new()),
            posted_at: Utc::now(),
        };
        assert_eq!(action.new_status(), ActualStatus::Posted);
    }
}
