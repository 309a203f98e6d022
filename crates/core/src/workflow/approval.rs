//! Roles and approval authorization.
//!
//! This module implements the role model and the authorization checks
//! applied before entity transitions. There is exactly one role enumeration;
//! all capability checks are predicates derived from it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::error::WorkflowError;
use anggaran_shared::types::{UnitId, UserId};

/// User role in the budget organization.
///
/// - `Operator` creates and submits entities for their own unit.
/// - `Supervisor` performs the unit-stage approval, scoped to their unit.
/// - `AdminBudget` performs the finance-stage approval corporate-wide and
///   manages master data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Unit staff entering budgets and transactions.
    Operator,
    /// Unit head approving their unit's submissions.
    Supervisor,
    /// Corporate finance with final approval authority.
    AdminBudget,
}

impl Role {
    /// Parse a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "operator" => Some(Self::Operator),
            "supervisor" => Some(Self::Supervisor),
            "admin_budget" => Some(Self::AdminBudget),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Supervisor => "supervisor",
            Self::AdminBudget => "admin_budget",
        }
    }

    /// Returns true if the role may create and submit entities.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Operator)
    }

    /// Returns true if the role performs unit-stage approvals.
    #[must_use]
    pub fn can_approve_as_unit(&self) -> bool {
        matches!(self, Self::Supervisor)
    }

    /// Returns true if the role performs finance-stage approvals.
    #[must_use]
    pub fn can_approve_as_finance(&self) -> bool {
        matches!(self, Self::AdminBudget)
    }

    /// Returns true if the role sees data across all units.
    #[must_use]
    pub fn can_view_all_units(&self) -> bool {
        matches!(self, Self::AdminBudget)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The identity performing an operation.
///
/// Operators and supervisors carry the unit they are scoped to; admin budget
/// users act corporate-wide and carry no unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user.
    pub user_id: UserId,
    /// The acting user's role.
    pub role: Role,
    /// The unit the actor is scoped to (operators and supervisors).
    pub unit_id: Option<UnitId>,
}

impl Actor {
    /// Creates an operator scoped to a unit.
    #[must_use]
    pub const fn operator(user_id: UserId, unit_id: UnitId) -> Self {
        Self {
            user_id,
            role: Role::Operator,
            unit_id: Some(unit_id),
        }
    }

    /// Creates a supervisor scoped to a unit.
    #[must_use]
    pub const fn supervisor(user_id: UserId, unit_id: UnitId) -> Self {
        Self {
            user_id,
            role: Role::Supervisor,
            unit_id: Some(unit_id),
        }
    }

    /// Creates a corporate admin budget actor.
    #[must_use]
    pub const fn admin_budget(user_id: UserId) -> Self {
        Self {
            user_id,
            role: Role::AdminBudget,
            unit_id: None,
        }
    }

    /// Returns true if the actor may see data for the given unit.
    #[must_use]
    pub fn can_view_unit(&self, unit_id: UnitId) -> bool {
        self.role.can_view_all_units() || self.unit_id == Some(unit_id)
    }
}

/// Checks that the actor may submit entities for the given unit.
///
/// # Errors
///
/// Returns `WorkflowError::RoleNotPermitted` for non-operator roles and
/// `WorkflowError::UnitScopeMismatch` when the actor belongs to a different
/// unit.
pub fn ensure_submitter(actor: &Actor, unit_id: UnitId) -> Result<(), WorkflowError> {
    if !actor.role.can_submit() {
        return Err(WorkflowError::RoleNotPermitted {
            role: actor.role,
            operation: "create or submit entities",
        });
    }
    if actor.unit_id != Some(unit_id) {
        return Err(WorkflowError::UnitScopeMismatch { required: unit_id });
    }
    Ok(())
}

/// Checks that the actor may perform a unit-stage approval for the given
/// unit.
///
/// # Errors
///
/// Returns `WorkflowError::RoleNotPermitted` for non-supervisor roles and
/// `WorkflowError::UnitScopeMismatch` when the supervisor belongs to a
/// different unit.
pub fn ensure_unit_approver(actor: &Actor, unit_id: UnitId) -> Result<(), WorkflowError> {
    if !actor.role.can_approve_as_unit() {
        return Err(WorkflowError::RoleNotPermitted {
            role: actor.role,
            operation: "approve at the unit stage",
        });
    }
    if actor.unit_id != Some(unit_id) {
        return Err(WorkflowError::UnitScopeMismatch { required: unit_id });
    }
    Ok(())
}

/// Checks that the actor may perform a finance-stage approval.
///
/// Finance approvals are corporate-wide, so no unit check applies.
///
/// # Errors
///
/// Returns `WorkflowError::RoleNotPermitted` for non-admin roles.
pub fn ensure_finance_approver(actor: &Actor) -> Result<(), WorkflowError> {
    if !actor.role.can_approve_as_finance() {
        return Err(WorkflowError::RoleNotPermitted {
            role: actor.role,
            operation: "approve at the finance stage",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> UnitId {
        UnitId::new()
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("operator"), Some(Role::Operator));
        assert_eq!(Role::parse("SUPERVISOR"), Some(Role::Supervisor));
        assert_eq!(Role::parse("admin_budget"), Some(Role::AdminBudget));
        assert_eq!(Role::parse("finance"), None);
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Operator.as_str(), "operator");
        assert_eq!(Role::Supervisor.as_str(), "supervisor");
        assert_eq!(Role::AdminBudget.as_str(), "admin_budget");
    }

    #[test]
    fn test_role_capabilities() {
        assert!(Role::Operator.can_submit());
        assert!(!Role::Supervisor.can_submit());
        assert!(!Role::AdminBudget.can_submit());

        assert!(Role::Supervisor.can_approve_as_unit());
        assert!(!Role::Operator.can_approve_as_unit());
        assert!(!Role::AdminBudget.can_approve_as_unit());

        assert!(Role::AdminBudget.can_approve_as_finance());
        assert!(!Role::Supervisor.can_approve_as_finance());

        assert!(Role::AdminBudget.can_view_all_units());
        assert!(!Role::Operator.can_view_all_units());
    }

    #[test]
    fn test_actor_can_view_unit() {
        let u = unit();
        let other = unit();

        let operator = Actor::operator(UserId::new(), u);
        assert!(operator.can_view_unit(u));
        assert!(!operator.can_view_unit(other));

        let admin = Actor::admin_budget(UserId::new());
        assert!(admin.can_view_unit(u));
        assert!(admin.can_view_unit(other));
    }

    #[test]
    fn test_ensure_submitter() {
        let u = unit();
        assert!(ensure_submitter(&Actor::operator(UserId::new(), u), u).is_ok());

        let wrong_unit = ensure_submitter(&Actor::operator(UserId::new(), unit()), u);
        assert!(matches!(
            wrong_unit,
            Err(WorkflowError::UnitScopeMismatch { .. })
        ));

        let wrong_role = ensure_submitter(&Actor::supervisor(UserId::new(), u), u);
        assert!(matches!(
            wrong_role,
            Err(WorkflowError::RoleNotPermitted { .. })
        ));
    }

    #[test]
    fn test_ensure_unit_approver() {
        let u = unit();
        assert!(ensure_unit_approver(&Actor::supervisor(UserId::new(), u), u).is_ok());

        let wrong_unit = ensure_unit_approver(&Actor::supervisor(UserId::new(), unit()), u);
        assert!(matches!(
            wrong_unit,
            Err(WorkflowError::UnitScopeMismatch { .. })
        ));

        // Admin does not perform unit-stage approvals.
        let admin = ensure_unit_approver(&Actor::admin_budget(UserId::new()), u);
        assert!(matches!(admin, Err(WorkflowError::RoleNotPermitted { .. })));
    }

    #[test]
    fn test_ensure_finance_approver() {
        assert!(ensure_finance_approver(&Actor::admin_budget(UserId::new())).is_ok());

        let supervisor = ensure_finance_approver(&Actor::supervisor(UserId::new(), unit()));
        assert!(matches!(
            supervisor,
            Err(WorkflowError::RoleNotPermitted { .. })
        ));
    }
}
