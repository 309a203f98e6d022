//! Balance data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use anggaran_shared::types::BudgetId;

/// A budget's derived spending figures.
///
/// Every field is recomputed from the entity collections on each call; no
/// figure here is ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetBalance {
    /// The budget these figures belong to.
    pub budget_id: BudgetId,
    /// Initial amount plus the differences of all finance-approved
    /// revisions.
    pub approved_budget: Decimal,
    /// Sum of finance-approved commitment amounts.
    pub total_committed: Decimal,
    /// Sum of posted actual payment amounts.
    pub total_actual: Decimal,
    /// `max(0, approved - committed - actual)`.
    pub available_budget: Decimal,
    /// `max(0, approved - committed)`.
    pub remaining_after_commitments: Decimal,
}

impl BudgetBalance {
    /// An all-zero balance, returned for budgets that are not spendable.
    #[must_use]
    pub fn zero(budget_id: BudgetId) -> Self {
        Self {
            budget_id,
            approved_budget: Decimal::ZERO,
            total_committed: Decimal::ZERO,
            total_actual: Decimal::ZERO,
            available_budget: Decimal::ZERO,
            remaining_after_commitments: Decimal::ZERO,
        }
    }
}
