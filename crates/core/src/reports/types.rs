//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::types::BudgetType;
use anggaran_shared::types::{ActualId, BudgetId};

/// Posted actuals bucketed into one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyActual {
    /// Month number, 1 through 12.
    pub month: u32,
    /// The fiscal year the bucket belongs to.
    pub year: i32,
    /// Sum of posted amounts in this month.
    pub amount: Decimal,
    /// The payments making up the bucket, for drill-down.
    pub transactions: Vec<ActualId>,
}

/// One row of the budget-vs-actual monitoring matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetVsActualRow {
    /// The budget this row describes.
    pub budget_id: BudgetId,
    /// Project name, or "Routine Operations" for routine budgets.
    pub project_name: String,
    /// Unit display name.
    pub unit: String,
    /// Chart of accounts code.
    pub coa: String,
    /// Budget type.
    pub budget_type: BudgetType,
    /// Approved budget baseline.
    pub approved_budget: Decimal,
    /// Total locked by finance-approved commitments.
    pub total_committed: Decimal,
    /// Twelve monthly buckets of posted actuals, January through December.
    pub monthly_actuals: Vec<MonthlyActual>,
    /// Sum of the monthly buckets.
    pub total_actual: Decimal,
    /// Available budget after commitments and actuals.
    pub balance: Decimal,
    /// `total_actual / approved_budget * 100`, two decimal places; zero when
    /// the approved budget is zero.
    pub utilization_percent: Decimal,
}
