//! Budget-vs-actual report generation.
//!
//! A derived, read-only projection over the entity collections. Rows are
//! rebuilt from scratch on every call and never feed back into the store.

use chrono::Datelike;
use rust_decimal::Decimal;

use super::types::{BudgetVsActualRow, MonthlyActual};
use crate::balance::service::BalanceService;
use crate::store::types::{ActualPayment, Budget, BudgetRevision, BudgetType, Commitment};

/// Stateless report projector.
pub struct ReportService;

impl ReportService {
    /// Builds the monitoring matrix for one fiscal year.
    ///
    /// One row per spendable (Active) budget of the year, optionally
    /// filtered by budget type. Posted actuals are bucketed by the calendar
    /// month of their posting timestamp within the fiscal year.
    #[must_use]
    pub fn budget_vs_actual(
        fiscal_year: i32,
        budget_type: Option<BudgetType>,
        budgets: &[Budget],
        revisions: &[BudgetRevision],
        commitments: &[Commitment],
        actuals: &[ActualPayment],
    ) -> Vec<BudgetVsActualRow> {
        budgets
            .iter()
            .filter(|b| {
                b.fiscal_year == fiscal_year
                    && b.status.is_spendable()
                    && budget_type.is_none_or(|t| b.budget_type == t)
            })
            .map(|budget| Self::build_row(budget, fiscal_year, revisions, commitments, actuals))
            .collect()
    }

    fn build_row(
        budget: &Budget,
        fiscal_year: i32,
        revisions: &[BudgetRevision],
        commitments: &[Commitment],
        actuals: &[ActualPayment],
    ) -> BudgetVsActualRow {
        let balance = BalanceService::budget_balance(budget, revisions, commitments, actuals);

        let monthly_actuals: Vec<MonthlyActual> = (1..=12)
            .map(|month| {
                let transactions: Vec<_> = actuals
                    .iter()
                    .filter(|a| {
                        if a.budget_id != budget.id || !a.status.counts_toward_actual() {
                            return false;
                        }
                        let date = a.posted_at.unwrap_or(a.created_at);
                        date.month() == month && date.year() == fiscal_year
                    })
                    .collect();

                MonthlyActual {
                    month,
                    year: fiscal_year,
                    amount: transactions.iter().map(|a| a.amount).sum(),
                    transactions: transactions.iter().map(|a| a.id).collect(),
                }
            })
            .collect();

        let total_actual: Decimal = monthly_actuals.iter().map(|m| m.amount).sum();

        let utilization_percent = if balance.approved_budget.is_zero() {
            Decimal::ZERO
        } else {
            (total_actual / balance.approved_budget * Decimal::ONE_HUNDRED).round_dp(2)
        };

        BudgetVsActualRow {
            budget_id: budget.id,
            project_name: budget
                .project_name
                .clone()
                .unwrap_or_else(|| "Routine Operations".to_string()),
            unit: budget.unit.clone(),
            coa: budget.coa.clone(),
            budget_type: budget.budget_type,
            approved_budget: balance.approved_budget,
            total_committed: balance.total_committed,
            monthly_actuals,
            total_actual,
            balance: balance.available_budget,
            utilization_percent,
        }
    }
}
