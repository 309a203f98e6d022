//! Budget balance recomputation.
//!
//! The single source of truth for "how much budget is left". Every function
//! here is pure over the current entity collections and is called fresh on
//! every read; no derived figure is cached anywhere.

use rust_decimal::Decimal;

use super::types::BudgetBalance;
use crate::store::types::{ActualPayment, Budget, BudgetRevision, Commitment};

/// Stateless balance calculator.
pub struct BalanceService;

impl BalanceService {
    /// Computes the derived spending figures for one budget.
    ///
    /// Only a budget in the canonical spendable status (Active) yields
    /// non-zero figures; any other status returns an all-zero balance.
    /// The slices are the store's full collections; entries belonging to
    /// other budgets are ignored.
    #[must_use]
    pub fn budget_balance(
        budget: &Budget,
        revisions: &[BudgetRevision],
        commitments: &[Commitment],
        actuals: &[ActualPayment],
    ) -> BudgetBalance {
        if !budget.status.is_spendable() {
            return BudgetBalance::zero(budget.id);
        }

        let approved_budget = Self::approved_amount(budget, revisions);

        let total_committed: Decimal = commitments
            .iter()
            .filter(|c| c.budget_id == budget.id && c.status.counts_toward_committed())
            .map(|c| c.amount)
            .sum();

        let total_actual: Decimal = actuals
            .iter()
            .filter(|a| a.budget_id == budget.id && a.status.counts_toward_actual())
            .map(|a| a.amount)
            .sum();

        BudgetBalance {
            budget_id: budget.id,
            approved_budget,
            total_committed,
            total_actual,
            available_budget: (approved_budget - total_committed - total_actual)
                .max(Decimal::ZERO),
            remaining_after_commitments: (approved_budget - total_committed).max(Decimal::ZERO),
        }
    }

    /// The budget's approved baseline: initial amount plus the differences
    /// of all finance-approved revisions.
    #[must_use]
    pub fn approved_amount(budget: &Budget, revisions: &[BudgetRevision]) -> Decimal {
        let revision_total: Decimal = revisions
            .iter()
            .filter(|r| r.budget_id == budget.id && r.status.counts_toward_budget())
            .map(|r| r.difference)
            .sum();
        budget.initial_amount + revision_total
    }

    /// The capacity a commitment has left for further postings:
    /// its amount minus the posted actuals already drawing it down.
    #[must_use]
    pub fn commitment_remaining(commitment: &Commitment, actuals: &[ActualPayment]) -> Decimal {
        let posted: Decimal = actuals
            .iter()
            .filter(|a| {
                a.commitment_id == Some(commitment.id) && a.status.counts_toward_actual()
            })
            .map(|a| a.amount)
            .sum();
        commitment.amount - posted
    }

    /// Committed-plus-actual total for a budget, the floor a revision's new
    /// amount may not go below.
    #[must_use]
    pub fn committed_plus_actual(
        budget: &Budget,
        commitments: &[Commitment],
        actuals: &[ActualPayment],
    ) -> Decimal {
        let committed: Decimal = commitments
            .iter()
            .filter(|c| c.budget_id == budget.id && c.status.counts_toward_committed())
            .map(|c| c.amount)
            .sum();
        let actual: Decimal = actuals
            .iter()
            .filter(|a| a.budget_id == budget.id && a.status.counts_toward_actual())
            .map(|a| a.amount)
            .sum();
        committed + actual
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{
        BudgetType, CreateActualInput, CreateBudgetInput, CreateCommitmentInput,
        CreateRevisionInput,
    };
    use crate::workflow::types::{ActualStatus, BudgetStatus, CommitmentStatus, RevisionStatus};
    use anggaran_shared::types::{ActualId, BudgetId, RccId, RevisionId, UnitId, UserId};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn active_budget(initial: Decimal) -> Budget {
        let mut budget = Budget::new(
            BudgetId::new(),
            CreateBudgetInput {
                fiscal_year: 2026,
                unit: "Operations".to_string(),
                unit_id: UnitId::new(),
                rcc_id: RccId::new(),
                budget_type: BudgetType::Routine,
                project_name: None,
                coa: "6205".to_string(),
                initial_amount: initial,
                justification: "Yearly operations".to_string(),
                created_by: UserId::new(),
            },
        );
        budget.status = BudgetStatus::Active;
        budget
    }

    fn commitment_for(budget: &Budget, amount: Decimal, status: CommitmentStatus) -> Commitment {
        let mut commitment = Commitment::new(
            anggaran_shared::types::CommitmentId::new(),
            CreateCommitmentInput {
                budget_id: budget.id,
                spk_number: "SPK-001".to_string(),
                fiscal_year: budget.fiscal_year,
                unit: budget.unit.clone(),
                unit_id: budget.unit_id,
                rcc_id: budget.rcc_id,
                vendor_name: "PT Sumber".to_string(),
                vendor_contact: "sales@sumber.co.id".to_string(),
                description: "Supplies".to_string(),
                amount,
                coa: budget.coa.clone(),
                start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
                created_by: UserId::new(),
            },
        );
        commitment.status = status;
        commitment
    }

    fn actual_for(
        budget: &Budget,
        commitment_id: Option<anggaran_shared::types::CommitmentId>,
        amount: Decimal,
        status: ActualStatus,
    ) -> ActualPayment {
        let mut actual = ActualPayment::new(
            ActualId::new(),
            CreateActualInput {
                commitment_id,
                budget_id: budget.id,
                invoice_number: "INV-100".to_string(),
                invoice_date: NaiveDate::from_ymd_opt(2026, 5, 2).unwrap(),
                vendor_name: "PT Sumber".to_string(),
                amount,
                payment_method: "transfer".to_string(),
                description: "Invoice".to_string(),
                created_by: UserId::new(),
            },
        );
        actual.status = status;
        actual
    }

    fn revision_for(budget: &Budget, new_amount: Decimal, status: RevisionStatus) -> BudgetRevision {
        let mut revision = BudgetRevision::new(
            RevisionId::new(),
            CreateRevisionInput {
                budget_id: budget.id,
                new_amount,
                reason: "Adjustment".to_string(),
                created_by: UserId::new(),
            },
            budget.initial_amount,
        );
        revision.status = status;
        revision
    }

    #[test]
    fn test_balance_of_fresh_active_budget() {
        let budget = active_budget(dec!(1_000_000));
        let balance = BalanceService::budget_balance(&budget, &[], &[], &[]);
        assert_eq!(balance.approved_budget, dec!(1_000_000));
        assert_eq!(balance.total_committed, dec!(0));
        assert_eq!(balance.total_actual, dec!(0));
        assert_eq!(balance.available_budget, dec!(1_000_000));
        assert_eq!(balance.remaining_after_commitments, dec!(1_000_000));
    }

    #[test]
    fn test_non_active_budget_yields_zero_balance() {
        let mut budget = active_budget(dec!(1_000_000));
        for status in [
            BudgetStatus::Draft,
            BudgetStatus::Submitted,
            BudgetStatus::ApprovedSupervisor,
            BudgetStatus::Closed,
            BudgetStatus::Rejected,
            BudgetStatus::ReviseRequested,
        ] {
            budget.status = status;
            let balance = BalanceService::budget_balance(&budget, &[], &[], &[]);
            assert_eq!(balance, BudgetBalance::zero(budget.id), "status {status}");
        }
    }

    #[test]
    fn test_only_finance_approved_commitments_count() {
        let budget = active_budget(dec!(1_000_000));
        let commitments = vec![
            commitment_for(&budget, dec!(400_000), CommitmentStatus::ApprovedFinance),
            commitment_for(&budget, dec!(300_000), CommitmentStatus::ApprovedUnit),
            commitment_for(&budget, dec!(200_000), CommitmentStatus::Submitted),
            commitment_for(&budget, dec!(100_000), CommitmentStatus::Cancelled),
        ];
        let balance = BalanceService::budget_balance(&budget, &[], &commitments, &[]);
        assert_eq!(balance.total_committed, dec!(400_000));
        assert_eq!(balance.available_budget, dec!(600_000));
        assert_eq!(balance.remaining_after_commitments, dec!(600_000));
    }

    #[test]
    fn test_only_posted_actuals_count() {
        let budget = active_budget(dec!(1_000_000));
        let actuals = vec![
            actual_for(&budget, None, dec!(250_000), ActualStatus::Posted),
            actual_for(&budget, None, dec!(100_000), ActualStatus::ApprovedUnit),
            actual_for(&budget, None, dec!(50_000), ActualStatus::Cancelled),
        ];
        let balance = BalanceService::budget_balance(&budget, &[], &[], &actuals);
        assert_eq!(balance.total_actual, dec!(250_000));
        assert_eq!(balance.available_budget, dec!(750_000));
    }

    #[test]
    fn test_revisions_shift_the_baseline() {
        let budget = active_budget(dec!(1_000_000));
        let revisions = vec![
            revision_for(&budget, dec!(1_500_000), RevisionStatus::ApprovedFinance),
            // Only finance-approved revisions apply.
            revision_for(&budget, dec!(2_000_000), RevisionStatus::ApprovedUnit),
        ];
        let balance = BalanceService::budget_balance(&budget, &revisions, &[], &[]);
        assert_eq!(balance.approved_budget, dec!(1_500_000));
    }

    #[test]
    fn test_other_budgets_records_are_ignored() {
        let budget = active_budget(dec!(1_000_000));
        let other = active_budget(dec!(9_000_000));
        let commitments = vec![commitment_for(
            &other,
            dec!(5_000_000),
            CommitmentStatus::ApprovedFinance,
        )];
        let balance = BalanceService::budget_balance(&budget, &[], &commitments, &[]);
        assert_eq!(balance.total_committed, dec!(0));
        assert_eq!(balance.available_budget, dec!(1_000_000));
    }

    #[test]
    fn test_available_budget_is_clamped_at_zero() {
        let budget = active_budget(dec!(100_000));
        let commitments = vec![commitment_for(
            &budget,
            dec!(80_000),
            CommitmentStatus::ApprovedFinance,
        )];
        let actuals = vec![actual_for(&budget, None, dec!(50_000), ActualStatus::Posted)];
        let balance = BalanceService::budget_balance(&budget, &[], &commitments, &actuals);
        assert_eq!(balance.available_budget, dec!(0));
        assert_eq!(balance.remaining_after_commitments, dec!(20_000));
    }

    #[test]
    fn test_commitment_remaining() {
        let budget = active_budget(dec!(1_000_000));
        let commitment = commitment_for(&budget, dec!(400_000), CommitmentStatus::ApprovedFinance);
        let actuals = vec![
            actual_for(
                &budget,
                Some(commitment.id),
                dec!(150_000),
                ActualStatus::Posted,
            ),
            // Unposted drawdown does not reduce remaining capacity.
            actual_for(
                &budget,
                Some(commitment.id),
                dec!(100_000),
                ActualStatus::Submitted,
            ),
            // A posting against the budget directly is not a drawdown.
            actual_for(&budget, None, dec!(75_000), ActualStatus::Posted),
        ];
        assert_eq!(
            BalanceService::commitment_remaining(&commitment, &actuals),
            dec!(250_000)
        );
    }

    #[test]
    fn test_balance_is_idempotent() {
        let budget = active_budget(dec!(1_000_000));
        let commitments = vec![commitment_for(
            &budget,
            dec!(400_000),
            CommitmentStatus::ApprovedFinance,
        )];
        let first = BalanceService::budget_balance(&budget, &[], &commitments, &[]);
        let second = BalanceService::budget_balance(&budget, &[], &commitments, &[]);
        assert_eq!(first, second);
    }
}
