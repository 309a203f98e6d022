//! Property-based tests for the balance calculator.
//!
//! These validate the clamping, baseline-sum, and determinism properties
//! over randomized entity populations.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::balance::service::BalanceService;
use crate::store::types::{
    ActualPayment, Budget, BudgetRevision, BudgetType, Commitment, CreateActualInput,
    CreateBudgetInput, CreateCommitmentInput, CreateRevisionInput,
};
use crate::workflow::types::{ActualStatus, BudgetStatus, CommitmentStatus, RevisionStatus};
use anggaran_shared::types::{ActualId, BudgetId, CommitmentId, RccId, RevisionId, UnitId, UserId};
use chrono::NaiveDate;

fn make_budget(initial: Decimal) -> Budget {
    let mut budget = Budget::new(
        BudgetId::new(),
        CreateBudgetInput {
            fiscal_year: 2026,
            unit: "Unit".to_string(),
            unit_id: UnitId::new(),
            rcc_id: RccId::new(),
            budget_type: BudgetType::Routine,
            project_name: None,
            coa: "6000".to_string(),
            initial_amount: initial,
            justification: "prop".to_string(),
            created_by: UserId::new(),
        },
    );
    budget.status = BudgetStatus::Active;
    budget
}

fn make_commitment(budget: &Budget, amount: Decimal, status: CommitmentStatus) -> Commitment {
    let mut commitment = Commitment::new(
        CommitmentId::new(),
        CreateCommitmentInput {
            budget_id: budget.id,
            spk_number: "SPK".to_string(),
            fiscal_year: budget.fiscal_year,
            unit: budget.unit.clone(),
            unit_id: budget.unit_id,
            rcc_id: budget.rcc_id,
            vendor_name: "Vendor".to_string(),
            vendor_contact: "contact".to_string(),
            description: "prop".to_string(),
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

fn make_actual(budget: &Budget, amount: Decimal, status: ActualStatus) -> ActualPayment {
    let mut actual = ActualPayment::new(
        ActualId::new(),
        CreateActualInput {
            commitment_id: None,
            budget_id: budget.id,
            invoice_number: "INV".to_string(),
            invoice_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            vendor_name: "Vendor".to_string(),
            amount,
            payment_method: "transfer".to_string(),
            description: "prop".to_string(),
            created_by: UserId::new(),
        },
    );
    actual.status = status;
    actual
}

fn make_revision(budget: &Budget, new_amount: Decimal, status: RevisionStatus) -> BudgetRevision {
    let mut revision = BudgetRevision::new(
        RevisionId::new(),
        CreateRevisionInput {
            budget_id: budget.id,
            new_amount,
            reason: "prop".to_string(),
            created_by: UserId::new(),
        },
        budget.initial_amount,
    );
    revision.status = status;
    revision
}

fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn arb_commitment_status() -> impl Strategy<Value = CommitmentStatus> {
    prop_oneof![
        Just(CommitmentStatus::Draft),
        Just(CommitmentStatus::Submitted),
        Just(CommitmentStatus::ApprovedUnit),
        Just(CommitmentStatus::ApprovedFinance),
        Just(CommitmentStatus::Completed),
        Just(CommitmentStatus::Cancelled),
        Just(CommitmentStatus::Rejected),
    ]
}

fn arb_actual_status() -> impl Strategy<Value = ActualStatus> {
    prop_oneof![
        Just(ActualStatus::Draft),
        Just(ActualStatus::Submitted),
        Just(ActualStatus::ApprovedUnit),
        Just(ActualStatus::Posted),
        Just(ActualStatus::Cancelled),
        Just(ActualStatus::Rejected),
    ]
}

fn arb_revision_status() -> impl Strategy<Value = RevisionStatus> {
    prop_oneof![
        Just(RevisionStatus::Draft),
        Just(RevisionStatus::Submitted),
        Just(RevisionStatus::ApprovedUnit),
        Just(RevisionStatus::ApprovedFinance),
        Just(RevisionStatus::Rejected),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// availableBudget and remainingAfterCommitments are never negative.
    #[test]
    fn prop_available_budget_never_negative(
        initial in arb_amount(),
        commitments in prop::collection::vec((arb_amount(), arb_commitment_status()), 0..10),
        actuals in prop::collection::vec((arb_amount(), arb_actual_status()), 0..10),
    ) {
        let budget = make_budget(initial);
        let commitments: Vec<_> = commitments
            .into_iter()
            .map(|(amount, status)| make_commitment(&budget, amount, status))
            .collect();
        let actuals: Vec<_> = actuals
            .into_iter()
            .map(|(amount, status)| make_actual(&budget, amount, status))
            .collect();

        let balance = BalanceService::budget_balance(&budget, &[], &commitments, &actuals);
        prop_assert!(balance.available_budget >= Decimal::ZERO);
        prop_assert!(balance.remaining_after_commitments >= Decimal::ZERO);
    }

    /// approvedBudget equals the initial amount plus exactly the
    /// finance-approved revision differences.
    #[test]
    fn prop_approved_budget_is_initial_plus_approved_diffs(
        initial in arb_amount(),
        revisions in prop::collection::vec((arb_amount(), arb_revision_status()), 0..10),
    ) {
        let budget = make_budget(initial);
        let revisions: Vec<_> = revisions
            .into_iter()
            .map(|(new_amount, status)| make_revision(&budget, new_amount, status))
            .collect();

        let expected: Decimal = initial
            + revisions
                .iter()
                .filter(|r| r.status == RevisionStatus::ApprovedFinance)
                .map(|r| r.difference)
                .sum::<Decimal>();

        let balance = BalanceService::budget_balance(&budget, &revisions, &[], &[]);
        prop_assert_eq!(balance.approved_budget, expected);
    }

    /// Recomputing without an intervening mutation yields identical results.
    #[test]
    fn prop_balance_is_deterministic(
        initial in arb_amount(),
        commitments in prop::collection::vec((arb_amount(), arb_commitment_status()), 0..8),
        actuals in prop::collection::vec((arb_amount(), arb_actual_status()), 0..8),
    ) {
        let budget = make_budget(initial);
        let commitments: Vec<_> = commitments
            .into_iter()
            .map(|(amount, status)| make_commitment(&budget, amount, status))
            .collect();
        let actuals: Vec<_> = actuals
            .into_iter()
            .map(|(amount, status)| make_actual(&budget, amount, status))
            .collect();

        let first = BalanceService::budget_balance(&budget, &[], &commitments, &actuals);
        let second = BalanceService::budget_balance(&budget, &[], &commitments, &actuals);
        prop_assert_eq!(first, second);
    }

    /// A non-spendable budget always reports an all-zero balance no matter
    /// how many records reference it.
    #[test]
    fn prop_non_spendable_is_zero(
        initial in arb_amount(),
        commitments in prop::collection::vec(arb_amount(), 0..6),
    ) {
        let mut budget = make_budget(initial);
        budget.status = BudgetStatus::Submitted;
        let commitments: Vec<_> = commitments
            .into_iter()
            .map(|amount| make_commitment(&budget, amount, CommitmentStatus::ApprovedFinance))
            .collect();

        let balance = BalanceService::budget_balance(&budget, &[], &commitments, &[]);
        prop_assert_eq!(balance.approved_budget, Decimal::ZERO);
        prop_assert_eq!(balance.total_committed, Decimal::ZERO);
        prop_assert_eq!(balance.available_budget, Decimal::ZERO);
    }

    /// Posted drawdowns reduce a commitment's remaining capacity by exactly
    /// their sum.
    #[test]
    fn prop_commitment_remaining_subtracts_posted(
        commitment_amount in arb_amount(),
        drawdowns in prop::collection::vec(arb_amount(), 0..8),
    ) {
        let budget = make_budget(commitment_amount);
        let commitment =
            make_commitment(&budget, commitment_amount, CommitmentStatus::ApprovedFinance);
        let actuals: Vec<_> = drawdowns
            .iter()
            .map(|amount| {
                let mut actual = make_actual(&budget, *amount, ActualStatus::Posted);
                actual.commitment_id = Some(commitment.id);
                actual
            })
            .collect();

        let posted: Decimal = drawdowns.iter().copied().sum();
        prop_assert_eq!(
            BalanceService::commitment_remaining(&commitment, &actuals),
            commitment_amount - posted
        );
    }
}
