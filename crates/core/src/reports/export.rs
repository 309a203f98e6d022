//! CSV export of the budget-vs-actual matrix.
//!
//! Column layout mirrors the monitoring screen: identifying fields, the
//! balance figures, one column per month, then balance and utilization.

use std::io::Write;

use super::error::ReportError;
use super::types::BudgetVsActualRow;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Writes report rows as CSV to the given writer, header included.
pub fn write_csv<W: Write>(rows: &[BudgetVsActualRow], writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<String> = vec![
        "Project Name".to_string(),
        "Unit".to_string(),
        "COA".to_string(),
        "Budget".to_string(),
        "Committed".to_string(),
        "Total Actual".to_string(),
    ];
    header.extend(MONTH_NAMES.iter().map(|m| (*m).to_string()));
    header.push("Balance".to_string());
    header.push("Utilization %".to_string());
    csv_writer.write_record(&header)?;

    for row in rows {
        let mut record: Vec<String> = vec![
            row.project_name.clone(),
            row.unit.clone(),
            row.coa.clone(),
            row.approved_budget.to_string(),
            row.total_committed.to_string(),
            row.total_actual.to_string(),
        ];
        record.extend(row.monthly_actuals.iter().map(|m| m.amount.to_string()));
        record.push(row.balance.to_string());
        record.push(row.utilization_percent.round_dp(2).to_string());
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders report rows as a CSV string.
pub fn to_csv_string(rows: &[BudgetVsActualRow]) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::types::MonthlyActual;
    use crate::store::types::BudgetType;
    use anggaran_shared::types::BudgetId;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_row() -> BudgetVsActualRow {
        let monthly_actuals = (1..=12)
            .map(|month| MonthlyActual {
                month,
                year: 2026,
                amount: if month == 4 { dec!(75_000) } else { Decimal::ZERO },
                transactions: Vec::new(),
            })
            .collect();

        BudgetVsActualRow {
            budget_id: BudgetId::new(),
            project_name: "Roof, Repair".to_string(),
            unit: "Facilities".to_string(),
            coa: "6310".to_string(),
            budget_type: BudgetType::Project,
            approved_budget: dec!(1_000_000),
            total_committed: dec!(200_000),
            monthly_actuals,
            total_actual: dec!(75_000),
            balance: dec!(725_000),
            utilization_percent: dec!(7.50),
        }
    }

    #[test]
    fn test_csv_header_and_shape() {
        let csv = to_csv_string(&[sample_row()]).unwrap();
        let mut lines = csv.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("Project Name,Unit,COA,Budget,Committed,Total Actual,Jan"));
        assert!(header.ends_with("Dec,Balance,Utilization %"));

        let row = lines.next().unwrap();
        // 6 fixed columns + 12 months + balance + utilization
        assert_eq!(row.split(',').count(), 20 + 1); // quoted comma splits once more
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        let csv = to_csv_string(&[sample_row()]).unwrap();
        assert!(csv.contains("\"Roof, Repair\""));
    }

    #[test]
    fn test_csv_amounts_and_utilization() {
        let csv = to_csv_string(&[sample_row()]).unwrap();
        assert!(csv.contains("1000000"));
        assert!(csv.contains("7.50"));
    }

    #[test]
    fn test_empty_report_is_header_only() {
        let csv = to_csv_string(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
