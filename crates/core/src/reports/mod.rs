//! Budget-vs-actual monitoring reports.

pub mod error;
pub mod export;
pub mod service;
pub mod types;

pub use error::ReportError;
pub use export::{to_csv_string, write_csv};
pub use service::ReportService;
pub use types::{BudgetVsActualRow, MonthlyActual};
