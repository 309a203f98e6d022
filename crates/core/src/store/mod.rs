//! The entity store and its operation surface.
//!
//! # Modules
//!
//! - `types` - Entity records and creation inputs
//! - `service` - `BudgetStore`, the injected mutation/read surface
//! - `error` - Store-level error taxonomy

pub mod error;
pub mod service;
pub mod types;


pub use error::StoreError;
pub use service::BudgetStore;
pub use types::{
    ActualPayment, Budget, BudgetRevision, BudgetType, Commitment, CreateActualInput,
    CreateBudgetInput, CreateCommitmentInput, CreateRevisionInput,
};
