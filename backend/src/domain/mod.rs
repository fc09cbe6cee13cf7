//! Domain layer: services orchestrating validation, storage, and the
//! aggregation engine.

pub mod donation_service;
pub mod donor_service;
pub mod expense_service;
pub mod export_service;
pub mod member_service;
pub mod models;
pub mod report_service;
pub mod reports;
pub mod session_service;

pub use donation_service::DonationService;
pub use donor_service::DonorService;
pub use expense_service::ExpenseService;
pub use export_service::ExportService;
pub use member_service::MemberService;
pub use report_service::ReportService;
pub use session_service::SessionService;

use thiserror::Error;

use crate::storage::StoreError;

/// Failure taxonomy for domain operations.
///
/// Validation failures block the operation before any storage round trip;
/// storage failures abort it with in-memory state untouched. The
/// aggregation engine itself never raises.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A required field is missing or a field value is out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}
