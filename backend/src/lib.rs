//! # NGO Ledger Backend
//!
//! Back-office services for a small NGO: donor and member records, donation
//! intake, expense tracking, and derived financial reports. The domain
//! layer is storage-agnostic; the default wiring uses the CSV file backend.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

pub mod domain;
pub mod rest;
pub mod storage;

pub use storage::csv::CsvConnection;

use domain::{
    DonationService, DonorService, ExpenseService, ExportService, MemberService, ReportService,
    SessionService,
};
use storage::csv::SettingsRepository;

/// Backend instance wiring every service to one storage connection.
pub struct Backend {
    pub donor_service: DonorService<CsvConnection>,
    pub donation_service: DonationService<CsvConnection>,
    pub expense_service: ExpenseService<CsvConnection>,
    pub member_service: MemberService<CsvConnection>,
    pub report_service: ReportService<CsvConnection>,
    pub export_service: ExportService,
    pub session_service: SessionService,
}

impl Backend {
    /// Create a backend over the default data directory
    /// (`~/Documents/NGO Ledger`).
    pub fn new() -> Result<Self> {
        let connection = Arc::new(CsvConnection::new_default()?);
        Ok(Self::with_connection(connection))
    }

    /// Create a backend over a specific data directory.
    pub fn with_data_dir<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let connection = Arc::new(CsvConnection::new(data_dir)?);
        Ok(Self::with_connection(connection))
    }

    /// Wire all services to an existing connection.
    pub fn with_connection(connection: Arc<CsvConnection>) -> Self {
        let settings = Arc::new(SettingsRepository::new((*connection).clone()));

        Self {
            donor_service: DonorService::new(connection.clone()),
            donation_service: DonationService::new(connection.clone()),
            expense_service: ExpenseService::new(connection.clone()),
            member_service: MemberService::new(connection.clone()),
            report_service: ReportService::new(connection),
            export_service: ExportService::new(),
            session_service: SessionService::new(settings),
        }
    }
}
