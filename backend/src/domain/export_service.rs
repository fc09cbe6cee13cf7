//! CSV report export service.
//!
//! Builds the downloadable CSV payloads for the three report tabs and can
//! write them straight to disk. Rows are serialized by simple joining:
//! free-text fields containing a comma will corrupt their row. That is a
//! carried limitation of the format, kept visible here rather than patched
//! over with quoting the consumers do not expect.

use chrono::Utc;
use log::{error, info};
use shared::{ExportDataResponse, ExportToPathRequest, ExportToPathResponse, ReportKind};
use std::fs;
use std::path::PathBuf;

use crate::domain::models::{Donation, Expense};
use crate::domain::{reports, DomainError, ReportService};
use crate::storage::Connection;

/// Stateless export service.
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Build the CSV payload for one report kind from the current record
    /// snapshot.
    pub fn export_report_csv<C: Connection>(
        &self,
        kind: ReportKind,
        report_service: &ReportService<C>,
    ) -> Result<ExportDataResponse, DomainError> {
        let donations = report_service.donations()?;
        let expenses = report_service.expenses()?;

        let (csv_content, row_count) = Self::render_csv(kind, &donations, &expenses);
        let filename = format!("ngo_{}_report_{}.csv", kind, Utc::now().format("%Y-%m-%d"));

        info!(
            "Exported {} report: {} rows, {} bytes, filename {}",
            kind,
            row_count,
            csv_content.len(),
            filename
        );

        Ok(ExportDataResponse { csv_content, filename, row_count })
    }

    /// Write a report under the requested directory (or the platform
    /// Documents folder). I/O failures come back as an unsuccessful
    /// response rather than an error, so callers can show the message
    /// as-is.
    pub fn export_to_path<C: Connection>(
        &self,
        request: ExportToPathRequest,
        report_service: &ReportService<C>,
    ) -> Result<ExportToPathResponse, DomainError> {
        let export = self.export_report_csv(request.kind, report_service)?;

        let export_dir = match request.custom_path {
            Some(custom_path) if !custom_path.trim().is_empty() => {
                PathBuf::from(Self::sanitize_path(&custom_path))
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("Could not determine a default export directory");
                    return Ok(ExportToPathResponse {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                    });
                }
            },
        };

        let file_path = export_dir.join(&export.filename);
        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("Failed to create export directory {:?}: {}", export_dir, e);
            return Ok(ExportToPathResponse {
                success: false,
                message: format!("Failed to create export directory: {e}"),
                file_path: export_dir.to_string_lossy().to_string(),
            });
        }

        match fs::write(&file_path, &export.csv_content) {
            Ok(()) => {
                let file_path = file_path.to_string_lossy().to_string();
                info!("Wrote {} report to {}", request.kind, file_path);
                Ok(ExportToPathResponse {
                    success: true,
                    message: format!("Report exported to: {file_path}"),
                    file_path,
                })
            }
            Err(e) => {
                error!("Failed to write export file {:?}: {}", file_path, e);
                Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {e}"),
                    file_path: file_path.to_string_lossy().to_string(),
                })
            }
        }
    }

    /// Serialize one report kind. Returns the payload and its data row
    /// count (header excluded).
    fn render_csv(kind: ReportKind, donations: &[Donation], expenses: &[Expense]) -> (String, usize) {
        let mut csv_content = String::new();

        match kind {
            ReportKind::Summary => {
                let total_donations = reports::total(donations, |d| d.amount);
                let total_expenses = reports::total(expenses, |e| e.amount);
                let net_balance = reports::net_balance(total_donations, total_expenses);

                csv_content.push_str("Report Type,Amount\n");
                csv_content.push_str(&format!("Total Donations,{total_donations}\n"));
                csv_content.push_str(&format!("Total Expenses,{total_expenses}\n"));
                csv_content.push_str(&format!("Net Balance,{net_balance}\n"));
                (csv_content, 3)
            }
            ReportKind::Income => {
                csv_content.push_str("Date,Category,Amount\n");
                for donation in donations {
                    csv_content.push_str(&format!(
                        "{},{},{}\n",
                        donation.date, donation.category, donation.amount
                    ));
                }
                (csv_content, donations.len())
            }
            ReportKind::Expenses => {
                csv_content.push_str("Date,Category,Amount,Status\n");
                for expense in expenses {
                    csv_content.push_str(&format!(
                        "{},{},{},{}\n",
                        expense.date, expense.category, expense.amount, expense.status
                    ));
                }
                (csv_content, expenses.len())
            }
        }
    }

    /// Basic path cleanup for user-typed directories: surrounding quotes,
    /// stray whitespace, trailing separators, and a leading tilde.
    fn sanitize_path(path: &str) -> String {
        let mut cleaned = path.trim().to_string();

        if (cleaned.starts_with('"') && cleaned.ends_with('"') && cleaned.len() >= 2)
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'') && cleaned.len() >= 2)
        {
            cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
        }

        while cleaned.ends_with('/') || cleaned.ends_with('\\') {
            cleaned.pop();
        }

        if let Some(stripped) = cleaned.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                cleaned = home.join(stripped).to_string_lossy().to_string();
            }
        }

        cleaned
    }
}
