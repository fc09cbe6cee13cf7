use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Donor record as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Derived sum of this donor's donations, recomputed on every donation write
    pub total_donations: f64,
    /// Calendar date (YYYY-MM-DD) of the most recent donation, if any
    pub last_donation: Option<String>,
    pub status: DonorStatus,
}

/// Donation record as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    /// Denormalized copy of the donor's name at intake time
    pub donor_name: String,
    pub amount: f64,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    pub method: DonationMethod,
    pub category: DonationCategory,
    pub notes: String,
}

/// Expense record as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
    pub vendor: String,
    pub notes: String,
    pub status: ExpenseStatus,
}

/// Member record as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    /// Human-readable sequential code, e.g. "MEM0004"
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Timestamp (RFC 3339) of when the member joined
    pub join_date: String,
    pub total_savings: f64,
    pub total_loans: f64,
    pub status: MemberStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonorStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    Active,
    Inactive,
}

/// How a donation was received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationMethod {
    Cash,
    Check,
    BankTransfer,
    CreditCard,
    Online,
}

/// Program area a donation is earmarked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationCategory {
    General,
    Education,
    Healthcare,
    Infrastructure,
    Emergency,
}

/// Spending category for an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Operations,
    Salaries,
    Programs,
    Utilities,
    Rent,
    Supplies,
    Travel,
    Marketing,
    Other,
}

/// How an expense was (or will be) paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Check,
    BankTransfer,
    CreditCard,
}

/// Approval lifecycle of an expense. The only mutable field on any record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Paid,
}

/// Parse error for the closed label sets below.
///
/// An unknown label is surfaced rather than bucketed into a default so a
/// typo in stored data cannot create an invisible, unaggregated category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} label: {}", self.field, self.value)
    }
}

impl std::error::Error for UnknownLabel {}

macro_rules! closed_labels {
    ($ty:ident, $field:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let label = match self {
                    $($ty::$variant => $label),+
                };
                f.write_str(label)
            }
        }

        impl FromStr for $ty {
            type Err = UnknownLabel;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($ty::$variant),)+
                    other => Err(UnknownLabel { field: $field, value: other.to_string() }),
                }
            }
        }
    };
}

closed_labels!(DonorStatus, "donor status", {
    Active => "active",
    Inactive => "inactive",
});

closed_labels!(MemberStatus, "member status", {
    Active => "active",
    Inactive => "inactive",
});

closed_labels!(DonationMethod, "donation method", {
    Cash => "cash",
    Check => "check",
    BankTransfer => "bank_transfer",
    CreditCard => "credit_card",
    Online => "online",
});

closed_labels!(DonationCategory, "donation category", {
    General => "general",
    Education => "education",
    Healthcare => "healthcare",
    Infrastructure => "infrastructure",
    Emergency => "emergency",
});

closed_labels!(ExpenseCategory, "expense category", {
    Operations => "operations",
    Salaries => "salaries",
    Programs => "programs",
    Utilities => "utilities",
    Rent => "rent",
    Supplies => "supplies",
    Travel => "travel",
    Marketing => "marketing",
    Other => "other",
});

closed_labels!(PaymentMethod, "payment method", {
    Cash => "cash",
    Check => "check",
    BankTransfer => "bank_transfer",
    CreditCard => "credit_card",
});

closed_labels!(ExpenseStatus, "expense status", {
    Pending => "pending",
    Approved => "approved",
    Paid => "paid",
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDonorRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDonationRequest {
    pub donor_id: String,
    pub amount: f64,
    /// Calendar date (YYYY-MM-DD); defaults to today when omitted
    pub date: Option<String>,
    pub method: DonationMethod,
    pub category: DonationCategory,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub description: String,
    pub amount: f64,
    /// Calendar date (YYYY-MM-DD); defaults to today when omitted
    pub date: Option<String>,
    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub notes: String,
    pub status: ExpenseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpenseStatusRequest {
    pub status: ExpenseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Presence-only sign-in. There is no credential check; the flag merely
/// gates the back-office pages and is not a security boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub signed_in: bool,
}

/// Sign of the net balance, used for display labelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceLabel {
    Surplus,
    Deficit,
}

/// Headline figures derived from the donation and expense collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub total_donations: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub balance_label: BalanceLabel,
    pub donation_count: usize,
    pub expense_count: usize,
    pub average_donation: f64,
    pub average_expense: f64,
    /// Expenses as a percentage of donations; 0.0 when there are no donations
    pub expense_ratio_percent: f64,
    pub paid_expenses: f64,
    pub pending_expenses: f64,
}

/// One category's share of a total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub amount: f64,
    /// Share of the grand total; 0.0 (never NaN) when the total is zero
    pub percent_of_total: f64,
}

/// One month's income/expense/net figures in the trend table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendRow {
    /// Month label formatted as "Jan 2024"
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

/// Full financial report: summary plus breakdowns and the trend table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub summary: FinancialSummary,
    pub income_by_category: Vec<CategoryRow>,
    pub expenses_by_category: Vec<CategoryRow>,
    pub monthly_trend: Vec<MonthlyTrendRow>,
}

/// Dashboard figures: headline totals plus the most recent activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_donations: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
    pub balance_label: BalanceLabel,
    pub donor_count: usize,
    pub member_count: usize,
    pub recent_donations: Vec<Donation>,
    pub recent_expenses: Vec<Expense>,
}

/// Which CSV report to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Summary,
    Income,
    Expenses,
}

closed_labels!(ReportKind, "report kind", {
    Summary => "summary",
    Income => "income",
    Expenses => "expenses",
});

/// Generated CSV payload, ready for download or writing to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_content: String,
    /// Suggested filename, e.g. "ngo_summary_report_2024-03-01.csv"
    pub filename: String,
    /// Data rows in the payload, excluding the header
    pub row_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    pub kind: ReportKind,
    /// Directory to write into; defaults to the platform Documents folder
    pub custom_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_display_and_from_str() {
        assert_eq!(DonationMethod::BankTransfer.to_string(), "bank_transfer");
        assert_eq!("bank_transfer".parse::<DonationMethod>().unwrap(), DonationMethod::BankTransfer);
        assert_eq!(ExpenseCategory::Salaries.to_string(), "salaries");
        assert_eq!("salaries".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Salaries);
        assert_eq!("paid".parse::<ExpenseStatus>().unwrap(), ExpenseStatus::Paid);
    }

    #[test]
    fn unknown_label_is_an_error_not_a_default() {
        let err = "fundraising".parse::<ExpenseCategory>().unwrap_err();
        assert_eq!(err.field, "expense category");
        assert_eq!(err.value, "fundraising");
    }

    #[test]
    fn enum_json_uses_snake_case_labels() {
        let json = serde_json::to_string(&DonationMethod::CreditCard).unwrap();
        assert_eq!(json, "\"credit_card\"");
        let parsed: DonationCategory = serde_json::from_str("\"healthcare\"").unwrap();
        assert_eq!(parsed, DonationCategory::Healthcare);
    }
}
