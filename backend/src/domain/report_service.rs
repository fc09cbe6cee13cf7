//! Report assembly service.
//!
//! Loads a snapshot of the record collections and runs the pure aggregation
//! engine over it. Each call re-reads from storage; nothing is cached, so a
//! report always reflects the store at the moment it was requested.

use log::info;
use shared::{DashboardSummary, ExpenseStatus, FinancialReport, FinancialSummary};
use std::sync::Arc;

use crate::domain::models::{Donation, Expense};
use crate::domain::{reports, DomainError};
use crate::storage::{Connection, DonationStorage, DonorStorage, ExpenseStorage, MemberStorage};

/// Service deriving financial reports and the dashboard summary.
#[derive(Clone)]
pub struct ReportService<C: Connection> {
    donation_repository: C::DonationRepository,
    expense_repository: C::ExpenseRepository,
    donor_repository: C::DonorRepository,
    member_repository: C::MemberRepository,
}

impl<C: Connection> ReportService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        Self {
            donation_repository: connection.create_donation_repository(),
            expense_repository: connection.create_expense_repository(),
            donor_repository: connection.create_donor_repository(),
            member_repository: connection.create_member_repository(),
        }
    }

    /// Snapshot of the donation collection, in insertion order.
    pub fn donations(&self) -> Result<Vec<Donation>, DomainError> {
        Ok(self.donation_repository.list_donations()?)
    }

    /// Snapshot of the expense collection, in insertion order.
    pub fn expenses(&self) -> Result<Vec<Expense>, DomainError> {
        Ok(self.expense_repository.list_expenses()?)
    }

    /// Full financial report: headline summary, category breakdowns for
    /// both sides, and the monthly trend table.
    pub fn financial_report(&self) -> Result<FinancialReport, DomainError> {
        let donations = self.donations()?;
        let expenses = self.expenses()?;

        let summary = Self::build_summary(&donations, &expenses);

        let income_by_category =
            reports::category_rows(&reports::sum_by_key(&donations, |d| d.category, |d| d.amount));
        let expenses_by_category =
            reports::category_rows(&reports::sum_by_key(&expenses, |e| e.category, |e| e.amount));

        let monthly_income = reports::sum_by_month(&donations, |d| d.date, |d| d.amount);
        let monthly_expenses = reports::sum_by_month(&expenses, |e| e.date, |e| e.amount);
        let monthly_trend = reports::monthly_trend(&monthly_income, &monthly_expenses);

        info!(
            "Built financial report over {} donations and {} expenses",
            donations.len(),
            expenses.len()
        );

        Ok(FinancialReport { summary, income_by_category, expenses_by_category, monthly_trend })
    }

    /// Dashboard summary: headline totals plus the five most recent
    /// donations and expenses.
    pub fn dashboard(&self) -> Result<DashboardSummary, DomainError> {
        let donations = self.donations()?;
        let expenses = self.expenses()?;
        let donor_count = self.donor_repository.list_donors()?.len();
        let member_count = self.member_repository.count_members()?;

        let total_donations = reports::total(&donations, |d| d.amount);
        let total_expenses = reports::total(&expenses, |e| e.amount);
        let net_balance = reports::net_balance(total_donations, total_expenses);

        let recent_donations = reports::most_recent(&donations, 5, |d| d.date)
            .iter()
            .map(Donation::to_dto)
            .collect();
        let recent_expenses = reports::most_recent(&expenses, 5, |e| e.date)
            .iter()
            .map(Expense::to_dto)
            .collect();

        Ok(DashboardSummary {
            total_donations,
            total_expenses,
            net_balance,
            balance_label: reports::balance_label(net_balance),
            donor_count,
            member_count,
            recent_donations,
            recent_expenses,
        })
    }

    fn build_summary(donations: &[Donation], expenses: &[Expense]) -> FinancialSummary {
        let total_donations = reports::total(donations, |d| d.amount);
        let total_expenses = reports::total(expenses, |e| e.amount);
        let net_balance = reports::net_balance(total_donations, total_expenses);

        FinancialSummary {
            total_donations,
            total_expenses,
            net_balance,
            balance_label: reports::balance_label(net_balance),
            donation_count: donations.len(),
            expense_count: expenses.len(),
            average_donation: reports::average(total_donations, donations.len()),
            average_expense: reports::average(total_expenses, expenses.len()),
            expense_ratio_percent: reports::percent_of(total_expenses, total_donations),
            paid_expenses: reports::total_where(
                expenses,
                |e| e.status == ExpenseStatus::Paid,
                |e| e.amount,
            ),
            pending_expenses: reports::total_where(
                expenses,
                |e| e.status == ExpenseStatus::Pending,
                |e| e.amount,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DonationService, DonorService, ExpenseService};
    use crate::storage::csv::CsvConnection;
    use shared::{
        BalanceLabel, CreateDonationRequest, CreateDonorRequest, CreateExpenseRequest,
        DonationCategory, DonationMethod, ExpenseCategory, PaymentMethod,
    };

    struct Fixture {
        _dir: tempfile::TempDir,
        donor_service: DonorService<CsvConnection>,
        donation_service: DonationService<CsvConnection>,
        expense_service: ExpenseService<CsvConnection>,
        report_service: ReportService<CsvConnection>,
    }

    fn setup() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let connection = Arc::new(CsvConnection::new(dir.path()).unwrap());
        Fixture {
            _dir: dir,
            donor_service: DonorService::new(connection.clone()),
            donation_service: DonationService::new(connection.clone()),
            expense_service: ExpenseService::new(connection.clone()),
            report_service: ReportService::new(connection),
        }
    }

    fn seed_donor(fixture: &Fixture) -> shared::Donor {
        fixture
            .donor_service
            .create_donor(CreateDonorRequest {
                name: "Alice".to_string(),
                email: "alice@example.org".to_string(),
                phone: String::new(),
                address: String::new(),
            })
            .unwrap()
    }

    fn seed_donation(fixture: &Fixture, donor_id: &str, amount: f64, date: &str, category: DonationCategory) {
        fixture
            .donation_service
            .record_donation(CreateDonationRequest {
                donor_id: donor_id.to_string(),
                amount,
                date: Some(date.to_string()),
                method: DonationMethod::Cash,
                category,
                notes: String::new(),
            })
            .unwrap();
    }

    fn seed_expense(fixture: &Fixture, amount: f64, date: &str, status: ExpenseStatus) {
        fixture
            .expense_service
            .record_expense(CreateExpenseRequest {
                description: "expense".to_string(),
                amount,
                date: Some(date.to_string()),
                category: ExpenseCategory::Operations,
                payment_method: PaymentMethod::Cash,
                vendor: String::new(),
                notes: String::new(),
                status,
            })
            .unwrap();
    }

    #[test]
    fn empty_store_reports_all_zeroes_without_nan() {
        let fixture = setup();
        let report = fixture.report_service.financial_report().unwrap();

        assert_eq!(report.summary.total_donations, 0.0);
        assert_eq!(report.summary.net_balance, 0.0);
        assert_eq!(report.summary.balance_label, BalanceLabel::Surplus);
        assert_eq!(report.summary.average_donation, 0.0);
        assert_eq!(report.summary.expense_ratio_percent, 0.0);
        assert!(report.income_by_category.is_empty());
        assert!(report.monthly_trend.is_empty());
    }

    #[test]
    fn summary_figures_match_the_seeded_records() {
        let fixture = setup();
        let donor = seed_donor(&fixture);
        seed_donation(&fixture, &donor.id, 100.0, "2024-01-15", DonationCategory::Education);
        seed_donation(&fixture, &donor.id, 50.0, "2024-02-01", DonationCategory::General);
        seed_expense(&fixture, 40.0, "2024-02-10", ExpenseStatus::Paid);
        seed_expense(&fixture, 60.0, "2024-02-12", ExpenseStatus::Pending);

        let report = fixture.report_service.financial_report().unwrap();
        let summary = &report.summary;

        assert_eq!(summary.total_donations, 150.0);
        assert_eq!(summary.total_expenses, 100.0);
        assert_eq!(summary.net_balance, 50.0);
        assert_eq!(summary.balance_label, BalanceLabel::Surplus);
        assert_eq!(summary.average_donation, 75.0);
        assert_eq!(summary.average_expense, 50.0);
        assert!((summary.expense_ratio_percent - 66.666_666_666_666_66).abs() < 1e-9);
        assert_eq!(summary.paid_expenses, 40.0);
        assert_eq!(summary.pending_expenses, 60.0);
    }

    #[test]
    fn category_breakdown_values_sum_to_the_total() {
        let fixture = setup();
        let donor = seed_donor(&fixture);
        seed_donation(&fixture, &donor.id, 100.0, "2024-01-15", DonationCategory::Education);
        seed_donation(&fixture, &donor.id, 50.0, "2024-02-01", DonationCategory::General);
        seed_donation(&fixture, &donor.id, 30.0, "2024-02-05", DonationCategory::Education);

        let report = fixture.report_service.financial_report().unwrap();
        let breakdown_total: f64 = report.income_by_category.iter().map(|r| r.amount).sum();
        assert_eq!(breakdown_total, report.summary.total_donations);
        assert_eq!(report.income_by_category[0].category, "education");
        assert_eq!(report.income_by_category[0].amount, 130.0);
    }

    #[test]
    fn trend_rows_hold_net_equals_income_minus_expenses() {
        let fixture = setup();
        let donor = seed_donor(&fixture);
        seed_donation(&fixture, &donor.id, 100.0, "2024-01-15", DonationCategory::General);
        seed_expense(&fixture, 30.0, "2024-01-20", ExpenseStatus::Paid);
        seed_expense(&fixture, 20.0, "2024-02-02", ExpenseStatus::Pending);

        let report = fixture.report_service.financial_report().unwrap();
        assert_eq!(report.monthly_trend.len(), 2);
        for row in &report.monthly_trend {
            assert_eq!(row.net, row.income - row.expenses);
        }
        assert_eq!(report.monthly_trend[0].month, "Jan 2024");
        assert_eq!(report.monthly_trend[0].net, 70.0);
        assert_eq!(report.monthly_trend[1].month, "Feb 2024");
        assert_eq!(report.monthly_trend[1].net, -20.0);
    }

    #[test]
    fn dashboard_lists_at_most_five_recent_records_newest_first() {
        let fixture = setup();
        let donor = seed_donor(&fixture);
        for day in 1..=7 {
            seed_donation(
                &fixture,
                &donor.id,
                day as f64,
                &format!("2024-01-{day:02}"),
                DonationCategory::General,
            );
        }

        let dashboard = fixture.report_service.dashboard().unwrap();
        assert_eq!(dashboard.recent_donations.len(), 5);
        assert_eq!(dashboard.recent_donations[0].date, "2024-01-07");
        assert_eq!(dashboard.recent_donations[4].date, "2024-01-03");
        assert_eq!(dashboard.donor_count, 1);
    }
}
