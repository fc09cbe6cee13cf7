//! Expense tracking service.

use chrono::{NaiveDate, Utc};
use log::info;
use shared::{CreateExpenseRequest, ExpenseStatus};
use std::sync::Arc;

use crate::domain::models::Expense;
use crate::domain::DomainError;
use crate::storage::{Connection, ExpenseStorage};

/// Service for recording expenses and moving them through their approval
/// lifecycle.
#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let expense_repository = connection.create_expense_repository();
        Self { expense_repository }
    }

    pub fn record_expense(
        &self,
        request: CreateExpenseRequest,
    ) -> Result<shared::Expense, DomainError> {
        if request.description.trim().is_empty() {
            return Err(DomainError::Validation("expense description is required".to_string()));
        }
        if !request.amount.is_finite() || request.amount < 0.0 {
            return Err(DomainError::Validation(
                "expense amount must be a non-negative number".to_string(),
            ));
        }

        let date = match request.date {
            Some(raw) => raw.parse::<NaiveDate>().map_err(|_| {
                DomainError::Validation(format!("expense date is not YYYY-MM-DD: {raw}"))
            })?,
            None => Utc::now().date_naive(),
        };

        let expense = Expense {
            id: Expense::generate_id(),
            description: request.description,
            amount: request.amount,
            date,
            category: request.category,
            payment_method: request.payment_method,
            vendor: request.vendor,
            notes: request.notes,
            status: request.status,
        };

        self.expense_repository.store_expense(&expense)?;
        info!(
            "Recorded expense of {:.2} ({}, {})",
            expense.amount, expense.description, expense.category
        );
        Ok(expense.to_dto())
    }

    pub fn list_expenses(&self) -> Result<Vec<shared::Expense>, DomainError> {
        let expenses = self.expense_repository.list_expenses()?;
        Ok(expenses.iter().map(Expense::to_dto).collect())
    }

    /// Update an expense's status, the only mutation expenses support.
    pub fn update_status(
        &self,
        expense_id: &str,
        status: ExpenseStatus,
    ) -> Result<shared::Expense, DomainError> {
        match self.expense_repository.update_expense_status(expense_id, status)? {
            Some(expense) => Ok(expense.to_dto()),
            None => Err(DomainError::NotFound { entity: "expense", id: expense_id.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::CsvConnection;
    use shared::{ExpenseCategory, PaymentMethod};

    fn create_test_service() -> (tempfile::TempDir, ExpenseService<CsvConnection>) {
        let temp_dir = tempfile::tempdir().unwrap();
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());
        (temp_dir, ExpenseService::new(connection))
    }

    fn request(description: &str, amount: f64, status: ExpenseStatus) -> CreateExpenseRequest {
        CreateExpenseRequest {
            description: description.to_string(),
            amount,
            date: Some("2024-03-01".to_string()),
            category: ExpenseCategory::Operations,
            payment_method: PaymentMethod::Cash,
            vendor: String::new(),
            notes: String::new(),
            status,
        }
    }

    #[test]
    fn recorded_expense_keeps_its_requested_status() {
        let (_dir, service) = create_test_service();
        let expense = service
            .record_expense(request("Printer ink", 45.0, ExpenseStatus::Approved))
            .unwrap();
        assert_eq!(expense.status, ExpenseStatus::Approved);
    }

    #[test]
    fn status_is_the_only_field_that_changes_on_update() {
        let (_dir, service) = create_test_service();
        let created = service
            .record_expense(request("Venue hire", 200.0, ExpenseStatus::Pending))
            .unwrap();

        let updated = service.update_status(&created.id, ExpenseStatus::Paid).unwrap();
        assert_eq!(updated.status, ExpenseStatus::Paid);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.amount, created.amount);
        assert_eq!(updated.date, created.date);
    }

    #[test]
    fn empty_description_and_negative_amount_are_rejected() {
        let (_dir, service) = create_test_service();

        let err = service.record_expense(request(" ", 10.0, ExpenseStatus::Pending)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = service
            .record_expense(request("Travel", -10.0, ExpenseStatus::Pending))
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn updating_a_missing_expense_is_not_found() {
        let (_dir, service) = create_test_service();
        let err = service.update_status("missing", ExpenseStatus::Paid).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "expense", .. }));
    }
}
