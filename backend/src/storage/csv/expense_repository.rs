use chrono::NaiveDate;
use csv::{Reader, Writer};
use log::info;
use shared::ExpenseStatus;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::domain::models::Expense;
use crate::storage::traits::{ExpenseStorage, StoreError};

use super::connection::CsvConnection;

const HEADER: [&str; 9] = [
    "id",
    "description",
    "amount",
    "date",
    "category",
    "payment_method",
    "vendor",
    "notes",
    "status",
];

/// CSV-backed expense repository (`expenses.csv`). Status is the only
/// mutable column.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    connection: CsvConnection,
}

impl ExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn ensure_file_exists(&self) -> Result<(), StoreError> {
        let path = self.connection.expenses_file_path();
        if !path.exists() {
            self.write_expenses(&[])?;
        }
        Ok(())
    }

    fn read_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        self.ensure_file_exists()?;

        let file = File::open(self.connection.expenses_file_path())?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut expenses = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let raw_amount = record.get(2).unwrap_or("0");
            let amount = raw_amount.parse::<f64>().map_err(|_| {
                StoreError::Malformed(format!("expense amount is not a number: {raw_amount}"))
            })?;

            let raw_date = record.get(3).unwrap_or("");
            let date = raw_date.parse::<NaiveDate>().map_err(|_| {
                StoreError::Malformed(format!("expense date is not a date: {raw_date}"))
            })?;

            let category = record
                .get(4)
                .unwrap_or("")
                .parse()
                .map_err(|e: shared::UnknownLabel| StoreError::Malformed(e.to_string()))?;
            let payment_method = record
                .get(5)
                .unwrap_or("")
                .parse()
                .map_err(|e: shared::UnknownLabel| StoreError::Malformed(e.to_string()))?;
            let status = record
                .get(8)
                .unwrap_or("")
                .parse()
                .map_err(|e: shared::UnknownLabel| StoreError::Malformed(e.to_string()))?;

            expenses.push(Expense {
                id: record.get(0).unwrap_or("").to_string(),
                description: record.get(1).unwrap_or("").to_string(),
                amount,
                date,
                category,
                payment_method,
                vendor: record.get(6).unwrap_or("").to_string(),
                notes: record.get(7).unwrap_or("").to_string(),
                status,
            });
        }

        Ok(expenses)
    }

    fn write_expenses(&self, expenses: &[Expense]) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.connection.expenses_file_path())?;

        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(HEADER)?;

        for expense in expenses {
            csv_writer.write_record(&[
                expense.id.as_str(),
                expense.description.as_str(),
                &expense.amount.to_string(),
                &expense.date.to_string(),
                &expense.category.to_string(),
                &expense.payment_method.to_string(),
                expense.vendor.as_str(),
                expense.notes.as_str(),
                &expense.status.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn store_expense(&self, expense: &Expense) -> Result<(), StoreError> {
        let mut expenses = self.read_expenses()?;
        expenses.push(expense.clone());
        self.write_expenses(&expenses)?;
        info!(
            "Stored expense {} of {:.2} ({})",
            expense.id, expense.amount, expense.description
        );
        Ok(())
    }

    fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, StoreError> {
        let expenses = self.read_expenses()?;
        Ok(expenses.into_iter().find(|e| e.id == expense_id))
    }

    fn list_expenses(&self) -> Result<Vec<Expense>, StoreError> {
        self.read_expenses()
    }

    fn update_expense_status(
        &self,
        expense_id: &str,
        status: ExpenseStatus,
    ) -> Result<Option<Expense>, StoreError> {
        let mut expenses = self.read_expenses()?;
        let mut updated = None;

        for expense in expenses.iter_mut() {
            if expense.id == expense_id {
                expense.status = status;
                updated = Some(expense.clone());
            }
        }

        if updated.is_some() {
            self.write_expenses(&expenses)?;
            info!("Expense {} status set to {}", expense_id, status);
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{ExpenseCategory, PaymentMethod};

    fn test_repository() -> (tempfile::TempDir, ExpenseRepository) {
        let temp_dir = tempfile::tempdir().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (temp_dir, ExpenseRepository::new(connection))
    }

    fn sample_expense(id: &str, amount: f64, status: ExpenseStatus) -> Expense {
        Expense {
            id: id.to_string(),
            description: "Office rent".to_string(),
            amount,
            date: "2024-03-01".parse().unwrap(),
            category: ExpenseCategory::Rent,
            payment_method: PaymentMethod::BankTransfer,
            vendor: "Acme Properties".to_string(),
            notes: String::new(),
            status,
        }
    }

    #[test]
    fn status_update_persists_and_returns_the_record() {
        let (_dir, repo) = test_repository();
        repo.store_expense(&sample_expense("e1", 40.0, ExpenseStatus::Pending)).unwrap();

        let updated = repo
            .update_expense_status("e1", ExpenseStatus::Paid)
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ExpenseStatus::Paid);

        let reloaded = repo.get_expense("e1").unwrap().unwrap();
        assert_eq!(reloaded.status, ExpenseStatus::Paid);
    }

    #[test]
    fn status_update_on_missing_expense_returns_none() {
        let (_dir, repo) = test_repository();
        let updated = repo.update_expense_status("nope", ExpenseStatus::Approved).unwrap();
        assert!(updated.is_none());
    }
}
