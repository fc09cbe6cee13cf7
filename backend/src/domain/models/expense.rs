//! Domain model for an expense.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{ExpenseCategory, ExpenseStatus, PaymentMethod};
use uuid::Uuid;

/// A recorded expense. `status` is the only field that may change after
/// creation (pending -> approved -> paid, in any order the treasurer picks).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub payment_method: PaymentMethod,
    pub vendor: String,
    pub notes: String,
    pub status: ExpenseStatus,
}

impl Expense {
    /// Generate an opaque expense ID.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Convert to the API representation.
    pub fn to_dto(&self) -> shared::Expense {
        shared::Expense {
            id: self.id.clone(),
            description: self.description.clone(),
            amount: self.amount,
            date: self.date.to_string(),
            category: self.category,
            payment_method: self.payment_method,
            vendor: self.vendor.clone(),
            notes: self.notes.clone(),
            status: self.status,
        }
    }
}
