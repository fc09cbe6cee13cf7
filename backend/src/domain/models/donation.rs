//! Domain model for a donation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{DonationCategory, DonationMethod};
use uuid::Uuid;

/// A single donation received from a donor.
///
/// `donor_name` is a denormalized copy taken at intake time; it is not
/// updated if the donor record later changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donation {
    pub id: String,
    pub donor_id: String,
    pub donor_name: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub method: DonationMethod,
    pub category: DonationCategory,
    pub notes: String,
}

impl Donation {
    /// Generate an opaque donation ID.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Convert to the API representation.
    pub fn to_dto(&self) -> shared::Donation {
        shared::Donation {
            id: self.id.clone(),
            donor_id: self.donor_id.clone(),
            donor_name: self.donor_name.clone(),
            amount: self.amount,
            date: self.date.to_string(),
            method: self.method,
            category: self.category,
            notes: self.notes.clone(),
        }
    }
}
