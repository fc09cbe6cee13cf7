//! Domain model for a donor.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::DonorStatus;
use uuid::Uuid;

/// A donor on record.
///
/// `total_donations` and `last_donation` are derived fields: they are
/// recomputed from the donation collection on every donation write, never
/// incrementally adjusted, so the donation records remain the source of
/// truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub total_donations: f64,
    pub last_donation: Option<NaiveDate>,
    pub status: DonorStatus,
}

impl Donor {
    /// Generate an opaque donor ID.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Convert to the API representation.
    pub fn to_dto(&self) -> shared::Donor {
        shared::Donor {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            total_donations: self.total_donations,
            last_donation: self.last_donation.map(|d| d.to_string()),
            status: self.status,
        }
    }
}
