//! Domain model for a member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::MemberStatus;
use uuid::Uuid;

/// A member of the organization.
///
/// Besides the opaque `id`, each member carries a human-readable sequential
/// code (`member_id`) derived from the record count at enrollment time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub member_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub join_date: DateTime<Utc>,
    pub total_savings: f64,
    pub total_loans: f64,
    pub status: MemberStatus,
}

impl Member {
    /// Generate an opaque member ID.
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Format the human-readable member code from the current record count.
    /// A count of 3 yields "MEM0004".
    pub fn format_member_code(current_count: usize) -> String {
        format!("MEM{:04}", current_count + 1)
    }

    /// Convert to the API representation.
    pub fn to_dto(&self) -> shared::Member {
        shared::Member {
            id: self.id.clone(),
            member_id: self.member_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
            join_date: self.join_date.to_rfc3339(),
            total_savings: self.total_savings,
            total_loans: self.total_loans,
            status: self.status,
        }
    }
}
