//! # Storage Traits
//!
//! Storage abstraction traits that allow different record-store backends to
//! be used interchangeably by the domain layer. The production backend keeps
//! one CSV file per entity; tests swap in temp-directory connections and an
//! in-memory key-value store.

use shared::ExpenseStatus;
use thiserror::Error;

use crate::domain::models::{Donation, Donor, Expense, Member};

/// I/O or data failure raised by a record store.
///
/// A failed store call aborts the initiating operation; nothing is applied
/// to in-memory state until the store confirms the write, so there is no
/// rollback path.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file error: {0}")]
    Csv(#[from] csv::Error),

    #[error("settings file error: {0}")]
    Settings(#[from] serde_yaml::Error),

    /// A stored row that cannot be interpreted (bad amount, unknown
    /// category label, unparsable date). Surfaced, never sanitized to a
    /// default value.
    #[error("malformed stored record: {0}")]
    Malformed(String),
}

/// Interface for donor record storage.
pub trait DonorStorage: Send + Sync {
    /// Store a new donor
    fn store_donor(&self, donor: &Donor) -> Result<(), StoreError>;

    /// Retrieve a specific donor by ID
    fn get_donor(&self, donor_id: &str) -> Result<Option<Donor>, StoreError>;

    /// List all donors in insertion order
    fn list_donors(&self) -> Result<Vec<Donor>, StoreError>;

    /// Replace an existing donor record (matched by ID)
    fn update_donor(&self, donor: &Donor) -> Result<(), StoreError>;

    /// Delete a donor by ID; returns false if no such donor existed
    fn delete_donor(&self, donor_id: &str) -> Result<bool, StoreError>;
}

/// Interface for donation record storage. Donations are append-only.
pub trait DonationStorage: Send + Sync {
    /// Store a new donation
    fn store_donation(&self, donation: &Donation) -> Result<(), StoreError>;

    /// List all donations in insertion order
    fn list_donations(&self) -> Result<Vec<Donation>, StoreError>;

    /// List the donations attributed to one donor, in insertion order.
    /// Drives the full re-scan recompute of the donor's derived totals.
    fn list_donations_for_donor(&self, donor_id: &str) -> Result<Vec<Donation>, StoreError>;
}

/// Interface for expense record storage.
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense
    fn store_expense(&self, expense: &Expense) -> Result<(), StoreError>;

    /// Retrieve a specific expense by ID
    fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>, StoreError>;

    /// List all expenses in insertion order
    fn list_expenses(&self) -> Result<Vec<Expense>, StoreError>;

    /// Update the status of an expense, returning the updated record,
    /// or None if the expense does not exist
    fn update_expense_status(
        &self,
        expense_id: &str,
        status: ExpenseStatus,
    ) -> Result<Option<Expense>, StoreError>;
}

/// Interface for member record storage.
pub trait MemberStorage: Send + Sync {
    /// Store a new member
    fn store_member(&self, member: &Member) -> Result<(), StoreError>;

    /// List all members in insertion order
    fn list_members(&self) -> Result<Vec<Member>, StoreError>;

    /// Delete a member by ID; returns false if no such member existed
    fn delete_member(&self, member_id: &str) -> Result<bool, StoreError>;

    /// Count stored members. Executed before each enrollment to derive the
    /// next human-readable member code.
    fn count_members(&self) -> Result<usize, StoreError>;
}

/// Small key-value interface backing application state such as the session
/// gate flag. Swappable between an in-memory test double and a persistent
/// file-backed store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Factory trait abstracting the storage connection. The domain services
/// are generic over this, so they never see the concrete backend.
pub trait Connection: Send + Sync + Clone + 'static {
    type DonorRepository: DonorStorage + Clone;
    type DonationRepository: DonationStorage + Clone;
    type ExpenseRepository: ExpenseStorage + Clone;
    type MemberRepository: MemberStorage + Clone;

    fn create_donor_repository(&self) -> Self::DonorRepository;
    fn create_donation_repository(&self) -> Self::DonationRepository;
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
    fn create_member_repository(&self) -> Self::MemberRepository;
}
