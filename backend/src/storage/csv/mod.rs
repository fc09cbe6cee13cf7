//! # CSV Storage Module
//!
//! File-based record store: one CSV file per entity under a base data
//! directory, plus a YAML settings file for application-state flags.
//!
//! ## File layout
//!
//! ```text
//! data/
//! ├── donors.csv
//! ├── donations.csv
//! ├── expenses.csv
//! ├── members.csv
//! └── settings.yaml
//! ```
//!
//! Every mutation rewrites the affected file in full (read, modify,
//! truncate-write). A header row is always present. The process is assumed
//! to be the only writer of the data directory.

pub mod connection;
pub mod donation_repository;
pub mod donor_repository;
pub mod expense_repository;
pub mod member_repository;
pub mod settings_repository;

pub use connection::CsvConnection;
pub use donation_repository::DonationRepository;
pub use donor_repository::DonorRepository;
pub use expense_repository::ExpenseRepository;
pub use member_repository::MemberRepository;
pub use settings_repository::SettingsRepository;
