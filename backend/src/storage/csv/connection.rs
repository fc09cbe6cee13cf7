use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::traits::Connection;

use super::{DonationRepository, DonorRepository, ExpenseRepository, MemberRepository};

/// CsvConnection manages the base data directory and hands out file paths
/// for the per-entity CSV files.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory, creating the
    /// directory if it does not exist yet.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self { base_directory: base_path })
    }

    /// Create a connection in the default data directory
    /// (`~/Documents/NGO Ledger`).
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir).join("Documents").join("NGO Ledger");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// Base data directory this connection points at.
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn donors_file_path(&self) -> PathBuf {
        self.base_directory.join("donors.csv")
    }

    pub fn donations_file_path(&self) -> PathBuf {
        self.base_directory.join("donations.csv")
    }

    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory.join("expenses.csv")
    }

    pub fn members_file_path(&self) -> PathBuf {
        self.base_directory.join("members.csv")
    }

    pub fn settings_file_path(&self) -> PathBuf {
        self.base_directory.join("settings.yaml")
    }
}

impl Connection for CsvConnection {
    type DonorRepository = DonorRepository;
    type DonationRepository = DonationRepository;
    type ExpenseRepository = ExpenseRepository;
    type MemberRepository = MemberRepository;

    fn create_donor_repository(&self) -> DonorRepository {
        DonorRepository::new(self.clone())
    }

    fn create_donation_repository(&self) -> DonationRepository {
        DonationRepository::new(self.clone())
    }

    fn create_expense_repository(&self) -> ExpenseRepository {
        ExpenseRepository::new(self.clone())
    }

    fn create_member_repository(&self) -> MemberRepository {
        MemberRepository::new(self.clone())
    }
}
