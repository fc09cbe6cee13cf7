use chrono::NaiveDate;
use csv::{Reader, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::domain::models::Donation;
use crate::storage::traits::{DonationStorage, StoreError};

use super::connection::CsvConnection;

const HEADER: [&str; 8] = [
    "id",
    "donor_id",
    "donor_name",
    "amount",
    "date",
    "method",
    "category",
    "notes",
];

/// CSV-backed donation repository (`donations.csv`). Append-only: donations
/// are never updated or deleted once recorded.
#[derive(Debug, Clone)]
pub struct DonationRepository {
    connection: CsvConnection,
}

impl DonationRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn ensure_file_exists(&self) -> Result<(), StoreError> {
        let path = self.connection.donations_file_path();
        if !path.exists() {
            self.write_donations(&[])?;
        }
        Ok(())
    }

    fn read_donations(&self) -> Result<Vec<Donation>, StoreError> {
        self.ensure_file_exists()?;

        let file = File::open(self.connection.donations_file_path())?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut donations = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let raw_amount = record.get(3).unwrap_or("0");
            let amount = raw_amount.parse::<f64>().map_err(|_| {
                StoreError::Malformed(format!("donation amount is not a number: {raw_amount}"))
            })?;

            let raw_date = record.get(4).unwrap_or("");
            let date = raw_date.parse::<NaiveDate>().map_err(|_| {
                StoreError::Malformed(format!("donation date is not a date: {raw_date}"))
            })?;

            let method = record
                .get(5)
                .unwrap_or("")
                .parse()
                .map_err(|e: shared::UnknownLabel| StoreError::Malformed(e.to_string()))?;
            let category = record
                .get(6)
                .unwrap_or("")
                .parse()
                .map_err(|e: shared::UnknownLabel| StoreError::Malformed(e.to_string()))?;

            donations.push(Donation {
                id: record.get(0).unwrap_or("").to_string(),
                donor_id: record.get(1).unwrap_or("").to_string(),
                donor_name: record.get(2).unwrap_or("").to_string(),
                amount,
                date,
                method,
                category,
                notes: record.get(7).unwrap_or("").to_string(),
            });
        }

        Ok(donations)
    }

    fn write_donations(&self, donations: &[Donation]) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.connection.donations_file_path())?;

        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(HEADER)?;

        for donation in donations {
            csv_writer.write_record(&[
                donation.id.as_str(),
                donation.donor_id.as_str(),
                donation.donor_name.as_str(),
                &donation.amount.to_string(),
                &donation.date.to_string(),
                &donation.method.to_string(),
                &donation.category.to_string(),
                donation.notes.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl DonationStorage for DonationRepository {
    fn store_donation(&self, donation: &Donation) -> Result<(), StoreError> {
        let mut donations = self.read_donations()?;
        donations.push(donation.clone());
        self.write_donations(&donations)?;
        info!(
            "Stored donation {} of {:.2} from {}",
            donation.id, donation.amount, donation.donor_name
        );
        Ok(())
    }

    fn list_donations(&self) -> Result<Vec<Donation>, StoreError> {
        self.read_donations()
    }

    fn list_donations_for_donor(&self, donor_id: &str) -> Result<Vec<Donation>, StoreError> {
        let donations = self.read_donations()?;
        Ok(donations.into_iter().filter(|d| d.donor_id == donor_id).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{DonationCategory, DonationMethod};

    fn test_repository() -> (tempfile::TempDir, DonationRepository) {
        let temp_dir = tempfile::tempdir().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (temp_dir, DonationRepository::new(connection))
    }

    fn sample_donation(id: &str, donor_id: &str, amount: f64, date: &str) -> Donation {
        Donation {
            id: id.to_string(),
            donor_id: donor_id.to_string(),
            donor_name: "Alice".to_string(),
            amount,
            date: date.parse().unwrap(),
            method: DonationMethod::Cash,
            category: DonationCategory::General,
            notes: String::new(),
        }
    }

    #[test]
    fn list_for_donor_filters_by_donor_id() {
        let (_dir, repo) = test_repository();
        repo.store_donation(&sample_donation("1", "a", 100.0, "2024-01-15")).unwrap();
        repo.store_donation(&sample_donation("2", "b", 50.0, "2024-01-16")).unwrap();
        repo.store_donation(&sample_donation("3", "a", 25.0, "2024-01-17")).unwrap();

        let for_a = repo.list_donations_for_donor("a").unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|d| d.donor_id == "a"));
    }

    #[test]
    fn unknown_category_label_is_malformed_not_defaulted() {
        let (_dir, repo) = test_repository();
        std::fs::write(
            repo.connection.donations_file_path(),
            "id,donor_id,donor_name,amount,date,method,category,notes\n\
             1,a,Alice,100,2024-01-15,cash,charityy,\n",
        )
        .unwrap();

        let err = repo.list_donations().unwrap_err();
        assert!(err.to_string().contains("donation category"));
    }
}
