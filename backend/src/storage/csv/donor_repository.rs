use chrono::NaiveDate;
use csv::{Reader, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::domain::models::Donor;
use crate::storage::traits::{DonorStorage, StoreError};

use super::connection::CsvConnection;

const HEADER: [&str; 8] = [
    "id",
    "name",
    "email",
    "phone",
    "address",
    "total_donations",
    "last_donation",
    "status",
];

/// CSV-backed donor repository (`donors.csv`).
#[derive(Debug, Clone)]
pub struct DonorRepository {
    connection: CsvConnection,
}

impl DonorRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn ensure_file_exists(&self) -> Result<(), StoreError> {
        let path = self.connection.donors_file_path();
        if !path.exists() {
            self.write_donors(&[])?;
        }
        Ok(())
    }

    fn read_donors(&self) -> Result<Vec<Donor>, StoreError> {
        self.ensure_file_exists()?;

        let file = File::open(self.connection.donors_file_path())?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut donors = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let raw_total = record.get(5).unwrap_or("0");
            let total_donations = raw_total.parse::<f64>().map_err(|_| {
                StoreError::Malformed(format!("donor total_donations is not a number: {raw_total}"))
            })?;

            let last_donation = match record.get(6).unwrap_or("") {
                "" => None,
                raw => Some(raw.parse::<NaiveDate>().map_err(|_| {
                    StoreError::Malformed(format!("donor last_donation is not a date: {raw}"))
                })?),
            };

            let raw_status = record.get(7).unwrap_or("");
            let status = raw_status
                .parse::<shared::DonorStatus>()
                .map_err(|e| StoreError::Malformed(e.to_string()))?;

            donors.push(Donor {
                id: record.get(0).unwrap_or("").to_string(),
                name: record.get(1).unwrap_or("").to_string(),
                email: record.get(2).unwrap_or("").to_string(),
                phone: record.get(3).unwrap_or("").to_string(),
                address: record.get(4).unwrap_or("").to_string(),
                total_donations,
                last_donation,
                status,
            });
        }

        Ok(donors)
    }

    fn write_donors(&self, donors: &[Donor]) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.connection.donors_file_path())?;

        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(HEADER)?;

        for donor in donors {
            csv_writer.write_record(&[
                donor.id.as_str(),
                donor.name.as_str(),
                donor.email.as_str(),
                donor.phone.as_str(),
                donor.address.as_str(),
                &donor.total_donations.to_string(),
                &donor.last_donation.map(|d| d.to_string()).unwrap_or_default(),
                &donor.status.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl DonorStorage for DonorRepository {
    fn store_donor(&self, donor: &Donor) -> Result<(), StoreError> {
        let mut donors = self.read_donors()?;
        donors.push(donor.clone());
        self.write_donors(&donors)?;
        info!("Stored donor {} ({})", donor.name, donor.id);
        Ok(())
    }

    fn get_donor(&self, donor_id: &str) -> Result<Option<Donor>, StoreError> {
        let donors = self.read_donors()?;
        Ok(donors.into_iter().find(|d| d.id == donor_id))
    }

    fn list_donors(&self) -> Result<Vec<Donor>, StoreError> {
        self.read_donors()
    }

    fn update_donor(&self, donor: &Donor) -> Result<(), StoreError> {
        let mut donors = self.read_donors()?;
        for existing in donors.iter_mut() {
            if existing.id == donor.id {
                *existing = donor.clone();
            }
        }
        self.write_donors(&donors)
    }

    fn delete_donor(&self, donor_id: &str) -> Result<bool, StoreError> {
        let mut donors = self.read_donors()?;
        let before = donors.len();
        donors.retain(|d| d.id != donor_id);
        let deleted = donors.len() < before;
        if deleted {
            self.write_donors(&donors)?;
            info!("Deleted donor {}", donor_id);
        }
        Ok(deleted)
    }
}
