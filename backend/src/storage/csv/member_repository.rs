use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use crate::domain::models::Member;
use crate::storage::traits::{MemberStorage, StoreError};

use super::connection::CsvConnection;

const HEADER: [&str; 10] = [
    "id",
    "member_id",
    "name",
    "email",
    "phone",
    "address",
    "join_date",
    "total_savings",
    "total_loans",
    "status",
];

/// CSV-backed member repository (`members.csv`).
#[derive(Debug, Clone)]
pub struct MemberRepository {
    connection: CsvConnection,
}

impl MemberRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn ensure_file_exists(&self) -> Result<(), StoreError> {
        let path = self.connection.members_file_path();
        if !path.exists() {
            self.write_members(&[])?;
        }
        Ok(())
    }

    fn read_members(&self) -> Result<Vec<Member>, StoreError> {
        self.ensure_file_exists()?;

        let file = File::open(self.connection.members_file_path())?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut members = Vec::new();
        for result in csv_reader.records() {
            let record = result?;

            let raw_join = record.get(6).unwrap_or("");
            let join_date = DateTime::parse_from_rfc3339(raw_join)
                .map_err(|_| {
                    StoreError::Malformed(format!("member join_date is not RFC 3339: {raw_join}"))
                })?
                .with_timezone(&Utc);

            let raw_savings = record.get(7).unwrap_or("0");
            let total_savings = raw_savings.parse::<f64>().map_err(|_| {
                StoreError::Malformed(format!("member total_savings is not a number: {raw_savings}"))
            })?;

            let raw_loans = record.get(8).unwrap_or("0");
            let total_loans = raw_loans.parse::<f64>().map_err(|_| {
                StoreError::Malformed(format!("member total_loans is not a number: {raw_loans}"))
            })?;

            let status = record
                .get(9)
                .unwrap_or("")
                .parse()
                .map_err(|e: shared::UnknownLabel| StoreError::Malformed(e.to_string()))?;

            members.push(Member {
                id: record.get(0).unwrap_or("").to_string(),
                member_id: record.get(1).unwrap_or("").to_string(),
                name: record.get(2).unwrap_or("").to_string(),
                email: record.get(3).unwrap_or("").to_string(),
                phone: record.get(4).unwrap_or("").to_string(),
                address: record.get(5).unwrap_or("").to_string(),
                join_date,
                total_savings,
                total_loans,
                status,
            });
        }

        Ok(members)
    }

    fn write_members(&self, members: &[Member]) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.connection.members_file_path())?;

        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(HEADER)?;

        for member in members {
            csv_writer.write_record(&[
                member.id.as_str(),
                member.member_id.as_str(),
                member.name.as_str(),
                member.email.as_str(),
                member.phone.as_str(),
                member.address.as_str(),
                &member.join_date.to_rfc3339(),
                &member.total_savings.to_string(),
                &member.total_loans.to_string(),
                &member.status.to_string(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl MemberStorage for MemberRepository {
    fn store_member(&self, member: &Member) -> Result<(), StoreError> {
        let mut members = self.read_members()?;
        members.push(member.clone());
        self.write_members(&members)?;
        info!("Stored member {} ({})", member.member_id, member.name);
        Ok(())
    }

    fn list_members(&self) -> Result<Vec<Member>, StoreError> {
        self.read_members()
    }

    fn delete_member(&self, member_id: &str) -> Result<bool, StoreError> {
        let mut members = self.read_members()?;
        let before = members.len();
        members.retain(|m| m.id != member_id);
        let deleted = members.len() < before;
        if deleted {
            self.write_members(&members)?;
            info!("Deleted member {}", member_id);
        }
        Ok(deleted)
    }

    fn count_members(&self) -> Result<usize, StoreError> {
        Ok(self.read_members()?.len())
    }
}
