//! Donor management service.

use log::info;
use shared::{CreateDonorRequest, DonorStatus};
use std::sync::Arc;

use crate::domain::models::Donor;
use crate::domain::DomainError;
use crate::storage::{Connection, DonorStorage};

/// Service for donor CRUD and its derived-field bookkeeping.
#[derive(Clone)]
pub struct DonorService<C: Connection> {
    donor_repository: C::DonorRepository,
}

impl<C: Connection> DonorService<C> {
    pub fn new(connection: Arc<C>) -> Self {
        let donor_repository = connection.create_donor_repository();
        Self { donor_repository }
    }

    /// Register a new donor. Name and email are required; the derived
    /// donation fields start at zero/none.
    pub fn create_donor(&self, request: CreateDonorRequest) -> Result<shared::Donor, DomainError> {
        if request.name.trim().is_empty() {
            return Err(DomainError::Validation("donor name is required".to_string()));
        }
        if request.email.trim().is_empty() {
            return Err(DomainError::Validation("donor email is required".to_string()));
        }

        let donor = Donor {
            id: Donor::generate_id(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            total_donations: 0.0,
            last_donation: None,
            status: DonorStatus::Active,
        };

        self.donor_repository.store_donor(&donor)?;
        info!("Registered donor {} ({})", donor.name, donor.id);
        Ok(donor.to_dto())
    }

    pub fn list_donors(&self) -> Result<Vec<shared::Donor>, DomainError> {
        let donors = self.donor_repository.list_donors()?;
        Ok(donors.iter().map(Donor::to_dto).collect())
    }

    pub fn delete_donor(&self, donor_id: &str) -> Result<(), DomainError> {
        if !self.donor_repository.delete_donor(donor_id)? {
            return Err(DomainError::NotFound { entity: "donor", id: donor_id.to_string() });
        }
        Ok(())
    }
}
