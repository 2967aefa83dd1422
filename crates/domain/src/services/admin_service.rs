use crate::entities::{DeletedDonor, Donor, DonorProfile};
use crate::errors::DomainError;
use crate::repositories::DonorRepository;
use crate::services::phone_normalizer::{infer_calling_code, normalize_phone};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Admin Management Service - shared-secret gated list, edit and delete
pub struct AdminService {
    donor_repository: Arc<dyn DonorRepository>,
    admin_key: Option<String>,
    default_calling_code: String,
}

impl AdminService {
    /// With no `admin_key` configured every admin call is rejected.
    pub fn new(
        donor_repository: Arc<dyn DonorRepository>,
        admin_key: Option<String>,
        default_calling_code: impl Into<String>,
    ) -> Self {
        Self {
            donor_repository,
            admin_key: admin_key.filter(|key| !key.is_empty()),
            default_calling_code: default_calling_code.into(),
        }
    }

    /// Same answer for a missing, wrong or unconfigured key.
    pub fn authorize(&self, presented: Option<&str>) -> Result<(), DomainError> {
        match (self.admin_key.as_deref(), presented) {
            (Some(expected), Some(presented)) if constant_time_eq(expected.as_bytes(), presented.as_bytes()) => Ok(()),
            _ => {
                warn!("Admin request rejected");
                Err(DomainError::Unauthorized)
            }
        }
    }

    /// All donors, newest first.
    pub async fn list_donors(&self, presented: Option<&str>) -> Result<Vec<Donor>, DomainError> {
        self.authorize(presented)?;
        self.donor_repository.find_all().await
    }

    /// Whole-record replace. Age and weight are not re-checked; name and
    /// location must still be present and the contact is normalised so
    /// stored contacts stay canonical.
    pub async fn update_donor(
        &self,
        presented: Option<&str>,
        id: &str,
        profile: DonorProfile,
    ) -> Result<Donor, DomainError> {
        self.authorize(presented)?;
        let donor_id = parse_id(id)?;

        // An unknown id is not-found whatever the body says.
        if self.donor_repository.find_by_id(donor_id).await?.is_none() {
            return Err(DomainError::DonorNotFound(id.to_string()));
        }

        let mut profile = profile.tidy();
        if profile.name.is_empty() {
            return Err(DomainError::validation("name", "Name is required."));
        }
        if profile.location.is_empty() {
            return Err(DomainError::validation("location", "Location is required."));
        }
        let calling_code = infer_calling_code(&profile.location)
            .map(|entry| entry.code)
            .unwrap_or(self.default_calling_code.as_str());
        profile.contact = normalize_phone(&profile.contact, calling_code)?;

        let donor = self
            .donor_repository
            .update(donor_id, &profile)
            .await?
            .ok_or_else(|| DomainError::DonorNotFound(id.to_string()))?;

        info!("Admin updated donor {}", donor.id);
        Ok(donor)
    }

    pub async fn delete_donor(&self, presented: Option<&str>, id: &str) -> Result<DeletedDonor, DomainError> {
        self.authorize(presented)?;
        let donor_id = parse_id(id)?;

        let donor = self
            .donor_repository
            .delete(donor_id)
            .await?
            .ok_or_else(|| DomainError::DonorNotFound(id.to_string()))?;

        info!("Admin deleted donor {}", donor.id);
        Ok(donor.into())
    }
}

/// An id that is not even a UUID cannot name a stored donor.
fn parse_id(id: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(id.trim()).map_err(|_| DomainError::DonorNotFound(id.to_string()))
}

/// Compares every byte regardless of where the first mismatch is.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
