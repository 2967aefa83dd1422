use crate::entities::{Donor, DonorFilter, DonorProfile};
use crate::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence port for donor records.
///
/// Implementations must enforce `contact` uniqueness themselves and report a
/// clash as `DomainError::DuplicateContact`; the services never lock.
#[async_trait]
pub trait DonorRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donor>, DomainError>;
    async fn find_by_contact(&self, contact: &str) -> Result<Option<Donor>, DomainError>;
    /// Newest first.
    async fn find_by_filter(&self, filter: &DonorFilter) -> Result<Vec<Donor>, DomainError>;
    /// Newest first.
    async fn find_all(&self) -> Result<Vec<Donor>, DomainError>;
    async fn save(&self, donor: &Donor) -> Result<Donor, DomainError>;
    /// `None` when no record has this id.
    async fn update(&self, id: Uuid, profile: &DonorProfile) -> Result<Option<Donor>, DomainError>;
    /// Returns the removed record, `None` when no record has this id.
    async fn delete(&self, id: Uuid) -> Result<Option<Donor>, DomainError>;
}
