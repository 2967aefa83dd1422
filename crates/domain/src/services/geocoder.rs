use crate::entities::Coordinates;
use crate::errors::DomainError;
use async_trait::async_trait;

/// Resolves a free-form place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// `Ok(None)` when the place is unknown.
    async fn locate(&self, place: &str) -> Result<Option<Coordinates>, DomainError>;
}
