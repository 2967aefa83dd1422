#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use domain::{
    BloodType, Coordinates, DomainError, Donor, DonorFilter, DonorProfile, DonorRepository,
    DonorSubmission, Gender, Geocoder,
};
use std::sync::Mutex;
use uuid::Uuid;

/// Vec-backed repository with the same uniqueness rule as the SQLite store.
#[derive(Default)]
pub struct InMemoryDonorRepository {
    donors: Mutex<Vec<Donor>>,
    echo_duplicates: bool,
    offline: bool,
}

impl InMemoryDonorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every filtered row comes back twice.
    pub fn echoing_duplicates() -> Self {
        Self {
            echo_duplicates: true,
            ..Self::default()
        }
    }

    /// Every call fails like an unreachable database.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, donor: Donor) {
        self.donors.lock().unwrap().push(donor);
    }

    pub fn count(&self) -> usize {
        self.donors.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.offline {
            Err(DomainError::RepositoryError("database is unreachable".to_string()))
        } else {
            Ok(())
        }
    }

    fn newest_first(mut donors: Vec<Donor>) -> Vec<Donor> {
        donors.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        donors
    }
}

#[async_trait]
impl DonorRepository for InMemoryDonorRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Donor>, DomainError> {
        self.check()?;
        Ok(self.donors.lock().unwrap().iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_contact(&self, contact: &str) -> Result<Option<Donor>, DomainError> {
        self.check()?;
        Ok(self
            .donors
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.contact == contact)
            .cloned())
    }

    async fn find_by_filter(&self, filter: &DonorFilter) -> Result<Vec<Donor>, DomainError> {
        self.check()?;
        let matched: Vec<Donor> = self
            .donors
            .lock()
            .unwrap()
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect();
        let mut result = Self::newest_first(matched);
        if self.echo_duplicates {
            result.extend(result.clone());
        }
        Ok(result)
    }

    async fn find_all(&self) -> Result<Vec<Donor>, DomainError> {
        self.check()?;
        Ok(Self::newest_first(self.donors.lock().unwrap().clone()))
    }

    async fn save(&self, donor: &Donor) -> Result<Donor, DomainError> {
        self.check()?;
        let mut donors = self.donors.lock().unwrap();
        if donors.iter().any(|d| d.contact == donor.contact) {
            return Err(DomainError::DuplicateContact(donor.contact.clone()));
        }
        donors.push(donor.clone());
        Ok(donor.clone())
    }

    async fn update(&self, id: Uuid, profile: &DonorProfile) -> Result<Option<Donor>, DomainError> {
        self.check()?;
        let mut donors = self.donors.lock().unwrap();
        if donors.iter().any(|d| d.id != id && d.contact == profile.contact) {
            return Err(DomainError::DuplicateContact(profile.contact.clone()));
        }
        Ok(donors.iter_mut().find(|d| d.id == id).map(|donor| {
            donor.replace_profile(profile.clone());
            donor.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Donor>, DomainError> {
        self.check()?;
        let mut donors = self.donors.lock().unwrap();
        let position = donors.iter().position(|d| d.id == id);
        Ok(position.map(|idx| donors.remove(idx)))
    }
}

pub struct FixedGeocoder(pub Option<Coordinates>);

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn locate(&self, _place: &str) -> Result<Option<Coordinates>, DomainError> {
        Ok(self.0)
    }
}

pub struct BrokenGeocoder;

#[async_trait]
impl Geocoder for BrokenGeocoder {
    async fn locate(&self, _place: &str) -> Result<Option<Coordinates>, DomainError> {
        Err(DomainError::NetworkError("geocoder timed out".to_string()))
    }
}

pub fn submission(contact: &str) -> DonorSubmission {
    DonorSubmission {
        name: Some("Asha Rao".to_string()),
        gender: Some("Female".to_string()),
        age: Some(29.0),
        blood_type: Some("a+".to_string()),
        weight: Some(58.0),
        location: Some("Vijayawada".to_string()),
        contact: Some(contact.to_string()),
        ..DonorSubmission::default()
    }
}

pub fn profile(name: &str, blood_type: BloodType, location: &str, contact: &str) -> DonorProfile {
    DonorProfile {
        name: name.to_string(),
        gender: Gender::Other,
        age: 35,
        blood_type,
        weight: 72.5,
        location: location.to_string(),
        latitude: None,
        longitude: None,
        contact: contact.to_string(),
        email: None,
        health_issues: None,
        notes: None,
        last_donation: None,
        available: true,
    }
}

/// A stored donor registered `minutes_ago` minutes before now.
pub fn donor(
    name: &str,
    blood_type: BloodType,
    location: &str,
    contact: &str,
    minutes_ago: i64,
) -> Donor {
    let created_at: DateTime<Utc> = Utc::now() - Duration::minutes(minutes_ago);
    Donor::with_id(Uuid::new_v4(), profile(name, blood_type, location, contact), created_at)
}

pub fn located(mut donor: Donor, latitude: f64, longitude: f64) -> Donor {
    donor.latitude = Some(latitude);
    donor.longitude = Some(longitude);
    donor
}
