use crate::entities::{non_blank, BloodType, Coordinates, Donor, DonorProfile, DonorSubmission, Gender};
use crate::errors::DomainError;
use crate::repositories::DonorRepository;
use crate::services::geocoder::Geocoder;
use crate::services::phone_normalizer::{calling_code_for_country, infer_calling_code, normalize_phone};
use chrono::{DateTime, NaiveDate};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 60;
pub const MIN_WEIGHT_KG: f64 = 45.0;

/// Donor Registration Service - validates submissions and writes new donors
pub struct DonorRegistrationService {
    donor_repository: Arc<dyn DonorRepository>,
    geocoder: Option<Arc<dyn Geocoder>>,
    default_calling_code: String,
}

impl DonorRegistrationService {
    pub fn new(donor_repository: Arc<dyn DonorRepository>, default_calling_code: impl Into<String>) -> Self {
        Self {
            donor_repository,
            geocoder: None,
            default_calling_code: default_calling_code.into(),
        }
    }

    /// Fill in coordinates for donors who register without them.
    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Register a new donor. Nothing is written unless every check passes.
    pub async fn register(&self, submission: DonorSubmission) -> Result<Donor, DomainError> {
        let mut profile = self.validate(&submission).map_err(|e| {
            warn!("Registration rejected: {}", e);
            e
        })?;

        if self
            .donor_repository
            .find_by_contact(&profile.contact)
            .await?
            .is_some()
        {
            warn!("Registration rejected: contact already registered");
            return Err(DomainError::DuplicateContact(profile.contact));
        }

        if profile.latitude.is_none() {
            if let Some(coordinates) = self.geocode(&profile.location).await {
                profile.latitude = Some(coordinates.latitude);
                profile.longitude = Some(coordinates.longitude);
            }
        }

        // A racing registration with the same contact loses at the store.
        let donor = self.donor_repository.save(&Donor::new(profile)).await?;
        info!("Registered donor {} ({}, {})", donor.id, donor.blood_type, donor.location);

        Ok(donor)
    }

    /// Checks run in a fixed order and the first failure is reported.
    pub fn validate(&self, submission: &DonorSubmission) -> Result<DonorProfile, DomainError> {
        let name = non_blank(submission.name.clone())
            .ok_or_else(|| DomainError::validation("name", "Name is required."))?;

        let gender = non_blank(submission.gender.clone())
            .ok_or_else(|| DomainError::validation("gender", "Gender is required."))?
            .parse::<Gender>()?;

        let age = submission
            .age
            .filter(|age| age.fract() == 0.0 && (MIN_AGE as f64..=MAX_AGE as f64).contains(age))
            .ok_or_else(|| {
                DomainError::validation("age", format!("Age must be between {} and {}.", MIN_AGE, MAX_AGE))
            })?;

        let blood_type = non_blank(submission.blood_type.clone())
            .ok_or_else(|| DomainError::validation("bloodType", "Blood type is required."))?
            .parse::<BloodType>()?;

        let weight = submission
            .weight
            .filter(|weight| weight.is_finite() && *weight >= MIN_WEIGHT_KG)
            .ok_or_else(|| DomainError::validation("weight", "Weight must be at least 45 kg."))?;

        let location = non_blank(submission.location.clone())
            .ok_or_else(|| DomainError::validation("location", "Location is required."))?;

        let contact = non_blank(submission.contact.clone())
            .ok_or_else(|| DomainError::validation("contact", "Valid contact number is required."))?;

        let coordinates = parse_coordinates(submission.latitude, submission.longitude)?;
        let last_donation = submission
            .last_donation
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(parse_date)
            .transpose()?;

        let email = non_blank(submission.email.clone());
        if email.as_ref().is_some_and(|email| !email.contains('@')) {
            return Err(DomainError::validation("email", "Invalid email format."));
        }

        let calling_code = self.calling_code(submission.country.as_deref(), &location);
        let contact = normalize_phone(&contact, calling_code)?;

        Ok(DonorProfile {
            name,
            gender,
            age: age as i32,
            blood_type,
            weight,
            location,
            latitude: coordinates.map(|c| c.latitude),
            longitude: coordinates.map(|c| c.longitude),
            contact,
            email,
            health_issues: non_blank(submission.health_issues.clone()),
            notes: non_blank(submission.notes.clone()),
            last_donation,
            available: true,
        })
    }

    /// Country hint, then a country named in the location, then the default.
    fn calling_code<'a>(&'a self, country: Option<&str>, location: &str) -> &'a str {
        match country
            .and_then(calling_code_for_country)
            .or_else(|| infer_calling_code(location))
        {
            Some(entry) => entry.code,
            None => &self.default_calling_code,
        }
    }

    async fn geocode(&self, location: &str) -> Option<Coordinates> {
        let geocoder = self.geocoder.as_ref()?;
        match geocoder.locate(location).await {
            Ok(found) => {
                if found.is_none() {
                    debug!("Geocoder has no match for '{}'", location);
                }
                found
            }
            Err(e) => {
                warn!("Geocoding '{}' failed, storing donor without coordinates: {}", location, e);
                None
            }
        }
    }
}

fn parse_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<Option<Coordinates>, DomainError> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude)
            .map(Some)
            .ok_or_else(|| DomainError::validation("latitude", "Coordinates are out of range.")),
        _ => Err(DomainError::validation(
            "latitude",
            "Latitude and longitude must be supplied together.",
        )),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| DomainError::validation("lastDonation", "Last donation must be a date (YYYY-MM-DD)."))
}
