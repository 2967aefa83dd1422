use crate::entities::{BloodType, Coordinates, Gender};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Every field of a donor that can be written. Registration produces one,
/// admin edits replace the stored one wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorProfile {
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    pub blood_type: BloodType,
    pub weight: f64,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: String,
    pub email: Option<String>,
    pub health_issues: Option<String>,
    pub notes: Option<String>,
    pub last_donation: Option<NaiveDate>,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl DonorProfile {
    /// Trims text fields and turns blank optional text into `None`.
    pub fn tidy(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.location = self.location.trim().to_string();
        self.contact = self.contact.trim().to_string();
        self.email = non_blank(self.email);
        self.health_issues = non_blank(self.health_issues);
        self.notes = non_blank(self.notes);
        self
    }
}

/// `None` for missing or whitespace-only text, trimmed text otherwise.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Core Donor entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    pub id: Uuid,
    pub name: String,
    pub gender: Gender,
    pub age: i32,
    pub blood_type: BloodType,
    pub weight: f64,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: String,
    pub email: Option<String>,
    pub health_issues: Option<String>,
    pub notes: Option<String>,
    pub last_donation: Option<NaiveDate>,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl Donor {
    /// A freshly registered donor: new id, created now.
    pub fn new(profile: DonorProfile) -> Self {
        Self::with_id(Uuid::new_v4(), profile, Utc::now())
    }

    pub fn with_id(id: Uuid, profile: DonorProfile, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: profile.name,
            gender: profile.gender,
            age: profile.age,
            blood_type: profile.blood_type,
            weight: profile.weight,
            location: profile.location,
            latitude: profile.latitude,
            longitude: profile.longitude,
            contact: profile.contact,
            email: profile.email,
            health_issues: profile.health_issues,
            notes: profile.notes,
            last_donation: profile.last_donation,
            available: profile.available,
            created_at,
        }
    }

    pub fn profile(&self) -> DonorProfile {
        DonorProfile {
            name: self.name.clone(),
            gender: self.gender,
            age: self.age,
            blood_type: self.blood_type,
            weight: self.weight,
            location: self.location.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            contact: self.contact.clone(),
            email: self.email.clone(),
            health_issues: self.health_issues.clone(),
            notes: self.notes.clone(),
            last_donation: self.last_donation,
            available: self.available,
        }
    }

    /// Overwrites every writable field; `id` and `created_at` stay put.
    pub fn replace_profile(&mut self, profile: DonorProfile) {
        *self = Self::with_id(self.id, profile, self.created_at);
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Coordinates::new(latitude, longitude),
            _ => None,
        }
    }
}

/// What an admin delete hands back so the caller can confirm the removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedDonor {
    pub id: Uuid,
    pub name: String,
    pub contact: String,
}

impl From<Donor> for DeletedDonor {
    fn from(donor: Donor) -> Self {
        Self {
            id: donor.id,
            name: donor.name,
            contact: donor.contact,
        }
    }
}
