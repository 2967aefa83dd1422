use crate::entities::{BloodType, Donor};
use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// `None` when either axis is non-finite or out of range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

/// Caller-facing search request, as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub blood_type: String,
    pub location: String,
    pub requester: Option<Coordinates>,
    pub available_only: bool,
}

impl SearchCriteria {
    pub fn new(blood_type: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            blood_type: blood_type.into(),
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn near(mut self, requester: Coordinates) -> Self {
        self.requester = Some(requester);
        self
    }

    pub fn available_only(mut self, available_only: bool) -> Self {
        self.available_only = available_only;
        self
    }
}

/// Typed store predicate. Each populated field adds one condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonorFilter {
    pub blood_type: Option<BloodType>,
    pub location_contains: Option<String>,
    pub available_only: bool,
}

impl DonorFilter {
    pub fn matches(&self, donor: &Donor) -> bool {
        if let Some(blood_type) = self.blood_type {
            if donor.blood_type != blood_type {
                return false;
            }
        }

        if let Some(needle) = &self.location_contains {
            if !donor
                .location
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }

        !self.available_only || donor.available
    }
}

/// A search hit with the computed, never persisted, enrichment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorMatch {
    #[serde(flatten)]
    pub donor: Donor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub call_link: String,
    pub message_link: String,
    pub greeting_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatQueryResult {
    pub donors: Vec<DonorMatch>,
    pub blood_group: String,
    pub location: String,
}
