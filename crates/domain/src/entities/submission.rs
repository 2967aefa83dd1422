use serde::Deserialize;

/// Raw registration form as submitted. Nothing here is trusted yet;
/// `DonorRegistrationService` validates it into a `DonorProfile`, so a
/// missing or `null` field surfaces as that field's validation error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DonorSubmission {
    pub name: Option<String>,
    pub gender: Option<String>,
    /// Whole years; a fractional value is rejected by validation.
    pub age: Option<f64>,
    pub blood_type: Option<String>,
    pub weight: Option<f64>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub health_issues: Option<String>,
    pub notes: Option<String>,
    /// `YYYY-MM-DD` or a full RFC 3339 timestamp.
    pub last_donation: Option<String>,
    /// Country name used to pick the calling code for national numbers.
    pub country: Option<String>,
}
