use domain::{Coordinates, SearchCriteria};
use serde::{Deserialize, Serialize};

/// Query string of `GET /api/donors`. Everything arrives as text so a
/// malformed coordinate just disables distance ranking.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub blood_type: Option<String>,
    pub location: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub available: Option<String>,
}

impl From<SearchParams> for SearchCriteria {
    fn from(params: SearchParams) -> Self {
        let requester = params
            .lat
            .as_deref()
            .and_then(|lat| lat.trim().parse::<f64>().ok())
            .zip(params.lng.as_deref().and_then(|lng| lng.trim().parse::<f64>().ok()))
            .and_then(|(lat, lng)| Coordinates::new(lat, lng));
        let available_only = params
            .available
            .as_deref()
            .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"));

        SearchCriteria {
            blood_type: params.blood_type.unwrap_or_default(),
            location: params.location.unwrap_or_default(),
            requester,
            available_only,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdminCheckResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
    pub version: String,
    pub environment: String,
}
