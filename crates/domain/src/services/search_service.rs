use crate::entities::{BloodType, Coordinates, Donor, DonorFilter, DonorMatch, SearchCriteria};
use crate::errors::DomainError;
use crate::repositories::DonorRepository;
use crate::services::contact_links::{call_link, greeting_link, message_link};
use crate::services::distance::haversine_km;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Donor search: filter, de-duplicate, order and enrich.
pub struct DonorSearchService {
    donor_repository: Arc<dyn DonorRepository>,
}

impl DonorSearchService {
    pub fn new(donor_repository: Arc<dyn DonorRepository>) -> Self {
        Self { donor_repository }
    }

    /// Missing blood type or location yields no results rather than the
    /// whole table. With requester coordinates, donors are ordered nearest
    /// first and donors without coordinates follow; otherwise newest first.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<DonorMatch>, DomainError> {
        let blood_type = criteria.blood_type.trim();
        let location = criteria.location.trim();

        if blood_type.is_empty() || location.is_empty() {
            debug!("Search skipped, missing blood type or location");
            return Ok(Vec::new());
        }

        let Some(blood_type) = BloodType::parse(blood_type) else {
            debug!("Search skipped, unknown blood type '{}'", blood_type);
            return Ok(Vec::new());
        };

        let filter = DonorFilter {
            blood_type: Some(blood_type),
            location_contains: Some(location.to_string()),
            available_only: criteria.available_only,
        };

        let donors = self.donor_repository.find_by_filter(&filter).await?;
        let donors = unique_by_id(donors)
            .into_iter()
            .filter(|donor| filter.matches(donor))
            .collect();

        let matches = rank(donors, criteria.requester);

        info!(
            "Search {} in '{}' (available only: {}) found {} donors",
            blood_type,
            location,
            criteria.available_only,
            matches.len()
        );

        Ok(matches)
    }
}

/// First occurrence of each id wins.
fn unique_by_id(donors: Vec<Donor>) -> Vec<Donor> {
    let mut seen = HashSet::new();
    donors
        .into_iter()
        .filter(|donor| seen.insert(donor.id))
        .collect()
}

fn rank(mut donors: Vec<Donor>, requester: Option<Coordinates>) -> Vec<DonorMatch> {
    donors.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut matches: Vec<DonorMatch> = donors
        .into_iter()
        .map(|donor| enrich(donor, requester))
        .collect();

    if requester.is_some() {
        // Stable: equal distances and unlocated donors keep newest-first order.
        matches.sort_by(|a, b| match (a.distance_km, b.distance_km) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }

    matches
}

fn enrich(donor: Donor, requester: Option<Coordinates>) -> DonorMatch {
    let distance_km = requester
        .zip(donor.coordinates())
        .map(|(from, to)| haversine_km(from, to));

    DonorMatch {
        call_link: call_link(&donor.contact),
        message_link: message_link(&donor.contact),
        greeting_link: greeting_link(&donor.name, &donor.contact),
        distance_km,
        donor,
    }
}
