use crate::entities::{ChatQueryResult, SearchCriteria};
use crate::errors::DomainError;
use crate::services::query_parser::QueryParser;
use crate::services::search_service::DonorSearchService;
use std::sync::Arc;
use tracing::info;

/// Front-end for the chat and voice widget: parse, then search.
pub struct ChatQueryService {
    parser: QueryParser,
    search_service: Arc<DonorSearchService>,
}

impl ChatQueryService {
    pub fn new(search_service: Arc<DonorSearchService>) -> Self {
        Self {
            parser: QueryParser::new(),
            search_service,
        }
    }

    /// Never searches with a missing token; an incomplete parse is
    /// `InvalidQueryFormat` carrying whatever was extracted.
    pub async fn answer(&self, query: &str) -> Result<ChatQueryResult, DomainError> {
        let parsed = self.parser.parse(query);

        if !parsed.is_complete() {
            info!(
                "Chat query rejected (blood type: '{}', location: '{}')",
                parsed.blood_type, parsed.location
            );
            return Err(DomainError::InvalidQueryFormat {
                blood_type: parsed.blood_type,
                location: parsed.location,
            });
        }

        let criteria = SearchCriteria::new(parsed.blood_type.clone(), parsed.location.clone());
        let donors = self.search_service.search(&criteria).await?;

        Ok(ChatQueryResult {
            donors,
            blood_group: parsed.blood_type,
            location: parsed.location,
        })
    }
}
