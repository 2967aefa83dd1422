pub mod admin_service;
pub mod chat_service;
pub mod contact_links;
pub mod distance;
pub mod geocoder;
pub mod phone_normalizer;
pub mod query_parser;
pub mod registration_service;
pub mod search_service;

pub use admin_service::AdminService;
pub use chat_service::ChatQueryService;
pub use geocoder::Geocoder;
pub use query_parser::{ParsedQuery, QueryParser};
pub use registration_service::DonorRegistrationService;
pub use search_service::DonorSearchService;
