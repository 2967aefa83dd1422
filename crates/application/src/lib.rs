use config::Config;
use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::{info, warn};

/// Blood Connect application - wires storage, geocoding and the donor services
pub struct DonorApp {
    pub registration_service: DonorRegistrationService,
    pub search_service: Arc<DonorSearchService>,
    pub chat_service: ChatQueryService,
    pub admin_service: AdminService,
}

impl DonorApp {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::new(&config.database_path)?;
        database.initialize()?;
        info!("Using SQLite database at {}", config.database_path);

        let donor_repository: Arc<dyn DonorRepository> =
            Arc::new(SqliteDonorRepository::new(database.get_pool().clone()));

        let geocoder: Option<Arc<dyn Geocoder>> = match config.geocoder_url.as_deref() {
            Some(url) => match NominatimGeocoder::new(url) {
                Ok(geocoder) => {
                    info!("Geocoding enabled via {}", url);
                    Some(Arc::new(geocoder))
                }
                Err(e) => {
                    warn!("Geocoding disabled: {}", e);
                    None
                }
            },
            None => None,
        };

        Ok(Self::from_parts(donor_repository, geocoder, config))
    }

    /// Builds the services around an existing repository.
    pub fn from_parts(
        donor_repository: Arc<dyn DonorRepository>,
        geocoder: Option<Arc<dyn Geocoder>>,
        config: &Config,
    ) -> Self {
        let mut registration_service =
            DonorRegistrationService::new(donor_repository.clone(), config.default_country_code.as_str());
        if let Some(geocoder) = geocoder {
            registration_service = registration_service.with_geocoder(geocoder);
        }

        let search_service = Arc::new(DonorSearchService::new(donor_repository.clone()));
        let chat_service = ChatQueryService::new(search_service.clone());

        let admin_service = AdminService::new(
            donor_repository,
            config.admin_key.clone(),
            config.default_country_code.as_str(),
        );

        Self {
            registration_service,
            search_service,
            chat_service,
            admin_service,
        }
    }
}
