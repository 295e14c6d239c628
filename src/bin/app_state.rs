use crate::config::CONFIG;
use std::sync::Arc;
use std::time::Duration;
use tripmind::*;

/// The clients and stores every command works with, built from the configuration.
pub struct AppState {
    pub geocoder: Arc<NominatimGeocoder>,
    pub countries: RestCountries,
    pub images: UnsplashImages,
    pub store: FileStore,
    pub login_delays: LoginDelays,
}

impl AppState {
    pub fn new() -> Self {
        let user_agent = CONFIG.geocoding.user_agent.clone();
        Self {
            geocoder: Arc::new(NominatimGeocoder::new(
                CONFIG.geocoding.endpoint.clone(),
                user_agent.clone(),
            )),
            countries: RestCountries::new(CONFIG.countries.endpoint.clone(), user_agent.clone()),
            images: UnsplashImages::new(
                CONFIG.images.endpoint.clone(),
                CONFIG.images.access_key.clone(),
                user_agent,
            ),
            store: FileStore::new(&CONFIG.general.data_root),
            login_delays: LoginDelays {
                authenticate: Duration::from_millis(CONFIG.login.auth_delay_ms),
                redirect: Duration::from_millis(CONFIG.login.redirect_delay_ms),
            },
        }
    }

    pub fn search_runner(&self) -> SearchRunner {
        SearchRunner::new(self.geocoder.clone())
    }
}
