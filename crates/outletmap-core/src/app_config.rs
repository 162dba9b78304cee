/// Runtime settings for the outlet viewer, read from `OUTLETMAP_*` env vars.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the outlet backend, e.g. `http://127.0.0.1:8000/subway-kl-api`.
    pub api_base_url: String,
    /// Path segment of the outlet listing endpoint, relative to `api_base_url`.
    pub outlets_path: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Radius used when a marker click highlights nearby outlets.
    pub highlight_radius_meters: f64,
}

impl AppConfig {
    /// Returns a copy pointed at a different backend, keeping every other setting.
    #[must_use]
    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }
}
