pub mod app_config;
pub mod config;
pub mod distance;
pub mod error;
pub mod outlet;
pub mod search;
pub mod state;
pub mod store;
pub mod view;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use distance::{distance_meters, DEFAULT_HIGHLIGHT_RADIUS_METERS};
pub use error::{ConfigError, CoreError};
pub use outlet::{CoordinateValue, GeoPoint, HighlightState, Outlet, RawOutlet};
pub use search::{reconcile, SearchResponse, SearchResultEntry, SearchSummary, OUTLETS_IN_LOCATION};
pub use state::{AppState, Effect, Event, Failure, FailureKind, SearchStatus};
pub use store::OutletStore;
pub use view::{MapView, MarkerIcon};
