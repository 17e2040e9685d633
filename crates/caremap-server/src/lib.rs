pub mod config;
pub mod directory;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod routing;
pub mod server;

pub use config::{AppConfig, RoutingConfig, ServerConfig, StorageBackend, StorageConfig};
pub use directory::{DirectoryError, DirectoryProjector, DoctorListItem, FacilityFilter, FacilityView};
pub use observability::init_tracing;
pub use routing::{RouteResult, RoutingError, RoutingGateway};
pub use server::{AppState, CaremapServer, ServerBuilder, build_app, create_store};
