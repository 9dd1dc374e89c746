// locapart-api: Async Rust client for the Locapart back-office REST resources

pub mod client;
pub mod error;
pub mod models;
pub mod resources;
pub mod transport;

pub use client::{DEFAULT_BASE_URL, LocapartClient};
pub use error::Error;
pub use models::{ApartmentRecord, CityRecord, ReservationRecord};
pub use resources::{APARTMENTS, CITIES, DeleteRoute, Endpoint, RESERVATIONS};
pub use transport::{TlsMode, TransportConfig};
