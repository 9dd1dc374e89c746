//! Domain layer between `locapart-api` and the `locapart` CLI.
//!
//! - **[`Backoffice`]**: Facade owning one cached collection per resource
//!   (apartments, cities, reservations), plus label resolution and
//!   validated form submission.
//!
//! - **[`ResourceClient<T>`]**: Cached list with optimistic writes.
//!   `create` / `update` / `delete` edit the cache synchronously when
//!   called, then send the request; a failure is reconciled according to
//!   the configured [`ReconcilePolicy`].
//!
//! - **[`EntityStream<T>`]**: `watch`-backed subscription yielding a new
//!   snapshot on every cache change.
//!
//! - **Form rules** ([`validate`], [`resolve`]): Required-field checks
//!   keyed by wire field name, and foreign-key ⇄ label lookup.

pub mod backoffice;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod resolve;
pub mod resource;
mod store;
pub mod stream;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backoffice::Backoffice;
pub use config::{ClientConfig, ReconcilePolicy, TlsVerification};
pub use error::{CoreError, MutationKind};
pub use resource::ResourceClient;
pub use stream::{EntityStream, EntityWatchStream, Snapshot};
pub use validate::FieldErrors;

pub use locapart_api::DEFAULT_BASE_URL;

pub use model::{
    Apartment, ApartmentDraft, ApartmentInput, City, CityDraft, CityInput, Identified, Labelled,
    Reservation, ReservationDraft, ReservationInput, ReservationStatus, Resource,
};
