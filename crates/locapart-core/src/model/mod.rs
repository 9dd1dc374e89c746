// ── Domain model ──
//
// Canonical back-office entities. Field names are the domain's own;
// the server's wire names live in `locapart_api::models` and are
// bridged by `crate::convert`.

pub mod apartment;
pub mod city;
pub mod reservation;

use std::fmt::Debug;

use locapart_api::Endpoint;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub use apartment::{Apartment, ApartmentDraft, ApartmentInput};
pub use city::{City, CityDraft, CityInput};
pub use reservation::{Reservation, ReservationDraft, ReservationInput, ReservationStatus};

/// Anything carrying a collection-unique integer id.
pub trait Identified {
    fn id(&self) -> i64;
}

/// A parent entity shown by a human-readable label in place of its id.
pub trait Labelled: Identified {
    fn label(&self) -> &str;
}

/// A back-office resource type managed through a cached collection.
///
/// `Draft` is the entity without its server-assigned id; `Record` is the
/// wire shape sent to and read from `ENDPOINT`.
pub trait Resource: Identified + Clone + Debug + Send + Sync + 'static {
    type Draft: Clone + Debug + Send + Sync + 'static;
    type Record: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Singular name used in logs and errors.
    const NAME: &'static str;
    const ENDPOINT: Endpoint;
    /// Invalidate and refetch the collection once a create settles.
    const REFETCH_AFTER_CREATE: bool = false;

    fn from_draft(id: i64, draft: Self::Draft) -> Self;

    /// Wire record carrying `id`, for updates.
    fn to_record(&self) -> Self::Record;

    /// Wire record without `id`, for creation.
    fn draft_record(draft: &Self::Draft) -> Self::Record;

    /// Decode a wire record; `None` when the record has no id.
    fn from_record(record: Self::Record) -> Option<Self>;
}
