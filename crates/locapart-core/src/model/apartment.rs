// ── Apartment ──

use locapart_api::{APARTMENTS, ApartmentRecord, Endpoint};
use serde::{Deserialize, Serialize};

use super::{Identified, Labelled, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apartment {
    pub id: i64,
    /// References a `City`.
    pub city_id: i64,
    pub price: f64,
    /// Free-form apartment type, e.g. "T2" or "studio".
    pub kind: String,
    pub postal_code: String,
    pub address: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApartmentDraft {
    pub city_id: i64,
    pub price: f64,
    pub kind: String,
    pub postal_code: String,
    pub address: String,
    pub name: String,
}

/// Candidate apartment payload as submitted from a form.
///
/// `city_id` is `None` when the chosen city label did not resolve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApartmentInput {
    pub city_id: Option<i64>,
    pub price: Option<f64>,
    pub kind: String,
    pub postal_code: String,
    pub address: String,
    pub name: String,
}

impl Identified for Apartment {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Labelled for Apartment {
    fn label(&self) -> &str {
        &self.name
    }
}

impl From<&Apartment> for ApartmentInput {
    fn from(a: &Apartment) -> Self {
        Self {
            city_id: Some(a.city_id),
            price: Some(a.price),
            kind: a.kind.clone(),
            postal_code: a.postal_code.clone(),
            address: a.address.clone(),
            name: a.name.clone(),
        }
    }
}

impl Resource for Apartment {
    type Draft = ApartmentDraft;
    type Record = ApartmentRecord;

    const NAME: &'static str = "apartment";
    const ENDPOINT: Endpoint = APARTMENTS;

    fn from_draft(id: i64, draft: ApartmentDraft) -> Self {
        Self {
            id,
            city_id: draft.city_id,
            price: draft.price,
            kind: draft.kind,
            postal_code: draft.postal_code,
            address: draft.address,
            name: draft.name,
        }
    }

    fn to_record(&self) -> ApartmentRecord {
        self.into()
    }

    fn draft_record(draft: &ApartmentDraft) -> ApartmentRecord {
        draft.into()
    }

    fn from_record(record: ApartmentRecord) -> Option<Self> {
        Self::try_from(record).ok()
    }
}
