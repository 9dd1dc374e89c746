// ── City ──

use locapart_api::{CITIES, CityRecord, Endpoint};
use serde::{Deserialize, Serialize};

use super::{Identified, Labelled, Resource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityDraft {
    pub name: String,
}

/// Candidate city payload as submitted from a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityInput {
    pub name: String,
}

impl Identified for City {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Labelled for City {
    fn label(&self) -> &str {
        &self.name
    }
}

impl From<&City> for CityInput {
    fn from(city: &City) -> Self {
        Self {
            name: city.name.clone(),
        }
    }
}

impl Resource for City {
    type Draft = CityDraft;
    type Record = CityRecord;

    const NAME: &'static str = "city";
    const ENDPOINT: Endpoint = CITIES;

    fn from_draft(id: i64, draft: CityDraft) -> Self {
        Self {
            id,
            name: draft.name,
        }
    }

    fn to_record(&self) -> CityRecord {
        self.into()
    }

    fn draft_record(draft: &CityDraft) -> CityRecord {
        draft.into()
    }

    fn from_record(record: CityRecord) -> Option<Self> {
        Self::try_from(record).ok()
    }
}
