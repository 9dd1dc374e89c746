// ── Reservation ──

use locapart_api::{Endpoint, RESERVATIONS, ReservationRecord};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::{Identified, Resource};

/// Reservation lifecycle flag: `0` on the wire is active, anything else
/// is treated as cancelled. Both states are stable and user-toggled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReservationStatus {
    #[default]
    Active,
    Cancelled,
}

impl ReservationStatus {
    pub const ACTIVE_CODE: i64 = 0;
    pub const CANCELLED_CODE: i64 = -1;

    pub fn from_code(code: i64) -> Self {
        if code == Self::ACTIVE_CODE {
            Self::Active
        } else {
            Self::Cancelled
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Active => Self::ACTIVE_CODE,
            Self::Cancelled => Self::CANCELLED_CODE,
        }
    }

    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    /// References an `Apartment`.
    pub apartment_id: i64,
    pub period_start: i64,
    pub period_end: i64,
    pub status: ReservationStatus,
    pub code: String,
}

impl Reservation {
    /// Copy of this reservation with only its status changed.
    pub fn with_status(&self, status: ReservationStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationDraft {
    pub apartment_id: i64,
    pub period_start: i64,
    pub period_end: i64,
    pub status: ReservationStatus,
    pub code: String,
}

/// Candidate reservation payload as submitted from a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationInput {
    pub apartment_id: Option<i64>,
    pub period_start: Option<i64>,
    pub period_end: Option<i64>,
    pub status: ReservationStatus,
    pub code: String,
}

impl Identified for Reservation {
    fn id(&self) -> i64 {
        self.id
    }
}

impl From<&Reservation> for ReservationInput {
    fn from(r: &Reservation) -> Self {
        Self {
            apartment_id: Some(r.apartment_id),
            period_start: Some(r.period_start),
            period_end: Some(r.period_end),
            status: r.status,
            code: r.code.clone(),
        }
    }
}

impl Resource for Reservation {
    type Draft = ReservationDraft;
    type Record = ReservationRecord;

    const NAME: &'static str = "reservation";
    const ENDPOINT: Endpoint = RESERVATIONS;
    const REFETCH_AFTER_CREATE: bool = true;

    fn from_draft(id: i64, draft: ReservationDraft) -> Self {
        Self {
            id,
            apartment_id: draft.apartment_id,
            period_start: draft.period_start,
            period_end: draft.period_end,
            status: draft.status,
            code: draft.code,
        }
    }

    fn to_record(&self) -> ReservationRecord {
        self.into()
    }

    fn draft_record(draft: &ReservationDraft) -> ReservationRecord {
        draft.into()
    }

    fn from_record(record: ReservationRecord) -> Option<Self> {
        Self::try_from(record).ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn reservation(status: ReservationStatus) -> Reservation {
        Reservation {
            id: 7,
            apartment_id: 3,
            period_start: 20_240_601,
            period_end: 20_240_614,
            status,
            code: "RSV-7".into(),
        }
    }

    #[test]
    fn status_codes_round_trip() {
        assert_eq!(ReservationStatus::from_code(0), ReservationStatus::Active);
        assert_eq!(ReservationStatus::from_code(-1), ReservationStatus::Cancelled);
        assert_eq!(ReservationStatus::Active.code(), 0);
        assert_eq!(ReservationStatus::Cancelled.code(), -1);
    }

    #[test]
    fn any_non_zero_code_is_cancelled() {
        assert_eq!(ReservationStatus::from_code(1), ReservationStatus::Cancelled);
        assert_eq!(ReservationStatus::from_code(-7), ReservationStatus::Cancelled);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(
            "active".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Active
        );
        assert_eq!(ReservationStatus::Cancelled.to_string(), "CANCELLED");
    }

    #[test]
    fn with_status_touches_only_status() {
        let active = reservation(ReservationStatus::Active);
        let cancelled = active.with_status(ReservationStatus::Cancelled);
        assert_eq!(cancelled, reservation(ReservationStatus::Cancelled));
        assert_eq!(cancelled.with_status(ReservationStatus::Active), active);
    }
}
