// ── API-to-domain type conversions ──
//
// Bridges `locapart_api` wire records and `locapart_core::model` domain
// types. Records read from the server must carry an id; records built
// for creation never do.

use locapart_api::{ApartmentRecord, CityRecord, ReservationRecord};

use crate::model::{
    Apartment, ApartmentDraft, City, CityDraft, Reservation, ReservationDraft, ReservationStatus,
};

/// A server record arrived without its `id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingId;

// ── City ────────────────────────────────────────────────────────────

impl TryFrom<CityRecord> for City {
    type Error = MissingId;

    fn try_from(r: CityRecord) -> Result<Self, MissingId> {
        Ok(Self {
            id: r.id.ok_or(MissingId)?,
            name: r.nom,
        })
    }
}

impl From<&City> for CityRecord {
    fn from(c: &City) -> Self {
        Self {
            id: Some(c.id),
            nom: c.name.clone(),
        }
    }
}

impl From<&CityDraft> for CityRecord {
    fn from(d: &CityDraft) -> Self {
        Self {
            id: None,
            nom: d.name.clone(),
        }
    }
}

// ── Apartment ───────────────────────────────────────────────────────

impl TryFrom<ApartmentRecord> for Apartment {
    type Error = MissingId;

    fn try_from(r: ApartmentRecord) -> Result<Self, MissingId> {
        Ok(Self {
            id: r.id.ok_or(MissingId)?,
            city_id: r.id_ville,
            price: r.prix,
            kind: r.kind,
            postal_code: r.code_postal,
            address: r.adresse,
            name: r.nom,
        })
    }
}

impl From<&Apartment> for ApartmentRecord {
    fn from(a: &Apartment) -> Self {
        Self {
            id: Some(a.id),
            id_ville: a.city_id,
            prix: a.price,
            kind: a.kind.clone(),
            code_postal: a.postal_code.clone(),
            adresse: a.address.clone(),
            nom: a.name.clone(),
        }
    }
}

impl From<&ApartmentDraft> for ApartmentRecord {
    fn from(d: &ApartmentDraft) -> Self {
        Self {
            id: None,
            id_ville: d.city_id,
            prix: d.price,
            kind: d.kind.clone(),
            code_postal: d.postal_code.clone(),
            adresse: d.address.clone(),
            nom: d.name.clone(),
        }
    }
}

// ── Reservation ─────────────────────────────────────────────────────

impl TryFrom<ReservationRecord> for Reservation {
    type Error = MissingId;

    fn try_from(r: ReservationRecord) -> Result<Self, MissingId> {
        Ok(Self {
            id: r.id.ok_or(MissingId)?,
            apartment_id: r.id_appartement,
            period_start: r.debut_periode,
            period_end: r.fin_periode,
            status: ReservationStatus::from_code(r.statut),
            code: r.code,
        })
    }
}

impl From<&Reservation> for ReservationRecord {
    fn from(r: &Reservation) -> Self {
        Self {
            id: Some(r.id),
            id_appartement: r.apartment_id,
            debut_periode: r.period_start,
            fin_periode: r.period_end,
            statut: r.status.code(),
            code: r.code.clone(),
        }
    }
}

impl From<&ReservationDraft> for ReservationRecord {
    fn from(d: &ReservationDraft) -> Self {
        Self {
            id: None,
            id_appartement: d.apartment_id,
            debut_periode: d.period_start,
            fin_periode: d.period_end,
            statut: d.status.code(),
            code: d.code.clone(),
        }
    }
}
