// ── Required-field validation ──
//
// One pure function per entity. Every checked field gets an entry, keyed
// by its wire name; an empty message means the field is valid. A value
// is missing when its string form is empty: `0` is a valid price, an
// unresolved foreign key is not. The `*_within` variants also require
// each foreign key to name an entry of the cached parent collection.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::CoreError;
use crate::model::{
    Apartment, ApartmentDraft, ApartmentInput, City, CityDraft, CityInput, Labelled, Reservation,
    ReservationDraft, ReservationInput, Resource,
};
use crate::resolve;

/// Field name → message, in form order. `""` marks a valid field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<&'static str, String>);

impl FieldErrors {
    fn check(&mut self, field: &'static str, value: Option<String>, message: &str) {
        let present = value.is_some_and(|v| !v.is_empty());
        let message = if present { String::new() } else { message.to_owned() };
        self.0.insert(field, message);
    }

    /// Flag a present foreign key that names no cached parent.
    fn check_parent<P: Labelled>(
        &mut self,
        field: &'static str,
        id: Option<i64>,
        parents: &[Arc<P>],
        message: &str,
    ) {
        if id.is_some_and(|id| resolve::label_for(parents, id).is_none()) {
            self.0.insert(field, message.to_owned());
        }
    }

    /// `true` when no field carries a message.
    pub fn is_valid(&self) -> bool {
        self.0.values().all(String::is_empty)
    }

    /// Message for one field; `Some("")` when it passed.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Only the failing fields.
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0
            .iter()
            .filter(|(_, msg)| !msg.is_empty())
            .map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Every checked field, valid ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn into_result<D>(
        self,
        resource: &'static str,
        build: impl FnOnce() -> Option<D>,
    ) -> Result<D, CoreError> {
        if self.is_valid() {
            if let Some(draft) = build() {
                return Ok(draft);
            }
        }
        Err(CoreError::Validation {
            resource,
            errors: self,
        })
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.failures().map(|(_, msg)| msg).collect();
        if messages.is_empty() {
            f.write_str("no errors")
        } else {
            f.write_str(&messages.join("; "))
        }
    }
}

fn text(value: &str) -> Option<String> {
    Some(value.to_owned())
}

fn number<N: ToString>(value: Option<N>) -> Option<String> {
    value.map(|n| n.to_string())
}

// ── Per-entity rules ────────────────────────────────────────────────

pub fn validate_city(input: &CityInput) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.check("nom", text(&input.name), "nom is required");
    errors
}

pub fn validate_apartment(input: &ApartmentInput) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.check("nom", text(&input.name), "nom is required");
    errors.check("adresse", text(&input.address), "adresse is required");
    errors.check("codePostal", text(&input.postal_code), "codePostal is required");
    errors.check("idVille", number(input.city_id), "ville is required");
    errors.check("prix", number(input.price), "prix is required");
    errors.check("type", text(&input.kind), "type is required");
    errors
}

pub fn validate_reservation(input: &ReservationInput) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.check("debutPeriode", number(input.period_start), "debutPeriode is required");
    errors.check("finPeriode", number(input.period_end), "finPeriode is required");
    errors.check("idAppartement", number(input.apartment_id), "appartement is required");
    errors
}

/// `validate_apartment`, with `idVille` required to name a city in `cities`.
pub fn validate_apartment_within(input: &ApartmentInput, cities: &[Arc<City>]) -> FieldErrors {
    let mut errors = validate_apartment(input);
    errors.check_parent("idVille", input.city_id, cities, "ville is required");
    errors
}

/// `validate_reservation`, with `idAppartement` required to name an
/// apartment in `apartments`.
pub fn validate_reservation_within(
    input: &ReservationInput,
    apartments: &[Arc<Apartment>],
) -> FieldErrors {
    let mut errors = validate_reservation(input);
    errors.check_parent(
        "idAppartement",
        input.apartment_id,
        apartments,
        "appartement is required",
    );
    errors
}

// ── Input → draft ───────────────────────────────────────────────────

impl CityInput {
    pub fn validate(&self) -> FieldErrors {
        validate_city(self)
    }

    pub fn into_draft(self) -> Result<CityDraft, CoreError> {
        validate_city(&self).into_result(City::NAME, || Some(CityDraft { name: self.name }))
    }
}

impl ApartmentInput {
    pub fn validate(&self) -> FieldErrors {
        validate_apartment(self)
    }

    pub fn into_draft(self) -> Result<ApartmentDraft, CoreError> {
        let errors = validate_apartment(&self);
        self.build(errors)
    }

    /// Validate against the cached `cities`, then build the draft.
    pub fn into_draft_within(self, cities: &[Arc<City>]) -> Result<ApartmentDraft, CoreError> {
        let errors = validate_apartment_within(&self, cities);
        self.build(errors)
    }

    fn build(self, errors: FieldErrors) -> Result<ApartmentDraft, CoreError> {
        errors.into_result(Apartment::NAME, || {
            Some(ApartmentDraft {
                city_id: self.city_id?,
                price: self.price?,
                kind: self.kind,
                postal_code: self.postal_code,
                address: self.address,
                name: self.name,
            })
        })
    }
}

impl ReservationInput {
    pub fn validate(&self) -> FieldErrors {
        validate_reservation(self)
    }

    pub fn into_draft(self) -> Result<ReservationDraft, CoreError> {
        let errors = validate_reservation(&self);
        self.build(errors)
    }

    /// Validate against the cached `apartments`, then build the draft.
    pub fn into_draft_within(
        self,
        apartments: &[Arc<Apartment>],
    ) -> Result<ReservationDraft, CoreError> {
        let errors = validate_reservation_within(&self, apartments);
        self.build(errors)
    }

    fn build(self, errors: FieldErrors) -> Result<ReservationDraft, CoreError> {
        errors.into_result(Reservation::NAME, || {
            Some(ReservationDraft {
                apartment_id: self.apartment_id?,
                period_start: self.period_start?,
                period_end: self.period_end?,
                status: self.status,
                code: self.code,
            })
        })
    }
}
