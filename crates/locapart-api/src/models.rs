// Wire types for the back-office resources.
//
// Field names follow the server's JSON exactly (`idVille`, `codePostal`,
// ...). `id` is optional because creation payloads must not carry one and
// the server assigns it.

use serde::{Deserialize, Serialize};

/// `ville` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nom: String,
}

/// `appartement` resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub id_ville: i64,
    pub prix: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub code_postal: String,
    pub adresse: String,
    pub nom: String,
}

/// `reservation` resource.
///
/// `statut` is `0` for an active reservation and `-1` for a cancelled one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub id_appartement: i64,
    pub debut_periode: i64,
    pub fin_periode: i64,
    pub statut: i64,
    #[serde(default)]
    pub code: String,
}
