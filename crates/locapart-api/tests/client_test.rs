#![allow(clippy::unwrap_used)]
// Integration tests for `LocapartClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use locapart_api::{
    APARTMENTS, ApartmentRecord, CITIES, CityRecord, Error, LocapartClient, RESERVATIONS,
    ReservationRecord,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, LocapartClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/Locapart/resources/", server.uri())).unwrap();
    let client = LocapartClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn resource_path(suffix: &str) -> String {
    format!("/Locapart/resources/{suffix}")
}

// ── List ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_cities() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nom": "Paris" },
            { "id": 2, "nom": "Lyon" }
        ])))
        .mount(&server)
        .await;

    let cities: Vec<CityRecord> = client.list(CITIES).await.unwrap();

    assert_eq!(cities.len(), 2);
    assert_eq!(cities[0].id, Some(1));
    assert_eq!(cities[1].nom, "Lyon");
}

#[tokio::test]
async fn test_list_apartments_decodes_wire_names() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(resource_path("appartement")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 4,
            "idVille": 1,
            "prix": 850.0,
            "type": "T2",
            "codePostal": "75011",
            "adresse": "12 rue Oberkampf",
            "nom": "Oberkampf"
        }])))
        .mount(&server)
        .await;

    let apartments: Vec<ApartmentRecord> = client.list(APARTMENTS).await.unwrap();

    assert_eq!(apartments[0].id_ville, 1);
    assert_eq!(apartments[0].kind, "T2");
    assert_eq!(apartments[0].code_postal, "75011");
}

#[tokio::test]
async fn test_list_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(resource_path("reservation")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result = client.list::<ReservationRecord>(RESERVATIONS).await;

    assert!(
        matches!(result, Err(Error::Http { status: 500, ref message }) if message == "boom"),
        "expected HTTP 500, got: {result:?}"
    );
}

#[tokio::test]
async fn test_list_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.list::<CityRecord>(CITIES).await;

    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body.contains("oops")),
        "expected deserialization error, got: {result:?}"
    );
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_sends_body_without_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(resource_path("ville")))
        .and(body_json(json!({ "nom": "Nantes" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let body = CityRecord {
        id: None,
        nom: "Nantes".into(),
    };
    let echoed: Option<CityRecord> = client.create(CITIES, &body).await.unwrap();

    assert!(echoed.is_none());
}

#[tokio::test]
async fn test_create_returns_echoed_record() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42, "nom": "Nantes" })))
        .mount(&server)
        .await;

    let body = CityRecord {
        id: None,
        nom: "Nantes".into(),
    };
    let echoed: Option<CityRecord> = client.create(CITIES, &body).await.unwrap();

    assert_eq!(
        echoed,
        Some(CityRecord {
            id: Some(42),
            nom: "Nantes".into()
        })
    );
}

#[tokio::test]
async fn test_update_uses_put() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(resource_path("ville")))
        .and(body_json(json!({ "id": 3, "nom": "Lille" })))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let body = CityRecord {
        id: Some(3),
        nom: "Lille".into(),
    };
    let echoed: Option<CityRecord> = client.update(CITIES, &body).await.unwrap();

    assert!(echoed.is_none());
}

#[tokio::test]
async fn test_delete_routes_per_resource() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(resource_path("appartement/delete/9")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(resource_path("ville/delete/2")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(resource_path("reservation/7")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client.delete_record(APARTMENTS, 9).await.unwrap();
    client.delete_record(CITIES, 2).await.unwrap();
    client.delete_record(RESERVATIONS, 7).await.unwrap();
}

#[tokio::test]
async fn test_delete_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path(resource_path("reservation/99")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.delete_record(RESERVATIONS, 99).await.unwrap_err();

    assert!(err.is_not_found(), "expected not found, got: {err:?}");
    assert_eq!(err.status(), Some(404));
}
