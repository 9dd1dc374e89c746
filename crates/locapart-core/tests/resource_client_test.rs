#![allow(clippy::unwrap_used)]
// Integration tests for the optimistic resource caches using wiremock.

use futures_util::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use locapart_api::{LocapartClient, TransportConfig};
use locapart_core::{
    ApartmentInput, Backoffice, CityDraft, ClientConfig, CoreError, MutationKind,
    ReconcilePolicy, ReservationDraft, ReservationInput, ReservationStatus,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(policy: ReconcilePolicy) -> (MockServer, Backoffice) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/Locapart/resources/", server.uri())).unwrap();
    let api = LocapartClient::new(base_url, &TransportConfig::default()).unwrap();
    let config = ClientConfig {
        reconcile: policy,
        ..ClientConfig::default()
    };
    (server, Backoffice::with_api(api, config))
}

fn resource_path(suffix: &str) -> String {
    format!("/Locapart/resources/{suffix}")
}

async fn mount_cities(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "nom": "Paris" },
            { "id": 2, "nom": "Lyon" }
        ])))
        .mount(server)
        .await;
}

fn reservation_json(id: i64, statut: i64) -> serde_json::Value {
    json!({
        "id": id,
        "idAppartement": 4,
        "debutPeriode": 1_700_000_000_000_i64,
        "finPeriode": 1_700_600_000_000_i64,
        "statut": statut,
        "code": "RSV-1"
    })
}

fn city_names(bo: &Backoffice) -> Vec<String> {
    bo.cities().cached().iter().map(|c| c.name.clone()).collect()
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_loads_once_and_serves_cache() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("GET"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "nom": "Paris" }])))
        .expect(1)
        .mount(&server)
        .await;

    let (a, b) = tokio::join!(bo.cities().list(), bo.cities().list());
    assert_eq!(a.unwrap().len(), 1);
    assert_eq!(b.unwrap().len(), 1);
    assert_eq!(bo.cities().list().await.unwrap()[0].name, "Paris");
    assert!(bo.cities().loaded_at().is_some());
}

#[tokio::test]
async fn test_refresh_refetches() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("GET"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    bo.cities().list().await.unwrap();
    bo.cities().refresh().await.unwrap();
}

#[tokio::test]
async fn test_fetch_error_is_reported() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("GET"))
        .and(path(resource_path("appartement")))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let err = bo.apartments().list().await.unwrap_err();

    assert!(matches!(err, CoreError::Fetch { resource: "apartment", .. }));
    assert_eq!(err.status(), Some(503));
    assert!(bo.apartments().cached().is_empty());
}

// ── Optimistic writes ───────────────────────────────────────────────

#[tokio::test]
async fn test_create_appends_before_response() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("POST"))
        .and(path(resource_path("ville")))
        .and(body_json(json!({ "nom": "Lille" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    bo.cities().list().await.unwrap();

    let pending = bo.cities().create(CityDraft {
        name: "Lille".into(),
    });

    // Visible before the request is even polled.
    let snapshot = bo.cities().cached();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot[2].id, 3);
    assert_eq!(bo.cities().pending(), 1);

    let created = pending.await.unwrap().unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(bo.cities().pending(), 0);
    assert_eq!(city_names(&bo), ["Paris", "Lyon", "Lille"]);
}

#[tokio::test]
async fn test_create_replaces_synthetic_with_echo() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("POST"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 57, "nom": "Lille" })))
        .mount(&server)
        .await;
    bo.cities().list().await.unwrap();

    let created = bo
        .cities()
        .create(CityDraft {
            name: "Lille".into(),
        })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(created.id, 57);
    assert!(bo.cities().get(3).is_none());
    assert_eq!(bo.cities().get(57).unwrap().name, "Lille");
    assert_eq!(bo.cities().cached().len(), 3);
}

#[tokio::test]
async fn test_create_on_unloaded_cache_skips_edit() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("POST"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let created = bo
        .cities()
        .create(CityDraft {
            name: "Lille".into(),
        })
        .await
        .unwrap();

    assert!(created.is_none());
    assert!(bo.cities().cached().is_empty());
}

#[tokio::test]
async fn test_update_replaces_in_place() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("PUT"))
        .and(path(resource_path("ville")))
        .and(body_json(json!({ "id": 1, "nom": "Paris 1er" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let before = bo.cities().list().await.unwrap();

    let mut paris = (*bo.cities().get(1).unwrap()).clone();
    paris.name = "Paris 1er".into();
    bo.cities().update(paris).await.unwrap();

    let after = bo.cities().cached();
    assert_eq!(city_names(&bo), ["Paris 1er", "Lyon"]);
    assert!(std::sync::Arc::ptr_eq(&before[1], &after[1]));
}

#[tokio::test]
async fn test_delete_removes_and_uses_resource_route() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("GET"))
        .and(path(resource_path("ville/delete/1")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    bo.cities().list().await.unwrap();

    let pending = bo.cities().delete(1);
    assert_eq!(city_names(&bo), ["Lyon"]);
    pending.await.unwrap();
    assert_eq!(city_names(&bo), ["Lyon"]);
}

// ── Reconciliation ──────────────────────────────────────────────────

#[tokio::test]
async fn test_failed_create_reverts() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("POST"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    bo.cities().list().await.unwrap();

    let err = bo
        .cities()
        .create(CityDraft {
            name: "Lille".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CoreError::Mutation {
            operation: MutationKind::Create,
            status: Some(500),
            ..
        }
    ));
    assert_eq!(city_names(&bo), ["Paris", "Lyon"]);
}

#[tokio::test]
async fn test_failed_delete_restores_position() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("GET"))
        .and(path(resource_path("ville/delete/1")))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    bo.cities().list().await.unwrap();

    let err = bo.cities().delete(1).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(city_names(&bo), ["Paris", "Lyon"]);
}

#[tokio::test]
async fn test_keep_policy_leaves_edit_in_place() {
    let (server, bo) = setup(ReconcilePolicy::Keep).await;
    mount_cities(&server).await;
    Mock::given(method("PUT"))
        .and(path(resource_path("ville")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    bo.cities().list().await.unwrap();

    let mut lyon = (*bo.cities().get(2).unwrap()).clone();
    lyon.name = "Lyon 2e".into();
    let err = bo.cities().update(lyon).await.unwrap_err();

    assert!(matches!(err, CoreError::Mutation { .. }));
    assert_eq!(city_names(&bo), ["Paris", "Lyon 2e"]);
    assert_eq!(bo.cities().pending(), 0);
}

#[tokio::test]
async fn test_reservation_create_refetches() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("GET"))
        .and(path(resource_path("reservation")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([reservation_json(8, 0)])))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(resource_path("reservation")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    bo.reservations().list().await.unwrap();

    let created = bo
        .reservations()
        .create(ReservationDraft {
            apartment_id: 4,
            period_start: 1,
            period_end: 2,
            status: ReservationStatus::Active,
            code: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(created.unwrap().id, 9);
    // Server truth after the refetch: the synthetic entry is gone.
    let ids: Vec<i64> = bo.reservations().cached().iter().map(|r| r.id).collect();
    assert_eq!(ids, [8]);
}

// ── Reservation status ──────────────────────────────────────────────

#[tokio::test]
async fn test_cancel_and_activate_flip_only_status() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("GET"))
        .and(path(resource_path("reservation")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([reservation_json(5, 0)])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(resource_path("reservation")))
        .and(body_json(reservation_json(5, -1)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path(resource_path("reservation")))
        .and(body_json(reservation_json(5, 0)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let original = bo.reservations().list().await.unwrap()[0].clone();

    bo.reservations().cancel(5).unwrap().await.unwrap();
    let cancelled = bo.reservations().get(5).unwrap();
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);
    assert_eq!(cancelled.with_status(ReservationStatus::Active), *original);

    bo.reservations().activate(5).unwrap().await.unwrap();
    assert_eq!(*bo.reservations().get(5).unwrap(), *original);
}

#[tokio::test]
async fn test_toggle_unknown_reservation_sends_nothing() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let err = bo.reservations().cancel(42).err().unwrap();

    assert!(matches!(err, CoreError::NotFound { id: 42, .. }));
}

#[tokio::test]
async fn test_reservation_delete_uses_http_delete() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("DELETE"))
        .and(path(resource_path("reservation/5")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    bo.reservations().delete(5).await.unwrap();
}

// ── Form submission ─────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_apartment_is_not_sent() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let input = ApartmentInput {
        city_id: Some(1),
        price: Some(100.0),
        kind: "T".into(),
        postal_code: "1".into(),
        address: "X".into(),
        name: String::new(),
    };
    let err = bo.create_apartment(input).await.unwrap_err();

    match err {
        CoreError::Validation { errors, .. } => {
            let failing: Vec<&str> = errors.failures().map(|(field, _)| field).collect();
            assert_eq!(failing, ["nom"]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_apartment_with_unknown_city_is_not_sent() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("GET"))
        .and(path(resource_path("appartement")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    bo.apartments().list().await.unwrap();

    let input = ApartmentInput {
        city_id: Some(999),
        price: Some(480.0),
        kind: "T1".into(),
        postal_code: "69001".into(),
        address: "2 rue Mercière".into(),
        name: "Mercière".into(),
    };
    let err = bo.create_apartment(input).await.unwrap_err();

    match err {
        CoreError::Validation { resource, errors } => {
            assert_eq!(resource, "apartment");
            let failing: Vec<(&str, &str)> = errors.failures().collect();
            assert_eq!(failing, [("idVille", "ville is required")]);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(bo.apartments().cached().is_empty());
    assert_eq!(bo.apartments().pending(), 0);
}

#[tokio::test]
async fn test_reservation_update_with_deleted_apartment_is_not_sent() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    Mock::given(method("GET"))
        .and(path(resource_path("appartement")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(resource_path("reservation")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([reservation_json(5, 0)])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let current = bo.reservations().list().await.unwrap()[0].clone();

    let input = ReservationInput {
        code: "RSV-2".into(),
        ..ReservationInput::from(current.as_ref())
    };
    let err = bo.update_reservation(5, input).await.unwrap_err();

    match err {
        CoreError::Validation { errors, .. } => {
            assert_eq!(errors.get("idAppartement"), Some("appartement is required"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(*bo.reservations().get(5).unwrap(), *current);
}

#[tokio::test]
async fn test_labels_resolve_through_cache() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;

    assert_eq!(bo.city_id_for("Paris").await, Some(1));
    assert_eq!(bo.city_id_for("Marseille").await, None);
    assert_eq!(bo.city_label(2).as_deref(), Some("Lyon"));
}

#[tokio::test]
async fn test_subscription_sees_optimistic_delete() {
    let (server, bo) = setup(ReconcilePolicy::Revert).await;
    mount_cities(&server).await;
    Mock::given(method("GET"))
        .and(path(resource_path("ville/delete/2")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    bo.cities().list().await.unwrap();

    let mut stream = bo.cities().subscribe().into_stream();
    assert_eq!(stream.next().await.unwrap().len(), 2);

    let pending = bo.cities().delete(2);
    let snapshot = stream.next().await.unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Paris");
    pending.await.unwrap();
}
