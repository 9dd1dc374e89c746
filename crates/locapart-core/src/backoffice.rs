// ── Back-office facade ──
//
// Owns the three resource caches for the lifetime of the process and
// wires form submission (label resolution, validation, mutation) on top.

use std::sync::Arc;

use locapart_api::LocapartClient;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::CoreError;
use crate::model::{
    Apartment, ApartmentInput, City, CityInput, Labelled, Reservation, ReservationInput,
    Resource,
};
use crate::resolve;
use crate::resource::ResourceClient;
use crate::stream::Snapshot;

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<BackofficeInner>`. Caches load lazily on
/// first read and live until the last clone is dropped.
#[derive(Clone)]
pub struct Backoffice {
    inner: Arc<BackofficeInner>,
}

struct BackofficeInner {
    config: ClientConfig,
    api: Arc<LocapartClient>,
    apartments: ResourceClient<Apartment>,
    cities: ResourceClient<City>,
    reservations: ResourceClient<Reservation>,
}

impl Backoffice {
    /// Build the HTTP client described by `config`. Does not contact the
    /// server.
    pub fn new(config: ClientConfig) -> Result<Self, CoreError> {
        let api = LocapartClient::new(config.base_url.clone(), &config.transport())?;
        Ok(Self::with_api(api, config))
    }

    /// Use an already-built API client. `config.base_url` is ignored in
    /// favour of the client's own.
    pub fn with_api(api: LocapartClient, mut config: ClientConfig) -> Self {
        config.base_url = api.base_url().clone();
        let api = Arc::new(api);
        let policy = config.reconcile;
        debug!(base_url = %config.base_url, ?policy, "back office ready");

        Self {
            inner: Arc::new(BackofficeInner {
                apartments: ResourceClient::new(Arc::clone(&api), policy),
                cities: ResourceClient::new(Arc::clone(&api), policy),
                reservations: ResourceClient::new(Arc::clone(&api), policy),
                api,
                config,
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn api(&self) -> &LocapartClient {
        &self.inner.api
    }

    pub fn apartments(&self) -> &ResourceClient<Apartment> {
        &self.inner.apartments
    }

    pub fn cities(&self) -> &ResourceClient<City> {
        &self.inner.cities
    }

    pub fn reservations(&self) -> &ResourceClient<Reservation> {
        &self.inner.reservations
    }

    /// Invalidate every cache and reload all three collections.
    pub async fn refresh_all(&self) -> Result<(), CoreError> {
        let (apartments, cities, reservations) = tokio::join!(
            self.inner.apartments.refresh(),
            self.inner.cities.refresh(),
            self.inner.reservations.refresh(),
        );
        apartments?;
        cities?;
        reservations?;
        Ok(())
    }

    // ── Label resolution ─────────────────────────────────────────────

    /// Id of the city labelled `label`.
    pub async fn city_id_for(&self, label: &str) -> Option<i64> {
        let cities = parents(self.cities()).await;
        resolve::id_for(cities.as_slice(), label)
    }

    /// Id of the apartment labelled `label`.
    pub async fn apartment_id_for(&self, label: &str) -> Option<i64> {
        let apartments = parents(self.apartments()).await;
        resolve::id_for(apartments.as_slice(), label)
    }

    /// Cached name of city `id`.
    pub fn city_label(&self, id: i64) -> Option<String> {
        resolve::label_for(self.cities().cached().as_slice(), id).map(str::to_owned)
    }

    /// Cached name of apartment `id`.
    pub fn apartment_label(&self, id: i64) -> Option<String> {
        resolve::label_for(self.apartments().cached().as_slice(), id).map(str::to_owned)
    }

    // ── Form submission ──────────────────────────────────────────────
    //
    // Validation runs first; a rejected form touches neither the cache
    // nor the network. Foreign keys must name an entry of the parent
    // collection, loaded here if it is not cached yet.

    pub async fn create_city(&self, input: CityInput) -> Result<Option<Arc<City>>, CoreError> {
        let draft = input.into_draft()?;
        self.cities().create(draft).await
    }

    pub async fn update_city(&self, id: i64, input: CityInput) -> Result<(), CoreError> {
        let draft = input.into_draft()?;
        self.cities().update(City::from_draft(id, draft)).await
    }

    pub async fn create_apartment(
        &self,
        input: ApartmentInput,
    ) -> Result<Option<Arc<Apartment>>, CoreError> {
        let cities = parents(self.cities()).await;
        let draft = input.into_draft_within(cities.as_slice())?;
        self.apartments().create(draft).await
    }

    pub async fn update_apartment(&self, id: i64, input: ApartmentInput) -> Result<(), CoreError> {
        let cities = parents(self.cities()).await;
        let draft = input.into_draft_within(cities.as_slice())?;
        self.apartments()
            .update(Apartment::from_draft(id, draft))
            .await
    }

    pub async fn create_reservation(
        &self,
        input: ReservationInput,
    ) -> Result<Option<Arc<Reservation>>, CoreError> {
        let apartments = parents(self.apartments()).await;
        let draft = input.into_draft_within(apartments.as_slice())?;
        self.reservations().create(draft).await
    }

    pub async fn update_reservation(
        &self,
        id: i64,
        input: ReservationInput,
    ) -> Result<(), CoreError> {
        let apartments = parents(self.apartments()).await;
        let draft = input.into_draft_within(apartments.as_slice())?;
        self.reservations()
            .update(Reservation::from_draft(id, draft))
            .await
    }
}

/// Parent collection for label lookups and foreign-key checks. A failed
/// load falls back to whatever is cached, so an unresolvable reference
/// surfaces as a validation error rather than a fetch error.
async fn parents<P: Resource + Labelled>(client: &ResourceClient<P>) -> Snapshot<P> {
    match client.list().await {
        Ok(list) => list,
        Err(e) => {
            warn!(resource = P::NAME, error = %e, "could not load labels, using cache");
            client.cached()
        }
    }
}
