// ── Resource client ──
//
// One cached collection per back-office resource. Reads load the remote
// list once and serve the cache until it is invalidated. Writes edit the
// cache synchronously at call time, then send the request and reconcile
// the edit against the outcome.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use locapart_api::LocapartClient;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::ReconcilePolicy;
use crate::error::{CoreError, MutationKind};
use crate::model::{Reservation, ReservationStatus, Resource};
use crate::store::{EntityCollection, StagedEdit};
use crate::stream::{EntityStream, Snapshot};

/// Cached, optimistically-updated access to one resource.
pub struct ResourceClient<T: Resource> {
    api: Arc<LocapartClient>,
    cache: EntityCollection<T>,
    /// Serialises remote list reads so concurrent callers share one fetch.
    fetch_lock: Mutex<()>,
    policy: ReconcilePolicy,
}

impl<T: Resource> ResourceClient<T> {
    pub fn new(api: Arc<LocapartClient>, policy: ReconcilePolicy) -> Self {
        Self {
            api,
            cache: EntityCollection::new(),
            fetch_lock: Mutex::new(()),
            policy,
        }
    }

    pub fn policy(&self) -> ReconcilePolicy {
        self.policy
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// The collection, loading it from the server if it is not fresh.
    pub async fn list(&self) -> Result<Snapshot<T>, CoreError> {
        if self.cache.is_fresh() {
            return Ok(self.cache.snapshot());
        }

        let _guard = self.fetch_lock.lock().await;
        // Another caller may have loaded it while we waited.
        if self.cache.is_fresh() {
            return Ok(self.cache.snapshot());
        }
        self.fetch().await
    }

    /// The collection as currently cached; empty if never loaded.
    pub fn cached(&self) -> Snapshot<T> {
        self.cache.snapshot()
    }

    /// Cached entry with `id`.
    pub fn get(&self, id: i64) -> Option<Arc<T>> {
        self.cache.get(id)
    }

    /// Invalidate, then refetch.
    pub async fn refresh(&self) -> Result<Snapshot<T>, CoreError> {
        self.invalidate();
        self.list().await
    }

    /// Mark the cache stale; the next `list()` refetches.
    pub fn invalidate(&self) {
        debug!(resource = T::NAME, "invalidating cache");
        self.cache.invalidate();
    }

    /// Subscribe to every change of the cached collection.
    pub fn subscribe(&self) -> EntityStream<T> {
        EntityStream::new(self.cache.subscribe())
    }

    /// When the collection was last loaded from the server.
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.cache.loaded_at()
    }

    /// Number of optimistic edits still awaiting a response.
    pub fn pending(&self) -> usize {
        self.cache.pending_count()
    }

    /// Cache version; bumps on every visible change.
    pub fn version(&self) -> u64 {
        self.cache.version()
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create an entity from `draft`.
    ///
    /// A synthetic entity is appended to the cache before this returns;
    /// the future sends the request. Resolves to the entity as finally
    /// held: the server's echo, the synthetic entity, or `None` if there
    /// was no loaded cache and no echo.
    pub fn create(
        &self,
        draft: T::Draft,
    ) -> impl Future<Output = Result<Option<Arc<T>>, CoreError>> + Send + '_ {
        let body = T::draft_record(&draft);
        let (edit, synthetic) = self.cache.stage_insert(|id| T::from_draft(id, draft));
        if let Some(entity) = &synthetic {
            debug!(resource = T::NAME, id = entity.id(), token = %edit.token, "staged create");
        }

        async move {
            let outcome = match self.api.create::<T::Record, _>(T::ENDPOINT, &body).await {
                Ok(echo) => {
                    let confirmed = echo.and_then(T::from_record);
                    let held = if edit.applied() {
                        self.cache.settle(&edit, confirmed.clone())
                    } else {
                        None
                    };
                    Ok(held.or_else(|| confirmed.map(Arc::new)).or(synthetic))
                }
                Err(e) => Err(self.reconcile_failure(edit, MutationKind::Create, &e)),
            };

            if T::REFETCH_AFTER_CREATE {
                self.cache.invalidate();
                if let Err(e) = self.list().await {
                    warn!(resource = T::NAME, error = %e, "refetch after create failed");
                }
            }
            outcome
        }
    }

    /// Replace the entity whose id matches `entity`'s.
    ///
    /// The cached entry is swapped in place before this returns. Unknown
    /// ids leave the cache alone; the request is still sent.
    pub fn update(&self, entity: T) -> impl Future<Output = Result<(), CoreError>> + Send + '_ {
        let body = entity.to_record();
        let id = entity.id();
        let edit = self.cache.stage_replace(entity);
        debug!(resource = T::NAME, id, applied = edit.applied(), "staged update");

        async move {
            match self.api.update::<serde_json::Value, _>(T::ENDPOINT, &body).await {
                Ok(_) => {
                    self.cache.settle(&edit, None);
                    Ok(())
                }
                Err(e) => Err(self.reconcile_failure(edit, MutationKind::Update, &e)),
            }
        }
    }

    /// Delete the entity with `id`.
    ///
    /// The cached entry is removed before this returns.
    pub fn delete(&self, id: i64) -> impl Future<Output = Result<(), CoreError>> + Send + '_ {
        let edit = self.cache.stage_remove(id);
        debug!(resource = T::NAME, id, applied = edit.applied(), "staged delete");

        async move {
            match self.api.delete_record(T::ENDPOINT, id).await {
                Ok(()) => Ok(()),
                Err(e) => Err(self.reconcile_failure(edit, MutationKind::Delete, &e)),
            }
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    async fn fetch(&self) -> Result<Snapshot<T>, CoreError> {
        let records: Vec<T::Record> = self
            .api
            .list(T::ENDPOINT)
            .await
            .map_err(|e| CoreError::fetch(T::NAME, &e))?;

        let total = records.len();
        let items: Vec<T> = records.into_iter().filter_map(T::from_record).collect();
        if items.len() < total {
            warn!(
                resource = T::NAME,
                skipped = total - items.len(),
                "ignoring records without an id"
            );
        }

        debug!(resource = T::NAME, count = items.len(), "loaded collection");
        self.cache.replace_all(items);
        Ok(self.cache.snapshot())
    }

    fn reconcile_failure(
        &self,
        edit: StagedEdit<T>,
        operation: MutationKind,
        err: &locapart_api::Error,
    ) -> CoreError {
        let error = CoreError::mutation(T::NAME, operation, err);
        match self.policy {
            ReconcilePolicy::Revert => {
                if edit.applied() {
                    debug!(resource = T::NAME, %operation, token = %edit.token, "reverting optimistic edit");
                }
                self.cache.revert(edit);
            }
            ReconcilePolicy::Keep => {
                self.cache.settle(&edit, None);
                warn!(
                    resource = T::NAME,
                    %operation,
                    error = %error,
                    "request failed, keeping optimistic edit"
                );
            }
        }
        error
    }
}

// ── Reservation status ──────────────────────────────────────────────

impl ResourceClient<Reservation> {
    /// Set a cached reservation's status through the update path.
    ///
    /// Fails with `NotFound`, without sending anything, when the
    /// reservation is not cached.
    pub fn set_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<impl Future<Output = Result<(), CoreError>> + Send + '_, CoreError> {
        let current = self.cache.get(id).ok_or(CoreError::NotFound {
            resource: <Reservation as Resource>::NAME,
            id,
        })?;
        Ok(self.update(current.with_status(status)))
    }

    pub fn cancel(
        &self,
        id: i64,
    ) -> Result<impl Future<Output = Result<(), CoreError>> + Send + '_, CoreError> {
        self.set_status(id, ReservationStatus::Cancelled)
    }

    pub fn activate(
        &self,
        id: i64,
    ) -> Result<impl Future<Output = Result<(), CoreError>> + Send + '_, CoreError> {
        self.set_status(id, ReservationStatus::Active)
    }
}
