// ── Collection subscriptions ──
//
// Consumers observe a resource collection through an `EntityStream`:
// a snapshot taken at subscription time plus a `watch` receiver that
// wakes on every optimistic edit, reconciliation, and refetch.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::model::Identified;

/// Ordered snapshot of a collection.
pub type Snapshot<T> = Arc<Vec<Arc<T>>>;

/// A subscription to one resource collection.
pub struct EntityStream<T: Identified + Send + Sync + 'static> {
    current: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Identified + Send + Sync + 'static> EntityStream<T> {
    pub(crate) fn new(mut receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let current = receiver.borrow_and_update().clone();
        Self { current, receiver }
    }

    /// Snapshot as of subscription or the last `changed()`.
    pub fn current(&self) -> &Snapshot<T> {
        &self.current
    }

    /// Latest snapshot, without marking it seen.
    pub fn latest(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Entry with `id` in the current snapshot.
    pub fn get(&self, id: i64) -> Option<&Arc<T>> {
        self.current.iter().find(|item| item.id() == id)
    }

    /// Wait for the next change. `None` once the owning client is gone.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Convert into a `Stream` yielding the current snapshot first, then
    /// one snapshot per change.
    pub fn into_stream(self) -> EntityWatchStream<T> {
        EntityWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter over a collection's `watch` channel.
pub struct EntityWatchStream<T: Identified + Send + Sync + 'static> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Identified + Send + Sync + 'static> Stream for EntityWatchStream<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
