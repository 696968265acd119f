//! Populate-once cache over the tenant directory.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::client::DirectoryClient;
use crate::store::StoreRecord;

/// Lazily populated, process-local copy of the tenant directory.
///
/// The first caller triggers the upstream fetch. The populate lock is held
/// across that await, so concurrent first callers wait on the in-flight
/// request instead of issuing their own. A successful fetch — an empty list
/// included — is terminal for the process lifetime; a failed fetch leaves
/// the cache unpopulated so the next caller re-attempts.
pub struct DirectoryCache {
    client: DirectoryClient,
    stores: Mutex<Option<Arc<Vec<StoreRecord>>>>,
}

impl DirectoryCache {
    #[must_use]
    pub fn new(client: DirectoryClient) -> Self {
        Self {
            client,
            stores: Mutex::new(None),
        }
    }

    /// Returns the cached tenant list, fetching it on first use.
    ///
    /// Fetch failures are logged at warn and surface as an empty list; they
    /// never propagate to callers.
    pub async fn fetch_all(&self) -> Arc<Vec<StoreRecord>> {
        let mut slot = self.stores.lock().await;
        if let Some(stores) = slot.as_ref() {
            return Arc::clone(stores);
        }

        match self.client.fetch_directory().await {
            Ok(stores) => {
                info!(store_count = stores.len(), "tenant directory cached");
                let stores = Arc::new(stores);
                *slot = Some(Arc::clone(&stores));
                stores
            }
            Err(e) => {
                warn!(
                    url = self.client.url(),
                    error = %e,
                    "tenant directory fetch failed; serving empty store list"
                );
                Arc::new(Vec::new())
            }
        }
    }

    /// Clears the cache; the next [`fetch_all`](Self::fetch_all) refetches.
    pub async fn invalidate(&self) {
        *self.stores.lock().await = None;
    }

    /// Whether a successful fetch has populated the cache.
    pub async fn is_populated(&self) -> bool {
        self.stores.lock().await.is_some()
    }
}
