use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

use crate::services::providers::PosterProvider;

pub type PosterUrl = String;

/// Memoizing lookup layer over the poster service
///
/// Keys are exact title strings as queried. Each key resolves at most once
/// per process: the first caller triggers the upstream lookup, concurrent
/// callers for the same title coalesce onto that in-flight call, and the
/// settled value (including `None` for errors and "no poster" answers) is
/// terminal. Poster art is cosmetic, so a cached miss is never retried.
///
/// The cache is shared across all concurrently active views; entries are
/// append-only and the map grows for the life of the process.
pub struct PosterCache {
    provider: Arc<dyn PosterProvider>,
    entries: DashMap<String, Arc<OnceCell<Option<PosterUrl>>>>,
}

impl PosterCache {
    pub fn new(provider: Arc<dyn PosterProvider>) -> Self {
        Self {
            provider,
            entries: DashMap::new(),
        }
    }

    /// Resolve a poster URL, consulting the cache first
    ///
    /// Returns `None` when the service has no poster for the title or the
    /// lookup failed; callers fall back to the deterministic gradient. A
    /// caller that goes away before resolution completes simply drops the
    /// future; the shared entry still settles for later callers.
    pub async fn resolve(&self, title: &str) -> Option<PosterUrl> {
        let cell = self
            .entries
            .entry(title.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        cell.get_or_init(|| async {
            match self.provider.lookup_poster(title).await {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!(title = %title, error = %e, "poster lookup failed, caching miss");
                    None
                }
            }
        })
        .await
        .clone()
    }

    /// Inspect an entry without triggering resolution
    ///
    /// `None` means no entry (or still resolving); `Some(None)` is a settled
    /// miss.
    pub fn peek(&self, title: &str) -> Option<Option<PosterUrl>> {
        self.entries
            .get(title)
            .and_then(|cell| cell.get().cloned())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Test hook; production code never evicts.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
