use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::debug;

use metalift_common::ExtractedMetadata;

use crate::element::HostPage;
use crate::resolver::FieldResolver;

/// One cached full read. Deleted, never mutated, on invalidation or expiry.
struct CacheEntry {
    value: Arc<ExtractedMetadata>,
    captured_at: Instant,
}

/// Read-through memo over the resolver. Full-tree scans across multiple
/// tiers are the most expensive operation in the pipeline; the TTL plus
/// eager invalidation bounds scan frequency without ever serving stale data
/// after an edit.
pub struct MetadataCache {
    resolver: FieldResolver,
    ttl: Duration,
    entry: Option<CacheEntry>,
}

impl MetadataCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_resolver(FieldResolver::new(), ttl)
    }

    pub fn with_resolver(resolver: FieldResolver, ttl: Duration) -> Self {
        Self {
            resolver,
            ttl,
            entry: None,
        }
    }

    /// Current snapshot, possibly empty-valued if nothing was found. Within
    /// the TTL window this returns the same snapshot instance; otherwise a
    /// fresh scan runs.
    pub fn get(&mut self, page: &dyn HostPage) -> Arc<ExtractedMetadata> {
        self.get_at(page, Instant::now())
    }

    fn get_at(&mut self, page: &dyn HostPage, now: Instant) -> Arc<ExtractedMetadata> {
        if let Some(entry) = &self.entry {
            if now.duration_since(entry.captured_at) < self.ttl {
                debug!("Metadata cache hit");
                return entry.value.clone();
            }
            debug!("Metadata cache entry expired");
            self.entry = None;
        }

        let snapshot = page.snapshot();
        let value = Arc::new(
            self.resolver
                .resolve_all(&snapshot, &page.url(), Utc::now()),
        );
        debug!(
            found_title = value.fields_found.title,
            found_description = value.fields_found.description,
            found_tags = value.fields_found.tags,
            "Metadata scan complete"
        );
        self.entry = Some(CacheEntry {
            value: value.clone(),
            captured_at: now,
        });
        value
    }

    /// Drop the current entry so the next `get()` performs a fresh scan.
    /// Called whenever an edit-type interaction is observed.
    pub fn invalidate(&mut self) {
        if self.entry.take().is_some() {
            debug!("Metadata cache invalidated by edit activity");
        }
    }
}
