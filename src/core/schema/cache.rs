use super::{AttributeSchema, AttributeSchemaProvider};
use crate::core::error::GateResult;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct CacheEntry {
    fetched_at: Instant,
    schema: AttributeSchema,
}

/// Serves the schema from memory while it is younger than `ttl`.
///
/// Failed fetches are never cached. The lock is held across a refresh so
/// concurrent checks trigger a single fetch.
pub struct CachedSchemaProvider {
    inner: Arc<dyn AttributeSchemaProvider>,
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl CachedSchemaProvider {
    pub fn new(inner: Arc<dyn AttributeSchemaProvider>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Drop the cached schema so the next call fetches again.
    pub fn invalidate(&self) {
        self.entry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl AttributeSchemaProvider for CachedSchemaProvider {
    fn attribute_fields(&self) -> GateResult<AttributeSchema> {
        let mut entry = self.entry.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = entry.as_ref() {
            if cached.fetched_at.elapsed() < self.ttl {
                tracing::debug!(attributes = cached.schema.len(), "attribute schema served from cache");
                return Ok(cached.schema.clone());
            }
        }

        let schema = self.inner.attribute_fields()?;
        *entry = Some(CacheEntry {
            fetched_at: Instant::now(),
            schema: schema.clone(),
        });
        Ok(schema)
    }
}
