//! Content-addressed parse cache.
//!
//! DESIGN
//! ======
//! Parsing a source document is pure, so results are memoized by a SHA-256
//! of the document bytes (plus the header sentinels, which change how rows
//! are read). Entries are inserted if absent and never invalidated; the
//! cache lives as long as the process.
//!
//! TRADE-OFFS
//! ==========
//! The lock is not held while parsing. Two callers racing on the same new
//! document may both parse it; the first insert wins and both get that
//! value back.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use sha2::{Digest, Sha256};

use crate::config::DiagramConfig;
use crate::document::{ParsedDocument, parse_document};
use crate::error::SynopticError;

type Key = [u8; 32];

#[derive(Clone, Default)]
pub struct ParseCache {
    inner: Arc<Mutex<HashMap<Key, Arc<ParsedDocument>>>>,
}

impl ParseCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache.
    #[must_use]
    pub fn global() -> &'static ParseCache {
        static GLOBAL: OnceLock<ParseCache> = OnceLock::new();
        GLOBAL.get_or_init(ParseCache::new)
    }

    /// Return the cached parse of `bytes`, parsing on first sight.
    ///
    /// # Errors
    ///
    /// Propagates [`parse_document`] failures; failures are not cached.
    pub fn get_or_parse(&self, bytes: &[u8], config: &DiagramConfig) -> Result<Arc<ParsedDocument>, SynopticError> {
        let key = cache_key(bytes, config);
        let hit = self.lock().get(&key).cloned();
        if let Some(hit) = hit {
            tracing::debug!(tables = hit.tables.len(), "parse cache hit");
            return Ok(hit);
        }

        let parsed = Arc::new(parse_document(bytes, config)?);
        let mut inner = self.lock();
        let entry = inner.entry(key).or_insert(parsed);
        Ok(Arc::clone(entry))
    }

    /// Read a document from disk and parse it through the cache.
    ///
    /// # Errors
    ///
    /// [`SynopticError::Io`] if the file cannot be read, otherwise as
    /// [`ParseCache::get_or_parse`].
    pub fn load(&self, path: &Path, config: &DiagramConfig) -> Result<Arc<ParsedDocument>, SynopticError> {
        let bytes = std::fs::read(path)?;
        let parsed = self.get_or_parse(&bytes, config)?;
        tracing::info!(path = %path.display(), tables = parsed.tables.len(), "loaded document");
        Ok(parsed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Key, Arc<ParsedDocument>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn cache_key(bytes: &[u8], config: &DiagramConfig) -> Key {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    for sentinel in &config.header_sentinels {
        hasher.update([0u8]);
        hasher.update(sentinel.as_bytes());
    }
    let mut key = [0u8; 32];
    key.copy_from_slice(&hasher.finalize());
    key
}

#[cfg(test)]
#[path = "cache_test.rs"]
mod tests;
