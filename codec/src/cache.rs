//! Caching of resolved layouts keyed by record type.
//!
//! Layouts are immutable once resolved, so a cached [RecordLayout] can be shared freely between
//! threads. Resolution happens outside the lock: if two threads resolve the same record at the
//! same time, the first result inserted wins and the other is discarded.

use crate::{LayoutError, Record, RecordLayout};
use std::{
    any::TypeId,
    collections::HashMap,
    sync::{Arc, OnceLock, PoisonError, RwLock},
};
use tracing::debug;

/// Cache of resolved layouts.
#[derive(Default)]
pub struct LayoutCache {
    layouts: RwLock<HashMap<TypeId, Arc<RecordLayout>>>,
}

impl LayoutCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the layout of `R`, resolving it on first use.
    ///
    /// Resolution failures are returned to the caller and not cached.
    pub fn get<R: Record + 'static>(&self) -> Result<Arc<RecordLayout>, LayoutError> {
        let id = TypeId::of::<R>();
        if let Some(layout) = self
            .layouts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return Ok(layout.clone());
        }

        let resolved = Arc::new(RecordLayout::resolve::<R>()?);
        let mut layouts = self.layouts.write().unwrap_or_else(PoisonError::into_inner);
        let layout = layouts.entry(id).or_insert_with(|| {
            debug!(
                record = resolved.record(),
                fields = resolved.len(),
                size = resolved.size(),
                "resolved layout"
            );
            resolved.clone()
        });
        if !Arc::ptr_eq(layout, &resolved) {
            debug!(record = R::NAME, "discarded redundant layout");
        }
        Ok(layout.clone())
    }

    /// Number of cached layouts.
    pub fn len(&self) -> usize {
        self.layouts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if no layouts are cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all cached layouts.
    pub fn clear(&self) {
        self.layouts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// Process-wide cache used by [crate::RecordExt], initialized on first use.
pub fn global() -> &'static LayoutCache {
    static CACHE: OnceLock<LayoutCache> = OnceLock::new();
    CACHE.get_or_init(LayoutCache::new)
}
