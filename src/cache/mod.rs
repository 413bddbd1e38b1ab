//! Two-tier image cache keyed by payload fingerprint.
//!
//! Lookup order is memory, then disk, then composition. Freshly composed
//! images are inserted into the memory tier immediately and persisted to
//! the disk tier by a write-behind queue; persistence failures never
//! surface to the caller. Duplicate concurrent composition for the same
//! fingerprint is tolerated: compositions are pure functions of the
//! payload and converge to equivalent bytes.

mod disk;
mod memory;
mod worker;

pub use memory::DEFAULT_CAPACITY;
pub use worker::RequestSlot;

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use image::RgbaImage;

use crate::compose::compose_image;
use crate::fingerprint::{Fingerprint, fingerprint};
use crate::layout::{DEFAULT_SCALE, resolve_scale};
use crate::payload::SharePayload;
use disk::DiskCache;
use memory::MemoryCache;
use worker::Worker;

/// Cache directory name for the process-wide instance.
const CACHE_DIR: &str = "sharekit/share-cache";

/// Two-tier (memory + disk) cache of composed share cards.
///
/// Cheap to clone; clones share the same tiers and workers.
#[derive(Clone)]
pub struct ShareImageCache {
    inner: Arc<CacheInner>,
}

struct CacheInner {
    memory: MemoryCache,
    disk: DiskCache,
    compose_worker: Worker,
    disk_worker: Worker,
    scale: f32,
}

impl ShareImageCache {
    /// Cache rooted at `dir` with default capacity and density.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_capacity(dir, DEFAULT_CAPACITY)
    }

    /// Cache with an explicit memory-tier capacity.
    pub fn with_capacity(dir: impl Into<PathBuf>, capacity: usize) -> Self {
        Self::with_settings(dir, capacity, DEFAULT_SCALE)
    }

    /// Cache with explicit capacity and composition density. Non-positive
    /// `scale` falls back to the default.
    pub fn with_settings(dir: impl Into<PathBuf>, capacity: usize, scale: f32) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                memory: MemoryCache::new(capacity),
                disk: DiskCache::new(dir),
                compose_worker: Worker::spawn("sharekit-compose"),
                disk_worker: Worker::spawn("sharekit-disk"),
                scale: resolve_scale(scale),
            }),
        }
    }

    /// Directory holding the disk tier.
    pub fn cache_dir(&self) -> &Path {
        self.inner.disk.dir()
    }

    /// Synchronous get-or-compose: returns the cached image, composing and
    /// populating both tiers on a miss.
    pub fn prepared_image(&self, payload: &SharePayload) -> Arc<RgbaImage> {
        let key = fingerprint(payload);
        if let Some(image) = self.inner.lookup(&key) {
            return image;
        }
        let image = Arc::new(compose_image(payload, self.inner.scale));
        CacheInner::store(&self.inner, key, Arc::clone(&image));
        image
    }

    /// Non-blocking lookup: memory, then disk (populating memory on a disk
    /// hit). Never composes.
    pub fn cached_image_if_available(&self, payload: &SharePayload) -> Option<Arc<RgbaImage>> {
        self.inner.lookup(&fingerprint(payload))
    }

    /// Asynchronous get-or-compose on the background worker.
    ///
    /// The callback receives the image only if `slot` has not seen a newer
    /// request by the time the result is ready; stale results are
    /// discarded. A memory-tier hit delivers on the calling thread.
    pub fn prepare_image(
        &self,
        payload: &SharePayload,
        slot: &RequestSlot,
        on_ready: impl FnOnce(Arc<RgbaImage>) + Send + 'static,
    ) {
        let key = fingerprint(payload);
        let ticket = slot.begin();

        if let Some(image) = self.inner.memory.get(&key) {
            if slot.is_current(ticket) {
                on_ready(image);
            }
            return;
        }

        let inner = Arc::clone(&self.inner);
        let payload = payload.clone();
        let slot = slot.clone();
        self.inner.compose_worker.submit(move || {
            let image = match inner.disk.read(&key) {
                Some(decoded) => {
                    let image = Arc::new(decoded);
                    inner.memory.insert(key, Arc::clone(&image));
                    image
                }
                None => {
                    let image = Arc::new(compose_image(&payload, inner.scale));
                    CacheInner::store(&inner, key, Arc::clone(&image));
                    image
                }
            };

            if slot.is_current(ticket) {
                on_ready(image);
            } else {
                crate::debug!("cache"; "discarding stale composition for {key}");
            }
        });
    }

    /// Drop the memory tier, leaving disk entries intact.
    pub fn clear_memory(&self) {
        self.inner.memory.clear();
    }

    /// Block until every queued disk persistence has finished. Intended
    /// for orderly shutdown and tests.
    pub fn flush_disk_writes(&self) {
        self.inner.disk_worker.flush();
    }
}

impl CacheInner {
    /// Memory, then disk. A disk hit repopulates the memory tier.
    fn lookup(&self, key: &Fingerprint) -> Option<Arc<RgbaImage>> {
        if let Some(image) = self.memory.get(key) {
            return Some(image);
        }
        let image = Arc::new(self.disk.read(key)?);
        self.memory.insert(*key, Arc::clone(&image));
        Some(image)
    }

    /// Insert into memory and schedule the write-behind persistence.
    fn store(inner: &Arc<Self>, key: Fingerprint, image: Arc<RgbaImage>) {
        inner.memory.insert(key, Arc::clone(&image));
        let this = Arc::clone(inner);
        inner.disk_worker.submit(move || {
            if let Err(e) = this.disk.write(&key, &image) {
                crate::debug!("cache"; "failed to persist {key}: {e}");
            }
        });
    }
}

static SHARED: LazyLock<ShareImageCache> =
    LazyLock::new(|| ShareImageCache::new(std::env::temp_dir().join(CACHE_DIR)));

/// Process-wide cache instance, created lazily in the OS temp directory.
pub fn shared() -> &'static ShareImageCache {
    &SHARED
}
