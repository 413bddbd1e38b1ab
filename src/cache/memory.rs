//! Bounded in-memory tier.
//!
//! A small LRU map from fingerprint to decoded bitmap. Eviction is purely
//! capacity-driven; the disk tier below it is the durable copy.

use std::collections::VecDeque;
use std::sync::Arc;

use image::RgbaImage;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::fingerprint::Fingerprint;

/// Default number of decoded cards kept in memory.
pub const DEFAULT_CAPACITY: usize = 32;

/// Thread-safe LRU cache of composed images.
pub struct MemoryCache {
    inner: Mutex<Inner>,
    capacity: usize,
}

struct Inner {
    map: FxHashMap<Fingerprint, Arc<RgbaImage>>,
    order: VecDeque<Fingerprint>,
}

impl MemoryCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                map: FxHashMap::default(),
                order: VecDeque::new(),
            }),
            capacity: capacity.max(1),
        }
    }

    /// Look up a fingerprint, marking it most-recently-used on a hit.
    pub fn get(&self, key: &Fingerprint) -> Option<Arc<RgbaImage>> {
        let mut inner = self.inner.lock();
        let image = inner.map.get(key).cloned()?;
        touch(&mut inner.order, key);
        Some(image)
    }

    /// Insert an image, evicting the least-recently-used entry past
    /// capacity.
    pub fn insert(&self, key: Fingerprint, image: Arc<RgbaImage>) {
        let mut inner = self.inner.lock();
        if inner.map.insert(key, image).is_none() {
            inner.order.push_back(key);
        } else {
            touch(&mut inner.order, &key);
        }
        while inner.map.len() > self.capacity {
            let Some(evicted) = inner.order.pop_front() else {
                break;
            };
            inner.map.remove(&evicted);
        }
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.map.clear();
        inner.order.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Move `key` to the most-recently-used end.
fn touch(order: &mut VecDeque<Fingerprint>, key: &Fingerprint) {
    if let Some(pos) = order.iter().position(|k| k == key) {
        order.remove(pos);
        order.push_back(*key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> Fingerprint {
        Fingerprint::new([byte; 32])
    }

    fn img() -> Arc<RgbaImage> {
        Arc::new(RgbaImage::new(1, 1))
    }

    #[test]
    fn get_after_insert_hits() {
        let cache = MemoryCache::new(4);
        cache.insert(key(1), img());
        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_none());
    }

    #[test]
    fn capacity_is_never_exceeded() {
        let cache = MemoryCache::new(2);
        for byte in 0..10 {
            cache.insert(key(byte), img());
            assert!(cache.len() <= 2);
        }
    }

    #[test]
    fn recently_used_entries_survive_eviction() {
        let cache = MemoryCache::new(2);
        cache.insert(key(1), img());
        cache.insert(key(2), img());
        // Touch 1 so 2 becomes the eviction candidate.
        cache.get(&key(1));
        cache.insert(key(3), img());

        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_none());
        assert!(cache.get(&key(3)).is_some());
    }

    #[test]
    fn clear_empties_the_tier() {
        let cache = MemoryCache::new(4);
        cache.insert(key(1), img());
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&key(1)).is_none());
    }

    #[test]
    fn reinsert_updates_in_place() {
        let cache = MemoryCache::new(2);
        cache.insert(key(1), img());
        cache.insert(key(1), Arc::new(RgbaImage::new(2, 2)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key(1)).unwrap().width(), 2);
    }
}
