//! Byte-size-aware LRU cache for decoded images.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use image::DynamicImage;

/// Default cache capacity in decoded bytes (10 MiB).
pub const DEFAULT_CAPACITY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug)]
struct CachedImage {
    image: DynamicImage,
    bytes: usize,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CachedImage>,
    /// Recency order; front is least recently used.
    order: VecDeque<String>,
    total_bytes: usize,
}

impl CacheInner {
    /// Move a key to the most-recently-used position.
    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            let key = self.order.remove(pos).expect("position is valid");
            self.order.push_back(key);
        }
    }
}

/// Shared cache of decoded images, keyed by source URL.
///
/// Size accounting uses each image's decoded in-memory byte size. When the
/// total exceeds the capacity fixed at construction, least-recently-used
/// entries are evicted; `get` refreshes recency. Cloning the cache shares
/// the underlying store, so worker threads can insert while the UI reads.
#[derive(Debug, Clone)]
pub struct ImageCache {
    inner: Arc<Mutex<CacheInner>>,
    capacity_bytes: usize,
}

impl ImageCache {
    /// Create a cache bounded to the given number of decoded bytes.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner::default())),
            capacity_bytes,
        }
    }

    /// Look up an image, refreshing its recency. Never blocks on I/O and
    /// never fails; a missing key is simply `None`.
    pub fn get(&self, key: &str) -> Option<DynamicImage> {
        let mut guard = self.lock();
        if !guard.entries.contains_key(key) {
            return None;
        }
        guard.touch(key);
        guard.entries.get(key).map(|cached| cached.image.clone())
    }

    /// Insert or replace an image, then evict least-recently-used entries
    /// until the total decoded size fits the capacity again. An image larger
    /// than the whole capacity ends up evicting itself.
    pub fn put(&self, key: String, image: DynamicImage) {
        let bytes = decoded_size(&image);
        let mut guard = self.lock();

        if let Some(old) = guard.entries.remove(&key) {
            guard.total_bytes -= old.bytes;
        } else {
            guard.order.push_back(key.clone());
        }
        guard.total_bytes += bytes;
        guard.entries.insert(key.clone(), CachedImage { image, bytes });
        guard.touch(&key);

        while guard.total_bytes > self.capacity_bytes {
            let Some(oldest) = guard.order.pop_front() else {
                break;
            };
            if let Some(evicted) = guard.entries.remove(&oldest) {
                guard.total_bytes -= evicted.bytes;
            }
        }
    }

    /// Check for a key without touching recency.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().entries.contains_key(key)
    }

    /// Evict all entries.
    pub fn clear(&self) {
        let mut guard = self.lock();
        guard.entries.clear();
        guard.order.clear();
        guard.total_bytes = 0;
    }

    /// Number of cached images.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total decoded bytes currently held.
    pub fn total_bytes(&self) -> usize {
        self.lock().total_bytes
    }

    /// The capacity fixed at construction.
    pub const fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY_BYTES)
    }
}

/// Decoded in-memory size of an image, not its encoded transport size.
fn decoded_size(image: &DynamicImage) -> usize {
    image.as_bytes().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// An RGBA test image of `side` x `side` pixels (`side * side * 4` bytes).
    fn test_image(side: u32, fill: u8) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            side,
            side,
            Rgba([fill, fill, fill, 255]),
        ))
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = ImageCache::new(1024);
        assert!(cache.is_empty());
        assert_eq!(cache.total_bytes(), 0);
    }

    #[test]
    fn test_put_then_get_returns_same_image() {
        let cache = ImageCache::new(1024);
        let img = test_image(4, 7);
        cache.put("http://x/a.png".to_string(), img.clone());
        let got = cache.get("http://x/a.png").expect("cached");
        assert_eq!(got.as_bytes(), img.as_bytes());
    }

    #[test]
    fn test_get_missing_returns_none() {
        let cache = ImageCache::new(1024);
        assert!(cache.get("http://x/missing.png").is_none());
    }

    #[test]
    fn test_byte_accounting() {
        let cache = ImageCache::new(1024);
        cache.put("a".to_string(), test_image(4, 0)); // 64 bytes
        cache.put("b".to_string(), test_image(2, 0)); // 16 bytes
        assert_eq!(cache.total_bytes(), 80);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_replace_updates_byte_accounting() {
        let cache = ImageCache::new(1024);
        cache.put("a".to_string(), test_image(4, 0)); // 64 bytes
        cache.put("a".to_string(), test_image(2, 0)); // 16 bytes
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.total_bytes(), 16);
    }

    #[test]
    fn test_eviction_removes_least_recently_used() {
        // Capacity fits two 64-byte images but not three.
        let cache = ImageCache::new(128);
        cache.put("a".to_string(), test_image(4, 1));
        cache.put("b".to_string(), test_image(4, 2));
        cache.put("c".to_string(), test_image(4, 3));
        assert!(cache.get("a").is_none(), "oldest entry should be evicted");
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert!(cache.total_bytes() <= 128);
    }

    #[test]
    fn test_get_refreshes_recency() {
        let cache = ImageCache::new(128);
        cache.put("a".to_string(), test_image(4, 1));
        cache.put("b".to_string(), test_image(4, 2));
        // Touch "a" so "b" becomes the eviction candidate.
        assert!(cache.get("a").is_some());
        cache.put("c".to_string(), test_image(4, 3));
        assert!(cache.get("a").is_some());
        assert!(cache.get("b").is_none(), "least recently used was b");
    }

    #[test]
    fn test_put_refreshes_recency() {
        let cache = ImageCache::new(128);
        cache.put("a".to_string(), test_image(4, 1));
        cache.put("b".to_string(), test_image(4, 2));
        // Re-inserting "a" makes it most recently used.
        cache.put("a".to_string(), test_image(4, 4));
        cache.put("c".to_string(), test_image(4, 3));
        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
    }

    #[test]
    fn test_oversized_image_evicts_itself() {
        let cache = ImageCache::new(32);
        cache.put("big".to_string(), test_image(4, 1)); // 64 bytes > 32
        assert!(cache.get("big").is_none());
        assert_eq!(cache.total_bytes(), 0);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = ImageCache::new(1024);
        cache.put("a".to_string(), test_image(4, 1));
        cache.put("b".to_string(), test_image(2, 2));
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.total_bytes(), 0);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_concurrent_puts_stay_within_capacity() {
        let cache = ImageCache::new(256); // four 64-byte images
        let mut handles = Vec::new();
        for i in 0..8 {
            let cache = cache.clone();
            handles.push(std::thread::spawn(move || {
                for j in 0..16 {
                    cache.put(format!("img-{i}-{j}"), test_image(4, i));
                    let _ = cache.get(&format!("img-{i}-{j}"));
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker panicked");
        }
        assert!(cache.total_bytes() <= 256);
        assert!(cache.len() <= 4);
    }
}
