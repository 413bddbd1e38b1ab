//! Disk tier: one `<fingerprint>.png` per entry, atomic replacement writes.
//!
//! The directory is created lazily on first write. Existence is determined
//! by filename lookup; there is no index file, and entries are never
//! expired by this crate.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use image::RgbaImage;

use crate::compose::png_bytes;
use crate::fingerprint::Fingerprint;

/// Sequence for unique temp filenames within the process.
static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// PNG-per-fingerprint disk cache.
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the entry for `key`.
    pub fn entry_path(&self, key: &Fingerprint) -> PathBuf {
        self.dir.join(format!("{}.png", key.to_hex()))
    }

    /// Read and decode an entry. Any read or decode failure is a miss.
    pub fn read(&self, key: &Fingerprint) -> Option<RgbaImage> {
        let bytes = fs::read(self.entry_path(key)).ok()?;
        image::load_from_memory(&bytes).ok().map(|img| img.to_rgba8())
    }

    /// Encode and persist an entry via temp file + rename, so readers never
    /// observe a partial file under the final name.
    pub fn write(&self, key: &Fingerprint, image: &RgbaImage) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let bytes = png_bytes(image).map_err(io::Error::other)?;
        let seq = TMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let tmp = self.dir.join(format!("{}.{seq}.tmp", key.to_hex()));

        fs::write(&tmp, &bytes)?;
        match fs::rename(&tmp, self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e)
            }
        }
    }

    /// Whether an entry exists under its final name.
    pub fn contains(&self, key: &Fingerprint) -> bool {
        self.entry_path(key).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    fn key(byte: u8) -> Fingerprint {
        Fingerprint::new([byte; 32])
    }

    #[test]
    fn write_then_read_roundtrips() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path());
        let img = RgbaImage::from_pixel(3, 2, Rgba([9, 8, 7, 255]));

        cache.write(&key(1), &img).unwrap();
        let restored = cache.read(&key(1)).unwrap();
        assert_eq!(restored.dimensions(), (3, 2));
        assert_eq!(restored.as_raw(), img.as_raw());
    }

    #[test]
    fn missing_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path());
        assert!(cache.read(&key(1)).is_none());
        assert!(!cache.contains(&key(1)));
    }

    #[test]
    fn corrupt_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(cache.entry_path(&key(1)), b"definitely not a png").unwrap();
        assert!(cache.read(&key(1)).is_none());
    }

    #[test]
    fn directory_is_created_lazily() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/cache");
        let cache = DiskCache::new(&nested);
        assert!(!nested.exists());

        cache
            .write(&key(2), &RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])))
            .unwrap();
        assert!(nested.exists());
        assert!(cache.contains(&key(2)));
    }

    #[test]
    fn no_temp_files_survive_a_write() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::new(dir.path());
        cache
            .write(&key(3), &RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255])))
            .unwrap();

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
