//! Memoized inspection results keyed by path.
//!
//! Launchers show the same files over and over; this keeps one
//! [`ArchiveInfo`] per path and parses again only when the file changes.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use tracing::trace;

use crate::info::ArchiveInfo;
use crate::inspect::parse;

/// Length and modification time seen when the entry was parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Stamp {
    len: u64,
    modified: Option<SystemTime>,
}

impl Stamp {
    fn of(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        Some(Self {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

struct Entry {
    stamp: Option<Stamp>,
    info: Arc<ArchiveInfo>,
}

/// Thread-safe cache of [`ArchiveInfo`] values.
///
/// A cached value is handed out while the file's length and modification
/// time are unchanged. Otherwise the file is parsed again and the new value
/// replaces the old one; values already handed out are left as they were.
#[derive(Default)]
pub struct InfoCache {
    entries: Mutex<HashMap<PathBuf, Entry>>,
}

impl InfoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached info for `path`, parsing it if needed.
    ///
    /// Parsing happens outside the lock, so two threads asking for the same
    /// new path may both parse it; the last result is kept.
    pub fn get_or_parse(&self, path: impl AsRef<Path>) -> Arc<ArchiveInfo> {
        let path = path.as_ref();
        let stamp = Stamp::of(path);

        if let Some(entry) = self.entries.lock().get(path) {
            if entry.stamp == stamp {
                trace!(path = %path.display(), "archive info cache hit");
                return Arc::clone(&entry.info);
            }
        }

        let info = Arc::new(parse(path));
        self.entries.lock().insert(
            path.to_path_buf(),
            Entry {
                stamp,
                info: Arc::clone(&info),
            },
        );
        info
    }

    /// Drop the cached value for `path`. Returns `true` if one existed.
    pub fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        self.entries.lock().remove(path.as_ref()).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
