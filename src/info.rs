use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::InspectError;

/// What kind of resource archive a file turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArchiveKind {
    /// `IWAD`: complete base game data
    #[serde(rename = "IWAD")]
    Primary,
    /// `PWAD`: add-on data loaded on top of an IWAD
    #[serde(rename = "PWAD")]
    Patch,
    /// ZIP-based package (PK3 and friends)
    #[serde(rename = "PK3")]
    Package,
    Unknown,
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ArchiveKind::Primary => "IWAD",
            ArchiveKind::Patch => "PWAD",
            ArchiveKind::Package => "PK3",
            ArchiveKind::Unknown => "Unknown",
        })
    }
}

/// Summary of one archive, produced by [`parse`](crate::parse).
///
/// Values are never updated after construction. Parsing the same path again
/// yields a new `ArchiveInfo`.
///
/// For a valid archive `map_names` is deduplicated and in canonical order
/// (see [`compare_map_names`](crate::compare_map_names)). For an invalid one
/// it is empty and `error_message` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveInfo {
    path: PathBuf,
    archive_kind: ArchiveKind,
    byte_size: u64,
    entry_count: u64,
    map_names: Vec<String>,
    is_valid: bool,
    error_message: String,
}

impl ArchiveInfo {
    pub(crate) fn valid(
        path: &Path,
        byte_size: u64,
        archive_kind: ArchiveKind,
        entry_count: u64,
        map_names: Vec<String>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            archive_kind,
            byte_size,
            entry_count,
            map_names,
            is_valid: true,
            error_message: String::new(),
        }
    }

    pub(crate) fn invalid(path: &Path, byte_size: u64, error: &InspectError) -> Self {
        Self {
            path: path.to_path_buf(),
            archive_kind: ArchiveKind::Unknown,
            byte_size,
            entry_count: 0,
            map_names: Vec::new(),
            is_valid: false,
            error_message: error.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn archive_kind(&self) -> ArchiveKind {
        self.archive_kind
    }

    pub fn byte_size(&self) -> u64 {
        self.byte_size
    }

    /// Directory entries for a WAD, container entries for a package.
    pub fn entry_count(&self) -> u64 {
        self.entry_count
    }

    pub fn map_names(&self) -> &[String] {
        &self.map_names
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Empty for valid archives.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn map_count(&self) -> usize {
        self.map_names.len()
    }

    /// Size in B, KB or MB with one decimal place.
    pub fn size_display(&self) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;

        if self.byte_size < KB {
            format!("{} B", self.byte_size)
        } else if self.byte_size < MB {
            format!("{:.1} KB", self.byte_size as f64 / KB as f64)
        } else {
            format!("{:.1} MB", self.byte_size as f64 / MB as f64)
        }
    }

    /// One-line description, or the error message for invalid archives.
    ///
    /// ```text
    /// PWAD | 1.2 MB | 32 maps
    /// ```
    pub fn summary(&self) -> String {
        if !self.is_valid {
            return self.error_message.clone();
        }
        let maps = match self.map_count() {
            0 => "No maps".to_string(),
            1 => "1 map".to_string(),
            n => format!("{n} maps"),
        };
        format!("{} | {} | {}", self.archive_kind, self.size_display(), maps)
    }

    /// The first five map names, then a count of the rest.
    pub fn map_list_summary(&self) -> String {
        const SHOWN: usize = 5;

        if self.map_names.len() <= SHOWN {
            return self.map_names.join(", ");
        }
        format!(
            "{} (+{} more)",
            self.map_names[..SHOWN].join(", "),
            self.map_names.len() - SHOWN
        )
    }
}
