//! Package (PK3) scanning.
//!
//! Ports look for maps inside a package in three places:
//!
//! - `maps/<name>.wad`: a WAD holding one binary map
//! - `maps/<name>/textmap`: a UDMF text map
//! - any other `*.wad`: an embedded WAD, scanned for map markers
//!
//! Paths are matched case-insensitively. A broken embedded WAD only means no
//! maps are found in it; it never fails the package.

use tracing::{debug, trace};

use crate::error::{InspectError, InspectResult};
use crate::io::ReadAt;
use crate::maps::{MapList, is_map_marker};
use crate::wad::{WAD_EXTENSION, scan_embedded};
use crate::zip::{ZipFileEntry, ZipReader};

/// Largest embedded WAD loaded into memory for scanning.
pub const MAX_EMBEDDED_SIZE: u64 = 256 * 1024 * 1024;

const MAPS_DIR: &str = "MAPS/";
const UDMF_LEAF: &str = "TEXTMAP";

/// What a package contributes to an [`ArchiveInfo`](crate::ArchiveInfo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSummary {
    pub entry_count: u64,
    /// Deduplicated, in canonical map order.
    pub maps: Vec<String>,
}

/// How a package entry can reveal a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EntryRole {
    /// `maps/<name>.wad`, with the uppercased stem
    MapWad(String),
    /// `maps/<name>/.../textmap`, with the uppercased folder name
    Udmf(String),
    /// A WAD anywhere else
    EmbeddedWad,
    Other,
}

/// Sort an entry path into one of the [`EntryRole`]s, first match wins.
pub(crate) fn classify_entry(entry: &ZipFileEntry) -> EntryRole {
    let path = entry.file_name.replace('\\', "/").to_ascii_uppercase();
    let leaf = entry.leaf_name().to_ascii_uppercase();
    let wad_suffix = format!(".{}", WAD_EXTENSION.to_ascii_uppercase());
    let is_wad = !entry.is_directory && leaf.ends_with(&wad_suffix);

    if path.starts_with(MAPS_DIR) && is_wad {
        return EntryRole::MapWad(leaf[..leaf.len() - wad_suffix.len()].to_string());
    }

    if path.starts_with(MAPS_DIR) && path.ends_with(&format!("/{UDMF_LEAF}")) {
        let folder = path[MAPS_DIR.len()..].split('/').next().unwrap_or_default();
        return EntryRole::Udmf(folder.to_string());
    }

    if is_wad {
        return EntryRole::EmbeddedWad;
    }

    EntryRole::Other
}

/// Walk a package's entries and collect the maps it provides.
///
/// # Errors
///
/// [`InspectError::BadPackage`] if the ZIP structure cannot be read.
/// Problems inside individual entries are logged and skipped.
pub fn scan_package<R: ReadAt + ?Sized>(reader: &R) -> InspectResult<PackageSummary> {
    let zip = ZipReader::new(reader);
    let entries = zip
        .list_files()
        .map_err(|e| InspectError::BadPackage(format!("{e:#}")))?;

    let mut maps = MapList::new();
    for entry in &entries {
        match classify_entry(entry) {
            EntryRole::MapWad(name) | EntryRole::Udmf(name) => {
                if is_map_marker(&name) && maps.insert(&name) {
                    trace!(map = %name, entry = %entry.file_name, "found map");
                }
            }
            EntryRole::EmbeddedWad => match read_embedded(&zip, entry) {
                Ok(found) => {
                    trace!(entry = %entry.file_name, maps = found.len(), "scanned embedded WAD");
                    maps.extend(found);
                }
                Err(e) => {
                    debug!(entry = %entry.file_name, error = %e, "skipping unreadable embedded WAD");
                }
            },
            EntryRole::Other => {}
        }
    }

    Ok(PackageSummary {
        entry_count: entries.len() as u64,
        maps: maps.into_sorted(),
    })
}

fn read_embedded<R: ReadAt + ?Sized>(
    zip: &ZipReader<'_, R>,
    entry: &ZipFileEntry,
) -> anyhow::Result<Vec<String>> {
    let data = zip.read_to_vec(entry, MAX_EMBEDDED_SIZE)?;
    Ok(scan_embedded(&data)?)
}
