//! Entry point: decide what a file is and summarize it.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{InspectError, InspectResult};
use crate::info::{ArchiveInfo, ArchiveKind};
use crate::io::{LocalFileReader, ReadAt};
use crate::package::scan_package;
use crate::wad::WadParser;
use crate::zip::ZIP_MAGIC;

/// Extensions always treated as packages, compared case-insensitively.
pub const PACKAGE_EXTENSIONS: &[&str] = &["pk3", "pk7", "ipk3", "zip"];

/// Returns `true` if the path carries one of [`PACKAGE_EXTENSIONS`].
pub fn has_package_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            PACKAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Inspect a WAD or package file.
///
/// Never fails: every problem, from a missing file to a corrupt directory,
/// comes back as an invalid [`ArchiveInfo`] carrying an error message. The
/// file is only read.
pub fn parse(path: impl AsRef<Path>) -> ArchiveInfo {
    let path = path.as_ref();

    let byte_size = match fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta.len(),
        Ok(_) => return ArchiveInfo::invalid(path, 0, &InspectError::NotFound),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return ArchiveInfo::invalid(path, 0, &InspectError::NotFound);
        }
        Err(e) => return ArchiveInfo::invalid(path, 0, &InspectError::Io(e)),
    };

    match inspect_file(path, byte_size) {
        Ok(info) => info,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "archive rejected");
            ArchiveInfo::invalid(path, byte_size, &err)
        }
    }
}

fn inspect_file(path: &Path, byte_size: u64) -> InspectResult<ArchiveInfo> {
    let reader = LocalFileReader::new(path)?;

    if has_package_extension(path) {
        debug!(path = %path.display(), "package by extension");
        return inspect_package(path, byte_size, &reader);
    }

    let mut magic = [0u8; 2];
    if reader.size() >= magic.len() as u64 {
        reader.read_exact_at(0, &mut magic)?;
        if &magic == ZIP_MAGIC {
            debug!(path = %path.display(), "ZIP signature behind a non-package extension");
            return inspect_package(path, byte_size, &reader);
        }
    }

    match WadParser::new(&reader).scan() {
        Ok(wad) => Ok(ArchiveInfo::valid(
            path,
            byte_size,
            wad.kind,
            wad.lump_count as u64,
            wad.maps,
        )),
        Err(InspectError::BadSignature(signature)) => {
            // Unknown tag: the file may still be a package under another name
            debug!(path = %path.display(), %signature, "not a WAD, trying package");
            inspect_package(path, byte_size, &reader).map_err(|err| match err {
                InspectError::BadPackage(detail) => InspectError::BadPackage(format!(
                    "{detail} (unrecognized archive signature {signature:?})"
                )),
                other => other,
            })
        }
        Err(err) => Err(err),
    }
}

fn inspect_package(
    path: &Path,
    byte_size: u64,
    reader: &LocalFileReader,
) -> InspectResult<ArchiveInfo> {
    let package = scan_package(reader)?;
    Ok(ArchiveInfo::valid(
        path,
        byte_size,
        ArchiveKind::Package,
        package.entry_count,
        package.maps,
    ))
}
