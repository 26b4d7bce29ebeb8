//! WAD (flat archive) parser.
//!
//! A WAD file is a 12-byte header followed by lump data and a directory of
//! fixed 16-byte records, usually at the end of the file:
//!
//! ```text
//! [IWAD|PWAD][lump count u32][directory offset u32] ... [offset u32][size u32][name 8]*
//! ```
//!
//! Only the header and the directory are read; lump payloads are never
//! touched.

use tracing::trace;

use crate::error::{InspectError, InspectResult};
use crate::info::ArchiveKind;
use crate::io::ReadAt;
use crate::maps::{MapList, is_map_marker};

use super::cursor::ByteCursor;
use super::structures::{LumpEntry, WadHeader};

/// What a WAD contributes to an [`ArchiveInfo`](crate::ArchiveInfo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadSummary {
    pub kind: ArchiveKind,
    pub lump_count: u32,
    /// Deduplicated, in canonical map order.
    pub maps: Vec<String>,
}

/// WAD parser over any random-access source.
pub struct WadParser<'a, R: ReadAt + ?Sized> {
    reader: &'a R,
    size: u64,
}

impl<'a, R: ReadAt + ?Sized> WadParser<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        let size = reader.size();
        Self { reader, size }
    }

    /// Read and validate the 12-byte header.
    ///
    /// # Errors
    ///
    /// [`TooSmall`](InspectError::TooSmall) for sources shorter than a
    /// header, [`BadSignature`](InspectError::BadSignature) when the
    /// tag is neither `IWAD` nor `PWAD`.
    pub fn read_header(&self) -> InspectResult<WadHeader> {
        if self.size < WadHeader::SIZE as u64 {
            return Err(InspectError::TooSmall);
        }
        let mut buf = [0u8; WadHeader::SIZE];
        self.reader.read_exact_at(0, &mut buf)?;
        WadHeader::from_bytes(&buf)
    }

    /// Read the directory records the header announces.
    ///
    /// A directory cut short by the end of the file yields only the records
    /// that fit.
    pub fn read_directory(&self, header: &WadHeader) -> InspectResult<Vec<LumpEntry>> {
        header.check_directory(self.size)?;

        let offset = header.directory_offset as u64;
        let fits = (self.size - offset) / LumpEntry::SIZE as u64;
        let count = fits.min(header.lump_count as u64) as usize;
        if count < header.lump_count as usize {
            trace!(
                declared = header.lump_count,
                readable = count,
                "WAD directory is truncated"
            );
        }

        let mut data = vec![0u8; count * LumpEntry::SIZE];
        self.reader.read_exact_at(offset, &mut data)?;

        let mut cursor = ByteCursor::new(&data);
        let mut entries = Vec::with_capacity(count);
        while cursor.remaining_bytes() >= LumpEntry::SIZE {
            entries.push(LumpEntry::read(&mut cursor)?);
        }
        Ok(entries)
    }

    /// Map markers found in the directory, deduplicated and sorted.
    pub fn map_names(&self, header: &WadHeader) -> InspectResult<Vec<String>> {
        let mut maps = MapList::new();
        for entry in self.read_directory(header)? {
            if is_map_marker(&entry.name) && maps.insert(&entry.name) {
                trace!(map = %entry.name, "found map marker");
            }
        }
        Ok(maps.into_sorted())
    }

    /// Parse the header and directory into a summary.
    pub fn scan(&self) -> InspectResult<WadSummary> {
        let header = self.read_header()?;
        let maps = self.map_names(&header)?;
        Ok(WadSummary {
            kind: header.kind,
            lump_count: header.lump_count,
            maps,
        })
    }
}

/// Parse a WAD held entirely in memory.
pub fn parse_flat(bytes: &[u8]) -> InspectResult<WadSummary> {
    WadParser::new(bytes).scan()
}

/// Map names of a WAD embedded in another archive.
///
/// Same checks as [`parse_flat`]; only the map list is kept.
pub fn scan_embedded(bytes: &[u8]) -> InspectResult<Vec<String>> {
    parse_flat(bytes).map(|summary| summary.maps)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a WAD with empty lumps and the directory right after the header.
    fn wad(sig: &[u8; 4], names: &[&str]) -> Vec<u8> {
        let mut v = sig.to_vec();
        v.extend_from_slice(&(names.len() as u32).to_le_bytes());
        v.extend_from_slice(&12u32.to_le_bytes());
        for name in names {
            v.extend_from_slice(&12u32.to_le_bytes());
            v.extend_from_slice(&0u32.to_le_bytes());
            let mut raw = [0u8; 8];
            raw[..name.len()].copy_from_slice(name.as_bytes());
            v.extend_from_slice(&raw);
        }
        v
    }

    #[test]
    fn collects_sorted_maps() {
        let data = wad(
            b"IWAD",
            &["PLAYPAL", "E2M1", "THINGS", "E1M2", "LINEDEFS", "E1M1"],
        );
        let summary = parse_flat(&data).unwrap();
        assert_eq!(summary.kind, ArchiveKind::Primary);
        assert_eq!(summary.lump_count, 6);
        assert_eq!(summary.maps, vec!["E1M1", "E1M2", "E2M1"]);
    }

    #[test]
    fn lowercase_lump_names_are_normalized() {
        let data = wad(b"PWAD", &["map02", "MAP01"]);
        assert_eq!(parse_flat(&data).unwrap().maps, vec!["MAP01", "MAP02"]);
    }

    #[test]
    fn bytes_after_a_nul_do_not_hide_a_map() {
        let data = wad(b"PWAD", &["E1M1\0ABC", "MAP01\0XY"]);
        assert_eq!(parse_flat(&data).unwrap().maps, vec!["E1M1", "MAP01"]);
    }

    #[test]
    fn repeated_markers_are_merged() {
        let data = wad(b"PWAD", &["MAP01", "THINGS", "MAP01"]);
        assert_eq!(parse_flat(&data).unwrap().maps, vec!["MAP01"]);
    }

    #[test]
    fn too_small() {
        for len in 0..WadHeader::SIZE {
            let data = vec![b'P'; len];
            assert!(matches!(parse_flat(&data), Err(InspectError::TooSmall)));
        }
    }

    #[test]
    fn truncated_directory_stops_early() {
        let mut data = wad(b"PWAD", &["MAP01", "MAP02", "MAP03"]);
        // Drop half of the last record.
        data.truncate(data.len() - 8);
        let summary = parse_flat(&data).unwrap();
        assert_eq!(summary.lump_count, 3);
        assert_eq!(summary.maps, vec!["MAP01", "MAP02"]);
    }

    #[test]
    fn oversized_lump_count_is_harmless() {
        let mut data = wad(b"PWAD", &["MAP07"]);
        data[4..8].copy_from_slice(&u32::MAX.to_le_bytes());
        let summary = parse_flat(&data).unwrap();
        assert_eq!(summary.lump_count, u32::MAX);
        assert_eq!(summary.maps, vec!["MAP07"]);
    }

    #[test]
    fn directory_offset_at_last_byte_is_rejected() {
        let mut data = wad(b"PWAD", &["MAP01"]);
        let last = (data.len() - 1) as u32;
        data[8..12].copy_from_slice(&last.to_le_bytes());
        assert!(matches!(
            parse_flat(&data),
            Err(InspectError::BadDirectoryOffset { .. })
        ));
    }

    #[test]
    fn directory_inside_header_is_rejected() {
        let mut data = wad(b"PWAD", &["MAP01"]);
        data[8..12].copy_from_slice(&4u32.to_le_bytes());
        assert!(matches!(
            parse_flat(&data),
            Err(InspectError::BadDirectoryOffset { offset: 4, .. })
        ));
    }

    #[test]
    fn zip_magic_is_a_bad_signature() {
        let mut data = wad(b"PWAD", &[]);
        data[..4].copy_from_slice(b"PK\x03\x04");
        assert!(matches!(
            parse_flat(&data),
            Err(InspectError::BadSignature(_))
        ));
    }

    #[test]
    fn embedded_scan_returns_only_maps() {
        let data = wad(b"PWAD", &["MAP03", "DEHACKED", "MAP01"]);
        assert_eq!(scan_embedded(&data).unwrap(), vec!["MAP01", "MAP03"]);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn short_input_is_too_small(data in proptest::collection::vec(any::<u8>(), 0..12)) {
                prop_assert!(matches!(parse_flat(&data), Err(InspectError::TooSmall)));
            }

            #[test]
            fn arbitrary_input_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
                let _ = parse_flat(&data);
            }

            #[test]
            fn order_of_directory_does_not_matter(
                names in proptest::collection::vec("(E[1-4]M[1-9]|MAP[0-3][0-9]|THINGS|SECTORS)", 1..20)
            ) {
                let refs: Vec<&str> = names.iter().map(String::as_str).collect();
                let forward = parse_flat(&wad(b"PWAD", &refs)).unwrap().maps;
                let reversed: Vec<&str> = refs.iter().rev().copied().collect();
                let backward = parse_flat(&wad(b"PWAD", &reversed)).unwrap().maps;
                prop_assert_eq!(forward, backward);
            }
        }
    }
}
