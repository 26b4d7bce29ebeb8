use flate2::read::DeflateDecoder;
use std::io::Read;

use crate::io::ReadAt;
use anyhow::{Result, bail};

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Reads entries and their payloads out of a ZIP archive.
pub struct ZipReader<'a, R: ReadAt + ?Sized> {
    parser: ZipParser<'a, R>,
}

impl<'a, R: ReadAt + ?Sized> ZipReader<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self {
            parser: ZipParser::new(reader),
        }
    }

    /// List all entries in the archive
    pub fn list_files(&self) -> Result<Vec<ZipFileEntry>> {
        self.parser.list_files()
    }

    /// Read an entry's uncompressed contents into memory.
    ///
    /// Entries whose declared uncompressed size exceeds `limit` are refused
    /// before anything is read; a DEFLATE stream that inflates past the
    /// declared size is an error.
    pub fn read_to_vec(&self, entry: &ZipFileEntry, limit: u64) -> Result<Vec<u8>> {
        if entry.uncompressed_size > limit {
            bail!(
                "{} is too large to load ({} bytes)",
                entry.file_name,
                entry.uncompressed_size
            );
        }

        let data_offset = self.parser.get_data_offset(entry)?;
        let mut raw = vec![0u8; entry.compressed_size as usize];
        self.parser.reader().read_exact_at(data_offset, &mut raw)?;

        match entry.compression_method {
            CompressionMethod::Stored => Ok(raw),
            CompressionMethod::Deflate => {
                // The declared size is only a hint until the stream confirms it
                let capacity = entry
                    .compressed_size
                    .saturating_mul(4)
                    .min(entry.uncompressed_size);
                let mut out = Vec::with_capacity(capacity as usize);
                DeflateDecoder::new(raw.as_slice())
                    .take(entry.uncompressed_size + 1)
                    .read_to_end(&mut out)?;
                if out.len() as u64 != entry.uncompressed_size {
                    bail!(
                        "{} inflated to {} bytes, expected {}",
                        entry.file_name,
                        out.len(),
                        entry.uncompressed_size
                    );
                }
                Ok(out)
            }
            CompressionMethod::Unknown(method) => {
                bail!("Unsupported compression method: {method}")
            }
        }
    }
}
