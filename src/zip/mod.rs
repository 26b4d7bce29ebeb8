//! ZIP archive parsing.
//!
//! Package archives (PK3) are plain ZIP files. This module reads just
//! enough of the format to list entries and load small payloads:
//!
//! - [`structures`]: EOCD, ZIP64 and header layouts
//! - [`parser`]: Central Directory walk over any [`ReadAt`](crate::io::ReadAt) source
//! - [`reader`]: entry payloads, STORED or DEFLATE
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

mod parser;
mod reader;
mod structures;

pub use parser::ZipParser;
pub use reader::ZipReader;
pub use structures::*;

/// First two bytes of every local file header.
pub const ZIP_MAGIC: &[u8; 2] = b"PK";
