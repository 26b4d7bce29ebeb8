//! Flat archive (WAD) support.
//!
//! - [`cursor`]: bounds-checked reads over in-memory directory data
//! - [`structures`]: header and directory record layouts
//! - [`parser`]: header validation and map discovery

mod cursor;
mod parser;
mod structures;

pub use cursor::ByteCursor;
pub use parser::{WadParser, WadSummary, parse_flat, scan_embedded};
pub use structures::{LumpEntry, WadHeader};

/// File extension of WAD files, compared case-insensitively.
pub const WAD_EXTENSION: &str = "wad";
