//! # wadinfo
//!
//! Inspect DOOM-engine resource archives and report the maps they contain.
//!
//! Two container formats are understood:
//!
//! - WAD files (`IWAD` base data, `PWAD` add-ons): a 12-byte header and a
//!   directory of 16-byte lump records
//! - Packages (PK3 and other ZIP files): maps stored as `maps/<name>.wad`,
//!   UDMF `maps/<name>/textmap` folders, or inside embedded WADs
//!
//! Map identifiers follow either the `ExMy` or the `MAPxx` convention and are
//! reported deduplicated, in a stable, human-friendly order.
//!
//! ## Example
//!
//! ```no_run
//! let info = wadinfo::parse("doom2.wad");
//! if info.is_valid() {
//!     println!("{} ({})", info.summary(), info.map_list_summary());
//! } else {
//!     eprintln!("{}", info.error_message());
//! }
//! ```

pub mod cache;
pub mod cli;
pub mod error;
pub mod info;
pub mod inspect;
pub mod io;
pub mod maps;
pub mod package;
pub mod wad;
pub mod zip;

pub use cache::InfoCache;
pub use cli::Cli;
pub use error::{InspectError, InspectResult};
pub use info::{ArchiveInfo, ArchiveKind};
pub use inspect::parse;
pub use io::{LocalFileReader, ReadAt};
pub use maps::{MapList, MapStyle, classify, compare_map_names, is_map_marker};
