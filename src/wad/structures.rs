use crate::error::{InspectError, InspectResult};
use crate::info::ArchiveKind;

use super::cursor::ByteCursor;

/// WAD header - 12 bytes at the start of the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadHeader {
    pub kind: ArchiveKind,
    pub lump_count: u32,
    pub directory_offset: u32,
}

impl WadHeader {
    pub const IWAD: &'static [u8; 4] = b"IWAD";
    pub const PWAD: &'static [u8; 4] = b"PWAD";
    pub const SIZE: usize = 12;

    pub fn from_bytes(data: &[u8]) -> InspectResult<Self> {
        if data.len() < Self::SIZE {
            return Err(InspectError::TooSmall);
        }

        let mut cursor = ByteCursor::new(data);
        let signature = cursor.read_bytes::<4>()?;
        let kind = match &signature {
            s if s == Self::IWAD => ArchiveKind::Primary,
            s if s == Self::PWAD => ArchiveKind::Patch,
            other => {
                return Err(InspectError::BadSignature(
                    String::from_utf8_lossy(other).into_owned(),
                ));
            }
        };

        Ok(Self {
            kind,
            lump_count: cursor.read_u32_le()?,
            directory_offset: cursor.read_u32_le()?,
        })
    }

    /// The directory must start after the header and leave room for at
    /// least one record before the end of the file.
    pub fn check_directory(&self, file_len: u64) -> InspectResult<()> {
        let offset = self.directory_offset as u64;
        if offset < Self::SIZE as u64 || offset + LumpEntry::SIZE as u64 > file_len {
            return Err(InspectError::BadDirectoryOffset {
                offset: self.directory_offset,
                len: file_len,
            });
        }
        Ok(())
    }
}

/// One 16-byte directory record. Only the name matters for map discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumpEntry {
    pub name: String,
}

impl LumpEntry {
    pub const SIZE: usize = 16;
    pub const NAME_LEN: usize = 8;

    pub fn read(cursor: &mut ByteCursor<'_>) -> InspectResult<Self> {
        // Lump offset and size
        cursor.skip(8)?;
        Ok(Self {
            name: cursor.read_fixed_ascii(Self::NAME_LEN)?,
        })
    }
}
