#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::write::FileOptions;

/// A WAD with a one-byte lump per name and the directory at the end.
pub fn wad(sig: &[u8; 4], names: &[&str]) -> Vec<u8> {
    let mut lumps = Vec::new();
    let mut directory = Vec::new();
    for name in names {
        let offset = 12 + lumps.len() as u32;
        lumps.push(0xAAu8);
        directory.extend_from_slice(&offset.to_le_bytes());
        directory.extend_from_slice(&1u32.to_le_bytes());
        let mut raw = [0u8; 8];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        directory.extend_from_slice(&raw);
    }

    let mut out = sig.to_vec();
    out.extend_from_slice(&(names.len() as u32).to_le_bytes());
    out.extend_from_slice(&(12 + lumps.len() as u32).to_le_bytes());
    out.extend_from_slice(&lumps);
    out.extend_from_slice(&directory);
    out
}

/// A ZIP archive; every entry is deflated unless its name ends in `.stored`.
pub fn package(files: &[(&str, &[u8])]) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    {
        let mut zw = zip::ZipWriter::new(&mut out);
        for (name, data) in files {
            let method = if name.ends_with(".stored") {
                CompressionMethod::Stored
            } else {
                CompressionMethod::Deflated
            };
            let name = name.trim_end_matches(".stored");
            if name.ends_with('/') {
                zw.add_directory(name, FileOptions::default()).unwrap();
                continue;
            }
            zw.start_file(name, FileOptions::default().compression_method(method))
                .unwrap();
            zw.write_all(data).unwrap();
        }
        zw.finish().unwrap();
    }
    out.into_inner()
}

pub fn write(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
