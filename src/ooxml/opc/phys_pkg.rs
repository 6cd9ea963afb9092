//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! This module handles the low-level reading of OPC packages from ZIP archives.
//! The central directory is parsed once at open time; each part read works on
//! a cheap clone of the parsed archive so the container stays `&self`.

use crate::common::error::{Error, Result};
use bytes::Bytes;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Largest decompressed part accepted.
const MAX_PART_BYTES: u64 = 1 << 30;

/// Upper bound on the buffer reserved from a declared entry size.
const PREALLOC_LIMIT: u64 = 16 << 20;

/// Read-only handle to an opened zip-based document container.
///
/// Part names are captured once at open time, in archive index order, and
/// every listing preserves that order.
#[derive(Clone)]
pub struct Container {
    /// Parsed archive over the raw bytes
    archive: ZipArchive<Cursor<Bytes>>,
    /// Archive size in bytes
    len: usize,
    /// Member names in archive index order (directories excluded)
    names: Vec<String>,
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("len", &self.len)
            .field("parts", &self.names.len())
            .finish()
    }
}

impl Container {
    /// Open a container from its raw bytes.
    ///
    /// # Errors
    /// Returns [`Error::CorruptArchive`] if the bytes are not a readable ZIP archive.
    pub fn open(bytes: impl Into<Bytes>) -> Result<Self> {
        let data: Bytes = bytes.into();
        let len = data.len();
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| Error::CorruptArchive(e.to_string()))?;

        let mut names = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive
                .by_index(index)
                .map_err(|e| Error::CorruptArchive(format!("entry {}: {}", index, e)))?;
            if entry.is_dir() {
                continue;
            }
            names.push(entry.name().to_string());
        }

        log::debug!("opened container with {} parts", names.len());
        Ok(Self { archive, len, names })
    }

    /// Open a container from a file path.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read, then the same errors as [`Container::open`].
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::open(data)
    }

    /// All part names in archive index order.
    #[inline]
    pub fn part_names(&self) -> &[String] {
        &self.names
    }

    /// Part names filtered by an optional prefix and suffix, in archive index order.
    ///
    /// Suffix matching is ASCII case-insensitive so `.XLSX` matches `.xlsx`.
    pub fn list_parts(&self, prefix: Option<&str>, suffix: Option<&str>) -> Vec<&str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| prefix.is_none_or(|p| name.starts_with(p)))
            .filter(|name| suffix.is_none_or(|s| ends_with_ignore_case(name, s)))
            .collect()
    }

    /// Check whether a part exists.
    ///
    /// A leading `/` (PackURI form) is accepted.
    pub fn contains(&self, name: &str) -> bool {
        let name = name.trim_start_matches('/');
        self.names.iter().any(|n| n == name)
    }

    /// Read and decompress a part.
    ///
    /// # Errors
    /// Returns [`Error::PartNotFound`] when no such part exists, or
    /// [`Error::CorruptArchive`] when its data cannot be decompressed or
    /// inflates past the part size limit.
    pub fn read_part(&self, name: &str) -> Result<Vec<u8>> {
        let name = name.trim_start_matches('/');
        let mut archive = self.archive.clone();
        let entry = archive.by_name(name).map_err(|e| match e {
            zip::result::ZipError::FileNotFound => Error::PartNotFound(name.to_string()),
            other => Error::CorruptArchive(format!("{}: {}", name, other)),
        })?;
        let declared = entry.size();
        read_bounded(name, entry, declared, MAX_PART_BYTES)
    }

    /// Read a part if it exists; `Ok(None)` when absent.
    pub fn read_optional(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match self.read_part(name) {
            Ok(blob) => Ok(Some(blob)),
            Err(Error::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Number of parts in the container.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the container has no parts.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Read at most `limit` bytes; the declared size is only a capacity hint.
fn read_bounded(name: &str, reader: impl Read, declared: u64, limit: u64) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(declared.min(limit).min(PREALLOC_LIMIT) as usize);
    reader
        .take(limit.saturating_add(1))
        .read_to_end(&mut buf)
        .map_err(|e| Error::CorruptArchive(format!("{}: {}", name, e)))?;
    if buf.len() as u64 > limit {
        return Err(Error::CorruptArchive(format!("{}: exceeds {} bytes", name, limit)));
    }
    Ok(buf)
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Build an in-memory ZIP from `(name, content)` pairs, in order.
    pub(crate) fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, content) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_round_trip() {
        let data = build_zip(&[("test.txt", b"Hello, World!")]);
        let container = Container::open(data).unwrap();
        assert_eq!(container.read_part("test.txt").unwrap(), b"Hello, World!");
        assert_eq!(container.read_part("/test.txt").unwrap(), b"Hello, World!");
    }

    #[test]
    fn test_listing_preserves_archive_order() {
        let data = build_zip(&[
            ("[Content_Types].xml", b"<Types/>"),
            ("word/embeddings/b.xlsx", b"b"),
            ("word/document.xml", b"<doc/>"),
            ("word/embeddings/a.XLSX", b"a"),
            ("word/embeddings/c.bin", b"c"),
        ]);
        let container = Container::open(data).unwrap();

        assert_eq!(container.len(), 5);
        assert_eq!(
            container.list_parts(Some("word/embeddings/"), Some(".xlsx")),
            vec!["word/embeddings/b.xlsx", "word/embeddings/a.XLSX"]
        );
        assert_eq!(container.list_parts(None, None).len(), 5);
        assert!(container.contains("/word/document.xml"));
        assert!(!container.contains("word/missing.xml"));
    }

    #[test]
    fn test_missing_part() {
        let container = Container::open(build_zip(&[("a.xml", b"<a/>")])).unwrap();
        assert!(matches!(container.read_part("b.xml"), Err(Error::PartNotFound(_))));
        assert!(container.read_optional("b.xml").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_archive() {
        let result = Container::open(b"definitely not a zip".to_vec());
        assert!(matches!(result, Err(Error::CorruptArchive(_))));
    }

    /// A stored, empty `word/document.xml` whose central directory entry
    /// declares a zip64 uncompressed size of 2^62 bytes.
    fn oversized_zip64_entry() -> Vec<u8> {
        let name = b"word/document.xml";
        let mut out = Vec::new();

        // Local file header
        out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&[0, 0, 0, 0, 0, 0]); // flags, method, time
        out.extend_from_slice(&0x0021u16.to_le_bytes());
        out.extend_from_slice(&[0; 12]); // crc, sizes
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out.extend_from_slice(name);

        // Central directory
        let cd_offset = out.len() as u32;
        out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&45u16.to_le_bytes());
        out.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        out.extend_from_slice(&0x0021u16.to_le_bytes());
        out.extend_from_slice(&[0; 8]); // crc, compressed size
        out.extend_from_slice(&u32::MAX.to_le_bytes());
        out.extend_from_slice(&(name.len() as u16).to_le_bytes());
        out.extend_from_slice(&12u16.to_le_bytes());
        out.extend_from_slice(&[0; 10]); // comment, disk, attributes
        out.extend_from_slice(&0u32.to_le_bytes());
        out.extend_from_slice(name);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&8u16.to_le_bytes());
        out.extend_from_slice(&(1u64 << 62).to_le_bytes());
        let cd_size = out.len() as u32 - cd_offset;

        // End of central directory
        out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&cd_size.to_le_bytes());
        out.extend_from_slice(&cd_offset.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out
    }

    #[test]
    fn test_declared_size_is_not_trusted() {
        let result = Container::open(oversized_zip64_entry())
            .and_then(|container| container.read_part("word/document.xml"));
        assert!(
            matches!(result, Ok(ref data) if data.is_empty()) || matches!(result, Err(Error::CorruptArchive(_))),
            "{:?}",
            result
        );
    }

    #[test]
    fn test_read_bounded() {
        let data = read_bounded("a.xml", &b"<a/>"[..], 1 << 62, 16).unwrap();
        assert_eq!(data, b"<a/>");

        let result = read_bounded("a.xml", &[b'x'; 32][..], 4, 16);
        assert!(matches!(result, Err(Error::CorruptArchive(_))));
    }

    #[test]
    fn test_repeated_reads_share_archive() {
        let container = Container::open(build_zip(&[("a.xml", b"<a/>"), ("b.xml", b"<b/>")])).unwrap();
        let copy = container.clone();
        for _ in 0..3 {
            assert_eq!(container.read_part("b.xml").unwrap(), b"<b/>");
            assert_eq!(copy.read_part("a.xml").unwrap(), b"<a/>");
        }
    }
}
