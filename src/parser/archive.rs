//! In-memory view of a trace archive.
//!
//! The whole zip container is decompressed once. Members keep their
//! directory order so event logs concatenate deterministically, and
//! resources are looked up by content hash on demand.

use crate::utils::config::RESOURCE_PREFIX;
use crate::utils::error::ParseError;
use log::debug;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::Path;

/// A single decompressed archive member
#[derive(Debug, Clone)]
pub struct ArchiveMember {
    pub name: String,
    pub data: Vec<u8>,
}

/// Decompressed trace archive
#[derive(Debug, Clone, Default)]
pub struct TraceArchive {
    members: Vec<ArchiveMember>,
    by_name: HashMap<String, usize>,
}

impl TraceArchive {
    /// Read and decompress an archive from disk
    ///
    /// **Public** - main entry point for file-based traces
    ///
    /// # Errors
    /// * `ParseError::Io` - File cannot be read
    /// * `ParseError::Archive` - Bytes are not a readable zip container
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ParseError> {
        let path = path.as_ref();
        debug!("Opening trace archive: {}", path.display());

        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Decompress an archive held in memory
    ///
    /// **Public** - used by `open` and by callers that already hold the bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes))?;
        let mut members = Vec::with_capacity(zip.len());

        for index in 0..zip.len() {
            let mut file = zip.by_index(index)?;
            if file.is_dir() {
                continue;
            }

            let name = file.name().to_string();
            // Sizes declared in the archive headers never size the buffer
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            members.push(ArchiveMember { name, data });
        }

        debug!("Archive holds {} members", members.len());
        Ok(Self::from_members(members))
    }

    /// Build an archive view from already-decompressed members
    ///
    /// **Public** - lets callers assemble traces without a zip container
    pub fn from_members(members: Vec<ArchiveMember>) -> Self {
        let by_name = members
            .iter()
            .enumerate()
            .map(|(index, member)| (member.name.clone(), index))
            .collect();

        Self { members, by_name }
    }

    /// Members whose name ends with `suffix`, in archive order
    pub fn members_with_suffix<'a>(
        &'a self,
        suffix: &'a str,
    ) -> impl Iterator<Item = &'a ArchiveMember> + 'a {
        self.members
            .iter()
            .filter(move |member| member.name.ends_with(suffix))
    }

    /// Look up a member by its exact name
    pub fn member(&self, name: &str) -> Option<&[u8]> {
        self.by_name
            .get(name)
            .map(|&index| self.members[index].data.as_slice())
    }

    /// Look up a binary resource by content hash
    pub fn resource(&self, sha1: &str) -> Option<&[u8]> {
        self.member(&format!("{}{}", RESOURCE_PREFIX, sha1))
    }

    pub fn has_resource(&self, sha1: &str) -> bool {
        self.resource(sha1).is_some()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, data: &[u8]) -> ArchiveMember {
        ArchiveMember {
            name: name.to_string(),
            data: data.to_vec(),
        }
    }

    #[test]
    fn test_members_with_suffix_keeps_order() {
        let archive = TraceArchive::from_members(vec![
            member("b.trace", b"2"),
            member("trace.network", b""),
            member("a.trace", b"1"),
        ]);

        let names: Vec<&str> = archive
            .members_with_suffix(".trace")
            .map(|m| m.name.as_str())
            .collect();

        assert_eq!(names, vec!["b.trace", "a.trace"]);
    }

    #[test]
    fn test_resource_lookup() {
        let archive = TraceArchive::from_members(vec![member("resources/abc", b"img")]);

        assert_eq!(archive.resource("abc"), Some(&b"img"[..]));
        assert!(archive.has_resource("abc"));
        assert!(!archive.has_resource("missing"));
    }

    /// Zip holding one stored member whose central directory claims `declared` bytes
    fn zip_with_declared_size(name: &str, data: &[u8], declared: u32) -> Vec<u8> {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file(name, options).unwrap();
        writer.write_all(data).unwrap();
        let mut bytes = writer.finish().unwrap().into_inner();

        let header = bytes
            .windows(4)
            .position(|w| w == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        bytes[header + 24..header + 28].copy_from_slice(&declared.to_le_bytes());
        bytes
    }

    #[test]
    fn test_declared_size_does_not_drive_allocation() {
        let bytes = zip_with_declared_size("a.trace", b"{}", 0xFFFF_FFF0);

        // Either outcome is fine; the call must return rather than abort
        if let Ok(archive) = TraceArchive::from_bytes(&bytes) {
            assert_eq!(archive.member("a.trace"), Some(&b"{}"[..]));
        }
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let result = TraceArchive::from_bytes(b"definitely not a zip");
        assert!(matches!(result, Err(ParseError::Archive(_))));
    }
}
