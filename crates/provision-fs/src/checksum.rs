//! SHA-256 checksums for generated files
//!
//! Checksums are rendered as `sha256:<hex>` and let callers tell whether a
//! rewrite actually changed a file on disk.

use crate::{Error, NormalizedPath, Result};
use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// A SHA-256 digest of some content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    /// Digest in-memory content.
    pub fn of_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(format!("{}{:x}", PREFIX, hasher.finalize()))
    }

    /// Digest a file's current contents.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    pub fn of_file(path: &NormalizedPath) -> Result<Option<Self>> {
        let native = path.to_native();
        match std::fs::read(&native) {
            Ok(content) => Ok(Some(Self::of_content(&content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(native, e)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Checksum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_value() {
        let checksum = Checksum::of_content(b"hello world");
        assert_eq!(
            checksum.as_str(),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn missing_file_has_no_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path()).join("absent.json");
        assert_eq!(Checksum::of_file(&path).unwrap(), None);
    }

    #[test]
    fn file_matches_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = NormalizedPath::new(dir.path()).join("settings.json");
        std::fs::write(path.to_native(), "{}\n").unwrap();

        assert_eq!(
            Checksum::of_file(&path).unwrap(),
            Some(Checksum::of_content(b"{}\n"))
        );
    }
}
