//! Whole-file JSON document writer

use crate::error::Result;
use provision_fs::checksum::Checksum;
use provision_fs::{NormalizedPath, io};
use serde::Serialize;

/// A document written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: NormalizedPath,
    pub checksum: Checksum,
    /// False when the new content matched what was already on disk
    pub changed: bool,
}

/// Result of writing an integration's documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Whether the config directory had to be created
    pub created_dir: bool,
    pub files: Vec<WrittenFile>,
}

impl WriteReport {
    pub fn changed_count(&self) -> usize {
        self.files.iter().filter(|f| f.changed).count()
    }
}

/// Serialize `document` as pretty JSON with a trailing newline and
/// overwrite `path` with it. Existing content is never merged.
pub fn write_json<T: Serialize>(path: &NormalizedPath, document: &T) -> Result<WrittenFile> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');

    let checksum = Checksum::of_content(content.as_bytes());
    let previous = Checksum::of_file(path)?;
    io::write_text(path, &content)?;

    let changed = previous.as_ref() != Some(&checksum);
    tracing::debug!(path = %path, %checksum, changed, "wrote editor document");
    Ok(WrittenFile {
        path: path.clone(),
        checksum,
        changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_write_json_pretty_with_newline() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path()).join("doc.json");

        write_json(&path, &json!({"a": 1})).unwrap();

        let content = std::fs::read_to_string(path.to_native()).unwrap();
        assert_eq!(content, "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn test_write_json_reports_change() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path()).join("doc.json");

        let first = write_json(&path, &json!({"a": 1})).unwrap();
        let second = write_json(&path, &json!({"a": 1})).unwrap();
        let third = write_json(&path, &json!({"a": 2})).unwrap();

        assert!(first.changed);
        assert!(!second.changed);
        assert_eq!(first.checksum, second.checksum);
        assert!(third.changed);
    }

    #[test]
    fn test_write_json_replaces_unrelated_content() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path()).join("doc.json");
        std::fs::write(path.to_native(), "{\"user\": true, \"a\": 0}").unwrap();

        write_json(&path, &json!({"a": 1})).unwrap();

        let content = std::fs::read_to_string(path.to_native()).unwrap();
        assert!(!content.contains("user"));
    }
}
