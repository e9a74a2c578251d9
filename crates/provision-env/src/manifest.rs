//! Dependency manifest (`requirements.txt`)

use crate::error::Result;
use provision_fs::{NormalizedPath, io};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];

/// The declared requirement lines of a manifest file.
///
/// The file is handed to pip verbatim; the parsed lines are only used for
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyManifest {
    pub path: NormalizedPath,
    pub requirements: Vec<String>,
}

impl DependencyManifest {
    /// Read the manifest at `path`. Returns `Ok(None)` if the file is absent.
    ///
    /// UTF-8 (with or without BOM) and BOM-marked UTF-16 are decoded; any
    /// invalid sequence is replaced rather than rejected.
    pub fn load(path: &NormalizedPath) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let bytes = io::read_bytes(path)?;
        Ok(Some(Self {
            path: path.clone(),
            requirements: parse_requirements(&decode(&bytes)),
        }))
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}

/// Decode manifest bytes, honouring a leading byte order mark.
fn decode(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        String::from_utf8_lossy(rest).into_owned()
    } else if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
        decode_utf16(rest, u16::from_le_bytes)
    } else if let Some(rest) = bytes.strip_prefix(UTF16BE_BOM) {
        decode_utf16(rest, u16::from_be_bytes)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

/// Requirement lines in order, without blanks and comments.
fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| match line.find(" #") {
            Some(idx) => &line[..idx],
            None => line,
        })
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn utf16(text: &str, bom: &[u8], unit: fn(u16) -> [u8; 2]) -> Vec<u8> {
        let mut bytes = bom.to_vec();
        bytes.extend(text.encode_utf16().flat_map(unit));
        bytes
    }

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let content = "# core\nrequests>=2.28\n\nPyPDF2==3.0.1  # pinned\n  pillow\n";
        assert_eq!(
            parse_requirements(content),
            vec!["requests>=2.28", "PyPDF2==3.0.1", "pillow"]
        );
    }

    #[test]
    fn test_decode_utf8_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"requests\n");
        assert_eq!(parse_requirements(&decode(&bytes)), vec!["requests"]);
    }

    #[test]
    fn test_decode_utf16_le_and_be() {
        let text = "requests\r\npillow\r\n";
        let le = utf16(text, UTF16LE_BOM, u16::to_le_bytes);
        let be = utf16(text, UTF16BE_BOM, u16::to_be_bytes);

        assert_eq!(decode(&le), text);
        assert_eq!(decode(&be), text);
    }

    #[test]
    fn test_decode_invalid_utf8_is_lossy() {
        let requirements = parse_requirements(&decode(b"requests\n\xff\xfeoops\n"));
        assert_eq!(requirements.len(), 2);
        assert_eq!(requirements[0], "requests");
    }

    #[test]
    fn test_load_absent_is_none() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path()).join("requirements.txt");
        assert_eq!(DependencyManifest::load(&path).unwrap(), None);
    }

    #[test]
    fn test_load_present() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path()).join("requirements.txt");
        std::fs::write(path.to_native(), "requests\npython-docx\n").unwrap();

        let manifest = DependencyManifest::load(&path).unwrap().unwrap();
        assert_eq!(manifest.len(), 2);
        assert!(!manifest.is_empty());
    }
}
