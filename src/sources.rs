//! Raw posting records from the external scraper and search collaborators

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One job advertisement as received from an external source. Read-only
/// input; the normalizer decides what survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosting {
    pub title: String,
    pub content: String,
    pub url: String,
    /// Fuller page text, when the source captured it.
    #[serde(default)]
    pub raw_content: Option<String>,
    /// Domain the source attributes the posting to.
    #[serde(default, alias = "source-domain")]
    pub source_domain: Option<String>,
}

/// Load a posting dump written by the scraper or search client.
pub fn load_postings(path: &Path) -> Result<Vec<RawPosting>> {
    let content = std::fs::read_to_string(path)?;
    let postings = serde_json::from_str(&content)?;
    Ok(postings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_deserialize_minimal_posting() {
        let json = r#"{"title": "Python Developer", "content": "Great role", "url": "https://example.com/job/1"}"#;
        let posting: RawPosting = serde_json::from_str(json).unwrap();

        assert_eq!(posting.title, "Python Developer");
        assert!(posting.raw_content.is_none());
        assert!(posting.source_domain.is_none());
    }

    #[test]
    fn test_deserialize_source_domain_alias() {
        let json = r#"{"title": "t", "content": "c", "url": "u", "source-domain": "naukri.com"}"#;
        let posting: RawPosting = serde_json::from_str(json).unwrap();
        assert_eq!(posting.source_domain.as_deref(), Some("naukri.com"));
    }

    #[test]
    fn test_load_postings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "a", "content": "b", "url": "c"}}]"#
        )
        .unwrap();

        let postings = load_postings(file.path()).unwrap();
        assert_eq!(postings.len(), 1);
        assert_eq!(postings[0].title, "a");
    }
}
