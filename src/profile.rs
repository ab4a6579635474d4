//! Structured resume profile parsing
//!
//! The generation service returns free text that should contain a JSON
//! object. Parsing tolerates Markdown code fences and malformed experience
//! values; only invalid JSON is an error, and it carries the original text
//! so the caller can show it.

use crate::error::{JobFinderError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Skills and total experience extracted from the indexed resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeProfile {
    /// Lower-cased, trimmed, deduplicated, in order of appearance.
    pub skills: Vec<String>,
    pub total_years_experience: u32,
}

/// Parse raw generation output into a profile.
///
/// Expected shape after fence-stripping: `{"skills": [..], "total_years_experience": ..}`.
/// A missing `skills` key yields an empty skill list; the experience value
/// goes through [`coerce_years`].
pub fn parse_profile(raw_text: &str) -> Result<ResumeProfile> {
    let stripped = strip_code_fences(raw_text);
    let value: Value =
        serde_json::from_str(stripped).map_err(|source| JobFinderError::ProfileParse {
            raw: raw_text.to_string(),
            source,
        })?;

    let mut skills = Vec::new();
    if let Some(list) = value.get("skills").and_then(|s| s.as_array()) {
        for entry in list {
            if let Some(s) = entry.as_str() {
                let normalized = s.trim().to_lowercase();
                if !normalized.is_empty() && !skills.contains(&normalized) {
                    skills.push(normalized);
                }
            }
        }
    }

    let total_years_experience = match value.get("total_years_experience") {
        Some(raw) => coerce_years(raw),
        None => {
            warn!("profile response has no total_years_experience, defaulting to 0");
            0
        }
    };

    Ok(ResumeProfile {
        skills,
        total_years_experience,
    })
}

/// Coerce the experience value: numeric parse truncated to an integer,
/// then the first digit run anywhere in the stringified value, then 0.
pub fn coerce_years(raw: &Value) -> u32 {
    if let Some(n) = raw.as_f64() {
        return if n <= 0.0 { 0 } else { n.trunc() as u32 };
    }

    let text = match raw.as_str() {
        Some(s) => s.to_string(),
        None => raw.to_string(),
    };

    if let Ok(n) = text.trim().parse::<f64>() {
        return if n <= 0.0 { 0 } else { n.trunc() as u32 };
    }

    match first_digit_run(&text) {
        Some(n) => n,
        None => {
            warn!("could not coerce experience value {:?}, defaulting to 0", text);
            0
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from generation output.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

fn first_digit_run(text: &str) -> Option<u32> {
    let mut digits = String::new();
    for c in text.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else if !digits.is_empty() {
            break;
        }
    }

    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_json_with_textual_experience() {
        let raw = "```json\n{\"skills\": [\"Python\", \"SQL\"], \"total_years_experience\": \"3.7 years\"}\n```";
        let profile = parse_profile(raw).unwrap();

        assert_eq!(profile.skills, vec!["python", "sql"]);
        assert_eq!(profile.total_years_experience, 3);
    }

    #[test]
    fn test_parse_plain_json() {
        let raw = "{\"skills\": [\" Rust \", \"rust\"], \"total_years_experience\": 5}";
        let profile = parse_profile(raw).unwrap();

        assert_eq!(profile.skills, vec!["rust"]);
        assert_eq!(profile.total_years_experience, 5);
    }

    #[test]
    fn test_parse_missing_keys_defaults() {
        let profile = parse_profile("{}").unwrap();
        assert!(profile.skills.is_empty());
        assert_eq!(profile.total_years_experience, 0);
    }

    #[test]
    fn test_parse_invalid_json_carries_raw_text() {
        let raw = "I could not find a resume in the provided data.";
        let err = parse_profile(raw).unwrap_err();
        match err {
            JobFinderError::ProfileParse { raw: carried, .. } => assert_eq!(carried, raw),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_coerce_years_policy() {
        assert_eq!(coerce_years(&Value::from(4.9)), 4);
        assert_eq!(coerce_years(&Value::from("3.7")), 3);
        assert_eq!(coerce_years(&Value::from("around 6 years")), 6);
        assert_eq!(coerce_years(&Value::from("none")), 0);
        assert_eq!(coerce_years(&Value::from(-2)), 0);
        assert_eq!(coerce_years(&Value::Null), 0);
    }

    #[test]
    fn test_strip_code_fences_variants() {
        assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("{}"), "{}");
    }
}
