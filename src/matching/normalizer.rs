//! Raw posting normalization and filtering
//!
//! Converts heterogeneous raw postings into canonical records, applying
//! the location, domain/URL-shape, and coarse experience filters plus
//! deduplication. Drops are never errors; every stage is counted in a
//! [`FilterDiagnostics`] record handed back to the caller.

use crate::matching::matchers::{digit_runs, extract_experience_range, matches_skill};
use crate::matching::taxonomy::SkillTaxonomy;
use crate::profile::ResumeProfile;
use crate::sources::RawPosting;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Sentinel for fields no filter stage could populate.
pub const UNSPECIFIED: &str = "unspecified";

/// Per-domain URL markers distinguishing job detail pages from results
/// listings. A URL on a listed domain must carry the marker to pass.
const DOMAIN_DETAIL_MARKERS: &[(&str, &str)] = &[
    ("naukri.com", "/job-listings"),
    ("linkedin.com", "/jobs/view/"),
];

/// Canonical posting record. Every field is defined, possibly with the
/// [`UNSPECIFIED`] sentinel; nothing half-built reaches the scorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedPosting {
    pub company_name: String,
    pub title: String,
    /// Canonical display forms of resume skills found in the posting text.
    /// Empty means none matched, rendered as the sentinel in exports.
    pub skills_found: Vec<String>,
    pub link: String,
    /// Verbatim experience phrase from the posting, or the sentinel.
    pub experience_text: String,
    pub description: String,
}

/// Counts of raw postings dropped at each filter stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDiagnostics {
    pub received: usize,
    pub dropped_location: usize,
    pub dropped_domain: usize,
    pub dropped_experience: usize,
    pub dropped_duplicate: usize,
    pub kept: usize,
}

/// Normalize raw postings against a profile. An empty `accepted_domains`
/// list disables the domain/URL-shape stage.
pub fn normalize_postings(
    raw_postings: &[RawPosting],
    profile: &ResumeProfile,
    taxonomy: &SkillTaxonomy,
    location: &str,
    accepted_domains: &[String],
) -> (Vec<NormalizedPosting>, FilterDiagnostics) {
    let mut diagnostics = FilterDiagnostics {
        received: raw_postings.len(),
        ..Default::default()
    };
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut postings = Vec::new();

    for raw in raw_postings {
        if !mentions_location(raw, location) {
            diagnostics.dropped_location += 1;
            continue;
        }

        if !passes_domain_rules(&raw.url, accepted_domains) {
            diagnostics.dropped_domain += 1;
            continue;
        }

        let full_text = combined_text(raw);
        let skills_found = extract_matching_skills(&full_text, profile, taxonomy);
        let experience_text = extract_experience_range(&title_and_content(raw))
            .unwrap_or_else(|| UNSPECIFIED.to_string());

        if !admits_experience(&experience_text, profile.total_years_experience) {
            diagnostics.dropped_experience += 1;
            continue;
        }

        let posting = NormalizedPosting {
            company_name: derive_company(raw),
            title: raw.title.trim().to_string(),
            skills_found,
            link: raw.url.clone(),
            experience_text,
            description: normalize_whitespace(&raw.content),
        };

        let key = (
            posting.title.trim().to_lowercase(),
            posting.company_name.trim().to_lowercase(),
        );
        if !seen.insert(key) {
            diagnostics.dropped_duplicate += 1;
            continue;
        }

        postings.push(posting);
    }

    diagnostics.kept = postings.len();
    debug!(
        "normalized {} of {} raw postings",
        diagnostics.kept, diagnostics.received
    );
    (postings, diagnostics)
}

/// Coarse experience admission: one bound admits candidates at or above
/// it; a range admits candidates within `[min, max + 2]` inclusive.
/// Unparsable text admits the posting.
pub fn admits_experience(experience_text: &str, years: u32) -> bool {
    if experience_text == UNSPECIFIED {
        return true;
    }

    let runs = digit_runs(experience_text);
    match runs.as_slice() {
        [] => true,
        [single] => years >= *single,
        multiple => {
            let min = *multiple.iter().min().expect("non-empty runs");
            let max = *multiple.iter().max().expect("non-empty runs");
            years >= min && years <= max + 2
        }
    }
}

fn mentions_location(raw: &RawPosting, location: &str) -> bool {
    let needle = location.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }

    if raw.content.to_lowercase().contains(&needle) || raw.title.to_lowercase().contains(&needle) {
        return true;
    }
    raw.raw_content
        .as_ref()
        .is_some_and(|rc| rc.to_lowercase().contains(&needle))
}

fn passes_domain_rules(url: &str, accepted_domains: &[String]) -> bool {
    if accepted_domains.is_empty() {
        return true;
    }

    let url_lc = url.to_lowercase();
    if !accepted_domains
        .iter()
        .any(|d| url_lc.contains(&d.trim().to_lowercase()))
    {
        return false;
    }

    for (domain, marker) in DOMAIN_DETAIL_MARKERS {
        if url_lc.contains(domain) {
            return url_lc.contains(marker);
        }
    }
    true
}

fn extract_matching_skills(
    text: &str,
    profile: &ResumeProfile,
    taxonomy: &SkillTaxonomy,
) -> Vec<String> {
    let mut found = Vec::new();
    for skill in &profile.skills {
        let display = taxonomy.display_form(skill);
        if found.contains(&display) {
            continue;
        }
        if taxonomy
            .variants_of(skill)
            .iter()
            .any(|variant| matches_skill(text, variant))
        {
            found.push(display);
        }
    }
    found
}

fn combined_text(raw: &RawPosting) -> String {
    let mut text = format!("{}\n{}", raw.title, raw.content);
    if let Some(rc) = &raw.raw_content {
        text.push('\n');
        text.push_str(rc);
    }
    text
}

fn title_and_content(raw: &RawPosting) -> String {
    format!("{}\n{}", raw.title, raw.content)
}

/// Best-effort company attribution: an `... at <company>` or
/// `... - <company>` title suffix, else the source domain's label, else
/// the sentinel.
fn derive_company(raw: &RawPosting) -> String {
    if let Some(company) = company_from_title(&raw.title) {
        return company;
    }
    if let Some(domain) = &raw.source_domain {
        if let Some(label) = domain_label(domain) {
            return label;
        }
    }
    domain_label(&raw.url).unwrap_or_else(|| UNSPECIFIED.to_string())
}

fn company_from_title(title: &str) -> Option<String> {
    let at_separator = Regex::new(r"(?i)\s+at\s+").expect("company separator regex");
    if let Some(m) = at_separator.find_iter(title).last() {
        let candidate = title[m.end()..]
            .trim()
            .trim_matches(&['|', ',', '.'][..])
            .trim();
        if !candidate.is_empty() && candidate.len() < 80 {
            return Some(candidate.to_string());
        }
    }

    if let Some(pos) = title.rfind(" - ") {
        let candidate = title[pos + 3..].trim();
        if !candidate.is_empty() && candidate.len() < 80 && !candidate.chars().any(|c| c.is_ascii_digit()) {
            return Some(candidate.to_string());
        }
    }

    None
}

fn domain_label(url_or_domain: &str) -> Option<String> {
    let stripped = url_or_domain
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");
    let host = stripped.split('/').next()?;
    let label = host.split('.').next()?.trim();

    if label.is_empty() {
        None
    } else {
        let mut chars = label.chars();
        let first = chars.next()?;
        Some(first.to_uppercase().collect::<String>() + chars.as_str())
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
