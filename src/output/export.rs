//! Tabular export of scored postings
//!
//! Column order and names are a compatibility contract with downstream
//! spreadsheet consumers; do not reorder or rename them.

use crate::error::Result;
use crate::matching::normalizer::UNSPECIFIED;
use crate::matching::scorer::ScoredPosting;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const EXPORT_COLUMNS: [&str; 9] = [
    "Company Name",
    "Title",
    "Skill",
    "Link",
    "Experience",
    "Description",
    "Match Score",
    "Matched Skills",
    "Exp Match",
];

/// Write one CSV row per scored posting, preceded by the header row.
pub fn write_csv<W: Write>(postings: &[ScoredPosting], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_COLUMNS)?;

    for scored in postings {
        let posting = &scored.posting;
        let skill = skills_cell(&posting.skills_found);
        let score = format!("{:.1}", scored.match_score);
        let matched = scored.matched_skills.join(", ");

        csv_writer.write_record([
            posting.company_name.as_str(),
            posting.title.as_str(),
            skill.as_str(),
            posting.link.as_str(),
            posting.experience_text.as_str(),
            posting.description.as_str(),
            score.as_str(),
            matched.as_str(),
            if scored.experience_compatible { "true" } else { "false" },
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Export to a file at `path`, creating or truncating it.
pub fn export_csv(postings: &[ScoredPosting], path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_csv(postings, file)
}

fn skills_cell(skills: &[String]) -> String {
    if skills.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        skills.join(", ")
    }
}
