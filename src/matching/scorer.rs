//! Weighted skill-overlap scoring and experience compatibility

use crate::matching::matchers::{digit_runs, matches_skill};
use crate::matching::normalizer::{NormalizedPosting, UNSPECIFIED};
use crate::matching::taxonomy::SkillTaxonomy;
use crate::profile::ResumeProfile;
use serde::{Deserialize, Serialize};

/// A normalized posting with its match score against the active profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPosting {
    pub posting: NormalizedPosting,
    /// Sum of taxonomy weights over distinct matched skills, one decimal.
    pub match_score: f64,
    pub matched_skills: Vec<String>,
    /// Advisory flag for the caller's UI; never used to drop postings.
    pub experience_compatible: bool,
}

/// Score one posting. Postings whose skills could not be determined score
/// zero and stay experience-neutral rather than being penalized.
pub fn score_posting(
    profile: &ResumeProfile,
    posting: &NormalizedPosting,
    taxonomy: &SkillTaxonomy,
) -> ScoredPosting {
    if posting.skills_found.is_empty() {
        return ScoredPosting {
            posting: posting.clone(),
            match_score: 0.0,
            matched_skills: Vec::new(),
            experience_compatible: true,
        };
    }

    let mut matched_skills: Vec<String> = Vec::new();
    for resume_skill in &profile.skills {
        let variants = taxonomy.variants_of(resume_skill);
        for posting_skill in &posting.skills_found {
            if matched_skills.contains(posting_skill) {
                continue;
            }
            if variants
                .iter()
                .any(|variant| posting_skill == variant || matches_skill(posting_skill, variant))
            {
                matched_skills.push(posting_skill.clone());
            }
        }
    }

    let total: f64 = matched_skills.iter().map(|s| taxonomy.weight_of(s)).sum();
    let match_score = (total * 10.0).round() / 10.0;
    let experience_compatible =
        experience_compatible(&posting.experience_text, profile.total_years_experience);

    ScoredPosting {
        posting: posting.clone(),
        match_score,
        matched_skills,
        experience_compatible,
    }
}

pub fn score_postings(
    profile: &ResumeProfile,
    postings: &[NormalizedPosting],
    taxonomy: &SkillTaxonomy,
) -> Vec<ScoredPosting> {
    postings
        .iter()
        .map(|posting| score_posting(profile, posting, taxonomy))
        .collect()
}

/// Advisory experience check, deliberately looser than the normalizer's
/// admission test: a single bound accepts anyone at or above it, a range
/// accepts anyone inside `[min, max]`, and unparsable text accepts all.
pub fn experience_compatible(experience_text: &str, years: u32) -> bool {
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
            years >= min && years <= max
        }
    }
}
