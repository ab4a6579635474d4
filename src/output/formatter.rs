//! Console rendering of profiles, diagnostics, and ranked postings

use crate::matching::normalizer::{FilterDiagnostics, UNSPECIFIED};
use crate::matching::scorer::ScoredPosting;
use crate::profile::ResumeProfile;
use colored::Colorize;

pub fn print_profile(profile: &ResumeProfile) {
    println!("\n{}", "Resume profile".bold());
    let skills = if profile.skills.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        profile.skills.join(", ")
    };
    println!("  Skills: {}", skills);
    println!("  Experience: {} years", profile.total_years_experience);
}

pub fn print_diagnostics(diagnostics: &FilterDiagnostics) {
    println!("\n{}", "Filter diagnostics".bold());
    println!("  Received:             {}", diagnostics.received);
    println!("  Dropped (location):   {}", diagnostics.dropped_location);
    println!("  Dropped (domain):     {}", diagnostics.dropped_domain);
    println!("  Dropped (experience): {}", diagnostics.dropped_experience);
    println!("  Dropped (duplicate):  {}", diagnostics.dropped_duplicate);
    println!("  Kept:                 {}", diagnostics.kept.to_string().green());
}

pub fn print_rankings(ranked: &[ScoredPosting], detailed: bool) {
    println!(
        "\n{} ({}, generated {})",
        "Recommended jobs".bold(),
        ranked.len(),
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );

    if ranked.is_empty() {
        println!("  {}", "No postings matched.".yellow());
        return;
    }

    for (position, scored) in ranked.iter().enumerate() {
        let posting = &scored.posting;
        let score = format!("{:.1}", scored.match_score);
        let score = if scored.match_score > 0.0 {
            score.green().to_string()
        } else {
            score
        };
        let experience = if scored.experience_compatible {
            posting.experience_text.clone()
        } else {
            format!("{} (outside range)", posting.experience_text)
                .red()
                .to_string()
        };

        println!(
            "\n{}. {} at {} (score {}, exp {})",
            position + 1,
            posting.title.bold(),
            posting.company_name,
            score,
            experience
        );

        if !scored.matched_skills.is_empty() {
            println!("   Matched: {}", scored.matched_skills.join(", "));
        }

        if detailed {
            if !posting.description.is_empty() {
                println!("   {}", truncate(&posting.description, 240));
            }
            println!("   {}", posting.link.blue());
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}
