//! Prompt composition for the resume extraction call

/// The instruction sent through the retrieval pipeline to pull structured
/// attributes out of the indexed resume.
pub const PROFILE_EXTRACTION_INSTRUCTION: &str = "Extract only the skills and the total years of work experience from the resume. \
Return strictly in JSON with the following keys: \
'skills' as a list of skill names, and 'total_years_experience' as a number only. \
Do not include experience descriptions or job history.";

/// Compose the grounded prompt: retrieved chunks in retrieval order,
/// separated by blank lines, followed by the literal instruction.
pub fn grounded_prompt(retrieved: &[String], instruction: &str) -> String {
    let data = retrieved.join("\n\n");
    format!("Using this data: {}. Respond to this prompt: {}", data, instruction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grounded_prompt_preserves_retrieval_order() {
        let retrieved = vec!["first chunk".to_string(), "second chunk".to_string()];
        let prompt = grounded_prompt(&retrieved, "list the skills");

        assert!(prompt.starts_with("Using this data: first chunk\n\nsecond chunk."));
        assert!(prompt.ends_with("Respond to this prompt: list the skills"));
    }

    #[test]
    fn test_grounded_prompt_empty_retrieval() {
        let prompt = grounded_prompt(&[], "list the skills");
        assert!(prompt.contains("Respond to this prompt: list the skills"));
    }

    #[test]
    fn test_extraction_instruction_names_both_keys() {
        assert!(PROFILE_EXTRACTION_INSTRUCTION.contains("'skills'"));
        assert!(PROFILE_EXTRACTION_INSTRUCTION.contains("'total_years_experience'"));
    }
}
