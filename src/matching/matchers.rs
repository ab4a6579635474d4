//! Text-matching primitives shared by the normalizer and scorer

use regex::Regex;

/// Case-insensitive word-boundary test for `term` inside `text`, so that
/// "go" does not match inside "going". Terms carrying characters a regex
/// word boundary cannot anchor on ("c++", "node.js") fall back to
/// delimiter-bounded matching.
pub fn matches_skill(text: &str, term: &str) -> bool {
    let term = term.trim();
    if term.is_empty() {
        return false;
    }

    let escaped = regex::escape(term);
    let pattern = if term.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
        format!(r"(?i)\b{}\b", escaped)
    } else {
        format!(
            r"(?i)(?:^|[\s.,;:!?()\[\]/])(?:{})(?:$|[\s.,;:!?()\[\]/])",
            escaped
        )
    };

    match Regex::new(&pattern) {
        Ok(re) => re.is_match(text),
        Err(_) => false,
    }
}

/// First occurrence of an experience phrase of the shape
/// `<digits>(+ | -<digits>)? years?`, captured verbatim.
pub fn extract_experience_range(text: &str) -> Option<String> {
    let re = Regex::new(r"(?i)\b\d+\s*(?:\+|-\s*\d+)?\s*years?\b").expect("experience regex");
    re.find(text).map(|m| m.as_str().to_string())
}

/// All digit runs in `text`, in order of appearance.
pub fn digit_runs(text: &str) -> Vec<u32> {
    let re = Regex::new(r"\d+").expect("digit regex");
    re.find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_boundary_prevents_substring_hits() {
        assert!(matches_skill("we are going with Go for services", "go"));
        assert!(!matches_skill("the project is going well", "go"));
        assert!(!matches_skill("postgresql experience required", "sql"));
        assert!(matches_skill("SQL and Python required", "sql"));
    }

    #[test]
    fn test_case_insensitive_matching() {
        assert!(matches_skill("PYTHON developer wanted", "python"));
        assert!(matches_skill("python developer wanted", "Python"));
    }

    #[test]
    fn test_symbolic_terms() {
        assert!(matches_skill("strong C++ background", "c++"));
        assert!(matches_skill("we use node.js, react and redis", "node.js"));
        assert!(!matches_skill("c+ only", "c++"));
    }

    #[test]
    fn test_multi_word_terms() {
        assert!(matches_skill("machine learning pipelines", "machine learning"));
        assert!(!matches_skill("machinery learning", "machine learning"));
    }

    #[test]
    fn test_extract_experience_range_shapes() {
        assert_eq!(
            extract_experience_range("requires 5-8 years of backend work"),
            Some("5-8 years".to_string())
        );
        assert_eq!(
            extract_experience_range("at least 3+ Years in python"),
            Some("3+ Years".to_string())
        );
        assert_eq!(
            extract_experience_range("2 years experience"),
            Some("2 years".to_string())
        );
        assert_eq!(extract_experience_range("1 year minimum"), Some("1 year".to_string()));
        assert_eq!(extract_experience_range("senior role, no numbers"), None);
    }

    #[test]
    fn test_extract_experience_range_takes_first_match() {
        assert_eq!(
            extract_experience_range("3 years required, 5 years preferred"),
            Some("3 years".to_string())
        );
    }

    #[test]
    fn test_digit_runs() {
        assert_eq!(digit_runs("5-8 years"), vec![5, 8]);
        assert_eq!(digit_runs("10+ years"), vec![10]);
        assert_eq!(digit_runs("no digits"), Vec::<u32>::new());
    }
}
