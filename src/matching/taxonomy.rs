//! Static skill taxonomy: canonical names, synonym groups, and weights

use std::collections::HashMap;

pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Immutable skill lookup tables, built once at startup.
///
/// Synonym lookup is symmetric within an alias group: asking for the
/// variants of a synonym returns the canonical name and every sibling.
#[derive(Debug)]
pub struct SkillTaxonomy {
    /// Alias groups, canonical name first.
    groups: Vec<Vec<String>>,
    member_index: HashMap<String, usize>,
    weights: HashMap<String, f64>,
}

impl SkillTaxonomy {
    pub fn new() -> Self {
        let mut taxonomy = Self {
            groups: Vec::new(),
            member_index: HashMap::new(),
            weights: HashMap::new(),
        };

        for (canonical, synonyms) in Self::default_alias_groups() {
            taxonomy.add_group(canonical, synonyms);
        }
        for (name, weight) in Self::default_weights() {
            taxonomy.weights.insert(name.to_string(), weight);
        }

        taxonomy
    }

    fn add_group(&mut self, canonical: &str, synonyms: &[&str]) {
        let idx = self.groups.len();
        let mut members = vec![canonical.to_string()];
        members.extend(synonyms.iter().map(|s| s.to_string()));
        for member in &members {
            self.member_index.insert(member.clone(), idx);
        }
        self.groups.push(members);
    }

    /// The skill itself plus every member of its alias group.
    pub fn variants_of(&self, skill: &str) -> Vec<String> {
        let key = skill.trim().to_lowercase();
        match self.member_index.get(&key) {
            Some(&idx) => {
                let mut variants = vec![key.clone()];
                for member in &self.groups[idx] {
                    if *member != key {
                        variants.push(member.clone());
                    }
                }
                variants
            }
            None => vec![key],
        }
    }

    /// Canonical display form: the group's canonical name when the skill is
    /// known, otherwise the lower-cased skill itself.
    pub fn display_form(&self, skill: &str) -> String {
        let key = skill.trim().to_lowercase();
        match self.member_index.get(&key) {
            Some(&idx) => self.groups[idx][0].clone(),
            None => key,
        }
    }

    /// Importance weight by lower-cased exact name, defaulting to 1.0.
    pub fn weight_of(&self, skill: &str) -> f64 {
        *self
            .weights
            .get(&skill.trim().to_lowercase())
            .unwrap_or(&DEFAULT_WEIGHT)
    }

    fn default_alias_groups() -> Vec<(&'static str, &'static [&'static str])> {
        vec![
            ("postgres", &["postgresql", "psql"]),
            ("javascript", &["js"]),
            ("typescript", &["ts"]),
            ("kubernetes", &["k8s"]),
            ("go", &["golang"]),
            ("aws", &["amazon web services"]),
            ("gcp", &["google cloud", "google cloud platform"]),
            ("machine learning", &["ml"]),
            ("node.js", &["nodejs", "node"]),
            ("react", &["reactjs", "react.js"]),
            ("c++", &["cpp"]),
            ("c#", &["csharp"]),
            ("mongodb", &["mongo"]),
        ]
    }

    fn default_weights() -> Vec<(&'static str, f64)> {
        let mut weights = Vec::new();

        // Core languages
        for name in [
            "python", "java", "javascript", "typescript", "rust", "go", "c++", "c#", "ruby",
            "php", "kotlin", "swift", "scala",
        ] {
            weights.push((name, 3.0));
        }

        // Frameworks
        for name in [
            "react", "angular", "vue", "django", "flask", "spring", "node.js", "express",
            "rails", "fastapi", ".net",
        ] {
            weights.push((name, 2.5));
        }

        // Datastores
        for name in [
            "postgres", "mysql", "mongodb", "redis", "elasticsearch", "cassandra", "sqlite",
            "oracle", "dynamodb",
        ] {
            weights.push((name, 2.0));
        }

        // Cloud and infrastructure
        for name in [
            "aws", "azure", "gcp", "docker", "kubernetes", "terraform", "ansible", "jenkins",
            "linux", "git",
        ] {
            weights.push((name, 1.5));
        }

        weights
    }
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_are_symmetric_within_groups() {
        let taxonomy = SkillTaxonomy::new();

        for group in &taxonomy.groups {
            for a in group {
                for b in group {
                    assert!(
                        taxonomy.variants_of(a).contains(b),
                        "{} should be a variant of {}",
                        b,
                        a
                    );
                }
            }
        }
    }

    #[test]
    fn test_synonym_lookup_returns_canonical_and_siblings() {
        let taxonomy = SkillTaxonomy::new();
        let variants = taxonomy.variants_of("psql");

        assert!(variants.contains(&"postgres".to_string()));
        assert!(variants.contains(&"postgresql".to_string()));
        assert!(variants.contains(&"psql".to_string()));
    }

    #[test]
    fn test_unknown_skill_is_its_own_variant_set() {
        let taxonomy = SkillTaxonomy::new();
        assert_eq!(taxonomy.variants_of("Cobol"), vec!["cobol"]);
    }

    #[test]
    fn test_display_form_prefers_canonical() {
        let taxonomy = SkillTaxonomy::new();
        assert_eq!(taxonomy.display_form("K8S"), "kubernetes");
        assert_eq!(taxonomy.display_form("postgresql"), "postgres");
        assert_eq!(taxonomy.display_form("Erlang"), "erlang");
    }

    #[test]
    fn test_weights_by_tier_with_default() {
        let taxonomy = SkillTaxonomy::new();
        assert_eq!(taxonomy.weight_of("Python"), 3.0);
        assert_eq!(taxonomy.weight_of("django"), 2.5);
        assert_eq!(taxonomy.weight_of("postgres"), 2.0);
        assert_eq!(taxonomy.weight_of("docker"), 1.5);
        assert_eq!(taxonomy.weight_of("excel"), DEFAULT_WEIGHT);
    }
}
