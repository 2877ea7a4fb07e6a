use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::types::SearchTerm;
use crate::ConfigError;

/// Search terms monitored on each platform, in processing order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermsFile {
    #[serde(default)]
    pub bluesky: Vec<SearchTerm>,
    #[serde(default)]
    pub linkedin: Vec<SearchTerm>,
}

/// Load and validate the search terms from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_terms(path: &Path) -> Result<TermsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TermsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_terms(&content)
}

fn parse_terms(content: &str) -> Result<TermsFile, ConfigError> {
    let terms_file: TermsFile = serde_yaml::from_str(content)?;
    validate_terms("bluesky", &terms_file.bluesky)?;
    validate_terms("linkedin", &terms_file.linkedin)?;
    Ok(terms_file)
}

/// Run reports key term results by term, so a platform's list must not repeat one.
fn validate_terms(platform: &str, terms: &[SearchTerm]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for term in terms {
        if term.as_str().trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{platform}: search term must be non-empty"
            )));
        }
        if !seen.insert(term.as_str()) {
            return Err(ConfigError::Validation(format!(
                "{platform}: duplicate search term '{term}'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_platform_lists_in_order() {
        let yaml = "bluesky:\n  - nextjs\n  - zod\nlinkedin:\n  - react\n";
        let terms = parse_terms(yaml).unwrap();
        let bluesky: Vec<&str> = terms.bluesky.iter().map(SearchTerm::as_str).collect();
        assert_eq!(bluesky, vec!["nextjs", "zod"]);
        assert_eq!(terms.linkedin, vec![SearchTerm::from("react")]);
    }

    #[test]
    fn missing_platform_list_defaults_to_empty() {
        let terms = parse_terms("bluesky:\n  - pnpm\n").unwrap();
        assert!(terms.linkedin.is_empty());
    }

    #[test]
    fn rejects_duplicate_term() {
        let err = parse_terms("linkedin:\n  - bun\n  - bun\n").unwrap_err();
        assert!(err.to_string().contains("duplicate search term 'bun'"));
    }

    #[test]
    fn terms_differing_only_in_case_are_distinct() {
        let terms = parse_terms("bluesky:\n  - UI\n  - ui\n").unwrap();
        assert_eq!(terms.bluesky.len(), 2);
    }

    #[test]
    fn rejects_blank_term() {
        let err = parse_terms("bluesky:\n  - \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_malformed_yaml() {
        let err = parse_terms("bluesky: [unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::TermsFileParse(_)));
    }

    #[test]
    fn load_terms_reports_missing_file() {
        let err = load_terms(Path::new("/nonexistent/terms.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::TermsFileIo { .. }));
    }

    #[test]
    fn shipped_terms_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/terms.yaml");
        let terms = load_terms(&path).unwrap();
        assert_eq!(terms.bluesky.len(), 16);
        assert_eq!(terms.linkedin.len(), 19);
    }
}
