use std::fmt;

use crate::error::{GitPromoteError, Result};

/// A validated feature name, the variable part of every tier branch name.
///
/// Validation happens once at construction; every later stage can rely on
/// the name being embeddable in a git ref without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureName(String);

impl FeatureName {
    /// Validate a raw feature name.
    ///
    /// Rejects empty input, whitespace, and the characters/sequences git
    /// refuses in ref names, so that `{PREFIX}_{name}` is always a legal
    /// branch name.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim();

        if name.is_empty() {
            return Err(GitPromoteError::invalid_feature(raw, "feature name is empty"));
        }
        if name.contains("..") {
            return Err(GitPromoteError::invalid_feature(name, "contains '..'"));
        }
        if name.ends_with('.') || name.ends_with(".lock") {
            return Err(GitPromoteError::invalid_feature(
                name,
                "ends with '.' or '.lock'",
            ));
        }
        if let Ok(re) = regex::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$") {
            if !re.is_match(name) {
                return Err(GitPromoteError::invalid_feature(
                    name,
                    "only letters, digits, '.', '_' and '-' are allowed, \
                     starting with a letter or digit",
                ));
            }
        }

        Ok(FeatureName(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_ticket_name() {
        let name = FeatureName::parse("CDC-9-login").unwrap();
        assert_eq!(name.as_str(), "CDC-9-login");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let name = FeatureName::parse("  CDC-9-login  ").unwrap();
        assert_eq!(name.as_str(), "CDC-9-login");
    }

    #[test]
    fn test_reject_empty() {
        assert!(FeatureName::parse("").is_err());
        assert!(FeatureName::parse("   ").is_err());
    }

    #[test]
    fn test_reject_leading_dash() {
        // A leading '-' would read as a flag on the git command line
        assert!(FeatureName::parse("-login").is_err());
    }

    #[test]
    fn test_reject_interior_whitespace() {
        assert!(FeatureName::parse("add login").is_err());
    }

    #[test]
    fn test_reject_ref_hostile_sequences() {
        assert!(FeatureName::parse("a..b").is_err());
        assert!(FeatureName::parse("a.").is_err());
        assert!(FeatureName::parse("a.lock").is_err());
        assert!(FeatureName::parse("a~b").is_err());
        assert!(FeatureName::parse("a^b").is_err());
        assert!(FeatureName::parse("a:b").is_err());
    }

    #[test]
    fn test_error_carries_name_and_reason() {
        let err = FeatureName::parse("").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
