//! Errors raised while turning raw input into a forest

use derive_more::Display;
use std::fmt;

/// What is wrong with a single field
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum IssueKind {
    #[display(fmt = "expected an object")]
    NotAnObject,
    #[display(fmt = "expected an array")]
    NotAnArray,
    #[display(fmt = "expected a string")]
    NotAString,
    #[display(fmt = "expected a boolean")]
    NotABoolean,
    #[display(fmt = "missing required field")]
    Missing,
    #[display(fmt = "must not be empty")]
    Empty,
    #[display(fmt = "longer than {} characters ({})", max, len)]
    TooLong { len: usize, max: usize },
    #[display(fmt = "duplicate id {:?}", _0)]
    DuplicateId(String),
}

/// A single violation, located by its field path (e.g. `[0].children[1].name`)
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}: {}", path, kind)]
pub struct ValidationIssue {
    pub path: String,
    pub kind: IssueKind,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

/// Raw input did not describe a well-formed forest
///
/// Carries every issue found, not just the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Paths of every offending field, in discovery order
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid tree data ({} issue", self.issues.len())?;
        if self.issues.len() != 1 {
            write!(f, "s")?;
        }
        write!(f, ")")?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ValidationError::new(vec![
            ValidationIssue::new("[0].name", IssueKind::Empty),
            ValidationIssue::new("[1].name", IssueKind::TooLong { len: 101, max: 100 }),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid tree data (2 issues); [0].name: must not be empty; \
             [1].name: longer than 100 characters (101)"
        );
        assert_eq!(err.paths(), vec!["[0].name", "[1].name"]);
    }

    #[test]
    fn test_duplicate_id_display() {
        let issue = ValidationIssue::new("[2].id", IssueKind::DuplicateId("a".into()));
        assert_eq!(issue.to_string(), "[2].id: duplicate id \"a\"");
    }
}
