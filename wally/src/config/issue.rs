//! Validation issues and the aggregate [`ConfigError`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::config::schema::Field;

/// Stable, machine-readable issue category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value missing, or present with the wrong shape.
    InvalidType,
    /// A refinement rejected an otherwise well-typed value.
    Custom,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCode::InvalidType => "invalid_type",
            IssueCode::Custom => "custom",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigIssue {
    /// Offending field; `None` when the failure concerns the input as a whole.
    pub path: Option<Field>,
    pub code: IssueCode,
    /// Human-readable message. Never contains the field name.
    pub reason: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path {
            Some(path) => write!(f, "{path}: {}", self.reason),
            None => f.write_str(&self.reason),
        }
    }
}

/// Rejected configuration input.
///
/// `reason`, `code` and `path` mirror the first issue. Issues are ordered by
/// field declaration order, so an earlier field always supplies the primary
/// message. Only the validation pipeline constructs this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", primary_message(.path, .reason))]
pub struct ConfigError {
    reason: String,
    code: IssueCode,
    path: Option<Field>,
    issues: Vec<ConfigIssue>,
}

impl ConfigError {
    /// Build from an ordered, non-empty issue list. Returns `None` when empty.
    pub(crate) fn from_issues(issues: Vec<ConfigIssue>) -> Option<Self> {
        let primary = issues.first()?.clone();
        Some(Self {
            reason: primary.reason,
            code: primary.code,
            path: primary.path,
            issues,
        })
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn code(&self) -> IssueCode {
        self.code
    }

    pub fn path(&self) -> Option<Field> {
        self.path
    }

    pub fn issues(&self) -> &[ConfigIssue] {
        &self.issues
    }

    /// Every issue, one per line, in reporting order.
    pub fn report(&self) -> String {
        self.issues
            .iter()
            .map(ConfigIssue::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn primary_message(path: &Option<Field>, reason: &str) -> String {
    match path {
        Some(path) => format!("{path}: {reason}"),
        None => reason.to_string(),
    }
}
