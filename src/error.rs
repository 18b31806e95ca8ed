//! Validation errors for catalog and assignment sources

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::Span;

/// Position of an error in its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// 1-based line number
    pub line: usize,
    /// Byte range in the source text
    pub span: Span,
}

impl Location {
    pub fn new(line: usize, span: Span) -> Self {
        Self { line, span }
    }
}

/// Who referenced an unknown check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Group(String),
    Host(String),
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Owner::Group(name) => write!(f, "group '@{}'", name),
            Owner::Host(name) => write!(f, "host '{}'", name),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("line {}: {owner} references unknown check '${check}'", .location.line)]
    UnknownCheck {
        owner: Owner,
        check: String,
        location: Location,
    },

    #[error("line {}: host '{host}' references unknown group '@{group}'", .location.line)]
    UnknownGroup {
        host: String,
        group: String,
        location: Location,
    },

    #[error("line {}: invalid reference '{reference}', expected '$<check> [args...]'", .location.line)]
    InvalidReference {
        reference: String,
        location: Location,
    },

    #[error("line {}: malformed line: {reason}", .location.line)]
    MalformedLine { reason: String, location: Location },

    #[error("line {}: duplicate check template '${name}'", .location.line)]
    DuplicateTemplate { name: String, location: Location },

    #[error("line {}: check template header has no name", .location.line)]
    EmptyTemplateName { location: Location },
}

impl ValidationError {
    pub fn location(&self) -> &Location {
        match self {
            Self::UnknownCheck { location, .. }
            | Self::UnknownGroup { location, .. }
            | Self::InvalidReference { location, .. }
            | Self::MalformedLine { location, .. }
            | Self::DuplicateTemplate { location, .. }
            | Self::EmptyTemplateName { location } => location,
        }
    }

    /// Short label shown under the offending span
    fn label(&self) -> String {
        match self {
            Self::UnknownCheck { check, .. } => format!("no check template named '{}'", check),
            Self::UnknownGroup { group, .. } => format!("no group named '{}' defined above", group),
            Self::InvalidReference { .. } => "check references must start with '$'".to_string(),
            Self::MalformedLine { reason, .. } => reason.clone(),
            Self::DuplicateTemplate { .. } => "template already defined".to_string(),
            Self::EmptyTemplateName { .. } => "expected a name after '$'".to_string(),
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let span = self.location().span.clone();
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
