use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    Warning,
    Error,
}

impl DiagnosticLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Stable machine-readable classification of a diagnostic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum DiagnosticCode {
    InvalidClassName,
    InvalidNodeLabel,
    InvalidEdgeClass,
    InvalidEdgeLabel,
    DuplicateOutgoingEdge,
    NodeCloseWithoutOpen,
    MalformedProperty,
    #[default]
    OrphanContent,
}

impl DiagnosticCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidClassName => "cgdl/error/invalid-class-name",
            Self::InvalidNodeLabel => "cgdl/error/invalid-node-label",
            Self::InvalidEdgeClass => "cgdl/error/invalid-edge-class",
            Self::InvalidEdgeLabel => "cgdl/error/invalid-edge-label",
            Self::DuplicateOutgoingEdge => "cgdl/warn/duplicate-outgoing-edge",
            Self::NodeCloseWithoutOpen => "cgdl/warn/node-close-without-open",
            Self::MalformedProperty => "cgdl/warn/malformed-property",
            Self::OrphanContent => "cgdl/warn/orphan-content",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DiagnosticEntry {
    pub line_number: usize,
    pub code: DiagnosticCode,
    pub message: String,
}

/// Append-only warning and error log for one reading session.
///
/// Entries are never rewritten, removed or de-duplicated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Diagnostics {
    pub warnings: Vec<DiagnosticEntry>,
    pub errors: Vec<DiagnosticEntry>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, line_number: usize, code: DiagnosticCode, message: impl Into<String>) {
        self.warnings.push(DiagnosticEntry {
            line_number,
            code,
            message: message.into(),
        });
    }

    pub fn error(&mut self, line_number: usize, code: DiagnosticCode, message: impl Into<String>) {
        self.errors.push(DiagnosticEntry {
            line_number,
            code,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty() && self.errors.is_empty()
    }

    #[must_use]
    pub fn counts(&self) -> DiagnosticCounts {
        DiagnosticCounts {
            warnings: self.warnings.len(),
            errors: self.errors.len(),
        }
    }

    /// Both lists merged by line number; on the same line warnings come first.
    pub fn iter(&self) -> impl Iterator<Item = (DiagnosticLevel, &DiagnosticEntry)> {
        let mut merged: Vec<(DiagnosticLevel, &DiagnosticEntry)> = self
            .warnings
            .iter()
            .map(|entry| (DiagnosticLevel::Warning, entry))
            .chain(self.errors.iter().map(|entry| (DiagnosticLevel::Error, entry)))
            .collect();
        merged.sort_by_key(|(level, entry)| (entry.line_number, *level));
        merged.into_iter()
    }

    #[must_use]
    pub fn by_code(&self, code: DiagnosticCode) -> Vec<&DiagnosticEntry> {
        self.warnings
            .iter()
            .chain(&self.errors)
            .filter(|entry| entry.code == code)
            .collect()
    }

    /// Messages only, in insertion order.
    #[must_use]
    pub fn warning_messages(&self) -> Vec<&str> {
        self.warnings.iter().map(|entry| entry.message.as_str()).collect()
    }

    /// Messages only, in insertion order.
    #[must_use]
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors.iter().map(|entry| entry.message.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticCounts {
    pub warnings: usize,
    pub errors: usize,
}

impl DiagnosticCounts {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.warnings + self.errors
    }
}
