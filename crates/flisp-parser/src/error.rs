//! Error types for section and meta file parsing.

use std::fmt;

use thiserror::Error;

/// Errors that can occur when parsing a block of grouping-grammar text.
///
/// Offsets are byte offsets into the block that was parsed.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SyntaxError {
    /// Input ended while groups were still open.
    #[error("Unmatched parentheses: {unclosed} group(s) not closed")]
    UnmatchedOpenGroup { unclosed: usize },

    /// A `)` with no open group to close.
    #[error("Unmatched parentheses: unexpected ')' at {offset}: {remaining}")]
    UnmatchedCloseGroup { offset: usize, remaining: String },

    /// Text matching none of the lexical rules.
    #[error("Unrecognized input at {offset}: {remaining}")]
    UnrecognizedToken { offset: usize, remaining: String },
}

impl SyntaxError {
    /// Byte offset of the failure, if it points at a token.
    pub fn offset(&self) -> Option<usize> {
        match self {
            SyntaxError::UnmatchedOpenGroup { .. } => None,
            SyntaxError::UnmatchedCloseGroup { offset, .. }
            | SyntaxError::UnrecognizedToken { offset, .. } => Some(*offset),
        }
    }
}

/// What a repeated name in a meta file referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Unit,
    Section,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameKind::Unit => f.write_str("unit"),
            NameKind::Section => f.write_str("section"),
        }
    }
}

/// Errors that can occur when splitting and parsing a meta file.
///
/// Line numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MetaError {
    /// Content or a section marker before the first `<unit>` marker.
    #[error("Line {line}: no unit specified")]
    NoUnit { line: usize },

    /// Content inside a unit before its first `[section]` marker.
    #[error("Line {line}: no section specified in unit '{unit}'")]
    NoSection { line: usize, unit: String },

    /// A name repeated within the same collection, in strict mode.
    #[error("Line {line}: duplicate {kind} name '{name}'")]
    DuplicateName {
        line: usize,
        kind: NameKind,
        name: String,
    },

    /// A section whose text is not valid grouping grammar.
    #[error("Invalid specification in [{section}] of <{unit}> (line {line}): {source}")]
    Section {
        unit: String,
        section: String,
        line: usize,
        #[source]
        source: SyntaxError,
    },
}
