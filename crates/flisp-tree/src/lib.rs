//! Tree model for FLISP configuration specifications.
//!
//! A section is parsed into a [`SectionTree`]: an arena of groups addressed by
//! [`NodeId`], where every group maps [`KeyLiteral`]s to either a leaf or a
//! nested group. Keys keep their insertion order at every level, since that
//! order decides the order of the generated directives.
//!
//! Sections are collected into [`Unit`]s and units into a [`Specification`].

/// Key literals and the quoting rule.
pub mod key;

/// Insertion-ordered map used at every level of the model.
pub mod map;

/// Arena-backed section tree.
pub mod tree;

/// Stack-based construction of a section tree.
pub mod constructor;

/// Units and the top-level specification.
pub mod spec;

/// Rendering a tree back into grouping syntax.
pub mod write;

pub use constructor::{CannotCloseRoot, TreeConstructor, UnclosedGroups};
pub use key::KeyLiteral;
pub use map::Map;
pub use spec::{Specification, Unit};
pub use tree::{Entry, Group, NodeId, SectionTree};
