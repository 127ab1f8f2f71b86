//! Mergestate directive generator.
//!
//! [`flatten`] turns one section tree into directive lines, [`generate`]
//! assembles a whole [`Specification`](flisp_tree::Specification) into lines
//! tagged with their output file, and the [`sink`] module writes those lines
//! out.
//!
//! ```
//! use flisp_gen::flatten;
//! use flisp_parser::parse_section;
//!
//! let tree = parse_section("outer(inner(leaf1))").unwrap();
//! assert_eq!(flatten(&tree), vec!["# MergeState leaf1=\t(inner*outer)"]);
//! ```

mod assemble;
mod config;
mod error;
mod mergestate;
pub mod sink;

pub use assemble::{
    Destination, Generation, MAIN_HEADER, RULE_WIDTH, UNIT_AUTHOR, assemble_unit, generate,
    load_directive,
};
pub use config::{GenConfig, NewlineStyle};
pub use error::GenerateError;
pub use mergestate::{SEPARATOR, directive_line, flatten};
pub use sink::{DirectorySink, EchoSink, MemorySink, OutputFile, Sink, SinkError};
