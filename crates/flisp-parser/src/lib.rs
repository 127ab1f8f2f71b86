//! Parsers for FLISP configuration specifications.
//!
//! Two layers:
//!
//! - [`section`] turns one block of grouping-grammar text into a
//!   [`SectionTree`](flisp_tree::SectionTree).
//! - [`meta`] splits a meta file into `<unit>` and `[section]` blocks and
//!   parses every block with [`section`].
//!
//! ```
//! use flisp_parser::parse_section;
//!
//! let tree = parse_section("RESET( Q0(F1 F0 LDR) Q1(OER LDTA) )").unwrap();
//! assert_eq!(tree.atom_count(), 8);
//! ```

mod error;
pub mod meta;
pub mod scanner;
pub mod section;

pub use error::{MetaError, NameKind, SyntaxError};
pub use meta::{MetaOptions, parse_meta, parse_meta_with_options};
pub use section::{parse_section, parse_section_into};
