//! Grouping-grammar parser.
//!
//! Drives a [`TreeConstructor`] from the [`Scanner`]'s tokens: group-open
//! pushes a new group, leaf registers a leaf, group-close pops. The stack has
//! to be back at the root when the input runs out.

use flisp_tree::{KeyLiteral, SectionTree, TreeConstructor, UnclosedGroups};
use tracing::trace;

use crate::error::SyntaxError;
use crate::scanner::{Scanner, TokenKind};

/// Parse a block of grouping-grammar text into a new tree.
pub fn parse_section(text: &str) -> Result<SectionTree, SyntaxError> {
    let mut tree = SectionTree::new();
    parse_section_into(text, &mut tree)?;
    Ok(tree)
}

/// Parse a block of grouping-grammar text into `tree`, starting at its root.
///
/// On error the tree may hold part of the input and should be discarded.
pub fn parse_section_into(text: &str, tree: &mut SectionTree) -> Result<(), SyntaxError> {
    let mut constructor = TreeConstructor::new(tree);

    for token in Scanner::new(text) {
        let token = token?;
        trace!(?token, depth = constructor.depth(), "scanned");
        match token.kind {
            TokenKind::GroupOpen(atom) => {
                constructor.open_group(KeyLiteral::from_token(atom));
            }
            TokenKind::Leaf(atom) => constructor.add_leaf(KeyLiteral::from_token(atom)),
            TokenKind::GroupClose => {
                constructor
                    .close_group()
                    .map_err(|_| SyntaxError::UnmatchedCloseGroup {
                        offset: token.span.start,
                        remaining: text[token.span.start..].to_string(),
                    })?;
            }
            TokenKind::Comment(_) => {}
        }
    }

    constructor
        .finish()
        .map_err(|UnclosedGroups { unclosed }| SyntaxError::UnmatchedOpenGroup { unclosed })
}
