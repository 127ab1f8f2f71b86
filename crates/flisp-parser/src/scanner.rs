//! Tokenizer for the grouping grammar.
//!
//! Each step matches the remaining text against four anchored rules in a
//! fixed order: group-open, leaf, group-close, comment. An atom is a prefix of
//! a group-open, so group-open has to be tried first.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::SyntaxError;

const ATOM: &str = r#"(\w+|".+?"|'.+?')"#;

static GROUP_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^\s*{ATOM}\s*\(")).unwrap());
static LEAF: LazyLock<Regex> = LazyLock::new(|| Regex::new(&format!(r"^\s*{ATOM}")).unwrap());
static GROUP_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\)").unwrap());
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*/\*(?s:.*?)\*/").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// An atom followed by `(`; the atom text still carries its quotes.
    GroupOpen(&'a str),
    /// An atom not followed by `(`.
    Leaf(&'a str),
    GroupClose,
    Comment(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Byte range of the token in the source, leading whitespace excluded.
    pub span: Range<usize>,
}

pub struct Scanner<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// Text that has not been consumed yet.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.offset..]
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn advance(&mut self, consumed: usize) {
        self.offset += consumed;
    }

    fn scan(&mut self) -> Result<Token<'a>, SyntaxError> {
        let rest = self.remaining();
        let base = self.offset;

        if let Some(caps) = GROUP_OPEN.captures(rest) {
            let whole = caps.get(0).unwrap();
            let atom = caps.get(1).unwrap();
            self.advance(whole.end());
            return Ok(Token {
                kind: TokenKind::GroupOpen(atom.as_str()),
                span: base + atom.start()..base + whole.end(),
            });
        }

        if let Some(caps) = LEAF.captures(rest) {
            let atom = caps.get(1).unwrap();
            // Only the atom is consumed; what follows is scanned next
            self.advance(atom.end());
            return Ok(Token {
                kind: TokenKind::Leaf(atom.as_str()),
                span: base + atom.start()..base + atom.end(),
            });
        }

        if let Some(whole) = GROUP_CLOSE.find(rest) {
            self.advance(whole.end());
            return Ok(Token {
                kind: TokenKind::GroupClose,
                span: base + whole.end() - 1..base + whole.end(),
            });
        }

        if let Some(whole) = COMMENT.find(rest) {
            let text = whole.as_str().trim_start();
            self.advance(whole.end());
            return Ok(Token {
                kind: TokenKind::Comment(text),
                span: base + whole.end() - text.len()..base + whole.end(),
            });
        }

        let trimmed = rest.trim_start();
        let offset = base + (rest.len() - trimmed.len());
        // Nothing sensible can follow an unrecognized token
        self.offset = self.source.len();
        Err(SyntaxError::UnrecognizedToken {
            offset,
            remaining: trimmed.to_string(),
        })
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining().trim().is_empty() {
            self.offset = self.source.len();
            return None;
        }
        Some(self.scan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<TokenKind<'_>> {
        Scanner::new(source)
            .map(|token| token.unwrap().kind)
            .collect()
    }

    #[test]
    fn test_group_open_wins_over_leaf() {
        assert_eq!(
            kinds("Q0(F1)"),
            vec![
                TokenKind::GroupOpen("Q0"),
                TokenKind::Leaf("F1"),
                TokenKind::GroupClose,
            ]
        );
    }

    #[test]
    fn test_whitespace_before_paren_is_allowed() {
        assert_eq!(
            kinds("Q0  \n (F1 )"),
            vec![
                TokenKind::GroupOpen("Q0"),
                TokenKind::Leaf("F1"),
                TokenKind::GroupClose,
            ]
        );
    }

    #[test]
    fn test_quoted_atoms() {
        assert_eq!(
            kinds(r#""00 : NOP"( 'a b' )"#),
            vec![
                TokenKind::GroupOpen("\"00 : NOP\""),
                TokenKind::Leaf("'a b'"),
                TokenKind::GroupClose,
            ]
        );
    }

    #[test]
    fn test_comment_is_a_token() {
        assert_eq!(
            kinds("a /* x ) y */ b"),
            vec![
                TokenKind::Leaf("a"),
                TokenKind::Comment("/* x ) y */"),
                TokenKind::Leaf("b"),
            ]
        );
    }

    #[test]
    fn test_comment_spans_lines() {
        assert_eq!(
            kinds("/* first\nsecond */ a"),
            vec![TokenKind::Comment("/* first\nsecond */"), TokenKind::Leaf("a")]
        );
    }

    #[test]
    fn test_spans_exclude_leading_whitespace() {
        let tokens: Vec<_> = Scanner::new("  ab ( c )")
            .map(|token| token.unwrap().span)
            .collect();
        assert_eq!(tokens, vec![2..6, 7..8, 9..10]);
    }

    #[test]
    fn test_unrecognized_reports_remaining_text() {
        let mut scanner = Scanner::new("a  ?? b");
        assert_eq!(
            scanner.next(),
            Some(Ok(Token {
                kind: TokenKind::Leaf("a"),
                span: 0..1,
            }))
        );
        assert_eq!(
            scanner.next(),
            Some(Err(SyntaxError::UnrecognizedToken {
                offset: 3,
                remaining: "?? b".to_string(),
            }))
        );
        assert_eq!(scanner.next(), None);
    }

    #[test]
    fn test_unterminated_comment_is_unrecognized() {
        let result: Result<Vec<_>, _> = Scanner::new("/* open").collect();
        assert_eq!(
            result,
            Err(SyntaxError::UnrecognizedToken {
                offset: 0,
                remaining: "/* open".to_string(),
            })
        );
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(kinds("  \n\t "), vec![]);
    }
}
