//! Meta file splitter.
//!
//! A meta file is read line by line:
//!
//! ```text
//! <basic>                 % starts the unit "basic"
//! [RESET]                 % starts the section "RESET" in that unit
//! Q0(F1 F0 LDR)           % grouping-grammar text of the section
//! Q1(OER LDTA)
//! ```
//!
//! `%` starts a comment running to the end of the line. The text lines of a
//! section are joined with single spaces and handed to
//! [`parse_section`](crate::parse_section) when the next marker or the end of
//! input is reached.

use std::sync::LazyLock;

use flisp_tree::{Specification, Unit};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::error::{MetaError, NameKind};
use crate::section::parse_section;

static UNIT_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^<([^>]+)>").unwrap());
static SECTION_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[([^\]]+)\]").unwrap());

/// Options for [`parse_meta_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetaOptions {
    /// Reject a unit or section name that is already present in the same
    /// collection. When off, the later definition replaces the earlier one.
    pub strict_names: bool,
}

impl MetaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict_names(mut self, strict: bool) -> Self {
        self.strict_names = strict;
        self
    }
}

/// Split and parse a meta file with default options.
pub fn parse_meta(text: &str) -> Result<Specification, MetaError> {
    parse_meta_with_options(text, &MetaOptions::default())
}

pub fn parse_meta_with_options(
    text: &str,
    options: &MetaOptions,
) -> Result<Specification, MetaError> {
    let mut splitter = Splitter::new(options);
    for (index, line) in text.lines().enumerate() {
        splitter.feed_line(index + 1, line)?;
    }
    splitter.finish()
}

/// A section whose text is still being collected.
struct PendingSection {
    name: String,
    line: usize,
    text: String,
}

struct Splitter<'o> {
    options: &'o MetaOptions,
    spec: Specification,
    current_unit: Option<String>,
    pending: Option<PendingSection>,
}

impl<'o> Splitter<'o> {
    fn new(options: &'o MetaOptions) -> Self {
        Self {
            options,
            spec: Specification::new(),
            current_unit: None,
            pending: None,
        }
    }

    fn feed_line(&mut self, line_number: usize, line: &str) -> Result<(), MetaError> {
        let line = strip_comment(line.trim());
        if line.is_empty() {
            return Ok(());
        }
        debug!(line = line_number, "{line}");

        if let Some(caps) = UNIT_MARKER.captures(line) {
            self.flush_section()?;
            self.begin_unit(line_number, caps[1].trim())?;
            return Ok(());
        }

        let Some(unit) = self.current_unit.clone() else {
            return Err(MetaError::NoUnit { line: line_number });
        };

        if let Some(caps) = SECTION_MARKER.captures(line) {
            self.flush_section()?;
            self.begin_section(line_number, &unit, caps[1].trim())?;
            return Ok(());
        }

        let Some(pending) = self.pending.as_mut() else {
            return Err(MetaError::NoSection {
                line: line_number,
                unit,
            });
        };
        pending.text.push_str(line);
        pending.text.push(' ');
        Ok(())
    }

    fn begin_unit(&mut self, line_number: usize, name: &str) -> Result<(), MetaError> {
        if self.spec.contains_unit(name) {
            if self.options.strict_names {
                return Err(MetaError::DuplicateName {
                    line: line_number,
                    kind: NameKind::Unit,
                    name: name.to_string(),
                });
            }
            warn!(line = line_number, "unit <{name}> redefined; earlier definition dropped");
        }
        info!("Reading unit specification {name}");
        self.spec.insert_unit(name, Unit::new());
        self.current_unit = Some(name.to_string());
        Ok(())
    }

    fn begin_section(
        &mut self,
        line_number: usize,
        unit: &str,
        name: &str,
    ) -> Result<(), MetaError> {
        let exists = self
            .spec
            .unit(unit)
            .is_some_and(|unit| unit.contains_section(name));
        if exists {
            if self.options.strict_names {
                return Err(MetaError::DuplicateName {
                    line: line_number,
                    kind: NameKind::Section,
                    name: name.to_string(),
                });
            }
            warn!(
                line = line_number,
                "section [{name}] redefined in <{unit}>; earlier definition dropped"
            );
        }
        info!("Reading section specification {name}");
        self.pending = Some(PendingSection {
            name: name.to_string(),
            line: line_number,
            text: String::new(),
        });
        Ok(())
    }

    /// Parse the pending section, if any, and store it in the current unit.
    fn flush_section(&mut self) -> Result<(), MetaError> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        // A section only starts inside a unit
        let Some(unit_name) = self.current_unit.as_deref() else {
            return Ok(());
        };
        let tree = parse_section(&pending.text).map_err(|source| MetaError::Section {
            unit: unit_name.to_string(),
            section: pending.name.clone(),
            line: pending.line,
            source,
        })?;
        debug!(
            section = %pending.name,
            atoms = tree.atom_count(),
            "parsed section"
        );
        if let Some(unit) = self.spec.unit_mut(unit_name) {
            unit.insert_section(pending.name, tree);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Specification, MetaError> {
        self.flush_section()?;
        Ok(self.spec)
    }
}

/// Drop a `%` comment and the whitespace before it.
fn strip_comment(line: &str) -> &str {
    match line.split_once('%') {
        Some((content, _)) => content.trim_end(),
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyntaxError;
    use flisp_tree::Entry;
    use pretty_assertions::assert_eq;

    const BASIC: &str = "\
% FLISP control unit
<basic>
[RESET]
Q0(F1 F0 LDR)   % load
Q1(OER LDTA)
Q2(MR G14 LDPC)

[FETCH]
Q3(MR CLRT LDI INCPC)
[00 : NOP]
I00( Q4(NF) )
";

    fn unit_names(spec: &Specification) -> Vec<&str> {
        spec.units.keys().map(String::as_str).collect()
    }

    fn section_names<'s>(spec: &'s Specification, unit: &str) -> Vec<&'s str> {
        spec.unit(unit)
            .unwrap()
            .sections
            .keys()
            .map(String::as_str)
            .collect()
    }

    #[test]
    fn test_split_units_and_sections() {
        let spec = parse_meta(BASIC).unwrap();

        assert_eq!(unit_names(&spec), vec!["basic"]);
        assert_eq!(
            section_names(&spec, "basic"),
            vec!["RESET", "FETCH", "00 : NOP"]
        );

        let reset = spec.unit("basic").unwrap().section("RESET").unwrap();
        assert_eq!(reset.lookup(&["Q1", "LDTA"]), Some(Entry::Leaf));
        assert_eq!(reset.atom_count(), 11);
    }

    #[test]
    fn test_section_text_spans_lines() {
        let spec = parse_meta("<u>\n[s]\nA(\nb\n)\n").unwrap();
        let section = spec.unit("u").unwrap().section("s").unwrap();

        assert_eq!(section.lookup(&["A", "b"]), Some(Entry::Leaf));
    }

    #[test]
    fn test_unit_without_sections() {
        let spec = parse_meta("<empty>\n<full>\n[s]\na\n").unwrap();

        assert_eq!(unit_names(&spec), vec!["empty", "full"]);
        assert!(spec.unit("empty").unwrap().sections.is_empty());
    }

    #[test]
    fn test_marker_names_are_trimmed() {
        let spec = parse_meta("<  basic >\n[ RESET  ]\na\n").unwrap();

        assert_eq!(unit_names(&spec), vec!["basic"]);
        assert_eq!(section_names(&spec, "basic"), vec!["RESET"]);
    }

    #[test]
    fn test_content_before_unit() {
        assert_eq!(parse_meta("a(b)\n"), Err(MetaError::NoUnit { line: 1 }));
        assert_eq!(parse_meta("\n[s]\n"), Err(MetaError::NoUnit { line: 2 }));
    }

    #[test]
    fn test_content_before_section() {
        assert_eq!(
            parse_meta("<u>\na\n"),
            Err(MetaError::NoSection {
                line: 2,
                unit: "u".to_string(),
            })
        );
    }

    #[test]
    fn test_comment_only_lines_are_skipped() {
        let spec = parse_meta("% header\n<u>\n   % note\n[s]\na\n").unwrap();
        assert_eq!(section_names(&spec, "u"), vec!["s"]);
    }

    #[test]
    fn test_section_syntax_error_is_located() {
        let error = parse_meta("<u>\n[ok]\na\n[bad]\nx(\ny\n").unwrap_err();

        assert_eq!(
            error,
            MetaError::Section {
                unit: "u".to_string(),
                section: "bad".to_string(),
                line: 4,
                source: SyntaxError::UnmatchedOpenGroup { unclosed: 1 },
            }
        );
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let spec = parse_meta("<u>\n[s]\na\n[t]\nb\n[s]\nc\n").unwrap();
        let unit = spec.unit("u").unwrap();

        assert_eq!(section_names(&spec, "u"), vec!["s", "t"]);
        assert_eq!(unit.section("s").unwrap().lookup(&["c"]), Some(Entry::Leaf));
        assert_eq!(unit.section("s").unwrap().lookup(&["a"]), None);
    }

    #[test]
    fn test_duplicate_unit_replaces_earlier() {
        let spec = parse_meta("<u>\n[s]\na\n<v>\n<u>\n[t]\nb\n").unwrap();

        assert_eq!(unit_names(&spec), vec!["u", "v"]);
        assert_eq!(section_names(&spec, "u"), vec!["t"]);
    }

    #[test]
    fn test_strict_names_rejects_duplicates() {
        let options = MetaOptions::new().with_strict_names(true);

        assert_eq!(
            parse_meta_with_options("<u>\n[s]\na\n[s]\nb\n", &options),
            Err(MetaError::DuplicateName {
                line: 4,
                kind: NameKind::Section,
                name: "s".to_string(),
            })
        );
        assert_eq!(
            parse_meta_with_options("<u>\n<u>\n", &options),
            Err(MetaError::DuplicateName {
                line: 2,
                kind: NameKind::Unit,
                name: "u".to_string(),
            })
        );
    }
}
