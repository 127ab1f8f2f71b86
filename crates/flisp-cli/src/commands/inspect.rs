use std::fmt::Write;

use anyhow::Context;
use flisp_parser::{MetaOptions, parse_meta_with_options};
use flisp_tree::Specification;

use crate::util::{display_path, read_input};

#[derive(clap::Args)]
pub struct Args {
    /// Path to the meta file (use '-' or omit for stdin)
    pub file: Option<String>,
    /// Fail on a repeated unit or section name instead of replacing it
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let contents = read_input(args.file.as_deref())?;
    let options = MetaOptions::new().with_strict_names(args.strict);
    let spec = parse_meta_with_options(&contents, &options)
        .with_context(|| format!("Failed to parse {}", display_path(args.file.as_deref())))?;
    print!("{}", render(&spec));
    Ok(())
}

/// Units and sections as markers, every section body in grouping syntax.
fn render(spec: &Specification) -> String {
    let mut out = String::new();
    for (unit_name, unit) in spec.units.iter() {
        let _ = writeln!(out, "<{unit_name}>");
        for (section_name, tree) in unit.sections.iter() {
            let _ = writeln!(out, "[{section_name}]");
            out.push_str(&tree.to_grouping_string());
        }
    }
    out
}
