use anyhow::Context;
use flisp_gen::flatten;
use flisp_parser::parse_section;

use crate::util::{display_path, read_input};

#[derive(clap::Args)]
pub struct Args {
    /// Path to a file holding one grouping block (use '-' or omit for stdin)
    pub file: Option<String>,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let contents = read_input(args.file.as_deref())?;
    let tree = parse_section(&contents)
        .with_context(|| format!("Failed to parse {}", display_path(args.file.as_deref())))?;
    for line in flatten(&tree) {
        println!("{line}");
    }
    Ok(())
}
