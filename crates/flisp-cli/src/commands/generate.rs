use std::io;
use std::path::PathBuf;

use anyhow::Context;
use flisp_gen::{DirectorySink, EchoSink, GenConfig, NewlineStyle, Sink, generate};
use flisp_parser::{MetaOptions, parse_meta_with_options};
use tracing::info;

use crate::util::{display_path, read_input};

#[derive(clap::Args)]
pub struct Args {
    /// Path to the meta file (use '-' or omit for stdin)
    pub file: Option<String>,
    /// Directory the generated files are written to
    #[arg(short, long, default_value = ".")]
    pub out_dir: PathBuf,
    /// Base name of the file that loads every unit
    #[arg(long)]
    pub main_name: Option<String>,
    /// Extension of the generated files, without the dot
    #[arg(long)]
    pub extension: Option<String>,
    /// Write CRLF line endings
    #[arg(long)]
    pub crlf: bool,
    /// Fail on a repeated unit or section name instead of replacing it
    #[arg(long)]
    pub strict: bool,
    /// Do not echo generated lines to stdout
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    fn config(&self) -> GenConfig {
        let mut config = GenConfig::new();
        if let Some(name) = &self.main_name {
            config = config.with_main_name(name.as_str());
        }
        if let Some(extension) = &self.extension {
            config = config.with_extension(extension.as_str());
        }
        if self.crlf {
            config = config.with_newline(NewlineStyle::Crlf);
        }
        config
    }

    fn meta_options(&self) -> MetaOptions {
        MetaOptions::new().with_strict_names(self.strict)
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let contents = read_input(args.file.as_deref())?;
    let path = display_path(args.file.as_deref());
    let spec = parse_meta_with_options(&contents, &args.meta_options())
        .with_context(|| format!("Failed to parse {path}"))?;

    let config = args.config();
    let generation =
        generate(&spec, &config).with_context(|| format!("Failed to lay out {path}"))?;

    let mut directory = DirectorySink::new(&args.out_dir, config.newline);
    let mut echo = EchoSink::new(io::stdout().lock());
    let mut sinks: Vec<&mut dyn Sink> = vec![&mut directory];
    if !args.quiet {
        sinks.push(&mut echo);
    }
    generation
        .emit(&mut sinks)
        .context("Failed to write generated files")?;

    info!(
        units = spec.units.len(),
        files = directory.written().len(),
        "generated into {}",
        args.out_dir.display()
    );
    Ok(())
}
