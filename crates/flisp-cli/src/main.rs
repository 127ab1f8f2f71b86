use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod util;

#[derive(Parser)]
#[command(name = "flisp-gen", about = "FLISP configuration file generator")]
struct Cli {
    #[command(flatten)]
    verbosity: logging::Verbosity,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the main file and one file per unit from a meta file
    Generate(commands::generate::Args),
    /// Print every section of a meta file in canonical grouping syntax
    Inspect(commands::inspect::Args),
    /// Print the mergestate lines of a single grouping block
    Flatten(commands::flatten::Args),
}

fn main() {
    let cli = Cli::parse();
    logging::setup_tracing(&cli.verbosity);

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Inspect(args) => commands::inspect::run(args),
        Commands::Flatten(args) => commands::flatten::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
