use flisp_tree::{Specification, Unit};
use tracing::debug;

use crate::config::GenConfig;
use crate::error::GenerateError;
use crate::mergestate::flatten;
use crate::sink::{OutputFile, Sink, SinkError};

/// Header of the top-level file. The text is consumed downstream and must
/// stay as it is.
pub const MAIN_HEADER: [&str; 4] = [
    "FLISP huvudkonfigurationsfil FLISP.HWFLISP",
    "Konfigurering av fast styrenhet i FLISP",
    "Genererad av FLISP-gen (c) Anton Maartensson",
    "",
];

/// Second line of every unit file header.
pub const UNIT_AUTHOR: &str = "Genererad av FLISP-gen (c) Anton Mårtensson";

/// Width of the rule lines around a section name.
pub const RULE_WIDTH: usize = 80;

/// Where an output line goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Destination {
    /// The top-level file that loads every unit.
    Main { file_name: String },
    /// The file generated for one unit.
    Unit { name: String, file_name: String },
}

impl Destination {
    pub fn main(config: &GenConfig) -> Self {
        Destination::Main {
            file_name: config.file_name(&config.main_name),
        }
    }

    pub fn unit(name: &str, config: &GenConfig) -> Self {
        Destination::Unit {
            name: name.to_string(),
            file_name: config.file_name(name),
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Destination::Main { file_name } | Destination::Unit { file_name, .. } => file_name,
        }
    }
}

/// The lines generated for a specification, in the order they were produced.
///
/// The top-level file's lines and the unit files' lines are interleaved: each
/// unit's lines directly follow the load directive that names it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    destinations: Vec<Destination>,
    lines: Vec<(usize, String)>,
}

impl Generation {
    pub fn new() -> Self {
        Self::default()
    }

    fn destination_index(&mut self, destination: &Destination) -> usize {
        match self.destinations.iter().position(|d| d == destination) {
            Some(index) => index,
            None => {
                self.destinations.push(destination.clone());
                self.destinations.len() - 1
            }
        }
    }

    pub fn push(&mut self, destination: &Destination, line: impl Into<String>) {
        let index = self.destination_index(destination);
        self.lines.push((index, line.into()));
    }

    pub fn extend<I>(&mut self, destination: &Destination, lines: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let index = self.destination_index(destination);
        self.lines
            .extend(lines.into_iter().map(|line| (index, line.into())));
    }

    /// Destinations in the order they first received a line.
    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn lines(&self) -> impl Iterator<Item = (&Destination, &str)> {
        self.lines
            .iter()
            .map(|(index, line)| (&self.destinations[*index], line.as_str()))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines of the file called `file_name`.
    pub fn file_lines(&self, file_name: &str) -> Option<Vec<&str>> {
        let index = self
            .destinations
            .iter()
            .position(|d| d.file_name() == file_name)?;
        Some(
            self.lines
                .iter()
                .filter(|(i, _)| *i == index)
                .map(|(_, line)| line.as_str())
                .collect(),
        )
    }

    /// Group the lines by file, files in first-seen order.
    pub fn into_files(self) -> Vec<OutputFile> {
        let mut files: Vec<OutputFile> = self
            .destinations
            .iter()
            .map(|d| OutputFile::new(d.file_name()))
            .collect();
        for (index, line) in self.lines {
            files[index].lines.push(line);
        }
        files
    }

    /// Feed every line, in order, to each sink, then finish the sinks.
    pub fn emit(&self, sinks: &mut [&mut dyn Sink]) -> Result<(), SinkError> {
        for (destination, line) in self.lines() {
            for sink in sinks.iter_mut() {
                sink.write_line(destination, line)?;
            }
        }
        for sink in sinks.iter_mut() {
            sink.finish()?;
        }
        Ok(())
    }
}

/// `# Load "<unit file>"`
pub fn load_directive(name: &str, config: &GenConfig) -> String {
    format!("# Load \"{}\"", config.file_name(name))
}

/// Lines of one unit file: the header, then a banner and the flattened
/// directives for every section.
pub fn assemble_unit(name: &str, unit: &Unit, config: &GenConfig) -> Vec<String> {
    let mut lines = vec![
        format!("Konfigurationsfil: \"{}\"", config.file_name(name)),
        UNIT_AUTHOR.to_string(),
    ];
    let rule = "-".repeat(RULE_WIDTH);
    for (section_name, tree) in unit.sections.iter() {
        debug!(unit = name, section = %section_name, "flattening section");
        lines.push(String::new());
        lines.push(rule.clone());
        lines.push(section_name.clone());
        lines.push(rule.clone());
        lines.extend(flatten(tree));
    }
    lines
}

/// Generate the top-level file and every unit file.
///
/// Every name becomes a file name inside one output directory, so names
/// holding path separators and units named like the main file are rejected
/// before any line is produced.
pub fn generate(spec: &Specification, config: &GenConfig) -> Result<Generation, GenerateError> {
    check_name(&config.main_name)?;
    let main = Destination::main(config);
    for name in spec.units.keys() {
        check_name(name)?;
        let destination = Destination::unit(name, config);
        if destination.file_name() == main.file_name() {
            return Err(GenerateError::MainFileCollision {
                unit: name.clone(),
                file_name: main.file_name().to_string(),
            });
        }
    }

    let mut generation = Generation::new();
    generation.extend(&main, MAIN_HEADER);

    for (name, unit) in spec.units.iter() {
        debug!(unit = %name, sections = unit.sections.len(), "assembling unit");
        generation.push(&main, load_directive(name, config));
        let destination = Destination::unit(name, config);
        generation.extend(&destination, assemble_unit(name, unit, config));
    }
    Ok(generation)
}

fn check_name(name: &str) -> Result<(), GenerateError> {
    if name.is_empty() || name.contains(['/', '\\']) {
        return Err(GenerateError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}
