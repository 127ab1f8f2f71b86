//! Consumers of generated lines.
//!
//! A [`Generation`](crate::Generation) is fed to one or more sinks with
//! [`Generation::emit`](crate::Generation::emit). Each sink sees every line
//! in generation order together with its [`Destination`].

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use flisp_tree::Map;
use indexmap::map::Entry;
use thiserror::Error;
use tracing::{debug, info};

use crate::assemble::Destination;
use crate::config::NewlineStyle;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output: {0}")]
    Stream(#[from] io::Error),
}

pub trait Sink {
    fn write_line(&mut self, destination: &Destination, line: &str) -> Result<(), SinkError>;

    /// Called once after the last line.
    fn finish(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// One generated file held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputFile {
    pub name: String,
    pub lines: Vec<String>,
}

impl OutputFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lines: Vec::new(),
        }
    }

    /// The file contents, every line terminated by `newline`.
    pub fn contents(&self, newline: NewlineStyle) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push_str(newline.as_str());
        }
        out
    }
}

/// Writes every destination to its own file inside a directory.
///
/// Files are created (truncating old contents) when they receive their first
/// line.
pub struct DirectorySink {
    dir: PathBuf,
    newline: NewlineStyle,
    files: Map<String, (PathBuf, BufWriter<File>)>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>, newline: NewlineStyle) -> Self {
        Self {
            dir: dir.into(),
            newline,
            files: Map::new(),
        }
    }

    /// Paths of the files opened so far, in creation order.
    pub fn written(&self) -> Vec<&Path> {
        self.files.values().map(|(path, _)| path.as_path()).collect()
    }

    fn writer(&mut self, file_name: &str) -> Result<&mut (PathBuf, BufWriter<File>), SinkError> {
        match self.files.entry(file_name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                fs::create_dir_all(&self.dir).map_err(|source| SinkError::File {
                    path: self.dir.clone(),
                    source,
                })?;
                let path = self.dir.join(file_name);
                let file = File::create(&path).map_err(|source| SinkError::File {
                    path: path.clone(),
                    source,
                })?;
                info!(path = %path.display(), "writing");
                Ok(entry.insert((path, BufWriter::new(file))))
            }
        }
    }
}

impl Sink for DirectorySink {
    fn write_line(&mut self, destination: &Destination, line: &str) -> Result<(), SinkError> {
        let newline = self.newline.as_str();
        let (path, writer) = self.writer(destination.file_name())?;
        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.write_all(newline.as_bytes()))
            .map_err(|source| SinkError::File {
                path: path.clone(),
                source,
            })
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        for (path, writer) in self.files.values_mut() {
            writer.flush().map_err(|source| SinkError::File {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "flushed");
        }
        Ok(())
    }
}

/// Echoes every line as `<file name> << <line>`.
pub struct EchoSink<W: Write> {
    out: W,
}

impl<W: Write> EchoSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sink for EchoSink<W> {
    fn write_line(&mut self, destination: &Destination, line: &str) -> Result<(), SinkError> {
        if line.is_empty() {
            writeln!(self.out, "{} <<", destination.file_name())?;
        } else {
            writeln!(self.out, "{} << {}", destination.file_name(), line)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Collects generated files in memory, in first-seen order.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: Map<String, OutputFile>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(&self, name: &str) -> Option<&OutputFile> {
        self.files.get(name)
    }

    pub fn into_files(self) -> Vec<OutputFile> {
        self.files.into_iter().map(|(_, file)| file).collect()
    }
}

impl Sink for MemorySink {
    fn write_line(&mut self, destination: &Destination, line: &str) -> Result<(), SinkError> {
        let name = destination.file_name();
        self.files
            .entry(name.to_string())
            .or_insert_with(|| OutputFile::new(name))
            .lines
            .push(line.to_string());
        Ok(())
    }
}
