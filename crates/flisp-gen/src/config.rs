//! Generator configuration.

/// Configuration options for output generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    /// Base name of the top-level file that loads every unit.
    /// Default: "flisp"
    pub main_name: String,

    /// Extension of every generated file, without the dot.
    /// Default: "hwflisp"
    pub extension: String,

    /// Newline style used when writing files.
    /// Default: NewlineStyle::Lf
    pub newline: NewlineStyle,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            main_name: "flisp".to_string(),
            extension: "hwflisp".to_string(),
            newline: NewlineStyle::Lf,
        }
    }
}

impl GenConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top-level file's base name.
    pub fn with_main_name(mut self, name: impl Into<String>) -> Self {
        self.main_name = name.into();
        self
    }

    /// Set the output extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set newline style.
    pub fn with_newline(mut self, style: NewlineStyle) -> Self {
        self.newline = style;
        self
    }

    /// File name for a unit or the main file's base name.
    pub fn file_name(&self, base: &str) -> String {
        format!("{base}.{}", self.extension)
    }
}

/// Newline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineStyle {
    /// Unix-style line endings (LF).
    #[default]
    Lf,
    /// Windows-style line endings (CRLF).
    Crlf,
}

impl NewlineStyle {
    /// Get the newline string.
    pub fn as_str(self) -> &'static str {
        match self {
            NewlineStyle::Lf => "\n",
            NewlineStyle::Crlf => "\r\n",
        }
    }
}
