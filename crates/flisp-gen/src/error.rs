use thiserror::Error;

/// Specifications that cannot be laid out as one file per unit.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum GenerateError {
    /// A unit or main file name that is empty or holds a path separator.
    #[error("Invalid file name '{name}': names must be non-empty and contain no path separators")]
    InvalidName { name: String },

    /// A unit whose file would overwrite the main file.
    #[error("Unit <{unit}> would be written to the main file {file_name}")]
    MainFileCollision { unit: String, file_name: String },
}
