use crate::compile::RuleCompilationError;
use crate::table::schema::{RawRule, ValidationError};
use crate::table::RuleTable;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk encodings of a rule table.
///
/// JSON tables are a top-level array of rules. TOML tables list rules as
/// `[[rules]]` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Toml,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Some(Format::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlTable {
    #[serde(default)]
    rules: Vec<RawRule>,
}

#[derive(Debug)]
pub enum LoadError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    UnsupportedFormat {
        path: PathBuf,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
    Compilation {
        path: Option<PathBuf>,
        source: RuleCompilationError,
    },
}

impl LoadError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            LoadError::Json { path: None, source } => LoadError::Json {
                path: Some(path),
                source,
            },
            LoadError::Toml { path: None, source } => LoadError::Toml {
                path: Some(path),
                source,
            },
            LoadError::Validation { path: None, source } => LoadError::Validation {
                path: Some(path),
                source,
            },
            LoadError::Compilation { path: None, source } => LoadError::Compilation {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" ({})", path.display()),
        None => String::new(),
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(
                    f,
                    "failed to read rule table from {}: {}",
                    path.display(),
                    source
                )
            }
            LoadError::Json { path, source } => {
                write!(f, "failed to parse rule table JSON{}: {}", describe(path), source)
            }
            LoadError::Toml { path, source } => {
                write!(f, "failed to parse rule table TOML{}: {}", describe(path), source)
            }
            LoadError::UnsupportedFormat { path } => write!(
                f,
                "unsupported rule table format: {} (expected .json or .toml)",
                path.display()
            ),
            LoadError::Validation { path, source } => {
                write!(f, "invalid rule table{}: {}", describe(path), source)
            }
            LoadError::Compilation { path, source } => {
                write!(f, "failed to compile rule table{}: {}", describe(path), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Json { source, .. } => Some(source),
            LoadError::Toml { source, .. } => Some(source),
            LoadError::UnsupportedFormat { .. } => None,
            LoadError::Validation { source, .. } => Some(source),
            LoadError::Compilation { source, .. } => Some(source),
        }
    }
}

/// Parse raw records without validating or compiling them.
pub fn parse_str(input: &str, format: Format) -> Result<Vec<RawRule>, LoadError> {
    match format {
        Format::Json => serde_json::from_str(input)
            .map_err(|source| LoadError::Json { path: None, source }),
        Format::Toml => toml_edit::de::from_str::<TomlTable>(input)
            .map(|table| table.rules)
            .map_err(|source| LoadError::Toml { path: None, source }),
    }
}

pub fn read_raw_from_path(path: impl AsRef<Path>) -> Result<Vec<RawRule>, LoadError> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&contents, format).map_err(|error| error.with_path(path))
}

pub fn load_from_str(input: &str, format: Format) -> Result<RuleTable, LoadError> {
    let raw = parse_str(input, format)?;
    RuleTable::from_raw(&raw)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<RuleTable, LoadError> {
    let path = path.as_ref();
    let raw = read_raw_from_path(path)?;
    let table = RuleTable::from_raw(&raw).map_err(|error| error.with_path(path))?;
    tracing::debug!(path = %path.display(), rules = table.len(), "loaded rule table");
    Ok(table)
}
