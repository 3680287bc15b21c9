//! Distribution packing: drop authoring-only fields from a JSON table.

use crate::table::loader::{parse_str, Format, LoadError};
use crate::table::schema::{validate, NON_SEMANTIC_FIELDS};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Remove `timestamp`, `last_updated` and `description` from every record.
///
/// Non-object entries are left as they are; the table is re-validated
/// after packing.
pub fn strip_non_semantic(table: &mut Value) {
    if let Value::Array(records) = table {
        for record in records {
            if let Value::Object(fields) = record {
                for field in NON_SEMANTIC_FIELDS {
                    fields.remove(field);
                }
            }
        }
    }
}

/// Pack a JSON table held in memory, returning compact JSON.
pub fn pack_str(input: &str) -> Result<String, LoadError> {
    let mut table: Value =
        serde_json::from_str(input).map_err(|source| LoadError::Json { path: None, source })?;
    strip_non_semantic(&mut table);
    let packed =
        serde_json::to_string(&table).map_err(|source| LoadError::Json { path: None, source })?;

    let raw = parse_str(&packed, Format::Json)?;
    validate(&raw).map_err(|source| LoadError::Validation { path: None, source })?;
    Ok(packed)
}

/// Pack `input` into `output`, replacing it atomically.
///
/// Returns the number of rules written.
pub fn pack_file(input: &Path, output: &Path) -> Result<usize, LoadError> {
    let contents = fs::read_to_string(input).map_err(|source| LoadError::Io {
        path: input.to_path_buf(),
        source,
    })?;
    let packed = pack_str(&contents)?;
    let count = parse_str(&packed, Format::Json)?.len();

    atomic_write(output, packed.as_bytes()).map_err(|source| LoadError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::debug!(input = %input.display(), output = %output.display(), rules = count, "packed rule table");
    Ok(count)
}

/// Atomic file write: tempfile + fsync + rename.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
