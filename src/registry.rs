//! Process-wide rule table.
//!
//! The bundled table is compiled on first use and shared read-only after
//! that. Callers that need a different table install it before anything
//! asks for the global one.

use crate::pipeline::Pipeline;
use crate::ruleset::RuleSet;
use crate::table::{load_from_str, Format, LoadError, RuleTable};
use std::sync::OnceLock;
use thiserror::Error;

static BUNDLED: &str = include_str!("../rules/rules.json");

static TABLE: OnceLock<RuleTable> = OnceLock::new();

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("the global rule table is already initialized")]
    AlreadyInitialized,

    #[error("bundled rule table is broken: {0}")]
    Bundled(String),
}

/// The raw bundled table, as shipped.
pub fn bundled_source() -> &'static str {
    BUNDLED
}

/// Compile a fresh copy of the bundled table.
pub fn bundled() -> Result<RuleTable, LoadError> {
    load_from_str(BUNDLED, Format::Json)
}

/// Make `table` the global table.
///
/// Fails once the global table exists, whether it was installed or built
/// from the bundled asset.
pub fn install(table: RuleTable) -> Result<(), RegistryError> {
    let rules = table.len();
    TABLE
        .set(table)
        .map_err(|_| RegistryError::AlreadyInitialized)?;
    tracing::debug!(rules, "installed global rule table");
    Ok(())
}

/// The global table, building it from the bundled asset on first call.
pub fn global() -> Result<&'static RuleTable, RegistryError> {
    if let Some(table) = TABLE.get() {
        return Ok(table);
    }

    let table = bundled().map_err(|e| RegistryError::Bundled(e.to_string()))?;
    tracing::debug!(rules = table.len(), "built global rule table from bundled asset");
    Ok(TABLE.get_or_init(|| table))
}

pub fn pipeline(pipeline: Pipeline) -> Result<RuleSet, RegistryError> {
    Ok(global()?.pipeline(pipeline))
}

pub fn rules_by_name<S: AsRef<str>>(names: &[S]) -> Result<RuleSet, RegistryError> {
    Ok(global()?.by_name(names))
}
