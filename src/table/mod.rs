//! The full compiled rule table and the ways to build one.

pub mod loader;
pub mod pack;
pub mod schema;

pub use loader::{load_from_path, load_from_str, parse_str, read_raw_from_path, Format, LoadError};
pub use pack::{pack_file, pack_str, strip_non_semantic};
pub use schema::{axis, validate, Metadata, RawRule, ValidationError, ValidationIssue};

use crate::compile::{compile, CompiledRule};
use crate::ruleset::RuleSet;
use std::sync::Arc;

/// Every compiled rule, in table order. Read-only once built.
///
/// Cloning is cheap; clones share the same rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Arc<[Arc<CompiledRule>]>,
}

impl RuleTable {
    /// Validate and compile raw records.
    pub fn from_raw(raw: &[RawRule]) -> Result<Self, LoadError> {
        validate(raw).map_err(|source| LoadError::Validation { path: None, source })?;
        let compiled =
            compile(raw).map_err(|source| LoadError::Compilation { path: None, source })?;
        Ok(Self::from_compiled(compiled))
    }

    /// Wrap already compiled rules. No validation is performed.
    pub fn from_compiled(rules: Vec<CompiledRule>) -> Self {
        Self {
            rules: rules.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
        self.rules.iter().map(|rule| &**rule)
    }

    pub fn get(&self, id: u64) -> Option<&CompiledRule> {
        self.iter().find(|rule| rule.id() == id)
    }

    /// Distinct rule names in table order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in self.iter() {
            if !names.contains(&rule.name()) {
                names.push(rule.name());
            }
        }
        names
    }

    /// A set holding the whole table.
    pub fn all(&self) -> RuleSet {
        self.rules.iter().cloned().collect()
    }

    /// A set holding the rules that satisfy `predicate`, in table order.
    pub fn filtered<P>(&self, predicate: P) -> RuleSet
    where
        P: Fn(&CompiledRule) -> bool,
    {
        self.rules
            .iter()
            .filter(|rule| predicate(rule))
            .cloned()
            .collect()
    }

    /// Every rule whose name is listed, in table order.
    ///
    /// Names that match nothing are ignored.
    pub fn by_name<S: AsRef<str>>(&self, names: &[S]) -> RuleSet {
        self.filtered(|rule| names.iter().any(|name| name.as_ref() == rule.name()))
    }
}
