//! Ordered, composable rule collections.
//!
//! A [`RuleSet`] is a value: [`RuleSet::combine`] and [`RuleSet::select`]
//! build new sets and leave the receiver alone, so pipelines derived from
//! the same table never see each other's changes. Rules are shared through
//! `Arc`, so deriving a set copies pointers, not matchers.

pub mod apply;

pub use apply::{ApplicationError, ApplyOptions, Trace, TraceStep};

use crate::compile::CompiledRule;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Arc<CompiledRule>>,
}

impl RuleSet {
    pub fn new(rules: impl IntoIterator<Item = CompiledRule>) -> Self {
        rules.into_iter().collect()
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// This set's rules followed by `other`'s, duplicates kept.
    #[must_use]
    pub fn combine(&self, other: &RuleSet) -> RuleSet {
        let mut rules = Vec::with_capacity(self.rules.len() + other.rules.len());
        rules.extend(self.rules.iter().cloned());
        rules.extend(other.rules.iter().cloned());
        RuleSet { rules }
    }

    /// The rules satisfying `predicate`, in their current order.
    #[must_use]
    pub fn select<P>(&self, predicate: P) -> RuleSet
    where
        P: Fn(&CompiledRule) -> bool,
    {
        self.rules
            .iter()
            .filter(|rule| predicate(rule))
            .cloned()
            .collect()
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

    pub fn ids(&self) -> Vec<u64> {
        self.iter().map(CompiledRule::id).collect()
    }

    /// Distinct rule names in first-seen order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for rule in self.iter() {
            if !names.contains(&rule.name()) {
                names.push(rule.name());
            }
        }
        names
    }

    /// The shared rule handles, in order.
    pub fn rules(&self) -> &[Arc<CompiledRule>] {
        &self.rules
    }
}

impl FromIterator<CompiledRule> for RuleSet {
    fn from_iter<T: IntoIterator<Item = CompiledRule>>(iter: T) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl FromIterator<Arc<CompiledRule>> for RuleSet {
    fn from_iter<T: IntoIterator<Item = Arc<CompiledRule>>>(iter: T) -> Self {
        RuleSet {
            rules: iter.into_iter().collect(),
        }
    }
}
