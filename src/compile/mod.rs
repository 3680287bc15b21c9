//! Rule compilation: raw table records into ready-to-run matchers.

pub mod dialect;
pub mod errors;
pub mod flags;
pub mod template;

pub use errors::{FlagError, MatcherError, RuleCompilationError};
pub use flags::Flags;
pub use template::Template;

use crate::cache;
use crate::table::schema::{Metadata, RawRule};
use regex::Regex;
use std::borrow::Cow;

/// A compiled pattern bound to its replacement template.
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Regex,
    flags: Flags,
    template: Template,
}

impl Matcher {
    pub fn new(pattern: &str, flags: &str, replacement: &str) -> Result<Self, MatcherError> {
        let parsed = Flags::parse(flags).map_err(|source| MatcherError::Flags {
            flags: flags.to_string(),
            source,
        })?;
        let translated = dialect::translate(pattern);
        let regex =
            cache::get_or_compile(&translated, parsed).map_err(|e| MatcherError::Pattern {
                message: e.to_string(),
            })?;
        let template = Template::parse(replacement, &regex)?;

        Ok(Self {
            regex,
            flags: parsed,
            template,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Replace every non-overlapping match, left to right.
    ///
    /// Borrows the input when nothing matched.
    pub fn replace_all<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.regex.replace_all(text, self.template.replacer(text))
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// The pattern as handed to the regex engine.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// A rule ready to run.
///
/// Carries every field of its [`RawRule`] except `pattern` and `flags`,
/// which are folded into the [`Matcher`].
#[derive(Debug, Clone)]
pub struct CompiledRule {
    id: u64,
    name: String,
    replacement: String,
    description: Option<String>,
    metadata: Metadata,
    matcher: Matcher,
}

impl CompiledRule {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Shorthand for `metadata().is_set(axis)`.
    pub fn has(&self, axis: &str) -> bool {
        self.metadata.is_set(axis)
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }
}

pub fn compile_rule(raw: &RawRule) -> Result<CompiledRule, RuleCompilationError> {
    let matcher = Matcher::new(&raw.pattern, &raw.flags, &raw.replacement)
        .map_err(|e| e.for_rule(raw.id))?;

    Ok(CompiledRule {
        id: raw.id,
        name: raw.name.clone(),
        replacement: raw.replacement.clone(),
        description: raw.description.clone(),
        metadata: raw.metadata(),
        matcher,
    })
}

/// Compile a table in order. Stops at the first rule that fails.
pub fn compile(raw_rules: &[RawRule]) -> Result<Vec<CompiledRule>, RuleCompilationError> {
    let compiled = raw_rules
        .iter()
        .map(compile_rule)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(rules = compiled.len(), "compiled rule table");
    Ok(compiled)
}
