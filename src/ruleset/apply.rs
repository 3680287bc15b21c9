//! Sequential application of a rule set to one string.
//!
//! Every rule runs exactly once, in set order, over the output of the rule
//! before it. Nothing is skipped, reordered or merged, including rules
//! that share a name: a multi-step family relies on its members running
//! in the order they were assembled.

use crate::compile::CompiledRule;
use crate::ruleset::RuleSet;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("rule {rule_id} ({name}) grew the text to {len} bytes, over the {limit} byte limit")]
    OutputTooLarge {
        rule_id: u64,
        name: String,
        len: usize,
        limit: usize,
    },
}

/// Options for [`RuleSet::apply_with`].
///
/// `trace` receives one human-readable line for the original text and one
/// after every rule, so `n + 1` lines for `n` rules.
///
/// `max_len` caps the byte length of the text between steps. A rule whose
/// output grows past the cap stops the run with
/// [`ApplicationError::OutputTooLarge`]; the partial result is discarded.
#[derive(Default)]
pub struct ApplyOptions<'a> {
    pub trace: Option<&'a mut dyn FnMut(&str)>,
    pub max_len: Option<usize>,
}

impl<'a> ApplyOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(mut self, sink: &'a mut dyn FnMut(&str)) -> Self {
        self.trace = Some(sink);
        self
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }
}

impl fmt::Debug for ApplyOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplyOptions")
            .field("trace", &self.trace.is_some())
            .field("max_len", &self.max_len)
            .finish()
    }
}

/// The text after one rule ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    pub rule_id: u64,
    pub name: String,
    pub output: String,
    pub changed: bool,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "After (id,name)=({},{}): {}",
            self.rule_id, self.name, self.output
        )
    }
}

/// Every intermediate state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub original: String,
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// The final text; the original when the set was empty.
    pub fn output(&self) -> &str {
        self.steps
            .last()
            .map_or(self.original.as_str(), |step| step.output.as_str())
    }

    /// Steps that changed the text.
    pub fn effective(&self) -> impl Iterator<Item = &TraceStep> {
        self.steps.iter().filter(|step| step.changed)
    }

    /// The same lines a trace sink would have received.
    pub fn lines(&self) -> Vec<String> {
        std::iter::once(original_line(&self.original))
            .chain(self.steps.iter().map(ToString::to_string))
            .collect()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", original_line(&self.original))?;
        for step in &self.steps {
            write!(f, "\n{step}")?;
        }
        Ok(())
    }
}

fn original_line(text: &str) -> String {
    format!("Original: {text}")
}

impl RuleSet {
    /// Run every rule over `text` and return the result.
    ///
    /// Without a length cap this never fails.
    pub fn apply(&self, text: &str) -> Result<String, ApplicationError> {
        self.apply_with(text, ApplyOptions::default())
    }

    pub fn apply_with(
        &self,
        text: &str,
        options: ApplyOptions<'_>,
    ) -> Result<String, ApplicationError> {
        let ApplyOptions { mut trace, max_len } = options;

        if let Some(sink) = trace.as_mut() {
            sink(&original_line(text));
        }

        self.run(text, max_len, |rule, output, _| {
            if let Some(sink) = trace.as_mut() {
                sink(&format!(
                    "After (id,name)=({},{}): {}",
                    rule.id(),
                    rule.name(),
                    output
                ));
            }
        })
    }

    /// Run every rule and keep each intermediate result.
    pub fn trace(&self, text: &str) -> Result<Trace, ApplicationError> {
        let mut steps = Vec::with_capacity(self.len());
        self.run(text, None, |rule, output, changed| {
            steps.push(TraceStep {
                rule_id: rule.id(),
                name: rule.name().to_string(),
                output: output.to_string(),
                changed,
            });
        })?;

        Ok(Trace {
            original: text.to_string(),
            steps,
        })
    }

    fn run<F>(
        &self,
        text: &str,
        max_len: Option<usize>,
        mut on_step: F,
    ) -> Result<String, ApplicationError>
    where
        F: FnMut(&CompiledRule, &str, bool),
    {
        let mut current = text.to_string();

        for rule in self.rules() {
            let replaced = rule.matcher().replace_all(&current);
            let changed = matches!(replaced, Cow::Owned(ref next) if *next != current);

            if let Cow::Owned(next) = replaced {
                if let Some(limit) = max_len {
                    if next.len() > limit && next.len() > current.len() {
                        return Err(ApplicationError::OutputTooLarge {
                            rule_id: rule.id(),
                            name: rule.name().to_string(),
                            len: next.len(),
                            limit,
                        });
                    }
                }
                current = next;
            }

            tracing::trace!(rule_id = rule.id(), rule_name = rule.name(), changed, "applied rule");
            on_step(rule, &current, changed);
        }

        Ok(current)
    }
}
