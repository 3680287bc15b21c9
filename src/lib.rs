//! Text Rules: deterministic regex rule pipelines for Arabic and English text
//!
//! A rule table is a flat list of regex rewrite rules, each tagged with
//! language and usage-event flags. Tables are validated and compiled once;
//! pipelines are ordered selections of their rules applied one after the
//! other.
//!
//! # Architecture
//!
//! Every operation reduces to one primitive: [`CompiledRule`], a matcher
//! bound to a replacement template. [`RuleSet`] orders rules and applies
//! them; [`RuleTable`] owns the full compiled table and derives sets from
//! it by filtering and combining, never by mutating.
//!
//! # Guarantees
//!
//! - Every rule in a set runs exactly once, in set order
//! - Deriving a set never changes the table or any other set
//! - Same input, same rules, same output
//! - Broken rules fail table construction, naming the rule
//!
//! # Example
//!
//! ```no_run
//! use text_rules::{registry, Language, Pipeline};
//!
//! let rules = registry::pipeline(Pipeline::Formatting(Language::English))?;
//! let out = rules.apply("Hello , world !")?;
//! assert_eq!(out, "Hello, world!");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod compile;
pub mod pipeline;
pub mod registry;
pub mod ruleset;
pub mod table;

// Re-exports
pub use compile::{compile, compile_rule, CompiledRule, Matcher, RuleCompilationError};
pub use pipeline::{Event, Language, Pipeline, UnknownPipeline};
pub use registry::RegistryError;
pub use ruleset::{ApplicationError, ApplyOptions, RuleSet, Trace, TraceStep};
pub use table::{
    load_from_path, load_from_str, validate, Format, LoadError, RawRule, RuleTable,
    ValidationError, ValidationIssue,
};
