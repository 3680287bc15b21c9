//! Named pipelines over a rule table.
//!
//! Pipelines are derived by filtering the table along the language and
//! usage-event axes and combining the results. Combination order is fixed:
//!
//! ```text
//! formatting(lang) = on_paste(lang) + on_blur(lang)
//! sanitizing(lang) = formatting(lang) + on_sanitize(lang)
//! ```
//!
//! A rule flagged for several events appears once per event it belongs to.

use crate::ruleset::RuleSet;
use crate::table::schema::axis;
use crate::table::RuleTable;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Arabic,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Arabic, Language::English];

    pub fn axis(self) -> &'static str {
        match self {
            Language::Arabic => axis::ARABIC,
            Language::English => axis::ENGLISH,
        }
    }
}

/// The UI event a rule is meant to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    OnBlur,
    OnPaste,
    OnSanitize,
}

impl Event {
    pub const ALL: [Event; 3] = [Event::OnBlur, Event::OnPaste, Event::OnSanitize];

    pub fn axis(self) -> &'static str {
        match self {
            Event::OnBlur => axis::ON_BLUR,
            Event::OnPaste => axis::ON_PASTE,
            Event::OnSanitize => axis::ON_SANITIZE,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Event::OnBlur => "on-blur",
            Event::OnPaste => "on-paste",
            Event::OnSanitize => "on-sanitize",
        }
    }
}

/// A named way of deriving a rule set from a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    Language(Language),
    Event(Language, Event),
    Formatting(Language),
    Sanitizing(Language),
}

impl Pipeline {
    /// Every pipeline, for listings and help text.
    pub fn all() -> Vec<Pipeline> {
        let mut pipelines = Vec::new();
        for language in Language::ALL {
            pipelines.push(Pipeline::Language(language));
            for event in Event::ALL {
                pipelines.push(Pipeline::Event(language, event));
            }
            pipelines.push(Pipeline::Formatting(language));
            pipelines.push(Pipeline::Sanitizing(language));
        }
        pipelines
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Arabic => "arabic",
            Language::English => "english",
        })
    }
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Language(language) => write!(f, "{language}"),
            Pipeline::Event(language, event) => write!(f, "{language}-{}", event.slug()),
            Pipeline::Formatting(language) => write!(f, "{language}-formatting"),
            Pipeline::Sanitizing(language) => write!(f, "{language}-sanitizing"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPipeline(pub String);

impl fmt::Display for UnknownPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown pipeline '{}'", self.0)
    }
}

impl std::error::Error for UnknownPipeline {}

impl FromStr for Pipeline {
    type Err = UnknownPipeline;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Pipeline::all()
            .into_iter()
            .find(|pipeline| pipeline.to_string() == wanted)
            .ok_or_else(|| UnknownPipeline(s.to_string()))
    }
}

impl RuleTable {
    /// Rules flagged for `language`.
    pub fn language(&self, language: Language) -> RuleSet {
        let axis = language.axis();
        self.filtered(|rule| rule.has(axis))
    }

    /// Rules flagged for both `language` and `event`.
    pub fn event(&self, language: Language, event: Event) -> RuleSet {
        let axis = event.axis();
        self.language(language).select(|rule| rule.has(axis))
    }

    pub fn on_blur(&self, language: Language) -> RuleSet {
        self.event(language, Event::OnBlur)
    }

    pub fn on_paste(&self, language: Language) -> RuleSet {
        self.event(language, Event::OnPaste)
    }

    pub fn on_sanitize(&self, language: Language) -> RuleSet {
        self.event(language, Event::OnSanitize)
    }

    /// Paste rules, then blur rules.
    pub fn formatting(&self, language: Language) -> RuleSet {
        self.on_paste(language).combine(&self.on_blur(language))
    }

    /// Formatting rules, then sanitize rules.
    pub fn sanitizing(&self, language: Language) -> RuleSet {
        self.formatting(language)
            .combine(&self.on_sanitize(language))
    }

    pub fn pipeline(&self, pipeline: Pipeline) -> RuleSet {
        match pipeline {
            Pipeline::Language(language) => self.language(language),
            Pipeline::Event(language, event) => self.event(language, event),
            Pipeline::Formatting(language) => self.formatting(language),
            Pipeline::Sanitizing(language) => self.sanitizing(language),
        }
    }
}
