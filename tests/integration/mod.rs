//! Behavior of the bundled rule table, rule by rule and as pipelines.

mod arabic_rules;
mod english_rules;
mod pipelines;

use text_rules::{registry, RuleTable};

pub fn table() -> &'static RuleTable {
    registry::global().expect("bundled table should build")
}

/// Run every rule with one of `names` over `text`.
pub fn run(names: &[&str], text: &str) -> String {
    table()
        .by_name(names)
        .apply(text)
        .expect("bundled rules have no length cap")
}
