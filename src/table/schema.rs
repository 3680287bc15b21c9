use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Axis names the bundled table and the pipeline factories agree on.
pub mod axis {
    pub const ARABIC: &str = "arabic";
    pub const ENGLISH: &str = "english";
    pub const ON_BLUR: &str = "onBlur";
    pub const ON_PASTE: &str = "onPaste";
    pub const ON_SANITIZE: &str = "onSanitize";
}

/// Fields that carry no runtime behavior and are stripped when packing.
pub const NON_SEMANTIC_FIELDS: [&str; 3] = ["timestamp", "last_updated", "description"];

/// One record of the rule table, as stored.
///
/// Every field that is not part of the fixed shape lands in `extra`.
/// Boolean and numeric extras are metadata axes, except the authoring
/// fields in [`NON_SEMANTIC_FIELDS`]; anything else is carried but never
/// interpreted. A `description` that is not a string is dropped.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawRule {
    pub id: u64,
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub flags: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(
        default,
        deserialize_with = "text_or_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}

impl RawRule {
    pub fn new(
        id: u64,
        name: impl Into<String>,
        pattern: impl Into<String>,
        flags: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            pattern: pattern.into(),
            flags: flags.into(),
            replacement: replacement.into(),
            description: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set a metadata axis flag (builder style, mostly for tests and tooling).
    pub fn with_axis(mut self, axis: &str, enabled: bool) -> Self {
        self.extra
            .insert(axis.to_string(), Value::from(u8::from(enabled)));
        self
    }

    pub fn metadata(&self) -> Metadata {
        Metadata::from_fields(&self.extra)
    }
}

/// Axis-name to flag mapping of a rule.
///
/// Stored tables use `0`/`1` as often as `true`/`false`; both are read.
/// A missing axis is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    axes: BTreeMap<String, bool>,
}

impl Metadata {
    pub fn from_fields(fields: &BTreeMap<String, Value>) -> Self {
        let axes = fields
            .iter()
            .filter(|(key, _)| !NON_SEMANTIC_FIELDS.contains(&key.as_str()))
            .filter_map(|(key, value)| axis_flag(value).map(|flag| (key.clone(), flag)))
            .collect();
        Self { axes }
    }

    pub fn is_set(&self, axis: &str) -> bool {
        self.axes.get(axis).copied().unwrap_or(false)
    }

    pub fn set(&mut self, axis: impl Into<String>, enabled: bool) {
        self.axes.insert(axis.into(), enabled);
    }

    /// Axes that are switched on, in name order.
    pub fn enabled(&self) -> impl Iterator<Item = &str> {
        self.axes
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(axis, _)| axis.as_str())
    }
}

fn axis_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    }
}

/// Check the table-level invariants the engine relies on but cannot enforce
/// while applying: unique ids, non-empty names, and multi-step families
/// (rules sharing a name) stored contiguously in ascending id order.
///
/// An empty pattern is valid; it matches the empty string.
pub fn validate(rules: &[RawRule]) -> Result<(), ValidationError> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();
    // name -> (index of last member, id of last member)
    let mut families: HashMap<&str, (usize, u64)> = HashMap::new();

    for (index, rule) in rules.iter().enumerate() {
        if !seen_ids.insert(rule.id) {
            issues.push(ValidationIssue::DuplicateId { rule_id: rule.id });
        }
        if rule.name.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                rule_id: rule.id,
                field: "name",
            });
        }

        if let Some(&(last_index, last_id)) = families.get(rule.name.as_str()) {
            if last_index + 1 != index {
                issues.push(ValidationIssue::SplitFamily {
                    name: rule.name.clone(),
                    rule_id: rule.id,
                });
            }
            if rule.id <= last_id {
                issues.push(ValidationIssue::OutOfOrder {
                    name: rule.name.clone(),
                    rule_id: rule.id,
                    previous_id: last_id,
                });
            }
        }
        families.insert(rule.name.as_str(), (index, rule.id));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    DuplicateId {
        rule_id: u64,
    },
    MissingField {
        rule_id: u64,
        field: &'static str,
    },
    /// A member of a multi-step family has an id not above its predecessor.
    OutOfOrder {
        name: String,
        rule_id: u64,
        previous_id: u64,
    },
    /// Members of a multi-step family are separated by other rules.
    SplitFamily {
        name: String,
        rule_id: u64,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::DuplicateId { rule_id } => {
                write!(f, "rule id {rule_id} is used more than once")
            }
            ValidationIssue::MissingField { rule_id, field } => {
                write!(f, "rule {rule_id} missing required field '{field}'")
            }
            ValidationIssue::OutOfOrder {
                name,
                rule_id,
                previous_id,
            } => write!(
                f,
                "rule {rule_id} of '{name}' must come after rule {previous_id} in id order"
            ),
            ValidationIssue::SplitFamily { name, rule_id } => write!(
                f,
                "rule {rule_id} of '{name}' is separated from the rest of its family"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: u64, name: &str) -> RawRule {
        RawRule::new(id, name, "x", "g", "y")
    }

    #[test]
    fn metadata_reads_numbers_and_booleans() {
        let raw: RawRule = serde_json::from_str(
            r#"{"id": 1, "name": "n", "pattern": "a", "flags": "g", "replacement": "b",
                "arabic": 1, "english": 0, "onBlur": true, "onPaste": false,
                "timestamp": "2023-01-01", "last_updated": "2023-02-01"}"#,
        )
        .unwrap();

        let meta = raw.metadata();
        assert!(meta.is_set(axis::ARABIC));
        assert!(!meta.is_set(axis::ENGLISH));
        assert!(meta.is_set(axis::ON_BLUR));
        assert!(!meta.is_set(axis::ON_PASTE));
        assert!(!meta.is_set(axis::ON_SANITIZE));
        assert!(!meta.is_set("timestamp"));
        assert_eq!(meta.enabled().collect::<Vec<_>>(), vec!["arabic", "onBlur"]);
    }

    #[test]
    fn missing_flags_and_replacement_default_to_empty() {
        let raw: RawRule =
            serde_json::from_str(r#"{"id": 7, "name": "strip", "pattern": "x"}"#).unwrap();
        assert_eq!(raw.flags, "");
        assert_eq!(raw.replacement, "");
        assert!(raw.description.is_none());
    }

    #[test]
    fn validate_accepts_ordered_families() {
        let rules = vec![rule(1, "a"), rule(2, "a"), rule(5, "b"), rule(9, "c")];
        assert!(validate(&rules).is_ok());
    }

    #[test]
    fn validate_accepts_empty_table() {
        assert!(validate(&[]).is_ok());
    }

    #[test]
    fn validate_reports_duplicate_ids() {
        let err = validate(&[rule(1, "a"), rule(1, "b")]).unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::DuplicateId { rule_id: 1 }]);
    }

    #[test]
    fn validate_reports_family_out_of_order() {
        let err = validate(&[rule(4, "quotes"), rule(3, "quotes")]).unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::OutOfOrder {
                name: "quotes".to_string(),
                rule_id: 3,
                previous_id: 4,
            }]
        );
    }

    #[test]
    fn validate_reports_split_family() {
        let err = validate(&[rule(1, "a"), rule(2, "b"), rule(3, "a")]).unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::SplitFamily {
                name: "a".to_string(),
                rule_id: 3,
            }]
        );
    }

    #[test]
    fn validate_reports_blank_name() {
        let blank = RawRule::new(3, " ", "x", "", "");
        let err = validate(&[blank]).unwrap_err();
        assert_eq!(err.to_string(), "rule 3 missing required field 'name'");
    }

    #[test]
    fn validate_accepts_empty_pattern() {
        assert!(validate(&[RawRule::new(1, "everywhere", "", "g", "-")]).is_ok());
    }

    #[test]
    fn authoring_fields_of_any_type_are_ignored() {
        let raw: RawRule = serde_json::from_str(
            r#"{"id": 1, "name": "n", "pattern": "a", "english": 1,
                "description": 42, "timestamp": 1700000000, "last_updated": true}"#,
        )
        .unwrap();

        assert!(raw.description.is_none());
        let meta = raw.metadata();
        assert!(!meta.is_set("timestamp"));
        assert!(!meta.is_set("last_updated"));
        assert_eq!(meta.enabled().collect::<Vec<_>>(), vec!["english"]);
    }

    #[test]
    fn null_description_is_none() {
        let raw: RawRule = serde_json::from_str(
            r#"{"id": 1, "name": "n", "pattern": "a", "description": null}"#,
        )
        .unwrap();
        assert!(raw.description.is_none());
    }
}
