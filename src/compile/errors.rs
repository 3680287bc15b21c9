use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("flag '{0}' is not supported")]
    Unsupported(char),

    #[error("unknown flag '{0}'")]
    Unknown(char),

    #[error("flag '{0}' is repeated")]
    Repeated(char),

    #[error("flags 'u' and 'v' cannot be combined")]
    UnicodeConflict,
}

/// Failure to build a matcher, before it is attributed to a rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatcherError {
    #[error("invalid flags '{flags}': {source}")]
    Flags {
        flags: String,
        #[source]
        source: FlagError,
    },

    #[error("invalid pattern: {message}")]
    Pattern { message: String },

    #[error("replacement references unknown group '{group}'")]
    UnknownGroup { group: String },
}

impl MatcherError {
    pub fn for_rule(self, rule_id: u64) -> RuleCompilationError {
        match self {
            MatcherError::Flags { flags, source } => RuleCompilationError::InvalidFlags {
                rule_id,
                flags,
                source,
            },
            MatcherError::Pattern { message } => {
                RuleCompilationError::InvalidPattern { rule_id, message }
            }
            MatcherError::UnknownGroup { group } => {
                RuleCompilationError::UnknownGroup { rule_id, group }
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleCompilationError {
    #[error("rule {rule_id} has invalid flags '{flags}': {source}")]
    InvalidFlags {
        rule_id: u64,
        flags: String,
        #[source]
        source: FlagError,
    },

    #[error("rule {rule_id} has an invalid pattern: {message}")]
    InvalidPattern { rule_id: u64, message: String },

    #[error("rule {rule_id} replacement references unknown group '{group}'")]
    UnknownGroup { rule_id: u64, group: String },
}

impl RuleCompilationError {
    pub fn rule_id(&self) -> u64 {
        match self {
            RuleCompilationError::InvalidFlags { rule_id, .. }
            | RuleCompilationError::InvalidPattern { rule_id, .. }
            | RuleCompilationError::UnknownGroup { rule_id, .. } => *rule_id,
        }
    }
}
