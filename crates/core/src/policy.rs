//! Interference policy resolution
//!
//! While an invocation is sleeping, newer notifications may interfere with
//! it. Each action carries an ordered list of rules deciding what happens:
//!
//! ```toml
//! [[action.interval_action]]
//! on = ["self", "!chmod"]
//! do = "retry"
//! ```
//!
//! Rules are evaluated in declaration order and the first matching
//! specifier wins. `self` stands for the kind that triggered the sleeping
//! invocation; a leading `!` negates the specifier.

use crate::error::PolicyError;
use crate::event::EventKind;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// Outcome of arbitration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep the original deadline and execute
    Ignore,
    /// Restart the delay window from scratch
    Retry,
    /// Drop the invocation without executing
    Cancel,
}

impl FromStr for Disposition {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ignore" => Ok(Disposition::Ignore),
            "retry" => Ok(Disposition::Retry),
            "cancel" => Ok(Disposition::Cancel),
            _ => Err(PolicyError::InvalidDisposition(s.to_string())),
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Disposition::Ignore => "ignored",
            Disposition::Retry => "retried",
            Disposition::Cancel => "canceled",
        })
    }
}

/// What a specifier refers to before `self` is substituted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    SelfKind,
    Kind(EventKind),
}

/// A parsed `on` entry of an interference rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerSpec {
    pub negated: bool,
    pub target: Target,
}

impl TriggerSpec {
    /// Kind this specifier compares against, given the invocation's own kind
    pub fn effective(&self, self_kind: EventKind) -> EventKind {
        match self.target {
            Target::SelfKind => self_kind,
            Target::Kind(kind) => kind,
        }
    }

    pub fn matches(&self, self_kind: EventKind, incoming: EventKind) -> bool {
        (self.effective(self_kind) == incoming) != self.negated
    }
}

impl FromStr for TriggerSpec {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negated, name) = match s.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let target = if name == "self" {
            Target::SelfKind
        } else {
            Target::Kind(
                name.parse()
                    .map_err(|_| PolicyError::InvalidTriggerKind(s.to_string()))?,
            )
        };
        Ok(Self { negated, target })
    }
}

/// One `interval_action` entry, kept in its configured text form
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterferenceRule {
    #[serde(deserialize_with = "one_or_many")]
    pub on: Vec<String>,
    #[serde(rename = "do")]
    pub disposition: String,
}

impl InterferenceRule {
    pub fn new(on: &[&str], disposition: &str) -> Self {
        Self {
            on: on.iter().map(|s| s.to_string()).collect(),
            disposition: disposition.to_string(),
        }
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

/// Decide what a sleeping invocation does when a newer notification arrives.
///
/// Returns `default` when no rule matches.
pub fn resolve(
    rules: &[InterferenceRule],
    self_kind: EventKind,
    incoming: EventKind,
    default: Disposition,
) -> Result<Disposition, PolicyError> {
    for rule in rules {
        for on in &rule.on {
            let spec: TriggerSpec = on.parse()?;
            if spec.matches(self_kind, incoming) {
                return rule.disposition.parse();
            }
        }
    }
    Ok(default)
}
