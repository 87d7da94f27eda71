//! Configuration loading and validation
//!
//! ```toml
//! shell = ["bash", "-c"]
//!
//! [[action]]
//! name = "build"
//! on = ["write", "create"]
//! interval = "500ms"
//! run = "make"
//!
//! [[action.interval_action]]
//! on = "self"
//! do = "retry"
//! ```

use crate::error::ConfigError;
use crate::event::EventKind;
use crate::interval;
use crate::policy::{Disposition, InterferenceRule, TriggerSpec};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Validated configuration, read-only after load
#[derive(Debug, Clone)]
pub struct Config {
    /// Shell executable followed by its arguments; the command is appended
    pub shell: Vec<String>,
    /// Actions in declaration order
    pub actions: Vec<Arc<Action>>,
}

/// A named unit of work triggered by notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    /// Kinds that trigger this action
    pub on: Vec<EventKind>,
    /// Delay before execution, as configured
    pub interval: String,
    /// Delay before execution in milliseconds
    pub interval_ms: u64,
    /// Interference rules, evaluated in order
    pub interval_action: Vec<InterferenceRule>,
    /// Shell command
    pub run: String,
}

impl Action {
    pub fn triggered_by(&self, kind: EventKind) -> bool {
        self.on.contains(&kind)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    action: Vec<RawAction>,
    #[serde(default = "default_shell")]
    shell: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAction {
    #[serde(default)]
    name: String,
    #[serde(default)]
    on: Vec<String>,
    #[serde(default = "default_interval")]
    interval: String,
    #[serde(default)]
    interval_action: Vec<InterferenceRule>,
    #[serde(default)]
    run: String,
}

fn default_interval() -> String {
    "0".to_string()
}

fn default_shell() -> Vec<String> {
    if cfg!(windows) {
        vec!["cmd.exe".to_string(), "/c".to_string()]
    } else {
        vec!["bash".to_string(), "-c".to_string()]
    }
}

impl Config {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(contents)?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self, ConfigError> {
        if raw.action.is_empty() {
            return Err(ConfigError::NoActions);
        }
        if raw.shell.is_empty() {
            return Err(ConfigError::Empty {
                field: "shell".to_string(),
            });
        }

        let mut actions: Vec<Arc<Action>> = Vec::with_capacity(raw.action.len());
        for (i, action) in raw.action.into_iter().enumerate() {
            let action = validate_action(i, action)?;
            if actions.iter().any(|a| a.name == action.name) {
                return Err(ConfigError::DuplicateAction { name: action.name });
            }
            actions.push(Arc::new(action));
        }

        Ok(Self {
            shell: raw.shell,
            actions,
        })
    }

    /// Actions triggered by `kind`, in declaration order
    pub fn actions_on(&self, kind: EventKind) -> impl Iterator<Item = &Arc<Action>> + '_ {
        self.actions.iter().filter(move |a| a.triggered_by(kind))
    }

    pub fn action(&self, name: &str) -> Option<&Arc<Action>> {
        self.actions.iter().find(|a| a.name == name)
    }
}

fn validate_action(index: usize, raw: RawAction) -> Result<Action, ConfigError> {
    let field = |name: &str| format!("action[{}].{}", index, name);

    if raw.name.is_empty() {
        return Err(ConfigError::Empty {
            field: field("name"),
        });
    }

    let mut on = Vec::with_capacity(raw.on.len());
    for (j, name) in raw.on.iter().enumerate() {
        let kind: EventKind = name.parse().map_err(|_| ConfigError::InvalidTriggerKind {
            field: format!("action[{}].on[{}]", index, j),
            value: name.clone(),
        })?;
        on.push(kind);
    }

    let interval_ms = interval::parse_field(&field("interval"), &raw.interval)?;

    for (j, rule) in raw.interval_action.iter().enumerate() {
        for (k, spec) in rule.on.iter().enumerate() {
            spec.parse::<TriggerSpec>()
                .map_err(|_| ConfigError::InvalidTriggerSpec {
                    field: format!("action[{}].interval_action[{}].on[{}]", index, j, k),
                    value: spec.clone(),
                })?;
        }
        rule.disposition
            .parse::<Disposition>()
            .map_err(|_| ConfigError::InvalidDisposition {
                field: format!("action[{}].interval_action[{}].do", index, j),
                value: rule.disposition.clone(),
            })?;
    }

    if raw.run.is_empty() {
        return Err(ConfigError::Empty { field: field("run") });
    }

    Ok(Action {
        name: raw.name,
        on,
        interval: raw.interval,
        interval_ms,
        interval_action: raw.interval_action,
        run: raw.run,
    })
}
