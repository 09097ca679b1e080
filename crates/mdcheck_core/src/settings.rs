//! Run settings: which checks are enabled and with what options.
//!
//! The engine receives settings already resolved by the configuration
//! collaborator (file discovery, merging, and inline overrides happen
//! upstream). What remains here is the mapping from check id to an
//! enable/disable flag or an options object, plus the merge of user options
//! over each check's defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::check::{Check, CheckMeta};
use crate::error::EngineError;

/// Setting for a single check, keyed by any of its aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckSetting {
    /// Check is enabled or disabled outright.
    Enabled(bool),
    /// Check is enabled with specific options.
    Options(Value),
}

impl CheckSetting {
    /// Returns whether the check is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            CheckSetting::Enabled(enabled) => *enabled,
            CheckSetting::Options(_) => true,
        }
    }

    /// The options object, if one was given.
    pub fn options(&self) -> Option<&Value> {
        match self {
            CheckSetting::Enabled(_) => None,
            CheckSetting::Options(value) => Some(value),
        }
    }
}

/// Settings for one lint run. Checks not mentioned are enabled with their
/// default options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintSettings {
    /// Per-check settings, keyed by any alias of the check.
    #[serde(default)]
    pub checks: HashMap<String, CheckSetting>,
}

impl LintSettings {
    /// Creates settings with every check enabled at its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        serde_json::from_str(json)
            .map_err(|e| EngineError::settings(format!("invalid settings JSON: {e}")))
    }

    /// Enables or disables a check by alias.
    pub fn set_enabled(mut self, alias: impl Into<String>, enabled: bool) -> Self {
        self.checks
            .insert(alias.into(), CheckSetting::Enabled(enabled));
        self
    }

    /// Sets options for a check by alias (implies enabled).
    pub fn set_options(mut self, alias: impl Into<String>, options: Value) -> Self {
        self.checks
            .insert(alias.into(), CheckSetting::Options(options));
        self
    }

    /// The setting entry covering a check, looked up through any of its
    /// aliases (case-sensitive exact match).
    pub fn setting_for(&self, meta: &CheckMeta) -> Option<&CheckSetting> {
        meta.aliases.iter().find_map(|alias| self.checks.get(*alias))
    }

    /// Whether a check is active for this run. Defaults to enabled.
    pub fn is_enabled(&self, meta: &CheckMeta) -> bool {
        self.setting_for(meta).is_none_or(CheckSetting::is_enabled)
    }

    /// The options for one check: user-provided keys merged over the
    /// check's defaults, key by key.
    pub fn resolved_options(&self, check: &dyn Check) -> Value {
        let mut resolved = check.default_settings();
        let overrides = self
            .setting_for(check.meta())
            .and_then(CheckSetting::options);
        if let (Value::Object(base), Some(Value::Object(user))) = (&mut resolved, overrides) {
            for (key, value) in user {
                base.insert(key.clone(), value.clone());
            }
        }
        resolved
    }
}
