//! Check registry.
//!
//! Holds every known check, keyed by all of its aliases. Alias lookup is a
//! case-sensitive exact match. Claiming an alias another check already owns
//! is a startup-time configuration error and fails the registration; nothing
//! is partially inserted.

use std::collections::HashMap;
use std::sync::Arc;

use crate::check::Check;
use crate::error::EngineError;
use crate::settings::LintSettings;

/// Registry of all known checks for a run.
#[derive(Default)]
pub struct CheckRegistry {
    checks: Vec<Arc<dyn Check>>,
    aliases: HashMap<&'static str, usize>,
}

impl CheckRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a check under all of its aliases.
    ///
    /// Fails with [`EngineError::DuplicateRuleId`] if any alias is already
    /// claimed, and with [`EngineError::Registration`] if the check declares
    /// no aliases. On failure the registry is unchanged.
    pub fn register(&mut self, check: Arc<dyn Check>) -> Result<(), EngineError> {
        let meta = check.meta();
        if meta.aliases.is_empty() {
            return Err(EngineError::registration(
                "check declares an empty alias list",
            ));
        }
        for &alias in meta.aliases {
            if let Some(&existing) = self.aliases.get(alias) {
                return Err(EngineError::DuplicateRuleId {
                    alias: alias.to_string(),
                    existing: self.checks[existing].meta().primary_id().to_string(),
                });
            }
        }

        let slot = self.checks.len();
        for &alias in meta.aliases {
            self.aliases.insert(alias, slot);
        }
        self.checks.push(check);
        Ok(())
    }

    /// Looks up a check by any of its aliases (case-sensitive exact match).
    pub fn get(&self, alias: &str) -> Option<&Arc<dyn Check>> {
        self.aliases.get(alias).map(|&slot| &self.checks[slot])
    }

    /// All registered checks, in registration order.
    pub fn checks(&self) -> &[Arc<dyn Check>] {
        &self.checks
    }

    /// The checks active under the given settings, in registration order.
    pub fn active_checks(&self, settings: &LintSettings) -> Vec<Arc<dyn Check>> {
        self.checks
            .iter()
            .filter(|check| settings.is_enabled(check.meta()))
            .cloned()
            .collect()
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
