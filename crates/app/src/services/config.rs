//! Service configuration.

use serde::Deserialize;

/// Settings shared by both service templates.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Identifier of the owning application, reported on failures the
    /// services produce themselves (e.g. a tenant mismatch).
    pub application_id: Option<String>,
    /// When the `on_changed` hook fires during an update.
    pub change_hook: ChangeHookPolicy,
}

/// When `on_changed` runs relative to the repository update.
///
/// The historical contract fires it only when the repository **rejects**
/// the update, unlike `on_created`/`on_removed` which follow success.
/// Dependent implementations rely on that, so it stays the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeHookPolicy {
    /// Fire with the submitted model when the repository update fails.
    #[default]
    OnFailure,
    /// Fire with the stored model when the repository update succeeds.
    OnSuccess,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_firing_change_hook_on_failure() {
        let config = ServiceConfig::default();
        assert_eq!(config.change_hook, ChangeHookPolicy::OnFailure);
        assert!(config.application_id.is_none());
    }

    #[test]
    fn should_parse_from_toml() {
        let config: ServiceConfig = toml::from_str(
            r#"
application_id = "billing"
change_hook = "on_success"
"#,
        )
        .unwrap();
        assert_eq!(config.application_id.as_deref(), Some("billing"));
        assert_eq!(config.change_hook, ChangeHookPolicy::OnSuccess);
    }

    #[test]
    fn should_reject_unknown_policy() {
        let result: Result<ServiceConfig, _> = toml::from_str(r#"change_hook = "sometimes""#);
        assert!(result.is_err());
    }
}
