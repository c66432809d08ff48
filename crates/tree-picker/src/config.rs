//! Picker settings, loaded from TOML

use crate::tree::{IdGenerator, SequentialIds, UuidIds, MAX_NAME_LEN};
use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a rename longer than `max_name_len`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenamePolicy {
    /// Keep the first `max_name_len` characters
    #[default]
    Clamp,
    /// Ignore the rename
    Reject,
}

/// How selected ids are treated when their node disappears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionPolicy {
    /// Drop ids that are no longer in the forest after every mutation
    #[default]
    Reconcile,
    /// Keep ids until they are toggled off or cleared
    LeaveStale,
}

/// Settings for a [`TreePicker`](crate::TreePicker) session
///
/// Every field has a default, so an empty file is a valid configuration.
///
/// ```toml
/// max-name-len = 60
/// rename-policy = "reject"
/// selection-policy = "leave-stale"
/// multi-select = true
/// id-prefix = "node-"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PickerConfig {
    /// Longest accepted name, at most [`MAX_NAME_LEN`]
    pub max_name_len: usize,
    pub rename_policy: RenamePolicy,
    pub selection_policy: SelectionPolicy,
    /// Default for toggles that don't say whether they add to the selection
    pub multi_select: bool,
    /// When set, new ids are `<prefix><n>` instead of random UUIDs
    pub id_prefix: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            max_name_len: MAX_NAME_LEN,
            rename_policy: RenamePolicy::default(),
            selection_policy: SelectionPolicy::default(),
            multi_select: false,
            id_prefix: None,
        }
    }
}

impl PickerConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse picker config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("Invalid config in {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            (1..=MAX_NAME_LEN).contains(&self.max_name_len),
            "max-name-len must be between 1 and {}, got {}",
            MAX_NAME_LEN,
            self.max_name_len
        );
        Ok(())
    }

    /// Build the id source this configuration asks for
    pub fn id_generator(&self) -> Box<dyn IdGenerator> {
        match &self.id_prefix {
            Some(prefix) => Box::new(SequentialIds::new(prefix.clone())),
            None => Box::new(UuidIds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(PickerConfig::from_toml_str("").unwrap(), PickerConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let config = PickerConfig::from_toml_str(
            r#"
            max-name-len = 20
            rename-policy = "reject"
            selection-policy = "leave-stale"
            multi-select = true
            id-prefix = "n"
            "#,
        )
        .unwrap();

        assert_eq!(config.max_name_len, 20);
        assert_eq!(config.rename_policy, RenamePolicy::Reject);
        assert_eq!(config.selection_policy, SelectionPolicy::LeaveStale);
        assert!(config.multi_select);
        assert_eq!(config.id_generator().next_id(), "n1");
    }

    #[test]
    fn test_rejects_out_of_range_name_len() {
        assert!(PickerConfig::from_toml_str("max-name-len = 0").is_err());
        assert!(PickerConfig::from_toml_str("max-name-len = 101").is_err());
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(PickerConfig::from_toml_str("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "multi-select = true").unwrap();

        let config = PickerConfig::load(file.path()).unwrap();
        assert!(config.multi_select);

        let missing = PickerConfig::load(file.path().with_extension("missing"));
        assert!(missing.is_err());
    }
}
