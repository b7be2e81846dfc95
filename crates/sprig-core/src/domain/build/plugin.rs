use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::dependency::DependencyId;
use crate::domain::error::DomainError;

/// A plugin configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PluginSetting {
    Value(String),
    /// Repeated `item` elements, e.g. `<args><arg>..</arg></args>`.
    List { item: String, values: Vec<String> },
}

impl fmt::Display for PluginSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.write_str(value),
            Self::List { values, .. } => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// A build plugin declaration.
///
/// Identity is `(group, artifact)`, shared with dependencies through
/// [`DependencyId`]. Configuration is an ordered map so two plugins
/// with the same settings always compare and serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plugin {
    #[serde(flatten)]
    id: DependencyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    configuration: BTreeMap<String, PluginSetting>,
}

impl Plugin {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            id: DependencyId::new(group_id, artifact_id),
            version: None,
            configuration: BTreeMap::new(),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_configuration(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.configuration
            .insert(key.into(), PluginSetting::Value(value.into()));
        self
    }

    /// A list-valued setting written as one `item` element per value.
    pub fn with_list_configuration<I, S>(
        mut self,
        key: impl Into<String>,
        item: impl Into<String>,
        values: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let setting = PluginSetting::List {
            item: item.into(),
            values: values.into_iter().map(Into::into).collect(),
        };
        self.configuration.insert(key.into(), setting);
        self
    }

    pub fn id(&self) -> &DependencyId {
        &self.id
    }
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }
    pub fn configuration(&self) -> &BTreeMap<String, PluginSetting> {
        &self.configuration
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.id.validate()
    }
}

impl fmt::Display for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(v) = &self.version {
            write!(f, ":{v}")?;
        }
        if !self.configuration.is_empty() {
            let settings: Vec<String> = self
                .configuration
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            write!(f, " {{{}}}", settings.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_order_is_irrelevant() {
        let a = Plugin::new("g", "p")
            .with_configuration("b", "2")
            .with_configuration("a", "1");
        let b = Plugin::new("g", "p")
            .with_configuration("a", "1")
            .with_configuration("b", "2");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "g:p {a=1, b=2}");
    }

    #[test]
    fn list_settings_keep_value_order() {
        let plugin = Plugin::new("g", "p").with_list_configuration("args", "arg", ["-b", "-a"]);
        assert_eq!(
            plugin.configuration()["args"],
            PluginSetting::List {
                item: "arg".into(),
                values: vec!["-b".into(), "-a".into()],
            }
        );
        assert_eq!(plugin.to_string(), "g:p {args=[-b, -a]}");
    }
}
