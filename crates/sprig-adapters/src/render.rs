//! `{{variable}}` substitution for built-in source templates.

use std::collections::BTreeMap;

use sprig_core::domain::ProjectDescriptor;

/// Variables available to a template.
///
/// | Variable | Example |
/// |----------|---------|
/// | `packageName` | `com.example.demo` |
/// | `applicationName` | `DemoApplication` |
/// | `groupId` | `com.example` |
/// | `artifactId` | `demo` |
/// | `name` | `demo` |
/// | `description` | `Demo project` |
/// | `javaVersion` | `17` |
/// | `platformVersion` | `3.2.0` |
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context carrying the descriptor's naming variables.
    pub fn for_descriptor(descriptor: &ProjectDescriptor) -> Self {
        Self::new()
            .with_variable("packageName", descriptor.package_name())
            .with_variable("applicationName", descriptor.application_name())
            .with_variable("groupId", descriptor.group_id())
            .with_variable("artifactId", descriptor.artifact_id())
            .with_variable("name", descriptor.name())
            .with_variable("description", descriptor.description().unwrap_or_default())
            .with_variable("javaVersion", descriptor.language().jvm_version())
            .with_variable("platformVersion", descriptor.platform_version().as_declared())
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{key}}` with its value.
    ///
    /// Unknown placeholders are left as written. Substituted values are not
    /// rescanned.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    match self.get(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}
