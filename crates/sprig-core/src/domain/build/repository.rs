use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Username/password pair for an authenticated repository.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Keep secrets out of logs and error reports.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// An artifact repository declared in the build.
///
/// Identity is the `id`; two repositories with the same id must agree on
/// the url.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    id: String,
    name: String,
    url: String,
    #[serde(default)]
    snapshots_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credentials: Option<Credentials>,
}

impl Repository {
    pub const MAVEN_CENTRAL_ID: &'static str = "maven-central";
    pub const MAVEN_CENTRAL_URL: &'static str = "https://repo.maven.apache.org/maven2";

    /// Start a builder. The name defaults to the id until overridden.
    pub fn with_id_and_url(id: impl Into<String>, url: impl Into<String>) -> RepositoryBuilder {
        RepositoryBuilder {
            id: id.into(),
            name: None,
            url: url.into(),
            snapshots_enabled: false,
            credentials: None,
        }
    }

    /// The default public repository every build can resolve from.
    pub fn maven_central() -> Self {
        Self {
            id: Self::MAVEN_CENTRAL_ID.to_string(),
            name: "Maven Central".to_string(),
            url: Self::MAVEN_CENTRAL_URL.to_string(),
            snapshots_enabled: false,
            credentials: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn url(&self) -> &str {
        &self.url
    }
    pub const fn snapshots_enabled(&self) -> bool {
        self.snapshots_enabled
    }
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Merge an entry with the same id into this one.
    ///
    /// The snapshots flag is OR'd; existing credentials are kept unless this
    /// entry has none. The caller has already checked the urls agree.
    pub(crate) fn absorb(&mut self, incoming: Repository) {
        self.snapshots_enabled |= incoming.snapshots_enabled;
        if self.credentials.is_none() {
            self.credentials = incoming.credentials;
        }
    }

    /// Validate the invariants a builder enforces, e.g. after deserialization.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::InvalidRepository("id is empty".into()));
        }
        if self.url.trim().is_empty() {
            return Err(DomainError::InvalidRepository(format!(
                "repository '{}' has no url",
                self.id
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

/// Builder for [`Repository`].
#[derive(Debug, Clone)]
pub struct RepositoryBuilder {
    id: String,
    name: Option<String>,
    url: String,
    snapshots_enabled: bool,
    credentials: Option<Credentials>,
}

impl RepositoryBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn snapshots_enabled(mut self, enabled: bool) -> Self {
        self.snapshots_enabled = enabled;
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> Result<Repository, DomainError> {
        let repository = Repository {
            name: self.name.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            url: self.url,
            snapshots_enabled: self.snapshots_enabled,
            credentials: self.credentials,
        };
        repository.validate()?;
        Ok(repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_id() {
        let repo = Repository::with_id_and_url("spring-milestones", "https://repo.spring.io/milestone")
            .build()
            .unwrap();
        assert_eq!(repo.name(), "spring-milestones");
        assert!(!repo.snapshots_enabled());
        assert!(repo.credentials().is_none());
    }

    #[test]
    fn name_can_be_overridden() {
        let repo = Repository::with_id_and_url("s", "https://repo.spring.io/snapshot")
            .name("Spring Snapshots")
            .snapshots_enabled(true)
            .build()
            .unwrap();
        assert_eq!(repo.name(), "Spring Snapshots");
        assert!(repo.snapshots_enabled());
    }

    #[test]
    fn empty_id_or_url_is_rejected() {
        assert!(Repository::with_id_and_url("", "https://x").build().is_err());
        assert!(Repository::with_id_and_url("x", " ").build().is_err());
    }

    #[test]
    fn maven_central_is_well_known() {
        let central = Repository::maven_central();
        assert_eq!(central.id(), "maven-central");
        assert_eq!(central.url(), "https://repo.maven.apache.org/maven2");
    }

    #[test]
    fn credentials_are_redacted_in_debug() {
        let creds = Credentials::new("bob", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
    }
}
