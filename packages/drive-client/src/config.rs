use std::fmt;
use std::path::{Path, PathBuf};

/// Listing metadata across shared drives.
pub const SCOPE_METADATA_READONLY: &str = "https://www.googleapis.com/auth/drive.metadata.readonly";

/// Creating and editing files this app owns.
pub const SCOPE_FILE: &str = "https://www.googleapis.com/auth/drive.file";

/// Settings for one Drive folder.
#[derive(Clone)]
pub struct DriveConfig {
    /// Target folder (may live in a Shared Drive)
    pub folder_id: String,

    /// Project billed for API quota, sent as `x-goog-user-project`
    pub quota_project: Option<String>,

    /// OAuth client secret file (only used for error hints)
    pub client_secret_path: PathBuf,

    /// Authorized-user token file, rewritten after each refresh
    pub token_path: PathBuf,

    pub scopes: Vec<String>,

    /// Base64-encoded service-account key JSON; tried before the token file
    pub service_account: Option<String>,
}

impl DriveConfig {
    /// Defaults relative to a configuration directory holding
    /// `client_secret.json` and `tokens.json`.
    pub fn new(folder_id: impl Into<String>, conf_dir: impl AsRef<Path>) -> Self {
        let conf_dir = conf_dir.as_ref();
        Self {
            folder_id: folder_id.into(),
            quota_project: None,
            client_secret_path: conf_dir.join("client_secret.json"),
            token_path: conf_dir.join("tokens.json"),
            scopes: vec![SCOPE_METADATA_READONLY.to_string(), SCOPE_FILE.to_string()],
            service_account: None,
        }
    }

    pub fn with_quota_project(mut self, project: impl Into<String>) -> Self {
        self.quota_project = Some(project.into());
        self
    }

    pub fn with_service_account(mut self, encoded_key: impl Into<String>) -> Self {
        self.service_account = Some(encoded_key.into());
        self
    }

    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    pub fn with_client_secret_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.client_secret_path = path.into();
        self
    }

    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }
}

impl fmt::Debug for DriveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveConfig")
            .field("folder_id", &self.folder_id)
            .field("quota_project", &self.quota_project)
            .field("client_secret_path", &self.client_secret_path)
            .field("token_path", &self.token_path)
            .field("scopes", &self.scopes)
            .field(
                "service_account",
                &self.service_account.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_conf_dir() {
        let config = DriveConfig::new("folder123", "/srv/app/conf");
        assert_eq!(config.token_path, PathBuf::from("/srv/app/conf/tokens.json"));
        assert_eq!(
            config.client_secret_path,
            PathBuf::from("/srv/app/conf/client_secret.json")
        );
        assert_eq!(config.scopes.len(), 2);
    }

    #[test]
    fn test_debug_hides_service_account() {
        let config = DriveConfig::new("f", "conf").with_service_account("c2VjcmV0");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("c2VjcmV0"));
        assert!(debug.contains("[REDACTED]"));
    }
}
