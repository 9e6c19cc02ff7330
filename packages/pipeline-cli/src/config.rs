use airtable_client::AirtableConfig;
use anyhow::{Context, Result};
use drive_client::DriveConfig;
use scraping::{InferenceCredentials, SecretString};
use std::env;
use std::path::{Path, PathBuf};

/// Application configuration loaded from environment variables.
///
/// Every value is optional at load time; each command asks only for the
/// settings it needs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `.env`, `client_secret.json` and `tokens.json`
    pub conf_dir: PathBuf,
    pub airtable_api_key: Option<SecretString>,
    pub airtable_base_id: Option<String>,
    pub airtable_table_name: Option<String>,
    pub drive_folder_id: Option<String>,
    pub gcp_quota_project: Option<String>,
    /// Base64 service-account key
    pub cloud_secret: Option<SecretString>,
    pub hf_api_token: Option<SecretString>,
}

impl Config {
    /// Load configuration from `conf/.env` (if present) and the environment.
    pub fn from_env() -> Result<Self> {
        let conf_dir = resolve_conf_dir(|key| env::var(key).ok());

        // Load .env file if present (development)
        let env_file = conf_dir.join(".env");
        if env_file.exists() {
            dotenvy::from_path(&env_file)
                .with_context(|| format!("failed to read {}", env_file.display()))?;
        }

        Ok(Self::from_lookup(conf_dir, |key| env::var(key).ok()))
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(conf_dir: PathBuf, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            conf_dir,
            airtable_api_key: var("AIRTABLE_API").map(SecretString::from),
            airtable_base_id: var("BASE_ID"),
            airtable_table_name: var("TABLE_NAME"),
            drive_folder_id: var("FOLDER_ID"),
            gcp_quota_project: var("GCP_QUOTA_PROJECT"),
            cloud_secret: var("CLOUD_SECRET").map(SecretString::from),
            hf_api_token: var("HF_API_TOKEN").map(SecretString::from),
        }
    }

    pub fn airtable(&self) -> Result<AirtableConfig> {
        let api_key = self
            .airtable_api_key
            .as_ref()
            .context("AIRTABLE_API must be set")?;
        let base_id = self.airtable_base_id.as_ref().context("BASE_ID must be set")?;
        let table_name = self
            .airtable_table_name
            .as_ref()
            .context("TABLE_NAME must be set")?;

        Ok(AirtableConfig::new(api_key.expose(), base_id, table_name))
    }

    pub fn drive(&self) -> Result<DriveConfig> {
        let folder_id = self.drive_folder_id.as_ref().context("FOLDER_ID must be set")?;

        let mut config = DriveConfig::new(folder_id, &self.conf_dir);
        if let Some(project) = &self.gcp_quota_project {
            config = config.with_quota_project(project);
        }
        if let Some(secret) = &self.cloud_secret {
            config = config.with_service_account(secret.expose());
        }
        Ok(config)
    }

    pub fn inference(&self) -> Result<InferenceCredentials> {
        let token = self.hf_api_token.as_ref().context("HF_API_TOKEN must be set")?;
        Ok(InferenceCredentials::new(token.expose()))
    }
}

/// `CONF_DIR`, else `$GITHUB_WORKSPACE/conf`, else `./conf`.
pub fn resolve_conf_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup("CONF_DIR") {
        return PathBuf::from(dir);
    }
    match lookup("GITHUB_WORKSPACE") {
        Some(workspace) => Path::new(&workspace).join("conf"),
        None => PathBuf::from("conf"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_conf_dir_resolution() {
        assert_eq!(
            resolve_conf_dir(lookup(&[("CONF_DIR", "/etc/coffee"), ("GITHUB_WORKSPACE", "/ws")])),
            PathBuf::from("/etc/coffee")
        );
        assert_eq!(
            resolve_conf_dir(lookup(&[("GITHUB_WORKSPACE", "/ws")])),
            PathBuf::from("/ws/conf")
        );
        assert_eq!(resolve_conf_dir(lookup(&[])), PathBuf::from("conf"));
    }

    #[test]
    fn test_drive_config_from_env_names() {
        let config = Config::from_lookup(
            PathBuf::from("/ws/conf"),
            lookup(&[
                ("FOLDER_ID", "folder123"),
                ("GCP_QUOTA_PROJECT", "coffee-prj"),
                ("CLOUD_SECRET", "eyJ9"),
            ]),
        );
        let drive = config.drive().unwrap();
        assert_eq!(drive.folder_id, "folder123");
        assert_eq!(drive.quota_project.as_deref(), Some("coffee-prj"));
        assert_eq!(drive.service_account.as_deref(), Some("eyJ9"));
        assert_eq!(drive.token_path, PathBuf::from("/ws/conf/tokens.json"));
    }

    #[test]
    fn test_missing_values_name_the_variable() {
        let config = Config::from_lookup(
            PathBuf::from("conf"),
            lookup(&[("AIRTABLE_API", "key"), ("BASE_ID", "  ")]),
        );
        let err = config.airtable().unwrap_err();
        assert_eq!(err.to_string(), "BASE_ID must be set");
        assert!(config.inference().is_err());
    }

    #[test]
    fn test_secrets_redacted_in_debug() {
        let config = Config::from_lookup(
            PathBuf::from("conf"),
            lookup(&[("AIRTABLE_API", "patSECRET"), ("HF_API_TOKEN", "hf_SECRET")]),
        );
        let debug = format!("{:?}", config);
        assert!(!debug.contains("SECRET"));
    }
}
