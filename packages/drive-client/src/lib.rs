//! Google Drive client for spreadsheet uploads.
//!
//! Lists a folder (Shared Drives included) and uploads in-memory tables as
//! `.xlsx` files, replacing a same-named file when one already exists.
//!
//! # Example
//!
//! ```rust,ignore
//! use drive_client::{Dataset, DriveClient, DriveConfig};
//!
//! let config = DriveConfig::new("1AbCdEf", "conf").with_quota_project("my-project");
//! let client = DriveClient::new(config);
//! client.authenticate().await?;
//!
//! let result = client
//!     .upload_dataset_xlsx(&dataset, "airtable_data.xlsx", true)
//!     .await?;
//! println!("{:?} -> {:?}", result.action, result.file.web_view_link);
//! ```

pub mod auth;
pub mod config;
pub mod dataset;
pub mod error;
pub mod spreadsheet;
pub mod types;

pub use auth::AccessToken;
pub use config::DriveConfig;
pub use dataset::Dataset;
pub use error::{DriveError, Result};
pub use types::{DriveFile, FileList, UploadAction, UploadResult};

use chrono::Utc;
use reqwest::RequestBuilder;
use tokio::sync::RwLock;
use tracing::{info, warn};

use auth::ServiceAccountKey;
use spreadsheet::XLSX_MIME_TYPE;
use types::CreateMetadata;

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

const FILE_FIELDS: &str = "id,name,mimeType,webViewLink";
const MULTIPART_BOUNDARY: &str = "drive_client_upload_boundary";

/// Escape a value for use inside a single-quoted Drive query literal.
pub fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Query for the direct, non-trashed children of a folder.
pub fn folder_query(folder_id: &str) -> String {
    format!(
        "'{}' in parents and trashed = false",
        escape_query_value(folder_id)
    )
}

/// Query for a file by exact name inside a folder.
pub fn name_query(name: &str, folder_id: &str) -> String {
    format!(
        "name = '{}' and {}",
        escape_query_value(name),
        folder_query(folder_id)
    )
}

/// Assemble a `multipart/related` body: JSON metadata part, then the media part.
fn multipart_body(metadata: &serde_json::Value, mime_type: &str, media: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(media.len() + 512);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n--{b}\r\nContent-Type: {mime}\r\n\r\n",
            b = MULTIPART_BOUNDARY,
            meta = metadata,
            mime = mime_type,
        )
        .as_bytes(),
    );
    body.extend_from_slice(media);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

pub struct DriveClient {
    http: reqwest::Client,
    config: DriveConfig,
    token: RwLock<Option<AccessToken>>,
    api_base: String,
    upload_base: String,
}

impl DriveClient {
    pub fn new(config: DriveConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            token: RwLock::new(None),
            api_base: API_BASE.to_string(),
            upload_base: UPLOAD_BASE.to_string(),
        }
    }

    /// Override API roots (proxies, tests).
    pub fn with_base_urls(mut self, api: impl Into<String>, upload: impl Into<String>) -> Self {
        self.api_base = api.into();
        self.upload_base = upload.into();
        self
    }

    /// Use a pre-issued access token instead of loading credentials.
    pub fn with_access_token(self, token: AccessToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
            ..self
        }
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Resolve credentials and cache an access token.
    ///
    /// The service account is tried first; if it is configured but fails,
    /// the failure is logged and the token file is used instead.
    pub async fn authenticate(&self) -> Result<()> {
        let token = self.fetch_token().await?;
        *self.token.write().await = Some(token);
        Ok(())
    }

    async fn fetch_token(&self) -> Result<AccessToken> {
        if let Some(encoded) = &self.config.service_account {
            match self.service_account_token(encoded).await {
                Ok(token) => {
                    info!("Authenticated with service account");
                    return Ok(token);
                }
                Err(e) => {
                    warn!(error = %e, "Service account authentication failed, trying token file");
                }
            }
        }

        let token = auth::authorized_user_token(
            &self.http,
            &self.config.token_path,
            &self.config.client_secret_path,
        )
        .await?;
        info!(path = %self.config.token_path.display(), "Authenticated with OAuth token file");
        Ok(token)
    }

    async fn service_account_token(&self, encoded: &str) -> Result<AccessToken> {
        let key = ServiceAccountKey::from_base64(encoded)?;
        auth::service_account_token(&self.http, &key, &self.config.scopes).await
    }

    /// Current bearer token, authenticating lazily or when it has expired.
    async fn bearer(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_valid_at(Utc::now()) {
                return Ok(token.secret().to_string());
            }
        }
        self.authenticate().await?;
        self.token
            .read()
            .await
            .as_ref()
            .map(|t| t.secret().to_string())
            .ok_or_else(|| DriveError::Auth("no access token after authentication".into()))
    }

    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.bearer().await?;
        let mut request = request.bearer_auth(token);
        if let Some(project) = &self.config.quota_project {
            request = request.header("x-goog-user-project", project);
        }
        Ok(request)
    }

    fn folder_id(&self) -> Result<&str> {
        if self.config.folder_id.is_empty() {
            return Err(DriveError::Config("folder_id must be set".into()));
        }
        Ok(&self.config.folder_id)
    }

    async fn send_json<T: serde::de::DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = self.authorized(request).await?.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "Drive API error");
            return Err(DriveError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json().await?)
    }

    async fn list_page(&self, query: &str, fields: &str, page_token: Option<&str>) -> Result<FileList> {
        let mut params: Vec<(&str, &str)> = vec![
            ("q", query),
            ("fields", fields),
            ("includeItemsFromAllDrives", "true"),
            ("supportsAllDrives", "true"),
            ("pageSize", "1000"),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }

        let request = self
            .http
            .get(format!("{}/files", self.api_base))
            .query(&params);
        self.send_json(request).await
    }

    /// List every direct child of the configured folder.
    pub async fn list_files(&self) -> Result<Vec<DriveFile>> {
        let query = folder_query(self.folder_id()?);
        let fields = format!("nextPageToken, files({})", FILE_FIELDS);

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let page = self.list_page(&query, &fields, page_token.as_deref()).await?;
            files.extend(page.files);
            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        if files.is_empty() {
            info!(folder_id = %self.config.folder_id, "Folder is empty or not accessible");
        } else {
            info!(count = files.len(), "Files found in folder");
            for f in &files {
                info!(name = %f.name, id = %f.id, "Drive file");
            }
        }

        Ok(files)
    }

    /// Id of the first file in the folder with exactly this name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<String>> {
        let query = name_query(name, self.folder_id()?);
        let page = self.list_page(&query, "files(id,name)", None).await?;
        Ok(page.files.into_iter().next().map(|f| f.id))
    }

    async fn create_file(&self, name: &str, mime_type: &str, content: &[u8]) -> Result<DriveFile> {
        let metadata = serde_json::to_value(CreateMetadata {
            name,
            parents: [self.folder_id()?],
        })?;

        let request = self
            .http
            .post(format!("{}/files", self.upload_base))
            .query(&[
                ("uploadType", "multipart"),
                ("supportsAllDrives", "true"),
                ("fields", FILE_FIELDS),
            ])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(multipart_body(&metadata, mime_type, content));
        self.send_json(request).await
    }

    async fn update_file(&self, file_id: &str, mime_type: &str, content: Vec<u8>) -> Result<DriveFile> {
        let request = self
            .http
            .patch(format!("{}/files/{}", self.upload_base, file_id))
            .query(&[
                ("uploadType", "media"),
                ("supportsAllDrives", "true"),
                ("fields", FILE_FIELDS),
            ])
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(content);
        self.send_json(request).await
    }

    /// Upload a dataset as an `.xlsx` file into the folder.
    ///
    /// With `replace_if_exists`, a file with the same name is updated in place
    /// (keeping its id and sharing settings); otherwise a new file is created.
    pub async fn upload_dataset_xlsx(
        &self,
        dataset: &Dataset,
        drive_filename: &str,
        replace_if_exists: bool,
    ) -> Result<UploadResult> {
        let content = spreadsheet::build_xlsx(dataset)?;

        let existing_id = if replace_if_exists {
            self.find_by_name(drive_filename).await?
        } else {
            None
        };

        let result = match existing_id {
            Some(id) => {
                let file = self.update_file(&id, XLSX_MIME_TYPE, content).await?;
                info!(name = %file.name, link = ?file.web_view_link, "Updated spreadsheet");
                UploadResult {
                    action: UploadAction::Updated,
                    file,
                }
            }
            None => {
                let file = self.create_file(drive_filename, XLSX_MIME_TYPE, &content).await?;
                info!(name = %file.name, link = ?file.web_view_link, "Uploaded spreadsheet");
                UploadResult {
                    action: UploadAction::Created,
                    file,
                }
            }
        };

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_query_escapes_quotes() {
        assert_eq!(
            name_query("don't stop.xlsx", "folder1"),
            "name = 'don\\'t stop.xlsx' and 'folder1' in parents and trashed = false"
        );
    }

    #[test]
    fn test_folder_query() {
        assert_eq!(
            folder_query("abc"),
            "'abc' in parents and trashed = false"
        );
    }

    #[test]
    fn test_multipart_body_layout() {
        let metadata = serde_json::json!({"name": "data.xlsx", "parents": ["f1"]});
        let body = multipart_body(&metadata, XLSX_MIME_TYPE, b"PKDATA");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with("--drive_client_upload_boundary\r\nContent-Type: application/json"));
        assert!(text.contains(r#""name":"data.xlsx""#));
        assert!(text.contains(&format!("Content-Type: {}\r\n\r\nPKDATA", XLSX_MIME_TYPE)));
        assert!(text.ends_with("\r\n--drive_client_upload_boundary--\r\n"));
    }

    #[tokio::test]
    async fn test_empty_folder_id_is_config_error() {
        let client = DriveClient::new(DriveConfig::new("", "conf"))
            .with_access_token(AccessToken::new("ya29.test", None));

        assert!(matches!(client.list_files().await, Err(DriveError::Config(_))));
    }

    #[tokio::test]
    async fn test_preissued_token_skips_authentication() {
        let client = DriveClient::new(DriveConfig::new("f", "/nonexistent"))
            .with_access_token(AccessToken::new("ya29.test", None));

        assert_eq!(client.bearer().await.unwrap(), "ya29.test");
    }
}
