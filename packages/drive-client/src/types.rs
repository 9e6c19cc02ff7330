use serde::{Deserialize, Serialize};

/// File metadata returned by the Drive API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
    #[serde(rename = "webViewLink", default)]
    pub web_view_link: Option<String>,
}

/// One page of `files.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// Whether an upload created a new file or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    Created,
    Updated,
}

#[derive(Debug, Clone)]
pub struct UploadResult {
    pub action: UploadAction,
    pub file: DriveFile,
}

/// Metadata part of a multipart create request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateMetadata<'a> {
    pub name: &'a str,
    pub parents: [&'a str; 1],
}
