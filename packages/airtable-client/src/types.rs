use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single Airtable record.
///
/// Field order follows the JSON payload, which is the column order shown in
/// the Airtable grid view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fields: IndexMap<String, serde_json::Value>,
}

/// One page of the list-records endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRecordsResponse {
    pub records: Vec<Record>,
    /// Present while more pages remain.
    pub offset: Option<String>,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorEnvelope {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ApiErrorDetail {
    Typed {
        #[serde(rename = "type")]
        error_type: String,
        message: Option<String>,
    },
    Plain(String),
}

impl ApiErrorDetail {
    pub fn describe(&self) -> String {
        match self {
            ApiErrorDetail::Typed {
                error_type,
                message: Some(message),
            } => format!("{}: {}", error_type, message),
            ApiErrorDetail::Typed { error_type, .. } => error_type.clone(),
            ApiErrorDetail::Plain(s) => s.clone(),
        }
    }
}
