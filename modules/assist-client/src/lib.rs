pub mod error;

pub use error::{AssistError, Result};

use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which field the service is asked to rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssistRole {
    Tags,
    Title,
    Description,
}

impl std::fmt::Display for AssistRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssistRole::Tags => write!(f, "tags"),
            AssistRole::Title => write!(f, "title"),
            AssistRole::Description => write!(f, "description"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AssistRequest {
    pub role: AssistRole,
    pub current_title: String,
    pub current_description: String,
}

/// Raw wire response. The service fills the field matching the requested
/// role; everything is defaulted so a sparse or sloppy payload still
/// deserializes and gets rejected by validation instead of a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AssistResponse {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Validated, role-shaped payload — the only form that crosses into the
/// pipeline's typed data model.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistPayload {
    Title(String),
    Description(String),
    Tags(Vec<String>),
}

impl AssistResponse {
    /// Validate and coerce the wire shape for the requested role. Trims
    /// strings, drops empty tags, and rejects payloads that do not carry
    /// the field they were asked for.
    pub fn into_payload(self, role: AssistRole) -> Result<AssistPayload> {
        match role {
            AssistRole::Title => match self.title.as_deref().map(str::trim) {
                Some(title) if !title.is_empty() => Ok(AssistPayload::Title(title.to_string())),
                _ => Err(AssistError::Malformed("response carried no title".into())),
            },
            AssistRole::Description => match self.description.as_deref().map(str::trim) {
                Some(desc) if !desc.is_empty() => {
                    Ok(AssistPayload::Description(desc.to_string()))
                }
                _ => Err(AssistError::Malformed(
                    "response carried no description".into(),
                )),
            },
            AssistRole::Tags => {
                let tags: Vec<String> = self
                    .tags
                    .iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect();
                if tags.is_empty() {
                    return Err(AssistError::Malformed("response carried no tags".into()));
                }
                Ok(AssistPayload::Tags(tags))
            }
        }
    }
}

/// Object-safe seam for the generative text service, so the controller can
/// run against a stub in tests.
#[async_trait]
pub trait AssistService: Send + Sync {
    async fn generate(&self, request: &AssistRequest) -> Result<AssistPayload>;
}

pub struct AssistClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AssistClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl AssistService for AssistClient {
    async fn generate(&self, request: &AssistRequest) -> Result<AssistPayload> {
        let endpoint = format!("{}/v1/generate", self.base_url);

        debug!(role = %request.role, "Assist generate request");

        let resp = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AssistError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response: AssistResponse = resp
            .json()
            .await
            .map_err(|e| AssistError::Malformed(e.to_string()))?;
        response.into_payload(request.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_validation_trims_and_rejects_empty() {
        let response = AssistResponse {
            title: Some("  A Fine Title  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            response.into_payload(AssistRole::Title).unwrap(),
            AssistPayload::Title("A Fine Title".to_string())
        );

        let blank = AssistResponse {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            blank.into_payload(AssistRole::Title),
            Err(AssistError::Malformed(_))
        ));
    }

    #[test]
    fn wrong_role_shape_is_malformed() {
        let response = AssistResponse {
            title: Some("A title".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            response.into_payload(AssistRole::Tags),
            Err(AssistError::Malformed(_))
        ));
    }

    #[test]
    fn sparse_wire_payload_still_deserializes() {
        let response: AssistResponse =
            serde_json::from_str(r#"{"title": "From the service"}"#).unwrap();
        assert_eq!(
            response.into_payload(AssistRole::Title).unwrap(),
            AssistPayload::Title("From the service".to_string())
        );

        let empty: AssistResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.into_payload(AssistRole::Description).is_err());
    }

    #[test]
    fn tag_payload_drops_blank_entries() {
        let response = AssistResponse {
            tags: vec!["cooking".to_string(), "  ".to_string(), " pasta ".to_string()],
            ..Default::default()
        };
        assert_eq!(
            response.into_payload(AssistRole::Tags).unwrap(),
            AssistPayload::Tags(vec!["cooking".to_string(), "pasta".to_string()])
        );
    }
}
