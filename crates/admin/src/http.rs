//! [`Api`] implementation speaking to the relic REST endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::{Api, ApiError, ApiResult};
use crate::model::{BuildReferences, Character, CharacterBuild, RelicCatalog, RelicPiece, RelicSet};
use crate::stats::Slot;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const BUILD_RESOURCE: &str = "character_build";

#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    resource: String,
}

impl HttpApi {
    /// Client for `<base_url>/api/<resource>`.
    pub fn new(base_url: &str, resource: &str, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            resource: resource.to_owned(),
        })
    }

    pub fn for_slot(base_url: &str, slot: Slot) -> ApiResult<Self> {
        Self::new(base_url, slot.table(), DEFAULT_TIMEOUT)
    }

    pub fn for_builds(base_url: &str) -> ApiResult<Self> {
        Self::new(base_url, BUILD_RESOURCE, DEFAULT_TIMEOUT)
    }

    fn endpoint(&self) -> String {
        format!("{}/api/{}", self.base_url, self.resource)
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client.request(method, self.endpoint())
    }

    async fn fetch<T: DeserializeOwned>(&self, action: Option<&str>) -> ApiResult<T> {
        let mut req = self.request(Method::GET);
        if let Some(action) = action {
            req = req.query(&[("action", action)]);
        }
        let resp = send(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn send_record<T: Serialize + Sync>(&self, method: Method, record: &T) -> ApiResult<()> {
        send(self.request(method).json(record)).await.map(drop)
    }

    async fn delete_id(&self, id: &str) -> ApiResult<()> {
        send(self.request(Method::DELETE).query(&[("id", id)]))
            .await
            .map(drop)
    }
}

async fn send(req: RequestBuilder) -> ApiResult<Response> {
    let resp = req
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(error_for(status, &body))
}

/// Classify a non-success response. The server's `{"message": ..}` body is
/// used as the message when present.
fn error_for(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or_else(|| body.to_owned());
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        StatusCode::CONFLICT => ApiError::Conflict(message),
        other => ApiError::Unexpected {
            status: other.as_u16(),
            message,
        },
    }
}

#[async_trait]
impl Api<RelicPiece> for HttpApi {
    async fn list(&self) -> ApiResult<Vec<RelicPiece>> {
        self.fetch(None).await
    }

    async fn references(&self) -> ApiResult<Vec<RelicSet>> {
        self.fetch(Some("get-relic-sets")).await
    }

    async fn create(&self, record: &RelicPiece) -> ApiResult<()> {
        self.send_record(Method::POST, record).await
    }

    async fn update(&self, record: &RelicPiece) -> ApiResult<()> {
        self.send_record(Method::PUT, record).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.delete_id(id).await
    }
}

#[async_trait]
impl Api<CharacterBuild> for HttpApi {
    async fn list(&self) -> ApiResult<Vec<CharacterBuild>> {
        self.fetch(None).await
    }

    async fn references(&self) -> ApiResult<BuildReferences> {
        let (characters, relics) = tokio::join!(
            self.fetch::<Vec<Character>>(Some("get-characters")),
            self.fetch::<RelicCatalog>(Some("get-relics")),
        );
        Ok(BuildReferences {
            characters: characters?,
            relics: relics?,
        })
    }

    async fn create(&self, record: &CharacterBuild) -> ApiResult<()> {
        self.send_record(Method::POST, record).await
    }

    async fn update(&self, record: &CharacterBuild) -> ApiResult<()> {
        self.send_record(Method::PUT, record).await
    }

    async fn delete(&self, id: &str) -> ApiResult<()> {
        self.delete_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_error_kinds() {
        let body = r#"{"error":"conflict","message":"relic001 already exists"}"#;
        assert_eq!(
            error_for(StatusCode::CONFLICT, body),
            ApiError::Conflict("relic001 already exists".into())
        );
        assert_eq!(
            error_for(StatusCode::NOT_FOUND, "gone"),
            ApiError::NotFound("gone".into())
        );
        assert!(matches!(
            error_for(StatusCode::UNPROCESSABLE_ENTITY, ""),
            ApiError::Validation(_)
        ));
        assert_eq!(
            error_for(StatusCode::BAD_GATEWAY, "upstream"),
            ApiError::Unexpected {
                status: 502,
                message: "upstream".into(),
            }
        );
    }
}
