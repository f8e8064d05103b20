//! Retrieval collaborator trait and the Orthanc REST implementation.

use crate::error::{PacsError, PacsResult, capped_body};
use crate::types::{InstanceDetails, InstancePreview, SimplifiedTags, StudyDetails};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{StatusCode, Url, header};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Content type reported for previews when the upstream omits one.
pub const DEFAULT_PREVIEW_CONTENT_TYPE: &str = "application/octet-stream";

/// Operations the service needs from the upstream PACS.
///
/// Implementations report a missing study or instance as
/// [`PacsError::NotFound`] and every other failure with a distinct variant.
#[async_trait]
pub trait PacsClient: Send + Sync {
    /// List upstream study identifiers.
    async fn list_studies(&self) -> PacsResult<Vec<String>>;

    /// Fetch details of one study.
    async fn get_study_details(&self, study_id: &str) -> PacsResult<StudyDetails>;

    /// List the instances of a study.
    async fn get_study_instances(&self, study_id: &str) -> PacsResult<Vec<InstanceDetails>>;

    /// Fetch a rendered preview of an instance.
    async fn get_instance_preview(&self, instance_id: &str) -> PacsResult<InstancePreview>;

    /// Fetch the simplified tag map of an instance.
    async fn get_instance_simplified_tags(&self, instance_id: &str) -> PacsResult<SimplifiedTags>;

    /// Fetch the raw DICOM file of an instance.
    async fn get_instance_file(&self, instance_id: &str) -> PacsResult<Bytes>;

    /// Check that the upstream is reachable.
    async fn health_check(&self) -> PacsResult<()>;
}

/// Orthanc REST API client.
#[derive(Clone)]
pub struct OrthancClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OrthancClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> PacsResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PacsError::Config(format!("failed to build HTTP client: {e}")))?;
        Self::with_http_client(base_url, http)
    }

    /// Create a client around an existing `reqwest::Client`.
    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> PacsResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| PacsError::Config(format!("invalid PACS base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(PacsError::Config(format!(
                "PACS base URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self { http, base_url })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> PacsResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PacsError::Config("PACS base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issue a GET, mapping 404 to `NotFound` and other non-2xx to `UnexpectedStatus`.
    async fn get(&self, url: Url, what: &str) -> PacsResult<reqwest::Response> {
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "PACS request failed");
            PacsError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "PACS request succeeded");
            return Ok(response);
        }

        let body = response.bytes().await.map(|b| capped_body(&b)).unwrap_or_default();
        tracing::warn!(
            url = %url,
            status = status.as_u16(),
            response_body = %body,
            "PACS returned non-success status"
        );
        if status == StatusCode::NOT_FOUND {
            return Err(PacsError::NotFound(what.to_string()));
        }
        Err(PacsError::UnexpectedStatus {
            status: status.as_u16(),
            url: url.to_string(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> PacsResult<T> {
        let response = self.get(url.clone(), what).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to decode PACS response");
            PacsError::Decode(format!("{what}: {e}"))
        })
    }
}

fn require_id<'a>(id: &'a str, label: &str) -> PacsResult<&'a str> {
    if id.trim().is_empty() {
        return Err(PacsError::InvalidRequest(format!("{label} cannot be empty")));
    }
    Ok(id)
}

#[async_trait]
impl PacsClient for OrthancClient {
    async fn list_studies(&self) -> PacsResult<Vec<String>> {
        let url = self.url(&["studies"])?;
        self.get_json(url, "study list").await
    }

    async fn get_study_details(&self, study_id: &str) -> PacsResult<StudyDetails> {
        let study_id = require_id(study_id, "study id")?;
        let url = self.url(&["studies", study_id])?;
        self.get_json(url, &format!("study {study_id}")).await
    }

    async fn get_study_instances(&self, study_id: &str) -> PacsResult<Vec<InstanceDetails>> {
        let study_id = require_id(study_id, "study id")?;
        let url = self.url(&["studies", study_id, "instances"])?;
        let instances: Vec<InstanceDetails> =
            self.get_json(url, &format!("study {study_id}")).await?;
        tracing::debug!(
            study_id = %study_id,
            instance_count = instances.len(),
            "Retrieved study instances"
        );
        Ok(instances)
    }

    async fn get_instance_preview(&self, instance_id: &str) -> PacsResult<InstancePreview> {
        let instance_id = require_id(instance_id, "instance id")?;
        let url = self.url(&["instances", instance_id, "preview"])?;
        let response = self.get(url, &format!("instance {instance_id}")).await?;

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_PREVIEW_CONTENT_TYPE)
            .to_string();
        let data = response.bytes().await?;

        Ok(InstancePreview { data, content_type })
    }

    async fn get_instance_simplified_tags(&self, instance_id: &str) -> PacsResult<SimplifiedTags> {
        let instance_id = require_id(instance_id, "instance id")?;
        let url = self.url(&["instances", instance_id, "simplified-tags"])?;
        self.get_json(url, &format!("instance {instance_id}")).await
    }

    async fn get_instance_file(&self, instance_id: &str) -> PacsResult<Bytes> {
        let instance_id = require_id(instance_id, "instance id")?;
        let url = self.url(&["instances", instance_id, "file"])?;
        let response = self.get(url, &format!("instance {instance_id}")).await?;
        Ok(response.bytes().await?)
    }

    async fn health_check(&self) -> PacsResult<()> {
        let url = self.url(&["system"])?;
        self.get(url, "system").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_keeps_base_path_and_encodes_ids() {
        let client =
            OrthancClient::new("http://pacs.local:8042/orthanc/", Duration::from_secs(1)).unwrap();
        let url = client.url(&["instances", "a/b c", "file"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://pacs.local:8042/orthanc/instances/a%2Fb%20c/file"
        );

        let client = OrthancClient::new("http://pacs.local:8042", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url(&["studies"]).unwrap().as_str(),
            "http://pacs.local:8042/studies"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let err = OrthancClient::new("not a url", Duration::from_secs(1))
            .err()
            .expect("expected error");
        assert!(matches!(err, PacsError::Config(_)));
    }

    #[tokio::test]
    async fn test_blank_ids_rejected_without_request() {
        // Nothing listens on this port; a request would be a transport error.
        let client = OrthancClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = client.get_instance_file("  ").await.unwrap_err();
        assert!(matches!(err, PacsError::InvalidRequest(_)));
        let err = client.get_study_details("").await.unwrap_err();
        assert!(matches!(err, PacsError::InvalidRequest(_)));
    }
}
