//! Terraform Cloud API client.
//!
//! One round trip per call, no retries. API calls and archive uploads use
//! separate clients so each carries its own timeout; the upload client never
//! sends the API token to the pre-signed upload URL.

use anyhow::{Context, Result};
use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tfdeploy_common::WorkspaceSummary;
use tfdeploy_common::jsonapi::{
    self, ConfigurationVersionData, Document, PermissionsDocument, ResourceId, WorkspaceData,
};
use tracing::{debug, warn};

use crate::application::ports::AutomationClient;
use crate::domain::config::{AppConfig, WorkspacePolicy};
use crate::domain::{ConfigurationVersion, RemoteError, RemoteStep, ValidatedConfig};
use crate::infra::archive::pack_configuration;
use crate::infra::http::{build_client, failure_detail, transport_detail};

/// Media type of every JSON:API request.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

const OCTET_STREAM: &str = "application/octet-stream";

/// Characters left unescaped in URL path segments (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, PATH_SEGMENT).to_string()
}

/// Terraform Cloud implementation of [`AutomationClient`].
pub struct TfcClient {
    api: Client,
    upload: Client,
    base_url: String,
    workspace_policy: WorkspacePolicy,
}

impl TfcClient {
    /// Build both HTTP clients from the process configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value or the TLS
    /// backend cannot be initialised.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.terraform_token))
            .context("TERRAFORM_TOKEN is not a valid header value")?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        Ok(Self {
            api: build_client(config.timeouts.api, headers)
                .context("failed to build Terraform Cloud API client")?,
            upload: build_client(config.timeouts.upload, HeaderMap::new())
                .context("failed to build upload client")?,
            base_url: config.terraform_api_url.clone(),
            workspace_policy: config.workspace_policy,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.api
            .request(method, format!("{}{path}", self.base_url))
            .header(CONTENT_TYPE, JSON_API_MEDIA_TYPE)
    }

    /// Send and map transport failures onto `step`.
    async fn send(step: RemoteStep, request: RequestBuilder) -> Result<Response, RemoteError> {
        request.send().await.map_err(|e| {
            warn!(step = %step, error = %e, "request failed");
            RemoteError::new(step, None, transport_detail(&e))
        })
    }

    /// Turn a non-2xx response into a `RemoteError` for `step`.
    async fn ensure_success(step: RemoteStep, response: Response) -> Result<Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = failure_detail(response).await;
        warn!(step = %step, status = status.as_u16(), "remote call rejected");
        Err(RemoteError::new(step, Some(status.as_u16()), detail))
    }

    async fn decode<T: DeserializeOwned>(step: RemoteStep, response: Response) -> Result<T, RemoteError> {
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            RemoteError::new(step, Some(status), format!("invalid response body: {e}"))
        })
    }

    async fn create_workspace_in(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<String, RemoteError> {
        let step = RemoteStep::WorkspaceCreate;
        let body = jsonapi::new_workspace(name, self.workspace_policy.auto_apply());
        let request = self
            .request(
                Method::POST,
                &format!("/organizations/{}/workspaces", segment(organization)),
            )
            .json(&body);
        let response = Self::ensure_success(step, Self::send(step, request).await?).await?;
        let doc: Document<ResourceId> = Self::decode(step, response).await?;
        debug!(workspace_id = %doc.data.id, "workspace created");
        Ok(doc.data.id)
    }
}

#[async_trait]
impl AutomationClient for TfcClient {
    async fn resolve_or_create_workspace(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<String, RemoteError> {
        let step = RemoteStep::WorkspaceLookup;
        let request = self.request(
            Method::GET,
            &format!(
                "/organizations/{}/workspaces/{}",
                segment(organization),
                segment(name)
            ),
        );
        let response = Self::send(step, request).await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!(name, "workspace not found, creating");
            return self.create_workspace_in(organization, name).await;
        }
        let response = Self::ensure_success(step, response).await?;
        let doc: Document<ResourceId> = Self::decode(step, response).await?;
        Ok(doc.data.id)
    }

    async fn create_workspace(
        &self,
        organization: &str,
        name: &str,
    ) -> Result<String, RemoteError> {
        self.create_workspace_in(organization, name).await
    }

    async fn delete_workspace(&self, workspace_id: &str) -> Result<(), RemoteError> {
        let step = RemoteStep::WorkspaceDelete;
        let request = self.request(
            Method::DELETE,
            &format!("/workspaces/{}", segment(workspace_id)),
        );
        Self::ensure_success(step, Self::send(step, request).await?).await?;
        Ok(())
    }

    async fn list_workspaces(
        &self,
        organization: &str,
    ) -> Result<Vec<WorkspaceSummary>, RemoteError> {
        let step = RemoteStep::WorkspaceList;
        let request = self.request(
            Method::GET,
            &format!("/organizations/{}/workspaces", segment(organization)),
        );
        let response = Self::ensure_success(step, Self::send(step, request).await?).await?;
        let doc: Document<Vec<WorkspaceData>> = Self::decode(step, response).await?;
        Ok(doc
            .data
            .into_iter()
            .map(|ws| WorkspaceSummary {
                id: ws.id,
                name: ws.attributes.name,
            })
            .collect())
    }

    async fn add_variable(
        &self,
        workspace_id: &str,
        key: &str,
        value: &str,
        sensitive: bool,
    ) -> Result<(), RemoteError> {
        let step = RemoteStep::VariableWrite;
        let request = self
            .request(
                Method::POST,
                &format!("/workspaces/{}/vars", segment(workspace_id)),
            )
            .json(&jsonapi::new_variable(key, value, sensitive));
        Self::ensure_success(step, Self::send(step, request).await?).await?;
        Ok(())
    }

    async fn create_configuration_version(
        &self,
        workspace_id: &str,
        auto_queue_runs: bool,
    ) -> Result<ConfigurationVersion, RemoteError> {
        let step = RemoteStep::ConfigurationVersion;
        let request = self
            .request(
                Method::POST,
                &format!(
                    "/workspaces/{}/configuration-versions",
                    segment(workspace_id)
                ),
            )
            .json(&jsonapi::new_configuration_version(auto_queue_runs));
        let response = Self::ensure_success(step, Self::send(step, request).await?).await?;
        let doc: Document<ConfigurationVersionData> = Self::decode(step, response).await?;
        Ok(ConfigurationVersion {
            id: doc.data.id,
            upload_url: doc.data.attributes.upload_url,
        })
    }

    async fn upload_configuration(
        &self,
        upload_url: &str,
        config: &ValidatedConfig,
    ) -> Result<(), RemoteError> {
        let step = RemoteStep::Upload;
        let archive = pack_configuration(config)
            .map_err(|e| RemoteError::new(step, None, format!("failed to build archive: {e}")))?;
        debug!(bytes = archive.len(), "uploading configuration archive");
        let request = self
            .upload
            .put(upload_url)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .body(archive);
        Self::ensure_success(step, Self::send(step, request).await?).await?;
        Ok(())
    }

    async fn trigger_plan_run(
        &self,
        workspace_id: &str,
        configuration_version_id: &str,
        auto_apply: bool,
    ) -> Result<String, RemoteError> {
        let step = RemoteStep::PlanRun;
        let request = self.request(Method::POST, "/runs").json(&jsonapi::new_run(
            workspace_id,
            configuration_version_id,
            auto_apply,
        ));
        let response = Self::ensure_success(step, Self::send(step, request).await?).await?;
        let doc: Document<ResourceId> = Self::decode(step, response).await?;
        Ok(doc.data.id)
    }

    async fn check_apply_permission(&self, workspace_id: &str) -> bool {
        let request = self.request(
            Method::GET,
            &format!("/workspaces/{}/permissions", segment(workspace_id)),
        );
        let Ok(response) = Self::send(RemoteStep::PermissionCheck, request).await else {
            return false;
        };
        if response.status() != StatusCode::OK {
            debug!(status = response.status().as_u16(), "permission check denied");
            return false;
        }
        response
            .json::<PermissionsDocument>()
            .await
            .is_ok_and(|doc| doc.data.attributes.can_queue_apply)
    }

    async fn apply_run(&self, run_id: &str) -> bool {
        let request = self.request(
            Method::POST,
            &format!("/runs/{}/actions/apply", segment(run_id)),
        );
        match Self::send(RemoteStep::Apply, request).await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                warn!(status = response.status().as_u16(), "apply rejected");
                false
            }
            Err(_) => false,
        }
    }
}
