//! WorkspaceClient - JSON-RPC client for the KBase workspace service.

use async_trait::async_trait;
use kbws_core::workspace::{ListWorkspacesParams, SaveObjectParams};
use kbws_core::{KbwsError, Result, WorkspaceMetadata, WorkspaceService};
use reqwest::Client;
use serde_json::Value;

use crate::config::{ClientConfig, Credentials};
use crate::rpc::{RpcRequest, decode_response};

const SERVICE_NAME: &str = "Workspace";

/// [`WorkspaceService`] backed by the remote workspace service.
#[derive(Clone)]
pub struct WorkspaceClient {
    client: Client,
    url: String,
    credentials: Credentials,
}

impl WorkspaceClient {
    /// Creates a new client with the provided configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| KbwsError::transport(format!("Failed to build HTTP client: {}", e)))?;

        tracing::info!("[WorkspaceClient] Initialized with URL: {}", config.url);

        Ok(Self {
            client,
            url: config.url,
            credentials: config.credentials,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Attaches the auth token to a request.
    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header("Authorization", self.credentials.as_token())
    }

    /// Builds the HTTP request for one JSON-RPC call.
    fn build_request(&self, rpc: &RpcRequest) -> Result<reqwest::Request> {
        self.auth_request(self.client.post(&self.url))
            .json(rpc)
            .build()
            .map_err(|e| {
                KbwsError::transport(format!("Failed to build {} request: {}", rpc.method(), e))
            })
    }

    /// Issues one JSON-RPC call and returns its first output.
    async fn call(&self, method: &str, param: Value) -> Result<Value> {
        let rpc = RpcRequest::new(SERVICE_NAME, method, param);
        tracing::debug!(method = rpc.method(), id = rpc.id(), "workspace call");

        let request = self.build_request(&rpc)?;
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| KbwsError::transport(format!("{} request failed: {}", rpc.method(), e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            KbwsError::transport(format!("Failed to read {} response: {}", rpc.method(), e))
        })?;

        decode_response(status.as_u16(), &body)
    }
}

#[async_trait]
impl WorkspaceService for WorkspaceClient {
    async fn list_workspaces(
        &self,
        params: ListWorkspacesParams,
    ) -> Result<Vec<WorkspaceMetadata>> {
        let value = self
            .call("list_workspaces", serde_json::to_value(params)?)
            .await?;

        serde_json::from_value(value).map_err(|e| {
            KbwsError::serialization(
                "JSON-RPC",
                format!("Unexpected list_workspaces result: {}", e),
            )
        })
    }

    async fn save_object(&self, params: SaveObjectParams) -> Result<Value> {
        self.call("save_object", serde_json::to_value(params)?).await
    }
}
