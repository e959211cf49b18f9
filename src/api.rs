// src/api.rs

//! Client for the remote role API.

use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{Result, RoleConsoleError};
use crate::role::{RoleRequest, RoleTree};

/// The three calls the role editor makes. Responses of the submit calls are
/// returned untouched; the editor only checks that they are truthy.
#[async_trait]
pub trait RoleApi: Send + Sync + Debug {
    async fn fetch_role(&self, role_name: &str) -> Result<RoleTree>;

    async fn create_role(&self, request: &RoleRequest) -> Result<Value>;

    async fn update_role(&self, role_name: &str, request: &RoleRequest) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct HttpRoleApi {
    client: reqwest::Client,
    base_url: String,
    fetch_path: String,
    create_path: String,
    update_path: String,
}

impl HttpRoleApi {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fetch_path: config.fetch_path.clone(),
            create_path: config.create_path.clone(),
            update_path: config.update_path.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| RoleConsoleError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Update endpoint with the role name appended as one encoded path segment.
    pub fn update_url(&self, role_name: &str) -> Result<Url> {
        let mut url = self.endpoint(&self.update_path)?;
        url.path_segments_mut()
            .map_err(|_| RoleConsoleError::InvalidUrl(format!("{} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .push(role_name);
        Ok(url)
    }

    async fn send_role(&self, request: reqwest::RequestBuilder, body: &RoleRequest) -> Result<Value> {
        let response = request
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl RoleApi for HttpRoleApi {
    async fn fetch_role(&self, role_name: &str) -> Result<RoleTree> {
        let url = self.endpoint(&self.fetch_path)?;
        debug!("GET {} roleName={:?}", url, role_name);

        let response = self
            .client
            .get(url)
            .query(&[("roleName", role_name)])
            .send()
            .await?
            .error_for_status()?;

        // A `null` body means the role has nothing to show
        Ok(response.json::<Option<RoleTree>>().await?.unwrap_or_default())
    }

    async fn create_role(&self, request: &RoleRequest) -> Result<Value> {
        let url = self.endpoint(&self.create_path)?;
        debug!("POST {} with {} permission(s)", url, request.permissions.len());
        self.send_role(self.client.post(url), request).await
    }

    async fn update_role(&self, role_name: &str, request: &RoleRequest) -> Result<Value> {
        let url = self.update_url(role_name)?;
        debug!("PUT {} with {} permission(s)", url, request.permissions.len());
        self.send_role(self.client.put(url), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpRoleApi {
        let config = AppConfig {
            base_url: base_url.to_string(),
            ..AppConfig::default()
        };
        HttpRoleApi::new(&config).unwrap()
    }

    #[test]
    fn test_update_url_encodes_name() {
        let url = api("https://example.com/api/").update_url("Sales Lead/EU").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/Role/modifytestrole/Sales%20Lead%2FEU"
        );
    }

    #[test]
    fn test_endpoint_joins_base() {
        let url = api("http://localhost:8080/api").endpoint("/Role/addtestrole").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/Role/addtestrole");
    }
}
