// Identity server admin API endpoint functions.
// Typed methods over the remote-fetch configuration management REST API.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::client::ApiClient;
use super::types::{
    ConfigDeploymentDetails, RemoteConfig, RemoteConfigDetails, RepositoryManagerAttributes,
};

/// Response wrapper for the configuration list.
#[derive(Debug, Deserialize)]
struct RemoteConfigListResponse {
    #[serde(default, alias = "remotefetchConfigurations")]
    remotefetch_configurations: Vec<RemoteConfig>,
}

/// Body for a configuration attribute update.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRemoteConfigRequest<'a> {
    is_enabled: bool,
    repository_manager_attributes: &'a RepositoryManagerAttributes,
}

impl ApiClient {
    /// List the remote-fetch configurations registered on the server.
    pub async fn list_remote_configs(&self) -> Result<Vec<RemoteConfig>> {
        let response = self.get("/remote-fetch").await?;
        let wrapper: RemoteConfigListResponse = response.json().await?;
        Ok(wrapper.remotefetch_configurations)
    }

    /// Get the full details of a remote-fetch configuration.
    pub async fn get_remote_config(&self, id: &str) -> Result<RemoteConfigDetails> {
        let response = self.get(&format!("/remote-fetch/{}", id)).await?;
        let details: RemoteConfigDetails = response.json().await?;
        Ok(details)
    }

    /// Get the deployment status of a remote-fetch configuration.
    pub async fn get_config_deployment_details(&self, id: &str) -> Result<ConfigDeploymentDetails> {
        let response = self.get(&format!("/remote-fetch/{}/status", id)).await?;
        let details: ConfigDeploymentDetails = response.json().await?;
        Ok(details)
    }

    /// Trigger an immediate redeployment of a remote-fetch configuration.
    pub async fn trigger_config_deployment(&self, id: &str) -> Result<()> {
        self.post(&format!("/remote-fetch/{}/trigger", id)).await?;
        Ok(())
    }

    /// Update the repository attributes of a remote-fetch configuration.
    pub async fn update_remote_config(
        &self,
        id: &str,
        is_enabled: bool,
        attributes: &RepositoryManagerAttributes,
    ) -> Result<()> {
        let body = UpdateRemoteConfigRequest {
            is_enabled,
            repository_manager_attributes: attributes,
        };
        self.patch_json(&format!("/remote-fetch/{}", id), &body)
            .await?;
        Ok(())
    }
}
