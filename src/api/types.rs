// Identity server API response types.
// Defines structs for deserializing remote-fetch configuration API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deployment status of a single configuration item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeployedStatus {
    Success,
    Fail,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Summary entry from the remote-fetch configuration list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    pub id: String,
    pub remote_fetch_name: String,
    pub is_enabled: bool,
    pub repository_manager_type: String,
    pub action_listener_type: String,
    pub config_deployer_type: String,
}

/// Repository manager attributes of a remote-fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryManagerAttributes {
    pub uri: String,
    pub branch: String,
    pub directory: String,
    /// Access token for private repositories. Never echoed by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polling_frequency: Option<u32>,
}

/// Full details of a remote-fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfigDetails {
    pub id: String,
    pub remote_fetch_name: String,
    pub is_enabled: bool,
    pub repository_manager_type: String,
    pub action_listener_type: String,
    pub config_deployer_type: String,
    pub repository_manager_attributes: RepositoryManagerAttributes,
}

/// Deployment status of a single fetched revision item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFetchStatus {
    pub item_name: String,
    pub deployed_status: DeployedStatus,
    pub deployed_time: DateTime<Utc>,
    #[serde(default)]
    pub deployment_error_report: String,
}

/// Deployment details for a remote-fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDeploymentDetails {
    pub count: u32,
    pub successful_deployments: u32,
    pub failed_deployments: u32,
    #[serde(default)]
    pub last_synchronized_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub remote_fetch_revision_statuses: Vec<RemoteFetchStatus>,
}

impl ConfigDeploymentDetails {
    /// Revision statuses that failed to deploy, in server order.
    pub fn failed_revisions(&self) -> impl Iterator<Item = &RemoteFetchStatus> {
        self.remote_fetch_revision_statuses
            .iter()
            .filter(|status| status.deployed_status == DeployedStatus::Fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployed_status_wire_format() {
        let status: DeployedStatus = serde_json::from_str("\"FAIL\"").unwrap();
        assert_eq!(status, DeployedStatus::Fail);

        let status: DeployedStatus = serde_json::from_str("\"SUCCESS\"").unwrap();
        assert_eq!(status, DeployedStatus::Success);

        // Unrecognized values fall through instead of failing deserialization
        let status: DeployedStatus = serde_json::from_str("\"PENDING\"").unwrap();
        assert_eq!(status, DeployedStatus::Unknown);
    }

    #[test]
    fn test_deployment_details_deserialization() {
        let json = r#"{
            "count": 2,
            "successfulDeployments": 1,
            "failedDeployments": 1,
            "lastSynchronizedTime": "2024-03-01T10:15:00Z",
            "remoteFetchRevisionStatuses": [
                {
                    "itemName": "pickup-dispatch",
                    "deployedStatus": "SUCCESS",
                    "deployedTime": "2024-03-01T10:14:30Z"
                },
                {
                    "itemName": "self-service-portal",
                    "deployedStatus": "FAIL",
                    "deployedTime": "2024-03-01T10:14:45Z",
                    "deploymentErrorReport": "SAML issuer already exists"
                }
            ]
        }"#;

        let details: ConfigDeploymentDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.count, 2);
        assert_eq!(details.failed_deployments, 1);

        let failed: Vec<_> = details.failed_revisions().collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].item_name, "self-service-portal");
        assert_eq!(failed[0].deployment_error_report, "SAML issuer already exists");
    }

    #[test]
    fn test_remote_config_deserialization() {
        let json = r#"{
            "id": "97e39d87-5b95-4b5c-9d35-91f3ca0cb38e",
            "remoteFetchName": "sp-sync",
            "isEnabled": true,
            "repositoryManagerType": "GIT",
            "actionListenerType": "POLLING",
            "configDeployerType": "SP"
        }"#;

        let config: RemoteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.remote_fetch_name, "sp-sync");
        assert!(config.is_enabled);
    }
}
