// Identity server admin API module.
// Client, endpoints, and response types for the remote-fetch configuration API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use types::{
    ConfigDeploymentDetails, DeployedStatus, RemoteConfig, RemoteConfigDetails, RemoteFetchStatus,
    RepositoryManagerAttributes,
};
