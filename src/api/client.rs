// Identity server admin API HTTP client.
// Handles authentication headers and request/response processing.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};

use crate::error::{Result, WardenError};

const API_BASE_PATH: &str = "/api/server/v1";

/// Admin API client with bearer-token authentication.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    server_url: String,
}

impl ApiClient {
    /// Create a new client for the given server with the given token.
    pub fn new(server_url: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| WardenError::Other(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static("warden-tui"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(WardenError::Api)?;

        Ok(Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the WARDEN_SERVER_URL and WARDEN_TOKEN environment variables.
    pub fn from_env() -> Result<Self> {
        let server_url =
            std::env::var("WARDEN_SERVER_URL").map_err(|_| WardenError::MissingServerUrl)?;
        let token = std::env::var("WARDEN_TOKEN").map_err(|_| WardenError::MissingToken)?;
        Self::new(&server_url, &token)
    }

    /// The server this client talks to (no trailing slash).
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.server_url, API_BASE_PATH, endpoint)
    }

    /// Make a GET request to the admin API.
    pub async fn get(&self, endpoint: &str) -> Result<Response> {
        let response = self
            .client
            .get(self.url(endpoint))
            .send()
            .await
            .map_err(WardenError::Api)?;
        Self::check_response(response).await
    }

    /// Make a POST request with an empty body (trigger-style endpoints).
    pub async fn post(&self, endpoint: &str) -> Result<Response> {
        let response = self
            .client
            .post(self.url(endpoint))
            .send()
            .await
            .map_err(WardenError::Api)?;
        Self::check_response(response).await
    }

    /// Make a PATCH request with a JSON body.
    pub async fn patch_json<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Response> {
        let response = self
            .client
            .patch(self.url(endpoint))
            .json(body)
            .send()
            .await
            .map_err(WardenError::Api)?;
        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED | StatusCode::NO_CONTENT => {
                Ok(response)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(WardenError::Unauthorized),
            StatusCode::NOT_FOUND => {
                let url = response.url().to_string();
                Err(WardenError::NotFound(url))
            }
            status => Err(WardenError::Other(format!(
                "HTTP {}: {}",
                status,
                response.text().await.unwrap_or_default()
            ))),
        }
    }
}
