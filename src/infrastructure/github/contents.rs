use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "Discord-News-Relay";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum GitHubError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("invalid file content: {0}")]
    Decode(String),
}

/// File as returned by `GET /repos/{owner}/{repo}/contents/{path}`.
/// `content` is still base64 encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    #[serde(default)]
    pub content: String,
    pub sha: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Clone, Serialize)]
pub struct PutFileRequest {
    pub message: String,
    pub content: String,
    /// Blob sha of the file being replaced; omitted when creating it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Minimal client for the GitHub repository contents API.
pub struct GitHubContentsClient {
    api_url: String,
    repository: String,
    token: String,
    http_client: reqwest::Client,
}

impl GitHubContentsClient {
    /// `repository` is `owner/repo`.
    pub fn new(api_url: &str, repository: String, token: String) -> Result<Self, GitHubError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            repository,
            token,
            http_client,
        })
    }

    fn contents_url(&self, path: &str) -> String {
        let encoded_path = path
            .trim_matches('/')
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/repos/{}/contents/{}",
            self.api_url, self.repository, encoded_path
        )
    }

    /// Fetch a file. Returns `Ok(None)` when it does not exist yet.
    pub async fn get_file(
        &self,
        path: &str,
        branch: Option<&str>,
    ) -> Result<Option<RemoteFile>, GitHubError> {
        let mut request = self
            .http_client
            .get(self.contents_url(path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json");

        if let Some(branch) = branch {
            request = request.query(&[("ref", branch)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let file = response.json::<RemoteFile>().await?;
        Ok(Some(file))
    }

    /// Create or overwrite a file.
    pub async fn put_file(&self, path: &str, body: &PutFileRequest) -> Result<(), GitHubError> {
        let response = self
            .http_client
            .put(self.contents_url(path))
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .json(body)
            .send()
            .await?;

        // 201 = created, 200 = updated
        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::error!(
            status = status.as_u16(),
            body = %message,
            path = %path,
            "GitHub rejected file update"
        );

        Err(GitHubError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Base64 encode file content for the contents API.
pub fn encode_content(content: &str) -> String {
    base64::engine::general_purpose::STANDARD.encode(content)
}

/// Decode contents API base64, which GitHub wraps with newlines.
pub fn decode_content(encoded: &str) -> Result<String, GitHubError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .map_err(|e| GitHubError::Decode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| GitHubError::Decode(e.to_string()))
}
