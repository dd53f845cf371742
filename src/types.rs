use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pinned repository as collected from GitHub by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PinnedRepository {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub readme: Option<String>,
    // null counts as "off", same as missing
    #[serde(default)]
    pub enable_readme: Option<bool>,
    #[serde(default)]
    pub additional_desc: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GithubUser {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub pinned_repositories: Vec<PinnedRepository>,
    #[serde(default)]
    pub additional_desc: Option<String>,
}

impl PinnedRepository {
    /// README text to send upstream: only when the caller opted in and it is non-empty.
    pub fn shared_readme(&self) -> Option<&str> {
        if !self.enable_readme.unwrap_or(false) {
            return None;
        }
        present(&self.readme)
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }
}

/// Treat missing, null and empty strings alike.
pub fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// Wire shape of the inbound body before the discriminator is checked.
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    // non-string discriminators are invalid, not unparseable
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(rename = "githubUser", default)]
    github_user: Option<Value>,
    #[serde(default)]
    repo: Option<Value>,
}

/// Validated inbound request; one variant per README flavour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionRequest {
    Profile(GithubUser),
    Repository(PinnedRepository),
}

impl CompletionRequest {
    /// Parse and validate the raw request body.
    ///
    /// Unparseable bodies and payloads that do not match the data model are
    /// internal errors; a bad discriminator or a missing payload is the
    /// caller's fault.
    pub fn from_slice(body: &[u8]) -> Result<Self, ApiError> {
        let raw: RawEnvelope = serde_json::from_slice(body)
            .map_err(|e| ApiError::Internal(format!("request body: {}", e)))?;

        match raw.kind.as_ref().and_then(Value::as_str) {
            Some("profile") => {
                let Some(user) = raw.github_user else {
                    return Err(ApiError::MissingProfile);
                };
                let user: GithubUser = serde_json::from_value(user)
                    .map_err(|e| ApiError::Internal(format!("githubUser payload: {}", e)))?;
                Ok(Self::Profile(user))
            }
            Some("repo") => {
                let Some(repo) = raw.repo else {
                    return Err(ApiError::MissingRepository);
                };
                let repo: PinnedRepository = serde_json::from_value(repo)
                    .map_err(|e| ApiError::Internal(format!("repo payload: {}", e)))?;
                Ok(Self::Repository(repo))
            }
            _ => Err(ApiError::InvalidType),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Profile(_) => "profile",
            Self::Repository(_) => "repo",
        }
    }
}
