//! GitHub API integration

use crate::data::{Event, Repository, UserProfile};
use crate::error::{Error, Result};
use crate::session::UserDataSource;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::StatusCode;

/// GitHub API client
pub struct GitHubClient {
    client: reqwest::blocking::Client,
    token: Option<String>,
    api_base: String,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_api_base(token, "https://api.github.com")
    }

    /// Create a client against a custom API base (testing, proxies)
    pub fn with_api_base(token: Option<String>, api_base: &str) -> Result<Self> {
        // Reject garbage up front rather than on the first request.
        url::Url::parse(api_base)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("octoview"));

        if let Some(ref t) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", t))
                    .map_err(|_| Error::ConfigError("Invalid token format".to_string()))?,
            );
        }

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            token,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Check if we have authentication
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Get a user's profile. A 404 maps to [`Error::UserNotFound`].
    pub fn get_user(&self, username: &str) -> Result<UserProfile> {
        let url = format!("{}/users/{}", self.api_base, username);

        let response = self.client.get(&url).send()?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        let profile: UserProfile = response
            .error_for_status()
            .map_err(|e| Error::GitHubError(format!("Failed to get user: {}", e)))?
            .json()?;

        Ok(profile)
    }

    /// Get up to 100 of the user's repositories, most recently updated first
    pub fn get_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?per_page=100&sort=updated",
            self.api_base, username
        );

        let repos: Vec<Repository> = self
            .client
            .get(&url)
            .send()?
            .error_for_status()
            .map_err(|e| Error::GitHubError(format!("Failed to get repositories: {}", e)))?
            .json()?;

        Ok(repos)
    }

    /// Get up to 100 of the user's recent public events
    pub fn get_events(&self, username: &str) -> Result<Vec<Event>> {
        let url = format!(
            "{}/users/{}/events/public?per_page=100",
            self.api_base, username
        );

        let events: Vec<Event> = self
            .client
            .get(&url)
            .send()?
            .error_for_status()
            .map_err(|e| Error::GitHubError(format!("Failed to get events: {}", e)))?
            .json()?;

        Ok(events)
    }
}

impl UserDataSource for GitHubClient {
    fn fetch_user(&self, username: &str) -> Result<UserProfile> {
        self.get_user(username)
    }

    fn fetch_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.get_repositories(username)
    }

    fn fetch_events(&self, username: &str) -> Result<Vec<Event>> {
        self.get_events(username)
    }
}
