//! GitHub issue submission

use log::{debug, info};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::env;

use crate::config::{GithubNotification, GithubTarget};
use crate::core::constants::github;
use crate::core::error::{ProbeupError, Result};

/// A rendered issue, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [String],
    assignees: &'a [String],
}

/// What GitHub tells us about the created issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssueReceipt {
    pub number: u64,
    pub html_url: String,
}

#[derive(Debug, Clone)]
pub struct IssueClient {
    client: reqwest::Client,
    api_base: String,
}

impl IssueClient {
    pub fn new(api_base: &str, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(github::ACCEPT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(github::API_VERSION),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ProbeupError::Config("GitHub token contains invalid header characters".to_string())
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            )),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from `GH_TOKEN` and, if set, `GITHUB_API_URL`.
    pub fn from_env() -> Result<Self> {
        let token = env::var(github::TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ProbeupError::MissingCredential(github::TOKEN_ENV.to_string()))?;
        let api_base =
            env::var(github::API_URL_ENV).unwrap_or_else(|_| github::DEFAULT_API_URL.to_string());

        Self::new(&api_base, token.trim())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Create the issue in `target`, labelled and assigned per `notification`.
    pub async fn submit(
        &self,
        target: &GithubTarget,
        notification: &GithubNotification,
        issue: &Issue,
    ) -> Result<IssueReceipt> {
        if !target.is_configured() {
            return Err(ProbeupError::Config(
                "No GitHub repository configured; set [global.github] owner and repo".to_string(),
            ));
        }

        let url = format!(
            "{}/repos/{}/{}/issues",
            self.api_base, target.owner, target.repo
        );
        let payload = CreateIssueRequest {
            title: &issue.title,
            body: &issue.body,
            labels: &notification.labels,
            assignees: &notification.assignees,
        };

        debug!("Submitting issue to {url}");
        let response = self.client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ProbeupError::Issue(format!(
                "{}/{} rejected the issue: {status} - {body}",
                target.owner, target.repo
            )));
        }

        let receipt: IssueReceipt = response.json().await?;
        info!("Created issue #{} at {}", receipt.number, receipt.html_url);
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    fn target() -> GithubTarget {
        GithubTarget {
            owner: "acme".to_string(),
            repo: "status".to_string(),
        }
    }

    fn notification() -> GithubNotification {
        GithubNotification {
            assignees: vec!["oncall".to_string()],
            labels: vec!["healthcheck".to_string()],
        }
    }

    fn issue() -> Issue {
        Issue {
            title: "Endpoint probe report".to_string(),
            body: "all good".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit__posts_issue() -> Result<()> {
        let mut server = Server::new_async().await;
        let m = server
            .mock("POST", "/repos/acme/status/issues")
            .match_header("authorization", "Bearer secret-token")
            .match_header("accept", "application/vnd.github+json")
            .match_body(Matcher::Json(serde_json::json!({
                "title": "Endpoint probe report",
                "body": "all good",
                "labels": ["healthcheck"],
                "assignees": ["oncall"],
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"number": 7, "html_url": "https://github.com/acme/status/issues/7"}"#)
            .create_async()
            .await;

        let client = IssueClient::new(&server.url(), "secret-token")?;
        let receipt = client.submit(&target(), &notification(), &issue()).await?;

        m.assert_async().await;
        assert_eq!(receipt.number, 7);
        assert_eq!(receipt.html_url, "https://github.com/acme/status/issues/7");

        Ok(())
    }

    #[tokio::test]
    async fn test_submit__rejected() -> Result<()> {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("POST", "/repos/acme/status/issues")
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .create_async()
            .await;

        let client = IssueClient::new(&server.url(), "wrong")?;
        let result = client.submit(&target(), &notification(), &issue()).await;

        match result {
            Err(ProbeupError::Issue(msg)) => {
                assert!(msg.contains("401"));
                assert!(msg.contains("Bad credentials"));
            }
            other => panic!("Expected Issue error, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_submit__without_target() -> Result<()> {
        let client = IssueClient::new("http://127.0.0.1:1", "token")?;
        let result = client
            .submit(&GithubTarget::default(), &notification(), &issue())
            .await;

        assert!(matches!(result, Err(ProbeupError::Config(_))));
        Ok(())
    }

    #[test]
    fn test_new__trims_trailing_slash() -> Result<()> {
        let client = IssueClient::new("https://ghe.example/api/v3/", "token")?;
        assert_eq!(client.api_base(), "https://ghe.example/api/v3");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_from_env__requires_token() {
        // SAFETY: serialized with the other environment-mutating tests
        unsafe {
            env::remove_var(github::TOKEN_ENV);
        }

        let result = IssueClient::from_env();
        assert!(matches!(result, Err(ProbeupError::MissingCredential(_))));
    }

    #[test]
    #[serial]
    fn test_from_env__reads_api_url() -> Result<()> {
        // SAFETY: serialized with the other environment-mutating tests
        unsafe {
            env::set_var(github::TOKEN_ENV, "token");
            env::set_var(github::API_URL_ENV, "http://localhost:9999/");
        }

        let client = IssueClient::from_env();

        unsafe {
            env::remove_var(github::TOKEN_ENV);
            env::remove_var(github::API_URL_ENV);
        }

        assert_eq!(client?.api_base(), "http://localhost:9999");
        Ok(())
    }
}
