//! Pull-request metadata API client.
//!
//! Talks to a Bitbucket-style REST API over blocking HTTP. The two endpoints
//! prsync needs are the PR-metadata document (source/destination branch names)
//! and the raw patch. Commands depend on the [`PullRequestApi`] trait so the
//! HTTP layer can be swapped for a fake in tests.

use crate::config::Credentials;
use crate::error::{PrsyncError, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::path::Path;

/// Default API root for bitbucket.org.
pub const DEFAULT_BASE_URL: &str = "https://bitbucket.org/api/2.0";

/// Immutable descriptor of a pull request, fetched once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number as the hosting service knows it.
    pub number: String,
    /// Branch the PR proposes changes from.
    pub source_branch: String,
    /// Branch the PR targets.
    pub destination_branch: String,
}

/// Interface to the PR hosting service.
pub trait PullRequestApi {
    /// Fetch the metadata document for a pull request.
    fn fetch_pull_request(&self, slug: &str, number: &str) -> Result<PullRequest>;

    /// Download the raw patch for a pull request and write it to `dest`.
    fn download_patch(&self, slug: &str, number: &str, dest: &Path) -> Result<()>;
}

// Wire shape of the metadata document: only the branch names are read,
// everything else in the response is ignored.
#[derive(Debug, Deserialize)]
struct PrDocument {
    source: PrSide,
    destination: PrSide,
}

#[derive(Debug, Deserialize)]
struct PrSide {
    branch: PrBranch,
}

#[derive(Debug, Deserialize)]
struct PrBranch {
    name: String,
}

/// Blocking HTTP client for a Bitbucket-style API, with basic auth.
pub struct BitbucketClient {
    http: Client,
    base_url: String,
    credentials: Credentials,
}

impl BitbucketClient {
    /// Create a client against an API root. [`DEFAULT_BASE_URL`] is the
    /// CLI-level default; tests and self-hosted instances pass their own.
    pub fn with_base_url(base_url: &str, credentials: Credentials) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        }
    }

    fn pr_url(&self, slug: &str, number: &str) -> String {
        format!("{}/repositories/{}/pullrequests/{}", self.base_url, slug, number)
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        let response = self
            .http
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()?;
        Ok(response)
    }
}

impl PullRequestApi for BitbucketClient {
    fn fetch_pull_request(&self, slug: &str, number: &str) -> Result<PullRequest> {
        let response = self.get(&self.pr_url(slug, number))?;
        if response.status() != StatusCode::OK {
            return Err(PrsyncError::ApiError(format!(
                "failed to retrieve pull request info: {}",
                response.status().as_u16()
            )));
        }

        let document: PrDocument = response.json()?;
        Ok(PullRequest {
            number: number.to_string(),
            source_branch: document.source.branch.name,
            destination_branch: document.destination.branch.name,
        })
    }

    fn download_patch(&self, slug: &str, number: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/patch", self.pr_url(slug, number));
        let response = self.get(&url)?;
        if response.status() != StatusCode::OK {
            return Err(PrsyncError::ApiError(format!(
                "failed to retrieve pull request patch: {}",
                response.status().as_u16()
            )));
        }

        let body = response.bytes()?;
        std::fs::write(dest, &body)?;
        Ok(())
    }
}
