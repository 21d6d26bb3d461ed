//! Synchronous client for the remote **bookstore directory** endpoint.
//!
//! The directory is a single HTTP GET returning
//! `{ "status": "success", "data": [StoreRecord...], "message": "..." }`.
//! On `status != "success"` the `message` field is surfaced to the caller as
//! a [`DirectoryError::Api`]; no retry is performed and no partial data is
//! returned. The fetch happens exactly once per page load, so transient
//! failures are the user's cue to reload.
//!
//! Typical usage:
//! ```no_run
//! # use bookmap::Client;
//! let client = Client::default();
//! let snapshot = client.fetch_directory()?;
//! println!("{} stores", snapshot.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::models::{DirectoryResponse, DirectorySnapshot};
use anyhow::{Context, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Errors surfaced by the directory endpoint.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The endpoint answered but reported a non-success status.
    #[error("directory error: {message}")]
    Api { message: String },
}

#[derive(Debug, Clone)]
pub struct Client {
    pub endpoint: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("bookmap/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            endpoint: "https://chaipongmap.com/libraries_pg/get_bookstores.php".into(),
            http,
        }
    }
}

impl Client {
    /// Client against a non-default endpoint (tests, staging).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Fetch the full store directory.
    ///
    /// ### Errors
    /// - Network/HTTP error
    /// - JSON decoding error
    /// - [`DirectoryError::Api`] when the endpoint reports `status != "success"`
    pub fn fetch_directory(&self) -> Result<DirectorySnapshot> {
        let resp = self
            .http
            .get(&self.endpoint)
            .send()
            .with_context(|| format!("GET {}", self.endpoint))?;
        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("request failed with HTTP {}", status);
        }
        let body: DirectoryResponse = resp.json().context("decode directory json")?;
        parse_directory(body)
    }
}

/// Turn the decoded envelope into a snapshot, surfacing the API error message.
pub fn parse_directory(body: DirectoryResponse) -> Result<DirectorySnapshot> {
    if body.status != "success" {
        let message = body
            .message
            .unwrap_or_else(|| format!("status {:?}", body.status));
        return Err(DirectoryError::Api { message }.into());
    }
    log::info!("directory fetch: {} records", body.data.len());
    Ok(DirectorySnapshot::new(body.data))
}
