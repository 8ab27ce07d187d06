// src/services/fetcher.rs

//! Page fetching seam between the scrapers and the network.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;

/// Raw response of a page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can turn a URL into a status and a body.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Request a page. Non-2xx statuses are returned, not raised.
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// `PageFetcher` backed by a reqwest client.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Ok(FetchResponse {
                status: status.as_u16(),
                body: String::new(),
            });
        }

        let body = response.text().await?;
        Ok(FetchResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Why a page produced no data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The server answered with a non-2xx status
    Status(u16),
    /// The request never produced a response
    Transport(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Status(code) => write!(f, "HTTP status {code}"),
            FetchFailure::Transport(message) => write!(f, "transport failure: {message}"),
        }
    }
}

/// Outcome of scraping one page.
///
/// Keeps "the page had no rows" apart from "the page could not be loaded".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Loaded(T),
    Unavailable(FetchFailure),
}

impl<T> Fetched<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Fetched::Loaded(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetched<U> {
        match self {
            Fetched::Loaded(data) => Fetched::Loaded(f(data)),
            Fetched::Unavailable(failure) => Fetched::Unavailable(failure),
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Fetched::Loaded(_) => None,
            Fetched::Unavailable(failure) => Some(failure),
        }
    }
}

impl<T: Default> Fetched<T> {
    /// Page data, or the empty value when the page was unavailable.
    pub fn into_data(self) -> T {
        match self {
            Fetched::Loaded(data) => data,
            Fetched::Unavailable(_) => T::default(),
        }
    }
}
