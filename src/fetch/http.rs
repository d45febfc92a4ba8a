use std::io::{self, Write};
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use tracing::{debug, info};

use crate::config::{FetchSettings, FetchSource};
use crate::error::FetchError;

use super::Downloader;

/// Blocking HTTP(S) downloader. Redirects are followed up to
/// `max_redirects` hops.
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = Client::builder()
            .redirect(Policy::limited(settings.max_redirects))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, source: &FetchSource, out: &mut dyn Write) -> Result<u64, FetchError> {
        info!(track = %source.name, "downloading");

        let transport = |reason: String| FetchError::Transport {
            track: source.name.clone(),
            reason,
        };

        let mut response = self
            .client
            .get(&source.url)
            .send()
            .map_err(|e| transport(e.to_string()))?;

        if response.url().as_str() != source.url {
            debug!(track = %source.name, url = %response.url(), "followed redirect");
        }

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                track: source.name.clone(),
                status: status.as_u16(),
            });
        }

        io::copy(&mut response, out).map_err(|e| transport(e.to_string()))
    }
}
