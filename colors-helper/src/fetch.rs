//! Retrieval of the remote color table.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use crate::error::ColorsError;

/// Downloads a resource into a local file.
pub trait Fetcher {
    /// Writes the body found at `url` to `dest`, returning the byte count.
    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64, ColorsError>;
}

/// Blocking HTTP(S) GET backed by a [`ureq::Agent`].
#[derive(Clone, Debug)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::with_agent(ureq::AgentBuilder::new().build())
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_agent(ureq::AgentBuilder::new().timeout(timeout).build())
    }

    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch_to(&self, url: &str, dest: &Path) -> Result<u64, ColorsError> {
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|err| network_error(url, err))?;

        let mut out = BufWriter::new(File::create(dest)?);
        let written = io::copy(&mut response.into_reader(), &mut out).map_err(|err| {
            ColorsError::Network {
                url: url.to_string(),
                reason: format!("failed to read response body: {err}"),
            }
        })?;
        out.flush()?;
        Ok(written)
    }
}

fn network_error(url: &str, err: ureq::Error) -> ColorsError {
    let reason = match err {
        ureq::Error::Status(code, response) => {
            format!("server responded with {code} {}", response.status_text())
        }
        ureq::Error::Transport(transport) => transport.to_string(),
    };
    ColorsError::Network {
        url: url.to_string(),
        reason,
    }
}
