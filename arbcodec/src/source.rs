//! Byte sources for the tabular side: local files and HTTP(S) URLs.
//!
//! Every fetch is a one-shot read fully buffered into memory.

use std::{fs, io::Read, time::Duration};

use tracing::debug;

use crate::error::Error;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Produces the complete payload named by a locator.
pub trait ByteSource {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, Error>;
}

/// Whether a locator names an HTTP(S) resource rather than a file.
pub fn is_url(locator: &str) -> bool {
    locator.starts_with("http://") || locator.starts_with("https://")
}

/// Reads locators as local file paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl ByteSource for FileSource {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, Error> {
        debug!(path = locator, "read file");
        fs::read(locator).map_err(|e| Error::file_access(locator, e))
    }
}

/// Downloads locators with a blocking HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpSource {
    agent: ureq::Agent,
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpSource {
    pub fn new() -> Self {
        Self::with_timeouts(DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT)
    }

    pub fn with_timeouts(connect: Duration, overall: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(connect)
            .timeout(overall)
            .build();
        Self { agent }
    }
}

impl ByteSource for HttpSource {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, Error> {
        debug!(url = locator, "download");
        let response = self
            .agent
            .get(locator)
            .call()
            .map_err(|e| Error::fetch(locator, e))?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| Error::fetch(locator, e))?;
        debug!(url = locator, bytes = bytes.len(), "downloaded");
        Ok(bytes)
    }
}

/// Dispatches to [`HttpSource`] for URLs and [`FileSource`] for everything else.
#[derive(Debug, Clone, Default)]
pub struct AnySource {
    file: FileSource,
    http: HttpSource,
}

impl AnySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http(http: HttpSource) -> Self {
        Self {
            file: FileSource,
            http,
        }
    }
}

impl ByteSource for AnySource {
    fn fetch(&self, locator: &str) -> Result<Vec<u8>, Error> {
        if is_url(locator) {
            self.http.fetch(locator)
        } else {
            self.file.fetch(locator)
        }
    }
}
