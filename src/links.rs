use std::cell::RefCell;
use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("could not open {url} in a browser: {source}")]
pub struct LinkError {
    pub url: String,
    #[source]
    pub source: io::Error,
}

/// Opens external URLs on behalf of hosted panels.
pub trait LinkOpener: std::fmt::Debug {
    fn open(&self, url: &str) -> Result<(), LinkError>;
}

#[derive(Debug, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), LinkError> {
        tracing::info!(url, "opening link in system browser");
        webbrowser::open(url).map_err(|source| LinkError {
            url: url.to_string(),
            source,
        })
    }
}

/// Remembers every URL instead of launching anything. Used with
/// `--no-browser` and in tests.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: RefCell<Vec<String>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), LinkError> {
        tracing::debug!(url, "link recorded");
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

/// Open `url`, logging instead of failing.
pub fn open_logged(opener: &dyn LinkOpener, url: &str) {
    if let Err(err) = opener.open(url) {
        tracing::warn!(error = %err, "link open failed");
    }
}
