//! Live feed probe backed by `reqwest`.

use std::error::Error as _;
use std::time::Duration;

use reqwest::Client;

use crate::error::ValidateError;
use crate::ports::feed_probe::{FeedProbe, FeedStatus, ProbeFuture};

/// Probes feeds with a plain GET, one request per call, no retries.
pub struct HttpFeedProbe {
    client: Client,
}

impl HttpFeedProbe {
    /// Build a probe whose requests carry the given timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, ValidateError> {
        let client = Client::builder().timeout(timeout).user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

impl FeedProbe for HttpFeedProbe {
    fn probe<'a>(&'a self, url: &'a str) -> ProbeFuture<'a> {
        Box::pin(async move {
            match self.client.get(url).send().await {
                Ok(response) => FeedStatus::from_status(response.status().as_u16()),
                Err(e) => FeedStatus::Unreachable(describe(&e)),
            }
        })
    }
}

/// Flatten a reqwest error and its sources into one line. The top-level
/// message alone rarely says whether DNS, TLS or the timeout was at fault.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
