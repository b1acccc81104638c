//! Feed probe port: best-effort reachability checks for passion feed URLs.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Outcome of probing a single feed URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// The server answered with a status below 400.
    Reachable(u16),
    /// The server answered with a status of 400 or above.
    HttpError(u16),
    /// The request never produced a response (DNS, TLS, timeout, connection).
    Unreachable(String),
}

impl FeedStatus {
    /// Classify an HTTP status code.
    #[must_use]
    pub fn from_status(code: u16) -> Self {
        if code >= 400 {
            Self::HttpError(code)
        } else {
            Self::Reachable(code)
        }
    }

    /// Render the warning line for this status, if it warrants one.
    #[must_use]
    pub fn warning(&self, url: &str) -> Option<FeedWarning> {
        match self {
            Self::Reachable(_) => None,
            Self::HttpError(code) => {
                Some(FeedWarning(format!("feed {url} returned HTTP {code}")))
            }
            Self::Unreachable(reason) => {
                Some(FeedWarning(format!("could not reach feed {url}: {reason}")))
            }
        }
    }
}

/// An advisory message about a feed. Never affects the validation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedWarning(pub String);

impl fmt::Display for FeedWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning: {}", self.0)
    }
}

/// Boxed future type returned by [`FeedProbe::probe`].
pub type ProbeFuture<'a> = Pin<Box<dyn Future<Output = FeedStatus> + Send + 'a>>;

/// Issues a single GET against a feed URL.
///
/// Implementations must not fail: every transport problem is folded into
/// [`FeedStatus::Unreachable`].
pub trait FeedProbe: Send + Sync {
    /// Probe the given URL once.
    fn probe<'a>(&'a self, url: &'a str) -> ProbeFuture<'a>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(FeedStatus::from_status(200), FeedStatus::Reachable(200));
        assert_eq!(FeedStatus::from_status(304), FeedStatus::Reachable(304));
        assert_eq!(FeedStatus::from_status(400), FeedStatus::HttpError(400));
        assert_eq!(FeedStatus::from_status(503), FeedStatus::HttpError(503));
    }

    #[test]
    fn warning_lines() {
        let url = "https://example.com/rss";
        assert!(FeedStatus::Reachable(200).warning(url).is_none());
        assert_eq!(
            FeedStatus::HttpError(404).warning(url).unwrap().to_string(),
            "Warning: feed https://example.com/rss returned HTTP 404"
        );
        assert_eq!(
            FeedStatus::Unreachable("dns error".into()).warning(url).unwrap().to_string(),
            "Warning: could not reach feed https://example.com/rss: dns error"
        );
    }
}
