//! Live adapters that talk to the network and external executables.

pub mod http_feed;
pub mod imagemagick;

pub use http_feed::HttpFeedProbe;
pub use imagemagick::ImageMagick;
