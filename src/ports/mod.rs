//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the tools and an external system
//! (the network, an external executable). Implementations live in
//! `src/adapters/`.

pub mod feed_probe;
pub mod rasterizer;

pub use feed_probe::{FeedProbe, FeedStatus, FeedWarning};
pub use rasterizer::{RasterRequest, Rasterizer};
