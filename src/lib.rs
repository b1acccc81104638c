//! Profile site tooling.
//!
//! Two independent command-line tools share this library:
//!
//! - `validate-content` checks `content.json` and the files and feeds it
//!   references ([`content`]).
//! - `annotate-banner` rasterizes the banner SVG when needed and overlays a
//!   caption ([`banner`]).

pub mod adapters;
pub mod banner;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod ports;
