//! Adapter implementations for port traits.
//!
//! - `live/`: real network and process implementations

pub mod live;
