//! CLI command implementations.

pub mod common;
pub mod info;
pub mod message;
pub mod params;
pub mod render;
