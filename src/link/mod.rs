//! # Link Module
//!
//! Link profiles and runtime settings.
//!
//! ## Modules
//!
//! - [`config`]: Built-in link profiles and JSON settings

pub mod config;

pub use config::{LinkProfile, LinkSettings, ResolvedLink};
