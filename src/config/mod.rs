//! Configuration handling
//!
//! A [`Config`] carries the settings of one collection cycle: the API access token, and an
//! optional user and repository that replace wildcard owner and repository segments.

#[expect(clippy::module_inception, reason = "the module holds the Config type")]
mod config;

pub use config::Config;
