//! Command-line front end
//!
//! - **collect**: resolve metric namespaces against GitHub and print the records
//! - **catalog**: list the metric templates and configuration options

mod catalog;
mod collect;
mod common;

pub use catalog::{CatalogArgs, show_catalog};
pub use collect::{CollectArgs, process_collect};
