//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every table is optional; missing keys fall back to the defaults for the
//! public box office site.
//!
//! # Example
//!
//! ```no_run
//! use boxoffice_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Pausing {}ms between buckets", config.crawler.bucket_delay);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    default_buckets, Config, CrawlerConfig, OutputConfig, RowErrorPolicy, UserAgentConfig,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
