//! Filesystem and environment lookups.

pub mod paths;

pub use paths::{expand_tilde, get_config_path, get_data_dir};
