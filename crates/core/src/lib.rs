pub mod config;
pub mod error;
pub mod ports;
pub mod types;

pub use config::{AuditConfig, load_config, parse_config_toml};
pub use error::{Error, Result};
pub use ports::{Catalog, Filesystem};
pub use types::*;
