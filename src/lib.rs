pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use crate::core::{
    convert::{convert, convert_with_policy},
    etl::EtlEngine,
    pipeline::ConvertPipeline,
};
pub use utils::error::{EtlError, Result};
