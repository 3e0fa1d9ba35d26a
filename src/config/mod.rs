#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_file_name, validate_non_empty_list, validate_path,
    validate_single_line,
};

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Checks shared by every configuration source.
pub fn validate_settings<C: ConfigProvider>(config: &C) -> Result<()> {
    validate_non_empty_list("inputs", config.input_files())?;
    validate_file_extensions("inputs", config.input_files(), &["csv"])?;
    validate_path("output_path", config.output_path())?;

    if let Some(filename) = config.output_filename() {
        validate_file_name("output_filename", filename)?;
    }
    if let Some(tag) = config.tag() {
        validate_single_line("tag", tag)?;
    }

    Ok(())
}
