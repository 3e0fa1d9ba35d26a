use crate::config::{validate_settings, TomlConfig, DEFAULT_OUTPUT_PATH};
use crate::core::ConfigProvider;
use crate::domain::model::EmptyEmailPolicy;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "realscout-convert")]
#[command(about = "Convert RealIntent contact exports into a RealScout import CSV")]
pub struct CliConfig {
    /// RealIntent CSV exports, merged in the order given
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,

    /// Value written to the `tags` column of every record
    #[arg(long)]
    pub tag: Option<String>,

    /// Directory the import file is written to [default: ./output]
    #[arg(long)]
    pub output_path: Option<String>,

    /// Override the derived output file name
    #[arg(long)]
    pub output_filename: Option<String>,

    /// How rows without an email take part in deduplication [default: collapse]
    #[arg(long, value_enum)]
    pub empty_email: Option<EmptyEmailPolicy>,

    /// Also write a JSON status report next to the output
    #[arg(long)]
    pub report: bool,

    /// TOML configuration file; flags take precedence over it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Log process CPU and memory after each phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// Fills every setting not given on the command line from `file`.
    pub fn merge_file_config(mut self, file: TomlConfig) -> Self {
        if self.inputs.is_empty() {
            self.inputs = file.input.files;
        }
        self.tag = self.tag.or(file.convert.tag);
        self.output_path = self.output_path.or(file.load.output_path);
        self.output_filename = self.output_filename.or(file.load.filename);
        self.empty_email = self.empty_email.or(file.convert.empty_email);
        self.report = self.report || file.load.report.unwrap_or(false);
        self.monitor = self.monitor || file.monitoring.map(|m| m.enabled).unwrap_or(false);
        self
    }
}

impl ConfigProvider for CliConfig {
    fn input_files(&self) -> &[String] {
        &self.inputs
    }

    fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn output_filename(&self) -> Option<&str> {
        self.output_filename.as_deref()
    }

    fn empty_email_policy(&self) -> EmptyEmailPolicy {
        self.empty_email.unwrap_or_default()
    }

    fn write_report(&self) -> bool {
        self.report
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_settings(self)
    }
}
