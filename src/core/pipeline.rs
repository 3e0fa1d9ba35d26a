use crate::core::convert::{convert_with_policy, output_filename, write_csv};
use crate::core::{ConfigProvider, Pipeline, Sink, Source};
use crate::domain::model::{ConversionReport, InputFile, LoadResult, TransformResult};
use crate::utils::error::Result;
use std::path::Path;

/// Reads the configured RealIntent exports, converts them and writes one RealScout import file.
pub struct ConvertPipeline<S: Source + Sink, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Source + Sink, C: ConfigProvider> ConvertPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

fn report_filename(output: &str) -> String {
    let stem = Path::new(output)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("realscout_import");
    format!("{}_report.json", stem)
}

#[async_trait::async_trait]
impl<S: Source + Sink, C: ConfigProvider> Pipeline for ConvertPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputFile>> {
        let mut inputs = Vec::with_capacity(self.config.input_files().len());

        for path in self.config.input_files() {
            tracing::debug!("Reading input file: {}", path);
            let bytes = self.storage.read_input(path).await?;
            tracing::debug!("Read {} bytes from {}", bytes.len(), path);
            inputs.push(InputFile::new(display_name(path), bytes));
        }

        Ok(inputs)
    }

    async fn transform(&self, inputs: Vec<InputFile>) -> Result<TransformResult> {
        tracing::info!("🔧 Converting {} file(s)", inputs.len());
        if let Some(tag) = self.config.tag().filter(|t| !t.is_empty()) {
            tracing::info!("🏷️ Tagging every record with '{}'", tag);
        }

        let conversion =
            convert_with_policy(&inputs, self.config.tag(), self.config.empty_email_policy())?;

        let output_filename = match self.config.output_filename() {
            Some(name) => name.to_string(),
            None => {
                let names: Vec<&str> = inputs.iter().map(|input| input.name.as_str()).collect();
                output_filename(&names)
            }
        };

        let report = ConversionReport {
            final_rows: conversion.records.len(),
            files: conversion.files,
            rows_before_dedup: conversion.rows_before_dedup,
            duplicates_removed: conversion.duplicates_removed,
            output_filename,
            generated_at: chrono::Utc::now(),
        };

        if report.duplicates_removed > 0 {
            tracing::info!(
                "🧹 Removed {} duplicate email(s)",
                report.duplicates_removed
            );
        }

        Ok(TransformResult {
            records: conversion.records,
            report,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<LoadResult> {
        let TransformResult { records, report } = result;

        let csv = write_csv(&records)?;
        tracing::debug!(
            "Writing {} ({} bytes) to storage",
            report.output_filename,
            csv.len()
        );
        let output_path = self
            .storage
            .write_output(&report.output_filename, &csv)
            .await?;

        if self.config.write_report() {
            let name = report_filename(&report.output_filename);
            let json = serde_json::to_string_pretty(&report)?;
            let report_path = self.storage.write_output(&name, json.as_bytes()).await?;
            tracing::info!("📝 Report saved: {}", report_path);
        }

        tracing::info!("💾 Output saved: {}", output_path);
        Ok(LoadResult {
            output_path,
            report,
        })
    }
}
