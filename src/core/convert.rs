//! The RealIntent -> RealScout transform.
//!
//! Every input is parsed, validated against the required column set, projected
//! through [`COLUMN_MAPPING`] and stamped with the derived `note`, `source` and
//! `tags` fields. Successful files are concatenated in input order and
//! deduplicated on `email`, first occurrence wins. A file that fails to parse
//! or lacks required columns is reported and skipped; it never aborts the batch.

use crate::domain::model::{
    required_columns, ConvertedRecord, EmptyEmailPolicy, FileOutcome, FileStatus, InputFile,
    RawTable, COLUMN_MAPPING, INSIGHT_COLUMN, OUTPUT_COLUMNS, SOURCE_TAG,
};
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Outcome of a batch that produced at least one usable file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub records: Vec<ConvertedRecord>,
    pub files: Vec<FileOutcome>,
    pub rows_before_dedup: usize,
    pub duplicates_removed: usize,
}

/// Converts and merges `inputs` with the default empty-email policy.
pub fn convert(inputs: &[InputFile], tag: Option<&str>) -> Result<Conversion> {
    convert_with_policy(inputs, tag, EmptyEmailPolicy::default())
}

/// Converts every input in order, then concatenates and deduplicates the
/// usable ones. Fails with [`EtlError::NoUsableInputError`] when no file could
/// be converted; the error still carries every per-file outcome.
pub fn convert_with_policy(
    inputs: &[InputFile],
    tag: Option<&str>,
    policy: EmptyEmailPolicy,
) -> Result<Conversion> {
    let mut files = Vec::with_capacity(inputs.len());
    let mut merged = Vec::new();
    let mut usable = 0usize;

    for input in inputs {
        let status = match convert_file(input, tag) {
            Ok(records) => {
                tracing::info!("✅ {}: converted {} rows", input.name, records.len());
                files.push(FileOutcome {
                    filename: input.name.clone(),
                    rows: records.len(),
                    status: FileStatus::Success,
                });
                merged.extend(records);
                usable += 1;
                continue;
            }
            Err(EtlError::MissingColumnsError { columns, .. }) => {
                FileStatus::MissingColumns(columns)
            }
            Err(EtlError::ParseError { message, .. }) => FileStatus::InvalidCsv(message),
            Err(other) => return Err(other),
        };

        tracing::warn!("⚠️ {}: skipped, {}", input.name, status);
        files.push(FileOutcome {
            filename: input.name.clone(),
            rows: 0,
            status,
        });
    }

    if usable == 0 {
        return Err(EtlError::NoUsableInputError {
            outcomes: files,
            required: required_columns().map(str::to_string).collect(),
        });
    }

    let rows_before_dedup = merged.len();
    let records = deduplicate(merged, policy);
    let duplicates_removed = rows_before_dedup - records.len();
    tracing::debug!(
        "Deduplicated {} rows down to {} ({} duplicates)",
        rows_before_dedup,
        records.len(),
        duplicates_removed
    );

    Ok(Conversion {
        records,
        files,
        rows_before_dedup,
        duplicates_removed,
    })
}

/// Converts a single input. Errors are limited to
/// [`EtlError::ParseError`] and [`EtlError::MissingColumnsError`].
pub fn convert_file(input: &InputFile, tag: Option<&str>) -> Result<Vec<ConvertedRecord>> {
    let table = parse_table(input)?;

    let mut indices = [0usize; COLUMN_MAPPING.len()];
    let mut missing = Vec::new();
    for (slot, (column, _)) in indices.iter_mut().zip(COLUMN_MAPPING.iter()) {
        match table.column_index(column) {
            Some(index) => *slot = index,
            None => missing.push(column.to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(EtlError::MissingColumnsError {
            file: input.name.clone(),
            columns: missing,
        });
    }

    let insight = table.column_index(INSIGHT_COLUMN);
    let tags = tag.filter(|t| !t.is_empty()).map(str::to_string);

    let records = table
        .rows
        .iter()
        .map(|row| {
            let cell = |index: usize| row.get(index).cloned().unwrap_or_default();
            let [
                first_name,
                last_name,
                phone_number,
                email,
                secondary_email,
                street_address,
                city,
                state_abbrev,
                postal_code,
            ] = indices.map(cell);

            ConvertedRecord {
                first_name,
                last_name,
                phone_number,
                email,
                secondary_email,
                street_address,
                city,
                state_abbrev,
                postal_code,
                note: insight.map(cell).unwrap_or_default(),
                source: SOURCE_TAG.to_string(),
                tags: tags.clone(),
            }
        })
        .collect();

    Ok(records)
}

/// Parses UTF-8 CSV bytes with a header row. Short rows are padded with empty
/// cells; rows wider than the header are rejected.
pub fn parse_table(input: &InputFile) -> Result<RawTable> {
    let parse_error = |message: String| EtlError::ParseError {
        file: input.name.clone(),
        message,
    };

    let bytes = input
        .bytes
        .strip_prefix(UTF8_BOM)
        .unwrap_or(input.bytes.as_slice());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| parse_error(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.is_empty() {
        return Err(parse_error("no header row".to_string()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| parse_error(e.to_string()))?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(parse_error(format!(
                "line {} has {} fields, header has {}",
                line,
                record.len(),
                headers.len()
            )));
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Keeps the first record for each distinct `email`, preserving order.
pub fn deduplicate(records: Vec<ConvertedRecord>, policy: EmptyEmailPolicy) -> Vec<ConvertedRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            if record.email.is_empty() && policy == EmptyEmailPolicy::Keep {
                return true;
            }
            seen.insert(record.email.clone())
        })
        .collect()
}

/// `realscout_import_<stem>.csv` for one input, `realscout_import_combined_<n>_files.csv` otherwise.
pub fn output_filename<S: AsRef<str>>(inputs: &[S]) -> String {
    match inputs {
        [single] => {
            let stem = Path::new(single.as_ref())
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("contacts");
            format!("realscout_import_{}.csv", stem)
        }
        _ => format!("realscout_import_combined_{}_files.csv", inputs.len()),
    }
}

/// Encodes records as RealScout CSV. The header is written even with no rows.
pub fn write_csv(records: &[ConvertedRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
