#![cfg(feature = "cli")]

use realscout_convert::core::ConfigProvider;
use realscout_convert::domain::model::{ConversionReport, EmptyEmailPolicy, FileStatus};
use realscout_convert::{CliConfig, ConvertPipeline, EtlEngine, EtlError, LocalStorage};
use std::path::Path;
use tempfile::TempDir;

const HEADER: &str =
    "first_name,last_name,phone_1,email_1,email_2,address,city,state,zip_code,insight";

fn write_input(dir: &Path, name: &str, rows: &[&str]) -> String {
    let mut body = String::from(HEADER);
    for row in rows {
        body.push('\n');
        body.push_str(row);
    }
    body.push('\n');

    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path.to_str().unwrap().to_string()
}

fn config(inputs: Vec<String>, output_path: &str) -> CliConfig {
    CliConfig {
        inputs,
        output_path: Some(output_path.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_end_to_end_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("output");
    let output_path = output_dir.to_str().unwrap().to_string();

    let input = write_input(
        temp_dir.path(),
        "march.csv",
        &[
            "Ana,Lopez,555-0101,ana@example.com,,9 Elm St,Tampa,FL,33601,interested in pool homes",
            "Bo,Kim,555-0102,bo@example.com,bo@work.com,4 Oak Ave,Tampa,FL,33602,",
        ],
    );

    let mut config = config(vec![input], &output_path);
    config.tag = Some("cold-lead".to_string());

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ConvertPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    let loaded = engine.run().await.unwrap();

    assert!(loaded.output_path.ends_with("realscout_import_march.csv"));
    assert!(output_dir.join("realscout_import_march.csv").exists());
    assert_eq!(loaded.report.final_rows, 2);
    assert_eq!(loaded.report.files[0].filename, "march.csv");

    let mut reader = csv::Reader::from_path(&loaded.output_path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
    assert_eq!(
        headers,
        vec![
            "first_name",
            "last_name",
            "phone_number",
            "email",
            "secondary_email",
            "street_address",
            "city",
            "state_abbrev",
            "postal_code",
            "note",
            "source",
            "tags"
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][3], "ana@example.com");
    assert_eq!(&rows[0][9], "interested in pool homes");
    assert_eq!(&rows[0][10], "realintent");
    assert_eq!(&rows[0][11], "cold-lead");
    assert_eq!(&rows[1][4], "bo@work.com");
    assert_eq!(&rows[1][9], "");
}

#[tokio::test]
async fn test_end_to_end_merge_with_report() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();

    let a = write_input(
        temp_dir.path(),
        "a.csv",
        &[
            "A1,X,1,a1@x.com,,st,c,TX,1",
            "A2,X,2,a2@x.com,,st,c,TX,2",
            "A3,X,3,a3@x.com,,st,c,TX,3",
        ],
    );
    let b = write_input(
        temp_dir.path(),
        "b.csv",
        &["B2,Y,4,a2@x.com,,st,c,TX,4", "B1,Y,5,b1@x.com,,st,c,TX,5"],
    );
    let broken = temp_dir.path().join("broken.csv");
    std::fs::write(&broken, "first_name,email_1\nAna,ana@x.com\n").unwrap();

    let mut config = config(
        vec![a, broken.to_str().unwrap().to_string(), b],
        &output_path,
    );
    config.report = true;

    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new(ConvertPipeline::new(storage, config));
    let loaded = engine.run().await.unwrap();

    assert!(loaded
        .output_path
        .ends_with("realscout_import_combined_3_files.csv"));
    assert_eq!(loaded.report.duplicates_removed, 1);
    assert_eq!(loaded.report.final_rows, 4);
    assert!(matches!(
        loaded.report.files[1].status,
        FileStatus::MissingColumns(_)
    ));

    let mut reader = csv::Reader::from_path(&loaded.output_path).unwrap();
    let first_names: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    assert_eq!(first_names, vec!["A1", "A2", "A3", "B1"]);

    let report_path =
        Path::new(&output_path).join("realscout_import_combined_3_files_report.json");
    let report: ConversionReport =
        serde_json::from_slice(&std::fs::read(report_path).unwrap()).unwrap();
    assert_eq!(report.files.len(), 3);
    assert_eq!(report.rows_before_dedup, 5);
}

#[tokio::test]
async fn test_end_to_end_no_usable_input() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();

    let header = "first_name,last_name,phone_1,email_1,email_2,address,city,state";
    let mut inputs = Vec::new();
    for name in ["one.csv", "two.csv"] {
        let path = temp_dir.path().join(name);
        std::fs::write(&path, format!("{}\nAna,L,1,a@x.com,,st,c,TX\n", header)).unwrap();
        inputs.push(path.to_str().unwrap().to_string());
    }

    let storage = LocalStorage::new(output_path.clone());
    let engine = EtlEngine::new(ConvertPipeline::new(storage, config(inputs, &output_path)));

    match engine.run().await {
        Err(EtlError::NoUsableInputError { outcomes, .. }) => {
            assert_eq!(outcomes.len(), 2);
            assert!(outcomes.iter().all(|o| {
                o.status == FileStatus::MissingColumns(vec!["zip_code".to_string()])
            }));
        }
        other => panic!("expected no usable input, got {:?}", other.map(|l| l.output_path)),
    }

    assert!(!Path::new(&output_path).exists());
}

#[tokio::test]
async fn test_end_to_end_keep_empty_emails() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out").to_str().unwrap().to_string();

    let input = write_input(
        temp_dir.path(),
        "blanks.csv",
        &["A,X,1,,,st,c,TX,1", "B,X,2,,,st,c,TX,2"],
    );

    let mut config = config(vec![input], &output_path);
    config.empty_email = Some(EmptyEmailPolicy::Keep);

    let storage = LocalStorage::new(output_path.clone());
    let loaded = EtlEngine::new(ConvertPipeline::new(storage, config))
        .run()
        .await
        .unwrap();

    assert_eq!(loaded.report.final_rows, 2);
    assert_eq!(loaded.report.duplicates_removed, 0);
}
