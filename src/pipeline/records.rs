// src/pipeline/records.rs

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::models::{Config, DcRecord, IndexFields};
use crate::services::DocumentBuilder;

/// Build index fields for every record.
pub fn build_index(config: &Config, records: &[DcRecord], host: &str) -> Vec<IndexFields> {
    let builder = DocumentBuilder::new(config);
    records
        .iter()
        .map(|record| builder.build(record, host))
        .collect()
}

/// Read harvested records from `input`, build their index fields, and write
/// them as a pretty-printed JSON array to `output` (stdout when `None`).
///
/// Returns the number of records processed.
pub fn run_records(
    config: &Config,
    input: &Path,
    host: &str,
    output: Option<&Path>,
) -> Result<usize> {
    let records = DcRecord::load_all(input)?;
    log::info!("Loaded {} records from {}", records.len(), input.display());

    let documents = build_index(config, &records, host);
    let dated = documents.iter().filter(|d| !d.decades.is_empty()).count();
    let linked = documents.iter().filter(|d| d.external_link.is_some()).count();

    let json = serde_json::to_string_pretty(&documents)?;
    match output {
        Some(path) => {
            fs::write(path, json)?;
            log::info!("Index fields saved to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }

    log::info!(
        "Processed {} records ({} with decades, {} with external links)",
        documents.len(),
        dated,
        linked
    );
    Ok(documents.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tempfile::TempDir;

    const RECORDS: &str = r#"[
        {
            "identifier": "oai:repo.x.edu:bbb-1000",
            "fields": [
                {"name": "title", "value": "Harbor map"},
                {"name": "date", "value": "447-432 BC"},
                {"name": "identifier", "value": "http://archives.x.edu/collection/bbb-1000"},
                {"name": "identifier", "value": "http://repo.x.edu/item/bbb-1000"}
            ]
        },
        {"identifier": "oai:repo.x.edu:ccc-2000"}
    ]"#;

    #[test]
    fn test_run_records_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("records.json");
        let output = dir.path().join("index.json");
        fs::write(&input, RECORDS).unwrap();

        let count =
            run_records(&Config::default(), &input, "repo.x.edu", Some(&output)).unwrap();
        assert_eq!(count, 2);

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let docs = written.as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["id"], "oai:repo.x.edu:bbb-1000");
        assert_eq!(docs[0]["decade"], serde_json::json!([-450, -440]));
        assert_eq!(docs[0]["sort_decade"], -450);
        assert_eq!(docs[0]["external_link"], "http://repo.x.edu/item/bbb-1000");
        assert_eq!(docs[0]["title_keyword"], serde_json::json!(["Harbor map"]));
        assert!(docs[1].get("decade").is_none());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("absent.json");
        let err = run_records(&Config::default(), &input, "repo.x.edu", None).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_malformed_input_is_json_error() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("records.json");
        fs::write(&input, "{not json").unwrap();
        let err = run_records(&Config::default(), &input, "repo.x.edu", None).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn test_build_index_preserves_order() {
        let records: Vec<DcRecord> = serde_json::from_str(RECORDS).unwrap();
        let docs = build_index(&Config::default(), &records, "repo.x.edu");
        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["oai:repo.x.edu:bbb-1000", "oai:repo.x.edu:ccc-2000"]);
    }
}
