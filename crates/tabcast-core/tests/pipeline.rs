//! End-to-end pipeline tests: source file in, Parquet out, read back.

use std::fs;
use std::path::Path;

use tabcast_core::{
    ConvertOptions, OutputNaming, convert_delimited, convert_json, materialize_delimited,
    write_tables,
};
use tabcast_model::{ColumnClassification, ColumnValues, MaterializedTable, TypedColumn};
use tabcast_output::read_table;

fn text_column(name: &str, values: &[&str]) -> TypedColumn {
    TypedColumn {
        name: name.to_string(),
        classification: ColumnClassification::Text,
        values: ColumnValues::Text(values.iter().map(|v| Some((*v).to_string())).collect()),
        coercion_losses: 0,
    }
}

#[test]
fn delimited_to_parquet_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(
        &input,
        "id,amount,observed,comment\n\
         1,\"166,012,276\",1 Mar 2023,fine\n\
         2,NA,2 Mar 2023,NA\n\
         3,\"£1,000.50\",not recorded,loud\n",
    )
    .unwrap();

    let dest = dir.path().join("out/input.parquet");
    let options = ConvertOptions::default();
    let outcome = convert_delimited(&input, &dest, &options).unwrap();

    assert_eq!(outcome.tables, 1);
    assert!(!outcome.skipped);
    assert_eq!(outcome.written, vec![dest.clone()]);
    // "not recorded" inside the date column degrades to null
    assert_eq!(outcome.coercion_losses, 1);

    let table = read_table(&dest).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["id", "amount", "observed", "comment"]
    );
    assert_eq!(table.row_count(), 3);

    assert_eq!(
        table.column("id").unwrap().classification,
        ColumnClassification::Integer
    );
    assert_eq!(
        table.column("amount").unwrap().values,
        ColumnValues::Float(vec![Some(166_012_276.0), None, Some(1000.50)])
    );
    assert_eq!(
        table.column("observed").unwrap().classification,
        ColumnClassification::DateTime { has_time: false }
    );
    assert_eq!(
        table.column("observed").unwrap().values,
        ColumnValues::DateTime(vec![
            Some("2023-03-01T00:00:00+00:00".to_string()),
            Some("2023-03-02T00:00:00+00:00".to_string()),
            None,
        ])
    );
    assert_eq!(
        table.column("comment").unwrap().values,
        ColumnValues::Text(vec![
            Some("fine".to_string()),
            None,
            Some("loud".to_string()),
        ])
    );
}

#[test]
fn conversion_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    fs::write(&input, "a,b\n1,2023-01-05\n2,2023-01-06\n").unwrap();

    let options = ConvertOptions::default();
    let first = materialize_delimited(&input, &options).unwrap();
    let second = materialize_delimited(&input, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn json_wrapper_to_parquet() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("payload.json");
    fs::write(&input, r#"{"data": [{"a": 1, "b": "x"}, {"a": 2, "b": "y"}]}"#).unwrap();

    let dest = dir.path().join("payload.parquet");
    let options = ConvertOptions::default();
    let outcome = convert_json(&input, &dest, &options).unwrap();
    assert_eq!(outcome.tables, 1);

    let table = read_table(&dest).unwrap();
    assert_eq!(table.row_count(), 2);
    assert_eq!(
        table.column("a").unwrap().classification,
        ColumnClassification::Integer
    );
}

#[test]
fn json_error_envelope_skips_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("error.json");
    fs::write(&input, r#"{"error": {"code": 499, "message": "slow down"}}"#).unwrap();

    let dest = dir.path().join("error.parquet");
    let options = ConvertOptions::default();
    let outcome = convert_json(&input, &dest, &options).unwrap();

    assert!(outcome.skipped);
    assert_eq!(outcome.tables, 0);
    assert!(outcome.written.is_empty());
    assert!(!dest.exists());
}

#[test]
fn multi_sheet_fan_out() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("sheets");

    let tables = vec![
        MaterializedTable {
            name: "Summary".to_string(),
            columns: vec![text_column("k", &["a"])],
        },
        MaterializedTable {
            name: "Raw Data".to_string(),
            columns: vec![text_column("k", &["b"])],
        },
        MaterializedTable {
            name: "Raw/Data".to_string(),
            columns: vec![text_column("k", &["c"])],
        },
    ];

    let options = ConvertOptions::default();
    let outcome = write_tables(&tables, &out_dir, &options).unwrap();

    assert_eq!(outcome.tables, 3);
    assert_eq!(outcome.written.len(), 3);
    assert!(out_dir.join("Summary.parquet").exists());
    assert!(out_dir.join("Raw_Data.parquet").exists());
    // sanitized collision gets a numeric suffix instead of overwriting
    assert!(out_dir.join("Raw_Data_2.parquet").exists());

    for path in &outcome.written {
        let table = read_table(path).unwrap();
        assert_eq!(table.row_count(), 1);
    }
}

#[test]
fn single_sheet_into_directory_destination() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    fs::create_dir_all(&out_dir).unwrap();

    let tables = vec![MaterializedTable {
        name: "Only Sheet".to_string(),
        columns: vec![text_column("k", &["v"])],
    }];

    let options = ConvertOptions::default();
    let outcome = write_tables(&tables, &out_dir, &options).unwrap();
    assert_eq!(outcome.written, vec![out_dir.join("Only_Sheet.parquet")]);
}

#[test]
fn single_sheet_to_file_destination() {
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("exact.parquet");

    let tables = vec![MaterializedTable {
        name: "Whatever".to_string(),
        columns: vec![text_column("k", &["v"])],
    }];

    let options = ConvertOptions::default();
    let outcome = write_tables(&tables, &dest, &options).unwrap();
    assert_eq!(outcome.written, vec![dest]);
}

#[test]
fn anonymized_naming_leaks_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("anon");

    let tables = vec![
        MaterializedTable {
            name: "Payroll".to_string(),
            columns: vec![text_column("k", &["a"])],
        },
        MaterializedTable {
            name: "Payroll".to_string(),
            columns: vec![text_column("k", &["b"])],
        },
    ];

    let options = ConvertOptions::default().with_naming(OutputNaming::Anonymized);
    let outcome = write_tables(&tables, &out_dir, &options).unwrap();

    assert_eq!(outcome.written.len(), 2);
    for path in &outcome.written {
        let stem = path.file_stem().unwrap().to_string_lossy().to_lowercase();
        assert!(!stem.contains("payroll"));
    }
    let unique: std::collections::HashSet<_> = outcome.written.iter().collect();
    assert_eq!(unique.len(), 2);
}

#[test]
fn missing_input_is_a_typed_error() {
    let options = ConvertOptions::default();
    let result = convert_delimited(
        Path::new("/nonexistent/input.csv"),
        Path::new("/tmp/never.parquet"),
        &options,
    );
    assert!(result.is_err());
}
