//! End-to-end tests for the caller-facing operations.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::{TempDir, tempdir};
use twb_core::{
    OperationError, analyze_workbook, default_output_path, load_mapping_preview, remap,
    validate_mapping, validate_workbook, write_file,
};

const WORKBOOK: &str = r#"<?xml version='1.0' encoding='utf-8' ?>
<workbook version='18.1'>
  <datasources>
    <datasource name='Sample'>
      <column name='[dimension_1]' caption='dimension_1' />
      <column name='[dimension_2]' caption='dimension_2' />
      <column name='[Order Date]' />
      <column name='[Order ID]' />
      <column name='[Calc]'>
        <calculation formula='[dimension_1] + [dimension_2]' />
      </column>
    </datasource>
  </datasources>
  <worksheets>
    <worksheet name='Sheet 1' />
  </worksheets>
</workbook>
"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn remap_writes_output_and_reports_per_rule() {
    let dir = tempdir().unwrap();
    let mapping = write(
        &dir,
        "mapping.csv",
        "dimension_1,Distribution/Program\ndimension_2, Region\nmissing,Nothing\n",
    );
    let workbook = write(&dir, "book.twb", WORKBOOK);
    let output = dir.path().join("out/remapped.twb");

    let outcome = remap(&mapping, &workbook, &output).unwrap();

    assert_eq!(outcome.rule_count, 3);
    assert_eq!(outcome.total_replacements, 6);
    assert_eq!(outcome.per_rule.count_for("dimension_1"), Some(3));
    assert_eq!(outcome.per_rule.count_for("dimension_2"), Some(3));
    assert_eq!(outcome.per_rule.count_for("missing"), Some(0));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("<column name='[Distribution/Program]' caption='Distribution/Program' />"));
    assert!(written.contains("formula='[Distribution/Program] + [Region]'"));
    assert!(!written.contains("dimension_"));
}

#[test]
fn remap_skips_short_rows() {
    let dir = tempdir().unwrap();
    let mapping = write(&dir, "mapping.csv", "dimension_1,First\nbroken\n");
    let workbook = write(&dir, "book.twb", WORKBOOK);
    let output = dir.path().join("out.twb");

    let outcome = remap(&mapping, &workbook, &output).unwrap();

    assert_eq!(outcome.rule_count, 1);
    assert_eq!(outcome.total_replacements, 3);
}

#[test]
fn remap_with_empty_mapping_writes_nothing() {
    let dir = tempdir().unwrap();
    let mapping = write(&dir, "mapping.csv", "only-one-column\n");
    let workbook = write(&dir, "book.twb", WORKBOOK);
    let output = dir.path().join("out.twb");

    let error = remap(&mapping, &workbook, &output).unwrap_err();

    assert!(matches!(error, OperationError::EmptyMappingSet));
    assert_eq!(error.user_message(), "Error: Mapping file is empty");
    assert!(!output.exists());
}

#[test]
fn remap_without_matches_copies_input() {
    let dir = tempdir().unwrap();
    let mapping = write(&dir, "mapping.csv", "Foo,Bar\n");
    let workbook = write(&dir, "book.twb", WORKBOOK);
    let output = dir.path().join("out.twb");

    let outcome = remap(&mapping, &workbook, &output).unwrap();

    assert_eq!(outcome.total_replacements, 0);
    assert_eq!(fs::read_to_string(&output).unwrap(), WORKBOOK);
    assert!(outcome.to_string().contains("No replacements were made."));
}

#[test]
fn remap_message() {
    let dir = tempdir().unwrap();
    let mapping = write(&dir, "mapping.csv", "A,B\nB,C\nZ,Y\n");
    let workbook = write(&dir, "book.twb", "<workbook name='A'/>");
    let output = dir.path().join("out.twb");

    let outcome = remap(&mapping, &workbook, &output).unwrap();
    let message = outcome.to_string().replace(&output.display().to_string(), "<OUT>");

    insta::assert_snapshot!(message, @r#"
✅ Successfully remapped dimensions in the Tableau workbook.

Made 2 replacements using 3 mapping rules.

Replacement details:
• "A" → "B": 1 replacements
• "B" → "C": 1 replacements
• "Z" → "Y": 0 replacements

Analysis of Changes:
The dimension remapping has been applied successfully. A total of 2 replacements were made across 2 different mappings. These changes may affect calculated fields, visualizations, and filters that reference the renamed dimensions. Make sure to validate the workbook after opening it in Tableau.

Modified workbook saved to: <OUT>
"#);
}

#[test]
fn missing_arguments_are_hard_errors() {
    let error = remap(Path::new(""), Path::new("book.twb"), Path::new("out.twb")).unwrap_err();
    assert!(error.is_hard());
    assert!(matches!(
        error,
        OperationError::MissingArgument { name: "mapping_file_path" }
    ));

    let error = write_file(Path::new(""), "x").unwrap_err();
    assert!(error.is_hard());
}

#[test]
fn preview_returns_raw_toml() {
    let dir = tempdir().unwrap();
    let toml = "[columns.other_renames]\ndimension_1 = \"Distribution/Program\"\n";
    let path = write(&dir, "renames.toml", toml);
    assert_eq!(load_mapping_preview(&path).unwrap(), toml);
}

#[test]
fn validate_mapping_lists_rules() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "mapping.csv", "First name, name First\nLast name, name Last\n");

    let validation = validate_mapping(&path).unwrap();

    assert!(validation.valid);
    assert_eq!(validation.rules.len(), 2);
    assert_eq!(
        validation.to_string(),
        "✅ Mapping file is valid with 2 mappings:\n\n\
         • \"First name\" → \"name First\"\n\
         • \"Last name\" → \"name Last\""
    );
}

#[test]
fn validate_mapping_reports_line_of_short_row() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "mapping.csv", "a,b\nc,d\nlonely\n");

    let error = validate_mapping(&path).unwrap_err();

    assert!(matches!(error, OperationError::MalformedMappingRow { line: 3, .. }));
    assert!(!error.is_hard());
    assert_eq!(
        error.user_message(),
        "Error: Line 3 does not have at least two columns"
    );
}

#[test]
fn validate_mapping_rejects_blank_line() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "mapping.csv", "a,b\n\nc,d\n");

    let error = validate_mapping(&path).unwrap_err();

    assert!(matches!(error, OperationError::MalformedMappingRow { line: 2, .. }));
    assert_eq!(
        error.user_message(),
        "Error: Line 2 does not have at least two columns"
    );
}

#[test]
fn remap_skips_blank_lines() {
    let dir = tempdir().unwrap();
    let mapping = write(&dir, "mapping.csv", "\ndimension_1,First\n\ndimension_2,Second\n\n");
    let workbook = write(&dir, "book.twb", WORKBOOK);
    let output = dir.path().join("out.twb");

    let outcome = remap(&mapping, &workbook, &output).unwrap();

    assert_eq!(outcome.rule_count, 2);
    assert_eq!(outcome.total_replacements, 6);
}

#[test]
fn remap_refuses_to_overwrite_input() {
    let dir = tempdir().unwrap();
    let mapping = write(&dir, "mapping.csv", "dimension_1,First\n");
    let workbook = write(&dir, "book.twb", WORKBOOK);
    let same_via_dot = dir.path().join(".").join("book.twb");

    for output in [workbook.clone(), same_via_dot] {
        let error = remap(&mapping, &workbook, &output).unwrap_err();
        assert!(matches!(error, OperationError::OutputOverwritesInput { .. }));
        assert!(!error.is_hard());
    }
    assert_eq!(fs::read_to_string(&workbook).unwrap(), WORKBOOK);
}

#[test]
fn validate_mapping_requires_csv_extension() {
    let error = validate_mapping(Path::new("mapping.txt")).unwrap_err();
    assert!(matches!(error, OperationError::InvalidFileType { .. }));
    assert_eq!(
        error.user_message(),
        "Error: File must be a CSV file. Got mapping.txt"
    );
}

#[test]
fn validate_workbook_summarizes() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "book.twb", WORKBOOK);

    let validation = validate_workbook(&path).unwrap();

    assert_eq!(
        validation.to_string(),
        "✅ Tableau workbook is valid (version 18.1) with 1 datasources and 1 worksheets"
    );
    let json = serde_json::to_value(&validation).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "valid": true,
            "version": "18.1",
            "datasource_count": 1,
            "worksheet_count": 1
        })
    );
}

#[test]
fn validate_workbook_rejects_wrong_root_and_extension() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "book.twb", "<dashboard/>");
    let error = validate_workbook(&path).unwrap_err();
    assert!(matches!(error, OperationError::DocumentNotWellFormed { .. }));

    let error = validate_workbook(Path::new("book.twbx")).unwrap_err();
    assert!(matches!(error, OperationError::InvalidFileType { .. }));
}

#[test]
fn validate_workbook_reports_malformed_xml() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "book.twb", "<workbook><worksheet></workbook>");
    let error = validate_workbook(&path).unwrap_err();
    assert!(matches!(error, OperationError::DocumentNotWellFormed { .. }));
}

#[test]
fn validate_workbook_missing_file_is_io() {
    let dir = tempdir().unwrap();
    let error = validate_workbook(&dir.path().join("absent.twb")).unwrap_err();
    assert!(matches!(error, OperationError::Io { .. }));
    assert!(!error.is_hard());
}

#[test]
fn analyze_reports_structure() {
    let dir = tempdir().unwrap();
    let path = write(&dir, "book.twb", WORKBOOK);

    let analysis = analyze_workbook(&path).unwrap();

    assert_eq!(analysis.file_name, "book.twb");
    assert_eq!(analysis.report.field_count(), 5);
    assert_eq!(analysis.report.worksheets, vec!["Sheet 1"]);
    assert_eq!(
        analysis.report.calculated_fields,
        vec!["[dimension_1] + [dimension_2]"]
    );
    let order = analysis.report.cluster("[Order").expect("order cluster");
    assert_eq!(order.fields, vec!["[Order Date]", "[Order ID]"]);
    assert!(analysis.to_string().starts_with("# Tableau Workbook Analysis"));
}

#[test]
fn write_file_creates_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("maps/generated.csv");

    let outcome = write_file(&path, "a,b\n").unwrap();

    assert_eq!(outcome.bytes, 4);
    assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n");
    assert!(outcome.to_string().ends_with("generated.csv"));
}

#[test]
fn default_output_path_is_timestamped_sibling() {
    let timestamp = NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(14, 5, 7)
        .unwrap();
    let path = default_output_path(Path::new("reports/sales.twb"), timestamp);
    assert_eq!(path, Path::new("reports/sales_remapped_20240309_140507.twb"));
}
