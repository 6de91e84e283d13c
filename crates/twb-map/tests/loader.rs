use twb_map::{MappingError, RowPolicy, load_mapping_set, parse_mapping_set};

#[test]
fn strict_loads_all_rows_in_order() {
    let set = parse_mapping_set(
        "First name, name First\nLast name, name Last\n",
        RowPolicy::Strict,
    )
    .unwrap();
    let pairs: Vec<(&str, &str)> = set
        .iter()
        .map(|rule| (rule.original.as_str(), rule.replacement.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("First name", "name First"), ("Last name", "name Last")]
    );
}

#[test]
fn strict_fails_on_short_row_with_line_number() {
    let error = parse_mapping_set("a,b\nc,d\nlonely\ne,f\n", RowPolicy::Strict).unwrap_err();
    match error {
        MappingError::MalformedRow { line, columns } => {
            assert_eq!(line, 3);
            assert_eq!(columns, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn lenient_skips_short_row() {
    let set = parse_mapping_set("a,b\nc,d\nlonely\ne,f\n", RowPolicy::Lenient).unwrap();
    let originals: Vec<&str> = set.iter().map(|rule| rule.original.as_str()).collect();
    assert_eq!(originals, vec!["a", "c", "e"]);
}

#[test]
fn blank_original_is_malformed_when_strict() {
    let error = parse_mapping_set("a,b\n  ,x\n", RowPolicy::Strict).unwrap_err();
    assert!(matches!(error, MappingError::EmptyOriginal { line: 2 }));
    assert_eq!(error.line(), Some(2));
}

#[test]
fn blank_original_is_skipped_when_lenient() {
    let set = parse_mapping_set("a,b\n  ,x\n", RowPolicy::Lenient).unwrap();
    assert_eq!(set.len(), 1);
}

#[test]
fn empty_source_fails_under_both_policies() {
    for policy in [RowPolicy::Strict, RowPolicy::Lenient] {
        let error = parse_mapping_set("", policy).unwrap_err();
        assert!(matches!(error, MappingError::Empty));
    }
}

#[test]
fn lenient_source_with_only_bad_rows_is_empty() {
    let error = parse_mapping_set("one\ntwo\n", RowPolicy::Lenient).unwrap_err();
    assert!(matches!(error, MappingError::Empty));
}

#[test]
fn reads_from_any_reader() {
    let bytes: &[u8] = b"Category,Segment\n";
    let set = load_mapping_set(bytes, RowPolicy::default()).unwrap();
    assert_eq!(set.rules()[0].original, "Category");
}

fn malformed_line(text: &str) -> (u64, usize) {
    match parse_mapping_set(text, RowPolicy::Strict).unwrap_err() {
        MappingError::MalformedRow { line, columns } => (line, columns),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_rejects_blank_line_between_rows() {
    assert_eq!(malformed_line("a,b\n\nc,d\n"), (2, 0));
}

#[test]
fn strict_rejects_trailing_blank_line() {
    assert_eq!(malformed_line("a,b\nc,d\n\n"), (3, 0));
}

#[test]
fn strict_reports_first_blank_line_before_short_row() {
    assert_eq!(malformed_line("a,b\n\n\n\nlonely\n"), (2, 0));
    assert_eq!(malformed_line("\n\nlonely\n"), (1, 0));
    assert_eq!(malformed_line("a,b\n\nc,d\nlonely\n"), (2, 0));
}

#[test]
fn strict_blank_line_message_names_the_line() {
    let error = parse_mapping_set("a,b\n\nc,d\n", RowPolicy::Strict).unwrap_err();
    assert_eq!(error.to_string(), "Line 2 does not have at least two columns");
}

#[test]
fn crlf_terminators_are_single_line_breaks() {
    assert_eq!(malformed_line("a,b\r\nc,d\r\nlonely\r\n"), (3, 1));
    assert_eq!(malformed_line("a,b\r\n\r\nc,d\r\n"), (2, 0));
    let set = parse_mapping_set("a,b\r\nc,d\r\n", RowPolicy::Strict).unwrap();
    assert_eq!(set.len(), 2);
}

#[test]
fn quoted_newline_keeps_physical_numbering() {
    assert_eq!(malformed_line("\"Net\nSales\",Revenue\nlonely\n"), (3, 1));
}

#[test]
fn lenient_skips_blank_lines_anywhere() {
    let set = parse_mapping_set("\na,b\n\n\nlonely\nc,d\n\n", RowPolicy::Lenient).unwrap();
    let originals: Vec<&str> = set.iter().map(|rule| rule.original.as_str()).collect();
    assert_eq!(originals, vec!["a", "c"]);
}

#[test]
fn strict_only_blank_lines_is_malformed_not_empty() {
    assert_eq!(malformed_line("\n\n"), (1, 0));
    let error = parse_mapping_set("\n\n", RowPolicy::Lenient).unwrap_err();
    assert!(matches!(error, MappingError::Empty));
}
