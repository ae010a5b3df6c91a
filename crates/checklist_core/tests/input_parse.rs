use checklist_core::{parse_input, InputError, InputRecord, ParsedInput};

#[test]
fn parses_array_of_pairs_in_order() {
    let parsed = parse_input(
        r#"[
            {"line": "1", "name": "Fire extinguisher"},
            {"line": "2", "name": "Check valve"}
        ]"#,
    )
    .unwrap();

    assert_eq!(
        parsed,
        ParsedInput::Records(vec![
            InputRecord::new("1", "Fire extinguisher"),
            InputRecord::new("2", "Check valve"),
        ])
    );
}

#[test]
fn empty_array_parses_to_no_records() {
    assert_eq!(parse_input("[]").unwrap(), ParsedInput::Records(Vec::new()));
}

#[test]
fn malformed_json_is_rejected() {
    let err = parse_input("{not valid json").unwrap_err();
    assert!(matches!(err, InputError::InvalidJson(_)));
}

#[test]
fn object_at_top_level_is_rejected() {
    let err = parse_input(r#"{"line":"1","name":"a"}"#).unwrap_err();
    assert!(matches!(err, InputError::NotAnArray));
    assert_eq!(err.to_string(), "input must be an array of objects");
}

#[test]
fn element_missing_name_is_rejected_with_index() {
    let err = parse_input(r#"[{"line":"1","name":"a"},{"line":"2"}]"#).unwrap_err();
    match err {
        InputError::MissingField { index, field } => {
            assert_eq!(index, 1);
            assert_eq!(field, "name");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn element_missing_line_is_rejected() {
    let err = parse_input(r#"[{"name":"a"}]"#).unwrap_err();
    assert!(matches!(
        err,
        InputError::MissingField {
            index: 0,
            field: "line"
        }
    ));
}

#[test]
fn null_element_is_rejected() {
    let err = parse_input("[null]").unwrap_err();
    assert!(matches!(err, InputError::MissingField { index: 0, .. }));
}
