use checklist_core::{
    transform, Document, FormatterDefaults, FormatterSession, InputRecord, ItemType, ProcessError,
};
use serde_json::Value;
use std::collections::HashSet;

fn session_with(input: &str, document_title: &str, section_title: &str) -> FormatterSession {
    let mut session = FormatterSession::default();
    session.set_document_title(document_title);
    session.set_section_title(section_title);
    session.paste(input).unwrap();
    session
}

#[test]
fn safety_checklist_example_exports_expected_shape() {
    let mut session = session_with(
        r#"[{"line":"1","name":"Fire extinguisher"}]"#,
        "Safety",
        "Checklist",
    );
    assert_eq!(session.process().unwrap(), 1);

    let exported: Value = serde_json::from_str(&session.export_json().unwrap()).unwrap();
    let documents = exported.as_array().unwrap();
    assert_eq!(documents.len(), 1);

    let document = &documents[0];
    assert_eq!(document["text"], "Safety");
    assert_eq!(document["id"], session.ids().document_id.as_str());

    let sections = document["children"].as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["text"], "Checklist");
    assert_eq!(sections[0]["id"], session.ids().section_id.as_str());

    let items = sections[0]["children"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["line"], "1");
    assert_eq!(items[0]["name"], "Fire extinguisher");
    assert_eq!(items[0]["title"], "<p>Fire extinguisher</p>");
    assert_eq!(items[0]["type"], "number_type2");
    assert_eq!(items[0]["expanded"], true);
    assert_eq!(items[0]["is_mandatory"], false);
    assert_eq!(items[0]["children"], Value::Array(Vec::new()));
}

#[test]
fn transform_is_one_to_one_in_order_with_distinct_ids() {
    let inputs = (1..=25)
        .map(|n| InputRecord::new(n.to_string(), format!("Item {n}")))
        .collect::<Vec<_>>();

    let items = transform(&inputs, "Doc", "Sec", &FormatterDefaults::default()).unwrap();

    assert_eq!(items.len(), inputs.len());
    for (input, item) in inputs.iter().zip(items.iter()) {
        assert_eq!(item.line, input.line);
        assert_eq!(item.name, input.name);
        assert_eq!(item.title, format!("<p>{}</p>", input.name));
    }
    let unique = items.iter().map(|item| item.uuid).collect::<HashSet<_>>();
    assert_eq!(unique.len(), items.len());
}

#[test]
fn reprocessing_generates_new_item_ids() {
    let mut session = session_with(r#"[{"line":"1","name":"a"}]"#, "Doc", "Sec");
    session.process().unwrap();
    let first = session.records()[0].uuid;
    session.process().unwrap();
    assert_ne!(session.records()[0].uuid, first);
}

#[test]
fn export_round_trips_into_typed_documents() {
    let mut session = session_with(
        r#"[{"line":"1","name":"a"},{"line":"2","name":"b"},{"line":"3","name":"c"}]"#,
        "Doc",
        "Sec",
    );
    session.process().unwrap();
    session.set_type(2, ItemType::TextType2).unwrap();

    let documents: Vec<Document> = serde_json::from_str(&session.export_json().unwrap()).unwrap();

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].children.len(), 1);
    assert_eq!(documents[0].children[0].children, session.records());
}

#[test]
fn exports_keep_ids_and_regenerate_uuids() {
    let mut session = session_with(r#"[{"line":"1","name":"a"}]"#, "Doc", "Sec");
    session.process().unwrap();

    let first: Value = serde_json::from_str(&session.export_json().unwrap()).unwrap();
    let second: Value = serde_json::from_str(&session.export_json().unwrap()).unwrap();

    assert_eq!(first[0]["id"], second[0]["id"]);
    assert_eq!(first[0]["children"][0]["id"], second[0]["children"][0]["id"]);
    assert_ne!(first[0]["uuid"], second[0]["uuid"]);
    assert_ne!(
        first[0]["children"][0]["uuid"],
        second[0]["children"][0]["uuid"]
    );
    assert_eq!(
        first[0]["children"][0]["children"],
        second[0]["children"][0]["children"]
    );
}

#[test]
fn empty_array_is_refused_by_process() {
    let mut session = session_with("[]", "Doc", "Sec");
    assert_eq!(session.process(), Err(ProcessError::NoInput));
    assert!(session.records().is_empty());
}

#[test]
fn blank_titles_are_refused() {
    let mut session = session_with(r#"[{"line":"1","name":"a"}]"#, "   ", "Sec");
    assert_eq!(session.process(), Err(ProcessError::BlankDocumentTitle));

    session.set_document_title("Doc");
    session.set_section_title("");
    assert_eq!(session.process(), Err(ProcessError::BlankSectionTitle));
    assert!(session.records().is_empty());
}

#[test]
fn export_reflects_title_changes_after_processing() {
    let mut session = session_with(r#"[{"line":"1","name":"a"}]"#, "Doc", "Sec");
    session.process().unwrap();
    session.set_section_title("Renamed");

    let exported: Value = serde_json::from_str(&session.export_json().unwrap()).unwrap();
    assert_eq!(exported[0]["children"][0]["text"], "Renamed");
}
