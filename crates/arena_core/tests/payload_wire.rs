use arena_core::{EngineId, ParseMetadata, ParseResponse};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn decodes_engine_success_body() {
    let body = json!({
        "status": "success",
        "metadata": {
            "parser": "pymupdf",
            "pages_processed": 4,
            "filename": "thesis.pdf",
            "duration_ms": 812.25
        },
        "content": "## Abstract"
    });

    let response: ParseResponse = serde_json::from_value(body).unwrap();

    assert_eq!(
        response,
        ParseResponse {
            status: "success".to_string(),
            metadata: ParseMetadata {
                parser: "pymupdf".to_string(),
                pages_processed: 4,
                filename: "thesis.pdf".to_string(),
                duration_ms: 812.25,
            },
            content: "## Abstract".to_string(),
        }
    );
}

#[test]
fn body_without_metadata_is_rejected() {
    let body = json!({ "status": "success", "content": "text" });
    assert!(serde_json::from_value::<ParseResponse>(body).is_err());
}

#[test]
fn engine_ids_use_lowercase_wire_names() {
    let encoded = serde_json::to_value(EngineId::ALL).unwrap();
    assert_eq!(encoded, json!(["docling", "pdfminer", "pymupdf", "pypdf2"]));

    let decoded: EngineId = serde_json::from_value(json!("pypdf2")).unwrap();
    assert_eq!(decoded, EngineId::Pypdf2);
    assert!(serde_json::from_value::<EngineId>(json!("Docling")).is_err());
}
