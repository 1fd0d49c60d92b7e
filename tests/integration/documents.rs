//! Single-document tool tests.

use crate::common::{Call, MockStore, call, server_with};
use serde_json::json;

#[tokio::test]
async fn test_add_document_reports_store_assigned_id() {
    let store = MockStore::new().respond(
        "index_document",
        json!({"_index": "a", "_id": "Xq3v8ZABc-123", "result": "created"}),
    );
    let (server, store) = server_with(store);

    let result = call(&server, "add_document", json!({"index": "a", "document": {"x": 1}})).await;

    assert!(!result.is_error);
    let text = result.first_text().unwrap();
    assert!(text.contains("Xq3v8ZABc-123"), "{text}");
    assert_eq!(
        text,
        "Document added to index 'a' with ID: Xq3v8ZABc-123 (result: created)"
    );
    assert_eq!(
        store.calls(),
        vec![Call::IndexDocument {
            index: "a".to_string(),
            id: None,
            document: json!({"x": 1}),
        }]
    );
}

#[tokio::test]
async fn test_add_document_with_explicit_id() {
    let store = MockStore::new().respond(
        "index_document",
        json!({"_index": "a", "_id": "doc-1", "result": "updated"}),
    );
    let (server, store) = server_with(store);

    let result = call(
        &server,
        "add_document",
        json!({"index": "a", "id": "doc-1", "document": {"x": 2}}),
    )
    .await;

    assert!(result.first_text().unwrap().contains("with ID: doc-1 (result: updated)"));
    match &store.calls()[0] {
        Call::IndexDocument { id, .. } => assert_eq!(id.as_deref(), Some("doc-1")),
        other => panic!("unexpected call: {other:?}"),
    }
}

#[tokio::test]
async fn test_add_document_requires_object_document() {
    let (server, store) = server_with(MockStore::new());

    let result = call(&server, "add_document", json!({"index": "a", "document": "x"})).await;

    assert!(result.is_error);
    assert_eq!(
        result.first_text(),
        Some("Error: Invalid arguments for tool 'add_document': Argument 'document' has invalid type, expected object, got string")
    );
    assert_eq!(store.call_count(), 0);
}

#[tokio::test]
async fn test_update_and_delete_document() {
    let store = MockStore::new()
        .respond("update_document", json!({"_id": "7", "result": "updated"}))
        .respond("delete_document", json!({"_id": "7", "result": "deleted"}));
    let (server, store) = server_with(store);

    let updated = call(
        &server,
        "update_document",
        json!({"index": "a", "id": "7", "document": {"status": "done"}}),
    )
    .await;
    assert_eq!(
        updated.first_text(),
        Some("Document '7' in index 'a' updated (result: updated)")
    );

    let deleted = call(&server, "delete_document", json!({"index": "a", "id": "7"})).await;
    assert_eq!(
        deleted.first_text(),
        Some("Document '7' deleted from index 'a' (result: deleted)")
    );

    assert_eq!(
        store.calls(),
        vec![
            Call::UpdateDocument {
                index: "a".to_string(),
                id: "7".to_string(),
                partial: json!({"status": "done"}),
            },
            Call::DeleteDocument {
                index: "a".to_string(),
                id: "7".to_string(),
            },
        ]
    );
}

#[tokio::test]
async fn test_delete_missing_document_is_error_envelope() {
    let store = MockStore::new().fail("delete_document", 404, "not_found", "document missing");
    let (server, _) = server_with(store);

    let result = call(&server, "delete_document", json!({"index": "a", "id": "nope"})).await;
    assert!(result.is_error);
    assert_eq!(result.first_text(), Some("Error: not_found: document missing"));
}

#[tokio::test]
async fn test_count_documents() {
    let store = MockStore::new().respond("count", json!({"count": 42}));
    let (server, store) = server_with(store);

    let all = call(&server, "count_documents", json!({"index": "books"})).await;
    assert_eq!(all.first_text(), Some("Index 'books' contains 42 documents"));

    let filtered = call(
        &server,
        "count_documents",
        json!({"index": "books", "query": {"term": {"year": 1965}}}),
    )
    .await;
    assert_eq!(
        filtered.first_text(),
        Some("Index 'books' contains 42 documents matching the query")
    );

    assert_eq!(
        store.calls()[1],
        Call::Count {
            index: "books".to_string(),
            query: Some(json!({"term": {"year": 1965}})),
        }
    );
}
