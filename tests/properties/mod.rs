//! Property-based tests for configuration, bulk compilation and reporting.

use elastic_mcp_server::bulk::{self, BulkAction, BulkOperation};
use elastic_mcp_server::config::{AuthMode, RawConfig};
use elastic_mcp_server::error::ConfigError;
use elastic_mcp_server::query_mutation::{
    MutationKind, QueryMutationResult, build_delete_by_query_params,
};
use elastic_mcp_server::report::push_failure_list;
use proptest::prelude::*;
use serde_json::{Value, json};

fn credential() -> impl Strategy<Value = Option<String>> {
    prop::option::of("[a-zA-Z0-9]{1,12}")
}

fn action() -> impl Strategy<Value = BulkAction> {
    prop_oneof![
        Just(BulkAction::Index),
        Just(BulkAction::Create),
        Just(BulkAction::Update),
        Just(BulkAction::Delete),
    ]
}

/// A valid operation: ids where required, documents where required.
fn valid_operation() -> impl Strategy<Value = BulkOperation> {
    (action(), "[a-z]{1,6}", "[a-z0-9]{1,6}", any::<i32>()).prop_map(|(action, index, id, n)| {
        let op = BulkOperation::new(action, index).with_id(id);
        match action {
            BulkAction::Delete => op,
            _ => op.with_document(json!({ "n": n })),
        }
    })
}

/// A store item for `op`, failed or successful.
fn item_for(op: &BulkOperation, failed: bool) -> Value {
    let mut result = json!({
        "_index": op.index,
        "_id": op.id.clone().unwrap_or_default(),
        "status": if failed { 409 } else { 200 },
    });
    if failed {
        result["error"] = json!({"type": "version_conflict_engine_exception", "reason": "conflict"});
    } else {
        result["result"] = json!("ok");
    }
    let mut item = serde_json::Map::new();
    item.insert(op.action.as_str().to_string(), result);
    Value::Object(item)
}

fn failure_lines(text: &str) -> usize {
    text.lines()
        .filter(|line| {
            line.split_once(". ")
                .is_some_and(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        })
        .count()
}

proptest! {
    #[test]
    fn prop_exactly_three_auth_shapes_are_accepted(
        api_key in credential(),
        username in credential(),
        password in credential(),
    ) {
        let expected_ok = matches!(
            (&api_key, &username, &password),
            (Some(_), None, None) | (None, Some(_), Some(_)) | (None, None, None)
        );

        let result = RawConfig {
            url: Some("http://localhost:9200".to_string()),
            api_key: api_key.clone(),
            username: username.clone(),
            password: password.clone(),
            ..RawConfig::default()
        }
        .validate();

        match result {
            Ok(config) => {
                prop_assert!(expected_ok);
                match config.auth {
                    AuthMode::ApiKey(key) => prop_assert_eq!(Some(key), api_key),
                    AuthMode::Basic { username: u, password: p } => {
                        prop_assert_eq!(Some(u), username);
                        prop_assert_eq!(Some(p), password);
                    }
                    AuthMode::None => {
                        prop_assert!(api_key.is_none() && username.is_none() && password.is_none());
                    }
                }
            }
            Err(err) => {
                prop_assert!(!expected_ok);
                prop_assert!(matches!(err, ConfigError::InvalidAuth));
            }
        }
    }

    #[test]
    fn prop_wire_length_and_order(ops in prop::collection::vec(valid_operation(), 0..40)) {
        let compiled = bulk::compile(&ops).unwrap();
        let deletes = ops.iter().filter(|op| op.action == BulkAction::Delete).count();
        let others = ops.len() - deletes;

        prop_assert_eq!(compiled.entries.len(), 2 * others + deletes);
        prop_assert_eq!(compiled.action_positions.len(), ops.len());
        for (op, &pos) in ops.iter().zip(&compiled.action_positions) {
            let descriptor = compiled.entries[pos].as_object().unwrap();
            prop_assert!(descriptor.contains_key(op.action.as_str()));
            prop_assert_eq!(&descriptor[op.action.as_str()]["_index"], &json!(op.index));
        }
    }

    #[test]
    fn prop_summary_covers_every_operation_in_order(
        cases in prop::collection::vec((valid_operation(), any::<bool>()), 1..30),
    ) {
        let ops: Vec<BulkOperation> = cases.iter().map(|(op, _)| op.clone()).collect();
        let items: Vec<Value> = cases.iter().map(|(op, failed)| item_for(op, *failed)).collect();
        let response = json!({"took": 5, "errors": true, "items": items});

        let summary = bulk::summarize(&ops, &response);

        prop_assert_eq!(summary.items.len(), ops.len());
        prop_assert_eq!(summary.success_count + summary.failure_count, ops.len());
        prop_assert_eq!(
            summary.failure_count,
            cases.iter().filter(|(_, failed)| *failed).count()
        );
        for (i, (record, (op, failed))) in summary.items.iter().zip(&cases).enumerate() {
            prop_assert_eq!(record.operation_index, i);
            prop_assert_eq!(&record.action, op.action.as_str());
            prop_assert_eq!(record.is_failure(), *failed);
        }
    }

    #[test]
    fn prop_summarize_is_idempotent(
        cases in prop::collection::vec((valid_operation(), any::<bool>()), 0..20),
        truncate in 0usize..5,
    ) {
        let ops: Vec<BulkOperation> = cases.iter().map(|(op, _)| op.clone()).collect();
        // Drop trailing items to exercise the missing-item fallback too.
        let keep = cases.len().saturating_sub(truncate);
        let items: Vec<Value> = cases
            .iter()
            .take(keep)
            .map(|(op, failed)| item_for(op, *failed))
            .collect();
        let response = json!({"took": 1, "items": items});

        let first = bulk::summarize(&ops, &response);
        let second = bulk::summarize(&ops, &response);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.render(), second.render());
        prop_assert_eq!(first.items.len(), ops.len());
    }

    #[test]
    fn prop_truncation_law(total in 0usize..40) {
        let entries = (0..total).map(|i| format!("ID: d{i}, Reason: conflict"));
        let mut out = String::from("Delete by query completed");
        push_failure_list(&mut out, "Failures:", entries, total);

        prop_assert_eq!(failure_lines(&out), total.min(5));
        let overflow = format!("...and {} more failures", total.saturating_sub(5));
        prop_assert_eq!(out.contains("more failures"), total > 5);
        if total > 5 {
            prop_assert!(out.ends_with(&overflow));
        }
    }

    #[test]
    fn prop_query_report_truncation(failed in 0usize..20) {
        let failures: Vec<Value> = (0..failed)
            .map(|i| json!({"id": format!("d{i}"), "cause": {"reason": "conflict"}}))
            .collect();
        let response = json!({"took": 3, "total": 20, "deleted": 20 - failed, "failures": failures});

        let report = QueryMutationResult::from_response(MutationKind::DeleteByQuery, &response);
        prop_assert_eq!(report.failure_count, failed);
        prop_assert_eq!(report.failures.len(), failed.min(5));
        prop_assert_eq!(report.overflow, failed.saturating_sub(5));

        let text = report.render("a");
        prop_assert_eq!(failure_lines(&text), failed.min(5));
    }

    #[test]
    fn prop_refresh_tri_state(refresh in prop::option::of(any::<bool>())) {
        let params = build_delete_by_query_params("a", json!({"match_all": {}}), None, None, refresh);
        prop_assert_eq!(params.refresh, refresh != Some(false));
        prop_assert_eq!(
            &params.query_string()[0],
            &("refresh", (refresh != Some(false)).to_string())
        );
    }
}

#[test]
fn test_invalid_operation_anywhere_blocks_compilation() {
    let mut ops: Vec<BulkOperation> = (0..6)
        .map(|i| BulkOperation::new(BulkAction::Index, "a").with_document(json!({ "i": i })))
        .collect();
    ops.insert(3, BulkOperation::new(BulkAction::Delete, "a"));

    let err = bulk::compile(&ops).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Operation #4 (delete): Document ID is required for delete operations"
    );
}
