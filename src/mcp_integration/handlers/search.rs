//! Search handler for MCP integration
//!
//! Before running the caller's query, the handler inspects the index
//! mapping and asks the store to highlight every `text` and `dense_vector`
//! field. A caller-supplied `highlight` section is left untouched.
//!
//! The result is a metadata fragment, an optional aggregations fragment and
//! one fragment per hit listing highlighted fields before the remaining
//! source fields.

use super::pretty;
use crate::{
    error::ToolError, mcp_integration::core::ToolResult, schema::Arguments, store::StoreClient,
};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value, json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchArgs {
    index: String,
    query_body: Map<String, Value>,
}

const HIGHLIGHTED_TYPES: &[&str] = &["text", "dense_vector"];

/// Top-level fields eligible for highlighting, across every index in a
/// `_mapping` response. Sorted and deduplicated.
pub fn highlightable_fields(mapping: &Value) -> Vec<String> {
    let mut fields: Vec<String> = mapping
        .as_object()
        .into_iter()
        .flat_map(|indices| indices.values())
        .filter_map(|entry| entry.pointer("/mappings/properties")?.as_object())
        .flat_map(|properties| properties.iter())
        .filter(|(_, field)| {
            field
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|t| HIGHLIGHTED_TYPES.contains(&t))
        })
        .map(|(name, _)| name.clone())
        .collect();
    fields.sort();
    fields.dedup();
    fields
}

/// The `highlight` request section for the given fields.
pub fn highlight_section(fields: &[String]) -> Value {
    let fields: Map<String, Value> = fields
        .iter()
        .map(|name| (name.clone(), json!({})))
        .collect();
    json!({
        "fields": fields,
        "pre_tags": ["<em>"],
        "post_tags": ["</em>"],
    })
}

/// Handle search through MCP
pub async fn handle_search(
    store: &dyn StoreClient,
    args: Arguments,
) -> Result<ToolResult, ToolError> {
    let args: SearchArgs = args.parse()?;
    let mut body = args.query_body;

    if !body.contains_key("highlight") {
        let mapping = store.get_mapping(&args.index).await?;
        let fields = highlightable_fields(&mapping);
        debug!(
            "Highlighting {} fields for search on '{}'",
            fields.len(),
            args.index
        );
        if !fields.is_empty() {
            body.insert("highlight".to_string(), highlight_section(&fields));
        }
    }

    let from = body.get("from").and_then(Value::as_u64).unwrap_or(0);
    let response = store.search(&args.index, Value::Object(body)).await?;
    render_search_response(&response, from)
}

/// Turn a search response into result fragments.
pub fn render_search_response(response: &Value, from: u64) -> Result<ToolResult, ToolError> {
    let hits = response
        .pointer("/hits/hits")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let total = match response.pointer("/hits/total") {
        Some(Value::Object(total)) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
        Some(total) => total.as_u64().unwrap_or(0),
        None => {
            warn!("Search response carried no hit total");
            0
        }
    };

    let mut result = ToolResult::text(format!(
        "Total results: {}, showing {} from position {}",
        total,
        hits.len(),
        from
    ));

    if let Some(aggregations) = response.get("aggregations") {
        result = result.with_text(format!("Aggregations: {}", pretty(aggregations)?));
    }

    for hit in hits {
        result = result.with_text(render_hit(hit)?);
    }
    Ok(result)
}

fn render_hit(hit: &Value) -> Result<String, ToolError> {
    let id = hit.get("_id").and_then(Value::as_str).unwrap_or("unknown");
    let score = match hit.get("_score").and_then(Value::as_f64) {
        Some(score) => score.to_string(),
        None => "N/A".to_string(),
    };
    let mut lines = vec![format!("ID: {id}"), format!("Score: {score}")];

    let highlight = hit.get("highlight").and_then(Value::as_object);
    if let Some(highlight) = highlight {
        for (field, fragments) in highlight {
            let fragments = match fragments {
                Value::Array(parts) => parts
                    .iter()
                    .map(|part| part.as_str().map(str::to_string).unwrap_or_else(|| part.to_string()))
                    .collect::<Vec<_>>()
                    .join(" ... "),
                other => other.to_string(),
            };
            lines.push(format!("{field} (highlighted): {fragments}"));
        }
    }

    if let Some(source) = hit.get("_source").and_then(Value::as_object) {
        for (field, value) in source {
            if highlight.is_some_and(|h| h.contains_key(field)) {
                continue;
            }
            lines.push(format!("{field}: {}", serde_json::to_string(value)?));
        }
    }

    Ok(lines.join("\n"))
}
