use serde::Deserialize;
use serde_json::Value;
use shared::ChattelItem;

/// Locates the first JSON-looking payload in free-form model output.
///
/// Extraction priority: the earliest opening bracket (`{` or `[`) that has a
/// matching closing bracket later in the text starts the payload, and the
/// payload runs to the LAST such closing bracket. Text without a usable
/// bracket pair has no payload.
pub fn extract_json_span(text: &str) -> Option<&str> {
    let object = bracket_span(text, '{', '}');
    let array = bracket_span(text, '[', ']');

    let (start, end) = match (object, array) {
        (Some(object), Some(array)) => {
            if object.0 <= array.0 {
                object
            } else {
                array
            }
        }
        (Some(object), None) => object,
        (None, Some(array)) => array,
        (None, None) => return None,
    };

    Some(&text[start..=end])
}

fn bracket_span(text: &str, open: char, close: char) -> Option<(usize, usize)> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then_some((start, end))
}

/// The two payload shapes the chattel prompt allows: a bare array of items
/// or an `{items: [...]}` wrapper.
#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsPayload {
    Wrapped { items: Vec<Value> },
    Bare(Vec<Value>),
}

impl ItemsPayload {
    fn into_raw_items(self) -> Vec<Value> {
        match self {
            ItemsPayload::Wrapped { items } => items,
            ItemsPayload::Bare(items) => items,
        }
    }
}

/// Parses an extracted span into chattel items. Invalid JSON is an error;
/// valid JSON of any other shape is an empty list, and elements missing a
/// string name or numeric cost/confidence are silently dropped.
pub fn parse_chattel_items(span: &str) -> Result<Vec<ChattelItem>, serde_json::Error> {
    let parsed: Value = serde_json::from_str(span)?;

    let raw_items = match serde_json::from_value::<ItemsPayload>(parsed) {
        Ok(payload) => payload.into_raw_items(),
        Err(_) => Vec::new(),
    };

    Ok(raw_items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<ChattelItem>(item).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_is_taken_from_the_earliest_opening_bracket() {
        assert_eq!(
            extract_json_span("Here you go: [1, 2] and also {\"a\": 1}"),
            Some("[1, 2] and also {\"a\": 1}")
        );
        assert_eq!(
            extract_json_span("Result {\"items\": []} trailing [ignored]"),
            Some("{\"items\": []} trailing [ignored]")
        );
    }

    #[test]
    fn span_is_greedy_to_the_last_closer() {
        assert_eq!(
            extract_json_span("x {\"a\": {\"b\": 2}} y"),
            Some("{\"a\": {\"b\": 2}}")
        );
    }

    #[test]
    fn bracket_free_text_has_no_span() {
        assert_eq!(extract_json_span("I could not find any items."), None);
    }

    #[test]
    fn unclosed_bracket_has_no_span() {
        assert_eq!(extract_json_span("nothing here {"), None);
    }

    #[test]
    fn malformed_entries_are_dropped() {
        let items = parse_chattel_items(
            r#"[{"name":"Sofa","replacementCost":500,"confidence":0.9},{"bad":"entry"}]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Sofa");
        assert_eq!(items[0].replacement_cost, 500.0);
    }

    #[test]
    fn wrapped_items_object_is_unwrapped() {
        let items = parse_chattel_items(
            r#"{"items":[{"name":"Dining table","replacementCost":1200,"confidence":0.8}]}"#,
        )
        .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Dining table");
    }

    #[test]
    fn wrong_value_types_are_dropped() {
        let items = parse_chattel_items(
            r#"[{"name":"Rug","replacementCost":"300","confidence":0.7},
                {"name":42,"replacementCost":300,"confidence":0.7}]"#,
        )
        .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn non_list_shapes_yield_an_empty_list() {
        assert!(parse_chattel_items(r#"{"rooms": []}"#).unwrap().is_empty());
        assert!(parse_chattel_items("42").unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(parse_chattel_items("{sorry}").is_err());
    }

    #[test]
    fn negative_cost_and_overconfidence_survive_unclamped() {
        let items = parse_chattel_items(
            r#"[{"name":"Mystery","replacementCost":-50,"confidence":1.4}]"#,
        )
        .unwrap();
        assert_eq!(items[0].replacement_cost, -50.0);
        assert_eq!(items[0].confidence, 1.4);
    }
}
