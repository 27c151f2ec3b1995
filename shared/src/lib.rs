use serde::{Deserialize, Serialize};

/// One room detected in a floor plan. `dimensions` is free text as reported
/// by the analyser (e.g. "12ft x 10ft"); `area` is square feet.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoomRecord {
    pub name: String,
    pub dimensions: String,
    pub area: f64,
    pub features: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FloorPlanResult {
    pub rooms: Vec<RoomRecord>,
    pub total_area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set by the analyser when the image is not a floor plan at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A chattel/furniture item with an estimated replacement cost in GBP.
/// Values come straight from the analyser: the cost is not checked for sign
/// and the confidence is not clamped to 0..=1.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChattelItem {
    pub name: String,
    pub replacement_cost: f64,
    pub confidence: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChattelReport {
    pub items: Vec<ChattelItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn floor_plan_result_uses_camel_case_keys() {
        let result = FloorPlanResult {
            rooms: vec![RoomRecord {
                name: "Kitchen".into(),
                dimensions: "12ft x 10ft".into(),
                area: 120.0,
                features: vec!["island".into()],
            }],
            total_area: 120.0,
            notes: None,
            error: None,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "rooms": [{
                    "name": "Kitchen",
                    "dimensions": "12ft x 10ft",
                    "area": 120.0,
                    "features": ["island"]
                }],
                "totalArea": 120.0
            })
        );
    }

    #[test]
    fn chattel_item_reads_camel_case_cost() {
        let item: ChattelItem =
            serde_json::from_value(json!({"name": "Sofa", "replacementCost": 500, "confidence": 0.9}))
                .unwrap();
        assert_eq!(item.replacement_cost, 500.0);
    }

    #[test]
    fn chattel_report_omits_absent_notes() {
        let body = serde_json::to_string(&ChattelReport::default()).unwrap();
        assert_eq!(body, r#"{"items":[]}"#);
    }
}
