//! Wire types shared by the index client and its callers.

use serde::{Deserialize, Serialize};

/// Metadata attached to every stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// The text the vector was computed from.
    pub text: String,
}

/// A record written to the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Record identifier. Upserting an existing id overwrites it.
    pub id: String,

    /// The embedding.
    pub values: Vec<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,
}

impl VectorRecord {
    /// Build a record keyed by its own source text.
    pub fn from_text(text: impl Into<String>, values: Vec<f32>) -> Self {
        let text = text.into();
        Self {
            id: text.clone(),
            values,
            metadata: Some(RecordMetadata { text }),
        }
    }
}

/// A top-K similarity query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub namespace: String,
    pub vector: Vec<f32>,
    pub top_k: usize,
    pub include_values: bool,
    pub include_metadata: bool,
}

impl QueryRequest {
    /// Query the default namespace for the `top_k` nearest records.
    pub fn new(vector: Vec<f32>, top_k: usize) -> Self {
        Self {
            namespace: String::new(),
            vector,
            top_k,
            include_values: false,
            include_metadata: false,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Ask the index to echo stored vector values back.
    pub fn with_values(mut self, include: bool) -> Self {
        self.include_values = include;
        self
    }

    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }
}

/// One match returned by a query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMatch {
    pub id: String,

    /// Similarity score; higher is closer.
    pub score: f64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl ScoredMatch {
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
            values: Vec::new(),
            metadata: None,
        }
    }
}

/// Result of a query, matches ranked by the index.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub matches: Vec<ScoredMatch>,

    #[serde(default)]
    pub namespace: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_record_from_text_uses_text_as_id() {
        let record = VectorRecord::from_text("strap snapped", vec![0.5]);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"id": "strap snapped", "values": [0.5], "metadata": {"text": "strap snapped"}})
        );
    }

    #[test]
    fn test_query_request_wire_names() {
        let request = QueryRequest::new(vec![1.0], 3).with_values(true);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "namespace": "",
                "vector": [1.0],
                "topK": 3,
                "includeValues": true,
                "includeMetadata": false
            })
        );
    }

    #[test]
    fn test_query_response_tolerates_missing_fields() {
        let response: QueryResponse = serde_json::from_value(json!({
            "matches": [{"id": "a", "score": 0.9}],
            "usage": {"readUnits": 5}
        }))
        .unwrap();

        assert_eq!(response.matches, vec![ScoredMatch::new("a", 0.9)]);
        assert_eq!(response.namespace, "");
    }
}
