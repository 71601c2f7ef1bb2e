use serde::Deserialize;
use serde_json::Value;

/// Envelope of a CKAN `datastore_search` response
#[derive(Debug, Clone, Deserialize)]
pub struct DatastoreResponse {
    pub success: bool,
    pub result: DatastoreResult,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatastoreResult {
    pub total: usize,
    #[serde(default)]
    pub records: Vec<Value>,
}

/// Extract the record list from a local dump: either a bare JSON array,
/// `{"records": [...]}`, or a full CKAN response.
pub fn records_from_dump(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(records) => Some(records),
        Value::Object(mut obj) => {
            if let Some(Value::Array(records)) = obj.remove("records") {
                return Some(records);
            }
            match obj.remove("result") {
                Some(result) => records_from_dump(result),
                None => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_datastore_response() {
        let response: DatastoreResponse = serde_json::from_value(json!({
            "success": true,
            "result": { "total": 2, "records": [{ "a": 1 }, { "a": 2 }], "limit": 10000 }
        }))
        .unwrap();

        assert!(response.success);
        assert_eq!(response.result.total, 2);
        assert_eq!(response.result.records.len(), 2);
    }

    #[test]
    fn test_records_from_dump_shapes() {
        assert_eq!(records_from_dump(json!([1, 2])).map(|r| r.len()), Some(2));
        assert_eq!(records_from_dump(json!({ "records": [1] })).map(|r| r.len()), Some(1));
        assert_eq!(
            records_from_dump(json!({ "result": { "total": 3, "records": [1, 2, 3] } }))
                .map(|r| r.len()),
            Some(3)
        );
        assert!(records_from_dump(json!({ "rows": [] })).is_none());
        assert!(records_from_dump(json!("nope")).is_none());
    }
}
