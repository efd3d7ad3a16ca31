//! Account events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Something that happened on the account, such as `customer.created`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event identifier.
    pub id: String,
    /// Event type, e.g. `transaction.payment_succeeded`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Snapshot of the affected object.
    pub data: Value,
    /// Changed attributes before the event, for update events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<Value>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_keeps_loose_payload() {
        let event: Event = serde_json::from_str(
            r#"{
                "id": "evt_1",
                "type": "customer.updated",
                "data": {"id": "cus_1", "name": "Jane Roe"},
                "previous": {"name": "Jane Doe"},
                "created_at": "2017-05-19T12:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(event.kind, "customer.updated");
        assert_eq!(event.data["name"], "Jane Roe");
        assert_eq!(event.previous.unwrap()["name"], "Jane Doe");
    }

    #[test]
    fn test_event_without_previous() {
        let event: Event = serde_json::from_str(
            r#"{"id":"evt_2","type":"customer.created","data":{},"created_at":"2017-05-19T12:00:00Z"}"#,
        )
        .unwrap();
        assert!(event.previous.is_none());

        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("previous").is_none());
        assert_eq!(json["type"], "customer.created");
    }
}
