//! JSON response bodies.
//!
//! # Design Decisions
//! - Error bodies carry a fixed message; internal errors never reach the client
//! - Field names match the public API (`orderId`, `availableItems`)

use serde::{Deserialize, Serialize};

/// Body of a successful `POST /createOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub status: String,
    pub order_id: String,
}

impl OrderCreated {
    pub fn new(order_id: String) -> Self {
        Self {
            status: "success".to_string(),
            order_id,
        }
    }
}

/// Body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
}

impl ErrorBody {
    pub fn order_failed() -> Self {
        Self {
            status: "error".to_string(),
            message: "Failed to create order".to_string(),
        }
    }
}

/// Body of `GET /checkInventory`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    pub available_items: u32,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
}

impl Health {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_value(OrderCreated::new("ORD-12345".into())).unwrap(),
            json!({"status": "success", "orderId": "ORD-12345"})
        );
        assert_eq!(
            serde_json::to_value(ErrorBody::order_failed()).unwrap(),
            json!({"status": "error", "message": "Failed to create order"})
        );
        assert_eq!(
            serde_json::to_value(Inventory { available_items: 7 }).unwrap(),
            json!({"availableItems": 7})
        );
        assert_eq!(
            serde_json::to_value(Health::healthy()).unwrap(),
            json!({"status": "healthy"})
        );
    }
}
