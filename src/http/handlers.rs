//! Request handlers.
//!
//! Each handler opens its span through the telemetry facade and never
//! checks whether telemetry is actually being recorded.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::http::response::{ErrorBody, Health, Inventory, OrderCreated};
use crate::http::server::AppState;
use crate::observability::{KeyValue, ORDERS_PROCESSED};
use crate::simulation::ORDER_NUMBER_RANGE;

/// Format an order id, clamping the number so the id is always `ORD-` plus five digits.
pub fn format_order_id(number: u32) -> String {
    let number = number.clamp(*ORDER_NUMBER_RANGE.start(), *ORDER_NUMBER_RANGE.end());
    format!("ORD-{}", number)
}

/// `POST /createOrder`
pub async fn create_order(State(state): State<AppState>) -> Response {
    let mut span = state.telemetry.start_span("db_process_order");
    let order_id = format_order_id(state.simulator.order_number());
    span.set_attribute("order.id", order_id.clone());
    span.set_attribute("order.value", state.simulator.order_value());

    let work = tokio::time::sleep(state.simulator.order_delay());
    span.instrument(work).await;

    let orders = state.telemetry.counter(ORDERS_PROCESSED);
    if state.simulator.order_succeeds() {
        span.add_event(
            "Order created successfully",
            &[KeyValue::new("order.status", "success")],
        );
        orders.add(1, &[KeyValue::new("status", "success")]);
        tracing::debug!(order_id = %order_id, "Order created");
        (StatusCode::OK, Json(OrderCreated::new(order_id))).into_response()
    } else {
        span.add_event(
            "Order creation failed",
            &[KeyValue::new("order.status", "failed")],
        );
        orders.add(1, &[KeyValue::new("status", "failed")]);
        tracing::debug!(order_id = %order_id, "Order creation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::order_failed())).into_response()
    }
}

/// `GET /checkInventory`
pub async fn check_inventory(State(state): State<AppState>) -> Json<Inventory> {
    let mut span = state.telemetry.start_span("inventory_check");
    let delay = state.simulator.inventory_delay();
    span.set_attribute("inventory.delay_ms", delay.as_secs_f64() * 1000.0);

    let work = tokio::time::sleep(delay);
    span.instrument(work).await;

    let stock = state.simulator.stock_level();
    span.set_attribute("inventory.count", stock);
    Json(Inventory {
        available_items: stock,
    })
}

/// `GET /health`
pub async fn health() -> Json<Health> {
    Json(Health::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_order_id() {
        assert_eq!(format_order_id(12345), "ORD-12345");
        assert_eq!(format_order_id(7), "ORD-10000");
        assert_eq!(format_order_id(1_000_000), "ORD-99999");
    }
}
