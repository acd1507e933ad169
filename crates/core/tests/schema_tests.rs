//! Wire-shape tests for the shared schema.

use order_core::{CreateOrder, CreateOrderRequest, HealthResponse, NewOrder, Order};

#[test]
fn test_order_json_shape() {
    let order = Order {
        id: 1,
        agent_id: "a1".into(),
        item: "latte".into(),
    };
    let value = serde_json::to_value(&order).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"id": 1, "agent_id": "a1", "item": "latte"})
    );
}

#[test]
fn test_order_list_decodes() {
    let body = r#"[{"id":1,"agent_id":"a1","item":"latte"},{"id":3,"agent_id":"a1","item":"mocha"}]"#;
    let orders: Vec<Order> = serde_json::from_str(body).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[1].id, 3);
    assert!(orders.iter().all(|o| o.agent_id == "a1"));
}

#[test]
fn test_create_order_for_agent() {
    let req = CreateOrder::new("cortado").for_agent("agent-7");
    assert_eq!(
        req,
        CreateOrderRequest {
            agent_id: "agent-7".into(),
            item: "cortado".into(),
        }
    );
    let serialized = serde_json::to_string(&req).unwrap();
    assert_eq!(serialized, r#"{"agent_id":"agent-7","item":"cortado"}"#);
}

#[test]
fn test_health_response() {
    let serialized = serde_json::to_string(&HealthResponse::healthy()).unwrap();
    assert_eq!(serialized, r#"{"status":"healthy"}"#);
}

#[test]
fn test_new_order_into_order() {
    let new = NewOrder {
        agent_id: "a1".into(),
        item: "latte".into(),
    };
    let order = new.into_order(9);
    assert_eq!(order.id, 9);
    assert_eq!(order.item, "latte");
}
