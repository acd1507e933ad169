#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Shared schema and validation for the coffee order service.

pub mod api;
pub mod model;
pub mod validation;

pub use api::{CreateOrder, CreateOrderRequest, HealthResponse};
pub use model::{NewOrder, Order, OrderId};
pub use validation::{parse_create_order, validate_create_order, FieldErrors, ValidationError};
