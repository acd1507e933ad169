use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use order_core::{
    api::{CREATE_ORDER_PATH, HEALTH_PATH, ORDERS_BY_AGENT_ROUTE},
    parse_create_order, HealthResponse, Order,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info};

use crate::store::OrderStore;

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn OrderStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Run a store call on the blocking pool.
    async fn with_store<T, F>(&self, f: F) -> anyhow::Result<T>
    where
        F: FnOnce(&dyn OrderStore) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(store.as_ref())).await?
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(CREATE_ORDER_PATH, post(create_order))
        .route("/orders", post(create_order))
        .route(ORDERS_BY_AGENT_ROUTE, get(list_orders_by_agent))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// The body is taken raw so malformed or incomplete input gets a
/// field-level 400 instead of the extractor's plain-text rejection.
async fn create_order(State(st): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let new = match parse_create_order(&body) {
        Ok(new) => new,
        Err(e) => {
            debug!(error = %e, "order rejected");
            return Ok((StatusCode::BAD_REQUEST, Json(e.payload())).into_response());
        }
    };

    let order = st.with_store(move |store| store.create(new)).await?;
    info!(order_id = order.id, agent_id = %order.agent_id, item = %order.item, "order created");
    Ok((StatusCode::CREATED, Json(order)).into_response())
}

async fn list_orders_by_agent(
    State(st): State<AppState>,
    Path(agent_id): Path<String>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = st
        .with_store(move |store| store.list_by_agent(&agent_id))
        .await?;
    Ok(Json(orders))
}

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for AppError {
    fn from(value: E) -> Self {
        Self(value.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "request failed");
        let body = Json(serde_json::json!({
            "error": self.0.to_string()
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
